pub mod focus;
pub mod help;
pub mod item;
pub mod list;
pub mod status_bar;
