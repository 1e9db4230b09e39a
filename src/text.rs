//! Plain-text helpers for remote item content: HTML flattening, word wrap,
//! link domains and relative timestamps.

use textwrap::Options;
use unicode_width::UnicodeWidthStr;
use url::{Host, Url};

/// Flatten the small HTML subset items use (`<p>`, `<br>`, `<a>`, `<i>`,
/// `<pre>`, `<code>`) into plain text with paragraph breaks, decoding entities.
///
/// Unknown tags are dropped; their text content is kept.
pub fn html_to_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(end) = tail.find('>') else {
            // Stray '<' with no closing bracket: keep it as text.
            out.push_str(tail);
            rest = "";
            break;
        };
        apply_tag(&tail[1..end], &mut out);
        rest = &tail[end + 1..];
    }
    out.push_str(rest);

    let decoded = html_escape::decode_html_entities(&out);
    decoded.trim().to_string()
}

fn apply_tag(tag: &str, out: &mut String) {
    let closing = tag.starts_with('/');
    let name = tag
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();

    match (name.as_str(), closing) {
        ("p", false) | ("pre", false) => paragraph_break(out),
        ("pre", true) => paragraph_break(out),
        ("br", _) => out.push('\n'),
        _ => {}
    }
}

fn paragraph_break(out: &mut String) {
    let trimmed = out.trim_end_matches([' ', '\t']).len();
    out.truncate(trimmed);
    if out.is_empty() || out.ends_with("\n\n") {
        return;
    }
    if out.ends_with('\n') {
        out.push('\n');
    } else {
        out.push_str("\n\n");
    }
}

/// Word-wrap `text` to `width` columns, keeping explicit line breaks.
///
/// Empty input yields no lines; blank source lines are kept as blank rows.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let width = width.max(1);
    let mut lines = Vec::new();
    for source_line in text.split('\n') {
        if source_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let options = Options::new(width).break_words(true);
        lines.extend(
            textwrap::wrap(source_line, options)
                .into_iter()
                .map(|cow| cow.into_owned()),
        );
    }
    lines
}

/// Display width of a string in terminal columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max` columns, appending `…` when something was cut.
pub fn truncate(s: &str, max: usize) -> String {
    if display_width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Host of a URL for display: lowercased, without a leading `www.`. IP
/// hosts are kept whole.
///
/// Returns `None` for strings that do not parse or have no host.
pub fn domain_of(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    let host = match url.host()? {
        Host::Domain(domain) => {
            let domain = domain.to_ascii_lowercase();
            match domain.strip_prefix("www.") {
                Some(rest) if !rest.is_empty() => rest.to_string(),
                _ => domain,
            }
        }
        Host::Ipv4(ip) => ip.to_string(),
        Host::Ipv6(ip) => ip.to_string(),
    };
    Some(host)
}

/// Current wall-clock time as Unix seconds.
pub fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Human "time ago" string for a Unix timestamp relative to `now`.
pub fn relative_time(timestamp: i64, now: i64) -> String {
    let secs = (now - timestamp).max(0);
    if secs < 60 {
        return ago(secs, "second");
    }
    let mins = secs / 60;
    if mins < 60 {
        return ago(mins, "minute");
    }
    let hours = mins / 60;
    if hours < 24 {
        return ago(hours, "hour");
    }
    let days = hours / 24;
    if days < 7 {
        return ago(days, "day");
    }
    if days < 30 {
        return ago(days / 7, "week");
    }
    if days < 365 {
        return ago(days / 30, "month");
    }
    ago(days / 365, "year")
}

fn ago(n: i64, unit: &str) -> String {
    match n {
        1 if unit == "hour" => "an hour ago".to_string(),
        1 => format!("a {unit} ago"),
        _ => format!("{n} {unit}s ago"),
    }
}
