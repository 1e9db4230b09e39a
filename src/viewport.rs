//! Fitting a cursor-centred window of variable-height items into a fixed
//! number of rows.

use std::ops::RangeInclusive;

/// Contiguous range of sibling indices chosen for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub first: usize,
    pub last: usize,
    /// The cursor item alone is taller than the available rows and must be
    /// cut to its first rows.
    pub clipped: bool,
}

impl Viewport {
    pub fn range(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }

    #[cfg(test)]
    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }
}

/// Lay out the window for fully known item heights.
///
/// Returns `None` for an empty list.
#[cfg(test)]
pub fn paginate(heights: &[usize], cursor: usize, available: usize) -> Option<Viewport> {
    paginate_with(heights.len(), cursor, available, |i| heights[i])
}

/// Lay out the window, measuring items only as they are considered.
///
/// The cursor item is placed first. The window then grows one sibling at a
/// time, strictly alternating up and down while both sides are open. A side
/// closes at the list boundary or at the first item that would not fit
/// whole. Growth stops when both sides are closed or the rows are used up.
pub fn paginate_with<F>(
    count: usize,
    cursor: usize,
    available: usize,
    mut height_of: F,
) -> Option<Viewport>
where
    F: FnMut(usize) -> usize,
{
    if count == 0 {
        return None;
    }
    let cursor = cursor.min(count - 1);

    let cursor_height = height_of(cursor);
    if cursor_height >= available {
        return Some(Viewport {
            first: cursor,
            last: cursor,
            clipped: cursor_height > available,
        });
    }

    let mut used = cursor_height;
    let mut first = cursor;
    let mut last = cursor;
    let mut up_open = first > 0;
    let mut down_open = last + 1 < count;
    let mut up_turn = true;

    while (up_open || down_open) && used < available {
        if (up_turn && up_open) || !down_open {
            let h = height_of(first - 1);
            if used + h <= available {
                first -= 1;
                used += h;
                up_open = first > 0;
            } else {
                up_open = false;
            }
        } else {
            let h = height_of(last + 1);
            if used + h <= available {
                last += 1;
                used += h;
                down_open = last + 1 < count;
            } else {
                down_open = false;
            }
        }
        up_turn = !up_turn;
    }

    Some(Viewport {
        first,
        last,
        clipped: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn total(heights: &[usize], vp: &Viewport) -> usize {
        heights[vp.first..=vp.last].iter().sum()
    }

    #[test]
    fn uneven_heights_scenario() {
        let heights = [3, 3, 3, 3, 3, 2, 3, 3, 3, 3];
        let vp = paginate(&heights, 5, 9).unwrap();
        assert_eq!((vp.first, vp.last), (4, 6));
        assert_eq!(total(&heights, &vp), 8);
        assert!(!vp.clipped);
    }

    #[test]
    fn empty_list_has_no_window() {
        assert_eq!(paginate(&[], 0, 10), None);
    }

    #[test]
    fn oversized_cursor_item_is_clipped_alone() {
        let heights = [2, 40, 2];
        let vp = paginate(&heights, 1, 10).unwrap();
        assert_eq!((vp.first, vp.last), (1, 1));
        assert!(vp.clipped);
    }

    #[test]
    fn exact_fit_cursor_item_is_not_clipped() {
        let vp = paginate(&[5, 10, 5], 1, 10).unwrap();
        assert_eq!((vp.first, vp.last), (1, 1));
        assert!(!vp.clipped);
    }

    #[test]
    fn zero_rows_shows_only_cursor() {
        let vp = paginate(&[1, 1, 1], 2, 0).unwrap();
        assert_eq!((vp.first, vp.last), (2, 2));
        assert!(vp.clipped);
    }

    #[test]
    fn window_grows_symmetrically() {
        let heights = [1; 7];
        let vp = paginate(&heights, 3, 5).unwrap();
        assert_eq!((vp.first, vp.last), (1, 5));
    }

    #[test]
    fn alternation_starts_upward() {
        let heights = [1, 1, 1, 4, 1, 1, 1];
        let vp = paginate(&heights, 3, 7).unwrap();
        assert_eq!((vp.first, vp.last), (1, 4));
    }

    #[test]
    fn does_not_drift_to_cheaper_side() {
        // Items above are tall, items below are short; a greedy fill would
        // take every short item below before any item above.
        let heights = [3, 3, 3, 1, 1, 1, 1, 1, 1];
        let vp = paginate(&heights, 3, 7).unwrap();
        assert_eq!((vp.first, vp.last), (2, 6));
    }

    #[test]
    fn closed_side_lets_other_side_continue() {
        let heights = [9, 1, 1, 1, 1];
        let vp = paginate(&heights, 1, 5).unwrap();
        assert_eq!((vp.first, vp.last), (1, 4));
    }

    #[test]
    fn cursor_at_edges() {
        let heights = [2; 10];
        let top = paginate(&heights, 0, 6).unwrap();
        assert_eq!((top.first, top.last), (0, 2));
        let bottom = paginate(&heights, 9, 6).unwrap();
        assert_eq!((bottom.first, bottom.last), (7, 9));
    }

    #[test]
    fn out_of_range_cursor_is_clamped() {
        let vp = paginate(&[1, 1, 1], 10, 1).unwrap();
        assert_eq!((vp.first, vp.last), (2, 2));
    }

    #[test]
    fn lazy_measuring_stops_at_window_edges() {
        let mut measured = Vec::new();
        let vp = paginate_with(1000, 500, 5, |i| {
            measured.push(i);
            1
        })
        .unwrap();
        assert_eq!(vp.len(), 5);
        assert!(measured.iter().all(|i| (498..=502).contains(i)));
    }

    proptest! {
        #[test]
        fn window_always_contains_cursor_and_fits(
            heights in prop::collection::vec(0..8usize, 1..30),
            cursor in any::<prop::sample::Index>(),
            available in 0..25usize,
        ) {
            let cursor = cursor.index(heights.len());
            let vp = paginate(&heights, cursor, available).unwrap();

            prop_assert!(vp.contains(cursor));
            prop_assert!(vp.last < heights.len());
            if vp.clipped {
                prop_assert_eq!((vp.first, vp.last), (cursor, cursor));
                prop_assert!(heights[cursor] > available);
            } else {
                prop_assert!(total(&heights, &vp) <= available);
            }
        }
    }
}
