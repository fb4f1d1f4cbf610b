//! Offset pagination bookkeeping for the posts board pager.

use crate::domain::posts::QueryState;

/// Visible range of the current page and the pager control states derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerWindow {
    pub start: u64,
    pub end: u64,
    pub total: u64,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

impl PagerWindow {
    /// `page` and `page_size` are expected to be at least 1.
    pub fn compute(total: u64, page: u32, page_size: u32) -> Self {
        let page = u64::from(page.max(1));
        let page_size = u64::from(page_size.max(1));

        let start = if total == 0 {
            0
        } else {
            (page - 1) * page_size + 1
        };
        let end = total.min(page * page_size);

        Self {
            start,
            end,
            total,
            prev_disabled: page <= 1,
            next_disabled: end >= total,
        }
    }

    pub fn for_state(total: u64, state: &QueryState) -> Self {
        Self::compute(total, state.page(), state.page_size())
    }

    pub fn label(&self) -> String {
        if self.total > 0 {
            format!("Showing {}–{} of {}", self.start, self.end, self.total)
        } else {
            "Showing 0 of 0".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_of_twenty() {
        let pager = PagerWindow::compute(20, 1, 8);
        assert_eq!(pager.label(), "Showing 1–8 of 20");
        assert!(pager.prev_disabled);
        assert!(!pager.next_disabled);
    }

    #[test]
    fn last_partial_page_of_twenty() {
        let pager = PagerWindow::compute(20, 3, 8);
        assert_eq!(pager.end, 20);
        assert_eq!(pager.label(), "Showing 17–20 of 20");
        assert!(!pager.prev_disabled);
        assert!(pager.next_disabled);
    }

    #[test]
    fn empty_result_disables_both_controls() {
        let pager = PagerWindow::compute(0, 1, 8);
        assert_eq!(pager.start, 0);
        assert_eq!(pager.end, 0);
        assert_eq!(pager.label(), "Showing 0 of 0");
        assert!(pager.prev_disabled);
        assert!(pager.next_disabled);
    }

    #[test]
    fn over_advanced_page_disables_next() {
        let pager = PagerWindow::compute(20, 5, 8);
        assert_eq!(pager.end, 20);
        assert!(pager.start > pager.end);
        assert!(pager.next_disabled);
        assert!(!pager.prev_disabled);
    }

    #[test]
    fn start_is_zero_only_for_empty_totals() {
        for total in 0..40_u64 {
            for page in 1..=5_u32 {
                for page_size in 1..=9_u32 {
                    let pager = PagerWindow::compute(total, page, page_size);
                    assert_eq!(pager.start == 0, total == 0);
                    assert!(pager.end <= total);
                    assert_eq!(pager.next_disabled, pager.end >= total);
                    assert_eq!(pager.prev_disabled, page <= 1);
                    if total > 0 && u64::from(page - 1) * u64::from(page_size) < total {
                        assert!(pager.start <= pager.end);
                    }
                }
            }
        }
    }
}
