//! Board query state and post-form normalisation.

use std::fmt;

use time::{format_description::FormatItem, macros::format_description};
use treestand_api_types::{ALL_CATEGORIES, PostCreateRequest, WHATS_NEW_CATEGORY};

/// Number of posts requested per board page.
pub const BOARD_PAGE_SIZE: u32 = 8;

/// Author label used when a post is submitted without a display name.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Medium timestamp rendering, e.g. `Dec 5, 2025, 3:07 PM`.
pub const POSTED_AT_FORMAT: &[FormatItem<'static>] = format_description!(
    "[month repr:short] [day padding:none], [year], [hour repr:12 padding:none]:[minute] [period]"
);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Interpret a raw filter control value; only the `All` sentinel clears the filter.
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badge label for a category identifier.
pub fn category_label(category: &str) -> &str {
    if category == WHATS_NEW_CATEGORY {
        "What’s New"
    } else {
        category
    }
}

/// Paging, filter and search parameters driving the next list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    page: u32,
    page_size: u32,
    category: CategoryFilter,
    search_text: String,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: BOARD_PAGE_SIZE,
            category: CategoryFilter::All,
            search_text: String::new(),
        }
    }
}

impl QueryState {
    /// Start at `page` instead of the first page; values below 1 clamp to 1.
    pub fn starting_at(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
        self.page = 1;
    }

    pub fn set_search(&mut self, raw: &str) {
        self.search_text = raw.trim().to_string();
        self.page = 1;
    }

    /// Step back one page; returns `false` (and leaves the state alone) on the first page.
    pub fn previous_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    /// State after a successful post: first page, no search, category kept.
    pub fn reset_after_post(&mut self) {
        self.page = 1;
        self.search_text.clear();
    }

    /// Query parameters in the order the list endpoint documents them.
    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
            ("category", self.category.as_str().to_string()),
            ("q", self.search_text.clone()),
        ]
    }
}

/// Raw values of the create-post form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub category: String,
    pub display_name: Option<String>,
    pub body: String,
}

impl PostDraft {
    pub fn into_request(self) -> PostCreateRequest {
        let display_name = self
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string());

        PostCreateRequest {
            title: self.title,
            category: self.category,
            display_name,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_starts_on_first_page() {
        let state = QueryState::default();
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), BOARD_PAGE_SIZE);
        assert_eq!(state.category(), &CategoryFilter::All);
        assert_eq!(state.search_text(), "");
    }

    #[test]
    fn category_change_resets_page() {
        let mut state = QueryState::default();
        for _ in 0..3 {
            state.next_page();
        }
        assert_eq!(state.page(), 4);

        state.set_category(CategoryFilter::parse("Review"));
        assert_eq!(state.page(), 1);
        assert_eq!(state.category().as_str(), "Review");
    }

    #[test]
    fn search_text_is_trimmed() {
        let mut state = QueryState::default();
        state.next_page();
        state.set_search("  balsam fir \t");
        assert_eq!(state.search_text(), "balsam fir");
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn starting_page_is_clamped() {
        assert_eq!(QueryState::default().starting_at(0).page(), 1);
        assert_eq!(QueryState::default().starting_at(3).page(), 3);
    }

    #[test]
    fn previous_page_never_goes_below_one() {
        let mut state = QueryState::default();
        assert!(!state.previous_page());
        assert_eq!(state.page(), 1);

        state.next_page();
        assert!(state.previous_page());
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn reset_after_post_keeps_category() {
        let mut state = QueryState::default();
        state.set_category(CategoryFilter::parse("WhatsNew"));
        state.set_search("wreath");
        state.next_page();

        state.reset_after_post();
        assert_eq!(state.page(), 1);
        assert_eq!(state.search_text(), "");
        assert_eq!(state.category().as_str(), "WhatsNew");
    }

    #[test]
    fn all_sentinel_parses_to_no_filter() {
        assert_eq!(CategoryFilter::parse("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::All.to_string(), "All");
    }

    #[test]
    fn other_filter_values_are_sent_verbatim() {
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::Only(String::new()));
        assert_eq!(
            CategoryFilter::parse(" Review "),
            CategoryFilter::Only(" Review ".to_string())
        );
        assert_eq!(CategoryFilter::parse("all").as_str(), "all");
    }

    #[test]
    fn whats_new_has_display_label() {
        assert_eq!(category_label("WhatsNew"), "What’s New");
        assert_eq!(category_label("Review"), "Review");
    }

    #[test]
    fn blank_display_name_becomes_anonymous() {
        let draft = PostDraft {
            title: "Great trees".into(),
            category: "Review".into(),
            display_name: Some("   ".into()),
            body: "Loved it".into(),
        };
        assert_eq!(draft.into_request().display_name, ANONYMOUS_AUTHOR);

        let draft = PostDraft {
            display_name: None,
            ..PostDraft::default()
        };
        assert_eq!(draft.into_request().display_name, ANONYMOUS_AUTHOR);
    }

    #[test]
    fn named_display_name_is_kept_verbatim() {
        let draft = PostDraft {
            display_name: Some(" Sam ".into()),
            ..PostDraft::default()
        };
        assert_eq!(draft.into_request().display_name, " Sam ");
    }
}
