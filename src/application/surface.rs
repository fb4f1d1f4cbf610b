//! Capabilities the page exposes to the features running on it.
//!
//! Writes addressed to an element the page does not have are dropped by the
//! implementation; features consult [`PageElements::has`] before wiring a control.

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PageElement {
    Results,
    PagerInfo,
    PrevButton,
    NextButton,
    CategoryFilter,
    SearchInput,
    SearchButton,
    PostForm,
    PostMessage,
    PreorderForm,
    PreorderMessage,
    GoogleMapsLink,
    AppleMapsLink,
    FooterYear,
}

pub trait PageElements {
    fn has(&self, element: PageElement) -> bool;
}

pub trait BoardSurface: PageElements {
    fn set_results_html(&mut self, html: String);
    fn set_pager_text(&mut self, text: String);
    fn set_prev_disabled(&mut self, disabled: bool);
    fn set_next_disabled(&mut self, disabled: bool);
    fn set_post_message(&mut self, message: String);
    fn reset_post_form(&mut self);
    fn set_search_value(&mut self, value: String);
}

pub trait PreorderSurface: PageElements {
    fn set_preorder_message(&mut self, message: String);
    /// Clear the form back to its markup defaults.
    fn reset_preorder_form(&mut self);
    fn set_installation_checked(&mut self, checked: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapProvider {
    Google,
    Apple,
}

pub trait ChromeSurface: PageElements {
    fn set_map_link(&mut self, provider: MapProvider, href: Url);
    fn set_footer_year(&mut self, year: i32);
}
