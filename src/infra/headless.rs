//! In-memory page used by the command-line driver and by tests.

use std::collections::BTreeSet;

use url::Url;

use crate::application::surface::{
    BoardSurface, ChromeSurface, MapProvider, PageElement, PageElements, PreorderSurface,
};

/// Records everything the features write to the page.
#[derive(Debug, Clone)]
pub struct HeadlessPage {
    absent: BTreeSet<PageElement>,
    pub results_html: String,
    /// Every value the results container held, oldest first.
    pub results_history: Vec<String>,
    pub pager_text: String,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub post_message: String,
    pub post_form_resets: u32,
    pub search_value: String,
    pub preorder_message: String,
    pub preorder_form_resets: u32,
    pub installation_checked: bool,
    pub google_maps_href: Option<Url>,
    pub apple_maps_href: Option<Url>,
    pub footer_year: Option<i32>,
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPage {
    /// A page carrying every element the site markup defines.
    pub fn new() -> Self {
        Self {
            absent: BTreeSet::new(),
            results_html: String::new(),
            results_history: Vec::new(),
            pager_text: String::new(),
            prev_disabled: false,
            next_disabled: false,
            post_message: String::new(),
            post_form_resets: 0,
            search_value: String::new(),
            preorder_message: String::new(),
            preorder_form_resets: 0,
            installation_checked: true,
            google_maps_href: None,
            apple_maps_href: None,
            footer_year: None,
        }
    }

    pub fn without(mut self, element: PageElement) -> Self {
        self.absent.insert(element);
        self
    }
}

impl PageElements for HeadlessPage {
    fn has(&self, element: PageElement) -> bool {
        !self.absent.contains(&element)
    }
}

impl BoardSurface for HeadlessPage {
    fn set_results_html(&mut self, html: String) {
        if self.has(PageElement::Results) {
            self.results_history.push(html.clone());
            self.results_html = html;
        }
    }

    fn set_pager_text(&mut self, text: String) {
        if self.has(PageElement::PagerInfo) {
            self.pager_text = text;
        }
    }

    fn set_prev_disabled(&mut self, disabled: bool) {
        if self.has(PageElement::PrevButton) {
            self.prev_disabled = disabled;
        }
    }

    fn set_next_disabled(&mut self, disabled: bool) {
        if self.has(PageElement::NextButton) {
            self.next_disabled = disabled;
        }
    }

    fn set_post_message(&mut self, message: String) {
        if self.has(PageElement::PostMessage) {
            self.post_message = message;
        }
    }

    fn reset_post_form(&mut self) {
        if self.has(PageElement::PostForm) {
            self.post_form_resets += 1;
        }
    }

    fn set_search_value(&mut self, value: String) {
        if self.has(PageElement::SearchInput) {
            self.search_value = value;
        }
    }
}

impl PreorderSurface for HeadlessPage {
    fn set_preorder_message(&mut self, message: String) {
        if self.has(PageElement::PreorderMessage) {
            self.preorder_message = message;
        }
    }

    fn reset_preorder_form(&mut self) {
        if self.has(PageElement::PreorderForm) {
            self.preorder_form_resets += 1;
            self.installation_checked = false;
        }
    }

    fn set_installation_checked(&mut self, checked: bool) {
        if self.has(PageElement::PreorderForm) {
            self.installation_checked = checked;
        }
    }
}

impl ChromeSurface for HeadlessPage {
    fn set_map_link(&mut self, provider: MapProvider, href: Url) {
        match provider {
            MapProvider::Google if self.has(PageElement::GoogleMapsLink) => {
                self.google_maps_href = Some(href);
            }
            MapProvider::Apple if self.has(PageElement::AppleMapsLink) => {
                self.apple_maps_href = Some(href);
            }
            _ => {}
        }
    }

    fn set_footer_year(&mut self, year: i32) {
        if self.has(PageElement::FooterYear) {
            self.footer_year = Some(year);
        }
    }
}
