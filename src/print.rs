use treestand::infra::headless::HeadlessPage;

fn control_state(disabled: bool) -> &'static str {
    if disabled { "disabled" } else { "enabled" }
}

pub fn message(text: &str) {
    if !text.is_empty() {
        println!("{text}");
    }
}

pub fn board(page: &HeadlessPage) {
    println!("{}", page.results_html);
    if !page.pager_text.is_empty() {
        println!("{}", page.pager_text);
    }
    println!(
        "prev: {} | next: {}",
        control_state(page.prev_disabled),
        control_state(page.next_disabled)
    );
}

pub fn chrome(page: &HeadlessPage) {
    if let Some(href) = &page.google_maps_href {
        println!("Google Maps: {href}");
    }
    if let Some(href) = &page.apple_maps_href {
        println!("Apple Maps: {href}");
    }
    if let Some(year) = page.footer_year {
        println!("© {year}");
    }
}
