//! Page bootstrap: static chrome plus the two independent features.

use chrono_tz::Tz;
use time::OffsetDateTime;
use tracing::{debug, warn};
use url::Url;

use crate::application::api::{PostsApi, PreordersApi, RequestFailed};
use crate::application::board::{BoardEvent, PostsBoard};
use crate::application::preorder::PreorderSubmitter;
use crate::application::surface::{
    BoardSurface, ChromeSurface, MapProvider, PageElement, PreorderSurface,
};
use crate::domain::preorders::PreorderForm;
use crate::util::timezone::localized_datetime;

/// Street location of the stand, as typed into a maps search box.
pub const STAND_LOCATION: &str = "E 67th St between Park Ave and Lexington Ave Manhattan NY";

const GOOGLE_MAPS_SEARCH: &str = "https://www.google.com/maps/search/";
const APPLE_MAPS: &str = "https://maps.apple.com/";

pub fn map_link(provider: MapProvider) -> Result<Url, url::ParseError> {
    match provider {
        MapProvider::Google => Url::parse_with_params(
            GOOGLE_MAPS_SEARCH,
            &[("api", "1"), ("query", STAND_LOCATION)],
        ),
        MapProvider::Apple => Url::parse_with_params(APPLE_MAPS, &[("q", STAND_LOCATION)]),
    }
}

/// Fill in map links and the footer year; absent elements are skipped.
pub fn setup_chrome<S: ChromeSurface>(surface: &mut S, now: OffsetDateTime, tz: Tz) {
    for (provider, element) in [
        (MapProvider::Google, PageElement::GoogleMapsLink),
        (MapProvider::Apple, PageElement::AppleMapsLink),
    ] {
        if !surface.has(element) {
            continue;
        }
        match map_link(provider) {
            Ok(href) => surface.set_map_link(provider, href),
            Err(err) => warn!(error = %err, ?provider, "failed to build map link"),
        }
    }

    if surface.has(PageElement::FooterYear) {
        surface.set_footer_year(localized_datetime(now, tz).year());
    }
}

/// Anything the page can emit once bootstrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Board(BoardEvent),
    PreorderSubmitted(PreorderForm),
}

pub struct SitePage<B, P> {
    board: PostsBoard<B>,
    preorders: PreorderSubmitter<P>,
    timezone: Tz,
}

impl<B: PostsApi, P: PreordersApi> SitePage<B, P> {
    pub fn new(board: PostsBoard<B>, preorders: PreorderSubmitter<P>, timezone: Tz) -> Self {
        Self {
            board,
            preorders,
            timezone,
        }
    }

    pub fn board(&self) -> &PostsBoard<B> {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn preorders(&self) -> &PreorderSubmitter<P> {
        &self.preorders
    }

    /// Chrome first, then the board's initial load.
    pub async fn bootstrap<S>(&self, surface: &mut S, now: OffsetDateTime)
    where
        S: BoardSurface + PreorderSurface + ChromeSurface,
    {
        setup_chrome(surface, now, self.timezone);
        debug!(
            preorder_form = surface.has(PageElement::PreorderForm),
            "page chrome ready"
        );
        self.board.start(surface).await;
    }

    /// Route one page event to the feature that owns it.
    pub async fn dispatch<S>(&mut self, surface: &mut S, event: PageEvent) -> Result<(), RequestFailed>
    where
        S: BoardSurface + PreorderSurface + ChromeSurface,
    {
        match event {
            PageEvent::Board(event) => {
                self.board.handle(surface, event).await;
                Ok(())
            }
            PageEvent::PreorderSubmitted(form) => {
                self.preorders.submit(surface, form).await.map(|_| ())
            }
        }
    }
}
