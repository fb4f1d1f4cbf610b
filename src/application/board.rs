//! Posts board controller: query state, list refreshes and post submission.

use tracing::{debug, error, warn};

use crate::application::api::{PostsApi, RequestFailed};
use crate::application::pagination::PagerWindow;
use crate::application::surface::{BoardSurface, PageElement};
use crate::domain::posts::{CategoryFilter, PostDraft, QueryState};
use crate::presentation::views::{BoardRenderer, LOADING_HTML, RENDER_FAILED_HTML};

pub const POSTING_MESSAGE: &str = "Posting…";
pub const POSTED_MESSAGE: &str = "✅ Posted!";

/// User interactions the board reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    CategoryChanged(String),
    SearchClicked { input: String },
    SearchKeyDown { key: String, input: String },
    PrevClicked,
    NextClicked,
    PostSubmitted(PostDraft),
}

impl BoardEvent {
    /// Element the event originates from; events from absent elements are never wired.
    fn requires(&self) -> &'static [PageElement] {
        match self {
            Self::CategoryChanged(_) => &[PageElement::CategoryFilter],
            Self::SearchClicked { .. } | Self::SearchKeyDown { .. } => {
                &[PageElement::SearchInput, PageElement::SearchButton]
            }
            Self::PrevClicked => &[PageElement::PrevButton],
            Self::NextClicked => &[PageElement::NextButton],
            Self::PostSubmitted(_) => &[PageElement::PostForm],
        }
    }
}

pub struct PostsBoard<A> {
    api: A,
    renderer: BoardRenderer,
    state: QueryState,
}

impl<A: PostsApi> PostsBoard<A> {
    pub fn new(api: A, renderer: BoardRenderer) -> Self {
        Self::with_state(api, renderer, QueryState::default())
    }

    pub fn with_state(api: A, renderer: BoardRenderer, state: QueryState) -> Self {
        Self {
            api,
            renderer,
            state,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn api(&self) -> &A {
        &self.api
    }

    /// Initial load with the current state.
    pub async fn start<S: BoardSurface>(&self, surface: &mut S) {
        self.refresh(surface).await;
    }

    /// Apply one event. Returns `false` when the event's control is not wired on this page.
    pub async fn handle<S: BoardSurface>(&mut self, surface: &mut S, event: BoardEvent) -> bool {
        if !event.requires().iter().all(|element| surface.has(*element)) {
            debug!(?event, "board control not present; event ignored");
            return false;
        }

        match event {
            BoardEvent::CategoryChanged(value) => {
                self.state.set_category(CategoryFilter::parse(&value));
                self.refresh(surface).await;
            }
            BoardEvent::SearchClicked { input } => self.search(surface, &input).await,
            BoardEvent::SearchKeyDown { key, input } => {
                if key == "Enter" {
                    self.search(surface, &input).await;
                }
            }
            BoardEvent::PrevClicked => {
                if self.state.previous_page() {
                    self.refresh(surface).await;
                }
            }
            BoardEvent::NextClicked => {
                self.state.next_page();
                self.refresh(surface).await;
            }
            BoardEvent::PostSubmitted(draft) => {
                // Failures are already reported on the surface.
                let _ = self.create_post(surface, draft).await;
            }
        }
        true
    }

    async fn search<S: BoardSurface>(&mut self, surface: &mut S, input: &str) {
        self.state.set_search(input);
        self.refresh(surface).await;
    }

    /// Re-query the current page and redraw results and pager.
    pub async fn refresh<S: BoardSurface>(&self, surface: &mut S) {
        if !surface.has(PageElement::Results) {
            return;
        }

        surface.set_results_html(LOADING_HTML.to_string());
        debug!(
            page = self.state.page(),
            category = %self.state.category(),
            q = self.state.search_text(),
            "loading posts"
        );

        match self.api.list_posts(&self.state).await {
            Ok(listing) => {
                let html = self.renderer.posts(&listing.rows).unwrap_or_else(|err| {
                    error!(error = %err, origin = err.origin(), "failed to render posts");
                    RENDER_FAILED_HTML.to_string()
                });
                surface.set_results_html(html);

                let pager = PagerWindow::for_state(listing.total, &self.state);
                surface.set_pager_text(pager.label());
                surface.set_prev_disabled(pager.prev_disabled);
                surface.set_next_disabled(pager.next_disabled);
            }
            Err(err) => {
                warn!(error = %err, status = ?err.status(), "post listing failed");
                self.show_error(surface, &err);
                surface.set_pager_text(String::new());
            }
        }
    }

    fn show_error<S: BoardSurface>(&self, surface: &mut S, err: &RequestFailed) {
        let html = self.renderer.error(err.message()).unwrap_or_else(|render_err| {
            error!(error = %render_err, "failed to render board error");
            RENDER_FAILED_HTML.to_string()
        });
        surface.set_results_html(html);
    }

    /// Submit a post; on success return to the first unfiltered-by-search page and refresh.
    pub async fn create_post<S: BoardSurface>(
        &mut self,
        surface: &mut S,
        draft: PostDraft,
    ) -> Result<(), RequestFailed> {
        surface.set_post_message(POSTING_MESSAGE.to_string());
        let request = draft.into_request();

        match self.api.create_post(&request).await {
            Ok(()) => {
                debug!(category = %request.category, "post created");
                surface.set_post_message(POSTED_MESSAGE.to_string());
                surface.reset_post_form();
                self.state.reset_after_post();
                if surface.has(PageElement::SearchInput) {
                    surface.set_search_value(String::new());
                }
                self.refresh(surface).await;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "post submission failed");
                surface.set_post_message(format!("❌ {}", err.message()));
                Err(err)
            }
        }
    }
}
