use askama::{Error as AskamaError, Template};
use chrono_tz::Tz;
use thiserror::Error;
use treestand_api_types::PostRecord;

use crate::domain::posts::category_label;
use crate::util::timezone::format_posted_at;

/// Placeholder shown while a list query is in flight.
pub const LOADING_HTML: &str =
    r#"<div class="post"><div class="post-title">Loading…</div></div>"#;

/// Last-resort markup when a template itself fails to render.
pub const RENDER_FAILED_HTML: &str = r#"<div class="post"><div class="post-title">Error</div><div class="post-body">The board could not be displayed.</div></div>"#;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }

    pub fn origin(&self) -> &'static str {
        self.source
    }
}

pub fn render_template<T: Template>(template: &T) -> Result<String, TemplateRenderError> {
    template.render().map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
    })
}

/// One post card, with every field still raw; the template escapes them.
#[derive(Debug, Clone)]
pub struct PostCardView {
    pub title: String,
    pub category: String,
    pub category_label: String,
    pub author: String,
    pub posted_at: String,
    pub body: String,
}

impl PostCardView {
    pub fn from_record(record: &PostRecord, tz: Tz) -> Self {
        Self {
            title: record.title.clone(),
            category: record.category.clone(),
            category_label: category_label(&record.category).to_string(),
            author: record.display_name.clone(),
            posted_at: format_posted_at(&record.created_at, tz),
            body: record.body.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "board/posts.html")]
pub struct PostsTemplate {
    pub cards: Vec<PostCardView>,
}

#[derive(Template)]
#[template(path = "board/error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
}

/// Renders board fragments for a fixed display time zone.
#[derive(Debug, Clone, Copy)]
pub struct BoardRenderer {
    timezone: Tz,
}

impl BoardRenderer {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn posts(&self, rows: &[PostRecord]) -> Result<String, TemplateRenderError> {
        let cards = rows
            .iter()
            .map(|record| PostCardView::from_record(record, self.timezone))
            .collect();
        render_template(&PostsTemplate { cards })
    }

    pub fn error(&self, message: &str) -> Result<String, TemplateRenderError> {
        render_template(&ErrorTemplate { message })
    }
}
