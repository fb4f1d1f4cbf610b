//! Gateway traits describing the remote site API.

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use treestand_api_types::{PostCreateRequest, PostListResponse, PreorderRequest};

use crate::domain::posts::QueryState;

/// The single failure kind of the site API: transport error, non-2xx status,
/// or a body carrying `ok: false`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RequestFailed {
    message: String,
    status: Option<StatusCode>,
}

impl RequestFailed {
    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Failure without a server reason, described by its status code.
    pub fn from_status(status: StatusCode) -> Self {
        Self::rejected(status, format!("Request failed ({})", status.as_u16()))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }
}

#[async_trait]
pub trait PostsApi: Send + Sync {
    async fn list_posts(&self, query: &QueryState) -> Result<PostListResponse, RequestFailed>;

    async fn create_post(&self, request: &PostCreateRequest) -> Result<(), RequestFailed>;
}

#[async_trait]
pub trait PreordersApi: Send + Sync {
    async fn submit_preorder(&self, request: &PreorderRequest) -> Result<(), RequestFailed>;
}
