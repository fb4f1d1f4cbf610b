use async_trait::async_trait;
use metrics::counter;
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use treestand_api_types::{PostCreateRequest, PostListResponse, PreorderRequest};

use crate::application::api::{PostsApi, PreordersApi, RequestFailed};
use crate::domain::posts::QueryState;
use crate::infra::error::InfraError;

const POSTS_PATH: &str = "api/posts";
const PREORDERS_PATH: &str = "api/preorders";

/// Site API client. One attempt per call, transport-default timeouts.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: &Url) -> Result<Self, InfraError> {
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("treestand/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, RequestFailed> {
        self.base
            .join(path)
            .map_err(|err| RequestFailed::transport(format!("invalid request URL: {err}")))
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, String)]>,
        body: Option<Value>,
    ) -> Result<Value, RequestFailed> {
        let mut url = self.url(path)?;
        if let Some(q) = query {
            url.set_query(None);
            let mut qp = url.query_pairs_mut();
            for (k, v) in q {
                qp.append_pair(k, v);
            }
        }

        debug!(%method, %url, "site api request");
        counter!("treestand_api_requests_total", "path" => path.to_string()).increment(1);

        let mut req = self.client.request(method, url);
        if let Some(b) = body {
            req = req.json(&b);
        }

        let outcome = match req.send().await {
            Ok(resp) => {
                let status = resp.status();
                match resp.bytes().await {
                    Ok(bytes) => classify_response(status, &bytes),
                    Err(err) => Err(RequestFailed::transport(err.to_string())),
                }
            }
            Err(err) => Err(RequestFailed::transport(err.to_string())),
        };

        if outcome.is_err() {
            counter!("treestand_api_failures_total", "path" => path.to_string()).increment(1);
        }
        outcome
    }

    async fn post_json<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<Value, RequestFailed> {
        let body = serde_json::to_value(payload)
            .map_err(|err| RequestFailed::transport(format!("failed to encode request: {err}")))?;
        self.request(Method::POST, path, None, Some(body)).await
    }
}

/// Decide success or failure for a complete response.
///
/// Failure when the status is not 2xx or the body says `ok: false`. The reason is the
/// body's `error` string when present, else a message carrying the status code. Bodies
/// that are not JSON count as `{}`.
pub fn classify_response(status: StatusCode, bytes: &[u8]) -> Result<Value, RequestFailed> {
    let body: Value =
        serde_json::from_slice(bytes).unwrap_or_else(|_| Value::Object(Default::default()));

    if status.is_success() && body.get("ok") != Some(&Value::Bool(false)) {
        return Ok(body);
    }

    match body.get("error").and_then(Value::as_str) {
        Some(message) if !message.is_empty() => {
            Err(RequestFailed::rejected(status, message.to_string()))
        }
        _ => Err(RequestFailed::from_status(status)),
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, RequestFailed> {
    serde_json::from_value(body)
        .map_err(|err| RequestFailed::transport(format!("unexpected response body: {err}")))
}

#[async_trait]
impl PostsApi for ApiClient {
    async fn list_posts(&self, query: &QueryState) -> Result<PostListResponse, RequestFailed> {
        let pairs = query.query_pairs();
        let body = self
            .request(Method::GET, POSTS_PATH, Some(pairs.as_slice()), None)
            .await?;
        decode(body)
    }

    async fn create_post(&self, request: &PostCreateRequest) -> Result<(), RequestFailed> {
        self.post_json(POSTS_PATH, request).await.map(|_| ())
    }
}

#[async_trait]
impl PreordersApi for ApiClient {
    async fn submit_preorder(&self, request: &PreorderRequest) -> Result<(), RequestFailed> {
        self.post_json(PREORDERS_PATH, request).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use httpmock::MockServer;

    use super::*;
    use crate::domain::posts::CategoryFilter;

    fn client(server: &MockServer) -> ApiClient {
        let base = Url::parse(&server.base_url()).expect("base url");
        ApiClient::new(&base).expect("client")
    }

    #[test]
    fn ok_status_and_flag_is_success() {
        let body = classify_response(StatusCode::OK, br#"{"ok":true,"total":3}"#).expect("ok");
        assert_eq!(body["total"], 3);
    }

    #[test]
    fn explicit_false_flag_fails_even_on_200() {
        let err = classify_response(StatusCode::OK, br#"{"ok":false,"error":"Slow down"}"#)
            .expect_err("ok=false");
        assert_eq!(err.message(), "Slow down");
        assert_eq!(err.status(), Some(StatusCode::OK));
    }

    #[test]
    fn error_status_without_reason_uses_status_code() {
        let err = classify_response(StatusCode::SERVICE_UNAVAILABLE, b"<html>oops</html>")
            .expect_err("503");
        assert_eq!(err.message(), "Request failed (503)");
    }

    #[test]
    fn error_status_prefers_body_reason() {
        let err = classify_response(StatusCode::BAD_REQUEST, br#"{"error":"Body is required"}"#)
            .expect_err("400");
        assert_eq!(err.message(), "Body is required");
    }

    #[test]
    fn false_flag_fails_whatever_the_error_shape() {
        let err = classify_response(StatusCode::OK, br#"{"ok":false,"error":{"code":"RATE"}}"#)
            .expect_err("ok=false with structured error");
        assert_eq!(err.message(), "Request failed (200)");

        let err = classify_response(StatusCode::OK, br#"{"ok":false,"error":null}"#)
            .expect_err("ok=false with null error");
        assert_eq!(err.message(), "Request failed (200)");
    }

    #[test]
    fn non_boolean_flag_is_not_a_failure() {
        assert!(classify_response(StatusCode::OK, br#"{"ok":"no"}"#).is_ok());
        assert!(classify_response(StatusCode::OK, br#"{"ok":null}"#).is_ok());
    }

    #[test]
    fn non_string_reason_on_error_status_uses_status_code() {
        let err = classify_response(StatusCode::BAD_REQUEST, br#"{"error":["a","b"]}"#)
            .expect_err("400");
        assert_eq!(err.message(), "Request failed (400)");
    }

    #[test]
    fn listing_with_null_fields_decodes() {
        let body = classify_response(
            StatusCode::OK,
            br#"{"ok":true,"total":null,"rows":[{"title":"Fir","category":"Review","display_name":null,"body":"b","created_at":"2025-12-01T18:00:00Z"}]}"#,
        )
        .expect("ok");
        let listing: PostListResponse = decode(body).expect("null-tolerant listing");
        assert_eq!(listing.total, 0);
        assert_eq!(listing.rows[0].display_name, "");
    }

    #[test]
    fn missing_flag_on_success_is_accepted() {
        assert!(classify_response(StatusCode::OK, b"not json").is_ok());
        assert!(classify_response(StatusCode::CREATED, br#"{"id":1}"#).is_ok());
    }

    #[test]
    fn base_path_is_preserved() {
        let base = Url::parse("https://example.com/trees").expect("url");
        let client = ApiClient::new(&base).expect("client");
        assert_eq!(
            client.url(POSTS_PATH).expect("joined").as_str(),
            "https://example.com/trees/api/posts"
        );
    }

    #[tokio::test]
    async fn list_posts_sends_state_as_query() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET")
                .path("/api/posts")
                .query_param("page", "1")
                .query_param("pageSize", "8")
                .query_param("category", "WhatsNew")
                .query_param("q", "fraser fir");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"ok":true,"rows":[{"title":"Open late","category":"WhatsNew","display_name":"Dave","body":"Until 10pm","created_at":"2025-12-01T18:00:00Z"}],"total":1}"#);
        });

        let mut state = QueryState::default();
        state.set_category(CategoryFilter::parse("WhatsNew"));
        state.set_search(" fraser fir ");

        let listing = client(&server).list_posts(&state).await.expect("listing");
        mock.assert();
        assert_eq!(listing.total, 1);
        assert_eq!(listing.rows[0].title, "Open late");
    }

    #[tokio::test]
    async fn list_posts_reports_server_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/api/posts");
            then.status(500)
                .header("content-type", "application/json")
                .body(r#"{"ok":false,"error":"database is locked"}"#);
        });

        let err = client(&server)
            .list_posts(&QueryState::default())
            .await
            .expect_err("server error");
        assert_eq!(err.message(), "database is locked");
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn create_post_posts_json_payload() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/api/posts")
                .json_body_includes(r#"{"title":"T","category":"Review","display_name":"Anonymous","body":"B"}"#);
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"ok":true}"#);
        });

        let request = PostCreateRequest {
            title: "T".into(),
            category: "Review".into(),
            display_name: "Anonymous".into(),
            body: "B".into(),
        };
        client(&server).create_post(&request).await.expect("created");
        mock.assert();
    }

    #[tokio::test]
    async fn preorder_posts_typed_fields() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/api/preorders")
                .json_body_includes(r#"{"name":"Robin","quantity":2,"want_installation":true,"want_tree_removal":false}"#);
            then.status(201)
                .header("content-type", "application/json")
                .body(r#"{"ok":true}"#);
        });

        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), "Robin".to_string());
        let request = PreorderRequest {
            fields,
            want_installation: true,
            want_tree_decorating: false,
            want_tree_removal: false,
            quantity: 2,
        };
        client(&server)
            .submit_preorder(&request)
            .await
            .expect("submitted");
        mock.assert();
    }

    #[tokio::test]
    async fn unreachable_server_is_a_request_failure() {
        let base = Url::parse("http://127.0.0.1:9/").expect("url");
        let client = ApiClient::new(&base).expect("client");

        let err = client
            .list_posts(&QueryState::default())
            .await
            .expect_err("connection refused");
        assert!(err.status().is_none());
        assert!(!err.message().is_empty());
    }
}
