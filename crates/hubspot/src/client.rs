//! Bearer-authenticated HTTP access to the Conversations API.

use {
    reqwest::{Client, StatusCode},
    secrecy::{ExposeSecret, Secret},
    serde::de::DeserializeOwned,
    serde_json::Value,
    tracing::debug,
};

use crate::{
    Error, Result,
    response::{ApiResponse, is_error_payload},
    types::{Channel, ChannelList, Message, Page, Thread},
};

pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com/conversations/v3/conversations";

/// HubSpot caps list endpoints at 100 results per page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

const BODY_EXCERPT_CHARS: usize = 512;

pub struct HubSpotClient {
    http: Client,
    base_url: String,
    token: Secret<String>,
    page_size: u32,
}

impl HubSpotClient {
    pub fn new(base_url: impl Into<String>, token: Secret<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /channels`. Not paginated.
    pub async fn list_channels(&self) -> Result<Vec<Channel>> {
        let list: ChannelList = self.get_json("/channels", &[]).await?;
        debug!(total = list.total, returned = list.results.len(), "listed channels");
        Ok(list.results)
    }

    /// `GET /threads?limit=N[&after=CURSOR]`.
    pub async fn threads_page(&self, after: Option<&str>) -> Result<Page<Thread>> {
        let mut query = vec![("limit", self.page_size.to_string())];
        push_cursor(&mut query, after);
        self.get_json("/threads", &query).await
    }

    /// `GET /threads/{id}/messages?limit=N&sort=createdAt[&after=CURSOR]`.
    pub async fn messages_page(&self, thread_id: &str, after: Option<&str>) -> Result<Page<Message>> {
        let path = format!("/threads/{}/messages", urlencoding::encode(thread_id));
        let mut query = vec![
            ("limit", self.page_size.to_string()),
            ("sort", "createdAt".to_string()),
        ];
        push_cursor(&mut query, after);
        self.get_json(&path, &query).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, ?query, "requesting");

        let mut req = self
            .http
            .get(&url)
            .bearer_auth(self.token.expose_secret())
            .header("Accept", "application/json");
        if !query.is_empty() {
            req = req.query(query);
        }
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        let value: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(source) if status.is_success() => return Err(Error::decode(path, source)),
            Err(_) => return Err(http_error(status, &body)),
        };
        if !status.is_success() && !is_error_payload(&value) {
            return Err(http_error(status, &body));
        }

        ApiResponse::from_value(path, value)?.into_result()
    }
}

impl std::fmt::Debug for HubSpotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubSpotClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .field("page_size", &self.page_size)
            .finish()
    }
}

fn push_cursor(query: &mut Vec<(&str, String)>, after: Option<&str>) {
    if let Some(after) = after.filter(|a| !a.is_empty()) {
        query.push(("after", after.to_string()));
    }
}

fn http_error(status: StatusCode, body: &str) -> Error {
    Error::Http {
        status: status.as_u16(),
        body: body.chars().take(BODY_EXCERPT_CHARS).collect(),
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, mockito::Matcher};

    fn client(server: &mockito::Server) -> HubSpotClient {
        HubSpotClient::new(server.url(), Secret::new("pat-123".to_string()))
    }

    #[tokio::test]
    async fn list_channels_sends_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/channels")
            .match_header("authorization", "Bearer pat-123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "total": 2,
                    "results": [
                        { "id": "1000", "name": "Live Chat" },
                        { "id": "1002", "name": "Email" }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let channels = client(&server).list_channels().await.unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[1], Channel {
            id: "1002".into(),
            name: "Email".into()
        });
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_payload_is_api_error_even_with_4xx() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/channels")
            .with_status(401)
            .with_body(
                serde_json::json!({
                    "status": "error",
                    "message": "Authentication credentials not found.",
                    "correlationId": "abc",
                    "category": "INVALID_AUTHENTICATION"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let err = client(&server).list_channels().await.unwrap_err();
        assert!(matches!(err, Error::Api { .. }));
        assert!(err.to_string().contains("INVALID_AUTHENTICATION"));
    }

    #[tokio::test]
    async fn non_json_failure_is_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/channels")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let err = client(&server).list_channels().await.unwrap_err();
        match err {
            Error::Http { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "bad gateway");
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_cursor_is_not_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/threads")
            .match_query(Matcher::Exact("limit=100".into()))
            .with_status(200)
            .with_body(r#"{"results":[]}"#)
            .create_async()
            .await;

        let page = client(&server).threads_page(Some("")).await.unwrap();
        assert!(page.results.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn thread_page_passes_limit_and_cursor() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/threads")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("limit".into(), "50".into()),
                Matcher::UrlEncoded("after".into(), "cursor-1".into()),
            ]))
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "results": [{
                        "id": "t1",
                        "createdAt": "2024-01-01T00:00:00Z",
                        "status": "OPEN",
                        "originalChannelId": "ch1"
                    }],
                    "paging": { "next": { "after": "cursor-2" } }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let page = client(&server)
            .with_page_size(50)
            .threads_page(Some("cursor-1"))
            .await
            .unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.next_cursor(), "cursor-2");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn message_page_sorts_by_creation_time() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/threads/t%2F1/messages")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("limit".into(), "100".into()),
                Matcher::UrlEncoded("sort".into(), "createdAt".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"results":[],"paging":{"next":{}}}"#)
            .create_async()
            .await;

        let page = client(&server).messages_page("t/1", None).await.unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.next_cursor(), "");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn malformed_success_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/threads")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let err = client(&server).threads_page(None).await.unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn debug_hides_token() {
        let c = HubSpotClient::new("https://example.test/", Secret::new("pat-secret".into()));
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("pat-secret"));
        assert_eq!(c.base_url(), "https://example.test");
    }
}
