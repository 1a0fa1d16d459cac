use std::time::Duration;

use reqwest::{header::CONTENT_RANGE, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::{AuthUser, Credentials, RowQuery, RowStoreURL};

#[derive(Error, Debug)]
pub enum RowStoreError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("Other: {0}")]
    Other(String),
}

/// Client for a hosted REST row store and its auth endpoint.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted, so
/// per-request clients built with [`RowStoreClient::with_credentials`] share
/// one connection pool.
#[derive(Debug, Clone)]
pub struct RowStoreClient {
    http: reqwest::Client,
    url: RowStoreURL,
    credentials: Credentials,
}

impl RowStoreClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, RowStoreError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RowStoreError::Other(e.to_string()))?;

        Ok(Self {
            http,
            url: RowStoreURL::new(base_url),
            credentials,
        })
    }

    /// A client for the same store acting with other credentials.
    pub fn with_credentials(&self, credentials: Credentials) -> Self {
        Self {
            http: self.http.clone(),
            url: self.url.clone(),
            credentials,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn request(&self, method: Method, url: impl AsRef<str>) -> RequestBuilder {
        self.http
            .request(method, url.as_ref())
            .header("apikey", self.credentials.api_key())
            .bearer_auth(self.credentials.bearer_token())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, RowStoreError> {
        let resp = request
            .send()
            .await
            .map_err(|e| RowStoreError::ResponseError(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(RowStoreError::Unauthorized);
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RowStoreError::ResponseError(format!("{}: {}", status, body)));
        }

        Ok(resp)
    }

    async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T, RowStoreError> {
        resp.json::<T>().await.map_err(|e| {
            RowStoreError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })
    }

    /// Fetch every row matching `query`.
    ///
    /// The store caps each response at its configured row limit, so pages are
    /// requested with increasing `offset` until the exact count reported in
    /// `Content-Range` (or the query's own `limit`) has been read.
    #[instrument(skip(self, query))]
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &RowQuery,
    ) -> Result<Vec<T>, RowStoreError> {
        let start = query.offset_value();
        let mut rows: Vec<T> = Vec::new();

        loop {
            let mut page = query.clone().offset(start + rows.len());
            if let Some(limit) = query.limit_value() {
                page = page.limit(limit - rows.len());
            }

            let request = self
                .request(Method::GET, self.url.table(table))
                .header("Prefer", "count=exact")
                .query(&page.to_pairs());

            let resp = self.send(request).await?;
            let total = content_range_total(&resp);
            let batch: Vec<T> = Self::parse(resp).await?;
            let fetched = batch.len();
            rows.extend(batch);

            let Some(total) = total else {
                break;
            };
            let mut wanted = total.saturating_sub(start as u64);
            if let Some(limit) = query.limit_value() {
                wanted = wanted.min(limit as u64);
            }

            if fetched == 0 || rows.len() as u64 >= wanted {
                break;
            }

            tracing::debug!(table, fetched = rows.len(), total, "fetching next page");
        }

        Ok(rows)
    }

    /// Fetch the first row matching `query`, if any.
    pub async fn select_first<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &RowQuery,
    ) -> Result<Option<T>, RowStoreError> {
        let rows = self.select(table, &query.clone().limit(1)).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert one row and return it as stored.
    #[instrument(skip(self, row))]
    pub async fn insert<B, T>(&self, table: &str, row: &B) -> Result<T, RowStoreError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::POST, self.url.table(table))
            .header("Prefer", "return=representation")
            .json(row);

        let resp = self.send(request).await?;
        let rows: Vec<T> = Self::parse(resp).await?;
        only_row(rows)
    }

    /// Delete every row matching `query`; returns how many were removed.
    #[instrument(skip(self, query))]
    pub async fn delete(&self, table: &str, query: &RowQuery) -> Result<usize, RowStoreError> {
        let request = self
            .request(Method::DELETE, self.url.table(table))
            .header("Prefer", "return=representation")
            .query(&query.to_pairs());

        let resp = self.send(request).await?;
        let rows: Vec<serde_json::Value> = Self::parse(resp).await?;
        Ok(rows.len())
    }

    /// Count rows matching `query` without transferring them.
    #[instrument(skip(self, query))]
    pub async fn count(&self, table: &str, query: &RowQuery) -> Result<u64, RowStoreError> {
        let request = self
            .request(Method::HEAD, self.url.table(table))
            .header("Prefer", "count=exact")
            .query(&query.to_pairs());

        let resp = self.send(request).await?;
        let range = content_range(&resp)
            .ok_or_else(|| RowStoreError::ParsingError("Missing Content-Range header".into()))?;

        parse_content_range_total(range).ok_or_else(|| {
            RowStoreError::ParsingError(format!("Unexpected Content-Range: {}", range))
        })
    }

    /// Resolve the user behind the client's access token.
    #[instrument(skip(self))]
    pub async fn fetch_user(&self) -> Result<AuthUser, RowStoreError> {
        if self.credentials.access_token().is_none() {
            return Err(RowStoreError::Unauthorized);
        }

        let resp = self
            .send(self.request(Method::GET, self.url.auth_user()))
            .await?;
        Self::parse(resp).await
    }
}

fn only_row<T>(rows: Vec<T>) -> Result<T, RowStoreError> {
    let len = rows.len();
    let mut rows = rows.into_iter();
    match (rows.next(), rows.next()) {
        (Some(row), None) => Ok(row),
        _ => Err(RowStoreError::ParsingError(format!(
            "Expected exactly one row, got {}",
            len
        ))),
    }
}

fn content_range(resp: &Response) -> Option<&str> {
    resp.headers()
        .get(CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
}

fn content_range_total(resp: &Response) -> Option<u64> {
    content_range(resp).and_then(parse_content_range_total)
}

/// Total from a `Content-Range` header such as `0-24/3573` or `*/0`.
fn parse_content_range_total(range: &str) -> Option<u64> {
    range.rsplit_once('/')?.1.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde::Deserialize;

    use super::*;
    use crate::{tables, ActivityRow, NewFollowRow};

    fn client(server: &mockito::Server, credentials: Credentials) -> RowStoreClient {
        RowStoreClient::new(server.url(), credentials, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn content_range_total() {
        assert_eq!(parse_content_range_total("0-24/3573"), Some(3573));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-24/*"), None);
        assert_eq!(parse_content_range_total("garbage"), None);
    }

    #[test]
    fn only_row_rejects_empty_and_multiple() {
        assert_eq!(only_row(vec![1]).unwrap(), 1);
        assert!(only_row::<i32>(vec![]).is_err());
        assert!(only_row(vec![1, 2]).is_err());
    }

    #[tokio::test]
    async fn select_sends_credentials_and_filters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/logs")
            .match_header("apikey", "anon")
            .match_header("authorization", "Bearer user-jwt")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("select".into(), "id,created_at,updated_at".into()),
                Matcher::UrlEncoded("user_id".into(), "eq.u-1".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id":"l1","created_at":"2024-01-01T00:00:00Z","updated_at":null}]"#,
            )
            .create_async()
            .await;

        let client = client(
            &server,
            Credentials::anonymous("anon").with_access_token("user-jwt"),
        );
        let query = RowQuery::new()
            .select("id,created_at,updated_at")
            .eq("user_id", "u-1");
        let rows: Vec<ActivityRow> = client.select(tables::LOGS, &query).await.unwrap();

        mock.assert_async().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "l1");
    }

    #[tokio::test]
    async fn select_pages_until_total_is_read() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/rest/v1/logs")
            .match_header("prefer", "count=exact")
            .match_query(Matcher::UrlEncoded("offset".into(), "0".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header("content-range", "0-1/3")
            .with_body(
                r#"[{"id":"l1","created_at":"2024-01-03T00:00:00Z","updated_at":null},
                    {"id":"l2","created_at":"2024-01-02T00:00:00Z","updated_at":null}]"#,
            )
            .expect(1)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/rest/v1/logs")
            .match_query(Matcher::UrlEncoded("offset".into(), "2".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header("content-range", "2-2/3")
            .with_body(
                r#"[{"id":"l3","created_at":"2023-06-01T00:00:00Z","updated_at":"2024-01-04T00:00:00Z"}]"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = client(&server, Credentials::anonymous("anon"));
        let rows: Vec<ActivityRow> = client
            .select(tables::LOGS, &RowQuery::new().order_desc("created_at"))
            .await
            .unwrap();

        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(
            rows.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            vec!["l1", "l2", "l3"]
        );
    }

    #[tokio::test]
    async fn select_stops_at_query_limit() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/logs")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("limit".into(), "1".into()),
                Matcher::UrlEncoded("offset".into(), "0".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header("content-range", "0-0/40")
            .with_body(r#"[{"id":"l1","created_at":"2024-01-01T00:00:00Z","updated_at":null}]"#)
            .expect(1)
            .create_async()
            .await;

        let client = client(&server, Credentials::anonymous("anon"));
        let row: Option<ActivityRow> = client
            .select_first(tables::LOGS, &RowQuery::new())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(row.map(|r| r.id), Some("l1".to_string()));
    }

    #[tokio::test]
    async fn forbidden_maps_to_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/v1/logs")
            .match_query(Matcher::Any)
            .with_status(403)
            .create_async()
            .await;

        let client = client(&server, Credentials::anonymous("anon"));
        let result: Result<Vec<ActivityRow>, _> =
            client.select(tables::LOGS, &RowQuery::new()).await;

        assert!(matches!(result, Err(RowStoreError::Unauthorized)));
    }

    #[tokio::test]
    async fn server_error_keeps_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/v1/logs")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = client(&server, Credentials::anonymous("anon"));
        let err = client
            .select::<ActivityRow>(tables::LOGS, &RowQuery::new())
            .await
            .unwrap_err();

        match err {
            RowStoreError::ResponseError(msg) => {
                assert!(msg.contains("500"));
                assert!(msg.contains("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn insert_returns_stored_row() {
        #[derive(Deserialize)]
        struct Stored {
            follower_id: String,
        }

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/v1/follows")
            .match_header("prefer", "return=representation")
            .match_body(Matcher::PartialJsonString(
                r#"{"follower_id":"a","following_id":"b"}"#.into(),
            ))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"follower_id":"a","following_id":"b"}]"#)
            .create_async()
            .await;

        let client = client(&server, Credentials::anonymous("anon"));
        let row = NewFollowRow {
            follower_id: "a".into(),
            following_id: "b".into(),
        };
        let stored: Stored = client.insert(tables::FOLLOWS, &row).await.unwrap();

        mock.assert_async().await;
        assert_eq!(stored.follower_id, "a");
    }

    #[tokio::test]
    async fn count_reads_content_range() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("HEAD", "/rest/v1/reactions")
            .match_header("prefer", "count=exact")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-range", "0-2/3")
            .create_async()
            .await;

        let client = client(&server, Credentials::anonymous("anon"));
        let count = client
            .count(tables::REACTIONS, &RowQuery::new().eq("log_id", "l1"))
            .await
            .unwrap();

        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn delete_counts_removed_rows() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/rest/v1/logs")
            .match_query(Matcher::UrlEncoded("id".into(), "eq.l1".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":"l1"}]"#)
            .create_async()
            .await;

        let client = client(&server, Credentials::anonymous("anon"));
        let removed = client
            .delete(tables::LOGS, &RowQuery::new().eq("id", "l1"))
            .await
            .unwrap();

        assert_eq!(removed, 1);
    }

    #[tokio::test]
    async fn fetch_user_requires_access_token() {
        let server = mockito::Server::new_async().await;
        let client = client(&server, Credentials::anonymous("anon"));

        assert!(matches!(
            client.fetch_user().await,
            Err(RowStoreError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn fetch_user_resolves_token() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/auth/v1/user")
            .match_header("authorization", "Bearer user-jwt")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"u-1","email":"ada@example.com","aud":"authenticated"}"#)
            .create_async()
            .await;

        let client = client(
            &server,
            Credentials::anonymous("anon").with_access_token("user-jwt"),
        );
        let user = client.fetch_user().await.unwrap();

        assert_eq!(user.id, "u-1");
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
    }
}
