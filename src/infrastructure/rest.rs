use crate::domain::ports::AttendanceStore;
use crate::domain::session::SessionColumn;
use crate::error::{AttendanceError, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Table holding one row per registration.
pub const DEFAULT_TABLE: &str = "registrations";
/// Column keying rows by the scanned identifier.
pub const DEFAULT_KEY_COLUMN: &str = "qr_id";

/// Attendance store backed by a hosted row-keyed table, spoken to over the
/// PostgREST dialect: a filtered `select` of the session column, a filtered
/// `update` setting it true.
///
/// Cheap to clone; the inner `reqwest::Client` shares its connection pool.
#[derive(Clone)]
pub struct RestTableStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    table: String,
    key_column: String,
}

impl RestTableStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE.to_string(),
            key_column: DEFAULT_KEY_COLUMN.to_string(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_key_column(mut self, key_column: impl Into<String>) -> Self {
        self.key_column = key_column.into();
        self
    }

    fn rows_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), self.table)
    }

    async fn backend_error(response: reqwest::Response) -> AttendanceError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        AttendanceError::BackendError { status, message }
    }
}

#[async_trait]
impl AttendanceStore for RestTableStore {
    async fn attendance(&self, id: &str, column: &SessionColumn) -> Result<Option<bool>> {
        let column = column.to_string();
        let filter = format!("eq.{id}");
        let response = self
            .client
            .get(self.rows_url())
            .query(&[
                ("select", column.as_str()),
                (self.key_column.as_str(), filter.as_str()),
            ])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }

        let rows: Vec<Value> = response.json().await?;
        debug!(%id, %column, matches = rows.len(), "attendance lookup");
        match rows.first() {
            None => Ok(None),
            // A null cell reads as not yet present
            Some(row) => Ok(Some(
                row.get(&column).and_then(Value::as_bool).unwrap_or(false),
            )),
        }
    }

    async fn mark_present(&self, id: &str, column: &SessionColumn) -> Result<()> {
        let column = column.to_string();
        let filter = format!("eq.{id}");
        let mut body = serde_json::Map::new();
        body.insert(column.clone(), Value::Bool(true));

        let response = self
            .client
            .patch(self.rows_url())
            .query(&[(self.key_column.as_str(), filter.as_str())])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::backend_error(response).await);
        }
        debug!(%id, %column, "attendance flag updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn column() -> SessionColumn {
        "day1_fn_in".parse().unwrap()
    }

    async fn store(server: &MockServer) -> RestTableStore {
        RestTableStore::new(server.uri(), "secret-key")
    }

    #[tokio::test]
    async fn test_attendance_reads_flag() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/registrations"))
            .and(query_param("select", "day1_fn_in"))
            .and(query_param("qr_id", "eq.team-1"))
            .and(header("apikey", "secret-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"day1_fn_in": false}])))
            .mount(&server)
            .await;

        let flag = store(&server)
            .await
            .attendance("team-1", &column())
            .await
            .unwrap();
        assert_eq!(flag, Some(false));
    }

    #[tokio::test]
    async fn test_attendance_unmatched_id_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/registrations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let flag = store(&server)
            .await
            .attendance("ghost", &column())
            .await
            .unwrap();
        assert_eq!(flag, None);
    }

    #[tokio::test]
    async fn test_attendance_null_cell_reads_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/registrations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"day1_fn_in": null}])))
            .mount(&server)
            .await;

        let flag = store(&server)
            .await
            .attendance("team-1", &column())
            .await
            .unwrap();
        assert_eq!(flag, Some(false));
    }

    #[tokio::test]
    async fn test_mark_present_patches_column() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/registrations"))
            .and(query_param("qr_id", "eq.team-1"))
            .and(body_json(json!({"day1_fn_in": true})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        store(&server)
            .await
            .mark_present("team-1", &column())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_backend_failure_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/registrations"))
            .respond_with(ResponseTemplate::new(500).set_body_string("relation does not exist"))
            .mount(&server)
            .await;

        let err = store(&server)
            .await
            .attendance("team-1", &column())
            .await
            .unwrap_err();
        match err {
            AttendanceError::BackendError { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("relation does not exist"));
            }
            other => panic!("expected BackendError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_custom_table_and_key_column() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/attendees"))
            .and(query_param("badge", "eq.team-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"day1_fn_in": true}])))
            .mount(&server)
            .await;

        let store = RestTableStore::new(server.uri(), "secret-key")
            .with_table("attendees")
            .with_key_column("badge");
        let flag = store.attendance("team-1", &column()).await.unwrap();
        assert_eq!(flag, Some(true));
    }
}
