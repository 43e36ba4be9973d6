//! HTTP client for the REST table API

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::error::StoreError;
use super::query::{Order, Query};
use super::{TableStore, tables};
use crate::model::{
    LearningPath, NewPreference, PathStep, Preference, StepResource, StepUpdate,
};

/// Table store client authenticated as one user
pub struct RestStore {
    /// HTTP client
    client: Client,
    /// Project URL, without the REST suffix
    base_url: String,
    /// Public project key sent as `apikey`
    anon_key: String,
    /// User bearer token
    access_token: String,
}

impl RestStore {
    /// Path of the REST API below the project URL
    const REST_PATH: &'static str = "rest/v1";

    /// Create a client. `timeout` of `None` waits indefinitely.
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, StoreError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            access_token: access_token.into(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.base_url, Self::REST_PATH, table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("apikey", &self.anon_key).bearer_auth(&self.access_token)
    }

    async fn select<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>, StoreError> {
        tracing::debug!("select from {}", query.table());
        let response = self
            .authorize(self.client.get(self.table_url(query.table())))
            .query(&query.params())
            .send()
            .await?;
        let body = check(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn select_one<T: DeserializeOwned>(&self, query: Query) -> Result<Option<T>, StoreError> {
        let rows: Vec<T> = self.select(&query.limit(1)).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert<B, T>(&self, table: &'static str, body: &B) -> Result<T, StoreError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("insert into {}", table);
        let response = self
            .authorize(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let body = check(response).await?.text().await?;
        let rows: Vec<T> = serde_json::from_str(&body)?;
        rows.into_iter().next().ok_or(StoreError::MissingRow(table))
    }

    async fn update<B>(&self, table: &'static str, id: Uuid, body: &B) -> Result<(), StoreError>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!("update {} row {}", table, id);
        let response = self
            .authorize(self.client.patch(self.table_url(table)))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

/// Turn error statuses into [`StoreError`]
async fn check(response: Response) -> Result<Response, StoreError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        return Err(StoreError::Unauthorized);
    }

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(StoreError::Api { status: status.as_u16(), message: error_message(&text) });
    }

    Ok(response)
}

/// Pull `message` out of a JSON error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[derive(Serialize)]
struct ProgressUpdate {
    progress_percentage: u8,
}

impl TableStore for RestStore {
    async fn insert_preference(
        &self,
        preference: &NewPreference,
    ) -> Result<Preference, StoreError> {
        self.insert(tables::PREFERENCES, preference).await
    }

    async fn get_preference(&self, id: Uuid) -> Result<Option<Preference>, StoreError> {
        self.select_one(Query::from(tables::PREFERENCES).eq("id", id)).await
    }

    async fn list_paths(&self) -> Result<Vec<LearningPath>, StoreError> {
        self.select(&Query::from(tables::PATHS).order_by("created_at", Order::Descending)).await
    }

    async fn get_path(&self, id: Uuid) -> Result<Option<LearningPath>, StoreError> {
        self.select_one(Query::from(tables::PATHS).eq("id", id)).await
    }

    async fn update_path_progress(&self, id: Uuid, progress: u8) -> Result<(), StoreError> {
        self.update(tables::PATHS, id, &ProgressUpdate { progress_percentage: progress }).await
    }

    async fn list_steps(&self, path_id: Uuid) -> Result<Vec<PathStep>, StoreError> {
        let query = Query::from(tables::STEPS)
            .eq("path_id", path_id)
            .order_by("step_order", Order::Ascending);
        self.select(&query).await
    }

    async fn get_step(&self, id: Uuid) -> Result<Option<PathStep>, StoreError> {
        self.select_one(Query::from(tables::STEPS).eq("id", id)).await
    }

    async fn update_step(&self, id: Uuid, update: &StepUpdate) -> Result<(), StoreError> {
        self.update(tables::STEPS, id, update).await
    }

    async fn list_resources(&self, step_id: Uuid) -> Result<Vec<StepResource>, StoreError> {
        self.select(&Query::from(tables::RESOURCES).eq("step_id", step_id)).await
    }

    async fn list_resources_for_steps(
        &self,
        step_ids: &[Uuid],
    ) -> Result<Vec<StepResource>, StoreError> {
        if step_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.select(&Query::from(tables::RESOURCES).is_in("step_id", step_ids)).await
    }
}
