//! `reqwest` client for a json-server style `/questions` resource.

use super::QuestionStore;
use crate::error::StoreError;
use crate::models::{NewQuestion, Question, QuestionId};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpQuestionStore {
    http: reqwest::Client,
    collection_url: String,
}

impl HttpQuestionStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("quiz-terminal/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            collection_url: format!("{}/questions", base_url.trim_end_matches('/')),
        })
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn item_url(&self, id: &QuestionId) -> String {
        format!("{}/{}", self.collection_url, id)
    }
}

#[async_trait]
impl QuestionStore for HttpQuestionStore {
    async fn list(&self) -> Result<Vec<Question>, StoreError> {
        let resp = check_response(self.http.get(&self.collection_url).send().await?).await?;
        decode_json(resp).await
    }

    async fn create(&self, question: &NewQuestion) -> Result<Question, StoreError> {
        let resp = self
            .http
            .post(&self.collection_url)
            .json(question)
            .send()
            .await?;
        decode_json(check_response(resp).await?).await
    }

    async fn update(&self, id: &QuestionId, question: &NewQuestion) -> Result<(), StoreError> {
        let resp = self.http.put(self.item_url(id)).json(question).send().await?;
        check_response(resp).await?;
        Ok(())
    }

    async fn delete(&self, id: &QuestionId) -> Result<(), StoreError> {
        let resp = self.http.delete(self.item_url(id)).send().await?;
        check_response(resp).await?;
        Ok(())
    }
}

/// Turns any non-success status into [`StoreError::Status`] carrying the body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    if !resp.status().is_success() {
        return Err(StoreError::Status {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Decodes the body separately from the transport so a bad payload is
/// reported as [`StoreError::Malformed`] rather than a network error.
async fn decode_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, StoreError> {
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
