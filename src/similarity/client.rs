use super::types::{ErrorBody, FindSimilarResponse, HealthResponse};
use crate::config::TOP_K_RANGE;
use crate::error::{ExplorerError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;

/// 類似画像検索サービスのクライアント
#[derive(Debug, Clone)]
pub struct SimilarityClient {
    http: Client,
    base_url: String,
}

impl SimilarityClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// サービスの状態確認
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }

    /// 類似画像を検索
    pub async fn find_similar(&self, bytes: Vec<u8>, file_name: &str, mime_type: &str, top_k: usize) -> Result<FindSimilarResponse> {
        if !TOP_K_RANGE.contains(&top_k) {
            return Err(ExplorerError::InvalidInput(format!(
                "top_kは{}〜{}で指定してください: {}",
                TOP_K_RANGE.start(),
                TOP_K_RANGE.end(),
                top_k
            )));
        }

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type)?;
        let form = Form::new().part("file", part);

        tracing::debug!(url = %self.base_url, file_name, top_k, "find_similar request");

        let response = self
            .http
            .post(format!("{}/find_similar", self.base_url))
            .query(&[("top_k", top_k)])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.detail)
                .unwrap_or(body);
            return Err(ExplorerError::ServiceStatus {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ExplorerError::ServiceResponse(e.to_string()))
    }
}
