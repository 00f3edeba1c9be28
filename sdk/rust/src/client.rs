use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One line of a session cart, as returned by the edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: i64,
    pub quantity: i64,
    pub price: f64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub lines: usize,
    pub item_count: i64,
    pub total_amount: f64,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("edge returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Async client for the storefront edge HTTP API.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    client: Client,
    base_url: String,
}

impl StorefrontClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn cart(&self, session: &str) -> Result<Vec<CartLine>, ClientError> {
        let resp = self.client.get(self.url(&format!("/api/cart/{session}"))).send().await?;
        decode(resp).await
    }

    pub async fn add_to_cart(
        &self,
        session: &str,
        line: &CartLine,
    ) -> Result<Vec<CartLine>, ClientError> {
        let resp = self
            .client
            .post(self.url(&format!("/api/cart/{session}")))
            .json(line)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn set_quantity(
        &self,
        session: &str,
        product_id: i64,
        quantity: i64,
    ) -> Result<Vec<CartLine>, ClientError> {
        let resp = self
            .client
            .put(self.url(&format!("/api/cart/{session}/{product_id}")))
            .json(&serde_json::json!({ "quantity": quantity }))
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn remove_from_cart(
        &self,
        session: &str,
        product_id: i64,
    ) -> Result<Vec<CartLine>, ClientError> {
        let resp = self
            .client
            .delete(self.url(&format!("/api/cart/{session}/{product_id}")))
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn clear_cart(&self, session: &str) -> Result<Vec<CartLine>, ClientError> {
        let resp = self
            .client
            .delete(self.url(&format!("/api/cart/{session}")))
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn summary(&self, session: &str) -> Result<CartSummary, ClientError> {
        let resp = self
            .client
            .get(self.url(&format!("/api/cart/{session}/summary")))
            .send()
            .await?;
        decode(resp).await
    }

    /// Place an order for the cart. Returns the backend's order confirmation.
    pub async fn checkout(&self, session: &str) -> Result<serde_json::Value, ClientError> {
        let resp = self
            .client
            .post(self.url(&format!("/api/cart/{session}/checkout")))
            .send()
            .await?;
        decode(resp).await
    }

    /// Raw product listing, relayed from the backend.
    pub async fn products(&self) -> Result<Response, reqwest::Error> {
        self.client.get(self.url("/api/products")).send().await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Status { status, body });
    }
    Ok(resp.json().await?)
}
