use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;

use crate::error::ApiError;
use crate::models::{
    Booking, BookingRequest, LoginRequest, LoginResponse, RawDestination, RegisterRequest,
};
use crate::service::TravelApi;

/// `reqwest`-backed client for the travel service.
#[derive(Debug, Clone)]
pub struct HttpApi {
    http_client: Client,
    base_url: String,
}

impl HttpApi {
    /// Client with a default `reqwest::Client`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Client with a custom `reqwest::Client` (proxies, native timeouts, ...).
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            http_client: client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), "travel service returned an error");
        Err(ApiError::from_status(status.as_u16(), &body))
    }
}

impl TravelApi for HttpApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let builder = self.http_client.post(self.url("/auth/login")).json(request);
        let response = self.send(builder).await?;
        Ok(response.json().await?)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let builder = self.http_client.post(self.url("/auth/register")).json(request);
        self.send(builder).await?;
        Ok(())
    }

    async fn list_destinations(
        &self,
        token: Option<&str>,
    ) -> Result<Vec<RawDestination>, ApiError> {
        let mut builder = self.http_client.get(self.url("/destinations/"));
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        let response = self.send(builder).await?;
        Ok(response.json().await?)
    }

    async fn create_booking(
        &self,
        token: &str,
        request: &BookingRequest,
    ) -> Result<Booking, ApiError> {
        let builder = self
            .http_client
            .post(self.url("/bookings/"))
            .bearer_auth(token)
            .json(request);
        let response = match self.send(builder).await {
            Err(ApiError::NotFound) | Err(ApiError::Rejected { status: 405, .. }) => {
                debug!("POST /bookings/ unavailable, retrying on /bookings/create");
                let builder = self
                    .http_client
                    .post(self.url("/bookings/create"))
                    .bearer_auth(token)
                    .json(request);
                self.send(builder).await?
            }
            other => other?,
        };
        Ok(response.json().await?)
    }

    async fn list_bookings(&self, token: &str) -> Result<Vec<Booking>, ApiError> {
        let builder = self.http_client.get(self.url("/bookings/")).bearer_auth(token);
        let response = self.send(builder).await?;
        Ok(response.json().await?)
    }

    async fn delete_booking(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let builder = self
            .http_client
            .delete(self.url(&format!("/bookings/{id}")))
            .bearer_auth(token);
        self.send(builder).await?;
        Ok(())
    }
}
