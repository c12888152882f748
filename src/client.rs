//! HTTP client for the remote portfolio service.
//!
//! | Method | Endpoint |
//! |---|---|
//! | [`fetch_photos`](ApiClient::fetch_photos) | `GET {base}/api/photos` |
//! | [`fetch_photos_in`](ApiClient::fetch_photos_in) | `GET {base}/api/photos?category=...` |
//! | [`fetch_testimonials`](ApiClient::fetch_testimonials) | `GET {base}/api/testimonials` |
//! | [`fetch_about`](ApiClient::fetch_about) | `GET {base}/api/about` |
//! | [`submit_contact`](ApiClient::submit_contact) | `POST {base}/api/contact` |
//!
//! Every non-2xx response is a [`ServiceError::Status`]; transport failures
//! and timeouts surface as [`ServiceError::Http`]. Callers never retry here:
//! a failed read leaves the page on fallback content, a failed submit shows
//! the generic failure message.

use crate::config::ApiConfig;
use crate::types::{About, Category, ContactSubmission, Photo, PortfolioData, Testimonial};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("invalid service base URL '{0}'")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_root: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ServiceError> {
        let base = config.base_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ServiceError::InvalidBaseUrl(config.base_url.clone()));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_root: format!("{base}/api"),
        })
    }

    /// Root every endpoint hangs off, e.g. `http://localhost:8001/api`.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.api_root, endpoint)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ServiceError> {
        debug!(endpoint, "GET");
        let response = self.http.get(self.url(endpoint)).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    pub async fn fetch_photos(&self) -> Result<Vec<Photo>, ServiceError> {
        self.get_json("photos", &[]).await
    }

    /// Photos of one category, filtered by the service.
    pub async fn fetch_photos_in(&self, category: Category) -> Result<Vec<Photo>, ServiceError> {
        self.get_json("photos", &[("category", category.as_str())])
            .await
    }

    pub async fn fetch_testimonials(&self) -> Result<Vec<Testimonial>, ServiceError> {
        self.get_json("testimonials", &[]).await
    }

    pub async fn fetch_about(&self) -> Result<About, ServiceError> {
        self.get_json("about", &[]).await
    }

    /// Post a contact inquiry. Only the status matters; the body is ignored.
    pub async fn submit_contact(&self, submission: &ContactSubmission) -> Result<(), ServiceError> {
        debug!("POST contact");
        let response = self
            .http
            .post(self.url("contact"))
            .json(submission)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status {
                endpoint: "contact".to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    /// Fetch photos, testimonials and about concurrently.
    ///
    /// All three must succeed; the first failure is returned.
    pub async fn load_portfolio(&self) -> Result<PortfolioData, ServiceError> {
        let (photos, testimonials, about) = tokio::try_join!(
            self.fetch_photos(),
            self.fetch_testimonials(),
            self.fetch_about()
        )?;
        info!(
            photos = photos.len(),
            testimonials = testimonials.len(),
            "portfolio loaded"
        );
        Ok(PortfolioData {
            photos,
            testimonials,
            about: Some(about),
        })
    }

    /// [`load_portfolio`](Self::load_portfolio), falling back to empty data.
    ///
    /// The page always renders: a failed load is logged and every section
    /// shows its fallback content.
    pub async fn load_portfolio_or_empty(&self) -> PortfolioData {
        match self.load_portfolio().await {
            Ok(data) => data,
            Err(e) => {
                error!(error = %e, "failed to load portfolio data");
                PortfolioData::default()
            }
        }
    }
}
