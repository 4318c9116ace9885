//! HTTP client for the web application's pricing endpoints.
//!
//! - `POST {base}/api/pricing/glass/calc` prices a piece
//! - `GET {base}/api/pricing/thicknesses?companyId=..&family=..` lists thicknesses
//!
//! A non-2xx answer becomes [`QuoteError::PricingRejected`] carrying the
//! `{ "error": .. }` text; a request that never got an answer becomes
//! [`QuoteError::Transport`]. Nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::catalog::GlassFamily;
use crate::config::ServiceConfig;
use crate::errors::{QuoteError, QuoteResult};

use super::request::{ErrorPayload, GlassPriceRequest, PriceQuote};
use super::{narrow_thicknesses, PricingService};

const GLASS_CALC_PATH: &str = "api/pricing/glass/calc";
const THICKNESSES_PATH: &str = "api/pricing/thicknesses";

/// Pricing service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPricingService {
    client: Client,
    base_url: String,
}

impl HttpPricingService {
    pub fn new(config: &ServiceConfig) -> QuoteResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| QuoteError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(HttpPricingService {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Turn a non-2xx body into a rejection, keeping the service's message when it sent one.
pub(crate) fn rejection_from_body(status: u16, body: &str) -> QuoteError {
    match serde_json::from_str::<ErrorPayload>(body) {
        Ok(payload) if !payload.error.trim().is_empty() => {
            QuoteError::pricing_rejected(status, payload.error)
        }
        _ => QuoteError::pricing_rejected(
            status,
            format!("El servicio de precios respondió {}", status),
        ),
    }
}

#[async_trait]
impl PricingService for HttpPricingService {
    async fn calculate_glass(&self, request: &GlassPriceRequest) -> QuoteResult<PriceQuote> {
        let url = self.endpoint(GLASS_CALC_PATH);
        tracing::debug!(%url, company_id = %request.company_id, "requesting glass price");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| QuoteError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = rejection_from_body(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), %error, "pricing service rejected request");
            return Err(error);
        }

        response.json::<PriceQuote>().await.map_err(|e| QuoteError::SerializationError {
            reason: format!("Invalid pricing response: {}", e),
        })
    }

    async fn list_thicknesses(
        &self,
        company_id: &str,
        family: GlassFamily,
    ) -> QuoteResult<Vec<f64>> {
        let url = Url::parse_with_params(
            &self.endpoint(THICKNESSES_PATH),
            &[("companyId", company_id), ("family", family.code())],
        )
        .map_err(|e| {
            QuoteError::config(format!("Invalid pricing base URL '{}': {}", self.base_url, e))
        })?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| QuoteError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(rejection_from_body(status.as_u16(), &body));
        }

        let listed: Vec<f64> = response.json().await.map_err(|e| QuoteError::SerializationError {
            reason: format!("Invalid thickness list: {}", e),
        })?;
        Ok(narrow_thicknesses(family, &listed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:3000/", "/api/pricing/glass/calc"),
            "http://localhost:3000/api/pricing/glass/calc"
        );
        assert_eq!(
            join_url("https://app.example.com", GLASS_CALC_PATH),
            "https://app.example.com/api/pricing/glass/calc"
        );
    }

    #[test]
    fn test_rejection_uses_payload() {
        let error = rejection_from_body(422, r#"{"error":"Combinación no disponible"}"#);
        assert_eq!(error, QuoteError::pricing_rejected(422, "Combinación no disponible"));
        assert_eq!(error.user_message(), "Combinación no disponible");
    }

    #[test]
    fn test_rejection_without_payload() {
        let error = rejection_from_body(502, "<html>Bad Gateway</html>");
        assert_eq!(error.error_code(), "PRICING_REJECTED");
        assert!(error.user_message().contains("502"));

        let blank = rejection_from_body(400, r#"{"error":"  "}"#);
        assert!(blank.user_message().contains("400"));
    }

    #[test]
    fn test_client_from_config() {
        let config = ServiceConfig::default();
        let service = HttpPricingService::new(&config).unwrap();
        assert_eq!(service.base_url(), config.base_url);
        assert!(service.endpoint(GLASS_CALC_PATH).ends_with("/api/pricing/glass/calc"));
    }
}
