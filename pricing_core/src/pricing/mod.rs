//! # Pricing Service Boundary
//!
//! Glass prices come from a pricing service keyed by company. Two
//! implementations share the [`PricingService`] trait:
//!
//! - [`HttpPricingService`] calls the web application's pricing endpoints
//! - [`PriceCatalog`](crate::catalog::PriceCatalog) prices from a local table
//!
//! The calculators only ever talk to the trait.

pub mod http;
pub mod local;
pub mod request;

pub use http::HttpPricingService;
pub use request::{ErrorPayload, GlassPriceRequest, PriceQuote};

use async_trait::async_trait;

use crate::catalog::GlassFamily;
use crate::errors::QuoteResult;
use crate::rules::allowed_thicknesses;

/// Source of glass prices and catalog option lists.
#[async_trait]
pub trait PricingService: Send + Sync {
    /// Price one piece of glass with its services.
    async fn calculate_glass(&self, request: &GlassPriceRequest) -> QuoteResult<PriceQuote>;

    /// Thicknesses (mm) the company sells for a family.
    async fn list_thicknesses(
        &self,
        company_id: &str,
        family: GlassFamily,
    ) -> QuoteResult<Vec<f64>>;
}

/// Keep only thicknesses the rules allow for the family, thinnest first, deduplicated.
pub fn narrow_thicknesses(family: GlassFamily, listed: &[f64]) -> Vec<f64> {
    allowed_thicknesses(family)
        .iter()
        .copied()
        .filter(|t| listed.contains(t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_thicknesses() {
        let listed = [12.0, 6.0, 7.0, 6.0, 8.0];
        assert_eq!(narrow_thicknesses(GlassFamily::Templado, &listed), vec![6.0, 8.0, 12.0]);
        assert!(narrow_thicknesses(GlassFamily::Catedral, &listed).is_empty());
    }
}
