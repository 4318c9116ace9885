//! Pricing from a local [`PriceCatalog`].
//!
//! Returns the full piece price (`UNIDAD`): glass rate times area plus
//! services. Services without a rate add nothing.

use async_trait::async_trait;

use crate::catalog::{GlassFamily, PriceCatalog};
use crate::errors::{QuoteError, QuoteResult};
use crate::rules::available_finishes;
use crate::services::{compose_service_charges, ServiceUnit};

use super::request::{GlassPriceRequest, PriceQuote};
use super::PricingService;

impl PriceCatalog {
    fn check_company(&self, company_id: &str) -> QuoteResult<()> {
        if !self.company_id.is_empty() && self.company_id != company_id {
            return Err(QuoteError::catalog_entry_not_found(format!("company '{}'", company_id)));
        }
        Ok(())
    }

    /// Price a request synchronously.
    pub fn price_glass(&self, request: &GlassPriceRequest) -> QuoteResult<PriceQuote> {
        self.check_company(&request.company_id)?;
        let dims = request.dimensions();
        dims.validate()?;

        let finish = match request.finish {
            Some(finish) => finish,
            None => available_finishes(request.family, request.thickness_mm)[0],
        };
        if !available_finishes(request.family, request.thickness_mm).contains(&finish) {
            return Err(QuoteError::invalid_combination(
                format!("{} {}mm {}", request.family.code(), request.thickness_mm, finish.code()),
                format!("Acabado {} no disponible", finish),
            ));
        }

        let rate = self.glass_rate(request.family, request.thickness_mm, finish, request.color)?;
        let area = dims.area_sq_ft();
        let glass_price = match rate.basis {
            ServiceUnit::Ft2 => rate.price * area,
            ServiceUnit::Unidad => rate.price,
        };
        let services = compose_service_charges(&request.services, &self.service_rates, area);

        tracing::debug!(
            family = request.family.code(),
            thickness_mm = request.thickness_mm,
            glass_price,
            services = services.total,
            "priced glass from local catalog"
        );

        Ok(PriceQuote {
            total: glass_price + services.total,
            unit: ServiceUnit::Unidad,
            description: format!(
                "{} {}mm {}",
                request.family.display_name(),
                request.thickness_mm,
                finish.display_name()
            ),
        })
    }
}

#[async_trait]
impl PricingService for PriceCatalog {
    async fn calculate_glass(&self, request: &GlassPriceRequest) -> QuoteResult<PriceQuote> {
        self.price_glass(request)
    }

    async fn list_thicknesses(
        &self,
        company_id: &str,
        family: GlassFamily,
    ) -> QuoteResult<Vec<f64>> {
        self.check_company(company_id)?;
        Ok(self.priced_thicknesses(family))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogColor, GlassFinish, GlassRate};
    use crate::services::{ServiceKind, ServiceRequestLine};

    fn catalog() -> PriceCatalog {
        PriceCatalog::new("acme")
            .with_glass_rate(GlassRate {
                family: GlassFamily::Plano,
                thickness_mm: 6.0,
                finish: GlassFinish::Incoloro,
                color: CatalogColor::NoColor,
                price: 10.0,
                basis: ServiceUnit::Ft2,
            })
            .with_service_rate(ServiceKind::Perforacion, 2.0)
    }

    fn request() -> GlassPriceRequest {
        GlassPriceRequest {
            company_id: "acme".to_string(),
            family: GlassFamily::Plano,
            thickness_mm: 6.0,
            finish: Some(GlassFinish::Incoloro),
            color: CatalogColor::NoColor,
            ancho_cm: 100.0,
            alto_cm: 150.0,
            services: vec![],
        }
    }

    #[test]
    fn test_price_glass() {
        let quote = catalog().price_glass(&request()).unwrap();
        assert_eq!(quote.unit, ServiceUnit::Unidad);
        assert!((quote.total - 161.4586).abs() < 1e-3);
        assert_eq!(quote.description, "Vidrio plano 6mm Incoloro");
    }

    #[test]
    fn test_services_added_and_missing_rates_free() {
        let mut req = request();
        req.services = vec![
            ServiceRequestLine {
                process: ServiceKind::Perforacion,
                unit: ServiceUnit::Unidad,
                qty: Some(3),
            },
            ServiceRequestLine {
                process: ServiceKind::CantoPulido,
                unit: ServiceUnit::Ft2,
                qty: None,
            },
        ];
        let base = catalog().price_glass(&request()).unwrap().total;
        let with_services = catalog().price_glass(&req).unwrap().total;
        assert!((with_services - base - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_finish_defaults_to_first_available() {
        let mut req = request();
        req.finish = None;
        assert!(catalog().price_glass(&req).is_ok());
    }

    #[test]
    fn test_rejections() {
        let mut other_company = request();
        other_company.company_id = "other".to_string();
        assert!(catalog().price_glass(&other_company).is_err());

        let mut missing_rate = request();
        missing_rate.thickness_mm = 8.0;
        assert_eq!(
            catalog().price_glass(&missing_rate).unwrap_err().error_code(),
            "CATALOG_ENTRY_NOT_FOUND"
        );

        let mut bad_finish = request();
        bad_finish.finish = Some(GlassFinish::Mate);
        assert_eq!(
            catalog().price_glass(&bad_finish).unwrap_err().error_code(),
            "INVALID_COMBINATION"
        );
    }

    #[tokio::test]
    async fn test_trait_impl() {
        let catalog = catalog();
        let service: &dyn PricingService = &catalog;
        let quote = service.calculate_glass(&request()).await.unwrap();
        assert!(quote.total > 161.0);
        let thicknesses = service.list_thicknesses("acme", GlassFamily::Plano).await.unwrap();
        assert_eq!(thicknesses, vec![6.0]);
    }
}
