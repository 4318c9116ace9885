//! Wire types for the glass pricing endpoint.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogColor, GlassFamily, GlassFinish};
use crate::dimensions::Dimensions;
use crate::errors::{QuoteError, QuoteResult};
use crate::selection::GlassSelection;
use crate::services::{ServiceRequestLine, ServiceSelection, ServiceUnit};

/// Body of `POST /api/pricing/glass/calc`.
///
/// ## JSON Example
///
/// ```json
/// {
///   "companyId": "vidrieria-central",
///   "family": "PLANO",
///   "thicknessMM": 6.0,
///   "finish": "INCOLORO",
///   "color": "NONE",
///   "anchoCm": 100.0,
///   "altoCm": 150.0,
///   "services": [{ "process": "PERFORACION", "unit": "UNIDAD", "qty": 2 }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlassPriceRequest {
    pub company_id: String,
    pub family: GlassFamily,
    #[serde(rename = "thicknessMM")]
    pub thickness_mm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<GlassFinish>,
    pub color: CatalogColor,
    pub ancho_cm: f64,
    pub alto_cm: f64,
    #[serde(default)]
    pub services: Vec<ServiceRequestLine>,
}

impl GlassPriceRequest {
    /// Build a request the pricing service will accept.
    ///
    /// Rejects missing company, bad dimensions, and combinations that aren't
    /// sold. Description-only colors are sent as their priced lookup color.
    pub fn prepare(
        company_id: &str,
        selection: &GlassSelection,
        dims: &Dimensions,
        services: &ServiceSelection,
    ) -> QuoteResult<Self> {
        if company_id.trim().is_empty() {
            return Err(QuoteError::missing_field("companyId"));
        }
        dims.validate()?;
        selection.validate()?;

        Ok(GlassPriceRequest {
            company_id: company_id.to_string(),
            family: selection.family,
            thickness_mm: selection.thickness_mm,
            finish: Some(selection.finish),
            color: selection.price_color().lookup_color(),
            ancho_cm: dims.width_cm,
            alto_cm: dims.height_cm,
            services: services.build_request(),
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width_cm: self.ancho_cm,
            height_cm: self.alto_cm,
        }
    }
}

/// Successful pricing response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub total: f64,
    /// `FT2`: `total` is a rate per square foot. `UNIDAD`: `total` is the piece price.
    pub unit: ServiceUnit,
    #[serde(default)]
    pub description: String,
}

impl PriceQuote {
    /// Price of one piece of `area_sq_ft`, before rounding.
    pub fn piece_price(&self, area_sq_ft: f64) -> f64 {
        match self.unit {
            ServiceUnit::Ft2 => self.total * area_sq_ft,
            ServiceUnit::Unidad => self.total,
        }
    }
}

/// Error body returned with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GlassColor;
    use crate::selection::SelectionChange;
    use crate::services::ServiceKind;

    #[test]
    fn test_request_wire_format() {
        let selection =
            GlassSelection::new(GlassFamily::Plano).apply(SelectionChange::Thickness(6.0));
        let dims = Dimensions::new(100.0, 150.0).unwrap();
        let mut services = ServiceSelection::default();
        services.enable(ServiceKind::Perforacion);
        services.set_quantity(ServiceKind::Perforacion, 2);

        let request = GlassPriceRequest::prepare("acme", &selection, &dims, &services).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["companyId"], "acme");
        assert_eq!(json["family"], "PLANO");
        assert_eq!(json["thicknessMM"], 6.0);
        assert_eq!(json["finish"], "INCOLORO");
        assert_eq!(json["color"], "NONE");
        assert_eq!(json["anchoCm"], 100.0);
        assert_eq!(json["altoCm"], 150.0);
        assert_eq!(json["services"][0]["process"], "PERFORACION");
        assert_eq!(json["services"][0]["qty"], 2);
    }

    #[test]
    fn test_bronce_sent_as_none() {
        let selection = GlassSelection::new(GlassFamily::Templado)
            .apply(SelectionChange::Finish(GlassFinish::Polarizado))
            .apply(SelectionChange::Color(GlassColor::Bronce));
        let dims = Dimensions::new(50.0, 50.0).unwrap();
        let services = ServiceSelection::default();
        let request = GlassPriceRequest::prepare("acme", &selection, &dims, &services).unwrap();
        assert_eq!(request.color, CatalogColor::NoColor);
    }

    #[test]
    fn test_prepare_rejects_invalid_state() {
        let selection = GlassSelection::default();
        let services = ServiceSelection::default();
        let bad_dims = Dimensions { width_cm: 0.0, height_cm: 10.0 };
        assert!(GlassPriceRequest::prepare("acme", &selection, &bad_dims, &services).is_err());

        let dims = Dimensions::new(10.0, 10.0).unwrap();
        assert!(GlassPriceRequest::prepare(" ", &selection, &dims, &services).is_err());

        // Bypassing the reducer leaves an unsellable combination
        let stale = GlassSelection { finish: GlassFinish::Polarizado, ..GlassSelection::default() };
        let err = GlassPriceRequest::prepare("acme", &stale, &dims, &services).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_COMBINATION");
    }

    #[test]
    fn test_piece_price_by_basis() {
        let per_ft2 = PriceQuote {
            total: 10.0,
            unit: ServiceUnit::Ft2,
            description: String::new(),
        };
        assert!((per_ft2.piece_price(16.1455) - 161.455).abs() < 1e-9);

        let per_piece = PriceQuote {
            total: 80.0,
            unit: ServiceUnit::Unidad,
            description: String::new(),
        };
        assert_eq!(per_piece.piece_price(16.1455), 80.0);
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"total": 12.5, "unit": "FT2", "description": "Vidrio 6mm"}"#;
        let quote: PriceQuote = serde_json::from_str(body).unwrap();
        assert_eq!(quote.unit, ServiceUnit::Ft2);

        let error: ErrorPayload =
            serde_json::from_str(r#"{"error": "Espesor no disponible"}"#).unwrap();
        assert_eq!(error.error, "Espesor no disponible");
    }
}
