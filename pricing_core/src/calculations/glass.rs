//! # Glass Calculator
//!
//! Prices a cut piece of glass: validates the selection, asks the pricing
//! service for the piece price, then rounds the unit price up to the next
//! half sol and multiplies by quantity.
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::calculations::glass::{finalize, GlassQuoteInput};
//! use pricing_core::catalog::GlassFamily;
//! use pricing_core::dimensions::Dimensions;
//! use pricing_core::pricing::PriceQuote;
//! use pricing_core::rounding::RoundingStrategy;
//! use pricing_core::selection::{GlassSelection, SelectionChange};
//! use pricing_core::services::{ServiceSelection, ServiceUnit};
//!
//! let input = GlassQuoteInput {
//!     selection: GlassSelection::new(GlassFamily::Plano).apply(SelectionChange::Thickness(6.0)),
//!     dimensions: Dimensions::new(100.0, 150.0).unwrap(),
//!     services: ServiceSelection::default(),
//!     quantity: 1,
//! };
//! let quote = PriceQuote { total: 10.0, unit: ServiceUnit::Ft2, description: String::new() };
//!
//! let result = finalize(&input, &quote, RoundingStrategy::RoundUnitOnly);
//! assert_eq!(result.unit_price, 161.5);
//! assert_eq!(result.total_price, 161.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::description::build_glass_description;
use crate::dimensions::Dimensions;
use crate::errors::{QuoteError, QuoteResult};
use crate::pricing::{GlassPriceRequest, PriceQuote, PricingService};
use crate::rounding::RoundingStrategy;
use crate::selection::GlassSelection;
use crate::services::{ServiceSelection, ServiceUnit};

/// Everything the glass calculator needs from the user.
///
/// ## JSON Example
///
/// ```json
/// {
///   "selection": {
///     "family": "PLANO",
///     "thickness_mm": 6.0,
///     "finish": "INCOLORO",
///     "color": "NONE"
///   },
///   "dimensions": { "width_cm": 100.0, "height_cm": 150.0 },
///   "services": { "services": [{ "kind": "PERFORACION", "enabled": true, "quantity": 2 }] },
///   "quantity": 1
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlassQuoteInput {
    pub selection: GlassSelection,
    pub dimensions: Dimensions,
    #[serde(default)]
    pub services: ServiceSelection,
    pub quantity: u32,
}

impl GlassQuoteInput {
    /// Input-state checks; failing these means "don't calculate yet".
    pub fn validate(&self) -> QuoteResult<()> {
        self.dimensions.validate()?;
        if self.quantity == 0 {
            return Err(QuoteError::invalid_input(
                "quantity",
                self.quantity.to_string(),
                "Quantity must be at least 1",
            ));
        }
        Ok(())
    }

    /// Pricing request for this input; also rejects unsellable combinations.
    pub fn to_request(&self, company_id: &str) -> QuoteResult<GlassPriceRequest> {
        self.validate()?;
        GlassPriceRequest::prepare(company_id, &self.selection, &self.dimensions, &self.services)
    }
}

/// Priced glass line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlassQuote {
    pub area_sq_ft: f64,
    /// Piece price before rounding
    pub raw_unit_price: f64,
    pub unit_price: f64,
    pub total_price: f64,
    pub quantity: u32,
    pub description: String,
    /// Basis the pricing service answered in
    pub price_basis: ServiceUnit,
    pub rounding: RoundingStrategy,
}

/// Combine a service answer with the input into a finished line.
pub fn finalize(
    input: &GlassQuoteInput,
    quote: &PriceQuote,
    strategy: RoundingStrategy,
) -> GlassQuote {
    let area_sq_ft = input.dimensions.area_sq_ft();
    let raw_unit_price = quote.piece_price(area_sq_ft);
    let totals = strategy.finalize(raw_unit_price, input.quantity);

    GlassQuote {
        area_sq_ft,
        raw_unit_price,
        unit_price: totals.unit_price,
        total_price: totals.total_price,
        quantity: input.quantity,
        description: build_glass_description(
            &quote.description,
            &input.selection,
            Some(&input.dimensions),
        ),
        price_basis: quote.unit,
        rounding: strategy,
    }
}

/// Price a glass line through a pricing service.
pub async fn calculate(
    input: &GlassQuoteInput,
    company_id: &str,
    service: &dyn PricingService,
    strategy: RoundingStrategy,
) -> QuoteResult<GlassQuote> {
    let request = input.to_request(company_id)?;
    let quote = service.calculate_glass(&request).await?;
    Ok(finalize(input, &quote, strategy))
}
