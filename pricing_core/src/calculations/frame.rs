//! # Frame Calculator
//!
//! Prices a picture frame from its parts:
//!
//! - molding: padded perimeter (m) × price per meter
//! - glass or mirror (optional): padded area (ft²) × rate
//! - crossbeams (BASTIDOR only): shorter side (m) × price per meter × count
//! - background (optional): original area (ft²) × rate
//!
//! A background enlarges the opening by 10 cm per dimension, which is why
//! molding and glass use the padded size while the background does not.
//! The sum is rounded up to the next half sol, multiplied by quantity, and
//! the total is rounded again.
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::calculations::frame::{calculate, FrameInput};
//! use pricing_core::catalog::{MoldingQuality, MoldingSelection};
//! use pricing_core::dimensions::Dimensions;
//! use pricing_core::rounding::RoundingStrategy;
//!
//! let input = FrameInput {
//!     molding: MoldingSelection {
//!         name: "Bastidor 4cm".to_string(),
//!         quality: MoldingQuality::Bastidor,
//!         thickness_id: "4cm".to_string(),
//!         price_per_meter: 5.0,
//!     },
//!     dimensions: Dimensions::new(60.0, 40.0).unwrap(),
//!     glass: None,
//!     background: None,
//!     crossbeams: 2,
//!     texture: None,
//!     color: None,
//!     quantity: 1,
//! };
//!
//! let result = calculate(&input, RoundingStrategy::RoundUnitAndTotal).unwrap();
//! assert_eq!(result.breakdown.crossbeam_cost, 4.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{BackgroundSelection, MoldingSelection, PriceCatalog};
use crate::description::FrameDescription;
use crate::dimensions::Dimensions;
use crate::errors::{QuoteError, QuoteResult};
use crate::rounding::RoundingStrategy;
use crate::selection::GlassSelection;
use crate::services::{crossbeam_cost, ServiceUnit};

/// Glass or mirror fitted in a frame, with its resolved rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameGlass {
    pub selection: GlassSelection,
    pub price: f64,
    #[serde(default)]
    pub basis: ServiceUnit,
}

impl FrameGlass {
    /// Resolve the rate for a selection from a catalog.
    pub fn from_catalog(catalog: &PriceCatalog, selection: GlassSelection) -> QuoteResult<Self> {
        selection.validate()?;
        let rate = catalog.glass_rate(
            selection.family,
            selection.thickness_mm,
            selection.finish,
            selection.price_color().lookup_color(),
        )?;
        Ok(FrameGlass {
            selection,
            price: rate.price,
            basis: rate.basis,
        })
    }

    fn cost(&self, dims: &Dimensions) -> f64 {
        match self.basis {
            ServiceUnit::Ft2 => dims.area_sq_ft() * self.price,
            ServiceUnit::Unidad => self.price,
        }
    }
}

/// Input parameters for a framed piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    pub molding: MoldingSelection,
    /// Size of the piece being framed
    pub dimensions: Dimensions,
    #[serde(default)]
    pub glass: Option<FrameGlass>,
    #[serde(default)]
    pub background: Option<BackgroundSelection>,
    /// 0, 1 or 2; BASTIDOR only
    #[serde(default)]
    pub crossbeams: u8,
    #[serde(default)]
    pub texture: Option<String>,
    /// Decorative molding color
    #[serde(default)]
    pub color: Option<String>,
    pub quantity: u32,
}

impl FrameInput {
    pub fn validate(&self) -> QuoteResult<()> {
        self.dimensions.validate()?;
        if self.quantity == 0 {
            return Err(QuoteError::invalid_input(
                "quantity",
                self.quantity.to_string(),
                "Quantity must be at least 1",
            ));
        }
        self.molding.validate()?;
        if let Some(background) = &self.background {
            background.validate()?;
        }
        if let Some(glass) = &self.glass {
            glass.selection.validate()?;
            if !glass.price.is_finite() || glass.price < 0.0 {
                return Err(QuoteError::invalid_input(
                    "glass.price",
                    glass.price.to_string(),
                    "Glass price cannot be negative",
                ));
            }
        }
        Ok(())
    }

    /// Size used for molding and glass
    pub fn frame_dimensions(&self) -> Dimensions {
        self.dimensions.with_background_padding(self.background.is_some())
    }

    pub fn description(&self) -> String {
        FrameDescription::new(&self.molding.name)
            .with_texture(self.texture.as_deref())
            .with_color(self.color.as_deref())
            .with_crossbeams(self.crossbeams)
            .with_background(self.background.as_ref().map(BackgroundSelection::label))
            .with_glass(self.glass.as_ref().map(|g| &g.selection))
            .with_dimensions(&self.dimensions)
            .build()
    }
}

/// Cost of each part of a frame, plus the rounded prices.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub molding_cost: f64,
    pub glass_cost: f64,
    pub crossbeam_cost: f64,
    pub background_cost: f64,
    pub unit_price: f64,
    pub total_price: f64,
}

impl PriceBreakdown {
    /// Sum of the parts before rounding
    pub fn raw_unit_price(&self) -> f64 {
        self.molding_cost + self.glass_cost + self.crossbeam_cost + self.background_cost
    }
}

/// Results from a frame calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    pub breakdown: PriceBreakdown,
    /// Padded when a background is selected
    pub frame_dimensions: Dimensions,
    pub perimeter_m: f64,
    pub glass_area_sq_ft: f64,
    pub background_area_sq_ft: f64,
    pub quantity: u32,
    pub description: String,
    pub rounding: RoundingStrategy,
}

/// Calculate a frame price.
pub fn calculate(input: &FrameInput, strategy: RoundingStrategy) -> QuoteResult<FrameResult> {
    input.validate()?;

    let frame_dims = input.frame_dimensions();
    let perimeter_m = frame_dims.perimeter_m();

    let molding_cost = perimeter_m * input.molding.price_per_meter;
    let glass_cost = input.glass.as_ref().map_or(0.0, |g| g.cost(&frame_dims));
    let crossbeam_cost = crossbeam_cost(
        &input.dimensions,
        input.molding.quality,
        input.molding.price_per_meter,
        input.crossbeams,
    )?;
    let background_area_sq_ft = if input.background.is_some() {
        input.dimensions.area_sq_ft()
    } else {
        0.0
    };
    let background_cost = input
        .background
        .as_ref()
        .map_or(0.0, |b| background_area_sq_ft * b.price_per_sq_ft);

    let mut breakdown = PriceBreakdown {
        molding_cost,
        glass_cost,
        crossbeam_cost,
        background_cost,
        unit_price: 0.0,
        total_price: 0.0,
    };
    let totals = strategy.finalize(breakdown.raw_unit_price(), input.quantity);
    breakdown.unit_price = totals.unit_price;
    breakdown.total_price = totals.total_price;

    Ok(FrameResult {
        breakdown,
        frame_dimensions: frame_dims,
        perimeter_m,
        glass_area_sq_ft: if input.glass.is_some() { frame_dims.area_sq_ft() } else { 0.0 },
        background_area_sq_ft,
        quantity: input.quantity,
        description: input.description(),
        rounding: strategy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{GlassFamily, MoldingQuality};

    fn molding(quality: MoldingQuality, price_per_meter: f64) -> MoldingSelection {
        MoldingSelection {
            name: "Moldura Test".to_string(),
            quality,
            thickness_id: "3cm".to_string(),
            price_per_meter,
        }
    }

    fn input(width: f64, height: f64) -> FrameInput {
        FrameInput {
            molding: molding(MoldingQuality::Estandar, 10.0),
            dimensions: Dimensions::new(width, height).unwrap(),
            glass: None,
            background: None,
            crossbeams: 0,
            texture: None,
            color: None,
            quantity: 1,
        }
    }

    #[test]
    fn test_bastidor_crossbeams() {
        let mut frame = input(60.0, 40.0);
        frame.molding = molding(MoldingQuality::Bastidor, 5.0);
        frame.crossbeams = 2;

        let result = calculate(&frame, RoundingStrategy::RoundUnitAndTotal).unwrap();
        assert_eq!(result.breakdown.crossbeam_cost, 4.0);
        // perimeter 2.0 m × 5 = 10.00, plus 4.00 of crossbeams
        assert_eq!(result.breakdown.molding_cost, 10.0);
        assert_eq!(result.breakdown.unit_price, 14.0);
    }

    #[test]
    fn test_crossbeams_rejected_for_other_qualities() {
        let mut frame = input(60.0, 40.0);
        frame.crossbeams = 1;
        assert!(calculate(&frame, RoundingStrategy::RoundUnitAndTotal).is_err());
    }

    #[test]
    fn test_background_padding_applies_to_molding_and_glass_only() {
        let mut frame = input(30.0, 40.0);
        frame.glass = Some(FrameGlass {
            selection: GlassSelection::new(GlassFamily::Plano),
            price: 3.0,
            basis: ServiceUnit::Ft2,
        });
        frame.background = Some(BackgroundSelection {
            kind: "Cartón".to_string(),
            color: None,
            price_per_sq_ft: 2.0,
        });

        let result = calculate(&frame, RoundingStrategy::RoundUnitAndTotal).unwrap();
        assert_eq!(result.frame_dimensions, Dimensions { width_cm: 40.0, height_cm: 50.0 });
        assert_eq!(result.perimeter_m, 1.8);
        assert_eq!(result.breakdown.molding_cost, 18.0);
        assert!((result.glass_area_sq_ft - 2000.0 / 929.0304).abs() < 1e-9);
        assert!((result.background_area_sq_ft - 1200.0 / 929.0304).abs() < 1e-9);
        assert!((result.breakdown.background_cost - 2.0 * 1200.0 / 929.0304).abs() < 1e-9);
    }

    #[test]
    fn test_no_background_no_padding() {
        let result = calculate(&input(30.0, 40.0), RoundingStrategy::RoundUnitAndTotal).unwrap();
        assert_eq!(result.perimeter_m, 1.4);
        assert_eq!(result.breakdown.background_cost, 0.0);
        assert_eq!(result.breakdown.unit_price, 14.0);
    }

    #[test]
    fn test_unit_and_total_rounding() {
        // perimeter 1.42 m × 10 = 14.2 → 14.5; × 3 = 43.5
        let mut frame = input(31.0, 40.0);
        frame.quantity = 3;
        let result = calculate(&frame, RoundingStrategy::RoundUnitAndTotal).unwrap();
        assert_eq!(result.breakdown.unit_price, 14.5);
        assert_eq!(result.breakdown.total_price, 43.5);
        assert!(result.breakdown.raw_unit_price() < result.breakdown.unit_price);
    }

    #[test]
    fn test_whole_price_not_rounded_up() {
        // 0.56 m × 12.5 = 7.00, not 7.50
        let mut frame = input(10.0, 18.0);
        frame.molding.price_per_meter = 12.5;
        let result = calculate(&frame, RoundingStrategy::RoundUnitAndTotal).unwrap();
        assert_eq!(result.breakdown.unit_price, 7.0);
        assert_eq!(result.breakdown.total_price, 7.0);

        frame.quantity = 4;
        let result = calculate(&frame, RoundingStrategy::RoundUnitOnly).unwrap();
        assert_eq!(result.breakdown.total_price, 28.0);
    }

    #[test]
    fn test_glass_from_catalog() {
        let catalog = PriceCatalog::sample();
        let selection = GlassSelection::new(GlassFamily::Espejo);
        let glass = FrameGlass::from_catalog(catalog, selection).unwrap();
        assert_eq!(glass.basis, ServiceUnit::Ft2);
        assert_eq!(glass.price, 7.5);
    }

    #[test]
    fn test_description() {
        let mut frame = input(60.0, 40.0);
        frame.texture = Some("Rústica".to_string());
        frame.background = Some(BackgroundSelection {
            kind: "Tela".to_string(),
            color: Some("Negro".to_string()),
            price_per_sq_ft: 2.5,
        });
        assert_eq!(
            frame.description(),
            "Moldura Test, Textura: Rústica, Fondo: Tela Negro (60x40 cm)"
        );
    }

    #[test]
    fn test_invalid_inputs() {
        let mut frame = input(30.0, 40.0);
        frame.quantity = 0;
        assert!(calculate(&frame, RoundingStrategy::RoundUnitAndTotal).unwrap_err().is_silent());

        let mut frame = input(30.0, 40.0);
        frame.molding.price_per_meter = -1.0;
        assert!(calculate(&frame, RoundingStrategy::RoundUnitAndTotal).is_err());
    }
}
