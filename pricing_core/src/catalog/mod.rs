//! # Price Catalog
//!
//! Option enums for glass and frames, plus a company price table that can
//! stand in for the remote pricing service.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "company_id": "vidrieria-central",
//!   "glass_rates": [
//!     { "family": "PLANO", "thickness_mm": 6.0, "finish": "INCOLORO",
//!       "color": "NONE", "price": 10.0, "basis": "FT2" }
//!   ],
//!   "service_rates": { "PERFORACION": 3.0 },
//!   "moldings": [],
//!   "backgrounds": [],
//!   "textures": ["Rústica"]
//! }
//! ```

pub mod frame;
pub mod glass;

pub use frame::{BackgroundSelection, MoldingQuality, MoldingSelection, MAX_CROSSBEAMS};
pub use glass::{CatalogColor, GlassColor, GlassFamily, GlassFinish, PriceColor};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, QuoteResult};
use crate::rules::allowed_thicknesses;
use crate::services::{ServiceKind, ServiceRates, ServiceUnit};

/// One priced glass combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlassRate {
    pub family: GlassFamily,
    pub thickness_mm: f64,
    pub finish: GlassFinish,
    pub color: CatalogColor,
    pub price: f64,
    /// Per square foot or per piece
    #[serde(default)]
    pub basis: ServiceUnit,
}

impl GlassRate {
    fn matches(
        &self,
        family: GlassFamily,
        thickness_mm: f64,
        finish: GlassFinish,
        color: CatalogColor,
    ) -> bool {
        self.family == family
            && self.thickness_mm == thickness_mm
            && self.finish == finish
            && self.color == color
    }
}

/// A company's price table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceCatalog {
    pub company_id: String,
    #[serde(default)]
    pub glass_rates: Vec<GlassRate>,
    #[serde(default)]
    pub service_rates: ServiceRates,
    #[serde(default)]
    pub moldings: Vec<MoldingSelection>,
    #[serde(default)]
    pub backgrounds: Vec<BackgroundSelection>,
    #[serde(default)]
    pub textures: Vec<String>,
}

impl PriceCatalog {
    pub fn new(company_id: impl Into<String>) -> Self {
        PriceCatalog {
            company_id: company_id.into(),
            ..Default::default()
        }
    }

    /// Add or replace a glass rate.
    pub fn with_glass_rate(mut self, rate: GlassRate) -> Self {
        self.glass_rates
            .retain(|r| !r.matches(rate.family, rate.thickness_mm, rate.finish, rate.color));
        self.glass_rates.push(rate);
        self
    }

    pub fn with_service_rate(mut self, kind: ServiceKind, rate: f64) -> Self {
        self.service_rates.insert(kind, rate);
        self
    }

    pub fn with_molding(mut self, molding: MoldingSelection) -> Self {
        self.moldings.push(molding);
        self
    }

    pub fn with_background(mut self, background: BackgroundSelection) -> Self {
        self.backgrounds.push(background);
        self
    }

    /// Find the rate for a glass combination.
    pub fn glass_rate(
        &self,
        family: GlassFamily,
        thickness_mm: f64,
        finish: GlassFinish,
        color: CatalogColor,
    ) -> QuoteResult<&GlassRate> {
        self.glass_rates
            .iter()
            .find(|r| r.matches(family, thickness_mm, finish, color))
            .ok_or_else(|| {
                QuoteError::catalog_entry_not_found(format!(
                    "{}/{}mm/{}/{}",
                    family.code(),
                    thickness_mm,
                    finish.code(),
                    color.code()
                ))
            })
    }

    /// Thicknesses this company actually has a price for, thinnest first.
    pub fn priced_thicknesses(&self, family: GlassFamily) -> Vec<f64> {
        allowed_thicknesses(family)
            .iter()
            .copied()
            .filter(|t| self.glass_rates.iter().any(|r| r.family == family && r.thickness_mm == *t))
            .collect()
    }

    pub fn find_molding(&self, name: &str) -> QuoteResult<&MoldingSelection> {
        self.moldings
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| QuoteError::catalog_entry_not_found(format!("molding '{}'", name)))
    }

    pub fn find_background(&self, kind: &str) -> QuoteResult<&BackgroundSelection> {
        self.backgrounds
            .iter()
            .find(|b| b.kind.eq_ignore_ascii_case(kind.trim()))
            .ok_or_else(|| QuoteError::catalog_entry_not_found(format!("background '{}'", kind)))
    }

    /// Parse a catalog from JSON.
    pub fn from_json(json: &str) -> QuoteResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Built-in demo price table used when no catalog file is given.
    pub fn sample() -> &'static PriceCatalog {
        &SAMPLE_CATALOG
    }
}

fn ft2_rate(
    family: GlassFamily,
    thickness_mm: f64,
    finish: GlassFinish,
    color: CatalogColor,
    price: f64,
) -> GlassRate {
    GlassRate {
        family,
        thickness_mm,
        finish,
        color,
        price,
        basis: ServiceUnit::Ft2,
    }
}

static SAMPLE_CATALOG: Lazy<PriceCatalog> = Lazy::new(|| {
    use crate::catalog::glass::{CatalogColor as C, GlassFamily as F, GlassFinish as Fi};

    let mut rates = Vec::new();

    for &t in allowed_thicknesses(F::Plano) {
        rates.push(ft2_rate(F::Plano, t, Fi::Incoloro, C::NoColor, 1.5 * t));
        if t >= crate::rules::MIN_POLARIZED_PLANO_MM {
            rates.push(ft2_rate(F::Plano, t, Fi::Polarizado, C::NoColor, 1.8 * t));
            rates.push(ft2_rate(F::Plano, t, Fi::Polarizado, C::Ambar, 1.9 * t));
        }
    }
    rates.push(ft2_rate(F::Plano, 2.0, Fi::Mate, C::NoColor, 4.0));

    for &t in allowed_thicknesses(F::Catedral) {
        for finish in [Fi::Incoloro, Fi::Polarizado, Fi::Color] {
            rates.push(ft2_rate(F::Catedral, t, finish, C::NoColor, 2.2 * t));
        }
    }
    for &t in allowed_thicknesses(F::Templado) {
        rates.push(ft2_rate(F::Templado, t, Fi::Incoloro, C::NoColor, 4.0 * t));
        rates.push(ft2_rate(F::Templado, t, Fi::Polarizado, C::NoColor, 4.5 * t));
        rates.push(ft2_rate(F::Templado, t, Fi::Polarizado, C::Ambar, 4.6 * t));
    }
    for &t in allowed_thicknesses(F::Reflejante) {
        for color in [C::NoColor, C::Azul, C::Gris] {
            rates.push(ft2_rate(F::Reflejante, t, Fi::Polarizado, color, 3.0 * t));
        }
    }
    for &t in allowed_thicknesses(F::Espejo) {
        rates.push(ft2_rate(F::Espejo, t, Fi::Incoloro, C::NoColor, 2.5 * t));
    }

    rates
        .into_iter()
        .fold(PriceCatalog::new("demo"), PriceCatalog::with_glass_rate)
        .with_service_rate(ServiceKind::Perforacion, 3.0)
        .with_service_rate(ServiceKind::CantoPulido, 1.5)
        .with_service_rate(ServiceKind::CantoBisel, 2.5)
        .with_molding(MoldingSelection {
            name: "Moldura Simple 2cm".to_string(),
            quality: MoldingQuality::Estandar,
            thickness_id: "2cm".to_string(),
            price_per_meter: 8.0,
        })
        .with_molding(MoldingSelection {
            name: "Moldura Roble 3cm".to_string(),
            quality: MoldingQuality::Premium,
            thickness_id: "3cm".to_string(),
            price_per_meter: 15.0,
        })
        .with_molding(MoldingSelection {
            name: "Bastidor 4cm".to_string(),
            quality: MoldingQuality::Bastidor,
            thickness_id: "4cm".to_string(),
            price_per_meter: 5.0,
        })
        .with_background(BackgroundSelection {
            kind: "Cartón".to_string(),
            color: None,
            price_per_sq_ft: 1.0,
        })
        .with_background(BackgroundSelection {
            kind: "Tela".to_string(),
            color: Some("Negro".to_string()),
            price_per_sq_ft: 2.5,
        })
});
