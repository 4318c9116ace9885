//! Frame materials: moldings and backgrounds.

use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, QuoteResult};

/// Most crossbeams a stretcher frame takes.
pub const MAX_CROSSBEAMS: u8 = 2;

/// Molding quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MoldingQuality {
    /// Simple / standard molding
    #[default]
    #[serde(rename = "ESTANDAR", alias = "SIMPLE", alias = "ESTÁNDAR")]
    Estandar,
    /// Fine / premium molding
    #[serde(rename = "PREMIUM", alias = "FINA")]
    Premium,
    /// Stretcher frame for canvas; the only tier that takes crossbeams
    #[serde(rename = "BASTIDOR")]
    Bastidor,
}

impl MoldingQuality {
    pub const ALL: [MoldingQuality; 3] = [
        MoldingQuality::Estandar,
        MoldingQuality::Premium,
        MoldingQuality::Bastidor,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            MoldingQuality::Estandar => "Estándar",
            MoldingQuality::Premium => "Premium",
            MoldingQuality::Bastidor => "Bastidor",
        }
    }

    pub fn supports_crossbeams(&self) -> bool {
        matches!(self, MoldingQuality::Bastidor)
    }

    pub fn from_str_flexible(s: &str) -> QuoteResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "SIMPLE" | "ESTANDAR" | "ESTÁNDAR" | "STANDARD" => Ok(MoldingQuality::Estandar),
            "FINA" | "PREMIUM" => Ok(MoldingQuality::Premium),
            "BASTIDOR" | "STRETCHER" => Ok(MoldingQuality::Bastidor),
            _ => Err(QuoteError::invalid_input("quality", s, "Unknown molding quality")),
        }
    }
}

impl std::fmt::Display for MoldingQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A molding picked from the company's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoldingSelection {
    /// Catalog name (e.g., "Moldura Roble 3cm")
    pub name: String,
    pub quality: MoldingQuality,
    /// Catalog id of the molding thickness
    pub thickness_id: String,
    /// Price per linear meter
    pub price_per_meter: f64,
}

impl MoldingSelection {
    pub fn validate(&self) -> QuoteResult<()> {
        if self.name.trim().is_empty() {
            return Err(QuoteError::missing_field("molding.name"));
        }
        if !self.price_per_meter.is_finite() || self.price_per_meter < 0.0 {
            return Err(QuoteError::invalid_input(
                "molding.price_per_meter",
                self.price_per_meter.to_string(),
                "Price per meter cannot be negative",
            ));
        }
        Ok(())
    }
}

/// Backing material placed behind the framed piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundSelection {
    /// Backing type (e.g., "Cartón", "Tela")
    pub kind: String,
    pub color: Option<String>,
    /// Price per square foot of the unpadded opening
    pub price_per_sq_ft: f64,
}

impl BackgroundSelection {
    pub fn validate(&self) -> QuoteResult<()> {
        if self.kind.trim().is_empty() {
            return Err(QuoteError::missing_field("background.kind"));
        }
        if !self.price_per_sq_ft.is_finite() || self.price_per_sq_ft < 0.0 {
            return Err(QuoteError::invalid_input(
                "background.price_per_sq_ft",
                self.price_per_sq_ft.to_string(),
                "Background price cannot be negative",
            ));
        }
        Ok(())
    }

    /// Description fragment, e.g. `Fondo: Tela Negro`
    pub fn label(&self) -> String {
        match self.color.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(color) => format!("Fondo: {} {}", self.kind, color),
            None => format!("Fondo: {}", self.kind),
        }
    }
}
