//! Glass option enums.
//!
//! Wire names match the pricing catalog (`"PLANO"`, `"POLARIZADO"`, `"BRONCE"`).
//! Which combinations are actually sold lives in [`crate::rules`].

use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, QuoteResult};

/// Glass category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum GlassFamily {
    /// Flat clear float glass
    #[default]
    Plano,
    /// Textured cathedral glass
    Catedral,
    /// Tempered glass
    Templado,
    /// Reflective glass
    Reflejante,
    /// Mirror
    Espejo,
}

impl GlassFamily {
    /// All families for UI selection
    pub const ALL: [GlassFamily; 5] = [
        GlassFamily::Plano,
        GlassFamily::Catedral,
        GlassFamily::Templado,
        GlassFamily::Reflejante,
        GlassFamily::Espejo,
    ];

    /// Catalog code (e.g., "PLANO")
    pub fn code(&self) -> &'static str {
        match self {
            GlassFamily::Plano => "PLANO",
            GlassFamily::Catedral => "CATEDRAL",
            GlassFamily::Templado => "TEMPLADO",
            GlassFamily::Reflejante => "REFLEJANTE",
            GlassFamily::Espejo => "ESPEJO",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            GlassFamily::Plano => "Vidrio plano",
            GlassFamily::Catedral => "Vidrio catedral",
            GlassFamily::Templado => "Vidrio templado",
            GlassFamily::Reflejante => "Vidrio reflejante",
            GlassFamily::Espejo => "Espejo",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> QuoteResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "PLANO" | "FLAT" | "FLOAT" => Ok(GlassFamily::Plano),
            "CATEDRAL" | "CATHEDRAL" => Ok(GlassFamily::Catedral),
            "TEMPLADO" | "TEMPERED" => Ok(GlassFamily::Templado),
            "REFLEJANTE" | "REFLECTIVE" => Ok(GlassFamily::Reflejante),
            "ESPEJO" | "MIRROR" => Ok(GlassFamily::Espejo),
            _ => Err(QuoteError::invalid_input("family", s, "Unknown glass family")),
        }
    }
}

impl std::fmt::Display for GlassFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Surface or optical treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum GlassFinish {
    /// Clear
    #[default]
    Incoloro,
    /// Frosted
    Mate,
    /// Tinted
    Polarizado,
    /// Reflective coating
    Reflejante,
    /// Custom color (cathedral only, captured as free text)
    Color,
}

impl GlassFinish {
    pub const ALL: [GlassFinish; 5] = [
        GlassFinish::Incoloro,
        GlassFinish::Mate,
        GlassFinish::Polarizado,
        GlassFinish::Reflejante,
        GlassFinish::Color,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            GlassFinish::Incoloro => "INCOLORO",
            GlassFinish::Mate => "MATE",
            GlassFinish::Polarizado => "POLARIZADO",
            GlassFinish::Reflejante => "REFLEJANTE",
            GlassFinish::Color => "COLOR",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GlassFinish::Incoloro => "Incoloro",
            GlassFinish::Mate => "Mate",
            GlassFinish::Polarizado => "Polarizado",
            GlassFinish::Reflejante => "Reflejante",
            GlassFinish::Color => "Color",
        }
    }

    pub fn from_str_flexible(s: &str) -> QuoteResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "INCOLORO" | "CLEAR" => Ok(GlassFinish::Incoloro),
            "MATE" | "FROSTED" => Ok(GlassFinish::Mate),
            "POLARIZADO" | "TINTED" => Ok(GlassFinish::Polarizado),
            "REFLEJANTE" => Ok(GlassFinish::Reflejante),
            "COLOR" => Ok(GlassFinish::Color),
            _ => Err(QuoteError::invalid_input("finish", s, "Unknown glass finish")),
        }
    }
}

impl std::fmt::Display for GlassFinish {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Color as offered in the calculator.
///
/// `Bronce` is shown to the customer but has no price of its own; see
/// [`GlassColor::price_color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum GlassColor {
    #[default]
    #[serde(rename = "NONE")]
    NoColor,
    Gris,
    Ambar,
    Azul,
    Bronce,
}

impl GlassColor {
    pub const ALL: [GlassColor; 5] = [
        GlassColor::NoColor,
        GlassColor::Gris,
        GlassColor::Ambar,
        GlassColor::Azul,
        GlassColor::Bronce,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            GlassColor::NoColor => "NONE",
            GlassColor::Gris => "GRIS",
            GlassColor::Ambar => "AMBAR",
            GlassColor::Azul => "AZUL",
            GlassColor::Bronce => "BRONCE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GlassColor::NoColor => "Sin color",
            GlassColor::Gris => "Gris",
            GlassColor::Ambar => "Ámbar",
            GlassColor::Azul => "Azul",
            GlassColor::Bronce => "Bronce",
        }
    }

    pub fn from_str_flexible(s: &str) -> QuoteResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "" | "NONE" | "NINGUNO" | "SIN COLOR" => Ok(GlassColor::NoColor),
            "GRIS" | "GREY" | "GRAY" => Ok(GlassColor::Gris),
            "AMBAR" | "ÁMBAR" | "AMBER" => Ok(GlassColor::Ambar),
            "AZUL" | "BLUE" => Ok(GlassColor::Azul),
            "BRONCE" | "BRONZE" => Ok(GlassColor::Bronce),
            _ => Err(QuoteError::invalid_input("color", s, "Unknown glass color")),
        }
    }

    /// Translate to the color the pricing catalog understands.
    pub fn price_color(&self) -> PriceColor {
        match self {
            GlassColor::NoColor => PriceColor::Priced(CatalogColor::NoColor),
            GlassColor::Gris => PriceColor::Priced(CatalogColor::Gris),
            GlassColor::Ambar => PriceColor::Priced(CatalogColor::Ambar),
            GlassColor::Azul => PriceColor::Priced(CatalogColor::Azul),
            GlassColor::Bronce => PriceColor::DescriptiveOnly(self.code().to_string()),
        }
    }
}

impl std::fmt::Display for GlassColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Colors that carry their own rate in the pricing catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum CatalogColor {
    #[default]
    #[serde(rename = "NONE")]
    NoColor,
    Gris,
    Ambar,
    Azul,
}

impl CatalogColor {
    pub fn code(&self) -> &'static str {
        match self {
            CatalogColor::NoColor => "NONE",
            CatalogColor::Gris => "GRIS",
            CatalogColor::Ambar => "AMBAR",
            CatalogColor::Azul => "AZUL",
        }
    }
}

/// A color either priced by the catalog or only written into the description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum PriceColor {
    Priced(CatalogColor),
    DescriptiveOnly(String),
}

impl PriceColor {
    /// Color sent to the pricing catalog. Descriptive colors price as `NONE`.
    pub fn lookup_color(&self) -> CatalogColor {
        match self {
            PriceColor::Priced(color) => *color,
            PriceColor::DescriptiveOnly(_) => CatalogColor::NoColor,
        }
    }

    pub fn is_description_only(&self) -> bool {
        matches!(self, PriceColor::DescriptiveOnly(_))
    }

    /// Label to annotate in the description, if any.
    pub fn description_label(&self) -> Option<&str> {
        match self {
            PriceColor::DescriptiveOnly(label) => Some(label),
            PriceColor::Priced(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&GlassFamily::Templado).unwrap(), "\"TEMPLADO\"");
        assert_eq!(serde_json::to_string(&GlassFinish::Polarizado).unwrap(), "\"POLARIZADO\"");
        assert_eq!(serde_json::to_string(&GlassColor::NoColor).unwrap(), "\"NONE\"");
        assert_eq!(serde_json::to_string(&CatalogColor::Ambar).unwrap(), "\"AMBAR\"");

        let family: GlassFamily = serde_json::from_str("\"ESPEJO\"").unwrap();
        assert_eq!(family, GlassFamily::Espejo);
    }

    #[test]
    fn test_codes_match_wire_names() {
        for family in GlassFamily::ALL {
            let json = serde_json::to_string(&family).unwrap();
            assert_eq!(json, format!("\"{}\"", family.code()));
        }
        for color in GlassColor::ALL {
            let json = serde_json::to_string(&color).unwrap();
            assert_eq!(json, format!("\"{}\"", color.code()));
        }
    }

    #[test]
    fn test_flexible_parsing() {
        assert_eq!(GlassFamily::from_str_flexible("tempered").unwrap(), GlassFamily::Templado);
        assert_eq!(GlassFinish::from_str_flexible(" mate ").unwrap(), GlassFinish::Mate);
        assert_eq!(GlassColor::from_str_flexible("ámbar").unwrap(), GlassColor::Ambar);
        assert!(GlassColor::from_str_flexible("violeta").is_err());
    }

    #[test]
    fn test_bronce_is_description_only() {
        let mapped = GlassColor::Bronce.price_color();
        assert!(mapped.is_description_only());
        assert_eq!(mapped.lookup_color(), CatalogColor::NoColor);
        assert_eq!(mapped.description_label(), Some("BRONCE"));

        let priced = GlassColor::Gris.price_color();
        assert!(!priced.is_description_only());
        assert_eq!(priced.lookup_color(), CatalogColor::Gris);
        assert_eq!(priced.description_label(), None);
    }
}
