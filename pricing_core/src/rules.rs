//! # Price Rules
//!
//! Which glass is actually sold: thicknesses per family, finishes per
//! family/thickness, and colors per family/finish/thickness. Every list is
//! ordered; the first entry is the fallback when a selection goes stale.
//!
//! - PLANO, 2 to 12 mm: INCOLORO, MATE (2 mm only), POLARIZADO (4 mm and up).
//!   BRONCE and AMBAR only when POLARIZADO at 4 mm or more.
//! - CATEDRAL, 3 or 5.5 mm: INCOLORO, POLARIZADO, COLOR. No catalog color;
//!   COLOR takes free text.
//! - TEMPLADO, 6, 8, 10 or 12 mm: INCOLORO, POLARIZADO. BRONCE and AMBAR
//!   only when POLARIZADO.
//! - REFLEJANTE, 6 or 8 mm: POLARIZADO in AZUL, BRONCE or GRIS.
//! - ESPEJO, 3 to 6 mm: INCOLORO, no color.

use crate::catalog::{GlassColor, GlassFamily, GlassFinish, PriceColor};
use crate::errors::{QuoteError, QuoteResult};

const PLANO_THICKNESSES: [f64; 11] = [2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
const CATEDRAL_THICKNESSES: [f64; 2] = [3.0, 5.5];
const TEMPLADO_THICKNESSES: [f64; 4] = [6.0, 8.0, 10.0, 12.0];
const REFLEJANTE_THICKNESSES: [f64; 2] = [6.0, 8.0];
const ESPEJO_THICKNESSES: [f64; 4] = [3.0, 4.0, 5.0, 6.0];

/// Thinnest PLANO glass that can be tinted.
pub const MIN_POLARIZED_PLANO_MM: f64 = 4.0;

/// The only PLANO thickness sold frosted.
pub const MATE_PLANO_MM: f64 = 2.0;

/// Thicknesses (mm) sold for a family, thinnest first.
pub fn allowed_thicknesses(family: GlassFamily) -> &'static [f64] {
    match family {
        GlassFamily::Plano => &PLANO_THICKNESSES,
        GlassFamily::Catedral => &CATEDRAL_THICKNESSES,
        GlassFamily::Templado => &TEMPLADO_THICKNESSES,
        GlassFamily::Reflejante => &REFLEJANTE_THICKNESSES,
        GlassFamily::Espejo => &ESPEJO_THICKNESSES,
    }
}

pub fn is_thickness_allowed(family: GlassFamily, thickness_mm: f64) -> bool {
    allowed_thicknesses(family).contains(&thickness_mm)
}

/// Finishes available for a family at a thickness. Never empty.
pub fn available_finishes(family: GlassFamily, thickness_mm: f64) -> Vec<GlassFinish> {
    match family {
        GlassFamily::Catedral => {
            vec![GlassFinish::Incoloro, GlassFinish::Polarizado, GlassFinish::Color]
        }
        GlassFamily::Templado => vec![GlassFinish::Incoloro, GlassFinish::Polarizado],
        GlassFamily::Reflejante => vec![GlassFinish::Polarizado],
        GlassFamily::Espejo => vec![GlassFinish::Incoloro],
        GlassFamily::Plano => {
            let mut finishes = vec![GlassFinish::Incoloro];
            if thickness_mm == MATE_PLANO_MM {
                finishes.push(GlassFinish::Mate);
            }
            if thickness_mm >= MIN_POLARIZED_PLANO_MM {
                finishes.push(GlassFinish::Polarizado);
            }
            finishes
        }
    }
}

/// Colors available for a family/finish/thickness. Never empty.
pub fn available_colors(
    family: GlassFamily,
    finish: GlassFinish,
    thickness_mm: f64,
) -> Vec<GlassColor> {
    match family {
        GlassFamily::Catedral | GlassFamily::Espejo => vec![GlassColor::NoColor],
        GlassFamily::Templado if finish == GlassFinish::Polarizado => {
            vec![GlassColor::Bronce, GlassColor::Ambar]
        }
        GlassFamily::Templado => vec![GlassColor::NoColor],
        GlassFamily::Reflejante if finish != GlassFinish::Incoloro => {
            vec![GlassColor::Azul, GlassColor::Bronce, GlassColor::Gris]
        }
        GlassFamily::Reflejante => vec![GlassColor::NoColor],
        GlassFamily::Plano
            if finish == GlassFinish::Polarizado && thickness_mm >= MIN_POLARIZED_PLANO_MM =>
        {
            vec![GlassColor::Bronce, GlassColor::Ambar]
        }
        GlassFamily::Plano => vec![GlassColor::NoColor],
    }
}

/// Catalog lookup color plus whether the chosen color only decorates the description.
pub fn map_color_to_price_lookup_key(color: GlassColor) -> PriceColor {
    color.price_color()
}

/// Reject a family/thickness/finish/color that isn't sold.
pub fn validate_combination(
    family: GlassFamily,
    thickness_mm: f64,
    finish: GlassFinish,
    color: GlassColor,
) -> QuoteResult<()> {
    let combination = format!(
        "{} {}mm {} {}",
        family.code(),
        thickness_mm,
        finish.code(),
        color.code()
    );

    if !is_thickness_allowed(family, thickness_mm) {
        return Err(QuoteError::invalid_combination(
            combination,
            format!("{} no se vende en {}mm", family.display_name(), thickness_mm),
        ));
    }
    if !available_finishes(family, thickness_mm).contains(&finish) {
        return Err(QuoteError::invalid_combination(
            combination,
            format!(
                "Acabado {} no disponible para {} de {}mm",
                finish,
                family.display_name(),
                thickness_mm
            ),
        ));
    }
    if !available_colors(family, finish, thickness_mm).contains(&color) {
        return Err(QuoteError::invalid_combination(
            combination,
            format!("Color {} no disponible para {} {}", color, family.display_name(), finish),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_thicknesses() {
        assert_eq!(allowed_thicknesses(GlassFamily::Plano).len(), 11);
        assert_eq!(allowed_thicknesses(GlassFamily::Plano).first(), Some(&2.0));
        assert_eq!(allowed_thicknesses(GlassFamily::Catedral), &[3.0, 5.5]);
        assert_eq!(allowed_thicknesses(GlassFamily::Templado), &[6.0, 8.0, 10.0, 12.0]);
        assert_eq!(allowed_thicknesses(GlassFamily::Reflejante), &[6.0, 8.0]);
        assert!(!is_thickness_allowed(GlassFamily::Templado, 5.0));
    }

    #[test]
    fn test_plano_finishes_by_thickness() {
        assert_eq!(
            available_finishes(GlassFamily::Plano, 2.0),
            vec![GlassFinish::Incoloro, GlassFinish::Mate]
        );
        assert_eq!(available_finishes(GlassFamily::Plano, 3.0), vec![GlassFinish::Incoloro]);
        assert_eq!(
            available_finishes(GlassFamily::Plano, 6.0),
            vec![GlassFinish::Incoloro, GlassFinish::Polarizado]
        );
    }

    #[test]
    fn test_fixed_family_finishes() {
        assert_eq!(
            available_finishes(GlassFamily::Catedral, 3.0),
            vec![GlassFinish::Incoloro, GlassFinish::Polarizado, GlassFinish::Color]
        );
        assert_eq!(
            available_finishes(GlassFamily::Templado, 8.0),
            vec![GlassFinish::Incoloro, GlassFinish::Polarizado]
        );
        assert_eq!(available_finishes(GlassFamily::Reflejante, 6.0), vec![GlassFinish::Polarizado]);
    }

    #[test]
    fn test_finishes_never_empty() {
        for family in GlassFamily::ALL {
            for &t in allowed_thicknesses(family) {
                let finishes = available_finishes(family, t);
                assert!(!finishes.is_empty(), "{:?} {}mm", family, t);
                for finish in finishes {
                    assert!(!available_colors(family, finish, t).is_empty());
                }
            }
        }
    }

    #[test]
    fn test_colors() {
        assert_eq!(
            available_colors(GlassFamily::Catedral, GlassFinish::Color, 3.0),
            vec![GlassColor::NoColor]
        );
        assert_eq!(
            available_colors(GlassFamily::Templado, GlassFinish::Polarizado, 6.0),
            vec![GlassColor::Bronce, GlassColor::Ambar]
        );
        assert_eq!(
            available_colors(GlassFamily::Templado, GlassFinish::Incoloro, 6.0),
            vec![GlassColor::NoColor]
        );
        assert_eq!(
            available_colors(GlassFamily::Reflejante, GlassFinish::Polarizado, 6.0),
            vec![GlassColor::Azul, GlassColor::Bronce, GlassColor::Gris]
        );
        assert_eq!(
            available_colors(GlassFamily::Plano, GlassFinish::Polarizado, 4.0),
            vec![GlassColor::Bronce, GlassColor::Ambar]
        );
        assert_eq!(
            available_colors(GlassFamily::Plano, GlassFinish::Polarizado, 3.0),
            vec![GlassColor::NoColor]
        );
    }

    #[test]
    fn test_validate_combination() {
        use crate::catalog::{GlassColor as C, GlassFamily as F, GlassFinish as Fi};

        assert!(validate_combination(F::Plano, 6.0, Fi::Incoloro, C::NoColor).is_ok());
        assert!(validate_combination(F::Reflejante, 8.0, Fi::Polarizado, C::Azul).is_ok());

        let err = validate_combination(F::Plano, 2.0, Fi::Polarizado, C::Bronce).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_COMBINATION");

        assert!(validate_combination(F::Templado, 7.0, Fi::Incoloro, C::NoColor).is_err());
        assert!(validate_combination(F::Templado, 6.0, Fi::Incoloro, C::Bronce).is_err());
    }
}
