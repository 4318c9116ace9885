//! # Line Descriptions
//!
//! Human-readable labels for quote lines. A glass line reads like
//! `Vidrio templado 8mm Polarizado (Color: BRONCE) (100x150 cm)`; a frame
//! line lists its parts in a fixed order:
//!
//! molding → texture → color → crossbeams → background → glass → dimensions
//!
//! Optional parts are skipped when absent. Building a description never fails.

use crate::catalog::GlassFamily;
use crate::dimensions::Dimensions;
use crate::selection::GlassSelection;

/// Default base name for a glass selection, e.g. `Vidrio plano 6mm Incoloro`.
pub fn glass_base_name(selection: &GlassSelection) -> String {
    format!(
        "{} {}mm {}",
        selection.family.display_name(),
        selection.thickness_mm,
        selection.finish.display_name()
    )
}

/// Glass label with its annotations, without dimensions.
fn annotate_glass(base_name: &str, selection: &GlassSelection) -> String {
    let mut description = base_name.trim().to_string();

    let says_templado = description.to_lowercase().contains("templado");
    if selection.family == GlassFamily::Templado && !says_templado {
        description.push_str(" (Templado)");
    }
    if let Some(text) = selection.custom_color_label() {
        description.push_str(&format!(" (Color: {})", text));
    }
    if let Some(label) = selection.price_color().description_label() {
        description.push_str(&format!(" (Color: {})", label));
    }
    description
}

/// Description for a cut-glass line.
///
/// ```rust
/// use pricing_core::catalog::{GlassFamily, GlassFinish};
/// use pricing_core::description::build_glass_description;
/// use pricing_core::dimensions::Dimensions;
/// use pricing_core::selection::{GlassSelection, SelectionChange};
///
/// let selection = GlassSelection::new(GlassFamily::Templado)
///     .apply(SelectionChange::Finish(GlassFinish::Polarizado));
/// let dims = Dimensions::new(100.0, 150.0).unwrap();
///
/// assert_eq!(
///     build_glass_description("Vidrio 6mm", &selection, Some(&dims)),
///     "Vidrio 6mm (Templado) (Color: BRONCE) (100x150 cm)"
/// );
/// ```
pub fn build_glass_description(
    base_name: &str,
    selection: &GlassSelection,
    dims: Option<&Dimensions>,
) -> String {
    let base = if base_name.trim().is_empty() {
        glass_base_name(selection)
    } else {
        base_name.to_string()
    };
    let mut description = annotate_glass(&base, selection);
    if let Some(dims) = dims {
        description.push_str(&format!(" ({})", dims.label()));
    }
    description
}

/// Builder for frame line descriptions.
#[derive(Debug, Clone, Default)]
pub struct FrameDescription {
    molding_name: String,
    texture: Option<String>,
    color: Option<String>,
    crossbeams: u8,
    background: Option<String>,
    glass: Option<String>,
    dimensions: Option<Dimensions>,
}

impl FrameDescription {
    pub fn new(molding_name: impl Into<String>) -> Self {
        FrameDescription {
            molding_name: molding_name.into(),
            ..Default::default()
        }
    }

    pub fn with_texture(mut self, texture: Option<&str>) -> Self {
        self.texture = non_empty(texture);
        self
    }

    pub fn with_color(mut self, color: Option<&str>) -> Self {
        self.color = non_empty(color);
        self
    }

    pub fn with_crossbeams(mut self, crossbeams: u8) -> Self {
        self.crossbeams = crossbeams;
        self
    }

    pub fn with_background(mut self, label: Option<String>) -> Self {
        self.background = label.filter(|l| !l.trim().is_empty());
        self
    }

    /// Glass or mirror fitted in the frame
    pub fn with_glass(mut self, selection: Option<&GlassSelection>) -> Self {
        self.glass = selection.map(|s| annotate_glass(&glass_base_name(s), s));
        self
    }

    pub fn with_dimensions(mut self, dims: &Dimensions) -> Self {
        self.dimensions = Some(*dims);
        self
    }

    pub fn build(&self) -> String {
        let mut parts: Vec<String> = vec![self.molding_name.trim().to_string()];
        if let Some(texture) = &self.texture {
            parts.push(format!("Textura: {}", texture));
        }
        if let Some(color) = &self.color {
            parts.push(format!("Color: {}", color));
        }
        match self.crossbeams {
            0 => {}
            1 => parts.push("1 travesaño".to_string()),
            n => parts.push(format!("{} travesaños", n)),
        }
        if let Some(background) = &self.background {
            parts.push(background.clone());
        }
        if let Some(glass) = &self.glass {
            parts.push(glass.clone());
        }

        let mut description = parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        if let Some(dims) = &self.dimensions {
            description.push_str(&format!(" ({})", dims.label()));
        }
        description
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}
