//! # Services and Surcharges
//!
//! Optional work added on top of the glass itself (special cuts, drilled
//! holes, polished or beveled edges) and the crossbeams of stretcher frames.
//!
//! Services are priced either per square foot of the piece (`FT2`) or per
//! occurrence (`UNIDAD`). Drilling is the only service with a quantity.
//!
//! A service with no configured rate costs nothing. Companies leave rates
//! blank for services they don't charge for, so a missing rate is never an
//! error.
//!
//! ```rust
//! use pricing_core::services::{ServiceKind, ServiceSelection};
//!
//! let mut services = ServiceSelection::default();
//! services.enable(ServiceKind::Perforacion);
//! services.set_quantity(ServiceKind::Perforacion, 4);
//!
//! let request = services.build_request();
//! assert_eq!(request.len(), 1);
//! assert_eq!(request[0].qty, Some(4));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{MoldingQuality, MAX_CROSSBEAMS};
use crate::dimensions::Dimensions;
use crate::errors::{QuoteError, QuoteResult};
use crate::units::{Centimeters, Meters};

/// Service processes offered with cut glass
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceKind {
    CorteEspecial,
    Perforacion,
    CantoPulido,
    CantoBisel,
}

impl ServiceKind {
    /// Display order in the calculator
    pub const ALL: [ServiceKind; 4] = [
        ServiceKind::CorteEspecial,
        ServiceKind::Perforacion,
        ServiceKind::CantoPulido,
        ServiceKind::CantoBisel,
    ];

    /// Pricing unit for this service
    pub fn unit(&self) -> ServiceUnit {
        match self {
            ServiceKind::CorteEspecial | ServiceKind::Perforacion => ServiceUnit::Unidad,
            ServiceKind::CantoPulido | ServiceKind::CantoBisel => ServiceUnit::Ft2,
        }
    }

    /// Whether the customer picks a quantity (number of holes)
    pub fn has_qty(&self) -> bool {
        matches!(self, ServiceKind::Perforacion)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceKind::CorteEspecial => "Corte especial",
            ServiceKind::Perforacion => "Perforación",
            ServiceKind::CantoPulido => "Canto pulido",
            ServiceKind::CantoBisel => "Canto biselado",
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How a service (or a glass rate) is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ServiceUnit {
    /// Per square foot of the piece
    #[default]
    #[serde(rename = "FT2")]
    Ft2,
    /// Per occurrence
    #[serde(rename = "UNIDAD")]
    Unidad,
}

/// Toggle state of one service in the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServiceState {
    pub kind: ServiceKind,
    pub enabled: bool,
    /// Only read for services with a quantity
    pub quantity: Option<u32>,
}

/// Ordered set of service toggles, one per [`ServiceKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSelection {
    pub services: Vec<ServiceState>,
}

impl Default for ServiceSelection {
    fn default() -> Self {
        ServiceSelection {
            services: ServiceKind::ALL
                .iter()
                .map(|&kind| ServiceState {
                    kind,
                    enabled: false,
                    quantity: None,
                })
                .collect(),
        }
    }
}

impl ServiceSelection {
    fn state_mut(&mut self, kind: ServiceKind) -> &mut ServiceState {
        if let Some(pos) = self.services.iter().position(|s| s.kind == kind) {
            return &mut self.services[pos];
        }
        self.services.push(ServiceState {
            kind,
            enabled: false,
            quantity: None,
        });
        let last = self.services.len() - 1;
        &mut self.services[last]
    }

    pub fn enable(&mut self, kind: ServiceKind) {
        self.state_mut(kind).enabled = true;
    }

    pub fn disable(&mut self, kind: ServiceKind) {
        self.state_mut(kind).enabled = false;
    }

    pub fn set_quantity(&mut self, kind: ServiceKind, quantity: u32) {
        self.state_mut(kind).quantity = Some(quantity);
    }

    pub fn is_enabled(&self, kind: ServiceKind) -> bool {
        self.services.iter().any(|s| s.kind == kind && s.enabled)
    }

    /// Lines sent to the pricing service: enabled services only, in
    /// selection order, with a quantity (default 1) for drilling.
    pub fn build_request(&self) -> Vec<ServiceRequestLine> {
        self.services
            .iter()
            .filter(|s| s.enabled)
            .map(|s| ServiceRequestLine {
                process: s.kind,
                unit: s.kind.unit(),
                qty: if s.kind.has_qty() {
                    Some(s.quantity.unwrap_or(1))
                } else {
                    None
                },
            })
            .collect()
    }
}

/// One service as it appears in a pricing request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequestLine {
    pub process: ServiceKind,
    pub unit: ServiceUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<u32>,
}

/// Per-company service rates. A missing rate prices the service at zero.
pub type ServiceRates = BTreeMap<ServiceKind, f64>;

/// Cost of one requested service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServiceCharge {
    pub process: ServiceKind,
    pub unit: ServiceUnit,
    pub quantity: f64,
    /// `None` when the company has no rate for this service
    pub rate: Option<f64>,
    pub cost: f64,
}

/// All service charges for one piece.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceCharges {
    pub charges: Vec<ServiceCharge>,
    pub total: f64,
}

/// Price the requested services for a piece of `area_sq_ft`.
pub fn compose_service_charges(
    lines: &[ServiceRequestLine],
    rates: &ServiceRates,
    area_sq_ft: f64,
) -> ServiceCharges {
    let charges: Vec<ServiceCharge> = lines
        .iter()
        .map(|line| {
            let quantity = match line.unit {
                ServiceUnit::Ft2 => area_sq_ft,
                ServiceUnit::Unidad => f64::from(line.qty.unwrap_or(1)),
            };
            let rate = rates.get(&line.process).copied();
            ServiceCharge {
                process: line.process,
                unit: line.unit,
                quantity,
                rate,
                cost: rate.map_or(0.0, |r| r * quantity),
            }
        })
        .collect();
    let total = charges.iter().map(|c| c.cost).sum();
    ServiceCharges { charges, total }
}

/// Cost of stretcher crossbeams: each spans the shorter side of the frame.
pub fn crossbeam_cost(
    dims: &Dimensions,
    quality: MoldingQuality,
    price_per_meter: f64,
    crossbeams: u8,
) -> QuoteResult<f64> {
    if crossbeams == 0 {
        return Ok(0.0);
    }
    if crossbeams > MAX_CROSSBEAMS {
        return Err(QuoteError::invalid_input(
            "crossbeams",
            crossbeams.to_string(),
            format!("At most {} crossbeams", MAX_CROSSBEAMS),
        ));
    }
    if !quality.supports_crossbeams() {
        return Err(QuoteError::invalid_input(
            "crossbeams",
            crossbeams.to_string(),
            format!("{} molding does not take crossbeams", quality),
        ));
    }
    let length_m = Meters::from(Centimeters(dims.shorter_side_cm())).value();
    Ok(length_m * price_per_meter * f64::from(crossbeams))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection_requests_nothing() {
        let selection = ServiceSelection::default();
        assert_eq!(selection.services.len(), 4);
        assert!(selection.build_request().is_empty());
    }

    #[test]
    fn test_request_keeps_order_and_defaults_qty() {
        let mut selection = ServiceSelection::default();
        selection.enable(ServiceKind::CantoBisel);
        selection.enable(ServiceKind::Perforacion);
        selection.enable(ServiceKind::CorteEspecial);

        let request = selection.build_request();
        let processes: Vec<_> = request.iter().map(|l| l.process).collect();
        assert_eq!(
            processes,
            vec![ServiceKind::CorteEspecial, ServiceKind::Perforacion, ServiceKind::CantoBisel]
        );
        assert_eq!(request[0].qty, None);
        assert_eq!(request[1].qty, Some(1));
        assert_eq!(request[2].unit, ServiceUnit::Ft2);
    }

    #[test]
    fn test_quantity_ignored_for_non_qty_services() {
        let mut selection = ServiceSelection::default();
        selection.enable(ServiceKind::CantoPulido);
        selection.set_quantity(ServiceKind::CantoPulido, 7);
        assert_eq!(selection.build_request()[0].qty, None);
    }

    #[test]
    fn test_request_line_json() {
        let line = ServiceRequestLine {
            process: ServiceKind::Perforacion,
            unit: ServiceUnit::Unidad,
            qty: Some(3),
        };
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, r#"{"process":"PERFORACION","unit":"UNIDAD","qty":3}"#);

        let no_qty = ServiceRequestLine {
            process: ServiceKind::CantoPulido,
            unit: ServiceUnit::Ft2,
            qty: None,
        };
        assert_eq!(
            serde_json::to_string(&no_qty).unwrap(),
            r#"{"process":"CANTO_PULIDO","unit":"FT2"}"#
        );
    }

    #[test]
    fn test_missing_rate_costs_zero() {
        let mut selection = ServiceSelection::default();
        selection.enable(ServiceKind::Perforacion);
        selection.set_quantity(ServiceKind::Perforacion, 2);
        selection.enable(ServiceKind::CantoPulido);

        let mut rates = ServiceRates::new();
        rates.insert(ServiceKind::Perforacion, 5.0);

        let charges = compose_service_charges(&selection.build_request(), &rates, 10.0);
        assert_eq!(charges.charges.len(), 2);
        assert_eq!(charges.charges[0].cost, 10.0);
        assert_eq!(charges.charges[1].rate, None);
        assert_eq!(charges.charges[1].cost, 0.0);
        assert_eq!(charges.total, 10.0);
    }

    #[test]
    fn test_area_priced_service() {
        let mut selection = ServiceSelection::default();
        selection.enable(ServiceKind::CantoBisel);
        let mut rates = ServiceRates::new();
        rates.insert(ServiceKind::CantoBisel, 1.5);
        let charges = compose_service_charges(&selection.build_request(), &rates, 4.0);
        assert_eq!(charges.total, 6.0);
    }

    #[test]
    fn test_crossbeam_cost() {
        let dims = Dimensions::new(60.0, 40.0).unwrap();
        let cost = crossbeam_cost(&dims, MoldingQuality::Bastidor, 5.0, 2).unwrap();
        assert!((cost - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_crossbeams_only_on_bastidor() {
        let dims = Dimensions::new(60.0, 40.0).unwrap();
        assert_eq!(crossbeam_cost(&dims, MoldingQuality::Premium, 5.0, 0).unwrap(), 0.0);
        assert!(crossbeam_cost(&dims, MoldingQuality::Premium, 5.0, 1).is_err());
        assert!(crossbeam_cost(&dims, MoldingQuality::Bastidor, 5.0, 3).is_err());
    }
}
