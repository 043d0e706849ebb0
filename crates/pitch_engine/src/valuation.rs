//! Market sizing and valuation views.
//!
//! The valuation tab shows TAM/SAM/SOM for either the global market or
//! ANZ alone, and a curve of ARR and valuation against paying clients.

use pitch_core::types::{RegionScope, ScenarioState};

use crate::error::{EngineError, EngineResult};

/// Largest number of points [`valuation_curve`] will produce.
pub const MAX_CURVE_POINTS: u64 = 10_000;

/// Nested market-size estimate for one region scope.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketSize {
    /// Scope the figures cover
    pub scope: RegionScope,
    /// Agent population in scope
    pub agents: u64,
    /// Total addressable market
    pub tam: f64,
    /// Serviceable addressable market
    pub sam: f64,
    /// Serviceable obtainable market
    pub som: f64,
}

/// Sizes the market for `scope` at `annual_price` per agent.
///
/// # Examples
///
/// ```
/// use pitch_core::types::RegionScope;
/// use pitch_engine::valuation::market_size;
///
/// let anz = market_size(RegionScope::Anz, 5_000.0, 50.0, 10.0);
/// assert_eq!(anz.agents, 158_051);
/// assert_eq!(anz.tam, 790_255_000.0);
/// ```
pub fn market_size(
    scope: RegionScope,
    annual_price: f64,
    sam_percent: f64,
    som_percent: f64,
) -> MarketSize {
    let agents = scope.agent_count();
    let tam = agents as f64 * annual_price;
    let sam = tam * (sam_percent / 100.0);
    let som = sam * (som_percent / 100.0);
    MarketSize {
        scope,
        agents,
        tam,
        sam,
        som,
    }
}

/// Market size for `scope` using the pricing and shares held in `state`.
pub fn market_size_for(state: &ScenarioState, scope: RegionScope) -> MarketSize {
    market_size(
        scope,
        state.annual_price_per_client,
        state.sam_percent,
        state.som_percent,
    )
}

/// One point on the valuation curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValuationPoint {
    /// Paying clients
    pub clients: u64,
    /// Annual recurring revenue at this client count
    pub arr: f64,
    /// ARR times the multiple
    pub valuation: f64,
}

/// ARR and valuation from `base_clients` to `max_clients` (inclusive) in
/// increments of `step`.
///
/// # Errors
///
/// - [`EngineError::InvalidStep`] when `step` is zero
/// - [`EngineError::InvalidRange`] when `base_clients > max_clients`
/// - [`EngineError::TooManyPoints`] when the range holds more than
///   [`MAX_CURVE_POINTS`] points
///
/// # Examples
///
/// ```
/// use pitch_engine::valuation::valuation_curve;
///
/// let curve = valuation_curve(100, 300, 100, 5_000.0, 15.0).unwrap();
/// assert_eq!(curve.len(), 3);
/// assert_eq!(curve[2].valuation, 22_500_000.0);
/// ```
pub fn valuation_curve(
    base_clients: u64,
    max_clients: u64,
    step: u64,
    price_per_client: f64,
    arr_multiple: f64,
) -> EngineResult<Vec<ValuationPoint>> {
    if step == 0 {
        return Err(EngineError::InvalidStep);
    }
    if base_clients > max_clients {
        return Err(EngineError::InvalidRange {
            base: base_clients,
            max: max_clients,
        });
    }

    let requested = ((max_clients - base_clients) / step).saturating_add(1);
    if requested > MAX_CURVE_POINTS {
        return Err(EngineError::TooManyPoints {
            requested,
            limit: MAX_CURVE_POINTS,
        });
    }

    Ok((base_clients..=max_clients)
        .step_by(step as usize)
        .map(|clients| {
            let arr = clients as f64 * price_per_client;
            ValuationPoint {
                clients,
                arr,
                valuation: arr * arr_multiple,
            }
        })
        .collect())
}
