//! Integration tests for module exports.
//!
//! Verify that the public modules and types are reachable via absolute
//! paths and that the re-exports agree with their defining modules.

/// Types are re-exported from `types`.
#[test]
fn test_types_module_exports() {
    use pitch_core::types::allocation::Allocation as DirectAllocation;
    use pitch_core::types::{
        Allocation, AllocationBucket, Currency, Region, RegionScope, ScenarioCommand,
        ScenarioField, ScenarioState,
    };

    let state = ScenarioState::default();
    let direct: DirectAllocation = state.allocation;
    let reexported: Allocation = direct;
    assert_eq!(reexported.get(AllocationBucket::Sales), 15.0);

    assert_eq!(Currency::ALL.len(), 3);
    assert_eq!(Region::ALL.len(), 6);
    assert_eq!(RegionScope::default(), RegionScope::Global);
    assert_eq!(ScenarioField::ALL.len(), 22);

    let command = ScenarioCommand::Reset;
    assert_eq!(command, ScenarioCommand::Reset);
}

/// Error types are reachable from both paths.
#[test]
fn test_error_module_exports() {
    use pitch_core::types::error::ScenarioError as Direct;
    use pitch_core::types::{CurrencyError, ScenarioError};

    let err: Direct = ScenarioError::UnknownBucket("x".into());
    assert!(err.to_string().contains("x"));

    let currency_err = "JPY".parse::<pitch_core::types::Currency>().unwrap_err();
    assert_eq!(currency_err, CurrencyError::UnknownCurrency("JPY".into()));
}

/// Formatting and maths helpers are public.
#[test]
fn test_format_and_math_exports() {
    use pitch_core::format::{format_currency, format_number, format_percentage};
    use pitch_core::math::{checked_ratio, percentage_of, round_half_up, round_to_places};
    use pitch_core::types::Currency;

    assert_eq!(format_currency(34_000.0, Currency::USD), "$34,000");
    assert_eq!(format_number(1_842_951.0), "1,842,951");
    assert_eq!(format_percentage(16.666), "16.7%");
    assert_eq!(round_half_up(4.5), 5.0);
    assert_eq!(round_to_places(8.333_333, 2), 8.33);
    assert_eq!(checked_ratio(3.0, 0.0), None);
    assert_eq!(percentage_of(1.0, 4.0), Some(25.0));
}

/// Every field of the default state survives a TOML round trip.
#[test]
fn test_default_state_toml_roundtrip() {
    use pitch_core::types::ScenarioState;

    let state = ScenarioState::default();
    let text = toml::to_string(&state).unwrap();
    let parsed: ScenarioState = toml::from_str(&text).unwrap();
    assert_eq!(parsed, state);
}
