//! TypeScript Generation Tests
//!
//! Validates that Poolside types can be exported to TypeScript when the tauri
//! feature is enabled.

#[cfg(feature = "tauri")]
#[test]
fn test_core_types_implement_specta_type() {
    use specta::Type;

    // If this compiles, all types are properly configured for TypeScript export.
    fn assert_type<T: Type>() {}

    // Roster documents
    assert_type::<poolside::Swimmer>();
    assert_type::<poolside::NewSwimmer>();
    assert_type::<poolside::SwimmerPatch>();
    assert_type::<poolside::TimeRecord>();
    assert_type::<poolside::Lap>();
    assert_type::<poolside::ClubSettings>();

    // Display types
    assert_type::<poolside::Stroke>();
    assert_type::<poolside::Distance>();
    assert_type::<poolside::RefreshRate>();
    assert_type::<poolside::LapComparison>();
    assert_type::<poolside::ClockFormat>();
}

#[cfg(not(feature = "tauri"))]
#[test]
fn test_tauri_feature_disabled() {
    // Types still compile without specta::Type
    let _ = poolside::RefreshRate::Native;
}
