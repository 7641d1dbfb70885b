use tally::core::{ButtonKind, CalculatorEngine, EngineError, parse_keys};

// ============================================================================
// Helper Functions
// ============================================================================

/// Presses every key in `input` on a fresh engine and returns the display.
fn display_after(input: &str) -> String {
    let mut engine = CalculatorEngine::new();
    engine.apply_all(parse_keys(input).unwrap());
    engine.display_text().to_string()
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_addition() {
    let mut engine = CalculatorEngine::new();
    engine.apply_all([
        ButtonKind::Digit(5),
        ButtonKind::Add,
        ButtonKind::Digit(3),
        ButtonKind::Equals,
    ]);
    assert_eq!(engine.display_text(), "8");
}

#[test]
fn test_chained_operators_evaluate_left_to_right() {
    assert_eq!(display_after("5 + 3 − 2 ="), "6");
    // No precedence: (2 + 3) × 4
    assert_eq!(display_after("2 + 3 × 4 ="), "20");
}

#[test]
fn test_subtraction_below_zero() {
    assert_eq!(display_after("3 - 10 ="), "-7");
}

#[test]
fn test_decimal_arithmetic() {
    assert_eq!(display_after("0.1 + 0.2 ="), "0.3");
    assert_eq!(display_after("7.5 ÷ 2 ="), "3.75");
}

#[test]
fn test_trailing_decimal_point_commits_as_number() {
    assert_eq!(display_after("5. + 1 ="), "6");
}

// ============================================================================
// Division by Zero
// ============================================================================

#[test]
fn test_division_by_zero_recovers() {
    let mut engine = CalculatorEngine::new();
    engine.apply_all(parse_keys("5 ÷ 0 =").unwrap());
    assert_eq!(engine.display_text(), "Error");
    assert_eq!(engine.last_error(), Some(EngineError::DivisionByZero));

    engine.apply(ButtonKind::Digit(7));
    assert_eq!(engine.display_text(), "7");
    assert_eq!(engine.last_error(), None);
}

#[test]
fn test_decimal_after_error_starts_fresh() {
    assert_eq!(display_after("5 ÷ 0 = ."), "0.");
}

#[test]
fn test_dividing_zero_is_fine() {
    assert_eq!(display_after("0 ÷ 5 ="), "0");
}

// ============================================================================
// Formatting
// ============================================================================

#[test]
fn test_one_third() {
    assert_eq!(display_after("1 ÷ 3 ="), "0.33333333");
}

#[test]
fn test_large_product_is_scientific() {
    assert_eq!(display_after("100000000 × 20 ="), "2.00e+09");
    assert_eq!(display_after("1000000000"), "100000000");
}

#[test]
fn test_tiny_quotient_is_scientific() {
    assert_eq!(display_after("1 ÷ 100000000 ="), "1.00e-08");
}

// ============================================================================
// Negate / Percent / Clear
// ============================================================================

#[test]
fn test_negate_twice_restores_display() {
    assert_eq!(display_after("42 +/-"), "-42");
    assert_eq!(display_after("42 +/- +/-"), "42");
    assert_eq!(display_after("1 ÷ 4 = +/- +/-"), "0.25");
}

#[test]
fn test_percent() {
    assert_eq!(display_after("50 %"), "0.5");
    assert_eq!(display_after("5 %"), "0.05");
}

#[test]
fn test_clear_from_every_state() {
    for input in ["", "123", "1.5", "7 ×", "7 × 2", "7 × 2 =", "9 ÷ 0 =", "3 +/- %"] {
        let mut engine = CalculatorEngine::new();
        engine.apply_all(parse_keys(input).unwrap());
        engine.apply(ButtonKind::Clear);
        assert!(engine.is_cleared(), "not cleared after {input:?}");
        assert_eq!(engine.display_text(), "0");
        assert_eq!(engine.pending_operation(), None);
    }
}
