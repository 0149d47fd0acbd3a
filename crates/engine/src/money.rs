//! Amount helpers.
//!
//! Amounts are plain `f64` currency units. Aggregates round to the cent with
//! [`round_cents`]; display goes through [`format_amount`].

/// Rounds to two decimals: scale by 100, round half away from zero, scale
/// back.
///
/// # Examples
///
/// ```rust
/// use engine::money::round_cents;
///
/// assert_eq!(round_cents(10.125), 10.13);
/// assert_eq!(round_cents(3.0), 3.0);
/// ```
#[must_use]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parses user input as an amount.
///
/// Accepts surrounding whitespace and an optional sign. Returns `None` for
/// anything that is not a finite number.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Formats an amount with exactly two decimals.
#[must_use]
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}
