//! Static currency conversion.
//!
//! Rates live in a fixed table; there is no network lookup and no caching.
//! A pair missing from the table converts to zero instead of failing, which
//! callers rely on.

use rust_decimal::{Decimal, RoundingStrategy};

/// `(from, to, rate)`
const RATES: &[(&str, &str, Decimal)] = &[
    // 0.98
    ("USD", "EUR", Decimal::from_parts(98, 0, 0, false, 2)),
];

/// Rate for a currency pair, if one is defined.
///
/// Codes are matched exactly: `"usd"` is not `"USD"`.
pub fn rate(from: &str, to: &str) -> Option<Decimal> {
    RATES
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, rate)| *rate)
}

/// Convert `amount` from one currency to another, rounded to 2 decimal places
/// (half away from zero). Returns zero for pairs without a rate.
pub fn convert(amount: Decimal, from: &str, to: &str) -> Decimal {
    let rate = rate(from, to).unwrap_or(Decimal::ZERO);
    (amount * rate).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_usd_to_eur() {
        let result = convert(Decimal::from(100), "USD", "EUR");
        assert_eq!(result, Decimal::new(9800, 2));
        assert_eq!(result.to_string(), "98.00");
    }

    #[test]
    fn test_convert_unknown_pair_returns_zero() {
        assert_eq!(convert(Decimal::from(100), "USD", "GBP"), Decimal::ZERO);
        assert_eq!(convert(Decimal::from(100), "USD", "gbp"), Decimal::ZERO);
        assert_eq!(convert(Decimal::from(100), "EUR", "USD"), Decimal::ZERO);
    }

    #[test]
    fn test_convert_codes_are_case_sensitive() {
        assert_eq!(convert(Decimal::from(100), "usd", "eur"), Decimal::ZERO);
        assert!(rate("usd", "EUR").is_none());
    }

    #[test]
    fn test_convert_rounds_half_away_from_zero() {
        // 0.25 * 0.98 = 0.245
        assert_eq!(convert(Decimal::new(25, 2), "USD", "EUR"), Decimal::new(25, 2));
        // 19.99 * 0.98 = 19.5902
        assert_eq!(
            convert(Decimal::new(1999, 2), "USD", "EUR"),
            Decimal::new(1959, 2)
        );
    }

    #[test]
    fn test_rate_lookup() {
        assert_eq!(rate("USD", "EUR"), Some(Decimal::new(98, 2)));
        assert_eq!(rate("USD", "GBP"), None);
    }
}
