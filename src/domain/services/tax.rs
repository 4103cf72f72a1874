use rust_decimal::Decimal;
use crate::domain::services::pricing::round_money;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBreakdown {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Splits a price into subtotal/tax/total for a percentage rate.
///
/// Exclusive: tax is added on top of the price.
/// Inclusive: the price already contains the tax, which is extracted as
/// price − price / (1 + rate/100).
///
/// The tax leg is rounded to 2 dp and the other leg derived from it, so
/// subtotal + tax always reproduces the total exactly.
pub fn apply_tax(price: Decimal, rate_percent: Decimal, inclusive: bool) -> TaxBreakdown {
    if rate_percent <= Decimal::ZERO {
        return TaxBreakdown { subtotal: price, tax: Decimal::ZERO, total: price };
    }

    let factor = Decimal::ONE + rate_percent / Decimal::ONE_HUNDRED;

    if inclusive {
        let tax = round_money(price - price / factor);
        TaxBreakdown {
            subtotal: price - tax,
            tax,
            total: price,
        }
    } else {
        let tax = round_money(price * rate_percent / Decimal::ONE_HUNDRED);
        TaxBreakdown {
            subtotal: price,
            tax,
            total: price + tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn exclusive_tax_is_added_on_top() {
        let b = apply_tax(dec!(100.00), dec!(10), false);
        assert_eq!(b.subtotal, dec!(100.00));
        assert_eq!(b.tax, dec!(10.00));
        assert_eq!(b.total, dec!(110.00));
    }

    #[test]
    fn inclusive_tax_is_extracted_from_the_price() {
        let b = apply_tax(dec!(110.00), dec!(10), true);
        assert_eq!(b.tax, dec!(10.00));
        assert_eq!(b.subtotal, dec!(100.00));
        assert_eq!(b.total, dec!(110.00));
    }

    #[test]
    fn zero_or_negative_rate_means_no_tax() {
        let b = apply_tax(dec!(75.50), dec!(0), true);
        assert_eq!(b.tax, dec!(0));
        assert_eq!(b.subtotal, dec!(75.50));
        assert_eq!(b.total, dec!(75.50));

        let b = apply_tax(dec!(75.50), dec!(-5), false);
        assert_eq!(b.tax, dec!(0));
    }

    #[test]
    fn legs_always_recompose_exactly() {
        for (price, rate, inclusive) in [
            (dec!(99.99), dec!(19), true),
            (dec!(99.99), dec!(19), false),
            (dec!(0.01), dec!(7.7), true),
            (dec!(123.45), dec!(8.25), false),
        ] {
            let b = apply_tax(price, rate, inclusive);
            assert_eq!(b.subtotal + b.tax, b.total, "price={} rate={} inclusive={}", price, rate, inclusive);
        }
    }
}
