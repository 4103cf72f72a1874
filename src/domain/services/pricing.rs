use rust_decimal::{Decimal, RoundingStrategy};
use crate::domain::models::pricing_tier::PricingTier;
use crate::domain::models::variant::TourVariant;

/// Fallback rates used when a tour has no explicit tier for a category:
/// adults pay the base price, children half of it, infants travel free.
#[derive(Debug, Clone)]
pub struct TierDefaults {
    pub child_rate: Decimal,
    pub infant_rate: Decimal,
}

impl Default for TierDefaults {
    fn default() -> Self {
        Self {
            child_rate: Decimal::new(5, 1), // 0.5
            infant_rate: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParticipantCounts {
    pub adults: i32,
    pub children: i32,
    pub infants: i32,
}

impl ParticipantCounts {
    pub fn total(&self) -> i32 {
        self.adults + self.children + self.infants
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitPrices {
    pub adult: Decimal,
    pub child: Decimal,
    pub infant: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookingTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<Decimal>().ok()
}

pub fn amount_or_zero(raw: &str) -> Decimal {
    parse_amount(raw).unwrap_or(Decimal::ZERO)
}

pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Two-decimal-place string, the only monetary format crossing the API.
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

/// Shared price calculator. Quote, booking create and booking update all
/// resolve unit prices and totals through this one implementation.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    base_price: Decimal,
    defaults: TierDefaults,
}

impl PricingEngine {
    pub fn new(base_price: Decimal) -> Self {
        Self {
            base_price,
            defaults: TierDefaults::default(),
        }
    }

    pub fn with_defaults(base_price: Decimal, defaults: TierDefaults) -> Self {
        Self { base_price, defaults }
    }

    /// Applies a variant's price modifier to the base price. Explicit tier
    /// prices are unaffected; only the derived fallbacks move with the base.
    pub fn for_variant(mut self, variant: Option<&TourVariant>) -> Self {
        if let Some(v) = variant {
            let value = amount_or_zero(&v.modifier_value);
            self.base_price = match v.modifier_kind.as_str() {
                "absolute" => value,
                "percentage" => self.base_price * (Decimal::ONE + value / Decimal::ONE_HUNDRED),
                "addition" => self.base_price + value,
                _ => self.base_price,
            };
        }
        self
    }

    pub fn base_price(&self) -> Decimal {
        self.base_price
    }

    fn tier_price(tiers: &[PricingTier], name: &str) -> Option<Decimal> {
        tiers.iter()
            .find(|t| t.active && t.name.eq_ignore_ascii_case(name))
            .and_then(|t| t.price.as_deref())
            .and_then(parse_amount)
    }

    pub fn unit_prices(&self, tiers: &[PricingTier]) -> UnitPrices {
        let adult = Self::tier_price(tiers, "adult").unwrap_or(self.base_price);
        let child = Self::tier_price(tiers, "child")
            .unwrap_or_else(|| self.base_price * self.defaults.child_rate);
        let infant = Self::tier_price(tiers, "infant")
            .unwrap_or_else(|| self.base_price * self.defaults.infant_rate);

        UnitPrices {
            adult: round_money(adult),
            child: round_money(child),
            infant: round_money(infant),
        }
    }

    pub fn subtotal(&self, counts: &ParticipantCounts, tiers: &[PricingTier]) -> Decimal {
        let unit = self.unit_prices(tiers);
        unit.adult * Decimal::from(counts.adults)
            + unit.child * Decimal::from(counts.children)
            + unit.infant * Decimal::from(counts.infants)
    }

    /// subtotal − discount + tax. Discount and tax arrive already resolved
    /// (zero when absent); composition itself never fails.
    pub fn totals(&self, counts: &ParticipantCounts, tiers: &[PricingTier], discount: Decimal, tax: Decimal) -> BookingTotals {
        let subtotal = self.subtotal(counts, tiers);
        let discount = round_money(discount);
        let tax = round_money(tax);

        BookingTotals {
            subtotal,
            discount,
            tax,
            total: subtotal - discount + tax,
        }
    }
}
