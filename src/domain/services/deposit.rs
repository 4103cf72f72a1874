use rust_decimal::Decimal;
use crate::domain::services::pricing::round_money;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepositSplit {
    pub deposit: Decimal,
    pub balance: Decimal,
}

/// Deposit due now and balance due later for a booking total.
///
/// deposit_type "percentage" takes amount as a percent of the total,
/// "fixed" takes it as an absolute amount. The deposit is clamped to
/// 0 ≤ deposit ≤ total, so the balance can never go negative.
pub fn split_deposit(total: Decimal, enabled: bool, deposit_type: &str, amount: Decimal) -> DepositSplit {
    if !enabled {
        return DepositSplit { deposit: Decimal::ZERO, balance: total };
    }

    let raw = match deposit_type {
        "percentage" => total * amount / Decimal::ONE_HUNDRED,
        "fixed" => amount,
        _ => Decimal::ZERO,
    };

    let cap = total.max(Decimal::ZERO);
    let deposit = round_money(raw).max(Decimal::ZERO).min(cap);

    DepositSplit {
        deposit,
        balance: total - deposit,
    }
}
