//! Level-payment annuity primitives.
//!
//! Sign conventions follow the spreadsheet tradition: payments are cash
//! outflows (negative), outstanding balances are positive.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::MortgageError;
use crate::types::{Money, Rate};
use crate::MortgageResult;

/// Payment (PMT): the level payment that amortizes `present_value` down to
/// `-future_value` over `nper` periods at a per-period `rate`.
pub fn pmt(
    rate: Rate,
    nper: u32,
    present_value: Money,
    future_value: Money,
) -> MortgageResult<Money> {
    if nper == 0 {
        return Err(MortgageError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }
    if rate < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "rate".into(),
            reason: "Per-period rate cannot be negative".into(),
        });
    }

    if rate.is_zero() {
        return Ok(-(present_value + future_value) / Decimal::from(nper));
    }

    let one_plus_r = Decimal::ONE + rate;
    let factor = one_plus_r.powd(Decimal::from(nper));
    let annuity_factor = (factor - Decimal::ONE) / rate;

    if annuity_factor.is_zero() {
        return Err(MortgageError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    Ok(-(present_value * factor + future_value) / annuity_factor)
}

/// Number of periods (NPER) needed to pay `present_value` down to zero with
/// a fixed `payment` at a per-period `rate`.
///
/// The result is a continuous (non-integer) period count:
/// `ln(payment / (payment + pv * rate)) / ln(1 + rate)`, or `-pv / payment`
/// at zero rate. The logarithm argument is checked before evaluation: a
/// payment that does not exceed the per-period interest can never amortize
/// the balance and is reported as a `FinancialImpossibility`.
pub fn nper(rate: Rate, payment: Money, present_value: Money) -> MortgageResult<Decimal> {
    if payment.is_zero() {
        return Err(MortgageError::InvalidInput {
            field: "payment".into(),
            reason: "Payment must be non-zero".into(),
        });
    }
    if rate < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "rate".into(),
            reason: "Per-period rate cannot be negative".into(),
        });
    }

    if rate.is_zero() {
        return Ok(-(present_value / payment));
    }

    let denom = payment + present_value * rate;
    if denom >= Decimal::ZERO {
        return Err(MortgageError::FinancialImpossibility(format!(
            "Payment of {} does not exceed the per-period interest {} on a balance of {}; the loan never amortizes",
            payment.abs(),
            present_value * rate,
            present_value
        )));
    }

    // denom < 0 and payment < 0 here, so the ratio is strictly positive.
    let ratio = payment / denom;
    Ok(ratio.ln() / (Decimal::ONE + rate).ln())
}
