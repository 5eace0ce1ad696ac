//! Mortgage overpayment and term-reduction projection.
//!
//! Compares the original level-payment schedule of a loan against a new
//! schedule with an increased monthly payment and/or a one-time lump-sum
//! principal reduction, and derives the change in total overpayment and in
//! remaining term. All math in `rust_decimal::Decimal`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::time_value;
use crate::types::{with_metadata, ComputationOutput, Currency, Money};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for the loan projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// Original loan amount (principal)
    pub principal: Money,
    /// Nominal annual interest rate in percent (7.5 = 7.5%)
    pub annual_rate_pct: Decimal,
    /// Original loan term in years
    pub term_years: u32,
    /// Fixed monthly payment under the original schedule
    pub original_payment: Money,
    /// New monthly payment after the change takes effect
    pub increased_payment: Money,
    /// One-time payment applied to principal before the new schedule
    #[serde(default)]
    pub lump_sum: Money,
    /// Currency label attached to all monetary outputs; never converted
    #[serde(default)]
    pub currency: Currency,
}

/// Output of the loan projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionOutput {
    /// Total interest paid under the original schedule
    pub initial_overpayment: Money,
    /// Total interest paid under the new schedule
    pub new_overpayment: Money,
    /// initial_overpayment - new_overpayment
    pub overpayment_reduction: Money,
    /// Whole years of term reduction
    pub term_reduction_years: i64,
    /// Remainder months of term reduction
    pub term_reduction_months: i64,
    /// original_payment * original_term_months
    pub total_payment_initial: Money,
    /// increased_payment * new_term_months + lump_sum
    pub total_payment_new: Money,
    /// Original term in months
    pub original_term_months: u32,
    /// Continuous (non-integer) number of months in the new schedule
    pub new_term_months: Decimal,
    /// Principal remaining after the lump sum is applied
    pub effective_principal: Money,
    /// Currency label (echoed from the input)
    pub currency: Currency,
}

/// Input parameters for the scheduled level payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledPaymentInput {
    /// Loan amount (principal)
    pub principal: Money,
    /// Nominal annual interest rate in percent (7.5 = 7.5%)
    pub annual_rate_pct: Decimal,
    /// Loan term in years
    pub term_years: u32,
    /// Currency label attached to all monetary outputs; never converted
    #[serde(default)]
    pub currency: Currency,
}

/// Output of the scheduled payment calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledPaymentOutput {
    /// Level monthly payment that amortizes the loan over the full term
    pub monthly_payment: Money,
    /// monthly_payment * term in months
    pub total_payment: Money,
    /// total_payment - principal
    pub total_interest: Money,
    /// Currency label (echoed from the input)
    pub currency: Currency,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project the overpayment and term reduction of switching a loan to an
/// increased monthly payment and/or applying a one-time lump sum.
///
/// Original schedule: `total = original_payment * term_years * 12`, with
/// `overpayment = total - principal`. The lump sum is subtracted from the
/// principal before the new schedule is computed; the new term is the
/// continuous number of periods that amortizes the reduced principal at the
/// increased payment (`time_value::nper`). The term reduction is floored to
/// whole months and split into years and remainder months.
pub fn calculate_projection(
    input: &ProjectionInput,
) -> MortgageResult<ComputationOutput<ProjectionOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_projection_input(input)?;
    rate_unit_warning(input.annual_rate_pct, &mut warnings);

    let monthly_rate = input.annual_rate_pct / dec!(100) / dec!(12);
    let original_term_months =
        input
            .term_years
            .checked_mul(12)
            .ok_or_else(|| MortgageError::InvalidInput {
                field: "term_years".into(),
                reason: "Loan term in months overflows".into(),
            })?;
    let term_months_dec = Decimal::from(original_term_months);

    let total_payment_initial = input.original_payment * term_months_dec;
    let initial_overpayment = total_payment_initial - input.principal;

    let effective_principal = input.principal - input.lump_sum;
    if effective_principal <= Decimal::ZERO {
        return Err(MortgageError::FinancialImpossibility(format!(
            "Lump sum {} consumes the entire principal of {}",
            input.lump_sum, input.principal
        )));
    }

    if input.increased_payment < input.original_payment {
        warnings.push(format!(
            "Increased payment {} is below the original payment {}; the new schedule will be longer than the original",
            input.increased_payment, input.original_payment
        ));
    }
    if input.lump_sum * dec!(2) > input.principal {
        warnings.push(format!(
            "Lump sum {} exceeds half the principal {}",
            input.lump_sum, input.principal
        ));
    }

    let new_term_months =
        time_value::nper(monthly_rate, -input.increased_payment, effective_principal)?;

    let total_payment_new = input.increased_payment * new_term_months + input.lump_sum;
    let new_overpayment = total_payment_new - effective_principal;
    let overpayment_reduction = initial_overpayment - new_overpayment;

    // Floor the continuous month count first, then split into whole years
    // and remainder months.
    let reduction_whole_months = (term_months_dec - new_term_months)
        .floor()
        .to_i64()
        .ok_or_else(|| MortgageError::InvalidInput {
            field: "term_reduction".into(),
            reason: "Term reduction does not fit in a month count".into(),
        })?;
    let term_reduction_years = reduction_whole_months / 12;
    let term_reduction_months = reduction_whole_months % 12;

    let output = ProjectionOutput {
        initial_overpayment,
        new_overpayment,
        overpayment_reduction,
        term_reduction_years,
        term_reduction_months,
        total_payment_initial,
        total_payment_new,
        original_term_months,
        new_term_months,
        effective_principal,
        currency: input.currency.clone(),
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Closed-form annuity term projection",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Calculate the scheduled level monthly payment for a loan.
///
/// The payment that amortizes `principal` over `term_years * 12` months at
/// the given annual rate, via `time_value::pmt`.
pub fn calculate_scheduled_payment(
    input: &ScheduledPaymentInput,
) -> MortgageResult<ComputationOutput<ScheduledPaymentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_payment_input(input)?;
    rate_unit_warning(input.annual_rate_pct, &mut warnings);

    let monthly_rate = input.annual_rate_pct / dec!(100) / dec!(12);
    let months = input
        .term_years
        .checked_mul(12)
        .ok_or_else(|| MortgageError::InvalidInput {
            field: "term_years".into(),
            reason: "Loan term in months overflows".into(),
        })?;

    // PMT returns an outflow (negative) under the spreadsheet convention.
    let monthly_payment = -time_value::pmt(monthly_rate, months, input.principal, Decimal::ZERO)?;
    let total_payment = monthly_payment * Decimal::from(months);
    let total_interest = total_payment - input.principal;

    let output = ScheduledPaymentOutput {
        monthly_payment,
        total_payment,
        total_interest,
        currency: input.currency.clone(),
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Level-payment annuity (PMT)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_projection_input(input: &ProjectionInput) -> MortgageResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    if input.term_years == 0 {
        return Err(MortgageError::InvalidInput {
            field: "term_years".into(),
            reason: "Loan term must be at least one year".into(),
        });
    }
    if input.original_payment <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "original_payment".into(),
            reason: "Original payment must be positive".into(),
        });
    }
    if input.increased_payment <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "increased_payment".into(),
            reason: "Increased payment must be positive".into(),
        });
    }
    if input.lump_sum < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "lump_sum".into(),
            reason: "Lump sum cannot be negative".into(),
        });
    }
    Ok(())
}

fn validate_payment_input(input: &ScheduledPaymentInput) -> MortgageResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    if input.term_years == 0 {
        return Err(MortgageError::InvalidInput {
            field: "term_years".into(),
            reason: "Loan term must be at least one year".into(),
        });
    }
    Ok(())
}

fn rate_unit_warning(annual_rate_pct: Decimal, warnings: &mut Vec<String>) {
    if annual_rate_pct > Decimal::ZERO && annual_rate_pct < Decimal::ONE {
        warnings.push(format!(
            "Annual rate {annual_rate_pct}% is below 1%; the rate is expressed in percent (7.5 = 7.5%)"
        ));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
