use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_core::projection::{self, ProjectionInput, ScheduledPaymentInput};
use mortgage_core::types::Currency;

use crate::input;

/// Arguments for the loan projection
#[derive(Args)]
pub struct ProjectArgs {
    /// Initial loan amount (principal)
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 7.5 for 7.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term of the loan in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Monthly payment under the original schedule
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Increased monthly payment under the new schedule
    #[arg(long, alias = "extra_payment")]
    pub extra_payment: Option<Decimal>,

    /// One-time payment applied to principal before the new schedule
    #[arg(long, alias = "lump_sum", default_value = "0", allow_hyphen_values = true)]
    pub lump_sum: Decimal,

    /// Currency code used in the report (RUB, USD, EUR, ...)
    #[arg(long, default_value = "RUB")]
    pub currency: Currency,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let projection_input: ProjectionInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ProjectionInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args.years.ok_or("--years is required (or provide --input)")?,
            original_payment: args
                .payment
                .ok_or("--payment is required (or provide --input)")?,
            increased_payment: args
                .extra_payment
                .ok_or("--extra-payment is required (or provide --input)")?,
            lump_sum: args.lump_sum,
            currency: args.currency,
        }
    };

    let result = projection::calculate_projection(&projection_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the scheduled payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Loan amount (principal)
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 7.5 for 7.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term of the loan in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Currency code used in the report (RUB, USD, EUR, ...)
    #[arg(long, default_value = "RUB")]
    pub currency: Currency,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payment_input: ScheduledPaymentInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ScheduledPaymentInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args.years.ok_or("--years is required (or provide --input)")?,
            currency: args.currency,
        }
    };

    let result = projection::calculate_scheduled_payment(&payment_input)?;
    Ok(serde_json::to_value(result)?)
}
