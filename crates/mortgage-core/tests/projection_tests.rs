use mortgage_core::projection::{
    self, ProjectionInput, ScheduledPaymentInput,
};
use mortgage_core::types::Currency;
use mortgage_core::MortgageError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Reference scenario: 1,000,000 RUB, 7.5%, 20 years, payment 8056.52
// ===========================================================================

fn scenario_input() -> ProjectionInput {
    ProjectionInput {
        principal: dec!(1000000),
        annual_rate_pct: dec!(7.5),
        term_years: 20,
        original_payment: dec!(8056.52),
        increased_payment: dec!(8056.52),
        lump_sum: dec!(0),
        currency: Currency::RUB,
    }
}

#[test]
fn test_scenario_same_payment_is_a_no_op() {
    let result = projection::calculate_projection(&scenario_input()).unwrap();
    let out = &result.result;

    assert_eq!(out.original_term_months, 240);
    assert!(
        (out.new_term_months - dec!(240)).abs() < dec!(0.5),
        "Same payment, no lump sum: term should stay ~240, got {}",
        out.new_term_months
    );
    assert_eq!(out.term_reduction_years, 0);
    assert_eq!(out.term_reduction_months, 0);
    // 8056.52 is a touch above the exact annuity payment; the residual
    // reduction stays below a single monthly payment.
    assert!(out.overpayment_reduction >= Decimal::ZERO);
    assert!(out.overpayment_reduction < dec!(8057));
}

#[test]
fn test_scenario_lump_sum_200k() {
    let mut input = scenario_input();
    input.lump_sum = dec!(200000);

    let result = projection::calculate_projection(&input).unwrap();
    let out = &result.result;

    assert_eq!(out.effective_principal, dec!(800000));
    assert!(
        out.new_term_months < dec!(240),
        "Lump sum must shorten the term, got {}",
        out.new_term_months
    );
    // 800,000 at 8056.52/month: ~155.56 months, a 7-year reduction.
    assert!(
        (out.new_term_months - dec!(155.56)).abs() < dec!(0.05),
        "Expected ~155.56 months, got {}",
        out.new_term_months
    );
    assert_eq!(out.term_reduction_years, 7);
    assert_eq!(out.term_reduction_months, 0);
    assert!(
        (out.overpayment_reduction - dec!(280316)).abs() < dec!(50),
        "Expected reduction ~280,316, got {}",
        out.overpayment_reduction
    );
}

#[test]
fn test_scenario_increased_payment_12000() {
    let mut input = scenario_input();
    input.increased_payment = dec!(12000);

    let result = projection::calculate_projection(&input).unwrap();
    let out = &result.result;

    assert!(
        out.new_term_months < dec!(200),
        "12,000/month should cut the term substantially, got {}",
        out.new_term_months
    );
    assert!(out.overpayment_reduction > Decimal::ZERO);

    // The year/month split floors the continuous reduction.
    let raw = Decimal::from(240) - out.new_term_months;
    let whole = raw.floor();
    assert_eq!(out.term_reduction_years, 10);
    assert_eq!(out.term_reduction_months, 1);
    assert_eq!(
        Decimal::from(out.term_reduction_years * 12 + out.term_reduction_months),
        whole
    );
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_higher_payment_strictly_shortens_term_and_overpayment() {
    let payments = [dec!(9000), dec!(10500), dec!(12000)];
    let mut previous: Option<(Decimal, Decimal)> = None;

    for payment in payments {
        let mut input = scenario_input();
        input.increased_payment = payment;
        let out = projection::calculate_projection(&input).unwrap().result;

        if let Some((prev_term, prev_overpayment)) = previous {
            assert!(
                out.new_term_months < prev_term,
                "Term must strictly decrease: {} -> {} at payment {payment}",
                prev_term,
                out.new_term_months
            );
            assert!(
                out.new_overpayment < prev_overpayment,
                "Overpayment must strictly decrease: {} -> {} at payment {payment}",
                prev_overpayment,
                out.new_overpayment
            );
        }
        previous = Some((out.new_term_months, out.new_overpayment));
    }
}

#[test]
fn test_larger_lump_sum_strictly_shortens_term() {
    let lump_sums = [dec!(0), dec!(100000), dec!(300000)];
    let mut previous: Option<Decimal> = None;

    for lump_sum in lump_sums {
        let mut input = scenario_input();
        input.lump_sum = lump_sum;
        let out = projection::calculate_projection(&input).unwrap().result;

        if let Some(prev_term) = previous {
            assert!(
                out.new_term_months < prev_term,
                "Term must strictly decrease: {} -> {} at lump sum {lump_sum}",
                prev_term,
                out.new_term_months
            );
        }
        previous = Some(out.new_term_months);
    }
}

#[test]
fn test_zero_rate_needs_no_logarithm() {
    let input = ProjectionInput {
        principal: dec!(300000),
        annual_rate_pct: dec!(0),
        term_years: 25,
        original_payment: dec!(1000),
        increased_payment: dec!(1600),
        lump_sum: dec!(12000),
        currency: Currency::RUB,
    };

    let result = projection::calculate_projection(&input).unwrap();
    let out = &result.result;

    // (300,000 - 12,000) / 1,600 = 180 exactly.
    assert_eq!(out.new_term_months, dec!(180));
    assert_eq!(out.term_reduction_years, 10);
    assert_eq!(out.term_reduction_months, 0);
    // No interest at zero rate. The lump sum is paid outside the schedule,
    // so it surfaces as overpayment against the reduced principal.
    assert_eq!(out.initial_overpayment, dec!(0));
    assert_eq!(out.new_overpayment, dec!(12000));
    assert_eq!(out.overpayment_reduction, dec!(-12000));
}

// ===========================================================================
// Domain-error boundaries
// ===========================================================================

#[test]
fn test_lump_sum_at_or_above_principal_is_a_domain_error() {
    for lump_sum in [dec!(1000000), dec!(1500000)] {
        let mut input = scenario_input();
        input.lump_sum = lump_sum;
        let result = projection::calculate_projection(&input);
        assert!(
            matches!(result, Err(MortgageError::FinancialImpossibility(_))),
            "Lump sum {lump_sum} should be rejected"
        );
    }
}

#[test]
fn test_never_amortizing_payment_is_a_domain_error() {
    // Monthly interest on the full principal is 6,250.
    for payment in [dec!(6250), dec!(5000)] {
        let mut input = scenario_input();
        input.increased_payment = payment;
        let result = projection::calculate_projection(&input);
        assert!(
            matches!(result, Err(MortgageError::FinancialImpossibility(_))),
            "Payment {payment} should be rejected"
        );
    }
}

#[test]
fn test_domain_error_messages_are_descriptive() {
    let mut input = scenario_input();
    input.increased_payment = dec!(5000);

    let err = projection::calculate_projection(&input).unwrap_err();
    assert!(err.to_string().contains("never amortizes"), "got: {err}");
}

// ===========================================================================
// Input deserialization
// ===========================================================================

#[test]
fn test_input_json_defaults_lump_sum_and_currency() {
    let json = r#"{
        "principal": "1000000",
        "annual_rate_pct": "7.5",
        "term_years": 20,
        "original_payment": "8056.52",
        "increased_payment": "12000"
    }"#;

    let input: ProjectionInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.lump_sum, dec!(0));
    assert_eq!(input.currency, Currency::RUB);

    let result = projection::calculate_projection(&input).unwrap();
    assert_eq!(result.result.term_reduction_years, 10);
    assert_eq!(result.result.term_reduction_months, 1);
}

#[test]
fn test_output_round_trips_through_json() {
    let result = projection::calculate_projection(&scenario_input()).unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["result"]["original_term_months"], 240);
    assert_eq!(value["result"]["currency"], "RUB");
    assert_eq!(value["methodology"], "Closed-form annuity term projection");
    // Monetary fields serialize as decimal strings, never floats.
    assert!(value["result"]["initial_overpayment"].is_string());
}

// ===========================================================================
// Scheduled payment
// ===========================================================================

#[test]
fn test_scheduled_payment_matches_scenario_loan() {
    let input = ScheduledPaymentInput {
        principal: dec!(1000000),
        annual_rate_pct: dec!(7.5),
        term_years: 20,
        currency: Currency::RUB,
    };

    let result = projection::calculate_scheduled_payment(&input).unwrap();
    let out = &result.result;

    assert!(
        (out.monthly_payment - dec!(8055.93)).abs() < dec!(0.1),
        "Expected ~8055.93, got {}",
        out.monthly_payment
    );

    // Feeding the scheduled payment back into the projection reproduces
    // the full term within rounding.
    let projection_input = ProjectionInput {
        principal: dec!(1000000),
        annual_rate_pct: dec!(7.5),
        term_years: 20,
        original_payment: out.monthly_payment,
        increased_payment: out.monthly_payment,
        lump_sum: dec!(0),
        currency: Currency::RUB,
    };
    let projected = projection::calculate_projection(&projection_input)
        .unwrap()
        .result;
    assert!(
        (projected.new_term_months - dec!(240)).abs() < dec!(0.01),
        "Round trip drifted: {}",
        projected.new_term_months
    );
    assert!(
        projected.overpayment_reduction.abs() < dec!(100),
        "Exact annuity payment should leave the overpayment unchanged, got {}",
        projected.overpayment_reduction
    );
}
