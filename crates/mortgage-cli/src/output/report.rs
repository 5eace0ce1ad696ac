use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Plain-text report: one `<Label>: <value>` line per result field, with
/// monetary values to exactly two decimal places and a currency suffix.
pub fn print_report(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result {
        if print_projection(map).is_some() || print_payment(map).is_some() {
            return;
        }
        print_flat(map);
        return;
    }

    println!("{}", result);
}

/// The six-line projection report. Returns None if the result does not
/// carry the projection fields.
fn print_projection(map: &Map<String, Value>) -> Option<()> {
    let initial = money(map, "initial_overpayment")?;
    let new = money(map, "new_overpayment")?;
    let reduction = money(map, "overpayment_reduction")?;
    let years = map.get("term_reduction_years")?.as_i64()?;
    let months = map.get("term_reduction_months")?.as_i64()?;
    let total_initial = money(map, "total_payment_initial")?;
    let total_new = money(map, "total_payment_new")?;
    let ccy = currency(map);

    println!("Initial Overpayment: {initial} {ccy}");
    println!("New Overpayment: {new} {ccy}");
    println!("Reduction in Overpayment: {reduction} {ccy}");
    println!("Reduction in Term: {years} years, {months} months");
    println!("Total Payment (Initial): {total_initial} {ccy}");
    println!("Total Payment (New): {total_new} {ccy}");
    Some(())
}

fn print_payment(map: &Map<String, Value>) -> Option<()> {
    let monthly = money(map, "monthly_payment")?;
    let total = money(map, "total_payment")?;
    let interest = money(map, "total_interest")?;
    let ccy = currency(map);

    println!("Monthly Payment: {monthly} {ccy}");
    println!("Total Payment: {total} {ccy}");
    println!("Total Interest: {interest} {ccy}");
    Some(())
}

fn print_flat(map: &Map<String, Value>) {
    for (key, val) in map {
        if key == "currency" {
            continue;
        }
        println!("{}: {}", title_case(key), plain(val));
    }
}

/// Fetch a monetary field and render it with two decimal places.
/// Decimal fields serialize as strings; plain JSON numbers are accepted too.
fn money(map: &Map<String, Value>, key: &str) -> Option<String> {
    let decimal = match map.get(key)? {
        Value::String(s) => Decimal::from_str(s).ok()?,
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok()?,
        _ => return None,
    };
    Some(format!("{decimal:.2}"))
}

fn currency(map: &Map<String, Value>) -> String {
    match map.get("currency") {
        Some(Value::String(code)) => code.clone(),
        // The Other(..) variant serializes as an object wrapping the code.
        Some(Value::Object(inner)) => inner
            .values()
            .find_map(|v| v.as_str())
            .unwrap_or("RUB")
            .to_string(),
        _ => "RUB".to_string(),
    }
}

fn title_case(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
