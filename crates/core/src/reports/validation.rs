//! Field constraints for report submissions.
//!
//! Every rule is checked on every submission so callers get the complete list
//! of violations at once. Numbers go through `Decimal`, never floats.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ValidationErrors;
use super::month::Month;
use super::types::{NewReport, ReportKey, ReportMetrics};

/// Decimal places kept for funds.
pub const FUNDS_SCALE: u32 = 4;

/// Funds must stay below this; the column holds 16 integer digits.
pub const FUNDS_LIMIT: i64 = 10_000_000_000_000_000;

/// Raw submission as received from a client.
///
/// Fields are loosely typed so that every problem can be reported as a
/// violation instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSubmission {
    /// Organization identifier.
    #[serde(rename = "ngoId", alias = "organizationId", default)]
    pub organization_id: Option<Value>,
    /// Reporting month, `YYYY-MM`.
    #[serde(default)]
    pub month: Option<Value>,
    /// Number of people helped.
    #[serde(default)]
    pub people_helped: Option<Value>,
    /// Number of events conducted.
    #[serde(default)]
    pub events_conducted: Option<Value>,
    /// Funds utilized.
    #[serde(default)]
    pub funds_utilized: Option<Value>,
}

/// Constraints on one numeric metric.
#[derive(Debug, Clone, Copy)]
pub struct MetricRule {
    /// Wire name of the field.
    pub field: &'static str,
    /// Label used in messages.
    pub label: &'static str,
    /// Message when the field is absent.
    pub required_message: &'static str,
    /// Whether fractional values are rejected.
    pub integral: bool,
}

/// `peopleHelped`: whole number, at least zero.
pub const PEOPLE_HELPED: MetricRule = MetricRule {
    field: "peopleHelped",
    label: "People helped",
    required_message: "Number of people helped is required",
    integral: true,
};

/// `eventsConducted`: whole number, at least zero.
pub const EVENTS_CONDUCTED: MetricRule = MetricRule {
    field: "eventsConducted",
    label: "Events conducted",
    required_message: "Number of events conducted is required",
    integral: true,
};

/// `fundsUtilized`: any number, at least zero.
pub const FUNDS_UTILIZED: MetricRule = MetricRule {
    field: "fundsUtilized",
    label: "Funds utilized",
    required_message: "Funds utilized is required",
    integral: false,
};

enum TextInput {
    Missing,
    NotText,
    Present(String),
}

/// Strings pass through; numbers are stringified the way a document store
/// casts them.
fn text(value: Option<&Value>) -> TextInput {
    match value {
        None | Some(Value::Null) => TextInput::Missing,
        Some(Value::String(s)) => TextInput::Present(s.clone()),
        Some(Value::Number(n)) => TextInput::Present(n.to_string()),
        Some(_) => TextInput::NotText,
    }
}

enum NumberInput {
    Missing,
    NotANumber,
    /// A real number outside what `Decimal` can hold.
    OutOfRange { negative: bool },
    Present(Decimal),
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Plain decimal or exponent notation; rejects `inf` and `NaN` spellings.
fn is_numeric_literal(raw: &str) -> bool {
    raw.bytes().any(|b| b.is_ascii_digit())
        && raw
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        && raw.parse::<f64>().is_ok()
}

fn out_of_range(raw: &str) -> NumberInput {
    NumberInput::OutOfRange {
        negative: raw.starts_with('-'),
    }
}

/// Numeric strings are coerced; blank strings count as missing.
fn number(value: Option<&Value>) -> NumberInput {
    match value {
        None | Some(Value::Null) => NumberInput::Missing,
        Some(Value::Number(n)) => {
            let raw = n.to_string();
            parse_decimal(&raw).map_or_else(|| out_of_range(&raw), NumberInput::Present)
        }
        Some(Value::String(s)) if s.trim().is_empty() => NumberInput::Missing,
        Some(Value::String(s)) => {
            let raw = s.trim();
            match parse_decimal(raw) {
                Some(amount) => NumberInput::Present(amount),
                None if is_numeric_literal(raw) => out_of_range(raw),
                None => NumberInput::NotANumber,
            }
        }
        Some(_) => NumberInput::NotANumber,
    }
}

fn check_metric(
    rule: &MetricRule,
    value: Option<&Value>,
    errors: &mut ValidationErrors,
) -> Option<Decimal> {
    let amount = match number(value) {
        NumberInput::Missing => {
            errors.push(rule.field, rule.required_message);
            return None;
        }
        NumberInput::NotANumber => {
            errors.push(rule.field, format!("{} must be a number", rule.label));
            return None;
        }
        NumberInput::OutOfRange { negative: true } => {
            errors.push(rule.field, format!("{} must be a positive number", rule.label));
            return None;
        }
        NumberInput::OutOfRange { negative: false } => {
            errors.push(rule.field, format!("{} is too large", rule.label));
            return None;
        }
        NumberInput::Present(amount) => amount,
    };

    if amount.is_sign_negative() && !amount.is_zero() {
        errors.push(rule.field, format!("{} must be a positive number", rule.label));
        return None;
    }

    if rule.integral {
        if !amount.fract().is_zero() {
            errors.push(rule.field, format!("{} must be a whole number", rule.label));
            return None;
        }
        if amount.to_i64().is_none() {
            errors.push(rule.field, format!("{} is too large", rule.label));
            return None;
        }
        return Some(amount);
    }

    let amount = amount.round_dp_with_strategy(FUNDS_SCALE, RoundingStrategy::MidpointNearestEven);
    if amount >= Decimal::from(FUNDS_LIMIT) {
        errors.push(rule.field, format!("{} is too large", rule.label));
        return None;
    }
    Some(amount)
}

fn check_organization(value: Option<&Value>, errors: &mut ValidationErrors) -> Option<String> {
    match text(value) {
        TextInput::Present(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        TextInput::NotText => {
            errors.push("ngoId", "NGO ID must be a string");
            None
        }
        TextInput::Present(_) | TextInput::Missing => {
            errors.push("ngoId", "NGO ID is required");
            None
        }
    }
}

fn check_month(value: Option<&Value>, errors: &mut ValidationErrors) -> Option<Month> {
    match text(value) {
        TextInput::Missing => {
            errors.push("month", "Month is required");
            None
        }
        TextInput::Present(s) if s.is_empty() => {
            errors.push("month", "Month is required");
            None
        }
        TextInput::Present(s) => Month::parse(&s)
            .map_err(|_| errors.push("month", "Month must be in YYYY-MM format"))
            .ok(),
        TextInput::NotText => {
            errors.push("month", "Month must be in YYYY-MM format");
            None
        }
    }
}

/// Validates a submission.
///
/// # Errors
///
/// Returns every violated constraint when any field is invalid.
pub fn validate_submission(submission: &ReportSubmission) -> Result<NewReport, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let organization_id = check_organization(submission.organization_id.as_ref(), &mut errors);
    let month = check_month(submission.month.as_ref(), &mut errors);
    let people_helped = check_metric(
        &PEOPLE_HELPED,
        submission.people_helped.as_ref(),
        &mut errors,
    );
    let events_conducted = check_metric(
        &EVENTS_CONDUCTED,
        submission.events_conducted.as_ref(),
        &mut errors,
    );
    let funds_utilized = check_metric(
        &FUNDS_UTILIZED,
        submission.funds_utilized.as_ref(),
        &mut errors,
    );

    let (
        Some(organization_id),
        Some(month),
        Some(people_helped),
        Some(events_conducted),
        Some(funds_utilized),
    ) = (
        organization_id,
        month,
        people_helped.and_then(|d| d.to_i64()),
        events_conducted.and_then(|d| d.to_i64()),
        funds_utilized,
    )
    else {
        return Err(errors);
    };

    Ok(NewReport {
        key: ReportKey::new(organization_id, month),
        metrics: ReportMetrics {
            people_helped,
            events_conducted,
            funds_utilized,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn submission(value: Value) -> ReportSubmission {
        serde_json::from_value(value).expect("submission should deserialize")
    }

    fn valid() -> Value {
        json!({
            "ngoId": "A",
            "month": "2024-01",
            "peopleHelped": 100,
            "eventsConducted": 2,
            "fundsUtilized": 5000
        })
    }

    #[test]
    fn test_valid_submission() {
        let report = validate_submission(&submission(valid())).expect("should be valid");
        assert_eq!(report.key.organization_id, "A");
        assert_eq!(report.key.month.as_str(), "2024-01");
        assert_eq!(report.metrics.people_helped, 100);
        assert_eq!(report.metrics.events_conducted, 2);
        assert_eq!(report.metrics.funds_utilized, dec!(5000));
    }

    #[test]
    fn test_empty_submission_lists_every_field() {
        let errors = validate_submission(&ReportSubmission::default()).unwrap_err();
        assert_eq!(
            errors.fields(),
            ["ngoId", "month", "peopleHelped", "eventsConducted", "fundsUtilized"]
        );
        assert_eq!(
            errors.messages(),
            [
                "NGO ID is required",
                "Month is required",
                "Number of people helped is required",
                "Number of events conducted is required",
                "Funds utilized is required",
            ]
        );
    }

    #[test]
    fn test_organization_alias_and_trim() {
        let mut body = valid();
        body.as_object_mut().unwrap().remove("ngoId");
        body["organizationId"] = json!("  Helping Hands  ");
        let report = validate_submission(&submission(body)).unwrap();
        assert_eq!(report.key.organization_id, "Helping Hands");
    }

    #[test]
    fn test_fractional_funds_allowed_and_rounded() {
        let mut body = valid();
        body["fundsUtilized"] = json!(1234.56789);
        let report = validate_submission(&submission(body)).unwrap();
        assert_eq!(report.metrics.funds_utilized, dec!(1234.5679));
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let mut body = valid();
        body["peopleHelped"] = json!("120");
        body["fundsUtilized"] = json!(" 99.5 ");
        let report = validate_submission(&submission(body)).unwrap();
        assert_eq!(report.metrics.people_helped, 120);
        assert_eq!(report.metrics.funds_utilized, dec!(99.5));
    }

    #[test]
    fn test_zero_metrics_allowed() {
        let mut body = valid();
        body["peopleHelped"] = json!(0);
        body["eventsConducted"] = json!(0.0);
        body["fundsUtilized"] = json!(0);
        let report = validate_submission(&submission(body)).unwrap();
        assert_eq!(report.metrics.people_helped, 0);
        assert_eq!(report.metrics.events_conducted, 0);
        assert!(report.metrics.funds_utilized.is_zero());
    }

    #[rstest]
    #[case("ngoId", json!(""), "NGO ID is required")]
    #[case("ngoId", json!("   "), "NGO ID is required")]
    #[case("ngoId", json!(null), "NGO ID is required")]
    #[case("ngoId", json!(["A"]), "NGO ID must be a string")]
    #[case("month", json!(""), "Month is required")]
    #[case("month", json!("2024-1"), "Month must be in YYYY-MM format")]
    #[case("month", json!("January 2024"), "Month must be in YYYY-MM format")]
    #[case("month", json!(202401), "Month must be in YYYY-MM format")]
    #[case("month", json!(true), "Month must be in YYYY-MM format")]
    #[case("peopleHelped", json!(-1), "People helped must be a positive number")]
    #[case("peopleHelped", json!(1.5), "People helped must be a whole number")]
    #[case("peopleHelped", json!("many"), "People helped must be a number")]
    #[case("peopleHelped", json!(""), "Number of people helped is required")]
    #[case("peopleHelped", json!(1e20), "People helped is too large")]
    #[case("fundsUtilized", json!("10000000000000000"), "Funds utilized is too large")]
    #[case("peopleHelped", json!(1e30), "People helped is too large")]
    #[case("peopleHelped", json!(1e300), "People helped is too large")]
    #[case("peopleHelped", json!("1e40"), "People helped is too large")]
    #[case("peopleHelped", json!(-1e30), "People helped must be a positive number")]
    #[case("peopleHelped", json!("inf"), "People helped must be a number")]
    #[case("peopleHelped", json!("NaN"), "People helped must be a number")]
    #[case("fundsUtilized", json!(1e30), "Funds utilized is too large")]
    #[case("fundsUtilized", json!(1e300), "Funds utilized is too large")]
    #[case("fundsUtilized", json!("1e40"), "Funds utilized is too large")]
    #[case("eventsConducted", json!(-3), "Events conducted must be a positive number")]
    #[case("eventsConducted", json!(2.25), "Events conducted must be a whole number")]
    #[case("eventsConducted", json!({"n": 2}), "Events conducted must be a number")]
    #[case("fundsUtilized", json!(-0.01), "Funds utilized must be a positive number")]
    #[case("fundsUtilized", json!(false), "Funds utilized must be a number")]
    #[case("fundsUtilized", json!(null), "Funds utilized is required")]
    fn test_single_field_violation(
        #[case] field: &'static str,
        #[case] value: Value,
        #[case] message: &str,
    ) {
        let mut body = valid();
        body[field] = value;
        let errors = validate_submission(&submission(body)).unwrap_err();
        assert_eq!(errors.fields(), [field]);
        assert_eq!(errors.messages(), [message]);
    }
}
