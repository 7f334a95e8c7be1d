//! Field-level validation for customer payloads.
//!
//! Every rule is evaluated independently; a payload that breaks several
//! rules reports one error per broken rule, in rule order. The boundary
//! layer runs this before any command is dispatched, so the command
//! handlers assume validated input.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::customer::CustomerType;
use crate::requests::CustomerPayload;

pub const NAME_MAX_LEN: usize = 200;
pub const EMAIL_MAX_LEN: usize = 254;
pub const INDIVIDUAL_TAX_ID_LEN: usize = 11;
pub const CORPORATE_TAX_ID_LEN: usize = 14;
pub const MINIMUM_AGE_YEARS: i32 = 18;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Validate a payload against today's date. Returns an empty list when the
/// payload is valid.
pub fn validate_payload(payload: &CustomerPayload) -> Vec<FieldError> {
    validate_payload_at(payload, Utc::now().date_naive())
}

/// Validate a payload against an explicit boundary date. The age and
/// past-date rules are evaluated relative to `today`.
pub fn validate_payload_at(payload: &CustomerPayload, today: NaiveDate) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let individual = payload.customer_type == CustomerType::Individual;

    if payload.name.is_empty() {
        let label = if individual { "Name" } else { "Legal name" };
        errors.push(FieldError::new("name", format!("{label} is required.")));
    }
    if payload.name.chars().count() > NAME_MAX_LEN {
        errors.push(FieldError::new(
            "name",
            format!("Name must not exceed {NAME_MAX_LEN} characters."),
        ));
    }
    if individual && !payload.name.chars().all(|c| c.is_alphabetic() || c == ' ') {
        errors.push(FieldError::new("name", "Name must contain only letters and spaces."));
    }

    let document = if individual { "CPF" } else { "CNPJ" };
    if payload.tax_id.is_empty() {
        errors.push(FieldError::new("taxId", format!("{document} is invalid.")));
    }
    if !tax_id_length_matches(&payload.tax_id, payload.customer_type) {
        errors.push(FieldError::new("taxId", format!("{document} has an invalid length.")));
    }

    let email = payload.email.as_deref().unwrap_or_default();
    if email.is_empty() {
        errors.push(FieldError::new("email", "Email is required."));
    }
    if !is_valid_email(email) {
        errors.push(FieldError::new("email", "Email format is invalid."));
    }
    if email.chars().count() > EMAIL_MAX_LEN {
        errors.push(FieldError::new(
            "email",
            format!("Email must not exceed {EMAIL_MAX_LEN} characters."),
        ));
    }

    if individual {
        match payload.birth_date {
            None => {
                errors.push(FieldError::new(
                    "birthDate",
                    "Birth date is required for individual customers.",
                ));
            }
            Some(birth_date) => {
                if birth_date >= today {
                    errors.push(FieldError::new(
                        "birthDate",
                        "Birth date must be before the current date.",
                    ));
                }
                if age_on(birth_date, today) < MINIMUM_AGE_YEARS {
                    errors.push(FieldError::new(
                        "birthDate",
                        format!("Customer must be at least {MINIMUM_AGE_YEARS} years old."),
                    ));
                }
            }
        }
    }

    if !individual && payload.state_registration.as_deref().unwrap_or_default().is_empty() {
        errors.push(FieldError::new(
            "stateRegistration",
            "State registration is required for corporate customers.",
        ));
    }

    errors
}

fn tax_id_length_matches(tax_id: &str, customer_type: CustomerType) -> bool {
    let expected = match customer_type {
        CustomerType::Individual => INDIVIDUAL_TAX_ID_LEN,
        CustomerType::Corporate => CORPORATE_TAX_ID_LEN,
    };
    tax_id.chars().count() == expected
}

/// Completed years between `birth_date` and `today`, counting a birthday
/// that falls on `today` as already reached.
fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Minimal syntactic email check: one `@`, a non-empty local part, and a
/// dotted domain without whitespace.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if email.chars().any(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::domain::customer::CustomerType;
    use crate::requests::CustomerPayload;

    use super::{validate_payload_at, FieldError};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn individual_payload() -> CustomerPayload {
        CustomerPayload {
            customer_type: CustomerType::Individual,
            name: "Maria Silva".to_string(),
            tax_id: "12345678901".to_string(),
            state_registration: None,
            birth_date: Some(date(1990, 5, 20)),
            phone: Some("11987654321".to_string()),
            email: Some("maria.silva@example.com".to_string()),
            postal_code: Some("01310100".to_string()),
            street: Some("Avenida Paulista".to_string()),
            number: Some("1000".to_string()),
            complement: None,
            neighborhood: Some("Bela Vista".to_string()),
            city: Some("Sao Paulo".to_string()),
            state: Some("SP".to_string()),
        }
    }

    fn corporate_payload() -> CustomerPayload {
        CustomerPayload {
            customer_type: CustomerType::Corporate,
            name: "Acme Comercio Ltda".to_string(),
            tax_id: "12345678000190".to_string(),
            state_registration: Some("110042490114".to_string()),
            birth_date: None,
            phone: None,
            email: Some("contato@acme.com.br".to_string()),
            postal_code: None,
            street: None,
            number: None,
            complement: None,
            neighborhood: None,
            city: None,
            state: None,
        }
    }

    fn today() -> NaiveDate {
        date(2026, 8, 6)
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|error| error.field.as_str()).collect()
    }

    #[test]
    fn valid_individual_payload_has_no_errors() {
        let errors = validate_payload_at(&individual_payload(), today());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn valid_corporate_payload_has_no_errors() {
        let errors = validate_payload_at(&corporate_payload(), today());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn empty_name_message_is_keyed_on_customer_type() {
        let mut individual = individual_payload();
        individual.name.clear();
        let errors = validate_payload_at(&individual, today());
        assert!(errors.iter().any(|e| e.field == "name" && e.message == "Name is required."));

        let mut corporate = corporate_payload();
        corporate.name.clear();
        let errors = validate_payload_at(&corporate, today());
        assert!(errors.iter().any(|e| e.field == "name" && e.message == "Legal name is required."));
    }

    #[test]
    fn name_over_200_characters_is_rejected() {
        let mut payload = corporate_payload();
        payload.name = "a".repeat(201);
        let errors = validate_payload_at(&payload, today());
        assert!(errors.iter().any(|e| e.message.contains("200 characters")));
    }

    #[test]
    fn individual_name_must_be_letters_and_spaces() {
        let mut payload = individual_payload();
        payload.name = "Maria Silva 3rd".to_string();
        let errors = validate_payload_at(&payload, today());
        assert!(errors.iter().any(|e| e.message.contains("letters and spaces")));
    }

    #[test]
    fn corporate_name_may_contain_digits() {
        let mut payload = corporate_payload();
        payload.name = "Acme 2000 Ltda".to_string();
        let errors = validate_payload_at(&payload, today());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn accented_individual_names_are_accepted() {
        let mut payload = individual_payload();
        payload.name = "João Araújo".to_string();
        let errors = validate_payload_at(&payload, today());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn empty_tax_id_fires_both_tax_id_rules() {
        let mut payload = individual_payload();
        payload.tax_id.clear();
        let errors = validate_payload_at(&payload, today());
        let tax_id_errors: Vec<_> = errors.iter().filter(|e| e.field == "taxId").collect();
        assert_eq!(tax_id_errors.len(), 2);
        assert!(tax_id_errors.iter().any(|e| e.message == "CPF is invalid."));
        assert!(tax_id_errors.iter().any(|e| e.message == "CPF has an invalid length."));
    }

    #[test]
    fn tax_id_length_is_checked_per_type() {
        let mut individual = individual_payload();
        individual.tax_id = "12345678000190".to_string();
        let errors = validate_payload_at(&individual, today());
        assert!(errors.iter().any(|e| e.message == "CPF has an invalid length."));

        let mut corporate = corporate_payload();
        corporate.tax_id = "12345678901".to_string();
        let errors = validate_payload_at(&corporate, today());
        assert!(errors.iter().any(|e| e.message == "CNPJ has an invalid length."));
    }

    #[test]
    fn email_is_required_for_all_types() {
        let mut payload = corporate_payload();
        payload.email = None;
        let errors = validate_payload_at(&payload, today());
        assert!(errors.iter().any(|e| e.field == "email" && e.message == "Email is required."));
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for bad in ["plainaddress", "missing@domain", "@missing-local.com", "two words@x.com"] {
            let mut payload = individual_payload();
            payload.email = Some(bad.to_string());
            let errors = validate_payload_at(&payload, today());
            assert!(
                errors.iter().any(|e| e.message == "Email format is invalid."),
                "`{bad}` should be rejected"
            );
        }
    }

    #[test]
    fn email_over_254_characters_is_rejected() {
        let mut payload = individual_payload();
        payload.email = Some(format!("{}@example.com", "a".repeat(250)));
        let errors = validate_payload_at(&payload, today());
        assert!(errors.iter().any(|e| e.message.contains("254 characters")));
    }

    #[test]
    fn birth_date_is_required_for_individuals_only() {
        let mut payload = individual_payload();
        payload.birth_date = None;
        let errors = validate_payload_at(&payload, today());
        assert_eq!(fields(&errors), vec!["birthDate"]);

        // Corporate payloads never evaluate birth date rules.
        let mut corporate = corporate_payload();
        corporate.birth_date = None;
        assert!(validate_payload_at(&corporate, today()).is_empty());
    }

    #[test]
    fn future_birth_date_is_rejected() {
        let mut payload = individual_payload();
        payload.birth_date = Some(date(2027, 1, 1));
        let errors = validate_payload_at(&payload, today());
        assert!(errors.iter().any(|e| e.message.contains("before the current date")));
    }

    #[test]
    fn exactly_eighteen_years_old_today_passes() {
        let mut payload = individual_payload();
        payload.birth_date = Some(date(2008, 8, 6));
        let errors = validate_payload_at(&payload, today());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn one_day_short_of_eighteen_fails() {
        let mut payload = individual_payload();
        payload.birth_date = Some(date(2008, 8, 7));
        let errors = validate_payload_at(&payload, today());
        assert!(errors.iter().any(|e| e.message.contains("at least 18")));
    }

    #[test]
    fn missing_state_registration_is_reported_for_corporate() {
        let mut payload = corporate_payload();
        payload.state_registration = None;
        let errors = validate_payload_at(&payload, today());
        assert_eq!(fields(&errors), vec!["stateRegistration"]);

        let mut blank = corporate_payload();
        blank.state_registration = Some(String::new());
        assert_eq!(fields(&validate_payload_at(&blank, today())), vec!["stateRegistration"]);
    }

    #[test]
    fn independent_rules_all_report() {
        let payload = CustomerPayload {
            customer_type: CustomerType::Individual,
            name: String::new(),
            tax_id: String::new(),
            state_registration: None,
            birth_date: None,
            phone: None,
            email: None,
            postal_code: None,
            street: None,
            number: None,
            complement: None,
            neighborhood: None,
            city: None,
            state: None,
        };
        let errors = validate_payload_at(&payload, today());
        assert_eq!(
            fields(&errors),
            vec!["name", "taxId", "taxId", "email", "email", "birthDate"]
        );
    }
}
