use validator::{Validate, ValidationErrors};

use crate::errors::AppError;

/// Run the declarative rules on a request shape, short-circuiting with the
/// aggregated violation list before the service layer is ever invoked.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|errors| AppError::Validation(collect_violations(&errors)))
}

/// Flatten `ValidationErrors` into `"field: message"` strings with the wire
/// (camelCase) field names, sorted for deterministic output.
pub fn collect_violations(errors: &ValidationErrors) -> Vec<String> {
    let mut violations = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        let field = snake_to_camel(field);
        for error in field_errors {
            let message = error.message.as_deref().unwrap_or("is invalid");
            violations.push(format!("{field}: {message}"));
        }
    }
    violations.sort();
    violations
}

fn snake_to_camel(field: &str) -> String {
    let mut camel = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            camel.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            camel.push(ch);
        }
    }
    camel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employee::CreateEmployeeRequest;
    use serde_json::json;

    fn invalid_request() -> CreateEmployeeRequest {
        serde_json::from_value(json!({
            "fullName": "Jo",
            "email": "not-an-email",
            "dateOfBirth": "1990-01-01",
            "gender": "FEMALE",
            "phoneNumber": "12345",
            "password": "short",
        }))
        .unwrap()
    }

    #[test]
    fn snake_case_fields_are_reported_in_camel_case() {
        assert_eq!(snake_to_camel("full_name"), "fullName");
        assert_eq!(snake_to_camel("date_of_birth"), "dateOfBirth");
        assert_eq!(snake_to_camel("email"), "email");
    }

    #[test]
    fn violations_are_aggregated_and_sorted() {
        let error = validate_payload(&invalid_request()).unwrap_err();
        let AppError::Validation(violations) = error else {
            panic!("expected a validation failure");
        };

        assert_eq!(
            violations,
            vec![
                "email: Email must be valid",
                "fullName: Full name must be between 4 and 160 characters",
                "password: Password must be between 8 and 32 characters",
                "phoneNumber: Phone number must be 10 digits",
            ]
        );
    }

    #[test]
    fn valid_payload_passes() {
        let request: CreateEmployeeRequest = serde_json::from_value(json!({
            "fullName": "John Smith",
            "email": "john@x.com",
            "dateOfBirth": "1990-01-01",
            "gender": "MALE",
            "phoneNumber": "1234567890",
            "active": false,
            "password": "super-secret",
        }))
        .unwrap();

        assert!(validate_payload(&request).is_ok());
    }
}
