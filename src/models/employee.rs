use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Closed gender set. Serde rejects anything outside it at the JSON
/// boundary; sqlx maps it onto the `gender` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "gender", rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Persisted employee row. Deliberately not `Serialize`: the hashed
/// password must never reach a response body, so every outbound shape
/// goes through [`EmployeeResponse`].
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub phone_number: String,
    pub active: bool,
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Field-level merge for partial updates: only fields present in the
    /// request overwrite the row. The password arrives pre-hashed (or not
    /// at all), and `updated_at` is assigned here, at the point the row is
    /// about to be persisted.
    pub fn apply_update(
        &mut self,
        request: &UpdateEmployeeRequest,
        hashed_password: Option<String>,
        now: DateTime<Utc>,
    ) {
        if let Some(full_name) = &request.full_name {
            self.full_name = full_name.clone();
        }
        if let Some(date_of_birth) = request.date_of_birth {
            self.date_of_birth = date_of_birth;
        }
        if let Some(gender) = request.gender {
            self.gender = gender;
        }
        if let Some(phone_number) = &request.phone_number {
            self.phone_number = phone_number.clone();
        }
        if let Some(active) = request.active {
            self.active = active;
        }
        if let Some(hashed_password) = hashed_password {
            self.hashed_password = hashed_password;
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    #[validate(length(
        min = 4,
        max = 160,
        message = "Full name must be between 4 and 160 characters"
    ))]
    pub full_name: String,
    #[validate(
        email(message = "Email must be valid"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,
    #[validate(custom = "validate_date_of_birth")]
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    #[validate(custom = "validate_phone_number")]
    pub phone_number: String,
    pub active: Option<bool>,
    #[validate(length(
        min = 8,
        max = 32,
        message = "Password must be between 8 and 32 characters"
    ))]
    pub password: String,
}

/// Partial update shape. Email is not updatable. Absent fields leave the
/// entity untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    #[validate(length(
        min = 4,
        max = 160,
        message = "Full name must be between 4 and 160 characters"
    ))]
    pub full_name: Option<String>,
    #[validate(custom = "validate_date_of_birth")]
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    #[validate(custom = "validate_phone_number")]
    pub phone_number: Option<String>,
    pub active: Option<bool>,
    #[validate(length(
        min = 8,
        max = 32,
        message = "Password must be between 8 and 32 characters"
    ))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub phone_number: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        EmployeeResponse {
            id: employee.id,
            full_name: employee.full_name,
            email: employee.email,
            date_of_birth: employee.date_of_birth,
            gender: employee.gender,
            phone_number: employee.phone_number,
            active: employee.active,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

/// One page of employees plus total-count metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePage {
    pub content: Vec<EmployeeResponse>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

/// Listing result: a bare array without pagination parameters, a page
/// envelope with them.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EmployeeListing {
    All(Vec<EmployeeResponse>),
    Paged(EmployeePage),
}

fn validate_date_of_birth(date_of_birth: &NaiveDate) -> Result<(), ValidationError> {
    if *date_of_birth >= Utc::now().date_naive() {
        let mut error = ValidationError::new("past_date");
        error.message = Some("Date of birth must be in the past".into());
        return Err(error);
    }
    Ok(())
}

fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    if phone_number.len() != 10 || !phone_number.chars().all(|c| c.is_ascii_digit()) {
        let mut error = ValidationError::new("phone_number");
        error.message = Some("Phone number must be 10 digits".into());
        return Err(error);
    }
    Ok(())
}
