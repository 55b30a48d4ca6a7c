use chrono::Utc;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::employee::{
    CreateEmployeeRequest, Employee, EmployeeListing, EmployeePage, EmployeeResponse,
    UpdateEmployeeRequest,
};
use crate::utils::password;

/// Zero-based page request; `size` has already been checked positive at the
/// transport boundary.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

/// Sole writer of employee state. Owns the pool handle; constructed once at
/// startup and shared across workers.
#[derive(Clone)]
pub struct EmployeeService {
    pool: PgPool,
}

impl EmployeeService {
    pub fn new(pool: PgPool) -> Self {
        EmployeeService { pool }
    }

    pub async fn create(&self, request: CreateEmployeeRequest) -> Result<EmployeeResponse, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employees WHERE email = $1)")
                .bind(&request.email)
                .fetch_one(&self.pool)
                .await?;
        if exists {
            return Err(duplicate_email(&request.email));
        }

        let hashed_password = password::hash_password(&request.password)?;

        // The store assigns id and both timestamps; the unique constraint is
        // the final authority on the check-then-insert race.
        let employee: Employee = sqlx::query_as(
            "INSERT INTO employees (full_name, email, date_of_birth, gender, phone_number, active, hashed_password) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&request.full_name)
        .bind(&request.email)
        .bind(request.date_of_birth)
        .bind(request.gender)
        .bind(&request.phone_number)
        .bind(request.active.unwrap_or(true))
        .bind(&hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if err
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                duplicate_email(&request.email)
            } else {
                AppError::Database(err)
            }
        })?;

        log::info!("created employee {}", employee.id);
        Ok(EmployeeResponse::from(employee))
    }

    pub async fn list(&self, pagination: Option<PageRequest>) -> Result<EmployeeListing, AppError> {
        let Some(PageRequest { page, size }) = pagination else {
            let employees: Vec<Employee> = sqlx::query_as("SELECT * FROM employees ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
            return Ok(EmployeeListing::All(
                employees.into_iter().map(EmployeeResponse::from).collect(),
            ));
        };

        let total_elements: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;
        let employees: Vec<Employee> =
            sqlx::query_as("SELECT * FROM employees ORDER BY id LIMIT $1 OFFSET $2")
                .bind(size)
                .bind(page * size)
                .fetch_all(&self.pool)
                .await?;

        Ok(EmployeeListing::Paged(EmployeePage {
            content: employees.into_iter().map(EmployeeResponse::from).collect(),
            page,
            size,
            total_elements,
            total_pages: total_pages(total_elements, size),
        }))
    }

    pub async fn get(&self, id: i64) -> Result<EmployeeResponse, AppError> {
        let employee = self.fetch(id).await?;
        Ok(EmployeeResponse::from(employee))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateEmployeeRequest,
    ) -> Result<EmployeeResponse, AppError> {
        let mut employee = self.fetch(id).await?;

        let hashed_password = match &request.password {
            Some(plain) => Some(password::hash_password(plain)?),
            None => None,
        };
        employee.apply_update(&request, hashed_password, Utc::now());

        let employee: Employee = sqlx::query_as(
            "UPDATE employees SET full_name = $1, date_of_birth = $2, gender = $3, phone_number = $4, \
             active = $5, hashed_password = $6, updated_at = $7 WHERE id = $8 RETURNING *",
        )
        .bind(&employee.full_name)
        .bind(employee.date_of_birth)
        .bind(employee.gender)
        .bind(&employee.phone_number)
        .bind(employee.active)
        .bind(&employee.hashed_password)
        .bind(employee.updated_at)
        .bind(employee.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(EmployeeResponse::from(employee))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        log::info!("deleted employee {id}");
        Ok(())
    }

    async fn fetch(&self, id: i64) -> Result<Employee, AppError> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Employee with ID {id} not found."))
}

fn duplicate_email(email: &str) -> AppError {
    AppError::DuplicateEmail(format!("Email {email} is already in use"))
}

fn total_pages(total_elements: i64, size: i64) -> i64 {
    if total_elements == 0 {
        0
    } else {
        (total_elements + size - 1) / size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
    }

    #[test]
    fn failure_messages_name_the_offending_key() {
        assert_eq!(not_found(7).to_string(), "Employee with ID 7 not found.");
        assert_eq!(
            duplicate_email("john@x.com").to_string(),
            "Email john@x.com is already in use"
        );
    }
}
