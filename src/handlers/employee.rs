use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::employee::{CreateEmployeeRequest, UpdateEmployeeRequest};
use crate::services::employee::{EmployeeService, PageRequest};
use crate::utils::validation::validate_payload;

#[derive(Debug, Deserialize)]
pub struct EmployeeQueryParams {
    page: Option<i64>,
    size: Option<i64>,
}

/// Mount the employee routes and the extractor error handlers, so every
/// failure on the request path surfaces as the uniform error envelope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::Validation(vec![format!("body: {err}")]).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::Validation(vec![format!("path: {err}")]).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::Validation(vec![format!("query: {err}")]).into()
    }))
    .service(
        web::resource("/employees")
            .route(web::post().to(create_employee))
            .route(web::get().to(get_employees)),
    )
    .service(
        web::resource("/employees/{id}")
            .route(web::get().to(get_employee_by_id))
            .route(web::put().to(update_employee))
            .route(web::delete().to(delete_employee)),
    );
}

pub async fn create_employee(
    service: web::Data<EmployeeService>,
    request: web::Json<CreateEmployeeRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    validate_payload(&request)?;

    let employee = service.create(request).await?;
    Ok(HttpResponse::Created().json(employee))
}

pub async fn get_employees(
    service: web::Data<EmployeeService>,
    query: web::Query<EmployeeQueryParams>,
) -> Result<HttpResponse, AppError> {
    let pagination = parse_pagination(&query)?;
    let listing = service.list(pagination).await?;
    Ok(HttpResponse::Ok().json(listing))
}

pub async fn get_employee_by_id(
    service: web::Data<EmployeeService>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let employee = service.get(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

pub async fn update_employee(
    service: web::Data<EmployeeService>,
    id: web::Path<i64>,
    request: web::Json<UpdateEmployeeRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    validate_payload(&request)?;

    let employee = service.update(id.into_inner(), request).await?;
    Ok(HttpResponse::Ok().json(employee))
}

pub async fn delete_employee(
    service: web::Data<EmployeeService>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

fn parse_pagination(params: &EmployeeQueryParams) -> Result<Option<PageRequest>, AppError> {
    match (params.page, params.size) {
        (None, None) => Ok(None),
        (Some(page), Some(size)) => {
            let mut violations = Vec::new();
            if page < 0 {
                violations.push("page: Page index must not be negative".to_string());
            }
            if size < 1 {
                violations.push("size: Page size must be positive".to_string());
            }
            if violations.is_empty() {
                Ok(Some(PageRequest { page, size }))
            } else {
                Err(AppError::Validation(violations))
            }
        }
        (Some(_), None) => Err(AppError::Validation(vec![
            "size: Page size is required when page is supplied".to_string(),
        ])),
        (None, Some(_)) => Err(AppError::Validation(vec![
            "page: Page index is required when size is supplied".to_string(),
        ])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<i64>, size: Option<i64>) -> EmployeeQueryParams {
        EmployeeQueryParams { page, size }
    }

    #[test]
    fn absent_parameters_mean_an_unpaginated_listing() {
        assert!(parse_pagination(&params(None, None)).unwrap().is_none());
    }

    #[test]
    fn both_parameters_build_a_page_request() {
        let page = parse_pagination(&params(Some(2), Some(25))).unwrap().unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.size, 25);
    }

    #[test]
    fn out_of_range_parameters_aggregate_both_violations() {
        let error = parse_pagination(&params(Some(-1), Some(0))).unwrap_err();
        let AppError::Validation(violations) = error else {
            panic!("expected a validation failure");
        };
        assert_eq!(
            violations,
            vec![
                "page: Page index must not be negative",
                "size: Page size must be positive",
            ]
        );
    }

    #[test]
    fn lone_parameter_is_rejected() {
        assert!(parse_pagination(&params(Some(0), None)).is_err());
        assert!(parse_pagination(&params(None, Some(10))).is_err());
    }
}
