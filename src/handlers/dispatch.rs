use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use log::{error, info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use crate::db::EmployeeStore;
use crate::errors::{AppError, INVALID_METHOD};
use crate::handlers::employee::{
    create_employee, delete_employee, read_employees, update_employee, Operation,
};
use crate::models::employee::REGID_FIELD;
use crate::models::event::EmployeeEvent;
use crate::models::response::ApiResponse;

#[derive(Deserialize)]
struct ReadQuery {
    regid: Option<String>,
}

/// Query parameters as received: a raw query string from an HTTP request,
/// or the already decoded map of a serverless event.
pub enum QueryParams<'a> {
    Raw(&'a str),
    Map(Option<&'a HashMap<String, String>>),
}

impl QueryParams<'_> {
    fn regid(&self) -> Result<Option<String>, AppError> {
        match self {
            QueryParams::Raw(raw) => web::Query::<ReadQuery>::from_query(raw)
                .map(|query| query.into_inner().regid)
                .map_err(|err| {
                    warn!("Rejected query string '{}': {}", raw, err);
                    AppError::InvalidQuery(err.to_string())
                }),
            QueryParams::Map(map) => Ok(map.and_then(|map| map.get(REGID_FIELD).cloned())),
        }
    }
}

pub struct EmployeeRequest<'a> {
    pub method: &'a str,
    pub body: Option<&'a [u8]>,
    pub query: QueryParams<'a>,
}

fn failure(err: AppError, fallback: &str) -> ApiResponse {
    let status = err.status();
    let message = match err.message() {
        Some(message) => {
            if status == StatusCode::OK {
                info!("{}", err);
            }
            message
        }
        None => {
            error!("{}: {}", fallback, err);
            fallback.to_string()
        }
    };
    ApiResponse::new(status, message, false)
}

/// Routes a request to the operation matching its method.
pub async fn dispatch<S: EmployeeStore>(store: &S, request: &EmployeeRequest<'_>) -> ApiResponse {
    let Some(operation) = Operation::from_method(request.method) else {
        warn!("Rejected unsupported method {}", request.method);
        return failure(AppError::InvalidMethod(request.method.to_string()), INVALID_METHOD);
    };

    let result = match operation {
        Operation::Create => create_employee(store, request.body).await,
        Operation::Update => update_employee(store, request.body).await,
        Operation::Delete => delete_employee(store, request.body).await,
        Operation::Read => match request.query.regid() {
            Ok(regid) => read_employees(store, regid.as_deref()).await,
            Err(err) => Err(err),
        },
    };

    result.unwrap_or_else(|err| failure(err, operation.failure_message()))
}

pub async fn employee_endpoint<S: EmployeeStore + 'static>(
    req: HttpRequest,
    store: web::Data<S>,
    body: web::Bytes,
) -> HttpResponse {
    let request = EmployeeRequest {
        method: req.method().as_str(),
        body: Some(&body[..]),
        query: QueryParams::Raw(req.query_string()),
    };

    dispatch(store.get_ref(), &request).await.into_http()
}

pub async fn event_endpoint<S: EmployeeStore + 'static>(
    store: web::Data<S>,
    event: web::Json<EmployeeEvent>,
) -> Result<HttpResponse, actix_web::Error> {
    let event = event.into_inner();
    let request = EmployeeRequest {
        method: &event.http_method,
        body: event.body.as_deref().map(str::as_bytes),
        query: QueryParams::Map(event.query_string_parameters.as_ref()),
    };

    let envelope = dispatch(store.get_ref(), &request)
        .await
        .into_envelope()
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(envelope))
}
