use actix_web::http::StatusCode;
use log::{info, warn};
use serde_json::{Map, Value};
use crate::db::EmployeeStore;
use crate::errors::AppError;
use crate::handlers::lookup::{email_exists, regid_exists};
use crate::models::employee::{Employee, EmployeeDetails, REGID_FIELD, REQUIRED_FIELDS};
use crate::models::response::ApiResponse;
use crate::utils::regid::generate_regid;
use crate::utils::validation::{require_fields, validate_payload};

pub const CREATED: &str = "Employee created successfully";
pub const UPDATED: &str = "Employee details updated successfully";
pub const DELETED: &str = "Employee deleted successfully";
pub const FOUND: &str = "Employee details found";
pub const NOT_FOUND: &str = "Employee details not found";
pub const ALREADY_EXISTS: &str = "Employee already exists";
pub const EMAIL_PREVIOUSLY_REGISTERED: &str =
    "Email was previously registered to an employee whose email has since changed";
pub const NO_SUCH_REGID: &str = "No employee found with this regid";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    pub fn from_method(method: &str) -> Option<Self> {
        match method {
            "POST" => Some(Operation::Create),
            "GET" => Some(Operation::Read),
            "PUT" => Some(Operation::Update),
            "DELETE" => Some(Operation::Delete),
            _ => None,
        }
    }

    /// Generic message returned when the store fails underneath the operation.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => "Employee creation failed",
            Operation::Read => "Unable to retrieve employee details",
            Operation::Update => "Employee update failed",
            Operation::Delete => "Employee deletion failed",
        }
    }
}

fn parse_body(body: Option<&[u8]>) -> Result<Map<String, Value>, AppError> {
    let body = match body {
        Some(body) if !body.is_empty() => body,
        _ => return Err(AppError::MalformedBody("request body is empty".to_string())),
    };

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::MalformedBody("request body is not a JSON object".to_string())),
        Err(err) => {
            warn!("Rejected malformed body: {}", err);
            Err(AppError::MalformedBody(err.to_string()))
        }
    }
}

fn string_field<'a>(payload: &'a Map<String, Value>, field: &str) -> Result<&'a str, AppError> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::InvalidFields(format!("{} must be a string", field)))
}

fn decode_details(payload: Map<String, Value>) -> Result<EmployeeDetails, AppError> {
    let details: EmployeeDetails = serde_json::from_value(Value::Object(payload)).map_err(|err| {
        warn!("Rejected body, wrong field types: {}", err);
        AppError::InvalidFields(err.to_string())
    })?;
    validate_payload(&details)?;
    Ok(details)
}

pub async fn create_employee<S: EmployeeStore>(
    store: &S,
    body: Option<&[u8]>,
) -> Result<ApiResponse, AppError> {
    let payload = parse_body(body)?;
    require_fields(&payload, &REQUIRED_FIELDS)?;

    let email = string_field(&payload, "email")?;
    if email_exists(store, email).await? {
        return Err(AppError::Conflict(ALREADY_EXISTS.to_string()));
    }

    let details = decode_details(payload)?;
    let regid = generate_regid(&details.email);
    let employee = Employee::new(regid.clone(), details);

    // The regid is derived from the email, so a racing create for the same
    // address fails this conditional write.
    if !store.insert(&employee).await? {
        return Err(AppError::Conflict(taken_regid_message(store, &employee).await?.to_string()));
    }

    info!("Created employee {}", regid);
    Ok(ApiResponse::ok(CREATED).with_regid(regid))
}

/// The regid stays bound to the creation email, so an update that changes the
/// email leaves the old address unusable for new records.
async fn taken_regid_message<S: EmployeeStore>(
    store: &S,
    employee: &Employee,
) -> Result<&'static str, AppError> {
    let holder = store.get(&employee.regid).await?;
    let same_email = holder.map_or(true, |holder| {
        generate_regid(&holder.details.email) == employee.regid
    });
    Ok(if same_email { ALREADY_EXISTS } else { EMAIL_PREVIOUSLY_REGISTERED })
}

/// Full replacement of every field except `regid`.
pub async fn update_employee<S: EmployeeStore>(
    store: &S,
    body: Option<&[u8]>,
) -> Result<ApiResponse, AppError> {
    let payload = parse_body(body)?;
    require_fields(&payload, &REQUIRED_FIELDS)?;
    require_fields(&payload, &[REGID_FIELD])?;

    let regid = string_field(&payload, REGID_FIELD)?.to_string();
    if !regid_exists(store, &regid).await? {
        return Err(AppError::NotFound(NO_SUCH_REGID.to_string()));
    }

    let details = decode_details(payload)?;
    if !store.update(&Employee::new(regid.clone(), details)).await? {
        return Err(AppError::NotFound(NO_SUCH_REGID.to_string()));
    }

    info!("Updated employee {}", regid);
    Ok(ApiResponse::ok(UPDATED))
}

pub async fn delete_employee<S: EmployeeStore>(
    store: &S,
    body: Option<&[u8]>,
) -> Result<ApiResponse, AppError> {
    let payload = parse_body(body)?;
    require_fields(&payload, &[REGID_FIELD])?;

    let regid = string_field(&payload, REGID_FIELD)?;
    if !regid_exists(store, regid).await? || !store.delete(regid).await? {
        return Err(AppError::NotFound(NO_SUCH_REGID.to_string()));
    }

    info!("Deleted employee {}", regid);
    Ok(ApiResponse::ok(DELETED))
}

/// One employee when `regid` is given, otherwise the whole table.
pub async fn read_employees<S: EmployeeStore>(
    store: &S,
    regid: Option<&str>,
) -> Result<ApiResponse, AppError> {
    match regid.filter(|regid| !regid.is_empty()) {
        Some(regid) => match store.get(regid).await? {
            Some(employee) => Ok(ApiResponse::ok(FOUND).with_employees(vec![employee])),
            None => Ok(ApiResponse::new(StatusCode::OK, NOT_FOUND, false).with_employees(Vec::new())),
        },
        None => {
            let employees = store.scan(None).await?;
            Ok(ApiResponse::ok(FOUND).with_employees(employees))
        }
    }
}
