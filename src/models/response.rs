use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use crate::models::employee::Employee;

/// JSON body returned by every operation.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ResponseBody {
    pub message: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<Vec<Employee>>,
}

/// Serverless-style envelope: the body travels as an encoded JSON string.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn new(status: StatusCode, message: impl Into<String>, success: bool) -> Self {
        ApiResponse {
            status,
            body: ResponseBody {
                message: message.into(),
                success,
                regid: None,
                employees: None,
            },
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, message, true)
    }

    pub fn with_regid(mut self, regid: String) -> Self {
        self.body.regid = Some(regid);
        self
    }

    pub fn with_employees(mut self, employees: Vec<Employee>) -> Self {
        self.body.employees = Some(employees);
        self
    }

    pub fn into_http(self) -> HttpResponse {
        HttpResponse::build(self.status).json(self.body)
    }

    pub fn into_envelope(self) -> Result<ResponseEnvelope, serde_json::Error> {
        Ok(ResponseEnvelope {
            status_code: self.status.as_u16(),
            body: serde_json::to_string(&self.body)?,
        })
    }
}
