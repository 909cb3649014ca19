use serde::Deserialize;
use std::collections::HashMap;

/// An API-gateway proxy style request, as delivered to a serverless function.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeEvent {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}
