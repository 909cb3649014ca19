use std::env;
use std::fmt;

pub const DEFAULT_TABLE: &str = "EmployeeTable";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    DynamoDb,
    Memory,
}

#[derive(Debug)]
pub enum ConfigError {
    Empty(&'static str),
    UnknownBackend(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Empty(var) => write!(f, "{} cannot be empty", var),
            ConfigError::UnknownBackend(value) => {
                write!(f, "STORE_BACKEND must be 'dynamodb' or 'memory', got '{}'", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Process-wide settings, read once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub table_name: String,
    pub email_index: Option<String>,
    pub backend: Backend,
    pub bind_address: String,
    pub region: Option<String>,
    pub dynamodb_endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let table_name = lookup("EMPLOYEE_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string());
        if table_name.trim().is_empty() {
            return Err(ConfigError::Empty("EMPLOYEE_TABLE"));
        }

        let backend = match lookup("STORE_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("dynamodb") => Backend::DynamoDb,
            Some("memory") => Backend::Memory,
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Config {
            table_name,
            email_index: optional("EMPLOYEE_EMAIL_INDEX"),
            backend,
            bind_address: optional("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            region: optional("AWS_REGION"),
            dynamodb_endpoint: optional("DYNAMODB_ENDPOINT"),
        })
    }
}
