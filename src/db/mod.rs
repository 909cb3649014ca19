pub mod attribute;
pub mod dynamo;
pub mod memory;

use log::info;
use crate::config::{Backend, Config};
use crate::errors::StoreError;
use crate::models::employee::Employee;
use crate::utils::dynamodb::create_dynamodb_client;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

/// Equality filter applied during a scan.
#[derive(Debug, Clone, Copy)]
pub struct Filter<'a> {
    pub attribute: &'a str,
    pub value: &'a str,
}

impl<'a> Filter<'a> {
    pub fn equals(attribute: &'a str, value: &'a str) -> Self {
        Filter { attribute, value }
    }
}

/// A single table of employees keyed by `regid`.
#[allow(async_fn_in_trait)]
pub trait EmployeeStore {
    async fn get(&self, regid: &str) -> Result<Option<Employee>, StoreError>;

    /// Writes the record only if its `regid` is not taken yet.
    /// Returns `false` when the key already exists.
    async fn insert(&self, employee: &Employee) -> Result<bool, StoreError>;

    /// Overwrites every non-key field of an existing record.
    /// Returns `false` when the key does not exist.
    async fn update(&self, employee: &Employee) -> Result<bool, StoreError>;

    /// Returns `false` when the key does not exist.
    async fn delete(&self, regid: &str) -> Result<bool, StoreError>;

    async fn scan(&self, filter: Option<Filter<'_>>) -> Result<Vec<Employee>, StoreError>;

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let matches = self.scan(Some(Filter::equals("email", email))).await?;
        Ok(!matches.is_empty())
    }
}

/// Backend chosen at start-up.
pub enum Store {
    Dynamo(DynamoStore),
    Memory(MemoryStore),
}

impl Store {
    pub async fn connect(config: &Config) -> Self {
        match config.backend {
            Backend::DynamoDb => {
                info!("Using DynamoDB table {}", config.table_name);
                let client = create_dynamodb_client(config).await;
                Store::Dynamo(DynamoStore::new(
                    client,
                    config.table_name.clone(),
                    config.email_index.clone(),
                ))
            }
            Backend::Memory => {
                info!("Using in-memory employee store");
                Store::Memory(MemoryStore::default())
            }
        }
    }
}

impl EmployeeStore for Store {
    async fn get(&self, regid: &str) -> Result<Option<Employee>, StoreError> {
        match self {
            Store::Dynamo(store) => store.get(regid).await,
            Store::Memory(store) => store.get(regid).await,
        }
    }

    async fn insert(&self, employee: &Employee) -> Result<bool, StoreError> {
        match self {
            Store::Dynamo(store) => store.insert(employee).await,
            Store::Memory(store) => store.insert(employee).await,
        }
    }

    async fn update(&self, employee: &Employee) -> Result<bool, StoreError> {
        match self {
            Store::Dynamo(store) => store.update(employee).await,
            Store::Memory(store) => store.update(employee).await,
        }
    }

    async fn delete(&self, regid: &str) -> Result<bool, StoreError> {
        match self {
            Store::Dynamo(store) => store.delete(regid).await,
            Store::Memory(store) => store.delete(regid).await,
        }
    }

    async fn scan(&self, filter: Option<Filter<'_>>) -> Result<Vec<Employee>, StoreError> {
        match self {
            Store::Dynamo(store) => store.scan(filter).await,
            Store::Memory(store) => store.scan(filter).await,
        }
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        match self {
            Store::Dynamo(store) => store.email_exists(email).await,
            Store::Memory(store) => store.email_exists(email).await,
        }
    }
}
