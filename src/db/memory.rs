use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use crate::db::{EmployeeStore, Filter};
use crate::errors::StoreError;
use crate::models::employee::Employee;

/// In-process table, ordered by `regid`.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, Employee>>,
}

impl MemoryStore {
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn matches(employee: &Employee, filter: &Filter<'_>) -> Result<bool, StoreError> {
    let document = serde_json::to_value(employee).map_err(|err| StoreError::Codec(err.to_string()))?;
    Ok(document.get(filter.attribute).and_then(Value::as_str) == Some(filter.value))
}

impl EmployeeStore for MemoryStore {
    async fn get(&self, regid: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self.records.read().await.get(regid).cloned())
    }

    async fn insert(&self, employee: &Employee) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&employee.regid) {
            return Ok(false);
        }
        records.insert(employee.regid.clone(), employee.clone());
        Ok(true)
    }

    async fn update(&self, employee: &Employee) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        match records.get_mut(&employee.regid) {
            Some(existing) => {
                existing.details = employee.details.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, regid: &str) -> Result<bool, StoreError> {
        Ok(self.records.write().await.remove(regid).is_some())
    }

    async fn scan(&self, filter: Option<Filter<'_>>) -> Result<Vec<Employee>, StoreError> {
        let records = self.records.read().await;
        let mut employees = Vec::new();
        for employee in records.values() {
            let keep = match &filter {
                Some(filter) => matches(employee, filter)?,
                None => true,
            };
            if keep {
                employees.push(employee.clone());
            }
        }
        Ok(employees)
    }
}
