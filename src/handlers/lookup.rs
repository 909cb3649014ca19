use crate::db::EmployeeStore;
use crate::errors::StoreError;

pub async fn email_exists<S: EmployeeStore>(store: &S, email: &str) -> Result<bool, StoreError> {
    store.email_exists(email).await
}

pub async fn regid_exists<S: EmployeeStore>(store: &S, regid: &str) -> Result<bool, StoreError> {
    Ok(store.get(regid).await?.is_some())
}
