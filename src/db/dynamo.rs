use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, Select};
use aws_sdk_dynamodb::Client;
use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use crate::db::attribute::{employee_to_item, item_to_employee, to_attribute, Item};
use crate::db::{EmployeeStore, Filter};
use crate::errors::StoreError;
use crate::models::employee::{Employee, EmployeeDetails, REGID_FIELD};

const REGID_NAME: &str = "#regid";

pub struct DynamoStore {
    client: Client,
    table_name: String,
    email_index: Option<String>,
}

/// `SET #field = :field, ...` over every non-key attribute of an employee.
#[derive(Debug)]
pub struct UpdateStatement {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

impl UpdateStatement {
    pub fn for_details(details: &EmployeeDetails) -> Result<Self, StoreError> {
        let document = match serde_json::to_value(details) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(StoreError::Codec("details did not encode as an object".to_string())),
            Err(err) => return Err(StoreError::Codec(err.to_string())),
        };

        let mut assignments = Vec::with_capacity(document.len());
        let mut names = HashMap::with_capacity(document.len());
        let mut values = HashMap::with_capacity(document.len());

        for (field, value) in &document {
            assignments.push(format!("#{field} = :{field}"));
            names.insert(format!("#{field}"), field.clone());
            values.insert(format!(":{field}"), to_attribute(value));
        }

        Ok(UpdateStatement {
            expression: format!("SET {}", assignments.join(", ")),
            names,
            values,
        })
    }
}

fn backend_error<E: std::error::Error + 'static>(err: E) -> StoreError {
    StoreError::Backend(DisplayErrorContext(&err).to_string())
}

fn regid_key(regid: &str) -> AttributeValue {
    AttributeValue::S(regid.to_string())
}

impl DynamoStore {
    pub fn new(client: Client, table_name: String, email_index: Option<String>) -> Self {
        DynamoStore {
            client,
            table_name,
            email_index,
        }
    }
}

impl EmployeeStore for DynamoStore {
    async fn get(&self, regid: &str) -> Result<Option<Employee>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(REGID_FIELD, regid_key(regid))
            .send()
            .await
            .map_err(backend_error)?;

        output.item().map(item_to_employee).transpose()
    }

    async fn insert(&self, employee: &Employee) -> Result<bool, StoreError> {
        let item = employee_to_item(employee)?;

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression(format!("attribute_not_exists({REGID_NAME})"))
            .expression_attribute_names(REGID_NAME, REGID_FIELD)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception()) =>
            {
                debug!("Insert skipped, {} already exists", employee.regid);
                Ok(false)
            }
            Err(err) => Err(backend_error(err)),
        }
    }

    async fn update(&self, employee: &Employee) -> Result<bool, StoreError> {
        let mut statement = UpdateStatement::for_details(&employee.details)?;
        statement
            .names
            .insert(REGID_NAME.to_string(), REGID_FIELD.to_string());

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(REGID_FIELD, regid_key(&employee.regid))
            .update_expression(statement.expression)
            .set_expression_attribute_names(Some(statement.names))
            .set_expression_attribute_values(Some(statement.values))
            .condition_expression(format!("attribute_exists({REGID_NAME})"))
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception()) =>
            {
                Ok(false)
            }
            Err(err) => Err(backend_error(err)),
        }
    }

    async fn delete(&self, regid: &str) -> Result<bool, StoreError> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(REGID_FIELD, regid_key(regid))
            .condition_expression(format!("attribute_exists({REGID_NAME})"))
            .expression_attribute_names(REGID_NAME, REGID_FIELD)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception()) =>
            {
                Ok(false)
            }
            Err(err) => Err(backend_error(err)),
        }
    }

    async fn scan(&self, filter: Option<Filter<'_>>) -> Result<Vec<Employee>, StoreError> {
        let mut employees = Vec::new();
        let mut start_key: Option<Item> = None;

        // Scans stop at 1 MB per page; follow LastEvaluatedKey to the end.
        loop {
            let mut request = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key.take());

            if let Some(filter) = &filter {
                request = request
                    .filter_expression("#attr = :value")
                    .expression_attribute_names("#attr", filter.attribute)
                    .expression_attribute_values(":value", AttributeValue::S(filter.value.to_string()));
            }

            let output = request.send().await.map_err(backend_error)?;
            for item in output.items() {
                employees.push(item_to_employee(item)?);
            }

            match output.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        Ok(employees)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let Some(index) = &self.email_index else {
            let matches = self.scan(Some(Filter::equals("email", email))).await?;
            return Ok(!matches.is_empty());
        };

        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(index)
            .key_condition_expression("#email = :email")
            .expression_attribute_names("#email", "email")
            .expression_attribute_values(":email", AttributeValue::S(email.to_string()))
            .select(Select::Count)
            .send()
            .await
            .map_err(backend_error)?;

        Ok(output.count() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employee::REQUIRED_FIELDS;
    use serde_json::json;

    fn details() -> EmployeeDetails {
        serde_json::from_value(json!({
            "name": "Meera", "email": "meera@example.com", "age": 28, "gender": "female",
            "phoneNo": "+44 20 7946 0958", "addressDetails": "Flat", "hno": "7",
            "street": "Baker Street", "city": "London", "state": "Greater London",
            "workExperience": [{"companyName": "Initech", "fromdate": "2020", "todate": "2023"}],
            "companyName": "Initech", "fromdate": "2020", "todate": "2023",
            "address": "7 Baker Street", "qualifications": ["MSc"], "qualificationName": "MSc",
            "percentage": 68, "projects": [{"title": "TPS"}], "title": "TPS",
            "description": "Reports", "photo": "https://cdn.example.com/meera.png"
        }))
        .unwrap()
    }

    #[test]
    fn update_statement_sets_every_field_but_the_key() {
        let statement = UpdateStatement::for_details(&details()).unwrap();

        assert!(statement.expression.starts_with("SET "));
        let assignments: Vec<&str> = statement.expression["SET ".len()..].split(", ").collect();
        assert_eq!(assignments.len(), REQUIRED_FIELDS.len());

        for field in REQUIRED_FIELDS {
            let assignment = format!("#{field} = :{field}");
            assert_eq!(assignments.iter().filter(|a| **a == assignment).count(), 1, "{}", field);
            assert_eq!(statement.names.get(&format!("#{field}")).map(String::as_str), Some(field));
            assert!(statement.values.contains_key(&format!(":{field}")));
        }

        assert!(!statement.names.values().any(|name| name == REGID_FIELD));
    }

    #[test]
    fn update_statement_values_carry_field_types() {
        let statement = UpdateStatement::for_details(&details()).unwrap();
        assert_eq!(statement.values.get(":age"), Some(&AttributeValue::N("28".to_string())));
        assert!(matches!(statement.values.get(":projects"), Some(AttributeValue::L(_))));
        assert_eq!(
            statement.values.get(":city"),
            Some(&AttributeValue::S("London".to_string()))
        );
    }
}
