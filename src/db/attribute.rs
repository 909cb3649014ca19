//! Conversion between JSON documents and DynamoDB attribute values.

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use crate::errors::StoreError;
use crate::models::employee::Employee;

pub type Item = HashMap<String, AttributeValue>;

pub fn to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(key, value)| (key.clone(), to_attribute(value)))
                .collect(),
        ),
    }
}

pub fn from_attribute(attribute: &AttributeValue) -> Result<Value, StoreError> {
    let value = match attribute {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(items) => Value::Array(
            items.iter().map(from_attribute).collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(from_map(map)?),
        AttributeValue::Ss(strings) => {
            Value::Array(strings.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(numbers) => Value::Array(
            numbers
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        other => {
            return Err(StoreError::Codec(format!("unsupported attribute {:?}", other)));
        }
    };
    Ok(value)
}

fn from_map(map: &Item) -> Result<Map<String, Value>, StoreError> {
    map.iter()
        .map(|(key, value)| -> Result<(String, Value), StoreError> {
            Ok((key.clone(), from_attribute(value)?))
        })
        .collect()
}

fn parse_number(raw: &str) -> Result<Number, StoreError> {
    if let Ok(int) = raw.parse::<i64>() {
        return Ok(int.into());
    }
    if let Ok(uint) = raw.parse::<u64>() {
        return Ok(uint.into());
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| StoreError::Codec(format!("invalid number '{}'", raw)))
}

pub fn employee_to_item(employee: &Employee) -> Result<Item, StoreError> {
    match serde_json::to_value(employee) {
        Ok(Value::Object(map)) => Ok(map
            .iter()
            .map(|(key, value)| (key.clone(), to_attribute(value)))
            .collect()),
        Ok(_) => Err(StoreError::Codec("employee did not encode as an object".to_string())),
        Err(err) => Err(StoreError::Codec(err.to_string())),
    }
}

pub fn item_to_employee(item: &Item) -> Result<Employee, StoreError> {
    let document = Value::Object(from_map(item)?);
    serde_json::from_value(document).map_err(|err| StoreError::Codec(err.to_string()))
}
