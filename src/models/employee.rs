use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use validator::Validate;
use crate::utils::validation::{validate_age, validate_composite, validate_phone, validate_photo};

/// JSON names of every attribute a caller must supply on create and update.
pub const REQUIRED_FIELDS: [&str; 22] = [
    "name",
    "email",
    "age",
    "gender",
    "phoneNo",
    "addressDetails",
    "hno",
    "street",
    "city",
    "state",
    "workExperience",
    "companyName",
    "fromdate",
    "todate",
    "address",
    "qualifications",
    "qualificationName",
    "percentage",
    "projects",
    "title",
    "description",
    "photo",
];

pub const REGID_FIELD: &str = "regid";

/// Everything stored for an employee except its key.
#[derive(Serialize, Deserialize, Validate, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetails {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom = "validate_age")]
    pub age: Number,
    #[validate(length(min = 1))]
    pub gender: String,
    #[validate(custom = "validate_phone")]
    pub phone_no: String,

    #[validate(length(min = 1))]
    pub address_details: String,
    #[validate(length(min = 1))]
    pub hno: String,
    #[validate(length(min = 1))]
    pub street: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub state: String,
    #[validate(length(min = 1))]
    pub address: String,

    #[validate(custom = "validate_composite")]
    pub work_experience: Value,
    #[validate(custom = "validate_composite")]
    pub company_name: Value,
    #[validate(custom = "validate_composite")]
    pub fromdate: Value,
    #[validate(custom = "validate_composite")]
    pub todate: Value,

    #[validate(custom = "validate_composite")]
    pub qualifications: Value,
    #[validate(custom = "validate_composite")]
    pub qualification_name: Value,
    #[validate(custom = "validate_composite")]
    pub percentage: Value,

    #[validate(custom = "validate_composite")]
    pub projects: Value,
    #[validate(custom = "validate_composite")]
    pub title: Value,
    #[validate(custom = "validate_composite")]
    pub description: Value,

    #[validate(custom = "validate_photo")]
    pub photo: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Employee {
    pub regid: String,
    #[serde(flatten)]
    pub details: EmployeeDetails,
}

impl Employee {
    pub fn new(regid: String, details: EmployeeDetails) -> Self {
        Employee { regid, details }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "name": "Asha Rao",
            "email": "asha@example.com",
            "age": 31,
            "gender": "female",
            "phoneNo": "+91 98450 12345",
            "addressDetails": "Home",
            "hno": "12B",
            "street": "MG Road",
            "city": "Bengaluru",
            "state": "Karnataka",
            "workExperience": [{"companyName": "Acme", "fromdate": "2019-01", "todate": "2022-06"}],
            "companyName": "Acme",
            "fromdate": "2019-01",
            "todate": "2022-06",
            "address": "12B MG Road, Bengaluru",
            "qualifications": [{"qualificationName": "B.Tech", "percentage": 81.5}],
            "qualificationName": "B.Tech",
            "percentage": 81.5,
            "projects": [{"title": "Ledger", "description": "Billing"}],
            "title": "Ledger",
            "description": "Billing",
            "photo": "https://cdn.example.com/asha.png"
        })
    }

    #[test]
    fn required_fields_match_serialized_names() {
        let details: EmployeeDetails = serde_json::from_value(sample()).unwrap();
        let value = serde_json::to_value(&details).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), REQUIRED_FIELDS.len());
        for field in REQUIRED_FIELDS {
            assert!(object.contains_key(field), "missing {}", field);
        }
    }

    #[test]
    fn employee_flattens_details_next_to_regid() {
        let details: EmployeeDetails = serde_json::from_value(sample()).unwrap();
        let employee = Employee::new("EMP0001".to_string(), details);

        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(value["regid"], "EMP0001");
        assert_eq!(value["phoneNo"], "+91 98450 12345");

        let back: Employee = serde_json::from_value(value).unwrap();
        assert_eq!(back, employee);
    }

    #[test]
    fn sample_passes_validation() {
        let details: EmployeeDetails = serde_json::from_value(sample()).unwrap();
        assert!(details.validate().is_ok());
    }

    #[test]
    fn age_may_be_written_as_a_whole_float() {
        let mut value = sample();
        value["age"] = json!(31.0);
        let details: EmployeeDetails = serde_json::from_value(value).unwrap();
        assert!(details.validate().is_ok());
        assert_eq!(serde_json::to_value(&details).unwrap()["age"], json!(31.0));
    }

    #[test]
    fn bad_email_and_age_are_rejected() {
        let mut value = sample();
        value["email"] = json!("not-an-email");
        value["age"] = json!(-4);
        let details: EmployeeDetails = serde_json::from_value(value).unwrap();

        let errors = details.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("age"));
    }
}
