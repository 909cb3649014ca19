use base64::{engine::general_purpose, Engine as _};
use log::warn;
use serde_json::{Map, Number, Value};
use validator::{Validate, ValidationError};
use crate::errors::AppError;

/// Largest decoded photo accepted when the photo is sent inline.
pub const MAX_PHOTO_BYTES: usize = 102_400;

/// Missing, null, `false`, zero and empty strings/arrays/objects all count as
/// absent.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

pub fn missing_fields(payload: &Map<String, Value>, fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .filter(|field| payload.get(**field).map_or(true, is_falsy))
        .map(|field| field.to_string())
        .collect()
}

pub fn require_fields(payload: &Map<String, Value>, fields: &[&str]) -> Result<(), AppError> {
    let missing = missing_fields(payload, fields);
    if missing.is_empty() {
        Ok(())
    } else {
        warn!("Rejected body, missing fields: {}", missing.join(", "));
        Err(AppError::MissingFields(missing))
    }
}

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(|err| {
        warn!("Rejected body, invalid fields: {}", err);
        AppError::InvalidFields(err.to_string())
    })
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let mut digits = 0;
    for c in phone.chars() {
        match c {
            '0'..='9' => digits += 1,
            '+' | '-' | '(' | ')' | ' ' => {}
            _ => return Err(ValidationError::new("phone_characters")),
        }
    }
    if !(7..=15).contains(&digits) {
        return Err(ValidationError::new("phone_length"));
    }
    Ok(())
}

/// Employment, education and project fields may be plain text or structured.
pub fn validate_composite(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(()),
        Value::Number(_) | Value::Array(_) | Value::Object(_) => Ok(()),
        _ => Err(ValidationError::new("composite_type")),
    }
}

/// Age must be a positive whole number; `30` and `30.0` are both accepted.
pub fn validate_age(age: &Number) -> Result<(), ValidationError> {
    match age.as_f64() {
        Some(value) if value > 0.0 && value.fract() == 0.0 => Ok(()),
        _ => Err(ValidationError::new("age_value")),
    }
}

/// A photo is either a reference (URL of any scheme, object key, path) or an
/// inline image blob. Inline blobs are base64, optionally wrapped in a
/// `data:` URI, and must decode to an image of at most [`MAX_PHOTO_BYTES`].
pub fn validate_photo(photo: &str) -> Result<(), ValidationError> {
    let photo = photo.trim();
    if photo.is_empty() {
        return Err(ValidationError::new("photo_empty"));
    }

    if let Some(rest) = photo.strip_prefix("data:") {
        let (_, encoded) = rest
            .split_once(";base64,")
            .ok_or_else(|| ValidationError::new("photo_encoding"))?;
        let bytes = general_purpose::STANDARD
            .decode(encoded)
            .map_err(|_| ValidationError::new("photo_encoding"))?;
        return check_inline_image(&bytes);
    }

    match general_purpose::STANDARD.decode(photo) {
        Ok(bytes) if is_image(&bytes) => check_inline_image(&bytes),
        _ => Ok(()),
    }
}

fn is_image(bytes: &[u8]) -> bool {
    infer::get(bytes).is_some_and(|kind| kind.mime_type().starts_with("image/"))
}

fn check_inline_image(bytes: &[u8]) -> Result<(), ValidationError> {
    if !is_image(bytes) {
        return Err(ValidationError::new("photo_type"));
    }
    if bytes.len() > MAX_PHOTO_BYTES {
        return Err(ValidationError::new("photo_size"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PNG_HEADER: [u8; 16] = [
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    ];

    #[test]
    fn falsy_values() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(is_falsy(&value), "{} should be falsy", value);
        }
        for value in [json!(true), json!(30), json!(" "), json!(["x"]), json!({"a": 1})] {
            assert!(!is_falsy(&value), "{} should not be falsy", value);
        }
    }

    #[test]
    fn reports_absent_and_empty_fields() {
        let payload = json!({"name": "A", "email": "", "age": 0});
        let missing = missing_fields(payload.as_object().unwrap(), &["name", "email", "age", "city"]);
        assert_eq!(missing, vec!["email", "age", "city"]);
    }

    #[test]
    fn phone_numbers() {
        assert!(validate_phone("+91 98450 12345").is_ok());
        assert!(validate_phone("(020) 555-0199").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call me").is_err());
    }

    #[test]
    fn composite_fields() {
        assert!(validate_composite(&json!("Acme")).is_ok());
        assert!(validate_composite(&json!(81.5)).is_ok());
        assert!(validate_composite(&json!([{"title": "Ledger"}])).is_ok());
        assert!(validate_composite(&json!(true)).is_err());
        assert!(validate_composite(&json!("   ")).is_err());
    }

    #[test]
    fn ages() {
        assert!(validate_age(&Number::from(30)).is_ok());
        assert!(validate_age(&Number::from_f64(30.0).unwrap()).is_ok());
        assert!(validate_age(&Number::from(130)).is_ok());
        assert!(validate_age(&Number::from_f64(30.5).unwrap()).is_err());
        assert!(validate_age(&Number::from(-3)).is_err());
    }

    #[test]
    fn photo_references() {
        assert!(validate_photo("https://cdn.example.com/a.png").is_ok());
        assert!(validate_photo("s3://bucket/photos/kiran.jpg").is_ok());
        assert!(validate_photo("photos/kiran.jpg").is_ok());
        assert!(validate_photo("   ").is_err());
    }

    #[test]
    fn inline_photos() {
        let encoded = general_purpose::STANDARD.encode(PNG_HEADER);
        assert!(validate_photo(&encoded).is_ok());
        assert!(validate_photo(&format!("data:image/png;base64,{}", encoded)).is_ok());

        let gif = general_purpose::STANDARD.encode(b"GIF89a\x01\x00\x01\x00\x80\x00\x00");
        assert!(validate_photo(&gif).is_ok());

        let text = general_purpose::STANDARD.encode(b"just some text, not an image");
        assert!(validate_photo(&format!("data:image/png;base64,{}", text)).is_err());
        assert!(validate_photo("data:image/png,rawbytes").is_err());
    }

    #[test]
    fn oversized_inline_photo() {
        let mut bytes = PNG_HEADER.to_vec();
        bytes.resize(MAX_PHOTO_BYTES + 1, 0);
        let encoded = general_purpose::STANDARD.encode(bytes);
        assert!(validate_photo(&encoded).is_err());
    }
}
