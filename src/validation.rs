//! Request validation for the station endpoints.
//!
//! Each write operation has one schema check that runs before any data
//! access. Creation collects every problem into [`FieldErrors`] so the client
//! sees all invalid fields at once; the status update and id checks fail fast
//! with a 400.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::stations::NewStation;

/// Body keys accepted by the status update. Exactly one must be present.
pub const STATUS_FIELDS: [&str; 2] = ["estado", "status"];

/// Field name mapped to every message raised against it.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Station fields that passed the type check. `None` means the field was
/// missing or mistyped, which is already recorded.
#[derive(Debug, Default, Validate)]
struct CreateStationFields {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    nombre: Option<String>,
    #[validate(length(min = 1, max = 10, message = "must be between 1 and 10 characters"))]
    idema: Option<String>,
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    provincia: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    x: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    y: Option<f64>,
    #[validate(range(min = -500, max = 9000, message = "must be between -500 and 9000"))]
    altitud: Option<i32>,
    estado: Option<i32>,
}

/// Validate a station creation body.
///
/// # Errors
///
/// Returns every missing, mistyped or out-of-range field.
pub fn validate_create_station(body: &Value) -> Result<NewStation, FieldErrors> {
    let mut errors = FieldErrors::default();

    let Some(map) = body.as_object() else {
        errors.add("body", "must be a JSON object");
        return Err(errors);
    };

    let fields = CreateStationFields {
        nombre: string_field(map, "nombre", &mut errors),
        idema: string_field(map, "idema", &mut errors),
        provincia: string_field(map, "provincia", &mut errors),
        x: number_field(map, "x", &mut errors),
        y: number_field(map, "y", &mut errors),
        altitud: integer_field(map, "altitud", &mut errors),
        estado: status_field(map, "estado", &mut errors),
    };

    if let Err(rule_errors) = fields.validate() {
        for (field, field_errors) in rule_errors.field_errors() {
            for e in field_errors {
                let message = e
                    .message
                    .as_ref()
                    .map_or_else(|| e.code.to_string(), ToString::to_string);
                errors.add(field.to_string(), message);
            }
        }
    }

    match fields {
        CreateStationFields {
            nombre: Some(name),
            idema: Some(idema),
            provincia: Some(province),
            x: Some(latitude),
            y: Some(longitude),
            altitud: Some(altitude),
            estado: Some(status),
        } if errors.is_empty() => Ok(NewStation {
            name,
            idema,
            province,
            latitude,
            longitude,
            altitude,
            status,
        }),
        _ => Err(errors),
    }
}

/// Validate a status update body and return the requested status (0 or 1).
///
/// # Errors
///
/// `AppError::BadRequest` if the body is not an object, carries any field
/// besides the status, or the status is not a boolean or 0/1.
pub fn validate_status_update(body: &Value) -> AppResult<i32> {
    let map = body
        .as_object()
        .ok_or_else(|| AppError::BadRequest("Request body must be a JSON object".to_string()))?;

    let unexpected: Vec<&str> = map
        .keys()
        .map(String::as_str)
        .filter(|key| !STATUS_FIELDS.contains(key))
        .collect();
    if !unexpected.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Unexpected field(s): {}. Only 'estado' may be sent",
            unexpected.join(", ")
        )));
    }

    let mut present = STATUS_FIELDS
        .iter()
        .filter_map(|field| map.get(*field).map(|value| (*field, value)));

    match (present.next(), present.next()) {
        (None, _) => Err(AppError::BadRequest("Missing field: estado".to_string())),
        (Some(_), Some(_)) => Err(AppError::BadRequest(
            "Send either 'estado' or 'status', not both".to_string(),
        )),
        (Some((field, value)), None) => parse_status(value).ok_or_else(|| {
            AppError::BadRequest(format!("{field} must be true, false, 0 or 1"))
        }),
    }
}

/// Parse a station id path segment.
///
/// # Errors
///
/// `AppError::BadRequest` unless the segment is a positive integer written
/// in plain digits, with no sign or leading zeros.
pub fn parse_station_id(raw: &str) -> AppResult<i32> {
    let canonical = !raw.is_empty()
        && !raw.starts_with('0')
        && raw.bytes().all(|b| b.is_ascii_digit());

    canonical
        .then(|| raw.parse::<i32>().ok())
        .flatten()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid station id '{raw}': expected a positive integer"
            ))
        })
}

/// Accepts `true`/`false` and the integers 0/1.
fn parse_status(value: &Value) -> Option<i32> {
    match value {
        Value::Bool(b) => Some(i32::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(0),
            Some(1) => Some(1),
            _ => None,
        },
        _ => None,
    }
}

fn string_field(map: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match map.get(field) {
        None | Some(Value::Null) => {
            errors.add(field, "is required");
            None
        }
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(_) => {
            errors.add(field, "must be a string");
            None
        }
    }
}

fn number_field(map: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<f64> {
    match map.get(field) {
        None | Some(Value::Null) => {
            errors.add(field, "is required");
            None
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(_) => {
            errors.add(field, "must be a number");
            None
        }
    }
}

fn integer_field(map: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<i32> {
    match map.get(field) {
        None | Some(Value::Null) => {
            errors.add(field, "is required");
            None
        }
        Some(Value::Number(n)) => {
            let parsed = n.as_i64().and_then(|v| i32::try_from(v).ok());
            if parsed.is_none() {
                errors.add(field, "must be an integer");
            }
            parsed
        }
        Some(_) => {
            errors.add(field, "must be an integer");
            None
        }
    }
}

fn status_field(map: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<i32> {
    match map.get(field) {
        None | Some(Value::Null) => {
            errors.add(field, "is required");
            None
        }
        Some(value) => {
            let parsed = parse_status(value);
            if parsed.is_none() {
                errors.add(field, "must be true, false, 0 or 1");
            }
            parsed
        }
    }
}
