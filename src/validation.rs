//! Product input schema.
//!
//! Turns an untyped JSON body into typed product fields, collecting every field-level
//! violation before giving up. `id` and unknown keys are dropped without complaint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::product::{NewProduct, ProductChanges};

const MISSING: &str = "Missing data for required field.";
const NULL: &str = "Field may not be null.";
const INVALID_INPUT: &str = "Invalid input type.";
const INVALID_STRING: &str = "Not a valid string.";
const INVALID_NUMBER: &str = "Not a valid number.";
const INVALID_INTEGER: &str = "Not a valid integer.";
const SPECIAL_NUMBER: &str = "Special numeric values (nan or infinity) are not permitted.";
const NAME_TOO_SHORT: &str = "Shorter than minimum length 1.";

/// Key used for problems with the body as a whole rather than a single field.
pub const SCHEMA_KEY: &str = "_schema";

/// Field name -> human readable violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// A single body-level error.
    pub fn schema(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(SCHEMA_KEY, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    #[cfg(test)]
    pub(crate) fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Stateless product schema; one value is shared by every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductSchema;

impl ProductSchema {
    /// Full validation used on create: `name`, `price` and `quantity` must be present.
    pub fn load_new(&self, input: &Value) -> Result<NewProduct, FieldErrors> {
        let map = as_object(input)?;
        let mut errors = FieldErrors::default();

        let name = read(map, "name", true, &mut errors, parse_name);
        let description = read(map, "description", false, &mut errors, parse_string);
        let price = read(map, "price", true, &mut errors, parse_float);
        let quantity = read(map, "quantity", true, &mut errors, parse_integer);

        match (name, price, quantity) {
            (Some(name), Some(price), Some(quantity)) if errors.is_empty() => Ok(NewProduct {
                name,
                description,
                price,
                quantity,
            }),
            _ => Err(errors),
        }
    }

    /// Partial validation used on update: every field is optional, but whatever is
    /// supplied must still be valid.
    pub fn load_partial(&self, input: &Value) -> Result<ProductChanges, FieldErrors> {
        let map = as_object(input)?;
        let mut errors = FieldErrors::default();

        let changes = ProductChanges {
            name: read(map, "name", false, &mut errors, parse_name),
            description: read(map, "description", false, &mut errors, parse_string),
            price: read(map, "price", false, &mut errors, parse_float),
            quantity: read(map, "quantity", false, &mut errors, parse_integer),
        };

        if errors.is_empty() {
            Ok(changes)
        } else {
            Err(errors)
        }
    }
}

fn as_object(input: &Value) -> Result<&Map<String, Value>, FieldErrors> {
    input
        .as_object()
        .ok_or_else(|| FieldErrors::schema(INVALID_INPUT))
}

fn read<T>(
    map: &Map<String, Value>,
    field: &str,
    required: bool,
    errors: &mut FieldErrors,
    parse: fn(&Value) -> Result<T, &'static str>,
) -> Option<T> {
    match map.get(field) {
        None => {
            if required {
                errors.add(field, MISSING);
            }
            None
        }
        Some(Value::Null) => {
            errors.add(field, NULL);
            None
        }
        Some(value) => parse(value)
            .map_err(|message| errors.add(field, message))
            .ok(),
    }
}

fn parse_string(value: &Value) -> Result<String, &'static str> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(INVALID_STRING)
}

fn parse_name(value: &Value) -> Result<String, &'static str> {
    let name = parse_string(value)?;
    if name.is_empty() {
        return Err(NAME_TOO_SHORT);
    }
    Ok(name)
}

fn parse_float(value: &Value) -> Result<f64, &'static str> {
    let number = match value {
        Value::Number(n) => n.as_f64().ok_or(INVALID_NUMBER)?,
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| INVALID_NUMBER)?,
        _ => return Err(INVALID_NUMBER),
    };

    if !number.is_finite() {
        return Err(SPECIAL_NUMBER);
    }
    Ok(number)
}

fn parse_integer(value: &Value) -> Result<i64, &'static str> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(f as i64)
                }
                _ => Err(INVALID_INTEGER),
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| INVALID_INTEGER),
        _ => Err(INVALID_INTEGER),
    }
}
