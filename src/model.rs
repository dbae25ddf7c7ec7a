//! # Pokemon Records
//!
//! The single entity served by the API, plus the partial record accepted on
//! create and update.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::api::ApiError;

/// Default sprite URL for records created without an image
pub const DEFAULT_IMAGE: &str = "";

/// Default pokedex number
pub const DEFAULT_POKEDEX_NUMBER: i64 = 0;

/// Default level
pub const DEFAULT_LEVEL: i64 = 1;

/// Default hit points
pub const DEFAULT_HP: i64 = 100;

/// A stored Pokemon record
///
/// `id` is assigned once at creation and is the only lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pokemon {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub image: String,
    pub pokedex_number: i64,
    pub level: i64,
    pub hp: i64,
}

/// The mutable fields of a record, as supplied by a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonFields {
    pub name: String,
    pub kind: String,
    pub image: Option<String>,
    pub pokedex_number: Option<i64>,
    pub level: Option<i64>,
    pub hp: Option<i64>,
}

impl PokemonFields {
    /// Fields with only the required attributes set
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            image: None,
            pokedex_number: None,
            level: None,
            hp: None,
        }
    }

    /// Parse a JSON request body.
    ///
    /// `name` and `type` must be present strings. Numeric attributes accept
    /// integers, integral floats and integer strings (form inputs send `"25"`);
    /// `null` and blank strings count as absent. Unknown keys are ignored.
    pub fn from_json(body: &str) -> Result<Self, ApiError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

        let obj = value
            .as_object()
            .ok_or_else(|| ApiError::InvalidBody("expected a JSON object".to_string()))?;

        let required = |key: &'static str| {
            obj.get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or(ApiError::MissingField(key))
        };

        Ok(Self {
            name: required("name")?,
            kind: required("type")?,
            image: obj.get("image").and_then(Value::as_str).map(str::to_string),
            pokedex_number: optional_int(obj, "pokedexNumber")?,
            level: optional_int(obj, "level")?,
            hp: optional_int(obj, "hp")?,
        })
    }

    /// Build the full record stored under `id`, filling defaults
    pub fn into_record(self, id: impl Into<String>) -> Pokemon {
        Pokemon {
            id: id.into(),
            name: self.name,
            kind: self.kind,
            image: self.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            pokedex_number: self.pokedex_number.unwrap_or(DEFAULT_POKEDEX_NUMBER),
            level: self.level.unwrap_or(DEFAULT_LEVEL),
            hp: self.hp.unwrap_or(DEFAULT_HP),
        }
    }

    /// Build a record under a freshly generated identifier
    pub fn into_new_record(self) -> Pokemon {
        self.into_record(Uuid::new_v4().to_string())
    }
}

fn optional_int(obj: &Map<String, Value>, key: &str) -> Result<Option<i64>, ApiError> {
    let invalid = || ApiError::InvalidBody(format!("{} must be an integer", key));

    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => Ok(Some(i)),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| Some(f as i64))
                .ok_or_else(invalid),
        },
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse().map(Some).map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}
