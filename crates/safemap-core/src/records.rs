//! Domain records and their schema validation.
//!
//! Payloads arrive as untyped JSON with Portuguese keys (`nome`, `endereco`,
//! `tipo`, ...). Each record type parses itself from a [`serde_json::Value`]
//! and rejects anything that cannot be rendered safely, so downstream code
//! never sees a half-formed record.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::ValidationError;

/// A record type that can be parsed out of one element of a JSON array.
pub trait Record: Sized {
    /// Dataset name used in validation messages.
    const DATASET: &'static str;

    /// Parses the element at `index` of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRecord`] when the element does not
    /// match the record schema.
    fn from_value(index: usize, value: &Value) -> Result<Self, ValidationError>;
}

/// Parses a JSON payload that must be an array of `R`.
///
/// # Errors
///
/// Returns [`ValidationError::NotACollection`] when the payload is not an
/// array, or the first [`ValidationError::InvalidRecord`] encountered.
pub fn parse_collection<R: Record>(payload: &Value) -> Result<Vec<R>, ValidationError> {
    let items = payload
        .as_array()
        .ok_or(ValidationError::NotACollection {
            dataset: R::DATASET,
            found: json_kind(payload),
        })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| R::from_value(index, item))
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn invalid(dataset: &'static str, index: usize, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidRecord {
        dataset,
        index,
        reason: reason.into(),
    }
}

/// Trims a required text field, rejecting blank values.
fn required_text(
    dataset: &'static str,
    index: usize,
    field: &str,
    raw: String,
) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid(dataset, index, format!("`{field}` must not be blank")));
    }
    Ok(trimmed.to_string())
}

fn optional_text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// Classification of a location, used for marker icons and filtering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    /// Police station (`"delegacia"`).
    Station,
    /// Support center (`"centro"`).
    Center,
    /// Any other value; rendered with the default icon.
    Other(String),
}

impl Category {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Category::Station => "delegacia",
            Category::Center => "centro",
            Category::Other(raw) => raw,
        }
    }
}

impl From<&str> for Category {
    fn from(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "delegacia" | "station" => Category::Station,
            "centro" | "center" => Category::Center,
            _ => Category::Other(raw.trim().to_string()),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Builds coordinates, rejecting non-finite or out-of-range values.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Self { lat, lng })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRecord {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "tipo")]
    pub category: Category,
    #[serde(flatten)]
    pub coordinates: Coordinates,
    #[serde(rename = "telefone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(
        rename = "horarioFuncionamento",
        skip_serializing_if = "Option::is_none"
    )]
    pub hours: Option<String>,
    #[serde(rename = "cidade", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LocationWire {
    nome: String,
    endereco: String,
    #[serde(default)]
    tipo: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    #[serde(default)]
    telefone: Option<String>,
    #[serde(default, rename = "horarioFuncionamento")]
    horario_funcionamento: Option<String>,
    #[serde(default)]
    cidade: Option<String>,
}

impl Record for LocationRecord {
    const DATASET: &'static str = "locations";

    fn from_value(index: usize, value: &Value) -> Result<Self, ValidationError> {
        let wire = LocationWire::deserialize(value)
            .map_err(|e| invalid(Self::DATASET, index, e.to_string()))?;

        let (Some(lat), Some(lng)) = (wire.lat, wire.lng) else {
            return Err(invalid(Self::DATASET, index, "`lat` and `lng` are required"));
        };
        let coordinates = Coordinates::new(lat, lng).ok_or_else(|| {
            invalid(
                Self::DATASET,
                index,
                format!("coordinates out of range: ({lat}, {lng})"),
            )
        })?;

        Ok(Self {
            name: required_text(Self::DATASET, index, "nome", wire.nome)?,
            address: required_text(Self::DATASET, index, "endereco", wire.endereco)?,
            category: wire
                .tipo
                .as_deref()
                .map_or_else(|| Category::Other(String::new()), Category::from),
            coordinates,
            phone: optional_text(wire.telefone),
            hours: optional_text(wire.horario_funcionamento),
            city: optional_text(wire.cidade),
        })
    }
}

// ---------------------------------------------------------------------------
// Contacts and tips
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "descricao")]
    pub description: String,
}

impl ContactRecord {
    /// Text handed to the share action: `"<name>: <phone> - <description>"`.
    #[must_use]
    pub fn share_text(&self) -> String {
        format!("{}: {} - {}", self.name, self.phone, self.description)
    }
}

impl Record for ContactRecord {
    const DATASET: &'static str = "contacts";

    fn from_value(index: usize, value: &Value) -> Result<Self, ValidationError> {
        let wire = ContactRecord::deserialize(value)
            .map_err(|e| invalid(Self::DATASET, index, e.to_string()))?;
        Ok(Self {
            name: required_text(Self::DATASET, index, "nome", wire.name)?,
            phone: required_text(Self::DATASET, index, "telefone", wire.phone)?,
            description: required_text(Self::DATASET, index, "descricao", wire.description)?,
        })
    }
}

/// A safety tip; plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TipRecord(pub String);

impl TipRecord {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.0
    }
}

impl Record for TipRecord {
    const DATASET: &'static str = "tips";

    fn from_value(index: usize, value: &Value) -> Result<Self, ValidationError> {
        let Some(text) = value.as_str() else {
            return Err(invalid(
                Self::DATASET,
                index,
                format!("expected a string, got {}", json_kind(value)),
            ));
        };
        required_text(Self::DATASET, index, "dica", text.to_string()).map(TipRecord)
    }
}

/// A nearby safe place returned by the safe-location lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeSpot {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "distancia")]
    pub distance: String,
}

#[cfg(test)]
#[path = "records_test.rs"]
mod tests;
