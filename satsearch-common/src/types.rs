use serde::{Deserialize, Deserializer, Serialize};

/// Object type classification as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObjectType {
    Payload,
    RocketBody,
    Debris,
    Unknown,
    /// Any value outside the four known classes, kept verbatim
    Other(String),
}

impl ObjectType {
    pub const KNOWN: [ObjectType; 4] = [
        ObjectType::Payload,
        ObjectType::RocketBody,
        ObjectType::Debris,
        ObjectType::Unknown,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Payload => "PAYLOAD",
            ObjectType::RocketBody => "ROCKET BODY",
            ObjectType::Debris => "DEBRIS",
            ObjectType::Unknown => "UNKNOWN",
            ObjectType::Other(value) => value,
        }
    }

    /// Human readable label used by the object type dropdown
    pub fn label(&self) -> &str {
        match self {
            ObjectType::Payload => "Payload",
            ObjectType::RocketBody => "Rocket Body",
            ObjectType::Debris => "Debris",
            ObjectType::Unknown => "Unknown",
            ObjectType::Other(value) => value,
        }
    }
}

impl From<String> for ObjectType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PAYLOAD" => ObjectType::Payload,
            "ROCKET BODY" => ObjectType::RocketBody,
            "DEBRIS" => ObjectType::Debris,
            "UNKNOWN" => ObjectType::Unknown,
            _ => ObjectType::Other(value),
        }
    }
}

impl From<&str> for ObjectType {
    fn from(value: &str) -> Self {
        ObjectType::from(value.to_string())
    }
}

impl From<ObjectType> for String {
    fn from(value: ObjectType) -> Self {
        match value {
            ObjectType::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// NORAD catalog identifier, always handled in its textual form.
///
/// The upstream feed sends it either as a JSON number or as a string.
/// Integral floats such as `25544.0` are written without the fraction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawCatalogId")]
pub struct CatalogId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCatalogId {
    Number(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl From<RawCatalogId> for CatalogId {
    fn from(raw: RawCatalogId) -> Self {
        match raw {
            RawCatalogId::Number(n) => CatalogId(n.to_string()),
            RawCatalogId::Signed(n) => CatalogId(n.to_string()),
            // f64 Display already drops a zero fraction: 25544.0 -> "25544"
            RawCatalogId::Float(n) => CatalogId(n.to_string()),
            RawCatalogId::Text(s) => CatalogId(s),
        }
    }
}

impl CatalogId {
    pub fn new(id: impl Into<String>) -> Self {
        CatalogId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CatalogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One tracked space object as delivered by the catalog endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SatelliteRecord {
    pub name: String,

    /// Unique within a collection, used as the row identity
    pub norad_cat_id: CatalogId,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub intl_des: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub launch_date: String,

    #[serde(default)]
    pub decay_date: Option<String>,

    pub object_type: ObjectType,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub country_code: String,

    /// Orbit regime code (e.g. "LEO"); most feeds omit it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit_code: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl SatelliteRecord {
    pub fn new(
        name: impl Into<String>,
        norad_cat_id: impl Into<String>,
        object_type: ObjectType,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            norad_cat_id: CatalogId::new(norad_cat_id),
            intl_des: String::new(),
            launch_date: String::new(),
            decay_date: None,
            object_type,
            country_code: country_code.into(),
            orbit_code: None,
        }
    }

    pub fn with_orbit(mut self, orbit_code: impl Into<String>) -> Self {
        self.orbit_code = Some(orbit_code.into());
        self
    }
}

/// Active dropdown selections. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    pub country: Option<String>,
    pub orbit: Option<String>,
    pub object_type: Option<ObjectType>,
}

impl FilterSelection {
    /// Build a selection from raw form values, where an empty string is "All"
    pub fn from_form(country: &str, orbit: &str, object_type: &str) -> Self {
        Self {
            country: non_empty(country),
            orbit: non_empty(orbit),
            object_type: non_empty(object_type).map(ObjectType::from),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.country.is_none() && self.orbit.is_none() && self.object_type.is_none()
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// A single entry of a filter dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub const COUNTRY_OPTIONS: &[FilterOption] = &[
    FilterOption { value: "US", label: "United States" },
    FilterOption { value: "PRC", label: "China" },
];

pub const ORBIT_OPTIONS: &[FilterOption] = &[
    FilterOption { value: "LEO", label: "Low Earth Orbit (LEO)" },
];
