use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// Portfolio fields as submitted by the builder UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioData {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub about: String,
}

/// A saved portfolio. The identifier is the key it is stored under, not a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPortfolio {
    #[serde(flatten)]
    pub data: PortfolioData,
    pub created_at: NaiveDateTime,
}

/// Builds the storage key: the submitted name followed by a second-resolution timestamp.
pub fn portfolio_id(name: &str, at: NaiveDateTime) -> String {
    format!("{}_{}", name, at.format("%Y%m%d%H%M%S"))
}
