//! Core type definitions for the sociogram

use crate::error::{SociogramError, SociogramResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Identifier of a rated/rating individual, always whitespace-trimmed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl AsRef<str>) -> Self {
        EntityId(id.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::new(s)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId::new(s)
    }
}

/// Category attribute carried by every entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Female,
    Male,
    #[default]
    Unknown,
}

impl Category {
    /// One-letter code (`F`, `M`, `U`)
    pub fn code(&self) -> &'static str {
        match self {
            Category::Female => "F",
            Category::Male => "M",
            Category::Unknown => "U",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    /// Anything that is not a recognised spelling is `Unknown`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "f" | "female" => Category::Female,
            "m" | "male" => Category::Male,
            _ => Category::Unknown,
        })
    }
}

/// Caller-supplied mapping from entity to category.
///
/// Entities missing from the lookup are `Category::Unknown`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryLookup {
    categories: HashMap<EntityId, Category>,
}

impl CategoryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<EntityId>, category: Category) -> Option<Category> {
        self.categories.insert(id.into(), category)
    }

    pub fn category_of(&self, id: &EntityId) -> Category {
        self.categories.get(id).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Parse a YAML mapping of `id: category`
    pub fn from_yaml_str(s: &str) -> SociogramResult<Self> {
        let raw: BTreeMap<String, String> = serde_yaml::from_str(s)?;
        Self::from_raw(raw)
    }

    /// Parse a JSON object of `"id": "category"`
    pub fn from_json_str(s: &str) -> SociogramResult<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(s)?;
        Self::from_raw(raw)
    }

    /// Load from a file; `.json` is read as JSON, anything else as YAML
    pub fn from_path(path: impl AsRef<Path>) -> SociogramResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_yaml_str(&contents),
        }
    }

    fn from_raw(raw: BTreeMap<String, String>) -> SociogramResult<Self> {
        Self::from_pairs(
            raw.into_iter()
                .map(|(id, category)| (id, category.parse::<Category>().unwrap_or_default())),
        )
    }

    /// Reject lookups that name the same trimmed id twice with different categories
    pub fn from_pairs<I, S>(pairs: I) -> SociogramResult<Self>
    where
        I: IntoIterator<Item = (S, Category)>,
        S: AsRef<str>,
    {
        let mut lookup = CategoryLookup::new();
        for (id, category) in pairs {
            let id = EntityId::new(id);
            if let Some(previous) = lookup.categories.insert(id.clone(), category) {
                if previous != category {
                    return Err(SociogramError::InvalidConfig(format!(
                        "entity {} listed as both {} and {}",
                        id, previous, category
                    )));
                }
            }
        }
        Ok(lookup)
    }
}

impl FromIterator<(EntityId, Category)> for CategoryLookup {
    fn from_iter<T: IntoIterator<Item = (EntityId, Category)>>(iter: T) -> Self {
        CategoryLookup {
            categories: iter.into_iter().collect(),
        }
    }
}
