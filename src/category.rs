use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::FridgeError;

/// Static ingredient filter buckets shown as tabs above the ingredient list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    All,
    Fruits,
    Vegetables,
    Dairy,
    Meat,
    Grains,
    Spices,
    Seafood,
}

impl Category {
    /// Every category, "All" first
    pub const ALL_CATEGORIES: [Category; 8] = [
        Category::All,
        Category::Fruits,
        Category::Vegetables,
        Category::Dairy,
        Category::Meat,
        Category::Grains,
        Category::Spices,
        Category::Seafood,
    ];

    /// Stable identifier, also used as the fetch context in ingredient ids
    pub fn id(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Fruits => "fruits",
            Category::Vegetables => "vegetables",
            Category::Dairy => "dairy",
            Category::Meat => "meat",
            Category::Grains => "grains",
            Category::Spices => "spices",
            Category::Seafood => "seafood",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Fruits => "Fruits",
            Category::Vegetables => "Vegetables",
            Category::Dairy => "Dairy",
            Category::Meat => "Meat",
            Category::Grains => "Grains",
            Category::Spices => "Spices",
            Category::Seafood => "Seafood",
        }
    }

    /// Query string sent to the ingredient search; `None` for "All"
    pub fn query(&self) -> Option<&'static str> {
        match self {
            Category::All => None,
            Category::Fruits => Some("fruit"),
            Category::Vegetables => Some("vegetable"),
            Category::Dairy => Some("dairy"),
            Category::Meat => Some("meat"),
            Category::Grains => Some("grain"),
            Category::Spices => Some("spice"),
            Category::Seafood => Some("fish"),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Category::All)
    }

    /// Categories the "All" view fans out over
    pub fn specific() -> impl Iterator<Item = Category> {
        Self::ALL_CATEGORIES.into_iter().filter(|c| !c.is_all())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = FridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL_CATEGORIES
            .into_iter()
            .find(|c| c.id() == wanted || c.name().to_lowercase() == wanted)
            .ok_or_else(|| FridgeError::InvalidInput(format!("Unknown category: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_has_no_query() {
        assert!(Category::All.query().is_none());
        assert!(Category::specific().all(|c| c.query().is_some()));
    }

    #[test]
    fn test_specific_excludes_all() {
        let specific: Vec<_> = Category::specific().collect();
        assert_eq!(specific.len(), Category::ALL_CATEGORIES.len() - 1);
        assert!(!specific.contains(&Category::All));
    }

    #[test]
    fn test_parse_by_id_or_name() {
        assert_eq!("fruits".parse::<Category>().unwrap(), Category::Fruits);
        assert_eq!("Seafood".parse::<Category>().unwrap(), Category::Seafood);
        assert!("candy".parse::<Category>().is_err());
    }

    #[test]
    fn test_serializes_as_id() {
        let json = serde_json::to_string(&Category::Vegetables).unwrap();
        assert_eq!(json, "\"vegetables\"");
    }
}
