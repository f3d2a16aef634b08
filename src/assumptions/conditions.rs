//! Health condition catalog used by underwriting

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{QuoteError, Result};

fn default_multiplier() -> f64 {
    1.0
}

/// A selectable health condition and its rating effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: String,

    pub label: String,

    /// Category id this condition is listed under
    pub category: String,

    /// Rate-class steps lost when this condition is present
    #[serde(default)]
    pub class_drop: u32,

    /// Forces a substandard (table) outcome; shown to agents as "refer"
    #[serde(default)]
    pub exclude: bool,

    /// Premium multiplier applied on top of the class result
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

/// Display grouping for conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionCategory {
    pub id: String,
    pub label: String,
}

/// On-disk shape of the catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CatalogFile {
    #[serde(default)]
    pub categories: Vec<ConditionCategory>,
    pub items: Vec<Condition>,
}

/// Immutable catalog of conditions, looked up by id
#[derive(Debug, Clone)]
pub struct ConditionCatalog {
    categories: Vec<ConditionCategory>,
    items: Vec<Condition>,
    index: HashMap<String, usize>,
}

impl ConditionCatalog {
    pub fn new(categories: Vec<ConditionCategory>, items: Vec<Condition>) -> Self {
        let index = items
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        Self {
            categories,
            items,
            index,
        }
    }

    pub(crate) fn from_file(file: CatalogFile) -> Self {
        Self::new(file.categories, file.items)
    }

    pub fn get(&self, id: &str) -> Option<&Condition> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    /// Resolve selected ids to condition records, in the order given
    pub fn resolve<'a, I>(&self, ids: I) -> Result<Vec<Condition>>
    where
        I: IntoIterator<Item = &'a String>,
    {
        ids.into_iter()
            .map(|id| {
                self.get(id)
                    .cloned()
                    .ok_or_else(|| QuoteError::UnknownCondition(id.clone()))
            })
            .collect()
    }

    pub fn categories(&self) -> &[ConditionCategory] {
        &self.categories
    }

    pub fn items(&self) -> &[Condition] {
        &self.items
    }

    /// Conditions listed under a category, in catalog order
    pub fn in_category<'a>(&'a self, category_id: &'a str) -> impl Iterator<Item = &'a Condition> + 'a {
        self.items.iter().filter(move |c| c.category == category_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn catalog() -> ConditionCatalog {
        let json = r#"{
            "categories": [{ "id": "cardio", "label": "Heart" }],
            "items": [
                { "id": "htn", "label": "Hypertension", "category": "cardio", "class_drop": 1, "multiplier": 1.05 },
                { "id": "chf", "label": "Heart failure", "category": "cardio", "exclude": true },
                { "id": "gerd", "label": "Reflux", "category": "digestive" }
            ]
        }"#;
        let file: CatalogFile = serde_json::from_str(json).unwrap();
        ConditionCatalog::from_file(file)
    }

    #[test]
    fn test_defaults_applied() {
        let catalog = catalog();
        let chf = catalog.get("chf").unwrap();
        assert!(chf.exclude);
        assert_eq!(chf.class_drop, 0);
        assert_eq!(chf.multiplier, 1.0);
        assert!(chf.tooltip.is_none());
    }

    #[test]
    fn test_resolve() {
        let catalog = catalog();
        let ids: BTreeSet<String> = ["htn", "gerd"].iter().map(|s| s.to_string()).collect();
        let resolved = catalog.resolve(&ids).unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].id, "gerd");

        let missing: BTreeSet<String> = ["nope".to_string()].into_iter().collect();
        match catalog.resolve(&missing) {
            Err(QuoteError::UnknownCondition(id)) => assert_eq!(id, "nope"),
            other => panic!("expected unknown condition, got {:?}", other),
        }
    }

    #[test]
    fn test_in_category() {
        let catalog = catalog();
        let cardio: Vec<_> = catalog.in_category("cardio").map(|c| c.id.as_str()).collect();
        assert_eq!(cardio, vec!["htn", "chf"]);
        assert_eq!(catalog.len(), 3);
    }
}
