//! The menu aggregate: categories in canonical order, each owning its items.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ids::{CategoryId, ItemId};
use crate::app::infrastructure::error::{EditorError, Result};
use crate::app::services::coerce::coerce_price;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryTag {
    Vegan,
    Vegetarian,
    GlutenFree,
    Spicy,
}

impl DietaryTag {
    pub const ALL: [DietaryTag; 4] = [
        DietaryTag::Vegan,
        DietaryTag::Vegetarian,
        DietaryTag::GlutenFree,
        DietaryTag::Spicy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryTag::Vegan => "vegan",
            DietaryTag::Vegetarian => "vegetarian",
            DietaryTag::GlutenFree => "gluten-free",
            DietaryTag::Spicy => "spicy",
        }
    }

    pub fn parse(s: &str) -> Option<DietaryTag> {
        match s {
            "vegan" => Some(DietaryTag::Vegan),
            "vegetarian" => Some(DietaryTag::Vegetarian),
            "gluten-free" => Some(DietaryTag::GlutenFree),
            "spicy" => Some(DietaryTag::Spicy),
            _ => None,
        }
    }
}

/// Contact block shown by skins. The engine never interprets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `None` means the price has not been set yet.
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: String,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub dietary_info: BTreeSet<DietaryTag>,
}

impl Item {
    pub fn new(id: ItemId, name: &str, currency: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: None,
            price: None,
            currency: currency.to_string(),
            is_available: true,
            is_featured: false,
            dietary_info: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_special: bool,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Category {
    pub fn new(id: CategoryId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: String::new(),
            is_special: false,
            items: Vec::new(),
        }
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub fn item_index(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|i| &i.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Aggregate root. Category order and per-category item order are canonical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDocument {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub restaurant_info: RestaurantInfo,
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Palette, font and layout hints forwarded to skins untouched.
    #[serde(default)]
    pub design_settings: Map<String, Value>,
}

impl MenuDocument {
    pub fn empty(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            restaurant_info: RestaurantInfo::default(),
            categories: Vec::new(),
            design_settings: Map::new(),
        }
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn category_index(&self, id: &CategoryId) -> Option<usize> {
        self.categories.iter().position(|c| &c.id == id)
    }

    pub fn item(&self, category_id: &CategoryId, item_id: &ItemId) -> Option<&Item> {
        self.category(category_id)?.item(item_id)
    }

    /// Find the category currently owning `item_id`.
    pub fn locate_item(&self, item_id: &ItemId) -> Option<(&Category, usize)> {
        self.categories
            .iter()
            .find_map(|c| c.item_index(item_id).map(|idx| (c, idx)))
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Plain nested structure for a persistence collaborator.
    pub fn to_json_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut doc: MenuDocument = serde_json::from_str(json)?;
        doc.check_unique_ids()?;
        for item in doc.categories.iter_mut().flat_map(|c| c.items.iter_mut()) {
            item.price = item.price.map(coerce_price);
        }
        Ok(doc)
    }

    fn check_unique_ids(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.id.as_str()) {
                return Err(EditorError::Document(format!(
                    "duplicate category id '{}'",
                    category.id
                )));
            }
        }
        let mut seen_items = std::collections::HashSet::new();
        for item in self.categories.iter().flat_map(|c| c.items.iter()) {
            if !seen_items.insert(item.id.as_str()) {
                return Err(EditorError::Document(format!("duplicate item id '{}'", item.id)));
            }
        }
        Ok(())
    }
}

/// Remove the element at `from` and re-insert it at `to`, where `to` is an
/// index into the list as it looks after the removal.
///
/// Returns `false` (list untouched) when `from == to` or either index is out
/// of range.
pub fn move_within<T>(list: &mut Vec<T>, from: usize, to: usize) -> bool {
    let len = list.len();
    if from == to || from >= len || to >= len {
        return false;
    }
    let element = list.remove(from);
    list.insert(to, element);
    true
}

fn default_true() -> bool {
    true
}
