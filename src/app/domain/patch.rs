//! Closed sets of field updates for each entity type.
//!
//! An update is a list of patches applied in order. Only the fields named
//! here can change; ids and ordering are never patchable.

use std::collections::BTreeSet;

use tracing::debug;

use super::ids::ItemId;
use super::menu::{Category, DietaryTag, Item};
use crate::app::services::coerce::{coerce_price, normalize_description, normalize_name};

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryPatch {
    Name(String),
    Description(String),
    Special(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemPatch {
    Name(String),
    /// `None` or blank text clears the description.
    Description(Option<String>),
    /// `None` clears the price. Non-finite or negative values store as `0`.
    Price(Option<f64>),
    Currency(String),
    Available(bool),
    Featured(bool),
    Dietary(BTreeSet<DietaryTag>),
    ToggleDietary(DietaryTag),
}

/// Fields for a new item. Anything left out gets a placeholder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub is_available: Option<bool>,
    pub is_featured: bool,
    pub dietary_info: BTreeSet<DietaryTag>,
}

impl ItemDraft {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn into_item(self, id: ItemId, placeholder_name: &str, default_currency: &str) -> Item {
        let name = self
            .name
            .as_deref()
            .and_then(normalize_name)
            .unwrap_or_else(|| placeholder_name.to_string());
        Item {
            id,
            name,
            description: self.description.as_deref().and_then(normalize_description),
            price: self.price.map(coerce_price),
            currency: self.currency.unwrap_or_else(|| default_currency.to_string()),
            is_available: self.is_available.unwrap_or(true),
            is_featured: self.is_featured,
            dietary_info: self.dietary_info,
        }
    }
}

/// Apply patches to a category. Returns whether any field actually changed.
pub fn apply_category_patches(category: &mut Category, patches: &[CategoryPatch]) -> bool {
    let mut changed = false;
    for patch in patches {
        match patch {
            CategoryPatch::Name(name) => match normalize_name(name) {
                Some(name) if name != category.name => {
                    category.name = name;
                    changed = true;
                }
                Some(_) => {}
                None => {
                    debug!(category_id = %category.id, "Rejected empty category name, keeping previous");
                }
            },
            CategoryPatch::Description(text) => {
                let text = text.trim();
                if text != category.description {
                    category.description = text.to_string();
                    changed = true;
                }
            }
            CategoryPatch::Special(flag) => {
                if category.is_special != *flag {
                    category.is_special = *flag;
                    changed = true;
                }
            }
        }
    }
    changed
}

/// Apply patches to an item. Returns whether any field actually changed.
pub fn apply_item_patches(item: &mut Item, patches: &[ItemPatch]) -> bool {
    let before = item.clone();
    for patch in patches {
        match patch {
            ItemPatch::Name(name) => match normalize_name(name) {
                Some(name) => item.name = name,
                None => {
                    debug!(item_id = %item.id, "Rejected empty item name, keeping previous");
                }
            },
            ItemPatch::Description(text) => {
                item.description = text.as_deref().and_then(normalize_description);
            }
            ItemPatch::Price(price) => item.price = price.map(coerce_price),
            ItemPatch::Currency(currency) => item.currency = currency.trim().to_string(),
            ItemPatch::Available(flag) => item.is_available = *flag,
            ItemPatch::Featured(flag) => item.is_featured = *flag,
            ItemPatch::Dietary(tags) => item.dietary_info = tags.clone(),
            ItemPatch::ToggleDietary(tag) => {
                if !item.dietary_info.remove(tag) {
                    item.dietary_info.insert(*tag);
                }
            }
        }
    }
    *item != before
}
