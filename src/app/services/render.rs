//! The contract between the engine and the skins.
//!
//! A skin is a stateless function of a [`MenuView`]. The view is built from
//! the current document snapshot and the customization state, with every
//! list already split into columns through [`super::columns`], so no skin
//! recomputes the split point on its own.

use std::fmt::Write as _;

use crate::app::controllers::customization::CustomizationState;
use crate::app::domain::customization::{Customization, TemplateId};
use crate::app::domain::menu::{Category, Item, MenuDocument, RestaurantInfo};
use crate::app::services::coerce::format_price;
use crate::app::services::columns::column_bounds;

#[derive(Debug, Clone)]
pub struct ItemView<'a> {
    pub item: &'a Item,
    pub canonical_index: usize,
    pub column: usize,
    pub visual_index: usize,
}

#[derive(Debug, Clone)]
pub struct CategoryView<'a> {
    pub category: &'a Category,
    pub canonical_index: usize,
    pub column: usize,
    pub visual_index: usize,
    pub item_columns: Vec<Vec<ItemView<'a>>>,
}

impl CategoryView<'_> {
    pub fn is_empty(&self) -> bool {
        self.category.items.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct MenuView<'a> {
    pub title: &'a str,
    pub restaurant: &'a RestaurantInfo,
    pub template: TemplateId,
    pub customization: &'a Customization,
    /// Edit affordances (drag handles, add/delete buttons) are shown.
    pub show_edit_controls: bool,
    pub category_columns: Vec<Vec<CategoryView<'a>>>,
}

impl<'a> MenuView<'a> {
    pub fn build(doc: &'a MenuDocument, state: &'a CustomizationState) -> Self {
        let layout = state.layout();
        let category_columns = column_bounds(doc.categories.len(), layout.category_columns)
            .into_iter()
            .enumerate()
            .map(|(column, range)| {
                let start = range.start;
                doc.categories[range]
                    .iter()
                    .enumerate()
                    .map(|(visual_index, category)| CategoryView {
                        category,
                        canonical_index: start + visual_index,
                        column,
                        visual_index,
                        item_columns: project_items(&category.items, layout.item_columns),
                    })
                    .collect()
            })
            .collect();

        Self {
            title: &doc.name,
            restaurant: &doc.restaurant_info,
            template: state.template,
            customization: &state.customization,
            show_edit_controls: !state.is_preview_mode(),
            category_columns,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category_columns.iter().all(Vec::is_empty)
    }

    /// Categories in canonical order regardless of columns.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryView<'a>> {
        self.category_columns.iter().flatten()
    }
}

fn project_items(items: &[Item], columns: usize) -> Vec<Vec<ItemView<'_>>> {
    column_bounds(items.len(), columns)
        .into_iter()
        .enumerate()
        .map(|(column, range)| {
            let start = range.start;
            items[range]
                .iter()
                .enumerate()
                .map(|(visual_index, item)| ItemView {
                    item,
                    canonical_index: start + visual_index,
                    column,
                    visual_index,
                })
                .collect()
        })
        .collect()
}

pub trait TemplateRenderer {
    type Output;

    fn render(&self, view: &MenuView<'_>) -> Self::Output;
}

/// Plain-text outline of a menu. Reference skin for tests and logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct OutlineRenderer;

impl TemplateRenderer for OutlineRenderer {
    type Output = String;

    fn render(&self, view: &MenuView<'_>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {} ==", view.title);
        if !view.restaurant.name.is_empty() {
            let _ = writeln!(out, "{}", view.restaurant.name);
        }
        if view.is_empty() {
            out.push_str("(no categories yet)\n");
            return out;
        }

        let multi_column = view.category_columns.len() > 1;
        for (column, categories) in view.category_columns.iter().enumerate() {
            if multi_column {
                let _ = writeln!(out, "[column {}]", column + 1);
            }
            for category in categories {
                render_category(&mut out, category, view.show_edit_controls);
            }
        }
        out
    }
}

fn render_category(out: &mut String, view: &CategoryView<'_>, edit_controls: bool) {
    let category = view.category;
    let marker = if category.is_special { " *special*" } else { "" };
    let handle = if edit_controls { "::" } else { "" };
    let _ = writeln!(out, "{handle}# {}{marker}", category.name);
    if !category.description.is_empty() {
        let _ = writeln!(out, "  {}", category.description);
    }
    if view.is_empty() {
        out.push_str("  (no items)\n");
        return;
    }
    for item in view.item_columns.iter().flatten() {
        render_item(out, item.item);
    }
}

fn render_item(out: &mut String, item: &Item) {
    let price = match item.price {
        Some(price) => format!(" {}{}", item.currency, format_price(price)),
        None => String::new(),
    };
    let mut flags: Vec<&str> = item.dietary_info.iter().map(|t| t.as_str()).collect();
    if item.is_featured {
        flags.insert(0, "featured");
    }
    if !item.is_available {
        flags.push("sold out");
    }
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    };
    let _ = writeln!(out, "  - {}{price}{flags}", item.name);
    if let Some(description) = &item.description {
        let _ = writeln!(out, "    {description}");
    }
}
