//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Identity generation and typed ids
//! - The menu document aggregate and its patches
//! - Skin catalogue and customization records
//! - Event types raised by skins

pub mod customization;
pub mod ids;
pub mod menu;
pub mod messages;
pub mod patch;
pub mod seed;

pub use customization::{ColumnLayout, Customization, CustomizationPatch, EditorMode, FontFamily, TemplateId};
pub use ids::{CategoryId, IdGenerator, ItemId};
pub use menu::{Category, DietaryTag, Item, MenuDocument, RestaurantInfo};
pub use messages::{DropList, DropLocation, EditorEvent, FieldTarget};
pub use patch::{CategoryPatch, ItemDraft, ItemPatch};
