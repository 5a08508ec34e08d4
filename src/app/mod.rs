//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (MenuDocument, ids, patches, templates, events)
//! - `controllers/` - Orchestration (DocumentStore, ReorderController, EditSession, CustomizationStore)
//! - `services/` - Pure operations (column projection, coercion, rendering contract)
//! - `infrastructure/` - Host integrations (config file, collaborators, error)
//! - `state.rs` - Main editor coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::customization::{CustomizationState, CustomizationStore};
pub use controllers::document::DocumentStore;
pub use controllers::edit::{CommitOutcome, EditSession, FieldState};
pub use controllers::reorder::{CancelReason, DragPhase, DropOutcome, ReorderController};
pub use domain::{
    Category, CategoryId, CategoryPatch, ColumnLayout, Customization, CustomizationPatch, DietaryTag, DropList,
    DropLocation, EditorEvent, EditorMode, FieldTarget, FontFamily, IdGenerator, Item, ItemDraft, ItemId, ItemPatch,
    MenuDocument, RestaurantInfo, TemplateId,
};
pub use infrastructure::collaborators::{AlwaysConfirm, Confirmer, DeleteRequest, Notice, Notifier, SilentNotifier};
pub use infrastructure::config::EditorConfig;
pub use infrastructure::error::{EditorError, Result};
pub use services::render::{MenuView, OutlineRenderer, TemplateRenderer};
pub use state::{EventEffect, MenuEditor};
