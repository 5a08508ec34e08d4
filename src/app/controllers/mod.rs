//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the skins:
//! - Document snapshots and structural operations
//! - Drag-and-drop reorder
//! - Inline field editing
//! - Template and customization selection

pub mod customization;
pub mod document;
pub mod edit;
pub mod reorder;
