//! MenuForge - a menu document editing engine.
//!
//! One mutable menu snapshot, a set of controllers that turn skin events
//! (drags, inline edits, structural requests, template switches) into new
//! snapshots, and a rendering contract so any number of visual skins can
//! present the same document without owning it.
//!
//! ```
//! use menu_forge::app::{EditorConfig, EditorEvent, MenuEditor, OutlineRenderer};
//!
//! let mut editor = MenuEditor::new(EditorConfig::default());
//! editor.dispatch(EditorEvent::RequestAddCategory { after: None });
//! let outline = editor.render(&OutlineRenderer);
//! assert!(outline.contains("New Category"));
//! ```

pub mod app;

pub use app::{EditorConfig, EditorError, EditorEvent, EventEffect, MenuDocument, MenuEditor, Result};
