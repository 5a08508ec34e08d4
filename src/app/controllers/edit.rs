//! Inline field editing: one draft per field, kept outside the document
//! until it is committed.

use std::collections::HashMap;

use tracing::debug;

use super::document::DocumentStore;
use crate::app::domain::customization::EditorMode;
use crate::app::domain::menu::MenuDocument;
use crate::app::domain::messages::FieldTarget;
use crate::app::domain::patch::{CategoryPatch, ItemPatch};
use crate::app::services::coerce::{normalize_name, parse_price};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldState<'a> {
    Viewing,
    Editing { draft: &'a str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The document now holds the draft.
    Committed,
    /// The draft matched what was already stored.
    Unchanged,
    /// Blank name; the previous value stays.
    Rejected,
    /// The field was not being edited.
    NotEditing,
    /// The entity behind the field is gone.
    Stale,
}

/// Per-field Viewing/Editing state.
///
/// Each editing field owns a draft that lives outside the document until it
/// is committed. Several fields may be in Editing at once; serializing them
/// is left to the skin.
#[derive(Debug, Default)]
pub struct EditSession {
    drafts: HashMap<FieldTarget, String>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter Editing with a draft seeded from the stored value.
    ///
    /// Refused in Preview mode, for fields already being edited, and for
    /// targets that no longer exist.
    pub fn start(&mut self, target: FieldTarget, mode: EditorMode, doc: &MenuDocument) -> bool {
        if mode == EditorMode::Preview {
            debug!(?target, "Edit refused in preview mode");
            return false;
        }
        if self.drafts.contains_key(&target) {
            return false;
        }
        let Some(value) = current_value(&target, doc) else {
            debug!(?target, "Edit refused, field no longer exists");
            return false;
        };
        debug!(?target, "Edit started");
        self.drafts.insert(target, value);
        true
    }

    pub fn state(&self, target: &FieldTarget) -> FieldState<'_> {
        match self.drafts.get(target) {
            Some(draft) => FieldState::Editing { draft: draft.as_str() },
            None => FieldState::Viewing,
        }
    }

    pub fn is_editing(&self, target: &FieldTarget) -> bool {
        self.drafts.contains_key(target)
    }

    pub fn draft(&self, target: &FieldTarget) -> Option<&str> {
        self.drafts.get(target).map(String::as_str)
    }

    pub fn editing(&self) -> impl Iterator<Item = &FieldTarget> {
        self.drafts.keys()
    }

    pub fn open_count(&self) -> usize {
        self.drafts.len()
    }

    /// Replace the draft while typing. Ignored outside Editing.
    pub fn update_draft(&mut self, target: &FieldTarget, value: &str) -> bool {
        match self.drafts.get_mut(target) {
            Some(draft) => {
                *draft = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Leave Editing and write the draft (or `value`, when given) through.
    pub fn commit(&mut self, target: &FieldTarget, value: Option<String>, store: &mut DocumentStore) -> CommitOutcome {
        let Some(draft) = self.drafts.remove(target) else {
            return CommitOutcome::NotEditing;
        };
        let text = value.unwrap_or(draft);
        let outcome = write_field(target, &text, store);
        debug!(?target, ?outcome, "Edit committed");
        outcome
    }

    /// Leave Editing and drop the draft. The document is untouched.
    pub fn cancel(&mut self, target: &FieldTarget) -> bool {
        let was_editing = self.drafts.remove(target).is_some();
        if was_editing {
            debug!(?target, "Edit cancelled");
        }
        was_editing
    }

    pub fn cancel_all(&mut self) -> usize {
        let count = self.drafts.len();
        self.drafts.clear();
        count
    }

    /// Commit every open draft, in `FieldTarget` order.
    pub fn commit_all(&mut self, store: &mut DocumentStore) -> Vec<(FieldTarget, CommitOutcome)> {
        let mut targets: Vec<FieldTarget> = self.drafts.keys().cloned().collect();
        targets.sort();
        targets
            .into_iter()
            .map(|target| {
                let outcome = self.commit(&target, None, store);
                (target, outcome)
            })
            .collect()
    }

    /// Drop drafts whose category or item has disappeared from `doc`.
    pub fn prune(&mut self, doc: &MenuDocument) -> usize {
        let before = self.drafts.len();
        self.drafts.retain(|target, _| current_value(target, doc).is_some());
        before - self.drafts.len()
    }
}

/// Stored text of a field, `None` when the target doesn't resolve.
///
/// Prices use the shortest text that parses back to the same value, so an
/// untouched draft commits as `Unchanged`.
pub fn current_value(target: &FieldTarget, doc: &MenuDocument) -> Option<String> {
    match target {
        FieldTarget::CategoryName(c) => doc.category(c).map(|c| c.name.clone()),
        FieldTarget::CategoryDescription(c) => doc.category(c).map(|c| c.description.clone()),
        FieldTarget::ItemName(c, i) => doc.item(c, i).map(|i| i.name.clone()),
        FieldTarget::ItemDescription(c, i) => doc.item(c, i).map(|i| i.description.clone().unwrap_or_default()),
        FieldTarget::ItemPrice(c, i) => doc.item(c, i).map(|i| i.price.map(|p| p.to_string()).unwrap_or_default()),
    }
}

fn write_field(target: &FieldTarget, text: &str, store: &mut DocumentStore) -> CommitOutcome {
    if current_value(target, store.document()).is_none() {
        return CommitOutcome::Stale;
    }
    if target.is_name() && normalize_name(text).is_none() {
        return CommitOutcome::Rejected;
    }

    let changed = match target {
        FieldTarget::CategoryName(c) => store.update_category(c, &[CategoryPatch::Name(text.to_string())]),
        FieldTarget::CategoryDescription(c) => store.update_category(c, &[CategoryPatch::Description(text.to_string())]),
        FieldTarget::ItemName(c, i) => store.update_item(c, i, &[ItemPatch::Name(text.to_string())]),
        FieldTarget::ItemDescription(c, i) => store.update_item(c, i, &[ItemPatch::Description(Some(text.to_string()))]),
        FieldTarget::ItemPrice(c, i) => store.update_item(c, i, &[ItemPatch::Price(parse_price(text))]),
    };
    if changed { CommitOutcome::Committed } else { CommitOutcome::Unchanged }
}
