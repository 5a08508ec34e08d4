//! Drag-and-drop reorder over column-projected lists.

use thiserror::Error;
use tracing::{debug, info};

use super::document::DocumentStore;
use crate::app::domain::customization::ColumnLayout;
use crate::app::domain::messages::{DropList, DropLocation};
use crate::app::services::columns::{column_range, insertion_to_move_target, to_canonical_index};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CancelReason {
    #[error("dropped outside any list")]
    NoDestination,
    #[error("drag source does not point at an element")]
    MalformedSource,
    #[error("drop position is outside the target column")]
    MalformedDestination,
    #[error("category no longer exists")]
    UnknownCategory,
    #[error("categories and items cannot be dropped into each other's lists")]
    KindMismatch,
    #[error("drag aborted")]
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Canonical source index and post-removal target index.
    Moved { from: usize, to: usize },
    /// Dropped back where it started.
    Unchanged,
    Cancelled(CancelReason),
}

impl DropOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, DropOutcome::Moved { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging(DropLocation),
}

/// Turns drop gestures into canonical moves.
///
/// A drop inside the column it started in names the final visual position
/// in that column. A drop in another column, or another category's list,
/// names an insertion point ("insert before"); within the same list it is
/// shifted down by one when the source sat before it.
///
/// Nothing is mutated while a gesture is in flight; `start_drag` only
/// records the pick-up so the host can query it. The document is touched
/// once, when the gesture ends in `drop_*`.
#[derive(Debug, Default)]
pub struct ReorderController {
    phase: DragPhase,
}

impl ReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    pub fn start_drag(&mut self, source: DropLocation) {
        debug!(?source, "Drag started");
        self.phase = DragPhase::Dragging(source);
    }

    pub fn cancel(&mut self) -> DropOutcome {
        if self.is_dragging() {
            debug!("Drag cancelled");
        }
        self.phase = DragPhase::Idle;
        DropOutcome::Cancelled(CancelReason::Aborted)
    }

    pub fn drop_category(
        &mut self,
        store: &mut DocumentStore,
        layout: ColumnLayout,
        source: &DropLocation,
        destination: Option<&DropLocation>,
    ) -> DropOutcome {
        self.phase = DragPhase::Idle;
        let outcome = match Self::resolve_category_drop(store, layout, source, destination) {
            Ok(Some((from, to))) => {
                if store.move_category(from, to) {
                    DropOutcome::Moved { from, to }
                } else {
                    DropOutcome::Unchanged
                }
            }
            Ok(None) => DropOutcome::Unchanged,
            Err(reason) => DropOutcome::Cancelled(reason),
        };
        log_outcome("category", &outcome);
        outcome
    }

    pub fn drop_item(
        &mut self,
        store: &mut DocumentStore,
        layout: ColumnLayout,
        source: &DropLocation,
        destination: Option<&DropLocation>,
    ) -> DropOutcome {
        self.phase = DragPhase::Idle;
        let outcome = match Self::resolve_item_drop(store, layout, source, destination) {
            Ok(Some(ItemMove { from_category, from, to_category, to })) => {
                let source_id = store.document().categories[from_category].id.clone();
                let target_id = store.document().categories[to_category].id.clone();
                if store.move_item(&source_id, from, &target_id, to) {
                    DropOutcome::Moved { from, to }
                } else {
                    DropOutcome::Unchanged
                }
            }
            Ok(None) => DropOutcome::Unchanged,
            Err(reason) => DropOutcome::Cancelled(reason),
        };
        log_outcome("item", &outcome);
        outcome
    }

    fn resolve_category_drop(
        store: &DocumentStore,
        layout: ColumnLayout,
        source: &DropLocation,
        destination: Option<&DropLocation>,
    ) -> Result<Option<(usize, usize)>, CancelReason> {
        if source.list != DropList::Categories {
            return Err(CancelReason::KindMismatch);
        }
        let destination = destination.ok_or(CancelReason::NoDestination)?;
        if destination.list != DropList::Categories {
            return Err(CancelReason::KindMismatch);
        }
        let n = store.document().categories.len();
        resolve_in_list(source, destination, n, layout.category_columns)
    }

    fn resolve_item_drop(
        store: &DocumentStore,
        layout: ColumnLayout,
        source: &DropLocation,
        destination: Option<&DropLocation>,
    ) -> Result<Option<ItemMove>, CancelReason> {
        let DropList::Items(source_category) = &source.list else {
            return Err(CancelReason::KindMismatch);
        };
        let destination = destination.ok_or(CancelReason::NoDestination)?;
        let DropList::Items(target_category) = &destination.list else {
            return Err(CancelReason::KindMismatch);
        };

        let doc = store.document();
        let from_category = doc
            .category_index(source_category)
            .ok_or(CancelReason::UnknownCategory)?;
        let to_category = doc
            .category_index(target_category)
            .ok_or(CancelReason::UnknownCategory)?;
        let columns = layout.item_columns;
        let source_len = doc.categories[from_category].items.len();

        if from_category == to_category {
            return Ok(resolve_in_list(source, destination, source_len, columns)?.map(|(from, to)| ItemMove {
                from_category,
                from,
                to_category,
                to,
            }));
        }

        let from = canonical_source(source, source_len, columns)?;
        let target_len = doc.categories[to_category].items.len();
        let to = canonical_insertion(destination, target_len, columns)?;
        Ok(Some(ItemMove {
            from_category,
            from,
            to_category,
            to,
        }))
    }
}

struct ItemMove {
    from_category: usize,
    from: usize,
    to_category: usize,
    to: usize,
}

/// Resolve a drop whose source and destination are the same canonical list.
///
/// Same column: the destination index is where the element ends up inside
/// that column. Different column: it is an insertion point in the
/// destination column, shifted to account for the removal.
fn resolve_in_list(
    source: &DropLocation,
    destination: &DropLocation,
    n: usize,
    columns: usize,
) -> Result<Option<(usize, usize)>, CancelReason> {
    let from = canonical_source(source, n, columns)?;

    let to = if source.column == destination.column {
        let range = column_range(destination.column, n, columns).ok_or(CancelReason::MalformedDestination)?;
        if destination.index >= range.len() {
            return Err(CancelReason::MalformedDestination);
        }
        range.start + destination.index
    } else {
        insertion_to_move_target(from, canonical_insertion(destination, n, columns)?)
    };

    if from == to { Ok(None) } else { Ok(Some((from, to))) }
}

fn canonical_source(source: &DropLocation, n: usize, columns: usize) -> Result<usize, CancelReason> {
    let range = column_range(source.column, n, columns).ok_or(CancelReason::MalformedSource)?;
    if source.index >= range.len() {
        return Err(CancelReason::MalformedSource);
    }
    Ok(range.start + source.index)
}

fn canonical_insertion(destination: &DropLocation, n: usize, columns: usize) -> Result<usize, CancelReason> {
    to_canonical_index(destination.column, destination.index, n, columns)
        .ok_or(CancelReason::MalformedDestination)
}

fn log_outcome(kind: &str, outcome: &DropOutcome) {
    match outcome {
        DropOutcome::Moved { from, to } => info!(kind, from, to, "Drop applied"),
        DropOutcome::Unchanged => debug!(kind, "Drop left order unchanged"),
        DropOutcome::Cancelled(reason) => debug!(kind, %reason, "Drop cancelled"),
    }
}
