//! Hooks the host supplies for policy decisions the engine doesn't own:
//! whether a destructive action should go ahead, and how to tell the user
//! that something was ignored.

use std::cell::RefCell;

use crate::app::domain::ids::{CategoryId, ItemId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteRequest {
    Category { id: CategoryId, name: String, item_count: usize },
    Item { category_id: CategoryId, id: ItemId, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A name edit was blank and the previous value was kept.
    EmptyNameRejected,
    /// A drop was ignored; the payload is the reason as text.
    DropCancelled(String),
    /// A delete was declined by the confirmer.
    DeleteDeclined,
}

pub trait Confirmer {
    fn confirm(&self, request: &DeleteRequest) -> bool;
}

pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Confirms everything; use when the host confirms before raising the event.
pub struct AlwaysConfirm;

impl Confirmer for AlwaysConfirm {
    fn confirm(&self, _request: &DeleteRequest) -> bool {
        true
    }
}

pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _notice: Notice) {}
}

/// Keeps every notice; useful for hosts that show a toast queue, and for tests.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn take(&self) -> Vec<Notice> {
        self.notices.take()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

impl<F> Confirmer for F
where
    F: Fn(&DeleteRequest) -> bool,
{
    fn confirm(&self, request: &DeleteRequest) -> bool {
        self(request)
    }
}
