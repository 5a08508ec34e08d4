//! `MenuEditor`, the single entry point for skin events.

use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, info};

use super::controllers::customization::{CustomizationState, CustomizationStore};
use super::controllers::document::DocumentStore;
use super::controllers::edit::{CommitOutcome, EditSession};
use super::controllers::reorder::{DropOutcome, ReorderController};
use super::domain::customization::EditorMode;
use super::domain::ids::{CategoryId, ItemId};
use super::domain::menu::MenuDocument;
use super::domain::messages::EditorEvent;
use super::domain::patch::ItemDraft;
use super::domain::seed::starter_menu;
use super::infrastructure::collaborators::{AlwaysConfirm, Confirmer, DeleteRequest, Notice, Notifier, SilentNotifier};
use super::infrastructure::config::EditorConfig;
use super::infrastructure::error::Result;
use super::services::render::{MenuView, TemplateRenderer};

/// What a dispatched event did, so the host knows how much to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventEffect {
    /// A new document snapshot was installed.
    DocumentChanged,
    /// Template, customization or mode changed.
    PresentationChanged,
    /// Drag or edit state changed; the document is untouched.
    InteractionChanged,
    Ignored,
}

/// Main coordinator. Owns the document store and every controller, and is
/// the single entry point for events raised by skins.
pub struct MenuEditor {
    config: EditorConfig,
    documents: DocumentStore,
    reorder: ReorderController,
    edits: EditSession,
    customization: CustomizationStore,
    confirmer: Rc<dyn Confirmer>,
    notifier: Rc<dyn Notifier>,
}

impl MenuEditor {
    /// Editor over the configured starter menu (or an empty one).
    pub fn new(config: EditorConfig) -> Self {
        let mut ids = config.id_generator();
        let document = if config.seed_starter_menu {
            starter_menu(config.default_template, &mut ids, &config.default_currency)
        } else {
            MenuDocument::empty(&ids.next_raw(), "Untitled Menu")
        };
        let documents = DocumentStore::new(document, ids);
        Self::assemble(config, documents)
    }

    /// Editor over an externally provided document.
    pub fn with_document(config: EditorConfig, document: MenuDocument) -> Self {
        let documents = DocumentStore::new(document, config.id_generator());
        Self::assemble(config, documents)
    }

    fn assemble(config: EditorConfig, documents: DocumentStore) -> Self {
        let documents = documents.with_placeholders(
            &config.category_placeholder,
            &config.item_placeholder,
            &config.default_currency,
        );
        let customization = CustomizationStore::new(CustomizationState::for_template(config.default_template));
        info!(
            template = config.default_template.as_str(),
            categories = documents.document().categories.len(),
            "Menu editor ready"
        );
        Self {
            config,
            documents,
            reorder: ReorderController::new(),
            edits: EditSession::new(),
            customization,
            confirmer: Rc::new(AlwaysConfirm),
            notifier: Rc::new(SilentNotifier),
        }
    }

    pub fn with_confirmer(mut self, confirmer: Rc<dyn Confirmer>) -> Self {
        self.confirmer = confirmer;
        self
    }

    pub fn with_notifier(mut self, notifier: Rc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &MenuDocument {
        self.documents.document()
    }

    /// Shared handle to the current snapshot. Compare with `Arc::ptr_eq`
    /// to find out whether a held snapshot is stale.
    pub fn snapshot(&self) -> Arc<MenuDocument> {
        self.documents.snapshot()
    }

    pub fn customization(&self) -> &CustomizationState {
        self.customization.state()
    }

    pub fn edit_session(&self) -> &EditSession {
        &self.edits
    }

    pub fn reorder(&self) -> &ReorderController {
        &self.reorder
    }

    pub fn view(&self) -> MenuView<'_> {
        MenuView::build(self.documents.document(), self.customization.state())
    }

    pub fn render<R: TemplateRenderer>(&self, renderer: &R) -> R::Output {
        renderer.render(&self.view())
    }

    /// Serialize the current document for a save collaborator.
    pub fn export_json(&self) -> Result<String> {
        self.documents.document().to_json_string()
    }

    /// Load a document from JSON, replacing the current one.
    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let document = MenuDocument::from_json_str(json)?;
        self.replace_document(document);
        Ok(())
    }

    /// Swap in a document from outside. Any drag in flight is cancelled and
    /// drafts for entities that no longer exist are dropped.
    pub fn replace_document(&mut self, document: MenuDocument) {
        self.reorder.cancel();
        self.documents.replace(document);
        let pruned = self.edits.prune(self.documents.document());
        if pruned > 0 {
            debug!(pruned, "Dropped stale drafts after document replace");
        }
    }

    pub fn dispatch(&mut self, event: EditorEvent) -> EventEffect {
        debug!(?event, "Dispatch");
        match event {
            EditorEvent::StartDragCategory(source) | EditorEvent::StartDragItem(source) => {
                if self.customization.mode() == EditorMode::Preview {
                    return EventEffect::Ignored;
                }
                self.reorder.start_drag(source);
                EventEffect::InteractionChanged
            }
            EditorEvent::DropCategory { .. } | EditorEvent::DropItem { .. }
                if self.customization.mode() == EditorMode::Preview =>
            {
                debug!("Drop ignored in preview mode");
                self.reorder.cancel();
                EventEffect::Ignored
            }
            EditorEvent::DropCategory { source, destination } => {
                let layout = self.customization.layout();
                let outcome =
                    self.reorder
                        .drop_category(&mut self.documents, layout, &source, destination.as_ref());
                self.after_drop(outcome)
            }
            EditorEvent::DropItem { source, destination } => {
                let layout = self.customization.layout();
                let outcome = self
                    .reorder
                    .drop_item(&mut self.documents, layout, &source, destination.as_ref());
                self.after_drop(outcome)
            }
            EditorEvent::CancelDrag => {
                if !self.reorder.is_dragging() {
                    return EventEffect::Ignored;
                }
                self.reorder.cancel();
                EventEffect::InteractionChanged
            }

            EditorEvent::StartEditField(target) => {
                let started = self
                    .edits
                    .start(target, self.customization.mode(), self.documents.document());
                if started {
                    EventEffect::InteractionChanged
                } else {
                    EventEffect::Ignored
                }
            }
            EditorEvent::UpdateDraft(target, value) => {
                if self.edits.update_draft(&target, &value) {
                    EventEffect::InteractionChanged
                } else {
                    EventEffect::Ignored
                }
            }
            EditorEvent::CommitField(target, value) => {
                match self.edits.commit(&target, value, &mut self.documents) {
                    CommitOutcome::Committed => EventEffect::DocumentChanged,
                    CommitOutcome::Unchanged => EventEffect::InteractionChanged,
                    CommitOutcome::Rejected => {
                        self.notifier.notify(Notice::EmptyNameRejected);
                        EventEffect::InteractionChanged
                    }
                    CommitOutcome::NotEditing => EventEffect::Ignored,
                    CommitOutcome::Stale => EventEffect::InteractionChanged,
                }
            }
            EditorEvent::CancelEditField(target) => {
                if self.edits.cancel(&target) {
                    EventEffect::InteractionChanged
                } else {
                    EventEffect::Ignored
                }
            }

            EditorEvent::RequestAddCategory { after } => {
                self.documents.add_category(after.as_ref());
                EventEffect::DocumentChanged
            }
            EditorEvent::RequestDeleteCategory(category_id) => self.delete_category(&category_id),
            EditorEvent::RequestAddItem(category_id) => {
                match self.documents.add_item(&category_id, ItemDraft::default()) {
                    Some(_) => EventEffect::DocumentChanged,
                    None => EventEffect::Ignored,
                }
            }
            EditorEvent::RequestDeleteItem(category_id, item_id) => self.delete_item(&category_id, &item_id),
            EditorEvent::RequestDuplicateItem(category_id, item_id) => {
                match self.documents.duplicate_item(&category_id, &item_id) {
                    Some(_) => EventEffect::DocumentChanged,
                    None => EventEffect::Ignored,
                }
            }

            EditorEvent::SetTemplate(template) => {
                if !self.customization.set_template(template) {
                    return EventEffect::Ignored;
                }
                // Column coordinates of a drag in flight belong to the old layout.
                self.reorder.cancel();
                EventEffect::PresentationChanged
            }
            EditorEvent::UpdateCustomization(patch) => {
                if self.customization.update_customization(&patch) {
                    EventEffect::PresentationChanged
                } else {
                    EventEffect::Ignored
                }
            }
            EditorEvent::ResetCustomization => {
                if self.customization.reset_customization() {
                    EventEffect::PresentationChanged
                } else {
                    EventEffect::Ignored
                }
            }
            EditorEvent::TogglePreviewMode => {
                if self.customization.toggle_preview_mode() == EditorMode::Preview {
                    let cancelled = self.edits.cancel_all();
                    if cancelled > 0 {
                        debug!(cancelled, "Drafts discarded on entering preview");
                    }
                    self.reorder.cancel();
                }
                EventEffect::PresentationChanged
            }
        }
    }

    fn after_drop(&mut self, outcome: DropOutcome) -> EventEffect {
        match outcome {
            DropOutcome::Moved { .. } => EventEffect::DocumentChanged,
            DropOutcome::Unchanged => EventEffect::InteractionChanged,
            DropOutcome::Cancelled(reason) => {
                self.notifier.notify(Notice::DropCancelled(reason.to_string()));
                EventEffect::InteractionChanged
            }
        }
    }

    fn delete_category(&mut self, category_id: &CategoryId) -> EventEffect {
        let Some(category) = self.documents.document().category(category_id) else {
            return EventEffect::Ignored;
        };
        let request = DeleteRequest::Category {
            id: category.id.clone(),
            name: category.name.clone(),
            item_count: category.items.len(),
        };
        if !self.confirmer.confirm(&request) {
            self.notifier.notify(Notice::DeleteDeclined);
            return EventEffect::Ignored;
        }
        self.documents.delete_category(category_id);
        self.edits.prune(self.documents.document());
        EventEffect::DocumentChanged
    }

    fn delete_item(&mut self, category_id: &CategoryId, item_id: &ItemId) -> EventEffect {
        let Some(item) = self.documents.document().item(category_id, item_id) else {
            return EventEffect::Ignored;
        };
        let request = DeleteRequest::Item {
            category_id: category_id.clone(),
            id: item.id.clone(),
            name: item.name.clone(),
        };
        if !self.confirmer.confirm(&request) {
            self.notifier.notify(Notice::DeleteDeclined);
            return EventEffect::Ignored;
        }
        self.documents.delete_item(category_id, item_id);
        self.edits.prune(self.documents.document());
        EventEffect::DocumentChanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::customization::{CustomizationPatch, TemplateId};
    use crate::app::domain::menu::{Category, Item};
    use crate::app::domain::messages::{DropLocation, FieldTarget};
    use crate::app::infrastructure::collaborators::RecordingNotifier;
    use crate::app::services::render::OutlineRenderer;

    fn config() -> EditorConfig {
        EditorConfig {
            id_prefix: Some("t".to_string()),
            ..Default::default()
        }
    }

    fn sample() -> MenuDocument {
        let mut doc = MenuDocument::empty("menu", "Lunch");
        let mut a = Category::new(CategoryId::from("A"), "Starters");
        a.items.push(Item::new(ItemId::from("i1"), "Soup", "$"));
        a.items.push(Item::new(ItemId::from("i2"), "Salad", "$"));
        let mut b = Category::new(CategoryId::from("B"), "Mains");
        b.items.push(Item::new(ItemId::from("i3"), "Steak", "$"));
        doc.categories = vec![a, b];
        doc
    }

    fn editor() -> (MenuEditor, Rc<RecordingNotifier>) {
        let notices = Rc::new(RecordingNotifier::default());
        let editor = MenuEditor::with_document(config(), sample()).with_notifier(notices.clone());
        (editor, notices)
    }

    fn item_ids(doc: &MenuDocument, category: usize) -> Vec<&str> {
        doc.categories[category].items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_new_seeds_starter_menu() {
        let editor = MenuEditor::new(config());
        assert!(!editor.document().is_empty());
        assert_eq!(editor.customization().template, TemplateId::Classic);
    }

    #[test]
    fn test_new_without_seed_is_empty() {
        let config = EditorConfig {
            seed_starter_menu: false,
            ..config()
        };
        let editor = MenuEditor::new(config);
        assert!(editor.document().categories.is_empty());
        assert!(editor.render(&OutlineRenderer).contains("(no categories yet)"));
    }

    #[test]
    fn test_drop_item_across_categories() {
        let (mut editor, _) = editor();
        let effect = editor.dispatch(EditorEvent::DropItem {
            source: DropLocation::items(CategoryId::from("A"), 0, 1),
            destination: Some(DropLocation::items(CategoryId::from("B"), 0, 0)),
        });
        assert_eq!(effect, EventEffect::DocumentChanged);
        assert_eq!(item_ids(editor.document(), 0), vec!["i1"]);
        assert_eq!(item_ids(editor.document(), 1), vec!["i2", "i3"]);
    }

    #[test]
    fn test_drop_category_within_column() {
        let (mut editor, _) = editor();
        editor.dispatch(EditorEvent::StartDragCategory(DropLocation::categories(0, 1)));
        assert!(editor.reorder().is_dragging());
        let effect = editor.dispatch(EditorEvent::DropCategory {
            source: DropLocation::categories(0, 1),
            destination: Some(DropLocation::categories(0, 0)),
        });
        assert_eq!(effect, EventEffect::DocumentChanged);
        assert!(!editor.reorder().is_dragging());
        assert_eq!(editor.document().categories[0].id.as_str(), "B");
    }

    #[test]
    fn test_drop_outside_notifies_and_keeps_snapshot() {
        let (mut editor, notices) = editor();
        let before = editor.snapshot();
        let effect = editor.dispatch(EditorEvent::DropCategory {
            source: DropLocation::categories(0, 0),
            destination: None,
        });
        assert_eq!(effect, EventEffect::InteractionChanged);
        assert!(Arc::ptr_eq(&before, &editor.snapshot()));
        assert_eq!(notices.take(), vec![Notice::DropCancelled("dropped outside any list".to_string())]);
    }

    #[test]
    fn test_commit_price_edit() {
        let (mut editor, _) = editor();
        let target = FieldTarget::ItemPrice(CategoryId::from("A"), ItemId::from("i1"));
        assert_eq!(editor.dispatch(EditorEvent::StartEditField(target.clone())), EventEffect::InteractionChanged);
        editor.dispatch(EditorEvent::UpdateDraft(target.clone(), "$4.50".to_string()));
        assert_eq!(editor.dispatch(EditorEvent::CommitField(target.clone(), None)), EventEffect::DocumentChanged);
        let item = editor.document().item(&CategoryId::from("A"), &ItemId::from("i1")).unwrap();
        assert_eq!(item.price, Some(4.5));

        editor.dispatch(EditorEvent::StartEditField(target.clone()));
        editor.dispatch(EditorEvent::CommitField(target, Some("abc".to_string())));
        let item = editor.document().item(&CategoryId::from("A"), &ItemId::from("i1")).unwrap();
        assert_eq!(item.price, Some(0.0));
    }

    #[test]
    fn test_empty_name_is_rejected_and_notified() {
        let (mut editor, notices) = editor();
        let target = FieldTarget::CategoryName(CategoryId::from("A"));
        editor.dispatch(EditorEvent::StartEditField(target.clone()));
        editor.dispatch(EditorEvent::CommitField(target, Some("   ".to_string())));
        assert_eq!(editor.document().categories[0].name, "Starters");
        assert_eq!(notices.take(), vec![Notice::EmptyNameRejected]);
    }

    #[test]
    fn test_commit_without_edit_is_ignored() {
        let (mut editor, _) = editor();
        let target = FieldTarget::CategoryName(CategoryId::from("A"));
        let effect = editor.dispatch(EditorEvent::CommitField(target, Some("Other".to_string())));
        assert_eq!(effect, EventEffect::Ignored);
        assert_eq!(editor.document().categories[0].name, "Starters");
    }

    #[test]
    fn test_preview_cancels_drafts_and_blocks_edits() {
        let (mut editor, _) = editor();
        let target = FieldTarget::ItemName(CategoryId::from("A"), ItemId::from("i1"));
        editor.dispatch(EditorEvent::StartEditField(target.clone()));
        assert_eq!(editor.edit_session().open_count(), 1);

        assert_eq!(editor.dispatch(EditorEvent::TogglePreviewMode), EventEffect::PresentationChanged);
        assert!(editor.customization().is_preview_mode());
        assert_eq!(editor.edit_session().open_count(), 0);
        assert_eq!(editor.dispatch(EditorEvent::StartEditField(target)), EventEffect::Ignored);
        assert_eq!(
            editor.dispatch(EditorEvent::StartDragCategory(DropLocation::categories(0, 0))),
            EventEffect::Ignored
        );
    }

    #[test]
    fn test_preview_ignores_drops() {
        let (mut editor, notices) = editor();
        editor.dispatch(EditorEvent::TogglePreviewMode);
        let before = editor.snapshot();
        let effect = editor.dispatch(EditorEvent::DropCategory {
            source: DropLocation::categories(0, 1),
            destination: Some(DropLocation::categories(0, 0)),
        });
        assert_eq!(effect, EventEffect::Ignored);
        let effect = editor.dispatch(EditorEvent::DropItem {
            source: DropLocation::items(CategoryId::from("A"), 0, 1),
            destination: Some(DropLocation::items(CategoryId::from("B"), 0, 0)),
        });
        assert_eq!(effect, EventEffect::Ignored);
        assert!(Arc::ptr_eq(&before, &editor.snapshot()));
        assert_eq!(editor.document().categories[0].id.as_str(), "A");
        assert!(notices.take().is_empty());

        editor.dispatch(EditorEvent::TogglePreviewMode);
        let effect = editor.dispatch(EditorEvent::DropCategory {
            source: DropLocation::categories(0, 1),
            destination: Some(DropLocation::categories(0, 0)),
        });
        assert_eq!(effect, EventEffect::DocumentChanged);
    }

    #[test]
    fn test_delete_category_declined() {
        let notices = Rc::new(RecordingNotifier::default());
        let mut editor = MenuEditor::with_document(config(), sample())
            .with_confirmer(Rc::new(|_: &DeleteRequest| false))
            .with_notifier(notices.clone());
        let effect = editor.dispatch(EditorEvent::RequestDeleteCategory(CategoryId::from("A")));
        assert_eq!(effect, EventEffect::Ignored);
        assert_eq!(editor.document().categories.len(), 2);
        assert_eq!(notices.take(), vec![Notice::DeleteDeclined]);
    }

    #[test]
    fn test_delete_category_confirmed_cascades_and_prunes_drafts() {
        let (mut editor, _) = editor();
        let target = FieldTarget::ItemName(CategoryId::from("A"), ItemId::from("i2"));
        editor.dispatch(EditorEvent::StartEditField(target));
        let effect = editor.dispatch(EditorEvent::RequestDeleteCategory(CategoryId::from("A")));
        assert_eq!(effect, EventEffect::DocumentChanged);
        assert_eq!(editor.document().categories.len(), 1);
        assert!(editor.document().locate_item(&ItemId::from("i1")).is_none());
        assert_eq!(editor.edit_session().open_count(), 0);
    }

    #[test]
    fn test_confirmer_sees_delete_details() {
        let mut editor = MenuEditor::with_document(config(), sample()).with_confirmer(Rc::new(|request: &DeleteRequest| {
            matches!(request, DeleteRequest::Item { name, .. } if name == "Steak")
        }));
        assert_eq!(
            editor.dispatch(EditorEvent::RequestDeleteItem(CategoryId::from("A"), ItemId::from("i1"))),
            EventEffect::Ignored
        );
        assert_eq!(
            editor.dispatch(EditorEvent::RequestDeleteItem(CategoryId::from("B"), ItemId::from("i3"))),
            EventEffect::DocumentChanged
        );
        assert!(editor.document().categories[1].items.is_empty());
    }

    #[test]
    fn test_unknown_ids_are_silent_noops() {
        let (mut editor, notices) = editor();
        let before = editor.snapshot();
        let ghost = CategoryId::from("ghost");
        assert_eq!(editor.dispatch(EditorEvent::RequestDeleteCategory(ghost.clone())), EventEffect::Ignored);
        assert_eq!(editor.dispatch(EditorEvent::RequestAddItem(ghost.clone())), EventEffect::Ignored);
        assert_eq!(
            editor.dispatch(EditorEvent::RequestDeleteItem(ghost, ItemId::from("i1"))),
            EventEffect::Ignored
        );
        assert!(Arc::ptr_eq(&before, &editor.snapshot()));
        assert!(notices.take().is_empty());
    }

    #[test]
    fn test_add_and_duplicate() {
        let (mut editor, _) = editor();
        editor.dispatch(EditorEvent::RequestAddCategory {
            after: Some(CategoryId::from("A")),
        });
        assert_eq!(editor.document().categories[1].name, "New Category");

        editor.dispatch(EditorEvent::RequestAddItem(CategoryId::from("B")));
        let b = editor.document().category(&CategoryId::from("B")).unwrap();
        assert_eq!(b.items.last().unwrap().name, "New Item");

        editor.dispatch(EditorEvent::RequestDuplicateItem(CategoryId::from("A"), ItemId::from("i1")));
        let a = editor.document().category(&CategoryId::from("A")).unwrap();
        assert_eq!(a.items.len(), 3);
        assert_eq!(a.items[1].name, "Soup");
        assert_ne!(a.items[1].id, a.items[0].id);
    }

    #[test]
    fn test_presentation_events_leave_document_alone() {
        let (mut editor, _) = editor();
        let before = editor.snapshot();
        assert_eq!(editor.dispatch(EditorEvent::SetTemplate(TemplateId::Bistro)), EventEffect::PresentationChanged);
        assert_eq!(editor.dispatch(EditorEvent::SetTemplate(TemplateId::Bistro)), EventEffect::Ignored);
        let patch = CustomizationPatch {
            accent_color: Some("#ff0000".to_string()),
            ..Default::default()
        };
        assert_eq!(editor.dispatch(EditorEvent::UpdateCustomization(patch)), EventEffect::PresentationChanged);
        assert_eq!(editor.dispatch(EditorEvent::ResetCustomization), EventEffect::PresentationChanged);
        assert!(Arc::ptr_eq(&before, &editor.snapshot()));
        assert_eq!(editor.view().category_columns.len(), 2);
    }

    #[test]
    fn test_export_and_import_json() {
        let (mut editor, _) = editor();
        let json = editor.export_json().unwrap();
        assert!(json.contains("\"categories\""));
        assert!(json.contains("\"items\""));

        let target = FieldTarget::ItemName(CategoryId::from("A"), ItemId::from("i1"));
        editor.dispatch(EditorEvent::StartEditField(target));

        let mut other = sample();
        other.categories.remove(0);
        editor.import_json(&other.to_json_string().unwrap()).unwrap();
        assert_eq!(editor.document().categories.len(), 1);
        assert_eq!(editor.edit_session().open_count(), 0);

        assert!(editor.import_json("{not json").is_err());
        assert_eq!(editor.document().categories.len(), 1);
    }
}
