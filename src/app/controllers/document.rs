use std::sync::Arc;

use tracing::debug;

use crate::app::domain::ids::{CategoryId, IdGenerator, ItemId};
use crate::app::domain::menu::{Category, MenuDocument, move_within};
use crate::app::domain::patch::{CategoryPatch, ItemDraft, ItemPatch, apply_category_patches, apply_item_patches};

/// Holder of the current menu snapshot.
///
/// Snapshots are never mutated in place. Every effective change installs a
/// freshly allocated `Arc<MenuDocument>`; every no-op (unknown id, index out
/// of range, nothing to change) leaves the current `Arc` as is, so
/// `Arc::ptr_eq` tells whether a held snapshot is stale.
pub struct DocumentStore {
    current: Arc<MenuDocument>,
    ids: IdGenerator,
    category_placeholder: String,
    item_placeholder: String,
    default_currency: String,
}

impl DocumentStore {
    pub fn new(document: MenuDocument, mut ids: IdGenerator) -> Self {
        ids.reserve_from(&document);
        Self {
            current: Arc::new(document),
            ids,
            category_placeholder: "New Category".to_string(),
            item_placeholder: "New Item".to_string(),
            default_currency: "$".to_string(),
        }
    }

    pub fn with_placeholders(mut self, category: &str, item: &str, currency: &str) -> Self {
        self.category_placeholder = category.to_string();
        self.item_placeholder = item.to_string();
        self.default_currency = currency.to_string();
        self
    }

    pub fn snapshot(&self) -> Arc<MenuDocument> {
        Arc::clone(&self.current)
    }

    pub fn document(&self) -> &MenuDocument {
        &self.current
    }

    pub fn ids_mut(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    /// Swap in an externally provided document. Its ids are reserved so new
    /// entities never collide with them.
    pub fn replace(&mut self, document: MenuDocument) {
        self.ids.reserve_from(&document);
        self.current = Arc::new(document);
        debug!(categories = self.current.categories.len(), "Replaced document");
    }

    fn commit(&mut self, next: MenuDocument) {
        self.current = Arc::new(next);
    }

    /// Append a category, or insert it right after `after` when that id exists.
    pub fn add_category(&mut self, after: Option<&CategoryId>) -> CategoryId {
        let id = self.ids.next_category_id();
        let mut next = (*self.current).clone();
        let category = Category::new(id.clone(), &self.category_placeholder);
        let position = after
            .and_then(|a| next.category_index(a))
            .map_or(next.categories.len(), |idx| idx + 1);
        next.categories.insert(position, category);
        self.commit(next);
        debug!(category_id = %id, position, "Added category");
        id
    }

    pub fn update_category(&mut self, category_id: &CategoryId, patches: &[CategoryPatch]) -> bool {
        let Some(idx) = self.current.category_index(category_id) else {
            debug!(category_id = %category_id, "update_category: not found, ignoring");
            return false;
        };
        let mut category = self.current.categories[idx].clone();
        if !apply_category_patches(&mut category, patches) {
            return false;
        }
        let mut next = (*self.current).clone();
        next.categories[idx] = category;
        self.commit(next);
        true
    }

    /// Remove a category together with every item in it.
    pub fn delete_category(&mut self, category_id: &CategoryId) -> bool {
        let Some(idx) = self.current.category_index(category_id) else {
            debug!(category_id = %category_id, "delete_category: not found, ignoring");
            return false;
        };
        let mut next = (*self.current).clone();
        let removed = next.categories.remove(idx);
        self.commit(next);
        debug!(category_id = %category_id, items = removed.items.len(), "Deleted category");
        true
    }

    pub fn add_item(&mut self, category_id: &CategoryId, draft: ItemDraft) -> Option<ItemId> {
        let Some(idx) = self.current.category_index(category_id) else {
            debug!(category_id = %category_id, "add_item: category not found, ignoring");
            return None;
        };
        let id = self.ids.next_item_id();
        let item = draft.into_item(id.clone(), &self.item_placeholder, &self.default_currency);
        let mut next = (*self.current).clone();
        next.categories[idx].items.push(item);
        self.commit(next);
        debug!(category_id = %category_id, item_id = %id, "Added item");
        Some(id)
    }

    pub fn update_item(&mut self, category_id: &CategoryId, item_id: &ItemId, patches: &[ItemPatch]) -> bool {
        let Some((cat_idx, item_idx)) = self.position_of(category_id, item_id) else {
            debug!(category_id = %category_id, item_id = %item_id, "update_item: not found, ignoring");
            return false;
        };
        let mut item = self.current.categories[cat_idx].items[item_idx].clone();
        if !apply_item_patches(&mut item, patches) {
            return false;
        }
        let mut next = (*self.current).clone();
        next.categories[cat_idx].items[item_idx] = item;
        self.commit(next);
        true
    }

    pub fn delete_item(&mut self, category_id: &CategoryId, item_id: &ItemId) -> bool {
        let Some((cat_idx, item_idx)) = self.position_of(category_id, item_id) else {
            debug!(category_id = %category_id, item_id = %item_id, "delete_item: not found, ignoring");
            return false;
        };
        let mut next = (*self.current).clone();
        next.categories[cat_idx].items.remove(item_idx);
        self.commit(next);
        debug!(category_id = %category_id, item_id = %item_id, "Deleted item");
        true
    }

    /// Copy an item (fresh id) directly after the original.
    pub fn duplicate_item(&mut self, category_id: &CategoryId, item_id: &ItemId) -> Option<ItemId> {
        let (cat_idx, item_idx) = self.position_of(category_id, item_id)?;
        let id = self.ids.next_item_id();
        let mut copy = self.current.categories[cat_idx].items[item_idx].clone();
        copy.id = id.clone();
        let mut next = (*self.current).clone();
        next.categories[cat_idx].items.insert(item_idx + 1, copy);
        self.commit(next);
        debug!(category_id = %category_id, source = %item_id, item_id = %id, "Duplicated item");
        Some(id)
    }

    /// Move the category at `from` so it ends up at `to` (post-removal index).
    pub fn move_category(&mut self, from: usize, to: usize) -> bool {
        let len = self.current.categories.len();
        if from == to || from >= len || to >= len {
            return false;
        }
        let mut next = (*self.current).clone();
        let moved = move_within(&mut next.categories, from, to);
        if moved {
            self.commit(next);
            debug!(from, to, "Moved category");
        }
        moved
    }

    /// Move one item, within a category or across two.
    ///
    /// `to` is an index into the destination list as it looks once the item
    /// has been taken out of the source. The new snapshot is built in one
    /// step, so no observable snapshot ever has the item in both lists or in
    /// neither.
    pub fn move_item(&mut self, from_category: &CategoryId, from: usize, to_category: &CategoryId, to: usize) -> bool {
        let Some(src) = self.current.category_index(from_category) else {
            debug!(category_id = %from_category, "move_item: source category not found");
            return false;
        };
        let Some(dst) = self.current.category_index(to_category) else {
            debug!(category_id = %to_category, "move_item: destination category not found");
            return false;
        };

        if src == dst {
            let len = self.current.categories[src].items.len();
            if from == to || from >= len || to >= len {
                return false;
            }
            let mut next = (*self.current).clone();
            move_within(&mut next.categories[src].items, from, to);
            self.commit(next);
            debug!(category_id = %from_category, from, to, "Moved item within category");
            return true;
        }

        if from >= self.current.categories[src].items.len() || to > self.current.categories[dst].items.len() {
            return false;
        }
        let mut next = (*self.current).clone();
        let item = next.categories[src].items.remove(from);
        next.categories[dst].items.insert(to, item);
        self.commit(next);
        debug!(from_category = %from_category, to_category = %to_category, from, to, "Moved item across categories");
        true
    }

    fn position_of(&self, category_id: &CategoryId, item_id: &ItemId) -> Option<(usize, usize)> {
        let cat_idx = self.current.category_index(category_id)?;
        let item_idx = self.current.categories[cat_idx].item_index(item_id)?;
        Some((cat_idx, item_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::menu::Item;
    use proptest::prelude::*;

    fn store_with(layout: &[(&str, &[&str])]) -> DocumentStore {
        let mut doc = MenuDocument::empty("m", "Menu");
        for (cat, items) in layout {
            let mut category = Category::new(CategoryId::from(*cat), cat);
            for item in *items {
                category.items.push(Item::new(ItemId::from(*item), item, "$"));
            }
            doc.categories.push(category);
        }
        DocumentStore::new(doc, IdGenerator::with_prefix("t"))
    }

    fn category_ids(store: &DocumentStore) -> Vec<String> {
        store.document().categories.iter().map(|c| c.id.0.clone()).collect()
    }

    fn item_ids(store: &DocumentStore, category: &str) -> Vec<String> {
        store
            .document()
            .category(&CategoryId::from(category))
            .map(|c| c.items.iter().map(|i| i.id.0.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_add_category_appends() {
        let mut store = store_with(&[("A", &[]), ("B", &[])]);
        let id = store.add_category(None);
        assert_eq!(category_ids(&store), vec!["A", "B", id.as_str()]);
        assert_eq!(store.document().categories[2].name, "New Category");
    }

    #[test]
    fn test_add_category_after() {
        let mut store = store_with(&[("A", &[]), ("B", &[])]);
        let id = store.add_category(Some(&CategoryId::from("A")));
        assert_eq!(category_ids(&store), vec!["A", id.as_str(), "B"]);

        let id2 = store.add_category(Some(&CategoryId::from("gone")));
        assert_eq!(category_ids(&store).last().map(String::as_str), Some(id2.as_str()));
    }

    #[test]
    fn test_add_item_unknown_category_is_noop() {
        let mut store = store_with(&[("A", &[])]);
        let before = store.snapshot();
        assert!(store.add_item(&CategoryId::from("X"), ItemDraft::named("Tea")).is_none());
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_add_item_nan_price_stored_as_zero() {
        let mut store = store_with(&[("catX", &[])]);
        let id = store
            .add_item(&CategoryId::from("catX"), ItemDraft::named("Latte").with_price(f64::NAN))
            .unwrap();
        let item = store.document().item(&CategoryId::from("catX"), &id).unwrap();
        assert_eq!(item.name, "Latte");
        assert_eq!(item.price, Some(0.0));
    }

    #[test]
    fn test_updates_with_stale_ids_keep_snapshot() {
        let mut store = store_with(&[("A", &["i1"])]);
        let before = store.snapshot();
        assert!(!store.update_category(&CategoryId::from("X"), &[CategoryPatch::Name("Y".into())]));
        assert!(!store.update_item(&CategoryId::from("A"), &ItemId::from("nope"), &[ItemPatch::Featured(true)]));
        assert!(!store.delete_item(&CategoryId::from("A"), &ItemId::from("nope")));
        assert!(!store.delete_category(&CategoryId::from("X")));
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_update_produces_new_snapshot_and_keeps_old() {
        let mut store = store_with(&[("A", &["i1"])]);
        let before = store.snapshot();
        assert!(store.update_item(&CategoryId::from("A"), &ItemId::from("i1"), &[ItemPatch::Price(Some(5.0))]));
        let after = store.snapshot();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(before.categories[0].items[0].price, None);
        assert_eq!(after.categories[0].items[0].price, Some(5.0));
    }

    #[test]
    fn test_update_with_no_effect_keeps_snapshot() {
        let mut store = store_with(&[("A", &["i1"])]);
        let before = store.snapshot();
        assert!(!store.update_category(&CategoryId::from("A"), &[CategoryPatch::Name("   ".into())]));
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert_eq!(store.document().categories[0].name, "A");
    }

    #[test]
    fn test_delete_category_cascades() {
        let mut store = store_with(&[("A", &["i1", "i2"]), ("B", &["i3"])]);
        assert!(store.delete_category(&CategoryId::from("A")));
        assert_eq!(category_ids(&store), vec!["B"]);
        assert!(store.document().locate_item(&ItemId::from("i1")).is_none());
        assert!(store.document().locate_item(&ItemId::from("i2")).is_none());
        assert_eq!(store.document().item_count(), 1);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = store_with(&[("A", &[])]);
        let first = store.add_item(&CategoryId::from("A"), ItemDraft::named("Tea")).unwrap();
        assert!(store.delete_item(&CategoryId::from("A"), &first));
        let second = store.add_item(&CategoryId::from("A"), ItemDraft::named("Tea")).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_move_category_scenario() {
        let mut store = store_with(&[("C0", &[]), ("C1", &[]), ("C2", &[])]);
        assert!(store.move_category(2, 0));
        assert_eq!(category_ids(&store), vec!["C2", "C0", "C1"]);
    }

    #[test]
    fn test_move_category_noops() {
        let mut store = store_with(&[("C0", &[]), ("C1", &[])]);
        let before = store.snapshot();
        assert!(!store.move_category(1, 1));
        assert!(!store.move_category(2, 0));
        assert!(!store.move_category(0, 2));
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_move_item_cross_category_scenario() {
        let mut store = store_with(&[("A", &["i1", "i2"]), ("B", &["i3"])]);
        assert!(store.move_item(&CategoryId::from("A"), 1, &CategoryId::from("B"), 0));
        assert_eq!(item_ids(&store, "A"), vec!["i1"]);
        assert_eq!(item_ids(&store, "B"), vec!["i2", "i3"]);
    }

    #[test]
    fn test_move_item_into_empty_category() {
        let mut store = store_with(&[("A", &["i1"]), ("B", &[])]);
        assert!(store.move_item(&CategoryId::from("A"), 0, &CategoryId::from("B"), 0));
        assert!(item_ids(&store, "A").is_empty());
        assert_eq!(item_ids(&store, "B"), vec!["i1"]);
    }

    #[test]
    fn test_move_item_same_category() {
        let mut store = store_with(&[("A", &["i1", "i2", "i3"])]);
        assert!(store.move_item(&CategoryId::from("A"), 0, &CategoryId::from("A"), 2));
        assert_eq!(item_ids(&store, "A"), vec!["i2", "i3", "i1"]);
    }

    #[test]
    fn test_move_item_invalid() {
        let mut store = store_with(&[("A", &["i1"]), ("B", &["i2"])]);
        let before = store.snapshot();
        assert!(!store.move_item(&CategoryId::from("A"), 1, &CategoryId::from("B"), 0));
        assert!(!store.move_item(&CategoryId::from("A"), 0, &CategoryId::from("B"), 2));
        assert!(!store.move_item(&CategoryId::from("A"), 0, &CategoryId::from("Z"), 0));
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_duplicate_item() {
        let mut store = store_with(&[("A", &["i1", "i2"])]);
        let copy = store.duplicate_item(&CategoryId::from("A"), &ItemId::from("i1")).unwrap();
        assert_eq!(item_ids(&store, "A"), vec!["i1", copy.as_str(), "i2"]);
        assert!(store.duplicate_item(&CategoryId::from("A"), &ItemId::from("zz")).is_none());
    }

    #[test]
    fn test_replace_reserves_ids() {
        let mut store = store_with(&[]);
        let mut doc = MenuDocument::empty("m2", "Other");
        doc.categories.push(Category::new(CategoryId::from("t-1"), "Loaded"));
        store.replace(doc);
        let id = store.add_category(None);
        assert_ne!(id.as_str(), "t-1");
    }

    proptest! {
        #[test]
        fn move_category_preserves_ids(n in 1usize..30, a in any::<usize>(), b in any::<usize>()) {
            let names: Vec<String> = (0..n).map(|i| format!("c{i}")).collect();
            let layout: Vec<(&str, &[&str])> = names.iter().map(|s| (s.as_str(), &[][..])).collect();
            let mut store = store_with(&layout);
            let (from, to) = (a % n, b % n);
            store.move_category(from, to);

            let mut expected = names.clone();
            let moved = expected.remove(from);
            expected.insert(to, moved);
            prop_assert_eq!(category_ids(&store), expected);
        }

        #[test]
        fn move_item_across_is_atomic(len_a in 1usize..10, len_b in 0usize..10, a in any::<usize>(), b in any::<usize>()) {
            let a_items: Vec<String> = (0..len_a).map(|i| format!("a{i}")).collect();
            let b_items: Vec<String> = (0..len_b).map(|i| format!("b{i}")).collect();
            let a_refs: Vec<&str> = a_items.iter().map(String::as_str).collect();
            let b_refs: Vec<&str> = b_items.iter().map(String::as_str).collect();
            let mut store = store_with(&[("A", &a_refs[..]), ("B", &b_refs[..])]);

            let from = a % len_a;
            let to = b % (len_b + 1);
            let moved = a_items[from].clone();
            prop_assert!(store.move_item(&CategoryId::from("A"), from, &CategoryId::from("B"), to));

            let after_a = item_ids(&store, "A");
            let after_b = item_ids(&store, "B");
            prop_assert_eq!(after_a.len(), len_a - 1);
            prop_assert_eq!(after_b.len(), len_b + 1);
            prop_assert_eq!(&after_b[to], &moved);
            prop_assert!(!after_a.contains(&moved));
            prop_assert_eq!(store.document().item_count(), len_a + len_b);
        }
    }
}
