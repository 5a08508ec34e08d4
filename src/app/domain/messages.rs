use super::customization::{CustomizationPatch, TemplateId};
use super::ids::{CategoryId, ItemId};

/// The list a drag gesture starts in or lands on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DropList {
    Categories,
    Items(CategoryId),
}

/// A position as the skin sees it: which list, which column of that list's
/// projection, and the 0-based index inside that column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DropLocation {
    pub list: DropList,
    pub column: usize,
    pub index: usize,
}

impl DropLocation {
    pub fn categories(column: usize, index: usize) -> Self {
        Self {
            list: DropList::Categories,
            column,
            index,
        }
    }

    pub fn items(category_id: CategoryId, column: usize, index: usize) -> Self {
        Self {
            list: DropList::Items(category_id),
            column,
            index,
        }
    }
}

/// One inline-editable field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldTarget {
    CategoryName(CategoryId),
    CategoryDescription(CategoryId),
    ItemName(CategoryId, ItemId),
    ItemDescription(CategoryId, ItemId),
    ItemPrice(CategoryId, ItemId),
}

impl FieldTarget {
    pub fn category_id(&self) -> &CategoryId {
        match self {
            FieldTarget::CategoryName(c) | FieldTarget::CategoryDescription(c) => c,
            FieldTarget::ItemName(c, _) | FieldTarget::ItemDescription(c, _) | FieldTarget::ItemPrice(c, _) => c,
        }
    }

    pub fn item_id(&self) -> Option<&ItemId> {
        match self {
            FieldTarget::CategoryName(_) | FieldTarget::CategoryDescription(_) => None,
            FieldTarget::ItemName(_, i) | FieldTarget::ItemDescription(_, i) | FieldTarget::ItemPrice(_, i) => Some(i),
        }
    }

    pub fn is_name(&self) -> bool {
        matches!(self, FieldTarget::CategoryName(_) | FieldTarget::ItemName(_, _))
    }
}

/// Everything a skin may raise back into the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    // Reorder
    StartDragCategory(DropLocation),
    DropCategory {
        source: DropLocation,
        destination: Option<DropLocation>,
    },
    StartDragItem(DropLocation),
    DropItem {
        source: DropLocation,
        destination: Option<DropLocation>,
    },
    CancelDrag,

    // Inline edit
    StartEditField(FieldTarget),
    UpdateDraft(FieldTarget, String),
    /// `None` commits whatever the draft currently holds.
    CommitField(FieldTarget, Option<String>),
    CancelEditField(FieldTarget),

    // Structure
    RequestAddCategory { after: Option<CategoryId> },
    RequestDeleteCategory(CategoryId),
    RequestAddItem(CategoryId),
    RequestDeleteItem(CategoryId, ItemId),
    RequestDuplicateItem(CategoryId, ItemId),

    // Presentation
    SetTemplate(TemplateId),
    UpdateCustomization(CustomizationPatch),
    ResetCustomization,
    TogglePreviewMode,
}
