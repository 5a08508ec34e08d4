use std::collections::HashSet;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::menu::MenuDocument;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl CategoryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(s: &str) -> Self {
        CategoryId(s.to_string())
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

/// Session-scoped id source.
///
/// Ids look like `<prefix>-<counter in base36>`. One counter feeds both
/// categories and items, and it only moves forward, so an id handed out once
/// is never handed out again even after its entity is deleted.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    next: u64,
    reserved: HashSet<String>,
}

impl IdGenerator {
    /// Generator with a prefix derived from the current time.
    pub fn new() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self::with_prefix(&to_base36(millis))
    }

    /// Generator with a fixed prefix. Deterministic, handy for tests and exports.
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: 1,
            reserved: HashSet::new(),
        }
    }

    /// Record every id already present in `doc` so it is never produced again.
    pub fn reserve_from(&mut self, doc: &MenuDocument) {
        for category in &doc.categories {
            self.reserved.insert(category.id.0.clone());
            for item in &category.items {
                self.reserved.insert(item.id.0.clone());
            }
        }
    }

    pub fn next_raw(&mut self) -> String {
        loop {
            let candidate = format!("{}-{}", self.prefix, to_base36(self.next));
            self.next += 1;
            if !self.reserved.contains(&candidate) {
                return candidate;
            }
        }
    }

    pub fn next_category_id(&mut self) -> CategoryId {
        CategoryId(self.next_raw())
    }

    pub fn next_item_id(&mut self) -> ItemId {
        ItemId(self.next_raw())
    }

    /// Number of ids handed out (or skipped) so far.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
