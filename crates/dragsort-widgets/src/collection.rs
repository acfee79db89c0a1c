#![forbid(unsafe_code)]

//! Ordered collections backing a reorderable list.
//!
//! Two capability sets are provided:
//!
//! - [`OrderedSource`]: read-only, position-indexed access plus identity.
//! - [`ReorderableSource`]: extends it with the single mutator
//!   [`move_item`](ReorderableSource::move_item).
//!
//! The drag machinery only accepts a `ReorderableSource`, so a read-only
//! source is rejected at compile time rather than by a runtime cast.
//!
//! # Move semantics
//!
//! `move_item(from, to)` removes the element at `from` and reinserts it at
//! `to`. Every element strictly between the two positions shifts by one slot
//! toward `from`; nothing outside `[min(from, to), max(from, to)]` moves. For
//! adjacent positions this coincides with a swap, for anything wider it does
//! not.

use std::collections::BTreeMap;
use std::fmt;

/// Stable identity of an item, independent of its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An opaque record: a stable identity and named string fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    fields: BTreeMap<String, String>,
}

impl Item {
    /// Create an item with no fields.
    #[must_use]
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            fields: BTreeMap::new(),
        }
    }

    /// Add or replace a field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// The item's identity.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// Look up a field by key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Errors from position-indexed collection access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    /// `position` is not in `0..len`.
    OutOfRange { position: usize, len: usize },
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { position, len } => {
                write!(f, "position {position} out of range for {len} items")
            }
        }
    }
}

impl std::error::Error for CollectionError {}

/// Returns `Ok(())` if `position` indexes a collection of `len` items.
#[inline]
pub fn check_position(position: usize, len: usize) -> Result<(), CollectionError> {
    if position < len {
        Ok(())
    } else {
        Err(CollectionError::OutOfRange { position, len })
    }
}

/// Read-only ordered source.
pub trait OrderedSource {
    /// Number of items.
    fn count(&self) -> usize;

    /// Item at `position`.
    fn item_at(&self, position: usize) -> Result<&Item, CollectionError>;

    /// Identity of the item at `position`.
    fn id_at(&self, position: usize) -> Result<ItemId, CollectionError> {
        self.item_at(position).map(Item::id)
    }

    /// Returns true if the source has no items.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Ordered source that also supports relocation.
pub trait ReorderableSource: OrderedSource {
    /// Relocate the item at `from` to `to`, shifting the items in between by
    /// one slot. `from == to` is a no-op.
    ///
    /// Fails with [`CollectionError::OutOfRange`] if either position is not
    /// in `0..count()`, in which case nothing is modified.
    fn move_item(&mut self, from: usize, to: usize) -> Result<(), CollectionError>;
}

/// The default in-memory ordered collection.
///
/// Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedCollection {
    items: Vec<Item>,
}

impl OrderedCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from field maps, assigning index-derived identities `0..n`.
    #[must_use]
    pub fn from_records<I, R, K, V>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let items = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                record
                    .into_iter()
                    .fold(Item::new(ItemId(i as u64)), |item, (k, v)| {
                        item.with_field(k, v)
                    })
            })
            .collect();
        Self { items }
    }

    /// Append an item.
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Iterate over items in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Identities in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(Item::id).collect()
    }

    /// Current position of the item with identity `id`.
    #[must_use]
    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

impl FromIterator<Item> for OrderedCollection {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl OrderedSource for OrderedCollection {
    fn count(&self) -> usize {
        self.items.len()
    }

    fn item_at(&self, position: usize) -> Result<&Item, CollectionError> {
        self.items
            .get(position)
            .ok_or(CollectionError::OutOfRange {
                position,
                len: self.items.len(),
            })
    }
}

impl ReorderableSource for OrderedCollection {
    fn move_item(&mut self, from: usize, to: usize) -> Result<(), CollectionError> {
        let len = self.items.len();
        check_position(from, len)?;
        check_position(to, len)?;
        // Rotating the closed span is O(|from - to|) and touches nothing else.
        if from < to {
            self.items[from..=to].rotate_left(1);
        } else if from > to {
            self.items[to..=from].rotate_right(1);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(s: &str) -> OrderedCollection {
        OrderedCollection::from_records(s.chars().map(|c| [("label", c.to_string())]))
    }

    fn labels(c: &OrderedCollection) -> String {
        c.iter()
            .map(|item| item.field("label").unwrap_or("?"))
            .collect()
    }

    #[test]
    fn from_records_assigns_index_ids() {
        let c = letters("ABC");
        assert_eq!(c.count(), 3);
        assert_eq!(c.ids(), vec![ItemId(0), ItemId(1), ItemId(2)]);
        assert_eq!(c.item_at(1).map(|i| i.field("label")), Ok(Some("B")));
    }

    #[test]
    fn move_forward_shifts_span_back() {
        let mut c = letters("ABCDE");
        c.move_item(1, 3).unwrap();
        assert_eq!(labels(&c), "ACDBE");
    }

    #[test]
    fn move_backward_shifts_span_forward() {
        let mut c = letters("ABCDE");
        c.move_item(4, 0).unwrap();
        assert_eq!(labels(&c), "EABCD");
    }

    #[test]
    fn wide_move_is_not_a_swap() {
        let mut c = letters("ABCDE");
        c.move_item(0, 4).unwrap();
        assert_eq!(labels(&c), "BCDEA");
        assert_ne!(labels(&c), "EBCDA");
    }

    #[test]
    fn move_same_position_is_noop() {
        let mut c = letters("ABC");
        c.move_item(2, 2).unwrap();
        assert_eq!(labels(&c), "ABC");
    }

    #[test]
    fn move_out_of_range_leaves_order_untouched() {
        let mut c = letters("ABC");
        assert_eq!(
            c.move_item(0, 3),
            Err(CollectionError::OutOfRange {
                position: 3,
                len: 3
            })
        );
        assert_eq!(
            c.move_item(7, 0),
            Err(CollectionError::OutOfRange {
                position: 7,
                len: 3
            })
        );
        assert_eq!(labels(&c), "ABC");
    }

    #[test]
    fn item_at_out_of_range() {
        let c = letters("AB");
        assert!(c.item_at(2).is_err());
        assert!(c.id_at(5).is_err());
        assert!(OrderedCollection::new().is_empty());
    }

    #[test]
    fn identity_survives_reorder() {
        let mut c = letters("ABCD");
        let id_c = c.id_at(2).unwrap();
        c.move_item(2, 0).unwrap();
        assert_eq!(c.position_of(id_c), Some(0));
        assert_eq!(c.item_at(0).unwrap().field("label"), Some("C"));
    }

    #[test]
    fn error_display() {
        let err = CollectionError::OutOfRange {
            position: 9,
            len: 4,
        };
        assert_eq!(err.to_string(), "position 9 out of range for 4 items");
    }
}
