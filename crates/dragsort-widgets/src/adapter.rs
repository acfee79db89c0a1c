#![forbid(unsafe_code)]

//! Row presentation for a reorderable list.
//!
//! [`RowAdapter`] decides, for each displayed position, whether the row shows
//! its bound content, bound content with a drag handle overlay (drag mode on),
//! or a full-row placeholder (the position currently hovered by an active
//! drag). Binding of item fields into row slots goes through an optional
//! [`Binder`]; slots the binder declines fall back to plain text binding.
//!
//! The adapter owns the ordered source. All reads by the host's rendering
//! path go through it, and every state change is accumulated as a
//! [`DataChange`] until the controller forwards it to the host.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Result |
//! |---------|-------|--------|
//! | Bad template/bindings | Unknown slot, duplicates, empty template | [`ConfigError`] from [`RowAdapter::new`] |
//! | Non-text slot, binder declines | No binder, or binder returns `false` | [`AdapterError::UnsupportedSlotType`] |
//! | Position outside `0..count` | Stale position from the host | [`AdapterError::Collection`] |

use std::collections::HashSet;
use std::fmt;

use crate::collection::{CollectionError, Item, ItemId, OrderedSource};
use crate::config::{ConfigError, HandleIcon, ResourceId};
use crate::host::DataChange;

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// Identifier of a slot in the row template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotId(pub String);

impl From<&str> for SlotId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a slot can display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// A text label. The only kind the default binding handles.
    Text,
    /// An image.
    Image,
    /// Anything else, named by the integrator (e.g. `"checkbox"`).
    Custom(String),
}

impl SlotKind {
    /// True if the default text binding can fill this slot.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Image => f.write_str("image"),
            Self::Custom(name) => f.write_str(name),
        }
    }
}

/// One slot declared by the row template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSpec {
    pub id: SlotId,
    pub kind: SlotKind,
}

/// Layout template for a row: its slots and minimum height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTemplate {
    slots: Vec<SlotSpec>,
    min_height: u16,
}

impl RowTemplate {
    /// An empty template whose rows are at least `min_height` cells tall.
    #[must_use]
    pub fn new(min_height: u16) -> Self {
        Self {
            slots: Vec::new(),
            min_height,
        }
    }

    /// Declare a slot.
    #[must_use]
    pub fn with_slot(mut self, id: impl Into<SlotId>, kind: SlotKind) -> Self {
        self.slots.push(SlotSpec {
            id: id.into(),
            kind,
        });
        self
    }

    /// Declare a text slot.
    #[must_use]
    pub fn with_text(self, id: impl Into<SlotId>) -> Self {
        self.with_slot(id, SlotKind::Text)
    }

    /// Declared slots, in template order.
    #[must_use]
    pub fn slots(&self) -> &[SlotSpec] {
        &self.slots
    }

    /// Minimum row height.
    #[must_use]
    pub const fn min_height(&self) -> u16 {
        self.min_height
    }

    fn slot(&self, id: &SlotId) -> Option<&SlotSpec> {
        self.slots.iter().find(|s| &s.id == id)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.slots.is_empty() {
            return Err(ConfigError::EmptyTemplate);
        }
        if self.min_height == 0 {
            return Err(ConfigError::ZeroRowHeight);
        }
        let mut seen = HashSet::new();
        for slot in &self.slots {
            if !seen.insert(&slot.id) {
                return Err(ConfigError::DuplicateSlot(slot.id.0.clone()));
            }
        }
        Ok(())
    }
}

/// Maps an item field onto a template slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    pub field: String,
    pub slot: SlotId,
}

impl FieldBinding {
    /// Bind `field` to `slot`.
    #[must_use]
    pub fn new(field: impl Into<String>, slot: impl Into<SlotId>) -> Self {
        Self {
            field: field.into(),
            slot: slot.into(),
        }
    }

    /// Pair up parallel lists of field keys and slot ids.
    pub fn zip(fields: &[&str], slots: &[&str]) -> Result<Vec<Self>, ConfigError> {
        if fields.len() != slots.len() {
            return Err(ConfigError::BindingLengthMismatch {
                fields: fields.len(),
                slots: slots.len(),
            });
        }
        Ok(fields
            .iter()
            .zip(slots)
            .map(|(field, slot)| Self::new(*field, *slot))
            .collect())
    }
}

/// Everything the adapter needs at construction.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Row layout template.
    pub template: RowTemplate,
    /// Field → slot mappings, applied in order.
    pub bindings: Vec<FieldBinding>,
    /// Image tiled across placeholder rows.
    pub placeholder: ResourceId,
    /// Drag handle shown at the trailing edge while drag mode is on.
    pub handle: HandleIcon,
}

impl AdapterConfig {
    /// Configuration with the default placeholder and handle.
    #[must_use]
    pub fn new(template: RowTemplate, bindings: Vec<FieldBinding>) -> Self {
        Self {
            template,
            bindings,
            placeholder: ResourceId::new("placeholder"),
            handle: HandleIcon::default(),
        }
    }

    /// Set the placeholder image.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: ResourceId) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Set the handle icon.
    #[must_use]
    pub fn with_handle(mut self, handle: HandleIcon) -> Self {
        self.handle = handle;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.template.validate()?;
        for binding in &self.bindings {
            if self.template.slot(&binding.slot).is_none() {
                return Err(ConfigError::UnknownSlot {
                    field: binding.field.clone(),
                    slot: binding.slot.0.clone(),
                });
            }
        }
        if self.handle.width == 0 {
            return Err(ConfigError::ZeroHandleWidth);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Bound rows
// ---------------------------------------------------------------------------

/// Value placed in a slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SlotValue {
    /// Nothing bound yet.
    #[default]
    Unset,
    /// Text content.
    Text(String),
    /// An image resource.
    Image(ResourceId),
    /// Integrator-defined content for custom slots.
    Custom(String),
}

/// A slot inside a [`RowView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundSlot {
    pub spec: SlotSpec,
    pub value: SlotValue,
}

/// The materialized row a [`Binder`] writes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Position the row displays.
    pub position: usize,
    /// Identity of the item displayed.
    pub item: ItemId,
    slots: Vec<BoundSlot>,
}

impl RowView {
    fn from_template(position: usize, item: ItemId, template: &RowTemplate) -> Self {
        Self {
            position,
            item,
            slots: template
                .slots
                .iter()
                .map(|spec| BoundSlot {
                    spec: spec.clone(),
                    value: SlotValue::Unset,
                })
                .collect(),
        }
    }

    /// All slots in template order.
    #[must_use]
    pub fn slots(&self) -> &[BoundSlot] {
        &self.slots
    }

    /// Look up a slot.
    #[must_use]
    pub fn slot(&self, id: &SlotId) -> Option<&BoundSlot> {
        self.slots.iter().find(|s| &s.spec.id == id)
    }

    /// Set the value of a slot. Returns false if the slot does not exist.
    pub fn set(&mut self, id: &SlotId, value: SlotValue) -> bool {
        match self.slots.iter_mut().find(|s| &s.spec.id == id) {
            Some(slot) => {
                slot.value = value;
                true
            }
            None => false,
        }
    }

    /// Text content of a slot, if it holds text.
    #[must_use]
    pub fn text(&self, id: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|s| s.spec.id.0 == id)
            .and_then(|s| match &s.value {
                SlotValue::Text(t) => Some(t.as_str()),
                _ => None,
            })
    }
}

/// Drag handle overlay drawn over a normal row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleOverlay {
    pub icon: ResourceId,
    pub width: u16,
}

/// What a row renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowContent {
    /// Normal bound content.
    Bound(RowView),
    /// Full-row placeholder standing in for the dragged item.
    Placeholder { image: ResourceId },
}

/// A fully resolved row, ready for the host to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundRow {
    /// Position in the ordered source.
    pub position: usize,
    /// Layout height in cells. A placeholder has the height of the row it replaces.
    pub height: u16,
    /// Row content.
    pub content: RowContent,
    /// Handle overlay, present on normal rows while drag mode is on.
    pub handle: Option<HandleOverlay>,
}

impl BoundRow {
    /// True if this row is the drag placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self.content, RowContent::Placeholder { .. })
    }

    /// The bound view, unless this is a placeholder.
    #[must_use]
    pub fn view(&self) -> Option<&RowView> {
        match &self.content {
            RowContent::Bound(view) => Some(view),
            RowContent::Placeholder { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Binder
// ---------------------------------------------------------------------------

/// Pluggable binding of a field value into a slot.
///
/// Return `true` if the slot was handled. Returning `false` hands the slot to
/// the default text binding, which only accepts [`SlotKind::Text`].
pub trait Binder {
    fn try_bind(&self, row: &mut RowView, slot: &SlotSpec, value: Option<&str>, field: &str)
    -> bool;
}

impl<F> Binder for F
where
    F: Fn(&mut RowView, &SlotSpec, Option<&str>, &str) -> bool,
{
    fn try_bind(
        &self,
        row: &mut RowView,
        slot: &SlotSpec,
        value: Option<&str>,
        field: &str,
    ) -> bool {
        self(row, slot, value, field)
    }
}

/// Errors from binding a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// No binder handled a non-text slot.
    UnsupportedSlotType {
        slot: SlotId,
        kind: SlotKind,
        field: String,
    },
    /// The requested position does not exist.
    Collection(CollectionError),
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedSlotType { slot, kind, field } => write!(
                f,
                "slot {slot:?} of kind {kind} cannot be bound from field {field:?} without a binder"
            ),
            Self::Collection(err) => write!(f, "row binding failed: {err}"),
        }
    }
}

impl std::error::Error for AdapterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Collection(err) => Some(err),
            Self::UnsupportedSlotType { .. } => None,
        }
    }
}

impl From<CollectionError> for AdapterError {
    fn from(err: CollectionError) -> Self {
        Self::Collection(err)
    }
}

// ---------------------------------------------------------------------------
// RowAdapter
// ---------------------------------------------------------------------------

/// Presentation adapter over an ordered source.
pub struct RowAdapter<S> {
    source: S,
    config: AdapterConfig,
    binder: Option<Box<dyn Binder>>,
    drag_mode: bool,
    hover: Option<usize>,
    pending: DataChange,
}

impl<S: fmt::Debug> fmt::Debug for RowAdapter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowAdapter")
            .field("source", &self.source)
            .field("config", &self.config)
            .field("binder", &self.binder.as_ref().map(|_| ".."))
            .field("drag_mode", &self.drag_mode)
            .field("hover", &self.hover)
            .field("pending", &self.pending)
            .finish()
    }
}

impl<S: OrderedSource> RowAdapter<S> {
    /// Build an adapter, rejecting an inconsistent configuration up front.
    pub fn new(source: S, config: AdapterConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            dragsort_core::warn!(%err, "row adapter configuration rejected");
            return Err(err);
        }
        Ok(Self {
            source,
            config,
            binder: None,
            drag_mode: false,
            hover: None,
            pending: DataChange::empty(),
        })
    }

    /// Install a custom binder, replacing any previous one.
    pub fn set_binder(&mut self, binder: impl Binder + 'static) {
        self.binder = Some(Box::new(binder));
        self.pending |= DataChange::SOURCE;
    }

    /// Remove the custom binder.
    pub fn clear_binder(&mut self) {
        self.binder = None;
        self.pending |= DataChange::SOURCE;
    }

    /// The backing source (read-only).
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    pub(crate) fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Swap in a new source, returning the old one.
    ///
    /// Clears the hover position; the caller is responsible for ending any
    /// drag first.
    pub fn reload(&mut self, source: S) -> S {
        self.hover = None;
        self.pending |= DataChange::SOURCE | DataChange::HOVER;
        std::mem::replace(&mut self.source, source)
    }

    /// Number of rows.
    #[must_use]
    pub fn count(&self) -> usize {
        self.source.count()
    }

    /// Item at `position`.
    pub fn item(&self, position: usize) -> Result<&Item, CollectionError> {
        self.source.item_at(position)
    }

    /// Identity of the item at `position`.
    pub fn item_id(&self, position: usize) -> Result<ItemId, CollectionError> {
        self.source.id_at(position)
    }

    /// Show or hide handle overlays. Always requests a full redraw.
    pub fn set_drag_mode(&mut self, enabled: bool) {
        self.drag_mode = enabled;
        self.pending |= DataChange::DRAG_MODE;
    }

    /// Whether handle overlays are shown.
    #[must_use]
    pub const fn drag_mode(&self) -> bool {
        self.drag_mode
    }

    /// Set which position (if any) renders as the placeholder.
    pub fn set_hover(&mut self, hover: Option<usize>) {
        self.hover = hover;
        self.pending |= DataChange::HOVER;
    }

    /// The position rendering as the placeholder.
    #[must_use]
    pub const fn hover(&self) -> Option<usize> {
        self.hover
    }

    /// Record that the source order changed.
    pub(crate) fn mark_reordered(&mut self) {
        self.pending |= DataChange::ORDER;
    }

    /// Changes accumulated since the last call, clearing them.
    pub fn take_changes(&mut self) -> DataChange {
        std::mem::take(&mut self.pending)
    }

    /// Changes accumulated and not yet taken.
    #[must_use]
    pub const fn pending_changes(&self) -> DataChange {
        self.pending
    }

    /// Handle icon configuration.
    #[must_use]
    pub fn handle(&self) -> &HandleIcon {
        &self.config.handle
    }

    /// Width of the handle hit region.
    #[must_use]
    pub fn handle_width(&self) -> u16 {
        self.config.handle.width
    }

    /// Row template.
    #[must_use]
    pub fn template(&self) -> &RowTemplate {
        &self.config.template
    }

    /// Rendered height of the row at `position`: the tallest text slot's
    /// line count, but at least the template's minimum height.
    pub fn measure(&self, position: usize) -> Result<u16, CollectionError> {
        let item = self.source.item_at(position)?;
        let template = &self.config.template;
        let tallest = self
            .config
            .bindings
            .iter()
            .filter(|b| template.slot(&b.slot).is_some_and(|s| s.kind.is_text()))
            .filter_map(|b| item.field(&b.field))
            .map(|text| text.lines().count().max(1))
            .max()
            .unwrap_or(0);
        let tallest = u16::try_from(tallest).unwrap_or(u16::MAX);
        Ok(tallest.max(template.min_height))
    }

    /// Bind the normal content of `position`, ignoring the hover state.
    pub fn bind_content(&self, position: usize) -> Result<RowView, AdapterError> {
        let item = self.source.item_at(position)?;
        let mut row = RowView::from_template(position, item.id(), &self.config.template);
        for binding in &self.config.bindings {
            // Bindings were validated against the template at construction.
            let Some(spec) = self.config.template.slot(&binding.slot) else {
                continue;
            };
            let value = item.field(&binding.field);
            let handled = self
                .binder
                .as_ref()
                .is_some_and(|binder| binder.try_bind(&mut row, spec, value, &binding.field));
            if handled {
                continue;
            }
            if !spec.kind.is_text() {
                return Err(AdapterError::UnsupportedSlotType {
                    slot: spec.id.clone(),
                    kind: spec.kind.clone(),
                    field: binding.field.clone(),
                });
            }
            row.set(
                &spec.id,
                SlotValue::Text(value.unwrap_or_default().to_string()),
            );
        }
        Ok(row)
    }

    /// Resolve the row displayed at `position`.
    pub fn bind(&self, position: usize) -> Result<BoundRow, AdapterError> {
        let height = self.measure(position)?;
        if self.hover == Some(position) {
            return Ok(BoundRow {
                position,
                height,
                content: RowContent::Placeholder {
                    image: self.config.placeholder.clone(),
                },
                handle: None,
            });
        }
        let view = self.bind_content(position)?;
        let handle = self.drag_mode.then(|| HandleOverlay {
            icon: self.config.handle.resource.clone(),
            width: self.config.handle.width,
        });
        Ok(BoundRow {
            position,
            height,
            content: RowContent::Bound(view),
            handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{Item, OrderedCollection};

    fn demo_source(n: usize) -> OrderedCollection {
        OrderedCollection::from_records((0..n).map(|i| {
            [
                ("item1", "Text text text !".to_string()),
                ("item2", format!("Item number {i}")),
            ]
        }))
    }

    fn text_config() -> AdapterConfig {
        AdapterConfig::new(
            RowTemplate::new(1).with_text("title").with_text("subtitle"),
            FieldBinding::zip(&["item1", "item2"], &["title", "subtitle"]).unwrap(),
        )
    }

    fn adapter(n: usize) -> RowAdapter<OrderedCollection> {
        RowAdapter::new(demo_source(n), text_config()).unwrap()
    }

    #[test]
    fn binds_text_slots_by_default() {
        let a = adapter(3);
        let row = a.bind(2).unwrap();
        assert!(!row.is_placeholder());
        let view = row.view().unwrap();
        assert_eq!(view.text("title"), Some("Text text text !"));
        assert_eq!(view.text("subtitle"), Some("Item number 2"));
        assert_eq!(view.item, ItemId(2));
        assert!(row.handle.is_none());
    }

    #[test]
    fn missing_field_binds_empty_text() {
        let source: OrderedCollection =
            std::iter::once(Item::new(ItemId(7)).with_field("item1", "only")).collect();
        let a = RowAdapter::new(source, text_config()).unwrap();
        let row = a.bind(0).unwrap();
        assert_eq!(row.view().unwrap().text("subtitle"), Some(""));
    }

    #[test]
    fn drag_mode_adds_handle_overlay() {
        let mut a = adapter(2);
        a.set_drag_mode(true);
        let row = a.bind(0).unwrap();
        let handle = row.handle.expect("handle overlay");
        assert_eq!(handle.width, a.handle_width());
    }

    #[test]
    fn hover_position_renders_placeholder() {
        let mut a = adapter(3);
        a.set_drag_mode(true);
        a.set_hover(Some(1));
        let row = a.bind(1).unwrap();
        assert!(row.is_placeholder());
        assert!(row.handle.is_none());
        assert!(!a.bind(0).unwrap().is_placeholder());
    }

    #[test]
    fn placeholder_takes_measured_height() {
        let source: OrderedCollection = vec![
            Item::new(ItemId(0))
                .with_field("item1", "one")
                .with_field("item2", "a"),
            Item::new(ItemId(1))
                .with_field("item1", "two\nlines\nhere")
                .with_field("item2", "b"),
        ]
        .into_iter()
        .collect();
        let mut a = RowAdapter::new(source, text_config()).unwrap();
        let normal = a.bind(1).unwrap();
        a.set_hover(Some(1));
        let placeholder = a.bind(1).unwrap();
        assert!(placeholder.is_placeholder());
        assert_eq!(normal.height, 3);
        assert_eq!(placeholder.height, normal.height);
        assert_eq!(a.bind(0).unwrap().height, 1);
    }

    #[test]
    fn min_height_floors_measurement() {
        let config = AdapterConfig::new(
            RowTemplate::new(2).with_text("title"),
            vec![FieldBinding::new("item1", "title")],
        );
        let a = RowAdapter::new(demo_source(1), config).unwrap();
        assert_eq!(a.measure(0), Ok(2));
    }

    #[test]
    fn hover_and_drag_mode_are_independent() {
        let mut a = adapter(4);
        a.set_hover(Some(2));
        a.set_drag_mode(true);
        assert_eq!(a.hover(), Some(2));
        a.set_drag_mode(false);
        assert_eq!(a.hover(), Some(2));
        a.set_hover(None);
        assert!(!a.drag_mode());
        a.set_drag_mode(true);
        a.set_hover(Some(0));
        assert!(a.drag_mode());
    }

    #[test]
    fn changes_accumulate_until_taken() {
        let mut a = adapter(2);
        assert!(a.pending_changes().is_empty());
        a.set_drag_mode(true);
        a.set_hover(Some(0));
        assert_eq!(a.take_changes(), DataChange::DRAG_MODE | DataChange::HOVER);
        assert!(a.take_changes().is_empty());
    }

    #[test]
    fn image_slot_without_binder_is_rejected() {
        let config = AdapterConfig::new(
            RowTemplate::new(1).with_text("title").with_slot("icon", SlotKind::Image),
            vec![
                FieldBinding::new("item1", "title"),
                FieldBinding::new("item2", "icon"),
            ],
        );
        let a = RowAdapter::new(demo_source(1), config).unwrap();
        assert_eq!(
            a.bind(0),
            Err(AdapterError::UnsupportedSlotType {
                slot: SlotId::from("icon"),
                kind: SlotKind::Image,
                field: "item2".to_string(),
            })
        );
    }

    #[test]
    fn binder_handles_non_text_slot() {
        let config = AdapterConfig::new(
            RowTemplate::new(1).with_text("title").with_slot("icon", SlotKind::Image),
            vec![
                FieldBinding::new("item1", "title"),
                FieldBinding::new("item2", "icon"),
            ],
        );
        let mut a = RowAdapter::new(demo_source(1), config).unwrap();
        a.set_binder(
            |row: &mut RowView, slot: &SlotSpec, value: Option<&str>, _field: &str| {
                if slot.kind != SlotKind::Image {
                    return false;
                }
                let name = value.unwrap_or("blank").replace(' ', "-");
                row.set(&slot.id, SlotValue::Image(ResourceId::new(name)))
            },
        );
        let row = a.bind(0).unwrap();
        let view = row.view().unwrap();
        assert_eq!(view.text("title"), Some("Text text text !"));
        assert_eq!(
            view.slot(&SlotId::from("icon")).map(|s| &s.value),
            Some(&SlotValue::Image(ResourceId::new("Item-number-0")))
        );
    }

    #[test]
    fn binder_declining_text_falls_back() {
        let mut a = adapter(1);
        a.set_binder(|_: &mut RowView, _: &SlotSpec, _: Option<&str>, _: &str| false);
        assert_eq!(
            a.bind(0).unwrap().view().unwrap().text("title"),
            Some("Text text text !")
        );
    }

    #[test]
    fn out_of_range_bind_fails() {
        let a = adapter(2);
        assert_eq!(
            a.bind(2),
            Err(AdapterError::Collection(CollectionError::OutOfRange {
                position: 2,
                len: 2
            }))
        );
    }

    #[test]
    fn config_rejects_unknown_slot() {
        let config = AdapterConfig::new(
            RowTemplate::new(1).with_text("title"),
            vec![FieldBinding::new("item1", "nope")],
        );
        assert_eq!(
            RowAdapter::new(demo_source(1), config).err(),
            Some(ConfigError::UnknownSlot {
                field: "item1".to_string(),
                slot: "nope".to_string()
            })
        );
    }

    #[test]
    fn config_rejects_duplicates_and_empties() {
        let dup = AdapterConfig::new(RowTemplate::new(1).with_text("a").with_text("a"), vec![]);
        assert_eq!(
            RowAdapter::new(demo_source(1), dup).err(),
            Some(ConfigError::DuplicateSlot("a".to_string()))
        );
        let empty = AdapterConfig::new(RowTemplate::new(1), vec![]);
        assert_eq!(
            RowAdapter::new(demo_source(1), empty).err(),
            Some(ConfigError::EmptyTemplate)
        );
        let flat = AdapterConfig::new(RowTemplate::new(0).with_text("a"), vec![]);
        assert_eq!(
            RowAdapter::new(demo_source(1), flat).err(),
            Some(ConfigError::ZeroRowHeight)
        );
        let no_handle = text_config().with_handle(HandleIcon::glyph(""));
        assert_eq!(
            RowAdapter::new(demo_source(1), no_handle).err(),
            Some(ConfigError::ZeroHandleWidth)
        );
    }

    #[test]
    fn zip_rejects_length_mismatch() {
        assert_eq!(
            FieldBinding::zip(&["a", "b"], &["x"]),
            Err(ConfigError::BindingLengthMismatch {
                fields: 2,
                slots: 1
            })
        );
    }

    #[test]
    fn reload_swaps_source_and_clears_hover() {
        let mut a = adapter(3);
        a.set_hover(Some(1));
        a.take_changes();
        let old = a.reload(demo_source(5));
        assert_eq!(old.count(), 3);
        assert_eq!(a.count(), 5);
        assert_eq!(a.hover(), None);
        assert!(a.take_changes().contains(DataChange::SOURCE));
    }

    #[test]
    fn error_source_chain() {
        use std::error::Error;
        let err = AdapterError::from(CollectionError::OutOfRange {
            position: 1,
            len: 0,
        });
        assert!(err.source().is_some());
        assert!(err.to_string().contains("out of range"));
    }
}
