#![forbid(unsafe_code)]

//! Drag-to-reorder for virtualized lists.
//!
//! A [`DragController`](controller::DragController) attaches to any list
//! container implementing [`ListHost`](host::ListHost). Pressing a row's
//! trailing handle starts a drag; moving the pointer walks the item through
//! the ordered source one adjacent slot at a time, and resting on the first
//! or last visible row scrolls the list with the item in tow.
//!
//! # Quick start
//!
//! ```ignore
//! let mut adapter = RowAdapter::new(collection, AdapterConfig::new(template, bindings))?;
//! let mut controller = DragController::new(DragConfig::default())?;
//! let mut cx = DragContext::new(&mut list, &mut adapter, &mut preview);
//! controller.set_drag_mode(true, &mut cx);
//! let transition = controller.handle_pointer(&event, &mut cx)?;
//! if transition.effect.is_forwarded() {
//!     list.default_pointer_handling(&event);
//! }
//! ```

pub mod adapter;
pub mod autoscroll;
pub mod collection;
pub mod config;
pub mod controller;
pub mod host;
pub mod preview;
pub mod reorder;

pub use adapter::{AdapterError, Binder, RowAdapter};
pub use collection::{ItemId, OrderedCollection, OrderedSource, ReorderableSource};
pub use config::{DragConfig, HandleIcon};
pub use controller::{DragContext, DragController, DragEffect, DragError, DragState};
pub use host::ListHost;
pub use preview::FloatingPreview;
