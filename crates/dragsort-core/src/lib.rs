#![forbid(unsafe_code)]

//! Core: geometry, pointer events, colors, and the logging facade shared by
//! the dragsort crates.

pub mod color;
pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, info, trace, trace_span, warn};
