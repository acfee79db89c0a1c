#![forbid(unsafe_code)]

//! Construction-time configuration.
//!
//! Everything here is validated when the adapter or controller is built, so a
//! misconfigured list fails at setup instead of on the first drag.

use std::fmt;
use std::time::Duration;

use dragsort_core::color::Rgba;
use dragsort_core::event::PointerButton;
use unicode_width::UnicodeWidthStr;

/// Default interval between auto-scroll ticks.
pub const DEFAULT_AUTOSCROLL_INTERVAL: Duration = Duration::from_millis(100);

/// Default overlay opacity for the floating preview.
pub const DEFAULT_OVERLAY_OPACITY: f32 = 0.5;

/// Identifier of an image or glyph resource supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(pub String);

impl ResourceId {
    /// Create a resource identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The drag handle drawn at the trailing edge of each row.
///
/// Its width defines the horizontal extent of the handle hit region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleIcon {
    /// Resource drawn for the handle.
    pub resource: ResourceId,
    /// Width of the handle in cells.
    pub width: u16,
}

impl HandleIcon {
    /// A handle backed by an arbitrary resource of known width.
    #[must_use]
    pub fn new(resource: ResourceId, width: u16) -> Self {
        Self { resource, width }
    }

    /// A handle drawn as a text glyph; its width is the glyph's display width.
    #[must_use]
    pub fn glyph(glyph: &str) -> Self {
        let width = u16::try_from(glyph.width()).unwrap_or(u16::MAX);
        Self {
            resource: ResourceId::new(glyph),
            width,
        }
    }
}

impl Default for HandleIcon {
    fn default() -> Self {
        Self::glyph("☰")
    }
}

/// Controller configuration.
#[derive(Debug, Clone)]
pub struct DragConfig {
    /// Background tint applied to the floating preview snapshot (default: green).
    pub overlay_color: Rgba,
    /// Opacity of the floating preview, `0.0..=1.0` (default: 0.5).
    pub overlay_opacity: f32,
    /// Delay between auto-scroll ticks (default: 100 ms).
    pub autoscroll_interval: Duration,
    /// Button that arms a drag (default: primary).
    pub handle_button: PointerButton,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            overlay_color: Rgba::GREEN,
            overlay_opacity: DEFAULT_OVERLAY_OPACITY,
            autoscroll_interval: DEFAULT_AUTOSCROLL_INTERVAL,
            handle_button: PointerButton::Primary,
        }
    }
}

impl DragConfig {
    /// Set the overlay color.
    #[must_use]
    pub fn with_overlay_color(mut self, color: Rgba) -> Self {
        self.overlay_color = color;
        self
    }

    /// Set overlay opacity (clamped to 0.0..=1.0).
    #[must_use]
    pub fn with_overlay_opacity(mut self, opacity: f32) -> Self {
        self.overlay_opacity = if opacity.is_nan() {
            DEFAULT_OVERLAY_OPACITY
        } else {
            opacity.clamp(0.0, 1.0)
        };
        self
    }

    /// Set the auto-scroll tick interval.
    #[must_use]
    pub fn with_autoscroll_interval(mut self, interval: Duration) -> Self {
        self.autoscroll_interval = interval;
        self
    }

    /// Set the button that arms a drag.
    #[must_use]
    pub fn with_handle_button(mut self, button: PointerButton) -> Self {
        self.handle_button = button;
        self
    }

    /// The overlay color with the configured opacity folded into its alpha.
    #[must_use]
    pub fn preview_tint(&self) -> Rgba {
        self.overlay_color.with_opacity(self.overlay_opacity)
    }

    /// Check values that the builder methods cannot guarantee when the struct
    /// is filled in directly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.overlay_opacity) {
            return Err(ConfigError::OpacityOutOfRange(self.overlay_opacity));
        }
        if self.autoscroll_interval.is_zero() {
            return Err(ConfigError::ZeroAutoScrollInterval);
        }
        Ok(())
    }
}

/// Configuration rejected at setup time.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The row template declares no slots.
    EmptyTemplate,
    /// The row template has a minimum height of zero.
    ZeroRowHeight,
    /// Two template slots share an id.
    DuplicateSlot(String),
    /// A field binding targets a slot the template does not declare.
    UnknownSlot { field: String, slot: String },
    /// Field keys and slot ids were supplied as lists of different lengths.
    BindingLengthMismatch { fields: usize, slots: usize },
    /// The handle icon has zero width, so no drag could ever be armed.
    ZeroHandleWidth,
    /// Overlay opacity outside `0.0..=1.0` (or NaN).
    OpacityOutOfRange(f32),
    /// Auto-scroll interval of zero would spin the event queue.
    ZeroAutoScrollInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTemplate => write!(f, "row template declares no slots"),
            Self::ZeroRowHeight => write!(f, "row template minimum height must be > 0"),
            Self::DuplicateSlot(slot) => write!(f, "duplicate slot id {slot:?} in row template"),
            Self::UnknownSlot { field, slot } => {
                write!(f, "field {field:?} is bound to unknown slot {slot:?}")
            }
            Self::BindingLengthMismatch { fields, slots } => write!(
                f,
                "{fields} field keys supplied for {slots} slots; the lists must pair up"
            ),
            Self::ZeroHandleWidth => write!(f, "drag handle icon has zero width"),
            Self::OpacityOutOfRange(value) => {
                write!(f, "overlay opacity must be in [0, 1] (got {value})")
            }
            Self::ZeroAutoScrollInterval => write!(f, "auto-scroll interval must be > 0"),
        }
    }
}

impl std::error::Error for ConfigError {}
