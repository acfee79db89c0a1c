#![forbid(unsafe_code)]

//! The scripted walkthrough.
//!
//! Builds the two-field demo list, switches drag mode on, picks up a row by
//! its handle, rests on the bottom edge so auto-scroll carries the item
//! down, pulls it back into the middle of the window, and drops it.

use std::fmt;
use std::time::Duration;

use dragsort_harness::{Harness, SimulatedList};
use dragsort_widgets::adapter::{
    AdapterConfig, AdapterError, BoundRow, FieldBinding, RowAdapter, RowContent, RowTemplate,
};
use dragsort_widgets::autoscroll::TickOutcome;
use dragsort_widgets::collection::OrderedCollection;
use dragsort_widgets::config::{ConfigError, DragConfig, ResourceId};
use dragsort_widgets::controller::{DragEffect, DragError};
use dragsort_widgets::host::ListHost;

use crate::cli::Opts;

/// Field shown in the first line of each row.
pub const FIELD_TEXT: &str = "item1";
/// Field shown in the second line of each row.
pub const FIELD_NAME: &str = "item2";

/// The demo data set: every item carries the same text and a numbered name.
#[must_use]
pub fn demo_items(count: usize) -> OrderedCollection {
    OrderedCollection::from_records((0..count).map(|i| {
        [
            (FIELD_TEXT, "Text text text !".to_string()),
            (FIELD_NAME, format!("Item number {i}")),
        ]
    }))
}

/// What happened during the walkthrough.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Names in display order before the drag.
    pub before: Vec<String>,
    /// Names in display order after the drop.
    pub after: Vec<String>,
    /// Name of the item that was dragged, if a drag started.
    pub dragged: Option<String>,
    /// Position the item was dropped at.
    pub dropped_at: Option<usize>,
    /// Auto-scroll ticks that ran.
    pub ticks: usize,
    /// Whether auto-scroll hit the end of the list.
    pub reached_boundary: bool,
    /// Rendered visible rows after the drop.
    pub screen: Vec<String>,
}

/// Errors that abort the walkthrough.
#[derive(Debug)]
pub enum DemoError {
    Config(ConfigError),
    Drag(DragError),
    Bind(AdapterError),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid setup: {err}"),
            Self::Drag(err) => write!(f, "drag failed: {err}"),
            Self::Bind(err) => write!(f, "row binding failed: {err}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Drag(err) => Some(err),
            Self::Bind(err) => Some(err),
        }
    }
}

impl From<ConfigError> for DemoError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<DragError> for DemoError {
    fn from(err: DragError) -> Self {
        Self::Drag(err)
    }
}

impl From<AdapterError> for DemoError {
    fn from(err: AdapterError) -> Self {
        Self::Bind(err)
    }
}

fn names(h: &Harness) -> Vec<String> {
    h.adapter
        .source()
        .iter()
        .map(|item| item.field(FIELD_NAME).unwrap_or_default().to_string())
        .collect()
}

/// Render one bound row as a line of text.
#[must_use]
pub fn render_row(row: &BoundRow) -> String {
    let body = match &row.content {
        RowContent::Placeholder { image } => format!("[{image}]"),
        RowContent::Bound(view) => format!(
            "{:<16} {}",
            view.text(FIELD_NAME).unwrap_or_default(),
            view.text(FIELD_TEXT).unwrap_or_default()
        ),
    };
    match &row.handle {
        Some(handle) => format!("{:>3} {body:<36} {}", row.position, handle.icon),
        None => format!("{:>3} {body}", row.position),
    }
}

/// Run the scripted drag described by `opts`.
pub fn run(opts: &Opts) -> Result<Report, DemoError> {
    let config = AdapterConfig::new(
        RowTemplate::new(2).with_text("text1").with_text("text2"),
        FieldBinding::zip(&[FIELD_TEXT, FIELD_NAME], &["text1", "text2"])?,
    )
    .with_placeholder(ResourceId::new("placeholder"));
    let adapter = RowAdapter::new(demo_items(opts.items), config)?;
    // Row heights come from the template; the list only fixes the width.
    let list = SimulatedList::new(opts.items, opts.rows).with_width(48);
    let drag = DragConfig::default()
        .with_overlay_color(opts.color)
        .with_overlay_opacity(opts.opacity);
    let mut h = Harness::new(adapter, list, drag)?;

    if opts.drag_mode {
        h.set_drag_mode(true);
    }
    let before = names(&h);
    let mut report = Report {
        before: before.clone(),
        after: before,
        dragged: None,
        dropped_at: None,
        ticks: 0,
        reached_boundary: false,
        screen: Vec::new(),
    };

    let pressed = h.press(opts.from)?;
    let DragEffect::Started { origin, .. } = pressed.effect else {
        tracing::info!(effect = ?pressed.effect, "press was not a drag");
        report.screen = h.visible_rows()?.iter().map(render_row).collect();
        return Ok(report);
    };
    report.dragged = report.before.get(origin).cloned();

    if let Some(bottom) = h.list.last_visible() {
        h.drag_to(bottom)?;
    }
    h.advance(Duration::from_millis(opts.hold_ms))?;

    if let (Some(first), Some(last)) = (h.list.first_visible(), h.list.last_visible()) {
        h.drag_to(first + (last - first) / 2)?;
    }
    let released = h.release()?;
    if let DragEffect::Released { position, .. } = released.effect {
        report.dropped_at = Some(position);
    }

    report.ticks = h.ticks().len();
    report.reached_boundary = h
        .ticks()
        .iter()
        .any(|t| matches!(t, TickOutcome::BoundaryReached { .. }));
    report.after = names(&h);
    report.screen = h.visible_rows()?.iter().map(render_row).collect();
    Ok(report)
}
