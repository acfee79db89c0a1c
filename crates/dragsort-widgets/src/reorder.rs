#![forbid(unsafe_code)]

//! Incremental reorder.
//!
//! The dragged item is walked from its current hover position toward a
//! target one adjacent slot at a time. Each step is a single
//! [`move_item`](ReorderableSource::move_item) between neighbours, so the
//! dragged item's displayed row stays valid after every step and the net
//! effect of a walk from `a` to `b` equals one relocation from `a` to `b`.
//!
//! Both endpoints are validated before the first step: a walk either runs to
//! completion or leaves the source untouched.

use crate::collection::{CollectionError, ReorderableSource, check_position};

/// Direction of a single adjacent step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    /// Toward position 0.
    TowardStart,
    /// Toward the last position.
    TowardEnd,
}

impl StepDirection {
    /// Direction that brings `hover` closer to `target`, or `None` if they are equal.
    #[must_use]
    pub fn between(hover: usize, target: usize) -> Option<Self> {
        match hover.cmp(&target) {
            std::cmp::Ordering::Greater => Some(Self::TowardStart),
            std::cmp::Ordering::Less => Some(Self::TowardEnd),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Summary of a completed walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walk {
    /// Hover position before the walk.
    pub from: usize,
    /// Hover position after the walk (the target).
    pub to: usize,
    /// Number of adjacent moves performed.
    pub steps: usize,
}

impl Walk {
    /// True if no move happened.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.steps == 0
    }
}

/// Perform one adjacent move of the item at `*hover` toward `target`.
///
/// Returns the direction moved, or `None` if `*hover == target`.
pub fn step_toward<S: ReorderableSource + ?Sized>(
    source: &mut S,
    hover: &mut usize,
    target: usize,
) -> Result<Option<StepDirection>, CollectionError> {
    let len = source.count();
    check_position(*hover, len)?;
    check_position(target, len)?;
    let Some(direction) = StepDirection::between(*hover, target) else {
        return Ok(None);
    };
    let next = match direction {
        StepDirection::TowardStart => *hover - 1,
        StepDirection::TowardEnd => *hover + 1,
    };
    source.move_item(*hover, next)?;
    dragsort_core::trace!(from = *hover, to = next, "adjacent move");
    *hover = next;
    Ok(Some(direction))
}

/// Walk the item at `*hover` to `target`, one adjacent move per step.
///
/// On success `*hover == target`.
pub fn walk_to<S: ReorderableSource + ?Sized>(
    source: &mut S,
    hover: &mut usize,
    target: usize,
) -> Result<Walk, CollectionError> {
    let len = source.count();
    check_position(*hover, len)?;
    check_position(target, len)?;

    let from = *hover;
    let mut steps = 0;
    while step_toward(source, hover, target)?.is_some() {
        steps += 1;
    }
    if steps > 0 {
        dragsort_core::debug!(from, to = target, steps, "reorder walk");
    }
    Ok(Walk {
        from,
        to: *hover,
        steps,
    })
}
