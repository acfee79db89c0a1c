#![forbid(unsafe_code)]

//! Scripted drag-to-reorder demo over a simulated list.

pub mod cli;
pub mod walkthrough;
