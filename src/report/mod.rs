//! Report output.

pub mod generator;

pub use generator::{console_summary, render, write_report};
