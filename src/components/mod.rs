//! UI components.

pub mod sparkles;
