//! Infrastructure adapters. Implement outbound ports.
//!
//! Gemini API, SQLite, terminal UI. Map errors to DomainError.

pub mod ai;
pub mod persistence;
pub mod ui;
