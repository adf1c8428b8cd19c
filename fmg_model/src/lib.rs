//! # FMG Model
//!
//! The world model crate - reads Fantasy Map Generator exports and decodes
//! their loosely typed arrays into strict entity records.
//! This crate performs no filesystem writes and knows nothing about notes.

pub mod document;
pub mod entities;
pub mod fields;

pub use document::*;
pub use entities::*;
pub use fields::*;
