//! # Vault Export
//!
//! Turns a Fantasy Map Generator world document into a folder of
//! cross-linked Markdown notes with YAML front matter.
//!
//! ## Core Components
//!
//! - **transform**: One note builder per entity kind, plus the export loop
//! - **emblems**: Persists crests (embedded SVG, local files, downloads)
//! - **bundles**: Pulls externally generated settlement maps into the vault
//! - **notes**: Note records, link syntax and the Markdown writer
//! - **pipeline**: Validates settings, bootstraps the vault and runs everything
//!
//! ## Failure Model
//!
//! Only an unreadable document or invalid settings stop a run. Malformed
//! kinds, elements and assets are logged and skipped.

pub mod bundles;
pub mod config;
pub mod emblems;
pub mod error;
pub mod lore;
pub mod naming;
pub mod notes;
pub mod pipeline;
pub mod transform;

pub use config::{BundleSettings, ConfigOverrides, ExportConfig, ModeName};
pub use error::*;
pub use pipeline::{prepare_vault, run, ExportSummary};
