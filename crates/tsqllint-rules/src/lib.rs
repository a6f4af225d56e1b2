//! # tsqllint-rules
//!
//! Built-in lint rules for tsqllint.
//!
//! Every rule works on the token stream of a single file.
//!
//! ## Available Rules
//!
//! | Name | Description |
//! |------|-------------|
//! | `keyword-casing` | Reserved keywords must use the configured casing (upper by default) |
//! | `select-star` | Forbids `*` in select lists |
//! | `print-statement` | Forbids `PRINT` |
//! | `information-schema` | Forbids `INFORMATION_SCHEMA` views |
//! | `disallow-cursors` | Forbids `CURSOR` declarations |
//! | `linked-server` | Forbids four-part object names |
//! | `upper-lower` | Discourages `UPPER()` / `LOWER()` |
//!
//! ## Usage
//!
//! ```ignore
//! use tsqllint_core::Analyzer;
//! use tsqllint_rules::{KeywordCasing, SelectStar};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./sql")
//!     .rule(KeywordCasing::new())
//!     .rule(SelectStar::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod disallow_cursors;
pub mod information_schema;
pub mod keyword_casing;
pub mod linked_server;
pub mod print_statement;
pub mod select_star;
pub mod upper_lower;

mod presets;
mod registry;
mod sql;

pub use disallow_cursors::DisallowCursors;
pub use information_schema::InformationSchema;
pub use keyword_casing::{Casing, KeywordCasing};
pub use linked_server::LinkedServer;
pub use presets::{all_rules, minimal_rules, recommended_rules, strict_rules, Preset, UnknownPreset};
pub use print_statement::PrintStatement;
pub use registry::{all_rule_names, resolve_rules, rule_by_name, select_rules};
pub use select_star::SelectStar;
pub use upper_lower::UpperLower;

/// Re-export core types for convenience.
pub use tsqllint_core::{RawViolation, Rule, Severity};
