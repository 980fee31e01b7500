//! treeshake-usage: export usage lattice and module usage records
//!
//! This crate holds the two leaf pieces of usage flagging:
//! - [`UsedExports`], the three-level lattice `Unused ⊑ Named(S) ⊑ All`
//! - [`ModuleUsage`], the per-module state (reachability, usage, owners) and
//!   the single operation allowed to change it
//!
//! # Example
//!
//! ```
//! use treeshake_usage::{ApplyOptions, ApplyOutcome, EntryId, ModuleUsage, UsedExports};
//!
//! let mut record = ModuleUsage::new();
//! let outcome = record.apply(
//!     &UsedExports::named(["render"]),
//!     &EntryId::from("main"),
//!     false,
//!     &ApplyOptions::default(),
//! );
//! assert_eq!(outcome, ApplyOutcome::Expand);
//! assert!(record.used.uses("render"));
//! ```

mod lattice;
mod record;

pub use lattice::{ExportName, UsedExports};
pub use record::{ApplyOptions, ApplyOutcome, EntryId, ModuleUsage, Owners};
