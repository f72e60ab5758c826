// src/sheets/mod.rs

pub mod database;
pub mod definitions;
pub mod sync;

pub use definitions::{FilterCriteria, SheetFilter, TableSnapshot};
