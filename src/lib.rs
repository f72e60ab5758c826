// src/lib.rs
//! Status sync between a main sheet and per-row target workbooks.

pub mod cli;
pub mod settings;
pub mod sheets;
