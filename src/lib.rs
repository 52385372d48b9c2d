//! Personal nutrition and fitness tracker for the terminal. Routines are
//! entered as build trees (Diets down to Quantities, Programs down to
//! Sessions), saved as templates and dated records, and kept in per-user
//! JSON files next to the reference Food and Exercise inventories.
//!

pub mod build;
pub mod cli;
pub mod fs;
pub mod installer;
pub mod refdata;
pub mod reference;
pub mod storage;
pub mod utils;
