//! SiteDeck: construction project coordination toolkit
//!
//! A Unix-style toolkit for tracking projects, tasks/RFIs, vendor quotes,
//! and budgets as plain text files, with CSV import and spreadsheet
//! report generation.

pub mod cli;
pub mod core;
pub mod entities;
pub mod import;
pub mod report;
