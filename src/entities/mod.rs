//! Entity type definitions
//!
//! SiteDeck tracks the following record types:
//!
//! **Coordination:**
//! - [`Project`] - Construction projects with client contact and budget
//! - [`Task`] - Tasks/RFIs tied to a project, tracked by who they wait on
//!
//! **Procurement:**
//! - [`Quote`] - Vendor quotes with amount and contract progression
//! - [`Vendor`] - Vendors with ratings and trade categories
//! - [`Trade`] - Trade categories (Electrical, Plumbing, ...)
//!
//! **Budget:**
//! - [`BudgetArea`] / [`BudgetItem`] - Two-level budget hierarchy; variance
//!   is always derived from budgeted/actual pairs, never stored

pub mod budget;
pub mod project;
pub mod quote;
pub mod task;
pub mod trade;
pub mod vendor;

pub use budget::{BudgetArea, BudgetItem};
pub use project::Project;
pub use quote::Quote;
pub use task::Task;
pub use trade::Trade;
pub use vendor::Vendor;
