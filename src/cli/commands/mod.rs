//! Command implementations

pub mod budget;
pub mod import;
pub mod init;
pub mod log;
pub mod proj;
pub mod quote;
pub mod report;
pub mod task;
pub mod vendor;
