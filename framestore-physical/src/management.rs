//! This module collects functionality surrounding the management of
//! memory consumed by columns.

pub mod bytesized;
pub use bytesized::ByteSized;
