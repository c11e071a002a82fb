//! Aggregations over a slice of transactions. Nothing here touches disk.

pub mod distribution;
pub mod insights;
pub mod necessity;
pub mod summary;
