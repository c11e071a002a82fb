pub mod rating;
pub mod transaction;
