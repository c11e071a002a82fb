pub mod add;
pub mod export;
pub mod import;
pub mod payment_methods;
pub mod remove;
pub mod report;
pub mod search;
