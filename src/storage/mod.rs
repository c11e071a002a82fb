pub mod csv_ledger;
pub mod dates;
