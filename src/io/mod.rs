/// CSV export and read-back of transaction history.
pub mod export;
