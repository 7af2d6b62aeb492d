/// CSV export of estimate breakdowns.
pub mod export;
