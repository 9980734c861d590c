pub mod plant;
pub mod sizing;
pub mod units;
