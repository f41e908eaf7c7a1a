pub mod calculator;
pub mod stats;

pub use calculator::{compare, Comparison, BASE_HIT_CHANCE, MAX_HIT_CHANCE, MIN_HIT_CHANCE};
pub use stats::SideStats;
