//! Unit roster browser and head-to-head comparison calculator for a
//! strategy game's CSV exports. The data layer loads ten related tables
//! once and serves keyed lookups and joins; the comparator turns two unit
//! bundles into paired derived combat stats.

pub mod cli;
pub mod compare;
pub mod data;
pub mod report;
pub mod server;
pub mod session;
