//! Domain constants and enums.

pub mod period;

pub use period::{covers, FarePeriod, PeriodTable, CANONICAL_PERIODS};
