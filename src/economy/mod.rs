//! Economy Model
//!
//! Pure, deterministic economy computations: energy regeneration and
//! passive-income accrual by level. No I/O and no clocks; callers
//! supply elapsed time.

pub mod model;
pub mod rates;

pub use model::{reconcile, Accrual, EconomyConfig};
pub use rates::{profit_per_hour, PROFIT_TABLE};
