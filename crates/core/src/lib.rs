//! Core units, constants, and shared primitives for the UAM trade-study workspace.

pub mod units;

pub use units::{Dimension, Quantity, Unit, UnitError};

/// Physical and modelling constants shared by the substitution tables.
pub mod constants {
    /// Gravitational acceleration used by the aircraft model (m/s²).
    pub const GRAVITY_M_S2: f64 = 9.807;

    /// Stand-in for "zero" counts (crew, passengers) that must stay strictly
    /// positive for a geometric program.
    pub const NEGLIGIBLE_COUNT: f64 = 0.001;

    /// Stand-in for a zero purchase price, in $US.
    pub const NEGLIGIBLE_PRICE_USD: f64 = 1.0;
}
