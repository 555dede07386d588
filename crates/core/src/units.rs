//! Dimension-tagged scalars bridging [`uom`] quantities and name-keyed tables.
//!
//! Substitution sets and solutions hold values of many different physical
//! kinds under a single map, so the statically typed [`uom`] quantities are
//! erased into a [`Quantity`]: an SI magnitude plus its dimension exponents.
//! Values always enter through `uom` constructors, which keeps every unit
//! conversion factor owned by `uom`:
//!
//! ```
//! use uom::si::f64::Velocity;
//! use uom::si::velocity::mile_per_hour;
//! use uam_core::{Quantity, Unit};
//!
//! let v: Quantity = Velocity::new::<mile_per_hour>(93.0).into();
//! assert!((v.value_in(Unit::MeterPerSecond).unwrap() - 41.575).abs() < 1e-3);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::{self, SI};
use uom::typenum::Integer;

/// SI base dimension exponents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimension {
    #[serde(skip_serializing_if = "is_zero")]
    pub length: i8,
    #[serde(skip_serializing_if = "is_zero")]
    pub mass: i8,
    #[serde(skip_serializing_if = "is_zero")]
    pub time: i8,
    #[serde(skip_serializing_if = "is_zero")]
    pub current: i8,
    #[serde(skip_serializing_if = "is_zero")]
    pub temperature: i8,
    #[serde(skip_serializing_if = "is_zero")]
    pub amount: i8,
    #[serde(skip_serializing_if = "is_zero")]
    pub luminosity: i8,
}

fn is_zero(v: &i8) -> bool {
    *v == 0
}

impl Dimension {
    /// The dimension of a pure number.
    pub const NONE: Dimension = Dimension {
        length: 0,
        mass: 0,
        time: 0,
        current: 0,
        temperature: 0,
        amount: 0,
        luminosity: 0,
    };

    /// Read the exponents of a `uom` SI dimension.
    pub fn of<D>() -> Self
    where
        D: si::Dimension + ?Sized,
    {
        Self {
            length: D::L::to_i8(),
            mass: D::M::to_i8(),
            time: D::T::to_i8(),
            current: D::I::to_i8(),
            temperature: D::Th::to_i8(),
            amount: D::N::to_i8(),
            luminosity: D::J::to_i8(),
        }
    }

    pub fn is_dimensionless(&self) -> bool {
        *self == Self::NONE
    }

    /// Exponents of the reciprocal dimension.
    pub fn inverse(self) -> Self {
        Self {
            length: -self.length,
            mass: -self.mass,
            time: -self.time,
            current: -self.current,
            temperature: -self.temperature,
            amount: -self.amount,
            luminosity: -self.luminosity,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "1");
        }
        let parts = [
            ("L", self.length),
            ("M", self.mass),
            ("T", self.time),
            ("I", self.current),
            ("Θ", self.temperature),
            ("N", self.amount),
            ("J", self.luminosity),
        ];
        let mut first = true;
        for (symbol, exp) in parts {
            if exp == 0 {
                continue;
            }
            if !first {
                write!(f, "·")?;
            }
            first = false;
            if exp == 1 {
                write!(f, "{symbol}")?;
            } else {
                write!(f, "{symbol}^{exp}")?;
            }
        }
        Ok(())
    }
}

/// Errors raised when a quantity is read in an incompatible unit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("cannot express a quantity of dimension {found} in {unit} (dimension {expected})")]
    DimensionMismatch {
        unit: Unit,
        expected: Dimension,
        found: Dimension,
    },
    #[error("cannot compare a quantity of dimension {left} with one of dimension {right}")]
    Incomparable { left: Dimension, right: Dimension },
}

/// A scalar stored as its SI magnitude together with its dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    si: f64,
    #[serde(default, skip_serializing_if = "Dimension::is_dimensionless")]
    dimension: Dimension,
}

impl Quantity {
    pub fn new(si: f64, dimension: Dimension) -> Self {
        Self { si, dimension }
    }

    /// A pure number (counts, fractions, efficiencies, prices in $US).
    pub fn dimensionless(value: f64) -> Self {
        Self::new(value, Dimension::NONE)
    }

    /// `magnitude` per `amount`, e.g. 350 $ per lbf or 0.12 $ per kWh.
    pub fn per(magnitude: f64, amount: impl Into<Quantity>) -> Self {
        let amount = amount.into();
        Self::new(magnitude / amount.si, amount.dimension.inverse())
    }

    /// Value of `magnitude` expressed in `unit`.
    pub fn in_unit(magnitude: f64, unit: Unit) -> Self {
        let reference = unit.reference();
        Self::new(magnitude * reference.si, reference.dimension)
    }

    pub fn value_si(&self) -> f64 {
        self.si
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Magnitude of this quantity expressed in `unit`.
    pub fn value_in(&self, unit: Unit) -> Result<f64, UnitError> {
        let reference = unit.reference();
        if reference.dimension != self.dimension {
            return Err(UnitError::DimensionMismatch {
                unit,
                expected: reference.dimension,
                found: self.dimension,
            });
        }
        Ok(self.si / reference.si)
    }

    /// Clamp to at most `cap`; both must share a dimension.
    pub fn min(self, cap: Quantity) -> Result<Quantity, UnitError> {
        if self.dimension != cap.dimension {
            return Err(UnitError::Incomparable {
                left: self.dimension,
                right: cap.dimension,
            });
        }
        Ok(if cap.si < self.si { cap } else { self })
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self::dimensionless(value)
    }
}

impl<D> From<si::Quantity<D, SI<f64>, f64>> for Quantity
where
    D: si::Dimension + ?Sized,
{
    fn from(q: si::Quantity<D, SI<f64>, f64>) -> Self {
        Self::new(q.value, Dimension::of::<D>())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dimension.is_dimensionless() {
            write!(f, "{}", self.si)
        } else {
            write!(f, "{} [{}]", self.si, self.dimension)
        }
    }
}

/// Units available to reports and extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Kilogram,
    Newton,
    PoundForce,
    Pascal,
    KilogramPerCubicMeter,
    KilowattHour,
    Kilowatt,
    Minute,
    Second,
    Hour,
    Meter,
    Foot,
    NauticalMile,
    MeterPerSecond,
    MilePerHour,
    PerKilometer,
    WattHourPerKilogram,
    Hertz,
    Usd,
    ThousandUsd,
    Decibel,
    Dimensionless,
}

impl Unit {
    /// One of this unit, built through `uom`.
    pub fn reference(self) -> Quantity {
        use uom::si::f64::{
            Energy, Force, Frequency, Length, Mass, MassDensity, Power, Pressure, Time, Velocity,
        };
        use uom::si::{
            energy, force, frequency, length, mass, mass_density, power, pressure, time, velocity,
        };

        match self {
            Unit::Kilogram => Mass::new::<mass::kilogram>(1.0).into(),
            Unit::Newton => Force::new::<force::newton>(1.0).into(),
            Unit::PoundForce => Force::new::<force::pound_force>(1.0).into(),
            Unit::Pascal => Pressure::new::<pressure::pascal>(1.0).into(),
            Unit::KilogramPerCubicMeter => {
                MassDensity::new::<mass_density::kilogram_per_cubic_meter>(1.0).into()
            }
            Unit::KilowattHour => Energy::new::<energy::kilowatt_hour>(1.0).into(),
            Unit::Kilowatt => Power::new::<power::kilowatt>(1.0).into(),
            Unit::Minute => Time::new::<time::minute>(1.0).into(),
            Unit::Second => Time::new::<time::second>(1.0).into(),
            Unit::Hour => Time::new::<time::hour>(1.0).into(),
            Unit::Meter => Length::new::<length::meter>(1.0).into(),
            Unit::Foot => Length::new::<length::foot>(1.0).into(),
            Unit::NauticalMile => Length::new::<length::nautical_mile>(1.0).into(),
            Unit::MeterPerSecond => Velocity::new::<velocity::meter_per_second>(1.0).into(),
            Unit::MilePerHour => Velocity::new::<velocity::mile_per_hour>(1.0).into(),
            Unit::PerKilometer => Quantity::per(1.0, Length::new::<length::kilometer>(1.0)),
            Unit::WattHourPerKilogram => {
                (Energy::new::<energy::watt_hour>(1.0) / Mass::new::<mass::kilogram>(1.0)).into()
            }
            Unit::Hertz => Frequency::new::<frequency::hertz>(1.0).into(),
            Unit::Usd | Unit::Decibel | Unit::Dimensionless => Quantity::dimensionless(1.0),
            Unit::ThousandUsd => Quantity::dimensionless(1.0e3),
        }
    }

    /// Label used in report unit columns.
    pub fn label(self) -> &'static str {
        match self {
            Unit::Kilogram => "kg",
            Unit::Newton => "N",
            Unit::PoundForce => "lbf",
            Unit::Pascal => "Pa",
            Unit::KilogramPerCubicMeter => "kg/m**3",
            Unit::KilowattHour => "kWh",
            Unit::Kilowatt => "kW",
            Unit::Minute => "minutes",
            Unit::Second => "s",
            Unit::Hour => "hours",
            Unit::Meter => "m",
            Unit::Foot => "ft",
            Unit::NauticalMile => "nmi",
            Unit::MeterPerSecond => "m/s",
            Unit::MilePerHour => "mph",
            Unit::PerKilometer => "km**-1",
            Unit::WattHourPerKilogram => "Wh/kg",
            Unit::Hertz => "turn/s",
            Unit::Usd => "$US",
            Unit::ThousandUsd => "$US (thousands)",
            Unit::Decibel => "dB",
            Unit::Dimensionless => "dimensionless",
        }
    }

    /// Convert a bare magnitude between two units of the same dimension.
    pub fn convert(value: f64, from: Unit, to: Unit) -> Result<f64, UnitError> {
        Quantity::in_unit(value, from).value_in(to)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
