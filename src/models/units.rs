//! Unit-tagged scalars.
//!
//! Each quantity the engine moves between stages gets its own newtype, so a
//! hectare can never be passed where a megawatt is expected. All of them
//! serialize as a bare number.

use std::fmt;
use std::ops::{Add, Div, Mul};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! unit {
    ($(#[$doc:meta])* $name:ident, $suffix:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize, ToSchema)]
        #[serde(transparent)]
        pub struct $name(pub f64);

        impl $name {
            pub const ZERO: $name = $name(0.0);

            #[inline]
            pub fn value(self) -> f64 {
                self.0
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                $name(self.0 + rhs.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = $name;
            fn mul(self, rhs: f64) -> $name {
                $name(self.0 * rhs)
            }
        }

        /// Same-unit division yields a dimensionless ratio.
        impl Div for $name {
            type Output = f64;
            fn div(self, rhs: $name) -> f64 {
                self.0 / rhs.0
            }
        }

        impl std::iter::Sum for $name {
            fn sum<I: Iterator<Item = $name>>(iter: I) -> $name {
                $name(iter.map(|v| v.0).sum())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match f.precision() {
                    Some(p) => write!(f, "{:.*} {}", p, self.0, $suffix),
                    None => write!(f, "{} {}", self.0, $suffix),
                }
            }
        }
    };
}

unit!(
    /// Real power, MW (AC or DC depending on the field)
    Megawatts, "MW"
);
unit!(
    /// Apparent power, MVA
    MegavoltAmperes, "MVA"
);
unit!(
    /// Module nameplate power, W
    Watts, "W"
);
unit!(
    /// Energy, MWh
    MegawattHours, "MWh"
);
unit!(
    /// Land area, ha
    Hectares, "ha"
);
unit!(
    /// Length, m
    Meters, "m"
);
unit!(
    /// Mass, metric tonnes
    Tonnes, "t"
);
unit!(
    /// Irradiance, W/m²
    WattsPerSquareMeter, "W/m²"
);
unit!(
    /// Irradiation, kWh/m²
    KilowattHoursPerSquareMeter, "kWh/m²"
);
unit!(
    /// Temperature, °C
    Celsius, "°C"
);
unit!(
    /// Angle, degrees
    Degrees, "°"
);
unit!(
    /// Electric potential, V
    Volts, "V"
);

pub const M2_PER_HECTARE: f64 = 10_000.0;
pub const ACRES_PER_HECTARE: f64 = 2.47105;
pub const HOURS_PER_YEAR: f64 = 8760.0;

impl Megawatts {
    /// Energy produced running at this power for `hours`.
    pub fn over_hours(self, hours: f64) -> MegawattHours {
        MegawattHours(self.0 * hours)
    }
}

impl Hectares {
    pub fn square_meters(self) -> f64 {
        self.0 * M2_PER_HECTARE
    }

    pub fn acres(self) -> f64 {
        self.0 * ACRES_PER_HECTARE
    }
}

impl Degrees {
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    pub fn from_radians(rad: f64) -> Self {
        Degrees(rad.to_degrees())
    }
}
