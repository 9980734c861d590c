/// ============================================================
///  Solar geometry & plane-of-array transposition
///
///  Pipeline:
///   1. Declination     – Cooper: 23.45° · sin(360/365 · (n − 81))
///   2. Hour angle      – 15° per hour from solar noon
///   3. Elevation       – asin(sin δ sin φ + cos δ cos φ cos h)
///   4. Azimuth         – from south, west positive
///   5. Decomposition   – GHI → beam + isotropic diffuse
///   6. Transposition   – beam · cos θ + sky view + ground view
///
///  Angles are carried as `Degrees`; radians only live inside
///  the formulas.
/// ============================================================

use chrono::{Datelike, NaiveDate};
use std::f64::consts::PI;

use crate::models::units::{Degrees, WattsPerSquareMeter};

const DEG: f64 = PI / 180.0;

// ─── Constants ───────────────────────────────────────────────
/// Earth axial tilt used by the Cooper declination formula
const OBLIQUITY_DEG: f64 = 23.45;
/// Day of year of the March equinox in the Cooper formula
const EQUINOX_DAY: f64 = 81.0;
/// Floor on sin(elevation) when recovering DNI from horizontal beam;
/// keeps the beam finite for a grazing sun.
const MIN_SIN_ELEVATION: f64 = 0.1;

// ─── Sun position ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    pub declination: Degrees,
    /// Negative before solar noon, positive after
    pub hour_angle: Degrees,
    pub elevation: Degrees,
    /// 0 = due south, west positive
    pub azimuth: Degrees,
}

/// δ for day-of-year `n` (1..=365).
pub fn declination(day_of_year: u32) -> Degrees {
    let b = 360.0 / 365.0 * (day_of_year as f64 - EQUINOX_DAY);
    Degrees(OBLIQUITY_DEG * (b * DEG).sin())
}

/// Hour angle for a solar-time hour (12.0 = solar noon).
pub fn hour_angle(solar_hour: f64) -> Degrees {
    Degrees(15.0 * (solar_hour - 12.0))
}

/// Sunset hour angle ω_s. Clamps to 0° in polar night and 180° under
/// midnight sun.
pub fn sunset_hour_angle(latitude: Degrees, declination: Degrees) -> Degrees {
    let x = -(latitude.to_radians().tan()) * declination.to_radians().tan();
    Degrees::from_radians(x.clamp(-1.0, 1.0).acos())
}

/// Hours between sunrise and sunset.
pub fn day_length_hours(latitude: Degrees, declination: Degrees) -> f64 {
    2.0 * sunset_hour_angle(latitude, declination).value() / 15.0
}

/// Peak (noon) irradiance of a half-sine daily profile that integrates to
/// `daily_kwh_m2` over `day_length_h` hours.
pub fn noon_irradiance_from_daily(daily_kwh_m2: f64, day_length_h: f64) -> WattsPerSquareMeter {
    if day_length_h <= 0.0 || daily_kwh_m2 <= 0.0 {
        return WattsPerSquareMeter::ZERO;
    }
    WattsPerSquareMeter(daily_kwh_m2 * 1000.0 * PI / (2.0 * day_length_h))
}

impl SolarPosition {
    /// * `day_of_year` – 1..=365
    /// * `solar_hour`  – local solar time, 12.0 at solar noon
    /// * `latitude`    – site latitude, north positive
    pub fn compute(day_of_year: u32, solar_hour: f64, latitude: Degrees) -> Self {
        let decl_deg = declination(day_of_year);
        let omega_deg = hour_angle(solar_hour);

        let decl = decl_deg.to_radians();
        let omega = omega_deg.to_radians();
        let lat = latitude.to_radians();

        let sin_alpha = decl.sin() * lat.sin() + decl.cos() * lat.cos() * omega.cos();
        let elevation = Degrees::from_radians(sin_alpha.clamp(-1.0, 1.0).asin());

        let azimuth = Degrees::from_radians(
            omega.sin().atan2(omega.cos() * lat.sin() - decl.tan() * lat.cos()),
        );

        Self { declination: decl_deg, hour_angle: omega_deg, elevation, azimuth }
    }

    /// Same as [`SolarPosition::compute`] with the day taken from a calendar
    /// date. Dec 31 of a leap year is folded onto day 365.
    pub fn on_date(date: NaiveDate, solar_hour: f64, latitude: Degrees) -> Self {
        Self::compute(date.ordinal().min(365), solar_hour, latitude)
    }

    pub fn is_above_horizon(&self) -> bool {
        self.elevation.value() > 0.0
    }
}

// ─── Plane of array ──────────────────────────────────────────

/// Fixed array plane plus the site's sky/ground optics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayPlane {
    pub tilt: Degrees,
    /// 0 = facing the equator, west positive
    pub azimuth: Degrees,
    /// Ground reflectance ρ
    pub albedo: f64,
    /// Share of GHI treated as isotropic diffuse
    pub diffuse_fraction: f64,
}

/// POA components, W/m².
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoaIrradiance {
    pub beam: WattsPerSquareMeter,
    pub sky_diffuse: WattsPerSquareMeter,
    pub ground_reflected: WattsPerSquareMeter,
    pub total: WattsPerSquareMeter,
    /// cos θ between sun and plane normal, 0 when the sun is behind it
    pub cos_incidence: f64,
}

impl ArrayPlane {
    /// Angle-of-incidence cosine, unclamped.
    pub fn cos_incidence(&self, sun: &SolarPosition) -> f64 {
        let alpha = sun.elevation.to_radians();
        let beta = self.tilt.to_radians();
        let az_diff = (sun.azimuth.value() - self.azimuth.value()) * DEG;
        alpha.sin() * beta.cos() + alpha.cos() * beta.sin() * az_diff.cos()
    }

    /// Isotropic-sky POA for a horizontal irradiance `ghi`. Zero at night.
    pub fn irradiance(&self, ghi: WattsPerSquareMeter, sun: &SolarPosition) -> PoaIrradiance {
        if !sun.is_above_horizon() {
            return PoaIrradiance::default();
        }
        let ghi = ghi.value().max(0.0);

        // ── Decomposition ─────────────────────────────────────
        let dhi = ghi * self.diffuse_fraction;
        let beam_horizontal = ghi - dhi;
        let sin_alpha = sun.elevation.to_radians().sin().max(MIN_SIN_ELEVATION);
        let dni = beam_horizontal / sin_alpha;

        // ── Transposition ─────────────────────────────────────
        let cos_theta = self.cos_incidence(sun).max(0.0);
        let cos_beta = self.tilt.to_radians().cos();

        let beam = dni * cos_theta;
        let sky_diffuse = dhi * (1.0 + cos_beta) / 2.0;
        let ground_reflected = ghi * self.albedo * (1.0 - cos_beta) / 2.0;

        PoaIrradiance {
            beam: WattsPerSquareMeter(beam),
            sky_diffuse: WattsPerSquareMeter(sky_diffuse),
            ground_reflected: WattsPerSquareMeter(ground_reflected),
            total: WattsPerSquareMeter(beam + sky_diffuse + ground_reflected),
            cos_incidence: cos_theta,
        }
    }

    /// POA / GHI for this sun position. The transposition is linear in GHI,
    /// so this ratio converts any horizontal quantity onto the plane.
    pub fn transposition_factor(&self, sun: &SolarPosition) -> f64 {
        self.irradiance(WattsPerSquareMeter(1.0), sun).total.value()
    }
}
