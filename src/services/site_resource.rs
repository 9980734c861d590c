//! Month-by-month view of the reference site's solar resource.
//!
//! Each month is represented by day 15 + 30·m at solar noon. The mean daily
//! irradiation is turned into a noon irradiance with a half-sine profile over
//! the day length, transposed onto the array plane and run through the module
//! model, then through the sized inverter fleet. These figures are for
//! display; the energy aggregator does not use them.

use crate::config::Config;
use crate::models::plant::{DAYS_IN_MONTH, MONTHS, ReferencePlant};
use crate::models::sizing::{EquipmentCounts, MonthlyResource};
use crate::models::units::{Degrees, KilowattHoursPerSquareMeter, Megawatts};
use crate::services::module_power::ModulePowerModel;
use crate::services::solar_geometry::{
    ArrayPlane, SolarPosition, day_length_hours, noon_irradiance_from_daily,
};

const SOLAR_NOON: f64 = 12.0;

/// Below this the row-shading cotangent is evaluated at 1°.
const MIN_SHADING_ELEVATION_DEG: f64 = 1.0;

/// (upper loading bound, efficiency) in ascending order; above the last
/// bound the overload efficiency applies.
const INVERTER_CURVE: [(f64, f64); 5] =
    [(0.10, 0.85), (0.20, 0.92), (0.50, 0.96), (0.75, 0.98), (1.00, 0.989)];
const INVERTER_OVERLOAD_EFFICIENCY: f64 = 0.985;

/// Representative day-of-year for month index `m` (0-based).
pub fn representative_day(m: usize) -> u32 {
    15 + 30 * m as u32
}

pub fn array_plane(plant: &ReferencePlant, config: &Config) -> ArrayPlane {
    ArrayPlane {
        tilt: plant.tilt,
        azimuth: plant.azimuth,
        albedo: config.albedo,
        diffuse_fraction: config.diffuse_fraction,
    }
}

// ─── Row shading ─────────────────────────────────────────────

/// Share of the array shaded by the row in front, %: GCR · cot(elevation),
/// capped at 100. Fully shaded with the sun at or below the horizon.
pub fn shading_loss_percent(gcr: f64, elevation: Degrees) -> f64 {
    if elevation.value() <= 0.0 {
        return 100.0;
    }
    let alpha = Degrees(elevation.value().max(MIN_SHADING_ELEVATION_DEG)).to_radians();
    let unshaded = (1.0 - gcr / alpha.tan()).max(0.0);
    (1.0 - unshaded) * 100.0
}

// ─── Inverter ────────────────────────────────────────────────

/// Stepped part-load efficiency for a DC/rated loading ratio.
pub fn inverter_efficiency(loading: f64) -> f64 {
    INVERTER_CURVE
        .iter()
        .find(|(bound, _)| loading <= *bound)
        .map_or(INVERTER_OVERLOAD_EFFICIENCY, |&(_, eta)| eta)
}

/// One entry per month for the plant described by `counts`: modules scale
/// the noon DC power, inverters set the fleet rating it is loaded against.
pub fn monthly_resource(plant: &ReferencePlant, config: &Config, counts: &EquipmentCounts) -> Vec<MonthlyResource> {
    let plane = array_plane(plant, config);
    let model = ModulePowerModel::new(plant.module_power, config);
    let fleet_mva = counts.inverter_count as f64 * plant.inverter_power.value();

    (0..MONTHS)
        .map(|m| {
            let day = representative_day(m);
            let sun = SolarPosition::compute(day, SOLAR_NOON, plant.latitude);
            let ghi = plant.monthly_ghi[m];
            let ambient = plant.monthly_temperature[m];

            let daily_kwh_m2 = ghi.value() / DAYS_IN_MONTH[m] as f64;
            let noon_ghi = noon_irradiance_from_daily(daily_kwh_m2, day_length_hours(plant.latitude, sun.declination));
            let transposition = plane.transposition_factor(&sun);
            let noon_poa = noon_ghi * transposition;
            let op = model.operate(noon_poa, ambient);

            // Unity power factor: MW against MVA.
            let plant_dc_power = Megawatts(op.power.value() * counts.module_count as f64 / 1e6);
            let loading = plant_dc_power.value() / fleet_mva;
            let eta = inverter_efficiency(loading);

            MonthlyResource {
                month: m as u32 + 1,
                day_of_year: day,
                ghi,
                poa: KilowattHoursPerSquareMeter(ghi.value() * transposition),
                noon_elevation: sun.elevation,
                noon_ghi,
                noon_poa,
                ambient_temperature: ambient,
                cell_temperature: op.cell_temperature,
                module_power: op.power,
                plant_dc_power,
                temperature_loss_percent: op.temperature_loss_percent,
                shading_loss_percent: shading_loss_percent(plant.gcr, sun.elevation),
                inverter_loading_percent: loading * 100.0,
                inverter_efficiency: eta,
                plant_ac_power: plant_dc_power * eta,
            }
        })
        .collect()
}
