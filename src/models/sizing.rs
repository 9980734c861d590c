use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{Result, SizingError};
use crate::models::units::{
    Celsius, Degrees, Hectares, KilowattHoursPerSquareMeter, MegavoltAmperes, MegawattHours,
    Megawatts, Meters, Tonnes, Volts, Watts, WattsPerSquareMeter,
};

// ─── Input ───────────────────────────────────────────────────────────────────

/// What the dashboard hands the engine: the data-center IT load and the two
/// knobs that turn it into a solar AC requirement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SizingInput {
    /// IT load, MW (> 0)
    #[serde(rename = "dataCenterMW")]
    pub data_center: Megawatts,
    /// Power Usage Effectiveness (≥ 1.0)
    #[serde(rename = "PUE")]
    pub pue: f64,
    /// Target solar capacity factor (0 < CF ≤ 1)
    #[serde(rename = "capacityFactor")]
    pub capacity_factor: f64,
}

impl SizingInput {
    pub const FIELD_DATA_CENTER: &'static str = "dataCenterMW";
    pub const FIELD_PUE: &'static str = "PUE";
    pub const FIELD_CAPACITY_FACTOR: &'static str = "capacityFactor";

    pub fn new(data_center_mw: f64, pue: f64, capacity_factor: f64) -> Self {
        Self { data_center: Megawatts(data_center_mw), pue, capacity_factor }
    }

    /// Rejects the first out-of-domain field. NaN fails every check.
    pub fn validate(&self) -> Result<()> {
        let mw = self.data_center.value();
        if !(mw.is_finite() && mw > 0.0) {
            return Err(SizingError::invalid(Self::FIELD_DATA_CENTER, format!("must be > 0, got {}", mw)));
        }
        if !(self.pue.is_finite() && self.pue >= 1.0) {
            return Err(SizingError::invalid(Self::FIELD_PUE, format!("must be >= 1.0, got {}", self.pue)));
        }
        let cf = self.capacity_factor;
        if !(cf > 0.0 && cf <= 1.0) {
            return Err(SizingError::invalid(
                Self::FIELD_CAPACITY_FACTOR,
                format!("must be in (0, 1], got {}", cf),
            ));
        }
        Ok(())
    }
}

// ─── Stage outputs ───────────────────────────────────────────────────────────

/// Integer equipment counts for one target AC capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentCounts {
    pub module_count: u64,
    pub string_count: u64,
    pub structure_count: u64,
    pub combiner_count: u64,
    pub inverter_count: u64,
    pub transformer_count: u64,
    pub station_count: u64,
}

/// Design-check figures; none of them feed the count cascade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ElectricalDesign {
    pub modules_per_string: u32,
    /// modulesPerString × module Vmpp
    pub string_voltage: Volts,
    pub mv_voltage_kv: f64,
    pub dc_loss_percent: f64,
    pub ac_loss_percent: f64,
    /// DC modules installed over AC, after count rounding
    pub installed_dc_ac_ratio: f64,
    pub inverter_capacity: MegavoltAmperes,
    pub transformer_capacity: MegavoltAmperes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnergyReport {
    #[serde(rename = "annualEnergyMWh")]
    pub annual_energy: MegawattHours,
    /// Jan..Dec, sums to `annual_energy`
    #[serde(rename = "monthlyEnergyMWh")]
    pub monthly_energy: Vec<MegawattHours>,
    /// Produced over loss-free energy at the target capacity factor. With
    /// energy driven by CF this is always (1 − dcLoss) × (1 − acLoss).
    pub performance_ratio: f64,
    /// Produced over installed DC × site annual GHI (reference yield at
    /// 1 kW/m²). Above 1 means the requested CF outruns the site resource.
    pub irradiance_performance_ratio: f64,
    /// Produced over nameplate AC running all year
    pub actual_capacity_factor: f64,
    /// kWh per installed kWp
    pub specific_yield: f64,
    #[serde(rename = "co2SavingsTonnes")]
    pub co2_savings: Tonnes,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CivilWorks {
    #[serde(rename = "landAreaHa")]
    pub land_area: Hectares,
    pub land_area_acres: f64,
    #[serde(rename = "fenceAreaHa")]
    pub fence_area: Hectares,
    #[serde(rename = "fencePerimeterM")]
    pub fence_perimeter: Meters,
    #[serde(rename = "accessRoadLengthM")]
    pub access_road_length: Meters,
}

/// Reference-site resource for one month at solar noon of its representative
/// day. Display-only: energy figures never read these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyResource {
    /// 1..=12
    pub month: u32,
    pub day_of_year: u32,
    pub ghi: KilowattHoursPerSquareMeter,
    /// Monthly GHI transposed onto the array plane
    pub poa: KilowattHoursPerSquareMeter,
    pub noon_elevation: Degrees,
    pub noon_ghi: WattsPerSquareMeter,
    pub noon_poa: WattsPerSquareMeter,
    pub ambient_temperature: Celsius,
    pub cell_temperature: Celsius,
    /// Single module at noon
    pub module_power: Watts,
    /// Whole sized array at noon
    pub plant_dc_power: Megawatts,
    /// Power lost to cell heating above 25 °C, % (negative when colder)
    pub temperature_loss_percent: f64,
    /// Row-to-row shading at the noon sun, from GCR; reported, not applied
    pub shading_loss_percent: f64,
    /// Noon DC over the sized inverter fleet rating, %
    pub inverter_loading_percent: f64,
    /// Stepped efficiency at that loading, 0..1
    pub inverter_efficiency: f64,
    /// plantDcPower × inverterEfficiency
    pub plant_ac_power: Megawatts,
}

// ─── Result ──────────────────────────────────────────────────────────────────

/// Everything one sizing run produces. Built once by the engine and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SizingResult {
    pub plant_name: String,
    /// Target AC over reference AC
    pub scaling_factor: f64,

    #[serde(rename = "totalPowerMW")]
    pub total_power: Megawatts,
    #[serde(rename = "solarACCapacityMW")]
    pub solar_ac_capacity: Megawatts,
    #[serde(rename = "solarDCCapacityMW")]
    pub solar_dc_capacity: Megawatts,

    pub module_count: u64,
    pub string_count: u64,
    pub structure_count: u64,
    pub combiner_count: u64,
    pub inverter_count: u64,
    pub transformer_count: u64,
    pub station_count: u64,

    #[serde(rename = "landAreaHa")]
    pub land_area: Hectares,
    pub land_area_acres: f64,
    #[serde(rename = "fenceAreaHa")]
    pub fence_area: Hectares,
    #[serde(rename = "fencePerimeterM")]
    pub fence_perimeter: Meters,
    #[serde(rename = "accessRoadLengthM")]
    pub access_road_length: Meters,

    #[serde(rename = "annualEnergyMWh")]
    pub annual_energy: MegawattHours,
    #[serde(rename = "monthlyEnergyMWh")]
    pub monthly_energy: Vec<MegawattHours>,
    pub performance_ratio: f64,
    pub irradiance_performance_ratio: f64,
    pub actual_capacity_factor: f64,
    pub specific_yield: f64,
    #[serde(rename = "co2SavingsTonnes")]
    pub co2_savings: Tonnes,

    pub electrical: ElectricalDesign,
    pub monthly_resource: Vec<MonthlyResource>,
}

impl SizingResult {
    pub fn equipment(&self) -> EquipmentCounts {
        EquipmentCounts {
            module_count: self.module_count,
            string_count: self.string_count,
            structure_count: self.structure_count,
            combiner_count: self.combiner_count,
            inverter_count: self.inverter_count,
            transformer_count: self.transformer_count,
            station_count: self.station_count,
        }
    }
}
