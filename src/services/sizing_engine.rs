/// ============================================================
///  Sizing engine
///
///  Strictly linear pipeline, one pass per call:
///   1. Validate        – reject out-of-domain input, nothing runs
///   2. Loads           – IT load × PUE → total; / CF → AC; × DC/AC → DC
///   3. Cascade         – equipment counts from reference ratios
///   4. Energy          – annual / monthly yield and ratios
///   5. Land            – land, fence, roads
///   6. Site resource   – noon diagnostics per month
///   7. Assemble        – one immutable SizingResult
///
///  The engine owns its reference plant and configuration, both
///  validated once in `new`; `size` takes `&self` and keeps no
///  state between calls.
/// ============================================================

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::models::plant::ReferencePlant;
use crate::models::sizing::{SizingInput, SizingResult};
use crate::models::units::Megawatts;
use crate::services::energy_aggregator::EnergyAggregator;
use crate::services::equipment_cascade::{EquipmentCascadeSizer, dc_capacity};
use crate::services::land_civil::LandCivilScaler;
use crate::services::site_resource::monthly_resource;

/// Total facility power, solar AC and solar DC for one input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loads {
    pub total_power: Megawatts,
    pub solar_ac: Megawatts,
    pub solar_dc: Megawatts,
}

#[derive(Debug, Clone)]
pub struct SizingEngine {
    plant: ReferencePlant,
    config: Config,
}

impl SizingEngine {
    /// Fails with `Configuration` if either the plant or the config breaks
    /// its invariants.
    pub fn new(plant: ReferencePlant, config: Config) -> Result<Self> {
        if let Err(e) = plant.validate().and_then(|_| config.validate()) {
            warn!(plant = %plant.name, error = %e, "rejected engine configuration");
            return Err(e);
        }
        Ok(Self { plant, config })
    }

    /// CA_PV_ED with default constants.
    pub fn with_reference() -> Result<Self> {
        Self::new(ReferencePlant::ca_pv_ed(), Config::default())
    }

    pub fn plant(&self) -> &ReferencePlant {
        &self.plant
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// DC cabling loss fraction: config override, else the plant's.
    pub fn dc_loss(&self) -> f64 {
        self.config.dc_loss.unwrap_or(self.plant.dc_loss_percent / 100.0)
    }

    /// AC cabling loss fraction: config override, else the plant's.
    pub fn ac_loss(&self) -> f64 {
        self.config.ac_loss.unwrap_or(self.plant.ac_loss_percent / 100.0)
    }

    /// totalPower = load × PUE; solarAC = totalPower / CF; solarDC = solarAC × DC/AC.
    pub fn loads(&self, input: &SizingInput) -> Loads {
        let total_power = input.data_center * input.pue;
        let solar_ac = Megawatts(total_power.value() / input.capacity_factor);
        Loads { total_power, solar_ac, solar_dc: dc_capacity(solar_ac, self.config.dc_ac_ratio) }
    }

    pub fn size(&self, input: &SizingInput) -> Result<SizingResult> {
        // ── 1. Validate ────────────────────────────────────────
        if let Err(e) = input.validate() {
            warn!(error = %e, "rejected sizing input");
            return Err(e);
        }

        // ── 2. Loads ───────────────────────────────────────────
        let loads = self.loads(input);
        debug!(
            total_mw = loads.total_power.value(),
            ac_mw = loads.solar_ac.value(),
            dc_mw = loads.solar_dc.value(),
            "loads computed"
        );

        // ── 3. Equipment cascade ───────────────────────────────
        let sizer = EquipmentCascadeSizer::new(&self.plant);
        let scaling_factor = sizer.scaling_factor(loads.solar_ac)?;
        let counts = sizer.counts_for(scaling_factor);
        let electrical = sizer.electrical_design(
            &counts,
            loads.solar_ac,
            self.config.module_vmpp_v,
            self.config.mv_voltage_kv,
            self.dc_loss(),
            self.ac_loss(),
        );

        // ── 4. Energy ──────────────────────────────────────────
        let energy = EnergyAggregator::new(
            &self.plant,
            self.dc_loss(),
            self.ac_loss(),
            self.config.co2_tonnes_per_mwh,
        )
        .aggregate(loads.solar_ac, loads.solar_dc, input.capacity_factor);

        // ── 5. Land & civil works ──────────────────────────────
        let civil = LandCivilScaler::new(
            &self.plant,
            self.config.fence_coverage,
            self.config.fence_irregularity,
            self.config.road_density_m_per_ha,
        )
        .scale(scaling_factor);
        debug!(land_ha = civil.land_area.value(), fence_m = civil.fence_perimeter.value(), "land scaled");

        // ── 6. Site resource ───────────────────────────────────
        let resource = monthly_resource(&self.plant, &self.config, &counts);

        // ── 7. Assemble ────────────────────────────────────────
        let result = SizingResult {
            plant_name: self.plant.name.clone(),
            scaling_factor,
            total_power: loads.total_power,
            solar_ac_capacity: loads.solar_ac,
            solar_dc_capacity: loads.solar_dc,
            module_count: counts.module_count,
            string_count: counts.string_count,
            structure_count: counts.structure_count,
            combiner_count: counts.combiner_count,
            inverter_count: counts.inverter_count,
            transformer_count: counts.transformer_count,
            station_count: counts.station_count,
            land_area: civil.land_area,
            land_area_acres: civil.land_area_acres,
            fence_area: civil.fence_area,
            fence_perimeter: civil.fence_perimeter,
            access_road_length: civil.access_road_length,
            annual_energy: energy.annual_energy,
            monthly_energy: energy.monthly_energy,
            performance_ratio: energy.performance_ratio,
            irradiance_performance_ratio: energy.irradiance_performance_ratio,
            actual_capacity_factor: energy.actual_capacity_factor,
            specific_yield: energy.specific_yield,
            co2_savings: energy.co2_savings,
            electrical,
            monthly_resource: resource,
        };

        info!(
            "[SIZING] {} | load {:.2} × PUE {:.2} → {:.2} MWac / {:.2} MWdc | {} modules | {:.1} ha | {:.0} MWh/yr",
            result.plant_name,
            input.data_center.value(),
            input.pue,
            result.solar_ac_capacity.value(),
            result.solar_dc_capacity.value(),
            result.module_count,
            result.land_area.value(),
            result.annual_energy.value()
        );

        Ok(result)
    }
}

/// One-shot sizing against `plant` with default constants.
pub fn size(input: &SizingInput, plant: &ReferencePlant) -> Result<SizingResult> {
    SizingEngine::new(plant.clone(), Config::default())?.size(input)
}
