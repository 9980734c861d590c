//! Proportional equipment cascade.
//!
//! Every countable tier of the reference plant is multiplied by the same
//! scaling factor (target AC / reference AC) and rounded up, so the sized
//! plant keeps the benchmark's modules-per-string, strings-per-combiner and
//! inverters-per-transformer proportions.

use tracing::debug;

use crate::error::{Result, SizingError};
use crate::models::plant::ReferencePlant;
use crate::models::sizing::{ElectricalDesign, EquipmentCounts};
use crate::models::units::{MegavoltAmperes, Megawatts, Volts};

pub const FIELD_TARGET_AC: &str = "targetACCapacityMW";

/// Products within this distance of a whole number are treated as that
/// number, so 80 912 × (32.5 / 38.9) yields 67 600 and not 67 601.
const COUNT_SNAP: f64 = 1e-6;

/// ceiling(reference × factor), absorbing floating-point noise around whole
/// numbers. Any positive product yields at least one unit.
pub fn scale_count(reference: u64, factor: f64) -> u64 {
    let exact = reference as f64 * factor;
    let nearest = exact.round();
    if nearest >= 1.0 && (exact - nearest).abs() <= COUNT_SNAP {
        nearest as u64
    } else {
        exact.ceil() as u64
    }
}

/// AC → DC through the DC/AC ratio.
pub fn dc_capacity(ac: Megawatts, dc_ac_ratio: f64) -> Megawatts {
    ac * dc_ac_ratio
}

#[derive(Debug, Clone, Copy)]
pub struct EquipmentCascadeSizer<'a> {
    plant: &'a ReferencePlant,
}

impl<'a> EquipmentCascadeSizer<'a> {
    /// `plant` must already have passed [`ReferencePlant::validate`].
    pub fn new(plant: &'a ReferencePlant) -> Self {
        Self { plant }
    }

    pub fn scaling_factor(&self, target_ac: Megawatts) -> Result<f64> {
        let mw = target_ac.value();
        if !(mw.is_finite() && mw > 0.0) {
            return Err(SizingError::invalid(FIELD_TARGET_AC, format!("must be > 0, got {}", mw)));
        }
        Ok(target_ac / self.plant.ac_capacity)
    }

    pub fn size(&self, target_ac: Megawatts) -> Result<EquipmentCounts> {
        Ok(self.counts_for(self.scaling_factor(target_ac)?))
    }

    /// Counts for an already validated scaling factor.
    pub fn counts_for(&self, factor: f64) -> EquipmentCounts {
        let p = self.plant;

        let counts = EquipmentCounts {
            module_count: scale_count(p.module_count, factor),
            string_count: scale_count(p.string_count, factor),
            structure_count: scale_count(p.structure_count, factor),
            combiner_count: scale_count(p.combiner_count, factor),
            inverter_count: scale_count(p.inverter_count, factor),
            transformer_count: scale_count(p.transformer_count, factor),
            station_count: scale_count(p.station_count, factor),
        };

        debug!(
            factor,
            modules = counts.module_count,
            inverters = counts.inverter_count,
            "equipment cascade sized"
        );
        #[cfg(feature = "verbose_log")]
        tracing::trace!(
            "[CASCADE] strings={} structures={} combiners={} transformers={} stations={}",
            counts.string_count,
            counts.structure_count,
            counts.combiner_count,
            counts.transformer_count,
            counts.station_count
        );

        counts
    }

    /// Design-check values for the sized plant. `dc_loss`/`ac_loss` are
    /// fractions.
    pub fn electrical_design(
        &self,
        counts: &EquipmentCounts,
        target_ac: Megawatts,
        module_vmpp_v: f64,
        mv_voltage_kv: f64,
        dc_loss: f64,
        ac_loss: f64,
    ) -> ElectricalDesign {
        let p = self.plant;
        let installed_dc = Megawatts(counts.module_count as f64 * p.module_power.value() / 1e6);
        ElectricalDesign {
            modules_per_string: p.modules_per_string,
            string_voltage: Volts(p.modules_per_string as f64 * module_vmpp_v),
            mv_voltage_kv,
            dc_loss_percent: dc_loss * 100.0,
            ac_loss_percent: ac_loss * 100.0,
            installed_dc_ac_ratio: installed_dc / target_ac,
            inverter_capacity: MegavoltAmperes(counts.inverter_count as f64 * p.inverter_power.value()),
            transformer_capacity: MegavoltAmperes(
                counts.transformer_count as f64 * p.transformer_power.value(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scenario_counts() {
        let plant = ReferencePlant::ca_pv_ed();
        let sizer = EquipmentCascadeSizer::new(&plant);
        let factor = sizer.scaling_factor(Megawatts(32.5)).unwrap();
        assert!((factor - 0.835_475_578_406).abs() < 1e-9, "factor={}", factor);

        let c = sizer.size(Megawatts(32.5)).unwrap();
        assert_eq!(c.module_count, 67_600);
        assert_eq!(c.string_count, 2_600);
        assert_eq!(c.structure_count, 1_300);
        assert_eq!(c.combiner_count, 163);
        assert_eq!(c.inverter_count, 11);
        assert_eq!(c.transformer_count, 6);
        assert_eq!(c.station_count, 6);
    }

    #[test]
    fn test_reference_capacity_reproduces_reference_plant() {
        let plant = ReferencePlant::ca_pv_ed();
        let c = EquipmentCascadeSizer::new(&plant).size(plant.ac_capacity).unwrap();
        assert_eq!(c.module_count, plant.module_count);
        assert_eq!(c.string_count, plant.string_count);
        assert_eq!(c.combiner_count, plant.combiner_count);
        assert_eq!(c.inverter_count, plant.inverter_count);
        assert_eq!(c.transformer_count, plant.transformer_count);
        assert_eq!(c.station_count, plant.station_count);
    }

    #[test]
    fn test_counts_for_matches_size() {
        let plant = ReferencePlant::ca_pv_ed();
        let sizer = EquipmentCascadeSizer::new(&plant);
        let factor = sizer.scaling_factor(Megawatts(32.5)).unwrap();
        assert_eq!(sizer.counts_for(factor), sizer.size(Megawatts(32.5)).unwrap());
        assert_eq!(sizer.counts_for(1.0).module_count, plant.module_count);
    }

    #[test]
    fn test_always_rounds_up() {
        assert_eq!(scale_count(12, 0.5001), 7);
        assert_eq!(scale_count(6, 0.01), 1);
        assert_eq!(scale_count(3, 1e-12), 1);
        assert_eq!(scale_count(10, 0.25), 3);
    }

    #[test]
    fn test_float_noise_does_not_bump_count() {
        assert_eq!(scale_count(80_912, 32.5 / 38.9), 67_600);
        assert_eq!(scale_count(100, 0.1 + 0.2), 30);
    }

    #[test]
    fn test_non_positive_target_rejected() {
        let plant = ReferencePlant::ca_pv_ed();
        let sizer = EquipmentCascadeSizer::new(&plant);
        for mw in [0.0, -1.0, f64::NAN] {
            let err = sizer.size(Megawatts(mw)).unwrap_err();
            assert_eq!(err.field(), Some("targetACCapacityMW"));
        }
    }

    #[test]
    fn test_dc_capacity_uses_ratio() {
        assert_eq!(dc_capacity(Megawatts(32.5), 1.3), Megawatts(32.5 * 1.3));
    }

    #[test]
    fn test_electrical_design_check() {
        let plant = ReferencePlant::ca_pv_ed();
        let sizer = EquipmentCascadeSizer::new(&plant);
        let c = sizer.size(Megawatts(32.5)).unwrap();
        let e = sizer.electrical_design(&c, Megawatts(32.5), 41.1, 20.0, 0.02, 0.01);
        assert!((e.string_voltage.value() - 1068.6).abs() < 1e-9);
        assert!((e.installed_dc_ac_ratio - 1.3).abs() < 1e-9);
        assert!((e.inverter_capacity.value() - 39.6).abs() < 1e-9);
        assert!(e.inverter_capacity.value() >= 32.5);
        assert!((e.dc_loss_percent - 2.0).abs() < 1e-12);
    }
}
