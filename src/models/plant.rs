use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{Result, SizingError};
use crate::models::units::{
    Celsius, Degrees, Hectares, KilowattHoursPerSquareMeter, MegavoltAmperes, Megawatts, Meters,
    Watts,
};

pub const MONTHS: usize = 12;

/// Non-leap calendar.
pub const DAYS_IN_MONTH: [u32; MONTHS] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub const MONTH_NAMES: [&str; MONTHS] =
    ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// Benchmark plant every sizing run is scaled from.
///
/// Construct through [`ReferencePlant::ca_pv_ed`] or deserialize and then call
/// [`ReferencePlant::validate`]; the engine refuses a plant that fails it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferencePlant {
    pub name: String,

    // ── Site ─────────────────────────────────────────────────────────────────
    pub latitude: Degrees,
    pub longitude: Degrees,
    pub altitude: Meters,
    /// Land actually occupied by the array
    pub land_area: Hectares,
    /// Whole parcel, including unsuitable ground
    pub total_site_area: Hectares,
    /// Module area over land area (0..1)
    pub gcr: f64,
    pub tilt: Degrees,
    /// 0 = facing the equator, west positive
    pub azimuth: Degrees,

    // ── Capacity ─────────────────────────────────────────────────────────────
    pub ac_capacity: Megawatts,
    pub dc_capacity: Megawatts,

    // ── Equipment ────────────────────────────────────────────────────────────
    pub module_power: Watts,
    pub module_count: u64,
    pub modules_per_string: u32,
    pub modules_per_structure: u32,
    pub structure_count: u64,
    pub string_count: u64,
    /// String inputs per combiner box
    pub combiner_inputs: u32,
    pub combiner_count: u64,
    pub inverter_power: MegavoltAmperes,
    pub inverter_count: u64,
    pub transformer_power: MegavoltAmperes,
    pub transformer_count: u64,
    pub station_count: u64,

    // ── Losses (%) ───────────────────────────────────────────────────────────
    pub dc_loss_percent: f64,
    pub ac_loss_percent: f64,

    // ── Climate ──────────────────────────────────────────────────────────────
    /// Monthly GHI totals, Jan..Dec
    pub monthly_ghi: Vec<KilowattHoursPerSquareMeter>,
    /// Monthly mean ambient temperature, Jan..Dec
    pub monthly_temperature: Vec<Celsius>,
    /// Must equal the sum of `monthly_ghi`
    pub annual_ghi: KilowattHoursPerSquareMeter,
}

impl ReferencePlant {
    /// CA_PV_ED, Highvale, Alberta: 38.9 MWac / 50.6 MWdc, LONGi 625 W
    /// bifacial modules on fixed 3P structures, Sungrow SG3600UD central
    /// inverters paired on 7.2 MVA 0.63/20 kV transformers.
    pub fn ca_pv_ed() -> Self {
        Self {
            name: "CA_PV_ED".to_string(),
            latitude: Degrees(53.49),
            longitude: Degrees(-114.49),
            altitude: Meters(742.26),
            land_area: Hectares(71.2),
            total_site_area: Hectares(130.04),
            gcr: 0.5257,
            tilt: Degrees(18.0),
            azimuth: Degrees(0.0),
            ac_capacity: Megawatts(38.9),
            dc_capacity: Megawatts(50.6),
            module_power: Watts(625.0),
            module_count: 80_912,
            modules_per_string: 26,
            modules_per_structure: 52,
            structure_count: 1_556,
            string_count: 3_112,
            combiner_inputs: 16,
            combiner_count: 195,
            inverter_power: MegavoltAmperes(3.6),
            inverter_count: 12,
            transformer_power: MegavoltAmperes(7.2),
            transformer_count: 6,
            station_count: 6,
            dc_loss_percent: 2.0,
            ac_loss_percent: 1.0,
            monthly_ghi: [28.1, 51.8, 100.0, 136.1, 172.1, 176.2, 179.7, 151.8, 102.0, 59.7, 30.7, 21.0]
                .into_iter()
                .map(KilowattHoursPerSquareMeter)
                .collect(),
            monthly_temperature: [
                -8.47, -2.16, -5.69, 2.17, 11.25, 14.75, 18.2, 15.98, 10.3, 3.13, -7.41, -12.95,
            ]
            .into_iter()
            .map(Celsius)
            .collect(),
            annual_ghi: KilowattHoursPerSquareMeter(1209.2),
        }
    }

    /// Installed DC over AC of the benchmark itself.
    pub fn dc_ac_ratio(&self) -> f64 {
        self.dc_capacity / self.ac_capacity
    }

    /// Mean of the monthly GHI profile.
    pub fn mean_monthly_ghi(&self) -> f64 {
        self.monthly_ghi.iter().map(|g| g.value()).sum::<f64>() / self.monthly_ghi.len() as f64
    }

    pub fn validate(&self) -> Result<()> {
        fn fail(msg: String) -> Result<()> {
            Err(SizingError::Configuration(msg))
        }
        let positive = |v: f64| v.is_finite() && v > 0.0;

        for (what, v) in [
            ("acCapacity", self.ac_capacity.value()),
            ("dcCapacity", self.dc_capacity.value()),
            ("modulePower", self.module_power.value()),
            ("inverterPower", self.inverter_power.value()),
            ("transformerPower", self.transformer_power.value()),
            ("landArea", self.land_area.value()),
            ("totalSiteArea", self.total_site_area.value()),
        ] {
            if !positive(v) {
                return fail(format!("{} must be positive, got {}", what, v));
            }
        }

        for (what, n) in [
            ("moduleCount", self.module_count),
            ("modulesPerString", self.modules_per_string as u64),
            ("modulesPerStructure", self.modules_per_structure as u64),
            ("structureCount", self.structure_count),
            ("stringCount", self.string_count),
            ("combinerInputs", self.combiner_inputs as u64),
            ("combinerCount", self.combiner_count),
            ("inverterCount", self.inverter_count),
            ("transformerCount", self.transformer_count),
            ("stationCount", self.station_count),
        ] {
            if n == 0 {
                return fail(format!("{} must be positive", what));
            }
        }

        let string_capacity = self.string_count.checked_mul(u64::from(self.modules_per_string));
        if string_capacity.is_none_or(|held| held < self.module_count) {
            return fail(format!(
                "{} strings of {} cannot hold {} modules",
                self.string_count, self.modules_per_string, self.module_count
            ));
        }
        let combiner_capacity = self.combiner_count.checked_mul(u64::from(self.combiner_inputs));
        if combiner_capacity.is_none_or(|taken| taken < self.string_count) {
            return fail(format!(
                "{} combiners of {} inputs cannot take {} strings",
                self.combiner_count, self.combiner_inputs, self.string_count
            ));
        }
        if self.land_area > self.total_site_area {
            return fail(format!(
                "land area {} exceeds total site area {}",
                self.land_area, self.total_site_area
            ));
        }

        if !(self.latitude.value().is_finite() && self.latitude.value().abs() <= 90.0) {
            return fail(format!("latitude out of range: {}", self.latitude));
        }
        if !(self.tilt.value().is_finite() && (0.0..=90.0).contains(&self.tilt.value())) {
            return fail(format!("tilt out of range: {}", self.tilt));
        }
        if !self.azimuth.value().is_finite() {
            return fail(format!("azimuth not finite: {}", self.azimuth));
        }
        if !(self.gcr > 0.0 && self.gcr <= 1.0) {
            return fail(format!("gcr must be in (0, 1], got {}", self.gcr));
        }
        for (what, pct) in [("dcLossPercent", self.dc_loss_percent), ("acLossPercent", self.ac_loss_percent)] {
            if !(pct.is_finite() && (0.0..100.0).contains(&pct)) {
                return fail(format!("{} must be in [0, 100), got {}", what, pct));
            }
        }

        if self.monthly_ghi.len() != MONTHS {
            return fail(format!("monthlyGhi must have {} entries, got {}", MONTHS, self.monthly_ghi.len()));
        }
        if self.monthly_temperature.len() != MONTHS {
            return fail(format!(
                "monthlyTemperature must have {} entries, got {}",
                MONTHS,
                self.monthly_temperature.len()
            ));
        }
        if self.monthly_ghi.iter().any(|g| !(g.value().is_finite() && g.value() >= 0.0)) {
            return fail("monthlyGhi entries must be finite and non-negative".to_string());
        }
        if self.monthly_temperature.iter().any(|t| !t.value().is_finite()) {
            return fail("monthlyTemperature entries must be finite".to_string());
        }

        let sum: f64 = self.monthly_ghi.iter().map(|g| g.value()).sum();
        if !positive(sum) {
            return fail("monthlyGhi must not be all zero".to_string());
        }
        if (sum - self.annual_ghi.value()).abs() > 1e-6 * self.annual_ghi.value().abs().max(1.0) {
            return fail(format!("monthlyGhi sums to {} but annualGhi is {}", sum, self.annual_ghi));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ca_pv_ed_is_valid() {
        let p = ReferencePlant::ca_pv_ed();
        p.validate().unwrap();
        assert_eq!(p.monthly_ghi.len(), 12);
        assert!((p.dc_ac_ratio() - 1.30).abs() < 0.01);
    }

    #[test]
    fn test_reference_counts_are_consistent() {
        let p = ReferencePlant::ca_pv_ed();
        assert_eq!(p.string_count * u64::from(p.modules_per_string), p.module_count);
        assert_eq!(p.structure_count * u64::from(p.modules_per_structure), p.module_count);
        assert!(p.inverter_count as f64 * p.inverter_power.value() >= p.ac_capacity.value());
        assert!(p.transformer_count as f64 * p.transformer_power.value() >= p.ac_capacity.value());
    }

    #[test]
    fn test_non_positive_ac_capacity_rejected() {
        let p = ReferencePlant { ac_capacity: Megawatts(0.0), ..ReferencePlant::ca_pv_ed() };
        let err = p.validate().unwrap_err();
        assert!(matches!(err, SizingError::Configuration(ref m) if m.contains("acCapacity")), "{:?}", err);
    }

    #[test]
    fn test_eleven_month_profile_rejected() {
        let mut p = ReferencePlant::ca_pv_ed();
        let dec = p.monthly_ghi.pop().unwrap();
        p.annual_ghi = KilowattHoursPerSquareMeter(p.annual_ghi.value() - dec.value());
        let err = p.validate().unwrap_err();
        assert!(matches!(err, SizingError::Configuration(ref m) if m.contains("12 entries")), "{:?}", err);
    }

    #[test]
    fn test_annual_total_mismatch_rejected() {
        let p = ReferencePlant { annual_ghi: KilowattHoursPerSquareMeter(1276.0), ..ReferencePlant::ca_pv_ed() };
        assert!(matches!(p.validate(), Err(SizingError::Configuration(_))));
    }

    #[test]
    fn test_zero_inverters_rejected() {
        let p = ReferencePlant { inverter_count: 0, ..ReferencePlant::ca_pv_ed() };
        assert!(matches!(p.validate(), Err(SizingError::Configuration(_))));
    }

    #[test]
    fn test_strings_too_few_for_modules_rejected() {
        let p = ReferencePlant { string_count: 3_000, ..ReferencePlant::ca_pv_ed() };
        let err = p.validate().unwrap_err();
        assert!(matches!(err, SizingError::Configuration(ref m) if m.contains("cannot hold")), "{:?}", err);

        let p = ReferencePlant { combiner_count: 194, ..ReferencePlant::ca_pv_ed() };
        let err = p.validate().unwrap_err();
        assert!(matches!(err, SizingError::Configuration(ref m) if m.contains("cannot take")), "{:?}", err);
    }

    #[test]
    fn test_oversized_counts_rejected() {
        // Capacity products past u64 are a configuration error, not a panic.
        let p = ReferencePlant { string_count: u64::MAX / 2, ..ReferencePlant::ca_pv_ed() };
        assert!(matches!(p.validate(), Err(SizingError::Configuration(_))));

        let p = ReferencePlant { combiner_count: u64::MAX / 4, ..ReferencePlant::ca_pv_ed() };
        assert!(matches!(p.validate(), Err(SizingError::Configuration(_))));

        let json = serde_json::to_string(&ReferencePlant::ca_pv_ed())
            .unwrap()
            .replace("\"stringCount\":3112", &format!("\"stringCount\":{}", u64::MAX));
        let injected: ReferencePlant = serde_json::from_str(&json).unwrap();
        assert!(matches!(injected.validate(), Err(SizingError::Configuration(_))));
    }

    #[test]
    fn test_plant_can_be_injected_from_json() {
        let json = serde_json::to_string(&ReferencePlant::ca_pv_ed()).unwrap();
        assert!(json.contains("\"acCapacity\":38.9"));
        let injected: ReferencePlant = serde_json::from_str(&json).unwrap();
        injected.validate().unwrap();
        assert_eq!(injected.module_count, 80_912);
        assert_eq!(injected.name, "CA_PV_ED");
    }
}
