use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{Result, SizingError};

fn default_dc_ac_ratio() -> f64 { 1.30 }
fn default_fence_coverage() -> f64 { 0.937 }
fn default_co2_tonnes_per_mwh() -> f64 { 0.4 }
fn default_road_density_m_per_ha() -> f64 { 400.0 }
fn default_fence_irregularity() -> f64 { 1.2 }
fn default_noct_c() -> f64 { 45.0 }
fn default_temp_coefficient_per_c() -> f64 { -0.0035 }
fn default_albedo() -> f64 { 0.20 }
fn default_diffuse_fraction() -> f64 { 0.10 }
fn default_module_vmpp_v() -> f64 { 41.1 }
fn default_mv_voltage_kv() -> f64 { 20.0 }

/// Overridable engine constants. Every field has a documented default, so an
/// empty JSON object `{}` yields `Config::default()`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Installed DC over inverter AC capacity (1.30)
    #[serde(default = "default_dc_ac_ratio")]
    pub dc_ac_ratio: f64,
    /// DC cabling loss as a fraction; `None` uses the reference plant's (2%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dc_loss: Option<f64>,
    /// AC cabling loss as a fraction; `None` uses the reference plant's (1%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ac_loss: Option<f64>,
    /// Fenced share of the plant land (0.937)
    #[serde(default = "default_fence_coverage")]
    pub fence_coverage: f64,
    /// Grid emission factor displaced by solar output, t CO₂ per MWh (0.4)
    #[serde(default = "default_co2_tonnes_per_mwh")]
    pub co2_tonnes_per_mwh: f64,
    /// Access road metres per hectare of land (400)
    #[serde(default = "default_road_density_m_per_ha")]
    pub road_density_m_per_ha: f64,
    /// Perimeter margin for non-square plots (1.2)
    #[serde(default = "default_fence_irregularity")]
    pub fence_irregularity: f64,
    /// Nominal operating cell temperature, °C (45)
    #[serde(default = "default_noct_c")]
    pub noct_c: f64,
    /// Power temperature coefficient α, 1/°C (−0.0035)
    #[serde(default = "default_temp_coefficient_per_c")]
    pub temp_coefficient_per_c: f64,
    /// Ground reflectance for the reflected POA component (0.20)
    #[serde(default = "default_albedo")]
    pub albedo: f64,
    /// Diffuse share of GHI in the isotropic decomposition (0.10)
    #[serde(default = "default_diffuse_fraction")]
    pub diffuse_fraction: f64,
    /// Module maximum-power-point voltage, V (41.1)
    #[serde(default = "default_module_vmpp_v")]
    pub module_vmpp_v: f64,
    /// Medium-voltage collection network, kV (20)
    #[serde(default = "default_mv_voltage_kv")]
    pub mv_voltage_kv: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dc_ac_ratio: default_dc_ac_ratio(),
            dc_loss: None,
            ac_loss: None,
            fence_coverage: default_fence_coverage(),
            co2_tonnes_per_mwh: default_co2_tonnes_per_mwh(),
            road_density_m_per_ha: default_road_density_m_per_ha(),
            fence_irregularity: default_fence_irregularity(),
            noct_c: default_noct_c(),
            temp_coefficient_per_c: default_temp_coefficient_per_c(),
            albedo: default_albedo(),
            diffuse_fraction: default_diffuse_fraction(),
            module_vmpp_v: default_module_vmpp_v(),
            mv_voltage_kv: default_mv_voltage_kv(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        fn check(ok: bool, what: &str, value: f64) -> Result<()> {
            if ok {
                Ok(())
            } else {
                Err(SizingError::Configuration(format!("{} out of range: {}", what, value)))
            }
        }

        let fraction = |v: f64| v.is_finite() && (0.0..1.0).contains(&v);
        let positive = |v: f64| v.is_finite() && v > 0.0;

        check(positive(self.dc_ac_ratio), "dcAcRatio", self.dc_ac_ratio)?;
        if let Some(v) = self.dc_loss {
            check(fraction(v), "dcLoss", v)?;
        }
        if let Some(v) = self.ac_loss {
            check(fraction(v), "acLoss", v)?;
        }
        check(
            positive(self.fence_coverage) && self.fence_coverage <= 1.0,
            "fenceCoverage",
            self.fence_coverage,
        )?;
        check(
            self.co2_tonnes_per_mwh.is_finite() && self.co2_tonnes_per_mwh >= 0.0,
            "co2TonnesPerMwh",
            self.co2_tonnes_per_mwh,
        )?;
        check(
            self.road_density_m_per_ha.is_finite() && self.road_density_m_per_ha >= 0.0,
            "roadDensityMPerHa",
            self.road_density_m_per_ha,
        )?;
        check(
            self.fence_irregularity.is_finite() && self.fence_irregularity >= 1.0,
            "fenceIrregularity",
            self.fence_irregularity,
        )?;
        check(self.noct_c.is_finite() && self.noct_c >= 20.0, "noctC", self.noct_c)?;
        // α ≤ 0: module power must not rise with cell temperature.
        check(
            self.temp_coefficient_per_c.is_finite() && self.temp_coefficient_per_c <= 0.0,
            "tempCoefficientPerC",
            self.temp_coefficient_per_c,
        )?;
        check(self.albedo.is_finite() && (0.0..=1.0).contains(&self.albedo), "albedo", self.albedo)?;
        check(
            self.diffuse_fraction.is_finite() && (0.0..=1.0).contains(&self.diffuse_fraction),
            "diffuseFraction",
            self.diffuse_fraction,
        )?;
        check(positive(self.module_vmpp_v), "moduleVmppV", self.module_vmpp_v)?;
        check(positive(self.mv_voltage_kv), "mvVoltageKv", self.mv_voltage_kv)?;
        Ok(())
    }
}
