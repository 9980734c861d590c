use crate::config::Config;
use crate::models::units::{Celsius, Watts, WattsPerSquareMeter};

/// Irradiance at which NOCT is specified, W/m²
const NOCT_IRRADIANCE: f64 = 800.0;
/// Ambient temperature at which NOCT is specified, °C
const NOCT_AMBIENT_C: f64 = 20.0;
/// Standard test conditions
const STC_IRRADIANCE: f64 = 1000.0;
const STC_CELL_C: f64 = 25.0;

/// Single-module thermal and power model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModulePowerModel {
    pub rated_power: Watts,
    pub noct_c: f64,
    /// α, 1/°C, never positive
    pub temp_coefficient: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    pub cell_temperature: Celsius,
    pub power: Watts,
    /// Share of the irradiance-scaled power lost to heating, %
    pub temperature_loss_percent: f64,
}

impl ModulePowerModel {
    pub fn new(rated_power: Watts, config: &Config) -> Self {
        Self {
            rated_power,
            noct_c: config.noct_c,
            temp_coefficient: config.temp_coefficient_per_c,
        }
    }

    /// T_cell = T_ambient + (NOCT − 20) · (G / 800)
    pub fn cell_temperature(&self, ambient: Celsius, poa: WattsPerSquareMeter) -> Celsius {
        Celsius(ambient.value() + (self.noct_c - NOCT_AMBIENT_C) * (poa.value() / NOCT_IRRADIANCE))
    }

    /// P = P_rated · (G / 1000) · [1 + α · (T_cell − 25)], floored at zero.
    pub fn power(&self, poa: WattsPerSquareMeter, cell_temperature: Celsius) -> Watts {
        if poa.value() <= 0.0 {
            return Watts::ZERO;
        }
        let temp_factor = 1.0 + self.temp_coefficient * (cell_temperature.value() - STC_CELL_C);
        let raw_power = self.rated_power.value() * (poa.value() / STC_IRRADIANCE);
        Watts((raw_power * temp_factor).max(0.0))
    }

    /// Cell temperature and power for a POA/ambient pair.
    pub fn operate(&self, poa: WattsPerSquareMeter, ambient: Celsius) -> OperatingPoint {
        let cell_temperature = self.cell_temperature(ambient, poa);
        OperatingPoint {
            cell_temperature,
            power: self.power(poa, cell_temperature),
            temperature_loss_percent: -self.temp_coefficient * (cell_temperature.value() - STC_CELL_C) * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn longi_625() -> ModulePowerModel {
        ModulePowerModel::new(Watts(625.0), &Config::default())
    }

    #[test]
    fn test_noct_conditions() {
        let m = longi_625();
        let t = m.cell_temperature(Celsius(20.0), WattsPerSquareMeter(800.0));
        assert!((t.value() - 45.0).abs() < 1e-12, "NOCT cell temp {:.2}", t.value());
    }

    #[test]
    fn test_rated_power_at_stc() {
        let p = longi_625().power(WattsPerSquareMeter(1000.0), Celsius(25.0));
        assert!((p.value() - 625.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_poa_is_exactly_zero() {
        let m = longi_625();
        for t in [-40.0, 25.0, 400.0] {
            let p = m.power(WattsPerSquareMeter(0.0), Celsius(t));
            assert_eq!(p.value(), 0.0);
            assert!(p.value().is_sign_positive(), "must not be -0.0");
        }
    }

    #[test]
    fn test_monotonic_in_poa() {
        let m = longi_625();
        let mut last = 0.0;
        for g in (0..=1400).step_by(50) {
            let p = m.power(WattsPerSquareMeter(g as f64), Celsius(60.0)).value();
            assert!(p >= last, "power fell from {} to {} at G={}", last, p, g);
            last = p;
        }
    }

    #[test]
    fn test_monotonic_in_cell_temperature() {
        let m = longi_625();
        let mut last = f64::INFINITY;
        for t in (-40..=90).step_by(5) {
            let p = m.power(WattsPerSquareMeter(900.0), Celsius(t as f64)).value();
            assert!(p <= last, "power rose from {} to {} at T={}", last, p, t);
            last = p;
        }
    }

    #[test]
    fn test_never_negative_when_extremely_hot() {
        let p = longi_625().power(WattsPerSquareMeter(1000.0), Celsius(500.0));
        assert_eq!(p.value(), 0.0);
    }

    #[test]
    fn test_cold_module_beats_rating() {
        let op = longi_625().operate(WattsPerSquareMeter(1000.0), Celsius(-20.0));
        assert!(op.cell_temperature.value() < 25.0);
        assert!(op.power.value() > 625.0);
        assert!(op.temperature_loss_percent < 0.0);
    }
}
