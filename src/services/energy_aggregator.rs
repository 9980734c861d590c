use tracing::debug;

use crate::models::plant::{DAYS_IN_MONTH, ReferencePlant};
use crate::models::sizing::EnergyReport;
use crate::models::units::{HOURS_PER_YEAR, KilowattHoursPerSquareMeter, MegawattHours, Megawatts, Tonnes};

/// Splits `annual` over the months in proportion to normalizedGHI × days.
///
/// normalizedGHI[m] = ghi[m] / mean(ghi). The result sums back to `annual`.
/// A profile with no irradiance falls back to a pure day-count split.
pub fn distribute_monthly(
    annual: MegawattHours,
    monthly_ghi: &[KilowattHoursPerSquareMeter],
) -> Vec<MegawattHours> {
    let n = monthly_ghi.len().min(DAYS_IN_MONTH.len());
    if n == 0 {
        return Vec::new();
    }
    let mean = monthly_ghi[..n].iter().map(|g| g.value()).sum::<f64>() / n as f64;

    let weights: Vec<f64> = if mean > 0.0 {
        monthly_ghi[..n]
            .iter()
            .zip(DAYS_IN_MONTH)
            .map(|(g, days)| (g.value() / mean) * days as f64)
            .collect()
    } else {
        DAYS_IN_MONTH[..n].iter().map(|&d| d as f64).collect()
    };
    let total: f64 = weights.iter().sum();

    weights.into_iter().map(|w| annual * (w / total)).collect()
}

/// Annual/monthly yield and the diagnostic ratios derived from it.
#[derive(Debug, Clone, Copy)]
pub struct EnergyAggregator<'a> {
    plant: &'a ReferencePlant,
    /// Fractions
    dc_loss: f64,
    ac_loss: f64,
    co2_tonnes_per_mwh: f64,
}

impl<'a> EnergyAggregator<'a> {
    pub fn new(plant: &'a ReferencePlant, dc_loss: f64, ac_loss: f64, co2_tonnes_per_mwh: f64) -> Self {
        Self { plant, dc_loss, ac_loss, co2_tonnes_per_mwh }
    }

    /// Combined DC and AC cabling efficiency.
    pub fn loss_factor(&self) -> f64 {
        (1.0 - self.dc_loss) * (1.0 - self.ac_loss)
    }

    /// AC capacity running all year at `capacity_factor`, before losses.
    pub fn theoretical_energy(&self, ac: Megawatts, capacity_factor: f64) -> MegawattHours {
        ac.over_hours(HOURS_PER_YEAR) * capacity_factor
    }

    /// solarAC × 8760 × CF × (1 − dcLoss) × (1 − acLoss)
    pub fn annual_energy(&self, ac: Megawatts, capacity_factor: f64) -> MegawattHours {
        self.theoretical_energy(ac, capacity_factor) * self.loss_factor()
    }

    pub fn aggregate(&self, ac: Megawatts, dc: Megawatts, capacity_factor: f64) -> EnergyReport {
        let theoretical = self.theoretical_energy(ac, capacity_factor);
        let annual = self.annual_energy(ac, capacity_factor);
        let monthly = distribute_monthly(annual, &self.plant.monthly_ghi);

        // Reference yield: hours at 1 kW/m² that the site's GHI amounts to.
        let reference_yield_h = self.plant.annual_ghi.value();

        let report = EnergyReport {
            annual_energy: annual,
            performance_ratio: annual / theoretical,
            irradiance_performance_ratio: annual.value() / (dc.value() * reference_yield_h),
            actual_capacity_factor: annual / ac.over_hours(HOURS_PER_YEAR),
            // MWh / MW == kWh / kWp
            specific_yield: annual.value() / dc.value(),
            co2_savings: Tonnes(annual.value() * self.co2_tonnes_per_mwh),
            monthly_energy: monthly,
        };

        debug!(
            annual_mwh = report.annual_energy.value(),
            pr = report.performance_ratio,
            irradiance_pr = report.irradiance_performance_ratio,
            cf = report.actual_capacity_factor,
            "energy aggregated"
        );
        #[cfg(feature = "verbose_log")]
        for (name, e) in crate::models::plant::MONTH_NAMES.iter().zip(&report.monthly_energy) {
            tracing::trace!("[ENERGY] {}: {:.1}", name, e);
        }

        report
    }
}
