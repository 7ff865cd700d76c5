use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Savings attributed to smart irrigation for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    #[schema(example = "Jan")]
    pub month: String,
    pub water_saved_liters: u32,
    pub energy_saved_kwh: u32,
    pub yield_benefit_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    pub water_saved_liters: u32,
    pub energy_saved_kwh: u32,
    pub yield_benefit_percent_avg: f64,
}

impl ReportTotals {
    /// Sums liters and kWh, averages the yield benefit rounded to one decimal
    pub fn from_monthly(monthly: &[MonthlyReport]) -> Self {
        let water_saved_liters = monthly.iter().map(|m| m.water_saved_liters).sum();
        let energy_saved_kwh = monthly.iter().map(|m| m.energy_saved_kwh).sum();
        let yield_benefit_percent_avg = if monthly.is_empty() {
            0.0
        } else {
            let sum: f64 = monthly.iter().map(|m| m.yield_benefit_percent).sum();
            round_one_decimal(sum / monthly.len() as f64)
        };

        ReportTotals {
            water_saved_liters,
            energy_saved_kwh,
            yield_benefit_percent_avg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportsResponse {
    pub monthly: Vec<MonthlyReport>,
    pub totals: ReportTotals,
}

impl ReportsResponse {
    pub fn new(monthly: Vec<MonthlyReport>) -> Self {
        let totals = ReportTotals::from_monthly(&monthly);
        ReportsResponse { monthly, totals }
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
