use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};
use irrigo_core::{AlertItem, AlertSeverity, IrrigationEvent, MonthlyReport, WaterUsage};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];
const ZONES: [&str; 3] = ["Zone 1", "Zone 2", "Zone 3"];
const REASONS: [&str; 5] = [
    "Routine schedule",
    "Soil moisture low",
    "Evening cooling",
    "Crop growth stage",
    "Weather adjustment",
];
const ALERTS: [(&str, AlertSeverity); 6] = [
    ("Low battery level at sensor Zone 2", AlertSeverity::Warning),
    ("Soil moisture is low in Zone 1", AlertSeverity::Critical),
    ("Sensor Zone 3 reconnected successfully", AlertSeverity::Info),
    ("Water tank level below 50%", AlertSeverity::Warning),
    ("High temperature detected - irrigation triggered", AlertSeverity::Info),
    ("Sensor calibration needed for Zone 1", AlertSeverity::Warning),
];

pub const TREND_POINTS: usize = 7;
pub const SCHEDULED_EVENTS: usize = 5;
pub const REPORT_MONTHS: usize = 6;

/// Source of plausible looking farm telemetry
///
/// Every call is an independent draw, successive snapshots are not continuous.
/// A seeded generator yields the same sequence for the same calls.
#[derive(Debug)]
pub struct MockGenerator {
    rng: StdRng,
}

impl MockGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        MockGenerator { rng }
    }

    /// Uniform integer in `[min, max]`
    fn uniform(&mut self, min: i32, max: i32) -> i32 {
        self.rng.gen_range(min..=max)
    }

    pub fn soil_moisture(&mut self) -> u32 {
        (45 + self.uniform(-15, 25)).clamp(0, 100) as u32
    }

    /// Celsius, warmer between 07:00 and 17:59 local time
    pub fn temperature(&mut self, local_hour: u32) -> i32 {
        let day_night_variation = if local_hour > 6 && local_hour < 18 {
            8
        } else {
            -3
        };
        20 + day_night_variation + self.uniform(-5, 8)
    }

    pub fn humidity(&mut self) -> u32 {
        (55 + self.uniform(-15, 20)).clamp(30, 80) as u32
    }

    pub fn tank_level(&mut self) -> u32 {
        (70 + self.uniform(-20, 25)).clamp(40, 95) as u32
    }

    /// Random walk starting at 50, every emitted point is clamped to `[20, 80]`
    pub fn moisture_trend(&mut self, points: usize) -> Vec<u32> {
        let mut value = 50;
        (0..points)
            .map(|_| {
                value += self.uniform(-8, 8);
                value.clamp(20, 80) as u32
            })
            .collect()
    }

    pub fn water_usage(&mut self) -> Vec<WaterUsage> {
        WEEKDAYS
            .iter()
            .enumerate()
            .map(|(i, day)| WaterUsage {
                label: day.to_string(),
                liters: (60 + i as i32 * 15 + self.uniform(-20, 40)) as u32,
            })
            .collect()
    }

    pub fn irrigation_schedule(&mut self, now: DateTime<Utc>) -> Vec<IrrigationEvent> {
        (0..SCHEDULED_EVENTS)
            .map(|i| {
                let offset = Duration::minutes(((i + 1) * (4 + i)) as i64);
                let reason = REASONS.choose(&mut self.rng).copied().unwrap_or(REASONS[0]);
                IrrigationEvent {
                    id: format!("evt-{}", i + 1),
                    zone: ZONES[i % ZONES.len()].to_owned(),
                    scheduled_at: now + offset,
                    duration_minutes: (20 + self.uniform(0, 20)) as u32,
                    reason: reason.to_owned(),
                }
            })
            .collect()
    }

    /// The first two to four entries of the alert catalogue
    pub fn alerts(&mut self, now: DateTime<Utc>) -> Vec<AlertItem> {
        let count = self.uniform(2, 4) as usize;
        ALERTS
            .iter()
            .take(count)
            .enumerate()
            .map(|(i, (message, severity))| AlertItem {
                id: format!("a{}", i + 1),
                severity: *severity,
                message: message.to_string(),
                created_at: now - Duration::minutes(self.uniform(5, 120) as i64),
            })
            .collect()
    }

    /// Six trailing calendar months of `now`'s timezone, oldest first
    pub fn monthly_reports<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Vec<MonthlyReport> {
        let current_month = now.month0() as usize;
        (0..REPORT_MONTHS)
            .rev()
            .map(|months_ago| MonthlyReport {
                month: MONTHS[(current_month + 12 - months_ago) % 12].to_owned(),
                water_saved_liters: (300 + self.uniform(100, 400)) as u32,
                energy_saved_kwh: (20 + self.uniform(10, 40)) as u32,
                yield_benefit_percent: (5 + self.uniform(2, 8)) as f64,
            })
            .collect()
    }

    pub fn readings<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Readings {
        Readings {
            soil_moisture: self.soil_moisture(),
            temperature_c: self.temperature(now.hour()),
            humidity: self.humidity(),
            tank_level: self.tank_level(),
            moisture_trend: self.moisture_trend(TREND_POINTS),
            water_usage: self.water_usage(),
            alerts: self.alerts(now.with_timezone(&Utc)),
        }
    }
}

/// Generated part of a sensor snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Readings {
    pub soil_moisture: u32,
    pub temperature_c: i32,
    pub humidity: u32,
    pub tank_level: u32,
    pub moisture_trend: Vec<u32>,
    pub water_usage: Vec<WaterUsage>,
    pub alerts: Vec<AlertItem>,
}
