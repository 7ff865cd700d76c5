use crate::IrrigationEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum IrrigationStatus {
    On,
    Off,
}

impl From<bool> for IrrigationStatus {
    fn from(irrigating: bool) -> Self {
        if irrigating {
            IrrigationStatus::On
        } else {
            IrrigationStatus::Off
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertItem {
    pub id: String,
    pub severity: AlertSeverity,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Liters used on one weekday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WaterUsage {
    pub label: String,
    pub liters: u32,
}

/// Point-in-time bundle of sensor and status readings
///
/// Gauges are percentages except `temperature_c`. Only `irrigation_status`,
/// `last_irrigation` and `upcoming` reflect server state, the rest is
/// regenerated on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SensorSnapshot {
    pub soil_moisture: u32,
    pub temperature_c: i32,
    pub humidity: u32,
    pub tank_level: u32,
    pub irrigation_status: IrrigationStatus,
    pub last_irrigation: DateTime<Utc>,
    pub moisture_trend: Vec<u32>,
    pub water_usage: Vec<WaterUsage>,
    pub alerts: Vec<AlertItem>,
    pub upcoming: Vec<IrrigationEvent>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let on = serde_json::to_string(&IrrigationStatus::from(true)).unwrap();
        let off = serde_json::to_string(&IrrigationStatus::from(false)).unwrap();

        assert_eq!("\"ON\"", on);
        assert_eq!("\"OFF\"", off);
    }

    #[test]
    fn test_snapshot_field_names() {
        let snapshot = SensorSnapshot {
            soil_moisture: 40,
            temperature_c: 21,
            humidity: 50,
            tank_level: 80,
            irrigation_status: IrrigationStatus::Off,
            last_irrigation: Utc::now(),
            moisture_trend: vec![45, 50],
            water_usage: vec![WaterUsage {
                label: "Mo".to_owned(),
                liters: 70,
            }],
            alerts: vec![AlertItem {
                id: "a1".to_owned(),
                severity: AlertSeverity::Critical,
                message: "Soil moisture is low in Zone 1".to_owned(),
                created_at: Utc::now(),
            }],
            upcoming: vec![],
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        for key in [
            "soilMoisture",
            "temperatureC",
            "humidity",
            "tankLevel",
            "irrigationStatus",
            "lastIrrigation",
            "moistureTrend",
            "waterUsage",
            "alerts",
            "upcoming",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!("critical", json["alerts"][0]["severity"]);
        assert!(json["alerts"][0].get("createdAt").is_some());
    }
}
