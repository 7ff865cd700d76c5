use super::ConcurrentObserver;
use crate::error::ObserverError;

use irrigo_core::SensorSnapshot;
use std::sync::Arc;
use tracing::debug;

pub struct SensorObserver {
    inner: Arc<ConcurrentObserver>,
}

impl Clone for SensorObserver {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl SensorObserver {
    pub fn new(inner: Arc<ConcurrentObserver>) -> Self {
        SensorObserver { inner }
    }

    /// Fresh readings merged with the current irrigation state
    #[tracing::instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<SensorSnapshot, ObserverError> {
        let now = self.inner.local_now();
        let readings = {
            let mut generator = self.inner.generator.lock();
            generator.readings(&now)
        };

        let store = self.inner.store.read().await;
        let snapshot = SensorSnapshot {
            soil_moisture: readings.soil_moisture,
            temperature_c: readings.temperature_c,
            humidity: readings.humidity,
            tank_level: readings.tank_level,
            irrigation_status: store.status(),
            last_irrigation: store.last_irrigation(),
            moisture_trend: readings.moisture_trend,
            water_usage: readings.water_usage,
            alerts: readings.alerts,
            upcoming: store.upcoming().to_vec(),
        };

        debug!(
            soil_moisture = snapshot.soil_moisture,
            alerts = snapshot.alerts.len(),
            "Rendered sensor snapshot"
        );
        Ok(snapshot)
    }
}
