use super::store::IrrigationStore;
use crate::mock::MockGenerator;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use irrigo_core::IrrigationStatus;
use parking_lot::Mutex;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

pub mod irrigation;
pub mod report;
pub mod sensor;

#[derive(Debug, Clone, Copy)]
pub struct ObserverOptions {
    pub seed: Option<u64>,
    pub timezone: Tz,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        ObserverOptions {
            seed: None,
            timezone: Tz::UTC,
        }
    }
}

/// Owns the irrigation state and the mock generator of one server instance
pub struct ConcurrentObserver {
    pub(crate) store: RwLock<IrrigationStore>,
    pub(crate) generator: Mutex<MockGenerator>,
    pub(crate) timezone: Tz,
    started_at: DateTime<Utc>,
}

impl Debug for ConcurrentObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConcurrentObserver")
            .field("timezone", &self.timezone)
            .finish()
    }
}

impl ConcurrentObserver {
    pub fn new(options: ObserverOptions) -> Arc<Self> {
        let now = Utc::now();
        let mut generator = MockGenerator::new(options.seed);
        let events = generator.irrigation_schedule(now);
        let store = IrrigationStore::new(now - Duration::hours(1), events);

        info!(
            seeded = options.seed.is_some(),
            timezone = %options.timezone,
            "Created irrigation state"
        );
        let observer = ConcurrentObserver {
            store: RwLock::new(store),
            generator: Mutex::new(generator),
            timezone: options.timezone,
            started_at: now,
        };
        Arc::new(observer)
    }

    pub async fn irrigation_status(&self) -> IrrigationStatus {
        self.store.read().await.status()
    }

    pub async fn upcoming_count(&self) -> usize {
        self.store.read().await.upcoming().len()
    }

    pub fn uptime(&self) -> Duration {
        Utc::now() - self.started_at
    }

    pub(crate) fn local_now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.timezone)
    }
}
