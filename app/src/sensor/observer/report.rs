use super::ConcurrentObserver;
use crate::error::ObserverError;

use irrigo_core::ReportsResponse;
use std::sync::Arc;
use tracing::debug;

pub struct ReportObserver {
    inner: Arc<ConcurrentObserver>,
}

impl Clone for ReportObserver {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl ReportObserver {
    pub fn new(inner: Arc<ConcurrentObserver>) -> Self {
        ReportObserver { inner }
    }

    #[tracing::instrument(skip(self))]
    pub async fn reports(&self) -> Result<ReportsResponse, ObserverError> {
        let now = self.inner.local_now();
        let monthly = {
            let mut generator = self.inner.generator.lock();
            generator.monthly_reports(&now)
        };
        let response = ReportsResponse::new(monthly);

        debug!(
            water_saved_liters = response.totals.water_saved_liters,
            "Generated savings report"
        );
        Ok(response)
    }
}
