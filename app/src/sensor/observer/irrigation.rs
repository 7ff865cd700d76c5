use super::ConcurrentObserver;
use crate::error::ObserverError;

use chrono::Utc;
use irrigo_core::{OverrideAction, OverrideRequest, OverrideResponse};
use std::sync::Arc;
use tracing::info;

pub struct IrrigationObserver {
    inner: Arc<ConcurrentObserver>,
}

impl Clone for IrrigationObserver {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl IrrigationObserver {
    pub fn new(inner: Arc<ConcurrentObserver>) -> Self {
        IrrigationObserver { inner }
    }

    /// Applies a manual start, stop or delay
    ///
    /// Overlapping overrides are serialized by the store lock, the last one wins.
    #[tracing::instrument(skip(self))]
    pub async fn apply_override(
        &self,
        request: OverrideRequest,
    ) -> Result<OverrideResponse, ObserverError> {
        let action = request.action()?;

        let mut store = self.inner.store.write().await;
        let message = match action {
            OverrideAction::Start => {
                store.set_irrigation(true, Utc::now());
                match request.zone() {
                    Some(zone) => format!("Irrigation started for {}.", zone),
                    None => "Irrigation started.".to_owned(),
                }
            }
            OverrideAction::Stop => {
                store.set_irrigation(false, Utc::now());
                "Irrigation stopped.".to_owned()
            }
            OverrideAction::Delay => {
                store.delay_next_event(request.delay()?)?;
                format!(
                    "Next irrigation delayed by {} minutes.",
                    request.delay_minutes.unwrap_or_default()
                )
            }
        };

        info!(status = ?store.status(), "{}", message);
        Ok(OverrideResponse {
            ok: true,
            irrigation_status: store.status(),
            message,
            next_event: store.next_event().cloned(),
        })
    }
}
