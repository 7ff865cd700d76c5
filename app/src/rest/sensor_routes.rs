use super::build_response;
use crate::sensor::{ConcurrentObserver, SensorObserver};
use irrigo_core::SensorSnapshot;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    observer: &Arc<ConcurrentObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    sensor_snapshot(SensorObserver::new(observer.clone()))
}

/// GET api/sensors
///
/// Fetch the current sensor snapshot
///
/// Gauges, trend, usage and alerts are freshly generated on each call,
/// irrigation status and upcoming events are the shared server state
#[utoipa::path(
    get,
    path = "/api/sensors",
    tag = "sensors",
    responses(
        (status = 200, description = "Current sensor snapshot", body = SensorSnapshot)
    )
)]
pub fn sensor_snapshot(
    observer: SensorObserver,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::path!("api" / "sensors"))
        .and(warp::get())
        .and_then(|observer: SensorObserver| async move {
            let resp = observer.snapshot().await;
            build_response(resp)
        })
        .boxed()
}
