use super::build_response;
use crate::sensor::ConcurrentObserver;
use irrigo_core::MessageResponse;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    observer: &Arc<ConcurrentObserver>,
    ping_message: &str,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    ping(ping_message.to_owned())
        .or(demo())
        .or(health(observer.clone()))
}

/// GET api/ping
///
/// Echoes the configured ping message
#[utoipa::path(
    get,
    path = "/api/ping",
    tag = "metrics",
    responses((status = 200, description = "Configured ping message", body = MessageResponse))
)]
pub fn ping(
    message: String,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("api" / "ping")
        .and(warp::get())
        .map(move || warp::reply::json(&MessageResponse::new(message.clone())))
        .boxed()
}

/// GET api/demo
#[utoipa::path(
    get,
    path = "/api/demo",
    tag = "metrics",
    responses((status = 200, description = "Static demo payload", body = MessageResponse))
)]
pub fn demo() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("api" / "demo")
        .and(warp::get())
        .map(|| warp::reply::json(&MessageResponse::new("Hello from the irrigation server")))
        .boxed()
}

fn health(
    observer: Arc<ConcurrentObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::path!("api" / "health"))
        .and(warp::get())
        .and_then(|observer: Arc<ConcurrentObserver>| async move {
            let ret = dto::HealthyDto {
                healthy: true,
                version: irrigo_core::CORE_VERSION.to_owned(),
                irrigation_status: observer.irrigation_status().await,
                upcoming_events: observer.upcoming_count().await,
                uptime_seconds: observer.uptime().num_seconds(),
            };
            build_response(Ok(ret))
        })
        .boxed()
}

mod dto {
    use irrigo_core::IrrigationStatus;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct HealthyDto {
        pub healthy: bool,
        pub version: String,
        pub irrigation_status: IrrigationStatus,
        pub upcoming_events: usize,
        pub uptime_seconds: i64,
    }
}
