use super::{build_response, InvalidBody, BODY_LIMIT};
use crate::sensor::{ConcurrentObserver, IrrigationObserver};
use irrigo_core::{ErrorResponse, OverrideRequest, OverrideResponse};
use std::sync::Arc;
use warp::hyper::body::Bytes;
use warp::Filter;

pub fn routes(
    observer: &Arc<ConcurrentObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    irrigation_override(IrrigationObserver::new(observer.clone()))
}

/// POST api/irrigation/override
///
/// Manually start, stop or delay irrigation
///
/// Returns an `OverrideResponse` with the resulting status and the next
/// scheduled event, or 400 for an unknown action or a non-positive delay
#[utoipa::path(
    post,
    path = "/api/irrigation/override",
    tag = "irrigation",
    request_body = OverrideRequest,
    responses(
        (status = 200, description = "Override applied", body = OverrideResponse),
        (status = 400, description = "Invalid action or delay", body = ErrorResponse)
    )
)]
pub fn irrigation_override(
    observer: IrrigationObserver,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::path!("api" / "irrigation" / "override"))
        .and(warp::post())
        .and(override_body())
        .and_then(
            |observer: IrrigationObserver, body: OverrideRequest| async move {
                let resp = observer.apply_override(body).await;
                build_response(resp)
            },
        )
        .boxed()
}

/// JSON override body, a blank body counts as `{}`
fn override_body() -> impl Filter<Extract = (OverrideRequest,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(BODY_LIMIT)
        .and(warp::body::bytes())
        .and_then(|body: Bytes| async move {
            OverrideRequest::from_body(&body)
                .map_err(|err| warp::reject::custom(InvalidBody(err.to_string())))
        })
}
