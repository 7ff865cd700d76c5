use super::build_response;
use crate::sensor::{ConcurrentObserver, ReportObserver};
use irrigo_core::ReportsResponse;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    observer: &Arc<ConcurrentObserver>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    reports(ReportObserver::new(observer.clone()))
}

/// GET api/reports
///
/// Savings of the last six calendar months, oldest first, with totals
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "reports",
    responses(
        (status = 200, description = "Monthly savings report", body = ReportsResponse)
    )
)]
pub fn reports(
    observer: ReportObserver,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || observer.clone())
        .and(warp::path!("api" / "reports"))
        .and(warp::get())
        .and_then(|observer: ReportObserver| async move {
            let resp = observer.reports().await;
            build_response(resp)
        })
        .boxed()
}
