use irrigo_core::{
    AlertItem, AlertSeverity, ErrorResponse, IrrigationEvent, IrrigationStatus, MessageResponse,
    MonthlyReport, OverrideRequest, OverrideResponse, ReportTotals, ReportsResponse,
    SensorSnapshot, WaterUsage,
};
use once_cell::sync::Lazy;
use utoipa::OpenApi;
use warp::Filter;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::sensor_routes::sensor_snapshot,
        super::irrigation_routes::irrigation_override,
        super::report_routes::reports,
        super::metric_routes::ping,
        super::metric_routes::demo,
    ),
    components(schemas(
        SensorSnapshot,
        WaterUsage,
        AlertItem,
        AlertSeverity,
        IrrigationStatus,
        IrrigationEvent,
        OverrideRequest,
        OverrideResponse,
        ReportsResponse,
        MonthlyReport,
        ReportTotals,
        MessageResponse,
        ErrorResponse,
    )),
    tags(
        (name = "sensors", description = "Mock sensor readings"),
        (name = "irrigation", description = "Manual irrigation overrides"),
        (name = "reports", description = "Savings reports"),
        (name = "metrics", description = "Liveness endpoints"),
    )
)]
struct ApiDoc;

static API_DOC: Lazy<utoipa::openapi::OpenApi> = Lazy::new(ApiDoc::openapi);

/// GET api/doc/api.json
///
/// OpenAPI document of all JSON endpoints
pub fn routes() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("api" / "doc" / "api.json")
        .and(warp::get())
        .map(|| warp::reply::json(&*API_DOC))
        .boxed()
}
