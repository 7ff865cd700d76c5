use crate::config::Config;
use crate::error::ObserverError;
use crate::sensor::ConcurrentObserver;

use irrigo_core::ErrorResponse;
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info, warn};
use warp::filters::BoxedFilter;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

mod doc_routes;
mod irrigation_routes;
mod metric_routes;
mod report_routes;
mod sensor_routes;

/// Largest accepted request body in bytes
const BODY_LIMIT: u64 = 4096;

/// Body that does not parse into the expected request shape
#[derive(Debug)]
struct InvalidBody(String);

impl warp::reject::Reject for InvalidBody {}

/// Serves the API (and optionally the built client) until `shutdown` resolves
pub async fn dispatch_server(
    observer: Arc<ConcurrentObserver>,
    config: &Config,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), warp::Error> {
    let (addr, server) = warp::serve(routes(&observer, config))
        .try_bind_with_graceful_shutdown(config.socket_addr(), shutdown)?;
    info!("Starting webserver at: {}", addr);
    server.await;
    info!("Webserver stopped");
    Ok(())
}

/// The full server filter: API, static files, JSON rejections, CORS and request tracing
pub fn routes(
    observer: &Arc<ConcurrentObserver>,
    config: &Config,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let api = api_routes(observer, config.ping_message())
        .map(|reply| Reply::into_response(reply))
        .boxed();
    let site: BoxedFilter<(Response,)> = match config.static_dir() {
        Some(dir) => {
            info!("Serving static files from {:?}", dir);
            api.or(warp::get()
                .and(warp::fs::dir(dir.to_owned()))
                .map(|file: warp::filters::fs::File| file.into_response()))
                .unify()
                .boxed()
        }
        None => api,
    };

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["content-type"]);
    site.recover(handle_rejection)
        .with(cors)
        .with(warp::trace::request())
}

/// All JSON endpoints below `/api`
pub fn api_routes(
    observer: &Arc<ConcurrentObserver>,
    ping_message: &str,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    sensor_routes::routes(observer)
        .or(irrigation_routes::routes(observer))
        .or(report_routes::routes(observer))
        .or(metric_routes::routes(observer, ping_message))
        .or(doc_routes::routes())
}

fn build_response<T: serde::Serialize>(
    resp: Result<T, ObserverError>,
) -> Result<Box<dyn warp::Reply>, warp::Rejection> {
    match resp {
        Ok(data) => Ok(Box::new(warp::reply::json(&data))),
        Err(err) if err.is_user_error() => {
            warn!("{}", err);
            Ok(error_reply(StatusCode::BAD_REQUEST, err.to_string()))
        }
        Err(err) => {
            error!("{}", err);
            Ok(error_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_owned(),
            ))
        }
    }
}

fn error_reply(status: StatusCode, error: String) -> Box<dyn warp::Reply> {
    Box::new(warp::reply::with_status(
        warp::reply::json(&ErrorResponse { error }),
        status,
    ))
}

/// Maps warp's rejections onto JSON error bodies
pub async fn handle_rejection(err: Rejection) -> Result<Box<dyn warp::Reply>, Infallible> {
    let reply = if err.is_not_found() {
        error_reply(StatusCode::NOT_FOUND, "Not found".to_owned())
    } else if let Some(InvalidBody(reason)) = err.find::<InvalidBody>() {
        warn!("Invalid request body: {}", reason);
        error_reply(
            StatusCode::BAD_REQUEST,
            format!("Invalid request body: {}", reason),
        )
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        error_reply(StatusCode::PAYLOAD_TOO_LARGE, "Payload too large".to_owned())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        error_reply(StatusCode::LENGTH_REQUIRED, "Length required".to_owned())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        error_reply(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Unsupported media type".to_owned(),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        error_reply(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_owned())
    } else {
        error!("Unhandled rejection: {:?}", err);
        error_reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_owned(),
        )
    };
    Ok(reply)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sensor::ObserverOptions;
    use irrigo_core::SensorSnapshot;
    use std::path::PathBuf;

    fn build_mocked_observer() -> Arc<ConcurrentObserver> {
        ConcurrentObserver::new(ObserverOptions {
            seed: Some(42),
            ..ObserverOptions::default()
        })
    }

    #[tokio::test]
    async fn test_unknown_route() {
        // Prepare
        let observer = build_mocked_observer();
        let routes = api_routes(&observer, "ping").recover(handle_rejection);

        // Execute
        let res = warp::test::request()
            .path("/api/unknown")
            .reply(&routes)
            .await;

        // Validate
        assert_eq!(res.status(), 404);
        let body: ErrorResponse = serde_json::from_slice(res.body()).unwrap();
        assert_eq!("Not found", body.error);
    }

    #[tokio::test]
    async fn test_malformed_body() {
        // Prepare
        let observer = build_mocked_observer();
        let routes = api_routes(&observer, "ping").recover(handle_rejection);

        // Execute
        let res = warp::test::request()
            .path("/api/irrigation/override")
            .method("POST")
            .header("content-type", "application/json")
            .body("{not json")
            .reply(&routes)
            .await;

        // Validate
        assert_eq!(res.status(), 400);
        let body: ErrorResponse = serde_json::from_slice(res.body()).unwrap();
        assert!(body.error.starts_with("Invalid request body"));
    }

    fn config_with_static_dir(dir: Option<&PathBuf>) -> Config {
        let dir = dir.map(|dir| dir.to_string_lossy().into_owned());
        Config::from_lookup(move |key| match key {
            "STATIC_DIR" => dir.clone(),
            _ => None,
        })
        .unwrap()
    }

    fn static_fixture(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("irrigo-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<h1>dashboard</h1>").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_server_api() {
        // Prepare
        let observer = build_mocked_observer();
        let routes = routes(&observer, &config_with_static_dir(None));

        // Execute
        let res = warp::test::request()
            .path("/api/sensors")
            .header("origin", "http://localhost:5173")
            .reply(&routes)
            .await;

        // Validate
        assert_eq!(res.status(), 200);
        assert!(res.headers().contains_key("access-control-allow-origin"));
        let snapshot: SensorSnapshot = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(5, snapshot.upcoming.len());
    }

    #[tokio::test]
    async fn test_server_cors_preflight() {
        // Prepare
        let observer = build_mocked_observer();
        let routes = routes(&observer, &config_with_static_dir(None));

        // Execute
        let res = warp::test::request()
            .method("OPTIONS")
            .path("/api/irrigation/override")
            .header("origin", "http://localhost:5173")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "content-type")
            .reply(&routes)
            .await;

        // Validate
        assert_eq!(res.status(), 200);
        assert!(res.headers().contains_key("access-control-allow-origin"));
        let methods = res.headers()["access-control-allow-methods"]
            .to_str()
            .unwrap()
            .to_owned();
        assert!(methods.contains("POST"));
    }

    #[tokio::test]
    async fn test_server_static_dir() {
        // Prepare
        let dir = static_fixture("static");
        let observer = build_mocked_observer();
        let routes = routes(&observer, &config_with_static_dir(Some(&dir)));

        // Execute
        let res = warp::test::request()
            .path("/index.html")
            .reply(&routes)
            .await;

        // Validate
        assert_eq!(res.status(), 200);
        assert_eq!(res.body(), "<h1>dashboard</h1>");
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_server_unknown_route_with_static_dir() {
        // Prepare
        let dir = static_fixture("unknown");
        let observer = build_mocked_observer();
        let routes = routes(&observer, &config_with_static_dir(Some(&dir)));

        // Execute
        let res = warp::test::request()
            .path("/api/unknown")
            .reply(&routes)
            .await;

        // Validate
        assert_eq!(res.status(), 404);
        let body: ErrorResponse = serde_json::from_slice(res.body()).unwrap();
        assert_eq!("Not found", body.error);
        std::fs::remove_dir_all(dir).unwrap();
    }
}
