//! # Request Logging
//!
//! One `info` entry when a request enters the app and one when its
//! response is ready, including the `message` header. Applied once with
//! `App::wrap` so handlers stay free of log calls.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::Error;
use tracing::info;

use crate::models::MESSAGE_HEADER;

/// Middleware function for `actix_web::middleware::from_fn`.
///
/// The operation is identified by the route's resource name (see
/// `routes::configure_routes`), falling back to the raw path for
/// unmatched requests.
pub async fn log_request(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();
    let operation = req
        .request()
        .match_name()
        .map(str::to_string)
        .unwrap_or_else(|| req.path().to_string());

    info!("Controller {} ({} {})", operation, method, req.path());

    let res = next.call(req).await?;

    let status = res.status().as_u16();
    match res.headers().get(MESSAGE_HEADER) {
        Some(message) => info!(
            "Controller {} responded {} [message: {}]",
            operation,
            status,
            String::from_utf8_lossy(message.as_bytes())
        ),
        None => info!("Controller {} responded {}", operation, status),
    }

    Ok(res)
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use actix_web::middleware::from_fn;
    use actix_web::{test as actix_test, web, App};

    use super::*;
    use crate::api::configure_routes;
    use crate::config::{AppConfig, StoreBackend};
    use crate::services::InMemorySchemeStore;
    use crate::AppState;

    /// `io::Write` sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap();
            String::from_utf8_lossy(&bytes)
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[actix_web::test]
    async fn test_logs_entry_and_response_with_message() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let state = AppState {
            store: Arc::new(InMemorySchemeStore::new()),
            config: AppConfig {
                store_backend: StoreBackend::Memory,
                database_url: None,
                database_pool_size: 1,
                server_host: "127.0.0.1".to_string(),
                server_port: 0,
            },
        };
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::new(state)))
                .wrap(from_fn(log_request))
                .configure(configure_routes),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/viewbytype/Pension")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let controller_lines: Vec<String> = logs
            .lines()
            .into_iter()
            .filter(|line| line.contains("Controller "))
            .collect();

        assert_eq!(controller_lines.len(), 2, "{:?}", controller_lines);
        assert!(controller_lines[0].contains("INFO"));
        assert!(controller_lines[0]
            .ends_with("Controller getSchemeByType (GET /viewbytype/Pension)"));
        assert!(controller_lines[1].ends_with(
            "Controller getSchemeByType responded 200 \
             [message: Schemes with type \"Pension\" retrieved from database.]"
        ));
    }

    #[actix_web::test]
    async fn test_unmatched_request_is_logged_by_path() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let app = actix_test::init_service(App::new().wrap(from_fn(log_request))).await;
        let req = actix_test::TestRequest::get().uri("/nowhere").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);

        let lines = logs.lines();
        assert!(lines
            .iter()
            .any(|line| line.ends_with("Controller /nowhere (GET /nowhere)")));
        assert!(lines
            .iter()
            .any(|line| line.ends_with("Controller /nowhere responded 404")));
    }
}
