//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::warn;

#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{FixtureIdentityStore, FixtureUserDirectory};
use crate::domain::{AccountDeletionService, AccountDeletionServiceImpl};
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::greeter::hello;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::delete_user;
use crate::middleware::RequestId;
use crate::outbound::{HttpIdentityStore, HttpUserDirectory};

/// Build the deletion use case from configuration.
///
/// Uses the reqwest-backed adapters when both backend base URLs are
/// configured, otherwise falls back to the in-memory fixtures so the server
/// runs without external services during development and tests.
///
/// # Errors
/// Returns [`std::io::Error`] when only one backend URL is configured or the
/// HTTP clients cannot be constructed.
fn build_deletion_service(
    config: &ServerConfig,
) -> std::io::Result<Arc<dyn AccountDeletionService>> {
    let confirmation = config.confirmation_message.clone();
    let service: Arc<dyn AccountDeletionService> = match (
        &config.directory_base_url,
        &config.identity_base_url,
    ) {
        (Some(directory), Some(identity)) => {
            let directory = HttpUserDirectory::new(directory.clone())
                .map_err(|e| std::io::Error::other(format!("directory client failed: {e}")))?;
            let identity = HttpIdentityStore::new(identity.clone())
                .map_err(|e| std::io::Error::other(format!("identity client failed: {e}")))?;
            let service = AccountDeletionServiceImpl::new(Arc::new(directory), Arc::new(identity));
            Arc::new(apply_confirmation(service, confirmation))
        }
        (None, None) => {
            warn!("no backend base URLs configured; using in-memory fixture adapters");
            let service = AccountDeletionServiceImpl::new(
                Arc::new(FixtureUserDirectory),
                Arc::new(FixtureIdentityStore),
            );
            Arc::new(apply_confirmation(service, confirmation))
        }
        _ => {
            return Err(std::io::Error::other(
                "DIRECTORY_BASE_URL and IDENTITY_BASE_URL must be configured together",
            ));
        }
    };
    Ok(service)
}

fn apply_confirmation<D, I>(
    service: AccountDeletionServiceImpl<D, I>,
    confirmation: Option<String>,
) -> AccountDeletionServiceImpl<D, I>
where
    D: crate::domain::ports::UserDirectory,
    I: crate::domain::ports::IdentityStore,
{
    match confirmation {
        Some(message) => service.with_confirmation(message),
        None => service,
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api/v1").service(delete_user);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(RequestId)
        .service(api)
        .service(hello)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when adapter construction or socket binding
/// fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let deletion = build_deletion_service(&config)?;
    let http_state = web::Data::new(HttpState::new(deletion));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
