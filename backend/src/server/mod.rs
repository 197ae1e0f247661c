//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_session::{
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
    SessionMiddleware,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};

use crate::inbound::http::auth::{
    forgot_password, login, logout, register_admin, register_alumni, register_student,
};
use crate::inbound::http::feed::{add_comment, create_post, dashboard, like_post};
use crate::inbound::http::jobs::create_job;
use crate::inbound::http::profile::{add_experience, update_profile};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::ws;
use crate::inbound::ws::ChatHub;
use crate::middleware::Trace;
#[cfg(debug_assertions)]
use crate::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;
use crate::outbound::memory::{
    MemoryAccountRepository, MemoryJobRepository, MemoryNotificationRepository,
    MemoryPostRepository,
};
use crate::outbound::persistence::{
    DieselAccountRepository, DieselJobRepository, DieselNotificationRepository,
    DieselPostRepository,
};

use std::sync::Arc;

/// Build the HTTP state over PostgreSQL-backed repositories when a pool is
/// configured, otherwise over the in-memory adapters.
fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => HttpStatePorts {
            accounts: Arc::new(DieselAccountRepository::new(pool.clone())),
            posts: Arc::new(DieselPostRepository::new(pool.clone())),
            jobs: Arc::new(DieselJobRepository::new(pool.clone())),
            notifications: Arc::new(DieselNotificationRepository::new(pool.clone())),
        },
        None => HttpStatePorts {
            accounts: Arc::new(MemoryAccountRepository::default()),
            posts: Arc::new(MemoryPostRepository::default()),
            jobs: Arc::new(MemoryJobRepository::default()),
            notifications: Arc::new(MemoryNotificationRepository::default()),
        },
    };
    web::Data::new(HttpState::new(ports))
}

#[derive(Clone)]
struct AppDependencies {
    http_state: web::Data<HttpState>,
    chat_hub: web::Data<Arc<ChatHub>>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
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
        http_state,
        chat_hub,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let app = App::new()
        .app_data(http_state)
        .app_data(chat_hub)
        .wrap(Trace)
        .wrap(session)
        .service(login)
        .service(logout)
        .service(register_admin)
        .service(register_student)
        .service(register_alumni)
        .service(forgot_password)
        .service(dashboard)
        .service(create_post)
        .service(like_post)
        .service(add_comment)
        .service(create_job)
        .service(update_profile)
        .service(add_experience)
        .service(ws::ws_entry);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let chat_hub = web::Data::new(Arc::new(ChatHub::new()));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            http_state: http_state.clone(),
            chat_hub: chat_hub.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
