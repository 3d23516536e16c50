use crate::cache::TtlCache;
use crate::comment_service::{CommentError, CommentService};
use crate::configuration::{Configuration, DatabaseConfigs};
use crate::repository::{CommentStore, PgCommentStore};
use crate::routes::{comment_routes, health_check};
use actix_web::dev::Server;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
    cache: Arc<TtlCache>,
}

impl Application {
    pub async fn build(config: Configuration) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&config.database);
        let store = Arc::new(PgCommentStore::new(connection_pool));
        Self::build_with_store(config, store)
    }

    /// Builds the server on top of any store, e.g. an in-memory one in tests.
    pub fn build_with_store(
        config: Configuration,
        store: Arc<dyn CommentStore>,
    ) -> Result<Self, anyhow::Error> {
        let cache = Arc::new(TtlCache::default());
        let service = CommentService::new(store, cache.clone(), config.cache.ttl());

        let address = format!("{}:{}", config.application.host, config.application.port);
        let listener = TcpListener::bind(address)
            .with_context(|| "Failed to bind TCP listener for application")?;
        let port = listener
            .local_addr()
            .with_context(|| "Failed to read local address of TCP listener")?
            .port();
        let server = run(listener, service, config.application.json_limit_bytes)
            .context("Failed to run Actix web server")?;

        Ok(Self {
            port,
            server,
            cache,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn cache(&self) -> Arc<TtlCache> {
        self.cache.clone()
    }

    pub async fn run_until_stopped(self) -> Result<(), anyhow::Error> {
        // run returns a Server type, which implements Future trait
        self.server.await.context("Server stopped with an error")
    }
}

pub fn get_connection_pool(config: &DatabaseConfigs) -> PgPool {
    PgPoolOptions::new().connect_lazy_with(config.connect_options())
}

fn run(
    tcp_listener: TcpListener,
    service: CommentService,
    json_limit_bytes: usize,
) -> Result<Server, anyhow::Error> {
    let service = web::Data::new(service);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(security_headers())
            .configure(configure_routes)
            .app_data(json_config(json_limit_bytes))
            // the service (and the cache inside it) is shared by every worker
            .app_data(service.clone())
    })
    .listen(tcp_listener)
    .with_context(|| "Failed to bind Actix server to TCP listener")?
    .run();

    Ok(server)
}

fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
        .add(("Referrer-Policy", "no-referrer"))
}

// Malformed or oversized bodies get the same envelope as any other
// rejected payload.
fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| CommentError::InvalidPayload(err.to_string()).into())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health_check", web::get().to(health_check))
        .service(web::scope("/api/v1").service(web::scope("/comment").configure(comment_routes)));
}
