use std::sync::Arc;

use axum::{Router, routing::post};
use enroll_adapters::{config::PostgresSettings, http::routes::register_user};
use enroll_application::RegisterUserUseCase;
use enroll_core::{Clock, EventDispatcher, UserRepository};
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::telemetry::{make_span_with_request_id, on_request, on_response};

/// HTTP front for the registration use case
pub struct RegistrationService {
    router: Router,
}

impl RegistrationService {
    /// Create a new RegistrationService around a configured use case
    ///
    /// # Arguments
    /// * `use_case` - The register user use case, with its repository,
    ///   event dispatcher and clock already wired in
    pub fn new<R, D, C>(use_case: RegisterUserUseCase<R, D, C>) -> Self
    where
        R: UserRepository + 'static,
        D: EventDispatcher + 'static,
        C: Clock + 'static,
    {
        let router = Router::new()
            .route("/users", post(register_user::<R, D, C>))
            .with_state(Arc::new(use_case));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the service into a router that can be nested into another
    /// application
    pub fn into_router(self) -> Router {
        self.with_trace_layer().router
    }

    /// Run the registration service as a standalone server
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let router = self.into_router();

        tracing::info!("Registration service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}

/// Create a PostgreSQL connection pool from settings
pub async fn configure_postgresql(settings: &PostgresSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(settings.url.expose_secret())
        .await
}
