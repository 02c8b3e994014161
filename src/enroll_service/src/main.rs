use std::sync::Arc;

use color_eyre::eyre::Result;
use enroll_adapters::{
    clock::SystemClock,
    config::Settings,
    events::{InMemoryEventDispatcher, LoggingEventHandler},
    persistence::{HashMapUserRepository, PostgresUserRepository},
};
use enroll_application::{DispatchFailurePolicy, RegisterUserUseCase};
use enroll_core::{EventDispatcher, EventKind, UserRepository};
use enroll_service::{RegistrationService, configure_postgresql, telemetry::init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::load()?;

    let event_dispatcher = InMemoryEventDispatcher::new();
    event_dispatcher
        .register(EventKind::UserRegistered, Arc::new(LoggingEventHandler))
        .await;

    let listener = TcpListener::bind(&settings.server.address).await?;
    let policy = settings.registration.dispatch_failure_policy;

    match &settings.postgres {
        Some(postgres) => {
            let pool = configure_postgresql(postgres).await?;
            let user_repository = PostgresUserRepository::new(pool);
            user_repository.run_migrations().await?;

            serve(user_repository, event_dispatcher, policy, listener).await
        }
        None => {
            tracing::warn!("No PostgreSQL configured, users will only be kept in memory");

            serve(
                HashMapUserRepository::new(),
                event_dispatcher,
                policy,
                listener,
            )
            .await
        }
    }
}

async fn serve<R>(
    user_repository: R,
    event_dispatcher: InMemoryEventDispatcher,
    policy: DispatchFailurePolicy,
    listener: TcpListener,
) -> Result<()>
where
    R: UserRepository + 'static,
{
    let use_case = RegisterUserUseCase::new(user_repository, event_dispatcher, SystemClock)
        .with_dispatch_failure_policy(policy);

    RegistrationService::new(use_case)
        .run_standalone(listener)
        .await?;

    Ok(())
}
