use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use enroll_adapters::{
    clock::FixedClock, config::test, events::InMemoryEventDispatcher,
    persistence::HashMapUserRepository,
};
use enroll_application::{DispatchFailurePolicy, RegisterUserUseCase};
use enroll_core::{DomainEvent, EventDispatcher, EventHandler, EventHandlerError, EventKind};
use enroll_service::RegistrationService;
use serde::Serialize;

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
}

pub fn registration_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
}

struct FailingHandler;

#[async_trait::async_trait]
impl EventHandler for FailingHandler {
    async fn handle(&self, _event: &DomainEvent) -> Result<(), EventHandlerError> {
        Err(EventHandlerError("mail server unreachable".to_string()))
    }
}

impl TestApp {
    pub async fn new() -> Self {
        Self::spawn(InMemoryEventDispatcher::new(), DispatchFailurePolicy::default()).await
    }

    /// An app whose only event handler always fails.
    pub async fn with_failing_handler(policy: DispatchFailurePolicy) -> Self {
        let event_dispatcher = InMemoryEventDispatcher::new();
        event_dispatcher
            .register(EventKind::UserRegistered, Arc::new(FailingHandler))
            .await;

        Self::spawn(event_dispatcher, policy).await
    }

    async fn spawn(
        event_dispatcher: InMemoryEventDispatcher,
        policy: DispatchFailurePolicy,
    ) -> Self {
        let use_case = RegisterUserUseCase::new(
            HashMapUserRepository::new(),
            event_dispatcher,
            FixedClock::new(registration_time()),
        )
        .with_dispatch_failure_policy(policy);

        let listener = tokio::net::TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let service = RegistrationService::new(use_case);
        tokio::spawn(async move {
            service.run_standalone(listener).await.unwrap();
        });

        Self {
            address,
            http_client: reqwest::Client::new(),
        }
    }

    pub async fn post_register<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: Serialize,
    {
        self.http_client
            .post(format!("{}/users", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}
