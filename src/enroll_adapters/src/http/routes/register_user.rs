use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use enroll_application::{RegisterUserRequest, RegisterUserUseCase};
use enroll_core::{Clock, EventDispatcher, UserRepository};
use secrecy::Secret;
use serde::Deserialize;

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RegisterUserBody {
    pub name: String,
    pub email: Secret<String>,
    pub password: Secret<String>,
}

impl From<RegisterUserBody> for RegisterUserRequest {
    fn from(body: RegisterUserBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            password: body.password,
        }
    }
}

#[tracing::instrument(name = "Register user", skip_all)]
pub async fn register_user<R, D, C>(
    State(use_case): State<Arc<RegisterUserUseCase<R, D, C>>>,
    Json(body): Json<RegisterUserBody>,
) -> Result<impl IntoResponse, ApiError>
where
    R: UserRepository + 'static,
    D: EventDispatcher + 'static,
    C: Clock + 'static,
{
    let user = use_case.execute(body.into()).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::FixedClock, events::InMemoryEventDispatcher, persistence::HashMapUserRepository,
    };
    use axum::response::Response;
    use chrono::{TimeZone, Utc};

    type TestUseCase =
        RegisterUserUseCase<HashMapUserRepository, InMemoryEventDispatcher, FixedClock>;

    fn use_case() -> Arc<TestUseCase> {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap());
        Arc::new(RegisterUserUseCase::new(
            HashMapUserRepository::new(),
            InMemoryEventDispatcher::new(),
            clock,
        ))
    }

    fn body(name: &str, email: &str, password: &str) -> RegisterUserBody {
        RegisterUserBody {
            name: name.to_string(),
            email: Secret::from(email.to_string()),
            password: Secret::from(password.to_string()),
        }
    }

    async fn call(use_case: &Arc<TestUseCase>, body: RegisterUserBody) -> Response {
        match register_user(State(Arc::clone(use_case)), Json(body)).await {
            Ok(response) => response.into_response(),
            Err(error) => error.into_response(),
        }
    }

    #[tokio::test]
    async fn test_register_returns_created() {
        let use_case = use_case();

        let response = call(
            &use_case,
            body("John Doe", "john@example.com", "StrongP@ss123"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_register_twice_returns_conflict() {
        let use_case = use_case();
        call(
            &use_case,
            body("John Doe", "john@example.com", "StrongP@ss123"),
        )
        .await;

        let response = call(
            &use_case,
            body("John Again", "john@example.com", "StrongP@ss123"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_register_invalid_input_returns_bad_request() {
        let use_case = use_case();

        let response = call(&use_case, body("John Doe", "john@example.com", "short")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
