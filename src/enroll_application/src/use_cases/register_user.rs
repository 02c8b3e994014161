use enroll_core::{
    Clock, DomainEvent, Email, EmailError, EventDispatchError, EventDispatcher, Name, NameError,
    Password, PasswordError, User, UserId, UserRegistered, UserRepository, UserRepositoryError,
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::dto::user_response::UserResponse;

/// What to do when the user was saved but the registration event could not
/// be delivered. The saved user is kept either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchFailurePolicy {
    /// Log the failure and report the registration as successful.
    #[default]
    LogAndContinue,
    /// Fail the registration with [`RegisterUserError::EventDispatch`].
    Propagate,
}

/// Error types for register user use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterUserError {
    #[error("{0}")]
    InvalidEmail(#[from] EmailError),
    #[error("{0}")]
    InvalidName(#[from] NameError),
    #[error("{0}")]
    WeakPassword(PasswordError),
    #[error("Email already in use: {0}")]
    EmailAlreadyRegistered(String),
    #[error("User repository error: {0}")]
    Persistence(UserRepositoryError),
    #[error("Event dispatch error: {0}")]
    EventDispatch(#[from] EventDispatchError),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<PasswordError> for RegisterUserError {
    fn from(error: PasswordError) -> Self {
        match error {
            PasswordError::HashingFailed(e) => RegisterUserError::Unexpected(e),
            e => RegisterUserError::WeakPassword(e),
        }
    }
}

/// Raw registration input, as received from a caller.
#[derive(Debug)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: Secret<String>,
    pub password: Secret<String>,
}

/// Register user use case - validates input, stores the user and announces it
pub struct RegisterUserUseCase<R, D, C>
where
    R: UserRepository,
    D: EventDispatcher,
    C: Clock,
{
    user_repository: R,
    event_dispatcher: D,
    clock: C,
    dispatch_failure_policy: DispatchFailurePolicy,
}

impl<R, D, C> RegisterUserUseCase<R, D, C>
where
    R: UserRepository,
    D: EventDispatcher,
    C: Clock,
{
    pub fn new(user_repository: R, event_dispatcher: D, clock: C) -> Self {
        Self {
            user_repository,
            event_dispatcher,
            clock,
            dispatch_failure_policy: DispatchFailurePolicy::default(),
        }
    }

    pub fn with_dispatch_failure_policy(mut self, policy: DispatchFailurePolicy) -> Self {
        self.dispatch_failure_policy = policy;
        self
    }

    /// Execute the register user use case
    ///
    /// Inputs are checked in a fixed order: email format, then whether the
    /// email is taken, then name, then password. The first failure is
    /// returned, so a taken email is reported even if the name or password
    /// is also invalid.
    ///
    /// # Returns
    /// The view of the new user, or RegisterUserError
    #[tracing::instrument(name = "RegisterUserUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        request: RegisterUserRequest,
    ) -> Result<UserResponse, RegisterUserError> {
        let RegisterUserRequest {
            name,
            email,
            password,
        } = request;

        let email = Email::try_from(email)?;

        let existing = self
            .user_repository
            .find_by_email(&email)
            .await
            .map_err(RegisterUserError::Persistence)?;
        if existing.is_some() {
            return Err(already_registered(&email));
        }

        let name = Name::parse(&name)?;
        let password = hash_password(password).await?;

        let user = User::create(UserId::generate(), name, email, password, self.clock.now());
        let user_id = *user.id();
        let response = UserResponse::from(&user);

        // The repository enforces uniqueness, so a concurrent registration that
        // slipped past the check above surfaces here.
        self.user_repository
            .save(user.clone())
            .await
            .map_err(|e| match e {
                UserRepositoryError::EmailAlreadyExists => already_registered(user.email()),
                e => RegisterUserError::Persistence(e),
            })?;

        tracing::info!(user_id = %user_id, "User registered");

        let event = DomainEvent::from(UserRegistered {
            user,
            occurred_on: self.clock.now(),
        });

        if let Err(e) = self.event_dispatcher.dispatch(event).await {
            match self.dispatch_failure_policy {
                DispatchFailurePolicy::Propagate => return Err(e.into()),
                DispatchFailurePolicy::LogAndContinue => {
                    tracing::error!(
                        user_id = %user_id,
                        error = %e,
                        "Failed to dispatch UserRegistered event"
                    );
                }
            }
        }

        Ok(response)
    }
}

fn already_registered(email: &Email) -> RegisterUserError {
    RegisterUserError::EmailAlreadyRegistered(email.as_ref().expose_secret().clone())
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
async fn hash_password(password: Secret<String>) -> Result<Password, RegisterUserError> {
    let current_span = tracing::Span::current();

    tokio::task::spawn_blocking(move || current_span.in_scope(|| Password::from_plain(password)))
        .await
        .map_err(|e| RegisterUserError::Unexpected(e.to_string()))?
        .map_err(RegisterUserError::from)
}
