use chrono::{DateTime, Utc};
use enroll_core::{Email, Name, Password, User, UserId, UserRepository, UserRepositoryError};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, migrate::MigrateError};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        PostgresUserRepository { pool }
    }

    /// Apply the embedded schema migrations.
    pub async fn run_migrations(&self) -> Result<(), MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserRepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let name = Name::parse(&row.name)
            .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))?;
        let email = Email::parse(&row.email)
            .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))?;

        Ok(User::create(
            UserId::from(row.id),
            name,
            email,
            Password::from_hash(Secret::from(row.password_hash)),
            row.created_at,
        ))
    }
}

#[async_trait::async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(name = "Saving user to PostgreSQL", skip_all)]
    async fn save(&self, user: User) -> Result<(), UserRepositoryError> {
        let query = sqlx::query(
            r#"
                INSERT INTO users (id, name, email, password_hash, created_at)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (id) DO UPDATE
                SET name = EXCLUDED.name,
                    email = EXCLUDED.email,
                    password_hash = EXCLUDED.password_hash
            "#,
        )
        .bind(*user.id().as_uuid())
        .bind(user.name().to_string())
        .bind(user.email().as_ref().expose_secret())
        .bind(user.password().as_ref().expose_secret())
        .bind(user.created_at());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserRepositoryError::EmailAlreadyExists;
                }
            }
            UserRepositoryError::UnexpectedError(e.to_string())
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, name, email, password_hash, created_at
                FROM users
                WHERE id = $1
            "#,
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, name, email, password_hash, created_at
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(name = "Deleting user from PostgreSQL", skip_all)]
    async fn delete(&self, id: &UserId) -> Result<(), UserRepositoryError> {
        sqlx::query(
            r#"
                DELETE FROM users
                WHERE id = $1
            "#,
        )
        .bind(*id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))?;

        Ok(())
    }
}
