use crate::dto::auth_dto::RegisterRequest;
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::utils::crypto::{hash_password, verify_password};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registers a new user. Email addresses are unique; new accounts carry
    /// the is_new flag until cleared by an administrative flow.
    pub async fn register(&self, req: RegisterRequest) -> Result<User> {
        if req.password != req.confirm_password {
            return Err(Error::BadRequest("Passwords do not match".to_string()));
        }

        let existing: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM users WHERE email = $1"#)
                .bind(&req.email)
                .fetch_one(&self.pool)
                .await?;
        if existing > 0 {
            return Err(Error::BadRequest(
                "An account with this email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&req.password)
            .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, email, phone, password_hash, profile_photo, is_new)
            VALUES ($1, $2, $3, $4, $5, $6, TRUE)
            RETURNING id, first_name, last_name, email, phone, password_hash,
                      profile_photo, is_new, created_at
            "#,
        )
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&password_hash)
        .bind(&req.profile_photo)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Registration failed for {}: {:?}", req.email, e);
            Error::from(e)
        })?;

        Ok(user)
    }

    /// Verifies credentials. Does not reveal whether the email or the
    /// password was wrong.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, first_name, last_name, email, phone, password_hash,
                      profile_photo, is_new, created_at
               FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let Some(user) = user else {
            return Err(Error::Unauthorized("Invalid email or password".to_string()));
        };

        let ok = verify_password(password, &user.password_hash)
            .map_err(|e| Error::Internal(format!("Password verification failed: {}", e)))?;
        if !ok {
            return Err(Error::Unauthorized("Invalid email or password".to_string()));
        }

        Ok(user)
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, first_name, last_name, email, phone, password_hash,
                      profile_photo, is_new, created_at
               FROM users WHERE id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("User {} not found", user_id)))?;

        Ok(user)
    }
}
