use crate::dto::auth_dto::RegisterPayload;
use crate::dto::user_dto::UpdateProfilePayload;
use crate::error::{Error, Result};
use crate::models::user::{Role, User};
use crate::utils::crypto;
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

    pub async fn register(&self, payload: RegisterPayload) -> Result<User> {
        let exists = sqlx::query("SELECT id FROM users WHERE email = $1")
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_some() {
            return Err(Error::BadRequest("User already exists".to_string()));
        }

        let password_hash = crypto::hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&password_hash)
        .bind(&payload.role)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::BadRequest("Invalid credentials".to_string()))?;

        if user.is_banned {
            return Err(Error::Forbidden("Access denied: You are banned".to_string()));
        }

        let ok = crypto::verify_password(password, &user.password_hash)
            .map_err(|e| Error::Internal(format!("Failed to verify password: {}", e)))?;
        if !ok {
            return Err(Error::BadRequest("Invalid credentials".to_string()));
        }

        Ok(user)
    }

    pub async fn get(&self, id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
        Ok(user)
    }

    /// Merge-update: absent fields keep their stored value. `company` is
    /// writable only by recruiters and `position` only by candidates.
    pub async fn update_profile(&self, id: Uuid, mut payload: UpdateProfilePayload) -> Result<User> {
        let current = self.get(id).await?;
        match Role::parse(&current.role) {
            Some(Role::Recruiter) => payload.position = None,
            Some(Role::Candidate) => payload.company = None,
            _ => {
                payload.company = None;
                payload.position = None;
            }
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                location = COALESCE($4, location),
                about = COALESCE($5, about),
                website = COALESCE($6, website),
                company = COALESCE($7, company),
                position = COALESCE($8, position),
                avatar = COALESCE($9, avatar),
                skills = COALESCE($10, skills),
                experiences = COALESCE($11, experiences),
                education = COALESCE($12, education),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.name)
        .bind(payload.phone)
        .bind(payload.location)
        .bind(payload.about)
        .bind(payload.website)
        .bind(payload.company)
        .bind(payload.position)
        .bind(payload.avatar)
        .bind(payload.skills)
        .bind(payload.experiences)
        .bind(payload.education)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn ban(&self, id: Uuid) -> Result<User> {
        let user = self.get(id).await?;
        if user.role == Role::Admin.as_str() {
            return Err(Error::Forbidden("Cannot ban another admin".to_string()));
        }

        let banned = sqlx::query_as::<_, User>(
            "UPDATE users SET is_banned = TRUE, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(banned)
    }

    pub async fn unban(&self, id: Uuid) -> Result<User> {
        // No admin guard on the way back: unbanning is always safe.
        self.get(id).await?;
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET is_banned = FALSE, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}
