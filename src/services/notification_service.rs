use crate::error::{Error, Result};
use crate::models::notification::Notification;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct NotificationService {
    pool: PgPool,
}

impl NotificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn notify(
        &self,
        recipient_id: Uuid,
        application_id: Option<Uuid>,
        job_id: Option<Uuid>,
        message: &str,
    ) -> Result<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (recipient_id, application_id, job_id, message)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(recipient_id)
        .bind(application_id)
        .bind(job_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    /// Notifications are side effects of a transition that already
    /// happened; a failed insert must not undo or fail the primary
    /// mutation, so it is logged and swallowed.
    pub async fn notify_best_effort(
        &self,
        recipient_id: Uuid,
        application_id: Option<Uuid>,
        job_id: Option<Uuid>,
        message: &str,
    ) {
        if let Err(e) = self
            .notify(recipient_id, application_id, job_id, message)
            .await
        {
            tracing::warn!(
                recipient = %recipient_id,
                error = ?e,
                "Failed to write notification"
            );
        }
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    pub async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<Notification> {
        let notification =
            sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| Error::NotFound("Notification not found".to_string()))?;

        if notification.recipient_id != user_id {
            return Err(Error::Forbidden(
                "Notification belongs to another user".to_string(),
            ));
        }

        let updated = sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE recipient_id = $1 AND NOT is_read",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
