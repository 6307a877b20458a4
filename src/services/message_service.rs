use crate::error::{Error, Result};
use crate::models::message::{Message, ThreadParties};
use crate::services::notification_service::NotificationService;
use sqlx::PgPool;
use uuid::Uuid;

/// The other party on a thread, or None when the sender is neither the
/// candidate nor the recruiter.
fn resolve_recipient(sender_id: Uuid, parties: &ThreadParties) -> Option<Uuid> {
    if sender_id == parties.candidate_id {
        Some(parties.recruiter_id)
    } else if sender_id == parties.recruiter_id {
        Some(parties.candidate_id)
    } else {
        None
    }
}

#[derive(Clone)]
pub struct MessageService {
    pool: PgPool,
    notifications: NotificationService,
}

impl MessageService {
    pub fn new(pool: PgPool, notifications: NotificationService) -> Self {
        Self {
            pool,
            notifications,
        }
    }

    pub async fn send(
        &self,
        application_id: Uuid,
        sender_id: Uuid,
        content: &str,
    ) -> Result<Message> {
        let parties = self.thread_parties(application_id).await?;
        let recipient_id = resolve_recipient(sender_id, &parties).ok_or_else(|| {
            Error::Forbidden("You are not a participant in this conversation".to_string())
        })?;

        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (application_id, sender_id, recipient_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(application_id)
        .bind(sender_id)
        .bind(recipient_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        self.notifications
            .notify_best_effort(
                recipient_id,
                Some(parties.application_id),
                Some(parties.job_id),
                &format!(
                    "New message about \"{}\" at {}.",
                    parties.job_title, parties.job_company
                ),
            )
            .await;

        Ok(message)
    }

    /// Returns the thread oldest-first and, as a side effect of viewing
    /// it, marks every message addressed to the requester as read.
    pub async fn list(&self, application_id: Uuid, requester_id: Uuid) -> Result<Vec<Message>> {
        let parties = self.thread_parties(application_id).await?;
        if resolve_recipient(requester_id, &parties).is_none() {
            return Err(Error::Forbidden(
                "You are not a participant in this conversation".to_string(),
            ));
        }

        sqlx::query(
            r#"
            UPDATE messages
            SET is_read = TRUE
            WHERE application_id = $1 AND recipient_id = $2 AND NOT is_read
            "#,
        )
        .bind(application_id)
        .bind(requester_id)
        .execute(&self.pool)
        .await?;

        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT * FROM messages
            WHERE application_id = $1
            ORDER BY sent_at ASC
            "#,
        )
        .bind(application_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn thread_parties(&self, application_id: Uuid) -> Result<ThreadParties> {
        let parties = sqlx::query_as::<_, ThreadParties>(
            r#"
            SELECT
                a.id AS application_id,
                a.candidate_id,
                j.recruiter_id,
                j.id AS job_id,
                j.title AS job_title,
                j.company AS job_company
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE a.id = $1
            "#,
        )
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

        Ok(parties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parties(candidate: Uuid, recruiter: Uuid) -> ThreadParties {
        ThreadParties {
            application_id: Uuid::new_v4(),
            candidate_id: candidate,
            recruiter_id: recruiter,
            job_id: Uuid::new_v4(),
            job_title: "Backend Engineer".to_string(),
            job_company: "Acme".to_string(),
        }
    }

    #[test]
    fn recipient_is_the_other_party() {
        let candidate = Uuid::new_v4();
        let recruiter = Uuid::new_v4();
        let parties = parties(candidate, recruiter);

        assert_eq!(resolve_recipient(candidate, &parties), Some(recruiter));
        assert_eq!(resolve_recipient(recruiter, &parties), Some(candidate));
    }

    #[test]
    fn third_users_are_not_participants() {
        let parties = parties(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(resolve_recipient(Uuid::new_v4(), &parties), None);
    }
}
