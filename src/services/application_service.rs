use crate::error::{Error, Result};
use crate::models::application::{
    Application, ApplicationWithCandidate, ApplicationWithJob, STATUS_ACCEPTED, STATUS_PENDING,
    STATUS_REJECTED,
};
use crate::models::job::Job;
use crate::services::notification_service::NotificationService;
use sqlx::PgPool;
use uuid::Uuid;

/// The fields a candidate submits with an application, after the upload
/// and contact checks have passed.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub cv_path: String,
    pub motivation_letter_path: String,
    pub contact: String,
    pub note: Option<String>,
}

/// Accept and reject only apply to a pending application; a decided one
/// stays decided.
fn ensure_pending(status: &str, action: &str) -> Result<()> {
    if status == STATUS_PENDING {
        Ok(())
    } else {
        Err(Error::InvalidState(format!(
            "Only pending applications can be {}",
            action
        )))
    }
}

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
    notifications: NotificationService,
}

impl ApplicationService {
    pub fn new(pool: PgPool, notifications: NotificationService) -> Self {
        Self {
            pool,
            notifications,
        }
    }

    pub async fn apply(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
        fields: NewApplication,
    ) -> Result<Application> {
        // Candidates only ever see approved postings, so an unapproved
        // job is treated as absent here too.
        let job = sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE id = $1 AND is_approved = TRUE",
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

        let existing = sqlx::query("SELECT id FROM applications WHERE job_id = $1 AND candidate_id = $2")
            .bind(job_id)
            .bind(candidate_id)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(Error::Conflict(
                "You have already applied to this job".to_string(),
            ));
        }

        // The UNIQUE (job_id, candidate_id) constraint backs the check
        // above; a racing duplicate surfaces as a unique violation,
        // which the error layer also maps to Conflict.
        let application = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (job_id, candidate_id, cv_path, motivation_letter_path, contact, note)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(job_id)
        .bind(candidate_id)
        .bind(&fields.cv_path)
        .bind(&fields.motivation_letter_path)
        .bind(&fields.contact)
        .bind(&fields.note)
        .fetch_one(&self.pool)
        .await?;

        let candidate_name = self.user_name(candidate_id).await;

        self.notifications
            .notify_best_effort(
                candidate_id,
                Some(application.id),
                Some(job.id),
                &format!(
                    "Your application for \"{}\" at {} has been submitted.",
                    job.title, job.company
                ),
            )
            .await;
        self.notifications
            .notify_best_effort(
                job.recruiter_id,
                Some(application.id),
                Some(job.id),
                &format!(
                    "New application from {} for \"{}\".",
                    candidate_name, job.title
                ),
            )
            .await;

        Ok(application)
    }

    pub async fn accept(&self, id: Uuid, actor_id: Uuid) -> Result<Application> {
        self.decide(id, actor_id, STATUS_ACCEPTED).await
    }

    pub async fn reject(&self, id: Uuid, actor_id: Uuid) -> Result<Application> {
        self.decide(id, actor_id, STATUS_REJECTED).await
    }

    async fn decide(&self, id: Uuid, actor_id: Uuid, new_status: &str) -> Result<Application> {
        let (application, job) = self.load_with_job(id).await?;

        if job.recruiter_id != actor_id {
            return Err(Error::Forbidden(
                "You do not own this job posting".to_string(),
            ));
        }
        ensure_pending(&application.status, "decided")?;

        let updated = sqlx::query_as::<_, Application>(
            "UPDATE applications SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(new_status)
        .fetch_one(&self.pool)
        .await?;

        self.notifications
            .notify_best_effort(
                application.candidate_id,
                Some(application.id),
                Some(job.id),
                &format!(
                    "Your application for \"{}\" at {} has been {}.",
                    job.title, job.company, new_status
                ),
            )
            .await;

        Ok(updated)
    }

    pub async fn withdraw(&self, id: Uuid, actor_id: Uuid) -> Result<()> {
        let (application, job) = self.load_with_job(id).await?;

        if application.candidate_id != actor_id {
            return Err(Error::Forbidden(
                "You do not own this application".to_string(),
            ));
        }
        ensure_pending(&application.status, "withdrawn")?;

        sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let candidate_name = self.user_name(actor_id).await;
        // The application row is gone, so the notification only keeps
        // the job reference.
        self.notifications
            .notify_best_effort(
                job.recruiter_id,
                None,
                Some(job.id),
                &format!(
                    "{} withdrew their application for \"{}\".",
                    candidate_name, job.title
                ),
            )
            .await;

        Ok(())
    }

    pub async fn list_for_candidate(&self, candidate_id: Uuid) -> Result<Vec<ApplicationWithJob>> {
        let applications = sqlx::query_as::<_, ApplicationWithJob>(
            r#"
            SELECT
                a.id, a.job_id, a.candidate_id, a.cv_path, a.motivation_letter_path,
                a.contact, a.note, a.status, a.applied_at,
                j.title AS job_title, j.company AS job_company,
                j.location AS job_location, j.contract AS job_contract,
                u.name AS recruiter_name, u.email AS recruiter_email
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            JOIN users u ON u.id = j.recruiter_id
            WHERE a.candidate_id = $1
            ORDER BY a.applied_at DESC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(applications)
    }

    /// Every application under every posting the recruiter owns.
    pub async fn list_for_recruiter(
        &self,
        recruiter_id: Uuid,
    ) -> Result<Vec<ApplicationWithCandidate>> {
        let applications = sqlx::query_as::<_, ApplicationWithCandidate>(
            r#"
            SELECT
                a.id, a.job_id, a.candidate_id, a.cv_path, a.motivation_letter_path,
                a.contact, a.note, a.status, a.applied_at,
                u.name AS candidate_name, u.email AS candidate_email
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            JOIN users u ON u.id = a.candidate_id
            WHERE j.recruiter_id = $1
            ORDER BY a.applied_at DESC
            "#,
        )
        .bind(recruiter_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(applications)
    }

    async fn load_with_job(&self, id: Uuid) -> Result<(Application, Job)> {
        let application = sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(application.job_id)
            .fetch_one(&self.pool)
            .await?;

        Ok((application, job))
    }

    async fn user_name(&self, id: Uuid) -> String {
        sqlx::query_scalar::<_, String>("SELECT name FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| "A candidate".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_the_only_transitionable_state() {
        assert!(ensure_pending(STATUS_PENDING, "decided").is_ok());
        assert!(matches!(
            ensure_pending(STATUS_ACCEPTED, "decided"),
            Err(Error::InvalidState(_))
        ));
        assert!(matches!(
            ensure_pending(STATUS_REJECTED, "withdrawn"),
            Err(Error::InvalidState(_))
        ));
    }
}
