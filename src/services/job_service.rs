use crate::dto::job_dto::{CreateJobPayload, JobListQuery};
use crate::error::{Error, Result};
use crate::models::job::{is_valid_contract, Job, JobWithRecruiter};
use crate::services::notification_service::NotificationService;
use sqlx::PgPool;
use uuid::Uuid;

const JOB_WITH_RECRUITER_COLUMNS: &str = r#"
    j.id, j.title, j.company, j.location, j.description, j.contract,
    j.requirements, j.salary, j.recruiter_id, j.is_approved,
    j.created_at, j.updated_at,
    u.name AS recruiter_name, u.email AS recruiter_email
"#;

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
    notifications: NotificationService,
}

impl JobService {
    pub fn new(pool: PgPool, notifications: NotificationService) -> Self {
        Self {
            pool,
            notifications,
        }
    }

    pub async fn create(&self, recruiter_id: Uuid, payload: CreateJobPayload) -> Result<Job> {
        if !is_valid_contract(&payload.contract) {
            return Err(Error::BadRequest("Invalid contract type".to_string()));
        }

        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (title, company, location, description, contract, requirements, salary, recruiter_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.company)
        .bind(&payload.location)
        .bind(&payload.description)
        .bind(&payload.contract)
        .bind(&payload.requirements)
        .bind(payload.salary)
        .bind(recruiter_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(job)
    }

    /// The public board: approved postings only, with optional
    /// case-insensitive title/location substring filters and an exact
    /// contract filter.
    pub async fn list_public(&self, query: JobListQuery) -> Result<Vec<JobWithRecruiter>> {
        let mut filters = vec!["j.is_approved = TRUE".to_string()];
        let mut args: Vec<String> = Vec::new();

        if let Some(title) = query.title {
            filters.push(format!("j.title ILIKE ${}", args.len() + 1));
            args.push(format!("%{}%", title));
        }
        if let Some(location) = query.location {
            filters.push(format!("j.location ILIKE ${}", args.len() + 1));
            args.push(format!("%{}%", location));
        }
        if let Some(contract) = query.contract {
            if !is_valid_contract(&contract) {
                return Err(Error::BadRequest("Invalid contract type".to_string()));
            }
            filters.push(format!("j.contract = ${}", args.len() + 1));
            args.push(contract);
        }

        let sql = format!(
            "SELECT {} FROM jobs j JOIN users u ON u.id = j.recruiter_id
             WHERE {}
             ORDER BY j.created_at DESC",
            JOB_WITH_RECRUITER_COLUMNS,
            filters.join(" AND ")
        );

        let mut statement = sqlx::query_as::<_, JobWithRecruiter>(&sql);
        for value in &args {
            statement = statement.bind(value);
        }
        let jobs = statement.fetch_all(&self.pool).await?;

        Ok(jobs)
    }

    /// Missing and not-yet-approved collapse into the same NotFound so
    /// an unapproved posting is indistinguishable from an absent one.
    pub async fn get_public(&self, id: Uuid) -> Result<JobWithRecruiter> {
        let sql = format!(
            "SELECT {} FROM jobs j JOIN users u ON u.id = j.recruiter_id
             WHERE j.id = $1 AND j.is_approved = TRUE",
            JOB_WITH_RECRUITER_COLUMNS
        );
        let job = sqlx::query_as::<_, JobWithRecruiter>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        Ok(job)
    }

    /// Moderation listing: every posting, approved or not.
    pub async fn list_all(&self) -> Result<Vec<JobWithRecruiter>> {
        let sql = format!(
            "SELECT {} FROM jobs j JOIN users u ON u.id = j.recruiter_id
             ORDER BY j.created_at DESC",
            JOB_WITH_RECRUITER_COLUMNS
        );
        let jobs = sqlx::query_as::<_, JobWithRecruiter>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    pub async fn list_for_recruiter(&self, recruiter_id: Uuid) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE recruiter_id = $1 ORDER BY created_at DESC",
        )
        .bind(recruiter_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    pub async fn approve(&self, id: Uuid) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(
            "UPDATE jobs SET is_approved = TRUE, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

        self.notifications
            .notify_best_effort(
                job.recruiter_id,
                None,
                Some(job.id),
                &format!(
                    "Your job posting \"{}\" at {} has been approved.",
                    job.title, job.company
                ),
            )
            .await;

        Ok(job)
    }

    /// Rejection is destructive: the posting is deleted outright, there
    /// is no persisted rejected state.
    pub async fn reject(&self, id: Uuid) -> Result<()> {
        let job = self.delete_job_row(id).await?;

        self.notifications
            .notify_best_effort(
                job.recruiter_id,
                None,
                None,
                &format!(
                    "Your job posting \"{}\" at {} was rejected and removed.",
                    job.title, job.company
                ),
            )
            .await;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let job = self.delete_job_row(id).await?;

        self.notifications
            .notify_best_effort(
                job.recruiter_id,
                None,
                None,
                &format!(
                    "Your job posting \"{}\" at {} was removed by an administrator.",
                    job.title, job.company
                ),
            )
            .await;

        Ok(())
    }

    async fn delete_job_row(&self, id: Uuid) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

        sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(job)
    }
}
