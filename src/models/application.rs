use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ACCEPTED: &str = "accepted";
pub const STATUS_REJECTED: &str = "rejected";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub cv_path: String,
    pub motivation_letter_path: String,
    pub contact: String,
    pub note: Option<String>,
    pub status: String,
    pub applied_at: DateTime<Utc>,
}

/// Application joined with candidate identity, for a recruiter reviewing
/// the applicants of their postings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicationWithCandidate {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub cv_path: String,
    pub motivation_letter_path: String,
    pub contact: String,
    pub note: Option<String>,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub candidate_name: String,
    pub candidate_email: String,
}

/// Application joined with its job and the job's recruiter, for a
/// candidate reviewing everything they applied to.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicationWithJob {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub cv_path: String,
    pub motivation_letter_path: String,
    pub contact: String,
    pub note: Option<String>,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub job_title: String,
    pub job_company: String,
    pub job_location: String,
    pub job_contract: String,
    pub recruiter_name: String,
    pub recruiter_email: String,
}
