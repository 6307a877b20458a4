use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const CONTRACT_TYPES: [&str; 3] = ["full-time", "part-time", "contract"];

pub fn is_valid_contract(value: &str) -> bool {
    CONTRACT_TYPES.contains(&value)
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub contract: String,
    pub requirements: Option<String>,
    pub salary: Option<Decimal>,
    pub recruiter_id: Uuid,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Job row joined with its owning recruiter, for listings that show who
/// posted it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobWithRecruiter {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub contract: String,
    pub requirements: Option<String>,
    pub salary: Option<Decimal>,
    pub recruiter_id: Uuid,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub recruiter_name: String,
    pub recruiter_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_vocabulary_is_closed() {
        assert!(is_valid_contract("full-time"));
        assert!(is_valid_contract("part-time"));
        assert!(is_valid_contract("contract"));
        assert!(!is_valid_contract("freelance"));
        assert!(!is_valid_contract("Full-Time"));
        assert!(!is_valid_contract(""));
    }
}
