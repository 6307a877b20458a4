use serde::Deserialize;
use validator::Validate;

/// Profile merge-update: absent fields keep their stored value.
/// `company` only applies to recruiters and `position` only to
/// candidates; the service drops the other one based on the caller's
/// role.
#[derive(Debug, Clone, Deserialize, Validate, Default)]
#[serde(default)]
pub struct UpdateProfilePayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
    pub website: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub avatar: Option<String>,
    pub skills: Option<String>,
    pub experiences: Option<String>,
    pub education: Option<String>,
}
