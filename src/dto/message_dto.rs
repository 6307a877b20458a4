use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessagePayload {
    #[validate(length(min = 1, max = 1000))]
    pub content: String,
}
