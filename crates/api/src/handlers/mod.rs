pub mod activities;
pub mod coupons;
pub mod friends;
pub mod games;
pub mod staff;
pub mod users;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body shared by every token-based login endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct TokenLoginRequest {
    #[validate(length(min = 1, max = 256))]
    pub token: String,
}

/// Session issued by a login endpoint.
#[derive(Debug, Serialize)]
pub struct SessionResponse<T: Serialize> {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub principal: T,
}
