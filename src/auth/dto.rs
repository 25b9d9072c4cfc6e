use serde::{Deserialize, Serialize};

/// Request body for signup and login.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Response returned after signup or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub id: i32,
    pub email: String,
    pub token: String,
}
