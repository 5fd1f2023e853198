use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for the Google sign-in exchange: the verified profile the
/// client obtained from Google.
#[derive(Debug, Deserialize)]
pub struct GoogleAuthRequest {
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// Response returned after sign-in.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: PublicUser,
    pub token: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
}
