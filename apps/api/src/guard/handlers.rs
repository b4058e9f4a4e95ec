use axum::Json;
use serde::Deserialize;

use crate::guard::password::{validate_password_strength, PasswordStrength};

#[derive(Deserialize)]
pub struct PasswordStrengthRequest {
    pub password: String,
}

/// POST /api/v1/guard/password-strength
pub async fn handle_password_strength(
    Json(req): Json<PasswordStrengthRequest>,
) -> Json<PasswordStrength> {
    Json(validate_password_strength(&req.password))
}
