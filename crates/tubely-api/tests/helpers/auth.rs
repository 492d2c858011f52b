use chrono::Duration;
use tubely_api::auth::JwtService;
use tubely_api::constants::DEFAULT_TOKEN_TTL_HOURS;
use uuid::Uuid;

/// Shared secret for test tokens (at least 32 characters).
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";

pub fn token_for(jwt: &JwtService, user_id: Uuid) -> String {
    jwt.issue(user_id, Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
        .expect("token should sign")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
