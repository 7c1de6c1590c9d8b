use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Routes reachable without a session.
pub const PUBLIC_ROUTES: &[&str] = &["/", "/login", "/tos", "/privacy-policy", "/api/webhook"];

/// Routes used to sign in. A visitor who already has a session is sent on to
/// the post-login redirect instead.
pub const AUTH_ROUTES: &[&str] = &["/login"];

/// Session endpoints stay public so signed-out clients can ask for their session.
pub const API_AUTH_PREFIX: &str = "/api/auth";

pub const ADMIN_PREFIX: &str = "/admin";
