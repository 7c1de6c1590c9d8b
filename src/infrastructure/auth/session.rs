use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    http::header::{HeaderMap, AUTHORIZATION},
    HttpRequest,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};

use crate::{
    entities::session::{Session, SessionClaims},
    errors::SessionError,
    settings::{AppConfig, SessionKeys},
};

const SESSION_ALGORITHM: Algorithm = Algorithm::HS256;

/// Verifies and issues the session tokens shared with the auth provider.
#[derive(Clone)]
pub struct SessionService {
    keys: SessionKeys,
    ttl: Duration,
    cookie_name: String,
    secure_cookie: bool,
}

impl SessionService {
    pub fn new(config: &AppConfig) -> Self {
        SessionService {
            keys: SessionKeys::from(config),
            ttl: Duration::hours(config.session_ttl_hours),
            cookie_name: config.session_cookie_name.clone(),
            secure_cookie: config.is_production(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Signs a token for `session`, returning it with its expiry.
    pub fn issue(&self, session: &Session) -> Result<(String, DateTime<Utc>), SessionError> {
        let now = Utc::now();
        let expires = now + self.ttl;

        let claims = SessionClaims {
            sub: session.id.clone(),
            role: session.role,
            name: session.name.clone(),
            email: session.email.clone(),
            picture: session.image.clone(),
            exp: expires.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(&Header::new(SESSION_ALGORITHM), &claims, &self.keys.encoding)
            .map_err(|e| {
                tracing::warn!("Failed to sign session token: {}", e);
                SessionError::TokenCreation
            })?;

        Ok((token, expires))
    }

    pub fn decode(&self, token: &str) -> Result<Session, SessionError> {
        let mut validation = Validation::new(SESSION_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;

        let data = decode::<SessionClaims>(token, &self.keys.decoding, &validation)?;
        Ok(Session::from(data.claims))
    }

    /// Token from the session cookie, falling back to a bearer header.
    pub fn extract_token(&self, req: &HttpRequest) -> Option<String> {
        req.cookie(&self.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
            .or_else(|| bearer_token(req.headers()))
    }

    /// Resolves the session of a request; any token problem means no session.
    pub fn resolve(&self, req: &HttpRequest) -> Option<Session> {
        let token = self.extract_token(req)?;

        match self.decode(&token) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::debug!("Ignoring session token: {}", e);
                None
            }
        }
    }

    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(self.cookie_name.clone(), token)
            .path("/")
            .http_only(true)
            .secure(self.secure_cookie)
            .same_site(SameSite::Lax)
            .max_age(CookieDuration::seconds(self.ttl.num_seconds()))
            .finish()
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(self.cookie_name.clone(), "")
            .path("/")
            .http_only(true)
            .secure(self.secure_cookie)
            .same_site(SameSite::Lax)
            .finish();
        cookie.make_removal();
        cookie
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}
