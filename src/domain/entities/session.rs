use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    Regular,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Regular => "REGULAR",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REGULAR" => Ok(Role::Regular),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

/// The authenticated identity of the current request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Claims carried by a session token minted by the auth provider.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub exp: usize,
    pub iat: usize,
}

impl From<SessionClaims> for Session {
    fn from(claims: SessionClaims) -> Self {
        Session {
            id: claims.sub,
            role: claims.role,
            name: claims.name,
            email: claims.email,
            image: claims.picture,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: Session,
    pub expires: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_uses_uppercase_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(serde_json::from_str::<Role>("\"REGULAR\"").unwrap(), Role::Regular);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn claims_without_role_map_to_regular_session() {
        let claims: SessionClaims = serde_json::from_value(serde_json::json!({
            "sub": "user-1",
            "picture": "https://cdn.test/a.png",
            "exp": 10,
            "iat": 1
        }))
        .unwrap();

        let session = Session::from(claims);
        assert_eq!(session.role, Role::Regular);
        assert_eq!(session.image.as_deref(), Some("https://cdn.test/a.png"));
        assert!(!session.is_admin());
    }
}
