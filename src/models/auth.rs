//! Authentication Types
//!
//! Roles, login/registration payloads and the auth response returned by the API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::routes::Route;

/// The two kinds of platform users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Counselor,
}

impl Role {
    /// Wire representation (`client` / `counselor`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Counselor => "counselor",
        }
    }

    /// Dashboard a user lands on after login
    pub fn home(&self) -> Route {
        match self {
            Role::Client => Route::ClientDashboard,
            Role::Counselor => Route::CounselorDashboard,
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
            "client" => Ok(Role::Client),
            "counselor" => Ok(Role::Counselor),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`
///
/// Counselors carry `specialization` and `sessionRate`, clients carry
/// `preferences`. Absent fields are not serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Vec<String>>,
}

/// Response of both login and registration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub role: Role,
    pub user_id: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_str() {
        assert_eq!("client".parse::<Role>().unwrap(), Role::Client);
        assert_eq!("counselor".parse::<Role>().unwrap(), Role::Counselor);
        assert!("admin".parse::<Role>().is_err());
        assert!("Client".parse::<Role>().is_err());
    }

    #[test]
    fn test_auth_response_without_username() {
        let json = r#"{"token":"t","role":"counselor","userId":"42"}"#;
        let resp: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.role, Role::Counselor);
        assert_eq!(resp.user_id, "42");
        assert!(resp.username.is_none());
    }

    #[test]
    fn test_register_request_skips_other_role_fields() {
        let req = RegisterRequest {
            username: "amy".into(),
            email: "amy@example.com".into(),
            password: "pw".into(),
            role: Role::Client,
            name: "Amy".into(),
            specialization: None,
            session_rate: None,
            preferences: Some(vec!["anxiety".into()]),
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["role"], "client");
        assert_eq!(value["preferences"][0], "anxiety");
        assert!(value.get("specialization").is_none());
        assert!(value.get("sessionRate").is_none());
    }
}
