//! REST endpoint URLs
//!
//! Built from a base URL such as `https://api.example.com/api`. Shared by
//! the native client and the browser client so both hit the same paths.

use crate::models::Role;

/// Strip trailing slashes from a configured base URL
pub fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

pub fn login(base: &str) -> String {
    format!("{}/auth/login", base)
}

pub fn register(base: &str) -> String {
    format!("{}/auth/register", base)
}

pub fn counselors(base: &str) -> String {
    format!("{}/counselors", base)
}

pub fn appointments(base: &str) -> String {
    format!("{}/appointments", base)
}

pub fn appointment(base: &str, appointment_id: &str) -> String {
    format!("{}/appointments/{}", base, urlencoding::encode(appointment_id))
}

pub fn client_appointments(base: &str, user_id: &str) -> String {
    format!("{}/appointments/client/{}", base, urlencoding::encode(user_id))
}

pub fn counselor_appointments(base: &str, user_id: &str) -> String {
    format!("{}/appointments/counselor/{}", base, urlencoding::encode(user_id))
}

/// Appointment list for a role: own appointments when the user id is known,
/// the unfiltered list otherwise
pub fn appointments_for(base: &str, role: Option<Role>, user_id: Option<&str>) -> String {
    match (role, user_id) {
        (Some(Role::Counselor), Some(id)) => counselor_appointments(base, id),
        (Some(Role::Client), Some(id)) => client_appointments(base, id),
        _ => appointments(base),
    }
}

pub fn checkout(base: &str) -> String {
    format!("{}/payments/checkout", base)
}

pub fn video_token(base: &str, channel: &str, uid: &str) -> String {
    format!(
        "{}/video-token?channelName={}&uid={}",
        base,
        urlencoding::encode(channel),
        urlencoding::encode(uid)
    )
}

/// `Authorization` header value
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:5000/api";

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base(" http://x/api// "), "http://x/api");
    }

    #[test]
    fn test_appointments_for_role() {
        assert_eq!(
            appointments_for(BASE, Some(Role::Counselor), Some("c1")),
            "http://localhost:5000/api/appointments/counselor/c1"
        );
        assert_eq!(
            appointments_for(BASE, Some(Role::Client), Some("u1")),
            "http://localhost:5000/api/appointments/client/u1"
        );
        assert_eq!(
            appointments_for(BASE, Some(Role::Client), None),
            "http://localhost:5000/api/appointments"
        );
    }

    #[test]
    fn test_video_token_query_is_encoded() {
        assert_eq!(
            video_token(BASE, "room 1", "42"),
            "http://localhost:5000/api/video-token?channelName=room%201&uid=42"
        );
    }

    #[test]
    fn test_bearer() {
        assert_eq!(bearer("abc"), "Bearer abc");
    }
}
