//! Routes and Access Control
//!
//! The SPA's route table, shared by the browser router and anything that
//! needs to build links (dashboards, CLI output). Each route declares a
//! [`Guard`]; [`authorize`] decides whether a session may render it.

use std::fmt;

use crate::models::Role;
use crate::session::Session;

/// Every page of the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Logout,
    CounselorDashboard,
    ClientDashboard,
    BookAppointment {
        counselor_id: String,
    },
    Appointments,
    MyAppointments,
    Payment {
        client_id: String,
        amount: String,
        counselor_id: String,
    },
    VideoCall {
        channel: String,
        uid: String,
    },
    NotFound,
}

/// Who may see a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Public,
    Authenticated,
    Role(Role),
}

/// Outcome of a route check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Route),
}

impl Route {
    /// Match a browser path against the route table
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(decode)
            .collect();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["logout"] => Route::Logout,
            ["counselor"] => Route::CounselorDashboard,
            ["client"] => Route::ClientDashboard,
            ["appointment-booking", counselor_id] => Route::BookAppointment {
                counselor_id: counselor_id.to_string(),
            },
            ["appointments"] => Route::Appointments,
            ["myappointments"] => Route::MyAppointments,
            ["payment", client_id, amount, counselor_id] => Route::Payment {
                client_id: client_id.to_string(),
                amount: amount.to_string(),
                counselor_id: counselor_id.to_string(),
            },
            ["video-call", channel, uid] => Route::VideoCall {
                channel: channel.to_string(),
                uid: uid.to_string(),
            },
            _ => Route::NotFound,
        }
    }

    /// Browser path for this route, with parameters percent-encoded
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Logout => "/logout".to_string(),
            Route::CounselorDashboard => "/counselor".to_string(),
            Route::ClientDashboard => "/client".to_string(),
            Route::BookAppointment { counselor_id } => {
                format!("/appointment-booking/{}", encode(counselor_id))
            }
            Route::Appointments => "/appointments".to_string(),
            Route::MyAppointments => "/myappointments".to_string(),
            Route::Payment {
                client_id,
                amount,
                counselor_id,
            } => format!(
                "/payment/{}/{}/{}",
                encode(client_id),
                encode(amount),
                encode(counselor_id)
            ),
            Route::VideoCall { channel, uid } => {
                format!("/video-call/{}/{}", encode(channel), encode(uid))
            }
            Route::NotFound => "/404".to_string(),
        }
    }

    pub fn guard(&self) -> Guard {
        match self {
            Route::Home | Route::Login | Route::Register | Route::Logout | Route::NotFound => {
                Guard::Public
            }
            Route::CounselorDashboard => Guard::Role(Role::Counselor),
            Route::ClientDashboard
            | Route::BookAppointment { .. }
            | Route::MyAppointments
            | Route::Payment { .. } => Guard::Role(Role::Client),
            Route::Appointments | Route::VideoCall { .. } => Guard::Authenticated,
        }
    }

    /// Payment route for an appointment's counselor. The amount is the
    /// counselor's session rate, left empty when unknown so the payment view
    /// rejects it.
    pub fn payment(client_id: &str, counselor_id: &str, session_rate: Option<f64>) -> Route {
        Route::Payment {
            client_id: client_id.to_string(),
            amount: session_rate.map(|r| r.to_string()).unwrap_or_default(),
            counselor_id: counselor_id.to_string(),
        }
    }

    /// Video call for an appointment; the appointment id is the channel name
    pub fn video_call(appointment_id: &str, user_id: &str) -> Route {
        Route::VideoCall {
            channel: appointment_id.to_string(),
            uid: user_id.to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Decide whether `session` may render `route`.
///
/// Missing sessions and wrong roles both go back to the login page.
pub fn authorize(route: &Route, session: Option<&Session>) -> Access {
    let allowed = match (route.guard(), session) {
        (Guard::Public, _) => true,
        (Guard::Authenticated, Some(_)) => true,
        (Guard::Role(required), Some(s)) => s.role == required,
        (_, None) => false,
    };

    if allowed {
        Access::Allow
    } else {
        Access::Redirect(Route::Login)
    }
}

fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

fn decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session {
            token: "jwt".into(),
            role,
            user_id: Some("u1".into()),
            username: None,
        }
    }

    #[test]
    fn test_parse_static_routes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/client/"), Route::ClientDashboard);
        assert_eq!(Route::parse("/myappointments"), Route::MyAppointments);
        assert_eq!(Route::parse("/login?next=/client"), Route::Login);
        assert_eq!(Route::parse("/about"), Route::NotFound);
    }

    #[test]
    fn test_parse_parameterized_routes() {
        assert_eq!(
            Route::parse("/payment/u1/80/c7"),
            Route::Payment {
                client_id: "u1".into(),
                amount: "80".into(),
                counselor_id: "c7".into(),
            }
        );
        assert_eq!(
            Route::parse("/video-call/a1/42"),
            Route::VideoCall {
                channel: "a1".into(),
                uid: "42".into()
            }
        );
        // too few segments
        assert_eq!(Route::parse("/payment/u1/80"), Route::NotFound);
    }

    #[test]
    fn test_path_encodes_and_parse_decodes() {
        let route = Route::BookAppointment {
            counselor_id: "a b/c".into(),
        };
        assert_eq!(route.path(), "/appointment-booking/a%20b%2Fc");
        assert_eq!(Route::parse(&route.path()), route);
    }

    #[test]
    fn test_payment_route_without_rate() {
        let route = Route::payment("u1", "c1", None);
        assert_eq!(
            route,
            Route::Payment {
                client_id: "u1".into(),
                amount: String::new(),
                counselor_id: "c1".into(),
            }
        );
        assert_eq!(Route::payment("u1", "c1", Some(45.5)).path(), "/payment/u1/45.5/c1");
    }

    #[test]
    fn test_public_routes_always_allowed() {
        assert_eq!(authorize(&Route::Home, None), Access::Allow);
        assert_eq!(authorize(&Route::Login, Some(&session(Role::Client))), Access::Allow);
    }

    #[test]
    fn test_guarded_routes_redirect_without_session() {
        for route in [
            Route::ClientDashboard,
            Route::CounselorDashboard,
            Route::Appointments,
            Route::video_call("a1", "u1"),
        ] {
            assert_eq!(authorize(&route, None), Access::Redirect(Route::Login));
        }
    }

    #[test]
    fn test_role_mismatch_redirects() {
        let counselor = session(Role::Counselor);
        let client = session(Role::Client);

        assert_eq!(
            authorize(&Route::ClientDashboard, Some(&counselor)),
            Access::Redirect(Route::Login)
        );
        assert_eq!(
            authorize(&Route::CounselorDashboard, Some(&client)),
            Access::Redirect(Route::Login)
        );
        assert_eq!(
            authorize(&Route::payment("u1", "c1", Some(10.0)), Some(&counselor)),
            Access::Redirect(Route::Login)
        );
        assert_eq!(authorize(&Route::CounselorDashboard, Some(&counselor)), Access::Allow);
    }

    #[test]
    fn test_any_role_may_join_calls() {
        let route = Route::video_call("a1", "u1");
        assert_eq!(authorize(&route, Some(&session(Role::Client))), Access::Allow);
        assert_eq!(authorize(&route, Some(&session(Role::Counselor))), Access::Allow);
    }

    #[test]
    fn test_role_home() {
        assert_eq!(Role::Client.home().path(), "/client");
        assert_eq!(Role::Counselor.home().path(), "/counselor");
    }
}
