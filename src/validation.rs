//! Form Validation
//!
//! Client-side checks run before any request is issued. Each validator
//! returns the request body to send, or the message to show.

use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::OnceLock;

use crate::models::{LoginRequest, NewAppointment, RegisterRequest, Role};

/// Longest accepted session-type description
pub const MAX_SESSION_TYPE_LEN: usize = 500;

/// Format of `<input type="datetime-local">` values
pub const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub const INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const MISSING_CREDENTIALS: &str = "Please enter email and password.";
pub const MISSING_REQUIRED: &str = "Please fill in all required fields.";
pub const MISSING_SPECIALIZATION: &str = "Please enter specialization.";
pub const MISSING_PREFERENCES: &str = "Please enter preferences.";
pub const INVALID_SESSION_RATE: &str = "Please enter a valid session rate.";
pub const MISSING_BOOKING_FIELDS: &str = "Please fill in all fields.";
pub const SESSION_TYPE_TOO_LONG: &str = "Session type must be less than 500 characters.";
pub const PAST_DATE: &str = "Please select a future date and time.";
pub const INVALID_DATE: &str = "Please enter a valid date and time.";
pub const INVALID_AMOUNT: &str = "Invalid payment amount.";

/// A validation failure carrying the user-facing message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub &'static str);

impl ValidationError {
    pub fn message(&self) -> &'static str {
        self.0
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

/// Check login credentials; both fields are trimmed before sending
pub fn validate_login(email: &str, password: &str) -> ValidationResult<LoginRequest> {
    let email = email.trim();
    let password = password.trim();

    if !email_regex().is_match(email) {
        return Err(ValidationError(INVALID_EMAIL));
    }
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError(MISSING_CREDENTIALS));
    }

    Ok(LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Raw registration form input
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub name: String,
    /// Comma-separated, counselors only
    pub specialization: String,
    /// Counselors only; may be empty
    pub session_rate: String,
    /// Comma-separated, clients only
    pub preferences: String,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            password: String::new(),
            role: Role::Client,
            name: String::new(),
            specialization: String::new(),
            session_rate: String::new(),
            preferences: String::new(),
        }
    }
}

/// Check a registration form and build the role-specific request
pub fn validate_registration(form: &RegistrationForm) -> ValidationResult<RegisterRequest> {
    let required = [&form.username, &form.email, &form.password, &form.name];
    if required.iter().any(|f| f.trim().is_empty()) {
        return Err(ValidationError(MISSING_REQUIRED));
    }

    let mut request = RegisterRequest {
        username: form.username.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password.clone(),
        role: form.role,
        name: form.name.trim().to_string(),
        specialization: None,
        session_rate: None,
        preferences: None,
    };

    match form.role {
        Role::Counselor => {
            let specialization = split_list(&form.specialization);
            if specialization.is_empty() {
                return Err(ValidationError(MISSING_SPECIALIZATION));
            }
            request.specialization = Some(specialization);
            request.session_rate = parse_session_rate(&form.session_rate)?;
        }
        Role::Client => {
            let preferences = split_list(&form.preferences);
            if preferences.is_empty() {
                return Err(ValidationError(MISSING_PREFERENCES));
            }
            request.preferences = Some(preferences);
        }
    }

    Ok(request)
}

/// Split a comma-separated field, dropping blank entries
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_session_rate(input: &str) -> ValidationResult<Option<f64>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    match input.parse::<f64>() {
        Ok(rate) if rate.is_finite() && rate >= 0.0 => Ok(Some(rate)),
        _ => Err(ValidationError(INVALID_SESSION_RATE)),
    }
}

/// Check a booking form against the current local time.
///
/// The date is sent exactly as the picker produced it.
pub fn validate_booking(
    client_id: &str,
    counselor_id: &str,
    date: &str,
    session_type: &str,
    now: NaiveDateTime,
) -> ValidationResult<NewAppointment> {
    if date.trim().is_empty() || session_type.trim().is_empty() {
        return Err(ValidationError(MISSING_BOOKING_FIELDS));
    }
    if session_type.chars().count() > MAX_SESSION_TYPE_LEN {
        return Err(ValidationError(SESSION_TYPE_TOO_LONG));
    }

    let selected = parse_datetime_local(date).ok_or(ValidationError(INVALID_DATE))?;
    if selected < now {
        return Err(ValidationError(PAST_DATE));
    }

    Ok(NewAppointment {
        client: client_id.to_string(),
        counselor: counselor_id.to_string(),
        date: date.to_string(),
        session_type: session_type.to_string(),
    })
}

/// Parse a `datetime-local` value, with or without seconds
pub fn parse_datetime_local(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, DATETIME_LOCAL_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// `min` attribute for the date picker
pub fn min_booking_value(now: NaiveDateTime) -> String {
    now.format(DATETIME_LOCAL_FORMAT).to_string()
}

/// Parse the amount carried in a payment route
pub fn parse_amount(raw: &str) -> ValidationResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(ValidationError(INVALID_AMOUNT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_login_trims_and_accepts() {
        let req = validate_login("  amy@example.com ", " secret ").unwrap();
        assert_eq!(req.email, "amy@example.com");
        assert_eq!(req.password, "secret");
    }

    #[test]
    fn test_login_rejects_bad_email_before_password() {
        assert_eq!(validate_login("amy@example", "pw").unwrap_err().message(), INVALID_EMAIL);
        assert_eq!(validate_login("", "").unwrap_err().message(), INVALID_EMAIL);
        assert_eq!(validate_login("a b@example.com", "pw").unwrap_err().message(), INVALID_EMAIL);
    }

    #[test]
    fn test_login_requires_password() {
        assert_eq!(
            validate_login("amy@example.com", "   ").unwrap_err().message(),
            MISSING_CREDENTIALS
        );
    }

    fn counselor_form() -> RegistrationForm {
        RegistrationForm {
            username: "drlee".into(),
            email: "lee@example.com".into(),
            password: "pw".into(),
            role: Role::Counselor,
            name: "Dr. Lee".into(),
            specialization: "grief, anxiety,,".into(),
            session_rate: "80".into(),
            preferences: "ignored".into(),
        }
    }

    #[test]
    fn test_registration_required_fields() {
        let form = RegistrationForm {
            name: String::new(),
            ..counselor_form()
        };
        assert_eq!(validate_registration(&form).unwrap_err().message(), MISSING_REQUIRED);
    }

    #[test]
    fn test_counselor_registration() {
        let req = validate_registration(&counselor_form()).unwrap();
        assert_eq!(req.specialization, Some(vec!["grief".into(), "anxiety".into()]));
        assert_eq!(req.session_rate, Some(80.0));
        assert!(req.preferences.is_none());
    }

    #[test]
    fn test_counselor_needs_specialization_and_valid_rate() {
        let no_spec = RegistrationForm {
            specialization: " , ".into(),
            ..counselor_form()
        };
        assert_eq!(
            validate_registration(&no_spec).unwrap_err().message(),
            MISSING_SPECIALIZATION
        );

        let bad_rate = RegistrationForm {
            session_rate: "-5".into(),
            ..counselor_form()
        };
        assert_eq!(
            validate_registration(&bad_rate).unwrap_err().message(),
            INVALID_SESSION_RATE
        );

        let no_rate = RegistrationForm {
            session_rate: String::new(),
            ..counselor_form()
        };
        assert_eq!(validate_registration(&no_rate).unwrap().session_rate, None);
    }

    #[test]
    fn test_client_needs_preferences() {
        let form = RegistrationForm {
            role: Role::Client,
            preferences: String::new(),
            ..counselor_form()
        };
        assert_eq!(validate_registration(&form).unwrap_err().message(), MISSING_PREFERENCES);

        let form = RegistrationForm {
            preferences: "stress,sleep".into(),
            ..form
        };
        let req = validate_registration(&form).unwrap();
        assert_eq!(req.preferences, Some(vec!["stress".into(), "sleep".into()]));
        assert!(req.specialization.is_none());
        assert!(req.session_rate.is_none());
    }

    #[test]
    fn test_booking_happy_path_keeps_raw_date() {
        let appt = validate_booking("u1", "c1", "2025-06-02T09:30", "Intro", noon()).unwrap();
        assert_eq!(appt.date, "2025-06-02T09:30");
        assert_eq!(appt.counselor, "c1");
    }

    #[test]
    fn test_booking_past_date_rejected() {
        let err = validate_booking("u1", "c1", "2025-06-01T11:59", "Intro", noon()).unwrap_err();
        assert_eq!(err.message(), PAST_DATE);
    }

    #[test]
    fn test_booking_missing_and_long_fields() {
        assert_eq!(
            validate_booking("u1", "c1", "", "Intro", noon()).unwrap_err().message(),
            MISSING_BOOKING_FIELDS
        );
        assert_eq!(
            validate_booking("u1", "c1", "2025-06-02T09:30", "  ", noon())
                .unwrap_err()
                .message(),
            MISSING_BOOKING_FIELDS
        );

        let long = "x".repeat(MAX_SESSION_TYPE_LEN + 1);
        assert_eq!(
            validate_booking("u1", "c1", "2025-06-02T09:30", &long, noon())
                .unwrap_err()
                .message(),
            SESSION_TYPE_TOO_LONG
        );

        let exact = "x".repeat(MAX_SESSION_TYPE_LEN);
        assert!(validate_booking("u1", "c1", "2025-06-02T09:30", &exact, noon()).is_ok());
    }

    #[test]
    fn test_booking_unparsable_date() {
        assert_eq!(
            validate_booking("u1", "c1", "tomorrow", "Intro", noon())
                .unwrap_err()
                .message(),
            INVALID_DATE
        );
    }

    #[test]
    fn test_min_booking_value() {
        assert_eq!(min_booking_value(noon()), "2025-06-01T12:00");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("80").unwrap(), 80.0);
        assert_eq!(parse_amount("").unwrap_err().message(), INVALID_AMOUNT);
        assert_eq!(parse_amount("undefined").unwrap_err().message(), INVALID_AMOUNT);
        assert_eq!(parse_amount("0").unwrap_err().message(), INVALID_AMOUNT);
    }
}
