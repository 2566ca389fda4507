//! Appointment Types
//!
//! Appointments come back from the API with their `client` and `counselor`
//! fields either as bare ids or as populated profile objects, depending on
//! the endpoint. [`PartyRef`] accepts both shapes, and `null` for a user
//! that no longer exists.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::counselor::specialization_label;

/// Display format for appointment times (`2025-03-14 02:30 PM`)
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %I:%M %p";

/// A participant reference: id only, a populated profile, or nothing when
/// the referenced user was deleted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartyRef {
    Id(String),
    Profile(PartyProfile),
    #[default]
    Missing,
}

/// Populated participant profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyProfile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub session_rate: Option<f64>,
    #[serde(default)]
    pub specialization: Vec<String>,
}

impl PartyRef {
    pub fn id(&self) -> &str {
        match self {
            PartyRef::Id(id) => id,
            PartyRef::Profile(p) => &p.id,
            PartyRef::Missing => "",
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            PartyRef::Id(_) | PartyRef::Missing => None,
            PartyRef::Profile(p) => p.name.as_deref(),
        }
    }

    pub fn session_rate(&self) -> Option<f64> {
        match self {
            PartyRef::Id(_) | PartyRef::Missing => None,
            PartyRef::Profile(p) => p.session_rate,
        }
    }

    pub fn specialization_label(&self) -> String {
        match self {
            PartyRef::Id(_) | PartyRef::Missing => specialization_label(&[]),
            PartyRef::Profile(p) => specialization_label(&p.specialization),
        }
    }
}

/// A booked session between a client and a counselor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub client: PartyRef,
    #[serde(default)]
    pub counselor: PartyRef,
    pub date: String,
    #[serde(default)]
    pub session_type: String,
}

impl Appointment {
    /// Counselor name or `fallback` when the API did not populate it
    pub fn counselor_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.counselor.name().unwrap_or(fallback)
    }

    /// Client name or `fallback` when the API did not populate it
    pub fn client_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.client.name().unwrap_or(fallback)
    }

    /// Date formatted in the local time zone
    pub fn display_date(&self) -> String {
        format_date_in(&self.date, &Local)
    }
}

/// Format an API date string in `tz`.
///
/// RFC 3339 timestamps are converted; naive `datetime-local` values are shown
/// as entered. Anything else is returned unchanged.
pub fn format_date_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(tz).format(DISPLAY_FORMAT).to_string();
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Remove an appointment by id, returning whether anything was removed
pub fn remove_appointment(appointments: &mut Vec<Appointment>, id: &str) -> bool {
    let before = appointments.len();
    appointments.retain(|a| a.id != id);
    appointments.len() != before
}

/// Body of `POST /appointments`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub client: String,
    pub counselor: String,
    pub date: String,
    pub session_type: String,
}
