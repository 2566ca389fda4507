//! Video Call Bookkeeping
//!
//! The media SDK does the real work; this module keeps the part the widget
//! owns: which remote participants are on screen, how the local uid is
//! presented to the SDK, and what to tell the user when setup fails.

use serde::Serialize;
use std::fmt;

pub const UNSUPPORTED_BROWSER: &str = "Your browser does not support media devices.";
pub const INVALID_TOKEN: &str = "Invalid token received from server.";
pub const PERMISSION_DENIED: &str = "Please allow access to your camera and microphone.\n\n\
     Tip: if you blocked it earlier, open your browser's site settings, go to \
     Permissions and allow the microphone and camera for this site.";
pub const DEVICE_UNAVAILABLE: &str = "Could not access microphone or camera.";
pub const CALL_FAILED: &str = "Failed to start video call. Please check your network and try again.";
pub const SUBSCRIBE_FAILED: &str = "Failed to handle user published.";

/// The local participant id handed to the SDK on join.
///
/// Numeric ids join as integer uids; anything else joins as a string
/// user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallUid {
    Numeric(u32),
    Account(String),
}

impl CallUid {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(match raw.parse::<u32>() {
            Ok(n) => CallUid::Numeric(n),
            Err(_) => CallUid::Account(raw.to_string()),
        })
    }
}

impl fmt::Display for CallUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallUid::Numeric(n) => write!(f, "{}", n),
            CallUid::Account(s) => f.write_str(s),
        }
    }
}

/// Everything a media client needs to join a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinDetails {
    pub app_id: String,
    pub channel_name: String,
    pub uid: String,
    pub token: String,
}

impl JoinDetails {
    /// Joining fails without the SDK project's app id
    pub fn has_app_id(&self) -> bool {
        !self.app_id.trim().is_empty()
    }
}

/// Map a media-device failure (DOMException name and message) to the text
/// shown to the user
pub fn media_error_message(name: &str, message: &str) -> &'static str {
    if name == "NotAllowedError" || message.contains("Permission denied") {
        PERMISSION_DENIED
    } else {
        DEVICE_UNAVAILABLE
    }
}

/// Remote participants currently publishing, in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallRoster {
    remote: Vec<String>,
}

impl CallRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a published participant. A user publishing audio and video
    /// fires twice; the second call is a no-op. Returns whether the user is
    /// new.
    pub fn publish(&mut self, uid: impl Into<String>) -> bool {
        let uid = uid.into();
        if self.remote.contains(&uid) {
            return false;
        }
        self.remote.push(uid);
        true
    }

    /// Drop a participant; returns whether they were present
    pub fn unpublish(&mut self, uid: &str) -> bool {
        let before = self.remote.len();
        self.remote.retain(|u| u != uid);
        self.remote.len() != before
    }

    pub fn clear(&mut self) {
        self.remote.clear();
    }

    pub fn contains(&self, uid: &str) -> bool {
        self.remote.iter().any(|u| u == uid)
    }

    pub fn uids(&self) -> &[String] {
        &self.remote
    }

    pub fn len(&self) -> usize {
        self.remote.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remote.is_empty()
    }

    /// DOM id of the tile a participant's video plays into
    pub fn tile_id(uid: &str) -> String {
        let safe: String = uid
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        format!("remote-video-{}", safe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_details_wire_names() {
        let details = JoinDetails {
            app_id: "app".into(),
            channel_name: "a1".into(),
            uid: "42".into(),
            token: "tok".into(),
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["appId"], "app");
        assert_eq!(json["channelName"], "a1");
        assert!(details.has_app_id());

        let blank = JoinDetails {
            app_id: " ".into(),
            ..details
        };
        assert!(!blank.has_app_id());
    }

    #[test]
    fn test_uid_parse() {
        assert_eq!(CallUid::parse("42"), Some(CallUid::Numeric(42)));
        assert_eq!(
            CallUid::parse("64ab12cd"),
            Some(CallUid::Account("64ab12cd".into()))
        );
        assert_eq!(CallUid::parse("  "), None);
        assert_eq!(CallUid::Numeric(7).to_string(), "7");
    }

    #[test]
    fn test_media_error_message() {
        assert_eq!(media_error_message("NotAllowedError", ""), PERMISSION_DENIED);
        assert_eq!(
            media_error_message("Error", "Permission denied by system"),
            PERMISSION_DENIED
        );
        assert_eq!(media_error_message("NotFoundError", "no camera"), DEVICE_UNAVAILABLE);
    }

    #[test]
    fn test_roster_dedups_and_removes() {
        let mut roster = CallRoster::new();
        assert!(roster.publish("7"));
        assert!(!roster.publish("7"));
        assert!(roster.publish("9"));
        assert_eq!(roster.uids(), ["7".to_string(), "9".to_string()]);

        assert!(roster.unpublish("7"));
        assert!(!roster.unpublish("7"));
        assert!(!roster.contains("7"));
        assert_eq!(roster.len(), 1);

        roster.clear();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_tile_id_is_dom_safe() {
        assert_eq!(CallRoster::tile_id("12"), "remote-video-12");
        assert_eq!(CallRoster::tile_id("a b#c"), "remote-video-a-b-c");
    }
}
