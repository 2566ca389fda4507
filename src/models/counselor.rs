//! Counselor profiles as listed by `GET /counselors`.

use serde::{Deserialize, Serialize};

/// Counselor profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counselor {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub specialization: Vec<String>,
    #[serde(default)]
    pub session_rate: Option<f64>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Counselor {
    /// Specializations joined for display, or "N/A"
    pub fn specialization_label(&self) -> String {
        specialization_label(&self.specialization)
    }
}

pub(crate) fn specialization_label(specialization: &[String]) -> String {
    if specialization.is_empty() {
        "N/A".to_string()
    } else {
        specialization.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_counselor() {
        let json = r#"{
            "_id": "c1",
            "name": "Dr. Rivera",
            "specialization": ["grief", "anxiety"],
            "sessionRate": 80
        }"#;

        let counselor: Counselor = serde_json::from_str(json).unwrap();
        assert_eq!(counselor.id, "c1");
        assert_eq!(counselor.session_rate, Some(80.0));
        assert_eq!(counselor.specialization_label(), "grief, anxiety");
    }

    #[test]
    fn test_missing_specialization_is_na() {
        let counselor: Counselor =
            serde_json::from_str(r#"{"_id": "c2", "name": "Sam"}"#).unwrap();
        assert_eq!(counselor.specialization_label(), "N/A");
        assert!(counselor.session_rate.is_none());
    }

    #[test]
    fn test_nameless_counselor_does_not_fail_list() {
        let list: Vec<Counselor> = serde_json::from_str(
            r#"[{"_id": "c1", "name": "Dr. Rivera"}, {"_id": "c2", "specialization": ["grief"]}]"#,
        )
        .unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[1].name, "");
        assert_eq!(list[1].specialization_label(), "grief");
    }
}
