//! Doctor records as served by the directory endpoint.
//!
//! The endpoint is a static JSON file maintained by hand, so every field is
//! optional on the wire. Missing values deserialize to defaults and are
//! replaced by display defaults later, when a [`crate::listing::DoctorCard`]
//! is built.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;

/// Doctor record from the directory endpoint
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Doctor {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "skip_malformed_entries")]
    pub specialities: Vec<Speciality>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub fees: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub experience: Option<String>,
    #[serde(default, deserialize_with = "bool_or_false")]
    pub video_consult: bool,
    #[serde(default, deserialize_with = "bool_or_false")]
    pub in_clinic: bool,
    #[serde(default)]
    pub clinic: Option<Clinic>,
    #[serde(default)]
    pub qualification: Option<String>,
    #[serde(default)]
    pub qualification_details: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Speciality {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Clinic {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Address {
    #[serde(default)]
    pub locality: Option<String>,
}

impl Doctor {
    /// Names of the doctor's specialities, in source order, skipping blanks
    pub fn speciality_names(&self) -> impl Iterator<Item = &str> {
        self.specialities
            .iter()
            .map(|s| s.name.as_str())
            .filter(|name| !name.is_empty())
    }

    pub fn has_speciality(&self, name: &str) -> bool {
        self.speciality_names().any(|s| s == name)
    }

    /// Consultation fee as a number.
    ///
    /// All non-digit characters are dropped, so `"₹ 1,500"` reads as 1500.
    pub fn fee_amount(&self) -> u64 {
        self.fees.as_deref().map(parse_fee).unwrap_or(0)
    }

    /// Years of experience, read from the first integer in the text
    pub fn experience_years(&self) -> u64 {
        self.experience.as_deref().map(parse_experience).unwrap_or(0)
    }

    /// Case-insensitive substring match on the doctor's name.
    ///
    /// `needle` must already be lowercased.
    pub fn name_contains(&self, needle: &str) -> bool {
        !self.name.is_empty() && self.name.to_lowercase().contains(needle)
    }
}

/// Reads a fee string as the number formed by all of its digits.
///
/// Strings without digits read as 0. Amounts too large for a `u64`
/// saturate at `u64::MAX`.
pub fn parse_fee(fees: &str) -> u64 {
    fees.chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u64, |amount, digit| {
            amount.saturating_mul(10).saturating_add(u64::from(digit))
        })
}

/// Reads the first run of digits in an experience string, or 0 if none.
pub fn parse_experience(experience: &str) -> u64 {
    static FIRST_INT: OnceLock<Regex> = OnceLock::new();
    let re = FIRST_INT.get_or_init(|| Regex::new(r"\d+").unwrap());

    re.find(experience)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn bool_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(matches!(value, Some(serde_json::Value::Bool(true))))
}

/// Keeps only object entries carrying a string `name`
fn skip_malformed_entries<'de, D>(deserializer: D) -> Result<Vec<Speciality>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(serde_json::Value::Array(entries)) = value else {
        return Ok(Vec::new());
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry.get("name") {
            Some(serde_json::Value::String(name)) => Some(Speciality { name: name.clone() }),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_record() {
        let doctor: Doctor = serde_json::from_value(json!({
            "id": "111",
            "name": "Dr. Amita Shah",
            "specialities": [{ "name": "Dentist" }, { "name": "Orthodontist" }],
            "fees": "₹ 500",
            "experience": "13 Years of experience",
            "video_consult": true,
            "in_clinic": false,
            "clinic": { "name": "Smile Care", "address": { "locality": "Indiranagar" } },
            "qualification": "BDS",
            "photo": "https://example.com/amita.png"
        }))
        .unwrap();

        assert_eq!(doctor.id.as_deref(), Some("111"));
        assert_eq!(doctor.name, "Dr. Amita Shah");
        assert_eq!(
            doctor.speciality_names().collect::<Vec<_>>(),
            vec!["Dentist", "Orthodontist"]
        );
        assert_eq!(doctor.fee_amount(), 500);
        assert_eq!(doctor.experience_years(), 13);
        assert!(doctor.video_consult);
        assert!(!doctor.in_clinic);
        assert_eq!(
            doctor
                .clinic
                .as_ref()
                .and_then(|c| c.address.as_ref())
                .and_then(|a| a.locality.as_deref()),
            Some("Indiranagar")
        );
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let doctor: Doctor = serde_json::from_value(json!({})).unwrap();

        assert_eq!(doctor, Doctor::default());
        assert_eq!(doctor.fee_amount(), 0);
        assert_eq!(doctor.experience_years(), 0);
    }

    #[test]
    fn test_deserialize_nulls_and_numbers() {
        let doctor: Doctor = serde_json::from_value(json!({
            "id": 42,
            "name": null,
            "specialities": [null, { "name": "ENT" }, { "name": null }],
            "fees": 300,
            "experience": null,
            "video_consult": null
        }))
        .unwrap();

        assert_eq!(doctor.id.as_deref(), Some("42"));
        assert_eq!(doctor.name, "");
        assert_eq!(doctor.speciality_names().collect::<Vec<_>>(), vec!["ENT"]);
        assert_eq!(doctor.fee_amount(), 300);
        assert_eq!(doctor.experience_years(), 0);
        assert!(!doctor.video_consult);
    }

    #[test]
    fn test_malformed_fields_keep_the_directory() {
        let doctors: Vec<Doctor> = serde_json::from_str(
            r#"[
                {"name": "A", "specialities": ["ENT", {"name": 7}, {"name": "Dentist"}]},
                {"name": "B", "specialities": "ENT", "video_consult": "true", "in_clinic": 1},
                {"name": "C", "video_consult": true}
            ]"#,
        )
        .unwrap();

        assert_eq!(doctors.len(), 3);
        assert_eq!(doctors[0].speciality_names().collect::<Vec<_>>(), vec!["Dentist"]);
        assert!(doctors[1].specialities.is_empty());
        assert!(!doctors[1].video_consult);
        assert!(!doctors[1].in_clinic);
        assert!(doctors[2].video_consult);
    }

    #[test]
    fn test_oversized_fee_sorts_last() {
        assert!(parse_fee("₹ 123456789012345678901234567890") > parse_fee("₹ 5000"));
    }

    #[test]
    fn test_parse_fee() {
        assert_eq!(parse_fee("₹500"), 500);
        assert_eq!(parse_fee("₹ 1,500"), 1500);
        assert_eq!(parse_fee("Free"), 0);
        assert_eq!(parse_fee(""), 0);
        assert_eq!(parse_fee("99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn test_parse_experience() {
        assert_eq!(parse_experience("10 Years"), 10);
        assert_eq!(parse_experience("Over 25 yrs, 3 clinics"), 25);
        assert_eq!(parse_experience("Fresher"), 0);
        assert_eq!(parse_experience(""), 0);
    }

    #[test]
    fn test_name_contains_is_case_insensitive() {
        let doctor = Doctor {
            name: "Alice Mathew".to_string(),
            ..Default::default()
        };

        assert!(doctor.name_contains("ali"));
        assert!(doctor.name_contains("mathew"));
        assert!(!doctor.name_contains("bob"));
    }

    #[test]
    fn test_has_speciality_is_exact() {
        let doctor = Doctor {
            specialities: vec![Speciality {
                name: "Cardiology".to_string(),
            }],
            ..Default::default()
        };

        assert!(doctor.has_speciality("Cardiology"));
        assert!(!doctor.has_speciality("cardiology"));
        assert!(!doctor.has_speciality("Cardio"));
    }
}
