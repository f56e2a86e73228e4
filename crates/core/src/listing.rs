//! Render-ready view of the directory.
//!
//! Doctor records are sparse; [`DoctorCard`] fills the gaps with the display
//! defaults every surface (terminal, JSON, MCP) shares.

use crate::catalog::filter_catalog;
use crate::doctor::Doctor;
use crate::filter::visible_doctors;
use crate::state::AppState;
use serde::Serialize;

pub const DEFAULT_SPECIALITY: &str = "General Physician";
pub const DEFAULT_QUALIFICATION: &str = "MBBS";
pub const DEFAULT_CLINIC: &str = "Private Clinic";
pub const DEFAULT_LOCALITY: &str = "Local Area";
pub const PLACEHOLDER_IMAGE: &str = "/api/placeholder/80/80";

/// A doctor as displayed in the listing
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DoctorCard {
    pub id: Option<String>,
    pub name: String,
    pub specialities: String,
    pub qualification: String,
    pub experience: Option<String>,
    pub fees: Option<String>,
    pub video_consult: bool,
    pub in_clinic: bool,
    pub clinic: String,
    pub locality: String,
    pub image: String,
}

impl From<&Doctor> for DoctorCard {
    fn from(doctor: &Doctor) -> Self {
        let specialities = doctor.speciality_names().collect::<Vec<_>>().join(", ");
        let specialities = if specialities.is_empty() {
            DEFAULT_SPECIALITY.to_string()
        } else {
            specialities
        };

        let mut qualification = non_empty(doctor.qualification.as_deref())
            .unwrap_or(DEFAULT_QUALIFICATION)
            .to_string();
        if let Some(details) = non_empty(doctor.qualification_details.as_deref()) {
            qualification.push_str(", ");
            qualification.push_str(details);
        }

        let clinic = doctor.clinic.as_ref();
        let clinic_name = non_empty(clinic.and_then(|c| c.name.as_deref())).unwrap_or(DEFAULT_CLINIC);
        let locality = non_empty(
            clinic
                .and_then(|c| c.address.as_ref())
                .and_then(|a| a.locality.as_deref()),
        )
        .unwrap_or(DEFAULT_LOCALITY);

        let image = non_empty(doctor.image.as_deref())
            .or_else(|| non_empty(doctor.photo.as_deref()))
            .unwrap_or(PLACEHOLDER_IMAGE);

        DoctorCard {
            id: doctor.id.clone(),
            name: doctor.name.clone(),
            specialities,
            qualification,
            experience: doctor.experience.clone(),
            fees: doctor.fees.clone(),
            video_consult: doctor.video_consult,
            in_clinic: doctor.in_clinic,
            clinic: clinic_name.to_string(),
            locality: locality.to_string(),
            image: image.to_string(),
        }
    }
}

/// Complete listing: visible doctors plus everything needed to draw the
/// filter panel and the search box.
#[derive(Debug, Serialize, Clone)]
pub struct ListingOutput {
    pub query: String,
    pub total_doctors: usize,
    pub visible_count: usize,
    pub doctors: Vec<DoctorCard>,
    pub specialties: Vec<String>,
    pub suggestions: Vec<String>,
    pub show_suggestions: bool,
    pub show_clear_all: bool,
}

/// Builds the listing for `state` over the loaded directory.
///
/// `catalog` is the full specialty catalog; only entries matching the
/// specialty search term are included.
pub fn build_listing(doctors: &[Doctor], catalog: &[String], state: &AppState) -> ListingOutput {
    let visible: Vec<DoctorCard> = visible_doctors(doctors, &state.filters)
        .into_iter()
        .map(DoctorCard::from)
        .collect();

    ListingOutput {
        query: state.query(),
        total_doctors: doctors.len(),
        visible_count: visible.len(),
        doctors: visible,
        specialties: filter_catalog(catalog, &state.filters.specialty_search)
            .into_iter()
            .map(str::to_string)
            .collect(),
        suggestions: state.suggestions.items().to_vec(),
        show_suggestions: state.suggestions.is_visible(),
        show_clear_all: state.has_active_filters(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::specialty_catalog;
    use crate::doctor::{Address, Clinic, Speciality};
    use crate::state::{reduce, Action};

    fn alice() -> Doctor {
        Doctor {
            id: Some("1".to_string()),
            name: "Alice".to_string(),
            fees: Some("₹500".to_string()),
            experience: Some("10 Years".to_string()),
            video_consult: true,
            specialities: vec![Speciality {
                name: "Cardiology".to_string(),
            }],
            ..Default::default()
        }
    }

    fn bob() -> Doctor {
        Doctor {
            name: "Bob".to_string(),
            fees: Some("₹200".to_string()),
            experience: Some("5 Years".to_string()),
            in_clinic: true,
            specialities: vec![Speciality {
                name: "Dermatology".to_string(),
            }],
            qualification: Some("MD".to_string()),
            qualification_details: Some("Dermatology".to_string()),
            clinic: Some(Clinic {
                name: Some("Skin First".to_string()),
                address: Some(Address {
                    locality: Some("Koramangala".to_string()),
                }),
            }),
            photo: Some("https://example.com/bob.png".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_card_defaults() {
        let card = DoctorCard::from(&Doctor {
            name: "Nameless Clinic Doctor".to_string(),
            ..Default::default()
        });

        assert_eq!(card.specialities, DEFAULT_SPECIALITY);
        assert_eq!(card.qualification, DEFAULT_QUALIFICATION);
        assert_eq!(card.clinic, DEFAULT_CLINIC);
        assert_eq!(card.locality, DEFAULT_LOCALITY);
        assert_eq!(card.image, PLACEHOLDER_IMAGE);
        assert_eq!(card.fees, None);
    }

    #[test]
    fn test_card_full_record() {
        let card = DoctorCard::from(&bob());

        assert_eq!(card.specialities, "Dermatology");
        assert_eq!(card.qualification, "MD, Dermatology");
        assert_eq!(card.clinic, "Skin First");
        assert_eq!(card.locality, "Koramangala");
        assert_eq!(card.image, "https://example.com/bob.png");
        assert!(card.in_clinic);
    }

    #[test]
    fn test_card_prefers_image_over_photo() {
        let mut doctor = bob();
        doctor.image = Some("https://example.com/primary.png".to_string());
        assert_eq!(
            DoctorCard::from(&doctor).image,
            "https://example.com/primary.png"
        );
    }

    #[test]
    fn test_card_joins_specialities() {
        let mut doctor = alice();
        doctor.specialities.push(Speciality {
            name: "General Physician".to_string(),
        });
        assert_eq!(
            DoctorCard::from(&doctor).specialities,
            "Cardiology, General Physician"
        );
    }

    #[test]
    fn test_build_listing_default_state() {
        let doctors = vec![alice(), bob()];
        let catalog = specialty_catalog(&doctors);

        let listing = build_listing(&doctors, &catalog, &AppState::default());

        assert_eq!(listing.query, "");
        assert_eq!(listing.total_doctors, 2);
        assert_eq!(listing.visible_count, 2);
        assert_eq!(listing.specialties, vec!["Cardiology", "Dermatology"]);
        assert!(listing.suggestions.is_empty());
        assert!(!listing.show_clear_all);
    }

    #[test]
    fn test_build_listing_filtered() {
        let doctors = vec![alice(), bob()];
        let catalog = specialty_catalog(&doctors);
        let state = AppState::from_query(&doctors, "sort=fees");
        let state = reduce(state, Action::SetSpecialtySearch("derm".to_string()), &doctors);

        let listing = build_listing(&doctors, &catalog, &state);

        assert_eq!(listing.query, "sort=fees");
        let names: Vec<&str> = listing.doctors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice"]);
        assert_eq!(listing.specialties, vec!["Dermatology"]);
        assert!(listing.show_clear_all);
    }

    #[test]
    fn test_build_listing_serializes() {
        let doctors = vec![alice()];
        let listing = build_listing(&doctors, &[], &AppState::default());
        let json = serde_json::to_value(&listing).unwrap();

        assert_eq!(json["visible_count"], 1);
        assert_eq!(json["doctors"][0]["name"], "Alice");
        assert_eq!(json["doctors"][0]["clinic"], DEFAULT_CLINIC);
    }
}
