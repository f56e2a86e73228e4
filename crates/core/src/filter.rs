//! Filter state and the visible-list derivation.

use crate::doctor::Doctor;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// Consultation mode a doctor must offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConsultationType {
    #[default]
    #[serde(rename = "")]
    All,
    #[serde(rename = "Video Consult")]
    VideoConsult,
    #[serde(rename = "In Clinic")]
    InClinic,
}

impl ConsultationType {
    /// Value used in the `consultation` query parameter (empty for `All`)
    pub fn as_param(&self) -> &'static str {
        match self {
            ConsultationType::All => "",
            ConsultationType::VideoConsult => "Video Consult",
            ConsultationType::InClinic => "In Clinic",
        }
    }

    /// Parses a query parameter value. Unknown values mean no constraint.
    pub fn from_param(value: &str) -> Self {
        match value {
            "Video Consult" => ConsultationType::VideoConsult,
            "In Clinic" => ConsultationType::InClinic,
            _ => ConsultationType::All,
        }
    }

    fn admits(&self, doctor: &Doctor) -> bool {
        match self {
            ConsultationType::All => true,
            ConsultationType::VideoConsult => doctor.video_consult,
            ConsultationType::InClinic => doctor.in_clinic,
        }
    }
}

/// Ordering applied to the visible list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    #[serde(rename = "")]
    None,
    /// Cheapest first
    Fees,
    /// Most experienced first
    Experience,
}

impl SortKey {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortKey::None => "",
            SortKey::Fees => "fees",
            SortKey::Experience => "experience",
        }
    }

    pub fn from_param(value: &str) -> Self {
        match value {
            "fees" => SortKey::Fees,
            "experience" => SortKey::Experience,
            _ => SortKey::None,
        }
    }
}

/// Every user-controlled input to the visible list.
///
/// `specialty_search` only narrows the specialty catalog shown to the user;
/// it never affects which doctors are visible and is not part of the URL.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub search: String,
    pub consultation: ConsultationType,
    pub specialties: BTreeSet<String>,
    pub sort: SortKey,
    pub specialty_search: String,
}

impl FilterState {
    /// Whether any field differs from its default
    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
            || self.consultation != ConsultationType::All
            || !self.specialties.is_empty()
            || self.sort != SortKey::None
            || !self.specialty_search.is_empty()
    }

    /// Whether `doctor` passes the name, consultation and specialty filters
    pub fn admits(&self, doctor: &Doctor) -> bool {
        let needle = self.search.to_lowercase();
        self.admits_with_needle(doctor, &needle)
    }

    fn admits_with_needle(&self, doctor: &Doctor, needle: &str) -> bool {
        if !needle.is_empty() && !doctor.name_contains(needle) {
            return false;
        }

        if !self.consultation.admits(doctor) {
            return false;
        }

        // Any selected specialty is enough.
        if !self.specialties.is_empty()
            && !self.specialties.iter().any(|s| doctor.has_speciality(s))
        {
            return false;
        }

        true
    }
}

/// Derives the visible list: filter, then stable-sort by the active key.
pub fn visible_doctors<'a>(doctors: &'a [Doctor], filters: &FilterState) -> Vec<&'a Doctor> {
    let needle = filters.search.to_lowercase();

    let mut visible: Vec<&Doctor> = doctors
        .iter()
        .filter(|doctor| filters.admits_with_needle(doctor, &needle))
        .collect();

    match filters.sort {
        SortKey::None => {}
        SortKey::Fees => visible.sort_by_key(|doctor| doctor.fee_amount()),
        SortKey::Experience => visible.sort_by_key(|doctor| Reverse(doctor.experience_years())),
    }

    visible
}
