//! Specialty catalog derived from the loaded doctors.

use crate::doctor::Doctor;
use std::collections::BTreeSet;

/// Unique specialty names across all doctors, sorted ascending
pub fn specialty_catalog(doctors: &[Doctor]) -> Vec<String> {
    doctors
        .iter()
        .flat_map(Doctor::speciality_names)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Catalog entries containing `term`, case-insensitively. An empty term
/// keeps the whole catalog.
pub fn filter_catalog<'a>(catalog: &'a [String], term: &str) -> Vec<&'a str> {
    let needle = term.to_lowercase();
    catalog
        .iter()
        .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

/// Stable element id for a specialty checkbox.
///
/// Slashes are not valid in the ids the test harness expects, so
/// `Dietitian/Nutritionist` becomes `filter-specialty-Dietitian-Nutritionist`.
pub fn specialty_test_id(specialty: &str) -> String {
    format!("filter-specialty-{}", specialty.replace('/', "-"))
}
