use crate::prelude::*;
use docfinder_core::catalog::specialty_catalog;
use docfinder_core::doctor::Doctor;

pub const DEFAULT_DIRECTORY_URL: &str =
    "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

/// Where the directory is loaded from
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub url: String,
}

impl DirectoryConfig {
    pub fn from_global(global: &crate::Global) -> Self {
        Self {
            url: global.url.clone(),
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DIRECTORY_URL.to_string(),
        }
    }
}

/// The loaded doctor list and its specialty catalog. Read-only after load.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    pub doctors: Vec<Doctor>,
    pub specialties: Vec<String>,
}

impl Directory {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        let specialties = specialty_catalog(&doctors);
        Self {
            doctors,
            specialties,
        }
    }
}

/// Fetches the doctor list once and derives the specialty catalog
pub async fn load_directory(config: &DirectoryConfig) -> Result<Directory, LoadError> {
    let client = reqwest::Client::new();
    let doctors = fetch_doctors(&client, &config.url).await?;
    let directory = Directory::new(doctors);

    log::info!(
        "Loaded {} doctors across {} specialties",
        directory.doctors.len(),
        directory.specialties.len()
    );

    Ok(directory)
}

pub async fn fetch_doctors(client: &reqwest::Client, url: &str) -> Result<Vec<Doctor>, LoadError> {
    log::debug!("Fetching doctor directory from {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    if !response.status().is_success() {
        return Err(LoadError::Status(response.status().as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    serde_json::from_str(&body).map_err(|e| LoadError::Decode(e.to_string()))
}
