use crate::directory::{load_directory, Directory, DirectoryConfig};
use crate::prelude::{println, *};
use docfinder_core::catalog::{filter_catalog, specialty_test_id};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone, Default)]
pub struct SpecialtiesOptions {
    /// Only show specialties containing this text (case-insensitive)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SpecialtyEntry {
    pub name: String,
    pub doctors: usize,
    pub id: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SpecialtiesOutput {
    pub total: usize,
    pub specialties: Vec<SpecialtyEntry>,
}

pub async fn run(options: SpecialtiesOptions, global: crate::Global) -> Result<()> {
    let config = DirectoryConfig::from_global(&global);
    let output = specialties_data(&config, options.filter.as_deref().unwrap_or("")).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "Found {} of {} specialties:\n",
        output.specialties.len(),
        output.total
    );

    if output.specialties.is_empty() {
        println!("No specialties match.");
        return Ok(());
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["Specialty", "Doctors", "Filter"]);

    for entry in &output.specialties {
        table.add_row(prettytable::row![
            &entry.name,
            entry.doctors,
            format!("--specialty \"{}\"", entry.name)
        ]);
    }

    table.printstd();

    Ok(())
}

/// Public data function - used by both CLI and MCP
pub async fn specialties_data(config: &DirectoryConfig, filter: &str) -> Result<SpecialtiesOutput> {
    let directory = load_directory(config).await?;
    Ok(summarize_specialties(&directory, filter))
}

/// Catalog entries matching `filter`, with how many doctors practise each
pub fn summarize_specialties(directory: &Directory, filter: &str) -> SpecialtiesOutput {
    let specialties = filter_catalog(&directory.specialties, filter)
        .into_iter()
        .map(|name| SpecialtyEntry {
            name: name.to_string(),
            doctors: directory
                .doctors
                .iter()
                .filter(|d| d.has_speciality(name))
                .count(),
            id: specialty_test_id(name),
        })
        .collect();

    SpecialtiesOutput {
        total: directory.specialties.len(),
        specialties,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docfinder_core::doctor::{Doctor, Speciality};

    fn doctor(specialities: &[&str]) -> Doctor {
        Doctor {
            specialities: specialities
                .iter()
                .map(|s| Speciality {
                    name: s.to_string(),
                })
                .collect(),
            ..Default::default()
        }
    }

    fn create_test_directory() -> Directory {
        Directory::new(vec![
            doctor(&["Dentist", "Dietitian/Nutritionist"]),
            doctor(&["Dentist"]),
            doctor(&["ENT"]),
        ])
    }

    #[test]
    fn test_summarize_all() {
        let output = summarize_specialties(&create_test_directory(), "");

        assert_eq!(output.total, 3);
        let names: Vec<&str> = output.specialties.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Dentist", "Dietitian/Nutritionist", "ENT"]);
        assert_eq!(output.specialties[0].doctors, 2);
        assert_eq!(
            output.specialties[1].id,
            "filter-specialty-Dietitian-Nutritionist"
        );
    }

    #[test]
    fn test_summarize_filtered() {
        let output = summarize_specialties(&create_test_directory(), "DI");

        assert_eq!(output.total, 3);
        let names: Vec<&str> = output.specialties.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Dietitian/Nutritionist"]);
    }

    #[test]
    fn test_summarize_no_match() {
        let output = summarize_specialties(&create_test_directory(), "neuro");
        assert!(output.specialties.is_empty());
    }
}
