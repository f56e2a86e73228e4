use crate::directory::{load_directory, Directory, DirectoryConfig};
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use docfinder_core::filter::{ConsultationType, FilterState, SortKey};
use docfinder_core::listing::{build_listing, DoctorCard, ListingOutput};
use docfinder_core::query;
use docfinder_core::state::AppState;

#[derive(Debug, Clone, Copy, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Consultation {
    /// Doctors offering video consultations
    Video,
    /// Doctors seeing patients in clinic
    Clinic,
    /// No constraint
    All,
}

impl From<Consultation> for ConsultationType {
    fn from(c: Consultation) -> Self {
        match c {
            Consultation::Video => ConsultationType::VideoConsult,
            Consultation::Clinic => ConsultationType::InClinic,
            Consultation::All => ConsultationType::All,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    /// Lowest fee first
    Fees,
    /// Most experienced first
    Experience,
}

impl From<Sort> for SortKey {
    fn from(s: Sort) -> Self {
        match s {
            Sort::Fees => SortKey::Fees,
            Sort::Experience => SortKey::Experience,
        }
    }
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone, Default)]
#[command(after_help = "EXAMPLES:
  # Video consultations, cheapest first:
  docfinder list --consultation video --sort fees

  # Any of several specialties:
  docfinder list --specialty Dentist --specialty \"Dietitian/Nutritionist\"

  # Reopen a shared link:
  docfinder list --query \"search=rao&specialty=ENT&sort=experience\"

NOTES:
  - Name search is a case-insensitive substring match
  - Selecting several specialties shows doctors with ANY of them
  - Flags override the matching parameters of --query")]
pub struct ListOptions {
    /// Case-insensitive name search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Consultation mode
    #[arg(short, long, value_enum)]
    pub consultation: Option<Consultation>,

    /// Specialty to include (repeatable)
    #[arg(long = "specialty", value_name = "NAME")]
    pub specialties: Vec<String>,

    /// Sort order
    #[arg(long, value_enum)]
    pub sort: Option<Sort>,

    /// URL query string to start from (e.g. "search=rao&sort=fees")
    #[arg(short, long)]
    pub query: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListOptions {
    /// Filter state described by the options: `--query` first, then flags
    pub fn filters(&self) -> FilterState {
        let mut filters = self
            .query
            .as_deref()
            .map(query::decode)
            .unwrap_or_default();

        if let Some(search) = &self.search {
            filters.search = search.clone();
        }
        if let Some(consultation) = self.consultation {
            filters.consultation = consultation.into();
        }
        filters
            .specialties
            .extend(self.specialties.iter().filter(|s| !s.is_empty()).cloned());
        if let Some(sort) = self.sort {
            filters.sort = sort.into();
        }

        filters
    }
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Loading doctors from {}...", global.url);
    }

    let config = DirectoryConfig::from_global(&global);
    let listing = list_doctors_data(&config, &options.filters()).await?;

    if options.json {
        println!("{}", format_listing_json(&listing)?);
    } else {
        print!("{}", format_listing_text(&listing));
    }

    Ok(())
}

/// Public data function - used by both CLI and MCP
pub async fn list_doctors_data(
    config: &DirectoryConfig,
    filters: &FilterState,
) -> Result<ListingOutput> {
    let directory = load_directory(config).await?;
    Ok(listing_for(&directory, filters))
}

/// Listing for a loaded directory, as if the user had opened the encoded URL
pub fn listing_for(directory: &Directory, filters: &FilterState) -> ListingOutput {
    let mut state = AppState::from_query(&directory.doctors, &query::encode(filters));
    state.filters.specialty_search = filters.specialty_search.clone();
    build_listing(&directory.doctors, &directory.specialties, &state)
}

fn format_listing_json(listing: &ListingOutput) -> Result<String> {
    serde_json::to_string_pretty(listing).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// One doctor card as colored text
pub fn format_card(index: usize, card: &DoctorCard) -> String {
    let mut result = String::new();

    result.push_str(&format!(
        "\n{} {}\n",
        format!("[{index}]").yellow().bold(),
        format!("Dr. {}", card.name).white().bold()
    ));
    result.push_str(&format!("    {}\n", card.specialities.bright_white()));
    result.push_str(&format!("    {}\n", card.qualification.bright_black()));

    if let Some(experience) = &card.experience {
        result.push_str(&format!(
            "    {}: {}\n",
            "Experience".green(),
            experience.bright_magenta()
        ));
    }

    let mut modes = Vec::new();
    if card.video_consult {
        modes.push("Video Consult");
    }
    if card.in_clinic {
        modes.push("In-Clinic");
    }
    if !modes.is_empty() {
        result.push_str(&format!(
            "    {}: {}\n",
            "Consultation".green(),
            modes.join(" | ").cyan()
        ));
    }

    result.push_str(&format!(
        "    {}: {} | {}: {}\n",
        "Clinic".green(),
        card.clinic.bright_white(),
        "Locality".green(),
        card.locality.bright_white()
    ));

    result.push_str(&format!(
        "    {}: {}\n",
        "Fee".green(),
        card.fees
            .as_deref()
            .unwrap_or("Not listed")
            .bright_yellow()
            .bold()
    ));

    result
}

fn format_listing_text(listing: &ListingOutput) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!(
            "DOCTORS ({} of {})",
            listing.visible_count, listing.total_doctors
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if listing.doctors.is_empty() {
        result.push_str(&format!(
            "\n{}\n",
            "No doctors match your search criteria.".yellow()
        ));
    } else {
        for (idx, card) in listing.doctors.iter().enumerate() {
            result.push_str(&format_card(idx + 1, card));
        }
    }

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&format!("{}\n", "FILTERS".bright_yellow().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_yellow()));

    if listing.query.is_empty() {
        result.push_str(&format!("\n{}\n", "No filters applied.".bright_white()));
    } else {
        result.push_str(&format!(
            "\n{}: {}\n",
            "Query".green(),
            format!("?{}", listing.query).cyan()
        ));
        result.push_str(&format!(
            "\n{}:\n  {}\n",
            "To reopen this view".bright_white().bold(),
            format!("docfinder list --query \"{}\"", listing.query).cyan()
        ));
    }

    result.push_str(&format!(
        "\n{}:\n  {}\n",
        "To see all specialties".bright_white().bold(),
        "docfinder specialties".cyan()
    ));
    result.push_str(&format!(
        "\n{}:\n  {}\n",
        "To get JSON output".bright_white().bold(),
        "docfinder list --json".cyan()
    ));

    result.push('\n');
    result
}
