use crate::directory::{load_directory, DirectoryConfig};
use crate::prelude::{println, *};
use colored::Colorize;
use docfinder_core::suggest::suggestions;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SuggestOptions {
    /// Partial doctor name
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SuggestOutput {
    pub term: String,
    pub suggestions: Vec<String>,
}

pub async fn run(options: SuggestOptions, global: crate::Global) -> Result<()> {
    let config = DirectoryConfig::from_global(&global);
    let output = suggest_data(&config, options.term).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", format_suggestions(&output));
    }

    Ok(())
}

/// Public data function - used by both CLI and MCP
pub async fn suggest_data(config: &DirectoryConfig, term: String) -> Result<SuggestOutput> {
    let directory = load_directory(config).await?;
    Ok(SuggestOutput {
        suggestions: suggestions(&directory.doctors, &term),
        term,
    })
}

fn format_suggestions(output: &SuggestOutput) -> String {
    if output.suggestions.is_empty() {
        return format!("{}\n", "No matching doctors.".yellow());
    }

    output
        .suggestions
        .iter()
        .map(|name| format!("  {}\n", name.bright_white()))
        .collect()
}
