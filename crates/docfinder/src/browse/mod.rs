mod address_bar;
mod command;

use crate::directory::{load_directory, Directory, DirectoryConfig};
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use docfinder_core::filter::{ConsultationType, SortKey};
use docfinder_core::listing::{build_listing, ListingOutput};
use docfinder_core::state::{reduce, Action, AppState};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

pub use address_bar::AddressBar;
pub use command::{parse_command, Command, HELP};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct BrowseOptions {
    /// URL query string to open (e.g. "specialty=Dentist&sort=fees")
    #[arg(short, long, default_value = "")]
    pub query: String,
}

/// An open directory view: loaded data, current state and history
pub struct Session {
    directory: Directory,
    state: AppState,
    address_bar: AddressBar,
}

impl Session {
    pub fn open(directory: Directory, query: &str) -> Self {
        let state = AppState::from_query(&directory.doctors, query);
        let address_bar = AddressBar::new(state.query());
        Self {
            directory,
            state,
            address_bar,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub fn address_bar(&self) -> &AddressBar {
        &self.address_bar
    }

    pub fn listing(&self) -> ListingOutput {
        build_listing(
            &self.directory.doctors,
            &self.directory.specialties,
            &self.state,
        )
    }

    /// Applies a command. Returns `false` once the session should end.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Act(action) => {
                self.dispatch(action);
                self.sync_address_bar();
            }
            Command::Open(query) => {
                self.dispatch(Action::Navigate(query));
                self.address_bar.push(self.state.query());
            }
            Command::Back => {
                if let Some(query) = self.address_bar.back().map(str::to_string) {
                    self.dispatch(Action::Navigate(query));
                }
            }
            Command::Forward => {
                if let Some(query) = self.address_bar.forward().map(str::to_string) {
                    self.dispatch(Action::Navigate(query));
                }
            }
            Command::Show | Command::Help => {}
            Command::Quit => return false,
        }
        true
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action, &self.directory.doctors);
    }

    /// Mirrors the filters into the current history entry
    fn sync_address_bar(&mut self) {
        let query = self.state.query();
        if query != self.address_bar.current() {
            log::debug!("Replacing address bar entry with ?{query}");
            self.address_bar.replace(query);
        }
    }

    pub fn render(&self) -> String {
        render_view(&self.listing(), &self.state)
    }
}

pub async fn run(options: BrowseOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Loading doctors from {}...", global.url);
    }

    let config = DirectoryConfig::from_global(&global);
    let mut session = open_session(&config, &options.query).await?;
    let mut stdout = tokio::io::stdout();
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut line = String::new();

    println!("{}", "Type 'help' for commands.".bright_black());
    print!("{}", session.render());

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            break; // EOF
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{}", message.yellow());
                continue;
            }
        };

        if command == Command::Help {
            println!("{HELP}");
            continue;
        }

        if !session.apply(command) {
            break;
        }

        print!("{}", session.render());
    }

    Ok(())
}

/// Loads the directory and opens it at `query`. Load failures are returned
/// untouched so they are reported once, by `main`.
pub async fn open_session(config: &DirectoryConfig, query: &str) -> Result<Session> {
    let directory = load_directory(config).await?;
    Ok(Session::open(directory, query))
}

fn render_view(listing: &ListingOutput, state: &AppState) -> String {
    let mut result = String::new();
    let filters = &state.filters;

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{} {}\n",
        "URL".bright_cyan().bold(),
        format!("?{}", listing.query).cyan()
    ));
    result.push_str(&format!(
        "{} [{}]\n",
        "Search".green(),
        filters.search.bright_white()
    ));

    if listing.show_suggestions {
        let highlighted = state.suggestions.cursor().index();
        for (idx, suggestion) in listing.suggestions.iter().enumerate() {
            if Some(idx) == highlighted {
                result.push_str(&format!("  > {}\n", suggestion.black().on_white()));
            } else {
                result.push_str(&format!("    {suggestion}\n"));
            }
        }
    }

    result.push_str(&format!(
        "{} {} | {} {}\n",
        "Sort".green(),
        match filters.sort {
            SortKey::None => "relevance",
            SortKey::Fees => "Price: Low-High",
            SortKey::Experience => "Experience: Most Experience first",
        },
        "Consultation".green(),
        match filters.consultation {
            ConsultationType::All => "All",
            ConsultationType::VideoConsult => "Video Consultation",
            ConsultationType::InClinic => "In-clinic Consultation",
        }
    ));

    if !filters.specialty_search.is_empty() {
        result.push_str(&format!(
            "{} [{}]\n",
            "Find specialty".green(),
            filters.specialty_search.bright_white()
        ));
    }

    let specialties: Vec<String> = listing
        .specialties
        .iter()
        .map(|name| {
            let mark = if filters.specialties.contains(name) {
                "x"
            } else {
                " "
            };
            format!("[{mark}] {name}")
        })
        .collect();
    result.push_str(&format!(
        "{}\n  {}\n",
        "Specialities".green(),
        if specialties.is_empty() {
            "(none)".to_string()
        } else {
            specialties.join("  ")
        }
    ));

    if listing.show_clear_all {
        result.push_str(&format!("{}\n", "Filters active: 'clear' to reset".yellow()));
    }

    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!(
            "{} of {} doctors",
            listing.visible_count, listing.total_doctors
        )
        .bright_white()
        .bold()
    ));

    if listing.doctors.is_empty() {
        result.push_str(&format!(
            "\n{}\n",
            "No doctors match your search criteria.".yellow()
        ));
    } else {
        for (idx, card) in listing.doctors.iter().enumerate() {
            result.push_str(&crate::list::format_card(idx + 1, card));
        }
    }

    result.push('\n');
    result
}
