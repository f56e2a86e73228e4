//! Line commands understood by the interactive browser.

use docfinder_core::filter::{ConsultationType, SortKey};
use docfinder_core::state::Action;
use docfinder_core::suggest::Key;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A user interaction on the directory view
    Act(Action),
    /// Open a query as a new history entry
    Open(String),
    Back,
    Forward,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
search <text>     set the search box (no text clears it)
submit            submit the search box
focus | blur      focus or leave the search box
down | up         move through suggestions
enter | esc       choose the highlighted suggestion, or dismiss the list
pick <name>       choose a suggestion by name
video | clinic    toggle a consultation mode
all               show all consultation modes
spec <name>       toggle a specialty
find <text>       narrow the specialty list
sort fees|experience
                  toggle a sort order
clear             clear all filters
open <query>      open a query string as a new page
back | forward    move through history
show | help | quit";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let act = |action: Action| -> Result<Command, String> { Ok(Command::Act(action)) };

    match word.to_lowercase().as_str() {
        "search" | "type" => act(Action::SetSearch(rest.to_string())),
        "submit" => act(Action::SubmitSearch),
        "focus" => act(Action::Focus),
        "blur" => act(Action::Blur),
        "down" => act(Action::Key(Key::Down)),
        "up" => act(Action::Key(Key::Up)),
        "enter" => act(Action::Key(Key::Enter)),
        "esc" | "escape" => act(Action::Key(Key::Escape)),
        "pick" => required(rest, "pick <name>")
            .and_then(|name| act(Action::PickSuggestion(name))),
        "video" => act(Action::ToggleConsultation(ConsultationType::VideoConsult)),
        "clinic" => act(Action::ToggleConsultation(ConsultationType::InClinic)),
        "all" => act(Action::ShowAllConsultations),
        "spec" | "specialty" => required(rest, "spec <name>")
            .and_then(|name| act(Action::ToggleSpecialty(name))),
        "find" => act(Action::SetSpecialtySearch(rest.to_string())),
        "sort" => match rest {
            "fees" => act(Action::ToggleSort(SortKey::Fees)),
            "experience" => act(Action::ToggleSort(SortKey::Experience)),
            _ => Err("Usage: sort fees|experience".to_string()),
        },
        "clear" => act(Action::ClearAll),
        "open" => Ok(Command::Open(rest.to_string())),
        "back" => Ok(Command::Back),
        "forward" => Ok(Command::Forward),
        "show" | "" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("Unknown command: {other}. Type 'help' for commands.")),
    }
}

fn required(value: &str, usage: &str) -> Result<String, String> {
    if value.is_empty() {
        Err(format!("Usage: {usage}"))
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        assert_eq!(
            parse_command("search dr rao"),
            Ok(Command::Act(Action::SetSearch("dr rao".to_string())))
        );
        assert_eq!(
            parse_command("search"),
            Ok(Command::Act(Action::SetSearch(String::new())))
        );
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!(parse_command("down"), Ok(Command::Act(Action::Key(Key::Down))));
        assert_eq!(parse_command("UP"), Ok(Command::Act(Action::Key(Key::Up))));
        assert_eq!(
            parse_command("esc"),
            Ok(Command::Act(Action::Key(Key::Escape)))
        );
    }

    #[test]
    fn test_parse_specialty_keeps_spaces_and_slashes() {
        assert_eq!(
            parse_command("spec   Dietitian/Nutritionist  "),
            Ok(Command::Act(Action::ToggleSpecialty(
                "Dietitian/Nutritionist".to_string()
            )))
        );
        assert_eq!(
            parse_command("spec General Physician"),
            Ok(Command::Act(Action::ToggleSpecialty(
                "General Physician".to_string()
            )))
        );
        assert!(parse_command("spec").is_err());
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(
            parse_command("sort fees"),
            Ok(Command::Act(Action::ToggleSort(SortKey::Fees)))
        );
        assert!(parse_command("sort rating").is_err());
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(
            parse_command("open search=a&sort=fees"),
            Ok(Command::Open("search=a&sort=fees".to_string()))
        );
        assert_eq!(parse_command("back"), Ok(Command::Back));
        assert_eq!(parse_command(""), Ok(Command::Show));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_unknown() {
        let err = parse_command("teleport").unwrap_err();
        assert!(err.contains("Unknown command: teleport"));
    }
}
