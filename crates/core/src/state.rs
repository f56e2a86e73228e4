//! Directory view state and its transition function.
//!
//! Every user interaction is an [`Action`]; [`reduce`] turns the current
//! [`AppState`] and an action into the next state. The doctor list is passed
//! in rather than stored because it is loaded once and never changes.

use crate::doctor::Doctor;
use crate::filter::{ConsultationType, FilterState, SortKey};
use crate::query;
use crate::suggest::{Key, KeyOutcome, SuggestionBox};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Action {
    /// Search box text changed
    SetSearch(String),
    /// Search form submitted
    SubmitSearch,
    Focus,
    Blur,
    Key(Key),
    /// A suggestion was clicked
    PickSuggestion(String),
    /// Consultation radio chosen; choosing the active mode again clears it
    ToggleConsultation(ConsultationType),
    /// The "All" consultation radio
    ShowAllConsultations,
    ToggleSpecialty(String),
    SetSpecialtySearch(String),
    /// Sort radio chosen; choosing the active key again clears it
    ToggleSort(SortKey),
    ClearAll,
    /// The URL changed from outside (initial load, back/forward, pasted link)
    Navigate(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppState {
    pub filters: FilterState,
    pub suggestions: SuggestionBox,
    pub focused: bool,
}

impl AppState {
    /// State for a directory opened at `query`
    pub fn from_query(doctors: &[Doctor], query: &str) -> Self {
        reduce(Self::default(), Action::Navigate(query.to_string()), doctors)
    }

    /// Query string mirroring the current filters
    pub fn query(&self) -> String {
        query::encode(&self.filters)
    }

    /// Whether the clear-all action should be offered
    pub fn has_active_filters(&self) -> bool {
        self.filters.is_active()
    }
}

pub fn reduce(mut state: AppState, action: Action, doctors: &[Doctor]) -> AppState {
    match action {
        Action::SetSearch(term) => {
            state.filters.search = term;
            refresh_suggestions(&mut state, doctors);
        }
        Action::SubmitSearch => state.suggestions.hide(),
        Action::Focus => {
            state.focused = true;
            if !state.filters.search.is_empty() {
                state.suggestions.show();
            }
        }
        Action::Blur => {
            state.focused = false;
            state.suggestions.hide();
        }
        Action::Key(key) => {
            if let KeyOutcome::Commit(choice) = state.suggestions.key(key) {
                commit_suggestion(&mut state, choice, doctors);
            }
        }
        Action::PickSuggestion(choice) => commit_suggestion(&mut state, choice, doctors),
        Action::ToggleConsultation(mode) => {
            state.filters.consultation = if state.filters.consultation == mode {
                ConsultationType::All
            } else {
                mode
            };
        }
        Action::ShowAllConsultations => state.filters.consultation = ConsultationType::All,
        Action::ToggleSpecialty(name) if name.is_empty() => {}
        Action::ToggleSpecialty(name) => {
            if !state.filters.specialties.remove(&name) {
                state.filters.specialties.insert(name);
            }
        }
        Action::SetSpecialtySearch(term) => state.filters.specialty_search = term,
        Action::ToggleSort(key) => {
            state.filters.sort = if state.filters.sort == key {
                SortKey::None
            } else {
                key
            };
        }
        Action::ClearAll => {
            state.filters = FilterState::default();
            refresh_suggestions(&mut state, doctors);
        }
        Action::Navigate(raw) => {
            let mut filters = query::decode(&raw);
            filters.specialty_search = std::mem::take(&mut state.filters.specialty_search);
            let search_changed = filters.search != state.filters.search;
            state.filters = filters;
            if search_changed {
                refresh_suggestions(&mut state, doctors);
            }
        }
    }

    state
}

fn refresh_suggestions(state: &mut AppState, doctors: &[Doctor]) {
    state.suggestions = SuggestionBox::refresh(doctors, &state.filters.search, state.focused);
}

fn commit_suggestion(state: &mut AppState, choice: String, doctors: &[Doctor]) {
    state.filters.search = choice;
    refresh_suggestions(state, doctors);
    state.suggestions.hide();
}
