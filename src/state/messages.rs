use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use gt_api::{Match, MatchResult, Referee, Team, Tournament, Venue};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    /// Startup load: tournament list plus venue/referee lookup tables.
    LoadTournaments,
    /// Fetch one tournament's teams, matches, and results, all three
    /// together — the standings snapshot.
    LoadStandings { tournament_id: String },
    /// Periodic re-fetch of whatever tournament was loaded last.
    RefreshStandings,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged {
        loading_state: LoadingState,
    },
    TournamentsLoaded {
        tournaments: Vec<Tournament>,
        venues: Vec<Venue>,
        referees: Vec<Referee>,
    },
    /// The three collections of one standings computation, delivered only
    /// as a complete set — a failed fetch of any one produces `Error`
    /// instead, never a partial snapshot.
    StandingsData {
        tournament_id: String,
        teams: Vec<Team>,
        matches: Vec<Match>,
        results: Vec<MatchResult>,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
