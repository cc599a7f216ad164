use crate::state::messages::{NetworkRequest, NetworkResponse};
use gt_api::client::{ApiError, GtApi};
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

pub struct NetworkWorker {
    client: GtApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
    /// Tournament whose standings were requested last, so the periodic
    /// parameterless refresh knows what to re-fetch.
    last_tournament: Option<String>,
}

impl NetworkWorker {
    pub fn new(
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client: GtApi::from_env(),
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
            last_tournament: None,
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let standings_target = match request {
                NetworkRequest::LoadTournaments => None,
                NetworkRequest::LoadStandings { tournament_id } => Some(tournament_id),
                NetworkRequest::RefreshStandings => {
                    // Nothing loaded yet — nothing to refresh.
                    let Some(tournament_id) = self.last_tournament.clone() else {
                        continue;
                    };
                    Some(tournament_id)
                }
            };

            self.start_loading_animation().await;

            let result = match standings_target {
                None => self.handle_load_tournaments().await,
                Some(tournament_id) => {
                    self.last_tournament = Some(tournament_id.clone());
                    self.handle_load_standings(tournament_id).await
                }
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_tournaments(&self) -> Result<NetworkResponse, ApiError> {
        debug!("loading tournament list");
        let tournaments = self.client.list_tournaments().await?;
        // Venue/referee lookups are optional. A failed fetch leaves the
        // tables empty instead of failing the whole load.
        let venues = self.client.list_venues().await.unwrap_or_default();
        let referees = self.client.list_referees().await.unwrap_or_default();
        Ok(NetworkResponse::TournamentsLoaded { tournaments, venues, referees })
    }

    /// The three standings inputs are fetched concurrently but joined
    /// before anything is sent on: if any one fails the whole snapshot is
    /// abandoned and a single error surfaces. No partial aggregation, no
    /// mixing stale and fresh collections.
    async fn handle_load_standings(
        &self,
        tournament_id: String,
    ) -> Result<NetworkResponse, ApiError> {
        debug!("loading standings snapshot for tournament {tournament_id}");
        let (teams, matches, results) = tokio::try_join!(
            self.client.list_teams(&tournament_id),
            self.client.list_matches(&tournament_id),
            self.client.list_results(),
        )?;
        Ok(NetworkResponse::StandingsData { tournament_id, teams, matches, results })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
