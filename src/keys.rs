use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Standings),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Matches),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Teams),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Tournament selector — reload standings for the new selection.
        (_, Char('t'), _) => {
            if let Some(tournament_id) = guard.cycle_tournament(1) {
                drop(guard);
                let _ = network_requests
                    .send(NetworkRequest::LoadStandings { tournament_id })
                    .await;
            }
        }
        (_, Char('T'), _) => {
            if let Some(tournament_id) = guard.cycle_tournament(-1) {
                drop(guard);
                let _ = network_requests
                    .send(NetworkRequest::LoadStandings { tournament_id })
                    .await;
            }
        }

        // Manual refresh of the current tournament.
        (_, Char('r'), _) => {
            if let Some(tournament_id) = guard.selected_tournament_id() {
                drop(guard);
                let _ = network_requests
                    .send(NetworkRequest::LoadStandings { tournament_id })
                    .await;
            }
        }

        // Scrolling
        (_, Char('j') | KeyCode::Down, _) => guard.scroll_down(),
        (_, Char('k') | KeyCode::Up, _) => guard.scroll_up(),

        (_, Char('f'), _) => guard.toggle_full_screen(),

        _ => {}
    }
}
