use tui::Frame;
use tui::Terminal;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::Line;
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};

use crate::app::{App, MenuItem};
use crate::standings::GroupStandings;
use crate::state::network::{ERROR_CHAR, LoadingState};
use gt_api::{Match, MatchResult};
use std::collections::HashMap;

static TABS: &[&str; 3] = &["Standings", "Matches", "Teams"];

const TAB_BAR_HEIGHT: u16 = 3;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 6 {
        return;
    }

    terminal
        .draw(|f| {
            let (tab_bar, status_bar, main) = split_screen(f.area(), app.settings.full_screen);

            if !app.settings.full_screen {
                draw_tabs(f, tab_bar, app);
                draw_status_line(f, status_bar, app);
            }

            match app.state.active_tab {
                MenuItem::Standings => draw_standings(f, main, app),
                MenuItem::Matches => draw_matches(f, main, app),
                MenuItem::Teams => draw_teams(f, main, app),
                MenuItem::Help => draw_placeholder(
                    f,
                    main,
                    "Help: q=quit  1=Standings  2=Matches  3=Teams  t/T=tournament  r=refresh  j/k=scroll  f=fullscreen  ?=help",
                ),
            }

            draw_loading_spinner(f, f.area(), app, loading);
        })
        .unwrap();
}

/// Tab bar on top, a one-line status strip under it, content below.
/// Full-screen mode hands the whole area to the content.
fn split_screen(area: Rect, full_screen: bool) -> ([Rect; 2], Rect, Rect) {
    if full_screen {
        let [main] = Layout::vertical([Constraint::Fill(1)]).areas(area);
        return ([Rect::ZERO, Rect::ZERO], Rect::ZERO, main);
    }
    let [tab, status, main] = Layout::vertical([
        Constraint::Length(TAB_BAR_HEIGHT),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    let tab_bar =
        Layout::horizontal([Constraint::Percentage(85), Constraint::Percentage(15)]).areas(tab);
    (tab_bar, status, main)
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Standings => 0,
        MenuItem::Matches => 1,
        MenuItem::Teams => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

/// One line under the tabs: selected tournament, refresh stamp, last error.
fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let data = &app.state.data;
    let text = if let Some(err) = app.state.last_error.as_deref() {
        format!(" {err}")
    } else if let Some(t) = data.selected_tournament() {
        let refreshed = data
            .last_refreshed
            .as_deref()
            .map(|at| format!("refreshed {at}"))
            .unwrap_or_else(|| "loading...".to_string());
        format!(
            " {} [{}] | {} | t/T to switch tournament | {refreshed}",
            t.name, t.status, t.format
        )
    } else {
        " Loading tournaments...".to_string()
    };

    let style = if app.state.last_error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}

// ---------------------------------------------------------------------------
// Standings view
// ---------------------------------------------------------------------------

fn draw_standings(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Standings ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let data = &app.state.data;
    if data.standings.is_empty() {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("Standings unavailable:\n{err}")
        } else if data.last_refreshed.is_some() {
            "No teams registered in this tournament yet".to_string()
        } else {
            "Loading standings data...".to_string()
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let lines = standings_lines(&data.standings);
    draw_scrolled_lines(f, inner, &lines, app.state.standings_view.scroll_offset);
}

/// Flatten the ranked groups into display lines: a title and column header
/// per group, one row per team, raw values only.
fn standings_lines(standings: &[GroupStandings]) -> Vec<String> {
    let mut lines = Vec::new();
    for group in standings {
        let label = if group.group.is_empty() { "-" } else { group.group.as_str() };
        lines.push(format!("Group: {label}"));
        lines.push(format!(
            "  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
            "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
        ));
        for row in &group.rows {
            lines.push(format!(
                "  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
                clip(&row.name, 24),
                row.played,
                row.wins,
                row.draws,
                row.losses,
                row.gf,
                row.ga,
                row.gd,
                row.points
            ));
        }
        lines.push(String::new());
    }
    lines
}

// ---------------------------------------------------------------------------
// Matches view
// ---------------------------------------------------------------------------

fn draw_matches(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Matches ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let data = &app.state.data;
    if data.matches.is_empty() {
        f.render_widget(
            Paragraph::new("No matches scheduled in this tournament")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    // Name lookups are rebuilt per draw from the fetched collections; the
    // draw layer holds no caches of its own.
    let team_names: HashMap<&str, &str> = data
        .teams
        .iter()
        .map(|t| (t.id.as_str(), t.name.as_str()))
        .collect();
    let venue_names: HashMap<&str, &str> = data
        .venues
        .iter()
        .map(|v| (v.id.as_str(), v.name.as_str()))
        .collect();
    let referee_names: HashMap<&str, &str> = data
        .referees
        .iter()
        .map(|r| (r.id.as_str(), r.full_name.as_str()))
        .collect();
    let results = crate::standings::result_index(&data.results);

    let lines: Vec<String> = data
        .matches
        .iter()
        .map(|m| match_line(m, &team_names, &venue_names, &referee_names, &results))
        .collect();
    draw_scrolled_lines(f, inner, &lines, app.state.matches_view.scroll_offset);
}

fn match_line(
    m: &Match,
    team_names: &HashMap<&str, &str>,
    venue_names: &HashMap<&str, &str>,
    referee_names: &HashMap<&str, &str>,
    results: &HashMap<&str, &MatchResult>,
) -> String {
    let resolve = |names: &HashMap<&str, &str>, id: &str| -> String {
        names.get(id).map(|n| n.to_string()).unwrap_or_else(|| id.to_string())
    };
    let home = resolve(team_names, &m.home_team_id);
    let away = resolve(team_names, &m.away_team_id);

    let result = results.get(m.id.as_str());
    let score = result
        .and_then(|r| r.home_score.zip(r.away_score))
        .map(|(h, a)| format!("{h}-{a}"))
        .unwrap_or_else(|| "--".to_string());
    // Same precedence as the standings fold: the result's status wins.
    let status = result
        .and_then(|r| r.status)
        .unwrap_or(m.status);

    let venue = m
        .venue_id
        .as_deref()
        .map(|id| resolve(venue_names, id))
        .unwrap_or_default();
    let referee = m
        .referee_id
        .as_deref()
        .map(|id| resolve(referee_names, id))
        .unwrap_or_default();
    let kickoff = m
        .start_time
        .map(|t| t.format("%m/%d %H:%M").to_string())
        .unwrap_or_default();

    format!(
        "{:<6} {:<3} {:<20} {:>5} {:<20} {:<14} {:<16} {:<11} [{}]",
        clip(&m.stage, 6),
        clip(&m.group_name, 3),
        clip(&home, 20),
        score,
        clip(&away, 20),
        clip(&venue, 14),
        clip(&referee, 16),
        kickoff,
        status.label()
    )
}

// ---------------------------------------------------------------------------
// Teams view
// ---------------------------------------------------------------------------

fn draw_teams(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Teams ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let data = &app.state.data;
    if data.teams.is_empty() {
        f.render_widget(
            Paragraph::new("No teams registered in this tournament")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let mut lines = Vec::with_capacity(data.teams.len() + 1);
    lines.push(format!(
        "{:<16} {:<24} {:<6} {:<20} {}",
        "Id", "Name", "Group", "Coach", "Phone"
    ));
    for team in &data.teams {
        lines.push(format!(
            "{:<16} {:<24} {:<6} {:<20} {}",
            clip(&team.id, 16),
            clip(&team.name, 24),
            clip(&team.group_name, 6),
            clip(team.coach_name.as_deref().unwrap_or(""), 20),
            team.phone.as_deref().unwrap_or("")
        ));
    }
    draw_scrolled_lines(f, inner, &lines, app.state.teams_view.scroll_offset);
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn draw_scrolled_lines(f: &mut Frame, area: Rect, lines: &[String], scroll_offset: u16) {
    let visible: Vec<&str> = lines
        .iter()
        .skip(scroll_offset as usize)
        .take(area.height as usize)
        .map(String::as_str)
        .collect();
    f.render_widget(Paragraph::new(visible.join("\n")), area);
}

fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings::TeamStats;
    use gt_api::MatchStatus;

    #[test]
    fn standings_lines_label_the_ungrouped_bucket_with_a_dash() {
        let standings = [GroupStandings {
            group: String::new(),
            rows: vec![TeamStats {
                team_id: "a".into(),
                name: "Atlas".into(),
                ..Default::default()
            }],
        }];
        let lines = standings_lines(&standings);
        assert_eq!(lines[0], "Group: -");
        assert!(lines[2].contains("Atlas"));
    }

    #[test]
    fn match_line_prefers_result_status_and_falls_back_to_ids() {
        let m = Match {
            id: "m1".into(),
            stage: "GROUP".into(),
            group_name: "A".into(),
            home_team_id: "unknown-home".into(),
            away_team_id: "unknown-away".into(),
            status: MatchStatus::Scheduled,
            ..Default::default()
        };
        let result = MatchResult {
            match_id: "m1".into(),
            home_score: Some(2),
            away_score: Some(1),
            status: Some(MatchStatus::Finished),
        };
        let results = HashMap::from([("m1", &result)]);

        let line = match_line(&m, &HashMap::new(), &HashMap::new(), &HashMap::new(), &results);
        assert!(line.contains("2-1"));
        assert!(line.contains("[FINISHED]"));
        assert!(line.contains("unknown-home"), "unmapped ids stay visible");
    }
}
