use gt_api::client::{ApiError, GtApi};
use gt_api::MatchStatus;

#[tokio::test]
async fn list_teams_maps_loose_rows() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "ok": true,
                "rows": [
                    {"id": 1, "tournamentId": "t1", "name": "Atlas", "groupName": "A"},
                    {"id": "2", "tournamentId": "t1", "name": "Zenith"}
                ],
                "count": 2
            }"#,
        )
        .create_async()
        .await;

    let api = GtApi::with_base_url(server.url());
    let teams = api.list_teams("t1").await.expect("list should succeed");

    mock.assert_async().await;
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].id, "1");
    assert_eq!(teams[0].group_name, "A");
    assert_eq!(teams[1].name, "Zenith");
    assert_eq!(teams[1].group_name, "");
}

#[tokio::test]
async fn list_results_tolerates_half_entered_rows() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "ok": true,
                "rows": [
                    {"matchId": "m1", "homeScore": "2", "awayScore": 1, "status": "finished"},
                    {"matchId": "m2", "homeScore": "tbd", "status": "SCHEDULED"},
                    {"homeScore": 1, "awayScore": 1}
                ]
            }"#,
        )
        .create_async()
        .await;

    let api = GtApi::with_base_url(server.url());
    let results = api.list_results().await.expect("list should succeed");

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].home_score, Some(2));
    assert_eq!(results[0].status, Some(MatchStatus::Finished));
    assert_eq!(results[1].home_score, None);
    assert_eq!(results[2].match_id, "");
}

#[tokio::test]
async fn backend_rejection_surfaces_its_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": false, "error": "Unknown entity"}"#)
        .create_async()
        .await;

    let api = GtApi::with_base_url(server.url());
    let err = api.list_tournaments().await.expect_err("ok=false must fail");
    match err {
        ApiError::Rejected(msg) => assert_eq!(msg, "Unknown entity"),
        other => panic!("expected Rejected, got {other}"),
    }
}

#[tokio::test]
async fn http_error_status_is_fatal() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(500)
        .create_async()
        .await;

    let api = GtApi::with_base_url(server.url());
    let err = api.list_matches("t1").await.expect_err("500 must fail");
    assert!(matches!(err, ApiError::Http(..)));
}

#[tokio::test]
async fn unconfigured_client_reports_missing_backend() {
    let api = GtApi::default();
    let err = api.list_tournaments().await.expect_err("no backend configured");
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn snapshot_mode_serves_all_sheets_from_one_file() {
    let api = GtApi::with_snapshot(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../sample_snapshot.json"
    ));

    let tournaments = api.list_tournaments().await.expect("tournaments");
    assert!(!tournaments.is_empty());
    let tournament_id = tournaments[0].id.clone();

    let teams = api.list_teams(&tournament_id).await.expect("teams");
    let matches = api.list_matches(&tournament_id).await.expect("matches");
    let results = api.list_results().await.expect("results");

    assert!(!teams.is_empty());
    assert!(!matches.is_empty());
    assert!(!results.is_empty());
    assert!(matches.iter().all(|m| m.tournament_id == tournament_id));
}
