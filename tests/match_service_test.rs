mod common;

use lasertag_api::config::MatchPolicy;
use lasertag_api::entities::MatchStatus;
use lasertag_api::error::AppError;
use lasertag_api::services::{MatchService, ScoreUpdate};
use lasertag_api::utils::is_valid_game_id;

#[tokio::test]
async fn create_match_defaults() {
    let state = common::test_state(MatchPolicy::Permissive).await;

    let created = MatchService::create_match(&state.db, " Alice ", "Bob")
        .await
        .unwrap_or_default();

    assert!(is_valid_game_id(&created.game_id));
    assert_eq!(created.player1_name, "Alice");
    assert_eq!(created.player2_name, "Bob");
    assert_eq!(created.player1_score, 0);
    assert_eq!(created.player2_score, 0);
    assert_eq!(created.winner, None);
    assert_eq!(created.status, MatchStatus::InProgress.as_str());
    assert_eq!(created.ended_at, None);
}

#[tokio::test]
async fn create_match_rejects_blank_names_without_inserting() {
    let state = common::test_state(MatchPolicy::Permissive).await;

    for (p1, p2) in [("", "B"), ("A", ""), ("   ", "B")] {
        let result = MatchService::create_match(&state.db, p1, p2).await;
        assert!(matches!(result, Err(AppError::Validation(_))), "({p1:?}, {p2:?})");
    }

    // No row means nothing can show up as finished either
    let all = MatchService::list_finished(&state.db).await.unwrap_or_default();
    assert!(all.is_empty());
}

#[tokio::test]
async fn update_score_distinguishes_zero_from_absent() {
    let state = common::test_state(MatchPolicy::Permissive).await;
    let created = MatchService::create_match(&state.db, "A", "B")
        .await
        .unwrap_or_default();

    let updated = MatchService::update_score(
        &state.db,
        MatchPolicy::Permissive,
        &created.game_id,
        ScoreUpdate::new(Some(4), Some(2)),
    )
    .await
    .unwrap_or_default();
    assert_eq!((updated.player1_score, updated.player2_score), (4, 2));

    let updated = MatchService::update_score(
        &state.db,
        MatchPolicy::Permissive,
        &created.game_id,
        ScoreUpdate::new(None, Some(0)),
    )
    .await
    .unwrap_or_default();
    assert_eq!((updated.player1_score, updated.player2_score), (4, 0));

    let unchanged = MatchService::update_score(
        &state.db,
        MatchPolicy::Permissive,
        &created.game_id,
        ScoreUpdate::default(),
    )
    .await
    .unwrap_or_default();
    assert_eq!(unchanged, updated);
}

#[tokio::test]
async fn update_score_unknown_game_is_not_found() {
    let state = common::test_state(MatchPolicy::Permissive).await;
    let result = MatchService::update_score(
        &state.db,
        MatchPolicy::Permissive,
        "game_1_2",
        ScoreUpdate::new(Some(1), None),
    )
    .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn finished_match_policies() {
    let state = common::test_state(MatchPolicy::Permissive).await;
    let created = MatchService::create_match(&state.db, "A", "B")
        .await
        .unwrap_or_default();
    let ended = MatchService::end_match(
        &state.db,
        MatchPolicy::Permissive,
        &created.game_id,
        "A",
        ScoreUpdate::new(Some(5), Some(3)),
    )
    .await;
    assert!(ended.is_ok());

    let strict = MatchService::update_score(
        &state.db,
        MatchPolicy::Strict,
        &created.game_id,
        ScoreUpdate::new(Some(9), None),
    )
    .await;
    assert!(matches!(strict, Err(AppError::Conflict(_))));

    let strict_end = MatchService::end_match(
        &state.db,
        MatchPolicy::Strict,
        &created.game_id,
        "B",
        ScoreUpdate::default(),
    )
    .await;
    assert!(matches!(strict_end, Err(AppError::Conflict(_))));

    let permissive = MatchService::update_score(
        &state.db,
        MatchPolicy::Permissive,
        &created.game_id,
        ScoreUpdate::new(Some(9), None),
    )
    .await
    .unwrap_or_default();
    assert_eq!(permissive.player1_score, 9);
    assert!(permissive.is_finished());
}

#[tokio::test]
async fn end_match_twice_keeps_last_winner() {
    let state = common::test_state(MatchPolicy::Permissive).await;
    let created = MatchService::create_match(&state.db, "A", "B")
        .await
        .unwrap_or_default();

    for winner in ["A", "B"] {
        let ended = MatchService::end_match(
            &state.db,
            MatchPolicy::Permissive,
            &created.game_id,
            winner,
            ScoreUpdate::default(),
        )
        .await;
        assert!(ended.is_ok(), "winner {winner}");
    }

    let stored = MatchService::get_by_game_id(&state.db, &created.game_id)
        .await
        .unwrap_or_default();
    assert_eq!(stored.winner.as_deref(), Some("B"));
    assert!(stored.is_finished());
    assert!(stored.ended_at.is_some());
}

#[tokio::test]
async fn end_match_requires_winner() {
    let state = common::test_state(MatchPolicy::Permissive).await;
    let created = MatchService::create_match(&state.db, "A", "B")
        .await
        .unwrap_or_default();

    let result = MatchService::end_match(
        &state.db,
        MatchPolicy::Permissive,
        &created.game_id,
        "",
        ScoreUpdate::default(),
    )
    .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn mark_finished_leaves_winner_and_is_idempotent() {
    let state = common::test_state(MatchPolicy::Permissive).await;
    let created = MatchService::create_match(&state.db, "A", "B")
        .await
        .unwrap_or_default();

    let first = MatchService::mark_finished(&state.db, &created.game_id)
        .await
        .unwrap_or_default();
    assert!(first.is_finished());
    assert_eq!(first.winner, None);

    let second = MatchService::mark_finished(&state.db, &created.game_id)
        .await
        .unwrap_or_default();
    assert_eq!(second.ended_at, first.ended_at);
}

#[tokio::test]
async fn list_finished_is_ordered_and_filtered() {
    let state = common::test_state(MatchPolicy::Permissive).await;

    let mut ids = Vec::new();
    for i in 0..4 {
        let created = MatchService::create_match(&state.db, &format!("A{i}"), "B")
            .await
            .unwrap_or_default();
        ids.push(created.game_id);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    // Leave the second match in progress
    for game_id in [&ids[0], &ids[2], &ids[3]] {
        let ended = MatchService::end_match(
            &state.db,
            MatchPolicy::Permissive,
            game_id,
            "A",
            ScoreUpdate::default(),
        )
        .await;
        assert!(ended.is_ok());
    }

    let finished = MatchService::list_finished(&state.db)
        .await
        .unwrap_or_default();

    assert_eq!(finished.len(), 3);
    assert!(finished.iter().all(lasertag_api::entities::match_record::Model::is_finished));
    assert!(
        finished
            .windows(2)
            .all(|pair| pair[0].started_at >= pair[1].started_at)
    );
    assert_eq!(finished[0].game_id, ids[3]);
    assert_eq!(finished[2].game_id, ids[0]);
}
