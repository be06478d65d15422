use bolao::domain::pick::Pick;
use bolao::domain::FIXTURE_COUNT;
use bolao::repos::submissions;

use crate::support::factory::{participant, test_cup_fixtures};
use crate::support::test_state::test_state;

#[tokio::test]
async fn test_cup_round_end_to_end() {
    let (state, _) = test_state().await;
    let manager = state.round_manager();
    manager
        .open_round(&state.db, "Test Cup", test_cup_fixtures())
        .await
        .unwrap();

    let active = manager.require_active(&state.db).await.unwrap();
    assert_eq!(active.round.name, "Test Cup");
    assert_eq!(active.fixture_specs(), test_cup_fixtures());

    let p = participant(10, "Paula");
    let mut expected = [Pick::Home; FIXTURE_COUNT];
    for (i, slot) in expected.iter_mut().enumerate() {
        *slot = Pick::ALL[i % 3];
        state.drafts.set_pick(p.id, i, *slot).unwrap();
    }
    let status = state.drafts.completion_status(p.id);
    assert!(status.is_complete);
    assert!(status.missing.is_empty());

    let service = state.submission_service();
    service.submit(&state.db, active.round.id, &p).await.unwrap();

    let stored = submissions::submissions_of(&state.db, active.round.id)
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].participant_id, p.id);
    assert_eq!(stored[0].picks, expected);
    assert!(state.drafts.peek(p.id).is_none());

    let err = service
        .submit(&state.db, active.round.id, &p)
        .await
        .unwrap_err();
    assert!(err.is_duplicate_submission());
    assert_eq!(
        submissions::count_submissions(&state.db, active.round.id)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn split_vote_on_first_fixture() {
    let (state, _) = test_state().await;
    let round = state
        .round_manager()
        .open_round(&state.db, "Test Cup", test_cup_fixtures())
        .await
        .unwrap();
    let service = state.submission_service();

    for (id, first) in [(1, Pick::Home), (2, Pick::Away)] {
        state.drafts.set_pick(id, 0, first).unwrap();
        for i in 1..FIXTURE_COUNT {
            state.drafts.set_pick(id, i, Pick::Draw).unwrap();
        }
        service
            .submit(&state.db, round.round.id, &participant(id, "P"))
            .await
            .unwrap();
    }

    let stats = state
        .aggregation()
        .statistics(&state.db, round.round.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stats.total_participants, 2);

    let first = &stats.fixtures[0];
    assert_eq!(first.position, 1);
    assert_eq!(first.home_label, "H1");
    assert_eq!((first.counts.home, first.counts.draw, first.counts.away), (1, 0, 1));
    assert!((first.percentages.home - 50.0).abs() < 1e-9);
    assert!(first.percentages.draw.abs() < 1e-9);
    assert!((first.percentages.away - 50.0).abs() < 1e-9);
    assert!(!first.no_picks);

    let second = &stats.fixtures[1];
    assert_eq!(second.counts.draw, 2);
    assert!((second.percentages.draw - 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn statistics_absent_without_submissions() {
    let (state, _) = test_state().await;
    let round = state
        .round_manager()
        .open_round(&state.db, "Vazia", test_cup_fixtures())
        .await
        .unwrap();
    state.drafts.set_pick(1, 0, Pick::Home).unwrap();

    let stats = state
        .aggregation()
        .statistics(&state.db, round.round.id)
        .await
        .unwrap();
    assert!(stats.is_none());
}
