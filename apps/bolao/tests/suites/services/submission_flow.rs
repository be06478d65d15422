use bolao::domain::pick::Pick;
use bolao::domain::FIXTURE_COUNT;
use bolao::errors::domain::{DomainError, ValidationKind};
use bolao::repos::submissions;

use crate::support::factory::{all, participant, test_cup_fixtures};
use crate::support::test_state::test_state;

fn fill(state: &bolao::AppState, participant_id: i64, pick: Pick) {
    for i in 0..FIXTURE_COUNT {
        state.drafts.set_pick(participant_id, i, pick).unwrap();
    }
}

#[tokio::test]
async fn submit_twice_is_rejected_and_stores_one_row() {
    let (state, _) = test_state().await;
    let round = state
        .round_manager()
        .open_round(&state.db, "Test Cup", test_cup_fixtures())
        .await
        .unwrap();
    let service = state.submission_service();
    let ana = participant(1, "Ana");

    fill(&state, ana.id, Pick::Home);
    let result = service.submit(&state.db, round.round.id, &ana).await.unwrap();
    assert_eq!(result.picks, all(Pick::Home));
    assert!(state.drafts.peek(ana.id).is_none());

    fill(&state, ana.id, Pick::Away);
    let err = service.submit(&state.db, round.round.id, &ana).await.unwrap_err();
    assert!(err.is_duplicate_submission());
    // draft survives a rejected attempt
    assert!(state.drafts.peek(ana.id).is_some());

    assert_eq!(
        submissions::count_submissions(&state.db, round.round.id).await.unwrap(),
        1
    );
    let stored = submissions::find_submission(&state.db, round.round.id, ana.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.picks, all(Pick::Home));
}

#[tokio::test]
async fn incomplete_draft_lists_missing_fixtures() {
    let (state, _) = test_state().await;
    let round = state
        .round_manager()
        .open_round(&state.db, "Test Cup", test_cup_fixtures())
        .await
        .unwrap();
    let service = state.submission_service();
    let bia = participant(2, "Bia");

    for i in 0..FIXTURE_COUNT {
        if i != 0 && i != 4 {
            state.drafts.set_pick(bia.id, i, Pick::Draw).unwrap();
        }
    }
    let err = service.submit(&state.db, round.round.id, &bia).await.unwrap_err();
    assert_eq!(err.missing_fixtures(), Some(&[0usize, 4][..]));
    assert_eq!(state.drafts.peek(bia.id).unwrap().filled(), 12);
    assert!(!submissions::has_submission(&state.db, round.round.id, bia.id)
        .await
        .unwrap());

    let status = service.completion_status(bia.id);
    assert!(!status.is_complete);
    assert_eq!(status.missing, vec![0, 4]);
}

#[tokio::test]
async fn untouched_participant_has_every_fixture_missing() {
    let (state, _) = test_state().await;
    let round = state
        .round_manager()
        .open_round(&state.db, "Test Cup", test_cup_fixtures())
        .await
        .unwrap();
    let service = state.submission_service();

    let status = service.completion_status(99);
    assert_eq!(status.missing, (0..FIXTURE_COUNT).collect::<Vec<_>>());

    let err = service
        .submit(&state.db, round.round.id, &participant(99, "Zé"))
        .await
        .unwrap_err();
    assert_eq!(err.missing_fixtures().map(<[usize]>::len), Some(FIXTURE_COUNT));
}

#[tokio::test]
async fn draft_from_a_previous_round_is_never_submitted() {
    let (state, _) = test_state().await;
    let manager = state.round_manager();
    let old = manager
        .open_round(&state.db, "Antiga", test_cup_fixtures())
        .await
        .unwrap();
    let ana = participant(1, "Ana");
    fill(&state, ana.id, Pick::Home);

    let new = manager
        .open_round(&state.db, "Nova", test_cup_fixtures())
        .await
        .unwrap();
    let service = state.submission_service();

    let err = service.submit(&state.db, old.round.id, &ana).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::StaleRound, _)));

    // the reset dropped the old draft, so the new round starts empty
    let err = service.submit(&state.db, new.round.id, &ana).await.unwrap_err();
    assert_eq!(err.missing_fixtures().map(<[usize]>::len), Some(FIXTURE_COUNT));
    assert_eq!(
        submissions::count_submissions(&state.db, old.round.id).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn concurrent_submissions_store_exactly_one_row() {
    let (state, _) = test_state().await;
    let round = state
        .round_manager()
        .open_round(&state.db, "Corrida", test_cup_fixtures())
        .await
        .unwrap();
    let ana = participant(1, "Ana");
    fill(&state, ana.id, Pick::Draw);

    let mut handles = Vec::new();
    for _ in 0..4 {
        let state = state.clone();
        let ana = ana.clone();
        let round_id = round.round.id;
        handles.push(tokio::spawn(async move {
            state.submission_service().submit(&state.db, round_id, &ana).await
        }));
    }

    let mut ok = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => ok += 1,
            Err(e) => assert!(
                e.is_duplicate_submission() || e.missing_fixtures().is_some(),
                "unexpected {e:?}"
            ),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(
        submissions::count_submissions(&state.db, round.round.id).await.unwrap(),
        1
    );
}
