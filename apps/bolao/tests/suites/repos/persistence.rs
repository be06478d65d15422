use bolao::config::db::DbProfile;
use bolao::domain::pick::Pick;
use bolao::repos::submissions::{self, NewSubmission};
use bolao::repos::{fixtures, rounds};
use sea_orm::TransactionTrait;

use crate::support::factory::{all, test_cup_fixtures};
use crate::support::test_state::test_state_with;

#[tokio::test]
async fn sqlite_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("palpites.db").to_string_lossy().into_owned();
    let profile = DbProfile::SqliteFile { file };

    let round_id = {
        let (state, _) = test_state_with(profile.clone()).await;
        let txn = state.db.begin().await.unwrap();
        let round = rounds::create_round(&txn, "Persistente").await.unwrap();
        fixtures::replace_fixtures(&txn, round.id, &test_cup_fixtures())
            .await
            .unwrap();
        txn.commit().await.unwrap();
        submissions::insert_submission(
            &state.db,
            NewSubmission {
                round_id: round.id,
                participant_id: 1,
                display_name: "Ana".into(),
                handle: Some("ana".into()),
                picks: all(Pick::Draw),
            },
        )
        .await
        .unwrap();
        state.db.close().await.unwrap();
        round.id
    };

    let (state, _) = test_state_with(profile).await;
    let active = rounds::active_round(&state.db).await.unwrap().unwrap();
    assert_eq!(active.id, round_id);
    assert_eq!(fixtures::fixtures_of(&state.db, round_id).await.unwrap().len(), 14);
    let stored = submissions::find_submission(&state.db, round_id, 1)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.handle.as_deref(), Some("ana"));
    assert_eq!(stored.picks, all(Pick::Draw));
}
