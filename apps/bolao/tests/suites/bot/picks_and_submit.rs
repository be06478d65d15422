use bolao::bot::render;
use bolao::domain::pick::Pick;
use bolao::repos::submissions;
use bolao::state::app_state::AppState;
use bolao::Bot;

use crate::support::bot_helpers::{fill_all, open_test_cup, press, test_bot};
use crate::support::factory::{all, user};
use crate::support::test_state::test_config;

#[tokio::test]
async fn pick_answers_once_and_rerenders_the_grid() {
    let (bot, transport) = test_bot().await;
    let grid = open_test_cup(&bot).await;
    let ana = user(1, "Ana");

    let cb = press(&bot, &ana, grid, "t1_0").await;
    assert_eq!(
        transport.answers_for(&cb),
        vec![(Some("✅ Jogo 1: Time 1".to_string()), false)]
    );

    let (message_id, text, keyboard) = transport.edits().pop().unwrap();
    assert_eq!(message_id, grid);
    assert!(text.contains("1:✅ 2:⚪"));
    assert!(text.contains("Faltam 13 jogos"));
    let keyboard = keyboard.unwrap();
    assert_eq!(keyboard.rows[0][1].text, "✅H1");
    assert_eq!(keyboard.rows[1][1].text, "H2");
}

#[tokio::test]
async fn shared_grid_shows_only_the_latest_actor() {
    let (bot, transport) = test_bot().await;
    let grid = open_test_cup(&bot).await;

    press(&bot, &user(1, "Ana"), grid, "t1_0").await;
    press(&bot, &user(2, "Bia"), grid, "x_1").await;

    let (_, text, keyboard) = transport.edits().pop().unwrap();
    assert!(text.contains("1:⚪ 2:✅"));
    let keyboard = keyboard.unwrap();
    assert_eq!(keyboard.rows[0][1].text, "H1");
    assert_eq!(keyboard.rows[1][2].text, "✅X");

    // each draft keeps its own picks
    let drafts = &bot.state().drafts;
    assert_eq!(drafts.peek(1).unwrap().get(0), Some(Pick::Home));
    assert_eq!(drafts.peek(2).unwrap().get(0), None);
}

#[tokio::test]
async fn noop_and_unknown_buttons_are_answered_silently() {
    let (bot, transport) = test_bot().await;
    let grid = open_test_cup(&bot).await;
    let ana = user(1, "Ana");

    let noop = press(&bot, &ana, grid, "noop_3").await;
    let junk = press(&bot, &ana, grid, "something_else").await;
    assert_eq!(transport.answers_for(&noop), vec![(None, false)]);
    assert_eq!(transport.answers_for(&junk), vec![(None, false)]);
    assert!(transport.edits().is_empty());
    assert!(bot.state().drafts.is_empty());
}

#[tokio::test]
async fn out_of_range_fixture_is_rejected() {
    let (bot, transport) = test_bot().await;
    let grid = open_test_cup(&bot).await;

    let cb = press(&bot, &user(1, "Ana"), grid, "t2_14").await;
    assert_eq!(
        transport.answers_for(&cb),
        vec![(Some("❌ Jogo inválido.".to_string()), true)]
    );
    assert!(bot.state().drafts.peek(1).is_none());
}

#[tokio::test]
async fn incomplete_submit_lists_missing_fixtures() {
    let (bot, transport) = test_bot().await;
    let grid = open_test_cup(&bot).await;
    let ana = user(1, "Ana");

    for i in 0..13 {
        press(&bot, &ana, grid, &format!("x_{i}")).await;
    }
    let cb = press(&bot, &ana, grid, "enviar").await;
    assert_eq!(
        transport.answers_for(&cb),
        vec![(Some("⚠️ Complete os jogos: 14".to_string()), true)]
    );

    let round_id = bot.state().drafts.current_round().unwrap();
    assert!(!submissions::has_submission(&bot.state().db, round_id, ana.id)
        .await
        .unwrap());
    assert_eq!(bot.state().drafts.peek(ana.id).unwrap().filled(), 13);
}

#[tokio::test]
async fn complete_submit_stores_summarizes_and_confirms() {
    let (bot, transport) = test_bot().await;
    let grid = open_test_cup(&bot).await;
    let ana = user(1, "Ana");

    fill_all(&bot, &ana, grid, Pick::Away).await;
    let cb = press(&bot, &ana, grid, "enviar").await;
    assert_eq!(
        transport.answers_for(&cb),
        vec![(Some(render::SUBMITTED_ALERT.to_string()), true)]
    );

    let (message_id, text, keyboard) = transport.edits().pop().unwrap();
    assert_eq!(message_id, grid);
    assert!(text.contains("✅ *PALPITES DE ANA*"));
    assert!(text.contains("|  1 | □ | H1"));
    assert_eq!(text.matches("| ✅ |").count(), 14);
    let keyboard = keyboard.expect("keyboard stays for the other participants");
    assert_eq!(keyboard.rows.len(), 16);
    assert!(keyboard.buttons().all(|b| !b.text.contains('✅')));

    let confirmation = transport.last_sent_to(ana.id).unwrap();
    assert!(confirmation.contains("`2 2 2 2 2 2 2 2 2 2 2 2 2 2`"));

    let round_id = bot.state().drafts.current_round().unwrap();
    let stored = submissions::find_submission(&bot.state().db, round_id, ana.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.picks, all(Pick::Away));
    assert_eq!(stored.display_name, "Ana");
    assert_eq!(stored.handle.as_deref(), Some("ana"));
    assert!(bot.state().drafts.peek(ana.id).is_none());

    // a second attempt is refused and nothing changes
    fill_all(&bot, &ana, grid, Pick::Home).await;
    let cb = press(&bot, &ana, grid, "enviar").await;
    assert_eq!(
        transport.answers_for(&cb),
        vec![(
            Some("⚠️ Você já enviou seus palpites para esta rodada.".to_string()),
            true
        )]
    );
    assert_eq!(
        submissions::count_submissions(&bot.state().db, round_id)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn undeliverable_private_confirmation_does_not_undo_the_submission() {
    let (bot, transport) = test_bot().await;
    let grid = open_test_cup(&bot).await;
    let ana = user(1, "Ana");
    transport.block_chat(ana.id);

    fill_all(&bot, &ana, grid, Pick::Draw).await;
    let cb = press(&bot, &ana, grid, "enviar").await;
    assert_eq!(
        transport.answers_for(&cb),
        vec![(Some(render::SUBMITTED_ALERT.to_string()), true)]
    );
    let round_id = bot.state().drafts.current_round().unwrap();
    assert!(submissions::has_submission(&bot.state().db, round_id, ana.id)
        .await
        .unwrap());
}

#[tokio::test]
async fn failed_grid_edit_falls_back_to_a_private_message() {
    let (bot, transport) = test_bot().await;
    let grid = open_test_cup(&bot).await;
    let ana = user(1, "Ana");
    transport.fail_edits(true);

    press(&bot, &ana, grid, "t2_5").await;
    let fallback = transport.last_sent_to(ana.id).unwrap();
    assert!(fallback.contains("RASCUNHO ATUAL - Test Cup"));
    assert_eq!(bot.state().drafts.peek(ana.id).unwrap().get(5), Some(Pick::Away));
}

#[tokio::test]
async fn press_on_an_old_grid_is_refused() {
    let (bot, transport) = test_bot().await;
    let old_grid = open_test_cup(&bot).await;
    let new_grid = open_test_cup(&bot).await;
    assert_ne!(old_grid, new_grid);

    let cb = press(&bot, &user(1, "Ana"), old_grid, "t1_0").await;
    assert_eq!(
        transport.answers_for(&cb),
        vec![(Some(render::STALE_GRID.to_string()), true)]
    );
    assert!(bot.state().drafts.peek(1).is_none());
}

#[tokio::test]
async fn pick_without_active_round() {
    let (bot, transport) = test_bot().await;
    let cb = press(&bot, &user(1, "Ana"), 77, "t1_0").await;
    assert_eq!(
        transport.answers_for(&cb),
        vec![(Some(render::NO_ACTIVE_ROUND.to_string()), true)]
    );
    assert!(transport.edits().is_empty());
}

#[tokio::test]
async fn restarted_process_adopts_the_pressed_grid() {
    let (bot, transport) = test_bot().await;
    let grid = open_test_cup(&bot).await;

    // same store, fresh transient state
    let restarted = Bot::new(AppState::new(
        bot.state().db.clone(),
        test_config(),
        transport.clone(),
    ));
    assert!(restarted.state().broadcast.current().is_none());
    assert!(restarted.state().drafts.current_round().is_none());

    let cb = press(&restarted, &user(1, "Ana"), grid, "x_2").await;
    assert_eq!(
        transport.answers_for(&cb),
        vec![(Some("✅ Jogo 3: Empate".to_string()), false)]
    );
    let adopted = restarted.state().broadcast.current().unwrap();
    assert_eq!(adopted.message_id, grid);
    assert_eq!(adopted.round_name, "Test Cup");
    assert_eq!(transport.edits().pop().unwrap().0, grid);
    assert_eq!(
        restarted.state().drafts.current_round(),
        bot.state().drafts.current_round()
    );
}

#[tokio::test]
async fn my_picks_button_reports_progress() {
    let (bot, transport) = test_bot().await;
    let grid = open_test_cup(&bot).await;
    let ana = user(1, "Ana");

    let cb = press(&bot, &ana, grid, "meus_palpites").await;
    assert_eq!(
        transport.answers_for(&cb),
        vec![(Some(render::NO_DRAFT_ALERT.to_string()), true)]
    );

    press(&bot, &ana, grid, "t1_0").await;
    let cb = press(&bot, &ana, grid, "meus_palpites").await;
    let (text, alert) = transport.answers_for(&cb).pop().unwrap();
    assert!(alert);
    let text = text.unwrap();
    assert!(text.contains("INCOMPLETO"));
    assert!(text.contains("1:✅ 2:⚪"));

    fill_all(&bot, &ana, grid, Pick::Home).await;
    press(&bot, &ana, grid, "enviar").await;
    let cb = press(&bot, &ana, grid, "meus_palpites").await;
    let (text, _) = transport.answers_for(&cb).pop().unwrap();
    assert_eq!(
        text.unwrap(),
        "📋 SEUS PALPITES ENVIADOS:\n1 1 1 1 1 1 1 1 1 1 1 1 1 1"
    );
}
