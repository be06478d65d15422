use bolao::bot::render;
use bolao::domain::pick::Pick;
use bolao::repos::submissions::{self, NewSubmission};

use crate::support::bot_helpers::{admin, fill_all, open_test_cup, press, say, test_bot};
use crate::support::factory::{all, group_chat, text_update, user};
use crate::support::test_state::GROUP_ID;

#[tokio::test]
async fn help_differs_between_group_and_private() {
    let (bot, transport) = test_bot().await;
    let ana = user(1, "Ana");

    bot.handle_update(text_update(group_chat(), &ana, "/start@LotecaBot"))
        .await;
    let in_group = transport.last_sent_to(GROUP_ID).unwrap();
    assert!(in_group.contains("planilha"));
    assert!(!in_group.contains("/nova"));

    say(&bot, &ana, "/ajuda").await;
    let private = transport.last_sent_to(ana.id).unwrap();
    assert!(private.contains("/nova\\_rodada"));
    assert!(private.contains("/meus\\_palpites"));
}

#[tokio::test]
async fn unknown_commands_and_chatter_are_ignored() {
    let (bot, transport) = test_bot().await;
    let ana = user(1, "Ana");

    say(&bot, &ana, "/whatever").await;
    say(&bot, &ana, "bom dia").await;
    assert!(transport.outbound().is_empty());
}

#[tokio::test]
async fn stats_without_round_or_submissions() {
    let (bot, transport) = test_bot().await;
    let ana = user(1, "Ana");

    say(&bot, &ana, "/estatisticas").await;
    assert_eq!(
        transport.last_sent_to(ana.id).as_deref(),
        Some(render::NO_ACTIVE_ROUND)
    );

    open_test_cup(&bot).await;
    say(&bot, &ana, "/stats").await;
    assert_eq!(
        transport.last_sent_to(ana.id).as_deref(),
        Some(render::NO_PICKS_YET)
    );
}

#[tokio::test]
async fn stats_count_stored_submissions_only() {
    let (bot, transport) = test_bot().await;
    let grid = open_test_cup(&bot).await;
    let ana = user(1, "Ana");
    let bia = user(2, "Bia");
    let caio = user(3, "Caio");

    fill_all(&bot, &ana, grid, Pick::Home).await;
    press(&bot, &ana, grid, "enviar").await;
    fill_all(&bot, &bia, grid, Pick::Away).await;
    press(&bot, &bia, grid, "enviar").await;
    // drafts never count
    fill_all(&bot, &caio, grid, Pick::Draw).await;

    say(&bot, &caio, "/estatisticas").await;
    let text = transport.last_sent_to(caio.id).unwrap();
    assert!(text.starts_with("📊 *ESTATÍSTICAS - Test Cup*"));
    assert!(text.contains("👥 Total de palpitadores: 2"));
    assert!(text.contains("1. *H1 x A1*\n1: 1 (50.0%) | X: 0 (0.0%) | 2: 1 (50.0%)"));
    assert!(text.contains("14. *H14 x A14*"));
}

#[tokio::test]
async fn submissions_listing_is_admin_only() {
    let (bot, transport) = test_bot().await;
    open_test_cup(&bot).await;
    let ana = user(1, "Ana");

    say(&bot, &ana, "/ver_palpites").await;
    assert_eq!(
        transport.last_sent_to(ana.id).as_deref(),
        Some(render::ADMIN_ONLY)
    );

    say(&bot, &admin(), "/ver_palpites").await;
    assert_eq!(
        transport.last_sent_to(admin().id).as_deref(),
        Some(render::NO_SUBMISSIONS)
    );
}

#[tokio::test]
async fn long_submissions_listing_is_split() {
    let (bot, transport) = test_bot().await;
    open_test_cup(&bot).await;
    let round_id = bot.state().drafts.current_round().unwrap();

    for id in 1..=60 {
        submissions::insert_submission(
            &bot.state().db,
            NewSubmission {
                round_id,
                participant_id: id,
                display_name: format!("Participante {id}"),
                handle: (id % 2 == 0).then(|| format!("p{id}")),
                picks: all(Pick::Draw),
            },
        )
        .await
        .unwrap();
    }
    transport.clear();

    say(&bot, &admin(), "/submissions").await;
    let parts = transport.sent_to(admin().id);
    assert!(parts.len() > 1);
    assert!(parts.iter().all(|p| p.chars().count() <= render::MESSAGE_LIMIT));
    assert!(parts[0].contains("👥 Total: 60 palpitadores"));

    let joined = parts.join("\n");
    assert!(joined.contains("👤 Participante 1 ((sem username))"));
    assert!(joined.contains("👤 Participante 60 (@p60)"));
}

#[tokio::test]
async fn my_picks_command_covers_every_state() {
    let (bot, transport) = test_bot().await;
    let ana = user(1, "Ana");

    say(&bot, &ana, "/meus_palpites").await;
    assert_eq!(
        transport.last_sent_to(ana.id).as_deref(),
        Some(render::NO_ACTIVE_ROUND)
    );

    let grid = open_test_cup(&bot).await;
    say(&bot, &ana, "/meus_palpites").await;
    assert_eq!(
        transport.last_sent_to(ana.id).as_deref(),
        Some(render::NO_DRAFT_TEXT)
    );

    press(&bot, &ana, grid, "x_0").await;
    say(&bot, &ana, "/my_picks").await;
    let draft = transport.last_sent_to(ana.id).unwrap();
    assert!(draft.contains("RASCUNHO ATUAL - Test Cup"));
    assert!(draft.contains("⚠️ INCOMPLETO"));

    fill_all(&bot, &ana, grid, Pick::Draw).await;
    press(&bot, &ana, grid, "enviar").await;
    say(&bot, &ana, "/meus_palpites").await;
    let stored = transport.last_sent_to(ana.id).unwrap();
    assert!(stored.contains("SEUS PALPITES - Test Cup"));
    assert!(stored.contains("`X X X X X X X X X X X X X X`"));
    assert!(stored.contains("UTC"));
}
