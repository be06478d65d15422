use std::collections::VecDeque;

use async_trait::async_trait;
use bolao::bot::polling::{poll_once, UpdateSource};
use bolao::domain::pick::Pick;
use bolao::repos::submissions;
use bolao::transport::types::Update;
use bolao::transport::TransportError;
use parking_lot::Mutex;

use crate::support::bot_helpers::{open_test_cup, press, test_bot};
use crate::support::factory::{all, callback_update, private_chat, text_update, user};

/// Replays canned batches and remembers the offsets it was asked for.
#[derive(Default)]
struct ScriptedSource {
    batches: Mutex<VecDeque<Result<Vec<Update>, TransportError>>>,
    offsets: Mutex<Vec<Option<i64>>>,
}

impl ScriptedSource {
    fn with(batches: Vec<Result<Vec<Update>, TransportError>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            offsets: Mutex::default(),
        }
    }
}

#[async_trait]
impl UpdateSource for ScriptedSource {
    async fn fetch(&self, offset: Option<i64>) -> Result<Vec<Update>, TransportError> {
        self.offsets.lock().push(offset);
        self.batches.lock().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[tokio::test]
async fn batch_is_handled_and_acknowledged() {
    let (bot, transport) = test_bot().await;
    let ana = user(1, "Ana");
    let bia = user(2, "Bia");
    let first = text_update(private_chat(ana.id), &ana, "/start");
    let second = text_update(private_chat(bia.id), &bia, "/start");
    let last_id = second.update_id;

    let source = ScriptedSource::with(vec![Ok(vec![first, second])]);
    let next = poll_once(&bot, &source, None).await.unwrap();

    assert_eq!(next, Some(last_id + 1));
    assert_eq!(transport.sent_to(ana.id).len(), 1);
    assert_eq!(transport.sent_to(bia.id).len(), 1);

    // an empty batch keeps the offset
    let again = poll_once(&bot, &source, next).await.unwrap();
    assert_eq!(again, next);
    assert_eq!(*source.offsets.lock(), vec![None, next]);
}

#[tokio::test]
async fn fetch_failure_is_returned() {
    let (bot, _transport) = test_bot().await;
    let source = ScriptedSource::with(vec![Err(TransportError::Http(
        "connection reset".into(),
    ))]);

    let err = poll_once(&bot, &source, Some(10)).await.unwrap_err();
    assert_eq!(err, TransportError::Http("connection reset".into()));
}

#[tokio::test]
async fn updates_without_payload_still_advance_the_offset() {
    let (bot, transport) = test_bot().await;
    let bare = Update {
        update_id: 9_000,
        message: None,
        callback_query: None,
    };

    let source = ScriptedSource::with(vec![Ok(vec![bare])]);
    let next = poll_once(&bot, &source, Some(8_000)).await.unwrap();
    assert_eq!(next, Some(9_001));
    assert!(transport.outbound().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn final_pick_and_submit_in_one_batch() {
    let (bot, _transport) = test_bot().await;
    let grid = open_test_cup(&bot).await;
    let ana = user(1, "Ana");
    for i in 0..13 {
        press(&bot, &ana, grid, &format!("t2_{i}")).await;
    }

    let (_, last_pick) = callback_update(&ana, grid, "t2_13");
    let (_, submit) = callback_update(&ana, grid, "enviar");
    let source = ScriptedSource::with(vec![Ok(vec![last_pick, submit])]);
    poll_once(&bot, &source, None).await.unwrap();

    let round_id = bot.state().drafts.current_round().unwrap();
    let stored = submissions::find_submission(&bot.state().db, round_id, ana.id)
        .await
        .unwrap()
        .expect("submitted after the last pick landed");
    assert_eq!(stored.picks, all(Pick::Away));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn later_press_in_a_batch_wins() {
    let (bot, _transport) = test_bot().await;
    let grid = open_test_cup(&bot).await;
    let ana = user(1, "Ana");

    let (_, home) = callback_update(&ana, grid, "t1_0");
    let (_, away) = callback_update(&ana, grid, "t2_0");
    let source = ScriptedSource::with(vec![Ok(vec![home, away])]);
    poll_once(&bot, &source, None).await.unwrap();

    let draft = bot.state().drafts.peek(ana.id).unwrap();
    assert_eq!(draft.get(0), Some(Pick::Away));
}
