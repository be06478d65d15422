//! Update dispatcher: turns Telegram updates into service calls and chat
//! output.
//!
//! Polling and the webhook both end in [`Bot::handle_update`]. Every update
//! runs inside its own trace scope; failures are logged there and never
//! propagate to the delivery loop. Updates are single-flight: one is handled
//! to completion before the next starts, whichever mode delivered it.

pub mod commands;
pub mod flows;
pub mod polling;
pub mod render;

use thiserror::Error;
use tracing::{debug, info, warn};

use self::commands::{looks_like_command, CallbackAction, Command};
use crate::domain::draft::Draft;
use crate::domain::fixtures::FixtureSpec;
use crate::domain::flow::{AdminFlow, FlowOutcome};
use crate::domain::pick::{Pick, Picks};
use crate::errors::domain::DomainError;
use crate::logging::pii::MaskedName;
use crate::repos::submissions as submissions_repo;
use crate::services::{ActiveRound, BroadcastRef, Participant};
use crate::state::AppState;
use crate::trace_ctx;
use crate::transport::types::{CallbackQuery, Message, Update, User};
use crate::transport::{Keyboard, SentMessage, TransportError};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Answer shown for a button press.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CallbackReply {
    text: Option<String>,
    alert: bool,
}

impl CallbackReply {
    fn silent() -> Self {
        Self {
            text: None,
            alert: false,
        }
    }

    fn toast(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            alert: false,
        }
    }

    fn alert(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            alert: true,
        }
    }
}

enum GridLookup {
    Found(BroadcastRef),
    /// Pressed on a message other than the current grid.
    Stale,
    Missing,
}

/// Work done after the callback has been answered.
enum FollowUp {
    Nothing,
    /// Re-render the shared grid with the actor's draft.
    Regrid {
        target: BroadcastRef,
        fixtures: Vec<FixtureSpec>,
        draft: Draft,
        user_id: i64,
    },
    /// Show the final summary and confirm privately.
    Submitted {
        target: Option<BroadcastRef>,
        fixtures: Vec<FixtureSpec>,
        display_name: String,
        picks: Picks,
        user_id: i64,
    },
}

#[derive(Debug, Clone)]
pub struct Bot {
    state: AppState,
}

impl Bot {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn handle_update(&self, update: Update) {
        let update_id = update.update_id;
        let trace_id = trace_ctx::for_update(update_id);

        let _turn = self.state.dispatch.lock().await;
        trace_ctx::with_trace_id(trace_id, async move {
            let result = if let Some(cb) = update.callback_query {
                self.handle_callback(cb).await
            } else if let Some(message) = update.message {
                self.handle_message(message).await
            } else {
                debug!(update_id, "update without message or callback ignored");
                Ok(())
            };

            match result {
                Ok(()) => {}
                Err(DispatchError::Domain(e @ DomainError::Infra(..))) => {
                    warn!(
                        update_id,
                        trace_id = %trace_ctx::trace_id(),
                        error = %e,
                        "update failed"
                    );
                }
                Err(DispatchError::Domain(e)) => {
                    debug!(update_id, error = %e, "update rejected");
                }
                Err(DispatchError::Transport(e)) => {
                    warn!(
                        update_id,
                        trace_id = %trace_ctx::trace_id(),
                        error = %e,
                        "transport failure"
                    );
                }
            }
        })
        .await
    }

    fn is_admin(&self, user_id: i64) -> bool {
        self.state.config.is_admin(user_id)
    }

    async fn send(&self, chat_id: i64, text: &str) -> Result<SentMessage, DispatchError> {
        Ok(self.state.transport.send_message(chat_id, text, None).await?)
    }

    // ---- messages ----

    async fn handle_message(&self, message: Message) -> Result<(), DispatchError> {
        let (Some(text), Some(from)) = (message.text.as_deref(), message.from.as_ref()) else {
            return Ok(());
        };
        let chat_id = message.chat.id;

        let result = if let Some(command) = Command::parse(text) {
            debug!(chat_id, user_id = from.id, ?command, "command");
            self.run_command(command, &message, from).await
        } else if looks_like_command(text) {
            Ok(())
        } else if self.is_admin(from.id) && self.state.flows.is_active(from.id) {
            self.feed_flow(chat_id, from.id, text).await
        } else {
            Ok(())
        };

        if let Err(DispatchError::Domain(e)) = &result {
            if let Err(send_err) = self.send(chat_id, &render::error_reply(e)).await {
                warn!(chat_id, error = %send_err, "error reply not delivered");
            }
        }
        result
    }

    async fn run_command(
        &self,
        command: Command,
        message: &Message,
        from: &User,
    ) -> Result<(), DispatchError> {
        let chat_id = message.chat.id;
        match command {
            Command::Start => {
                self.send(chat_id, &render::help_text(message.chat.is_group()))
                    .await?;
            }
            Command::NewRound => {
                if !self.is_admin(from.id) {
                    self.send(chat_id, render::ADMIN_ONLY_NEW_ROUND).await?;
                    return Ok(());
                }
                self.state.flows.start(from.id);
                info!(admin_id = from.id, "round creation started");
                self.send(chat_id, &render::ask_round_name()).await?;
            }
            Command::Cancel => {
                let text = if self.state.flows.cancel(from.id) {
                    render::FLOW_CANCELLED
                } else {
                    render::NOTHING_TO_CANCEL
                };
                self.send(chat_id, text).await?;
            }
            Command::Stats => self.show_statistics(chat_id).await?,
            Command::Submissions => {
                if !self.is_admin(from.id) {
                    self.send(chat_id, render::ADMIN_ONLY).await?;
                    return Ok(());
                }
                self.show_submissions(chat_id).await?;
            }
            Command::MyPicks => self.show_my_picks(chat_id, from.id).await?,
        }
        Ok(())
    }

    async fn feed_flow(&self, chat_id: i64, user_id: i64, text: &str) -> Result<(), DispatchError> {
        match self.state.flows.advance(user_id, text)? {
            FlowOutcome::Ignored => {}
            FlowOutcome::Cancelled => {
                self.send(chat_id, render::FLOW_CANCELLED).await?;
            }
            FlowOutcome::NameAccepted { .. } => {
                self.send(chat_id, &render::ask_fixtures()).await?;
            }
            FlowOutcome::Ready { name, fixtures } => {
                self.open_round(chat_id, user_id, name, fixtures).await?;
            }
        }
        Ok(())
    }

    async fn open_round(
        &self,
        chat_id: i64,
        user_id: i64,
        name: String,
        fixtures: Vec<FixtureSpec>,
    ) -> Result<(), DispatchError> {
        let opened = self
            .state
            .round_manager()
            .open_round(&self.state.db, &name, fixtures)
            .await;
        let active = match opened {
            Ok(active) => active,
            Err(e) => {
                // Let the admin resend the fixtures without starting over.
                self.state
                    .flows
                    .restore(user_id, AdminFlow::AwaitingFixtures { name });
                return Err(e.into());
            }
        };

        let round_id = active.round.id;
        let group_chat_id = self.state.config.group_chat_id;
        let text = render::grid_text(&active.round.name, None);
        let keyboard = render::grid_keyboard(&active.fixture_specs(), None);

        match self
            .state
            .transport
            .send_message(group_chat_id, &text, Some(&keyboard))
            .await
        {
            Ok(sent) => {
                self.state.broadcast.set(BroadcastRef {
                    chat_id: sent.chat_id,
                    message_id: sent.message_id,
                    round_id,
                    round_name: active.round.name.clone(),
                });
                info!(round_id, message_id = sent.message_id, "grid posted");
                self.send(chat_id, &render::round_created(&active.round.name))
                    .await?;
                Ok(())
            }
            Err(e) => {
                warn!(round_id, group_chat_id, error = %e, "grid not posted");
                self.send(chat_id, render::GRID_POST_FAILED).await?;
                Err(e.into())
            }
        }
    }

    async fn show_statistics(&self, chat_id: i64) -> Result<(), DispatchError> {
        let Some(active) = self.state.round_manager().active_round(&self.state.db).await? else {
            self.send(chat_id, render::NO_ACTIVE_ROUND).await?;
            return Ok(());
        };
        let stats = self
            .state
            .aggregation()
            .statistics(&self.state.db, active.round.id)
            .await?;
        let Some(stats) = stats else {
            self.send(chat_id, render::NO_PICKS_YET).await?;
            return Ok(());
        };

        let text = render::statistics_text(&active.round.name, &stats);
        for part in render::chunk(&text, render::MESSAGE_LIMIT) {
            self.send(chat_id, &part).await?;
        }
        Ok(())
    }

    async fn show_submissions(&self, chat_id: i64) -> Result<(), DispatchError> {
        let Some(active) = self.state.round_manager().active_round(&self.state.db).await? else {
            self.send(chat_id, render::NO_ACTIVE_ROUND).await?;
            return Ok(());
        };
        let submissions = submissions_repo::submissions_of(&self.state.db, active.round.id).await?;
        if submissions.is_empty() {
            self.send(chat_id, render::NO_SUBMISSIONS).await?;
            return Ok(());
        }
        for part in render::submissions_listing(&active.round.name, &submissions) {
            self.send(chat_id, &part).await?;
        }
        Ok(())
    }

    async fn show_my_picks(&self, chat_id: i64, user_id: i64) -> Result<(), DispatchError> {
        let Some(active) = self.state.round_manager().active_round(&self.state.db).await? else {
            self.send(chat_id, render::NO_ACTIVE_ROUND).await?;
            return Ok(());
        };
        let round_id = active.round.id;

        let text = if let Some(sub) =
            submissions_repo::find_submission(&self.state.db, round_id, user_id).await?
        {
            render::submission_view(&active.round.name, &sub)
        } else if let Some(draft) = self.current_draft(user_id, round_id) {
            render::draft_view(&active.round.name, &draft)
        } else {
            render::NO_DRAFT_TEXT.to_string()
        };
        self.send(chat_id, &text).await?;
        Ok(())
    }

    fn current_draft(&self, user_id: i64, round_id: i64) -> Option<Draft> {
        self.state
            .drafts
            .peek(user_id)
            .filter(|d| d.round_id() == round_id)
    }

    // ---- callbacks ----

    async fn handle_callback(&self, cb: CallbackQuery) -> Result<(), DispatchError> {
        let action = cb.data.as_deref().and_then(CallbackAction::parse);

        let decided = match action {
            None => {
                debug!(user_id = cb.from.id, "unknown callback data");
                Ok((CallbackReply::silent(), FollowUp::Nothing))
            }
            Some(CallbackAction::Noop(_)) => Ok((CallbackReply::silent(), FollowUp::Nothing)),
            Some(CallbackAction::Pick { index, pick }) => self.on_pick(&cb, index, pick).await,
            Some(CallbackAction::Submit) => self.on_submit(&cb).await,
            Some(CallbackAction::MyPicks) => self.on_my_picks(&cb).await,
        };

        let (reply, follow_up, failure) = match decided {
            Ok((reply, follow_up)) => (reply, follow_up, None),
            Err(e) => (
                CallbackReply::alert(render::error_reply(&e)),
                FollowUp::Nothing,
                Some(e),
            ),
        };

        if let Err(e) = self
            .state
            .transport
            .answer_callback(&cb.id, reply.text.as_deref(), reply.alert)
            .await
        {
            warn!(user_id = cb.from.id, error = %e, "callback answer failed");
        }

        if let Some(e) = failure {
            return Err(e.into());
        }
        self.follow_up(follow_up).await
    }

    /// The current round's shared grid, if `cb` was pressed on it.
    ///
    /// When no reference is known (e.g. after a restart) a press on a group
    /// message adopts that message as the grid.
    fn grid_for(&self, cb: &CallbackQuery, active: &ActiveRound) -> GridLookup {
        let round_id = active.round.id;
        let pressed = cb.message.as_ref();

        if let Some(existing) = self.state.broadcast.for_round(round_id) {
            return match pressed {
                Some(m) if m.message_id != existing.message_id || m.chat.id != existing.chat_id => {
                    GridLookup::Stale
                }
                _ => GridLookup::Found(existing),
            };
        }

        match pressed {
            Some(m) if m.chat.is_group() => {
                let adopted = BroadcastRef {
                    chat_id: m.chat.id,
                    message_id: m.message_id,
                    round_id,
                    round_name: active.round.name.clone(),
                };
                if self.state.broadcast.set_if_absent(adopted) {
                    info!(round_id, message_id = m.message_id, "grid reference adopted");
                }
                self.state
                    .broadcast
                    .for_round(round_id)
                    .map_or(GridLookup::Missing, GridLookup::Found)
            }
            _ => GridLookup::Missing,
        }
    }

    async fn on_pick(
        &self,
        cb: &CallbackQuery,
        index: usize,
        pick: Pick,
    ) -> Result<(CallbackReply, FollowUp), DomainError> {
        let active = self.state.round_manager().require_active(&self.state.db).await?;
        self.state.drafts.ensure_round(active.round.id)?;

        let target = match self.grid_for(cb, &active) {
            GridLookup::Found(target) => target,
            GridLookup::Stale => {
                return Ok((CallbackReply::alert(render::STALE_GRID), FollowUp::Nothing));
            }
            GridLookup::Missing => {
                return Ok((CallbackReply::alert(render::GRID_NOT_POSTED), FollowUp::Nothing));
            }
        };

        let draft = self.state.drafts.set_pick(cb.from.id, index, pick)?;
        debug!(
            round_id = active.round.id,
            participant_id = cb.from.id,
            index,
            filled = draft.filled(),
            "pick recorded"
        );

        Ok((
            CallbackReply::toast(render::pick_toast(index, pick)),
            FollowUp::Regrid {
                target,
                fixtures: active.fixture_specs(),
                draft,
                user_id: cb.from.id,
            },
        ))
    }

    async fn on_submit(
        &self,
        cb: &CallbackQuery,
    ) -> Result<(CallbackReply, FollowUp), DomainError> {
        let active = self.state.round_manager().require_active(&self.state.db).await?;
        self.state.drafts.ensure_round(active.round.id)?;

        // Submitting works without a known grid; only the summary is skipped.
        let target = match self.grid_for(cb, &active) {
            GridLookup::Found(target) => Some(target),
            GridLookup::Stale => {
                return Ok((CallbackReply::alert(render::STALE_GRID), FollowUp::Nothing));
            }
            GridLookup::Missing => None,
        };

        let participant = Participant {
            id: cb.from.id,
            display_name: cb.from.full_name(),
            handle: cb.from.username.clone().filter(|h| !h.is_empty()),
        };
        let result = self
            .state
            .submission_service()
            .submit(&self.state.db, active.round.id, &participant)
            .await?;

        Ok((
            CallbackReply::alert(render::SUBMITTED_ALERT),
            FollowUp::Submitted {
                target,
                fixtures: active.fixture_specs(),
                display_name: participant.display_name,
                picks: result.picks,
                user_id: participant.id,
            },
        ))
    }

    async fn on_my_picks(
        &self,
        cb: &CallbackQuery,
    ) -> Result<(CallbackReply, FollowUp), DomainError> {
        let active = self.state.round_manager().require_active(&self.state.db).await?;
        let round_id = active.round.id;

        let reply = if let Some(sub) =
            submissions_repo::find_submission(&self.state.db, round_id, cb.from.id).await?
        {
            CallbackReply::alert(render::submitted_alert(&sub.picks))
        } else if let Some(draft) = self.current_draft(cb.from.id, round_id) {
            CallbackReply::alert(render::draft_alert(&draft))
        } else {
            CallbackReply::alert(render::NO_DRAFT_ALERT)
        };
        Ok((reply, FollowUp::Nothing))
    }

    async fn follow_up(&self, follow_up: FollowUp) -> Result<(), DispatchError> {
        match follow_up {
            FollowUp::Nothing => Ok(()),
            FollowUp::Regrid {
                target,
                fixtures,
                draft,
                user_id,
            } => {
                let text = render::grid_text(&target.round_name, Some(&draft));
                let keyboard = render::grid_keyboard(&fixtures, Some(&draft));
                if let Err(e) = self.edit_grid(&target, &text, &keyboard).await {
                    warn!(
                        round_id = target.round_id,
                        message_id = target.message_id,
                        error = %e,
                        "grid edit failed; sending draft privately"
                    );
                    self.send(user_id, &render::draft_view(&target.round_name, &draft))
                        .await?;
                }
                Ok(())
            }
            FollowUp::Submitted {
                target,
                fixtures,
                display_name,
                picks,
                user_id,
            } => {
                if let Some(target) = target {
                    let text =
                        render::final_summary(&target.round_name, &display_name, &fixtures, &picks);
                    let keyboard = render::grid_keyboard(&fixtures, None);
                    if let Err(e) = self.edit_grid(&target, &text, &keyboard).await {
                        warn!(
                            round_id = target.round_id,
                            message_id = target.message_id,
                            error = %e,
                            "final summary not shown"
                        );
                    }
                }
                if let Err(e) = self.send(user_id, &render::private_confirmation(&picks)).await {
                    warn!(
                        participant_id = user_id,
                        name = %MaskedName(&display_name),
                        error = %e,
                        "private confirmation not delivered"
                    );
                }
                Ok(())
            }
        }
    }

    async fn edit_grid(
        &self,
        target: &BroadcastRef,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<(), TransportError> {
        let address = SentMessage {
            chat_id: target.chat_id,
            message_id: target.message_id,
        };
        self.state
            .transport
            .edit_message(address, text, Some(keyboard))
            .await
    }
}
