//! Inbound command and callback-data parsing.

use crate::domain::pick::Pick;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    NewRound,
    Cancel,
    Stats,
    Submissions,
    MyPicks,
}

impl Command {
    /// First token of `text` as a known command. Accepts a `@botname`
    /// suffix and the Portuguese aliases.
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        let name = first.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name).to_ascii_lowercase();
        match name.as_str() {
            "start" | "help" | "ajuda" => Some(Command::Start),
            "new_round" | "nova_rodada" => Some(Command::NewRound),
            "cancel" | "cancelar" => Some(Command::Cancel),
            "stats" | "estatisticas" => Some(Command::Stats),
            "submissions" | "ver_palpites" => Some(Command::Submissions),
            "my_picks" | "meus_palpites" => Some(Command::MyPicks),
            _ => None,
        }
    }
}

/// Text starting with `/` that is not a known command is still a command
/// for routing purposes (never fed to the admin flow as data).
pub fn looks_like_command(text: &str) -> bool {
    text.trim_start().starts_with('/')
}

/// Button payloads on the shared grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Fixture number cell; pressing it does nothing.
    Noop(usize),
    Pick { index: usize, pick: Pick },
    Submit,
    MyPicks,
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "enviar" => return Some(CallbackAction::Submit),
            "meus_palpites" => return Some(CallbackAction::MyPicks),
            _ => {}
        }
        let (kind, index) = data.split_once('_')?;
        let index: usize = index.parse().ok()?;
        match kind {
            "noop" => Some(CallbackAction::Noop(index)),
            "t1" => Some(CallbackAction::Pick {
                index,
                pick: Pick::Home,
            }),
            "x" => Some(CallbackAction::Pick {
                index,
                pick: Pick::Draw,
            }),
            "t2" => Some(CallbackAction::Pick {
                index,
                pick: Pick::Away,
            }),
            _ => None,
        }
    }

    pub fn encode(&self) -> String {
        match self {
            CallbackAction::Noop(i) => format!("noop_{i}"),
            CallbackAction::Pick { index, pick } => {
                let kind = match pick {
                    Pick::Home => "t1",
                    Pick::Draw => "x",
                    Pick::Away => "t2",
                };
                format!("{kind}_{index}")
            }
            CallbackAction::Submit => "enviar".to_string(),
            CallbackAction::MyPicks => "meus_palpites".to_string(),
        }
    }
}
