//! Text and keyboards shown in chat.
//!
//! Everything here is pure: the dispatcher decides when to send, these
//! functions decide what it looks like. Messages use Telegram's legacy
//! Markdown, so user-provided text goes through [`escape_markdown`].

use time::macros::format_description;
use time::OffsetDateTime;

use super::commands::CallbackAction;
use crate::domain::draft::Draft;
use crate::domain::fixtures::FixtureSpec;
use crate::domain::pick::{Pick, Picks};
use crate::domain::statistics::RoundStatistics;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::repos::submissions::Submission;
use crate::transport::{Button, Keyboard};

/// Button label width for team names.
pub const LABEL_MAX: usize = 12;
/// Team name width in the final summary table.
const TABLE_LABEL: usize = 10;
/// Upper bound for a single outbound message.
pub const MESSAGE_LIMIT: usize = 4000;

pub fn escape_markdown(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn truncate(label: &str, max: usize) -> String {
    label.chars().take(max).collect()
}

/// "1:✅ 2:⚪ ..." for each slot of the draft.
pub fn status_line(draft: &Draft) -> String {
    draft
        .slots()
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let mark = if slot.is_some() { "✅" } else { "⚪" };
            format!("{}:{mark}", i + 1)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn picks_line(picks: &Picks) -> String {
    picks
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_timestamp(ts: OffsetDateTime) -> String {
    let fmt = format_description!("[day]/[month]/[year] [hour]:[minute] UTC");
    ts.format(&fmt).unwrap_or_else(|_| ts.to_string())
}

/// Shared grid text. With `actor`, shows that participant's fill status.
pub fn grid_text(round_name: &str, actor: Option<&Draft>) -> String {
    let mut lines = vec![
        format!("📊 *{}*", escape_markdown(&round_name.to_uppercase())),
        String::new(),
    ];

    if let Some(draft) = actor {
        lines.push("📝 *PALPITES ATUAIS:*".to_string());
        lines.push(status_line(draft));
        lines.push(String::new());
        let missing = draft.missing().len();
        if missing > 0 {
            lines.push(format!("⚠️ *Faltam {missing} jogos*"));
        } else {
            lines.push("✅ *Todos os jogos preenchidos!*".to_string());
        }
        lines.push(String::new());
    }

    lines.push("Clique nos botões abaixo para fazer seus palpites!".to_string());
    lines.join("\n")
}

/// 14 rows of `[n] [home] [X] [away]` plus submit and "my picks".
pub fn grid_keyboard(fixtures: &[FixtureSpec], actor: Option<&Draft>) -> Keyboard {
    let mut rows: Vec<Vec<Button>> = fixtures
        .iter()
        .enumerate()
        .map(|(i, fixture)| {
            let current = actor.and_then(|d| d.get(i));
            let home = truncate(&fixture.home, LABEL_MAX);
            let away = truncate(&fixture.away, LABEL_MAX);

            let home_text = if current == Some(Pick::Home) {
                format!("✅{home}")
            } else {
                home
            };
            let draw_text = if current == Some(Pick::Draw) { "✅X" } else { "X" };
            let away_text = if current == Some(Pick::Away) {
                format!("{away}✅")
            } else {
                away
            };

            let pick = |pick| CallbackAction::Pick { index: i, pick }.encode();
            vec![
                Button::new((i + 1).to_string(), CallbackAction::Noop(i).encode()),
                Button::new(home_text, pick(Pick::Home)),
                Button::new(draw_text, pick(Pick::Draw)),
                Button::new(away_text, pick(Pick::Away)),
            ]
        })
        .collect();

    rows.push(vec![Button::new(
        "🚀 ENVIAR PALPITES",
        CallbackAction::Submit.encode(),
    )]);
    rows.push(vec![Button::new(
        "📊 VER MEUS PALPITES",
        CallbackAction::MyPicks.encode(),
    )]);
    Keyboard { rows }
}

/// Table of the submitter's 14 picks shown on the shared message.
pub fn final_summary(
    round_name: &str,
    participant_name: &str,
    fixtures: &[FixtureSpec],
    picks: &Picks,
) -> String {
    let mut lines = vec![
        format!("📊 *{}*", escape_markdown(&round_name.to_uppercase())),
        format!(
            "✅ *PALPITES DE {}*",
            escape_markdown(&participant_name.to_uppercase())
        ),
        String::new(),
        "| JG | 1 | MANDANTE | X | VISITANTE | 2 |".to_string(),
        "|----|---|----------|---|-----------|---|".to_string(),
    ];

    for (i, (fixture, pick)) in fixtures.iter().zip(picks.iter()).enumerate() {
        let mark = |p: Pick| if *pick == p { "✅" } else { "□" };
        let home = format!("{:<width$}", truncate(&fixture.home, TABLE_LABEL), width = TABLE_LABEL);
        let away = format!("{:<width$}", truncate(&fixture.away, TABLE_LABEL), width = TABLE_LABEL);
        lines.push(format!(
            "| {:2} | {} | {} | {} | {} | {} |",
            i + 1,
            mark(Pick::Home),
            escape_markdown(&home),
            mark(Pick::Draw),
            escape_markdown(&away),
            mark(Pick::Away),
        ));
    }

    lines.push(String::new());
    lines.push("🎉 *Palpites enviados com sucesso!*".to_string());
    lines.join("\n")
}

/// Private message to the submitter.
pub fn private_confirmation(picks: &Picks) -> String {
    format!(
        "✅ *Palpites enviados com sucesso!*\n\n📋 Seus palpites para a rodada:\n`{}`\n\nBoa sorte! 🍀",
        picks_line(picks)
    )
}

/// Toast after a pick button.
pub fn pick_toast(index: usize, pick: Pick) -> String {
    let what = match pick {
        Pick::Home => "Time 1",
        Pick::Draw => "Empate",
        Pick::Away => "Time 2",
    };
    format!("✅ Jogo {}: {what}", index + 1)
}

pub const SUBMITTED_ALERT: &str = "🎉 Palpites enviados com sucesso!";
pub const NO_DRAFT_ALERT: &str = "📝 Você ainda não começou a preencher seus palpites.";
pub const NO_DRAFT_TEXT: &str =
    "📝 Você ainda não começou a preencher seus palpites. Vá para o grupo e clique na planilha!";
pub const NO_ACTIVE_ROUND: &str = "❌ Nenhuma rodada ativa.";
pub const NO_PICKS_YET: &str = "📊 Nenhum palpite ainda.";
pub const NO_SUBMISSIONS: &str = "❌ Nenhum palpite enviado.";
pub const ADMIN_ONLY: &str = "❌ Apenas o admin pode usar.";
pub const ADMIN_ONLY_NEW_ROUND: &str = "❌ Apenas o administrador pode usar /nova_rodada.";
pub const GRID_NOT_POSTED: &str = "⚠️ A planilha desta rodada não está mais disponível.";
pub const STALE_GRID: &str = "⚠️ Esta planilha é de uma rodada anterior.";
pub const FLOW_CANCELLED: &str = "❌ Operação cancelada.";
pub const NOTHING_TO_CANCEL: &str = "Nada para cancelar.";
pub const SAVE_FAILED: &str = "❌ Erro interno ao salvar.";
pub const GRID_POST_FAILED: &str =
    "⚠️ Rodada criada, mas não foi possível publicar a planilha no grupo.";

/// Alert for "my picks" on the grid, after submission.
pub fn submitted_alert(picks: &Picks) -> String {
    format!("📋 SEUS PALPITES ENVIADOS:\n{}", picks_line(picks))
}

fn draft_status(draft: &Draft) -> &'static str {
    if draft.missing().is_empty() {
        "✅ PRONTO PARA ENVIAR"
    } else {
        "⚠️ INCOMPLETO"
    }
}

/// Alert for "my picks" on the grid, before submission.
pub fn draft_alert(draft: &Draft) -> String {
    let hint = if draft.missing().is_empty() {
        "🚀 Clique em ENVIAR para confirmar!"
    } else {
        "⚠️ Complete todos os jogos!"
    };
    format!(
        "📝 SEUS RASCUNHOS ({}):\n{}\n\n{hint}",
        draft_status(draft),
        status_line(draft)
    )
}

/// `/meus_palpites` reply for a stored submission.
pub fn submission_view(round_name: &str, submission: &Submission) -> String {
    format!(
        "📋 *SEUS PALPITES - {}*\n\n`{}`\n\n⏰ Enviado em: {}",
        escape_markdown(round_name),
        picks_line(&submission.picks),
        format_timestamp(submission.created_at)
    )
}

/// `/meus_palpites` reply for a draft in progress.
pub fn draft_view(round_name: &str, draft: &Draft) -> String {
    format!(
        "📋 *RASCUNHO ATUAL - {}*\n\n{}\n\n*Status:* {}\n\n⚠️ *Atenção:* Estes são apenas rascunhos. Clique em 'ENVIAR PALPITES' na planilha do grupo para confirmar.",
        escape_markdown(round_name),
        status_line(draft),
        draft_status(draft)
    )
}

pub fn statistics_text(round_name: &str, stats: &RoundStatistics) -> String {
    let mut out = format!(
        "📊 *ESTATÍSTICAS - {}*\n\n👥 Total de palpitadores: {}\n\n",
        escape_markdown(round_name),
        stats.total_participants
    );
    for fixture in &stats.fixtures {
        let home = escape_markdown(&fixture.home_label);
        let away = escape_markdown(&fixture.away_label);
        if fixture.no_picks {
            out.push_str(&format!(
                "{}. {home} x {away}\nNinguém votou ainda.\n\n",
                fixture.position
            ));
            continue;
        }
        let c = &fixture.counts;
        let p = &fixture.percentages;
        out.push_str(&format!(
            "{}. *{home} x {away}*\n1: {} ({:.1}%) | X: {} ({:.1}%) | 2: {} ({:.1}%)\n\n",
            fixture.position, c.home, p.home, c.draw, p.draw, c.away, p.away
        ));
    }
    out.trim_end().to_string()
}

/// Admin listing of every submission, split to fit the message limit.
pub fn submissions_listing(round_name: &str, submissions: &[Submission]) -> Vec<String> {
    let mut text = format!(
        "📋 *PALPITES - {}*\n\n👥 Total: {} palpitadores\n\n",
        escape_markdown(round_name),
        submissions.len()
    );
    for s in submissions {
        let handle = match s.handle.as_deref() {
            Some(h) if !h.is_empty() => format!("@{}", escape_markdown(h)),
            _ => "(sem username)".to_string(),
        };
        text.push_str(&format!(
            "👤 {} ({handle})\n📋 {}\n⏰ {}\n{}\n",
            escape_markdown(&s.display_name),
            picks_line(&s.picks),
            format_timestamp(s.created_at),
            "─".repeat(30)
        ));
    }
    chunk(&text, MESSAGE_LIMIT)
}

/// Split on line boundaries so each piece has at most `limit` characters.
/// A single line longer than `limit` is cut on character boundaries.
pub fn chunk(text: &str, limit: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();
        if current_len + line_len > limit && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if line_len > limit {
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(limit) {
                parts.push(piece.iter().collect());
            }
            continue;
        }
        current.push_str(line);
        current_len += line_len;
    }
    if !current.trim().is_empty() {
        parts.push(current);
    }
    parts
        .into_iter()
        .map(|p| p.trim_end().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

pub fn help_text(in_group: bool) -> String {
    if in_group {
        "🤖 *Bot da Loteca*\n\nUse a *planilha* publicada no grupo quando a rodada for aberta."
            .to_string()
    } else {
        "🤖 *Bot da Loteca*\n\nComandos disponíveis:\n/nova\\_rodada (admin)\n/estatisticas\n/ver\\_palpites (admin)\n/meus\\_palpites\n/cancelar\n\nA planilha aparece *no grupo*, não aqui."
            .to_string()
    }
}

pub fn ask_round_name() -> String {
    "🆕 *Criar nova rodada*\n\nEnvie o *nome do concurso*.\nEx.: Concurso Loteca 1234\n\nUse /cancelar para desistir."
        .to_string()
}

pub fn ask_fixtures() -> String {
    "📋 Envie agora os *14 jogos separados por vírgula*.\n\nExemplo:\nFlamengo x Vasco, São Paulo x Corinthians, ... , Náutico x Sport"
        .to_string()
}

pub fn round_created(name: &str) -> String {
    format!("🎉 Rodada *{}* criada com sucesso!", escape_markdown(name))
}

/// Chat reply for a domain failure.
pub fn error_reply(err: &DomainError) -> String {
    match err {
        DomainError::IncompleteDraft(missing) => {
            let numbers: Vec<String> = missing.iter().map(|i| (i + 1).to_string()).collect();
            format!("⚠️ Complete os jogos: {}", numbers.join(", "))
        }
        DomainError::Conflict(ConflictKind::DuplicateSubmission, _) => {
            "⚠️ Você já enviou seus palpites para esta rodada.".to_string()
        }
        DomainError::NotFound(NotFoundKind::Round, _) => NO_ACTIVE_ROUND.to_string(),
        DomainError::Validation(kind, _) => match kind {
            ValidationKind::FixtureCount => {
                "❌ Envie exatamente 14 jogos separados por vírgula.".to_string()
            }
            ValidationKind::FixtureFormat => "❌ Formato inválido. Use Time1 x Time2.".to_string(),
            ValidationKind::EmptyLabel => {
                "❌ Nome de time vazio. Use Time1 x Time2.".to_string()
            }
            ValidationKind::EmptyRoundName => {
                "❌ O nome do concurso não pode ser vazio.".to_string()
            }
            ValidationKind::StaleRound => STALE_GRID.to_string(),
            ValidationKind::FixtureIndexOutOfRange | ValidationKind::InvalidPick => {
                "❌ Jogo inválido.".to_string()
            }
            _ => "❌ Dados inválidos.".to_string(),
        },
        DomainError::Infra(..) => SAVE_FAILED.to_string(),
        _ => "❌ Não foi possível concluir a operação.".to_string(),
    }
}
