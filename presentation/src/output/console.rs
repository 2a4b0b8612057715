//! Console output formatter for the match narrative

use crate::board::BoardState;
use crate::output::formatter::EventFormatter;
use colored::Colorize;
use werewolf_domain::{EventEnvelope, Faction, GameEvent, Phase, Role, Standing, WitchAction};

/// Colored, human-readable narrative
#[derive(Debug, Default)]
pub struct ConsoleFormatter {
    /// Last (day, is_night) section printed
    section: Option<(u32, bool)>,
}

impl ConsoleFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strip ANSI colors from all subsequent output
    pub fn disable_color() {
        colored::control::set_override(false);
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}", title.cyan().bold(), "-".repeat(40))
    }

    fn role_colored(role: Role) -> String {
        let name = role.to_string();
        match role.faction() {
            Faction::Wolves => name.red().bold().to_string(),
            Faction::Villagers => name.green().to_string(),
        }
    }

    /// Standings table, best first
    pub fn standings_table(board: &BoardState, standings: &[Standing]) -> String {
        let mut output = String::new();
        for (rank, standing) in standings.iter().enumerate() {
            output.push_str(&format!(
                "  {:>2}. {:<28} {:>4}\n",
                rank + 1,
                board.label(standing.seat),
                standing.points
            ));
        }
        output
    }

    fn match_started(board: &BoardState) -> String {
        let mut output = Self::header(&format!(
            "Match {} of {}",
            board.match_number, board.total_matches
        ));
        for view in &board.seats {
            output.push_str(&format!(
                "\n  {:<28} {}",
                board.label(view.seat),
                Self::role_colored(view.role)
            ));
        }
        output
    }
}

impl EventFormatter for ConsoleFormatter {
    fn format_event(&mut self, envelope: &EventEnvelope, board: &BoardState) -> Option<String> {
        let event = &envelope.event;
        let line = match event {
            GameEvent::MatchStarted { .. } => {
                self.section = None;
                Self::match_started(board)
            }
            GameEvent::PhaseBoundary { phase, .. } if *phase == Phase::GameOver => return None,
            GameEvent::PhaseBoundary { day, phase } => {
                let step = format!("{} {}", "->".cyan(), phase.display_name().dimmed());
                let section = (*day, phase.is_night());
                if self.section == Some(section) {
                    step
                } else {
                    self.section = Some(section);
                    let half = if phase.is_night() { "Night" } else { "Day" };
                    format!("{}\n{}", Self::section_header(&format!("{} {}", half, day)), step)
                }
            }
            GameEvent::Speech { seat, speech, text } => format!(
                "  {} {}: {}",
                board.label(*seat).yellow().bold(),
                speech.label().dimmed(),
                text
            ),
            GameEvent::Death { .. } | GameEvent::Retaliation { .. } => {
                format!("  {} {}", "x".red().bold(), event.narrative().red())
            }
            GameEvent::WitchDecision {
                decision: WitchAction::Poisoned { .. } | WitchAction::Saved { .. },
                ..
            } => format!("  {}", event.narrative().magenta()),
            GameEvent::NoAction { seat, decision } => format!(
                "  {}",
                format!(
                    "{}: no action taken for {}",
                    board.label(*seat),
                    decision.description()
                )
                .dimmed()
            ),
            GameEvent::FactionResult { winner, day, .. } => {
                let verdict = format!("{} win on day {}", winner.display_name(), day);
                let verdict = match winner {
                    Faction::Wolves => verdict.red().bold(),
                    Faction::Villagers => verdict.green().bold(),
                };
                format!("\n{} {}", "Result:".cyan().bold(), verdict)
            }
            GameEvent::AwardResult { standings, .. } => format!(
                "  {}{}\n{}",
                event.narrative().yellow(),
                Self::section_header("Standings"),
                Self::standings_table(board, standings).trim_end()
            ),
            GameEvent::MatchAborted { .. } => {
                format!("\n{} {}", "!".yellow().bold(), event.narrative().yellow().bold())
            }
            GameEvent::TournamentFinished { .. } => return None,
            _ => format!("  {}", event.narrative()),
        };
        Some(line)
    }

    fn format_summary(&mut self, board: &BoardState) -> Option<String> {
        let champion = board.champion?;
        let mut output = String::from("\n");
        output.push_str(&Self::header("Tournament Results"));
        output.push_str(&format!(
            "\n{} {} played, {} aborted\n\n",
            "Matches:".cyan().bold(),
            board.matches_completed,
            board.matches_aborted
        ));
        output.push_str(&Self::standings_table(board, &board.standings));
        output.push_str(&format!(
            "\n{} {}\n",
            "Champion:".green().bold(),
            board.label(champion).bold()
        ));
        Some(output)
    }
}
