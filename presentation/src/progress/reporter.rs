//! Tournament progress reporting

use crate::board::{BoardState, LineSink};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Match counter bar; event lines are printed above it
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new(total_matches: u32) -> Self {
        let bar = ProgressBar::new(u64::from(total_matches));
        bar.set_style(Self::match_style());
        bar.set_prefix("Tournament");
        Self { bar }
    }

    /// No bar, lines go straight to stdout
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    fn match_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl LineSink for ProgressReporter {
    fn line(&mut self, text: &str) {
        if self.bar.is_hidden() {
            println!("{}", text);
        } else {
            self.bar.println(text);
        }
    }

    fn progress(&mut self, board: &BoardState) {
        self.bar.set_position(u64::from(board.matches_done()));
        if let Some(phase) = board.phase
            && board.match_number > 0
        {
            self.bar.set_message(format!(
                "match {} · day {} · {} · {} alive",
                board.match_number,
                board.day,
                phase.display_name(),
                board.alive_count()
            ));
        }
    }

    fn finish(&mut self, board: &BoardState) {
        let message = match board.champion {
            Some(_) => format!("{}", "complete!".green()),
            None => format!("{}", "stopped".yellow()),
        };
        self.bar.finish_with_message(message);
    }
}
