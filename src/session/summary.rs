//! End-of-game messages.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::i18n::Translator;
use crate::rules::GameResult;

/// Final standings of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// `(name, pairs)` per seat, in seat order.
    pub standings: Vec<(String, u32)>,
    pub result: GameResult,
}

/// Localized dialog text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryText {
    pub title: String,
    pub body: String,
}

impl GameSummary {
    #[must_use]
    pub fn new(standings: Vec<(String, u32)>, result: GameResult) -> Self {
        Self { standings, result }
    }

    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.standings.iter().map(|(_, s)| *s).max().unwrap_or(0)
    }

    fn name(&self, player: PlayerId) -> &str {
        self.standings
            .get(player.index())
            .map_or("", |(name, _)| name.as_str())
    }

    /// Render the congratulations dialog.
    ///
    /// A solo game gets a one-line message. Otherwise a header names the
    /// winner (or the tied winners, comma separated) followed by a blank
    /// line and one score line per seat.
    #[must_use]
    pub fn render(&self, translator: &dyn Translator) -> SummaryText {
        let title = translator.t("dialogs.congrats_title");

        if self.standings.len() <= 1 {
            let name = self.standings.first().map(|(n, _)| n.clone()).unwrap_or_default();
            let body = translator.translate("dialogs.single_player_win", &[("name", name)]);
            return SummaryText { title, body };
        }

        let pairs = self.best_score().to_string();
        let header = match &self.result {
            GameResult::Winner(player) => translator.translate(
                "dialogs.multi_player_header_single",
                &[("name", self.name(*player).to_string()), ("pairs", pairs)],
            ),
            GameResult::Winners(players) => {
                let names = players
                    .iter()
                    .map(|p| self.name(*p))
                    .collect::<Vec<_>>()
                    .join(", ");
                translator.translate(
                    "dialogs.multi_player_header_multi",
                    &[("names", names), ("pairs", pairs)],
                )
            }
        };

        let scores = self
            .standings
            .iter()
            .map(|(name, score)| {
                translator.translate(
                    "dialogs.multi_player_score_line",
                    &[("name", name.clone()), ("pairs", score.to_string())],
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        SummaryText {
            title,
            body: format!("{header}\n\n{scores}"),
        }
    }
}
