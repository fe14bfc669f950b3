use crate::stats::Stats;

/// HUD text derived from [`Stats`].
///
/// Each `prep_*` method refreshes one piece after the matching stat changes,
/// so the renderer never formats numbers itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub score_text: String,
    pub high_score_text: String,
    pub level_text: String,
    pub ships_left: u32,
}

impl Scoreboard {
    pub fn new(stats: &Stats) -> Self {
        let mut scoreboard = Self::default();
        scoreboard.prep_all(stats);
        scoreboard
    }

    pub fn prep_all(&mut self, stats: &Stats) {
        self.prep_score(stats);
        self.prep_high_score(stats);
        self.prep_level(stats);
        self.prep_ships(stats);
    }

    pub fn prep_score(&mut self, stats: &Stats) {
        self.score_text = format_score(stats.score);
    }

    pub fn prep_high_score(&mut self, stats: &Stats) {
        self.high_score_text = format_score(stats.high_score);
    }

    pub fn prep_level(&mut self, stats: &Stats) {
        self.level_text = stats.level.to_string();
    }

    pub fn prep_ships(&mut self, stats: &Stats) {
        self.ships_left = stats.lives_left;
    }
}

/// Rounds to the nearest ten (ties to even) and groups thousands with commas.
pub fn format_score(score: u64) -> String {
    let rounded = (score as f64 / 10.0).round_ties_even() as u64 * 10;
    let digits = rounded.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
