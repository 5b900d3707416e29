/// Per-session clock and lifetime counters.
///
/// Elapsed time advances only when the clock timer fires, so a stopped session
/// keeps showing its final time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameMetrics {
    pub elapsed_secs: u64,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_game_start(&mut self) {
        self.elapsed_secs = 0;
    }

    pub fn on_clock_tick(&mut self) {
        self.elapsed_secs += 1;
    }

    pub fn on_game_over(&mut self) {
        self.games_played += 1;
    }

    /// Elapsed time as `MM:SS`; minutes keep counting past 59
    pub fn format_time(&self) -> String {
        let minutes = self.elapsed_secs / 60;
        let seconds = self.elapsed_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}
