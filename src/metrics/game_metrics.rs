use std::time::{Duration, Instant};

use crate::game::TickEvent;

/// Per-process counters shown in the header, never persisted
pub struct GameMetrics {
    pub round_start: Instant,
    pub elapsed_time: Duration,
    pub rounds_played: u32,
    pub food_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            rounds_played: 0,
            food_eaten: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.round_start.elapsed();
    }

    pub fn on_round_start(&mut self) {
        self.round_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_round_over(&mut self) {
        self.rounds_played += 1;
        self.on_round_start();
    }

    /// Count what a tick did, a finished round also restarts the clock
    pub fn on_tick(&mut self, event: TickEvent) {
        match event {
            TickEvent::AteFood => self.food_eaten += 1,
            TickEvent::RoundOver(_) | TickEvent::GridFilled => self.on_round_over(),
            TickEvent::Moved => {}
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
