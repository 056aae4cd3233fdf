//! Construction-time settings for a game session.

pub const BOARD_WIDTH: i16 = 60;
pub const BOARD_HEIGHT: i16 = 20;
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Milliseconds between ticks at the start of a game.
pub const INITIAL_TICK_INTERVAL_MS: u64 = 150;
pub const TICK_INTERVAL_STEP_MS: u64 = 5;
pub const TICK_INTERVAL_FLOOR_MS: u64 = 50;

pub const SCORE_PER_FOOD: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub board_width: i16,
    pub board_height: i16,
    pub initial_snake_length: usize,
    pub initial_tick_interval_ms: u64,
    pub tick_interval_step_ms: u64,
    pub tick_interval_floor_ms: u64,
    pub score_per_food: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            initial_snake_length: INITIAL_SNAKE_LENGTH,
            initial_tick_interval_ms: INITIAL_TICK_INTERVAL_MS,
            tick_interval_step_ms: TICK_INTERVAL_STEP_MS,
            tick_interval_floor_ms: TICK_INTERVAL_FLOOR_MS,
            score_per_food: SCORE_PER_FOOD,
        }
    }
}

impl GameConfig {
    /// Panics if the settings cannot describe a playable game.
    pub fn validate(&self) {
        assert!(self.board_width > 0 && self.board_height > 0, "board must not be empty");
        assert!(self.initial_snake_length >= 3, "snake starts with at least 3 segments");
        // The snake starts centered and trails left, so its tail sits at width / 2 - len + 1
        assert!(
            self.initial_snake_length <= (self.board_width / 2 + 1) as usize,
            "starting snake does not fit left of the board center"
        );
        assert!(self.tick_interval_floor_ms > 0, "tick interval floor must be positive");
        assert!(
            self.tick_interval_floor_ms <= self.initial_tick_interval_ms,
            "tick interval floor above the starting interval"
        );
    }

    /// Tick interval after one more food has been eaten.
    pub fn next_tick_interval(&self, current_ms: u64) -> u64 {
        current_ms
            .saturating_sub(self.tick_interval_step_ms)
            .max(self.tick_interval_floor_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_classic_settings() {
        let config = GameConfig::default();
        assert_eq!((config.board_width, config.board_height), (60, 20));
        assert_eq!(config.initial_tick_interval_ms, 150);
        assert_eq!(config.tick_interval_step_ms, 5);
        assert_eq!(config.tick_interval_floor_ms, 50);
        assert_eq!(config.score_per_food, 10);
        config.validate();
    }

    #[test]
    fn tick_interval_never_drops_below_floor() {
        let config = GameConfig::default();
        assert_eq!(config.next_tick_interval(150), 145);
        assert_eq!(config.next_tick_interval(53), 50);
        assert_eq!(config.next_tick_interval(50), 50);

        let mut interval = config.initial_tick_interval_ms;
        for _ in 0..100 {
            interval = config.next_tick_interval(interval);
            assert!((50..=150).contains(&interval));
        }
        assert_eq!(interval, 50);
    }

    #[test]
    #[should_panic(expected = "floor above")]
    fn validate_rejects_floor_above_start() {
        let config = GameConfig { tick_interval_floor_ms: 200, ..GameConfig::default() };
        config.validate();
    }

    #[test]
    #[should_panic(expected = "does not fit left of the board center")]
    fn validate_rejects_snake_hanging_off_the_board() {
        let config = GameConfig { board_width: 10, initial_snake_length: 8, ..GameConfig::default() };
        config.validate();
    }

    #[test]
    fn longest_starting_snake_reaches_the_left_edge() {
        let config = GameConfig { board_width: 10, initial_snake_length: 6, ..GameConfig::default() };
        config.validate();
        let config = GameConfig { board_width: 9, initial_snake_length: 5, ..GameConfig::default() };
        config.validate();
    }

    #[test]
    #[should_panic(expected = "board must not be empty")]
    fn validate_rejects_empty_board() {
        let config = GameConfig { board_height: 0, ..GameConfig::default() };
        config.validate();
    }
}
