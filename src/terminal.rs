//! Episode end conditions
//!
//! Like reward terms, conditions keep per-episode counters that are cleared on
//! `reset` and advanced once per `is_terminal` call.

use serde::{Deserialize, Serialize};

use crate::game::GameSnapshot;

/// Decides whether the current tick ends the episode
pub trait TerminalCondition {
    fn reset(&mut self, initial_state: &GameSnapshot);
    fn is_terminal(&mut self, state: &GameSnapshot) -> bool;
}

/// Every available terminal condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Terminal {
    /// Ends after `max_steps` calls
    Timeout {
        max_steps: u32,
        #[serde(skip)]
        steps: u32,
    },
    /// Ends after `max_steps` consecutive calls without a ball touch
    NoTouchTimeout {
        max_steps: u32,
        #[serde(skip)]
        steps: u32,
    },
    /// Ends when either team's score changes
    GoalScored {
        #[serde(skip)]
        scores: (u32, u32),
    },
}

impl Terminal {
    pub fn timeout(max_steps: u32) -> Self {
        Terminal::Timeout { max_steps, steps: 0 }
    }

    pub fn no_touch_timeout(max_steps: u32) -> Self {
        Terminal::NoTouchTimeout { max_steps, steps: 0 }
    }

    pub fn goal_scored() -> Self {
        Terminal::GoalScored { scores: (0, 0) }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Terminal::Timeout { .. } => "timeout",
            Terminal::NoTouchTimeout { .. } => "no_touch_timeout",
            Terminal::GoalScored { .. } => "goal_scored",
        }
    }
}

impl TerminalCondition for Terminal {
    fn reset(&mut self, initial_state: &GameSnapshot) {
        match self {
            Terminal::Timeout { steps, .. } | Terminal::NoTouchTimeout { steps, .. } => *steps = 0,
            Terminal::GoalScored { scores } => {
                *scores = (initial_state.blue_score, initial_state.orange_score);
            }
        }
    }

    fn is_terminal(&mut self, state: &GameSnapshot) -> bool {
        match self {
            Terminal::Timeout { max_steps, steps } => {
                *steps += 1;
                *steps >= *max_steps
            }
            Terminal::NoTouchTimeout { max_steps, steps } => {
                if state.any_touch() {
                    *steps = 0;
                    false
                } else {
                    *steps += 1;
                    *steps >= *max_steps
                }
            }
            Terminal::GoalScored { scores } => {
                let current = (state.blue_score, state.orange_score);
                let changed = current != *scores;
                *scores = current;
                changed
            }
        }
    }
}

/// Evaluate every condition (so all counters advance) and report the first that fired
pub fn first_terminal(conditions: &mut [Terminal], state: &GameSnapshot) -> Option<&'static str> {
    let mut fired = None;
    for condition in conditions.iter_mut() {
        if condition.is_terminal(state) && fired.is_none() {
            fired = Some(condition.name());
        }
    }
    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{PlayerRecord, Team};

    fn touched(touch: bool) -> GameSnapshot {
        GameSnapshot {
            players: vec![PlayerRecord {
                ball_touched: touch,
                ..PlayerRecord::new(1, Team::Blue)
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_timeout_fires_at_max() {
        let state = GameSnapshot::default();
        let mut timeout = Terminal::timeout(3);
        timeout.reset(&state);
        assert!(!timeout.is_terminal(&state));
        assert!(!timeout.is_terminal(&state));
        assert!(timeout.is_terminal(&state));

        timeout.reset(&state);
        assert!(!timeout.is_terminal(&state));
    }

    #[test]
    fn test_no_touch_resets_on_touch() {
        let mut cond = Terminal::no_touch_timeout(2);
        cond.reset(&touched(false));
        assert!(!cond.is_terminal(&touched(false)));
        assert!(!cond.is_terminal(&touched(true)));
        assert!(!cond.is_terminal(&touched(false)));
        assert!(cond.is_terminal(&touched(false)));
    }

    #[test]
    fn test_goal_scored() {
        let mut cond = Terminal::goal_scored();
        let initial = GameSnapshot {
            blue_score: 1,
            ..Default::default()
        };
        cond.reset(&initial);
        assert!(!cond.is_terminal(&initial));

        let scored = GameSnapshot {
            blue_score: 1,
            orange_score: 1,
            ..Default::default()
        };
        assert!(cond.is_terminal(&scored));
    }

    #[test]
    fn test_first_terminal_advances_all() {
        let state = GameSnapshot {
            orange_score: 1,
            ..Default::default()
        };
        let mut conditions = vec![Terminal::goal_scored(), Terminal::timeout(1)];
        for c in conditions.iter_mut() {
            c.reset(&GameSnapshot::default());
        }
        assert_eq!(first_terminal(&mut conditions, &state), Some("goal_scored"));
        assert_eq!(conditions[1], Terminal::Timeout { max_steps: 1, steps: 1 });
    }

    #[test]
    fn test_serde_skips_counters() {
        let json = serde_json::to_string(&Terminal::no_touch_timeout(2500)).unwrap();
        assert_eq!(json, r#"{"kind":"no_touch_timeout","max_steps":2500}"#);
        let back: Terminal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Terminal::no_touch_timeout(2500));
    }
}
