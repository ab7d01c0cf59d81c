// Text shown around the board. Written by the game loop, rendered by yew.
use std::rc::Rc;

use yew::{Reducible, UseReducerHandle};

use crate::lifecycle::START_LABEL;
use crate::paint::Hud;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudState {
    pub status: String,
    pub score: u32,
    pub control_label: String,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            status: String::new(),
            score: 0,
            control_label: START_LABEL.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub enum HudAction {
    Status(String),
    Score(u32),
    ControlLabel(String),
}

impl Reducible for HudState {
    type Action = HudAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use HudAction::*;
        let mut new = (*self).clone();
        match action {
            Status(text) => new.status = text,
            Score(score) => new.score = score,
            ControlLabel(label) => new.control_label = label,
        }
        // Every tick re-sends the same text; skip the re-render when nothing changed.
        if new == *self {
            return self;
        }
        Rc::new(new)
    }
}

impl Hud for UseReducerHandle<HudState> {
    fn show_status(&mut self, text: &str) {
        self.dispatch(HudAction::Status(text.to_string()));
    }

    fn show_score(&mut self, score: u32) {
        self.dispatch(HudAction::Score(score));
    }

    fn set_control_label(&mut self, label: &str) {
        self.dispatch(HudAction::ControlLabel(label.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reducer_updates_one_field_at_a_time() {
        let state = Rc::new(HudState::default());
        let state = state.reduce(HudAction::Status("Game is on!".into()));
        let state = state.reduce(HudAction::Score(3));
        assert_eq!(
            *state,
            HudState {
                status: "Game is on!".into(),
                score: 3,
                control_label: "Start".into(),
            }
        );
    }

    #[test]
    fn unchanged_value_keeps_same_state() {
        let state = Rc::new(HudState::default());
        let same = state.clone().reduce(HudAction::Score(0));
        assert!(Rc::ptr_eq(&state, &same));
        let relabeled = state.clone().reduce(HudAction::ControlLabel("Re-Play".into()));
        assert!(!Rc::ptr_eq(&state, &relabeled));
    }
}
