pub mod hud;

pub use hud::{HudAction, HudState};
