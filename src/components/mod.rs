pub mod app;
pub mod controls_panel;
pub mod run_view;
pub mod stats_panel;

pub use app::App;
