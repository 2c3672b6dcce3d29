//! Terminal dashboard
//!
//! State, key handling and rendering for the interactive session

pub mod components;
pub mod renderer;
pub mod state;
pub mod updaters;
pub mod utils;

pub use renderer::render_dashboard;
pub use state::DashboardState;
pub use updaters::KeyOutcome;
