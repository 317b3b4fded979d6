//! Terminal layer - screen management and frame construction.

pub mod game_view;
pub mod renderer;

pub use renderer::Terminal;
