// GUI module organization and public exports

// Main application state and frame painting
mod app;
// Reusable UI components (cards, badges, tables)
mod components;

// Export AppState for use in main.rs
pub use app::AppState;
// Export all component functions
pub use components::*;
