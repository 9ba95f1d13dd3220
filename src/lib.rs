// src/lib.rs

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod gate;
pub mod intent;
pub mod inventory;
pub mod llm;
pub mod persona;
pub mod prompt;
pub mod slack;
pub mod state;
pub mod utils;

// Export commonly used items
pub use config::CONFIG;
pub use state::AppState;
