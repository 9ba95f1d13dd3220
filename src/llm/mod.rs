// src/llm/mod.rs

pub mod gemini;

pub use gemini::GeminiClient;
