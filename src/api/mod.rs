// src/api/mod.rs

pub mod http;
