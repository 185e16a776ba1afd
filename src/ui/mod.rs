// src/ui/mod.rs
pub mod history;
pub mod results;
pub mod trail;
pub mod upload;
