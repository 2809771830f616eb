// services/feedback-dash/src/lib.rs
//
// Feedback Dashboard - Library exports
//

pub mod api;
pub mod app;
pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod components;
pub mod mock;
pub mod state;
pub mod ui;
