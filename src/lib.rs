//! Library entry for the Landscaper dashboard, exposing the view-models,
//! API client and renderers for the binary and integration tests.

pub mod app;
pub mod args;
pub mod config;
pub mod events;
pub mod logic;
pub mod sources;
pub mod state;
pub mod ui;
