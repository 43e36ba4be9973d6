//! Pathwise - personalized learning paths from the terminal
//!
//! Pathwise turns a topic and a few preferences into an AI-generated
//! learning path, tracks progress step by step, and offers a chat assistant
//! scoped to the path being studied. Paths live in a hosted table store;
//! generation and chat are delegated to hosted AI functions.

pub mod ai;
pub mod app;
pub mod auth;
pub mod config;
pub mod learning;
pub mod model;
pub mod store;
pub mod ui;

pub use app::App;
pub use config::Config;
