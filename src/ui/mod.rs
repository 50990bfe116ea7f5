/// UI module exports
pub mod app;
pub mod components;
pub mod favorites;
pub mod settings;
