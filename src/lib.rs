// Library surface for the binary and for headless/integration tests.
pub mod app_dirs;
pub mod config;
pub mod content;
pub mod document;
pub mod layout;
pub mod links;
pub mod page;
pub mod ripple;
pub mod runtime;
pub mod spy;
pub mod timer;
pub mod typewriter;
pub mod ui;
