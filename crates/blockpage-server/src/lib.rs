//! Development server with live reload for blockpage sites.
//!
//! Renders pages on request from the content directory, watches it for
//! changes and pushes reload messages to the browser over a WebSocket.

pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
pub use websocket::{ReloadHub, ReloadMessage};
