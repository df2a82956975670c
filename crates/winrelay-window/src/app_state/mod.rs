//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` for the single
//! window. Owns the winit window, the wry webview and the tokio runtime the
//! extension bridge runs on.

mod commands;
mod core;
mod event_handler;
mod init;
mod polling;
mod shutdown;

pub use core::WindowApp;
