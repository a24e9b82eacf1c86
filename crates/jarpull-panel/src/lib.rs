//! Pterodactyl client-API adapter for jarpull.
//!
//! Implements `jarpull_core::PanelClientPort` over HTTP: credential
//! verification, server listing, and the two file operations (pull,
//! decompress) the installation orchestrator drives.

mod client;
mod config;
mod error;
mod http;
mod models;

pub use client::{DefaultPanelClient, PanelClient};
pub use config::PanelConfig;
pub use error::{PanelHttpError, PanelHttpResult};
pub use http::{HttpBackend, ReqwestBackend};
