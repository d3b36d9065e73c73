//! Generative content for the Snowglobe village: songs, drawings, and
//! video frames from a free-text description.
//!
//! # Modules
//!
//! - [`client`] -- [`GatewayClient`] and its configuration
//! - [`error`] -- [`StudioError`]
//! - [`prompt`] -- `minijinja` prompt templates
//! - [`request`] -- Request/response payloads and response field extraction

pub mod client;
pub mod error;
pub mod prompt;
pub mod request;

pub use client::{GatewayClient, GatewayConfig};
pub use error::StudioError;
pub use request::{ContentKind, GeneratedContent, GenerationRequest};
