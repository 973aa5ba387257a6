//! # llama-core
//!
//! Core types and unified error handling for the Azure Llama client.
//!
//! ## Overview
//!
//! This crate provides the shared vocabulary of the workspace:
//!
//! - [`ChatMessage`] / [`Role`] - Conversation turns owned by the caller
//! - [`GenerationParams`] - Per-call sampling parameters with range validation
//! - [`GenerationResult`] / [`Usage`] / [`FinishReason`] - Extracted output
//! - [`LlamaError`] / [`Result`] - Unified error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use llama_core::{ChatMessage, GenerationParams};
//!
//! let history = vec![
//!     ChatMessage::system("You are a helpful assistant."),
//!     ChatMessage::user("What are three interesting facts about Sweden?"),
//! ];
//! let params = GenerationParams::default().with_max_tokens(500);
//! assert!(params.validate().is_ok());
//! assert_eq!(history.len(), 2);
//! ```

pub mod error;
pub mod types;

pub use error::{LlamaError, Result, body_snippet};
pub use types::{ChatMessage, FinishReason, GenerationParams, GenerationResult, Role, Usage};
