//! Luximed Studio core — prompt-to-image generation with brand watermarking.
//!
//! Wraps Gemini's multimodal generateContent API for image creation/editing
//! and idea brainstorming, and composites the Luximed brand mark onto
//! generated images. The [`studio::Studio`] orchestrator owns the submission
//! state machine a front end renders from.

pub mod ai;
pub mod assets;
pub mod data_uri;
pub mod error;
pub mod image;
pub mod models;
pub mod prompts;
pub mod studio;

pub use error::{Error, Result};
