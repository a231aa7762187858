//! Avskrift - YouTube transcript dataset builder
//!
//! A batch CLI that turns the recent uploads of a set of YouTube channels
//! into a tabular dataset of transcripts with dense vector embeddings.
//!
//! The name "Avskrift" comes from the Norwegian word for "transcript."
//!
//! # Overview
//!
//! One run does two things, strictly in order:
//! - Collect: list recent videos per configured channel, resolve each
//!   video's transcript, and persist a cleaned, deduplicated dataset sorted
//!   by publication time
//! - Encode: embed every transcript with a local sentence embedding model
//!   and persist the dataset joined with one column per vector component
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `record` - Row-level data model and text normalization
//! - `collector` - Video listing and transcript resolution
//! - `dataset` - CSV persistence for both output files
//! - `encoder` - Embedding generation
//! - `pipeline` - Run coordination
//! - `logging` - Per-run log file setup

pub mod collector;
pub mod config;
pub mod dataset;
pub mod encoder;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod record;

pub use error::{AvskriftError, Result};
pub use record::VideoRecord;
