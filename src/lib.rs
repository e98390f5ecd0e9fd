//! tldw - too long; didn't watch
//!
//! Summarize YouTube videos from the command line. Every section of a summary
//! is backed by a quote that is verified against the transcript and linked to
//! the moment it was said.
//!
//! # Architecture
//!
//! - `transcript` - Fragments, fetching, caching and quote matching
//! - `chunking` - Context budgets and transcript chunking
//! - `prompt` - Prompt rendering
//! - `gateway` - Provider adapters behind one completion trait
//! - `summary` - Summary types and model response parsing
//! - `orchestrator` - The summarization pipeline
//! - `config` - Settings, model catalog, credentials and prompt templates
//!
//! # Example
//!
//! ```rust,no_run
//! use tldw::config::{Credentials, Settings};
//! use tldw::orchestrator::Summarizer;
//! use tldw::transcript::{extract_video_id, TranscriptSource, YoutubeTranscriptSource};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let model = settings
//!         .selected_model()
//!         .ok_or_else(|| anyhow::anyhow!("no model selected"))?;
//!
//!     let video_id = extract_video_id("https://youtu.be/dQw4w9WgXcQ")?;
//!     let fragments = YoutubeTranscriptSource::default().fetch(&video_id).await?;
//!
//!     let summarizer = Summarizer::new(&settings, Credentials::from_env())?;
//!     let summary = summarizer.summarize(&fragments, None, &model).await?;
//!     println!("{}", summary.one_liner);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod orchestrator;
pub mod prompt;
pub mod summary;
pub mod transcript;

pub use error::{Result, TldwError};
