//! # danci-wordsim
//!
//! Evaluates how closely word-embedding models track human lexical-association
//! judgments (priming reaction times, third-party similarity ratings) and tests
//! whether two such correlations differ significantly.
//!
//! ## Modules
//!
//! - [`embeddings`] - streaming reader for plain or gzipped embedding files, and the in-memory table
//! - [`similarity`] - cosine similarity between embedding vectors
//! - [`stats`] - rank correlations and the correlation-difference tests (Steiger, Zou, Fisher)
//! - [`evaluation`] - correlates embedding predictions with gold scores or with another model
//! - [`datasets`] - dataset records, wordsets, correlation matrix and gold table I/O
//! - [`report`] - evaluation tables and significance result dumps
//! - [`commands`] - the subcommands behind the binary
//!
//! ## Example
//!
//! ```rust
//! use danci_wordsim::stats::{dependent_corr, DependentMethod, TestOptions};
//!
//! let verdict = dependent_corr(0.396, 0.179, 0.088, 200, &TestOptions::default(), DependentMethod::Steiger)
//!     .unwrap();
//! assert!(verdict.p_value().unwrap() < 0.05);
//! ```

pub mod commands;
pub mod config;
pub mod datasets;
pub mod embeddings;
pub mod evaluation;
pub mod logging;
pub mod report;
pub mod similarity;
pub mod stats;

pub use embeddings::{Diagnostics, EmbeddingError, EmbeddingSource, EmbeddingTable, ReaderOptions};
pub use evaluation::{correlation_matrix, embedding_correlation, evaluate, Evaluation, ScoredPair};
pub use similarity::cosine_similarity;
pub use stats::{
    dependent_corr, independent_corr, CorrelationResult, DependentMethod, IndependentMethod,
    SignificanceError, SignificanceVerdict, TestOptions,
};
