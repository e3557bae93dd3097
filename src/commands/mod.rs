//! Subcommands of the `danci-wordsim` binary.

mod compare;
mod corr_matrix;
mod datasets_corr;
mod evaluate;
mod significance;
mod wordset;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::config::Config;
use crate::datasets::DatasetError;
use crate::embeddings::EmbeddingError;
use crate::stats::{DependentMethod, IndependentMethod, SignificanceError};

pub use compare::compare_models;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Significance(#[from] SignificanceError),
    #[error("output error: {0}")]
    Csv(#[from] csv::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Word-embedding evaluation against lexical-association datasets
#[derive(Parser, Debug)]
#[command(name = "danci-wordsim")]
#[command(author, version, about = "Evaluate word embeddings against human association judgments")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log filter, e.g. `debug` or `danci_wordsim=trace` (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Do not draw progress bars while reading embeddings
    #[arg(long, global = true)]
    pub no_progress: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Command-line flags take precedence over the environment.
    pub fn apply(&self, config: &mut Config) {
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if self.no_progress {
            config.show_progress = false;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Correlate cosine similarities with the reaction times of a priming dataset
    Evaluate {
        /// CSV dataset with `prime`, `target` and `rt` columns
        dataset: PathBuf,

        /// Embedding files (word2vec or GloVe text, optionally gzipped)
        #[arg(required = true)]
        embeddings: Vec<PathBuf>,

        /// Only load words listed in this file
        #[arg(short, long)]
        wordset: Option<PathBuf>,

        /// Also write the results to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Spearman correlations between the predictions of several models
    CorrMatrix {
        /// CSV dataset whose first two columns are the word pair
        dataset: PathBuf,

        /// Output CSV matrix
        output: PathBuf,

        #[arg(required = true)]
        embeddings: Vec<PathBuf>,

        #[arg(short, long)]
        wordset: Option<PathBuf>,
    },

    /// Test whether other models correlate with a gold dataset differently than a reference model
    Compare {
        /// Name of the reference model (file name without extension)
        reference: String,

        /// Evaluation table of every model against the gold dataset
        gold: PathBuf,

        /// Correlation matrix between the models
        matrix: PathBuf,

        /// Number of word pairs behind the correlations
        n: usize,

        #[arg(short, long, default_value = "steiger")]
        method: DependentMethod,

        #[arg(long)]
        one_tailed: bool,

        /// Confidence level of the Zou interval
        #[arg(short, long)]
        conf_level: Option<f64>,
    },

    /// Correlate a priming dataset with third-party similarity datasets
    DatasetsCorr {
        /// Priming dataset (CSV)
        priming: PathBuf,

        /// Similarity datasets (headerless TSV: word1, word2, score)
        #[arg(required = true)]
        others: Vec<PathBuf>,
    },

    /// Write the words shared by every embedding file, lowercased and sorted
    Wordset {
        #[arg(required = true)]
        embeddings: Vec<PathBuf>,

        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare two correlations that share a variable
    Dependent {
        #[arg(allow_negative_numbers = true)]
        xy: f64,
        #[arg(allow_negative_numbers = true)]
        xz: f64,
        #[arg(allow_negative_numbers = true)]
        yz: f64,
        n: usize,

        #[arg(short, long, default_value = "steiger")]
        method: DependentMethod,

        #[arg(long)]
        one_tailed: bool,

        #[arg(short, long)]
        conf_level: Option<f64>,
    },

    /// Compare two correlations from independent samples
    Independent {
        #[arg(allow_negative_numbers = true)]
        xy: f64,
        #[arg(allow_negative_numbers = true)]
        ab: f64,
        n: usize,

        /// Size of the second sample, `n` when omitted
        #[arg(long)]
        n2: Option<usize>,

        #[arg(short, long, default_value = "fisher")]
        method: IndependentMethod,

        #[arg(long)]
        one_tailed: bool,

        #[arg(short, long)]
        conf_level: Option<f64>,
    },
}

pub fn execute(command: Commands, config: &Config) -> Result<(), CommandError> {
    match command {
        Commands::Evaluate {
            dataset,
            embeddings,
            wordset,
            output,
        } => evaluate::run(&dataset, &embeddings, wordset.as_deref(), output.as_deref(), config),
        Commands::CorrMatrix {
            dataset,
            output,
            embeddings,
            wordset,
        } => corr_matrix::run(&dataset, &output, &embeddings, wordset.as_deref(), config),
        Commands::Compare {
            reference,
            gold,
            matrix,
            n,
            method,
            one_tailed,
            conf_level,
        } => {
            let options = significance::options(one_tailed, conf_level, config);
            compare::run(&reference, &gold, &matrix, n, &options, method)
        }
        Commands::DatasetsCorr { priming, others } => datasets_corr::run(&priming, &others),
        Commands::Wordset { embeddings, output } => wordset::run(&embeddings, output.as_deref(), config),
        Commands::Dependent {
            xy,
            xz,
            yz,
            n,
            method,
            one_tailed,
            conf_level,
        } => {
            let options = significance::options(one_tailed, conf_level, config);
            significance::run_dependent(xy, xz, yz, n, &options, method)
        }
        Commands::Independent {
            xy,
            ab,
            n,
            n2,
            method,
            one_tailed,
            conf_level,
        } => {
            let options = significance::options(one_tailed, conf_level, config);
            significance::run_independent(xy, ab, n, n2, &options, method)
        }
    }
}
