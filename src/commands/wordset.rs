use std::fs::File;
use std::path::Path;

use tracing::info;

use super::CommandError;
use crate::config::Config;
use crate::datasets::write_wordset;
use crate::embeddings::{vocabulary_intersection, ReaderOptions};

pub(super) fn run(embeddings: &[impl AsRef<Path>], output: Option<&Path>, config: &Config) -> Result<(), CommandError> {
    let words = vocabulary_intersection(embeddings, &ReaderOptions::lowercase(), config.diagnostics())?;
    info!(words = words.len(), files = embeddings.len(), "vocabulary intersection");

    match output {
        Some(path) => write_wordset(File::create(path)?, &words)?,
        None => write_wordset(std::io::stdout().lock(), &words)?,
    }
    Ok(())
}
