use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use super::{Diagnostics, EmbeddingError, EmbeddingFormat, EmbeddingRecord, ReaderOptions};

const LINE_TRIM: &[char] = &[' ', '\r', '\n'];

/// An embedding file whose layout has been sniffed from its first line.
///
/// The source itself holds no open handle: every call to [`records`](Self::records)
/// reopens the file, so the stream can be replayed.
#[derive(Debug, Clone)]
pub struct EmbeddingSource {
    path: PathBuf,
    format: EmbeddingFormat,
    dim: usize,
    vocab_hint: Option<usize>,
    options: ReaderOptions,
    diagnostics: Diagnostics,
}

impl EmbeddingSource {
    pub fn open(
        path: impl AsRef<Path>,
        options: ReaderOptions,
        diagnostics: Diagnostics,
    ) -> Result<Self, EmbeddingError> {
        let path = path.as_ref().to_path_buf();
        let mut reader = open_reader(&path)?;

        let mut first = String::new();
        reader
            .read_line(&mut first)
            .map_err(|source| EmbeddingError::Io {
                path: path.clone(),
                source,
            })?;

        let first = first.trim_end_matches(LINE_TRIM);
        if first.is_empty() {
            return Err(EmbeddingError::Empty { path });
        }

        let tokens: Vec<&str> = first.split(' ').collect();
        let (format, dim, vocab_hint) = if tokens.len() == 2 {
            let invalid = || EmbeddingError::InvalidHeader {
                path: path.clone(),
                line: first.to_string(),
            };
            let vocab = tokens[0].parse::<usize>().map_err(|_| invalid())?;
            let dim = tokens[1].parse::<usize>().map_err(|_| invalid())?;
            (EmbeddingFormat::Word2Vec, dim, Some(vocab))
        } else {
            (EmbeddingFormat::GloVe, tokens.len() - 1, None)
        };

        debug!(file = %path.display(), ?format, dim, "detected embedding layout");

        Ok(Self {
            path,
            format,
            dim,
            vocab_hint,
            options,
            diagnostics,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> EmbeddingFormat {
        self.format
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Vocabulary size announced by a word2vec header. Only used for progress.
    pub fn vocab_hint(&self) -> Option<usize> {
        self.vocab_hint
    }

    /// Starts a fresh pass over the file.
    pub fn records(&self) -> Result<EmbeddingIter<'_>, EmbeddingError> {
        let reader = open_reader(&self.path)?;
        Ok(EmbeddingIter {
            source: self,
            lines: reader.lines(),
            line_no: 0,
            skipped: 0,
            finished: false,
            progress: self.progress_bar(),
        })
    }

    /// Word-only pass; vectors are parsed for validation and dropped.
    pub fn words(&self) -> Result<HashSet<String>, EmbeddingError> {
        let mut words = HashSet::new();
        for record in self.records()? {
            words.insert(record?.word);
        }
        Ok(words)
    }

    fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.diagnostics.show_progress {
            return ProgressBar::hidden();
        }

        let (bar, template) = match self.vocab_hint {
            Some(total) => (
                ProgressBar::new(total as u64),
                "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} words",
            ),
            None => (
                ProgressBar::new_spinner(),
                "{spinner:.green} {msg} [{elapsed_precise}] {pos} words",
            ),
        };
        let style = ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        bar.set_message(format!("Loading '{}'", self.path.display()));
        bar
    }

    /// Decodes one data line. `None` means the line is skipped.
    fn parse_line(&self, line: &str, line_no: usize) -> Option<EmbeddingRecord> {
        let line = line.trim_end_matches(LINE_TRIM);
        let mut tokens = line.split(' ');
        let word = tokens.next()?;
        let values: Vec<&str> = tokens.collect();

        if values.len() != self.dim {
            if self.diagnostics.report_malformed {
                warn!(
                    file = %self.display_name(),
                    line = line_no,
                    found = values.len(),
                    expected = self.dim,
                    "embedding dimension mismatch, skipping line"
                );
            }
            return None;
        }

        let word = if self.options.lowercase {
            word.to_lowercase()
        } else {
            word.to_string()
        };

        if let Some(restrict) = &self.options.restrict {
            if !restrict.contains(&word) {
                return None;
            }
        }

        match values
            .iter()
            .map(|value| value.parse::<f32>())
            .collect::<Result<Vec<f32>, _>>()
        {
            Ok(vector) => Some(EmbeddingRecord { word, vector }),
            Err(err) => {
                if self.diagnostics.report_malformed {
                    warn!(
                        file = %self.display_name(),
                        line = line_no,
                        error = %err,
                        "unparseable embedding value, skipping line"
                    );
                }
                None
            }
        }
    }
}

/// Lazy, single-pass stream of records from an [`EmbeddingSource`].
///
/// Malformed lines are skipped. An I/O or decompression error is yielded once
/// and ends the stream.
pub struct EmbeddingIter<'a> {
    source: &'a EmbeddingSource,
    lines: io::Lines<Box<dyn BufRead>>,
    line_no: usize,
    skipped: usize,
    finished: bool,
    progress: ProgressBar,
}

impl EmbeddingIter<'_> {
    /// Lines dropped so far because they were malformed or filtered out.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn finish(&mut self) {
        self.finished = true;
        self.progress.finish_and_clear();
    }
}

impl Iterator for EmbeddingIter<'_> {
    type Item = Result<EmbeddingRecord, EmbeddingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(source)) => {
                    self.finish();
                    return Some(Err(EmbeddingError::Io {
                        path: self.source.path.clone(),
                        source,
                    }));
                }
                None => {
                    self.finish();
                    return None;
                }
            };
            self.line_no += 1;

            if self.line_no == 1 && self.source.format == EmbeddingFormat::Word2Vec {
                continue;
            }
            self.progress.inc(1);

            match self.source.parse_line(&line, self.line_no) {
                Some(record) => return Some(Ok(record)),
                None => self.skipped += 1,
            }
        }
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().map(|ext| ext == "gz").unwrap_or(false)
}

fn open_reader(path: &Path) -> Result<Box<dyn BufRead>, EmbeddingError> {
    let file = File::open(path).map_err(|source| EmbeddingError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if is_gzip(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
