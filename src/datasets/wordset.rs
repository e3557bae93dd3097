use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::DatasetError;

/// One word per line; line endings are stripped and empty lines ignored.
pub fn load_wordset(path: impl AsRef<Path>) -> Result<HashSet<String>, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DatasetError::io(path, e))?;

    let mut words = HashSet::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| DatasetError::io(path, e))?;
        let word = line.trim_end_matches(&['\r', '\n'][..]);
        if word.is_empty() {
            continue;
        }
        words.insert(word.to_string());
    }

    Ok(words)
}

/// Writes the words sorted, one per line.
pub fn write_wordset<W: Write>(writer: W, words: &HashSet<String>) -> std::io::Result<()> {
    let mut sorted: Vec<&String> = words.iter().collect();
    sorted.sort();

    let mut writer = BufWriter::new(writer);
    for word in sorted {
        writeln!(writer, "{word}")?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wordset_round_trip_skips_empty_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "cat\r\n\ndog\n\nfish").unwrap();

        let words = load_wordset(file.path()).unwrap();
        assert_eq!(words.len(), 3);
        assert!(words.contains("cat"));
        assert!(words.contains("fish"));

        let mut out = Vec::new();
        write_wordset(&mut out, &words).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "cat\ndog\nfish\n");
    }
}
