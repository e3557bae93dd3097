#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::TempDir;

pub fn write_text(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

pub fn write_gzip(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

/// Four animals and four vehicles in three dimensions, with a word2vec header.
pub const WORD2VEC_SMALL: &str = "\
8 3
cat 1.0 0.1 0.0
dog 0.9 0.2 0.1
horse 0.8 0.3 0.0
cow 0.7 0.1 0.2
car 0.0 0.1 1.0
bus 0.1 0.2 0.9
train 0.2 0.0 0.8
plane 0.1 0.3 0.7
";

/// The same vocabulary without a header and with uppercase words.
pub const GLOVE_SMALL: &str = "\
Cat 0.9 0.0 0.2
Dog 1.0 0.1 0.1
Horse 0.6 0.2 0.1
Cow 0.8 0.3 0.0
Car 0.1 0.0 0.9
Bus 0.0 0.1 1.0
Train 0.3 0.1 0.7
Plane 0.2 0.2 0.8
";

pub const PAIR_DATASET: &str = "\
word1,word2,score
cat,dog,9.0
horse,cow,8.0
car,bus,8.5
train,plane,7.0
cat,car,1.0
dog,bus,1.5
horse,train,2.5
cow,plane,0.5
";

pub const PRIMING_DATASET: &str = "\
prime,target,rt
cat,dog,510.0
horse,cow,520.5
car,bus,505.0
train,plane,530.0
cat,car,610.0
dog,bus,
horse,train,640.0
cow,plane,655.5
";

pub fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
