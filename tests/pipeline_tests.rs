//! Evaluation, correlation matrix and model comparison over files on disk.

mod common;

use approx::assert_abs_diff_eq;

use danci_wordsim::commands::{compare_models, execute, Commands};
use danci_wordsim::config::Config;
use danci_wordsim::datasets::{
    load_gold_correlations, load_pair_dataset, load_priming_dataset, load_similarity_dataset, priming_scores,
    similarity_scores, CorrelationMatrix,
};
use danci_wordsim::embeddings::{Diagnostics, EmbeddingTable, ReaderOptions};
use danci_wordsim::evaluation::{correlation_matrix, evaluate};
use danci_wordsim::stats::{DependentMethod, TestOptions};

use common::{path_str, write_text, GLOVE_SMALL, PAIR_DATASET, PRIMING_DATASET, WORD2VEC_SMALL};

fn quiet_config() -> Config {
    Config {
        show_progress: false,
        warn_malformed: false,
        ..Default::default()
    }
}

#[test]
fn test_evaluate_priming_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_text(&dir, "spp.csv", PRIMING_DATASET);
    let w2v = write_text(&dir, "w2v.txt", WORD2VEC_SMALL);

    let records = load_priming_dataset(&dataset).unwrap();
    let table = EmbeddingTable::load(&w2v, ReaderOptions::default(), Diagnostics::quiet()).unwrap();
    let result = evaluate(&records, &table);

    assert_eq!(result.found, 7);
    assert_eq!(result.not_found, 1);
    // related pairs are faster to recognise, so similarity and reaction time move apart
    assert!(result.spearman.coefficient < 0.0);
    assert!(result.kendall.coefficient < 0.0);
}

#[test]
fn test_case_sensitive_model_misses_lowercase_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_text(&dir, "spp.csv", PRIMING_DATASET);
    let glove = write_text(&dir, "glove.txt", GLOVE_SMALL);

    let records = load_priming_dataset(&dataset).unwrap();
    let table = EmbeddingTable::load(&glove, ReaderOptions::default(), Diagnostics::quiet()).unwrap();
    let result = evaluate(&records, &table);

    assert_eq!(result.found, 0);
    assert_eq!(result.not_found, 8);
    assert!(!result.spearman.is_defined());
}

#[test]
fn test_duplicate_model_correlates_perfectly() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_text(&dir, "pairs.csv", PAIR_DATASET);
    let first = write_text(&dir, "first.txt", WORD2VEC_SMALL);
    let second = write_text(&dir, "second.txt", WORD2VEC_SMALL);

    let pairs = load_pair_dataset(&dataset).unwrap();
    let models: Vec<(String, EmbeddingTable)> = [first, second]
        .iter()
        .map(|path| {
            let table = EmbeddingTable::load(path, ReaderOptions::lowercase(), Diagnostics::quiet()).unwrap();
            (path_str(path), table)
        })
        .collect();

    let matrix = correlation_matrix(&pairs, &models);
    for i in 0..2 {
        for j in 0..2 {
            assert_abs_diff_eq!(matrix.get(i, j).unwrap(), 1.0, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_matrix_csv_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let matrix = CorrelationMatrix::new(
        vec![
            path_str(&dir.path().join("w2v.txt")),
            path_str(&dir.path().join("glove.txt.gz")),
        ],
        vec![vec![1.0, 0.625], vec![0.625, 1.0]],
    );
    let path = dir.path().join("matrix.csv");
    matrix.write_csv(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("Embeddings,w2v.txt,glove.txt.gz\n"));

    let read = CorrelationMatrix::read_csv(&path).unwrap();
    assert_eq!(read.names(), &["w2v".to_string(), "glove.txt".to_string()]);
    let index = read.name_index();
    assert_eq!(index.len(), 2);
    assert_eq!(index["w2v"], 0);
    assert_eq!(index["glove.txt"], 1);
    assert_eq!(read.between("w2v", "glove.txt").unwrap(), 0.625);
    assert_eq!(read.get(1, 1), Some(1.0));
}

#[test]
fn test_compare_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let gold = write_text(
        &dir,
        "gold.csv",
        "Embeddings,rho,rho p-value,tau,tau p-value,Found,Not Found\nw2v,0.396,0.0,0.3,0.0,200,0\nglove,0.179,0.01,0.1,0.02,200,0\n",
    );
    let matrix = write_text(&dir, "matrix.csv", "Embeddings,w2v.txt,glove.txt\nw2v.txt,1.0,0.088\nglove.txt,0.088,1.0\n");

    let gold = load_gold_correlations(&gold, "w2v").unwrap();
    let matrix = CorrelationMatrix::read_csv(&matrix).unwrap();
    let results = compare_models("w2v", &gold, &matrix, 200, &TestOptions::default(), DependentMethod::Steiger).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, "glove");
    assert_abs_diff_eq!(results[0].1.p_value().unwrap(), 0.015528730240228519, epsilon = 1e-9);
}

#[test]
fn test_datasets_share_symmetric_pairs() {
    let dir = tempfile::tempdir().unwrap();
    let priming = write_text(&dir, "spp.csv", PRIMING_DATASET);
    let other = write_text(&dir, "simlex.tsv", "Dog\tCat\t9.0\ncar\tbus\t8.0\ncat\tdog\t1.0\nhorse\ttrain\t2.0\n");

    let priming = priming_scores(&load_priming_dataset(&priming).unwrap());
    let other = similarity_scores(&load_similarity_dataset(&other).unwrap());

    // (cat, dog) comes from the reversed first row, which wins over the later duplicate
    assert_eq!(other.get(&("cat".to_string(), "dog".to_string())), Some(&9.0));
    let common = priming.keys().filter(|key| other.contains_key(*key)).count();
    assert_eq!(common, 3);
}

#[test]
fn test_execute_evaluate_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_text(&dir, "spp.csv", PRIMING_DATASET);
    let w2v = write_text(&dir, "w2v.txt", WORD2VEC_SMALL);
    let wordset = write_text(&dir, "words.txt", "cat\ndog\ncar\nbus\n");
    let output = dir.path().join("results.csv");

    execute(
        Commands::Evaluate {
            dataset,
            embeddings: vec![w2v],
            wordset: Some(wordset),
            output: Some(output.clone()),
        },
        &quiet_config(),
    )
    .unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("Embeddings,rho,rho p-value,tau,tau p-value,Found,Not Found")
    );
    let row: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert_eq!(row[0], "w2v");
    // cat-dog, car-bus and cat-car survive the wordset
    assert_eq!(row[5], "3");
    assert_eq!(row[6], "5");
}

#[test]
fn test_execute_corr_matrix_writes_square_matrix() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_text(&dir, "pairs.csv", PAIR_DATASET);
    let w2v = write_text(&dir, "w2v.txt", WORD2VEC_SMALL);
    let glove = write_text(&dir, "glove.txt", GLOVE_SMALL);
    let output = dir.path().join("matrix.csv");

    execute(
        Commands::CorrMatrix {
            dataset,
            output: output.clone(),
            embeddings: vec![w2v, glove],
            wordset: None,
        },
        &quiet_config(),
    )
    .unwrap();

    let matrix = CorrelationMatrix::read_csv(&output).unwrap();
    assert_eq!(matrix.len(), 2);
    assert_abs_diff_eq!(matrix.between("w2v", "w2v").unwrap(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(
        matrix.between("w2v", "glove").unwrap(),
        matrix.between("glove", "w2v").unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn test_execute_wordset_writes_sorted_intersection() {
    let dir = tempfile::tempdir().unwrap();
    let w2v = write_text(&dir, "w2v.txt", WORD2VEC_SMALL);
    let glove = write_text(&dir, "glove.txt", "Cat 0.9 0.0 0.2\nZebra 0.5 0.5 0.5\nBus 0.0 0.1 1.0\n");
    let output = dir.path().join("words.txt");

    execute(
        Commands::Wordset {
            embeddings: vec![w2v, glove],
            output: Some(output.clone()),
        },
        &quiet_config(),
    )
    .unwrap();

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "bus\ncat\n");
}
