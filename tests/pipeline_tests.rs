use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use typesift::{DataType, FilterError, FilterOptions, Pipeline, PipelineState};

fn write_input(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}

fn output_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| line.to_string())
        .collect()
}

fn options(output_dir: &Path) -> FilterOptions {
    FilterOptions {
        output_dir: output_dir.to_path_buf(),
        ..Default::default()
    }
}

#[test]
fn test_mixed_input_is_split_by_type() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path(), "in.txt", &["42", "3.14", "hello", "-17", ""]);
    let out = temp_dir.path().join("out");

    let mut pipeline = Pipeline::new(&options(&out));
    let summary = pipeline.run(&[&input]).unwrap();

    assert_eq!(output_lines(&out.join("integers.txt")), vec!["42", "-17"]);
    assert_eq!(output_lines(&out.join("floats.txt")), vec!["3.14"]);
    assert_eq!(output_lines(&out.join("strings.txt")), vec!["hello", ""]);

    assert_eq!(summary.lines_processed, 5);
    assert_eq!(summary.statistics.total_count(), 5);
    assert_eq!(summary.statistics.record(DataType::String).min_string_length(), Some(0));
    assert_eq!(
        summary.outputs,
        vec![out.join("integers.txt"), out.join("floats.txt"), out.join("strings.txt")]
    );
    assert!(summary.warnings.is_empty());
    assert_eq!(pipeline.state(), PipelineState::Done);
}

#[test]
fn test_lines_are_trimmed_before_writing() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path(), "in.txt", &["  12  ", "\tword\t", "   "]);

    let mut pipeline = Pipeline::new(&options(temp_dir.path()));
    pipeline.run(&[&input]).unwrap();

    assert_eq!(output_lines(&temp_dir.path().join("integers.txt")), vec!["12"]);
    assert_eq!(output_lines(&temp_dir.path().join("strings.txt")), vec!["word", ""]);
}

#[test]
fn test_integer_statistics() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path(), "in.txt", &["1", "2", "3"]);

    let mut pipeline = Pipeline::new(&options(temp_dir.path()));
    let summary = pipeline.run(&[&input]).unwrap();
    let record = summary.statistics.record(DataType::Integer);

    assert_eq!(record.count(), 3);
    assert_eq!(record.min_integer(), Some(1));
    assert_eq!(record.max_integer(), Some(3));
    assert_eq!(record.sum(), 6);
    assert_eq!(record.average_integer(), 2.0);
    assert!(!summary.statistics.record(DataType::Float).has_data());
    assert!(!temp_dir.path().join("floats.txt").exists());
}

#[test]
fn test_missing_file_is_a_warning() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.txt");
    let present = write_input(temp_dir.path(), "present.txt", &["5", "x"]);

    let mut pipeline = Pipeline::new(&options(temp_dir.path()));
    let summary = pipeline.run(&[&missing, &present]).unwrap();

    assert_eq!(summary.lines_processed, 2);
    assert_eq!(summary.warnings.len(), 1);
    assert!(matches!(
        &summary.warnings[0],
        FilterError::InputNotFound { path } if path == &missing
    ));
    assert!(summary.warnings[0].is_warning());
}

#[test]
fn test_invalid_utf8_abandons_only_that_file() {
    let temp_dir = TempDir::new().unwrap();
    let broken = temp_dir.path().join("broken.txt");
    fs::write(&broken, b"1\n\xff\xfe\n2\n").unwrap();
    let good = write_input(temp_dir.path(), "good.txt", &["3"]);

    let mut pipeline = Pipeline::new(&options(temp_dir.path()));
    let summary = pipeline.run(&[&broken, &good]).unwrap();

    assert_eq!(output_lines(&temp_dir.path().join("integers.txt")), vec!["1", "3"]);
    assert_eq!(summary.warnings.len(), 1);
    assert!(matches!(summary.warnings[0], FilterError::InputRead { .. }));
}

#[test]
fn test_multiple_inputs_keep_encounter_order() {
    let temp_dir = TempDir::new().unwrap();
    let first = write_input(temp_dir.path(), "a.txt", &["1", "a"]);
    let second = write_input(temp_dir.path(), "b.txt", &["2", "b"]);

    let mut pipeline = Pipeline::new(&options(temp_dir.path()));
    pipeline.run(&[&first, &second]).unwrap();

    assert_eq!(output_lines(&temp_dir.path().join("integers.txt")), vec!["1", "2"]);
    assert_eq!(output_lines(&temp_dir.path().join("strings.txt")), vec!["a", "b"]);
}

#[test]
fn test_overwrite_runs_are_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path(), "in.txt", &["1", "2.5", "z"]);
    let out = temp_dir.path().join("out");

    Pipeline::new(&options(&out)).run(&[&input]).unwrap();
    let first: Vec<Vec<u8>> = DataType::ALL
        .iter()
        .map(|t| fs::read(out.join(t.output_file_name(""))).unwrap())
        .collect();

    Pipeline::new(&options(&out)).run(&[&input]).unwrap();
    let second: Vec<Vec<u8>> = DataType::ALL
        .iter()
        .map(|t| fs::read(out.join(t.output_file_name(""))).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_append_runs_accumulate() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path(), "in.txt", &["1", "2"]);
    let options = FilterOptions {
        output_dir: temp_dir.path().join("out"),
        prefix: "acc_".to_string(),
        append: true,
        ..Default::default()
    };

    Pipeline::new(&options).run(&[&input]).unwrap();
    Pipeline::new(&options).run(&[&input]).unwrap();

    assert_eq!(
        output_lines(&temp_dir.path().join("out").join("acc_integers.txt")),
        vec!["1", "2", "1", "2"]
    );
}

#[test]
fn test_unwritable_output_aborts_run() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path(), "in.txt", &["1"]);
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let mut pipeline = Pipeline::new(&options(&blocker.join("out")));
    let err = pipeline.run(&[&input]).unwrap_err();

    assert!(matches!(err, FilterError::OutputDirectory { .. }));
    assert!(!err.is_warning());
    assert_eq!(pipeline.state(), PipelineState::Error);
}

#[test]
fn test_progress_callback_sees_every_input() {
    let temp_dir = TempDir::new().unwrap();
    let first = write_input(temp_dir.path(), "a.txt", &["1"]);
    let missing = temp_dir.path().join("nope.txt");

    let mut seen = Vec::new();
    Pipeline::new(&options(temp_dir.path()))
        .run_with_progress(&[&first, &missing], |path| seen.push(path.to_path_buf()))
        .unwrap();

    assert_eq!(seen, vec![first, missing]);
}

#[test]
fn test_sink_open_failure_closes_earlier_sinks() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path(), "in.txt", &["x", "1"]);
    let out = temp_dir.path().join("out");
    fs::create_dir_all(out.join("integers.txt")).unwrap();

    let mut pipeline = Pipeline::new(&options(&out));
    let err = pipeline.run(&[&input]).unwrap_err();

    assert!(matches!(err, FilterError::OutputOpen { ref path, .. } if path == &out.join("integers.txt")));
    assert!(!err.is_warning());
    assert_eq!(pipeline.state(), PipelineState::Error);
    assert_eq!(output_lines(&out.join("strings.txt")), vec!["x"]);
}
