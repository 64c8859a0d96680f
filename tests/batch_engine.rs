mod common;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

use audio_rename::{
    BatchOptions, EngineOptions, FailurePolicy, FieldKey, FormatError, NameTemplate, RawTags, RenameOutcome,
    run_batch,
};
use common::{TableReader, sample_tags, titled, tree, write};

fn opts(dir: &Path, format: &str) -> BatchOptions {
    BatchOptions {
        engine: EngineOptions::new(dir),
        template: NameTemplate::compile(format).unwrap(),
        failure: FailurePolicy::ContinueAndReport,
    }
}

#[test]
fn default_format_renders_flat_name() {
    let td = tempdir().unwrap();
    let src = td.path().join("01.mp3");
    write(&src, b"x");
    let reader = TableReader::new().with(&src, sample_tags());

    let report = run_batch(&opts(td.path(), "artist - album [track] title"), &[src], &reader);
    assert_eq!(report.renamed(), 1);
    assert_eq!(tree(td.path()), vec!["Sample Artist - Sample Album [1] Sample Title.mp3"]);
}

#[test]
fn separators_create_nested_directories() {
    let td = tempdir().unwrap();
    let src = td.path().join("01.mp3");
    write(&src, b"x");
    let reader = TableReader::new().with(&src, sample_tags());

    run_batch(&opts(td.path(), "artist(sep)album(sep)track - title"), &[src], &reader);
    assert_eq!(tree(td.path()), vec!["Sample Artist/Sample Album/1 - Sample Title.mp3"]);
}

#[test]
fn missing_artist_uses_placeholder() {
    let td = tempdir().unwrap();
    let src = td.path().join("01.ogg");
    write(&src, b"x");
    let reader = TableReader::new().with(&src, titled("Lonely"));

    run_batch(&opts(td.path(), "artist - title"), &[src], &reader);
    assert_eq!(tree(td.path()), vec!["No Artist - Lonely.ogg"]);
}

#[test]
fn reserved_only_format_fails_before_any_file_is_touched() {
    let err = NameTemplate::compile("???").unwrap_err();
    assert!(matches!(err, FormatError::ReservedCharacter { ch: '?', offset: 0 }));
}

#[test]
fn reserved_characters_in_tags_become_plus() {
    let td = tempdir().unwrap();
    let src = td.path().join("01.mp3");
    write(&src, b"x");
    let tags = RawTags::new()
        .with(FieldKey::Artist, "AC/DC")
        .with(FieldKey::Title, "What? Why: <Now>");
    let reader = TableReader::new().with(&src, tags);

    run_batch(&opts(td.path(), "artist - title"), &[src], &reader);
    assert_eq!(tree(td.path()), vec!["AC+DC - What+ Why+ +Now+.mp3"]);
}

#[test]
fn nothing_is_ever_overwritten() {
    let td = tempdir().unwrap();
    let dir = td.path();
    write(&dir.join("Same.mp3"), b"original");
    let files: Vec<PathBuf> = (1..=3).map(|i| dir.join(format!("in{i}.mp3"))).collect();
    let mut reader = TableReader::new();
    for (i, f) in files.iter().enumerate() {
        write(f, format!("payload {i}").as_bytes());
        reader = reader.with(f, titled("Same"));
    }

    let report = run_batch(&opts(dir, "title"), &files, &reader);
    assert_eq!(report.renamed(), 3);
    assert_eq!(
        tree(dir),
        vec!["Same.mp3", "Same_(1).mp3", "Same_(2).mp3", "Same_(3).mp3"]
    );
    assert_eq!(fs::read(dir.join("Same.mp3")).unwrap(), b"original");
    let mut payloads: Vec<Vec<u8>> = ["Same_(1).mp3", "Same_(2).mp3", "Same_(3).mp3"]
        .iter()
        .map(|n| fs::read(dir.join(n)).unwrap())
        .collect();
    payloads.sort();
    assert_eq!(payloads, vec![b"payload 0".to_vec(), b"payload 1".to_vec(), b"payload 2".to_vec()]);
}

#[test]
fn flatten_moves_nested_files_under_working_dir() {
    let td = tempdir().unwrap();
    let dir = td.path();
    let a = dir.join("cd1").join("a.mp3");
    let b = dir.join("cd2").join("deeper").join("b.mp3");
    write(&a, b"a");
    write(&b, b"b");
    let reader = TableReader::new().with(&a, titled("A")).with(&b, titled("B"));
    let mut options = opts(dir, "title");
    options.engine.flatten = true;

    let report = run_batch(&options, &[a, b], &reader);
    assert_eq!(report.renamed(), 2);
    assert_eq!(tree(dir), vec!["A.mp3", "B.mp3"]);
    // Emptied source directories stay behind.
    assert!(dir.join("cd2").join("deeper").is_dir());
}

#[test]
fn without_flatten_files_stay_in_their_directory() {
    let td = tempdir().unwrap();
    let dir = td.path();
    let a = dir.join("cd1").join("a.mp3");
    write(&a, b"a");
    let reader = TableReader::new().with(&a, titled("A"));

    run_batch(&opts(dir, "title"), &[a], &reader);
    assert_eq!(tree(dir), vec!["cd1/A.mp3"]);
}

#[test]
fn stop_on_first_error_leaves_rest_alone() {
    let td = tempdir().unwrap();
    let dir = td.path();
    let files: Vec<PathBuf> = ["1.mp3", "2.mp3", "3.mp3"].iter().map(|n| dir.join(n)).collect();
    for f in &files {
        write(f, b"x");
    }
    // 2.mp3 has no entry and fails to read.
    let reader = TableReader::new()
        .with(&files[0], titled("One"))
        .with(&files[2], titled("Three"));
    let mut options = opts(dir, "title");
    options.failure = FailurePolicy::StopOnFirstError;

    let report = run_batch(&options, &files, &reader);
    assert_eq!(report.outcomes.len(), 2);
    assert!(matches!(report.outcomes[1], RenameOutcome::Failed { .. }));
    assert_eq!(report.not_attempted, vec![files[2].clone()]);
    assert_eq!(tree(dir), vec!["2.mp3", "3.mp3", "One.mp3"]);
}

#[test]
fn continue_and_report_processes_every_file() {
    let td = tempdir().unwrap();
    let dir = td.path();
    let files: Vec<PathBuf> = ["1.mp3", "2.mp3", "3.mp3"].iter().map(|n| dir.join(n)).collect();
    for f in &files {
        write(f, b"x");
    }
    let reader = TableReader::new()
        .with(&files[0], titled("One"))
        .with(&files[2], titled("Three"));

    let report = run_batch(&opts(dir, "title"), &files, &reader);
    assert_eq!(report.renamed(), 2);
    assert_eq!(report.failed(), 1);
    assert!(report.not_attempted.is_empty());
    assert_eq!(tree(dir), vec!["2.mp3", "One.mp3", "Three.mp3"]);
}

#[test]
fn dot_only_tag_cannot_escape_the_directory() {
    let td = tempdir().unwrap();
    let dir = td.path().join("music");
    let src = dir.join("a.mp3");
    write(&src, b"x");
    let tags = RawTags::new().with(FieldKey::Artist, "..").with(FieldKey::Title, "T");
    let reader = TableReader::new().with(&src, tags);

    run_batch(&opts(&dir, "artist(sep)title"), &[src], &reader);
    assert_eq!(tree(td.path()), vec!["music/++/T.mp3"]);
}
