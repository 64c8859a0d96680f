mod common;

use std::path::{Path, PathBuf};
use tempfile::tempdir;

use audio_rename::{BatchOptions, EngineOptions, FailurePolicy, NameTemplate, RawTags, run_batch};
use common::{TableReader, titled, tree, write};

/// Same layout in a fresh directory: two files colliding with each other and with disk.
fn populate(dir: &Path) -> (Vec<PathBuf>, TableReader) {
    write(&dir.join("Song.mp3"), b"on disk");
    let files: Vec<PathBuf> = ["a.mp3", "b.mp3", "c.mp3"].iter().map(|n| dir.join(n)).collect();
    for f in &files {
        write(f, b"x");
    }
    let reader = TableReader::new()
        .with(&files[0], titled("Song"))
        .with(&files[1], titled("Song"))
        .with(&files[2], RawTags::new());
    (files, reader)
}

fn options(dir: &Path, dry_run: bool) -> BatchOptions {
    let mut engine = EngineOptions::new(dir);
    engine.dry_run = dry_run;
    BatchOptions {
        engine,
        template: NameTemplate::compile("artist(sep)title").unwrap(),
        failure: FailurePolicy::ContinueAndReport,
    }
}

fn relative_destinations(dir: &Path, report: &audio_rename::BatchReport) -> Vec<Option<PathBuf>> {
    report
        .outcomes
        .iter()
        .map(|o| o.destination().map(|p| p.strip_prefix(dir).unwrap().to_path_buf()))
        .collect()
}

#[test]
fn dry_run_predicts_the_real_run() {
    let dry_dir = tempdir().unwrap();
    let real_dir = tempdir().unwrap();
    let (dry_files, dry_reader) = populate(dry_dir.path());
    let (real_files, real_reader) = populate(real_dir.path());
    let before = tree(dry_dir.path());

    let dry = run_batch(&options(dry_dir.path(), true), &dry_files, &dry_reader);
    let real = run_batch(&options(real_dir.path(), false), &real_files, &real_reader);

    assert_eq!(
        relative_destinations(dry_dir.path(), &dry),
        relative_destinations(real_dir.path(), &real)
    );
    assert_eq!(dry.renamed(), 3);
    assert_eq!(tree(dry_dir.path()), before, "dry run must not touch the filesystem");
    assert_eq!(
        tree(real_dir.path()),
        vec!["No Artist/No Title.mp3", "No Artist/Song.mp3", "No Artist/Song_(1).mp3", "Song.mp3"]
    );
}
