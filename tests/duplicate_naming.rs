mod common;

use std::fs;
use tempfile::tempdir;

use audio_rename::{
    BatchOptions, CollisionPolicy, EngineOptions, FailurePolicy, NameTemplate, RenameOutcome, SkipReason, run_batch,
};
use common::{TableReader, titled, write};

fn opts(dir: &std::path::Path, collision: CollisionPolicy) -> BatchOptions {
    let mut engine = EngineOptions::new(dir);
    engine.collision = collision;
    BatchOptions {
        engine,
        template: NameTemplate::compile("title").unwrap(),
        failure: FailurePolicy::ContinueAndReport,
    }
}

#[test]
fn existing_name_gets_suffix_one() {
    let td = tempdir().unwrap();
    let dir = td.path();
    write(&dir.join("X.mp3"), b"existing");
    let src = dir.join("track01.mp3");
    write(&src, b"new");
    let reader = TableReader::new().with(&src, titled("X"));

    let report = run_batch(&opts(dir, CollisionPolicy::AutoDisambiguate), &[src.clone()], &reader);
    assert_eq!(report.outcomes[0].destination(), Some(dir.join("X_(1).mp3").as_path()));
    assert_eq!(fs::read(dir.join("X.mp3")).unwrap(), b"existing");
    assert_eq!(fs::read(dir.join("X_(1).mp3")).unwrap(), b"new");
}

#[test]
fn taken_suffix_moves_on_to_two() {
    let td = tempdir().unwrap();
    let dir = td.path();
    write(&dir.join("X.mp3"), b"0");
    write(&dir.join("X_(1).mp3"), b"1");
    let src = dir.join("track01.mp3");
    write(&src, b"2");
    let reader = TableReader::new().with(&src, titled("X"));

    let report = run_batch(&opts(dir, CollisionPolicy::AutoDisambiguate), &[src], &reader);
    assert_eq!(report.outcomes[0].destination(), Some(dir.join("X_(2).mp3").as_path()));
    assert_eq!(fs::read(dir.join("X_(2).mp3")).unwrap(), b"2");
}

#[test]
fn suffix_goes_before_extension_even_with_dotted_stem() {
    let td = tempdir().unwrap();
    let dir = td.path();
    write(&dir.join("Vol. 2.flac"), b"a");
    let src = dir.join("b.flac");
    write(&src, b"b");
    let reader = TableReader::new().with(&src, titled("Vol. 2"));

    let report = run_batch(&opts(dir, CollisionPolicy::AutoDisambiguate), &[src], &reader);
    assert_eq!(
        report.outcomes[0].destination(),
        Some(dir.join("Vol. 2_(1).flac").as_path())
    );
}

#[test]
fn skip_policy_reports_collision_and_touches_nothing() {
    let td = tempdir().unwrap();
    let dir = td.path();
    write(&dir.join("X.mp3"), b"existing");
    let src = dir.join("track01.mp3");
    write(&src, b"new");
    let reader = TableReader::new().with(&src, titled("X"));

    let report = run_batch(&opts(dir, CollisionPolicy::SkipOnCollision), &[src.clone()], &reader);
    match &report.outcomes[0] {
        RenameOutcome::Skipped {
            reason: SkipReason::Collision(p),
            ..
        } => assert_eq!(p, &dir.join("X.mp3")),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(fs::read(&src).unwrap(), b"new");
    assert_eq!(report.collisions(), 1);
    assert!(!report.has_failures());
}

#[test]
fn rerun_over_disambiguated_output_is_a_no_op() {
    let td = tempdir().unwrap();
    let dir = td.path();
    let a = dir.join("a.mp3");
    let b = dir.join("b.mp3");
    write(&a, b"a");
    write(&b, b"b");
    let mut reader = TableReader::new().with(&a, titled("Same")).with(&b, titled("Same"));
    let options = opts(dir, CollisionPolicy::AutoDisambiguate);

    let first = run_batch(&options, &[a.clone(), b.clone()], &reader);
    assert_eq!(first.renamed(), 2);
    let outputs: Vec<_> = first
        .outcomes
        .iter()
        .filter_map(|o| o.destination().map(|p| p.to_path_buf()))
        .collect();
    assert_eq!(outputs, vec![dir.join("Same.mp3"), dir.join("Same_(1).mp3")]);
    reader.follow(&a, &outputs[0]);
    reader.follow(&b, &outputs[1]);

    let second = run_batch(&options, &outputs, &reader);
    assert_eq!(second.unchanged(), 2);
    assert_eq!(second.renamed(), 0);
    assert_eq!(fs::read(&outputs[0]).unwrap(), b"a");
    assert_eq!(fs::read(&outputs[1]).unwrap(), b"b");
}
