use chrono::NaiveDate;

use super::*;
use crate::{foundation::core::IntensityGrid, schedule::generator::schedule};

fn author() -> Option<Author> {
    Some(Author {
        name: "Pixel Tester".to_string(),
        email: "pixel@example.com".to_string(),
    })
}

fn small_schedule() -> Schedule {
    let mut g = IntensityGrid::zeroed();
    g.set(0, 0, 2).unwrap();
    g.set(3, 1, 1).unwrap();
    let now = NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    schedule(&g, 0, now).unwrap()
}

#[test]
fn config_validation_catches_bad_values() {
    let mut cfg = CommitConfig {
        repo_dir: PathBuf::from("target/unused"),
        branch: " ".to_string(),
        author: None,
    };
    assert!(cfg.validate().is_err());

    cfg.branch = "contribution".to_string();
    cfg.validate().unwrap();

    cfg.author = Some(Author {
        name: "x".to_string(),
        email: String::new(),
    });
    assert!(cfg.validate().is_err());
}

#[test]
fn readme_mentions_source_and_total() {
    let body = readme_body(&SourceDescriptor::Template("heart".into()), 42);
    assert!(body.starts_with("# Contribution Graph Art"));
    assert!(body.contains("Template: heart"));
    assert!(body.contains("Total commits: 42"));
}

#[test]
fn non_empty_directory_is_rejected() {
    if !is_git_on_path() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("keep.txt"), "x").unwrap();
    let res = CommitWriter::new(CommitConfig {
        repo_dir: dir.path().to_path_buf(),
        branch: "contribution".to_string(),
        author: author(),
    });
    assert!(matches!(res, Err(ArtError::Validation(_))));
}

#[test]
fn empty_schedule_is_refused() {
    if !is_git_on_path() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let writer = CommitWriter::new(CommitConfig {
        repo_dir: dir.path().join("repo"),
        branch: "contribution".to_string(),
        author: author(),
    })
    .unwrap();
    let empty = schedule(
        &IntensityGrid::zeroed(),
        0,
        NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    )
    .unwrap();
    let err = writer
        .write(&empty, &SourceDescriptor::Text(String::new()))
        .unwrap_err();
    assert!(matches!(err, ArtError::EmptyResult(_)));
}

#[test]
fn commits_carry_event_timestamps_in_order() {
    if !is_git_on_path() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let repo = dir.path().join("repo");
    let writer = CommitWriter::new(CommitConfig {
        repo_dir: repo.clone(),
        branch: "art".to_string(),
        author: author(),
    })
    .unwrap();

    let sched = small_schedule();
    let n = writer
        .write(&sched, &SourceDescriptor::Template("heart".into()))
        .unwrap();
    assert_eq!(n, 3);

    let branch = writer.git(&["rev-parse", "--abbrev-ref", "HEAD"]).unwrap();
    assert_eq!(branch, "art");

    // Oldest first, author dates exactly as scheduled.
    let log = writer
        .git(&[
            "log",
            "--reverse",
            "--format=%ad|%s",
            "--date=format:%Y-%m-%d %H:%M:%S",
        ])
        .unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 3);
    for (line, event) in lines.iter().zip(&sched.events) {
        let (date, _) = line.split_once('|').unwrap();
        assert_eq!(date, event.at.format(DATE_FORMAT).to_string());
    }
    assert!(lines[0].ends_with("Art pixel 1/3"));
    assert!(lines[2].ends_with("Art pixel 3/3"));
}
