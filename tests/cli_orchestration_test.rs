// tests/cli_orchestration_test.rs
use chrono::NaiveDate;
use release_train::cli::{
    run_changelog, run_discover, ChangelogRequest, DiscoverRequest, DiscoveryReport,
};
use release_train::config::Config;
use release_train::discovery::TagSource;
use release_train::domain::CommitRecord;
use release_train::git::{Git2Repository, MockRepository};
use release_train::ReleaseTrainError;
use std::fs;

fn discover_request(pattern: &str, validate: Option<&str>) -> DiscoverRequest {
    DiscoverRequest {
        pattern: pattern.to_string(),
        validate: validate.map(str::to_string),
    }
}

fn explicit(tags: &[&str]) -> TagSource<'static> {
    TagSource::Explicit(tags.iter().map(|t| t.to_string()).collect())
}

fn release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

#[test]
fn test_discover_highest_dev_tag() {
    let source = explicit(&["v1.1.22.dev3", "v1.1.23.dev1", "v1.1.23rc1", "nightly"]);
    let outcome = run_discover(&source, &discover_request("dev", None));

    assert_eq!(
        outcome.report,
        DiscoveryReport::Found {
            tag: "v1.1.23.dev1".to_string(),
            version: "1.1.23.dev1".to_string(),
            found: true,
            commits_behind: None,
        }
    );
    assert_eq!(outcome.report.exit_code(), 0);
}

#[test]
fn test_discover_not_found_guidance() {
    let source = explicit(&["v1.1.23rc1"]);
    let outcome = run_discover(&source, &discover_request("dev", None));

    assert_eq!(outcome.report.exit_code(), 1);
    let json: serde_json::Value = serde_json::from_str(&outcome.report.to_json()).unwrap();
    assert_eq!(json["found"], false);
    assert!(json["tag"].is_null());
    assert!(json.get("commits_behind").is_none());
    assert_eq!(
        json["error"],
        "No dev tags found. Run Stage 1 (Dev Release) first."
    );
}

#[test]
fn test_validate_explicit_tag() {
    let source = explicit(&["v1.1.22.dev1", "v1.1.22.dev2", "v1.1.23.dev1"]);
    let outcome = run_discover(&source, &discover_request("dev", Some("v1.1.22.dev2")));

    let json: serde_json::Value = serde_json::from_str(&outcome.report.to_json()).unwrap();
    assert_eq!(json["tag"], "v1.1.22.dev2");
    assert_eq!(json["version"], "1.1.22.dev2");
    assert!(json["commits_behind"].is_null());

    let missing = run_discover(&source, &discover_request("dev", Some("v2.0.0.dev1")));
    assert_eq!(missing.report.exit_code(), 1);
    assert!(missing
        .report
        .to_json()
        .contains("Tag 'v2.0.0.dev1' not found in tag list."));
}

#[test]
fn test_discover_live_reports_staleness() {
    let mut repo = MockRepository::new();
    repo.add_commit(CommitRecord::new("feat: a", "", "aaa1111"));
    repo.tag_head("v1.1.23rc1");
    repo.add_commit(CommitRecord::new("fix: b", "", "bbb2222"));
    repo.add_commit(CommitRecord::new("fix: c", "", "ccc3333"));

    let source = TagSource::Live(&repo);
    let outcome = run_discover(&source, &discover_request("rc", None));

    assert_eq!(
        outcome.report.to_json(),
        r#"{"tag":"v1.1.23rc1","version":"1.1.23rc1","found":true,"commits_behind":2}"#
    );
}

#[test]
fn test_changelog_writes_file_and_returns_notes() {
    let mut repo = MockRepository::new();
    repo.add_commit(CommitRecord::new("feat: base", "", "aaa0000"));
    repo.tag_head("v1.1.22rc1");
    repo.add_commit(CommitRecord::new("feat: add streaming support", "", "bbb2222"));
    repo.add_commit(CommitRecord::new("fix: handle empty payload", "", "ccc3333"));
    repo.add_commit(CommitRecord::new("chore(release): v1.1.23rc1", "", "ddd4444"));
    repo.add_commit(CommitRecord::new(
        "refactor(api): new session model",
        "BREAKING CHANGE: sessions are now opaque",
        "eee5555",
    ));

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("notes").join("rc.md");
    let request = ChangelogRequest {
        stage: "rc".to_string(),
        version: "1.1.23rc1".to_string(),
        source_tag: Some("v1.1.23.dev4".to_string()),
        repo: Some("nwave-ai/nwave-dev".to_string()),
        output: output.clone(),
        release_date: release_date(),
    };

    let outcome = run_changelog(Some(&repo), &request, &Config::default()).unwrap();

    assert_eq!(outcome.previous_tag.as_deref(), Some("v1.1.22rc1"));
    assert_eq!(fs::read_to_string(&output).unwrap(), outcome.notes);

    let notes = outcome.notes;
    assert!(notes.starts_with("**Release candidate** `1.1.23rc1` (2026-03-14)\n"));
    assert!(notes.contains("**Promoted from**: `v1.1.23.dev4`\n"));
    assert!(notes.contains(
        "**Changes since**: [v1.1.22rc1](https://github.com/nwave-ai/nwave-dev/compare/v1.1.22rc1...v1.1.23rc1)\n"
    ));
    assert!(notes.contains("pipx install nwave-ai==1.1.23rc1 --pip-args=\"--pre\""));
    assert!(notes.contains("## Breaking Changes\n\n- refactor(api): new session model (`eee5555`)\n"));
    assert!(notes.contains("## Features\n\n- feat: add streaming support (`bbb2222`)\n"));
    assert!(notes.contains("## Bug Fixes\n\n- fix: handle empty payload (`ccc3333`)\n"));
    assert!(!notes.contains("chore(release)"));
    assert!(!notes.contains("feat: base"));
}

#[test]
fn test_changelog_stable_without_history() {
    let dir = tempfile::tempdir().unwrap();
    let request = ChangelogRequest {
        stage: "stable".to_string(),
        version: "1.1.23".to_string(),
        source_tag: None,
        repo: Some("nwave-ai/nwave".to_string()),
        output: dir.path().join("stable.md"),
        release_date: release_date(),
    };

    let outcome = run_changelog::<Git2Repository>(None, &request, &Config::default()).unwrap();

    assert_eq!(outcome.previous_tag, None);
    assert_eq!(
        outcome.notes,
        "# nWave Framework v1.1.23\n\n**Release Date**: 2026-03-14\n\n## Installation\n```bash\npipx install nwave-ai\n```\n\nPatch release (internal improvements)\n"
    );
}

#[test]
fn test_changelog_rejects_unknown_stage() {
    let dir = tempfile::tempdir().unwrap();
    let request = ChangelogRequest {
        stage: "beta".to_string(),
        version: "1.1.23b1".to_string(),
        source_tag: None,
        repo: None,
        output: dir.path().join("beta.md"),
        release_date: release_date(),
    };

    let err = run_changelog(Some(&MockRepository::new()), &request, &Config::default()).unwrap_err();
    assert!(matches!(err, ReleaseTrainError::InvalidStage(_)));
    assert!(!dir.path().join("beta.md").exists());
}
