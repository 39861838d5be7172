use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

/// Build a command for the given subcommand with all credentials stripped,
/// so every run exercises the fallback paths against a temp root.
fn pipeline_cmd(root: &std::path::Path, subcommand: &str) -> Command {
    let mut cmd = Command::cargo_bin("campaign-pipeline").expect("Binary exists");
    cmd.arg("--root")
        .arg(root)
        .arg(subcommand)
        .env_remove("GOFUNDME_API_KEY")
        .env_remove("GOFUNDME_CAMPAIGN_ID")
        .env_remove("OPENAI_API_KEY");
    cmd
}

#[test]
fn fetch_funding_without_credentials_writes_default_data() {
    let root = tempdir().unwrap();

    pipeline_cmd(root.path(), "fetch-funding")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetching funding data"))
        .stdout(predicate::str::contains("Done."));

    let data = std::fs::read_to_string(root.path().join("docs/campaign/data/funding_data.json"))
        .expect("funding data written");
    assert!(data.contains("pending launch"));
    assert!(root
        .path()
        .join("docs/campaign/data/funding_status.md")
        .exists());
}

#[test]
fn generate_content_without_credentials_writes_default_ideas() {
    let root = tempdir().unwrap();

    pipeline_cmd(root.path(), "generate-content")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saving content ideas"));

    let json = std::fs::read_to_string(root.path().join("output/social/tiktok_ideas.json"))
        .expect("ideas written");
    let ideas: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(ideas.as_array().unwrap().len(), 5);
    assert!(root.path().join("output/social/tiktok_ideas.md").exists());
}

#[test]
fn sync_docs_with_no_reports_reports_zero_copies() {
    let root = tempdir().unwrap();

    pipeline_cmd(root.path(), "sync-docs")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 report(s)"));

    assert!(!root.path().join("docs/reports/index.md").exists());
}

#[test]
fn full_pipeline_publishes_indexed_reports() {
    let root = tempdir().unwrap();

    pipeline_cmd(root.path(), "fetch-funding").assert().success();
    pipeline_cmd(root.path(), "render-reports")
        .assert()
        .success()
        .stdout(predicate::str::contains("All reports generated."));
    pipeline_cmd(root.path(), "sync-docs")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 report(s)"));

    let report = std::fs::read_to_string(root.path().join("reports/funding_report.md")).unwrap();
    assert!(report.contains("**Percentage reached**: 0.00%"));
    // No money in yet, so no chart is rendered.
    assert!(!root.path().join("reports/funding_progress.png").exists());

    let index = std::fs::read_to_string(root.path().join("docs/reports/index.md")).unwrap();
    assert!(index.contains("- [Funding Report](./funding_report.md)"));
    assert!(index.contains("- [Social Media Report](./social_media_report.md)"));
}
