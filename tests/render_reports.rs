use campaign_pipeline::config::Paths;
use campaign_pipeline::contract::FundingRecord;
use campaign_pipeline::fetch;
use campaign_pipeline::report;
use tempfile::tempdir;

fn active_record() -> FundingRecord {
    FundingRecord {
        campaign_title: "PattesThai Test Campaign".to_string(),
        goal_amount: 10_000.0,
        current_amount: 2_500.0,
        donor_count: 15,
        last_updated: "2026-08-30T12:00:00+00:00".to_string(),
        status: "Active".to_string(),
    }
}

#[test]
fn load_funding_data_defaults_when_file_is_missing() {
    let root = tempdir().unwrap();
    let paths = Paths::new(root.path());

    let record = report::load_funding_data(&paths);
    assert_eq!(record.status, fetch::STATUS_PENDING_LAUNCH);
    assert_eq!(record.current_amount, 0.0);
}

#[test]
fn load_funding_data_defaults_on_corrupt_file() {
    let root = tempdir().unwrap();
    let paths = Paths::new(root.path());
    std::fs::create_dir_all(&paths.campaign_data_dir).unwrap();
    std::fs::write(paths.funding_data_file(), "{not json").unwrap();

    let record = report::load_funding_data(&paths);
    assert_eq!(record.status, fetch::STATUS_PENDING_LAUNCH);
}

#[test]
fn load_funding_data_reads_back_stored_record() {
    let root = tempdir().unwrap();
    let paths = Paths::new(root.path());
    let record = active_record();
    fetch::write_funding_data(&record, &paths).unwrap();

    let loaded = report::load_funding_data(&paths);
    assert_eq!(loaded, record);
}

#[test]
fn funding_report_survives_even_if_chart_cannot_render() {
    let root = tempdir().unwrap();
    let paths = Paths::new(root.path());

    // current_amount > 0 triggers the chart attempt; whatever the chart
    // backend does, the Markdown report must land on disk.
    report::render_funding_report(&active_record(), &paths).unwrap();

    let md = std::fs::read_to_string(paths.funding_report_file()).unwrap();
    assert!(md.contains("**Percentage reached**: 25.00%"));
    assert!(md.contains("PattesThai Test Campaign"));
}

#[test]
fn fresh_campaign_renders_no_chart() {
    let root = tempdir().unwrap();
    let paths = Paths::new(root.path());

    report::render_funding_report(&FundingRecord::pending_launch(), &paths).unwrap();
    assert!(paths.funding_report_file().exists());
    assert!(!paths.funding_chart_file().exists());
}

#[test]
fn social_report_contains_fixed_sections() {
    let root = tempdir().unwrap();
    let paths = Paths::new(root.path());

    report::render_social_report(&paths).unwrap();

    let md = std::fs::read_to_string(paths.social_report_file()).unwrap();
    assert!(md.contains("## TikTok Performance"));
    assert!(md.contains("**Followers**: 0"));
    assert!(md.contains("## Recommended Strategy"));
}
