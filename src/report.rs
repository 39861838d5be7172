//! Renders the funding and social-media reports from the stored campaign
//! data. Markdown output is the primary artifact; the chart is best-effort.

use std::fs;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{error, info, warn};

use crate::chart;
use crate::config::Paths;
use crate::contract::FundingRecord;

/// Share of the goal reached, in percent. Zero when the goal is zero so a
/// fresh campaign never divides by zero.
pub fn percentage(current: f64, goal: f64) -> f64 {
    if goal > 0.0 {
        current / goal * 100.0
    } else {
        0.0
    }
}

/// Load the stored funding data, or the pending-launch default when the
/// file is missing or unreadable. Read errors are logged and absorbed.
pub fn load_funding_data(paths: &Paths) -> FundingRecord {
    let data_file = paths.funding_data_file();
    if !data_file.exists() {
        info!(path = %data_file.display(), "No stored funding data, using defaults");
        return FundingRecord::pending_launch();
    }
    match fs::read_to_string(&data_file)
        .map_err(anyhow::Error::from)
        .and_then(|content| {
            serde_json::from_str::<FundingRecord>(&content).map_err(anyhow::Error::from)
        })
    {
        Ok(record) => record,
        Err(e) => {
            warn!(error = ?e, path = %data_file.display(), "Failed to load funding data, using defaults");
            FundingRecord::pending_launch()
        }
    }
}

/// Write the funding report and, when money has come in, the progress
/// chart. Chart failures are logged and never fatal to the Markdown output.
pub fn render_funding_report(record: &FundingRecord, paths: &Paths) -> Result<()> {
    fs::create_dir_all(&paths.reports_dir)
        .with_context(|| format!("Failed to create reports directory {:?}", paths.reports_dir))?;

    let report_file = paths.funding_report_file();
    fs::write(&report_file, funding_report_markdown(record))
        .with_context(|| format!("Failed to write {:?}", report_file))?;
    info!(path = %report_file.display(), "Wrote funding report");

    if record.current_amount > 0.0 {
        let remaining = (record.goal_amount - record.current_amount).max(0.0);
        let chart_file = paths.funding_chart_file();
        if let Err(e) = chart::render_progress_pie(record.current_amount, remaining, &chart_file) {
            error!(error = %e, path = %chart_file.display(), "Chart rendering failed");
        }
    }
    Ok(())
}

fn funding_report_markdown(record: &FundingRecord) -> String {
    let pct = percentage(record.current_amount, record.goal_amount);
    let not_launched = record.current_amount == 0.0;
    let recommendation = if not_launched {
        "Launch the campaign as soon as possible"
    } else {
        "Step up communication on social networks"
    };
    let first_step = if not_launched {
        "Finalise the GoFundMe page with detailed images and descriptions"
    } else {
        "Publish updates on how the funds are used"
    };
    format!(
        "# PattesThai Funding Report\n\
         \n\
         *Generated on {now}*\n\
         \n\
         ## GoFundMe Campaign State\n\
         \n\
         - **Campaign**: {title}\n\
         - **Goal**: {goal} EUR\n\
         - **Current amount**: {current} EUR\n\
         - **Donor count**: {donors}\n\
         - **Percentage reached**: {pct:.2}%\n\
         - **Last updated**: {updated}\n\
         - **Status**: {status}\n\
         \n\
         ## Analysis\n\
         \n\
         - Main donation sources: N/A (data not yet available)\n\
         - Recommendation: {recommendation}\n\
         \n\
         ## Next Steps\n\
         \n\
         1. {first_step}\n\
         2. Prepare TikTok video content showing the impact of donations\n\
         3. Set up a real-time dashboard to track progress\n",
        now = Local::now().format("%d/%m/%Y %H:%M"),
        title = record.campaign_title,
        goal = record.goal_amount,
        current = record.current_amount,
        donors = record.donor_count,
        pct = pct,
        updated = record.last_updated,
        status = record.status,
        recommendation = recommendation,
        first_step = first_step,
    )
}

/// Write the social-media performance report. The stats are zeroed until
/// the TikTok campaign starts publishing.
pub fn render_social_report(paths: &Paths) -> Result<()> {
    fs::create_dir_all(&paths.reports_dir)
        .with_context(|| format!("Failed to create reports directory {:?}", paths.reports_dir))?;

    let report_file = paths.social_report_file();
    let content = format!(
        "# PattesThai Social Media Report\n\
         \n\
         *Generated on {now}*\n\
         \n\
         ## TikTok Performance\n\
         \n\
         - **Followers**: 0\n\
         - **Total views**: 0\n\
         - **Likes**: 0\n\
         - **Shares**: 0\n\
         - **Comments**: 0\n\
         \n\
         ### Top Performing Content\n\
         \n\
         *The TikTok campaign has not started yet. This section will be updated \
         automatically as soon as content is published.*\n\
         \n\
         ## Recommended Strategy\n\
         \n\
         1. Publish content showing rescued animals and their stories\n\
         2. Use popular hashtags related to animals and Thailand\n\
         3. Collaborate with animal content creators\n\
         4. Join TikTok trends and adapt them to our cause\n\
         5. Post regularly (3-5 times a week) to keep engagement up\n",
        now = Local::now().format("%d/%m/%Y %H:%M"),
    );
    fs::write(&report_file, content)
        .with_context(|| format!("Failed to write {:?}", report_file))?;
    info!(path = %report_file.display(), "Wrote social media report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_is_zero_for_zero_goal() {
        assert_eq!(percentage(500.0, 0.0), 0.0);
    }

    #[test]
    fn percentage_formats_two_decimals() {
        let pct = percentage(2_500.0, 10_000.0);
        assert_eq!(format!("{pct:.2}%"), "25.00%");
    }

    #[test]
    fn report_interpolates_percentage_and_status() {
        let record = FundingRecord {
            campaign_title: "Test Campaign".to_string(),
            goal_amount: 10_000.0,
            current_amount: 2_500.0,
            donor_count: 15,
            last_updated: "2026-01-01T00:00:00Z".to_string(),
            status: "Active".to_string(),
        };
        let md = funding_report_markdown(&record);
        assert!(md.contains("**Percentage reached**: 25.00%"));
        assert!(md.contains("**Status**: Active"));
        assert!(md.contains("Step up communication"));
    }

    #[test]
    fn fresh_campaign_gets_launch_recommendation() {
        let md = funding_report_markdown(&FundingRecord::pending_launch());
        assert!(md.contains("**Percentage reached**: 0.00%"));
        assert!(md.contains("Launch the campaign as soon as possible"));
        assert!(md.contains("Finalise the GoFundMe page"));
    }
}
