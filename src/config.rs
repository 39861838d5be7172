use std::env;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// Sentinel value that counts as "no key configured".
pub const PLACEHOLDER_KEY: &str = "placeholder";

/// Campaign identifier used until the real one is known.
pub const DEFAULT_CAMPAIGN_ID: &str = "placeholder_id";

/// Explicit configuration record, constructed once at the entry point and
/// passed to each component by parameter. Component logic never reads
/// ambient process state.
#[derive(Debug, Clone)]
pub struct Settings {
    pub funding: FundingSettings,
    pub content: ContentSettings,
    pub paths: Paths,
}

#[derive(Debug, Clone)]
pub struct FundingSettings {
    pub api_key: Option<String>,
    pub campaign_id: String,
}

impl FundingSettings {
    /// A key equal to the placeholder counts as absent.
    pub fn is_configured(&self) -> bool {
        matches!(&self.api_key, Some(k) if !k.is_empty() && k != PLACEHOLDER_KEY)
    }
}

#[derive(Debug, Clone)]
pub struct ContentSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
}

impl ContentSettings {
    pub fn is_configured(&self) -> bool {
        matches!(&self.api_key, Some(k) if !k.is_empty() && k != PLACEHOLDER_KEY)
    }
}

impl Default for ContentSettings {
    fn default() -> Self {
        ContentSettings {
            api_key: None,
            model: "gpt-4".to_string(),
            temperature: 0.7,
        }
    }
}

/// All input/output locations, resolved against a single invocation root.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Raw campaign data and the status page: `docs/campaign/data/`.
    pub campaign_data_dir: PathBuf,
    /// Working directory for rendered reports: `reports/`.
    pub reports_dir: PathBuf,
    /// Generated social content: `output/social/`.
    pub social_output_dir: PathBuf,
    /// Published copies and the report index: `docs/reports/`.
    pub docs_reports_dir: PathBuf,
}

impl Paths {
    pub fn new(root: &Path) -> Self {
        Paths {
            campaign_data_dir: root.join("docs/campaign/data"),
            reports_dir: root.join("reports"),
            social_output_dir: root.join("output/social"),
            docs_reports_dir: root.join("docs/reports"),
        }
    }

    pub fn funding_data_file(&self) -> PathBuf {
        self.campaign_data_dir.join("funding_data.json")
    }

    pub fn funding_status_file(&self) -> PathBuf {
        self.campaign_data_dir.join("funding_status.md")
    }

    pub fn funding_report_file(&self) -> PathBuf {
        self.reports_dir.join("funding_report.md")
    }

    pub fn funding_chart_file(&self) -> PathBuf {
        self.reports_dir.join("funding_progress.png")
    }

    pub fn social_report_file(&self) -> PathBuf {
        self.reports_dir.join("social_media_report.md")
    }

    pub fn ideas_json_file(&self) -> PathBuf {
        self.social_output_dir.join("tiktok_ideas.json")
    }

    pub fn ideas_markdown_file(&self) -> PathBuf {
        self.social_output_dir.join("tiktok_ideas.md")
    }

    pub fn report_index_file(&self) -> PathBuf {
        self.docs_reports_dir.join("index.md")
    }
}

impl Settings {
    /// Build settings from the environment. Absent credentials are not an
    /// error; they select the fallback paths downstream.
    pub fn from_env(root: &Path) -> Self {
        let funding = FundingSettings {
            api_key: env::var("GOFUNDME_API_KEY").ok().filter(|k| !k.is_empty()),
            campaign_id: env::var("GOFUNDME_CAMPAIGN_ID")
                .unwrap_or_else(|_| DEFAULT_CAMPAIGN_ID.to_string()),
        };
        let content = ContentSettings {
            api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            ..ContentSettings::default()
        };
        let settings = Settings {
            funding,
            content,
            paths: Paths::new(root),
        };
        settings.trace_loaded();
        settings
    }

    pub fn trace_loaded(&self) {
        info!(
            funding_configured = self.funding.is_configured(),
            content_configured = self.content.is_configured(),
            reports_dir = %self.paths.reports_dir.display(),
            "Loaded Settings"
        );
        debug!(?self, "Settings loaded (full debug)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_key_counts_as_unconfigured() {
        let funding = FundingSettings {
            api_key: Some(PLACEHOLDER_KEY.to_string()),
            campaign_id: DEFAULT_CAMPAIGN_ID.to_string(),
        };
        assert!(!funding.is_configured());

        let funding = FundingSettings {
            api_key: Some("real-key".to_string()),
            campaign_id: "12345".to_string(),
        };
        assert!(funding.is_configured());
    }

    #[test]
    fn paths_resolve_against_root() {
        let paths = Paths::new(Path::new("/tmp/site"));
        assert_eq!(
            paths.funding_data_file(),
            PathBuf::from("/tmp/site/docs/campaign/data/funding_data.json")
        );
        assert_eq!(
            paths.report_index_file(),
            PathBuf::from("/tmp/site/docs/reports/index.md")
        );
    }
}
