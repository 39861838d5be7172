//! Social content idea generation via the chat-completion API, with a
//! hardcoded default batch when no credential is configured or the call
//! does not yield parseable ideas.

use std::fs;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Local;
use regex::Regex;
use tracing::{error, info};

use crate::config::{ContentSettings, Paths};
use crate::contract::{ApiError, ChatApi, ChatMessage, ChatRequest, ContentIdea, DataOrigin};

const SYSTEM_PROMPT: &str =
    "You are a TikTok marketing expert for nonprofit organisations dedicated to animals.";

const USER_PROMPT: &str = "Generate 5 TikTok content ideas for our PattesThai project, a shelter \
     for stray dogs and cats in Thailand. For each idea provide a title, a description, suggested \
     hashtags, a music suggestion and an optimal duration. Focus on content that can go viral \
     while raising awareness for our cause and encouraging donations. Remember this project is \
     100% real and we emphasise transparency and authenticity. Format your answer as JSON.";

/// A batch of ideas together with where it came from.
#[derive(Debug, Clone)]
pub struct IdeaSet {
    pub ideas: Vec<ContentIdea>,
    pub origin: DataOrigin,
}

/// The fixed default batch, used on every fallback path. Order is the
/// presentation order.
pub fn default_ideas() -> Vec<ContentIdea> {
    vec![
        ContentIdea {
            title: "A day at the shelter".to_string(),
            description: "Video showing a typical day at the shelter, from morning feeding to \
                          veterinary care."
                .to_string(),
            hashtags: vec![
                "#AnimalRescue".to_string(),
                "#Thailand".to_string(),
                "#DogsOfTikTok".to_string(),
                "#CatsOfTikTok".to_string(),
                "#PattesThai".to_string(),
            ],
            music_suggestion: "Calm or cheerful music highlighting the daily work".to_string(),
            duration: "15-60 seconds".to_string(),
        },
        ContentIdea {
            title: "Before/after rescue".to_string(),
            description: "Show an animal's transformation from rescue to rehabilitation."
                .to_string(),
            hashtags: vec![
                "#BeforeAndAfter".to_string(),
                "#RescueDog".to_string(),
                "#AnimalTransformation".to_string(),
                "#PattesThai".to_string(),
            ],
            music_suggestion: "Emotional music following the metamorphosis".to_string(),
            duration: "15-30 seconds".to_string(),
        },
        ContentIdea {
            title: "Meet our team".to_string(),
            description: "Introduce the volunteers and their work at the shelter.".to_string(),
            hashtags: vec![
                "#MeetTheTeam".to_string(),
                "#Volunteers".to_string(),
                "#AnimalLovers".to_string(),
                "#PattesThai".to_string(),
            ],
            music_suggestion: "Energetic and positive music".to_string(),
            duration: "30-60 seconds".to_string(),
        },
        ContentIdea {
            title: "Call for donations".to_string(),
            description: "Video showing how donations are used concretely to help the animals."
                .to_string(),
            hashtags: vec![
                "#Donation".to_string(),
                "#HelpAnimals".to_string(),
                "#MakeDifference".to_string(),
                "#PattesThai".to_string(),
            ],
            music_suggestion: "Inspiring music with a call to action".to_string(),
            duration: "30-60 seconds".to_string(),
        },
        ContentIdea {
            title: "Behind the scenes with the vets".to_string(),
            description: "Show the veterinary care given to shelter animals (respecting ethics, \
                          no shocking images)."
                .to_string(),
            hashtags: vec![
                "#VetLife".to_string(),
                "#AnimalCare".to_string(),
                "#VetTech".to_string(),
                "#PattesThai".to_string(),
            ],
            music_suggestion: "Calm and professional music".to_string(),
            duration: "15-60 seconds".to_string(),
        },
    ]
}

/// Client for the OpenAI chat-completion endpoint.
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        OpenAiClient {
            http: reqwest::Client::new(),
            base_url: "https://api.openai.com".to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at a different server (for tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(serde::Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(serde::Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(serde::Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[async_trait]
impl ChatApi for OpenAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, ApiError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        info!(url = %url, model = %request.model, "Requesting chat completion");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let body = response.json::<ChatResponse>().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or("chat completion returned no choices")?;
        Ok(content)
    }
}

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^```(?:json)?\s*(.*?)\s*(?:```|$)").expect("fence regex is valid")
    })
}

/// Strip a surrounding Markdown code fence (```json ... ``` or ``` ... ```)
/// from a model response so the JSON inside can be parsed. A truncated
/// response missing its closing fence still yields the fenced remainder.
pub fn strip_code_fence(content: &str) -> String {
    let trimmed = content.trim();
    match fence_re().captures(trimmed) {
        Some(caps) => caps[1].to_string(),
        None => trimmed.to_string(),
    }
}

/// Generate content ideas, or substitute the default batch.
///
/// Network and parse failures are absorbed here, never propagated.
pub async fn generate(settings: &ContentSettings, api: &dyn ChatApi) -> IdeaSet {
    if !settings.is_configured() {
        info!("Language-model API key not configured, using default suggestions");
        return IdeaSet {
            ideas: default_ideas(),
            origin: DataOrigin::Unconfigured,
        };
    }

    let request = ChatRequest {
        model: settings.model.clone(),
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(USER_PROMPT),
        ],
        temperature: settings.temperature,
    };

    let content = match api.complete(request).await {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, "Chat completion failed, using default suggestions");
            return IdeaSet {
                ideas: default_ideas(),
                origin: DataOrigin::CallFailed(e.to_string()),
            };
        }
    };

    let body = strip_code_fence(&content);
    match serde_json::from_str::<Vec<ContentIdea>>(&body) {
        Ok(ideas) => {
            info!(count = ideas.len(), "Parsed generated content ideas");
            IdeaSet {
                ideas,
                origin: DataOrigin::Live,
            }
        }
        Err(e) => {
            error!(error = ?e, "Could not parse model response as ideas, using defaults");
            IdeaSet {
                ideas: default_ideas(),
                origin: DataOrigin::CallFailed(format!("response parse: {e}")),
            }
        }
    }
}

/// Write the idea batch as pretty JSON plus a human-readable Markdown file.
/// Whole-file overwrites.
pub fn save_ideas(ideas: &[ContentIdea], paths: &Paths) -> Result<()> {
    fs::create_dir_all(&paths.social_output_dir).with_context(|| {
        format!(
            "Failed to create output directory {:?}",
            paths.social_output_dir
        )
    })?;

    let json = serde_json::to_string_pretty(ideas).context("Failed to serialize ideas")?;
    let json_file = paths.ideas_json_file();
    fs::write(&json_file, json).with_context(|| format!("Failed to write {:?}", json_file))?;

    let md_file = paths.ideas_markdown_file();
    fs::write(&md_file, render_ideas_markdown(ideas))
        .with_context(|| format!("Failed to write {:?}", md_file))?;

    info!(
        count = ideas.len(),
        dir = %paths.social_output_dir.display(),
        "Saved TikTok content ideas"
    );
    Ok(())
}

fn render_ideas_markdown(ideas: &[ContentIdea]) -> String {
    let mut md = format!(
        "# TikTok Content Ideas for PattesThai\n\n*Generated on {}*\n\n",
        Local::now().format("%d/%m/%Y %H:%M")
    );
    for (i, idea) in ideas.iter().enumerate() {
        md.push_str(&format!(
            "## {n}. {title}\n\n\
             **Description:** {description}\n\n\
             **Hashtags:** {hashtags}\n\n\
             **Music suggestion:** {music}\n\n\
             **Optimal duration:** {duration}\n\n\
             ---\n\n",
            n = i + 1,
            title = idea.title,
            description = idea.description,
            hashtags = idea.hashtags.join(", "),
            music = idea.music_suggestion,
            duration = idea.duration,
        ));
    }
    md
}
