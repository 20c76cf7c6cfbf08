//! AI content drafting.
//!

use crate::core::error::CoreError;
use crate::core::models::{GenerateRequest, GeneratedContent};
use crate::core::traits::GenerationService;
use crate::infrastructure::entities::setting_keys;
use crate::infrastructure::traits::{
    CompletionRequest, GenerationError, SettingsRepository, TextGenerator,
};
use async_trait::async_trait;
use di::{Ref, injectable};
use log::{error, info};
use minijinja::{Environment, context};

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_LANGUAGE: &str = "uz";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 2000;

const SYSTEM_PROMPT: &str =
    "You are a professional content writer. You create high-quality, engaging and useful content.";

const BLOG_PROMPT: &str = r#"Write a professional blog article in {{ language }} about the following topic: {{ topic }}.

The article must contain:
- An engaging headline
- An introduction
- 3-4 main sections
- A conclusion
- Practical tips

The article should be SEO-optimized, useful and interesting for readers."#;

const SOCIAL_PROMPT: &str = r#"Write a social media post in {{ language }} about the following topic: {{ topic }}

The post should be short, engaging and attention-grabbing. Emoji are welcome."#;

const NEWS_PROMPT: &str = r#"Write a news article in {{ language }} about the following topic: {{ topic }}

The article should be:
- Clear and concise
- Based on facts
- Written in a professional style
- 200-300 words long"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    Blog,
    Social,
    News,
}

impl PromptTemplate {
    /// Unknown names fall back to [`PromptTemplate::Blog`].
    pub fn from_name(name: &str) -> PromptTemplate {
        match name.trim().to_ascii_lowercase().as_str() {
            "social" => PromptTemplate::Social,
            "news" => PromptTemplate::News,
            _ => PromptTemplate::Blog,
        }
    }

    fn source(&self) -> &'static str {
        match self {
            PromptTemplate::Blog => BLOG_PROMPT,
            PromptTemplate::Social => SOCIAL_PROMPT,
            PromptTemplate::News => NEWS_PROMPT,
        }
    }
}

fn language_name(code: &str) -> &'static str {
    match code.trim().to_ascii_lowercase().as_str() {
        "uz" => "Uzbek",
        "ru" => "Russian",
        _ => "English",
    }
}

pub fn render_prompt(
    template: PromptTemplate,
    topic: &str,
    language: &str,
) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("prompt", template.source())?;
    env.get_template("prompt")?.render(context! {
        topic => topic,
        language => language_name(language),
    })
}

/// First non-empty line of the generated text with markdown heading markers removed.
pub fn extract_title(generated: &str, fallback: &str) -> String {
    generated
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.trim_start_matches('#').trim())
        .filter(|title| !title.is_empty())
        .unwrap_or(fallback)
        .to_owned()
}

#[injectable(GenerationService)]
pub struct AiGenerationService {
    generator: Ref<dyn TextGenerator>,
    settings: Ref<dyn SettingsRepository>,
}

#[async_trait]
impl GenerationService for AiGenerationService {
    async fn generate(&self, request: GenerateRequest) -> Result<GeneratedContent, CoreError> {
        if !self.generator.is_configured() {
            return Err(CoreError::ServiceUnavailable(
                GenerationError::NotConfigured.to_string(),
            ));
        }

        let topic = request
            .topic
            .as_deref()
            .map(str::trim)
            .filter(|topic| !topic.is_empty())
            .ok_or_else(|| CoreError::invalid("topic", "Topic is required"))?;

        let template = PromptTemplate::from_name(request.template.as_deref().unwrap_or("blog"));
        let language = request.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);
        let user_prompt = render_prompt(template, topic, language)
            .map_err(|e| CoreError::Internal(format!("prompt rendering failed: {e}")))?;

        let model = match self.settings.value_of(setting_keys::OPENAI_MODEL).await? {
            model if model.trim().is_empty() => DEFAULT_MODEL.to_owned(),
            model => model,
        };

        info!("generating {template:?} content with {model}");

        let body = self
            .generator
            .complete(CompletionRequest {
                model,
                system_prompt: SYSTEM_PROMPT.to_owned(),
                user_prompt,
                temperature: TEMPERATURE,
                max_tokens: MAX_TOKENS,
            })
            .await
            .map_err(|e| match e {
                GenerationError::NotConfigured => CoreError::ServiceUnavailable(e.to_string()),
                other => {
                    error!("AI generation error: {other}");
                    CoreError::Upstream("Failed to generate content with AI".to_owned())
                }
            })?;

        let category = match request.category.filter(|c| !c.trim().is_empty()) {
            Some(category) => Some(category),
            None => {
                let fallback = self
                    .settings
                    .value_of(setting_keys::DEFAULT_CATEGORY)
                    .await?;
                (!fallback.trim().is_empty()).then_some(fallback)
            }
        };

        Ok(GeneratedContent {
            title: extract_title(&body, topic),
            body,
            category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_first_non_empty_line_without_heading_marks() {
        let text = "\n\n  ## Rust in production  \nBody text\n";
        assert_eq!(extract_title(text, "topic"), "Rust in production");
    }

    #[test]
    fn title_falls_back_to_topic() {
        assert_eq!(extract_title("", "Rust"), "Rust");
        assert_eq!(extract_title("   \n###\n", "Rust"), "Rust");
    }

    #[test]
    fn unknown_template_falls_back_to_blog() {
        assert_eq!(PromptTemplate::from_name("news"), PromptTemplate::News);
        assert_eq!(PromptTemplate::from_name("Social"), PromptTemplate::Social);
        assert_eq!(PromptTemplate::from_name("poem"), PromptTemplate::Blog);
    }

    #[test]
    fn prompt_mentions_topic_and_language() {
        let prompt = render_prompt(PromptTemplate::News, "solar panels", "uz").unwrap();
        assert!(prompt.contains("solar panels"));
        assert!(prompt.contains("in Uzbek"));
        assert!(prompt.contains("200-300 words"));

        let prompt = render_prompt(PromptTemplate::Social, "solar panels", "en").unwrap();
        assert!(prompt.contains("in English"));
    }
}
