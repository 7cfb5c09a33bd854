use std::{ops::Range, sync::LazyLock};

use marketgenius_sdk::AspectRatio;
use regex::Regex;
use tracing::{debug, info};

use crate::{
    content::{BriefPayload, ContentRequest, ContentType, SlotValues, ToneOfVoice},
    export,
    generation::{BlogBrief, GenerationClient},
    opentelemetry::{trace_step, Workflow, WorkflowSpan},
    StudioError, StudioResult,
};

pub const DEFAULT_ARTICLE_WORD_COUNT: &str = "1500";

const BRIEF_ERROR: &str = "Could not generate brief. Please try again.";
const OUTLINE_ERROR: &str = "Could not regenerate outline. Please try again.";
const ARTICLE_ERROR: &str = "Could not generate the article. Please try again.";
const FEATURE_IMAGE_ERROR: &str = "Failed to generate image.";

/// Matches a placeholder that occupies a whole line, with or without the
/// `IMAGE:` prefix.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mR)^\[(?:IMAGE:)?\s*(.*?)\s*\]$").expect("placeholder pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleStage {
    Initial,
    Briefing,
    Generating,
    Done,
}

/// An image marker found in a generated draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePlaceholder {
    /// The full marker line, e.g. `[IMAGE: a red fox]`.
    pub marker: String,
    /// The description passed to image generation.
    pub description: String,
    /// Byte range of the marker in the scanned text.
    pub range: Range<usize>,
}

/// Returns every whole-line image marker in document order. Markers that
/// share a line with other text are not placeholders.
#[must_use]
pub fn extract_placeholders(text: &str) -> Vec<ImagePlaceholder> {
    PLACEHOLDER
        .captures_iter(text)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            Some(ImagePlaceholder {
                marker: whole.as_str().to_string(),
                description: captures[1].to_string(),
                range: whole.range(),
            })
        })
        .collect()
}

fn image_markdown(description: &str, url: &str) -> String {
    let alt = description.replace(['[', ']'], "");
    format!("\n\n![{alt}]({url})\n\n")
}

/// What the article workflow reports while a draft is being produced.
#[derive(Debug, Clone, Copy)]
pub enum ArticleUpdate<'a> {
    Progress(&'a str),
    /// The draft text after a step that changed it.
    Draft(&'a str),
}

/// The brief-to-article workflow: topic, editable brief, then a draft with
/// generated images in place of its placeholders.
#[derive(Debug, Clone)]
pub struct ArticleSession {
    stage: ArticleStage,
    topic: String,
    brief: Option<BlogBrief>,
    pub title: String,
    keywords: Vec<String>,
    pub outline: String,
    pub word_count: String,
    pub tone: String,
    article: String,
    generated_image_urls: Vec<String>,
    feature_image: Option<String>,
    error: Option<String>,
    progress: Option<String>,
    is_loading: bool,
}

impl Default for ArticleSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: ArticleStage::Initial,
            topic: String::new(),
            brief: None,
            title: String::new(),
            keywords: Vec::new(),
            outline: String::new(),
            word_count: DEFAULT_ARTICLE_WORD_COUNT.to_string(),
            tone: ToneOfVoice::Friendly.label().to_string(),
            article: String::new(),
            generated_image_urls: Vec::new(),
            feature_image: None,
            error: None,
            progress: None,
            is_loading: false,
        }
    }

    #[must_use]
    pub fn stage(&self) -> ArticleStage {
        self.stage
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn brief(&self) -> Option<&BlogBrief> {
        self.brief.as_ref()
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    #[must_use]
    pub fn article(&self) -> &str {
        &self.article
    }

    #[must_use]
    pub fn generated_image_urls(&self) -> &[String] {
        &self.generated_image_urls
    }

    #[must_use]
    pub fn feature_image(&self) -> Option<&str> {
        self.feature_image.as_deref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn progress(&self) -> Option<&str> {
        self.progress.as_deref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Adds a keyword unless it is blank or already present.
    pub fn add_keyword(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() || self.keywords.iter().any(|k| k == keyword) {
            return false;
        }
        self.keywords.push(keyword.to_string());
        true
    }

    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        let before = self.keywords.len();
        self.keywords.retain(|k| k != keyword);
        self.keywords.len() != before
    }

    /// Generates the brief for `topic` and moves to `Briefing`. On failure
    /// the session stays in `Initial` with the error retained.
    pub async fn submit_topic(
        &mut self,
        client: &dyn GenerationClient,
        topic: &str,
    ) -> StudioResult<&BlogBrief> {
        self.expect_stage(ArticleStage::Initial, "submit a topic")?;
        let topic = topic.trim();
        if topic.is_empty() || self.is_loading {
            return Err(StudioError::InvalidState(
                "a topic is required to generate a brief".to_string(),
            ));
        }

        self.topic = topic.to_string();
        self.is_loading = true;
        self.error = None;

        let span = self.span("submit_topic");
        let outcome = trace_step(span, client.generate_brief(topic)).await;
        self.is_loading = false;

        match outcome {
            Ok(brief) => {
                info!(title = %brief.title, "article brief generated");
                self.title.clone_from(&brief.title);
                self.keywords.clone_from(&brief.keywords);
                self.outline.clone_from(&brief.outline);
                self.stage = ArticleStage::Briefing;
                Ok(self.brief.insert(brief))
            }
            Err(error) => {
                tracing::error!(%error, "article brief failed");
                self.error = Some(brief_error_message(&error, BRIEF_ERROR).to_string());
                self.stage = ArticleStage::Initial;
                Err(error)
            }
        }
    }

    /// Replaces only the outline with a freshly generated one. Title and
    /// keywords keep any edits; on failure the outline is kept too.
    pub async fn regenerate_outline(&mut self, client: &dyn GenerationClient) -> StudioResult<&str> {
        self.expect_stage(ArticleStage::Briefing, "regenerate the outline")?;
        self.is_loading = true;
        self.error = None;

        let span = self.span("regenerate_outline");
        let outcome = trace_step(span, client.generate_outline(&self.topic)).await;
        self.is_loading = false;

        match outcome {
            Ok(outline) => {
                if let Some(brief) = self.brief.as_mut() {
                    brief.outline.clone_from(&outline);
                }
                self.outline = outline;
                Ok(&self.outline)
            }
            Err(error) => {
                tracing::error!(%error, "outline regeneration failed");
                self.error = Some(OUTLINE_ERROR.to_string());
                Err(error)
            }
        }
    }

    /// Leaves the brief editor without generating.
    pub fn cancel_brief(&mut self) -> StudioResult<()> {
        self.expect_stage(ArticleStage::Briefing, "cancel the brief")?;
        self.stage = ArticleStage::Initial;
        self.error = None;
        Ok(())
    }

    /// The content request the brief editor currently describes.
    pub fn request(&self) -> StudioResult<ContentRequest> {
        let payload = BriefPayload::new(self.outline.clone(), self.word_count.clone());
        ContentRequest::from_slots(
            ContentType::BlogPostFromBrief,
            &SlotValues::new(
                self.title.clone(),
                self.keywords.join(", "),
                self.tone.clone(),
                payload.encode()?,
            ),
        )
    }

    /// Writes the draft, then replaces each image placeholder with a
    /// generated image, one at a time in document order. `on_update` sees
    /// every progress message and every intermediate draft.
    ///
    /// Ends in `Done`, or back in `Briefing` with the edited brief intact.
    pub async fn submit_brief<F>(
        &mut self,
        client: &dyn GenerationClient,
        mut on_update: F,
    ) -> StudioResult<&str>
    where
        F: FnMut(ArticleUpdate<'_>),
    {
        self.expect_stage(ArticleStage::Briefing, "generate the article")?;
        let prompt = self.request()?.prompt();

        self.stage = ArticleStage::Generating;
        self.is_loading = true;
        self.error = None;
        self.article.clear();

        let span = self
            .span("submit_brief")
            .with_attribute("marketgenius.article.word_count", self.word_count.clone());
        let outcome = trace_step(span, self.write_article(client, &prompt, &mut on_update)).await;
        self.is_loading = false;
        self.progress = None;

        match outcome {
            Ok(()) => {
                info!(
                    images = self.generated_image_urls.len(),
                    words = export::word_count(&self.article),
                    "article generated"
                );
                self.stage = ArticleStage::Done;
                Ok(&self.article)
            }
            Err(error) => {
                tracing::error!(%error, "article generation failed");
                self.error = Some(ARTICLE_ERROR.to_string());
                self.stage = ArticleStage::Briefing;
                Err(error)
            }
        }
    }

    async fn write_article<F>(
        &mut self,
        client: &dyn GenerationClient,
        prompt: &str,
        on_update: &mut F,
    ) -> StudioResult<()>
    where
        F: FnMut(ArticleUpdate<'_>),
    {
        self.report("Writing your draft...", on_update);
        self.article = client.generate_text(prompt).await?;
        on_update(ArticleUpdate::Draft(&self.article));

        self.report("Scanning for image opportunities...", on_update);
        let placeholders = extract_placeholders(&self.article);
        debug!(count = placeholders.len(), "image placeholders found");

        let total = placeholders.len();
        // Inserted images contain `[description]` themselves, so markers are
        // spliced by position rather than searched for again.
        let (mut inserted, mut removed) = (0, 0);
        for (index, placeholder) in placeholders.iter().enumerate() {
            let message = format!(
                "Generating image {} of {total}: \"{}\"",
                index + 1,
                placeholder.description
            );
            self.report(&message, on_update);

            let image = client
                .generate_image(&placeholder.description, AspectRatio::Landscape)
                .await?;
            let url = image.data_url();
            let markdown = image_markdown(&placeholder.description, &url);
            let start = placeholder.range.start + inserted - removed;
            let end = placeholder.range.end + inserted - removed;
            self.article.replace_range(start..end, &markdown);
            inserted += markdown.len();
            removed += placeholder.range.len();
            self.generated_image_urls.push(url);
            on_update(ArticleUpdate::Draft(&self.article));
        }
        Ok(())
    }

    /// Generates the feature image shown above the article. An empty prompt
    /// uses the title; `style` is appended as "{prompt}, {style} style".
    pub async fn generate_feature_image(
        &mut self,
        client: &dyn GenerationClient,
        prompt: &str,
        style: Option<&str>,
    ) -> StudioResult<&str> {
        let prompt = match prompt.trim() {
            "" => self.title.trim(),
            prompt => prompt,
        };
        if prompt.is_empty() {
            return Err(StudioError::InvalidState(
                "a feature image needs a prompt or a title".to_string(),
            ));
        }
        let prompt = match style {
            Some(style) if !style.is_empty() && style != "None" => format!("{prompt}, {style} style"),
            _ => prompt.to_string(),
        };

        let span = self.span("feature_image");
        match trace_step(span, client.generate_image(&prompt, AspectRatio::Landscape)).await {
            Ok(image) => Ok(self.feature_image.insert(image.data_url())),
            Err(error) => {
                tracing::error!(%error, "feature image failed");
                self.error = Some(FEATURE_IMAGE_ERROR.to_string());
                Err(error)
            }
        }
    }

    /// The article as markdown: title, feature image, then the body.
    #[must_use]
    pub fn markdown(&self) -> String {
        export::article_markdown(&self.title, self.feature_image.as_deref(), &self.article)
    }

    fn report<F>(&mut self, message: &str, on_update: &mut F)
    where
        F: FnMut(ArticleUpdate<'_>),
    {
        self.progress = Some(message.to_string());
        on_update(ArticleUpdate::Progress(message));
    }

    fn expect_stage(&self, stage: ArticleStage, action: &str) -> StudioResult<()> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(StudioError::InvalidState(format!(
                "cannot {action} while the article is {:?}",
                self.stage
            )))
        }
    }

    fn span(&self, step: &'static str) -> WorkflowSpan {
        WorkflowSpan::new(Workflow::Article, step)
            .with_attribute("marketgenius.article.topic", self.topic.clone())
    }
}

/// Malformed briefs keep their own message; anything else gets `fallback`.
fn brief_error_message(error: &StudioError, fallback: &'static str) -> &'static str {
    match error {
        StudioError::InvalidBrief(_) => error.user_message(),
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_whole_line_markers_are_placeholders() {
        let text = "Intro\n[A red fox in snow]\nsome text [not a placeholder] inline\n";
        let placeholders = extract_placeholders(text);
        assert_eq!(
            placeholders,
            vec![ImagePlaceholder {
                marker: "[A red fox in snow]".to_string(),
                description: "A red fox in snow".to_string(),
                range: 6..25,
            }]
        );
    }

    #[test]
    fn image_prefix_and_padding_are_stripped() {
        let placeholders = extract_placeholders("[IMAGE:   team at a whiteboard  ]\n[ sunset ]");
        let descriptions: Vec<_> = placeholders.iter().map(|p| p.description.as_str()).collect();
        assert_eq!(descriptions, vec!["team at a whiteboard", "sunset"]);
        assert_eq!(placeholders[0].marker, "[IMAGE:   team at a whiteboard  ]");
    }

    #[test]
    fn crlf_lines_are_placeholders() {
        let placeholders = extract_placeholders("Intro\r\n[A red fox in snow]\r\nMore text\r\n");
        assert_eq!(placeholders.len(), 1);
        assert_eq!(placeholders[0].marker, "[A red fox in snow]");
        assert_eq!(placeholders[0].description, "A red fox in snow");
    }

    #[test]
    fn image_markdown_drops_brackets_from_alt_text() {
        assert_eq!(
            image_markdown("a [bold] idea", "data:image/png;base64,AA"),
            "\n\n![a bold idea](data:image/png;base64,AA)\n\n"
        );
    }

    #[test]
    fn keywords_are_trimmed_and_deduplicated() {
        let mut session = ArticleSession::new();
        assert!(session.add_keyword("  seo "));
        assert!(!session.add_keyword("seo"));
        assert!(!session.add_keyword("   "));
        assert!(session.add_keyword("content"));
        assert!(session.remove_keyword("seo"));
        assert!(!session.remove_keyword("missing"));
        assert_eq!(session.keywords(), ["content".to_string()]);
    }

    #[test]
    fn defaults_match_the_brief_editor() {
        let session = ArticleSession::new();
        assert_eq!(session.stage(), ArticleStage::Initial);
        assert_eq!(session.word_count, "1500");
        assert_eq!(session.tone, "Friendly");
    }

    #[test]
    fn cancel_is_only_available_while_briefing() {
        let mut session = ArticleSession::new();
        assert!(matches!(session.cancel_brief(), Err(StudioError::InvalidState(_))));
    }
}
