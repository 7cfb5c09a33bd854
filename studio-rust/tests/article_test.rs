mod common;

use common::{prompt_of, text_response, MockModels};
use marketgenius_sdk::{AspectRatio, GenerationError};
use marketgenius_studio::{
    article::extract_placeholders, ArticleSession, ArticleStage, ArticleUpdate, StudioError,
};

const BRIEF_JSON: &str = r###"{"title":"10 SEO Myths Busted","keywords":["seo","myths","ranking"],"outline":"## Intro\n## Myth 1"}"###;

fn service_error() -> GenerationError {
    GenerationError::Invariant("google", "service unavailable".to_string())
}

async fn briefed_session(models: &MockModels) -> ArticleSession {
    models.text.enqueue_generate(text_response(BRIEF_JSON));
    let mut session = ArticleSession::new();
    session
        .submit_topic(&models.client(), "seo myths")
        .await
        .expect("brief succeeds");
    session
}

#[tokio::test]
async fn submit_topic_moves_to_briefing_with_brief_fields() {
    let models = MockModels::new();
    let session = briefed_session(&models).await;

    assert_eq!(session.stage(), ArticleStage::Briefing);
    assert_eq!(session.topic(), "seo myths");
    assert_eq!(session.title, "10 SEO Myths Busted");
    assert_eq!(session.keywords(), ["seo", "myths", "ranking"]);
    assert_eq!(session.outline, "## Intro\n## Myth 1");
    assert_eq!(session.error(), None);

    let inputs = models.text.tracked_generate_inputs();
    assert_eq!(inputs.len(), 1);
    assert!(inputs[0].response_format.is_some());
    assert!(prompt_of(&inputs[0]).contains("seo myths"));
}

#[tokio::test]
async fn malformed_brief_returns_to_initial_with_distinct_error() {
    let models = MockModels::new();
    models.text.enqueue_generate(text_response("Sure! Here is your brief:"));

    let mut session = ArticleSession::new();
    let result = session.submit_topic(&models.client(), "seo myths").await;

    assert!(matches!(result, Err(StudioError::InvalidBrief(_))));
    assert_eq!(session.stage(), ArticleStage::Initial);
    assert_eq!(
        session.error(),
        Some("Failed to generate a valid blog brief. The AI response was not valid JSON.")
    );
}

#[tokio::test]
async fn transport_failure_on_topic_keeps_initial() {
    let models = MockModels::new();
    models.text.enqueue_generate(service_error());

    let mut session = ArticleSession::new();
    let result = session.submit_topic(&models.client(), "seo myths").await;

    assert!(matches!(result, Err(StudioError::Generation(_))));
    assert_eq!(session.stage(), ArticleStage::Initial);
    assert_eq!(
        session.error(),
        Some("Could not generate brief. Please try again.")
    );
}

#[tokio::test]
async fn failed_outline_regeneration_keeps_edits_and_stage() {
    let models = MockModels::new();
    let mut session = briefed_session(&models).await;
    session.title = "My edited title".to_string();
    session.add_keyword("technical seo");

    models.text.enqueue_generate(service_error());
    let result = session.regenerate_outline(&models.client()).await;

    assert!(result.is_err());
    assert_eq!(session.stage(), ArticleStage::Briefing);
    assert_eq!(session.title, "My edited title");
    assert_eq!(
        session.keywords(),
        ["seo", "myths", "ranking", "technical seo"]
    );
    assert_eq!(session.outline, "## Intro\n## Myth 1");
    assert_eq!(
        session.error(),
        Some("Could not regenerate outline. Please try again.")
    );
}

#[tokio::test]
async fn outline_regeneration_replaces_only_the_outline() {
    let models = MockModels::new();
    let mut session = briefed_session(&models).await;
    session.title = "My edited title".to_string();

    models.text.enqueue_generate(text_response(
        r###"{"title":"Another title","keywords":["other"],"outline":"## Fresh outline"}"###,
    ));
    let outline = session
        .regenerate_outline(&models.client())
        .await
        .expect("outline regenerates")
        .to_string();

    assert_eq!(outline, "## Fresh outline");
    assert_eq!(session.outline, "## Fresh outline");
    assert_eq!(session.title, "My edited title");
    assert_eq!(session.keywords(), ["seo", "myths", "ranking"]);
    assert_eq!(session.stage(), ArticleStage::Briefing);
}

#[tokio::test]
async fn submit_brief_replaces_repeated_placeholders_in_order() {
    let models = MockModels::new();
    let mut session = briefed_session(&models).await;

    let draft = "# Title\n[sunset]\nBody with [not a placeholder] inline.\n[sunset]\nEnd";
    models.text.enqueue_generate(text_response(draft));
    models.image.enqueue_image("AAAA").enqueue_image("BBBB");

    let mut progress = Vec::new();
    let mut drafts = Vec::new();
    let article = session
        .submit_brief(&models.client(), |update| match update {
            ArticleUpdate::Progress(message) => progress.push(message.to_string()),
            ArticleUpdate::Draft(text) => drafts.push(text.to_string()),
        })
        .await
        .expect("article succeeds")
        .to_string();

    assert_eq!(session.stage(), ArticleStage::Done);
    assert_eq!(
        progress,
        vec![
            "Writing your draft...",
            "Scanning for image opportunities...",
            "Generating image 1 of 2: \"sunset\"",
            "Generating image 2 of 2: \"sunset\"",
        ]
    );

    // The first occurrence is replaced before the second image is requested.
    assert_eq!(drafts.len(), 3);
    assert_eq!(drafts[0], draft);
    assert!(drafts[1].contains("![sunset](data:image/png;base64,AAAA)"));
    assert_eq!(extract_placeholders(&drafts[1]).len(), 1);
    let first_image = drafts[1].find("AAAA").unwrap();
    let pending = drafts[1].find("\n[sunset]\nEnd").unwrap();
    assert!(first_image < pending);

    assert!(extract_placeholders(&article).is_empty());
    assert!(article.contains("\n\n![sunset](data:image/png;base64,AAAA)\n\n"));
    assert!(article.contains("\n\n![sunset](data:image/png;base64,BBBB)\n\n"));
    assert!(article.contains("[not a placeholder]"));
    assert!(article.find("AAAA").unwrap() < article.find("BBBB").unwrap());
    assert_eq!(
        session.generated_image_urls(),
        [
            "data:image/png;base64,AAAA".to_string(),
            "data:image/png;base64,BBBB".to_string()
        ]
    );
    assert_eq!(session.progress(), None);

    let image_inputs = models.image.tracked_inputs();
    assert_eq!(image_inputs.len(), 2);
    assert!(image_inputs
        .iter()
        .all(|input| input.prompt == "sunset" && input.aspect_ratio == AspectRatio::Landscape));
}

#[tokio::test]
async fn submit_brief_prompt_carries_the_edited_brief() {
    let models = MockModels::new();
    let mut session = briefed_session(&models).await;
    session.title = "Edited Title".to_string();
    session.tone = "Witty".to_string();

    models.text.enqueue_generate(text_response("No images here."));
    session
        .submit_brief(&models.client(), |_| {})
        .await
        .expect("article succeeds");

    let inputs = models.text.tracked_generate_inputs();
    let prompt = prompt_of(&inputs[1]);
    assert!(prompt.contains("Edited Title"));
    assert!(prompt.contains("seo, myths, ranking"));
    assert!(prompt.contains("Witty"));
    assert!(prompt.contains("## Myth 1"));
    assert!(prompt.contains("between **1350 and 1650 words**"));
    assert!(models.image.tracked_inputs().is_empty());
}

#[tokio::test]
async fn failed_article_returns_to_briefing_with_brief_intact() {
    let models = MockModels::new();
    let mut session = briefed_session(&models).await;
    session.title = "Keep me".to_string();

    models.text.enqueue_generate(text_response("Intro\n[IMAGE: a chart]\n"));
    models.image.enqueue_error(service_error());

    let result = session.submit_brief(&models.client(), |_| {}).await;

    assert!(result.is_err());
    assert_eq!(session.stage(), ArticleStage::Briefing);
    assert_eq!(session.title, "Keep me");
    assert_eq!(
        session.error(),
        Some("Could not generate the article. Please try again.")
    );
    assert!(!session.is_loading());
}

#[tokio::test]
async fn done_is_terminal_for_the_session() {
    let models = MockModels::new();
    let mut session = briefed_session(&models).await;
    models.text.enqueue_generate(text_response("Body"));
    session
        .submit_brief(&models.client(), |_| {})
        .await
        .expect("article succeeds");

    assert!(matches!(
        session.submit_topic(&models.client(), "again").await,
        Err(StudioError::InvalidState(_))
    ));
    assert!(matches!(
        session.regenerate_outline(&models.client()).await,
        Err(StudioError::InvalidState(_))
    ));
    assert_eq!(session.stage(), ArticleStage::Done);
}

#[tokio::test]
async fn cancel_brief_returns_to_initial() {
    let models = MockModels::new();
    let mut session = briefed_session(&models).await;
    session.cancel_brief().expect("cancel from briefing");
    assert_eq!(session.stage(), ArticleStage::Initial);
}

#[tokio::test]
async fn feature_image_leads_the_markdown_export() {
    let models = MockModels::new();
    let mut session = briefed_session(&models).await;
    models.text.enqueue_generate(text_response("Body text"));
    session
        .submit_brief(&models.client(), |_| {})
        .await
        .expect("article succeeds");

    models.image.enqueue_image("AAAA");
    session
        .generate_feature_image(&models.client(), "", Some("Photorealistic"))
        .await
        .expect("feature image succeeds");

    let inputs = models.image.tracked_inputs();
    assert_eq!(inputs[0].prompt, "10 SEO Myths Busted, Photorealistic style");
    assert_eq!(
        session.markdown(),
        "# 10 SEO Myths Busted\n\n![Generated feature image](data:image/png;base64,AAAA)\n\nBody text"
    );
}
