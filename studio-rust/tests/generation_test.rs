mod common;

use common::{prompt_of, text_response, MockModels};
use futures::TryStreamExt;
use marketgenius_sdk::{
    audio_utils, testing::MockStreamResult, AspectRatio, AudioFormat, AudioPart, GenerationError,
    ImageGenerationResponse, Modality, ModelResponse, Part, PartDelta, PartialModelResponse,
    ResponseFormatOption, TextPartDelta,
};
use marketgenius_studio::{
    generation::MARKETING_TIP_FALLBACK, tip_of_the_day, GenerationClient, StudioError, Voice,
};

#[tokio::test]
async fn brief_requests_structured_output() {
    let models = MockModels::new();
    models.text.enqueue_generate(text_response(
        r###"{"title":"Email Wins","keywords":["email","open rate"],"outline":"## Subject lines"}"###,
    ));

    let brief = models.client().generate_brief("email marketing").await.unwrap();

    assert_eq!(brief.title, "Email Wins");
    assert_eq!(brief.keywords, vec!["email", "open rate"]);

    let inputs = models.text.tracked_generate_inputs();
    let Some(ResponseFormatOption::Json(format)) = &inputs[0].response_format else {
        panic!("expected a JSON response format");
    };
    let schema = format.schema.as_ref().unwrap();
    assert_eq!(
        schema["required"],
        serde_json::json!(["title", "keywords", "outline"])
    );
    assert!(prompt_of(&inputs[0]).contains("email marketing"));
}

#[tokio::test]
async fn malformed_brief_is_not_a_transport_error() {
    let models = MockModels::new();
    models
        .text
        .enqueue_generate(text_response(r#"{"title":"Missing fields"}"#))
        .enqueue_generate(GenerationError::Invariant("google", "timeout".to_string()));
    let client = models.client();

    assert!(matches!(
        client.generate_brief("seo").await,
        Err(StudioError::InvalidBrief(_))
    ));
    assert!(matches!(
        client.generate_brief("seo").await,
        Err(StudioError::Generation(_))
    ));
}

#[tokio::test]
async fn outline_regeneration_keeps_only_the_outline() {
    let models = MockModels::new();
    models.text.enqueue_generate(text_response(
        r###"{"title":"Ignored","keywords":[],"outline":"## New outline"}"###,
    ));

    let outline = models.client().generate_outline("seo").await.unwrap();
    assert_eq!(outline, "## New outline");
}

#[tokio::test]
async fn image_generation_requests_one_png() {
    let models = MockModels::new();
    models.image.enqueue_image("iVBORw0K");

    let image = models
        .client()
        .generate_image("a rocket launch", AspectRatio::Portrait)
        .await
        .unwrap();

    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.data_url(), "data:image/png;base64,iVBORw0K");

    let inputs = models.image.tracked_inputs();
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0].prompt, "a rocket launch");
    assert_eq!(inputs[0].number_of_images, 1);
    assert_eq!(inputs[0].aspect_ratio, AspectRatio::Portrait);
    assert_eq!(inputs[0].output_mime_type, "image/png");
}

#[tokio::test]
async fn empty_image_response_is_no_content() {
    let models = MockModels::new();
    models
        .image
        .enqueue_result(Ok(ImageGenerationResponse { images: vec![] }));

    let error = models
        .client()
        .generate_image("anything", AspectRatio::Square)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        StudioError::Generation(GenerationError::NoContent(ref message))
            if message == "No image was generated."
    ));
}

#[tokio::test]
async fn edit_sends_image_before_instruction() {
    let models = MockModels::new();
    models.image_edit.enqueue_generate(ModelResponse {
        content: vec![
            Part::text("Here you go."),
            Part::image("AAAA", "image/jpeg"),
        ],
        ..Default::default()
    });

    let edited = models
        .client()
        .edit_image("add a retro filter", &[0, 0, 0], "image/png")
        .await
        .unwrap();

    assert_eq!(edited.mime_type, "image/jpeg");
    assert_eq!(edited.data, vec![0, 0, 0]);

    let inputs = models.image_edit.tracked_generate_inputs();
    assert_eq!(inputs[0].modalities, Some(vec![Modality::Image]));
    let parts = inputs[0].messages[0].content();
    assert!(matches!(
        parts,
        [Part::Image(image), Part::Text(text)]
            if image.image_data == "AAAA"
                && image.mime_type == "image/png"
                && text.text == "add a retro filter"
    ));
}

#[tokio::test]
async fn edit_without_image_is_no_content() {
    let models = MockModels::new();
    models
        .image_edit
        .enqueue_generate(text_response("I cannot edit that."));

    let error = models
        .client()
        .edit_image("remove background", &[1, 2, 3], "image/png")
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        StudioError::Generation(GenerationError::NoContent(ref message))
            if message == "No edited image was returned from the API."
    ));
}

#[tokio::test]
async fn speech_decodes_pcm_and_passes_the_voice() {
    let models = MockModels::new();
    let samples = [0_i16, 1200, -1200, i16::MAX];
    models.speech.enqueue_generate(ModelResponse {
        content: vec![Part::Audio(
            AudioPart::new(audio_utils::i16sample_to_base64(&samples), AudioFormat::Linear16)
                .with_sample_rate(24_000),
        )],
        ..Default::default()
    });

    let audio = models
        .client()
        .generate_speech("Welcome to our launch!", Voice::Puck)
        .await
        .unwrap();

    assert_eq!(audio.samples, samples);
    assert_eq!(audio.sample_rate, 24_000);
    assert_eq!(audio.channels, 1);

    let inputs = models.speech.tracked_generate_inputs();
    assert_eq!(inputs[0].modalities, Some(vec![Modality::Audio]));
    assert_eq!(
        inputs[0].audio.as_ref().and_then(|a| a.voice.as_deref()),
        Some("Puck")
    );
    assert_eq!(prompt_of(&inputs[0]), "Welcome to our launch!");
}

#[tokio::test]
async fn speech_without_audio_is_no_content() {
    let models = MockModels::new();
    models.speech.enqueue_generate(text_response("no audio"));

    let error = models
        .client()
        .generate_speech("hello", Voice::Kore)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        StudioError::Generation(GenerationError::NoContent(ref message))
            if message == "No audio data returned from API."
    ));
}

#[tokio::test]
async fn tip_falls_back_on_failure() {
    let models = MockModels::new();
    models
        .fast_text
        .enqueue_generate(text_response("Post when your audience is online."))
        .enqueue_generate(GenerationError::Invariant("google", "down".to_string()));
    let client = models.client();

    assert_eq!(
        tip_of_the_day(&client).await,
        "Post when your audience is online."
    );
    assert_eq!(tip_of_the_day(&client).await, MARKETING_TIP_FALLBACK);
}

#[tokio::test]
async fn stream_text_yields_text_deltas_only() {
    let models = MockModels::new();
    models.text.enqueue_stream(MockStreamResult::partials(vec![
        PartialModelResponse {
            delta: Some(PartDelta::Text(TextPartDelta {
                text: "Hello, ".to_string(),
            })),
            usage: None,
        },
        PartialModelResponse::default(),
        PartialModelResponse {
            delta: Some(PartDelta::Text(TextPartDelta {
                text: "world".to_string(),
            })),
            usage: None,
        },
    ]));

    let stream = models.client().stream_text("greet").await.unwrap();
    let deltas: Vec<String> = stream.try_collect().await.unwrap();

    assert_eq!(deltas, vec!["Hello, ", "world"]);
}
