//! Content types and the typed requests built from form input.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{prompts, StudioError, StudioResult};

/// Target length used when a brief carries no usable word count.
pub const DEFAULT_WORD_COUNT: u32 = 1500;

/// Declares a fieldless enum whose variants map one-to-one onto display
/// labels, with `ALL`, `label()`, `Display` and `FromStr` from the label.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $label:literal,)+ }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = StudioError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.label() == s)
                    .ok_or_else(|| {
                        StudioError::InvalidState(format!(
                            "unknown {}: {s}",
                            stringify!($name)
                        ))
                    })
            }
        }
    };
}

labelled_enum! {
    /// Every template the studio knows how to prompt for.
    pub enum ContentType {
        BlogPost => "Complete Blog Post",
        SeoBrief => "SEO Content Brief",
        TweetThread => "Tweet Thread",
        LinkedinPost => "LinkedIn Post",
        MarketingStrategy => "Marketing Strategy",
        CampaignReport => "Campaign Performance Report",
        BlogBriefAndOutline => "Blog Brief and Outline",
        BlogPostFromBrief => "Blog Post from Brief",
        SpeechGeneration => "Speech Generation (TTS)",
        ImageEditing => "AI Image Editing",
        SocialPostWithNotes => "Social Media Post with Notes",
        SocialPostWithLink => "Social Media Post with Link",
        SocialPostWithTheme => "Social Media Post with a Theme",
        SocialHolidayPost => "Social Media Post for Holiday",
        XThreadFromBlog => "X (Twitter) Thread from Blog/Webpage",
        XThreadFromTheme => "X (Twitter) Thread from a Theme",
        SocialMediaPoll => "Social Media Poll",
        SocialMediaPageIntroduction => "Social Media Page Introduction",
        SocialPostWithQuote => "Social Media Post with Quote",
        Memes => "Memes",
        RepurposeContent => "Repurpose Content",
        SummarizeText => "Summarize Text",
        SummaryFromNotes => "Summary from Notes",
        AidaCopy => "AIDA Copy",
        BabCopy => "BAB Copy",
        PasCopy => "PAS Copy",
        ProductDescription => "Product Description",
        PropertyDescription => "Property Description",
        VideoDescription => "Video Description",
        WebpageCopy => "Webpage or Landing Page Copy",
        EventPromotionPage => "Event Promotion Page Copy",
        LocalBusinessDescription => "Local Business Description",
        EventDescription => "Event Description",
        JobDescription => "Job Description",
        ColdOutreachEmail => "Cold Outreach Email",
        PromotionEmail => "Promotion or Offer Email",
        SalesEmailSequence => "Sales Email Sequence",
        EmailSubjectLine => "Email Subject Line",
        EmailFromOutline => "Email from Outline",
        Newsletter => "Newsletter",
        EventPromotionEmail => "Event Promotion Email",
        VideoScript => "Video Script",
        GoogleAdCopy => "Google Ad Copy",
        InstagramFacebookAdCopy => "Instagram or Facebook Ad Copy",
        LinkedinAdCopy => "LinkedIn Ad Copy",
        ShortAdCopy => "Short Ad Copy",
        ClassifiedsAd => "Classifieds Ad",
        TranslateText => "Translate Text",
        PressRelease => "Press Release",
        CustomerCaseStudy => "Customer Case Study",
        Headlines => "Headlines",
        Ctas => "CTAs (Call to Actions)",
        CopyInBullets => "Copy in Bullets",
        Brochure => "Brochure",
        ProductBusinessNames => "Product or Business Names",
        WebpageOutline => "Website or Landing Page Outline",
        RealEstateBrochure => "Real Estate Property Brochure",
        Poem => "Poem",
        AiTopicGenerator => "AI Topic Generator",
        LongBlogFromUrlDoc => "Long Blog from URL/Doc",
        ShortBlogArticle => "Short Blog Article",
        BlogPostOutline => "Blog Post Outline",
        BlogPostIntroduction => "Blog Post Introduction",
        ContentImprover => "Content Improver",
        ParaphraseRewrite => "Paraphrase or Rewrite",
        BlogSectionalContent => "Blog Sectional Content",
        BlogArticleFromOutline => "Blog Article from Outline",
        FaqGenerator => "FAQ Generator",
        QaGenerator => "Q&A Generator",
        BlogPostConclusion => "Blog Post Conclusion",
        ParagraphsToBullets => "Paragraphs to Bullets",
        SentenceExpander => "Sentence Expander",
        SeoMetaDescription => "SEO Meta Description",
        CorrectSpellingGrammar => "Correct Spelling & Grammar",
        SimplifyText => "Simplify Text",
        SearchKeywords => "Search Keywords",
    }
}

labelled_enum! {
    pub enum ToneOfVoice {
        Professional => "Professional",
        Casual => "Casual",
        Friendly => "Friendly",
        Witty => "Witty",
        Formal => "Formal",
        Informative => "Informative",
        Appreciative => "Appreciative",
        Assertive => "Assertive",
        Awestruck => "Awestruck",
        Bold => "Bold",
        Candid => "Candid",
        Compassionate => "Compassionate",
        Confident => "Confident",
        Convincing => "Convincing",
        Critical => "Critical",
        Earnest => "Earnest",
        Enthusiastic => "Enthusiastic",
        Humorous => "Humorous",
        Inspirational => "Inspirational",
        Joyful => "Joyful",
        Passionate => "Passionate",
        Thoughtful => "Thoughtful",
        Urgent => "Urgent",
    }
}

labelled_enum! {
    pub enum CampaignGoal {
        BrandAwareness => "Brand Awareness",
        LeadGeneration => "Lead Generation",
        SalesConversion => "Sales Conversion",
        CustomerEngagement => "Customer Engagement",
    }
}

/// Raw values of the four generic form slots, as a front end collects them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotValues {
    pub topic: String,
    pub audience: String,
    pub tone: String,
    pub goal: String,
}

impl SlotValues {
    pub fn new(
        topic: impl Into<String>,
        audience: impl Into<String>,
        tone: impl Into<String>,
        goal: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            audience: audience.into(),
            tone: tone.into(),
            goal: goal.into(),
        }
    }
}

/// The outline and target length a brief-driven article is written against.
///
/// On the wire (the `goal` slot of a `Blog Post from Brief` request) this is
/// the JSON object `{"outline": "...", "wordCount": "1500"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefPayload {
    pub outline: String,
    #[serde(rename = "wordCount", default)]
    pub word_count: Value,
}

impl BriefPayload {
    pub fn new(outline: impl Into<String>, word_count: impl Into<String>) -> Self {
        Self {
            outline: outline.into(),
            word_count: Value::String(word_count.into()),
        }
    }

    pub fn parse(raw: &str) -> StudioResult<Self> {
        serde_json::from_str(raw).map_err(|e| StudioError::InvalidBriefPayload(e.to_string()))
    }

    pub fn encode(&self) -> StudioResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The requested word count, or [`DEFAULT_WORD_COUNT`] when it is
    /// missing, zero or not a number.
    #[must_use]
    pub fn target_word_count(&self) -> u32 {
        parse_word_count(&self.word_count)
    }
}

/// Reads a word count the way a form submits it: a number, or a string whose
/// leading digits are the number.
pub(crate) fn parse_word_count(value: &Value) -> u32 {
    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => {
            let digits: String = s
                .trim_start()
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse::<u32>().ok()
        }
        _ => None,
    };
    parsed.filter(|n| *n > 0).unwrap_or(DEFAULT_WORD_COUNT)
}

/// A fully-typed content request. Each variant names its own inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentRequest {
    BlogPost { topic: String, audience: String, tone: String, goal: String },
    SeoBrief { topic: String, audience: String, tone: String, goal: String },
    TweetThread { topic: String, audience: String, tone: String, goal: String },
    LinkedinPost { topic: String, audience: String, tone: String, goal: String },
    MarketingStrategy { product: String, audience: String, duration: String, goal: String },
    CampaignReport { campaign_name: String, metrics: String, analysis_focus: String, objective: String },
    BlogBriefAndOutline { topic: String },
    BlogPostFromBrief { title: String, keywords: String, tone: String, outline: String, word_count: u32 },
    SpeechGeneration { text: String },
    ImageEditing { instruction: String },
    SocialPostWithNotes { notes: String, tone: String, platform: String },
    SocialPostWithLink { url: String, commentary: String, tone: String, platform: String },
    SocialPostWithTheme { theme: String, tone: String, platform: String },
    SocialHolidayPost { holiday: String, key_message: String, tone: String, platform: String },
    XThreadFromBlog { content: String },
    XThreadFromTheme { theme: String, tone: String },
    SocialMediaPoll { question: String, platform: String },
    SocialMediaPageIntroduction { name: String, notes: String, platform: String },
    SocialPostWithQuote { author: String, quote: String, commentary: String, platform: String },
    Memes { topic: String, audience: String },
    RepurposeContent { content: String, target_format: String, tone: String },
    SummarizeText { text: String, format: String },
    SummaryFromNotes { notes: String, format: String },
    AidaCopy { product: String, audience: String },
    BabCopy { product: String, audience: String },
    PasCopy { product: String, audience: String },
    ProductDescription { product_name: String, features: String, tone: String },
    PropertyDescription { property: String, features: String, tone: String },
    VideoDescription { title: String, keywords: String, tone: String },
    WebpageCopy { page_goal: String, key_points: String, tone: String },
    EventPromotionPage { event: String, audience: String, details: String, goal: String },
    LocalBusinessDescription { business_name: String, services: String, key_info: String },
    EventDescription { event_name: String, details: String, tone: String },
    JobDescription { job_title: String, responsibilities: String, company: String },
    ColdOutreachEmail { offering: String, recipient: String, email_goal: String },
    PromotionEmail { promotion: String, audience: String, tone: String },
    SalesEmailSequence { product: String, prospect: String, email_count: String, goal: String },
    EmailSubjectLine { topic: String, audience: String },
    EmailFromOutline { outline: String, audience: String, tone: String },
    Newsletter { topics: String, audience: String, tone: String },
    EventPromotionEmail { event: String, audience: String, tone: String },
    VideoScript { topic: String, tone: String, duration_minutes: String, hosts: String },
    GoogleAdCopy { product: String, keywords: String },
    InstagramFacebookAdCopy { product: String, audience: String, tone: String },
    LinkedinAdCopy { product: String, audience: String, tone: String },
    ShortAdCopy { product: String, key_benefit: String },
    ClassifiedsAd { item: String, details: String },
    TranslateText { text: String, language: String },
    PressRelease { announcement: String, company: String },
    CustomerCaseStudy { customer: String, product: String, notes: String },
    Headlines { topic: String, audience: String },
    Ctas { context: String },
    CopyInBullets { notes: String },
    Brochure { business: String, key_info: String, tone: String },
    ProductBusinessNames { concept: String, keywords: String },
    WebpageOutline { page_goal: String, key_info: String },
    RealEstateBrochure { property: String, features: String, tone: String },
    Poem { theme: String, style: String },
    AiTopicGenerator { theme: String },
    LongBlogFromUrlDoc { reference: String, tone: String, word_count: String },
    ShortBlogArticle { topic: String, tone: String },
    BlogPostOutline { title: String },
    BlogPostIntroduction { title: String, audience: String, tone: String },
    ContentImprover { text: String, tone: String },
    ParaphraseRewrite { text: String },
    BlogSectionalContent { subheading: String, context: String, tone: String },
    BlogArticleFromOutline { outline: String, topic: String, tone: String },
    FaqGenerator { topic: String },
    QaGenerator { question: String },
    BlogPostConclusion { title: String, audience: String, tone: String },
    ParagraphsToBullets { text: String },
    SentenceExpander { sentence: String, tone: String },
    SeoMetaDescription { page_title: String, keywords: String },
    CorrectSpellingGrammar { text: String },
    SimplifyText { text: String },
    SearchKeywords { theme: String, industry: String, audience: String },
}

impl ContentRequest {
    /// Maps the four positional form slots onto the named inputs of
    /// `content_type`. This is the only place that knows which slot carries
    /// what for each template.
    pub fn from_slots(content_type: ContentType, slots: &SlotValues) -> StudioResult<Self> {
        let SlotValues {
            topic,
            audience,
            tone,
            goal,
        } = slots.clone();

        let request = match content_type {
            ContentType::BlogPost => Self::BlogPost { topic, audience, tone, goal },
            ContentType::SeoBrief => Self::SeoBrief { topic, audience, tone, goal },
            ContentType::TweetThread => Self::TweetThread { topic, audience, tone, goal },
            ContentType::LinkedinPost => Self::LinkedinPost { topic, audience, tone, goal },
            ContentType::MarketingStrategy => Self::MarketingStrategy {
                product: topic,
                audience,
                duration: tone,
                goal,
            },
            ContentType::CampaignReport => Self::CampaignReport {
                campaign_name: topic,
                metrics: audience,
                analysis_focus: tone,
                objective: goal,
            },
            ContentType::BlogBriefAndOutline => Self::BlogBriefAndOutline { topic },
            ContentType::BlogPostFromBrief => {
                let payload = BriefPayload::parse(&goal)?;
                Self::BlogPostFromBrief {
                    title: topic,
                    keywords: audience,
                    tone,
                    word_count: payload.target_word_count(),
                    outline: payload.outline,
                }
            }
            ContentType::SpeechGeneration => Self::SpeechGeneration { text: topic },
            ContentType::ImageEditing => Self::ImageEditing { instruction: topic },
            ContentType::SocialPostWithNotes => Self::SocialPostWithNotes {
                notes: topic,
                tone,
                platform: goal,
            },
            ContentType::SocialPostWithLink => Self::SocialPostWithLink {
                url: topic,
                commentary: audience,
                tone,
                platform: goal,
            },
            ContentType::SocialPostWithTheme => Self::SocialPostWithTheme {
                theme: topic,
                tone,
                platform: goal,
            },
            ContentType::SocialHolidayPost => Self::SocialHolidayPost {
                holiday: topic,
                key_message: audience,
                tone,
                platform: goal,
            },
            ContentType::XThreadFromBlog => Self::XThreadFromBlog { content: topic },
            ContentType::XThreadFromTheme => Self::XThreadFromTheme { theme: topic, tone },
            ContentType::SocialMediaPoll => Self::SocialMediaPoll {
                question: topic,
                platform: audience,
            },
            ContentType::SocialMediaPageIntroduction => Self::SocialMediaPageIntroduction {
                name: topic,
                notes: audience,
                platform: tone,
            },
            ContentType::SocialPostWithQuote => Self::SocialPostWithQuote {
                author: topic,
                quote: audience,
                commentary: tone,
                platform: goal,
            },
            ContentType::Memes => Self::Memes { topic, audience },
            ContentType::RepurposeContent => Self::RepurposeContent {
                content: topic,
                target_format: audience,
                tone,
            },
            ContentType::SummarizeText => Self::SummarizeText {
                text: topic,
                format: audience,
            },
            ContentType::SummaryFromNotes => Self::SummaryFromNotes {
                notes: topic,
                format: audience,
            },
            ContentType::AidaCopy => Self::AidaCopy { product: topic, audience },
            ContentType::BabCopy => Self::BabCopy { product: topic, audience },
            ContentType::PasCopy => Self::PasCopy { product: topic, audience },
            ContentType::ProductDescription => Self::ProductDescription {
                product_name: topic,
                features: audience,
                tone,
            },
            ContentType::PropertyDescription => Self::PropertyDescription {
                property: topic,
                features: audience,
                tone,
            },
            ContentType::VideoDescription => Self::VideoDescription {
                title: topic,
                keywords: audience,
                tone,
            },
            ContentType::WebpageCopy => Self::WebpageCopy {
                page_goal: topic,
                key_points: audience,
                tone,
            },
            ContentType::EventPromotionPage => Self::EventPromotionPage {
                event: topic,
                audience,
                details: tone,
                goal,
            },
            ContentType::LocalBusinessDescription => Self::LocalBusinessDescription {
                business_name: topic,
                services: audience,
                key_info: tone,
            },
            ContentType::EventDescription => Self::EventDescription {
                event_name: topic,
                details: audience,
                tone,
            },
            ContentType::JobDescription => Self::JobDescription {
                job_title: topic,
                responsibilities: audience,
                company: tone,
            },
            ContentType::ColdOutreachEmail => Self::ColdOutreachEmail {
                offering: topic,
                recipient: audience,
                email_goal: tone,
            },
            ContentType::PromotionEmail => Self::PromotionEmail {
                promotion: topic,
                audience,
                tone,
            },
            ContentType::SalesEmailSequence => Self::SalesEmailSequence {
                product: topic,
                prospect: audience,
                email_count: tone,
                goal,
            },
            ContentType::EmailSubjectLine => Self::EmailSubjectLine { topic, audience },
            ContentType::EmailFromOutline => Self::EmailFromOutline {
                outline: topic,
                audience,
                tone,
            },
            ContentType::Newsletter => Self::Newsletter {
                topics: topic,
                audience,
                tone,
            },
            ContentType::EventPromotionEmail => Self::EventPromotionEmail {
                event: topic,
                audience,
                tone,
            },
            ContentType::VideoScript => Self::VideoScript {
                topic,
                tone: audience,
                duration_minutes: tone,
                hosts: goal,
            },
            ContentType::GoogleAdCopy => Self::GoogleAdCopy {
                product: topic,
                keywords: audience,
            },
            ContentType::InstagramFacebookAdCopy => Self::InstagramFacebookAdCopy {
                product: topic,
                audience,
                tone,
            },
            ContentType::LinkedinAdCopy => Self::LinkedinAdCopy {
                product: topic,
                audience,
                tone,
            },
            ContentType::ShortAdCopy => Self::ShortAdCopy {
                product: topic,
                key_benefit: audience,
            },
            ContentType::ClassifiedsAd => Self::ClassifiedsAd {
                item: topic,
                details: audience,
            },
            ContentType::TranslateText => Self::TranslateText {
                text: topic,
                language: audience,
            },
            ContentType::PressRelease => Self::PressRelease {
                announcement: topic,
                company: audience,
            },
            ContentType::CustomerCaseStudy => Self::CustomerCaseStudy {
                customer: topic,
                product: audience,
                notes: tone,
            },
            ContentType::Headlines => Self::Headlines { topic, audience },
            ContentType::Ctas => Self::Ctas { context: topic },
            ContentType::CopyInBullets => Self::CopyInBullets { notes: topic },
            ContentType::Brochure => Self::Brochure {
                business: topic,
                key_info: audience,
                tone,
            },
            ContentType::ProductBusinessNames => Self::ProductBusinessNames {
                concept: topic,
                keywords: audience,
            },
            ContentType::WebpageOutline => Self::WebpageOutline {
                page_goal: topic,
                key_info: audience,
            },
            ContentType::RealEstateBrochure => Self::RealEstateBrochure {
                property: topic,
                features: audience,
                tone,
            },
            ContentType::Poem => Self::Poem {
                theme: topic,
                style: audience,
            },
            ContentType::AiTopicGenerator => Self::AiTopicGenerator { theme: topic },
            ContentType::LongBlogFromUrlDoc => Self::LongBlogFromUrlDoc {
                reference: topic,
                tone: audience,
                word_count: tone,
            },
            ContentType::ShortBlogArticle => Self::ShortBlogArticle {
                topic,
                tone: audience,
            },
            ContentType::BlogPostOutline => Self::BlogPostOutline { title: topic },
            ContentType::BlogPostIntroduction => Self::BlogPostIntroduction {
                title: topic,
                audience,
                tone,
            },
            ContentType::ContentImprover => Self::ContentImprover {
                text: topic,
                tone: audience,
            },
            ContentType::ParaphraseRewrite => Self::ParaphraseRewrite { text: topic },
            ContentType::BlogSectionalContent => Self::BlogSectionalContent {
                subheading: topic,
                context: audience,
                tone,
            },
            ContentType::BlogArticleFromOutline => Self::BlogArticleFromOutline {
                outline: topic,
                topic: audience,
                tone,
            },
            ContentType::FaqGenerator => Self::FaqGenerator { topic },
            ContentType::QaGenerator => Self::QaGenerator { question: topic },
            ContentType::BlogPostConclusion => Self::BlogPostConclusion {
                title: topic,
                audience,
                tone,
            },
            ContentType::ParagraphsToBullets => Self::ParagraphsToBullets { text: topic },
            ContentType::SentenceExpander => Self::SentenceExpander {
                sentence: topic,
                tone: audience,
            },
            ContentType::SeoMetaDescription => Self::SeoMetaDescription {
                page_title: topic,
                keywords: audience,
            },
            ContentType::CorrectSpellingGrammar => Self::CorrectSpellingGrammar { text: topic },
            ContentType::SimplifyText => Self::SimplifyText { text: topic },
            ContentType::SearchKeywords => Self::SearchKeywords {
                theme: topic,
                industry: audience,
                audience: tone,
            },
        };

        Ok(request)
    }

    #[must_use]
    pub fn content_type(&self) -> ContentType {
        match self {
            Self::BlogPost { .. } => ContentType::BlogPost,
            Self::SeoBrief { .. } => ContentType::SeoBrief,
            Self::TweetThread { .. } => ContentType::TweetThread,
            Self::LinkedinPost { .. } => ContentType::LinkedinPost,
            Self::MarketingStrategy { .. } => ContentType::MarketingStrategy,
            Self::CampaignReport { .. } => ContentType::CampaignReport,
            Self::BlogBriefAndOutline { .. } => ContentType::BlogBriefAndOutline,
            Self::BlogPostFromBrief { .. } => ContentType::BlogPostFromBrief,
            Self::SpeechGeneration { .. } => ContentType::SpeechGeneration,
            Self::ImageEditing { .. } => ContentType::ImageEditing,
            Self::SocialPostWithNotes { .. } => ContentType::SocialPostWithNotes,
            Self::SocialPostWithLink { .. } => ContentType::SocialPostWithLink,
            Self::SocialPostWithTheme { .. } => ContentType::SocialPostWithTheme,
            Self::SocialHolidayPost { .. } => ContentType::SocialHolidayPost,
            Self::XThreadFromBlog { .. } => ContentType::XThreadFromBlog,
            Self::XThreadFromTheme { .. } => ContentType::XThreadFromTheme,
            Self::SocialMediaPoll { .. } => ContentType::SocialMediaPoll,
            Self::SocialMediaPageIntroduction { .. } => ContentType::SocialMediaPageIntroduction,
            Self::SocialPostWithQuote { .. } => ContentType::SocialPostWithQuote,
            Self::Memes { .. } => ContentType::Memes,
            Self::RepurposeContent { .. } => ContentType::RepurposeContent,
            Self::SummarizeText { .. } => ContentType::SummarizeText,
            Self::SummaryFromNotes { .. } => ContentType::SummaryFromNotes,
            Self::AidaCopy { .. } => ContentType::AidaCopy,
            Self::BabCopy { .. } => ContentType::BabCopy,
            Self::PasCopy { .. } => ContentType::PasCopy,
            Self::ProductDescription { .. } => ContentType::ProductDescription,
            Self::PropertyDescription { .. } => ContentType::PropertyDescription,
            Self::VideoDescription { .. } => ContentType::VideoDescription,
            Self::WebpageCopy { .. } => ContentType::WebpageCopy,
            Self::EventPromotionPage { .. } => ContentType::EventPromotionPage,
            Self::LocalBusinessDescription { .. } => ContentType::LocalBusinessDescription,
            Self::EventDescription { .. } => ContentType::EventDescription,
            Self::JobDescription { .. } => ContentType::JobDescription,
            Self::ColdOutreachEmail { .. } => ContentType::ColdOutreachEmail,
            Self::PromotionEmail { .. } => ContentType::PromotionEmail,
            Self::SalesEmailSequence { .. } => ContentType::SalesEmailSequence,
            Self::EmailSubjectLine { .. } => ContentType::EmailSubjectLine,
            Self::EmailFromOutline { .. } => ContentType::EmailFromOutline,
            Self::Newsletter { .. } => ContentType::Newsletter,
            Self::EventPromotionEmail { .. } => ContentType::EventPromotionEmail,
            Self::VideoScript { .. } => ContentType::VideoScript,
            Self::GoogleAdCopy { .. } => ContentType::GoogleAdCopy,
            Self::InstagramFacebookAdCopy { .. } => ContentType::InstagramFacebookAdCopy,
            Self::LinkedinAdCopy { .. } => ContentType::LinkedinAdCopy,
            Self::ShortAdCopy { .. } => ContentType::ShortAdCopy,
            Self::ClassifiedsAd { .. } => ContentType::ClassifiedsAd,
            Self::TranslateText { .. } => ContentType::TranslateText,
            Self::PressRelease { .. } => ContentType::PressRelease,
            Self::CustomerCaseStudy { .. } => ContentType::CustomerCaseStudy,
            Self::Headlines { .. } => ContentType::Headlines,
            Self::Ctas { .. } => ContentType::Ctas,
            Self::CopyInBullets { .. } => ContentType::CopyInBullets,
            Self::Brochure { .. } => ContentType::Brochure,
            Self::ProductBusinessNames { .. } => ContentType::ProductBusinessNames,
            Self::WebpageOutline { .. } => ContentType::WebpageOutline,
            Self::RealEstateBrochure { .. } => ContentType::RealEstateBrochure,
            Self::Poem { .. } => ContentType::Poem,
            Self::AiTopicGenerator { .. } => ContentType::AiTopicGenerator,
            Self::LongBlogFromUrlDoc { .. } => ContentType::LongBlogFromUrlDoc,
            Self::ShortBlogArticle { .. } => ContentType::ShortBlogArticle,
            Self::BlogPostOutline { .. } => ContentType::BlogPostOutline,
            Self::BlogPostIntroduction { .. } => ContentType::BlogPostIntroduction,
            Self::ContentImprover { .. } => ContentType::ContentImprover,
            Self::ParaphraseRewrite { .. } => ContentType::ParaphraseRewrite,
            Self::BlogSectionalContent { .. } => ContentType::BlogSectionalContent,
            Self::BlogArticleFromOutline { .. } => ContentType::BlogArticleFromOutline,
            Self::FaqGenerator { .. } => ContentType::FaqGenerator,
            Self::QaGenerator { .. } => ContentType::QaGenerator,
            Self::BlogPostConclusion { .. } => ContentType::BlogPostConclusion,
            Self::ParagraphsToBullets { .. } => ContentType::ParagraphsToBullets,
            Self::SentenceExpander { .. } => ContentType::SentenceExpander,
            Self::SeoMetaDescription { .. } => ContentType::SeoMetaDescription,
            Self::CorrectSpellingGrammar { .. } => ContentType::CorrectSpellingGrammar,
            Self::SimplifyText { .. } => ContentType::SimplifyText,
            Self::SearchKeywords { .. } => ContentType::SearchKeywords,
        }
    }

    /// Renders the instruction prompt for this request. Never empty.
    #[must_use]
    pub fn prompt(&self) -> String {
        prompts::render(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for content_type in ContentType::ALL {
            let parsed: ContentType = content_type.label().parse().unwrap();
            assert_eq!(parsed, *content_type);
        }
        assert!("Limerick".parse::<ContentType>().is_err());
    }

    #[test]
    fn every_content_type_maps_from_slots() {
        let slots = SlotValues::new(
            "topic",
            "audience",
            "tone",
            r#"{"outline":"- intro","wordCount":"900"}"#,
        );
        for content_type in ContentType::ALL {
            let request = ContentRequest::from_slots(*content_type, &slots).unwrap();
            assert_eq!(request.content_type(), *content_type);
        }
    }

    #[test]
    fn slots_map_onto_named_fields() {
        let slots = SlotValues::new("Launch recap", "clicks: 1200", "Paid social", "Awareness");
        let request = ContentRequest::from_slots(ContentType::CampaignReport, &slots).unwrap();
        assert_eq!(
            request,
            ContentRequest::CampaignReport {
                campaign_name: "Launch recap".to_string(),
                metrics: "clicks: 1200".to_string(),
                analysis_focus: "Paid social".to_string(),
                objective: "Awareness".to_string(),
            }
        );
    }

    #[test]
    fn brief_payload_parses_word_count() {
        let slots = SlotValues::new("Title", "seo, content", "Friendly", r###"{"outline":"## One","wordCount":"2000"}"###);
        let request = ContentRequest::from_slots(ContentType::BlogPostFromBrief, &slots).unwrap();
        match request {
            ContentRequest::BlogPostFromBrief {
                outline,
                word_count,
                ..
            } => {
                assert_eq!(outline, "## One");
                assert_eq!(word_count, 2000);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn malformed_brief_payload_is_an_error() {
        let slots = SlotValues::new("Title", "", "Friendly", "{not json");
        let result = ContentRequest::from_slots(ContentType::BlogPostFromBrief, &slots);
        assert!(matches!(result, Err(StudioError::InvalidBriefPayload(_))));
    }

    #[test]
    fn word_count_defaults_when_missing_or_invalid() {
        assert_eq!(parse_word_count(&Value::Null), DEFAULT_WORD_COUNT);
        assert_eq!(parse_word_count(&json!("lots")), DEFAULT_WORD_COUNT);
        assert_eq!(parse_word_count(&json!("0")), DEFAULT_WORD_COUNT);
        assert_eq!(parse_word_count(&json!(-40)), DEFAULT_WORD_COUNT);
        assert_eq!(parse_word_count(&json!("1200 words")), 1200);
        assert_eq!(parse_word_count(&json!(800)), 800);
    }

    #[test]
    fn brief_payload_encodes_as_form_json() {
        let encoded = BriefPayload::new("## Intro", "1500").encode().unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value, json!({ "outline": "## Intro", "wordCount": "1500" }));
    }
}
