//! The static tool catalog and its search/filter.

use serde::Serialize;

use crate::content::ContentType;

/// One of the four generic form slots a tool input binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Topic,
    Audience,
    Tone,
    Goal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Textarea,
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub id: Slot,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
    /// `(value, label)` pairs for [`FieldKind::Select`].
    pub options: &'static [(&'static str, &'static str)],
    pub rows: Option<u8>,
}

/// Dedicated workflows a tool can open instead of the generic runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkedView {
    Content,
    Briefs,
    ImageGen,
    ImageEdit,
    Speech,
    Social,
    Strategy,
    Campaign,
    Chat,
    ComingSoon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    All,
    Blog,
    #[serde(rename = "Social Media")]
    SocialMedia,
    Copy,
    #[serde(rename = "SEO")]
    Seo,
    Email,
    Descriptions,
    Summary,
    Repurpose,
    Ads,
    Video,
    Images,
    Translate,
    Other,
    Favorites,
    #[serde(rename = "eCommerce")]
    ECommerce,
}

impl Category {
    /// Filter chips, in display order.
    pub const ALL: &'static [Self] = &[
        Self::All,
        Self::Blog,
        Self::SocialMedia,
        Self::Copy,
        Self::Seo,
        Self::Email,
        Self::Descriptions,
        Self::Summary,
        Self::Repurpose,
        Self::Ads,
        Self::Video,
        Self::Images,
        Self::Translate,
        Self::Other,
        Self::Favorites,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Blog => "Blog",
            Self::SocialMedia => "Social Media",
            Self::Copy => "Copy",
            Self::Seo => "SEO",
            Self::Email => "Email",
            Self::Descriptions => "Descriptions",
            Self::Summary => "Summary",
            Self::Repurpose => "Repurpose",
            Self::Ads => "Ads",
            Self::Video => "Video",
            Self::Images => "Images",
            Self::Translate => "Translate",
            Self::Other => "Other",
            Self::Favorites => "Favorites",
            Self::ECommerce => "eCommerce",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub categories: &'static [Category],
    pub bulk_enabled: bool,
    pub linked_view: Option<LinkedView>,
    pub content_type: Option<ContentType>,
    pub input_schema: &'static [FieldSpec],
}

impl ToolDescriptor {
    /// Tools run through the generic form runner rather than a dedicated view.
    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.linked_view.is_none() && self.content_type.is_some()
    }

    #[must_use]
    pub fn field(&self, slot: Slot) -> Option<&FieldSpec> {
        self.input_schema.iter().find(|field| field.id == slot)
    }
}

const fn text(id: Slot, label: &'static str, placeholder: &'static str) -> FieldSpec {
    FieldSpec {
        id,
        label,
        placeholder,
        kind: FieldKind::Text,
        options: &[],
        rows: None,
    }
}

const fn textarea(
    id: Slot,
    label: &'static str,
    placeholder: &'static str,
    rows: Option<u8>,
) -> FieldSpec {
    FieldSpec {
        id,
        label,
        placeholder,
        kind: FieldKind::Textarea,
        options: &[],
        rows,
    }
}

const fn linked(
    id: u32,
    title: &'static str,
    description: &'static str,
    categories: &'static [Category],
    bulk_enabled: bool,
    view: LinkedView,
) -> ToolDescriptor {
    ToolDescriptor {
        id,
        title,
        description,
        categories,
        bulk_enabled,
        linked_view: Some(view),
        content_type: None,
        input_schema: &[],
    }
}

const fn generic(
    id: u32,
    title: &'static str,
    description: &'static str,
    categories: &'static [Category],
    bulk_enabled: bool,
    content_type: ContentType,
    input_schema: &'static [FieldSpec],
) -> ToolDescriptor {
    ToolDescriptor {
        id,
        title,
        description,
        categories,
        bulk_enabled,
        linked_view: None,
        content_type: Some(content_type),
        input_schema,
    }
}

static TOOLS: &[ToolDescriptor] = &[
    linked(
        1,
        "Long blog article",
        "Generate a blog article from topic or keywords based on word count and tone.",
        &[Category::Blog],
        false,
        LinkedView::Content,
    ),
    linked(
        2,
        "AI SEO Content Brief Generator",
        "Generate content briefs with SEO guidelines like keywords, questions, length, etc.",
        &[Category::Blog, Category::Seo],
        false,
        LinkedView::Briefs,
    ),
    linked(
        3,
        "AI Image Generator",
        "Generate images based on a description and desired style.",
        &[Category::Images],
        false,
        LinkedView::ImageGen,
    ),
    linked(
        12,
        "AI Image Editor",
        "Edit images using text prompts like \"add a retro filter\".",
        &[Category::Images],
        false,
        LinkedView::ImageEdit,
    ),
    linked(
        13,
        "AI Speech Generation",
        "Convert text into high-quality spoken audio (TTS).",
        &[Category::Other, Category::Video],
        false,
        LinkedView::Speech,
    ),
    linked(
        4,
        "Bulk product descriptions",
        "Generate multiple product descriptions with CSV input.",
        &[Category::Descriptions, Category::ECommerce],
        true,
        LinkedView::ComingSoon,
    ),
    linked(
        5,
        "Create an AI template",
        "Create your own AI content template.",
        &[Category::Other],
        false,
        LinkedView::ComingSoon,
    ),
    linked(
        6,
        "Search & Repurpose News",
        "Search latest news and repurpose into a social media post, blog, or a summary.",
        &[Category::Repurpose, Category::SocialMedia],
        false,
        LinkedView::Social,
    ),
    linked(
        7,
        "Repurpose video or audio",
        "Repurpose the content from video or audio into another format.",
        &[Category::Repurpose, Category::Video],
        false,
        LinkedView::ComingSoon,
    ),
    linked(
        8,
        "Royalty free images",
        "Find royalty free images from platforms like Unsplash, Pexels etc.",
        &[Category::Images],
        false,
        LinkedView::ComingSoon,
    ),
    linked(
        9,
        "GIFs",
        "Find gifs from Giphy.",
        &[Category::Images, Category::SocialMedia],
        false,
        LinkedView::ComingSoon,
    ),
    linked(
        10,
        "Social media post from image",
        "Create a social media post from an image.",
        &[Category::SocialMedia, Category::Images],
        false,
        LinkedView::ComingSoon,
    ),
    linked(
        11,
        "Repurpose image",
        "Repurpose content from an image or infographic into another format.",
        &[Category::Repurpose, Category::Images],
        false,
        LinkedView::ComingSoon,
    ),
    generic(
        100,
        "AI Topic Generator",
        "Generate topic ideas from a theme.",
        &[Category::Blog],
        false,
        ContentType::AiTopicGenerator,
        &[
            text(Slot::Topic, "Theme or Category", "e.g., \"Sustainable fashion\""),
        ],
    ),
    generic(
        101,
        "Long blog article from URLs or documents",
        "Generate a long blog article from reference URLs or documents.",
        &[Category::Blog, Category::Repurpose],
        false,
        ContentType::LongBlogFromUrlDoc,
        &[
            textarea(
                Slot::Topic,
                "Pasted Content from URLs/Docs",
                "Paste the full text from your sources here...",
                Some(8),
            ),
            text(Slot::Audience, "Desired Tone", "e.g., \"Informative and authoritative\""),
            text(Slot::Tone, "Target Word Count", "e.g., 1500"),
        ],
    ),
    generic(
        102,
        "Blog article",
        "Create a short blog article for a topic in a specific tone.",
        &[Category::Blog],
        true,
        ContentType::ShortBlogArticle,
        &[
            text(Slot::Topic, "Topic", "e.g., \"Why every startup needs a content strategy\""),
            text(Slot::Audience, "Tone", "e.g., \"Casual and encouraging\""),
        ],
    ),
    generic(
        103,
        "Blog post outline",
        "Generate a blog post based on a specific title.",
        &[Category::Blog],
        true,
        ContentType::BlogPostOutline,
        &[
            text(Slot::Topic, "Blog Title", "e.g., \"The Ultimate Guide to Digital Marketing in 2024\""),
        ],
    ),
    generic(
        104,
        "Blog post introduction",
        "Generate an introductory paragraph based on a title, audience, and tone.",
        &[Category::Blog],
        true,
        ContentType::BlogPostIntroduction,
        &[
            text(Slot::Topic, "Blog Title", "e.g., \"The Ultimate Guide to Digital Marketing in 2024\""),
            text(Slot::Audience, "Target Audience", "e.g., \"Small business owners\""),
            text(Slot::Tone, "Tone of Voice", "e.g., \"Authoritative yet accessible\""),
        ],
    ),
    generic(
        105,
        "Blog sectional content from topic",
        "Writes a blog section.",
        &[Category::Blog],
        true,
        ContentType::BlogSectionalContent,
        &[
            text(Slot::Topic, "Section Topic / Subheading", "e.g., \"Analyzing Competitor Backlinks\""),
            text(Slot::Audience, "Broader Article Context", "e.g., \"An ultimate guide to SEO for beginners\""),
            text(Slot::Tone, "Tone of Voice", "e.g., \"Informative\""),
        ],
    ),
    generic(
        106,
        "Blog article from outline",
        "Write an article based on a specific topic, tone, and outline.",
        &[Category::Blog],
        false,
        ContentType::BlogArticleFromOutline,
        &[
            textarea(
                Slot::Topic,
                "Article Outline",
                "Paste your full outline here...",
                Some(8),
            ),
            text(Slot::Audience, "Article Topic", "e.g., \"The History of AI\""),
            text(Slot::Tone, "Tone of Voice", "e.g., \"Academic and formal\""),
        ],
    ),
    generic(
        107,
        "Blog post conclusion",
        "Generate a concluding paragraph based on a title, audience, and tone.",
        &[Category::Blog],
        true,
        ContentType::BlogPostConclusion,
        &[
            text(Slot::Topic, "Blog Title", "e.g., \"The Ultimate Guide to Digital Marketing in 2024\""),
            text(Slot::Audience, "Target Audience", "e.g., \"Small business owners\""),
            text(Slot::Tone, "Tone of Voice", "e.g., \"Inspirational\""),
        ],
    ),
    generic(
        200,
        "Social media post with notes",
        "Create a social media post with notes.",
        &[Category::SocialMedia],
        true,
        ContentType::SocialPostWithNotes,
        &[
            textarea(
                Slot::Topic,
                "Core Message / Notes",
                "Key points for the post...",
                None,
            ),
            text(Slot::Tone, "Tone", "e.g., Witty, Professional"),
            text(Slot::Goal, "Platform", "e.g., LinkedIn, Instagram"),
        ],
    ),
    generic(
        201,
        "Social media post with link",
        "Create a social media post with a link.",
        &[Category::SocialMedia],
        true,
        ContentType::SocialPostWithLink,
        &[
            text(Slot::Topic, "Link URL", "https://example.com/article"),
            textarea(
                Slot::Audience,
                "Post Commentary",
                "Check out this great article!",
                None,
            ),
            text(Slot::Tone, "Tone", "e.g., Excited"),
            text(Slot::Goal, "Platform", "e.g., X (Twitter)"),
        ],
    ),
    generic(
        202,
        "Social media post with a theme",
        "Create a social media post with a theme or keyword.",
        &[Category::SocialMedia],
        true,
        ContentType::SocialPostWithTheme,
        &[
            text(Slot::Topic, "Theme or Keyword", "e.g., \"Monday Motivation\""),
            text(Slot::Tone, "Tone", "e.g., Inspirational"),
            text(Slot::Goal, "Platform", "e.g., Facebook"),
        ],
    ),
    generic(
        203,
        "X thread from a blog or webpage",
        "Create an X thread based on a blog post or webpage.",
        &[Category::SocialMedia, Category::Repurpose],
        true,
        ContentType::XThreadFromBlog,
        &[
            textarea(
                Slot::Topic,
                "Pasted Blog/Webpage Content",
                "Paste content here...",
                Some(10),
            ),
        ],
    ),
    generic(
        204,
        "X thread from a theme",
        "Create an X thread based on a theme.",
        &[Category::SocialMedia],
        true,
        ContentType::XThreadFromTheme,
        &[
            text(Slot::Topic, "Theme", "e.g., \"The future of remote work\""),
            text(Slot::Tone, "Tone", "e.g., \"Thought-provoking\""),
        ],
    ),
    generic(
        205,
        "Social media poll",
        "Create a Linkedin or X poll based on a theme.",
        &[Category::SocialMedia],
        true,
        ContentType::SocialMediaPoll,
        &[
            text(Slot::Topic, "Topic / Question for Poll", "e.g., \"What is the most important skill for marketers in 2024?\""),
            text(Slot::Audience, "Platform", "e.g., LinkedIn"),
        ],
    ),
    generic(
        206,
        "Social media page introduction",
        "Create a social media page introduction based on notes.",
        &[Category::SocialMedia, Category::Copy],
        true,
        ContentType::SocialMediaPageIntroduction,
        &[
            text(Slot::Topic, "Business/Person Name", "e.g., \"Acme Innovations\""),
            textarea(
                Slot::Audience,
                "Key Information/Notes",
                "We sell eco-friendly widgets...",
                None,
            ),
            text(Slot::Tone, "Platform", "e.g., Instagram Bio"),
        ],
    ),
    generic(
        207,
        "Social media post with quote",
        "Create a social media post with a quote from a popular figure.",
        &[Category::SocialMedia],
        true,
        ContentType::SocialPostWithQuote,
        &[
            text(Slot::Topic, "Quote by", "e.g., \"Steve Jobs\""),
            textarea(
                Slot::Audience,
                "Pasted Quote",
                "Paste the quote here...",
                None,
            ),
            text(Slot::Tone, "Your Commentary", "e.g., \"This really resonates because...\""),
            text(Slot::Goal, "Platform", "e.g., LinkedIn"),
        ],
    ),
    generic(
        208,
        "Memes",
        "Generate meme ideas and captions.",
        &[Category::SocialMedia],
        true,
        ContentType::Memes,
        &[
            text(Slot::Topic, "Topic for Meme", "e.g., \"Monday morning meetings\""),
            text(Slot::Audience, "Target Audience", "e.g., \"Office workers\""),
        ],
    ),
    generic(
        209,
        "Social media post for holiday or special day",
        "Create a holiday or special day social media post.",
        &[Category::SocialMedia],
        true,
        ContentType::SocialHolidayPost,
        &[
            text(Slot::Topic, "Holiday / Special Day", "e.g., \"World Environment Day\""),
            text(Slot::Audience, "Key Message", "e.g., \"Highlighting our commitment to sustainability\""),
            text(Slot::Tone, "Tone", "e.g., \"Hopeful\""),
            text(Slot::Goal, "Platform", "e.g., \"Instagram\""),
        ],
    ),
    generic(
        300,
        "Content improver",
        "Improves the given text and rewrites in a given tone.",
        &[Category::Copy],
        false,
        ContentType::ContentImprover,
        &[
            textarea(
                Slot::Topic,
                "Original Text",
                "Paste your content here...",
                Some(8),
            ),
            text(Slot::Audience, "Desired Tone", "e.g., \"More professional\""),
        ],
    ),
    generic(
        301,
        "Paraphrase or rewrite",
        "Paraphrase the given text.",
        &[Category::Copy, Category::Repurpose],
        true,
        ContentType::ParaphraseRewrite,
        &[
            textarea(
                Slot::Topic,
                "Original Text",
                "Paste content here to rewrite it...",
                Some(8),
            ),
        ],
    ),
    generic(
        302,
        "AIDA copy",
        "Generate copy using the Attention, Interest, Desire and Action framework.",
        &[Category::Copy, Category::Ads],
        true,
        ContentType::AidaCopy,
        &[
            text(Slot::Topic, "Product/Service", "e.g., \"A new project management app\""),
            text(Slot::Audience, "Target Audience", "e.g., \"Freelancers and small teams\""),
        ],
    ),
    generic(
        303,
        "BAB copy",
        "Generate copy using the Before-After-Bridge framework.",
        &[Category::Copy, Category::Ads],
        true,
        ContentType::BabCopy,
        &[
            text(Slot::Topic, "Product/Service", "e.g., \"A new project management app\""),
            text(Slot::Audience, "Target Audience", "e.g., \"Freelancers and small teams\""),
        ],
    ),
    generic(
        304,
        "PAS copy",
        "Generate copy using the Problem-Agitate-Solution framework.",
        &[Category::Copy, Category::Ads],
        true,
        ContentType::PasCopy,
        &[
            text(Slot::Topic, "Product/Service", "e.g., \"A new project management app\""),
            text(Slot::Audience, "Target Audience", "e.g., \"Freelancers and small teams\""),
        ],
    ),
    generic(
        305,
        "Headlines",
        "Generates 10 headlines for a given product or service.",
        &[Category::Copy, Category::Ads],
        true,
        ContentType::Headlines,
        &[
            text(Slot::Topic, "Topic/Product", "e.g., \"AI-powered grammar checker\""),
            text(Slot::Audience, "Target Audience", "e.g., \"Students and professionals\""),
        ],
    ),
    generic(
        306,
        "CTAs",
        "Generates 10 CTAs for given information.",
        &[Category::Copy, Category::Ads],
        true,
        ContentType::Ctas,
        &[
            text(Slot::Topic, "Context / Goal for CTA", "e.g., \"To get users to sign up for a free trial\""),
        ],
    ),
    generic(
        307,
        "Copy in bullets",
        "Creates bulleted copy with notes.",
        &[Category::Copy],
        true,
        ContentType::CopyInBullets,
        &[
            textarea(
                Slot::Topic,
                "Notes or Paragraph",
                "Paste your notes or text here...",
                Some(8),
            ),
        ],
    ),
    generic(
        400,
        "Repurpose content",
        "Repurpose the content in videos, podcasts, documents, webpages and more.",
        &[Category::Repurpose],
        false,
        ContentType::RepurposeContent,
        &[
            textarea(
                Slot::Topic,
                "Original Content",
                "Paste your content here...",
                Some(8),
            ),
            text(Slot::Audience, "Desired New Format", "e.g., \"LinkedIn Article\", \"Key takeaways for a video script\""),
            text(Slot::Tone, "Tone", "e.g., \"Professional\""),
        ],
    ),
    generic(
        401,
        "Summarize text",
        "Create a summary of a long section of text.",
        &[Category::Summary],
        true,
        ContentType::SummarizeText,
        &[
            textarea(
                Slot::Topic,
                "Original Text",
                "Paste text to summarize...",
                Some(8),
            ),
            text(Slot::Audience, "Desired Format", "e.g., \"a short paragraph\" or \"5 bullet points\""),
        ],
    ),
    generic(
        402,
        "Summary from notes",
        "Creates a summary from notes as bullets or a paragraph.",
        &[Category::Summary],
        true,
        ContentType::SummaryFromNotes,
        &[
            textarea(
                Slot::Topic,
                "Pasted Notes",
                "Paste your notes here...",
                Some(8),
            ),
            text(Slot::Audience, "Desired Format", "e.g., \"a paragraph\" or \"bullet points\""),
        ],
    ),
    generic(
        403,
        "Paragraphs to bullets",
        "Paraphrases the given text in the form of bullet points.",
        &[Category::Summary, Category::Copy],
        true,
        ContentType::ParagraphsToBullets,
        &[
            textarea(
                Slot::Topic,
                "Original Paragraph(s)",
                "Paste your text here to convert it into a bulleted list.",
                Some(8),
            ),
        ],
    ),
    generic(
        500,
        "SEO meta description",
        "Writes an SEO meta description based on a page title and keywords.",
        &[Category::Seo, Category::Descriptions],
        true,
        ContentType::SeoMetaDescription,
        &[
            text(Slot::Topic, "Page Title or Topic", "e.g., \"High-Quality Dog Food for Active Breeds\""),
            text(Slot::Audience, "Primary Keywords", "e.g., \"active dog food, high-protein kibble\""),
        ],
    ),
    generic(
        501,
        "Search keywords",
        "Generate keywords for a theme, product or service.",
        &[Category::Seo],
        true,
        ContentType::SearchKeywords,
        &[
            text(Slot::Topic, "Theme / Product / Service", "e.g., \"eco-friendly cleaning supplies\""),
            text(Slot::Audience, "Industry", "e.g., \"Home Goods\""),
            text(Slot::Tone, "Target Audience", "e.g., \"Environmentally conscious homeowners\""),
        ],
    ),
    generic(
        600,
        "Cold outreach email",
        "Write a personalized cold email about a specific product or service.",
        &[Category::Email],
        true,
        ContentType::ColdOutreachEmail,
        &[
            text(Slot::Topic, "My Product/Service", "What I am offering"),
            text(Slot::Audience, "Recipient's Role/Company", "e.g., \"Marketing Manager at Acme Corp\""),
            text(Slot::Tone, "Goal of Email", "e.g., \"To schedule a 15-minute demo\""),
        ],
    ),
    generic(
        601,
        "Promotion or offer email",
        "Write a marketing campaign email to share a promotion or offer.",
        &[Category::Email],
        true,
        ContentType::PromotionEmail,
        &[
            text(Slot::Topic, "Promotion Details", "e.g., \"25% off all products for summer\""),
            text(Slot::Audience, "Target Audience", "e.g., \"Existing customers\""),
            text(Slot::Tone, "Tone", "e.g., \"Excited and urgent\""),
        ],
    ),
    generic(
        602,
        "Sales email sequence",
        "Generates a sales email sequence.",
        &[Category::Email],
        false,
        ContentType::SalesEmailSequence,
        &[
            text(Slot::Topic, "Product/Service", "e.g., \"Our new CRM software\""),
            text(Slot::Audience, "Target Prospect", "e.g., \"Sales Directors\""),
            text(Slot::Tone, "Number of Emails", "e.g., \"3\""),
            text(Slot::Goal, "Overall Goal", "e.g., \"Book a discovery call\""),
        ],
    ),
    generic(
        603,
        "Email subject line",
        "Generate email subject line ideas.",
        &[Category::Email],
        true,
        ContentType::EmailSubjectLine,
        &[
            text(Slot::Topic, "Email Content/Topic", "e.g., \"A new feature announcement\""),
            text(Slot::Audience, "Target Audience", "e.g., \"Power users\""),
        ],
    ),
    generic(
        604,
        "Email from outline",
        "Write an email based on a specific outline.",
        &[Category::Email],
        false,
        ContentType::EmailFromOutline,
        &[
            textarea(
                Slot::Topic,
                "Email Outline",
                "Paste your email outline here...",
                Some(8),
            ),
            text(Slot::Audience, "Audience", "e.g., \"New subscribers\""),
            text(Slot::Tone, "Tone", "e.g., \"Welcoming and helpful\""),
        ],
    ),
    generic(
        605,
        "Newsletter",
        "Generate a newsletter outline, introduction, and call to action (CTA).",
        &[Category::Email],
        false,
        ContentType::Newsletter,
        &[
            textarea(
                Slot::Topic,
                "Newsletter Theme/Topics",
                "e.g., \"Monthly product updates, AI news, team spotlight\"",
                None,
            ),
            text(Slot::Audience, "Audience", "e.g., \"Investors and partners\""),
            text(Slot::Tone, "Tone", "e.g., \"Professional and informative\""),
        ],
    ),
    generic(
        606,
        "Event promotion email",
        "Write an email announcing an event and offering an invitation.",
        &[Category::Email],
        true,
        ContentType::EventPromotionEmail,
        &[
            text(Slot::Topic, "Event Name and Details", "e.g., \"Webinar: The Future of Marketing, Dec 15th\""),
            text(Slot::Audience, "Target Audience", "e.g., \"Marketing professionals\""),
            text(Slot::Tone, "Tone", "e.g., \"Exciting and exclusive\""),
        ],
    ),
    generic(
        900,
        "FAQ",
        "Generates FAQs for a topic.",
        &[Category::Other, Category::Blog],
        true,
        ContentType::FaqGenerator,
        &[
            text(Slot::Topic, "Topic, Product, or Service", "e.g., \"Our new CRM software\""),
        ],
    ),
    generic(
        901,
        "Q&A",
        "Answer a question with stated facts.",
        &[Category::Other],
        true,
        ContentType::QaGenerator,
        &[
            text(Slot::Topic, "Your Question", "e.g., \"What was the first social media platform?\""),
        ],
    ),
    generic(
        902,
        "Sentence expander",
        "Expand a sentence into a paragraph.",
        &[Category::Copy],
        true,
        ContentType::SentenceExpander,
        &[
            text(Slot::Topic, "Sentence to Expand", "e.g., \"AI is changing marketing.\""),
            text(Slot::Audience, "Tone of Voice", "e.g., \"Detailed and professional\""),
        ],
    ),
    generic(
        903,
        "Correct spelling and grammar",
        "Correct spelling and grammar of given text.",
        &[Category::Copy],
        true,
        ContentType::CorrectSpellingGrammar,
        &[
            textarea(
                Slot::Topic,
                "Text with Errors",
                "Paste your text here to correct it.",
                Some(8),
            ),
        ],
    ),
    generic(
        904,
        "Simplify text",
        "Simplify the given text.",
        &[Category::Copy],
        true,
        ContentType::SimplifyText,
        &[
            textarea(
                Slot::Topic,
                "Complex Text",
                "Paste your text here to simplify it.",
                Some(8),
            ),
        ],
    ),
    generic(
        905,
        "Translate",
        "Translate the given text.",
        &[Category::Translate],
        true,
        ContentType::TranslateText,
        &[
            textarea(
                Slot::Topic,
                "Text to Translate",
                "Enter text...",
                Some(6),
            ),
            text(Slot::Audience, "Translate to (Language)", "e.g., \"Spanish\""),
        ],
    ),
    generic(
        906,
        "Press release",
        "Creates press release from notes.",
        &[Category::Other, Category::Copy],
        false,
        ContentType::PressRelease,
        &[
            textarea(
                Slot::Topic,
                "Announcement / Key Information",
                "e.g., \"Launched new product X, secured $5M in funding\"",
                Some(6),
            ),
            text(Slot::Audience, "Company Name", "e.g., \"Innovate Inc.\""),
        ],
    ),
    generic(
        907,
        "Customer case study",
        "Creates customer case studies with notes.",
        &[Category::Other, Category::Copy],
        false,
        ContentType::CustomerCaseStudy,
        &[
            text(Slot::Topic, "Customer Name", "e.g., \"Global Corp\""),
            text(Slot::Audience, "Product/Service Used", "e.g., \"Our enterprise analytics platform\""),
            textarea(
                Slot::Tone,
                "Key Results/Notes",
                "Problem: ... Solution: ... Results: 30% increase in ROI...",
                Some(6),
            ),
        ],
    ),
    generic(
        908,
        "Poem",
        "Creates a poem on a topic or theme.",
        &[Category::Other],
        false,
        ContentType::Poem,
        &[
            text(Slot::Topic, "Topic / Theme", "e.g., \"The ocean at dawn\""),
            text(Slot::Audience, "Style / Tone", "e.g., \"Haiku\", \"Limerick\", \"Free verse\""),
        ],
    ),
    generic(
        909,
        "Product or business names",
        "Generate 10 name ideas for a product or service.",
        &[Category::Other],
        true,
        ContentType::ProductBusinessNames,
        &[
            textarea(
                Slot::Topic,
                "Product/Business Concept",
                "e.g., \"A subscription box for rare indoor plants\"",
                None,
            ),
            text(Slot::Audience, "Keywords to consider", "e.g., \"green, growth, urban\""),
        ],
    ),
    generic(
        910,
        "Job description",
        "Generates a job description based on inputs.",
        &[Category::Descriptions],
        true,
        ContentType::JobDescription,
        &[
            text(Slot::Topic, "Job Title", "e.g., \"Senior Product Manager\""),
            textarea(
                Slot::Audience,
                "Key Responsibilities",
                "Own the product roadmap, work with engineering...",
                Some(6),
            ),
            text(Slot::Tone, "Company Information", "e.g., \"We are a fast-growing SaaS startup...\""),
        ],
    ),
];

/// Every tool, in declaration order.
#[must_use]
pub fn catalog() -> &'static [ToolDescriptor] {
    TOOLS
}

#[must_use]
pub fn find_tool(id: u32) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().find(|tool| tool.id == id)
}

/// Tools sorted by title, narrowed to `category` and then to titles or
/// descriptions containing `query` (case-insensitive).
#[must_use]
pub fn filter_tools(
    query: &str,
    category: Category,
    favorites: &[u32],
) -> Vec<&'static ToolDescriptor> {
    let needle = query.trim().to_lowercase();

    let mut tools: Vec<&'static ToolDescriptor> = TOOLS
        .iter()
        .filter(|tool| match category {
            Category::All => true,
            Category::Favorites => favorites.contains(&tool.id),
            other => tool.categories.contains(&other),
        })
        .filter(|tool| {
            needle.is_empty()
                || tool.title.to_lowercase().contains(&needle)
                || tool.description.to_lowercase().contains(&needle)
        })
        .collect();

    tools.sort_by(|a, b| {
        a.title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then_with(|| a.title.cmp(b.title))
    });
    tools
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<u32> = catalog().iter().map(|tool| tool.id).collect();
        assert_eq!(ids.len(), catalog().len());
    }

    #[test]
    fn generic_tools_have_content_types_and_inputs() {
        for tool in catalog().iter().filter(|tool| tool.linked_view.is_none()) {
            assert!(tool.content_type.is_some(), "tool {} has no content type", tool.id);
            assert!(!tool.input_schema.is_empty(), "tool {} has no inputs", tool.id);
            assert!(tool.is_generic());
        }
    }

    #[test]
    fn schema_slots_are_not_repeated() {
        for tool in catalog() {
            let slots: HashSet<Slot> = tool.input_schema.iter().map(|field| field.id).collect();
            assert_eq!(slots.len(), tool.input_schema.len(), "tool {}", tool.id);
        }
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let by_title = filter_tools("aida", Category::All, &[]);
        assert_eq!(by_title.iter().map(|t| t.id).collect::<Vec<_>>(), vec![302]);

        let by_description = filter_tools("UNSPLASH", Category::All, &[]);
        assert_eq!(by_description.iter().map(|t| t.id).collect::<Vec<_>>(), vec![8]);
    }

    #[test]
    fn results_are_sorted_by_title() {
        let tools = filter_tools("", Category::Blog, &[]);
        assert!(!tools.is_empty());
        assert!(tools
            .windows(2)
            .all(|pair| pair[0].title.to_lowercase() <= pair[1].title.to_lowercase()));
        assert!(tools.iter().all(|t| t.categories.contains(&Category::Blog)));
    }

    #[test]
    fn favorites_category_keeps_only_favorites() {
        let tools = filter_tools("", Category::Favorites, &[302, 1]);
        let ids: Vec<u32> = tools.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&302) && ids.contains(&1));

        assert!(filter_tools("", Category::Favorites, &[]).is_empty());
    }

    #[test]
    fn category_and_search_combine() {
        let tools = filter_tools("thread", Category::SocialMedia, &[]);
        let ids: HashSet<u32> = tools.iter().map(|t| t.id).collect();
        assert_eq!(ids, HashSet::from([203, 204]));
    }

    #[test]
    fn filter_chips_start_with_all_and_end_with_favorites() {
        assert_eq!(Category::ALL.first(), Some(&Category::All));
        assert_eq!(Category::ALL.last(), Some(&Category::Favorites));
        assert!(!Category::ALL.contains(&Category::ECommerce));
    }
}
