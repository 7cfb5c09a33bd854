//! Prompt templates, one per [`ContentRequest`] variant.

use std::fmt::Write as _;

use tracing::warn;

use crate::content::{ContentRequest, ContentType, SlotValues};

pub const UNSUPPORTED_CONTENT_TYPE: &str =
    "This content type is not supported for generic content generation.";

pub const MARKETING_TIP_PROMPT: &str = "You are a veteran marketing expert like Seth Godin. Provide one concise, insightful, and actionable marketing tip for today. The tip should be creative and thought-provoking. Keep it under 40 words.";

pub const STRATEGIST_SYSTEM_PROMPT: &str = "You are 'Marvin', a world-class AI marketing strategist. Your persona is professional, insightful, and slightly witty. Your goal is to provide concise, actionable, and creative marketing advice. Always stay in character.";

/// Acceptable article length around a target, within ten percent either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordCountBand {
    pub target: u32,
    pub low: u32,
    pub high: u32,
}

impl WordCountBand {
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn around(target: u32) -> Self {
        let target_f = f64::from(target);
        Self {
            target,
            low: (target_f * 0.9).round() as u32,
            high: (target_f * 1.1).round() as u32,
        }
    }
}

/// Builds the prompt for a content type label and the four raw form slots.
///
/// Total: an unknown label falls back to a generic topic prompt, and a
/// malformed brief payload is logged and answered with that same fallback.
#[must_use]
pub fn build_prompt(label: &str, topic: &str, audience: &str, tone: &str, goal: &str) -> String {
    let fallback = || format!("Generate content for topic: {topic}");

    let Ok(content_type) = label.parse::<ContentType>() else {
        return fallback();
    };

    let slots = SlotValues::new(topic, audience, tone, goal);
    match ContentRequest::from_slots(content_type, &slots) {
        Ok(request) => request.prompt(),
        Err(error) => {
            warn!(content_type = label, %error, "could not build prompt from slots");
            fallback()
        }
    }
}

/// Brief-and-outline prompt for structured generation.
#[must_use]
pub fn blog_brief(topic: &str) -> String {
    Prompt::new("You are an expert SEO strategist and content architect. Your task is to generate a comprehensive blog brief and outline based on a given topic.")
        .blank()
        .quoted("Topic", topic)
        .blank()
        .instructions()
        .numbered(&[
            "Create one, compelling, SEO-friendly title for the blog post.",
            "Identify 5-7 relevant primary and secondary keywords.",
            "Develop a logical and detailed content outline in Markdown format. The outline should include H2 and H3 headings to structure the article effectively.",
        ])
        .blank()
        .line("Return the response as a single, minified JSON object.")
        .build()
}

/// Markdown-flavoured prompt text assembled line by line.
struct Prompt {
    out: String,
}

impl Prompt {
    fn new(intro: &str) -> Self {
        let mut out = String::with_capacity(1024);
        out.push_str(intro);
        out.push('\n');
        Self { out }
    }

    fn line(mut self, text: &str) -> Self {
        self.out.push_str(text);
        self.out.push('\n');
        self
    }

    fn blank(mut self) -> Self {
        self.out.push('\n');
        self
    }

    fn field(mut self, label: &str, value: &str) -> Self {
        let _ = writeln!(self.out, "**{label}:** {value}");
        self
    }

    fn quoted(mut self, label: &str, value: &str) -> Self {
        let _ = writeln!(self.out, "**{label}:** \"{value}\"");
        self
    }

    /// A labelled value fenced as a code block so pasted text keeps its shape.
    fn block(self, label: &str, value: &str) -> Self {
        self.fenced(label, "", value)
    }

    fn fenced(mut self, label: &str, lang: &str, value: &str) -> Self {
        let _ = write!(self.out, "**{label}:**\n```{lang}\n{value}\n```\n");
        self
    }

    fn instructions(self) -> Self {
        self.line("**Instructions:**")
    }

    fn numbered(mut self, items: &[&str]) -> Self {
        for (i, item) in items.iter().enumerate() {
            let _ = writeln!(self.out, "{}.  {item}", i + 1);
        }
        self
    }

    fn bullets(mut self, items: &[&str]) -> Self {
        for item in items {
            let _ = writeln!(self.out, "- {item}");
        }
        self
    }

    fn build(self) -> String {
        self.out.trim_end().to_string()
    }
}

#[allow(clippy::too_many_lines)]
pub(crate) fn render(request: &ContentRequest) -> String {
    match request {
        ContentRequest::BlogPost { topic, audience, tone, goal } => {
            Prompt::new("You are a world-class content marketing expert specializing in writing engaging and SEO-optimized blog posts.")
                .line("Your task is to write a complete, high-quality blog post.")
                .blank()
                .field("Topic", topic)
                .field("Target Audience", audience)
                .field("Tone of Voice", tone)
                .field("Primary Goal", goal)
                .blank()
                .instructions()
                .numbered(&[
                    "Create 3-5 compelling, SEO-friendly title suggestions.",
                    "Write a captivating introduction that hooks the reader.",
                    "Structure the body with clear headings (H2) and subheadings (H3). Use bullet points and bold text to improve readability.",
                    "Ensure the content is informative, well-researched, and provides real value to the reader.",
                    "Conclude with a powerful summary and a clear call-to-action related to the goal.",
                    "The entire output should be in well-formatted Markdown. Start with the title suggestions.",
                ])
                .build()
        }
        ContentRequest::BlogPostFromBrief { title, keywords, tone, outline, word_count } => {
            blog_post_from_brief(title, keywords, tone, outline, *word_count)
        }
        ContentRequest::SeoBrief { topic, audience, tone, goal } => {
            Prompt::new("You are a senior SEO strategist. Create a comprehensive content brief for a writer.")
                .blank()
                .field("Main Topic/Keyword", topic)
                .field("Target Audience", audience)
                .field("Desired Tone", tone)
                .field("Content Goal", goal)
                .blank()
                .instructions()
                .numbered(&[
                    "**Primary Keyword:** Suggest the primary keyword.",
                    "**Secondary Keywords:** List 5-10 related LSI (Latent Semantic Indexing) keywords.",
                    "**Search Intent:** Define the user's search intent (e.g., informational, commercial, transactional).",
                    "**Proposed Title:** Suggest an SEO-optimized title.",
                    "**Meta Description:** Write a compelling meta description (under 160 characters).",
                    "**Content Outline:** Provide a detailed H2/H3 structure with key points to cover in each section.",
                    "**Internal/External Linking:** Suggest opportunities for internal and external links.",
                    "**Call to Action:** Specify the desired CTA.",
                ])
                .line("Format the entire output as clean, well-structured Markdown.")
                .build()
        }
        ContentRequest::TweetThread { topic, audience, tone, goal } => {
            Prompt::new("You are a viral social media manager. Create a compelling Twitter thread.")
                .blank()
                .field("Topic", topic)
                .field("Audience", audience)
                .field("Tone", tone)
                .field("Goal", goal)
                .blank()
                .instructions()
                .numbered(&[
                    "Write a powerful hook for the first tweet to grab attention.",
                    "Break down the topic into 5-8 numbered tweets.",
                    "Keep each tweet concise and impactful.",
                    "Use relevant hashtags and emojis.",
                    "End with a concluding tweet that summarizes the thread and includes a call to action.",
                ])
                .line("Format the output clearly separating each tweet (e.g., \"1/8:\", \"2/8:\", etc.).")
                .build()
        }
        ContentRequest::LinkedinPost { topic, audience, tone, goal } => {
            Prompt::new("You are a B2B marketing expert and LinkedIn thought leader. Write a professional and engaging LinkedIn post.")
                .blank()
                .field("Topic", topic)
                .field("Target Audience", audience)
                .field("Tone", tone)
                .field("Goal", goal)
                .blank()
                .instructions()
                .numbered(&[
                    "Start with a strong hook to stop the scroll.",
                    "Elaborate on the topic with 3-5 clear, value-driven points. Use bullet points or numbered lists.",
                    "Pose a question to encourage comments and engagement.",
                    "Include 3-5 relevant hashtags.",
                    "Keep the post professional and aligned with the LinkedIn platform.",
                ])
                .line("Format the output as a single, ready-to-publish post.")
                .build()
        }
        ContentRequest::MarketingStrategy { product, audience, duration, goal } => {
            Prompt::new("You are a Chief Marketing Officer (CMO) with 20 years of experience. Create a high-level, actionable marketing strategy.")
                .blank()
                .field("Product/Service Description", product)
                .field("Target Audience", audience)
                .field("Primary Campaign Goal", goal)
                .field("Campaign Duration", duration)
                .blank()
                .instructions()
                .line("Create a comprehensive marketing strategy in well-formatted Markdown. Structure your response with the following sections:")
                .blank()
                .numbered(&[
                    "**Campaign Name & Slogan:** Suggest 3 creative names and slogans.",
                    "**Core Messaging & Value Proposition:** Define what the campaign will communicate and its key value.",
                    "**Key Channels & Tactics:** Recommend the most effective marketing channels (e.g., Content Marketing, SEO, Paid Social, Email) and specific tactics.",
                    "**Phased Rollout Plan:** Break down the campaign into phases based on the duration. Outline key activities and objectives for each phase.",
                    "**Key Performance Indicators (KPIs):** List the most important metrics to track to measure success, tailored to the primary goal.",
                ])
                .build()
        }
        ContentRequest::CampaignReport { campaign_name, metrics, analysis_focus, objective } => {
            Prompt::new("You are a senior marketing data analyst with a knack for storytelling. Your job is to analyze campaign performance data and present it as a clear, insightful narrative report.")
                .blank()
                .field("Campaign Name", campaign_name)
                .field("Campaign Objective", objective)
                .block("Key Metrics Data", metrics)
                .field("Requested Analysis Focus", analysis_focus)
                .blank()
                .instructions()
                .line("Generate a comprehensive campaign performance report in well-formatted Markdown. Structure your response with the following sections:")
                .blank()
                .numbered(&[
                    "**Executive Summary:** Start with a brief, high-level summary of the campaign's performance against its stated objective.",
                    "**Key Findings:** Present 3-5 bullet points highlighting the most important, data-backed insights.",
                    "**Deep Dive Analysis:** Provide a more detailed analysis based on the 'Requested Analysis Focus'. Interpret the key metrics (e.g., CTR, CVR, CPA, ROAS) and explain what they mean in the context of the campaign.",
                    "**What Went Well:** Identify the strengths and successful aspects of the campaign, citing specific data points.",
                    "**Areas for Improvement:** Point out weaknesses or areas where performance can be optimized, citing specific data points.",
                    "**Actionable Recommendations:** Conclude with a list of concrete, actionable steps to take to improve performance or apply learnings to future campaigns.",
                ])
                .blank()
                .line("Maintain a professional and data-driven tone throughout.")
                .build()
        }
        ContentRequest::BlogBriefAndOutline { .. }
        | ContentRequest::SpeechGeneration { .. }
        | ContentRequest::ImageEditing { .. } => UNSUPPORTED_CONTENT_TYPE.to_string(),
        ContentRequest::SocialPostWithNotes { notes, tone, platform } => {
            Prompt::new("You are a social media manager. Create a social media post based on the provided notes and add your own strategic notes for posting.")
                .field("Platform", platform)
                .block("Core Message/Notes", notes)
                .field("Tone", tone)
                .instructions()
                .numbered(&[
                    "Write a compelling social media post for the specified platform.",
                    "Below the post, add a \"Manager's Notes\" section with recommendations for hashtags, best time to post, and potential visuals.",
                    "Format the entire output in Markdown.",
                ])
                .build()
        }
        ContentRequest::SocialPostWithLink { url, commentary, tone, platform } => {
            Prompt::new("You are a content curator. Write a social media post that introduces and shares a link.")
                .field("Link URL", url)
                .block("Post Commentary/Context", commentary)
                .field("Tone", tone)
                .field("Platform", platform)
                .instructions()
                .numbered(&[
                    "Write a caption that provides context or a compelling hook for the link.",
                    "Encourage clicks and discussion.",
                    "Include 3-5 relevant hashtags.",
                    "The final post should just be the caption text, ready to be pasted.",
                ])
                .build()
        }
        ContentRequest::SocialPostWithTheme { theme, tone, platform } => {
            Prompt::new("You are a creative social media content creator. Write a social media post based on a theme.")
                .field("Theme/Keyword", theme)
                .field("Tone", tone)
                .field("Platform", platform)
                .instructions()
                .numbered(&[
                    "Craft an engaging post that captures the essence of the theme.",
                    "Include relevant emojis and 3-5 hashtags.",
                    "Format as a ready-to-publish post.",
                ])
                .build()
        }
        ContentRequest::SocialHolidayPost { holiday, key_message, tone, platform } => {
            Prompt::new("You are a brand's social media manager. Create a post for an upcoming holiday or special day.")
                .field("Holiday/Special Day", holiday)
                .field("Key Message", key_message)
                .field("Tone", tone)
                .field("Platform", platform)
                .instructions()
                .numbered(&[
                    "Write a creative and appropriate post celebrating the day.",
                    "Connect the holiday to the brand's message if possible.",
                    "Include relevant hashtags.",
                ])
                .build()
        }
        ContentRequest::XThreadFromBlog { content } => {
            Prompt::new("You are an expert at repurposing content. Convert the following blog post/webpage content into a viral X (Twitter) thread.")
                .block("Pasted Blog/Webpage Content", content)
                .instructions()
                .numbered(&[
                    "Create a powerful hook tweet (1/n).",
                    "Break down the key points of the content into a thread of 5-10 tweets.",
                    "Number each tweet (e.g., 1/8, 2/8).",
                    "Use emojis and simple language.",
                    "End with a concluding tweet and a call to action.",
                ])
                .build()
        }
        ContentRequest::XThreadFromTheme { theme, tone } => {
            Prompt::new("You are a skilled X (Twitter) writer. Create a compelling thread based on a theme.")
                .field("Theme", theme)
                .field("Tone", tone)
                .instructions()
                .numbered(&[
                    "Write a strong hook tweet (1/n).",
                    "Develop the theme across 5-8 tweets.",
                    "Provide value, insights, or a story.",
                    "Number each tweet and use relevant hashtags.",
                ])
                .build()
        }
        ContentRequest::SocialMediaPoll { question, platform } => {
            Prompt::new("You are an engaging social media manager. Create a poll for LinkedIn or X.")
                .field("Topic/Question", question)
                .field("Platform", platform)
                .instructions()
                .numbered(&[
                    "Write a brief, engaging intro for the poll.",
                    "Provide 2-4 clear, concise poll options.",
                    "Format it clearly, separating the intro from the options.",
                ])
                .build()
        }
        ContentRequest::SocialMediaPageIntroduction { name, notes, platform } => {
            Prompt::new("Write a compelling introduction or bio for a social media page.")
                .field("Business/Person Name", name)
                .block("Key Information/Notes", notes)
                .field("Platform", platform)
                .instructions()
                .numbered(&[
                    "Concisely describe who you are and what you do.",
                    "Highlight your value proposition.",
                    "Include a call to action (e.g., \"Follow for tips,\" \"Visit our site\").",
                    "Keep it within the character limits of the specified platform.",
                ])
                .build()
        }
        ContentRequest::SocialPostWithQuote { author, quote, commentary, platform } => {
            Prompt::new("You are a social media content creator. Create a post centered around a quote.")
                .field("Quote by", author)
                .block("Pasted Quote", quote)
                .field("Your Commentary/Context", commentary)
                .field("Platform", platform)
                .instructions()
                .numbered(&[
                    "Present the quote clearly.",
                    "Add your own commentary to provide context or a related insight.",
                    "Include relevant hashtags.",
                ])
                .build()
        }
        ContentRequest::Memes { topic, audience } => {
            Prompt::new("You are a witty, meme-savvy marketer. Generate 3 meme ideas for a specific topic.")
                .field("Topic", topic)
                .field("Target Audience", audience)
                .instructions()
                .line("For each idea, provide:")
                .numbered(&[
                    "**Meme Format:** (e.g., \"Drakeposting,\" \"Distracted Boyfriend\").",
                    "**Top Text/Caption:** The text that goes with the meme.",
                    "**Context:** A brief explanation of why it's funny or relevant to the audience.",
                ])
                .line("Format the output clearly for each of the 3 ideas.")
                .build()
        }
        ContentRequest::RepurposeContent { content, target_format, tone } => {
            Prompt::new("You are an expert content strategist. Repurpose the following text into a different format.")
                .block("Original Content", content)
                .field(
                    "Desired New Format",
                    &format!("{target_format} (e.g., LinkedIn Article, Email Newsletter, Key Takeaways for a Video)"),
                )
                .field("Tone", tone)
                .instructions()
                .numbered(&[
                    "Analyze the original content and extract the core message.",
                    "Rewrite and restructure it for the desired new format.",
                    "Adapt the tone and style appropriately.",
                    "Output the repurposed content in well-formatted Markdown.",
                ])
                .build()
        }
        ContentRequest::SummarizeText { text, format } => Prompt::new("Summarize the following text concisely.")
            .block("Original Text", text)
            .field(
                "Desired Format",
                &format!("{format} (e.g., \"a short paragraph\" or \"5 bullet points\")"),
            )
            .instructions()
            .line("Extract the most important points and present them in the desired format.")
            .build(),
        ContentRequest::SummaryFromNotes { notes, format } => {
            Prompt::new("Create a cohesive summary from the following notes.")
                .block("Notes", notes)
                .field(
                    "Desired Format",
                    &format!("{format} (e.g., \"a paragraph\" or \"bullet points\")"),
                )
                .instructions()
                .line("Synthesize the notes into a coherent summary in the specified format.")
                .build()
        }
        ContentRequest::AidaCopy { product, audience } => copy_framework(
            "AIDA (Attention, Interest, Desire, Action)",
            product,
            audience,
            "four",
            &[
                "**Attention:** A powerful hook.",
                "**Interest:** Engaging details and benefits.",
                "**Desire:** Create an emotional connection and longing.",
                "**Action:** A clear and compelling call to action.",
            ],
        ),
        ContentRequest::BabCopy { product, audience } => copy_framework(
            "BAB (Before-After-Bridge)",
            product,
            audience,
            "three",
            &[
                "**Before:** Describe the customer's problem or pain point.",
                "**After:** Paint a picture of their life after using your product.",
                "**Bridge:** Explain how your product is the bridge to get them there.",
            ],
        ),
        ContentRequest::PasCopy { product, audience } => copy_framework(
            "PAS (Problem-Agitate-Solution)",
            product,
            audience,
            "three",
            &[
                "**Problem:** State the customer's problem.",
                "**Agitate:** Agitate the problem, making them feel the pain more acutely.",
                "**Solution:** Present your product as the perfect solution.",
            ],
        ),
        ContentRequest::ProductDescription { product_name, features, tone } => {
            Prompt::new("Write a compelling product description.")
                .field("Product Name", product_name)
                .block("Features/Notes", features)
                .field("Tone", tone)
                .instructions()
                .numbered(&[
                    "Start with a captivating hook.",
                    "Translate features into benefits for the customer.",
                    "Use bullet points for readability.",
                    "End with a persuasive closing statement.",
                ])
                .build()
        }
        ContentRequest::PropertyDescription { property, features, tone } => {
            Prompt::new("You are a real estate copywriter. Write an enticing property description.")
                .field("Property Address/Type", property)
                .block("Key Features (beds, baths, sqft, amenities)", features)
                .field("Tone", tone)
                .instructions()
                .numbered(&[
                    "Create an attention-grabbing headline.",
                    "Write a narrative that helps potential buyers envision living there.",
                    "Highlight the most desirable features and benefits.",
                    "End with a clear call to action (e.g., \"Schedule your private tour today!\").",
                ])
                .build()
        }
        ContentRequest::VideoDescription { title, keywords, tone } => {
            Prompt::new("Write an SEO-optimized video description.")
                .field("Video Title", title)
                .field("Keywords", keywords)
                .field("Tone", tone)
                .instructions()
                .numbered(&[
                    "Write a 2-3 sentence summary of the video.",
                    "Naturally include the keywords.",
                    "Add relevant links (e.g., to your website, social media).",
                    "Include 5-10 relevant hashtags.",
                ])
                .build()
        }
        ContentRequest::WebpageCopy { page_goal, key_points, tone } => {
            Prompt::new("Write compelling copy for a webpage or landing page.")
                .field("Page Topic/Goal", page_goal)
                .block("Key Points to Include", key_points)
                .field("Tone", tone)
                .instructions()
                .numbered(&[
                    "Write a clear and powerful headline (H1).",
                    "Develop a persuasive introductory paragraph.",
                    "Create subheadings (H2, H3) with benefit-driven body copy.",
                    "Weave in a clear call-to-action throughout.",
                    "Output as well-formatted Markdown.",
                ])
                .build()
        }
        ContentRequest::EventPromotionPage { event, audience, details, goal } => {
            Prompt::new("You are a professional copywriter specializing in event marketing. Write compelling copy for an event promotion page.")
                .field("Event Name/Topic", event)
                .field("Target Audience", audience)
                .block("Key Details (Date, Time, Venue, Price)", details)
                .field("Goal", goal)
                .instructions()
                .numbered(&[
                    "Create a powerful headline.",
                    "Write an engaging introduction to what the event is about.",
                    "Detail the key benefits for attendees.",
                    "Include a clear and urgent call to action.",
                    "Format as well-structured Markdown.",
                ])
                .build()
        }
        ContentRequest::LocalBusinessDescription { business_name, services, key_info } => {
            Prompt::new("Write a friendly and inviting description for a local business.")
                .field("Business Name", business_name)
                .field("Business Type/Services", services)
                .block("Key Information (Address, Hours, Unique Selling Points)", key_info)
                .instructions()
                .numbered(&[
                    "Write a warm and welcoming description.",
                    "Highlight what makes the business unique.",
                    "Include a call to action (e.g., \"Visit us today!\").",
                ])
                .build()
        }
        ContentRequest::EventDescription { event_name, details, tone } => {
            Prompt::new("Write a concise and exciting description for an event listing.")
                .field("Event Name", event_name)
                .block("Key Details", details)
                .field("Tone", tone)
                .instructions()
                .numbered(&[
                    "Summarize the event in a compelling way.",
                    "Highlight the key activities or speakers.",
                    "Keep it brief and engaging for listings like Eventbrite or Facebook Events.",
                ])
                .build()
        }
        ContentRequest::JobDescription { job_title, responsibilities, company } => {
            Prompt::new("You are a professional recruiter. Write a clear, inclusive, and appealing job description.")
                .field("Job Title", job_title)
                .block("Key Responsibilities & Requirements", responsibilities)
                .field("Company Information", company)
                .instructions()
                .numbered(&[
                    "Start with a compelling summary of the role.",
                    "Clearly list responsibilities and qualifications using bullet points.",
                    "Include a section about the company culture and benefits.",
                    "End with instructions on how to apply.",
                    "Use inclusive language.",
                ])
                .build()
        }
        ContentRequest::ColdOutreachEmail { offering, recipient, email_goal } => {
            Prompt::new("Write a personalized cold outreach email.")
                .field("My Product/Service", offering)
                .field("Recipient's Role/Company", recipient)
                .field("Goal of Email", email_goal)
                .instructions()
                .numbered(&[
                    "Write a compelling and non-generic subject line.",
                    "Personalize the opening line based on the recipient's role.",
                    "Clearly and concisely state your value proposition.",
                    "End with a low-friction call to action (e.g., asking for a brief call, not a sale).",
                ])
                .build()
        }
        ContentRequest::PromotionEmail { promotion, audience, tone } => {
            Prompt::new("Write a marketing email for a promotion or offer.")
                .field("Promotion Details", promotion)
                .field("Target Audience", audience)
                .field("Tone", tone)
                .instructions()
                .numbered(&[
                    "Create a click-worthy subject line.",
                    "Clearly state the offer in the email body.",
                    "Highlight the benefits for the customer.",
                    "Include a clear call-to-action button text (e.g., \"Shop Now & Save 25%\").",
                    "Add a sense of urgency (e.g., \"Offer ends Friday!\").",
                ])
                .build()
        }
        ContentRequest::SalesEmailSequence { product, prospect, email_count, goal } => {
            Prompt::new("You are a sales expert. Create a sequence of sales emails.")
                .field("Product/Service", product)
                .field("Target Prospect", prospect)
                .field("Number of Emails in Sequence", email_count)
                .field("Goal", goal)
                .instructions()
                .numbered(&[
                    format!("Create a sequence of {email_count} emails (e.g., Intro, Follow-up, Breakup).").as_str(),
                    "Each email should have a clear subject line and call to action.",
                    "The tone should be professional and value-driven.",
                    "Format the output clearly, separating each email.",
                ])
                .build()
        }
        ContentRequest::EmailSubjectLine { topic, audience } => {
            Prompt::new("Generate 10 compelling email subject lines.")
                .field("Email Content/Topic", topic)
                .field("Target Audience", audience)
                .instructions()
                .numbered(&[
                    "Create a variety of subject lines (e.g., curiosity-driven, urgent, benefit-oriented).",
                    "Keep them short and mobile-friendly.",
                    "Output as a numbered list.",
                ])
                .build()
        }
        ContentRequest::EmailFromOutline { outline, audience, tone } => {
            Prompt::new("Write a complete email based on the provided outline.")
                .block("Email Outline", outline)
                .field("Audience", audience)
                .field("Tone", tone)
                .instructions()
                .numbered(&[
                    "Flesh out each point in the outline into full sentences.",
                    "Ensure a logical flow and a clear call to action.",
                    "Write a compelling subject line.",
                    "Output the full email text.",
                ])
                .build()
        }
        ContentRequest::Newsletter { topics, audience, tone } => {
            Prompt::new("You are a newsletter editor. Create content for a newsletter.")
                .block("Newsletter Theme/Topics", topics)
                .field("Audience", audience)
                .field("Tone", tone)
                .instructions()
                .numbered(&[
                    "Write a catchy subject line.",
                    "Create a brief, engaging introduction.",
                    "For each topic, write a short blurb (2-3 sentences) with a \"Read More\" link placeholder.",
                    "Conclude with a final thought or call to action.",
                ])
                .build()
        }
        ContentRequest::EventPromotionEmail { event, audience, tone } => {
            Prompt::new("Write an email to promote an upcoming event.")
                .field("Event Details", event)
                .field("Target Audience", audience)
                .field("Tone", tone)
                .instructions()
                .numbered(&[
                    "Craft an exciting subject line.",
                    "Clearly state the event's value proposition.",
                    "Include key details (date, time, location/link).",
                    "Have a clear call to action to register or learn more.",
                ])
                .build()
        }
        ContentRequest::VideoScript { topic, tone, duration_minutes, hosts } => {
            Prompt::new("Write a script for a video.")
                .field("Topic", topic)
                .field("Tone", tone)
                .field("Desired Duration (in minutes)", duration_minutes)
                .field("Number of Hosts", hosts)
                .instructions()
                .numbered(&[
                    "Start with a strong hook.",
                    "Structure the script with clear sections (Intro, Main Points, Outro).",
                    "Write conversational dialogue for the specified number of hosts.",
                    "Include visual cues or on-screen text suggestions in parentheses (e.g., \"(Show B-roll of...)\").",
                    "End with a clear call to action.",
                ])
                .build()
        }
        ContentRequest::GoogleAdCopy { product, keywords } => {
            Prompt::new("You are a Google Ads expert. Write ad copy for a product/service.")
                .field("Product/Service", product)
                .field("Keywords to Target", keywords)
                .instructions()
                .line("Generate 3 variations of Google Ad copy. For each variation, provide:")
                .bullets(&[
                    "**Headline 1 (30 chars max):**",
                    "**Headline 2 (30 chars max):**",
                    "**Headline 3 (30 chars max):**",
                    "**Description 1 (90 chars max):**",
                    "**Description 2 (90 chars max):**",
                ])
                .line("Ensure the copy is compelling and includes a strong call to action.")
                .build()
        }
        ContentRequest::InstagramFacebookAdCopy { product, audience, tone } => {
            Prompt::new("You are a social media ads specialist. Write ad copy for Instagram or Facebook.")
                .field("Product/Service", product)
                .field("Target Audience", audience)
                .field("Tone", tone)
                .instructions()
                .numbered(&[
                    "**Primary Text:** Write compelling copy that stops the scroll and highlights benefits.",
                    "**Headline:** Create a short, punchy headline.",
                    "**Call to Action:** Suggest a CTA button (e.g., \"Shop Now,\" \"Learn More\").",
                ])
                .line("Provide 2-3 variations.")
                .build()
        }
        ContentRequest::LinkedinAdCopy { product, audience, tone } => {
            Prompt::new("You are a B2B ad specialist. Write ad copy for LinkedIn.")
                .field("Product/Service", product)
                .field("Target Audience", audience)
                .field("Tone", tone)
                .instructions()
                .numbered(&[
                    "**Introductory Text:** Write professional copy that highlights a pain point or benefit.",
                    "**Headline:** Create a concise, powerful headline.",
                    "**Call to Action:** Suggest a CTA button (e.g., \"Request a Demo,\" \"Download Whitepaper\").",
                    "Provide 2-3 variations.",
                ])
                .build()
        }
        ContentRequest::ShortAdCopy { product, key_benefit } => {
            Prompt::new("Write 5 short, punchy ad copy variations (under 15 words).")
                .field("Product/Service", product)
                .field("Key Benefit", key_benefit)
                .instructions()
                .line("Focus on being concise, benefit-driven, and creating a strong hook. Output as a numbered list.")
                .build()
        }
        ContentRequest::ClassifiedsAd { item, details } => Prompt::new("Write a classifieds ad.")
            .field("Item/Service for Sale", item)
            .block("Details (Condition, Price, Location)", details)
            .instructions()
            .numbered(&[
                "Create a clear and descriptive title.",
                "Write a concise body with all necessary details.",
                "Include contact information or next steps.",
            ])
            .build(),
        ContentRequest::TranslateText { text, language } => Prompt::new("Translate the following text.")
            .block("Text to Translate", text)
            .field("Translate to (Language)", language)
            .field("Instructions", "Provide only the translated text as the output.")
            .build(),
        ContentRequest::PressRelease { announcement, company } => {
            Prompt::new("You are a PR professional. Write a press release based on the following information.")
                .block("Announcement/Key Information", announcement)
                .field("Company", company)
                .instructions()
                .line("Follow standard press release format:")
                .bullets(&[
                    "FOR IMMEDIATE RELEASE",
                    "Compelling Headline",
                    "Dateline (City, State – Date)",
                    "Introduction (who, what, when, where, why)",
                    "Body paragraphs with more details and a quote.",
                    "Boilerplate about the company.",
                    "Media Contact information.",
                    "### (at the end).",
                ])
                .build()
        }
        ContentRequest::CustomerCaseStudy { customer, product, notes } => {
            Prompt::new("You are a marketing writer. Create a customer case study from the provided notes.")
                .field("Customer Name", customer)
                .field("Product/Service Used", product)
                .block("Notes (Problem, Solution, Results)", notes)
                .instructions()
                .line("Structure the case study with the following sections:")
                .bullets(&[
                    "A compelling headline.",
                    "**The Challenge:** Describe the customer's problem.",
                    "**The Solution:** Explain how your product/service helped.",
                    "**The Results:** Showcase the positive outcomes with data if possible.",
                    "Include a customer quote.",
                ])
                .build()
        }
        ContentRequest::Headlines { topic, audience } => {
            Prompt::new("Generate 10 compelling headlines for the following topic.")
                .field("Topic/Product", topic)
                .field("Target Audience", audience)
                .instructions()
                .line("Create a variety of headlines (e.g., question-based, benefit-driven, controversial).")
                .line("Output as a numbered list.")
                .build()
        }
        ContentRequest::Ctas { context } => {
            Prompt::new("Generate 10 clear and compelling Call to Actions (CTAs).")
                .field("Context/Goal", context)
                .instructions()
                .line("Create a list of 10 varied CTAs. They can be for buttons, links, or email closers.")
                .line("Output as a numbered list.")
                .build()
        }
        ContentRequest::CopyInBullets { notes } => {
            Prompt::new("Convert the following notes or paragraph into a compelling bulleted list for use in marketing copy.")
                .block("Notes/Paragraph", notes)
                .instructions()
                .bullets(&[
                    "Transform features into benefits.",
                    "Start each bullet with a strong action verb.",
                    "Keep bullets concise and scannable.",
                ])
                .build()
        }
        ContentRequest::Brochure { business, key_info, tone } => {
            Prompt::new("Write the copy for a tri-fold brochure.")
                .field("Product/Business", business)
                .block("Key Information", key_info)
                .field("Tone", tone)
                .instructions()
                .line("Structure the copy for a tri-fold layout:")
                .bullets(&[
                    "**Front Panel:** Company name, logo, and tagline.",
                    "**Inside Flap:** Introduction or key problem.",
                    "**Inside Middle & Right Panels:** Detailed information, features, and benefits.",
                    "**Back Panel:** About Us, contact information, and call to action.",
                ])
                .build()
        }
        ContentRequest::ProductBusinessNames { concept, keywords } => {
            Prompt::new("You are a branding expert. Generate 10 creative name ideas.")
                .block("Product/Business Concept", concept)
                .field("Keywords to consider", keywords)
                .instructions()
                .line("Provide a list of 10 unique and memorable names. Add a brief rationale for your top 3 choices.")
                .build()
        }
        ContentRequest::WebpageOutline { page_goal, key_info } => {
            Prompt::new("You are a UX copywriter and information architect. Create a logical outline for a webpage or landing page.")
                .field("Page Topic/Goal", page_goal)
                .block("Key Information to Include", key_info)
                .instructions()
                .bullets(&[
                    "Structure the outline with clear section headings (e.g., Hero, Features, Social Proof, CTA).",
                    "For each section, list the key messages and content elements.",
                    "Output as a Markdown list.",
                ])
                .build()
        }
        ContentRequest::RealEstateBrochure { property, features, tone } => {
            Prompt::new("You are a luxury real estate marketer. Write the copy for a high-end property brochure.")
                .field("Property Address/Type", property)
                .block("Key Features & Amenities", features)
                .field("Tone", tone)
                .instructions()
                .numbered(&[
                    "Create an elegant and evocative headline.",
                    "Write a compelling narrative that tells a story about the lifestyle.",
                    "Use descriptive and aspirational language to describe features.",
                    "Structure copy for different sections (e.g., The Residence, The Amenities, The Neighborhood).",
                ])
                .build()
        }
        ContentRequest::Poem { theme, style } => Prompt::new("Write a poem on the given topic.")
            .field("Topic/Theme", theme)
            .field("Style/Tone", style)
            .instructions()
            .line("Create a poem that captures the essence of the topic in the desired style.")
            .build(),
        ContentRequest::AiTopicGenerator { theme } => {
            Prompt::new("You are an expert content strategist. Generate a list of 10-15 engaging and SEO-friendly topic ideas based on the following theme.")
                .blank()
                .field("Theme", theme)
                .blank()
                .field("Output Format", "A Markdown numbered list of topic ideas.")
                .build()
        }
        ContentRequest::LongBlogFromUrlDoc { reference, tone, word_count } => {
            Prompt::new("You are an expert writer and researcher. Synthesize the provided reference material into a coherent, original, and well-structured long-form blog post.")
                .blank()
                .block("Reference Material", reference)
                .blank()
                .field("Desired Tone", tone)
                .field("Target Word Count", &format!("~{word_count} words"))
                .blank()
                .instructions()
                .numbered(&[
                    "Do not plagiarize. Extract key ideas and rephrase them in your own words.",
                    "Create a logical structure with an introduction, body (H2/H3 headings), and conclusion.",
                    "Ensure the final article is high-quality, readable, and engaging.",
                    "Output as a single, complete Markdown document.",
                ])
                .build()
        }
        ContentRequest::ShortBlogArticle { topic, tone } => {
            Prompt::new("Generate a concise and engaging blog post (600-900 words) suitable for a quick read.")
                .blank()
                .field("Topic", topic)
                .field("Tone", tone)
                .blank()
                .instructions()
                .numbered(&[
                    "Write a clear introduction, a few body paragraphs, and a conclusion.",
                    "Focus on providing actionable insights.",
                    "Output as well-formatted Markdown.",
                ])
                .build()
        }
        ContentRequest::BlogPostOutline { title } => {
            Prompt::new("You are an SEO and content structure expert. Create a logical and detailed outline for a blog post based on the given title.")
                .blank()
                .field("Blog Title", title)
                .blank()
                .instructions()
                .bullets(&[
                    "Create a structure using H1 for the title, and multiple H2s and H3s for the main sections and sub-points.",
                    "The outline should be comprehensive and guide a writer to create a well-structured article.",
                    "Output as a Markdown list.",
                ])
                .build()
        }
        ContentRequest::BlogPostIntroduction { title, audience, tone } => blog_paragraph(
            "Write a compelling and engaging introduction paragraph for a blog post.",
            title,
            audience,
            tone,
            &[
                "Hook the reader immediately.",
                "Clearly state the article's purpose.",
                "Keep it between 100-150 words.",
                "Output the paragraph directly.",
            ],
        ),
        ContentRequest::ContentImprover { text, tone } => {
            Prompt::new("You are an expert editor. Improve the following text for clarity, structure, grammar, and style, while rewriting it in the specified tone.")
                .blank()
                .block("Original Text", text)
                .blank()
                .field("Desired Tone", tone)
                .blank()
                .field("Output", "The improved and polished version of the text.")
                .build()
        }
        ContentRequest::ParaphraseRewrite { text } => rewrite_text(
            "Rewrite and paraphrase the following text. The goal is to make it sound completely original while preserving the core meaning.",
            text,
            "The rewritten version of the text.",
        ),
        ContentRequest::BlogSectionalContent { subheading, context, tone } => {
            Prompt::new("Write a detailed and informative blog section for the given subheading.")
                .blank()
                .field("Section Subheading/Topic", subheading)
                .field("Broader Article Context", context)
                .field("Tone", tone)
                .blank()
                .instructions()
                .bullets(&[
                    "Write 2-3 paragraphs.",
                    "Provide explanations, examples, or supporting points.",
                    "Ensure the content is self-contained but fits the given context.",
                    "Output as Markdown.",
                ])
                .build()
        }
        ContentRequest::BlogArticleFromOutline { outline, topic, tone } => {
            Prompt::new("You are a skilled writer. Expand the following outline into a complete, well-written blog article.")
                .blank()
                .block("Article Outline", outline)
                .blank()
                .field("Article Topic", topic)
                .field("Tone", tone)
                .blank()
                .instructions()
                .bullets(&[
                    "Flesh out each point in the outline into full paragraphs.",
                    "Ensure smooth transitions between sections.",
                    "Write an introduction and conclusion if not specified in the outline.",
                    "Output as a complete Markdown article.",
                ])
                .build()
        }
        ContentRequest::FaqGenerator { topic } => {
            Prompt::new("Generate a list of frequently asked questions (FAQs) with clear, concise answers for the given topic, product, or service.")
                .blank()
                .field("Topic/Product/Service", topic)
                .blank()
                .instructions()
                .bullets(&[
                    "Identify 5-7 common user questions.",
                    "Provide helpful and direct answers.",
                    "Format the output as a list of questions and answers in Markdown (e.g., using bold for questions).",
                ])
                .build()
        }
        ContentRequest::QaGenerator { question } => {
            Prompt::new("Provide a clear, factual, and concise answer to the following question.")
                .blank()
                .quoted("Question", question)
                .blank()
                .field("Output", "A direct answer to the question.")
                .build()
        }
        ContentRequest::BlogPostConclusion { title, audience, tone } => blog_paragraph(
            "Write a strong and effective conclusion paragraph for a blog post.",
            title,
            audience,
            tone,
            &[
                "Summarize the key takeaways.",
                "Provide a final thought or call-to-action.",
                "Keep it between 100-150 words.",
                "Output the paragraph directly.",
            ],
        ),
        ContentRequest::ParagraphsToBullets { text } => rewrite_text(
            "Convert the following paragraph(s) into a concise, easy-to-read bulleted list. Extract the main points.",
            text,
            "A Markdown bulleted list.",
        ),
        ContentRequest::SentenceExpander { sentence, tone } => {
            Prompt::new("Expand the following short sentence into a more detailed and descriptive paragraph.")
                .blank()
                .quoted("Sentence", sentence)
                .field("Tone", tone)
                .blank()
                .instructions()
                .bullets(&[
                    "Add context, examples, and explanations.",
                    "Maintain the specified tone.",
                    "Output a single, well-formed paragraph.",
                ])
                .build()
        }
        ContentRequest::SeoMetaDescription { page_title, keywords } => {
            Prompt::new("Write a compelling, SEO-friendly meta description (120-160 characters) for a web page.")
                .blank()
                .field("Page Title/Topic", page_title)
                .field("Primary Keywords", keywords)
                .blank()
                .instructions()
                .bullets(&[
                    "Include the primary keywords naturally.",
                    "Create a hook to encourage clicks from SERPs.",
                    "Adhere to the character limit.",
                ])
                .build()
        }
        ContentRequest::CorrectSpellingGrammar { text } => rewrite_text(
            "Correct all spelling, grammar, and punctuation errors in the following text. Do not change the meaning.",
            text,
            "The corrected text.",
        ),
        ContentRequest::SimplifyText { text } => rewrite_text(
            "Rewrite the following text to make it simpler and easier to understand. Use clearer vocabulary and shorter sentences.",
            text,
            "The simplified version of the text.",
        ),
        ContentRequest::SearchKeywords { theme, industry, audience } => {
            Prompt::new("You are an SEO expert. Generate a list of relevant keywords for the given theme.")
                .blank()
                .field("Theme/Product/Service", theme)
                .field("Industry", industry)
                .field("Target Audience", audience)
                .blank()
                .instructions()
                .bullets(&[
                    "Provide a list of 5-7 Primary Keywords.",
                    "Provide a list of 10-15 Secondary/Long-tail Keywords.",
                    "Provide a list of 5-7 LSI (Latent Semantic Indexing) Keywords.",
                    "Format the output clearly using Markdown headings.",
                ])
                .build()
        }
    }
}

fn blog_post_from_brief(
    title: &str,
    keywords: &str,
    tone: &str,
    outline: &str,
    word_count: u32,
) -> String {
    let WordCountBand { low, high, .. } = WordCountBand::around(word_count);

    Prompt::new("You are an expert content writer. Your task is to write a blog article that strictly follows all instructions.")
        .blank()
        .line("**PRIMARY GOAL: WORD COUNT**")
        .line(&format!(
            "This is your most important instruction. The final article body MUST be between **{low} and {high} words**. This is a non-negotiable requirement. Adjust content depth to fit these constraints precisely. Failure to meet this word count will result in an unsuccessful task."
        ))
        .blank()
        .field("Blog Title", title)
        .field("Keywords to include", keywords)
        .field("Tone of Voice", tone)
        .blank()
        .fenced("Content Outline", "markdown", outline)
        .blank()
        .instructions()
        .numbered(&[
            format!("**Word Count:** The absolute priority is to ensure the final output is between {low} and {high} words.").as_str(),
            "**Outline:** Follow the provided outline strictly. Do not add, remove, or reorder sections.",
            "**Keywords:** Integrate the specified keywords naturally.",
            format!("**Tone:** Write in a {tone} tone.").as_str(),
            "**Image Placeholders:** Strategically place 2-3 relevant image placeholders within the content. Each placeholder must be on its own line and formatted as: `[A descriptive prompt for an AI image generator]`. For example: `[A happy customer unboxing a beautifully packaged product from an online store.]`.",
            "**Output:** Provide ONLY the complete article body in well-formatted Markdown. Do not include the H1 title or any other text before or after the article.",
        ])
        .build()
}

fn copy_framework(
    framework: &str,
    product: &str,
    audience: &str,
    section_count: &str,
    sections: &[&str],
) -> String {
    Prompt::new(&format!(
        "You are an expert copywriter. Write copy for the following product/service using the {framework} framework."
    ))
    .field("Product/Service", product)
    .field("Target Audience", audience)
    .instructions()
    .line(&format!(
        "Structure your response with {section_count} sections, clearly labeled:"
    ))
    .bullets(sections)
    .build()
}

fn blog_paragraph(intro: &str, title: &str, audience: &str, tone: &str, rules: &[&str]) -> String {
    Prompt::new(intro)
        .blank()
        .field("Blog Title", title)
        .field("Target Audience", audience)
        .field("Tone", tone)
        .blank()
        .instructions()
        .bullets(rules)
        .build()
}

fn rewrite_text(intro: &str, text: &str, output: &str) -> String {
    Prompt::new(intro)
        .blank()
        .block("Original Text", text)
        .blank()
        .field("Output", output)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots() -> SlotValues {
        SlotValues::new(
            "Sustainable sneakers",
            "Gen Z shoppers",
            "Witty",
            r###"{"outline":"## Why it matters","wordCount":"1500"}"###,
        )
    }

    #[test]
    fn band_is_ten_percent_either_side() {
        assert_eq!(
            WordCountBand::around(1500),
            WordCountBand { target: 1500, low: 1350, high: 1650 }
        );
        let band = WordCountBand::around(1234);
        assert_eq!((band.low, band.high), (1111, 1357));
    }

    #[test]
    fn every_request_renders_a_non_empty_prompt() {
        for content_type in ContentType::ALL {
            let request = ContentRequest::from_slots(*content_type, &slots()).unwrap();
            let prompt = request.prompt();
            assert!(!prompt.trim().is_empty(), "{content_type} rendered empty");
        }
    }

    #[test]
    fn repurpose_prompt_carries_named_inputs() {
        let prompt = ContentRequest::RepurposeContent {
            content: "Our Q3 webinar recap".to_string(),
            target_format: "Email Newsletter".to_string(),
            tone: "Friendly".to_string(),
        }
        .prompt();
        assert!(prompt.contains("**Original Content:**\n```\nOur Q3 webinar recap\n```"));
        assert!(prompt.contains("**Desired New Format:** Email Newsletter (e.g., LinkedIn Article"));
        assert!(prompt.contains("**Tone:** Friendly"));
    }

    #[test]
    fn brief_prompt_states_word_count_band() {
        let prompt = build_prompt(
            "Blog Post from Brief",
            "Ten SEO myths",
            "seo, myths",
            "Friendly",
            r###"{"outline":"## Myth one","wordCount":"1500"}"###,
        );
        assert!(prompt.contains("**PRIMARY GOAL: WORD COUNT**"));
        assert!(prompt.contains("between **1350 and 1650 words**"));
        assert!(prompt.contains("```markdown\n## Myth one\n```"));
        assert!(prompt.contains("**Tone:** Write in a Friendly tone."));
    }

    #[test]
    fn brief_prompt_defaults_word_count() {
        let prompt = build_prompt(
            "Blog Post from Brief",
            "Title",
            "kw",
            "Bold",
            r#"{"outline":"- a"}"#,
        );
        assert!(prompt.contains("between **1350 and 1650 words**"));
    }

    #[test]
    fn unknown_label_falls_back_to_topic_prompt() {
        let prompt = build_prompt("Haiku", "Autumn launch", "", "", "");
        assert_eq!(prompt, "Generate content for topic: Autumn launch");
    }

    #[test]
    fn malformed_brief_payload_falls_back_without_panicking() {
        let prompt = build_prompt("Blog Post from Brief", "Title", "", "", "{oops");
        assert_eq!(prompt, "Generate content for topic: Title");
    }

    #[test]
    fn non_text_types_are_unsupported() {
        for label in [
            "Blog Brief and Outline",
            "Speech Generation (TTS)",
            "AI Image Editing",
        ] {
            assert_eq!(build_prompt(label, "x", "", "", ""), UNSUPPORTED_CONTENT_TYPE);
        }
    }

    #[test]
    fn sales_sequence_repeats_email_count() {
        let prompt = build_prompt("Sales Email Sequence", "CRM", "Founders", "4", "Book demos");
        assert!(prompt.contains("**Number of Emails in Sequence:** 4"));
        assert!(prompt.contains("1.  Create a sequence of 4 emails"));
    }

    #[test]
    fn brief_prompt_quotes_topic() {
        let prompt = blog_brief("Email deliverability");
        assert!(prompt.contains("**Topic:** \"Email deliverability\""));
        assert!(prompt.ends_with("Return the response as a single, minified JSON object."));
    }
}
