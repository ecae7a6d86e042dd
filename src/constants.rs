pub const MODEL_API_KEY_ENV_NAME: &str = "BLOGSMITH_MODEL_API_KEY";

pub(crate) const THINK_STRIPPER: &str = r"<think>[\s\S]*</think>\s*";

/// Identifying user agent sent with every outbound request.
pub const USER_AGENT: &str = "Blogsmith Bot";

/// Per-request timeout for robots.txt, sitemap and page fetches.
pub const FETCH_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_MAX_PAGES: usize = 80;

/// Pause between successive crawl requests against the target host.
pub const DEFAULT_CRAWL_DELAY_MS: u64 = 400;

/// URL substrings that mark likely high-intent pages. Pages whose URL
/// contains any of these sort ahead of everything else in the inventory.
pub const PRIORITY_WORDS: &[&str] = &[
    "service", "services", "product", "solutions", "pricing", "features", "case", "contact",
    "about",
];

/// URL substrings skipped during crawling when no excludes are given:
/// machine endpoints, taxonomy archives and transactional pages.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "/wp-json/", "?", "/tag/", "/category/", "/feed/", "/cart", "/account",
];

/// Most inventory records rendered into a generation prompt.
pub(crate) const LINK_CANDIDATE_PROMPT_CAP: usize = 80;

pub(crate) const BLOG_MARKER: &str = "===BLOG===";
pub(crate) const LINKS_MARKER: &str = "===INTERNAL_LINKS_JSON===";

pub(crate) const COMPANY_PROMPT_TEMPLATE: &str = r#"You are reviewing the company's website at: {website}

First, extract and summarize actual visible homepage and top-level content
before drawing conclusions: brand name, tagline, hero section, service or
product descriptions, industries served, and any About Us info.

Base the analysis ONLY on observed on-page content. Do not guess the meaning
of abbreviations in the domain or company name unless clearly supported by
on-page evidence. If uncertain, clearly state that uncertainty.

OUTPUT:
- Company overview (based strictly on visible content)
- Tone of voice
- Writing style
- Brand values
- Services or products offered
- Common vocabulary and messaging"#;

pub(crate) const MANUAL_COMPANY_TEMPLATE: &str = r#"Here is a description of the company and sample content:

"""{description}"""

Use this to understand the company's voice, values, audience, content tone,
style and messaging."#;

pub(crate) const TOPIC_PROMPT_TEMPLATE: &str = r"You are an expert SEO strategist with deep knowledge of current search
trends, seasonality, news cycles and social buzz. Generate 8-12
high-potential, trending blog topics that are relevant right now ({today}).

COMPANY CONTEXT (voice/tone/services to follow):
{company}

SIGNALS TO USE (only these were provided; do not invent others):
{signals}

RESEARCH GUIDANCE
- Lean on current search interest, seasonality, recent news and social
  chatter for the signals above.
- Prefer angles the company can credibly cover; mix fast-moving trends with
  near-evergreen topics that are currently peaking.

OUTPUT RULES
- Return only a clean numbered list of 8-12 topics; no extra text.
- Each topic 6-12 words, compelling but not clickbait.
- Keep on-brand and aligned with the provided signals.";

pub(crate) const KEYWORD_PROMPT_TEMPLATE: &str = r#"You are an SEO expert.

Based on the topic: "{topic}"

Return a list of 5-10 trending, high-interest keywords that are actively
searched, relate to the topic, and can be used for SEO and metadata.
Return just the list. No extra commentary."#;

pub(crate) const BLOG_PROMPT_TEMPLATE: &str = r#"You are a senior SEO editor and brand copywriter. Write like a human, not a bot.

CONTEXT
- Company voice, tone and audience:
{company}
- Topic: {topic}
- Target length: {length}. Allow 10% either way for natural flow.
- Keywords to use NATURALLY (no stuffing; variations allowed):
{keywords}

INTERNAL LINK CANDIDATES (use ONLY these):
{candidates}

WRITING RULES
- Title: compelling, at most 60 characters. One H1 only (as the SEO title).
- Meta description: at most 155 characters, action-oriented.
- Structure: short intro hook; H2 sections with skimmable paragraphs (2-4
  sentences each); bullets or numbered steps where useful.
- Tone: confident, friendly and plain-spoken; active voice; define jargon.
- Do NOT fabricate data, prices, certifications or quotes. No external links.
- End with one strong, specific CTA aligned with the brand and topic.

INTERNAL LINK PLAN
- Suggest {link_count} internal links from the provided inventory only.
- Anchor style: {anchor_style}. Anchors must read naturally inside the
  sentence, placed where contextually helpful (not the first sentence, not
  the H1).
- Prefer high-intent pages (services, key products, pricing, cornerstone
  posts). Avoid duplicate target URLs.
- Each suggestion must name an exact insertion point tied to the content
  (refer to the H2 and paragraph number).
- If no suitable page exists for a concept, skip it; do not invent URLs.

OUTPUT FORMAT (exactly this, no extra text before or after)
===BLOG===
# <SEO Title (H1)>

<meta_description>...</meta_description>

<Body in Markdown with H2/H3, short paragraphs, and a final CTA>

===INTERNAL_LINKS_JSON===
[
  {
    "anchor_text": "natural phrase that appears in the blog",
    "target_url": "https://...",
    "placement_note": "After H2 '...', paragraph 2. Link the phrase '...'.",
    "why": "short note on the value to the reader"
  }
]"#;

pub(crate) const REPURPOSE_PROMPT_TEMPLATE: &str = r#"You are a marketing copywriter creating platform-specific content.
Produce two separate posts based on the blog below.

1. Google Business Profile (GBP) post
- 750 characters or less (including spaces), one paragraph only
- Professional, friendly, local-focused tone with clear urgency and a strong CTA
- No emojis, no hashtags

2. Social media post (Facebook or Instagram)
- 900 characters or less (including spaces)
- Engaging, conversational tone; use emojis naturally
- Short sentences, 3-5 short paragraphs for easy reading
- Include exactly one question to encourage comments
- End with a CTA and 3-5 relevant hashtags

Blog post reference:
"""{blog}"""

Do not copy full sentences from the blog; rewrite concisely and respect the
character limits."#;
