//! The blogsmith library turns a company website into an SEO blog post with
//! an internal link plan: it learns about the company, surfaces trending
//! topics, researches keywords, scans the site for link targets, drafts the
//! post, and can repurpose it into short-form social copy.

pub mod blog;
pub mod company;
pub mod constants;
pub mod crawl;
pub mod fetch;
pub mod inventory;
pub mod keywords;
pub mod llm;
pub mod page;
pub mod repurpose;
pub mod sitemap;
pub mod trends;

/// Enum representing the anchor text style for internal links.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum AnchorStyle {
    /// Anchors read as natural phrases inside the sentence.
    #[default]
    Natural,
    /// Anchors are exact match keywords.
    ExactMatch,
    /// A mix of natural phrases and exact match keywords.
    Mix,
}

impl AnchorStyle {
    /// Phrase used for this style inside the generation prompt.
    pub fn as_prompt(&self) -> &'static str {
        match self {
            AnchorStyle::Natural => "Natural phrases",
            AnchorStyle::ExactMatch => "Exact match keywords",
            AnchorStyle::Mix => "A mix of natural phrases and exact match keywords",
        }
    }
}

impl std::str::FromStr for AnchorStyle {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "natural" => Ok(AnchorStyle::Natural),
            "exact" => Ok(AnchorStyle::ExactMatch),
            "mix" => Ok(AnchorStyle::Mix),
            _ => Err(format!("Invalid anchor style: {}", input)),
        }
    }
}

/// Enum representing the requested blog length.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum WordRange {
    /// Less than 400 words.
    Under400,
    /// Between 400 and 600 words.
    Medium400,
    /// Between 600 and 800 words.
    #[default]
    Medium600,
    /// Between 800 and 1000 words.
    Medium800,
    /// More than 1000 words.
    Over1000,
}

impl WordRange {
    /// Expanded length instruction used inside the generation prompt.
    pub fn as_spec(&self) -> &'static str {
        match self {
            WordRange::Under400 => "less than 400 words (aim for 300-399)",
            WordRange::Medium400 => "between 400 and 600 words",
            WordRange::Medium600 => "between 600 and 800 words",
            WordRange::Medium800 => "between 800 and 1000 words",
            WordRange::Over1000 => "more than 1000 words (aim for 1000-1300)",
        }
    }
}

impl std::str::FromStr for WordRange {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "<400" => Ok(WordRange::Under400),
            "400-600" => Ok(WordRange::Medium400),
            "600-800" => Ok(WordRange::Medium600),
            "800-1000" => Ok(WordRange::Medium800),
            ">1000" => Ok(WordRange::Over1000),
            _ => Err(format!("Invalid word range: {}", input)),
        }
    }
}

pub use blog::{BlogPost, BlogRequest, InternalLink, generate_blog};
pub use inventory::{InventoryCache, InventoryKey, build_site_inventory};
pub use page::PageRecord;
pub use repurpose::repurpose_blog;
pub use trends::TrendSignals;
