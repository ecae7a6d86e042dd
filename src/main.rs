//! blogsmith is a CLI tool that walks a marketing blog post from a company
//! website to a finished draft with an internal link plan.
//!
//! The tool has four commands:
//! 1. `inventory` - Scan a website and rank its pages as internal link candidates
//! 2. `topics` - Research trending blog topics for a company
//! 3. `blog` - Run the full pipeline and write the post with its link plan
//! 4. `repurpose` - Rewrite a finished post into short-form social copy

use std::fs;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Builder;
use llm::builder::{LLMBackend, LLMBuilder};
use log::{LevelFilter, debug, info, warn};
use url::Url;

use blogsmith::blog::{BlogRequest, generate_blog, render_markdown};
use blogsmith::company::{analyze_company, manual_company_profile};
use blogsmith::constants::{DEFAULT_CRAWL_DELAY_MS, DEFAULT_EXCLUDES, DEFAULT_MAX_PAGES, MODEL_API_KEY_ENV_NAME};
use blogsmith::fetch::HttpClient;
use blogsmith::inventory::{InventoryCache, InventoryKey, build_site_inventory};
use blogsmith::keywords::research_keywords;
use blogsmith::llm::{LlmContext, rpm_limiter};
use blogsmith::repurpose::repurpose_blog;
use blogsmith::trends::{TrendSignals, discover_topics, resolve_topic};
use blogsmith::{AnchorStyle, WordRange};

/// A CLI tool to generate SEO blog posts with an internal link plan
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The command to execute
    #[command(subcommand)]
    command: Command,

    #[arg(long, short, action = clap::ArgAction::Count, help = "Output v(v...)erbosity: error (0), warn (1), info (2), debug (3), trace (4)", global = true, default_value_t = 2)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a website and rank its pages as internal link candidates
    Inventory {
        /// The website root URL to scan
        website: String,
        #[command(flatten)]
        site: SiteArgs,
        /// Print the inventory as JSON instead of a markdown list
        #[arg(long)]
        json: bool,
    },
    /// Research trending blog topics for a company
    Topics(CompanyArgs),
    /// Generate an SEO blog post with an internal link plan
    Blog(BlogArgs),
    /// Rewrite a finished blog post into short-form social copy
    Repurpose {
        /// Path to the blog post markdown file
        blog_file: String,
        /// Model URL, e.g. openai://gpt-4o-mini or ollama://llama3.2
        model: String,
        /// Output file for the repurposed formats
        #[arg(long, short, default_value = "repurposed.md")]
        output: String,
        /// Rate limit: model requests per minute (default: no limit)
        #[arg(long, short = 'r')]
        rpm: Option<u32>,
    },
}

#[derive(Args, Clone)]
struct SiteArgs {
    /// Maximum number of pages to include in the inventory
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: usize,
    /// URL substring to skip during discovery (repeatable; defaults to common non-content paths)
    #[arg(long = "exclude", short = 'x', value_name = "PATTERN")]
    excludes: Vec<String>,
    /// Delay between crawl requests in milliseconds
    #[arg(long, short, default_value_t = DEFAULT_CRAWL_DELAY_MS)]
    delay: u64,
}

impl SiteArgs {
    fn effective_excludes(&self) -> Vec<String> {
        if self.excludes.is_empty() {
            DEFAULT_EXCLUDES.iter().copied().map(str::to_owned).collect()
        } else {
            self.excludes.clone()
        }
    }
}

#[derive(Args, Clone)]
struct SignalArgs {
    /// Industry / niche to research
    #[arg(long)]
    industry: Option<String>,
    /// Primary target audience
    #[arg(long)]
    audience: Option<String>,
    /// Region / market
    #[arg(long)]
    region: Option<String>,
    /// Seasonal or event focus
    #[arg(long)]
    seasonal: Option<String>,
    /// Seed topic to explore
    #[arg(long)]
    seed_topic: Option<String>,
}

impl From<SignalArgs> for TrendSignals {
    fn from(args: SignalArgs) -> Self {
        TrendSignals {
            industry: args.industry,
            audience: args.audience,
            region: args.region,
            seasonal: args.seasonal,
            seed_topic: args.seed_topic,
        }
    }
}

#[derive(Args, Clone)]
struct CompanyArgs {
    /// The company website to learn from
    website: String,
    /// Model URL, e.g. openai://gpt-4o-mini or ollama://llama3.2
    model: String,
    /// Describe the company manually instead of analyzing the website
    #[arg(long)]
    description: Option<String>,
    #[command(flatten)]
    signals: SignalArgs,
    /// Rate limit: model requests per minute (default: no limit)
    #[arg(long, short = 'r')]
    rpm: Option<u32>,
}

#[derive(Args)]
struct BlogArgs {
    #[command(flatten)]
    company: CompanyArgs,
    #[command(flatten)]
    site: SiteArgs,
    /// Topic to write about: a 1-based index into the suggestions or free text (default: first suggestion)
    #[arg(long, short)]
    topic: Option<String>,
    /// Approximate length: "<400", "400-600", "600-800", "800-1000" or ">1000"
    #[arg(long, default_value = "600-800")]
    word_range: WordRange,
    /// Anchor text style for internal links: natural, exact or mix
    #[arg(long, default_value = "natural")]
    anchor_style: AnchorStyle,
    /// How many internal link suggestions to request
    #[arg(long, short = 'n', default_value_t = 5)]
    links: usize,
    /// Output file for the finished post
    #[arg(long, short, default_value = "blog.md")]
    output: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    match cli.command {
        Command::Inventory {
            website,
            site,
            json,
        } => handle_inventory(website, site, json).await,
        Command::Topics(args) => handle_topics(args).await,
        Command::Blog(args) => handle_blog(args).await,
        Command::Repurpose {
            blog_file,
            model,
            output,
            rpm,
        } => handle_repurpose(blog_file, model, output, rpm).await,
    }
}

async fn handle_inventory(website: String, site: SiteArgs, json: bool) -> Result<()> {
    let fetcher = HttpClient::new()?;
    let excludes = site.effective_excludes();
    let inventory = build_site_inventory(
        &fetcher,
        &website,
        site.max_pages,
        &excludes,
        Duration::from_millis(site.delay),
    )
    .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&inventory)?);
        return Ok(());
    }

    info!("{} pages found.", inventory.len());
    for page in &inventory {
        let label = [page.title.as_str(), page.h1.as_str(), page.url.as_str()]
            .into_iter()
            .find(|text| !text.is_empty())
            .unwrap_or(page.url.as_str());
        println!("- {label}\n  {}", page.url);
    }

    Ok(())
}

async fn handle_topics(args: CompanyArgs) -> Result<()> {
    let model = llm_builder_from_url(&args.model)?
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build LLM model: {}", e))?;
    let rate_limiter = rpm_limiter(args.rpm);
    let ctx = LlmContext {
        model: model.as_ref(),
        rate_limiter: rate_limiter.as_ref(),
    };

    let company_info = resolve_company_info(&ctx, &args).await?;
    let topics = discover_topics(&ctx, &company_info, &args.signals.into()).await?;

    if topics.is_empty() {
        warn!("No topics returned. Try adding one more signal (e.g. industry + audience).");
        return Ok(());
    }

    for (position, topic) in topics.iter().enumerate() {
        println!("{}. {topic}", position + 1);
    }

    Ok(())
}

async fn handle_blog(args: BlogArgs) -> Result<()> {
    let model = llm_builder_from_url(&args.company.model)?
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build LLM model: {}", e))?;
    let rate_limiter = rpm_limiter(args.company.rpm);
    let ctx = LlmContext {
        model: model.as_ref(),
        rate_limiter: rate_limiter.as_ref(),
    };

    let company_info = resolve_company_info(&ctx, &args.company).await?;
    info!("Company understanding completed.");

    let fetcher = HttpClient::new()?;
    let cache = InventoryCache::default();
    let key = InventoryKey {
        website: args.company.website.clone(),
        max_pages: args.site.max_pages,
        excludes: args.site.effective_excludes(),
    };
    info!("Scanning {} for internal link targets...", key.website);
    let inventory = cache
        .get_or_build(&key, || {
            build_site_inventory(
                &fetcher,
                &key.website,
                key.max_pages,
                &key.excludes,
                Duration::from_millis(args.site.delay),
            )
        })
        .await;

    if inventory.is_empty() {
        warn!("No internal pages found. Internal link suggestions may be empty.");
    } else {
        info!("Found {} internal pages for linking.", inventory.len());
    }

    let topics = discover_topics(&ctx, &company_info, &args.company.signals.clone().into()).await?;
    let topic = resolve_topic(&topics, args.topic)?;
    info!("Selected topic: {topic}");

    let keywords = research_keywords(&ctx, &topic).await?;
    info!("Related SEO keywords:\n{keywords}");

    let request = BlogRequest {
        company_info: &company_info,
        topic: &topic,
        keywords: &keywords,
        word_range: args.word_range,
        anchor_style: args.anchor_style,
        link_count: args.links,
        inventory: inventory.as_slice(),
    };
    let post = generate_blog(&ctx, &request).await?;

    fs::write(&args.output, render_markdown(&post))
        .with_context(|| format!("Failed to write {}", args.output))?;
    info!(
        "Wrote blog post with {} link suggestions to {}",
        post.internal_links.len(),
        args.output
    );

    Ok(())
}

async fn handle_repurpose(
    blog_file: String,
    model: String,
    output: String,
    rpm: Option<u32>,
) -> Result<()> {
    let blog = fs::read_to_string(&blog_file)
        .context(format!("Failed to read blog file: {blog_file}"))?;

    let model = llm_builder_from_url(&model)?
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build LLM model: {}", e))?;
    let rate_limiter = rpm_limiter(rpm);
    let ctx = LlmContext {
        model: model.as_ref(),
        rate_limiter: rate_limiter.as_ref(),
    };

    let content = repurpose_blog(&ctx, &blog).await?;
    let rendered = format!(
        "## Google Business Profile Post\n\n{}\n\n## Social Media Post\n\n{}\n",
        content.business_profile, content.social
    );

    fs::write(&output, rendered).with_context(|| format!("Failed to write {output}"))?;
    info!("Wrote repurposed formats to {output}");

    Ok(())
}

async fn resolve_company_info(ctx: &LlmContext<'_>, args: &CompanyArgs) -> Result<String> {
    match &args.description {
        Some(description) => Ok(manual_company_profile(description)),
        None => analyze_company(ctx, &args.website).await.context(
            "Couldn't process the website. Re-run with --description to describe the company manually.",
        ),
    }
}

fn llm_builder_from_url(model: &str) -> Result<LLMBuilder> {
    let model_url = Url::parse(model).map_err(|e| anyhow::anyhow!("Invalid model URL: {}", e))?;
    let backend = LLMBackend::from_str(model_url.scheme())
        .map_err(|e| anyhow::anyhow!("Invalid LLM backend: {}", e))?;
    let name = [
        model_url
            .host_str()
            .context("Specify the model name as the URL host.")?,
        model_url.username(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(":");

    let mut builder = LLMBuilder::new().backend(backend).model(name);
    if let Ok(api_key) = std::env::var(MODEL_API_KEY_ENV_NAME) {
        debug!("Using the API key from {MODEL_API_KEY_ENV_NAME}");
        builder = builder.api_key(api_key);
    }

    Ok(builder)
}
