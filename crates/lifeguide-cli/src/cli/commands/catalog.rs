//! Catalog command handlers.

use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use lifeguide_core::api::{ApiClient, ApiErrorKind};
use lifeguide_core::cache::Loaded;
use lifeguide_core::config::Config;
use lifeguide_core::debounce::Debounce;
use lifeguide_types::{Topic, TopicDetail};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{OFFLINE_MARK, api_client, offline_cache};

pub async fn categories(config: &Config) -> Result<()> {
    let categories = api_client(config)?.categories().await?;
    if categories.is_empty() {
        println!("No categories found.");
    }
    for category in categories {
        println!(
            "{}  {} ({} topics)",
            category.slug, category.name, category.topic_count
        );
    }
    Ok(())
}

pub async fn category(config: &Config, slug: &str) -> Result<()> {
    let detail = match api_client(config)?.category(slug).await {
        Ok(detail) => detail,
        Err(err) if err.kind == ApiErrorKind::NotFound => bail!("Category '{slug}' not found."),
        Err(err) => return Err(err.into()),
    };

    println!("{}", detail.category.name);
    println!("{}", detail.category.description);
    println!();
    print_topics(&detail.topics);
    Ok(())
}

pub async fn topic(config: &Config, id: &str) -> Result<()> {
    let cache = offline_cache();
    match api_client(config)?.topic(cache.as_ref(), id).await {
        Loaded::Live(detail) => print_topic_detail(&detail, false),
        Loaded::Cached { value, .. } => print_topic_detail(&value, true),
        Loaded::Empty { error } if error.kind == ApiErrorKind::NotFound => {
            bail!("Topic '{id}' not found.")
        }
        Loaded::Empty { error } => return Err(error.into()),
    }
    Ok(())
}

/// How often the debounce gate is polled while reading queries.
const SEARCH_TICK: Duration = Duration::from_millis(25);

pub async fn search(config: &Config, query: &str) -> Result<()> {
    run_search(&api_client(config)?, config, query).await
}

/// Search-as-you-type over stdin. Each line replaces the pending query; the
/// query is sent once input has been quiet for `[search] debounce_ms`, and
/// whatever is still pending at end of input is sent right away.
pub async fn search_interactive(config: &Config) -> Result<()> {
    let api = api_client(config)?;
    let mut gate = Debounce::new(config.search_debounce());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tick = tokio::time::interval(SEARCH_TICK);
    let mut query = String::new();

    loop {
        tokio::select! {
            line = lines.next_line() => match line.context("read query")? {
                Some(line) => {
                    query = line;
                    gate.input(Instant::now());
                }
                None => break,
            },
            _ = tick.tick() => {
                if gate.ready(Instant::now()) {
                    run_search(&api, config, &query).await?;
                }
            }
        }
    }

    if gate.is_pending() {
        gate.cancel();
        run_search(&api, config, &query).await?;
    }
    Ok(())
}

async fn run_search(api: &ApiClient, config: &Config, query: &str) -> Result<()> {
    let results = api.search(query, config.search.min_query_len).await?;
    if results.results.is_empty() {
        println!("No topics found.");
    } else {
        print_topics(&results.results);
    }
    Ok(())
}

pub async fn videos(config: &Config, query: &str) -> Result<()> {
    let results = api_client(config)?.videos(query).await?;
    if results.videos.is_empty() {
        println!("No videos found.");
    }
    for video in results.videos {
        println!("{} ({})", video.title, video.channel_title);
        println!("  {}", video.watch_url());
    }
    Ok(())
}

fn print_topics(topics: &[Topic]) {
    for topic in topics {
        println!("{}  {}", topic.topic_id, topic.title);
    }
}

fn print_topic_detail(detail: &TopicDetail, offline: bool) {
    let topic = &detail.topic;
    if offline {
        println!("{} {OFFLINE_MARK}", topic.title);
    } else {
        println!("{}", topic.title);
    }
    println!("{}", topic.description);
    if !topic.tags.is_empty() {
        println!("Tags: {}", topic.tags.join(", "));
    }
    println!();
    println!("{}", topic.content);

    if !detail.videos.is_empty() {
        println!();
        println!("Videos:");
        for video in &detail.videos {
            println!("  {} ({})", video.title, video.channel_title);
            println!("    {}", video.watch_url());
        }
    }
}
