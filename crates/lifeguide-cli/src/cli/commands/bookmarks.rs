//! Bookmark command handlers.

use anyhow::{Result, bail};
use lifeguide_core::api::ApiError;
use lifeguide_core::bookmarks::{BookmarkState, BookmarkSync};
use lifeguide_core::config::Config;

use super::{OFFLINE_MARK, api_client, offline_cache};

fn synchronizer(config: &Config) -> Result<BookmarkSync> {
    Ok(BookmarkSync::new(api_client(config)?, offline_cache()))
}

fn not_logged_in(err: &ApiError) -> bool {
    err.is_unauthenticated()
}

pub async fn list(config: &Config) -> Result<()> {
    let mut sync = synchronizer(config)?;

    if let Err(err) = sync.list().await {
        if not_logged_in(&err) {
            bail!("Not logged in.");
        }
        return Err(err.into());
    }
    // A rejected session must not reveal the previous user's cached set.
    if sync.last_error().is_some_and(not_logged_in) {
        bail!("Not logged in.");
    }

    if sync.state() == BookmarkState::Offline {
        println!("Bookmarks {OFFLINE_MARK}");
    }
    if sync.bookmarks().is_empty() {
        println!("No bookmarks.");
    }
    for bookmark in sync.bookmarks() {
        let title = bookmark.topic.as_ref().map_or("(topic removed)", |t| t.title.as_str());
        println!("{}  {}", bookmark.topic_id, title);
    }
    Ok(())
}

pub async fn add(config: &Config, topic_id: &str) -> Result<()> {
    let mut sync = synchronizer(config)?;
    match sync.add(topic_id).await {
        Ok(()) => {
            println!("✓ Bookmarked {topic_id}");
            Ok(())
        }
        Err(err) if not_logged_in(&err) => bail!("Not logged in."),
        Err(err) => Err(err.into()),
    }
}

pub async fn remove(config: &Config, topic_id: &str) -> Result<()> {
    let mut sync = synchronizer(config)?;
    match sync.remove(topic_id).await {
        Ok(()) => {
            println!("✓ Removed bookmark {topic_id}");
            Ok(())
        }
        Err(err) if not_logged_in(&err) => bail!("Not logged in."),
        Err(err) => Err(err.into()),
    }
}
