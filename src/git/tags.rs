//! Streaming tag listing for a remote repository.
//!
//! [`fetch_tags`] runs `git ls-remote <remote>` on a background task and hands
//! tag names to the consumer one at a time through a capacity-1 channel, in
//! the order the remote lists them. Nothing is sorted or deduplicated: an
//! annotated tag appears twice, once for the tag object and once for its
//! peeled `^{}` entry.
//!
//! A failed listing is delivered as a final `Err` item, so an empty stream
//! always means the remote has no tags.

use anyhow::Result;
use futures::Stream;
use regex::Regex;
use std::future::Future;
use std::pin::Pin;
use std::sync::LazyLock;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

use super::command_builder::GitCommand;

static TAG_REF: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?m-s)(?:tags)/(\S+)$").ok());

/// Extract the tag name from one line of `git ls-remote` output.
///
/// `3f9a...\trefs/tags/v1.2.0^{}` yields `v1.2.0`. Lines without a tag ref
/// yield `None`.
pub fn parse_tag_line(line: &str) -> Option<String> {
    let found = TAG_REF.as_ref()?.find(line.trim())?.as_str();
    let found = found.strip_suffix("^{}").unwrap_or(found);
    let tag = found.strip_prefix("tags/").unwrap_or(found);
    if tag.is_empty() { None } else { Some(tag.to_string()) }
}

/// Tags of one remote, delivered as the listing is parsed.
///
/// Implements [`Stream`]; [`next_tag`](Self::next_tag) and
/// [`collect_tags`](Self::collect_tags) cover the common uses without
/// importing stream combinators.
pub struct TagStream {
    rx: mpsc::Receiver<Result<String>>,
}

impl TagStream {
    /// Next tag, a listing error, or `None` once the listing is exhausted.
    pub async fn next_tag(&mut self) -> Option<Result<String>> {
        self.rx.recv().await
    }

    /// Drain the stream, failing if the listing failed.
    pub async fn collect_tags(mut self) -> Result<Vec<String>> {
        let mut tags = Vec::new();
        while let Some(item) = self.rx.recv().await {
            tags.push(item?);
        }
        Ok(tags)
    }
}

impl Stream for TagStream {
    type Item = Result<String>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

/// List the tags of `remote` with `git ls-remote`.
///
/// Must be called from within a tokio runtime. The listing runs to
/// completion even if the returned stream is dropped early; only sending
/// stops.
pub fn fetch_tags(remote: &str) -> TagStream {
    let remote = remote.to_string();
    spawn_listing(async move {
        let output = GitCommand::ls_remote(&remote).with_context(remote.as_str()).execute().await?;
        Ok(output.combined())
    })
}

/// Spawn the producer task for a listing future.
pub(crate) fn spawn_listing<F>(listing: F) -> TagStream
where
    F: Future<Output = Result<String>> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
        let listing = match listing.await {
            Ok(listing) => listing,
            Err(e) => {
                tracing::debug!(target: "git", "Tag listing failed: {:#}", e);
                let _ = tx.send(Err(e)).await;
                return;
            }
        };

        for tag in listing.lines().filter_map(parse_tag_line) {
            if tx.send(Ok(tag)).await.is_err() {
                tracing::trace!(target: "git", "Tag stream dropped by consumer");
                return;
            }
        }
    });

    TagStream {
        rx,
    }
}
