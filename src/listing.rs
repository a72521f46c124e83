use std::{str::FromStr, sync::mpsc};

use anyhow::bail;
use log::{debug, info, warn};
use maud::html;

use crate::{context::Context, posts::PostDescriptor};

/// Order in which listing items are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum ListingOrder {
    /// the order of the descriptor list
    #[default]
    Descriptor,
    /// the order retrievals finished in
    Completion,
}

impl FromStr for ListingOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "descriptor" => Ok(Self::Descriptor),
            "completion" => Ok(Self::Completion),
            _ => bail!("unknown listing order: {s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Entry<'a> {
    Loaded {
        post: &'a PostDescriptor,
        preview: String,
    },
    Missing {
        post: &'a PostDescriptor,
    },
}

/// First non-blank line of `md`, cut to `budget` characters.
pub(crate) fn preview(md: &str, budget: usize) -> String {
    md.lines()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.trim_end().chars().take(budget).collect())
        .unwrap_or_default()
}

pub(crate) fn render_entry(entry: &Entry) -> String {
    let markup = match entry {
        Entry::Loaded { post, preview } => html! {
            div.post-item {
                h4 { (post.title) }
                p { (preview) }
                a.btn href=(post.file) target="_blank" data-sound { "Read raw .md" }
            }
        },
        Entry::Missing { post } => html! {
            div.post-item {
                h4 { (post.title) }
                p { "Post not found (create " (post.file) ")" }
            }
        },
    };
    markup.into_string()
}

/// Retrieves every post concurrently. Failures become `Entry::Missing`.
pub(crate) fn load_entries(ctx: &Context) -> Vec<Entry<'_>> {
    let (tx, rx) = mpsc::channel();

    let mut entries: Vec<(usize, Entry)> = std::thread::scope(|scope| {
        for (idx, post) in ctx.posts.iter().enumerate() {
            let tx = tx.clone();
            let source = &ctx.source;
            let preview_len = ctx.preview_len;
            scope.spawn(move || {
                let entry = match source.fetch(&post.file) {
                    Ok(md) => Entry::Loaded {
                        post,
                        preview: preview(&md, preview_len),
                    },
                    Err(e) => {
                        warn!("Post {:?} is not available: {e:#}", post.file);
                        Entry::Missing { post }
                    }
                };
                // the receiver outlives every sender
                let _ = tx.send((idx, entry));
            });
        }
        drop(tx);

        rx.into_iter()
            .inspect(|(idx, _)| debug!("Retrieved post #{idx}"))
            .collect()
    });

    if ctx.order == ListingOrder::Descriptor {
        entries.sort_by_key(|(idx, _)| *idx);
    }

    let missing = entries
        .iter()
        .filter(|(_, e)| matches!(e, Entry::Missing { .. }))
        .count();
    info!(
        "Loaded {} of {} posts",
        entries.len() - missing,
        entries.len()
    );

    entries.into_iter().map(|(_, entry)| entry).collect()
}

/// The rendered `post-item` fragments, ready to be appended to the container.
pub(crate) fn load_listing(ctx: &Context) -> Vec<String> {
    load_entries(ctx).iter().map(render_entry).collect()
}
