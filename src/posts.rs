use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use log::info;
use serde::Deserialize;

/// A post known to the listing: where its source lives and what to call it.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostDescriptor {
    pub file: String,
    pub title: String,
}

impl PostDescriptor {
    pub fn new(file: &str, title: &str) -> Self {
        Self {
            file: file.to_string(),
            title: title.to_string(),
        }
    }
}

pub(crate) fn builtin_posts() -> Vec<PostDescriptor> {
    vec![
        PostDescriptor::new("posts/ai-in-bugbounty.md", "Using AI in Bug Bounty"),
        PostDescriptor::new("posts/networking-tools.md", "Networking Tools Deep Dive"),
        PostDescriptor::new("posts/bandit-journey.md", "Bandit Wargame: Lessons & Tips"),
    ]
}

/// Reads a JSON array of `{"file", "title"}` objects.
pub(crate) fn load_posts(path: &Path) -> anyhow::Result<Vec<PostDescriptor>> {
    let fd = File::open(path).with_context(|| format!("while opening {path:?}"))?;
    let reader = BufReader::new(fd);
    let posts: Vec<PostDescriptor> =
        serde_json::from_reader(reader).with_context(|| format!("while parsing {path:?}"))?;
    info!("Loaded {} post descriptors from {path:?}", posts.len());
    Ok(posts)
}
