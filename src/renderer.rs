use std::path::Path;

use anyhow::Context;
use handlebars::{handlebars_helper, Handlebars};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::{listing, markdown::md_to_html};

static TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# (.+?)\s*$").unwrap());

handlebars_helper!(preview: |text: str, len: u64| listing::preview(text, len as usize));

#[derive(Serialize, Debug)]
pub(crate) struct PostPageData {
    pub title: String,
    pub body: String,
    pub source: String,
}

/// Registers `template` as the `post` template.
pub(crate) fn generate_renderer(template: &Path) -> anyhow::Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.register_helper("preview", Box::new(preview));
    handlebars
        .register_template_file("post", template)
        .with_context(|| format!("{template:?}"))?;
    Ok(handlebars)
}

/// The first top-level heading, or the file stem when there is none.
fn post_title(md: &str, source: &Path) -> String {
    TITLE
        .captures(md)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| {
            source
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_default()
        })
}

/// Converts a post. Without a template, the bare fragment is returned.
pub(crate) fn render_post(
    md: &str,
    source: &Path,
    handlebars: Option<&Handlebars>,
) -> anyhow::Result<String> {
    let body = md_to_html(md);
    let Some(handlebars) = handlebars else {
        return Ok(body);
    };

    let data = PostPageData {
        title: post_title(md, source),
        body,
        source: source.to_string_lossy().to_string(),
    };
    handlebars
        .render("post", &data)
        .with_context(|| format!("while rendering {source:?}"))
}
