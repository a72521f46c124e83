use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use log::debug;
use webpage::{Webpage, WebpageOptions};

/// Where post sources are retrieved from.
pub(crate) trait TextSource: Send + Sync {
    fn fetch(&self, file: &str) -> anyhow::Result<String>;
}

/// Reads posts relative to the site root on disk.
#[derive(Debug)]
pub(crate) struct FsSource {
    pub root: PathBuf,
}

impl TextSource for FsSource {
    fn fetch(&self, file: &str) -> anyhow::Result<String> {
        let path = self.root.join(file.trim_start_matches('/'));
        debug!("Reading {path:?}...");
        let bytes = std::fs::read(&path).with_context(|| format!("while reading {path:?}"))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Fetches posts from a deployed site.
#[derive(Debug)]
pub(crate) struct HttpSource {
    pub base_url: String,
}

impl HttpSource {
    fn url_for(&self, file: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            file.trim_start_matches('/')
        )
    }
}

/// A non-2xx response still carries a body (the server's error page); reject it.
fn check_status(url: &str, response_code: u32) -> anyhow::Result<()> {
    if !(200..300).contains(&response_code) {
        bail!("{url}: HTTP {response_code}");
    }
    Ok(())
}

impl TextSource for HttpSource {
    fn fetch(&self, file: &str) -> anyhow::Result<String> {
        let url = self.url_for(file);
        debug!("Fetching {url}...");
        let mut options = WebpageOptions::default();
        options.useragent = "postlist".to_string();
        let webpage = Webpage::from_url(&url, options).map_err(|e| anyhow!("{url}: {e}"))?;
        check_status(&url, webpage.http.response_code)?;
        Ok(webpage.http.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("posts")).unwrap();
        std::fs::write(dir.path().join("posts/a.md"), "# A\nbody").unwrap();

        let source = FsSource {
            root: dir.path().to_path_buf(),
        };
        assert_eq!(source.fetch("posts/a.md").unwrap(), "# A\nbody");
        assert_eq!(source.fetch("/posts/a.md").unwrap(), "# A\nbody");
        assert!(source.fetch("posts/missing.md").is_err());
    }

    #[test]
    fn test_fs_source_lossy_decoding() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("posts")).unwrap();
        std::fs::write(dir.path().join("posts/a.md"), b"Caf\xe9 notes\nbody").unwrap();

        let source = FsSource {
            root: dir.path().to_path_buf(),
        };
        let text = source.fetch("posts/a.md").unwrap();
        assert_eq!(text, "Caf\u{FFFD} notes\nbody");
        assert_eq!(crate::listing::preview(&text, 220), "Caf\u{FFFD} notes");
    }

    #[test]
    fn test_check_status() {
        assert!(check_status("https://example.com/a.md", 200).is_ok());
        assert!(check_status("https://example.com/a.md", 204).is_ok());
        let err = check_status("https://example.com/a.md", 404).unwrap_err();
        assert_eq!(err.to_string(), "https://example.com/a.md: HTTP 404");
        assert!(check_status("https://example.com/a.md", 500).is_err());
        assert!(check_status("https://example.com/a.md", 301).is_err());
    }

    #[test]
    fn test_http_url_for() {
        let source = HttpSource {
            base_url: "https://example.com/".to_string(),
        };
        assert_eq!(
            source.url_for("posts/a.md"),
            "https://example.com/posts/a.md"
        );
        assert_eq!(
            source.url_for("/posts/a.md"),
            "https://example.com/posts/a.md"
        );
    }
}
