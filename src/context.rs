use crate::{listing::ListingOrder, posts::PostDescriptor, source::TextSource};

pub(crate) const DEFAULT_CONTAINER_ID: &str = "post-list";
pub(crate) const DEFAULT_PREVIEW_LEN: usize = 220;

/// Everything the listing loader needs. Built once in `main` and passed down.
pub(crate) struct Context {
    pub posts: Vec<PostDescriptor>,
    pub source: Box<dyn TextSource>,
    pub preview_len: usize,
    pub order: ListingOrder,
}

impl Context {
    pub fn new(posts: Vec<PostDescriptor>, source: Box<dyn TextSource>) -> Self {
        Self {
            posts,
            source,
            preview_len: DEFAULT_PREVIEW_LEN,
            order: ListingOrder::default(),
        }
    }

    pub fn with_preview_len(mut self, preview_len: usize) -> Self {
        self.preview_len = preview_len;
        self
    }

    pub fn with_order(mut self, order: ListingOrder) -> Self {
        self.order = order;
        self
    }
}
