//! The host outliner as seen by the importers.
//!
//! Blocks are addressed by uid. Pages are the roots of the tree and are
//! addressed by uid as well; a top-level block's parent is its page.

pub mod memory;

pub use memory::{Block, Document, MemoryOutline, Page};

use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Outline: Send + Sync {
    /// Current text of a block
    async fn block_text(&self, uid: &str) -> Result<String>;

    /// Replace the text of a block
    async fn update_block(&self, uid: &str, text: &str) -> Result<()>;

    /// Insert a new child under `parent_uid` at position `order`; returns the new uid
    async fn create_block(&self, parent_uid: &str, order: usize, text: &str) -> Result<String>;

    /// Uid of the block or page directly containing `uid`
    async fn parent_uid(&self, uid: &str) -> Result<String>;

    /// Position of a block among its siblings
    async fn block_order(&self, uid: &str) -> Result<usize>;

    /// Title of the page a block lives on
    async fn page_title(&self, uid: &str) -> Result<Option<String>>;

    /// Titles of pages with a direct child block that references `title`
    /// (see [`references`]), in document order
    async fn referencing_parent_pages(&self, title: &str) -> Result<Vec<String>>;
}

/// Page reference markup for a title
pub fn page_ref(title: &str) -> String {
    format!("[[{}]]", title)
}

/// Whether `text` references the page `title`: `[[title]]`, `#[[title]]` or
/// a `#title` tag ending at whitespace, punctuation or the end of the text
pub fn references(text: &str, title: &str) -> bool {
    if text.contains(&page_ref(title)) {
        return true;
    }
    // a bare tag cannot hold whitespace
    if title.is_empty() || title.contains(char::is_whitespace) {
        return false;
    }
    let tag = format!("#{}", title);
    text.match_indices(&tag).any(|(start, _)| {
        text[start + tag.len()..]
            .chars()
            .next()
            .map_or(true, |c| c.is_whitespace() || ",.;:!?)]".contains(c))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_references() {
        assert!(references("working on [[roam]] today", "roam"));
        assert!(references("#[[roam]]", "roam"));
        assert!(!references("[[roamresearch]]", "roam"));
    }

    #[test]
    fn test_tag_references() {
        assert!(references("#roam", "roam"));
        assert!(references("see #roam, later", "roam"));
        assert!(references("(#roam)", "roam"));
        assert!(!references("#roamresearch", "roam"));
        assert!(!references("roam", "roam"));
        assert!(!references("#roam-cli", "roam"));
        assert!(!references("#my page", "my page"));
        assert!(references("#[[my page]]", "my page"));
    }
}
