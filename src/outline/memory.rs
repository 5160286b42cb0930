use super::{references, Outline};
use crate::error::{ImportError, Result};
use crate::settings::{DocumentSettings, SettingsSource};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// A whole outline: the settings area plus its pages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub settings: DocumentSettings,
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub uid: String,
    pub title: String,
    #[serde(default)]
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub uid: String,
    #[serde(alias = "string")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

impl Page {
    pub fn new(uid: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            title: title.into(),
            children: Vec::new(),
        }
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.children.push(block);
        self
    }
}

impl Block {
    pub fn new(uid: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, block: Block) -> Self {
        self.children.push(block);
        self
    }
}

impl Document {
    fn page_of(&self, uid: &str) -> Option<&Page> {
        self.pages
            .iter()
            .find(|page| find_block(&page.children, uid).is_some())
    }

    fn contains_uid(&self, uid: &str) -> bool {
        self.pages
            .iter()
            .any(|page| page.uid == uid || find_block(&page.children, uid).is_some())
    }

    fn children_mut(&mut self, parent_uid: &str) -> Option<&mut Vec<Block>> {
        if let Some(index) = self.pages.iter().position(|page| page.uid == parent_uid) {
            return Some(&mut self.pages[index].children);
        }
        self.pages
            .iter_mut()
            .find_map(|page| find_block_mut(&mut page.children, parent_uid))
            .map(|block| &mut block.children)
    }

    fn locate(&self, uid: &str) -> Option<(String, usize)> {
        self.pages
            .iter()
            .find_map(|page| locate_in(&page.children, &page.uid, uid))
    }

    /// Pages rendered as an indented bullet list
    pub fn render_outline(&self) -> String {
        let mut out = String::new();
        for page in &self.pages {
            out.push_str(&format!("# {}\n", page.title));
            render_blocks(&page.children, 0, &mut out);
        }
        out
    }
}

fn render_blocks(blocks: &[Block], depth: usize, out: &mut String) {
    for block in blocks {
        out.push_str(&"  ".repeat(depth));
        out.push_str("- ");
        out.push_str(&block.text);
        out.push('\n');
        render_blocks(&block.children, depth + 1, out);
    }
}

fn find_block<'a>(blocks: &'a [Block], uid: &str) -> Option<&'a Block> {
    for block in blocks {
        if block.uid == uid {
            return Some(block);
        }
        if let Some(found) = find_block(&block.children, uid) {
            return Some(found);
        }
    }
    None
}

fn find_block_mut<'a>(blocks: &'a mut [Block], uid: &str) -> Option<&'a mut Block> {
    for block in blocks.iter_mut() {
        if block.uid == uid {
            return Some(block);
        }
        if let Some(found) = find_block_mut(&mut block.children, uid) {
            return Some(found);
        }
    }
    None
}

fn locate_in(blocks: &[Block], parent_uid: &str, uid: &str) -> Option<(String, usize)> {
    for (order, block) in blocks.iter().enumerate() {
        if block.uid == uid {
            return Some((parent_uid.to_string(), order));
        }
        if let Some(found) = locate_in(&block.children, &block.uid, uid) {
            return Some(found);
        }
    }
    None
}

/// Thread-safe in-memory outline, loadable from and savable to a JSON file
pub struct MemoryOutline {
    document: RwLock<Document>,
    next_uid: AtomicU64,
}

impl Default for MemoryOutline {
    fn default() -> Self {
        Self::new(Document::default())
    }
}

impl MemoryOutline {
    pub fn new(document: Document) -> Self {
        Self {
            document: RwLock::new(document),
            next_uid: AtomicU64::new(1),
        }
    }

    /// Load a document file; a missing file yields an empty document
    pub async fn open(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await? {
            tracing::debug!(path = %path.display(), "Document not found, starting empty");
            return Ok(Self::default());
        }
        let content = tokio::fs::read_to_string(path).await?;
        let document: Document = serde_json::from_str(&content)?;
        Ok(Self::new(document))
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&*self.document.read().await)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    pub async fn snapshot(&self) -> Document {
        self.document.read().await.clone()
    }

    pub async fn settings(&self) -> DocumentSettings {
        self.document.read().await.settings.clone()
    }

    pub async fn set_settings(&self, settings: DocumentSettings) {
        self.document.write().await.settings = settings;
    }

    fn fresh_uid(&self, document: &Document) -> String {
        loop {
            let n = self.next_uid.fetch_add(1, Ordering::SeqCst);
            let uid = format!("ghi-{:06}", n);
            if !document.contains_uid(&uid) {
                return uid;
            }
        }
    }
}

#[async_trait]
impl Outline for MemoryOutline {
    async fn block_text(&self, uid: &str) -> Result<String> {
        let document = self.document.read().await;
        document
            .pages
            .iter()
            .find_map(|page| find_block(&page.children, uid))
            .map(|block| block.text.clone())
            .ok_or_else(|| ImportError::BlockNotFound(uid.to_string()))
    }

    async fn update_block(&self, uid: &str, text: &str) -> Result<()> {
        let mut document = self.document.write().await;
        let block = document
            .pages
            .iter_mut()
            .find_map(|page| find_block_mut(&mut page.children, uid))
            .ok_or_else(|| ImportError::BlockNotFound(uid.to_string()))?;
        block.text = text.to_string();
        Ok(())
    }

    async fn create_block(&self, parent_uid: &str, order: usize, text: &str) -> Result<String> {
        let mut document = self.document.write().await;
        let uid = self.fresh_uid(&document);
        let children = document
            .children_mut(parent_uid)
            .ok_or_else(|| ImportError::BlockNotFound(parent_uid.to_string()))?;
        let order = order.min(children.len());
        children.insert(order, Block::new(uid.clone(), text));
        Ok(uid)
    }

    async fn parent_uid(&self, uid: &str) -> Result<String> {
        let document = self.document.read().await;
        document
            .locate(uid)
            .map(|(parent, _)| parent)
            .ok_or_else(|| ImportError::BlockNotFound(uid.to_string()))
    }

    async fn block_order(&self, uid: &str) -> Result<usize> {
        let document = self.document.read().await;
        document
            .locate(uid)
            .map(|(_, order)| order)
            .ok_or_else(|| ImportError::BlockNotFound(uid.to_string()))
    }

    async fn page_title(&self, uid: &str) -> Result<Option<String>> {
        let document = self.document.read().await;
        Ok(document.page_of(uid).map(|page| page.title.clone()))
    }

    async fn referencing_parent_pages(&self, title: &str) -> Result<Vec<String>> {
        let document = self.document.read().await;
        Ok(document
            .pages
            .iter()
            .filter(|page| {
                page.children
                    .iter()
                    .any(|block| references(&block.text, title))
            })
            .map(|page| page.title.clone())
            .collect())
    }
}

#[async_trait]
impl SettingsSource for MemoryOutline {
    async fn load(&self) -> Result<DocumentSettings> {
        Ok(self.settings().await)
    }
}
