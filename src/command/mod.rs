//! Button-command grammar: `<Verb> [KEYWORD value]*`.

pub mod tokenizer;
pub mod verb;

pub use verb::Verb;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Keywords the import handlers understand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// Username override
    For,
    /// Repository name override
    In,
    /// Project name override
    Under,
    /// Column name override
    As,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::For => "FOR",
            Keyword::In => "IN",
            Keyword::Under => "UNDER",
            Keyword::As => "AS",
        }
    }
}

/// Keyword/value pairs parsed from one button label, in source order.
///
/// Keys are case-sensitive. A repeated keyword keeps its first position and
/// takes the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonConfig {
    pairs: Vec<(String, String)>,
}

impl ButtonConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair up completed tokens two at a time; an unpaired tail is dropped.
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        let mut config = Self::new();
        let mut tokens = tokens.into_iter();
        while let (Some(key), Some(value)) = (tokens.next(), tokens.next()) {
            config.insert(key, value);
        }
        config
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a handler keyword; an empty value counts as absent
    pub fn keyword(&self, keyword: Keyword) -> Option<&str> {
        self.get(keyword.as_str()).filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Serialize for ButtonConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (key, value) in &self.pairs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Parse the text following `verb` in `label`.
///
/// Never fails: malformed input yields fewer pairs.
pub fn parse_button_config(label: &str, verb: &str) -> ButtonConfig {
    let rest = tokenizer::strip_verb(label, verb);
    ButtonConfig::from_tokens(tokenizer::tokenize(rest))
}

/// A recognised button: its verb plus the parsed pairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonCommand {
    pub verb: Verb,
    pub config: ButtonConfig,
}

impl ButtonCommand {
    pub fn parse(label: &str) -> Option<Self> {
        let verb = Verb::detect(label)?;
        Some(Self {
            verb,
            config: parse_button_config(label, verb.as_str()),
        })
    }
}
