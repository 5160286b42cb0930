use serde::Serialize;
use std::fmt;

/// The fixed phrases that open an import button.
///
/// No verb is a prefix of another, so at most one of them matches a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Verb {
    #[serde(rename = "Import Github Cards")]
    ImportCards,
    #[serde(rename = "Import Github Issues")]
    ImportIssues,
    #[serde(rename = "Import Github Projects")]
    ImportProjects,
    #[serde(rename = "Import Github Repos")]
    ImportRepos,
}

impl Verb {
    /// Registration order used by the default dispatcher
    pub const ALL: [Verb; 4] = [
        Verb::ImportCards,
        Verb::ImportIssues,
        Verb::ImportProjects,
        Verb::ImportRepos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::ImportCards => "Import Github Cards",
            Verb::ImportIssues => "Import Github Issues",
            Verb::ImportProjects => "Import Github Projects",
            Verb::ImportRepos => "Import Github Repos",
        }
    }

    /// Case-insensitive prefix test against the trimmed label
    pub fn matches(&self, label: &str) -> bool {
        label
            .trim()
            .to_uppercase()
            .starts_with(&self.as_str().to_uppercase())
    }

    /// First verb in registration order whose phrase opens the label
    pub fn detect(label: &str) -> Option<Verb> {
        Self::ALL.into_iter().find(|verb| verb.matches(label))
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
