//! Skill-set normalization: turns a delimited string or a token list into a canonical `SkillSet`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A deduplicated set of normalized skill tokens.
///
/// Every member is lowercase, purely alphabetic and longer than one character.
/// Iteration (and serialization) order is lexicographic ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    /// Normalizes a single delimited string.
    ///
    /// A comma anywhere switches the whole input to comma-splitting;
    /// otherwise it is split on whitespace.
    pub fn from_text(text: &str) -> Self {
        if text.contains(',') {
            Self::from_tokens(text.split(','))
        } else {
            Self::from_tokens(text.split_whitespace())
        }
    }

    /// Normalizes an already-tokenized sequence. Tokens are not re-split.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = SkillSet::default();
        set.extend(tokens);
        set
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Members also in `other`, sorted.
    pub fn intersection(&self, other: &SkillSet) -> Vec<String> {
        self.iter()
            .filter(|skill| other.contains(skill))
            .map(String::from)
            .collect()
    }

    /// Members missing from `other`, sorted.
    pub fn difference(&self, other: &SkillSet) -> Vec<String> {
        self.iter()
            .filter(|skill| !other.contains(skill))
            .map(String::from)
            .collect()
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(set: SkillSet) -> Self {
        set.0.into_iter().collect()
    }
}

/// Adds tokens through the same normalization as `from_tokens`.
impl<S: AsRef<str>> Extend<S> for SkillSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, tokens: I) {
        self.0
            .extend(tokens.into_iter().filter_map(|t| normalize_token(t.as_ref())));
    }
}

/// Returns the canonical form of `token`, or `None` if it does not qualify as a skill.
///
/// "c++", "node.js", "3d" and single letters are dropped on purpose.
fn normalize_token(token: &str) -> Option<String> {
    let trimmed = token.trim();
    if trimmed.chars().count() <= 1 || !trimmed.chars().all(char::is_alphabetic) {
        return None;
    }
    Some(trimmed.to_lowercase())
}
