//! Resume section classification.
//!
//! A line that is exactly a known header switches the current section for itself and
//! every following line. Lines before the first header belong to `Section::General`.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Section {
    #[default]
    General,
    Experience,
    Education,
    Projects,
    Certifications,
    Skills,
}

/// Header patterns, matched against a trimmed, lowercased, whitespace-collapsed line.
static TRANSITIONS: Lazy<Vec<(Regex, Section)>> = Lazy::new(|| {
    [
        (
            r"^(?:work experience|experience|professional experience|employment)$",
            Section::Experience,
        ),
        (r"^(?:education|academic background)$", Section::Education),
        (r"^(?:projects|personal projects)$", Section::Projects),
        (r"^(?:certifications?|courses?)$", Section::Certifications),
        (r"^skills$", Section::Skills),
    ]
    .into_iter()
    .map(|(pattern, section)| {
        (
            Regex::new(pattern).expect("section header pattern is valid"),
            section,
        )
    })
    .collect()
});

impl Section {
    /// Next state after reading `line`. Non-header lines self-loop.
    pub fn transition(self, line: &str) -> Section {
        let key = line
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        TRANSITIONS
            .iter()
            .find(|(pattern, _)| pattern.is_match(&key))
            .map(|(_, next)| *next)
            .unwrap_or(self)
    }
}

/// Lines of a document grouped by the section they fall under.
#[derive(Debug, Default)]
pub struct Sections<'a> {
    lines: HashMap<Section, Vec<&'a str>>,
}

impl<'a> Sections<'a> {
    pub fn split(text: &'a str) -> Self {
        let mut lines: HashMap<Section, Vec<&'a str>> = HashMap::new();
        let mut current = Section::General;
        lines.entry(current).or_default();

        for line in text.split('\n') {
            current = current.transition(line);
            lines.entry(current).or_default().push(line);
        }

        Sections { lines }
    }

    pub fn lines(&self, section: Section) -> &[&'a str] {
        self.lines.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The section's lines re-joined with newlines; empty if the section never appeared.
    pub fn text(&self, section: Section) -> String {
        self.lines(section).join("\n")
    }
}
