use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of one anchorable region of the page.
///
/// The declaration order is the page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Home,
    About,
    Skills,
    Projects,
    Experience,
    Education,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 7] = [
        SectionId::Home,
        SectionId::About,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Experience,
        SectionId::Education,
        SectionId::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::About => "about",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
            SectionId::Experience => "experience",
            SectionId::Education => "education",
            SectionId::Contact => "contact",
        }
    }

    /// URL fragment used for anchor navigation, e.g. `#skills`.
    pub fn anchor(self) -> String {
        format!("#{}", self.as_str())
    }

    /// Position in page order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse a URL fragment with or without the leading `#`.
    pub fn from_anchor(fragment: &str) -> Option<Self> {
        fragment.trim_start_matches('#').parse().ok()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or(())
    }
}
