use serde::{Deserialize, Serialize};

/// Display language of the page.
///
/// `Primary` is Spanish and `Secondary` is English. The page always starts in
/// `Primary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Primary,
    Secondary,
}

impl Locale {
    /// BCP 47 language code.
    pub fn code(self) -> &'static str {
        match self {
            Locale::Primary => "es",
            Locale::Secondary => "en",
        }
    }

    /// Short badge shown on the language toggle.
    pub fn badge(self) -> &'static str {
        match self {
            Locale::Primary => "ES",
            Locale::Secondary => "EN",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Locale::Primary => Locale::Secondary,
            Locale::Secondary => Locale::Primary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_primary() {
        assert_eq!(Locale::default(), Locale::Primary);
        assert_eq!(Locale::default().code(), "es");
    }

    #[test]
    fn toggles_between_two_values() {
        assert_eq!(Locale::Primary.toggled(), Locale::Secondary);
        assert_eq!(Locale::Secondary.toggled(), Locale::Primary);
        assert_eq!(Locale::Secondary.badge(), "EN");
    }
}
