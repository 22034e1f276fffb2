//! Discriminator for singleton settings records.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Which singleton record a settings document holds.
///
/// All three kinds share one collection; the discriminator value is stored in
/// the document's `type` field and is also the record's key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsKind {
    /// Contact details and page copy.
    SiteSettings,
    /// Home page carousel slides.
    Carousel,
    /// About-section feature cards.
    Features,
}

impl SettingsKind {
    /// Every kind, in storage order.
    pub const ALL: [Self; 3] = [Self::SiteSettings, Self::Carousel, Self::Features];

    /// The stored discriminator value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SiteSettings => "site_settings",
            Self::Carousel => "carousel",
            Self::Features => "features",
        }
    }
}

impl fmt::Display for SettingsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
