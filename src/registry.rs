use itertools::Itertools;
use thiserror::Error;

/// Platform logos bundled with the mobile app, in download order.
pub const PLATFORM_LOGOS: [(&str, &str); 13] = [
    (
        "facebook.png",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/b/b8/2021_Facebook_icon.svg/1024px-2021_Facebook_icon.svg.png",
    ),
    (
        "instagram.png",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/e/e7/Instagram_logo_2016.svg/1024px-Instagram_logo_2016.svg.png",
    ),
    (
        "tiktok.png",
        "https://upload.wikimedia.org/wikipedia/en/thumb/a/a9/TikTok_logo.svg/1024px-TikTok_logo.svg.png",
    ),
    (
        "linkedin.png",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/c/ca/LinkedIn_logo_initials.png/600px-LinkedIn_logo_initials.png",
    ),
    (
        "google.png",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/c/c1/Google_%22G%22_logo.svg/1200px-Google_%22G%22_logo.svg.png",
    ),
    ("tripadvisor.png", "https://logo.clearbit.com/tripadvisor.com"),
    ("trustpilot.png", "https://logo.clearbit.com/trustpilot.com"),
    ("yell.png", "https://logo.clearbit.com/yell.com"),
    ("yelp.png", "https://logo.clearbit.com/yelp.com"),
    ("checkatrade.png", "https://logo.clearbit.com/checkatrade.com"),
    ("ratedpeople.png", "https://logo.clearbit.com/ratedpeople.com"),
    ("trustatrader.png", "https://logo.clearbit.com/trustatrader.com"),
    (
        "twitter.png",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/c/ce/X_logo_2023.svg/1200px-X_logo_2023.svg.png",
    ),
];

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("duplicate filename in registry: {0}")]
    DuplicateFilename(String),

    #[error("empty filename for {0}")]
    EmptyFilename(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub filename: String,
    pub url: String,
}

impl Entry {
    pub fn new(filename: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            url: url.into(),
        }
    }
}

/// Ordered, immutable list of (filename, url) pairs. Filenames are unique.
#[derive(Debug, Clone)]
pub struct LogoRegistry {
    entries: Vec<Entry>,
}

impl LogoRegistry {
    pub fn new(entries: Vec<Entry>) -> Result<Self, RegistryError> {
        if let Some(entry) = entries.iter().find(|entry| entry.filename.is_empty()) {
            return Err(RegistryError::EmptyFilename(entry.url.clone()));
        }

        if let Some(duplicate) = entries.iter().map(|entry| &entry.filename).duplicates().next() {
            return Err(RegistryError::DuplicateFilename(duplicate.clone()));
        }

        Ok(Self { entries })
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(filename, url)| Entry::new(filename, url))
                .collect(),
        )
    }

    pub fn platform_logos() -> Self {
        let entries = PLATFORM_LOGOS
            .iter()
            .map(|(filename, url)| Entry::new(*filename, *url))
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LogoRegistry {
    fn default() -> Self {
        Self::platform_logos()
    }
}

impl<'a> IntoIterator for &'a LogoRegistry {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
