use serde::{Deserialize, Serialize};

/// Maximum number of recently searched cities kept.
pub const RECENT_CAPACITY: usize = 3;

/// Put `city` in front of `current`, dropping any case-insensitive duplicate
/// and anything beyond [`RECENT_CAPACITY`].
///
/// The stored spelling is the one passed in, so re-searching "london" after
/// "London" replaces the entry with the new casing.
pub fn record_search(city: &str, current: &[String]) -> Vec<String> {
    let folded = city.to_lowercase();

    std::iter::once(city.to_string())
        .chain(
            current
                .iter()
                .filter(|existing| existing.to_lowercase() != folded)
                .cloned(),
        )
        .take(RECENT_CAPACITY)
        .collect()
}

/// Most-recent-first list of distinct city names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentCities(Vec<String>);

impl RecentCities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, city: &str) {
        self.0 = record_search(city, &self.0);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
