//! Solved configurations collected in study order for export.

use uam_acoustics::HoverNoise;
use uam_solver::Solution;

/// Solved design for one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigResult {
    pub configuration: String,
    pub solution: Solution,
    pub noise: Option<HoverNoise>,
}

/// Results in study order, one entry per configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsTable {
    entries: Vec<ConfigResult>,
}

impl ResultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a configuration's result. A repeated name replaces the earlier
    /// entry in place.
    pub fn insert(
        &mut self,
        configuration: impl Into<String>,
        solution: Solution,
        noise: Option<HoverNoise>,
    ) {
        let entry = ConfigResult {
            configuration: configuration.into(),
            solution,
            noise,
        };
        match self
            .entries
            .iter_mut()
            .find(|e| e.configuration == entry.configuration)
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, configuration: &str) -> Option<&ConfigResult> {
        self.entries.iter().find(|e| e.configuration == configuration)
    }

    pub fn configurations(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.configuration.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConfigResult> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every entry carries a noise estimate.
    pub fn has_noise(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(|e| e.noise.is_some())
    }
}

impl<'a> IntoIterator for &'a ResultsTable {
    type Item = &'a ConfigResult;
    type IntoIter = std::slice::Iter<'a, ConfigResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
