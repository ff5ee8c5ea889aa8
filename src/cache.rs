// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::analyzer::{analyze, AnalyzerOptions, Icon};
use crate::style::StyleSummary;
use crate::Error;

/// A storage of analyzed icon sets.
///
/// Maps a library id to its style summary, so a corpus is analyzed only once.
#[derive(Clone, Default, Debug)]
pub struct StyleCache {
    summaries: HashMap<String, StyleSummary>,
}

impl StyleCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        StyleCache::default()
    }

    /// Returns a summary of a library.
    pub fn get(&self, id: &str) -> Option<&StyleSummary> {
        self.summaries.get(id)
    }

    /// Stores a summary of a library.
    ///
    /// Returns the replaced summary, if any.
    pub fn put(&mut self, id: &str, summary: StyleSummary) -> Option<StyleSummary> {
        self.summaries.insert(id.to_string(), summary)
    }

    /// Removes a summary of a library.
    pub fn remove(&mut self, id: &str) -> Option<StyleSummary> {
        self.summaries.remove(id)
    }

    /// Returns the number of stored summaries.
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    /// Checks that the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Returns a stored summary or analyzes `icons` and stores the result.
    ///
    /// Nothing is stored on error.
    pub fn get_or_analyze(
        &mut self,
        id: &str,
        icons: &[Icon],
        opt: &AnalyzerOptions,
    ) -> Result<&StyleSummary, Error> {
        match self.summaries.entry(id.to_string()) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => {
                log::debug!("Analyzing '{}' with {} icons.", id, icons.len());
                let summary = analyze(icons, opt)?;
                Ok(e.insert(summary))
            }
        }
    }
}
