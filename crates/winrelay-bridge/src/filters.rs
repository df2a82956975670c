//! File dialog filters.
//!
//! The content host sends filters as `{ "Label": ["*.png", "*.jpg"] }`.
//! Native dialogs show each one as `Label (*.png;*.jpg)` and match on the
//! bare extensions.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub label: String,
    pub patterns: Vec<String>,
}

impl FileFilter {
    pub fn new(label: impl Into<String>, patterns: Vec<String>) -> Self {
        Self {
            label: label.into(),
            patterns,
        }
    }

    /// Dialog-facing name, e.g. `Images (*.png;*.jpg)`.
    pub fn display(&self) -> String {
        format!("{} ({})", self.label, self.patterns.join(";"))
    }

    /// Extensions for toolkits that filter by suffix. `*` and `*.*` become
    /// the wildcard `*`.
    pub fn extensions(&self) -> Vec<String> {
        self.patterns
            .iter()
            .map(|pattern| {
                let ext = pattern.trim().trim_start_matches('*').trim_start_matches('.');
                if ext.is_empty() || ext == "*" {
                    "*".to_string()
                } else {
                    ext.to_string()
                }
            })
            .collect()
    }
}

/// Convert the wire mapping into filters, ordered by label.
pub fn make_filters(filters: &BTreeMap<String, Vec<String>>) -> Vec<FileFilter> {
    filters
        .iter()
        .map(|(label, patterns)| FileFilter::new(label.clone(), patterns.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_patterns_with_semicolons() {
        let filter = FileFilter::new("Image Files", vec!["*.bmp".into(), "*.jpg".into(), "*.gif".into()]);
        assert_eq!(filter.display(), "Image Files (*.bmp;*.jpg;*.gif)");
    }

    #[test]
    fn extensions_strip_glob_prefix() {
        let filter = FileFilter::new("Mixed", vec!["*.tar.gz".into(), "*.*".into(), "*".into(), "txt".into()]);
        assert_eq!(filter.extensions(), vec!["tar.gz", "*", "*", "txt"]);
    }

    #[test]
    fn make_filters_is_ordered_by_label() {
        let mut map = BTreeMap::new();
        map.insert("Text".to_string(), vec!["*.txt".to_string()]);
        map.insert("All files".to_string(), vec!["*.*".to_string()]);
        let filters = make_filters(&map);
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].display(), "All files (*.*)");
        assert_eq!(filters[1].display(), "Text (*.txt)");
    }

    #[test]
    fn empty_mapping_gives_no_filters() {
        assert!(make_filters(&BTreeMap::new()).is_empty());
    }
}
