//! Splitting raw resume text into configured sections

use crate::processing::category::{CategoryId, CategorySet};
use log::{debug, warn};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Decides whether a single line opens a new section.
pub trait LineClassifier: Send + Sync {
    fn classify(&self, line: &str) -> Option<CategoryId>;
}

/// Substring heading detection: the first category (in configured order)
/// whose name or alias appears in the line wins.
pub struct HeadingClassifier<'a> {
    categories: &'a CategorySet,
}

impl<'a> HeadingClassifier<'a> {
    pub fn new(categories: &'a CategorySet) -> Self {
        Self { categories }
    }
}

impl LineClassifier for HeadingClassifier<'_> {
    fn classify(&self, line: &str) -> Option<CategoryId> {
        self.categories
            .iter()
            .find(|(_, category)| category.matches_heading(line))
            .map(|(id, _)| id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub category: String,
    pub fragment: String,
}

/// Every configured category mapped to its accumulated text.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionedDocument {
    sections: Vec<Section>,
}

impl SectionedDocument {
    fn empty(categories: &CategorySet) -> Self {
        let sections = categories
            .iter()
            .map(|(_, category)| Section {
                category: category.name().to_string(),
                fragment: String::new(),
            })
            .collect();
        Self { sections }
    }

    pub fn fragment(&self, id: CategoryId) -> Option<&str> {
        self.sections.get(id.0).map(|s| s.fragment.as_str())
    }

    pub fn fragment_by_name(&self, name: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.category == name)
            .map(|s| s.fragment.as_str())
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// True when no heading was found, i.e. every fragment is empty.
    pub fn is_blank(&self) -> bool {
        self.sections.iter().all(|s| s.fragment.is_empty())
    }

    pub fn detected_count(&self) -> usize {
        self.sections.iter().filter(|s| !s.fragment.is_empty()).count()
    }
}

impl Serialize for SectionedDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.category, &section.fragment)?;
        }
        map.end()
    }
}

pub struct Categorizer<'a> {
    categories: &'a CategorySet,
    classifier: Box<dyn LineClassifier + 'a>,
}

impl<'a> Categorizer<'a> {
    /// Categorizer using `HeadingClassifier`
    pub fn new(categories: &'a CategorySet) -> Self {
        Self::with_classifier(categories, Box::new(HeadingClassifier::new(categories)))
    }

    pub fn with_classifier(
        categories: &'a CategorySet,
        classifier: Box<dyn LineClassifier + 'a>,
    ) -> Self {
        Self {
            categories,
            classifier,
        }
    }

    pub fn categorize(&self, text: &str) -> SectionedDocument {
        let mut document = SectionedDocument::empty(self.categories);
        let mut current: Option<CategoryId> = None;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(id) = self.classifier.classify(line) {
                if id.0 < document.sections.len() {
                    if current != Some(id) {
                        debug!("Section '{}' starts at: {}", document.sections[id.0].category, line);
                    }
                    current = Some(id);
                } else {
                    warn!("Line classifier returned unknown category index {}", id.0);
                }
            }

            if let Some(id) = current {
                let fragment = &mut document.sections[id.0].fragment;
                fragment.push_str(line);
                fragment.push(' ');
            }
        }

        document
    }
}
