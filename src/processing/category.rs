//! Compiled category definitions

use crate::config::CategoryConfig;
use crate::error::{Result, ResumeScannerError};
use regex::Regex;

/// Position of a category in its `CategorySet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub usize);

#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    heading: Regex,
    keywords: Regex,
}

impl Category {
    pub fn from_config(config: &CategoryConfig) -> Result<Self> {
        let name = config.name.trim().to_string();

        let alternatives: Vec<String> = std::iter::once(name.as_str())
            .chain(config.aliases.iter().map(|a| a.trim()))
            .map(regex::escape)
            .collect();
        let heading = Regex::new(&format!("(?i)(?:{})", alternatives.join("|")))?;

        let keywords = Regex::new(&format!("(?i)(?:{})", config.keywords)).map_err(|e| {
            ResumeScannerError::Configuration(format!(
                "Invalid keyword pattern for '{}': {}",
                name, e
            ))
        })?;

        Ok(Self {
            name,
            heading,
            keywords,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when the line mentions the category name or one of its aliases.
    pub fn matches_heading(&self, line: &str) -> bool {
        self.heading.is_match(line)
    }

    pub fn keyword_count(&self, text: &str) -> usize {
        self.keywords.find_iter(text).count()
    }
}

/// Ordered, immutable list of categories. Order is heading priority.
#[derive(Debug, Clone)]
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    pub fn from_config(configs: &[CategoryConfig]) -> Result<Self> {
        if configs.is_empty() {
            return Err(ResumeScannerError::Configuration(
                "At least one category must be configured".to_string(),
            ));
        }

        let categories = configs
            .iter()
            .map(Category::from_config)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { categories })
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, &Category)> {
        self.categories
            .iter()
            .enumerate()
            .map(|(idx, category)| (CategoryId(idx), category))
    }

    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name()).collect()
    }

    pub fn find(&self, name: &str) -> Option<CategoryId> {
        self.categories
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
            .map(CategoryId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn category(name: &str, aliases: &[&str], keywords: &str) -> CategoryConfig {
        CategoryConfig {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            keywords: keywords.to_string(),
        }
    }

    #[test]
    fn test_heading_match_is_case_insensitive_substring() {
        let cat = Category::from_config(&category("Work Experience", &[], "work")).unwrap();

        assert!(cat.matches_heading("WORK EXPERIENCE"));
        assert!(cat.matches_heading("Relevant work experience:"));
        assert!(!cat.matches_heading("Experience"));
    }

    #[test]
    fn test_aliases_and_literal_escaping() {
        let cat = Category::from_config(&category("C++ (Skills)", &["Toolbox"], "c")).unwrap();

        assert!(cat.matches_heading("c++ (skills)"));
        assert!(cat.matches_heading("My toolbox"));
        assert!(!cat.matches_heading("C (Skills)"));
    }

    #[test]
    fn test_keyword_count() {
        let cat = Category::from_config(&category("Education", &[], "degree|university")).unwrap();
        assert_eq!(cat.keyword_count("Degree from University, second DEGREE"), 3);
        assert_eq!(cat.keyword_count(""), 0);
    }

    #[test]
    fn test_invalid_keyword_pattern() {
        let err = Category::from_config(&category("Education", &[], "(unclosed")).unwrap_err();
        assert!(matches!(err, ResumeScannerError::Configuration(_)));
    }

    #[test]
    fn test_set_preserves_order() {
        let set = CategorySet::from_config(&Config::default().categories).unwrap();

        assert_eq!(set.len(), 7);
        assert_eq!(set.names()[0], "Education");
        assert_eq!(set.find("online presence"), Some(CategoryId(6)));
        assert_eq!(set.get(CategoryId(1)).map(|c| c.name()), Some("Projects"));
        assert!(CategorySet::from_config(&[]).is_err());
    }
}
