use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category preselected in a fresh form when no other default is configured.
pub const DEFAULT_CATEGORY: i32 = 1;

const BUILTIN_CATEGORIES: &[(i32, &str)] = &[
    (1, "Mercearia"),
    (2, "Hortifruti"),
    (3, "Grãos e cereais"),
    (4, "Bebidas"),
    (5, "Laticínios"),
    (6, "Carnes"),
    (7, "Padaria"),
    (8, "Limpeza"),
    (9, "Higiene"),
];

/// A single selectable category, rendered as a value/label pair.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    /// Identifier sent to the catalog service.
    pub value: i32,
    /// Human-readable label shown in the selector.
    pub label: String,
}

impl CategoryOption {
    pub fn new(value: i32, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Errors raised when assembling a category catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryCatalogError {
    #[error("category list cannot be empty")]
    Empty,
    #[error("category value {0} must be at least 1")]
    InvalidValue(i32),
    #[error("category value {0} appears more than once")]
    Duplicate(i32),
    #[error("default category {0} is not part of the list")]
    UnknownDefault(i32),
}

/// Fixed, ordered set of categories a product may belong to.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CategoryCatalog {
    options: Vec<CategoryOption>,
    default_value: i32,
}

impl CategoryCatalog {
    /// Build a catalog, checking that values are positive and unique and
    /// that the default is one of them.
    pub fn new(
        options: Vec<CategoryOption>,
        default_value: i32,
    ) -> Result<Self, CategoryCatalogError> {
        if options.is_empty() {
            return Err(CategoryCatalogError::Empty);
        }

        for (index, option) in options.iter().enumerate() {
            if option.value < 1 {
                return Err(CategoryCatalogError::InvalidValue(option.value));
            }
            if options[..index].iter().any(|seen| seen.value == option.value) {
                return Err(CategoryCatalogError::Duplicate(option.value));
            }
        }

        if !options.iter().any(|option| option.value == default_value) {
            return Err(CategoryCatalogError::UnknownDefault(default_value));
        }

        Ok(Self {
            options,
            default_value,
        })
    }

    /// Build a catalog whose default is its first entry.
    pub fn with_first_as_default(
        options: Vec<CategoryOption>,
    ) -> Result<Self, CategoryCatalogError> {
        let default_value = options
            .first()
            .map(|option| option.value)
            .ok_or(CategoryCatalogError::Empty)?;
        Self::new(options, default_value)
    }

    /// The categories bundled with the application.
    pub fn builtin() -> Self {
        let options = BUILTIN_CATEGORIES
            .iter()
            .map(|(value, label)| CategoryOption::new(*value, *label))
            .collect();
        Self {
            options,
            default_value: DEFAULT_CATEGORY,
        }
    }

    pub fn options(&self) -> &[CategoryOption] {
        &self.options
    }

    pub fn default_value(&self) -> i32 {
        self.default_value
    }

    pub fn contains(&self, value: i32) -> bool {
        self.get(value).is_some()
    }

    pub fn get(&self, value: i32) -> Option<&CategoryOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_contains_default() {
        let catalog = CategoryCatalog::builtin();

        assert!(catalog.contains(catalog.default_value()));
        assert_eq!(catalog.get(3).map(|o| o.label.as_str()), Some("Grãos e cereais"));
    }

    #[test]
    fn new_rejects_duplicates_and_unknown_default() {
        let duplicated = vec![CategoryOption::new(1, "A"), CategoryOption::new(1, "B")];
        assert_eq!(
            CategoryCatalog::new(duplicated, 1),
            Err(CategoryCatalogError::Duplicate(1))
        );

        let options = vec![CategoryOption::new(1, "A"), CategoryOption::new(2, "B")];
        assert_eq!(
            CategoryCatalog::new(options, 7),
            Err(CategoryCatalogError::UnknownDefault(7))
        );
    }

    #[test]
    fn new_rejects_non_positive_values() {
        let options = vec![CategoryOption::new(0, "Zero")];

        assert_eq!(
            CategoryCatalog::with_first_as_default(options),
            Err(CategoryCatalogError::InvalidValue(0))
        );
    }

    #[test]
    fn with_first_as_default_rejects_empty_list() {
        assert_eq!(
            CategoryCatalog::with_first_as_default(Vec::new()),
            Err(CategoryCatalogError::Empty)
        );
    }
}
