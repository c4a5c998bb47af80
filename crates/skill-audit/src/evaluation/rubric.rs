use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Every category is scored out of the same raw budget.
pub const MAX_CATEGORY_SCORE: f64 = 10.0;

/// Allowed drift of the weight sum away from 1.0.
pub const WEIGHT_TOLERANCE: f64 = 1e-3;

/// Stable identifiers for the eight rubric categories, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    Structure,
    Clarity,
    Safety,
    Dependencies,
    ErrorHandling,
    Scope,
    Documentation,
    Portability,
}

impl CategoryId {
    pub const ALL: [CategoryId; 8] = [
        CategoryId::Structure,
        CategoryId::Clarity,
        CategoryId::Safety,
        CategoryId::Dependencies,
        CategoryId::ErrorHandling,
        CategoryId::Scope,
        CategoryId::Documentation,
        CategoryId::Portability,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CategoryId::Structure => "structure",
            CategoryId::Clarity => "clarity",
            CategoryId::Safety => "safety",
            CategoryId::Dependencies => "dependencies",
            CategoryId::ErrorHandling => "error_handling",
            CategoryId::Scope => "scope",
            CategoryId::Documentation => "documentation",
            CategoryId::Portability => "portability",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|id| id.key() == key)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One weighted evaluation dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: &'static str,
    pub description: &'static str,
    pub weight: f64,
    pub max_score: f64,
}

impl Category {
    const fn new(
        id: CategoryId,
        name: &'static str,
        description: &'static str,
        weight: f64,
    ) -> Self {
        Self {
            id,
            name,
            description,
            weight,
            max_score: MAX_CATEGORY_SCORE,
        }
    }
}

const STANDARD_CATEGORIES: [Category; 8] = [
    Category::new(
        CategoryId::Structure,
        "Structure & Metadata",
        "Descriptor presence, name and description metadata, and file organization",
        0.15,
    ),
    Category::new(
        CategoryId::Clarity,
        "Clarity & Specificity",
        "Concrete steps and commands, free of hedging language",
        0.15,
    ),
    Category::new(
        CategoryId::Safety,
        "Safety",
        "Destructive, exfiltration, looping, network and privilege risks are guarded",
        0.20,
    ),
    Category::new(
        CategoryId::Dependencies,
        "Dependency Management",
        "Required tools, verification, installation and environment are documented",
        0.10,
    ),
    Category::new(
        CategoryId::ErrorHandling,
        "Error Handling",
        "Failure modes, fallbacks, validation and edge cases are addressed",
        0.10,
    ),
    Category::new(
        CategoryId::Scope,
        "Scope & Routing",
        "Single responsibility with clear positive and negative routing signals",
        0.10,
    ),
    Category::new(
        CategoryId::Documentation,
        "Documentation",
        "Examples, inputs and outputs, limitations, troubleshooting and templates",
        0.10,
    ),
    Category::new(
        CategoryId::Portability,
        "Portability",
        "No OS-specific assumptions or hardcoded filesystem paths",
        0.10,
    ),
];

/// Rubric configuration failures. Always fatal at load time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RubricError {
    #[error("category weights sum to {total:.4}, expected 1.0 (tolerance 0.001)")]
    WeightSum { total: f64 },
    #[error("category '{id}' has weight {weight}, expected a value in (0, 1]")]
    InvalidWeight { id: CategoryId, weight: f64 },
    #[error("rubric is missing category '{0}'")]
    MissingCategory(CategoryId),
    #[error("rubric declares category '{0}' more than once")]
    DuplicateCategory(CategoryId),
    #[error("unknown rubric category '{0}'")]
    UnknownCategory(String),
}

/// Validated, read-only category table.
///
/// The only way to obtain one is through [`Rubric::new`], so an engine can never
/// score with weights that fail the sum invariant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rubric {
    categories: Vec<Category>,
}

impl Rubric {
    pub fn new(categories: Vec<Category>) -> Result<Self, RubricError> {
        for category in &categories {
            if !(category.weight > 0.0 && category.weight <= 1.0) {
                return Err(RubricError::InvalidWeight {
                    id: category.id,
                    weight: category.weight,
                });
            }
        }

        for id in CategoryId::ALL {
            match categories.iter().filter(|category| category.id == id).count() {
                0 => return Err(RubricError::MissingCategory(id)),
                1 => {}
                _ => return Err(RubricError::DuplicateCategory(id)),
            }
        }

        let total: f64 = categories.iter().map(|category| category.weight).sum();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(RubricError::WeightSum { total });
        }

        Ok(Self { categories })
    }

    pub fn standard() -> Result<Self, RubricError> {
        Self::new(STANDARD_CATEGORIES.to_vec())
    }

    /// Replace weights by category key and re-validate the whole table.
    pub fn with_weight_overrides(
        &self,
        overrides: &BTreeMap<String, f64>,
    ) -> Result<Self, RubricError> {
        let mut categories = self.categories.clone();

        for (key, weight) in overrides {
            let id = CategoryId::from_key(key)
                .ok_or_else(|| RubricError::UnknownCategory(key.clone()))?;
            if let Some(category) = categories.iter_mut().find(|category| category.id == id) {
                category.weight = *weight;
            }
        }

        Self::new(categories)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn total_weight(&self) -> f64 {
        self.categories.iter().map(|category| category.weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_rubric_weights_sum_to_one() {
        let rubric = Rubric::standard().expect("standard rubric is valid");

        assert_eq!(rubric.categories().len(), 8);
        assert!((rubric.total_weight() - 1.0).abs() <= WEIGHT_TOLERANCE);
        let order: Vec<CategoryId> = rubric.categories().iter().map(|c| c.id).collect();
        assert_eq!(order, CategoryId::ALL.to_vec());
        assert!(rubric
            .categories()
            .iter()
            .all(|category| category.max_score == MAX_CATEGORY_SCORE));
    }

    #[test]
    fn rejects_weights_that_do_not_sum_to_one() {
        let mut categories = STANDARD_CATEGORIES.to_vec();
        categories[2].weight = 0.30;

        let err = Rubric::new(categories).expect_err("skewed weights rejected");

        match err {
            RubricError::WeightSum { total } => assert!((total - 1.10).abs() < 1e-9),
            other => panic!("expected weight sum error, got {other:?}"),
        }
    }

    #[test]
    fn tolerates_rounding_drift_within_tolerance() {
        let mut categories = STANDARD_CATEGORIES.to_vec();
        categories[0].weight = 0.1505;

        assert!(Rubric::new(categories).is_ok());
    }

    #[test]
    fn rejects_missing_and_duplicate_categories() {
        let mut missing = STANDARD_CATEGORIES.to_vec();
        missing.pop();
        assert_eq!(
            Rubric::new(missing),
            Err(RubricError::MissingCategory(CategoryId::Portability))
        );

        let mut duplicate = STANDARD_CATEGORIES.to_vec();
        duplicate[7] = duplicate[6];
        assert_eq!(
            Rubric::new(duplicate),
            Err(RubricError::DuplicateCategory(CategoryId::Documentation))
        );

        let mut extra = STANDARD_CATEGORIES.to_vec();
        extra.push(STANDARD_CATEGORIES[0]);
        assert_eq!(
            Rubric::new(extra),
            Err(RubricError::DuplicateCategory(CategoryId::Structure))
        );
    }

    #[test]
    fn rejects_non_positive_weight() {
        let mut categories = STANDARD_CATEGORIES.to_vec();
        categories[3].weight = 0.0;

        assert_eq!(
            Rubric::new(categories),
            Err(RubricError::InvalidWeight {
                id: CategoryId::Dependencies,
                weight: 0.0,
            })
        );
    }

    #[test]
    fn overrides_are_revalidated() {
        let rubric = Rubric::standard().expect("standard rubric is valid");

        let mut balanced = BTreeMap::new();
        balanced.insert("safety".to_string(), 0.25);
        balanced.insert("error-handling".to_string(), 0.05);
        let tuned = rubric
            .with_weight_overrides(&balanced)
            .expect("balanced overrides accepted");
        assert_eq!(
            tuned.category(CategoryId::Safety).map(|c| c.weight),
            Some(0.25)
        );

        let mut skewed = BTreeMap::new();
        skewed.insert("safety".to_string(), 0.5);
        assert!(matches!(
            rubric.with_weight_overrides(&skewed),
            Err(RubricError::WeightSum { .. })
        ));

        let mut unknown = BTreeMap::new();
        unknown.insert("style".to_string(), 0.1);
        assert_eq!(
            rubric.with_weight_overrides(&unknown),
            Err(RubricError::UnknownCategory("style".to_string()))
        );
    }
}
