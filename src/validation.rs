use crate::model::Recipe;
use serde::Serialize;
use std::collections::BTreeMap;

pub const MAX_TITLE_LENGTH: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldErrorCode {
    TooLong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub code: FieldErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Outcome of checking a [`Recipe`] against the required-field rules.
///
/// `missing_fields` and `invalid_fields` keep the order in which the checks
/// run and never hold duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub missing_fields: Vec<String>,
    pub invalid_fields: Vec<String>,
    pub warnings: Vec<String>,
    pub field_errors: BTreeMap<String, FieldError>,
}

impl ValidationResult {
    /// One-line description of what is wrong, for error messages and logs.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.missing_fields.is_empty() {
            parts.push(format!("missing {}", self.missing_fields.join(", ")));
        }
        if !self.invalid_fields.is_empty() {
            parts.push(format!("invalid {}", self.invalid_fields.join(", ")));
        }
        if parts.is_empty() {
            "valid".to_string()
        } else {
            parts.join("; ")
        }
    }
}

/// Checks a candidate record. Pure: the record is not touched.
pub fn validate(recipe: &Recipe) -> ValidationResult {
    let mut missing_fields = Vec::new();
    let mut invalid_fields = Vec::new();
    let mut warnings = Vec::new();
    let mut field_errors = BTreeMap::new();

    let title = recipe.title.trim();
    if title.is_empty() {
        missing_fields.push("title".to_string());
    }
    if recipe.source.trim().is_empty() {
        missing_fields.push("source".to_string());
    }
    if recipe.ingredients.is_empty() {
        missing_fields.push("ingredients".to_string());
    }
    if recipe.instructions.is_empty() {
        missing_fields.push("instructions".to_string());
    }

    if title.chars().count() > MAX_TITLE_LENGTH {
        invalid_fields.push("title".to_string());
        field_errors.insert(
            "title".to_string(),
            FieldError {
                code: FieldErrorCode::TooLong,
                message: format!("Title must be {MAX_TITLE_LENGTH} characters or less"),
                value: Some(recipe.title.clone()),
            },
        );
    }

    if recipe.image_url.is_none() {
        warnings.push("No image URL provided".to_string());
    }
    if !recipe.has_timing() {
        warnings.push("No timing information available".to_string());
    }
    if recipe.servings.is_none() {
        warnings.push("No serving size information".to_string());
    }

    ValidationResult {
        is_valid: missing_fields.is_empty() && invalid_fields.is_empty(),
        missing_fields,
        invalid_fields,
        warnings,
        field_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_recipe() -> Recipe {
        let mut recipe = Recipe::new("https://example.com/cookies");
        recipe.title = "Chocolate Chip Cookies".to_string();
        recipe.set_ingredients(["2 cups flour", "1 cup sugar"]);
        recipe.set_instructions(["Mix.", "Bake at 350F."]);
        recipe.image_url = Some("https://example.com/cookies.jpg".to_string());
        recipe.total_time = Some("PT30M".to_string());
        recipe.servings = Some("24".to_string());
        recipe
    }

    #[test]
    fn test_complete_recipe_is_valid_without_warnings() {
        let result = validate(&complete_recipe());
        assert!(result.is_valid);
        assert!(result.missing_fields.is_empty());
        assert!(result.warnings.is_empty());
        assert_eq!(result.summary(), "valid");
    }

    #[test]
    fn test_missing_instructions_only() {
        let mut recipe = complete_recipe();
        recipe.instructions.clear();

        let result = validate(&recipe);
        assert!(!result.is_valid);
        assert_eq!(result.missing_fields, vec!["instructions"]);
        assert!(result.invalid_fields.is_empty());
    }

    #[test]
    fn test_title_too_long() {
        let mut recipe = complete_recipe();
        recipe.title = "a".repeat(250);

        let result = validate(&recipe);
        assert!(!result.is_valid);
        assert_eq!(result.invalid_fields, vec!["title"]);
        assert_eq!(result.field_errors["title"].code, FieldErrorCode::TooLong);
        assert_eq!(
            result.field_errors["title"].message,
            "Title must be 200 characters or less"
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["fieldErrors"]["title"]["code"], "TOO_LONG");
    }

    #[test]
    fn test_title_length_counts_characters_not_bytes() {
        let mut recipe = complete_recipe();
        recipe.title = "é".repeat(MAX_TITLE_LENGTH);
        assert!(validate(&recipe).is_valid);
    }

    #[test]
    fn test_warnings_never_affect_validity() {
        let mut recipe = complete_recipe();
        recipe.image_url = None;
        recipe.total_time = None;
        recipe.servings = None;

        let result = validate(&recipe);
        assert!(result.is_valid);
        assert_eq!(
            result.warnings,
            vec![
                "No image URL provided",
                "No timing information available",
                "No serving size information"
            ]
        );
    }

    #[test]
    fn test_validity_matches_required_fields_for_every_combination() {
        for mask in 0..32u8 {
            let mut recipe = complete_recipe();
            if mask & 1 != 0 {
                recipe.title.clear();
            }
            if mask & 2 != 0 {
                recipe.source.clear();
            }
            if mask & 4 != 0 {
                recipe.ingredients.clear();
            }
            if mask & 8 != 0 {
                recipe.instructions.clear();
            }
            if mask & 16 != 0 && !recipe.title.is_empty() {
                recipe.title = "t".repeat(MAX_TITLE_LENGTH + 1);
            }

            let expected = !recipe.title.is_empty()
                && !recipe.source.is_empty()
                && !recipe.ingredients.is_empty()
                && !recipe.instructions.is_empty()
                && recipe.title.chars().count() <= MAX_TITLE_LENGTH;
            assert_eq!(validate(&recipe).is_valid, expected, "mask {mask:05b}");
        }
    }

    #[test]
    fn test_missing_fields_reported_in_check_order() {
        let result = validate(&Recipe::default());
        assert_eq!(
            result.missing_fields,
            vec!["title", "source", "ingredients", "instructions"]
        );
    }
}
