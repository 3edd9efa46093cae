use crate::normalize::normalize;
use serde::{Deserialize, Serialize};

/// A recipe pulled out of a publisher page.
///
/// Only `title`, `source`, `ingredients` and `instructions` are required for a
/// record to pass [`validate`](crate::validation::validate).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub source: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    pub step_number: u32,
    pub text: String,
}

impl Recipe {
    /// Starts an empty record for `source`.
    pub fn new(source: &str) -> Self {
        Self {
            source: source.trim().to_string(),
            ..Default::default()
        }
    }

    /// Replaces the ingredient list, dropping entries that normalize to nothing.
    pub fn set_ingredients<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ingredients = items
            .into_iter()
            .map(|item| normalize(item.as_ref()))
            .filter(|text| !text.is_empty())
            .map(|text| Ingredient { text })
            .collect();
    }

    /// Replaces the instruction list and renumbers it from 1 with no gaps.
    pub fn set_instructions<I, S>(&mut self, steps: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.instructions = steps
            .into_iter()
            .map(|step| normalize(step.as_ref()))
            .filter(|text| !text.is_empty())
            .zip(1..)
            .map(|(text, step_number)| Instruction { step_number, text })
            .collect();
    }

    /// Appends tags, skipping empty and already present ones.
    pub fn add_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in tags {
            let tag = normalize(tag.as_ref());
            if !tag.is_empty() && !self.tags.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
                self.tags.push(tag);
            }
        }
    }

    pub fn has_timing(&self) -> bool {
        self.prep_time.is_some() || self.cook_time.is_some() || self.total_time.is_some()
    }
}
