use serde::{Deserialize, Serialize};

use crate::instructions;

/// The corpus stores at most this many ingredient/measure slots per record.
pub const MAX_INGREDIENT_SLOTS: usize = 20;

const DEFAULT_DESCRIPTION: &str = "A recipe from the recipe corpus.";

/// Lightweight hit returned by a single-ingredient corpus search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusCandidate {
	pub id: String,
	pub name: String,
	pub thumbnail: Option<String>,
}

/// Per-candidate aggregate over every ingredient search in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTally {
	pub id: String,
	pub name: String,
	pub thumbnail: Option<String>,
	pub match_count: usize,
	pub matched_ingredients: Vec<String>,
}
impl CandidateTally {
	pub fn new(candidate: &CorpusCandidate) -> Self {
		Self {
			id: candidate.id.clone(),
			name: candidate.name.clone(),
			thumbnail: candidate.thumbnail.clone(),
			match_count: 0,
			matched_ingredients: Vec::new(),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSlot {
	pub ingredient: Option<String>,
	pub measure: Option<String>,
}

/// Full corpus record as fetched by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealRecord {
	pub id: String,
	pub title: String,
	pub category: Option<String>,
	pub cuisine: Option<String>,
	pub instructions: Option<String>,
	pub thumbnail: Option<String>,
	pub source_url: Option<String>,
	pub video_url: Option<String>,
	pub slots: Vec<IngredientSlot>,
}
impl MealRecord {
	/// Human-readable ingredient lines such as `"2 cups flour"`.
	///
	/// Blank slots are skipped; the measure is prefixed only when it is non-blank.
	pub fn ingredient_lines(&self) -> Vec<String> {
		self.slots
			.iter()
			.take(MAX_INGREDIENT_SLOTS)
			.filter_map(|slot| {
				let ingredient = slot.ingredient.as_deref().map(str::trim)?;

				if ingredient.is_empty() {
					return None;
				}

				match slot.measure.as_deref().map(str::trim) {
					Some(measure) if !measure.is_empty() => Some(format!("{measure} {ingredient}")),
					_ => Some(ingredient.to_string()),
				}
			})
			.collect()
	}

	fn description(&self) -> String {
		match (non_blank(&self.cuisine), non_blank(&self.category)) {
			(Some(cuisine), Some(category)) => format!("{cuisine} {category}"),
			(Some(only), None) | (None, Some(only)) => only.to_string(),
			(None, None) => DEFAULT_DESCRIPTION.to_string(),
		}
	}
}

/// Recipe shape returned by the generative fallback. Only these fields are trusted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedRecipe {
	pub title: String,
	pub description: String,
	pub cook_time: Option<String>,
	pub servings: Option<u32>,
	pub difficulty: Option<String>,
	pub ingredients: Vec<String>,
	pub instructions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeSource {
	Corpus,
	Generated,
}

/// Engine output schema shared by both sources.
///
/// Corpus entries always carry `external_id` and `match_percentage`; generated entries
/// never do. Optional keys are serialized as `null` rather than omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecipe {
	pub title: String,
	pub description: String,
	pub cook_time: Option<String>,
	pub servings: Option<u32>,
	pub difficulty: Option<String>,
	pub ingredients: Vec<String>,
	pub instructions: Vec<String>,
	pub image_url: Option<String>,
	pub category: Option<String>,
	pub cuisine: Option<String>,
	pub source: RecipeSource,
	pub external_id: Option<String>,
	pub match_percentage: Option<u8>,
	pub source_url: Option<String>,
	pub youtube_url: Option<String>,
}
impl NormalizedRecipe {
	pub fn from_corpus(record: &MealRecord, match_percentage: u8) -> Self {
		Self {
			title: record.title.clone(),
			description: record.description(),
			cook_time: None,
			servings: None,
			difficulty: None,
			ingredients: record.ingredient_lines(),
			instructions: record
				.instructions
				.as_deref()
				.map(instructions::segment)
				.unwrap_or_default(),
			image_url: non_blank(&record.thumbnail).map(str::to_string),
			category: non_blank(&record.category).map(str::to_string),
			cuisine: non_blank(&record.cuisine).map(str::to_string),
			source: RecipeSource::Corpus,
			external_id: Some(record.id.clone()),
			match_percentage: Some(match_percentage.min(100)),
			source_url: non_blank(&record.source_url).map(str::to_string),
			youtube_url: non_blank(&record.video_url).map(str::to_string),
		}
	}

	pub fn from_generated(recipe: GeneratedRecipe) -> Self {
		Self {
			title: recipe.title,
			description: recipe.description,
			cook_time: recipe.cook_time,
			servings: recipe.servings,
			difficulty: recipe.difficulty,
			ingredients: recipe.ingredients,
			instructions: recipe.instructions,
			image_url: None,
			category: None,
			cuisine: None,
			source: RecipeSource::Generated,
			external_id: None,
			match_percentage: None,
			source_url: None,
			youtube_url: None,
		}
	}
}

fn non_blank(value: &Option<String>) -> Option<&str> {
	value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
