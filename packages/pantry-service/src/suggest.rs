use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time;

use pantry_domain::recipe::NormalizedRecipe;

use crate::{Error, PantryService, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestRequest {
	pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestResponse {
	/// Corpus recipes first, then generated ones.
	pub recipes: Vec<NormalizedRecipe>,
	pub metadata: SuggestMetadata,
}

/// Per-source counts; `total_recipes` always equals `corpus_count + generated_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestMetadata {
	pub total_recipes: usize,
	pub corpus_count: usize,
	pub generated_count: usize,
	#[serde(rename = "ingredients")]
	pub ingredient_count: usize,
}

impl PantryService {
	/// Corpus matches first; the generator only tops up when the corpus yields fewer than
	/// `matching.fallback_floor` recipes. Neither source can fail the request.
	pub async fn suggest(&self, req: SuggestRequest) -> Result<SuggestResponse> {
		if req.ingredients.is_empty() {
			return Err(Error::InvalidRequest {
				message: "ingredients array is required.".to_string(),
			});
		}

		let matching = &self.cfg.matching;
		let corpus = match self
			.rank(&req.ingredients, matching.min_match_percent, matching.max_results)
			.await
		{
			Ok(recipes) => recipes,
			Err(err) => {
				tracing::warn!(
					error = %err,
					"Corpus pipeline failed; continuing without corpus results."
				);

				Vec::new()
			},
		};
		let generated = if corpus.len() < matching.fallback_floor {
			tracing::info!(
				corpus_count = corpus.len(),
				fallback_floor = matching.fallback_floor,
				"Too few corpus recipes; invoking generator."
			);

			self.generate_isolated(&req.ingredients).await
		} else {
			Vec::new()
		};
		let metadata = SuggestMetadata {
			total_recipes: corpus.len() + generated.len(),
			corpus_count: corpus.len(),
			generated_count: generated.len(),
			ingredient_count: req.ingredients.len(),
		};
		let mut recipes = corpus;

		recipes.extend(generated);

		tracing::info!(
			total = metadata.total_recipes,
			corpus = metadata.corpus_count,
			generated = metadata.generated_count,
			"Recipe suggestions assembled."
		);

		Ok(SuggestResponse { recipes, metadata })
	}

	async fn generate_isolated(&self, ingredients: &[String]) -> Vec<NormalizedRecipe> {
		let cfg = &self.cfg.providers.generator;
		let generate = self.providers.generator.generate(cfg, ingredients);

		match time::timeout(Duration::from_millis(cfg.timeout_ms), generate).await {
			Ok(Ok(recipes)) => recipes.into_iter().map(NormalizedRecipe::from_generated).collect(),
			Ok(Err(err)) => {
				tracing::warn!(
					provider_id = %cfg.provider_id,
					error = %err,
					"Recipe generation failed; continuing without generated results."
				);

				Vec::new()
			},
			Err(_) => {
				tracing::warn!(
					provider_id = %cfg.provider_id,
					timeout_ms = cfg.timeout_ms,
					"Recipe generation timed out; continuing without generated results."
				);

				Vec::new()
			},
		}
	}
}
