use std::time::Duration;

use futures::future;
use tokio::time;

use pantry_domain::{
	matcher,
	recipe::{MealRecord, NormalizedRecipe},
};

use crate::{Error, PantryService, Result};

impl PantryService {
	/// Score the top corpus candidates against every user ingredient and keep the best.
	///
	/// Detail fetches are capped at `matching.max_detail_fetches` regardless of
	/// `max_results`. Scoring uses the full ingredient list, not the search cap.
	pub async fn rank(
		&self,
		ingredients: &[String],
		min_match_percent: u8,
		max_results: usize,
	) -> Result<Vec<NormalizedRecipe>> {
		if min_match_percent > 100 {
			return Err(Error::InvalidRequest {
				message: "min_match_percent must be in the range 0-100.".to_string(),
			});
		}

		let tallies = self.aggregate(ingredients).await;

		if tallies.is_empty() {
			tracing::info!("No corpus candidates found.");

			return Ok(Vec::new());
		}

		let fetch_cap = self.cfg.matching.max_detail_fetches.min(tallies.len());
		let records = future::join_all(
			tallies[..fetch_cap].iter().map(|tally| self.fetch_details_isolated(&tally.id)),
		)
		.await;
		let fetched = records.iter().flatten().count();
		let mut scored: Vec<(MealRecord, u8)> = records
			.into_iter()
			.flatten()
			.map(|record| {
				let score = matcher::score(&record, ingredients);

				(record, score)
			})
			.filter(|(_, score)| *score >= min_match_percent)
			.collect();

		scored.sort_by(|a, b| b.1.cmp(&a.1));
		scored.truncate(max_results);

		tracing::info!(
			requested = fetch_cap,
			fetched,
			kept = scored.len(),
			min_match_percent,
			"Corpus candidates ranked."
		);

		Ok(scored
			.iter()
			.map(|(record, score)| NormalizedRecipe::from_corpus(record, *score))
			.collect())
	}

	async fn fetch_details_isolated(&self, meal_id: &str) -> Option<MealRecord> {
		let cfg = &self.cfg.providers.corpus;
		let fetch = self.providers.corpus.fetch_details(cfg, meal_id);

		match time::timeout(Duration::from_millis(cfg.timeout_ms), fetch).await {
			Ok(Ok(Some(record))) => Some(record),
			Ok(Ok(None)) => {
				tracing::warn!(meal_id, "Corpus record not found; skipping candidate.");

				None
			},
			Ok(Err(err)) => {
				tracing::warn!(
					meal_id,
					error = %err,
					"Corpus detail fetch failed; skipping candidate."
				);

				None
			},
			Err(_) => {
				tracing::warn!(
					meal_id,
					timeout_ms = cfg.timeout_ms,
					"Corpus detail fetch timed out; skipping candidate."
				);

				None
			},
		}
	}
}
