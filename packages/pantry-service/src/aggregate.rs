use std::{
	collections::{HashMap, HashSet},
	time::Duration,
};

use futures::future;
use tokio::time;

use pantry_domain::recipe::{CandidateTally, CorpusCandidate};

use crate::PantryService;

impl PantryService {
	/// Search the corpus once per ingredient and tally how many searches surfaced each recipe.
	///
	/// Only the first `matching.max_search_ingredients` ingredients are searched. Tallies come
	/// back ordered by descending match count, ties in first-seen order.
	pub async fn aggregate(&self, ingredients: &[String]) -> Vec<CandidateTally> {
		if ingredients.is_empty() {
			return Vec::new();
		}

		let cap = self.cfg.matching.max_search_ingredients.min(ingredients.len());
		let searched = &ingredients[..cap];

		tracing::info!(
			searched = searched.len(),
			ignored = ingredients.len() - searched.len(),
			"Searching corpus by ingredient."
		);

		let results =
			future::join_all(searched.iter().map(|ingredient| self.search_isolated(ingredient)))
				.await;
		let tallies = merge_tallies(searched.iter().map(String::as_str).zip(results));

		tracing::info!(candidates = tallies.len(), "Corpus candidates tallied.");

		tallies
	}

	async fn search_isolated(&self, ingredient: &str) -> Vec<CorpusCandidate> {
		let cfg = &self.cfg.providers.corpus;
		let search = self.providers.corpus.search(cfg, ingredient);

		match time::timeout(Duration::from_millis(cfg.timeout_ms), search).await {
			Ok(Ok(candidates)) => candidates,
			Ok(Err(err)) => {
				tracing::warn!(
					ingredient,
					error = %err,
					"Corpus search failed; treating as no hits."
				);

				Vec::new()
			},
			Err(_) => {
				tracing::warn!(
					ingredient,
					timeout_ms = cfg.timeout_ms,
					"Corpus search timed out; treating as no hits."
				);

				Vec::new()
			},
		}
	}
}

/// Fold per-ingredient search results into tallies keyed by candidate id.
///
/// A candidate is counted at most once per search, however often it repeats in that result
/// list.
pub(crate) fn merge_tallies<'a, I>(results: I) -> Vec<CandidateTally>
where
	I: IntoIterator<Item = (&'a str, Vec<CorpusCandidate>)>,
{
	let mut tallies: Vec<CandidateTally> = Vec::new();
	let mut index: HashMap<String, usize> = HashMap::new();

	for (ingredient, candidates) in results {
		let mut seen = HashSet::new();

		for candidate in candidates {
			if !seen.insert(candidate.id.clone()) {
				continue;
			}

			let slot = *index.entry(candidate.id.clone()).or_insert_with(|| {
				tallies.push(CandidateTally::new(&candidate));

				tallies.len() - 1
			});
			let tally = &mut tallies[slot];

			tally.match_count += 1;
			tally.matched_ingredients.push(ingredient.to_string());
		}
	}

	tallies.sort_by(|a, b| b.match_count.cmp(&a.match_count));

	tallies
}
