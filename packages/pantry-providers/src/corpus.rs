use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

use pantry_domain::recipe::{CorpusCandidate, IngredientSlot, MAX_INGREDIENT_SLOTS, MealRecord};

pub async fn search_by_ingredient(
	cfg: &pantry_config::CorpusProviderConfig,
	ingredient: &str,
) -> Result<Vec<CorpusCandidate>> {
	let json = get_json(cfg, &cfg.search_path, &ingredient.trim().to_lowercase()).await?;

	parse_search_response(json)
}

pub async fn fetch_details(
	cfg: &pantry_config::CorpusProviderConfig,
	meal_id: &str,
) -> Result<Option<MealRecord>> {
	let json = get_json(cfg, &cfg.lookup_path, meal_id).await?;

	parse_lookup_response(json)
}

async fn get_json(
	cfg: &pantry_config::CorpusProviderConfig,
	path: &str,
	param: &str,
) -> Result<Value> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, path);
	let res = client.get(url).query(&[("i", param)]).send().await?;

	Ok(res.error_for_status()?.json().await?)
}

fn meals(json: &Value) -> Result<&[Value]> {
	match json.get("meals") {
		None => Err(eyre::eyre!("Corpus response is missing meals field.")),
		Some(Value::Null) => Ok(&[]),
		Some(Value::Array(items)) => Ok(items.as_slice()),
		Some(_) => Err(eyre::eyre!("Corpus meals field must be an array or null.")),
	}
}

fn parse_search_response(json: Value) -> Result<Vec<CorpusCandidate>> {
	let mut candidates = Vec::new();

	for item in meals(&json)? {
		let Some(id) = string_field(item, "idMeal") else {
			tracing::warn!(
				meal = string_field(item, "strMeal").unwrap_or_default(),
				"Corpus search hit is missing idMeal; skipping it."
			);

			continue;
		};

		candidates.push(CorpusCandidate {
			id,
			name: string_field(item, "strMeal").unwrap_or_default(),
			thumbnail: string_field(item, "strMealThumb"),
		});
	}

	Ok(candidates)
}

fn parse_lookup_response(json: Value) -> Result<Option<MealRecord>> {
	let Some(item) = meals(&json)?.first() else {
		return Ok(None);
	};
	let id = string_field(item, "idMeal")
		.ok_or_else(|| eyre::eyre!("Corpus record is missing idMeal."))?;
	let slots = (1..=MAX_INGREDIENT_SLOTS)
		.map(|n| IngredientSlot {
			ingredient: string_field(item, &format!("strIngredient{n}")),
			measure: string_field(item, &format!("strMeasure{n}")),
		})
		.collect();

	Ok(Some(MealRecord {
		id,
		title: string_field(item, "strMeal").unwrap_or_default(),
		category: string_field(item, "strCategory"),
		cuisine: string_field(item, "strArea"),
		instructions: string_field(item, "strInstructions"),
		thumbnail: string_field(item, "strMealThumb"),
		source_url: string_field(item, "strSource"),
		video_url: string_field(item, "strYoutube"),
		slots,
	}))
}

// Ids occasionally arrive as numbers from mirrors of the corpus.
fn string_field(item: &Value, key: &str) -> Option<String> {
	match item.get(key)? {
		Value::String(value) => Some(value.clone()),
		Value::Number(value) => Some(value.to_string()),
		_ => None,
	}
}
