use pantry_domain::{
	instructions, matcher,
	recipe::{GeneratedRecipe, IngredientSlot, MealRecord, NormalizedRecipe, RecipeSource},
};

fn meal(pairs: &[(&str, &str)]) -> MealRecord {
	MealRecord {
		id: "52772".to_string(),
		title: "Teriyaki Chicken Casserole".to_string(),
		category: Some("Chicken".to_string()),
		cuisine: Some("Japanese".to_string()),
		instructions: Some(
			"Preheat oven to 350 degrees. Combine soy sauce and honey in a pan. Bake for 20 minutes."
				.to_string(),
		),
		thumbnail: Some("https://example.test/thumb.jpg".to_string()),
		source_url: Some(String::new()),
		video_url: Some("https://example.test/watch".to_string()),
		slots: pairs
			.iter()
			.map(|(measure, ingredient)| IngredientSlot {
				ingredient: Some(ingredient.to_string()),
				measure: Some(measure.to_string()),
			})
			.collect(),
	}
}

#[test]
fn flour_and_egg_both_found() {
	let record = meal(&[("2 cups", "all-purpose flour"), ("1", "egg")]);

	assert_eq!(matcher::score(&record, &["flour", "egg"]), 100);
}

#[test]
fn half_of_user_ingredients_found() {
	let record = meal(&[("2 cups", "all-purpose flour"), ("1", "egg")]);

	assert_eq!(matcher::score(&record, &["flour", "chocolate"]), 50);
}

#[test]
fn sugar_found_by_substring() {
	let record = meal(&[("1 tbsp", "sugar")]);

	assert_eq!(matcher::score(&record, &["sugar"]), 100);
}

#[test]
fn short_tokens_match_inside_longer_words() {
	// Substring matching is intentionally loose: "oil" is found inside "boiled".
	let record = meal(&[("2", "boiled potatoes")]);

	assert_eq!(matcher::score(&record, &["oil"]), 100);
}

#[test]
fn corpus_mapping_carries_provenance_and_score() {
	let record = meal(&[("2 cups", "flour")]);
	let recipe = NormalizedRecipe::from_corpus(&record, 75);

	assert_eq!(recipe.source, RecipeSource::Corpus);
	assert_eq!(recipe.external_id.as_deref(), Some("52772"));
	assert_eq!(recipe.match_percentage, Some(75));
	assert_eq!(recipe.description, "Japanese Chicken");
	assert_eq!(recipe.ingredients, vec!["2 cups flour"]);
	assert_eq!(recipe.instructions.len(), 3);
	assert_eq!(recipe.source_url, None);
	assert_eq!(recipe.youtube_url.as_deref(), Some("https://example.test/watch"));
	assert_eq!(recipe.image_url.as_deref(), Some("https://example.test/thumb.jpg"));
	assert!(recipe.cook_time.is_none() && recipe.servings.is_none());
}

#[test]
fn generated_mapping_drops_corpus_fields() {
	let recipe = NormalizedRecipe::from_generated(GeneratedRecipe {
		title: "Fried Rice".to_string(),
		description: "Leftover rice, upgraded.".to_string(),
		cook_time: Some("15 minutes".to_string()),
		servings: Some(2),
		difficulty: Some("easy".to_string()),
		ingredients: vec!["2 cups rice".to_string()],
		instructions: vec!["Fry the rice.".to_string()],
	});

	assert_eq!(recipe.source, RecipeSource::Generated);
	assert!(recipe.external_id.is_none());
	assert!(recipe.match_percentage.is_none());
	assert!(recipe.image_url.is_none() && recipe.category.is_none() && recipe.cuisine.is_none());
	assert_eq!(recipe.cook_time.as_deref(), Some("15 minutes"));
}

#[test]
fn normalized_recipe_uses_camel_case_keys() {
	let record = meal(&[("1", "egg")]);
	let json = serde_json::to_value(NormalizedRecipe::from_corpus(&record, 100))
		.expect("serialize failed");

	assert_eq!(json["source"], "corpus");
	assert_eq!(json["externalId"], "52772");
	assert_eq!(json["matchPercentage"], 100);
	assert!(json["sourceUrl"].is_null());
	assert!(json["youtubeUrl"].is_string());
}

#[test]
fn sentence_fallback_yields_period_terminated_steps() {
	let steps = instructions::segment("Preheat oven. Mix flour and eggs. Bake for 20 minutes.");

	assert_eq!(steps.len(), 3);
	assert!(steps.iter().all(|step| step.ends_with('.')));
	assert!(steps.iter().all(|step| !step.starts_with(char::is_numeric)));
}
