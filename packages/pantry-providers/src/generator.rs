use std::time::Duration;

use color_eyre::{
	Result,
	eyre::{self, WrapErr},
};
use reqwest::{
	Client,
	header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;

use pantry_domain::recipe::GeneratedRecipe;

const SYSTEM_PROMPT: &str = r#"You are a creative home chef. Given a list of available ingredients, suggest 3-5 practical recipes that primarily use those ingredients. You may include common pantry staples (salt, pepper, oil, butter, garlic) even if not listed. Return ONLY valid JSON in this exact format, no markdown fencing:
{
  "recipes": [
    {
      "title": "Recipe Name",
      "description": "Brief one-sentence description",
      "cookTime": "25 minutes",
      "servings": 4,
      "difficulty": "easy",
      "ingredients": ["2 eggs", "1 cup flour"],
      "instructions": ["Step 1...", "Step 2..."]
    }
  ]
}
Difficulty must be one of: easy, medium, hard.
Keep instructions clear and concise. Prefer recipes that use more of the given ingredients. Vary the recipes in style."#;

pub async fn generate(
	cfg: &pantry_config::LlmProviderConfig,
	ingredients: &[String],
) -> Result<Vec<GeneratedRecipe>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"max_tokens": cfg.max_tokens,
		"messages": build_messages(ingredients),
	});
	let res = client
		.post(&url)
		.headers(request_headers(cfg)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_generator_response(json)
}

/// Bearer token for the generator plus any configured `default_headers`.
pub fn request_headers(cfg: &pantry_config::LlmProviderConfig) -> Result<HeaderMap> {
	let provider = cfg.provider_id.as_str();
	let mut headers = HeaderMap::new();
	let bearer = HeaderValue::from_str(&format!("Bearer {}", cfg.api_key.trim()))
		.wrap_err_with(|| format!("Generator {provider} api_key is not a valid header value."))?;

	headers.insert(AUTHORIZATION, bearer);

	for (key, value) in &cfg.default_headers {
		let raw = value.as_str().ok_or_else(|| {
			eyre::eyre!("Generator {provider} default header {key} must be a string.")
		})?;
		let name = HeaderName::from_bytes(key.as_bytes())
			.wrap_err_with(|| format!("Generator {provider} header name {key} is invalid."))?;
		let value = HeaderValue::from_str(raw)
			.wrap_err_with(|| format!("Generator {provider} header {key} has an invalid value."))?;

		headers.insert(name, value);
	}

	Ok(headers)
}

pub fn build_messages(ingredients: &[String]) -> Vec<Value> {
	vec![
		serde_json::json!({ "role": "system", "content": SYSTEM_PROMPT }),
		serde_json::json!({
			"role": "user",
			"content": format!(
				"I have these ingredients available: {}. What can I make?",
				ingredients.join(", ")
			),
		}),
	]
}

fn parse_generator_response(json: Value) -> Result<Vec<GeneratedRecipe>> {
	let content = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.ok_or_else(|| eyre::eyre!("Generator response is missing message content."))?;
	let parsed: Value = serde_json::from_str(strip_code_fence(content))
		.map_err(|_| eyre::eyre!("Generator content is not valid JSON."))?;
	let recipes = parsed
		.get("recipes")
		.and_then(|v| v.as_array())
		.ok_or_else(|| eyre::eyre!("Generator content is missing recipes array."))?;

	Ok(recipes.iter().filter_map(parse_recipe).collect())
}

fn strip_code_fence(content: &str) -> &str {
	let trimmed = content.trim();
	let Some(rest) = trimmed.strip_prefix("```") else {
		return trimmed;
	};
	let rest = rest.strip_prefix("json").or_else(|| rest.strip_prefix("JSON")).unwrap_or(rest);

	rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn parse_recipe(item: &Value) -> Option<GeneratedRecipe> {
	let title = text(item, "title").filter(|t| !t.trim().is_empty())?;

	Some(GeneratedRecipe {
		title,
		description: text(item, "description").unwrap_or_default(),
		cook_time: text(item, "cookTime"),
		servings: servings(item.get("servings")),
		difficulty: text(item, "difficulty"),
		ingredients: text_list(item, "ingredients"),
		instructions: text_list(item, "instructions"),
	})
}

fn text(item: &Value, key: &str) -> Option<String> {
	item.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

fn text_list(item: &Value, key: &str) -> Vec<String> {
	item.get(key)
		.and_then(|v| v.as_array())
		.map(|arr| arr.iter().filter_map(|v| v.as_str()).map(str::to_string).collect())
		.unwrap_or_default()
}

// Models sometimes answer "4" or "4 servings" instead of a bare number.
fn servings(value: Option<&Value>) -> Option<u32> {
	match value? {
		Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
		Value::String(s) => {
			let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();

			digits.parse().ok()
		},
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn reply(content: &str) -> Value {
		serde_json::json!({
			"choices": [
				{ "message": { "content": content } }
			]
		})
	}

	#[test]
	fn parses_fenced_recipes() {
		let content = "```json\n{\"recipes\": [{\"title\": \"Omelette\", \"servings\": \"2 servings\", \"ingredients\": [\"2 eggs\"], \"instructions\": [\"Whisk.\", \"Cook.\"]}]}\n```";
		let recipes = parse_generator_response(reply(content)).expect("parse failed");

		assert_eq!(recipes.len(), 1);
		assert_eq!(recipes[0].title, "Omelette");
		assert_eq!(recipes[0].servings, Some(2));
		assert_eq!(recipes[0].instructions.len(), 2);
		assert_eq!(recipes[0].description, "");
	}

	#[test]
	fn drops_untitled_entries() {
		let content = r#"{"recipes": [{"title": " "}, {"description": "x"}, {"title": "Soup", "servings": 4}]}"#;
		let recipes = parse_generator_response(reply(content)).expect("parse failed");

		assert_eq!(recipes.len(), 1);
		assert_eq!(recipes[0].servings, Some(4));
	}

	#[test]
	fn rejects_non_json_content() {
		assert!(parse_generator_response(reply("Sorry, I cannot help.")).is_err());
	}

	#[test]
	fn strips_plain_fence() {
		assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
		assert_eq!(strip_code_fence("  {\"a\": 1} "), "{\"a\": 1}");
	}

	#[test]
	fn user_message_lists_ingredients() {
		let messages = build_messages(&["eggs".to_string(), "rice".to_string()]);

		assert_eq!(messages.len(), 2);
		assert_eq!(
			messages[1]["content"],
			"I have these ingredients available: eggs, rice. What can I make?"
		);
	}
}
