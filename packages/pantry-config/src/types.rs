use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub providers: Providers,
	#[serde(default)]
	pub matching: Matching,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub corpus: CorpusProviderConfig,
	pub generator: LlmProviderConfig,
}

/// Read-only recipe corpus speaking the MealDB JSON dialect.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusProviderConfig {
	pub api_base: String,
	#[serde(default = "default_search_path")]
	pub search_path: String,
	#[serde(default = "default_lookup_path")]
	pub lookup_path: String,
	pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	#[serde(default = "default_max_tokens")]
	pub max_tokens: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

/// Knobs for the corpus pipeline and the fallback trigger.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Matching {
	/// Only the first N ingredients are searched in the corpus.
	pub max_search_ingredients: usize,
	/// Upper bound on full-record fetches per request.
	pub max_detail_fetches: usize,
	pub min_match_percent: u8,
	pub max_results: usize,
	/// Fewer corpus results than this triggers the generator.
	pub fallback_floor: usize,
}
impl Default for Matching {
	fn default() -> Self {
		Self {
			max_search_ingredients: 5,
			max_detail_fetches: 15,
			min_match_percent: 50,
			max_results: 10,
			fallback_floor: 5,
		}
	}
}

fn default_search_path() -> String {
	"/filter.php".to_string()
}

fn default_lookup_path() -> String {
	"/lookup.php".to_string()
}

fn default_max_tokens() -> u32 {
	2_500
}
