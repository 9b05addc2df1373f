mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, CorpusProviderConfig, LlmProviderConfig, Matching, Providers, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}

	let corpus = &cfg.providers.corpus;

	if corpus.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.corpus.api_base must be non-empty.".to_string(),
		});
	}
	if corpus.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.corpus.timeout_ms must be greater than zero.".to_string(),
		});
	}

	let generator = &cfg.providers.generator;

	for (label, value) in [
		("providers.generator.api_base", &generator.api_base),
		("providers.generator.api_key", &generator.api_key),
		("providers.generator.model", &generator.model),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if generator.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.generator.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if !generator.temperature.is_finite() || generator.temperature < 0.0 {
		return Err(Error::Validation {
			message: "providers.generator.temperature must be a finite number, zero or greater."
				.to_string(),
		});
	}

	let matching = &cfg.matching;

	if matching.max_search_ingredients == 0 {
		return Err(Error::Validation {
			message: "matching.max_search_ingredients must be greater than zero.".to_string(),
		});
	}
	if matching.max_detail_fetches == 0 {
		return Err(Error::Validation {
			message: "matching.max_detail_fetches must be greater than zero.".to_string(),
		});
	}
	if matching.max_results == 0 {
		return Err(Error::Validation {
			message: "matching.max_results must be greater than zero.".to_string(),
		});
	}
	if matching.min_match_percent > 100 {
		return Err(Error::Validation {
			message: "matching.min_match_percent must be in the range 0-100.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for base in [&mut cfg.providers.corpus.api_base, &mut cfg.providers.generator.api_base] {
		let trimmed = base.trim().trim_end_matches('/').to_string();

		*base = trimmed;
	}
}
