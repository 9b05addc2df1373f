pub mod aggregate;
pub mod rank;
pub mod suggest;

mod error;

pub use error::{Error, Result};
pub use suggest::{SuggestMetadata, SuggestRequest, SuggestResponse};

use std::{future::Future, pin::Pin, sync::Arc};

use pantry_config::{Config, CorpusProviderConfig, LlmProviderConfig};
use pantry_domain::recipe::{CorpusCandidate, GeneratedRecipe, MealRecord};
use pantry_providers::{corpus, generator};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait CorpusProvider
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		cfg: &'a CorpusProviderConfig,
		ingredient: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Vec<CorpusCandidate>>>;

	fn fetch_details<'a>(
		&'a self,
		cfg: &'a CorpusProviderConfig,
		meal_id: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Option<MealRecord>>>;
}

pub trait GeneratorProvider
where
	Self: Send + Sync,
{
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		ingredients: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<GeneratedRecipe>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub corpus: Arc<dyn CorpusProvider>,
	pub generator: Arc<dyn GeneratorProvider>,
}
impl Providers {
	pub fn new(corpus: Arc<dyn CorpusProvider>, generator: Arc<dyn GeneratorProvider>) -> Self {
		Self { corpus, generator }
	}
}
impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);
		Self { corpus: provider.clone(), generator: provider }
	}
}

/// Stateless recipe matching engine. Safe to share across concurrent requests.
pub struct PantryService {
	pub cfg: Config,
	pub providers: Providers,
}
impl PantryService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		Self { cfg, providers }
	}
}

struct DefaultProviders;
impl CorpusProvider for DefaultProviders {
	fn search<'a>(
		&'a self,
		cfg: &'a CorpusProviderConfig,
		ingredient: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Vec<CorpusCandidate>>> {
		Box::pin(corpus::search_by_ingredient(cfg, ingredient))
	}

	fn fetch_details<'a>(
		&'a self,
		cfg: &'a CorpusProviderConfig,
		meal_id: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Option<MealRecord>>> {
		Box::pin(corpus::fetch_details(cfg, meal_id))
	}
}
impl GeneratorProvider for DefaultProviders {
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		ingredients: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<GeneratedRecipe>>> {
		Box::pin(generator::generate(cfg, ingredients))
	}
}
