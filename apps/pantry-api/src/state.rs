use std::sync::Arc;

use pantry_service::{PantryService, Providers};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<PantryService>,
}
impl AppState {
	pub fn new(config: pantry_config::Config) -> Self {
		Self::with_providers(config, Providers::default())
	}

	pub fn with_providers(config: pantry_config::Config, providers: Providers) -> Self {
		Self { service: Arc::new(PantryService::with_providers(config, providers)) }
	}
}
