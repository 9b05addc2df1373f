pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Provider failures never surface here; the pipeline downgrades them to fewer results.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
}
