//! Fixture settings.
//!
//! Settings can come from defaults, a `.toml`/`.json` file, or environment
//! variables prefixed with `MCFLY_`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::faker::Locale;

/// Environment variable holding the faker locale.
pub const LOCALE_ENV: &str = "MCFLY_LOCALE";

/// Environment variable holding the random seed.
pub const SEED_ENV: &str = "MCFLY_SEED";

/// Settings applied to a [`FixtureContext`](crate::FixtureContext).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FixtureSettings {
	/// Locale of generated data.
	#[serde(default)]
	pub locale: Locale,

	/// Seed for the faker and for random selection. Unset means entropy.
	#[serde(default)]
	pub seed: Option<u64>,
}

impl FixtureSettings {
	/// Creates settings with defaults (`fr_FR`, unseeded).
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the locale.
	pub fn with_locale(mut self, locale: Locale) -> Self {
		self.locale = locale;
		self
	}

	/// Sets the seed.
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	/// Loads settings from the environment, falling back to defaults.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::Validation`] if a variable is set to a value
	/// that cannot be parsed.
	pub fn from_env() -> Result<Self, SettingsError> {
		Self::default().merge_env()
	}

	/// Overrides fields with the environment variables that are set.
	pub fn merge_env(mut self) -> Result<Self, SettingsError> {
		if let Ok(locale) = std::env::var(LOCALE_ENV) {
			self.locale = locale.parse()?;
		}

		if let Ok(seed) = std::env::var(SEED_ENV) {
			let seed = seed.trim().parse::<u64>().map_err(|_| {
				SettingsError::Validation(format!(
					"{} must be an unsigned integer, got {:?}",
					SEED_ENV, seed
				))
			})?;
			self.seed = Some(seed);
		}

		Ok(self)
	}

	/// Loads settings from a `.toml` or `.json` file.
	pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
		let path = path.into();
		let contents = std::fs::read_to_string(&path).map_err(|e| {
			SettingsError::File(format!("Failed to read {}: {}", path.display(), e))
		})?;

		match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => toml::from_str(&contents)
				.map_err(|e| SettingsError::Parse(format!("TOML parse error: {}", e))),
			Some("json") => serde_json::from_str(&contents)
				.map_err(|e| SettingsError::Parse(format!("JSON parse error: {}", e))),
			_ => Err(SettingsError::UnsupportedFormat(
				"Supported formats: .toml, .json".to_string(),
			)),
		}
	}
}

/// Settings error
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	/// The settings file could not be read.
	#[error("File error: {0}")]
	File(String),

	/// The settings file is malformed.
	#[error("Parse error: {0}")]
	Parse(String),

	/// A value is out of range or not understood.
	#[error("Validation error: {0}")]
	Validation(String),

	/// The file extension is neither `.toml` nor `.json`.
	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),
}
