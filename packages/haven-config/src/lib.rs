mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	CityState, Config, Lexicon, Pagination, Postgres, PropertySynonym, Ranking, Search, Service,
	Storage,
};

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
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.search.pagination.default_limit == 0 {
		return Err(Error::Validation {
			message: "search.pagination.default_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.search.pagination.max_limit < cfg.search.pagination.default_limit {
		return Err(Error::Validation {
			message: "search.pagination.max_limit must not be less than default_limit.".to_string(),
		});
	}

	let threshold = cfg.search.ranking.similarity_threshold;

	if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
		return Err(Error::Validation {
			message: "search.ranking.similarity_threshold must be in the range 0.0-1.0."
				.to_string(),
		});
	}
	if !cfg.search.ranking.city_bonus.is_finite() || cfg.search.ranking.city_bonus < 0.0 {
		return Err(Error::Validation {
			message: "search.ranking.city_bonus must be zero or greater.".to_string(),
		});
	}

	let lexicon = &cfg.search.lexicon;

	for (label, empty) in [
		("noise_words", lexicon.noise_words.is_empty()),
		("amenities", lexicon.amenities.is_empty()),
		("property_synonyms", lexicon.property_synonyms.is_empty()),
		("cities", lexicon.cities.is_empty()),
		("states", lexicon.states.is_empty()),
	] {
		if empty {
			return Err(Error::Validation {
				message: format!("search.lexicon.{label} must be non-empty."),
			});
		}
	}

	for synonym in &lexicon.property_synonyms {
		if synonym.term.trim().is_empty() || synonym.canonical.trim().is_empty() {
			return Err(Error::Validation {
				message: "search.lexicon.property_synonyms entries must be non-empty.".to_string(),
			});
		}
	}
	for city in &lexicon.cities {
		if city.city.trim().is_empty() || city.state.trim().is_empty() {
			return Err(Error::Validation {
				message: "search.lexicon.cities entries must be non-empty.".to_string(),
			});
		}
	}

	Ok(())
}

// Extractors compare against lowercased text, and the city table is scanned in
// order, so longer names must come first ("victoria island" before any
// single-word Lagos entry would shadow it otherwise).
fn normalize(cfg: &mut Config) {
	let lexicon = &mut cfg.search.lexicon;

	for word in &mut lexicon.noise_words {
		*word = word.trim().to_lowercase();
	}
	for amenity in &mut lexicon.amenities {
		*amenity = amenity.trim().to_lowercase();
	}
	for synonym in &mut lexicon.property_synonyms {
		synonym.term = synonym.term.trim().to_lowercase();
	}
	for city in &mut lexicon.cities {
		city.city = city.city.trim().to_lowercase();
	}

	lexicon.cities.sort_by(|a, b| b.city.len().cmp(&a.city.len()));
}
