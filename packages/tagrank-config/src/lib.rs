mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Neo4j, Ranking, Service, Storage};

use std::{env, fs, path::Path};

pub const ENV_NEO4J_URI: &str = "NEO4J_URI";
pub const ENV_NEO4J_USER: &str = "NEO4J_USER";
pub const ENV_NEO4J_PASSWORD: &str = "NEO4J_PASSWORD";

const SUPPORTED_SCHEMES: [&str; 2] = ["bolt://", "neo4j://"];

pub fn load(path: &Path) -> Result<Config> {
	load_with_env(path, |key| env::var(key).ok())
}

/// Same as [`load`], resolving the `NEO4J_*` overrides through `lookup` instead of the process
/// environment.
pub fn load_with_env<F>(path: &Path, lookup: F) -> Result<Config>
where
	F: Fn(&str) -> Option<String>,
{
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	apply_env_overrides(&mut cfg, lookup);

	normalize(&mut cfg)?;

	validate(&cfg)?;

	Ok(cfg)
}

/// Replaces the Neo4j connection parameters with the `NEO4J_*` variables that `lookup` resolves.
pub fn apply_env_overrides<F>(cfg: &mut Config, lookup: F)
where
	F: Fn(&str) -> Option<String>,
{
	if let Some(uri) = lookup(ENV_NEO4J_URI) {
		cfg.storage.neo4j.uri = uri;
	}
	if let Some(user) = lookup(ENV_NEO4J_USER) {
		cfg.storage.neo4j.user = user;
	}
	if let Some(password) = lookup(ENV_NEO4J_PASSWORD) {
		cfg.storage.neo4j.password = password;
	}
}

/// Prefixes `bolt://` when no scheme is present and rejects any scheme other than `bolt://` or
/// `neo4j://`.
pub fn normalize_uri(uri: &str) -> Result<String> {
	let uri = uri.trim();

	if uri.is_empty() {
		return Err(Error::Validation {
			message: "storage.neo4j.uri must be non-empty; set it or NEO4J_URI.".to_string(),
		});
	}
	if SUPPORTED_SCHEMES.iter().any(|scheme| uri.starts_with(scheme)) {
		return Ok(uri.to_string());
	}
	if uri.contains("://") {
		return Err(Error::UnsupportedScheme { uri: uri.to_string() });
	}

	Ok(format!("bolt://{uri}"))
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if !SUPPORTED_SCHEMES.iter().any(|scheme| cfg.storage.neo4j.uri.starts_with(scheme)) {
		return Err(Error::UnsupportedScheme { uri: cfg.storage.neo4j.uri.clone() });
	}
	if cfg.storage.neo4j.max_connections == 0 {
		return Err(Error::Validation {
			message: "storage.neo4j.max_connections must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.neo4j.fetch_size == 0 {
		return Err(Error::Validation {
			message: "storage.neo4j.fetch_size must be greater than zero.".to_string(),
		});
	}
	if cfg.ranking.index_name.trim().is_empty() {
		return Err(Error::Validation {
			message: "ranking.index_name must be non-empty.".to_string(),
		});
	}
	if cfg.ranking.candidate_k <= 0 {
		return Err(Error::Validation {
			message: "ranking.candidate_k must be greater than zero.".to_string(),
		});
	}
	if !cfg.ranking.default_threshold.is_finite() {
		return Err(Error::Validation {
			message: "ranking.default_threshold must be a finite number.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) -> Result<()> {
	cfg.storage.neo4j.uri = normalize_uri(&cfg.storage.neo4j.uri)?;
	cfg.ranking.index_name = cfg.ranking.index_name.trim().to_string();

	Ok(())
}
