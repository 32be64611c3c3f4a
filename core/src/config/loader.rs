//! Encounter definition loading and validation
//!
//! Load encounter definitions from TOML files or a directory of them. Every
//! loaded file passes through `validate` so that a malformed definition is
//! rejected at load time instead of degrading an encounter in progress.

use std::fs;
use std::path::Path;

use super::{ConfigError, EncounterFile};

/// Load a single encounter file from TOML
pub fn load_encounter_file(path: &Path) -> Result<EncounterFile, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let file: EncounterFile =
        toml::from_str(&content).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;

    validate(&file)?;
    Ok(file)
}

/// Load all `.toml` encounter files from a directory (non-recursive)
pub fn load_encounters_from_dir(dir: &Path) -> Result<Vec<EncounterFile>, ConfigError> {
    let mut files = Vec::new();

    if !dir.exists() {
        return Ok(files);
    }

    let entries = fs::read_dir(dir).map_err(|source| ConfigError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| ConfigError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            files.push(load_encounter_file(&path)?);
        }
    }

    Ok(files)
}

/// Validate a loaded encounter definition.
///
/// Structural problems (bad threshold ordering, dangling projectile
/// references, zero-count patterns) are definition bugs and rejected here.
/// An empty attack catalog is legal: the boss simply never attacks.
pub fn validate(file: &EncounterFile) -> Result<(), ConfigError> {
    let cfg = &file.encounter;
    let invalid = |reason: String| ConfigError::InvalidDefinition {
        id: cfg.id.clone(),
        reason,
    };

    if cfg.id.is_empty() {
        return Err(invalid("encounter id must not be empty".into()));
    }
    if cfg.max_health <= 0.0 {
        return Err(invalid(format!(
            "max_health must be > 0, got {}",
            cfg.max_health
        )));
    }

    for pair in cfg.thresholds.windows(2) {
        if pair[0] <= pair[1] {
            return Err(invalid(format!(
                "thresholds must be strictly descending, got {:?}",
                cfg.thresholds
            )));
        }
    }
    if cfg
        .thresholds
        .iter()
        .any(|t| !(0.0..100.0).contains(t))
    {
        return Err(invalid(format!(
            "thresholds must lie in [0, 100), got {:?}",
            cfg.thresholds
        )));
    }

    if cfg.thread_count == 0 {
        return Err(invalid("thread_count must be >= 1".into()));
    }
    if cfg.idle_dwell_secs[0] > cfg.idle_dwell_secs[1] {
        return Err(invalid(format!(
            "idle_dwell_secs min > max: {:?}",
            cfg.idle_dwell_secs
        )));
    }
    if cfg.enraged_dwell_secs[0] > cfg.enraged_dwell_secs[1] {
        return Err(invalid(format!(
            "enraged_dwell_secs min > max: {:?}",
            cfg.enraged_dwell_secs
        )));
    }

    for spec in &file.projectiles {
        if spec.id.is_empty() {
            return Err(invalid("projectile id must not be empty".into()));
        }
        if spec.speed <= 0.0 {
            return Err(invalid(format!(
                "projectile `{}` speed must be > 0",
                spec.id
            )));
        }
    }

    if file.patterns.is_empty() {
        tracing::warn!(id = %cfg.id, "encounter has an empty attack catalog; the boss will never attack");
    }

    for pattern in &file.patterns {
        if pattern.count == 0 {
            return Err(invalid(format!(
                "pattern `{}` count must be >= 1",
                pattern.id
            )));
        }
        if pattern.stagger_secs < 0.0 {
            return Err(invalid(format!(
                "pattern `{}` stagger_secs must be >= 0",
                pattern.id
            )));
        }
        if !file.projectiles.iter().any(|s| s.id == pattern.projectile) {
            return Err(invalid(format!(
                "pattern `{}` references unknown projectile `{}`",
                pattern.id, pattern.projectile
            )));
        }
    }

    Ok(())
}
