use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 5055;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrientConfig {
    pub database: Option<String>,
    pub port: Option<u16>,
    #[serde(default)]
    pub university: UniversityInfo,
}

/// Fixed institutional facts quoted in replies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniversityInfo {
    pub name: String,
    pub platform_url: String,
    pub support_phone: String,
    pub support_email: String,
    /// Institution the category listings are scoped to (substring match)
    pub featured_institution: String,
}

impl Default for UniversityInfo {
    fn default() -> Self {
        Self {
            name: "Université de Douala".to_string(),
            platform_url: "http://preinscription.univ-douala.cm".to_string(),
            support_phone: "+237 233 40 20 00".to_string(),
            support_email: "preinscription@univ-douala.cm".to_string(),
            featured_institution: "Faculté des Sciences".to_string(),
        }
    }
}

impl OrientConfig {
    /// Database path from the config, or the default under `base`
    pub fn database_path_in(&self, base: &Path) -> PathBuf {
        self.database
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| default_database_path_in(base))
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("orientbot.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".orientbot").join("orientbot.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<OrientConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: OrientConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &OrientConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_partial_university_section_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orientbot.toml");
        std::fs::write(&path, "port = 8080\n\n[university]\nsupport_phone = \"+237 000\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(config.port(), 8080);
        assert_eq!(config.university.support_phone, "+237 000");
        assert_eq!(config.university.name, "Université de Douala");
        assert_eq!(config.database_path_in(dir.path()), dir.path().join(".orientbot").join("orientbot.db"));
    }

    #[test]
    fn test_write_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orientbot.toml");
        let config = OrientConfig::default();

        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.university, UniversityInfo::default());
        assert_eq!(loaded.port(), DEFAULT_PORT);
    }
}
