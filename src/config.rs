use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::cycle::Scenario;
use crate::units::{EnergyUnit, PowerUnit};

/// 기본 설정 파일 이름. 작업 디렉터리 기준.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 결과 표시 단위 설정.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultUnits {
    pub energy: EnergyUnit,
    pub power: PowerUnit,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        Self {
            energy: EnergyUnit::WattHour,
            power: PowerUnit::Watt,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub language_pack_dir: Option<String>,
    #[serde(default = "default_window_alpha")]
    pub window_alpha: f32,
    #[serde(default)]
    pub default_units: DefaultUnits,
    #[serde(default)]
    pub scenario: Scenario,
    #[serde(skip)]
    path: Option<PathBuf>,
}

fn default_language() -> String {
    "auto".to_string()
}

fn default_window_alpha() -> f32 {
    1.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            language_pack_dir: None,
            window_alpha: default_window_alpha(),
            default_units: DefaultUnits::default(),
            scenario: Scenario::default(),
            path: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 파싱 실패 또는 시나리오 검증 실패(k, a, T, 단가)
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 작업 디렉터리의 config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_default_from(DEFAULT_CONFIG_PATH)
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본값을 저장하고 반환한다.
pub fn load_or_default_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg = parse_config(&content)?;
        info!(path = %path.display(), "loaded config");
        cfg
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        info!(path = %path.display(), "created default config");
        cfg
    };
    cfg.path = Some(path.to_path_buf());
    Ok(cfg)
}

/// 설정을 읽되, 실패하면 경고를 남기고 기본값을 사용한다. GUI 시작 시 사용.
pub fn load_or_fallback(path: impl AsRef<Path>) -> Config {
    let path = path.as_ref();
    match load_or_default_from(path) {
        Ok(cfg) => cfg,
        Err(err) => {
            warn!(path = %path.display(), %err, "config unusable, falling back to defaults");
            Config {
                path: Some(path.to_path_buf()),
                ..Config::default()
            }
        }
    }
}

/// TOML 문자열을 설정으로 파싱한다.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 로드했던 경로(없으면 config.toml)에 설정을 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self.path();
        save_config(self, path)?;
        info!(path = %path.display(), "saved config");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        self.path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH))
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::power::ModelParameters;

    #[test]
    fn toml_roundtrip_keeps_scenario() {
        let mut cfg = Config::default();
        cfg.language = "es".into();
        cfg.default_units.energy = EnergyUnit::KilowattHour;
        cfg.scenario.model_b = ModelParameters::new(120.0, 0.7).unwrap();
        let text = cfg.to_toml().unwrap();
        let back = parse_config(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let cfg = parse_config("language = \"en\"\n").unwrap();
        assert_eq!(cfg.language, "en");
        assert_eq!(cfg.scenario, Scenario::default());
        assert_eq!(cfg.window_alpha, 1.0);
    }

    #[test]
    fn invalid_decay_in_file_is_rejected() {
        let text = r#"
[scenario.cycle]
cycle_time_h = 4.0
cost_per_kwh = 160.55

[scenario.model_a]
k = 200.0
a = 0.0

[scenario.model_b]
k = 80.0
a = 0.5
"#;
        let err = parse_config(text).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err}");
    }

    #[test]
    fn creates_file_when_missing() {
        let dir = std::env::temp_dir().join(format!("ecs-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);
        let cfg = load_or_default_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.path(), path.as_path());
        let again = load_or_default_from(&path).unwrap();
        assert_eq!(again.scenario, cfg.scenario);
        fs::remove_dir_all(&dir).unwrap();
    }
}
