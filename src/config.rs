/// 应用配置管理
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 任务服务地址
    pub api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

/// 配置文件路径
/// Windows: %APPDATA%\taskdeck\config.toml
/// macOS: ~/Library/Application Support/taskdeck/config.toml
/// Linux: ~/.config/taskdeck/config.toml
pub fn get_config_path() -> PathBuf {
    let config_dir = directories::BaseDirs::new()
        .expect("Failed to get user directories")
        .config_dir()
        .to_path_buf();
    config_dir.join("taskdeck").join("config.toml")
}

/// 日志文件和配置放在同一目录
pub fn get_log_path() -> PathBuf {
    get_config_path().with_file_name("taskdeck.log")
}

/// 加载配置；文件不存在返回默认配置
pub fn load_config() -> Result<Config> {
    let config_path = get_config_path();

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&content)?;

    Ok(config)
}

/// 保存配置
pub fn save_config(config: &Config) -> Result<()> {
    let config_path = get_config_path();

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(config_path, content)?;

    Ok(())
}

/// 首次运行检查
/// 返回 (config, is_first_run)
pub fn check_first_run() -> Result<(Config, bool)> {
    let config_path = get_config_path();

    if !config_path.exists() {
        let config = Config::default();
        save_config(&config)?;
        Ok((config, true))
    } else {
        Ok((load_config()?, false))
    }
}

/// 更新服务地址
pub fn set_server(url: String) -> Result<()> {
    let mut config = load_config()?;
    config.api_base = url.trim_end_matches('/').to_string();
    save_config(&config)?;
    println!("✓ 服务地址已设置为: {}", config.api_base);
    Ok(())
}

/// 显示当前配置
pub fn show_config() -> Result<()> {
    let config = load_config()?;
    println!("当前配置:");
    println!("  服务地址: {}", config.api_base);
    println!();
    println!("配置文件: {}", get_config_path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parses_from_toml() {
        let config: Config = toml::from_str(r#"api_base = "http://tasks.local""#).unwrap();
        assert_eq!(config.api_base, "http://tasks.local");
    }

    #[test]
    fn test_default_points_at_localhost() {
        assert_eq!(Config::default().api_base, DEFAULT_API_BASE);
    }
}
