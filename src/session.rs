/// 登录会话持久化
///
/// 对应浏览器端的 localStorage：保存当前用户和已登录标记，
/// 启动时读取用来决定落在登录页还是任务页，登出时清除。
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub logged_in: bool,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self {
            user,
            logged_in: true,
        }
    }
}

/// 会话文件路径: <config_dir>/taskdeck/session.json
fn get_session_file_path() -> PathBuf {
    let config_dir = directories::BaseDirs::new()
        .expect("Failed to get user directories")
        .config_dir()
        .to_path_buf();
    config_dir.join("taskdeck").join("session.json")
}

pub fn save_session(session: &Session) -> Result<()> {
    write_session_to(&get_session_file_path(), session)
}

/// 读取会话；文件不存在或未登录都视为未登录
pub fn load_session() -> Result<Option<Session>> {
    read_session_from(&get_session_file_path())
}

pub fn clear_session() -> Result<()> {
    let path = get_session_file_path();
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

fn write_session_to(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(session)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn read_session_from(path: &Path) -> Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let session: Session = serde_json::from_str(&content)?;

    if !session.logged_in {
        return Ok(None);
    }
    Ok(Some(session))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 42,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[test]
    fn test_session_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        write_session_to(&path, &Session::new(user())).unwrap();
        let loaded = read_session_from(&path).unwrap().unwrap();

        assert_eq!(loaded.user.id, 42);
        assert_eq!(loaded.user.username, "alice");
        assert!(loaded.logged_in);
    }

    #[test]
    fn test_missing_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        assert!(read_session_from(&path).unwrap().is_none());
    }

    #[test]
    fn test_logged_out_flag_is_respected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = Session::new(user());
        session.logged_in = false;
        write_session_to(&path, &session).unwrap();

        assert!(read_session_from(&path).unwrap().is_none());
    }
}
