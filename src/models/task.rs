use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 任务优先级，与后端的枚举值一一对应
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// 循环切换（表单里用 ←/→ 选择）
    pub fn next(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Priority::Low => Priority::High,
            Priority::Medium => Priority::Low,
            Priority::High => Priority::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 后端返回的任务记录
///
/// `id` 由后端分配且不可变；`user_id` 创建后不再变化。
/// 客户端从不自造或修改 `id`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, with = "deadline_format")]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
}

/// 新建/编辑任务时提交的载荷（没有 id，由后端分配）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub user_id: u64,
    pub title: String,
    pub body: String,
    pub priority: Priority,
    #[serde(with = "deadline_format")]
    pub deadline: Option<NaiveDate>,
}

/// 截止日期的线上编码：ISO-8601 日期或日期时间字符串，缺省为 null（不是空串）。
/// 读取时兼容带时间的形式，只保留日期部分。
mod deadline_format {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) => {
                // "2025-09-20T10:30:00" -> "2025-09-20"
                let date_part = s.split('T').next().unwrap_or(&s);
                NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_round_trip() {
        let json = r#"{
            "id": 7,
            "userId": 42,
            "title": "Buy milk",
            "body": "",
            "priority": "MEDIUM",
            "deadline": null,
            "completed": false
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.user_id, 42);
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.deadline, None);
        assert!(!task.completed);

        let back = serde_json::to_value(&task).unwrap();
        assert_eq!(back["userId"], 42);
        assert_eq!(back["deadline"], serde_json::Value::Null);
    }

    #[test]
    fn test_deadline_accepts_datetime() {
        let json = r#"{
            "id": 1,
            "userId": 1,
            "title": "x",
            "deadline": "2025-09-20T10:30:00"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(
            task.deadline,
            Some(NaiveDate::from_ymd_opt(2025, 9, 20).unwrap())
        );
    }

    #[test]
    fn test_deadline_serializes_date_only() {
        let draft = TaskDraft {
            user_id: 42,
            title: "x".to_string(),
            body: String::new(),
            priority: Priority::High,
            deadline: Some(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()),
        };

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["deadline"], "2025-12-01");
        assert_eq!(value["priority"], "HIGH");
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let json = r#"{"id": 3, "userId": 9, "title": "bare"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.body, "");
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.deadline, None);
        assert!(!task.completed);
    }
}
