mod error;
mod tasks;
mod users;

pub use error::ApiError;

use reqwest::blocking::{Client, Response};

use crate::models::{Task, TaskDraft};

/// 任务后端的抽象接口
///
/// 生产环境唯一实现是 [`ApiClient`]；测试里用内存假实现
/// 验证 create/update/delete/complete 之后的对账行为。
pub trait TaskBackend {
    fn tasks_for_user(&self, user_id: u64) -> Result<Vec<Task>, ApiError>;
    fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError>;
    fn update_task(&self, id: u64, draft: &TaskDraft) -> Result<Task, ApiError>;
    fn delete_task(&self, id: u64) -> Result<(), ApiError>;
    fn complete_task(&self, id: u64) -> Result<(), ApiError>;
}

/// REST 后端客户端
///
/// 每次用户手势只发一个阻塞请求，请求期间事件循环不处理输入，
/// 所以不存在并发写入。
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 非成功状态转成 ApiError，成功原样返回
    pub(crate) fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(error_from_response(status, response))
    }
}

/// 从错误响应里尽量提取服务端消息：优先 JSON 的 `message` 字段，
/// 其次原始响应体，最后落回状态码的标准描述。
fn error_from_response(status: reqwest::StatusCode, response: Response) -> ApiError {
    let body = response.text().unwrap_or_default();

    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body.trim().to_string()
            }
        });

    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}
