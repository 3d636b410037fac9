use thiserror::Error;

/// 请求层错误分类：传输失败或服务端报错。
/// 两类都不致命，上层只提示并放弃本次操作。
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络/传输失败（连接拒绝、超时等）
    #[error("请求失败: {0}")]
    Transport(#[from] reqwest::Error),

    /// 服务端返回非成功状态码
    #[error("服务端返回 {status}: {message}")]
    Status { status: u16, message: String },
}

impl ApiError {
    /// 给用户看的一行提示
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "无法连接服务器".to_string(),
            ApiError::Status { message, .. } => message.clone(),
        }
    }
}
