use anyhow::Result;
use chrono::NaiveDate;
use std::time::Instant;
use tracing::warn;

use crate::actions::{self, ActionError};
use crate::api::ApiClient;
use crate::config::Config;
use crate::models::{LoginRequest, ProfileUpdate, RegisterRequest, TaskDraft, User};
use crate::session::{self, Session};
use crate::store::TaskStore;
use crate::ui::dialogs::{DialogType, ProfileField, ProfileForm, TaskForm};

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// 通知消息
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: Instant,
}

impl Notification {
    /// 检查通知是否已过期（3秒后自动消失）
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_secs() >= 3
    }
}

/// 当前所在的页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// 登录页
    Login,
    /// 注册页
    Register,
    /// 任务列表页
    Tasks,
    /// 个人资料页
    Profile,
}

/// 登录/注册表单的焦点字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Username,
    Email,
    Password,
}

/// 应用状态
pub struct App {
    /// 应用配置
    pub config: Config,
    /// REST 客户端
    pub api: ApiClient,
    /// 登录会话（None = 未登录）
    pub session: Option<Session>,
    /// 任务缓存，渲染的唯一数据来源
    pub store: TaskStore,
    /// 当前页面
    pub screen: Screen,
    /// 任务列表的选中下标
    pub selected_task: usize,
    /// 当前显示的对话框
    pub dialog: Option<DialogType>,
    /// 通知消息
    pub notification: Option<Notification>,
    /// 是否显示快捷键帮助
    pub show_help: bool,
    /// 是否显示首次运行欢迎对话框
    pub show_welcome_dialog: bool,
    /// 登录/注册表单
    pub auth_username: String,
    pub auth_email: String,
    pub auth_password: String,
    pub auth_focus: AuthField,
}

impl App {
    /// 创建应用实例；已有会话则直接进任务页并拉一次列表
    pub fn new() -> Result<Self> {
        let (config, is_first_run) = crate::config::check_first_run()?;
        let api = ApiClient::new(config.api_base.clone());
        let session = session::load_session().unwrap_or_default();

        let screen = if session.is_some() {
            Screen::Tasks
        } else {
            Screen::Login
        };

        let mut app = Self {
            config,
            api,
            session,
            store: TaskStore::new(),
            screen,
            selected_task: 0,
            dialog: None,
            notification: None,
            show_help: false,
            show_welcome_dialog: is_first_run,
            auth_username: String::new(),
            auth_email: String::new(),
            auth_password: String::new(),
            auth_focus: AuthField::Email,
        };

        if app.session.is_some() {
            app.refresh_tasks();
        }

        Ok(app)
    }

    /// 处理键盘输入，返回 false 表示退出
    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> bool {
        crate::input::handle_key_input(self, key)
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// 列表当前选中的任务 id
    pub fn selected_task_id(&self) -> Option<u64> {
        self.store.list().get(self.selected_task).map(|t| t.id)
    }

    pub fn select_next(&mut self) {
        if self.selected_task + 1 < self.store.len() {
            self.selected_task += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_task = self.selected_task.saturating_sub(1);
    }

    /// 整表重载；失败只提示，缓存保持原样
    pub fn refresh_tasks(&mut self) {
        let Some(user_id) = self.current_user().map(|u| u.id) else {
            return;
        };

        if let Err(e) = actions::reload(&self.api, &mut self.store, user_id) {
            warn!(error = %e, "reload failed");
            self.notify_error(&e);
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        if self.store.is_empty() {
            self.selected_task = 0;
        } else if self.selected_task >= self.store.len() {
            self.selected_task = self.store.len() - 1;
        }
    }

    // ------------------------------------------------------------------
    // 登录 / 注册 / 登出
    // ------------------------------------------------------------------

    pub fn submit_login(&mut self) {
        let email = self.auth_email.trim().to_string();
        let password = self.auth_password.trim().to_string();

        if email.is_empty() || password.is_empty() {
            self.show_notification("请输入邮箱和密码".to_string(), NotificationLevel::Warning);
            return;
        }

        match self.api.login(&LoginRequest { email, password }) {
            Ok(user) => {
                let username = user.username.clone();
                let session = Session::new(user);
                if let Err(e) = session::save_session(&session) {
                    warn!(error = %e, "failed to persist session");
                }
                self.session = Some(session);
                self.screen = Screen::Tasks;
                self.clear_auth_form();
                self.refresh_tasks();
                self.show_notification(format!("欢迎, {}!", username), NotificationLevel::Success);
            }
            Err(e) => {
                warn!(error = %e, "login failed");
                self.show_notification("邮箱或密码错误".to_string(), NotificationLevel::Error);
            }
        }
    }

    pub fn submit_register(&mut self) {
        let username = self.auth_username.trim().to_string();
        let email = self.auth_email.trim().to_string();
        let password = self.auth_password.trim().to_string();

        if username.is_empty() || email.is_empty() || password.is_empty() {
            self.show_notification("请填写所有字段".to_string(), NotificationLevel::Warning);
            return;
        }
        if !is_valid_email(&email) {
            self.show_notification("请输入有效的邮箱".to_string(), NotificationLevel::Warning);
            return;
        }

        match self.api.register(&RegisterRequest {
            username,
            email,
            password,
        }) {
            Ok(()) => {
                self.screen = Screen::Login;
                self.auth_focus = AuthField::Email;
                self.auth_password.clear();
                self.show_notification("注册成功，请登录".to_string(), NotificationLevel::Success);
            }
            Err(e) => {
                warn!(error = %e, "register failed");
                self.show_notification("注册失败，请重试".to_string(), NotificationLevel::Error);
            }
        }
    }

    pub fn logout(&mut self) {
        if let Err(e) = session::clear_session() {
            warn!(error = %e, "failed to clear session");
        }
        self.session = None;
        self.store = TaskStore::new();
        self.selected_task = 0;
        self.screen = Screen::Login;
        self.clear_auth_form();
    }

    fn clear_auth_form(&mut self) {
        self.auth_username.clear();
        self.auth_email.clear();
        self.auth_password.clear();
        self.auth_focus = AuthField::Email;
    }

    // ------------------------------------------------------------------
    // 任务动作：新建 / 编辑 / 删除 / 完成
    // ------------------------------------------------------------------

    pub fn open_new_task_form(&mut self) {
        self.dialog = Some(DialogType::TaskForm(TaskForm::empty()));
    }

    /// 打开编辑表单
    ///
    /// 表单字段一律来自缓存里的权威记录，从不回读渲染结果。
    pub fn open_edit_form(&mut self, id: u64) {
        let Some(task) = self.store.get(id) else {
            self.show_notification(format!("任务 {} 不存在", id), NotificationLevel::Warning);
            return;
        };
        self.dialog = Some(DialogType::TaskForm(TaskForm::from_task(task)));
    }

    /// 提交任务表单；返回 true 表示对话框应该关闭
    pub fn submit_task_form(&mut self, form: &TaskForm) -> bool {
        let Some(user_id) = self.current_user().map(|u| u.id) else {
            return true;
        };

        let deadline = match parse_deadline_input(&form.deadline) {
            Ok(deadline) => deadline,
            Err(()) => {
                self.show_notification(
                    "日期格式应为 YYYY-MM-DD".to_string(),
                    NotificationLevel::Warning,
                );
                return false;
            }
        };

        let draft = TaskDraft {
            user_id,
            title: form.title.clone(),
            body: form.body_text(),
            priority: form.priority,
            deadline,
        };

        let result = match form.id {
            Some(id) => actions::update(&self.api, &mut self.store, id, draft),
            None => actions::create(&self.api, &mut self.store, draft),
        };

        match result {
            Ok(()) => {
                self.clamp_selection();
                let message = if form.id.is_some() {
                    "任务已更新"
                } else {
                    "任务已创建"
                };
                self.show_notification(message.to_string(), NotificationLevel::Success);
                true
            }
            Err(e @ ActionError::EmptyTitle) => {
                // 校验失败：表单留在原地让用户改
                self.show_notification(e.to_string(), NotificationLevel::Warning);
                false
            }
            Err(e) => {
                self.notify_error(&e);
                false
            }
        }
    }

    /// 删除前先弹确认框
    pub fn request_delete(&mut self, id: u64) {
        if self.store.get(id).is_none() {
            return;
        }
        self.dialog = Some(DialogType::ConfirmDelete {
            task_id: id,
            yes_selected: false,
        });
    }

    /// 确认框选了"是"之后才会走到这里
    pub fn confirm_delete(&mut self, id: u64) {
        let Some(user_id) = self.current_user().map(|u| u.id) else {
            return;
        };

        match actions::delete(&self.api, &mut self.store, id, user_id) {
            Ok(()) => {
                self.clamp_selection();
                self.show_notification("任务已删除".to_string(), NotificationLevel::Success);
            }
            Err(e) => self.notify_error(&e),
        }
    }

    /// 标记选中的任务为完成；已完成的任务没有这个操作
    pub fn complete_selected(&mut self) {
        let Some(user_id) = self.current_user().map(|u| u.id) else {
            return;
        };
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if self.store.get(id).map(|t| t.completed).unwrap_or(false) {
            return;
        }

        match actions::complete(&self.api, &mut self.store, id, user_id) {
            Ok(()) => {
                self.show_notification("任务已完成".to_string(), NotificationLevel::Success);
            }
            Err(e) => self.notify_error(&e),
        }
    }

    // ------------------------------------------------------------------
    // 个人资料
    // ------------------------------------------------------------------

    pub fn open_profile_form(&mut self) {
        let Some(user) = self.current_user() else {
            return;
        };
        self.dialog = Some(DialogType::Profile(ProfileForm {
            username: user.username.clone(),
            email: user.email.clone(),
            password: String::new(),
            focus: ProfileField::Username,
        }));
    }

    /// 提交资料表单；返回 true 表示对话框应该关闭
    pub fn submit_profile(&mut self, form: &ProfileForm) -> bool {
        let Some(user_id) = self.current_user().map(|u| u.id) else {
            return true;
        };

        let username = form.username.trim().to_string();
        let email = form.email.trim().to_string();
        let password = form.password.trim().to_string();

        if username.is_empty() {
            self.show_notification("用户名不能为空".to_string(), NotificationLevel::Warning);
            return false;
        }
        if !is_valid_email(&email) {
            self.show_notification("请输入有效的邮箱".to_string(), NotificationLevel::Warning);
            return false;
        }

        let update = ProfileUpdate {
            username,
            email,
            password: if password.is_empty() {
                None
            } else {
                Some(password)
            },
        };

        match self.api.update_profile(user_id, &update) {
            Ok(updated) => {
                // 服务端返回的资料并入会话并落盘
                if let Some(session) = self.session.as_mut() {
                    session.user = updated;
                    if let Err(e) = session::save_session(session) {
                        warn!(error = %e, "failed to persist session");
                    }
                }
                self.show_notification("资料已更新".to_string(), NotificationLevel::Success);
                true
            }
            Err(e) => {
                warn!(error = %e, "profile update failed");
                self.show_notification(e.user_message(), NotificationLevel::Error);
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // 通知
    // ------------------------------------------------------------------

    /// 显示通知消息
    pub fn show_notification(&mut self, message: String, level: NotificationLevel) {
        self.notification = Some(Notification {
            message,
            level,
            created_at: Instant::now(),
        });
    }

    fn notify_error(&mut self, error: &ActionError) {
        let message = match error {
            ActionError::Api(api) => api.user_message(),
            other => other.to_string(),
        };
        self.show_notification(message, NotificationLevel::Error);
    }

    /// 清除已过期的通知
    pub fn clear_expired_notification(&mut self) {
        if let Some(ref notification) = self.notification {
            if notification.is_expired() {
                self.notification = None;
            }
        }
    }
}

/// 表单里的日期输入：空串表示无截止日期，否则必须是 YYYY-MM-DD
fn parse_deadline_input(input: &str) -> Result<Option<NaiveDate>, ()> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ())
}

/// 表面校验，对齐原始表单的宽松检查
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deadline_input() {
        assert_eq!(parse_deadline_input(""), Ok(None));
        assert_eq!(parse_deadline_input("  "), Ok(None));
        assert_eq!(
            parse_deadline_input("2025-09-20"),
            Ok(NaiveDate::from_ymd_opt(2025, 9, 20))
        );
        assert!(parse_deadline_input("20 Sept 2025").is_err());
        assert!(parse_deadline_input("2025-13-40").is_err());
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("alice@example.com"));
        assert!(!is_valid_email("alice"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("alice@nodot"));
    }
}
