use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::text_input::BodyEditor;
use crate::models::{Priority, Task};

/// 任务表单的焦点字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Body,
    Priority,
    Deadline,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Body,
            FormField::Body => FormField::Priority,
            FormField::Priority => FormField::Deadline,
            FormField::Deadline => FormField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Deadline,
            FormField::Body => FormField::Title,
            FormField::Priority => FormField::Body,
            FormField::Deadline => FormField::Priority,
        }
    }
}

/// 新建/编辑任务的表单状态
///
/// 编辑时从 TaskStore 的权威记录预填；要改哪条任务由 `id`
/// 显式携带，不存在"当前正在编辑的任务"这种全局变量。
pub struct TaskForm {
    /// None = 新建，Some = 编辑已有任务
    pub id: Option<u64>,
    pub title: String,
    pub body: BodyEditor,
    pub priority: Priority,
    /// 输入框里的原始文本，提交时再解析成日期
    pub deadline: String,
    pub focus: FormField,
}

impl TaskForm {
    pub fn empty() -> Self {
        Self {
            id: None,
            title: String::new(),
            body: BodyEditor::new(""),
            priority: Priority::default(),
            deadline: String::new(),
            focus: FormField::Title,
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            id: Some(task.id),
            title: task.title.clone(),
            body: BodyEditor::new(&task.body),
            priority: task.priority,
            deadline: task
                .deadline
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            focus: FormField::Title,
        }
    }

    pub fn body_text(&self) -> String {
        self.body.content()
    }
}

/// 资料表单的焦点字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Username,
    Email,
    Password,
}

impl ProfileField {
    pub fn next(self) -> Self {
        match self {
            ProfileField::Username => ProfileField::Email,
            ProfileField::Email => ProfileField::Password,
            ProfileField::Password => ProfileField::Username,
        }
    }
}

/// 编辑个人资料的表单状态
pub struct ProfileForm {
    pub username: String,
    pub email: String,
    /// 留空表示不修改密码
    pub password: String,
    pub focus: ProfileField,
}

/// 对话框类型
pub enum DialogType {
    /// 新建/编辑任务
    TaskForm(TaskForm),
    /// 删除确认
    ConfirmDelete { task_id: u64, yes_selected: bool },
    /// 编辑个人资料
    Profile(ProfileForm),
}

/// 渲染居中的对话框
pub fn render_dialog(f: &mut Frame, dialog: &DialogType) {
    render_backdrop(f, f.area());

    match dialog {
        DialogType::TaskForm(form) => {
            let area = centered_rect(62, 70, f.area());
            f.render_widget(Clear, area);
            render_task_form(f, area, form);
        }
        DialogType::ConfirmDelete { yes_selected, .. } => {
            let area = centered_rect(44, 28, f.area());
            f.render_widget(Clear, area);
            render_confirm_dialog(f, area, "删除任务", "删除这个任务？", *yes_selected);
        }
        DialogType::Profile(form) => {
            let area = centered_rect(52, 55, f.area());
            f.render_widget(Clear, area);
            render_profile_form(f, area, form);
        }
    }
}

/// 渲染半透明背景遮罩
fn render_backdrop(f: &mut Frame, area: Rect) {
    let block = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    f.render_widget(block, area);
}

/// 渲染任务表单
fn render_task_form(f: &mut Frame, area: Rect, form: &TaskForm) {
    let title = if form.id.is_some() {
        "  编辑任务  "
    } else {
        "  新建任务  "
    };

    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(76, 86, 106)))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .style(Style::default().bg(Color::Rgb(46, 52, 64)));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Min(6),    // 正文
            Constraint::Length(3), // 优先级
            Constraint::Length(3), // 截止日期
            Constraint::Length(1), // 帮助
        ])
        .split(inner);

    render_text_field(
        f,
        chunks[0],
        "标题",
        &form.title,
        form.focus == FormField::Title,
        false,
    );

    // 正文编辑区
    let body_focused = form.focus == FormField::Body;
    let body_block = Block::default()
        .title(" 正文 ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(field_border_color(body_focused)))
        .border_type(ratatui::widgets::BorderType::Rounded);
    let body_inner = body_block.inner(chunks[1]);
    f.render_widget(body_block, chunks[1]);
    form.body.render(f, body_inner);

    // 优先级选择：←/→ 切换
    let priority_focused = form.focus == FormField::Priority;
    let priority_color = match form.priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Blue,
    };
    let priority_block = Block::default()
        .title(" 优先级 ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(field_border_color(priority_focused)))
        .border_type(ratatui::widgets::BorderType::Rounded);
    let priority_inner = priority_block.inner(chunks[2]);
    f.render_widget(priority_block, chunks[2]);

    let priority_line = Line::from(vec![
        Span::styled("◀ ", Style::default().fg(Color::Rgb(129, 161, 193))),
        Span::styled(
            format!(" {} ", form.priority),
            Style::default()
                .fg(priority_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", Style::default().fg(Color::Rgb(129, 161, 193))),
    ]);
    f.render_widget(
        Paragraph::new(priority_line).alignment(Alignment::Center),
        priority_inner,
    );

    render_text_field(
        f,
        chunks[3],
        "截止日期 (YYYY-MM-DD，留空表示无)",
        &form.deadline,
        form.focus == FormField::Deadline,
        false,
    );

    let help = Paragraph::new("Tab 切换字段  Ctrl+S 提交  Esc 取消")
        .style(Style::default().fg(Color::Rgb(129, 161, 193)))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[4]);
}

/// 渲染资料表单
fn render_profile_form(f: &mut Frame, area: Rect, form: &ProfileForm) {
    let block = Block::default()
        .title("  编辑资料  ")
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(76, 86, 106)))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .style(Style::default().bg(Color::Rgb(46, 52, 64)));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    render_text_field(
        f,
        chunks[0],
        "用户名",
        &form.username,
        form.focus == ProfileField::Username,
        false,
    );
    render_text_field(
        f,
        chunks[1],
        "邮箱",
        &form.email,
        form.focus == ProfileField::Email,
        false,
    );
    render_text_field(
        f,
        chunks[2],
        "新密码 (留空不修改)",
        &form.password,
        form.focus == ProfileField::Password,
        true,
    );

    let help = Paragraph::new("Tab 切换字段  Enter 提交  Esc 取消")
        .style(Style::default().fg(Color::Rgb(129, 161, 193)))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[3]);
}

/// 渲染确认对话框
fn render_confirm_dialog(f: &mut Frame, area: Rect, title: &str, message: &str, yes_selected: bool) {
    let block = Block::default()
        .title(format!("  {}  ", title))
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(235, 203, 139)))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .style(Style::default().bg(Color::Rgb(46, 52, 64)));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(inner);

    let message_text = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Rgb(216, 222, 233)));
    f.render_widget(message_text, chunks[0]);

    let button_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(chunks[1]);

    let no_style = if !yes_selected {
        Style::default()
            .bg(Color::Rgb(191, 97, 106))
            .fg(Color::Rgb(46, 52, 64))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Rgb(191, 97, 106))
            .add_modifier(Modifier::DIM)
    };
    let no_button = Paragraph::new("[ n ] 否")
        .style(no_style)
        .alignment(Alignment::Center);
    f.render_widget(no_button, button_chunks[1]);

    let yes_style = if yes_selected {
        Style::default()
            .bg(Color::Rgb(163, 190, 140))
            .fg(Color::Rgb(46, 52, 64))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Rgb(163, 190, 140))
            .add_modifier(Modifier::DIM)
    };
    let yes_button = Paragraph::new("[ y ] 是")
        .style(yes_style)
        .alignment(Alignment::Center);
    f.render_widget(yes_button, button_chunks[2]);
}

/// 单行文本字段
fn render_text_field(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    mask: bool,
) {
    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(field_border_color(focused)))
        .border_type(ratatui::widgets::BorderType::Rounded);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let shown = if mask {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };

    let content = if focused {
        Line::from(vec![
            Span::raw(shown),
            Span::styled("█", Style::default().fg(Color::Rgb(136, 192, 208))),
        ])
    } else {
        Line::from(shown)
    };

    f.render_widget(
        Paragraph::new(content).style(Style::default().fg(Color::Rgb(236, 239, 244))),
        inner,
    );
}

fn field_border_color(focused: bool) -> Color {
    if focused {
        Color::Rgb(136, 192, 208)
    } else {
        Color::Rgb(76, 86, 106)
    }
}

/// 创建一个居中的矩形区域
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
