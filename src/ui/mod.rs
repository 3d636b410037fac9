pub mod auth;
pub mod dialogs;
mod help;
mod list;
mod profile;
mod statusbar;
pub mod text_input;
mod welcome;

use crate::app::{App, Screen};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

/// 主渲染函数
pub fn render(f: &mut Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // 主内容区域
            Constraint::Length(1), // 状态栏
        ])
        .split(f.area());

    // 渲染当前页面
    match app.screen {
        Screen::Login => auth::render_login(f, main_chunks[0], app),
        Screen::Register => auth::render_register(f, main_chunks[0], app),
        Screen::Tasks => list::render(f, main_chunks[0], app),
        Screen::Profile => profile::render(f, main_chunks[0], app),
    }

    // 渲染状态栏
    statusbar::render(f, main_chunks[1], app);

    // 渲染对话框（如果有）
    if let Some(dialog) = &app.dialog {
        dialogs::render_dialog(f, dialog);
    }

    // 渲染帮助面板
    if app.show_help {
        help::render(f, f.area());
    }

    // 渲染欢迎对话框（如果是首次运行）
    if app.show_welcome_dialog {
        welcome::render(f, f.area(), &app.config);
    }

    // 渲染通知栏（如果有通知）
    if let Some(ref notification) = app.notification {
        render_notification(f, f.area(), notification);
    }
}

/// 渲染通知栏
fn render_notification(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    notification: &crate::app::Notification,
) {
    use crate::app::NotificationLevel;
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Paragraph};

    // 通知栏占据顶部 3 行
    let notification_area = ratatui::layout::Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 3,
    };

    // 根据级别选择颜色
    let (bg_color, fg_color, prefix) = match notification.level {
        NotificationLevel::Info => (Color::Blue, Color::White, "ℹ"),
        NotificationLevel::Success => (Color::Green, Color::White, "✓"),
        NotificationLevel::Warning => (Color::Yellow, Color::Black, "⚠"),
        NotificationLevel::Error => (Color::Red, Color::White, "✗"),
    };

    let content = Line::from(vec![
        Span::styled(
            format!(" {} ", prefix),
            Style::default()
                .fg(fg_color)
                .bg(bg_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(&notification.message, Style::default().fg(fg_color)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(bg_color))
        .style(Style::default().bg(bg_color));

    let paragraph = Paragraph::new(content).block(block);

    f.render_widget(paragraph, notification_area);
}
