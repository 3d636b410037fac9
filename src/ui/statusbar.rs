use crate::app::{App, Screen};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// 渲染状态栏
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let screen_text = match app.screen {
        Screen::Login => ("登录", Color::Cyan),
        Screen::Register => ("注册", Color::Green),
        Screen::Tasks => ("任务", Color::Blue),
        Screen::Profile => ("资料", Color::Magenta),
    };

    let user_display = app
        .current_user()
        .map(|u| format!(" {} ", u.username))
        .unwrap_or_else(|| " 未登录 ".to_string());

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", screen_text.0),
            Style::default()
                .fg(Color::Black)
                .bg(screen_text.1)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(user_display),
        Span::styled(
            format!("| {} ", app.api.base_url()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("| {} 个任务 | ? 帮助 ", app.store.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(line).style(Style::default().bg(Color::Black));

    f.render_widget(paragraph, area);
}
