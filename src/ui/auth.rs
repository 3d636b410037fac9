use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::dialogs::centered_rect;
use crate::app::{App, AuthField};

/// 渲染登录页
pub fn render_login(f: &mut Frame, area: Rect, app: &App) {
    let box_area = centered_rect(50, 60, area);

    let block = Block::default()
        .title("  登录  ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(136, 192, 208)))
        .border_type(ratatui::widgets::BorderType::Rounded);

    let inner = block.inner(box_area);
    f.render_widget(block, box_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // 标语
            Constraint::Length(3), // 邮箱
            Constraint::Length(3), // 密码
            Constraint::Length(2), // 提示
        ])
        .split(inner);

    let banner = Paragraph::new("TASKDECK")
        .style(
            Style::default()
                .fg(Color::Rgb(136, 192, 208))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(banner, chunks[0]);

    render_field(
        f,
        chunks[1],
        "邮箱",
        &app.auth_email,
        app.auth_focus == AuthField::Email,
        false,
    );
    render_field(
        f,
        chunks[2],
        "密码",
        &app.auth_password,
        app.auth_focus == AuthField::Password,
        true,
    );

    let hints = Line::from(vec![
        Span::styled("Enter", key_style()),
        Span::raw(" 登录  "),
        Span::styled("Ctrl+R", key_style()),
        Span::raw(" 注册新账号  "),
        Span::styled("Esc", key_style()),
        Span::raw(" 退出"),
    ]);
    f.render_widget(
        Paragraph::new(hints)
            .style(Style::default().fg(Color::Rgb(216, 222, 233)))
            .alignment(Alignment::Center),
        chunks[3],
    );
}

/// 渲染注册页
pub fn render_register(f: &mut Frame, area: Rect, app: &App) {
    let box_area = centered_rect(50, 70, area);

    let block = Block::default()
        .title("  注册  ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(163, 190, 140)))
        .border_type(ratatui::widgets::BorderType::Rounded);

    let inner = block.inner(box_area);
    f.render_widget(block, box_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(inner);

    render_field(
        f,
        chunks[0],
        "用户名",
        &app.auth_username,
        app.auth_focus == AuthField::Username,
        false,
    );
    render_field(
        f,
        chunks[1],
        "邮箱",
        &app.auth_email,
        app.auth_focus == AuthField::Email,
        false,
    );
    render_field(
        f,
        chunks[2],
        "密码",
        &app.auth_password,
        app.auth_focus == AuthField::Password,
        true,
    );

    let hints = Line::from(vec![
        Span::styled("Enter", key_style()),
        Span::raw(" 注册  "),
        Span::styled("Esc", key_style()),
        Span::raw(" 返回登录"),
    ]);
    f.render_widget(
        Paragraph::new(hints)
            .style(Style::default().fg(Color::Rgb(216, 222, 233)))
            .alignment(Alignment::Center),
        chunks[3],
    );
}

fn key_style() -> Style {
    Style::default()
        .fg(Color::Rgb(136, 192, 208))
        .add_modifier(Modifier::BOLD)
}

fn render_field(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool, mask: bool) {
    let border_color = if focused {
        Color::Rgb(136, 192, 208)
    } else {
        Color::Rgb(76, 86, 106)
    };

    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
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

    f.render_widget(Paragraph::new(content), inner);
}
