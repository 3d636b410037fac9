use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::dialogs::centered_rect;
use crate::app::App;

/// 渲染个人资料页
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let box_area = centered_rect(50, 50, area);

    let block = Block::default()
        .title("  个人资料  ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(136, 192, 208)))
        .border_type(ratatui::widgets::BorderType::Rounded);

    let inner = block.inner(box_area);
    f.render_widget(block, box_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let (username, email) = match app.current_user() {
        Some(user) => (user.username.clone(), user.email.clone()),
        None => ("未登录".to_string(), String::new()),
    };

    let name_line = Line::from(vec![
        Span::styled("用户名: ", Style::default().fg(Color::Rgb(129, 161, 193))),
        Span::styled(
            username,
            Style::default()
                .fg(Color::Rgb(236, 239, 244))
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(name_line), chunks[0]);

    let email_line = Line::from(vec![
        Span::styled("邮箱:   ", Style::default().fg(Color::Rgb(129, 161, 193))),
        Span::styled(email, Style::default().fg(Color::Rgb(236, 239, 244))),
    ]);
    f.render_widget(Paragraph::new(email_line), chunks[1]);

    let hints = Line::from(vec![
        Span::styled("e", key_style()),
        Span::raw(" 编辑资料  "),
        Span::styled("Esc", key_style()),
        Span::raw(" 返回任务列表"),
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
