use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::dialogs::centered_rect;
use crate::config::{get_config_path, Config};

/// 首次运行的欢迎对话框
pub fn render(f: &mut Frame, area: Rect, config: &Config) {
    let popup = centered_rect(60, 50, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title("  欢迎使用 Taskdeck  ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(163, 190, 140)))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .style(Style::default().bg(Color::Rgb(46, 52, 64)));

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  服务地址: "),
            Span::styled(
                config.api_base.clone(),
                Style::default().fg(Color::Rgb(136, 192, 208)),
            ),
        ]),
        Line::from(vec![
            Span::raw("  配置文件: "),
            Span::styled(
                get_config_path().display().to_string(),
                Style::default().fg(Color::Rgb(136, 192, 208)),
            ),
        ]),
        Line::from(""),
        Line::from("  修改服务地址: tdk config server <url>"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  按任意键继续",
            Style::default()
                .fg(Color::Rgb(216, 222, 233))
                .add_modifier(Modifier::BOLD),
        )]),
    ];

    f.render_widget(
        Paragraph::new(lines).style(Style::default().fg(Color::Rgb(216, 222, 233))),
        inner,
    );
}
