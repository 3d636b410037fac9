use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::dialogs::centered_rect;

/// 渲染快捷键帮助面板
pub fn render(f: &mut Frame, area: Rect) {
    let popup = centered_rect(50, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title("  快捷键  ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(136, 192, 208)))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .style(Style::default().bg(Color::Rgb(46, 52, 64)));

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let entries: [(&str, &str); 12] = [
        ("j / ↓", "下一个任务"),
        ("k / ↑", "上一个任务"),
        ("a", "新建任务"),
        ("e / Enter", "编辑选中任务"),
        ("c", "标记完成"),
        ("d", "删除（需确认）"),
        ("r", "重新加载列表"),
        ("p", "个人资料"),
        ("L", "登出"),
        ("?", "帮助"),
        ("q", "退出"),
        ("Esc", "关闭弹层 / 返回"),
    ];

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (key, desc) in entries {
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(
                format!("{:<10}", key),
                Style::default()
                    .fg(Color::Rgb(136, 192, 208))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(desc, Style::default().fg(Color::Rgb(216, 222, 233))),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}
