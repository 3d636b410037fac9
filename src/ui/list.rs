use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::view::{self, TaskListView, TaskView};

/// 渲染任务列表页
///
/// 显示内容完全来自 view::render 的投影结果，列表本身不保存
/// 任何任务数据。
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let done_count = app.store.list().iter().filter(|t| t.completed).count();
    let total_count = app.store.len();

    let username = app
        .current_user()
        .map(|u| u.username.as_str())
        .unwrap_or("?");
    let title = format!(" {} 的任务 ({}/{}) ", username, done_count, total_count);

    let block = Block::default()
        .title(title)
        .title_alignment(ratatui::layout::Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .border_type(ratatui::widgets::BorderType::Rounded);

    let inner = block.inner(area);
    f.render_widget(block, area);

    match view::render(app.store.list()) {
        TaskListView::Empty => render_empty(f, inner),
        TaskListView::Tasks(records) => render_tasks(f, inner, &records, app.selected_task),
    }
}

/// 空列表占位
fn render_empty(f: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(view::EMPTY_PLACEHOLDER)
        .style(Style::default().fg(Color::Gray))
        .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(paragraph, area);
}

fn render_tasks(f: &mut Frame, area: Rect, records: &[TaskView], selected: usize) {
    let items: Vec<ListItem> = records
        .iter()
        .enumerate()
        .map(|(i, record)| task_item(record, i == selected))
        .collect();

    let list = List::new(items);

    let mut list_state = ListState::default();
    list_state.select(Some(selected));

    f.render_stateful_widget(list, area, &mut list_state);
}

fn task_item(record: &TaskView, is_selected: bool) -> ListItem<'static> {
    // 选中指示器
    let selection_indicator = if is_selected {
        Span::styled("▶ ", Style::default().fg(Color::White))
    } else {
        Span::raw("  ")
    };

    // 优先级指示器
    let priority_indicator = match record.priority_display.as_str() {
        "HIGH" => Span::styled("● ", Style::default().fg(Color::Red)),
        "MEDIUM" => Span::styled("● ", Style::default().fg(Color::Yellow)),
        "LOW" => Span::styled("● ", Style::default().fg(Color::Blue)),
        _ => Span::raw("  "),
    };

    let title_style = if record.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::Rgb(236, 239, 244))
    };

    let status_span = if record.completed {
        Span::styled("✓ 已完成", Style::default().fg(Color::Rgb(163, 190, 140)))
    } else {
        Span::styled("待办", Style::default().fg(Color::Rgb(235, 203, 139)))
    };

    let mut lines = vec![Line::from(vec![
        Span::raw(" "),
        selection_indicator,
        priority_indicator,
        Span::styled(record.title.clone(), title_style),
    ])];

    // 第一行正文做摘要，完整内容在编辑框里看
    if let Some(first_line) = record.body.lines().next() {
        if !first_line.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("      "),
                Span::styled(
                    first_line.to_string(),
                    Style::default().fg(Color::Rgb(129, 161, 193)),
                ),
            ]));
        }
    }

    lines.push(Line::from(vec![
        Span::raw("      "),
        Span::styled(
            format!("截止: {}", record.deadline_display),
            Style::default().fg(Color::Rgb(129, 161, 193)),
        ),
        Span::raw("  "),
        Span::styled(
            format!("优先级: {}", record.priority_display),
            Style::default().fg(Color::Rgb(129, 161, 193)),
        ),
        Span::raw("  "),
        status_span,
    ]));

    let item_style = if is_selected {
        Style::default().bg(Color::Rgb(59, 66, 82))
    } else if record.completed {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };

    ListItem::new(lines).style(item_style)
}
