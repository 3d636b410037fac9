use crossterm::event::{KeyCode, KeyEvent};
use tui_textarea::{CursorMove, TextArea};

// tui-textarea 自带 ratatui 依赖，事件不直接喂给它，
// 统一由我们翻译成编辑方法调用
use ratatui::{
    layout::Rect,
    style::{Color as RatatuiColor, Style as RatatuiStyle},
    Frame,
};

/// 任务正文的多行编辑器
pub struct BodyEditor {
    textarea: TextArea<'static>,
}

impl BodyEditor {
    pub fn new(initial_value: &str) -> Self {
        let mut textarea = if initial_value.is_empty() {
            TextArea::default()
        } else {
            TextArea::from(initial_value.lines().map(|s| s.to_string()))
        };

        // Nord 配色
        textarea.set_style(
            RatatuiStyle::default()
                .fg(RatatuiColor::Rgb(236, 239, 244))
                .bg(RatatuiColor::Rgb(46, 52, 64)),
        );
        textarea.set_cursor_style(
            RatatuiStyle::default()
                .bg(RatatuiColor::Rgb(136, 192, 208))
                .fg(RatatuiColor::Rgb(46, 52, 64)),
        );
        textarea.set_cursor_line_style(RatatuiStyle::default().bg(RatatuiColor::Rgb(59, 66, 82)));

        Self { textarea }
    }

    /// 当前内容
    pub fn content(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// 处理按键；返回 false 表示这个键不归编辑器管（交回上层处理）
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => {
                self.textarea.insert_char(c);
                true
            }
            KeyCode::Enter => {
                self.textarea.insert_newline();
                true
            }
            KeyCode::Backspace => {
                self.textarea.delete_char();
                true
            }
            KeyCode::Delete => {
                self.textarea.delete_next_char();
                true
            }
            KeyCode::Left => {
                self.textarea.move_cursor(CursorMove::Back);
                true
            }
            KeyCode::Right => {
                self.textarea.move_cursor(CursorMove::Forward);
                true
            }
            KeyCode::Up => {
                self.textarea.move_cursor(CursorMove::Up);
                true
            }
            KeyCode::Down => {
                self.textarea.move_cursor(CursorMove::Down);
                true
            }
            KeyCode::Home => {
                self.textarea.move_cursor(CursorMove::Head);
                true
            }
            KeyCode::End => {
                self.textarea.move_cursor(CursorMove::End);
                true
            }
            _ => false,
        }
    }

    /// 渲染编辑区
    pub fn render(&self, f: &mut Frame, area: Rect) {
        f.render_widget(&self.textarea, area);
    }
}
