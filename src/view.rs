use chrono::NaiveDate;

use crate::models::Task;

/// 单个任务的展示记录：已经完成消毒和格式化，可直接放进界面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub deadline_display: String,
    pub priority_display: String,
    pub completed: bool,
}

/// 任务列表的展示态：空列表渲染成占位提示，而不是零条记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListView {
    Empty,
    Tasks(Vec<TaskView>),
}

/// 空列表时显示的提示文案
pub const EMPTY_PLACEHOLDER: &str = "还没有任务，按 a 新建一个";

/// 把任务记录投影成展示记录
///
/// 纯函数：只读输入切片，不碰缓存，不读取之前的渲染结果。
/// 同一份输入渲染多少次结果都相同。
pub fn render(tasks: &[Task]) -> TaskListView {
    if tasks.is_empty() {
        return TaskListView::Empty;
    }
    TaskListView::Tasks(tasks.iter().map(view_task).collect())
}

/// 单条投影。标题为空时退到 "Untitled"，与后端约定一致。
pub fn view_task(task: &Task) -> TaskView {
    let title = sanitize(&task.title);
    let title = if title.trim().is_empty() {
        "Untitled".to_string()
    } else {
        title
    };

    TaskView {
        id: task.id,
        title,
        body: sanitize(&task.body),
        deadline_display: format_deadline(task.deadline),
        priority_display: task.priority.to_string(),
        completed: task.completed,
    }
}

/// 截止日期的展示格式；缺省显示 "No deadline"
pub fn format_deadline(deadline: Option<NaiveDate>) -> String {
    match deadline {
        Some(date) => date.format("%b %e, %Y").to_string(),
        None => "No deadline".to_string(),
    }
}

/// 消毒自由文本
///
/// 终端里能"注入"的是控制字节和 ESC 引导的序列（改色、挪光标、
/// 改标题都从这里来），全部剔除；换行和制表符保留。
/// `<` `>` `&` 引号在终端没有标记语义，原样保留为字面文本。
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|&c| c == '\n' || c == '\t' || !c.is_control())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Task};

    fn task(id: u64, title: &str, body: &str) -> Task {
        Task {
            id,
            user_id: 42,
            title: title.to_string(),
            body: body.to_string(),
            priority: Priority::Medium,
            deadline: None,
            completed: false,
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let tasks = vec![task(1, "one", "first"), task(2, "two", "second")];

        let first = render(&tasks);
        let second = render(&tasks);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_list_renders_placeholder() {
        assert_eq!(render(&[]), TaskListView::Empty);
    }

    #[test]
    fn test_hostile_title_stays_literal_text() {
        let t = task(1, "<script>alert(1)</script>", "");
        let view = view_task(&t);

        // 标记字符在终端无意义，必须原样保留为字面文本
        assert_eq!(view.title, "<script>alert(1)</script>");
    }

    #[test]
    fn test_control_sequences_are_stripped() {
        let t = task(1, "evil\x1b[31mred\x1b[0m", "line1\nline2\x07");
        let view = view_task(&t);

        assert_eq!(view.title, "evil[31mred[0m");
        assert_eq!(view.body, "line1\nline2");
    }

    #[test]
    fn test_blank_title_falls_back_to_untitled() {
        let view = view_task(&task(1, "   ", "body"));
        assert_eq!(view.title, "Untitled");
    }

    #[test]
    fn test_created_task_view_fields() {
        // 场景：{title:"Buy milk", body:"", priority:MEDIUM, deadline:null}
        // 创建后后端返回 id=7, userId=42, completed=false
        let t = Task {
            id: 7,
            user_id: 42,
            title: "Buy milk".to_string(),
            body: String::new(),
            priority: Priority::Medium,
            deadline: None,
            completed: false,
        };

        let view = view_task(&t);
        assert_eq!(view.id, 7);
        assert_eq!(view.deadline_display, "No deadline");
        assert_eq!(view.priority_display, "MEDIUM");
        assert!(!view.completed);
    }

    #[test]
    fn test_deadline_formats_as_readable_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 9, 20).unwrap();
        let display = format_deadline(Some(date));
        assert!(display.contains("Sep"));
        assert!(display.contains("2025"));
    }
}
