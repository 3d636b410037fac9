use thiserror::Error;
use tracing::{debug, warn};

use crate::api::{ApiError, TaskBackend};
use crate::models::TaskDraft;
use crate::store::TaskStore;

/// 动作层错误：校验失败在发请求之前就返回，请求失败原样透传。
/// 任何一条路径都不会动 TaskStore。
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("标题不能为空")]
    EmptyTitle,

    #[error("任务 {0} 不存在")]
    UnknownTask(u64),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// 从后端整表拉取并换入缓存
///
/// 每次成功的变更之后都恰好调用一次。不做局部修补是刻意的取舍：
/// 多付一次往返，换来显示内容永远等于服务端真相。
pub fn reload<B: TaskBackend>(
    backend: &B,
    store: &mut TaskStore,
    user_id: u64,
) -> Result<(), ActionError> {
    let ticket = store.begin_reload();
    let tasks = backend.tasks_for_user(user_id)?;
    if !store.replace_all(ticket, tasks) {
        debug!(user_id, "reload superseded, result dropped");
    }
    Ok(())
}

/// 新建任务；成功后整表重载
pub fn create<B: TaskBackend>(
    backend: &B,
    store: &mut TaskStore,
    draft: TaskDraft,
) -> Result<(), ActionError> {
    let draft = validated(draft)?;
    let user_id = draft.user_id;

    let created = backend.create_task(&draft)?;
    debug!(id = created.id, "task created");

    reload(backend, store, user_id)
}

/// 更新任务；`id` 必须指向缓存中已有的任务
pub fn update<B: TaskBackend>(
    backend: &B,
    store: &mut TaskStore,
    id: u64,
    draft: TaskDraft,
) -> Result<(), ActionError> {
    if store.get(id).is_none() {
        return Err(ActionError::UnknownTask(id));
    }
    let draft = validated(draft)?;
    let user_id = draft.user_id;

    backend.update_task(id, &draft)?;
    debug!(id, "task updated");

    reload(backend, store, user_id)
}

/// 删除任务
///
/// 调用方必须先通过确认对话框拿到用户同意，这里不再询问。
pub fn delete<B: TaskBackend>(
    backend: &B,
    store: &mut TaskStore,
    id: u64,
    user_id: u64,
) -> Result<(), ActionError> {
    if store.get(id).is_none() {
        return Err(ActionError::UnknownTask(id));
    }

    backend.delete_task(id)?;
    debug!(id, "task deleted");

    reload(backend, store, user_id)
}

/// 标记完成（只有 false→true 一个方向）
pub fn complete<B: TaskBackend>(
    backend: &B,
    store: &mut TaskStore,
    id: u64,
    user_id: u64,
) -> Result<(), ActionError> {
    if store.get(id).is_none() {
        return Err(ActionError::UnknownTask(id));
    }

    if let Err(e) = backend.complete_task(id) {
        warn!(id, error = %e, "complete failed");
        return Err(e.into());
    }

    reload(backend, store, user_id)
}

/// 提交前的表单校验：标题去掉首尾空白后必须非空
fn validated(mut draft: TaskDraft) -> Result<TaskDraft, ActionError> {
    draft.title = draft.title.trim().to_string();
    if draft.title.is_empty() {
        return Err(ActionError::EmptyTitle);
    }
    draft.body = draft.body.trim().to_string();
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Task};
    use crate::view;
    use std::cell::{Cell, RefCell};

    /// 内存版后端：行为对齐真实服务端（分配 id、整表返回、
    /// complete 只置位），可切换为全部报错
    struct FakeBackend {
        tasks: RefCell<Vec<Task>>,
        next_id: Cell<u64>,
        requests: Cell<u32>,
        fail: Cell<bool>,
    }

    impl FakeBackend {
        fn new() -> Self {
            Self {
                tasks: RefCell::new(Vec::new()),
                next_id: Cell::new(1),
                requests: Cell::new(0),
                fail: Cell::new(false),
            }
        }

        fn touch(&self) -> Result<(), ApiError> {
            self.requests.set(self.requests.get() + 1);
            if self.fail.get() {
                return Err(ApiError::Status {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    impl TaskBackend for FakeBackend {
        fn tasks_for_user(&self, user_id: u64) -> Result<Vec<Task>, ApiError> {
            self.touch()?;
            Ok(self
                .tasks
                .borrow()
                .iter()
                .filter(|t| t.user_id == user_id)
                .cloned()
                .collect())
        }

        fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
            self.touch()?;
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            let task = Task {
                id,
                user_id: draft.user_id,
                title: draft.title.clone(),
                body: draft.body.clone(),
                priority: draft.priority,
                deadline: draft.deadline,
                completed: false,
            };
            self.tasks.borrow_mut().push(task.clone());
            Ok(task)
        }

        fn update_task(&self, id: u64, draft: &TaskDraft) -> Result<Task, ApiError> {
            self.touch()?;
            let mut tasks = self.tasks.borrow_mut();
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or(ApiError::Status {
                    status: 404,
                    message: "not found".to_string(),
                })?;
            task.title = draft.title.clone();
            task.body = draft.body.clone();
            task.priority = draft.priority;
            task.deadline = draft.deadline;
            Ok(task.clone())
        }

        fn delete_task(&self, id: u64) -> Result<(), ApiError> {
            self.touch()?;
            self.tasks.borrow_mut().retain(|t| t.id != id);
            Ok(())
        }

        fn complete_task(&self, id: u64) -> Result<(), ApiError> {
            self.touch()?;
            if let Some(task) = self.tasks.borrow_mut().iter_mut().find(|t| t.id == id) {
                task.completed = true;
            }
            Ok(())
        }
    }

    fn draft(user_id: u64, title: &str) -> TaskDraft {
        TaskDraft {
            user_id,
            title: title.to_string(),
            body: String::new(),
            priority: Priority::Medium,
            deadline: None,
        }
    }

    fn seeded(backend: &FakeBackend, store: &mut TaskStore, titles: &[&str]) {
        for title in titles {
            create(backend, store, draft(42, title)).unwrap();
        }
    }

    #[test]
    fn test_create_adds_exactly_one_task() {
        let backend = FakeBackend::new();
        let mut store = TaskStore::new();
        seeded(&backend, &mut store, &["first"]);
        let before = store.len();

        let mut d = draft(42, "second");
        d.body = "details".to_string();
        d.priority = Priority::High;
        create(&backend, &mut store, d).unwrap();

        assert_eq!(store.len(), before + 1);
        let added = store.list().iter().find(|t| t.title == "second").unwrap();
        assert_eq!(added.body, "details");
        assert_eq!(added.priority, Priority::High);
        assert_eq!(added.user_id, 42);
        assert!(added.id > 0);
    }

    #[test]
    fn test_create_with_empty_title_sends_nothing() {
        let backend = FakeBackend::new();
        let mut store = TaskStore::new();

        let err = create(&backend, &mut store, draft(42, "   ")).unwrap_err();
        assert!(matches!(err, ActionError::EmptyTitle));
        assert_eq!(backend.requests.get(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_failure_leaves_store_unchanged() {
        let backend = FakeBackend::new();
        let mut store = TaskStore::new();
        seeded(&backend, &mut store, &["keep me"]);

        backend.fail.set(true);
        let err = create(&backend, &mut store, draft(42, "doomed")).unwrap_err();
        assert!(matches!(err, ActionError::Api(_)));

        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].title, "keep me");
    }

    #[test]
    fn test_complete_flips_only_that_task() {
        let backend = FakeBackend::new();
        let mut store = TaskStore::new();
        seeded(&backend, &mut store, &["a", "b", "c"]);
        let target = store.list()[1].id;

        complete(&backend, &mut store, target, 42).unwrap();

        for task in store.list() {
            if task.id == target {
                assert!(task.completed);
            } else {
                assert!(!task.completed);
            }
        }
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let backend = FakeBackend::new();
        let mut store = TaskStore::new();
        seeded(&backend, &mut store, &["a", "b", "c"]);
        let target = store.list()[0].id;
        let survivors: Vec<u64> = store
            .list()
            .iter()
            .map(|t| t.id)
            .filter(|&id| id != target)
            .collect();

        delete(&backend, &mut store, target, 42).unwrap();

        assert!(store.get(target).is_none());
        let remaining: Vec<u64> = store.list().iter().map(|t| t.id).collect();
        assert_eq!(remaining, survivors);
    }

    #[test]
    fn test_update_requires_known_id() {
        let backend = FakeBackend::new();
        let mut store = TaskStore::new();

        let err = update(&backend, &mut store, 99, draft(42, "x")).unwrap_err();
        assert!(matches!(err, ActionError::UnknownTask(99)));
        assert_eq!(backend.requests.get(), 0);
    }

    #[test]
    fn test_update_round_trips_fields() {
        let backend = FakeBackend::new();
        let mut store = TaskStore::new();
        seeded(&backend, &mut store, &["old title"]);
        let id = store.list()[0].id;

        let mut d = draft(42, "new title");
        d.deadline = chrono::NaiveDate::from_ymd_opt(2026, 1, 15);
        update(&backend, &mut store, id, d).unwrap();

        let task = store.get(id).unwrap();
        assert_eq!(task.title, "new title");
        assert_eq!(
            task.deadline,
            chrono::NaiveDate::from_ymd_opt(2026, 1, 15)
        );
    }

    #[test]
    fn test_buy_milk_scenario() {
        let backend = FakeBackend::new();
        let mut store = TaskStore::new();

        create(&backend, &mut store, draft(42, "Buy milk")).unwrap();

        let task = store.list().iter().find(|t| t.title == "Buy milk").unwrap();
        assert_eq!(task.user_id, 42);
        assert!(!task.completed);

        let rendered = view::render(store.list());
        match rendered {
            view::TaskListView::Tasks(records) => {
                let record = records.iter().find(|r| r.title == "Buy milk").unwrap();
                assert_eq!(record.deadline_display, "No deadline");
                assert_eq!(record.priority_display, "MEDIUM");
                assert!(!record.completed);
            }
            view::TaskListView::Empty => panic!("expected a populated view"),
        }
    }
}
