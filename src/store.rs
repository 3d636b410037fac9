use crate::models::Task;

/// 一次重载的批次凭证
///
/// 重载前先 `begin_reload` 拿凭证，响应回来后带凭证提交；
/// 如果期间又发起了新的重载，旧凭证的结果会被丢弃（last-request-wins）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadTicket(u64);

/// 当前用户任务列表的内存缓存，渲染的唯一数据来源
///
/// 只有 `replace_all` 一个写入口：整表换入后端刚返回的列表，
/// 不做局部修补。顺序保持服务端返回的顺序，不在客户端排序。
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    generation: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始一次重载，使之前发出的凭证全部作废
    pub fn begin_reload(&mut self) -> ReloadTicket {
        self.generation += 1;
        ReloadTicket(self.generation)
    }

    /// 整表换入；凭证过期则丢弃并返回 false
    pub fn replace_all(&mut self, ticket: ReloadTicket, tasks: Vec<Task>) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.tasks = tasks;
        true
    }

    /// 当前缓存的任务序列，保持收到时的顺序
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Task};

    fn task(id: u64, title: &str) -> Task {
        Task {
            id,
            user_id: 1,
            title: title.to_string(),
            body: String::new(),
            priority: Priority::Medium,
            deadline: None,
            completed: false,
        }
    }

    #[test]
    fn test_replace_all_swaps_whole_list() {
        let mut store = TaskStore::new();
        let ticket = store.begin_reload();
        assert!(store.replace_all(ticket, vec![task(1, "a"), task(2, "b")]));
        assert_eq!(store.len(), 2);

        let ticket = store.begin_reload();
        assert!(store.replace_all(ticket, vec![task(3, "c")]));
        assert_eq!(store.len(), 1);
        assert!(store.get(1).is_none());
        assert_eq!(store.get(3).unwrap().title, "c");
    }

    #[test]
    fn test_order_is_preserved_as_received() {
        let mut store = TaskStore::new();
        let ticket = store.begin_reload();
        store.replace_all(ticket, vec![task(9, "z"), task(1, "a"), task(5, "m")]);

        let ids: Vec<u64> = store.list().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![9, 1, 5]);
    }

    #[test]
    fn test_stale_reload_is_discarded() {
        let mut store = TaskStore::new();

        // 两次重载交错：先发出的响应后到，必须被丢弃
        let first = store.begin_reload();
        let second = store.begin_reload();

        assert!(store.replace_all(second, vec![task(2, "fresh")]));
        assert!(!store.replace_all(first, vec![task(1, "stale")]));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(2).unwrap().title, "fresh");
    }

    #[test]
    fn test_empty_store() {
        let store = TaskStore::new();
        assert!(store.is_empty());
        assert!(store.list().is_empty());
        assert!(store.get(42).is_none());
    }
}
