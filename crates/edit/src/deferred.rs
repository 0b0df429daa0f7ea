//! Work queued to run after the current event, drained by the host loop.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Initial height check of a session's auto-growing editor.
    MeasureEditor { session: u64 },
}

impl DeferredTask {
    pub fn session(&self) -> u64 {
        match self {
            DeferredTask::MeasureEditor { session } => *session,
        }
    }
}

#[derive(Debug, Default)]
pub struct DeferredQueue {
    tasks: VecDeque<DeferredTask>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self { tasks: VecDeque::new() }
    }

    pub fn push(&mut self, task: DeferredTask) {
        self.tasks.push_back(task);
    }

    pub fn pop(&mut self) -> Option<DeferredTask> {
        self.tasks.pop_front()
    }

    /// Drop everything queued on behalf of a session.
    pub fn cancel_session(&mut self, session: u64) {
        self.tasks.retain(|task| task.session() != session);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
