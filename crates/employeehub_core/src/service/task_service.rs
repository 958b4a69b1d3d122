//! Personal task board.
//!
//! # Invariants
//! - New tasks start as `To Do`.
//! - Task ids are unique within the board; a clock-derived id that collides
//!   is bumped past the current maximum.

use crate::clock::Clock;
use crate::model::task::{NewTask, Task, TaskId, TaskStatus};
use crate::repo::json_store::{load_json, save_json, TASKS_KEY};
use crate::repo::kv_repo::{KeyValueStore, RepoError, RepoResult};
use crate::seed;
use crate::signal::Signal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

#[derive(Debug)]
pub enum TaskError {
    EmptyTitle,
    TaskNotFound(TaskId),
    Repo(RepoError),
}

impl Display for TaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be blank"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub struct TaskBoard {
    clock: Rc<dyn Clock>,
    tasks: Signal<Vec<Task>>,
}

impl TaskBoard {
    /// Loads stored tasks, seeding mock tasks due relative to today when empty.
    pub fn open(store: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>) -> RepoResult<Self> {
        let tasks = load_json::<Vec<Task>>(store.as_ref(), TASKS_KEY)?
            .unwrap_or_else(|| seed::tasks(clock.today()));
        save_json(store.as_ref(), TASKS_KEY, &tasks)?;

        let mut signal = Signal::new(tasks);
        signal.subscribe(move |tasks: &Vec<Task>| save_json(store.as_ref(), TASKS_KEY, tasks));
        Ok(Self {
            clock,
            tasks: signal,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.get()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks().iter().find(|task| task.id == id)
    }

    pub fn add_task(&mut self, input: NewTask) -> Result<Task, TaskError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(TaskError::EmptyTitle);
        }

        let task = Task {
            id: self.allocate_id(),
            title: title.to_string(),
            description: input.description,
            due_date: input.due_date,
            status: TaskStatus::ToDo,
        };
        let appended = task.clone();
        self.tasks.update(|tasks| {
            let mut next = tasks.clone();
            next.push(appended);
            next
        })?;
        Ok(task)
    }

    /// Replaces the task with the same id.
    pub fn update_task(&mut self, task: Task) -> Result<(), TaskError> {
        if task.title.trim().is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        if self.task(task.id).is_none() {
            return Err(TaskError::TaskNotFound(task.id));
        }
        self.tasks.update(|tasks| {
            tasks
                .iter()
                .map(|current| {
                    if current.id == task.id {
                        task.clone()
                    } else {
                        current.clone()
                    }
                })
                .collect()
        })?;
        Ok(())
    }

    pub fn set_task_status(&mut self, id: TaskId, status: TaskStatus) -> Result<Task, TaskError> {
        let mut task = self.task(id).cloned().ok_or(TaskError::TaskNotFound(id))?;
        task.status = status;
        self.update_task(task.clone())?;
        Ok(task)
    }

    pub fn delete_task(&mut self, id: TaskId) -> Result<(), TaskError> {
        if self.task(id).is_none() {
            return Err(TaskError::TaskNotFound(id));
        }
        self.tasks
            .update(|tasks| tasks.iter().filter(|task| task.id != id).cloned().collect())?;
        Ok(())
    }

    fn allocate_id(&self) -> TaskId {
        let candidate = self.clock.now().timestamp_millis();
        match self.tasks().iter().map(|task| task.id).max() {
            Some(max) if max >= candidate => max + 1,
            _ => candidate,
        }
    }
}
