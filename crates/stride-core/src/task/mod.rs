//! The focus screen's task list.
//!
//! An ordered, in-memory list. Positions are the handle the UI works with;
//! ids exist so events can identify a task after the list has shifted.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub completed: bool,
    pub created_at: DateTime<Local>,
}

impl Task {
    pub fn new(name: impl Into<String>, now: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            completed: false,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn add(&mut self, name: &str, now: DateTime<Local>) -> Result<Event, ValidationError> {
        let name = clean_name(name)?;
        let task = Task::new(name, now);
        let event = Event::TaskAdded {
            id: task.id,
            name: task.name.clone(),
        };
        self.tasks.push(task);
        Ok(event)
    }

    pub fn rename(&mut self, index: usize, name: &str) -> Result<Event, ValidationError> {
        let name = clean_name(name)?;
        let task = self.get_mut(index)?;
        let from = std::mem::replace(&mut task.name, name);
        Ok(Event::TaskRenamed {
            id: task.id,
            from,
            to: task.name.clone(),
        })
    }

    pub fn remove(&mut self, index: usize) -> Result<Event, ValidationError> {
        self.get_mut(index)?;
        let task = self.tasks.remove(index);
        Ok(Event::TaskRemoved {
            id: task.id,
            name: task.name,
        })
    }

    pub fn toggle(&mut self, index: usize) -> Result<Event, ValidationError> {
        let task = self.get_mut(index)?;
        task.completed = !task.completed;
        Ok(Event::TaskToggled {
            id: task.id,
            name: task.name.clone(),
            completed: task.completed,
        })
    }

    pub fn clear_completed(&mut self) -> Event {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        Event::TasksCleared {
            count: before - self.tasks.len(),
            completed_only: true,
        }
    }

    pub fn clear_all(&mut self) -> Event {
        let count = self.tasks.len();
        self.tasks.clear();
        Event::TasksCleared {
            count,
            completed_only: false,
        }
    }

    /// Hint line under the list.
    pub fn summary(&self) -> String {
        if self.tasks.is_empty() {
            "No tasks yet, add one with `task add`".to_string()
        } else {
            format!(
                "{} tasks, {} completed",
                self.tasks.len(),
                self.completed_count()
            )
        }
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut Task, ValidationError> {
        let len = self.tasks.len();
        self.tasks
            .get_mut(index)
            .ok_or_else(|| ValidationError::OutOfBounds {
                collection: "tasks".into(),
                index,
                len,
            })
    }
}

fn clean_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName {
            field: "task name".into(),
        });
    }
    Ok(trimmed.to_string())
}
