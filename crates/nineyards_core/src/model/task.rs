//! Task board entities: groups, tasks, sub-tasks and their edit payloads.
//!
//! # Invariants
//! - `position` values are non-negative; the backend keeps them unique per
//!   parent (project for groups, task for sub-tasks).
//! - Edit payloads distinguish "leave unchanged" (absent) from "clear" (null).

use crate::codec::{Entity, EntitySchema, FieldKind, FieldSpec, Patch};
use crate::dates;
use crate::model::{ProjectId, SubTaskId, TaskGroupId, TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A column on a project board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGroup {
    pub id: TaskGroupId,
    pub name: String,
    pub position: u64,
    pub project_id: ProjectId,
}

pub const TASK_GROUP_SCHEMA: EntitySchema = EntitySchema {
    name: "TaskGroup",
    fields: &[
        FieldSpec::required("id", "id", FieldKind::Text),
        FieldSpec::required("name", "name", FieldKind::Text),
        FieldSpec::required("position", "position", FieldKind::Unsigned),
        FieldSpec::required("project_id", "projectId", FieldKind::Text),
    ],
};

impl Entity for TaskGroup {
    const SCHEMA: &'static EntitySchema = &TASK_GROUP_SCHEMA;
}

/// Partial update for a task group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTaskGroup {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub position: Patch<u64>,
}

pub const EDIT_TASK_GROUP_SCHEMA: EntitySchema = EntitySchema {
    name: "EditTaskGroup",
    fields: &[
        FieldSpec::optional("name", "name", FieldKind::Text),
        FieldSpec::optional("position", "position", FieldKind::Unsigned),
    ],
};

impl Entity for EditTaskGroup {
    const SCHEMA: &'static EntitySchema = &EDIT_TASK_GROUP_SCHEMA;
}

/// A card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub task_group_id: TaskGroupId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub information: Option<String>,
    pub creator: UserId,
    pub position: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,
    pub primary_colour: String,
    pub accent_colour: String,
    pub created: DateTime<Utc>,
}

pub const TASK_SCHEMA: EntitySchema = EntitySchema {
    name: "Task",
    fields: &[
        FieldSpec::required("id", "id", FieldKind::Text),
        FieldSpec::required("project_id", "projectId", FieldKind::Text),
        FieldSpec::required("task_group_id", "taskGroupId", FieldKind::Text),
        FieldSpec::required("name", "name", FieldKind::Text),
        FieldSpec::optional("information", "information", FieldKind::Text),
        FieldSpec::required("creator", "creator", FieldKind::Text),
        FieldSpec::required("position", "position", FieldKind::Unsigned),
        FieldSpec::optional("due", "due", FieldKind::DateTime),
        FieldSpec::required("primary_colour", "primaryColour", FieldKind::Text),
        FieldSpec::required("accent_colour", "accentColour", FieldKind::Text),
        FieldSpec::required("created", "created", FieldKind::DateTime),
    ],
};

impl Entity for Task {
    const SCHEMA: &'static EntitySchema = &TASK_SCHEMA;
}

impl Task {
    /// Whole days left until the due date, rounded up; `None` without one.
    pub fn days_until_due(&self, now_ms: i64) -> Option<i64> {
        self.due
            .map(|due| dates::days_until(due.timestamp_millis(), now_ms))
    }

    /// Due date as shown on task cards, e.g. `"March, 5, 2024"`.
    pub fn due_label(&self) -> Option<String> {
        self.due
            .and_then(|due| dates::format_date(due.timestamp_millis()))
    }
}

/// A checklist item inside a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    pub id: SubTaskId,
    pub task_id: TaskId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub completed: bool,
    pub position: u64,
    /// Influence of this item on the task's completion ratio.
    pub weight: u64,
}

pub const SUB_TASK_SCHEMA: EntitySchema = EntitySchema {
    name: "SubTask",
    fields: &[
        FieldSpec::required("id", "id", FieldKind::Text),
        FieldSpec::required("task_id", "taskId", FieldKind::Text),
        FieldSpec::optional("assignee", "assignee", FieldKind::Text),
        FieldSpec::optional("body", "body", FieldKind::Text),
        FieldSpec::required("completed", "completed", FieldKind::Boolean),
        FieldSpec::required("position", "position", FieldKind::Unsigned),
        FieldSpec::required("weight", "weight", FieldKind::Unsigned),
    ],
};

impl Entity for SubTask {
    const SCHEMA: &'static EntitySchema = &SUB_TASK_SCHEMA;
}

/// Partial update for a sub-task. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSubTask {
    /// The assigned member's user id.
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub assignee: Patch<UserId>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub body: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub completed: Patch<bool>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub position: Patch<u64>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub weight: Patch<u64>,
}

pub const EDIT_SUB_TASK_SCHEMA: EntitySchema = EntitySchema {
    name: "EditSubTask",
    fields: &[
        FieldSpec::optional("assignee", "assignee", FieldKind::Text),
        FieldSpec::optional("body", "body", FieldKind::Text),
        FieldSpec::optional("completed", "completed", FieldKind::Boolean),
        FieldSpec::optional("position", "position", FieldKind::Unsigned),
        FieldSpec::optional("weight", "weight", FieldKind::Unsigned),
    ],
};

impl Entity for EditSubTask {
    const SCHEMA: &'static EntitySchema = &EDIT_SUB_TASK_SCHEMA;
}

impl EditSubTask {
    /// Returns whether the payload would change nothing.
    pub fn is_empty(&self) -> bool {
        self.assignee.is_absent()
            && self.body.is_absent()
            && self.completed.is_absent()
            && self.position.is_absent()
            && self.weight.is_absent()
    }
}

/// A task with all of its sub-tasks, as returned by most task endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullTask {
    pub sub_tasks: Vec<SubTask>,
    pub task: Task,
}

pub const FULL_TASK_SCHEMA: EntitySchema = EntitySchema {
    name: "FullTask",
    fields: &[
        FieldSpec::required("sub_tasks", "subTasks", FieldKind::EntityList(&SUB_TASK_SCHEMA)),
        FieldSpec::required("task", "task", FieldKind::Entity(&TASK_SCHEMA)),
    ],
};

impl Entity for FullTask {
    const SCHEMA: &'static EntitySchema = &FULL_TASK_SCHEMA;
}

impl FullTask {
    /// Weighted completion ratio in `[0.0, 1.0]`; `None` when nothing is weighted.
    pub fn completion(&self) -> Option<f64> {
        let total: u64 = self.sub_tasks.iter().map(|sub_task| sub_task.weight).sum();
        if total == 0 {
            return None;
        }
        let done: u64 = self
            .sub_tasks
            .iter()
            .filter(|sub_task| sub_task.completed)
            .map(|sub_task| sub_task.weight)
            .sum();
        Some(done as f64 / total as f64)
    }

    /// Sub-tasks ordered by board position.
    pub fn ordered_sub_tasks(&self) -> Vec<&SubTask> {
        let mut ordered: Vec<&SubTask> = self.sub_tasks.iter().collect();
        ordered.sort_by_key(|sub_task| sub_task.position);
        ordered
    }
}
