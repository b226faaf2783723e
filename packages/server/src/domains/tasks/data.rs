use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::common::sanitize::{clean_opt, clean_req, clean_text, clean_textarea, Sanitize};
use crate::common::UserId;
use crate::domains::tasks::models::{TaskPriority, TaskStatus};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<UserId>,
    pub project: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<UserId>,
    pub project: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

/// `GET /tasks?status=&assigned_to=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<UserId>,
}

impl Sanitize for CreateTaskRequest {
    fn sanitize(&mut self) {
        clean_req(&mut self.title, clean_text);
        clean_opt(&mut self.description, clean_textarea);
        clean_opt(&mut self.project, clean_text);
    }
}

impl Sanitize for UpdateTaskRequest {
    fn sanitize(&mut self) {
        if let Some(title) = self.title.as_mut() {
            clean_req(title, clean_text);
        }
        clean_opt(&mut self.description, clean_textarea);
        clean_opt(&mut self.project, clean_text);
    }
}
