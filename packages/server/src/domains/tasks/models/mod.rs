pub mod task;

pub use task::{CreateTask, Task, TaskPriority, TaskStatus, TaskWithAssignee, UpdateTask};
