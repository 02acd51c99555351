//! Text rendering for the task list view.
//!
//! # Responsibility
//! - Turn tasks into stable single-line and detail representations.
//! - Keep all display formatting out of the store.

use taskdeck_core::{Task, TaskId};

/// First segment of the id, enough to be readable and usually unique.
pub fn short_id(id: TaskId) -> String {
    id.to_string().chars().take(8).collect()
}

/// Single display line for one task in the list view.
pub fn task_line(task: &Task) -> String {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    let mut line = format!(
        "{checkbox} {}  !{}  {}  ({})",
        short_id(task.id),
        task.priority,
        task.title,
        task.category
    );
    if let Some(due) = &task.due_date {
        line.push_str(&format!("  due {due}"));
    }
    line
}

/// Prints the whole filtered view, one task per line.
pub fn print_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("no tasks");
        return;
    }
    for task in tasks {
        println!("{}", task_line(task));
    }
}

/// Multi-line detail block for one task.
pub fn task_details(task: &Task) -> String {
    let mut out = String::new();
    out.push_str(&format!("id:          {}\n", task.id));
    out.push_str(&format!("title:       {}\n", task.title));
    if !task.description.is_empty() {
        out.push_str(&format!("description: {}\n", task.description));
    }
    out.push_str(&format!("category:    {}\n", task.category));
    out.push_str(&format!("priority:    {}\n", task.priority));
    if let Some(due) = &task.due_date {
        out.push_str(&format!("due:         {due}\n"));
    }
    out.push_str(&format!(
        "status:      {}\n",
        if task.completed { "done" } else { "active" }
    ));
    out.push_str(&format!("created_at:  {}\n", task.created_at));
    out
}

#[cfg(test)]
mod tests {
    use super::{short_id, task_details, task_line};
    use taskdeck_core::{DueDate, Priority, Task, TaskDraft};

    fn sample_task() -> Task {
        Task::new(TaskDraft {
            title: "Buy milk".to_string(),
            description: Some("two liters".to_string()),
            category: Some("Groceries".to_string()),
            priority: Some(Priority::High),
            due_date: Some(DueDate::parse("2024-03-01").unwrap()),
        })
    }

    #[test]
    fn short_id_is_eight_chars() {
        let task = sample_task();
        assert_eq!(short_id(task.id).len(), 8);
    }

    #[test]
    fn task_line_shows_state_title_category_and_due() {
        let mut task = sample_task();
        let line = task_line(&task);
        assert!(line.starts_with("[ ] "));
        assert!(line.contains("!high"));
        assert!(line.contains("Buy milk"));
        assert!(line.contains("(Groceries)"));
        assert!(line.contains("due 2024-03-01"));

        task.toggle_completed();
        assert!(task_line(&task).starts_with("[x] "));
    }

    #[test]
    fn task_line_omits_due_when_absent() {
        let task = Task::new(TaskDraft::titled("no deadline"));
        assert!(!task_line(&task).contains("due"));
    }

    #[test]
    fn task_details_hides_empty_description() {
        let task = Task::new(TaskDraft::titled("bare"));
        let details = task_details(&task);
        assert!(!details.contains("description:"));
        assert!(details.contains("status:      active"));
        assert!(details.contains("category:    uncategorized"));
    }
}
