/*!
 * Batch Process
 * Runs a script's task list in order, one short wait per task
 */

use super::{Completion, RunResult};
use crate::core::errors::{ProcessError, ProcessResult};
use crate::core::types::Priority;
use crate::process::timing::ExecutionContext;
use crate::process::validation::non_empty;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BatchProcess {
    tasks: Vec<String>,
    script: String,
    tasks_completed: usize,
}

impl BatchProcess {
    pub const PRIORITY: Priority = 2;

    /// Blank entries are kept but skipped when the batch runs
    pub fn new<I, S>(tasks: I, script: &str) -> ProcessResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            tasks: validate_tasks(tasks)?,
            script: non_empty("script name", script)?,
            tasks_completed: 0,
        })
    }

    #[inline]
    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    #[inline]
    pub fn script(&self) -> &str {
        &self.script
    }

    /// Tasks completed by the last execution
    #[inline]
    pub fn tasks_completed(&self) -> usize {
        self.tasks_completed
    }

    #[inline]
    pub fn total_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn all_tasks_completed(&self) -> bool {
        self.tasks_completed >= self.tasks.len()
    }

    /// Replace the task list; resets the completed count
    pub fn set_tasks<I, S>(&mut self, tasks: I) -> ProcessResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tasks = validate_tasks(tasks)?;
        self.tasks_completed = 0;
        Ok(())
    }

    pub fn set_script(&mut self, script: &str) -> ProcessResult<()> {
        self.script = non_empty("script name", script)?;
        Ok(())
    }

    pub fn add_task(&mut self, task: &str) -> ProcessResult<()> {
        self.tasks.push(non_empty("task", task)?);
        Ok(())
    }

    pub(super) fn describe(&self) -> String {
        format!(
            "Script={}, Tasks={}/{}",
            self.script,
            self.tasks_completed,
            self.tasks.len()
        )
    }

    pub(super) fn run(&mut self, ctx: &ExecutionContext) -> RunResult {
        self.tasks_completed = 0;
        let mut elapsed = 0;
        let mut checklist = String::new();

        for task in self.tasks.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            elapsed += ctx.task_wait()?;
            self.tasks_completed += 1;
            checklist.push_str("\n  ✓ ");
            checklist.push_str(task);
        }

        Ok(Completion::new(
            elapsed,
            format!(
                "Script '{}' completed. Tasks: {}/{}{}",
                self.script,
                self.tasks_completed,
                self.tasks.len(),
                checklist
            ),
        ))
    }
}

fn validate_tasks<I, S>(tasks: I) -> ProcessResult<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tasks: Vec<String> = tasks.into_iter().map(Into::into).collect();
    if tasks.is_empty() {
        return Err(ProcessError::EmptyField("task list".to_string()));
    }
    Ok(tasks)
}
