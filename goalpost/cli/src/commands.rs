use anyhow::{Context as _, bail};
use chrono::NaiveDateTime;
use clap::Subcommand;
use goalpost_core::{Board, Deadline, ItemId, KeyValueStore, Locale, RowStyle, TaskRow};
use std::io::{BufRead, Write};
use tracing::warn;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add a task, optionally with a deadline such as 2025-01-31T18:00
    Add {
        text: String,
        #[arg(short, long)]
        deadline: Option<Deadline>,
    },
    /// List tasks, open ones first by deadline
    List,
    /// Mark a task done, or open again
    Toggle { id: ItemId },
    /// Delete a task by id
    Rm { id: ItemId },
    /// Delete a task by its 1-based position in `list`
    RmAt { position: usize },
    /// Manage annual goals
    #[command(subcommand)]
    Goal(GoalCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum GoalCommand {
    /// Add an annual goal
    Add { text: String },
    /// List annual goals
    List,
    /// Delete a goal after confirmation
    Rm {
        id: ItemId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Terminal and clock a command runs against.
pub struct Context<R, W> {
    pub input: R,
    pub output: W,
    pub now: NaiveDateTime,
    pub locale: Locale,
}

pub fn execute<S, R, W>(
    command: Command,
    board: &mut Board<S>,
    ctx: &mut Context<R, W>,
) -> anyhow::Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    match command {
        Command::Add { text, deadline } => match board.add_task(&text, deadline)? {
            Some(id) => writeln!(ctx.output, "Task added with ID {id}")?,
            None => warn!("ignoring task with blank text"),
        },
        Command::List => {
            let rows = board.task_rows(ctx.now, ctx.locale);
            if rows.is_empty() {
                writeln!(ctx.output, "No tasks yet.")?;
            }
            for (position, row) in rows.iter().enumerate() {
                writeln!(ctx.output, "{}", format_task_row(position + 1, row))?;
            }
        }
        Command::Toggle { id } => {
            if board.toggle_task(id)? {
                writeln!(ctx.output, "Task {id} marked done")?;
            } else {
                writeln!(ctx.output, "Task {id} reopened")?;
            }
        }
        Command::Rm { id } => {
            let task = board.delete_task(id)?;
            writeln!(ctx.output, "Deleted task {id}: {}", task.text)?;
        }
        Command::RmAt { position } => {
            let Some(index) = position.checked_sub(1) else {
                bail!("positions start at 1");
            };
            let Some(task) = board.delete_task_at(index)? else {
                bail!("no task at position {position}");
            };
            writeln!(ctx.output, "Deleted task {}: {}", task.id, task.text)?;
        }
        Command::Goal(command) => execute_goal(command, board, ctx)?,
    }
    Ok(())
}

fn execute_goal<S, R, W>(
    command: GoalCommand,
    board: &mut Board<S>,
    ctx: &mut Context<R, W>,
) -> anyhow::Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    match command {
        GoalCommand::Add { text } => match board.add_goal(&text)? {
            Some(id) => writeln!(ctx.output, "Goal added with ID {id}")?,
            None => warn!("ignoring goal with blank text"),
        },
        GoalCommand::List => {
            let rows = board.goal_rows();
            if rows.is_empty() {
                writeln!(ctx.output, "No goals yet.")?;
            }
            for (position, row) in rows.iter().enumerate() {
                writeln!(ctx.output, "{:>2}. {}  #{}", position + 1, row.text, row.id)?;
            }
        }
        GoalCommand::Rm { id, yes } => {
            let text = board.request_goal_delete(id)?.text.clone();
            if !yes && !confirm(ctx, &format!("Delete goal \"{text}\"?"))? {
                board.cancel_goal_delete();
                writeln!(ctx.output, "Kept goal {id}")?;
                return Ok(());
            }
            if board.confirm_goal_delete()?.is_some() {
                writeln!(ctx.output, "Deleted goal {id}: {text}")?;
            }
        }
    }
    Ok(())
}

/// Asks a yes/no question; anything but `y` or `yes` declines.
fn confirm<R: BufRead, W: Write>(ctx: &mut Context<R, W>, question: &str) -> anyhow::Result<bool> {
    write!(ctx.output, "{question} [y/N] ")?;
    ctx.output.flush()?;
    let mut answer = String::new();
    ctx.input
        .read_line(&mut answer)
        .context("cannot read confirmation")?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn format_task_row(position: usize, row: &TaskRow) -> String {
    let mark = if row.done { "x" } else { " " };
    let mut line = format!("{position:>2}. [{mark}] {}", row.text);
    if let Some(label) = &row.deadline_label {
        line.push_str(&format!("  @ {label}"));
    }
    match row.style {
        RowStyle::Urgent => line.push_str(" !!"),
        RowStyle::Warning => line.push_str(" !"),
        RowStyle::Plain | RowStyle::Done => {}
    }
    line.push_str(&format!("  #{}", row.id));
    line
}
