//! Command-line front end for the task engine.
//!
//! # Responsibility
//! - Resolve data directory, store backend and log level from flags/env.
//! - Drive `TaskCollection` operations and print stable one-line results.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use todo_core::db::{db_path_in, open_db};
use todo_core::model::task::now_epoch_ms;
use todo_core::transfer::{export_file_name_today, write_export};
use todo_core::{
    default_log_level, init_logging, Category, CategoryFilter, JsonFileTaskStore, NewTask,
    Priority, SortMode, SqliteTaskStore, Task, TaskCollection, TaskStore,
};

#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Local task tracker")]
struct Cli {
    /// Directory holding the task store and logs.
    #[arg(long, env = "TODO_DATA_DIR", default_value = ".todo")]
    data_dir: PathBuf,
    #[arg(long, env = "TODO_STORE", value_enum, default_value_t = StoreKind::Sqlite)]
    store: StoreKind,
    /// trace|debug|info|warn|error; defaults by build mode.
    #[arg(long, env = "TODO_LOG_LEVEL")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    Sqlite,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a task.
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,
        /// Deadline as YYYY-MM-DD (UTC midnight) or epoch milliseconds.
        #[arg(long, value_parser = parse_due_date)]
        due: Option<i64>,
    },
    /// Print tasks, filtered by category and sorted.
    List {
        #[arg(long, default_value = "all", value_parser = parse_filter)]
        category: CategoryFilter,
        #[arg(long, default_value = "none", value_parser = parse_sort)]
        sort: SortMode,
    },
    /// Flip completion of a task.
    Toggle { id: String },
    /// Delete a task.
    Remove { id: String },
    /// Merge tasks from a JSON export file.
    Import { path: PathBuf },
    /// Write all tasks to a JSON file (default `todos-<date>.json`).
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    fs::create_dir_all(&cli.data_dir)
        .with_context(|| format!("failed to create data dir `{}`", cli.data_dir.display()))?;
    let data_dir = cli
        .data_dir
        .canonicalize()
        .with_context(|| format!("failed to resolve data dir `{}`", cli.data_dir.display()))?;

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, data_dir.join("logs")) {
        eprintln!("logging disabled: {err}");
    }

    match cli.store {
        StoreKind::Sqlite => {
            let conn = open_db(db_path_in(&data_dir))?;
            let store = SqliteTaskStore::try_new(&conn)?;
            run(store, cli.command)
        }
        StoreKind::Json => run(JsonFileTaskStore::in_dir(&data_dir), cli.command),
    }
}

fn run<S: TaskStore>(store: S, command: Command) -> Result<()> {
    let mut tasks = TaskCollection::load(store);

    match command {
        Command::Add {
            title,
            description,
            category,
            priority,
            due,
        } => {
            let request = NewTask {
                title,
                description,
                category: category.unwrap_or_default(),
                priority: priority.unwrap_or_default(),
                due_date: due,
            };
            match tasks.add(request) {
                Some(id) => println!("added id={id}"),
                None => bail!("task title must not be blank"),
            }
        }
        Command::List { category, sort } => {
            let now = now_epoch_ms();
            for task in tasks.view(category, sort) {
                println!("{}", render_task(&task, now));
            }
        }
        Command::Toggle { id } => {
            if !tasks.toggle(&id) {
                warn!("event=cli_toggle module=cli status=not_found id={id}");
                bail!("no task with id `{id}`");
            }
            let completed = tasks.get(&id).is_some_and(|task| task.completed);
            println!("toggled id={id} completed={completed}");
        }
        Command::Remove { id } => {
            if !tasks.remove(&id) {
                bail!("no task with id `{id}`");
            }
            println!("removed id={id}");
        }
        Command::Import { path } => {
            let raw = fs::read(&path)
                .with_context(|| format!("failed to read `{}`", path.display()))?;
            let summary = tasks
                .import_merge(&raw)
                .with_context(|| format!("import of `{}` failed", path.display()))?;
            println!(
                "imported={} replaced={} appended={} total={}",
                summary.imported, summary.replaced, summary.appended, summary.total
            );
        }
        Command::Export { out } => {
            let path = out.unwrap_or_else(|| PathBuf::from(export_file_name_today()));
            export_to(&path, tasks.tasks())?;
            println!("exported={} path={}", tasks.len(), path.display());
        }
    }

    Ok(())
}

fn export_to(path: &Path, tasks: &[Task]) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("failed to create `{}`", path.display()))?;
    write_export(tasks, file).with_context(|| format!("failed to write `{}`", path.display()))
}

fn render_task(task: &Task, now_ms: i64) -> String {
    let mut line = format!(
        "[{}] {} {} ({}/{})",
        if task.completed { "x" } else { " " },
        task.id,
        task.title,
        task.category,
        task.priority
    );
    if let Some(due) = task.due_date {
        let date = DateTime::<Utc>::from_timestamp_millis(due)
            .map(|value| value.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| due.to_string());
        line.push_str(&format!(" due={date}"));
        if task.is_overdue(now_ms) {
            line.push_str(" overdue");
        }
    }
    line
}

fn parse_category(value: &str) -> Result<Category, String> {
    Category::parse(value).ok_or_else(|| format!("unknown category `{value}`"))
}

fn parse_priority(value: &str) -> Result<Priority, String> {
    Priority::parse(value).ok_or_else(|| format!("unknown priority `{value}`"))
}

fn parse_filter(value: &str) -> Result<CategoryFilter, String> {
    CategoryFilter::parse(value).ok_or_else(|| format!("unknown category filter `{value}`"))
}

fn parse_sort(value: &str) -> Result<SortMode, String> {
    SortMode::parse(value).ok_or_else(|| format!("unknown sort mode `{value}`"))
}

fn parse_due_date(value: &str) -> Result<i64, String> {
    if let Ok(epoch_ms) = value.parse::<i64>() {
        return Ok(epoch_ms);
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("invalid due date `{value}`: {err}"))?;
    date.and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc().timestamp_millis())
        .ok_or_else(|| format!("invalid due date `{value}`"))
}

#[cfg(test)]
mod tests {
    use super::{parse_due_date, render_task};
    use todo_core::{NewTask, Task};

    #[test]
    fn due_date_accepts_iso_date_and_epoch_ms() {
        assert_eq!(parse_due_date("1970-01-02").unwrap(), 86_400_000);
        assert_eq!(parse_due_date("1234").unwrap(), 1234);
        assert!(parse_due_date("tomorrow").is_err());
    }

    #[test]
    fn render_marks_overdue_tasks() {
        let mut request = NewTask::titled("file taxes");
        request.due_date = Some(86_400_000);
        let task = Task::create(request, "t-1", 0).unwrap();

        let line = render_task(&task, 2 * 86_400_000);
        assert_eq!(line, "[ ] t-1 file taxes (other/medium) due=1970-01-02 overdue");
    }
}
