//! taskdeck - local task list manager.
//!
//! # Responsibility
//! - Map command-line actions onto store operations.
//! - Redraw the filtered list after every mutation.
//!
//! The view owns no state of its own: every command parses its arguments,
//! calls into `taskdeck_core`, and renders the result.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use taskdeck_core::db::open_db;
use taskdeck_core::{
    default_log_level, init_logging, CategoryFilter, DueDate, Priority, SortKey,
    SqliteSnapshotRepository, StatusFilter, TaskDraft, TaskId, TodoService,
};

mod render;

#[derive(Parser, Debug)]
#[command(name = "taskdeck")]
#[command(version, about = "Local task list manager", long_about = None)]
struct Cli {
    /// Path to the task database file
    #[arg(long, default_value = "taskdeck.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rolling log files (logging stays off when unset)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a new task
    Add {
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Overwrite a task's fields (flags left unset reset to their defaults)
    Edit {
        /// Task id, or a unique prefix of one
        id: String,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Delete a task
    Rm {
        /// Task id, or a unique prefix of one
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Toggle a task's completion state
    Toggle {
        /// Task id, or a unique prefix of one
        id: String,
    },
    /// Show one task in full
    Show {
        /// Task id, or a unique prefix of one
        id: String,
    },
    /// List tasks with filters and sorting
    List {
        /// Restrict to one category
        #[arg(long, short = 'c')]
        category: Option<String>,

        /// Restrict by completion status
        #[arg(long, value_enum, default_value_t = StatusArg::All)]
        status: StatusArg,

        /// Ordering criterion
        #[arg(long, value_enum, default_value_t = SortArg::Created)]
        sort: SortArg,
    },
    /// List category labels currently in use
    Categories,
}

#[derive(Args, Debug)]
struct DraftArgs {
    /// Task title
    title: String,

    /// Detail text
    #[arg(long, short = 'd')]
    description: Option<String>,

    /// Category label
    #[arg(long, short = 'c')]
    category: Option<String>,

    /// Priority bucket
    #[arg(long, short = 'p', value_enum)]
    priority: Option<PriorityArg>,

    /// Due date in YYYY-MM-DD form
    #[arg(long)]
    due: Option<String>,
}

impl DraftArgs {
    fn into_draft(self) -> Result<TaskDraft> {
        let due_date = self
            .due
            .as_deref()
            .map(DueDate::parse)
            .transpose()
            .map_err(|err| anyhow!(err))?;

        Ok(TaskDraft {
            title: self.title,
            description: self.description,
            category: self.category,
            priority: self.priority.map(Into::into),
            due_date,
        })
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PriorityArg {
    High,
    Medium,
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::High => Self::High,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::Low => Self::Low,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum StatusArg {
    All,
    Active,
    Completed,
}

impl From<StatusArg> for StatusFilter {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::All => Self::All,
            StatusArg::Active => Self::Active,
            StatusArg::Completed => Self::Completed,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SortArg {
    Created,
    Priority,
    Duedate,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Created => Self::Created,
            SortArg::Priority => Self::Priority,
            SortArg::Duedate => Self::DueDate,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        init_logging(&level, &log_dir.to_string_lossy())
            .map_err(|message| anyhow!(message))
            .context("failed to initialize logging")?;
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open task database at {}", cli.db.display()))?;
    let repo = SqliteSnapshotRepository::try_new(&conn)?;
    let mut store = TodoService::load(repo)?;

    run(cli.command, &mut store)
}

fn run<R: taskdeck_core::SnapshotRepository>(
    command: Commands,
    store: &mut TodoService<R>,
) -> Result<()> {
    match command {
        Commands::Add { draft } => {
            let task = store.add(draft.into_draft()?)?;
            println!("added {}", render::short_id(task.id));
            render::print_list(&store.filtered_view());
        }
        Commands::Edit { id, draft } => {
            let id = resolve_id(store, &id)?;
            let Some(task) = store.update(id, draft.into_draft()?)? else {
                bail!("no task with id {id}");
            };
            println!("updated {}", render::short_id(task.id));
            render::print_list(&store.filtered_view());
        }
        Commands::Rm { id, yes } => {
            let id = resolve_id(store, &id)?;
            let title = store
                .get(id)
                .map(|task| task.title.clone())
                .ok_or_else(|| anyhow!("no task with id {id}"))?;
            if !yes && !confirm_delete(&title)? {
                println!("kept {}", render::short_id(id));
                return Ok(());
            }
            if !store.delete(id)? {
                bail!("no task with id {id}");
            }
            println!("deleted {}", render::short_id(id));
            render::print_list(&store.filtered_view());
        }
        Commands::Toggle { id } => {
            let id = resolve_id(store, &id)?;
            let Some(task) = store.toggle_complete(id)? else {
                bail!("no task with id {id}");
            };
            let state = if task.completed { "done" } else { "active" };
            println!("{} is now {state}", render::short_id(task.id));
            render::print_list(&store.filtered_view());
        }
        Commands::Show { id } => {
            let id = resolve_id(store, &id)?;
            let task = store.get(id).ok_or_else(|| anyhow!("no task with id {id}"))?;
            print!("{}", render::task_details(task));
        }
        Commands::List {
            category,
            status,
            sort,
        } => {
            let filter = match category {
                Some(name) => CategoryFilter::Category(name),
                None => CategoryFilter::All,
            };
            store.set_category_filter(filter);
            store.set_status_filter(status.into());
            store.set_sort(sort.into());
            render::print_list(&store.filtered_view());
        }
        Commands::Categories => {
            for category in store.list_categories() {
                println!("{category}");
            }
        }
    }

    Ok(())
}

/// Resolves a full task id or a unique id prefix against the store.
fn resolve_id<R: taskdeck_core::SnapshotRepository>(
    store: &TodoService<R>,
    input: &str,
) -> Result<TaskId> {
    if let Ok(id) = input.parse::<TaskId>() {
        return Ok(id);
    }

    let matches: Vec<TaskId> = store
        .tasks()
        .iter()
        .filter(|task| task.id.to_string().starts_with(input))
        .map(|task| task.id)
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("no task with id {input}"),
        _ => bail!("id prefix `{input}` is ambiguous ({} matches)", matches.len()),
    }
}

fn confirm_delete(title: &str) -> Result<bool> {
    print!("delete task `{title}`? [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
