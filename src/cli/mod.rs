//! Command-line interface for hyd
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use clap::{Parser, Subcommand};

use crate::actor::Identity;
use crate::config::Config;
use crate::error::Result;
use crate::storage::Storage;
use crate::store::TaskStore;

mod actor;
mod calendar;
mod init;
mod task;

/// hyd - Hydrant Maintenance Planning
///
/// A CLI for the planning and ticketing core of a municipal
/// fire-hydrant management system: task store, filters, role-based
/// visibility, kanban/timeline views, and a month calendar.
#[derive(Parser, Debug)]
#[command(name = "hyd")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Root directory holding .hyd/ and .hyd.toml (defaults to current directory)
    #[arg(long, global = true, env = "HYD_ROOT")]
    pub root: Option<std::path::PathBuf>,

    /// Actor identity for visibility and assignment matching
    #[arg(long, global = true, env = "HYD_ACTOR")]
    pub actor: Option<String>,

    /// Role override: firefighter, technician, municipal, supervisor
    #[arg(long, global = true, env = "HYD_ROLE")]
    pub role: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit mutation events as JSONL to a file, or "-" for stdout
    #[arg(long, global = true)]
    pub events: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the data directory with the seed tasks and roster
    Init,

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Month calendar with per-day task buckets
    Calendar {
        /// Anchor month (YYYY-MM); defaults to the selected day's month, else the current month
        #[arg(long)]
        month: Option<String>,

        /// Selected day (YYYY-MM-DD) for the day-detail list; may lie outside the anchor month
        #[arg(long)]
        day: Option<String>,

        /// Board to read: planning or maintenance
        #[arg(long)]
        board: Option<String>,

        /// Move the anchor by whole months after resolving it (e.g. -1, 2)
        #[arg(long, allow_hyphen_values = true)]
        shift: Option<i32>,

        /// Search term applied before bucketing
        #[arg(long)]
        search: Option<String>,

        /// Status filter applied before bucketing
        #[arg(long)]
        status: Option<String>,

        /// Priority filter applied before bucketing
        #[arg(long)]
        priority: Option<String>,
    },

    /// Set or show actor identity
    #[command(subcommand)]
    Actor(ActorCommands),
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks as a flat list, kanban columns, or a timeline
    List {
        /// Search term matched against hydrant, location, kind, and title
        #[arg(long)]
        search: Option<String>,

        /// Status filter (pending, assigned, inProgress, completed, cancelled)
        #[arg(long)]
        status: Option<String>,

        /// Priority filter (low, medium, high, urgent)
        #[arg(long)]
        priority: Option<String>,

        /// Board to read: planning or maintenance
        #[arg(long)]
        board: Option<String>,

        /// Arrangement: list, kanban, or timeline
        #[arg(long, default_value = "list")]
        view: String,
    },

    /// Create a task
    New {
        /// Hydrant the intervention targets
        #[arg(long)]
        hydrant: Option<String>,

        /// Intervention kind: inspection, repair, replacement, maintenance, cleaning, emergency
        #[arg(long)]
        kind: Option<String>,

        /// Short ticket label
        #[arg(long)]
        title: Option<String>,

        /// What needs to be done
        #[arg(long)]
        description: Option<String>,

        /// Responsible actor's display name
        #[arg(long)]
        assigned_to: Option<String>,

        /// Free-text address
        #[arg(long)]
        location: Option<String>,

        /// Priority (default: medium)
        #[arg(long)]
        priority: Option<String>,

        /// Initial status (default: pending)
        #[arg(long)]
        status: Option<String>,

        /// Scheduled date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,

        /// Duration label, e.g. "1h30"
        #[arg(long)]
        duration: Option<String>,

        /// Board the task belongs to
        #[arg(long)]
        board: Option<String>,
    },

    /// Show one task
    Show {
        /// Task id
        id: String,
    },

    /// Edit fields of an existing task
    Edit {
        /// Task id
        id: String,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        priority: Option<String>,

        /// Progress percent (0-100); in-progress tasks only
        #[arg(long)]
        progress: Option<u8>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        assigned_to: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        location: Option<String>,

        /// Scheduled date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        duration: Option<String>,
    },

    /// Mark a task completed (progress forced to 100)
    Complete {
        /// Task id
        id: String,
    },

    /// Dashboard counters over the visible tasks
    Stats {
        /// Board to read: planning or maintenance
        #[arg(long)]
        board: Option<String>,
    },

    /// Restore the seed task list
    Reset {
        /// Limit the reset to one board
        #[arg(long)]
        board: Option<String>,
    },
}

/// Actor subcommands
#[derive(Subcommand, Debug)]
pub enum ActorCommands {
    /// Show the resolved identity (name and role)
    Show,

    /// Persist the actor name in .hyd/actor
    Set {
        /// Display name, as it appears in task assignments
        name: String,
    },

    /// List the personnel roster
    Roster,
}

/// Resolved per-invocation context shared by the command handlers.
pub(crate) struct Context {
    pub storage: Storage,
    pub config: Config,
    pub store: TaskStore,
    pub identity: Identity,
}

impl Context {
    fn resolve(
        root: Option<std::path::PathBuf>,
        cli_actor: Option<&str>,
        cli_role: Option<&str>,
    ) -> Result<Context> {
        let root = match root {
            Some(root) => root,
            None => std::env::current_dir()?,
        };
        let storage = Storage::new(root);
        let config = Config::load(&storage)?;
        let identity = crate::actor::resolve_identity(&storage, &config, cli_actor, cli_role)?;
        let store = TaskStore::new(storage.clone());
        Ok(Context {
            storage,
            config,
            store,
            identity,
        })
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let output = crate::output::OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };
        let context = Context::resolve(self.root, self.actor.as_deref(), self.role.as_deref())?;
        let events = self.events.as_deref();

        match self.command {
            Commands::Init => init::run(&context, output),

            Commands::Task(command) => match command {
                TaskCommands::List {
                    search,
                    status,
                    priority,
                    board,
                    view,
                } => task::run_list(
                    &context,
                    output,
                    task::ListOptions {
                        search,
                        status,
                        priority,
                        board,
                        view,
                    },
                ),
                TaskCommands::New {
                    hydrant,
                    kind,
                    title,
                    description,
                    assigned_to,
                    location,
                    priority,
                    status,
                    date,
                    duration,
                    board,
                } => task::run_new(
                    &context,
                    output,
                    events,
                    task::NewOptions {
                        hydrant,
                        kind,
                        title,
                        description,
                        assigned_to,
                        location,
                        priority,
                        status,
                        date,
                        duration,
                        board,
                    },
                ),
                TaskCommands::Show { id } => task::run_show(&context, output, &id),
                TaskCommands::Edit {
                    id,
                    status,
                    priority,
                    progress,
                    description,
                    assigned_to,
                    title,
                    location,
                    date,
                    duration,
                } => task::run_edit(
                    &context,
                    output,
                    events,
                    task::EditOptions {
                        id,
                        status,
                        priority,
                        progress,
                        description,
                        assigned_to,
                        title,
                        location,
                        date,
                        duration,
                    },
                ),
                TaskCommands::Complete { id } => task::run_complete(&context, output, events, &id),
                TaskCommands::Stats { board } => task::run_stats(&context, output, board.as_deref()),
                TaskCommands::Reset { board } => {
                    task::run_reset(&context, output, events, board.as_deref())
                }
            },

            Commands::Calendar {
                month,
                day,
                board,
                shift,
                search,
                status,
                priority,
            } => calendar::run(
                &context,
                output,
                calendar::CalendarOptions {
                    month,
                    day,
                    board,
                    shift,
                    search,
                    status,
                    priority,
                },
            ),

            Commands::Actor(command) => match command {
                ActorCommands::Show => actor::run_show(&context, output),
                ActorCommands::Set { name } => actor::run_set(&context, output, &name),
                ActorCommands::Roster => actor::run_roster(&context, output),
            },
        }
    }
}
