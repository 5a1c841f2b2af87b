//! CLI command definitions using clap.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taskplanner::domain::{Category, Priority};
use taskplanner::store::{SortKey, StatusFilter};

/// Taskplanner - manage a to-do list from the terminal
#[derive(Parser, Debug)]
#[command(name = "taskplanner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// work, personal, shopping, health, education, other
        #[arg(short = 'C', long)]
        category: Category,

        /// low, medium, high
        #[arg(short, long)]
        priority: Priority,

        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: NaiveDate,

        /// Free-form notes
        #[arg(short = 'D', long)]
        description: Option<String>,
    },

    /// Edit fields of an existing task
    Edit {
        /// Task ID to edit
        id: String,

        #[command(flatten)]
        fields: EditArgs,
    },

    /// Show a single task
    Show {
        /// Task ID to show
        id: String,
    },

    /// Toggle a task between completed and pending
    Done {
        /// Task ID to toggle
        id: String,
    },

    /// Delete a task
    Rm {
        /// Task ID to delete
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete all tasks
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Move tasks to the front, in the order given
    Mv {
        /// Task IDs; unlisted tasks keep their relative order after these
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// List tasks
    List {
        /// Filter by category ("all" for no filter)
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Filter by priority ("all" for no filter)
        #[arg(short, long)]
        priority: Option<String>,

        /// all, completed, pending
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,

        /// manual, date-asc, date-desc, priority-high, priority-low, title
        #[arg(long)]
        sort: Option<SortKey>,
    },

    /// Show total, completed, and pending counts
    Stats {
        /// Count up to the numbers
        #[arg(short, long)]
        animate: bool,
    },
}

/// Fields accepted by `edit`; omitted flags leave the field unchanged.
#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short = 'C', long)]
    pub category: Option<Category>,

    #[arg(short, long)]
    pub priority: Option<Priority>,

    /// New due date (YYYY-MM-DD)
    #[arg(short, long)]
    pub due: Option<NaiveDate>,

    /// New description; pass "" to clear it
    #[arg(short = 'D', long)]
    pub description: Option<String>,
}
