//! Resolve CLI - Track personal resolutions from the command line
//!
//! Every subcommand maps to one operation of the core service.

use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::aot::Generator;
use clap_complete::{generate, shells};
use resolve_core::db::{Database, SqliteStore};
use resolve_core::{
    FieldUpdate, Priority, Resolution, ResolutionId, ResolutionPayload, ResolutionService,
};
use thiserror::Error;

#[derive(Parser)]
#[command(name = "resolve")]
#[command(about = "Track personal resolutions from the command line")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Optional path to local database file
    #[arg(long, value_name = "PATH", global = true)]
    db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new resolution
    #[command(alias = "new")]
    Add {
        /// Resolution name
        name: String,
        /// Longer description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Deadline, stored verbatim (any format)
        #[arg(long, default_value = "")]
        deadline: String,
        /// Category for filtering
        #[arg(short, long, default_value = "general")]
        category: String,
        /// Initial progress
        #[arg(short, long, default_value = "0")]
        progress: u64,
        /// Priority level
        #[arg(long, value_enum, default_value_t = PriorityArg::Medium)]
        priority: PriorityArg,
        /// Mark as already completed
        #[arg(long)]
        completed: bool,
    },
    /// Show a resolution by ID
    Get {
        /// Resolution ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all resolutions
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update a single field of a resolution
    Set {
        /// Resolution ID
        id: String,
        /// Field to update (name, description, deadline, completed, category, progress, priority)
        field: String,
        /// New value
        value: String,
    },
    /// Replace a resolution's payload (tags are kept)
    Update {
        /// Resolution ID
        id: String,
        /// Resolution name
        name: String,
        /// Longer description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Deadline, stored verbatim (any format)
        #[arg(long, default_value = "")]
        deadline: String,
        /// Category for filtering
        #[arg(short, long, default_value = "general")]
        category: String,
        /// Progress
        #[arg(short, long, default_value = "0")]
        progress: u64,
        /// Priority level
        #[arg(long, value_enum, default_value_t = PriorityArg::Medium)]
        priority: PriorityArg,
        /// Mark as completed
        #[arg(long)]
        completed: bool,
    },
    /// Delete a resolution
    Delete {
        /// Resolution ID
        id: String,
    },
    /// Manage a resolution's tags
    Tags {
        #[command(subcommand)]
        action: TagsAction,
    },
    /// List resolutions in a category (exact match)
    Category {
        /// Category name
        category: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search resolutions by name, description, or exact tag
    Search {
        /// Search query (case-sensitive)
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum TagsAction {
    /// Replace the tag sequence with the given tags
    Set {
        /// Resolution ID
        id: String,
        /// Tags (order preserved)
        tags: Vec<String>,
    },
    /// Remove all tags
    Clear {
        /// Resolution ID
        id: String,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => Self::Low,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::High => Self::High,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Core(#[from] resolve_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid resolution ID: {0}")]
    InvalidId(String),
    #[error("Unknown field: {0} (expected name, description, deadline, completed, category, progress, or priority)")]
    UnknownField(String),
    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },
}

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("resolve=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db_path);

    match cli.command {
        Commands::Add {
            name,
            description,
            deadline,
            category,
            progress,
            priority,
            completed,
        } => run_add(
            ResolutionPayload {
                name,
                description,
                deadline,
                completed,
                category,
                progress,
                priority: priority.into(),
            },
            &db_path,
        ),
        Commands::Get { id, json } => run_get(&id, json, &db_path),
        Commands::List { json } => run_list(json, &db_path),
        Commands::Set { id, field, value } => run_set(&id, &field, &value, &db_path),
        Commands::Update {
            id,
            name,
            description,
            deadline,
            category,
            progress,
            priority,
            completed,
        } => run_update(
            &id,
            ResolutionPayload {
                name,
                description,
                deadline,
                completed,
                category,
                progress,
                priority: priority.into(),
            },
            &db_path,
        ),
        Commands::Delete { id } => run_delete(&id, &db_path),
        Commands::Tags { action } => match action {
            TagsAction::Set { id, tags } => run_tags_set(&id, tags, &db_path),
            TagsAction::Clear { id } => run_tags_set(&id, Vec::new(), &db_path),
        },
        Commands::Category { category, json } => run_category(&category, json, &db_path),
        Commands::Search { query, json } => run_search(&query, json, &db_path),
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref()),
    }
}

fn run_add(payload: ResolutionPayload, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let mut svc = ResolutionService::new(SqliteStore::new(db.connection()));

    let record = svc.create(payload)?;
    println!("{}", record.id);
    Ok(())
}

fn run_get(id: &str, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let svc = ResolutionService::new(SqliteStore::new(db.connection()));

    let record = svc.get(&parse_id(id)?)?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_detail(&record);
    }
    Ok(())
}

fn run_list(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let svc = ResolutionService::new(SqliteStore::new(db.connection()));
    print_records(&svc.list()?, as_json)
}

fn run_set(id: &str, field: &str, value: &str, db_path: &Path) -> Result<(), CliError> {
    let update = parse_field_update(field, value)?;

    let db = open_database(db_path)?;
    let mut svc = ResolutionService::new(SqliteStore::new(db.connection()));

    let record = svc.set_field(&parse_id(id)?, update)?;
    println!("{}", record.id);
    Ok(())
}

fn run_update(id: &str, payload: ResolutionPayload, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let mut svc = ResolutionService::new(SqliteStore::new(db.connection()));

    let record = svc.update(&parse_id(id)?, payload)?;
    println!("{}", record.id);
    Ok(())
}

fn run_delete(id: &str, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let mut svc = ResolutionService::new(SqliteStore::new(db.connection()));

    let record = svc.delete(&parse_id(id)?)?;
    println!("{}", record.id);
    Ok(())
}

fn run_tags_set(id: &str, tags: Vec<String>, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let mut svc = ResolutionService::new(SqliteStore::new(db.connection()));

    let record = svc.insert_tags(&parse_id(id)?, tags)?;
    println!("{}", record.id);
    Ok(())
}

fn run_category(category: &str, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let svc = ResolutionService::new(SqliteStore::new(db.connection()));
    print_records(&svc.by_category(category)?, as_json)
}

fn run_search(query: &str, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let svc = ResolutionService::new(SqliteStore::new(db.connection()));
    print_records(&svc.search(query)?, as_json)
}

/// Open the database, creating its parent directory if needed
fn open_database(db_path: &Path) -> Result<Database, CliError> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    tracing::debug!(path = %db_path.display(), "opening database");
    Ok(Database::open(db_path)?)
}

/// Resolve the database path: flag, then env, then platform data dir
fn resolve_db_path(override_path: Option<PathBuf>) -> PathBuf {
    if let Some(path) = override_path {
        return path;
    }

    if let Ok(path) = env::var("RESOLVE_DB_PATH") {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    dirs::data_dir()
        .map(|dir| dir.join("resolve").join("resolve.db"))
        .unwrap_or_else(|| PathBuf::from("resolve.db"))
}

fn parse_id(id: &str) -> Result<ResolutionId, CliError> {
    id.parse().map_err(|_| CliError::InvalidId(id.to_string()))
}

/// Parse a `set` command's field/value pair into a typed update
fn parse_field_update(field: &str, value: &str) -> Result<FieldUpdate, CliError> {
    let invalid = || CliError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    };

    match field {
        "name" => Ok(FieldUpdate::Name(value.to_string())),
        "description" => Ok(FieldUpdate::Description(value.to_string())),
        "deadline" => Ok(FieldUpdate::Deadline(value.to_string())),
        "category" => Ok(FieldUpdate::Category(value.to_string())),
        "completed" => value
            .parse()
            .map(FieldUpdate::Completed)
            .map_err(|_| invalid()),
        "progress" => value
            .parse()
            .map(FieldUpdate::Progress)
            .map_err(|_| invalid()),
        "priority" => value
            .parse()
            .map(FieldUpdate::Priority)
            .map_err(|_| invalid()),
        _ => Err(CliError::UnknownField(field.to_string())),
    }
}

fn print_records(records: &[Resolution], as_json: bool) -> Result<(), CliError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(records)?);
    } else {
        for record in records {
            println!("{}", format_record_line(record));
        }
    }
    Ok(())
}

/// One-line summary: checkbox, short id, name, category/priority/progress
fn format_record_line(record: &Resolution) -> String {
    let checkbox = if record.completed { "[x]" } else { "[ ]" };
    let id = record.id.to_string();
    let short_id = id.chars().take(8).collect::<String>();

    let mut line = format!(
        "{checkbox} {short_id}  {}  ({}, {}, {}%)",
        record.name, record.category, record.priority, record.progress
    );

    if !record.deadline.is_empty() {
        line.push_str(&format!("  due {}", record.deadline));
    }
    for tag in &record.tags {
        line.push_str(&format!("  #{tag}"));
    }

    line
}

fn print_detail(record: &Resolution) {
    println!("id:          {}", record.id);
    println!("name:        {}", record.name);
    println!("description: {}", record.description);
    println!("deadline:    {}", record.deadline);
    println!("completed:   {}", record.completed);
    println!("category:    {}", record.category);
    println!("progress:    {}", record.progress);
    println!("priority:    {}", record.priority);
    println!("tags:        {}", record.tags.join(", "));
    println!("created:     {}", format_timestamp(record.created_at));
    match record.updated_at {
        Some(ts) => println!("updated:     {}", format_timestamp(ts)),
        None => println!("updated:     never"),
    }
}

fn format_timestamp(nanos: i64) -> String {
    chrono::DateTime::from_timestamp_nanos(nanos)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

fn run_completions(shell: CompletionShell, output_path: Option<&Path>) -> Result<(), CliError> {
    let mut command = Cli::command();
    let mut buffer = Vec::new();

    match shell {
        CompletionShell::Bash => generate_for_shell(shells::Bash, &mut command, &mut buffer),
        CompletionShell::Zsh => generate_for_shell(shells::Zsh, &mut command, &mut buffer),
        CompletionShell::Fish => generate_for_shell(shells::Fish, &mut command, &mut buffer),
    }

    if let Some(path) = output_path {
        std::fs::write(path, &buffer)?;
        println!("{}", path.display());
    } else {
        io::stdout().write_all(&buffer)?;
    }

    Ok(())
}

fn generate_for_shell<G: Generator>(
    generator: G,
    command: &mut clap::Command,
    buffer: &mut Vec<u8>,
) {
    generate(generator, command, "resolve", buffer);
}
