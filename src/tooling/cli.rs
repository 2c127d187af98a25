//! CLI Tooling
//!
//! Interactive shell over one navigation session. Commands are read line by
//! line from stdin; a failed command prints an error and leaves the session
//! where it was.

use crate::config::{ConfigLoader, DocnavConfig};
use crate::edit::RowIntent;
use crate::error::{ApiError, StoreError};
use crate::navigation::{DeleteOutcome, NavigationSession};
use crate::store::{DocumentStore, HttpDocumentStore, MemoryDocumentStore};
use crate::tree::Node;
use crate::types::{NodeId, NodeKind};
use clap::Parser;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

/// Docnav - browse and edit a remote document tree
#[derive(Parser, Debug)]
#[command(name = "docnav")]
#[command(about = "Browse and edit a remote hierarchical document store")]
pub struct Cli {
    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Use an in-process store instead of the remote API
    #[arg(long)]
    pub memory: bool,

    /// Store API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// User token sent with every request
    #[arg(long)]
    pub user_token: Option<String>,

    /// Id of the store's root container
    #[arg(long)]
    pub root_id: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Load layered configuration and fold command-line overrides into it.
    pub fn resolve_config(&self) -> Result<DocnavConfig, ApiError> {
        let config = match &self.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        self.apply_overrides(config)
    }

    /// Command-line flags win over every configuration layer. `--log-file`
    /// is left out; it goes to `init_logging` directly.
    pub fn apply_overrides(&self, mut config: DocnavConfig) -> Result<DocnavConfig, ApiError> {
        if let Some(base_url) = &self.base_url {
            config.store.base_url = base_url.clone();
        }
        if let Some(user_token) = &self.user_token {
            config.store.user_token = user_token.clone();
        }
        if let Some(root_id) = &self.root_id {
            config.store.root_id = Some(root_id.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
        if self.no_color {
            config.logging.color = false;
        }

        config.store.validate().map_err(ApiError::ConfigError)?;
        Ok(config)
    }

    pub fn build_store(&self, config: &DocnavConfig) -> Result<Arc<dyn DocumentStore>, ApiError> {
        if self.memory {
            return Ok(Arc::new(MemoryDocumentStore::new()));
        }
        Ok(Arc::new(HttpDocumentStore::new(&config.store)?))
    }
}

/// One line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Cd(String),
    Back,
    Root,
    Pwd,
    Mkdir(String),
    Touch(String),
    Rename { target: String, new_name: String },
    Rm(String),
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
ls                     list the current directory
cd <name|id>           enter a directory (cd .. goes back, cd / goes to root)
back                   go up one level
root                   go to root
pwd                    print the breadcrumb
mkdir <name>           create a directory here
touch <name>           create a file here
rename <name|id> <new> rename a directory or file
rm <name|id>           delete (directories are deleted with their contents)
help                   show this help
quit                   leave the shell
Names containing spaces can be quoted: rename \"old name\" \"new name\"";

/// Split a line into words, honouring double quotes.
fn split_words(line: &str) -> Result<Vec<String>, ApiError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if quoted {
        return Err(ApiError::InvalidCommand("Unterminated quote".to_string()));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

impl ShellCommand {
    /// Parse one input line. Blank lines yield None.
    pub fn parse(line: &str) -> Result<Option<ShellCommand>, ApiError> {
        let words = split_words(line)?;
        let Some((verb, args)) = words.split_first() else {
            return Ok(None);
        };

        let one_arg = |usage: &str| -> Result<String, ApiError> {
            match args {
                [arg] => Ok(arg.clone()),
                _ => Err(ApiError::InvalidCommand(format!("usage: {}", usage))),
            }
        };

        let command = match verb.as_str() {
            "ls" => ShellCommand::List,
            "cd" => match one_arg("cd <name|id>")?.as_str() {
                ".." => ShellCommand::Back,
                "/" => ShellCommand::Root,
                target => ShellCommand::Cd(target.to_string()),
            },
            "back" | ".." => ShellCommand::Back,
            "root" => ShellCommand::Root,
            "pwd" => ShellCommand::Pwd,
            "mkdir" => ShellCommand::Mkdir(one_arg("mkdir <name>")?),
            "touch" => ShellCommand::Touch(one_arg("touch <name>")?),
            "rename" | "mv" => match args {
                [target, new_name] => ShellCommand::Rename {
                    target: target.clone(),
                    new_name: new_name.clone(),
                },
                _ => {
                    return Err(ApiError::InvalidCommand(
                        "usage: rename <name|id> <new-name>".to_string(),
                    ))
                }
            },
            "rm" => ShellCommand::Rm(one_arg("rm <name|id>")?),
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => {
                return Err(ApiError::InvalidCommand(format!(
                    "Unknown command: {} (try 'help')",
                    other
                )))
            }
        };
        Ok(Some(command))
    }
}

/// Shell state: the session plus presentation settings.
pub struct Shell {
    session: NavigationSession,
    color: bool,
}

impl Shell {
    pub fn new(session: NavigationSession, color: bool) -> Self {
        Self { session, color }
    }

    pub fn session(&self) -> &NavigationSession {
        &self.session
    }

    pub fn prompt(&self) -> String {
        let crumb = self.session.breadcrumb();
        if self.color {
            format!("{} > ", crumb.cyan().bold())
        } else {
            format!("{} > ", crumb)
        }
    }

    /// Run one command and return the text to print.
    pub async fn execute(&mut self, command: &ShellCommand) -> Result<String, ApiError> {
        match command {
            ShellCommand::List => Ok(self.render_listing()),
            ShellCommand::Pwd => Ok(self.session.breadcrumb()),
            ShellCommand::Help => Ok(HELP_TEXT.to_string()),
            ShellCommand::Quit => Ok(String::new()),
            ShellCommand::Root => {
                self.session.enter_root().await?;
                Ok(self.render_listing())
            }
            ShellCommand::Back => {
                if !self.session.go_back().await? {
                    return Ok("Already at root".to_string());
                }
                Ok(self.render_listing())
            }
            ShellCommand::Cd(target) => {
                let node = self.resolve(target)?;
                match self.session.open(&node.id).await? {
                    RowIntent::Open => Ok(self.render_listing()),
                    RowIntent::NotADirectory => Err(ApiError::InvalidCommand(format!(
                        "{} is a file, not a directory",
                        node.name
                    ))),
                    RowIntent::EditInProgress => Err(ApiError::InvalidCommand(format!(
                        "{} is being renamed",
                        node.name
                    ))),
                }
            }
            ShellCommand::Mkdir(name) => self.create(NodeKind::Directory, name).await,
            ShellCommand::Touch(name) => self.create(NodeKind::File, name).await,
            ShellCommand::Rename { target, new_name } => {
                let node = self.resolve(target)?;
                self.session.start_edit(&node.id)?;
                self.session.edits_mut().set_pending(&node.id, new_name);
                self.session.confirm_edit(&node.id).await?;
                Ok(self.render_listing())
            }
            ShellCommand::Rm(target) => {
                let node = self.resolve(target)?;
                let outcome = self
                    .session
                    .synchronizer()
                    .delete(node.kind, &node.id)
                    .await?;
                let note = match outcome {
                    DeleteOutcome::Deleted => format!("Deleted {} {}", node.kind, node.name),
                    DeleteOutcome::AlreadyAbsent => format!("{} was already gone", node.name),
                };
                Ok(format!("{}\n{}", note, self.render_listing()))
            }
        }
    }

    async fn create(&mut self, kind: NodeKind, name: &str) -> Result<String, ApiError> {
        let node = self.session.synchronizer().create(kind, name).await?;
        Ok(format!(
            "Created {} {} ({})\n{}",
            kind,
            node.name,
            node.id,
            self.render_listing()
        ))
    }

    /// Find a listed node by exact name (directories first), then by id.
    fn resolve(&self, target: &str) -> Result<Node, ApiError> {
        let listing = self.session.listing();
        listing
            .find_by_name(target)
            .or_else(|| listing.find_by_id(&NodeId::new(target)))
            .cloned()
            .ok_or_else(|| {
                StoreError::NotFound(format!("{} is not in {}", target, self.session.breadcrumb()))
                    .into()
            })
    }

    pub fn render_listing(&self) -> String {
        let listing = self.session.listing();
        if listing.is_empty() {
            return "(empty)".to_string();
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec!["Kind", "Name", "Id", "Created"]);
        for node in listing.iter() {
            let name = if self.color && node.kind.is_directory() {
                node.name.blue().bold().to_string()
            } else {
                node.name.clone()
            };
            let created = node
                .created_at
                .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            table.add_row(vec![
                Cell::new(node.kind),
                Cell::new(name),
                Cell::new(&node.id),
                Cell::new(created),
            ]);
        }
        table.to_string()
    }
}

/// Drive the shell from stdin until EOF or `quit`.
pub async fn run_shell(cli: &Cli, config: &DocnavConfig) -> Result<(), ApiError> {
    let store = cli.build_store(config)?;
    let session = NavigationSession::at_root(store).await?;
    let mut shell = Shell::new(session, config.logging.color);
    info!(memory = cli.memory, base_url = %config.store.base_url, "Shell started");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(format!("{}\n", shell.render_listing()).as_bytes())
        .await?;
    loop {
        stdout.write_all(shell.prompt().as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                stdout.write_all(format!("error: {}\n", e).as_bytes()).await?;
                continue;
            }
        };
        if command == ShellCommand::Quit {
            break;
        }

        let text = match shell.execute(&command).await {
            Ok(text) => text,
            Err(e) => format!("error: {}", e),
        };
        stdout.write_all(format!("{}\n", text).as_bytes()).await?;
    }
    stdout.flush().await?;
    Ok(())
}
