use clap::{Args, Parser, Subcommand, ValueEnum};
use snip::model::ScopeFilter;
use tracing_subscriber::EnvFilter;

pub const ENV_LOG: &str = "ZSH_SNIP_LOG";

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.4.2" for releases, "0.4.2@abc1234 2026-01-15" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("SNIP_GIT_HASH");
    const GIT_DATE: &str = env!("SNIP_GIT_DATE");
    const IS_RELEASE: &str = env!("SNIP_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "zsh-snip", bin_name = "zsh-snip", version = get_version())]
#[command(about = "Save, search and re-run command snippets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Debug logging on stderr (overridden by ZSH_SNIP_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ScopeArgs {
    /// Only use the per-user store
    #[arg(long, global = true, conflicts_with = "local")]
    pub user: bool,

    /// Only use the project-local store
    #[arg(long, global = true)]
    pub local: bool,
}

impl ScopeArgs {
    pub fn filter(&self) -> ScopeFilter {
        ScopeFilter::from_flags(self.user, self.local)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List snippets
    #[command(alias = "ls")]
    List {
        /// Glob matched against the whole name (`git*`, `docker-?`)
        pattern: Option<String>,

        /// Print names only
        #[arg(long, conflicts_with = "full_path")]
        names_only: bool,

        /// Print absolute file paths
        #[arg(long)]
        full_path: bool,

        /// Disable colors
        #[arg(long)]
        no_color: bool,
    },

    /// Print the file path of a snippet
    Path { name: String },

    /// Print the body of a snippet
    Expand { name: String },

    /// Run a snippet, passing ARGS as positional parameters
    Exec {
        name: String,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Copy a snippet body to the clipboard
    Yank { name: String },

    /// Abbreviations declared by snippets
    Abbr {
        #[command(subcommand)]
        action: AbbrCommands,
    },

    /// Save a command line as a new snippet
    Save {
        /// Do not open the editor after saving
        #[arg(long)]
        no_edit: bool,

        /// Name to save under (otherwise from `# name: ...` or the command)
        #[arg(long)]
        name: Option<String>,

        /// The command line
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        buffer: Vec<String>,
    },

    /// Open a snippet in the editor
    Edit { name: String },

    /// Delete a snippet
    #[command(alias = "rm")]
    Delete {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,

        name: String,
    },

    /// Copy a snippet under the next free name
    Dup { name: String },

    /// Interactive fuzzy search
    Search {
        /// Initial query
        #[arg(short, long, default_value = "")]
        query: String,

        /// Write the result here instead of stdout (used by the zsh widget)
        #[arg(long)]
        output: Option<std::path::PathBuf>,
    },

    /// Print shell integration
    Init {
        #[arg(value_enum, default_value_t = InitShell::Zsh)]
        shell: InitShell,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum AbbrCommands {
    /// Print `<key>\t<name>` for each abbreviation
    List,
    /// Print registration commands for zsh-abbr
    Load,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum InitShell {
    Zsh,
}

pub enum Parsed {
    Run(Cli),
    Exit(i32),
}

/// Parses arguments. Help and version print and exit 0; usage errors print
/// and exit 1.
pub fn parse_cli() -> Parsed {
    match Cli::try_parse() {
        Ok(cli) => Parsed::Run(cli),
        Err(err) => {
            let _ = err.print();
            Parsed::Exit(if err.use_stderr() { 1 } else { 0 })
        }
    }
}

/// Logging to stderr. `ZSH_SNIP_LOG` takes EnvFilter directives; otherwise
/// warnings only, or debug with `--verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (tests calling run twice) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
