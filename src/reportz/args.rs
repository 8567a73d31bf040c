use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date when
/// built from a checkout.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if GIT_HASH.is_empty() {
            format!("v{VERSION}")
        } else {
            format!("v{VERSION} ({GIT_HASH} {GIT_COMMIT_DATE})")
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "reportz", version = get_version())]
#[command(
    about = "Edit paragraph blocks, report templates and display settings",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store directory (default: $REPORTZ_DIR, ./.reportz, or the user data dir)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the store with a starter paragraph and default report
    Init,

    /// Show session state and entity counts
    #[command(alias = "st")]
    Status,

    /// Validate the draft and publish it
    Save,

    /// Drop the draft and reload published state
    Discard,

    /// Run the save-time validation without publishing
    Check,

    /// Assemble a report's text from its paragraphs
    Render {
        /// Report id
        id: String,
    },

    /// Manage paragraphs
    #[command(subcommand, alias = "p")]
    Par(ParCommands),

    /// Manage reports and their paragraph references
    #[command(subcommand, alias = "r")]
    Rep(RepCommands),

    /// Manage parameter visibility and display order
    #[command(subcommand, alias = "u")]
    Ui(UiCommands),

    /// Get or set configuration
    Config {
        /// Configuration key (file_ext, renumber_step)
        key: Option<String>,

        /// Value to set (if omitted, prints the current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ParCommands {
    /// Add a paragraph
    #[command(alias = "a")]
    Add {
        /// Paragraph id (letters, digits, underscore)
        id: String,

        /// Display label (defaults to the id)
        #[arg(short, long)]
        label: Option<String>,

        /// One-line description
        #[arg(short = 'd', long)]
        description: Option<String>,

        /// Paragraph text (opens $EDITOR when omitted)
        #[arg(short, long)]
        text: Option<String>,

        /// Never open the editor
        #[arg(long)]
        no_editor: bool,
    },

    /// Edit a paragraph; only the given fields change
    #[command(alias = "e")]
    Edit {
        /// Paragraph id
        id: String,

        /// New id (report references follow the rename)
        #[arg(long)]
        rename: Option<String>,

        #[arg(short, long)]
        label: Option<String>,

        #[arg(short = 'd', long)]
        description: Option<String>,

        /// New text (skips the editor)
        #[arg(short, long)]
        text: Option<String>,

        /// Open $EDITOR on the current text
        #[arg(long)]
        edit: bool,
    },

    /// Delete a paragraph and its report references
    #[command(alias = "rm")]
    Delete {
        /// Paragraph id
        id: String,
    },

    /// List paragraphs
    #[command(alias = "ls")]
    List {
        /// Filter by substring over id, label, description and text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a paragraph in full
    Show {
        /// Paragraph id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum RepCommands {
    /// Add a report
    #[command(alias = "a")]
    Add {
        /// Report id (letters, digits, underscore)
        id: String,

        /// Display title (defaults to the id)
        #[arg(short, long)]
        title: Option<String>,

        /// Paragraph reference, may repeat
        #[arg(long = "ref")]
        refs: Vec<String>,
    },

    /// Edit a report's title or id
    #[command(alias = "e")]
    Edit {
        /// Report id
        id: String,

        /// New id
        #[arg(long)]
        rename: Option<String>,

        #[arg(short, long)]
        title: Option<String>,
    },

    /// Delete a report (paragraphs stay)
    #[command(alias = "rm")]
    Delete {
        /// Report id
        id: String,
    },

    /// List reports
    #[command(alias = "ls")]
    List {
        /// Filter by substring over id and title
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a report with its references resolved
    Show {
        /// Report id
        id: String,
    },

    /// Append a paragraph reference to a report
    Attach {
        /// Report id
        report: String,
        /// Paragraph id
        paragraph: String,
    },

    /// Remove all occurrences of a paragraph reference
    Detach {
        /// Report id
        report: String,
        /// Paragraph id
        paragraph: String,
    },

    /// Move a paragraph reference to the end of the report
    Tail {
        /// Report id
        report: String,
        /// Paragraph id
        paragraph: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum UiCommands {
    /// List parameters in two groups: visible and hidden
    #[command(alias = "ls")]
    List,

    /// Show a parameter
    On {
        /// Parameter name
        name: String,
    },

    /// Hide a parameter
    Off {
        /// Parameter name
        name: String,
    },

    /// Set a parameter's sort order
    Order {
        /// Parameter name
        name: String,
        /// Sort position (smaller sorts first)
        order: f64,
    },

    /// Show every parameter
    ShowAll,

    /// Hide every parameter
    HideAll,

    /// Reassign orders as clean multiples of a step
    Renumber {
        /// Step between consecutive orders (default from config)
        #[arg(long)]
        step: Option<i64>,
    },

    /// Print the settings as paste-ready text
    Export,
}
