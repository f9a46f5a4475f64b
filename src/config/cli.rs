use clap::{ArgGroup, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "reconset")]
#[command(about = "Manage per-project domain sets for reconnaissance")]
#[command(after_help = "Examples:
  reconset add -p acme -f domains.txt
  reconset add -p acme -f subdomains.txt.gz --no-validate
  reconset export -p acme -f acme.json --format json
  reconset print -p acme --filter '\\.dev\\.' --pretty
  reconset count -p acme
  reconset remove -p acme -d old.acme.com
  reconset delete -p acme --confirm
  reconset projects")]
pub struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add domains from a file (`-` for stdin, `.gz` is decompressed)
    Add {
        #[arg(short, long)]
        project: String,

        #[arg(short, long)]
        file: String,

        /// Skip validation and normalization; store lines verbatim
        #[arg(long)]
        no_validate: bool,
    },

    /// Export a project's domains to a file
    Export {
        #[arg(short, long)]
        project: String,

        #[arg(short, long)]
        file: String,

        /// text or json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print a project's domains, sorted
    Print {
        #[arg(short, long)]
        project: String,

        /// Only print domains matching this regular expression
        #[arg(long)]
        filter: Option<String>,

        /// Pipe the listing through the configured pretty printer
        #[arg(long)]
        pretty: bool,
    },

    /// Count domains in a project
    Count {
        #[arg(short, long)]
        project: String,
    },

    /// Remove domains from a project
    #[command(group(ArgGroup::new("target").required(true).args(["file", "domain"])))]
    Remove {
        #[arg(short, long)]
        project: String,

        /// File containing domains to remove
        #[arg(short, long)]
        file: Option<String>,

        /// Single domain to remove
        #[arg(short, long)]
        domain: Option<String>,
    },

    /// Delete a whole project
    Delete {
        #[arg(short, long)]
        project: String,

        /// Skip confirmation prompt
        #[arg(long)]
        confirm: bool,
    },

    /// List every project
    Projects,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    File(String),
    Domain(String),
}

impl RemoveTarget {
    pub fn from_args(file: Option<String>, domain: Option<String>) -> Option<Self> {
        match (file, domain) {
            (Some(file), None) => Some(RemoveTarget::File(file)),
            (None, Some(domain)) => Some(RemoveTarget::Domain(domain)),
            _ => None,
        }
    }
}
