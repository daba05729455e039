pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli {
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "craftgraph")]
    #[command(about = "Craft graphs for Minecraft items")]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Extract recipes and tags from a game jar into data.json
        Export {
            #[arg(long)]
            jar: String,

            #[arg(long, default_value = "./static")]
            output: String,
        },
        /// Print the craft graph of an item straight from a game jar
        Tree {
            #[arg(long)]
            jar: String,

            item: String,
        },
        /// Print the raw data.json layout context
        Layout {
            #[arg(long)]
            base_url: Option<String>,
        },
        /// Print the item listing layout context
        Items {
            #[arg(long)]
            base_url: Option<String>,
        },
        /// Print the page context of one item
        Page {
            #[arg(long)]
            base_url: Option<String>,

            item: String,
        },
    }

    impl Command {
        pub fn base_url(&self) -> Option<&str> {
            match self {
                Command::Layout { base_url }
                | Command::Items { base_url }
                | Command::Page { base_url, .. } => base_url.as_deref(),
                Command::Export { .. } | Command::Tree { .. } => None,
            }
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(base_url) = self.command.base_url() {
                validation::validate_url("--base-url", base_url)?;
            }
            match &self.command {
                Command::Export { jar, output } => {
                    validation::validate_path("--jar", jar)?;
                    validation::validate_path("--output", output)
                }
                Command::Tree { jar, item } => {
                    validation::validate_path("--jar", jar)?;
                    validation::validate_item_name("item", item)
                }
                Command::Page { item, .. } => validation::validate_item_name("item", item),
                Command::Layout { .. } | Command::Items { .. } => Ok(()),
            }
        }
    }

}
