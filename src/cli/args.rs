use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone, PartialEq, Eq)]
#[command(name = "toolchat")]
#[command(
    about = "Keyword-routed tool assistant with a Gemini chat fallback",
    long_about = "Keyword-routed tool assistant with a Gemini chat fallback\n\nConfig file loading:\n  - --config <path> (explicit file, overrides default path discovery)\n  - Default probe path when --config is not provided:\n    1. $XDG_CONFIG_HOME/toolchat/config.toml\n    2. ~/.config/toolchat/config.toml"
)]
pub struct CliArgs {
    /// Load config from this file path instead of the default discovery path.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log raw HTTP traffic to stderr, with secrets redacted.
    #[arg(long)]
    pub verbose: bool,
}
