use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::platform::Platform;
use crate::model::profile::ProfileField;

#[derive(Parser)]
#[command(name = "socio", about = concat!("socio v", env!("CARGO_PKG_VERSION"), " - direct-message links for your customers"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different profile file
    #[arg(long = "store", global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Use a different config file
    #[arg(long = "config", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Never prompt for missing profile values
    #[arg(long, global = true)]
    pub no_input: bool,

    /// Log more (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every profile field
    Profile,
    /// Print one profile field
    Get(GetArgs),
    /// Set one profile field (stored exactly as given)
    Set(SetArgs),
    /// Set the starter message, or print it when no text is given
    Message(MessageArgs),
    /// Show the links for every platform
    Links(LinksArgs),
    /// Print the link for one platform
    Link(PlatformArgs),
    /// Copy a platform's link to the clipboard
    Copy(PlatformArgs),
    /// Open a platform's link with the system handler
    Open(PlatformArgs),
    /// View or change configuration
    Config(ConfigCmd),
}

// ---------------------------------------------------------------------------
// Profile args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct GetArgs {
    /// Field name (e.g. whatsapp, twitter_id, instagramUsername, email, cc, body)
    pub field: ProfileField,
}

#[derive(Args)]
pub struct SetArgs {
    /// Field name (e.g. whatsapp, twitter_id, instagramUsername, email, cc, body)
    pub field: ProfileField,
    /// New value; pass "" to clear
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

#[derive(Args)]
pub struct MessageArgs {
    /// Message customers start the conversation with
    #[arg(allow_hyphen_values = true)]
    pub text: Option<String>,
}

// ---------------------------------------------------------------------------
// Link args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct LinksArgs {
    /// Use this message instead of the stored one
    #[arg(short, long, allow_hyphen_values = true)]
    pub message: Option<String>,
}

#[derive(Args)]
pub struct PlatformArgs {
    /// whatsapp, twitter, instagram, facebook or email
    pub platform: Platform,
    /// Use this message instead of the stored one
    #[arg(short, long, allow_hyphen_values = true)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Config args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Set a config key (email_format, clipboard_command, open_command); "" resets it
    Set(ConfigSetArgs),
    /// Print the config and profile file locations
    Path,
}

#[derive(Args)]
pub struct ConfigSetArgs {
    pub key: String,
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}
