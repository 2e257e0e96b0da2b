use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigKey};
use crate::io::profile_store::{FileProfileStore, ProfileStore, StoreError};
use crate::io::system::{SystemClipboard, SystemOpener};
use crate::model::config::AppConfig;
use crate::model::platform::Platform;
use crate::model::profile::ProfileField;
use crate::ops::links::LinkBuilder;
use crate::ops::share::{self, MissingChoice, Notifier, ShareError, ShareOptions};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::from_cli(&cli);

    match cli.command {
        // Profile
        Commands::Profile => cmd_profile(&ctx),
        Commands::Get(args) => cmd_get(&ctx, args),
        Commands::Set(args) => cmd_set(&ctx, args),
        Commands::Message(args) => cmd_message(&ctx, args),

        // Links
        Commands::Links(args) => cmd_links(&ctx, args),
        Commands::Link(args) => cmd_link(&ctx, args),
        Commands::Copy(args) => cmd_copy(&ctx, args),
        Commands::Open(args) => cmd_open(&ctx, args),

        // Config
        Commands::Config(args) => cmd_config(&ctx, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolved global options shared by every handler.
struct Context {
    json: bool,
    interactive: bool,
    profile_path: PathBuf,
    config_path: PathBuf,
}

impl Context {
    fn from_cli(cli: &Cli) -> Self {
        Context {
            json: cli.json,
            interactive: !cli.no_input && std::io::stdin().is_terminal(),
            profile_path: cli
                .store
                .clone()
                .unwrap_or_else(config_io::default_profile_path),
            config_path: cli
                .config
                .clone()
                .unwrap_or_else(config_io::default_config_path),
        }
    }

    fn open_store(&self) -> Result<FileProfileStore, StoreError> {
        FileProfileStore::open(&self.profile_path)
    }

    fn config(&self) -> Result<AppConfig, config_io::ConfigError> {
        config_io::read_config(&self.config_path)
    }

    fn share_options<'a>(&self, config: &AppConfig, message: Option<&'a str>) -> ShareOptions<'a> {
        ShareOptions {
            message,
            email_format: config.email_format,
        }
    }
}

/// Prints notices and, on a terminal, asks for missing profile values.
struct CliNotifier {
    json: bool,
    interactive: bool,
}

impl Notifier for CliNotifier {
    fn notify(&mut self, message: &str) {
        // stdout is reserved for the JSON document
        if self.json {
            eprintln!("{}", message);
        } else {
            println!("{}", message);
        }
    }

    fn missing_parameter(&mut self, platform: Platform) -> MissingChoice {
        if !self.interactive {
            return MissingChoice::Cancel;
        }
        let field = platform.required_field();
        eprintln!(
            "Missing Parameter: you need to set your {} to use {} links.",
            field.label(),
            platform.label()
        );
        eprint!("Enter it now (leave empty to cancel): ");
        let _ = std::io::stderr().flush();

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => MissingChoice::Cancel,
            Ok(_) => {
                let value = line.trim_end_matches(['\r', '\n']);
                if value.trim().is_empty() {
                    MissingChoice::Cancel
                } else {
                    MissingChoice::Set(value.to_string())
                }
            }
        }
    }
}

/// Attach the "how to fix it" hint to a missing-parameter error.
fn share_error(err: ShareError) -> Box<dyn std::error::Error> {
    match err {
        ShareError::MissingParameter { platform, .. } => {
            format!("{}\n{}", err, missing_hint(platform)).into()
        }
        other => Box::new(other),
    }
}

// ---------------------------------------------------------------------------
// Profile commands
// ---------------------------------------------------------------------------

fn cmd_profile(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let store = ctx.open_store()?;
    let record = store.snapshot();
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        for line in format_profile(&record) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_get(ctx: &Context, args: GetArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = ctx.open_store()?;
    let value = store.get(args.field);
    if ctx.json {
        let out = FieldJson {
            field: args.field,
            value: &value,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", value);
    }
    Ok(())
}

fn cmd_set(ctx: &Context, args: SetArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = ctx.open_store()?;
    store.set(args.field, &args.value)?;
    if ctx.json {
        let out = FieldJson {
            field: args.field,
            value: &args.value,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if args.value.is_empty() {
        println!("{} cleared", args.field.label());
    } else {
        println!("{} saved", args.field.label());
    }
    Ok(())
}

fn cmd_message(ctx: &Context, args: MessageArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.text {
        Some(text) => cmd_set(
            ctx,
            SetArgs {
                field: ProfileField::DraftMessage,
                value: text,
            },
        ),
        None => cmd_get(
            ctx,
            GetArgs {
                field: ProfileField::DraftMessage,
            },
        ),
    }
}

// ---------------------------------------------------------------------------
// Link commands
// ---------------------------------------------------------------------------

fn cmd_links(ctx: &Context, args: LinksArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = ctx.config()?;
    let record = ctx.open_store()?.snapshot();
    let mut builder = LinkBuilder::new(&record).with_email_format(config.email_format);
    if let Some(message) = args.message.as_deref() {
        builder = builder.with_message(message);
    }

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&links_to_json(&builder))?);
    } else {
        for line in format_links(&builder) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_link(ctx: &Context, args: PlatformArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = ctx.config()?;
    let record = ctx.open_store()?.snapshot();
    let mut builder = LinkBuilder::new(&record).with_email_format(config.email_format);
    if let Some(message) = args.message.as_deref() {
        builder = builder.with_message(message);
    }

    if !builder.is_usable(args.platform) {
        tracing::warn!(
            platform = %args.platform,
            field = args.platform.required_field().key(),
            "{} link is not usable yet; {}",
            args.platform.label(),
            missing_hint(args.platform)
        );
    }
    if ctx.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&link_to_json(&builder, args.platform))?
        );
    } else {
        println!("{}", builder.link(args.platform));
    }
    Ok(())
}

fn cmd_copy(ctx: &Context, args: PlatformArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = ctx.config()?;
    let mut store = ctx.open_store()?;
    let mut clipboard = SystemClipboard::from_config(&config);
    let mut notifier = CliNotifier {
        json: ctx.json,
        interactive: ctx.interactive,
    };
    let url = share::copy_link(
        &mut store,
        &mut clipboard,
        &mut notifier,
        args.platform,
        ctx.share_options(&config, args.message.as_deref()),
    )
    .map_err(share_error)?;

    if ctx.json {
        let out = ShareJson {
            platform: args.platform,
            url,
            action: "copied",
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    }
    Ok(())
}

fn cmd_open(ctx: &Context, args: PlatformArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = ctx.config()?;
    let mut store = ctx.open_store()?;
    let mut opener = SystemOpener::from_config(&config);
    let mut notifier = CliNotifier {
        json: ctx.json,
        interactive: ctx.interactive,
    };
    let url = share::open_link(
        &mut store,
        &mut opener,
        &mut notifier,
        args.platform,
        ctx.share_options(&config, args.message.as_deref()),
    )
    .map_err(share_error)?;

    if ctx.json {
        let out = ShareJson {
            platform: args.platform,
            url,
            action: "opened",
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Config commands
// ---------------------------------------------------------------------------

fn cmd_config(ctx: &Context, args: ConfigCmd) -> Result<(), Box<dyn std::error::Error>> {
    match args.action {
        ConfigAction::Show => {
            let config = ctx.config()?;
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string(&config)?);
            }
        }
        ConfigAction::Set(set) => {
            let key: ConfigKey = set.key.parse()?;
            let mut doc = config_io::read_config_document(&ctx.config_path)?;
            config_io::set_config_value(&mut doc, key, &set.value)?;
            config_io::write_config(&ctx.config_path, &doc)?;
            if set.value.trim().is_empty() {
                println!("{} reset to default", key);
            } else {
                println!("{} updated", key);
            }
        }
        ConfigAction::Path => {
            if ctx.json {
                let out = serde_json::json!({
                    "config": ctx.config_path,
                    "profile": ctx.profile_path,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("config:  {}", ctx.config_path.display());
                println!("profile: {}", ctx.profile_path.display());
            }
        }
    }
    Ok(())
}
