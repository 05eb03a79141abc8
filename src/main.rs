use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};

use opencode_manager::config::{serialize_document, ConfigStore};
use opencode_manager::document::{apply_api_key_convention, provider_env_var};
use opencode_manager::env::EnvWriter;
use opencode_manager::logging::{init_tracing_for_tui, init_tracing_stderr};
use opencode_manager::naming::env_var_name;
use opencode_manager::ui::i18n::Lang;
use opencode_manager::ui::{self, RuntimeOptions};

#[derive(Parser)]
#[command(name = "opencode-manager")]
#[command(about = "Edit opencode provider configuration")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/opencode/opencode.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Quiet period before an edit is auto-saved, in milliseconds
    #[arg(long, global = true, default_value_t = 500)]
    debounce_ms: u64,

    /// Initial UI language
    #[arg(long, global = true, value_enum, default_value_t = Lang::Zh)]
    lang: Lang,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the config document, creating the default file if absent
    Show,

    /// Print the API-key variable name for a provider display name
    EnvName {
        display_name: String,
    },

    /// Store an API key for a provider and point the config at it
    SetKey {
        /// Provider key in the config document
        provider: String,
        value: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let store = cli
        .config
        .clone()
        .map(ConfigStore::new)
        .unwrap_or_else(ConfigStore::at_default_path);

    let Some(command) = cli.command else {
        init_tracing_for_tui();
        tracing::info!(path = %store.path().display(), "starting editor");
        ui::run(RuntimeOptions {
            config_path: store.path().to_path_buf(),
            debounce: Duration::from_millis(cli.debounce_ms),
            lang: cli.lang,
        })?;
        return Ok(());
    };

    init_tracing_stderr();
    match command {
        Command::Show => {
            let doc = store.load()?;
            println!("{}", serialize_document(&doc)?);
        }
        Command::EnvName { display_name } => {
            println!("{}", env_var_name(&display_name));
        }
        Command::SetKey { provider, value } => {
            let doc = store.load()?;
            let name = provider_env_var(&doc, &provider)
                .ok_or_else(|| anyhow!("Provider '{}' not found", provider))?;
            let writer = EnvWriter::from_env()?;
            let outcome = writer
                .set_variable(&name, &value)
                .with_context(|| format!("failed to persist {}", name))?;
            store.save(&apply_api_key_convention(&doc))?;

            match outcome.profile_path {
                Some(path) => println!("{} -> {}", name, path.display()),
                None => println!("{}", name),
            }
        }
    }
    Ok(())
}
