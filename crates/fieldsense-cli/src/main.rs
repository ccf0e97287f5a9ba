//! fieldsense CLI entry point.

mod args;
mod config;
mod server;

use std::collections::HashMap;
use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use fieldsense_core::protocol::{Command, Request};
use fieldsense_core::{Engine, FieldDescriptor, FormDescriptor, TextSource};
use tracing::{error, info};
use uuid::Uuid;

use crate::args::{Cli, ClassifyFieldArgs, Commands, Source};
use crate::config::FlagOverrides;

fn main() {
    // Logs go to stderr so stdout stays pure JSON.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::Level::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Examples = cli.command {
        println!("{}", crate::args::EXAMPLES_TEXT);
        return;
    }

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn build_engine(cli: &Cli) -> Result<Engine> {
    let env: HashMap<String, String> = std::env::vars().collect();
    let flags = FlagOverrides {
        field: cli.field_threshold,
        form: cli.form_threshold,
        otp: cli.otp_threshold,
    };
    let thresholds = config::resolve(cli.config.as_deref(), &env, flags)
        .context("Failed to load configuration")?;
    Engine::new(thresholds).context("Failed to build engine")
}

fn field_from_args(args: &ClassifyFieldArgs) -> FieldDescriptor {
    let mut field = FieldDescriptor::new(args.selector.clone()).with_required(args.required);
    if let Some(kind) = &args.declared_type {
        field = field.with_type(kind.clone());
    }
    if let Some(name) = &args.name {
        field = field.with_name(name.clone());
    }
    if let Some(id) = &args.id {
        field = field.with_id(id.clone());
    }
    if let Some(label) = &args.label {
        field = field.with_label(label.clone());
    }
    if let Some(placeholder) = &args.placeholder {
        field = field.with_placeholder(placeholder.clone());
    }
    if let Some(autocomplete) = &args.autocomplete {
        field = field.with_autocomplete(autocomplete.clone());
    }
    field
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    Ok(buf)
}

fn read_form(path: &std::path::Path) -> Result<FormDescriptor> {
    let content = if path.as_os_str() == "-" {
        read_stdin()?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read form descriptor: {:?}", path))?
    };
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid FormDescriptor JSON in {:?}", path))
}

/// Convert one-shot CLI args to a protocol Command.
///
/// Returns None for commands that aren't a single request.
fn cli_to_command(cli: &Cli) -> Result<Option<Command>> {
    let command = match &cli.command {
        Commands::ClassifyField(args) => Command::ClassifyField {
            field: field_from_args(args),
        },
        Commands::ClassifyForm(args) => Command::ClassifyForm {
            form: read_form(&args.input)?,
        },
        Commands::ExtractOtp(args) => Command::ExtractOtp {
            text: match &args.text {
                Some(text) => text.clone(),
                None => read_stdin()?,
            },
            source: args.source.map(|source| match source {
                Source::Email => TextSource::Email,
                Source::Sms => TextSource::Sms,
                Source::Manual => TextSource::Manual,
            }),
        },
        Commands::Config => Command::ShowConfig,
        Commands::Serve | Commands::Examples => return Ok(None),
    };
    Ok(Some(command))
}

/// Run the selected command and return the process exit code.
fn run(cli: Cli) -> Result<i32> {
    let engine = build_engine(&cli)?;

    let Some(command) = cli_to_command(&cli)? else {
        run_serve(engine)?;
        return Ok(0);
    };

    let request = Request {
        id: Uuid::new_v4().to_string(),
        command,
    };
    let response = server::handle_request(&engine, request);

    if response.success {
        if let Some(data) = response.data {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(0)
    } else {
        if let Some(err) = response.error {
            eprintln!("Error: {}", err);
        }
        Ok(1)
    }
}

/// Serve JSON lines on stdin/stdout until EOF or Ctrl+C.
fn run_serve(engine: Engine) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    let result = runtime.block_on(async {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();

        tokio::select! {
            result = server::serve(&engine, stdin, stdout) => result,
            _ = tokio::signal::ctrl_c() => {
                info!("Received SIGINT, shutting down");
                Ok(())
            }
        }
    });

    // The stdin reader sits on a blocking thread; don't wait for it.
    runtime.shutdown_background();
    result
}
