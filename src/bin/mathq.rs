//! Command-line interface for mathq.
//!
//! Answers or checks single questions, lists the recorded failures, runs an
//! interactive session, or serves the same operations over HTTP. With
//! `--store`, failure counts are loaded from a JSON snapshot at start and
//! written back at exit. With `--server`, every command is sent to a running
//! `mathq serve` instead.

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use mathq::{
    Config, ErrorSnapshot, ExpressionClient, ExpressionErrorResponse, ExpressionService,
    InMemoryErrorRepository, Pipeline, ServiceError,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::net::TcpListener;

const PROMPT: &str = ">";
const EXIT_COMMAND: &str = r"\e";

type Service = ExpressionService<Pipeline, Arc<InMemoryErrorRepository>>;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON error store, loaded at start and saved at exit
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Send commands to the mathq server at this URL
    #[arg(long, value_name = "URL", conflicts_with_all = ["config", "store"])]
    server: Option<String>,

    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answers a question
    Evaluate {
        #[arg(required = true)]
        question: Vec<String>,
    },
    /// Checks that a question is well formed
    Validate {
        #[arg(required = true)]
        question: Vec<String>,
    },
    /// Lists recorded failures
    Errors,
    /// Reads commands from standard input until `\e`
    Repl,
    /// Serves evaluate, validate, and errors over HTTP until interrupted
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: String,
    },
}

/// Where commands are answered.
enum Backend {
    Local(Arc<Service>),
    Remote(ExpressionClient),
}

impl Backend {
    async fn evaluate(&self, question: &str) -> Result<i64> {
        match self {
            Backend::Local(service) => Ok(service.evaluate(question)?),
            Backend::Remote(client) => Ok(client.evaluate(question).await?),
        }
    }

    /// `false` for a question the service rejects; `Err` only when the
    /// question could not be judged at all.
    async fn validate(&self, question: &str) -> Result<bool> {
        match self {
            Backend::Local(service) => match service.validate(question) {
                Ok(()) => Ok(true),
                Err(ServiceError::Expression(_)) => Ok(false),
                Err(err) => Err(err.into()),
            },
            Backend::Remote(client) => Ok(client.validate(question).await?.valid),
        }
    }

    async fn expression_errors(&self) -> Result<Vec<ExpressionErrorResponse>> {
        match self {
            Backend::Local(service) => Ok(service
                .expression_errors()?
                .iter()
                .map(ExpressionErrorResponse::from)
                .collect()),
            Backend::Remote(client) => Ok(client.expression_errors().await?),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    if let Some(url) = args.server {
        if matches!(args.command, Commands::Serve { .. }) {
            anyhow::bail!("serve runs its own service and can't be combined with --server");
        }
        let backend = Backend::Remote(ExpressionClient::new(url));
        let succeeded = run(&backend, args.command).await?;
        if !succeeded {
            std::process::exit(1);
        }
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let repository = Arc::new(match &args.store {
        Some(path) if path.exists() => load_store(path)?,
        _ => InMemoryErrorRepository::new(),
    });
    let service = Arc::new(ExpressionService::with_config(
        Pipeline::new(&config).context("can't build the interpreter")?,
        Arc::clone(&repository),
        &config,
    ));

    let succeeded = match args.command {
        Commands::Serve { addr } => {
            let listener = TcpListener::bind(&addr)
                .await
                .with_context(|| format!("can't listen on {addr}"))?;
            mathq::serve(listener, service, shutdown_signal()).await?;
            true
        }
        command => run(&Backend::Local(service), command).await?,
    };

    if let Some(path) = &args.store {
        save_store(&repository, path)?;
    }
    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(target: "mathq::cli", error = %err, "Can't listen for ctrl-c");
    }
}

/// Run a one-shot command or the REPL. Returns whether the command succeeded.
async fn run(backend: &Backend, command: Commands) -> Result<bool> {
    let mut out = io::stdout().lock();
    match command {
        Commands::Evaluate { question } => {
            let line = format!("evaluate {}", question.join(" "));
            report(execute(backend, &line).await, &mut out)
        }
        Commands::Validate { question } => {
            let line = format!("validate {}", question.join(" "));
            report(execute(backend, &line).await, &mut out)
        }
        Commands::Errors => report(execute(backend, "errors").await, &mut out),
        Commands::Repl => {
            repl(backend, BufReader::new(tokio::io::stdin()), &mut out).await?;
            Ok(true)
        }
        Commands::Serve { .. } => anyhow::bail!("serve is not a session command"),
    }
}

fn load_store(path: &Path) -> Result<InMemoryErrorRepository> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("can't read error store {}", path.display()))?;
    let snapshot = ErrorSnapshot::from_json(&json)
        .with_context(|| format!("can't load error store {}", path.display()))?;
    tracing::debug!(
        target: "mathq::cli",
        records = snapshot.records.len(),
        "Loaded error store"
    );
    Ok(InMemoryErrorRepository::from_snapshot(snapshot))
}

fn save_store(repository: &InMemoryErrorRepository, path: &Path) -> Result<()> {
    let json = repository.snapshot()?.to_json()?;
    std::fs::write(path, json)
        .with_context(|| format!("can't write error store {}", path.display()))
}

/// Run one command line, returning its output.
async fn execute(backend: &Backend, command: &str) -> Result<String> {
    if let Some(question) = command.strip_prefix("evaluate ") {
        let answer = backend.evaluate(question).await?;
        Ok(format!("{answer}\n"))
    } else if let Some(question) = command.strip_prefix("validate ") {
        let valid = backend.validate(question).await?;
        Ok(format!("{valid}\n"))
    } else if command == "errors" {
        let errors = backend.expression_errors().await?;
        Ok(errors.iter().map(format_expression_error).collect())
    } else {
        anyhow::bail!("unknown command")
    }
}

fn format_expression_error(e: &ExpressionErrorResponse) -> String {
    format!(
        "\t\"{}\"; on {}; {} times; {}\n",
        e.expression, e.endpoint, e.frequency, e.kind
    )
}

fn report(result: Result<String>, out: &mut impl Write) -> Result<bool> {
    match result {
        Ok(output) => {
            out.write_all(output.as_bytes())?;
            Ok(true)
        }
        Err(err) => {
            writeln!(out, "error: {err}")?;
            Ok(false)
        }
    }
}

async fn repl(
    backend: &Backend,
    input: impl AsyncBufRead + Unpin,
    out: &mut impl Write,
) -> Result<()> {
    write!(out, "{PROMPT} ")?;
    out.flush()?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = line.trim();
        if command == EXIT_COMMAND {
            break;
        }
        if !command.is_empty() {
            report(execute(backend, command).await, out)?;
        }
        write!(out, "{PROMPT} ")?;
        out.flush()?;
    }
    Ok(())
}
