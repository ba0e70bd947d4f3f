use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use evaluator::config::Config;
use evaluator::controller::SubmissionController;
use evaluator::eval_client::HttpEvaluationClient;
use evaluator::models::ResumeFile;
use evaluator::render::render_outcome;

/// Upload a resume and (optionally) a role and job description.
/// Prints an ATS score with tailored suggestions.
#[derive(Debug, Parser)]
#[command(name = "evaluator", version)]
struct Cli {
    /// Resume file (PDF / DOCX / TXT)
    resume: Option<PathBuf>,

    /// Candidate role, e.g. "Frontend Intern"
    #[arg(long, default_value = "")]
    role: String,

    /// Job description text
    #[arg(long, default_value = "", conflicts_with = "job_description_file")]
    job_description: String,

    /// Read the job description from a file
    #[arg(long)]
    job_description_file: Option<PathBuf>,

    /// Print the raw evaluation as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting evaluator v{}", env!("CARGO_PKG_VERSION"));

    let client = HttpEvaluationClient::new(config.endpoint.clone(), config.timeout)?;
    info!(endpoint = client.endpoint(), timeout = ?config.timeout, "Evaluation client initialized");

    let controller = SubmissionController::new(Arc::new(client));

    controller.set_role(cli.role);
    let job_description = match &cli.job_description_file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read job description '{}'", path.display()))?,
        None => cli.job_description,
    };
    controller.set_job_description(job_description);
    let file = match &cli.resume {
        Some(path) => Some(ResumeFile::from_path(path).await?),
        None => None,
    };
    controller.set_file(file);

    let mut transitions = controller.subscribe();
    let progress = tokio::spawn(async move {
        while let Some(state) = transitions.recv().await {
            if state.is_loading() {
                eprintln!("{}", render_outcome(&state));
            }
        }
    });

    let submitted = controller.submit_form().await;
    let outcome = controller.outcome();
    drop(controller);
    let _ = progress.await;

    match submitted {
        Ok(result) if cli.json => println!("{}", serde_json::to_string_pretty(&result)?),
        Ok(_) => println!("{}", render_outcome(&outcome)),
        Err(e) => bail!(
            "{}",
            outcome
                .error_message()
                .map(str::to_string)
                .unwrap_or_else(|| e.user_message())
        ),
    }

    Ok(())
}
