use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::prelude::*;

use appointment_form::{
    schema, ConsoleNotifier, FormConfig, FormController, Notifier, RecordingNotifier,
    SimulatedSubmitter, SubmitResult, Submitter,
};
use shared_types::{
    service_options, AppointmentForm, ErrorResponse, FieldChange, FieldErrors, FieldValue,
    FormField,
};

#[derive(Parser, Debug)]
#[command(
    name = "appointment-form",
    version,
    about = "Validate and submit tattoo studio appointment requests"
)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    log_file_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a request against the schema without submitting it
    Validate {
        #[command(flatten)]
        input: FormInput,
    },
    /// Validate a request and run the simulated submission
    Submit {
        #[command(flatten)]
        input: FormInput,

        /// Make the simulated submission reject with this reason
        #[arg(long, value_name = "REASON")]
        fail: Option<String>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the service types the form accepts
    Services,
}

#[derive(Args, Debug)]
struct FormInput {
    /// JSON file with form values (camelCase keys); flags override it
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    /// consultation, small, medium, large, coverup or custom
    #[arg(long)]
    service_type: Option<String>,

    #[arg(long)]
    preferred_date: Option<String>,

    #[arg(long)]
    preferred_time: Option<String>,

    #[arg(long)]
    message: Option<String>,

    #[arg(long)]
    accept_terms: bool,
}

impl FormInput {
    /// Field changes in form order, as the page would emit them
    fn changes(&self) -> Result<Vec<FieldChange>> {
        let base = match &self.file {
            Some(path) => load_form(path)?,
            None => AppointmentForm::default(),
        };

        let overrides = [
            (FormField::Name, &self.name),
            (FormField::Email, &self.email),
            (FormField::Phone, &self.phone),
            (FormField::ServiceType, &self.service_type),
            (FormField::PreferredDate, &self.preferred_date),
            (FormField::PreferredTime, &self.preferred_time),
            (FormField::Message, &self.message),
        ];

        let mut changes = Vec::new();
        for field in FormField::ALL {
            let value = match overrides.iter().find(|(f, _)| *f == field) {
                Some((_, Some(text))) => FieldValue::Text(text.clone()),
                _ if field.is_flag() => FieldValue::Flag(base.accept_terms || self.accept_terms),
                _ => base.value(field),
            };
            changes.push(FieldChange { field, value });
        }

        Ok(changes)
    }

    fn to_form(&self) -> Result<AppointmentForm> {
        let mut form = AppointmentForm::default();
        for change in self.changes()? {
            form.set(change.field, change.value).map_err(|value| {
                anyhow::anyhow!("Unexpected value {:?} for {}", value, change.field)
            })?;
        }
        Ok(form)
    }
}

fn load_form(path: &Path) -> Result<AppointmentForm> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read form file at {:?}", path))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse form file at {:?}", path))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file_path.as_deref());

    let json_output = matches!(cli.command, Command::Submit { json: true, .. });

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(err) if json_output => {
            let response = ErrorResponse {
                error: format!("{err:#}"),
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
            std::process::exit(2);
        }
        Err(err) => Err(err),
    }
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Services => {
            for option in service_options() {
                println!("{:<14}{}", option.value.as_str(), option.label);
            }
            Ok(0)
        }
        Command::Validate { input } => {
            let form = input.to_form()?;
            match schema::validate(&form) {
                Ok(request) => {
                    println!("Request is valid ({})", request.service_type.label());
                    Ok(0)
                }
                Err(errors) => {
                    print_errors(&errors);
                    Ok(1)
                }
            }
        }
        Command::Submit { input, fail, json } => {
            let config = load_config(cli.config.as_deref())?;
            submit(config, input, fail, json).await
        }
    }
}

async fn submit(
    config: FormConfig,
    input: FormInput,
    fail: Option<String>,
    json: bool,
) -> Result<i32> {
    let submitter: Arc<dyn Submitter> = match fail {
        Some(reason) => Arc::new(SimulatedSubmitter::failing(config.submit_delay(), reason)),
        None => Arc::new(SimulatedSubmitter::new(config.submit_delay())),
    };
    let recorder = Arc::new(RecordingNotifier::new());
    let notifier: Arc<dyn Notifier> = if json {
        recorder.clone()
    } else {
        Arc::new(ConsoleNotifier)
    };

    let controller = FormController::with_config(config, submitter, notifier);
    for change in input.changes()? {
        controller.apply(change)?;
    }

    let busy_watcher = (!json).then(|| {
        let mut phases = controller.subscribe();
        let busy_label = controller.config().busy_label.clone();
        tokio::spawn(async move {
            while phases.changed().await.is_ok() {
                if phases.borrow_and_update().is_busy() {
                    println!("{busy_label}");
                }
            }
        })
    });

    let result = controller.submit().await;

    if let Some(watcher) = busy_watcher {
        watcher.abort();
    }

    if json {
        let response = controller.response(recorder.last());
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else if let SubmitResult::Invalid(errors) = &result {
        print_errors(errors);
    }

    Ok(match result {
        SubmitResult::Submitted => 0,
        SubmitResult::Invalid(_) | SubmitResult::Failed(_) | SubmitResult::Busy => 1,
    })
}

fn print_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        println!("{:<14}{}", field.as_str(), message);
    }
}

fn load_config(path: Option<&Path>) -> Result<FormConfig> {
    match path {
        Some(path) => FormConfig::load_from(path)
            .with_context(|| format!("Failed to load form config at {:?}", path)),
        None => {
            let (config, config_path) =
                FormConfig::load().context("Failed to load form config")?;
            tracing::debug!("Loaded form config from {:?}", config_path);
            Ok(config)
        }
    }
}

fn init_tracing(log_file_path: Option<&str>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = Path::new(log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("appointment-form.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
