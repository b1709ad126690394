use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use house_price_client::{
    Error,
    app::App,
    auth::{Credentials, SignupRequest},
    config::{self, Config},
    guard::AuthState,
    prediction::WorkflowResult,
};
use tracing::{error, info};

const FALLBACK_MESSAGE: &str = "Something went wrong.";

/// House price estimates for Bengaluru properties
#[derive(Parser, Debug)]
#[command(name = "house-price")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with a username and password
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = "HOUSE_PRICE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in
    Signup {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "HOUSE_PRICE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign in with a Google access token
    GoogleLogin {
        #[arg(long, env = "GOOGLE_ACCESS_TOKEN", hide_env_values = true)]
        access_token: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show whether a session is stored
    Status,

    /// List known locations
    Locations,

    /// Estimate the price of a property
    Predict {
        /// Area in square feet
        #[arg(long)]
        sqft: f64,

        /// Number of bedrooms
        #[arg(long, allow_hyphen_values = true)]
        bhk: i64,

        /// Number of bathrooms
        #[arg(long, allow_hyphen_values = true)]
        bath: i64,

        /// Location name; defaults to the first catalog entry
        #[arg(long)]
        location: Option<String>,
    },
}

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Determine log level: flag, then environment, then config
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| config.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_new(&log_level)?)
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!("Starting house-price client with log level: {}", log_level);

    // Run the command on its own task so a panic lands here instead of
    // tearing down the process mid-output.
    let outcome = tokio::spawn(run(cli.command, config)).await;

    let message = match outcome {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(e)) => {
            error!("Command failed: {:#}", e);
            match e.downcast_ref::<Error>() {
                Some(err) => err.user_message(),
                None => e.to_string(),
            }
        }
        Err(e) => {
            error!("Command aborted: {}", e);
            FALLBACK_MESSAGE.to_string()
        }
    };

    eprintln!("{}", message);
    std::process::exit(1);
}

async fn run(command: Command, config: Config) -> Result<()> {
    let app = App::from_config(&config).await?;

    match command {
        Command::Login { username, password } => {
            let session = app.auth().login(Credentials::new(username, password)).await?;
            print_signed_in(session.user.as_ref().map(|u| u.username.as_str()));
        }
        Command::Signup {
            username,
            email,
            password,
        } => {
            let session = app
                .auth()
                .signup(SignupRequest::new(username, email, password))
                .await?;
            print_signed_in(session.user.as_ref().map(|u| u.username.as_str()));
        }
        Command::GoogleLogin { access_token } => {
            let session = app.auth().third_party_login(&access_token).await?;
            print_signed_in(session.user.as_ref().map(|u| u.username.as_str()));
        }
        Command::Logout => {
            app.auth().logout().await;
            println!("Signed out");
        }
        Command::Status => match app.guard().state() {
            AuthState::Authenticated => {
                let session = app.session().get();
                print_signed_in(session.user.as_ref().map(|u| u.username.as_str()));
            }
            AuthState::Unauthenticated => println!("Not signed in"),
        },
        Command::Locations => {
            for location in app.locations().await? {
                println!("{}", location);
            }
        }
        Command::Predict {
            sqft,
            bhk,
            bath,
            location,
        } => {
            let workflow = app.prediction_workflow().await?;
            workflow.set_total_sqft(sqft);
            workflow.set_bhk(bhk);
            workflow.set_bath(bath);
            if let Some(location) = location {
                workflow.select_location(location);
            }

            match workflow.submit().await? {
                WorkflowResult::Success(_) => {
                    println!("Estimated market value: {}", workflow.result());
                }
                WorkflowResult::Failure(message) => bail!(message),
                other => bail!("Prediction did not complete: {:?}", other),
            }
        }
    }

    Ok(())
}

fn print_signed_in(username: Option<&str>) {
    match username {
        Some(username) => println!("Signed in as {}", username),
        None => println!("Signed in"),
    }
}
