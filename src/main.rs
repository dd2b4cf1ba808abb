//! Command-line front end for the festival API client.
//!
//! Drives the same `ApiClient` the web front end uses: the session is kept in
//! a JSON file between runs, notifications go to stderr and redirects are
//! logged.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use festival_client::api::{AuthApi, SigninRequest, SignupRequest};
use festival_client::config::{load_config, load_default, override_base_url};
use festival_client::credentials::{CredentialStore, FileStore, MemoryStore};
use festival_client::navigation::TracingNavigator;
use festival_client::notify::ConsoleNotifier;
use festival_client::observability::logging;
use festival_client::{ApiClientBuilder, ApiRequest, ApiResponse, HttpTransport};

#[derive(Parser)]
#[command(name = "festival-client")]
#[command(about = "Client for the literature festival registration API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the API base URL.
    #[arg(short, long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in and store the session
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Me,
    /// Send a GET request
    Get { path: String },
    /// Send a POST request with a JSON body
    Post {
        path: String,
        #[arg(short, long, default_value = "{}")]
        data: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => load_default()?,
    };
    if let Some(url) = &cli.base_url {
        override_base_url(&mut config, url)?;
    }

    logging::init(&config.observability);
    tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");

    let store: Arc<dyn CredentialStore> = match &config.credentials.path {
        Some(path) => Arc::new(FileStore::open(path)?),
        None => Arc::new(MemoryStore::new()),
    };

    let transport = HttpTransport::new(&config.api)?;
    let client = ApiClientBuilder::new(config)
        .store(store)
        .notifier(Arc::new(ConsoleNotifier))
        .navigator(Arc::new(TracingNavigator))
        .build(transport);
    let auth = AuthApi::new(&client);

    match cli.command {
        Commands::Signup { name, email, password } => {
            let response = auth.signup(&SignupRequest { name, email, password }).await?;
            println!("{}", response.message.as_deref().unwrap_or("Signed up"));
        }
        Commands::Signin { email, password } => {
            let response = auth.signin(&SigninRequest { email, password }).await?;
            match response.user {
                Some(user) => println!("Signed in as {}", user.email),
                None => println!("Signed in"),
            }
        }
        Commands::Logout => {
            auth.logout()?;
            println!("Signed out");
        }
        Commands::Me => {
            let user = auth.me().await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Commands::Get { path } => {
            let response = client.execute(&ApiRequest::get(path)).await?;
            print_response(&response)?;
        }
        Commands::Post { path, data } => {
            let body: serde_json::Value = serde_json::from_str(&data)?;
            let response = client.execute(&ApiRequest::post(path).with_body(body)).await?;
            print_response(&response)?;
        }
    }

    Ok(())
}

fn print_response(response: &ApiResponse) -> Result<(), Box<dyn std::error::Error>> {
    match response.json::<serde_json::Value>() {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", response.text()),
    }
    Ok(())
}
