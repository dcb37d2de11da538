//! Sign-in demo binary
//!
//! Signs in against the configured endpoint and stores the session file.
//!
//! ```text
//! STOREFRONT_SIGNIN_URL=https://shop.example.com/api/signin signin user@example.com hunter2
//! signin --sign-out
//! ```

use anyhow::Context;
use clap::Parser;
use storefront_signin::providers::{
    FileSessionStore, HistoryNavigator, HttpAuthenticator, TracingNotifier,
};
use storefront_signin::{
    Field, Mounted, Route, SignInConfig, SignInEnvironment, SignInForm, SubmitOutcome,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "signin")]
#[command(about = "Sign in to the storefront and store the session")]
struct Cli {
    /// Account email address
    #[arg(required_unless_present = "sign_out")]
    email: Option<String>,

    /// Account password
    #[arg(required_unless_present = "sign_out")]
    password: Option<String>,

    /// Remove the stored session instead of signing in
    #[arg(long, conflicts_with_all = ["email", "password"])]
    sign_out: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_signin=debug,storefront_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SignInConfig::from_env().context("loading sign-in configuration")?;
    let sessions = FileSessionStore::new(&config.session_file);

    let (Some(email), Some(password)) = (cli.email, cli.password) else {
        sessions.clear().await.context("removing stored session")?;
        println!("Signed out ({})", sessions.path().display());
        return Ok(());
    };

    let navigator = HistoryNavigator::new();
    let env = SignInEnvironment::new(
        HttpAuthenticator::from_config(&config)?,
        sessions.clone(),
        navigator.clone(),
        TracingNotifier,
    );

    let form = match SignInForm::mount(env, &sessions, &config).await {
        Mounted::Ready(form) => form,
        Mounted::Redirected => {
            println!("Already signed in, redirected to {}", Route::Home);
            return Ok(());
        },
    };

    form.on_field_change(Field::Email, email).await?;
    form.on_field_change(Field::Password, password).await?;

    let view = form.view().await;
    println!(">>> {} as {}", view.submit_label, view.email);

    match form.submit().await? {
        SubmitOutcome::Succeeded => {
            let route = navigator.current().unwrap_or(Route::Home);
            println!("Signed in, session stored at {}", sessions.path().display());
            println!("Navigated to {route}");
        },
        SubmitOutcome::Failed { message } => {
            println!("Sign-in failed: {message}");
            println!(
                "Forgot your password? {}  New here? {}",
                view.forgot_password, view.sign_up
            );
        },
    }

    form.unmount().await?;
    Ok(())
}
