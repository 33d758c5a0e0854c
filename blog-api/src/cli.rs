use clap::{Parser, Subcommand};
use tracing::info;

use crate::application::auth_service::AuthService;
use crate::domain::user::CreateUserRequest;

#[derive(Debug, Parser)]
#[command(name = "blog-api", version, about = "Blog REST API server")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Provision an account that can obtain write tokens.
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

pub(crate) async fn create_user(
    auth_service: &AuthService,
    username: String,
    email: String,
    password: String,
) -> anyhow::Result<()> {
    let user = auth_service
        .create_user(CreateUserRequest {
            username,
            email,
            password,
        })
        .await?;
    info!(
        user_id = user.id,
        username = %user.username,
        email = %user.email,
        created_at = %user.created_at,
        "user created"
    );
    Ok(())
}
