use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

mod application;
mod cli;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;
#[cfg(test)]
mod testing;

use application::auth_service::AuthService;
use application::blog_service::BlogService;
use cli::{Cli, Command};
use data::repositories::postgres::comment_repository::PostgresCommentRepository;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use data::repositories::postgres::user_repository::PostgresUserRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url, settings.database_max_connections).await?;
    run_migrations(&pool).await?;

    let jwt = Arc::new(JwtService::new(
        &settings.jwt_secret,
        settings.jwt_access_ttl_seconds,
        settings.jwt_refresh_ttl_seconds,
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        jwt.clone(),
    ));
    let blog_service = Arc::new(BlogService::new(
        Arc::new(PostgresPostRepository::new(pool.clone())),
        Arc::new(PostgresCommentRepository::new(pool)),
    ));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let state = AppState::new(auth_service, blog_service, jwt, settings.posts_page_size);
            server::run_http(&settings, state).await
        }
        Command::CreateUser {
            username,
            email,
            password,
        } => cli::create_user(&auth_service, username, email, password).await,
    }
}
