mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use solar_ops::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
