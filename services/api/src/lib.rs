mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use pie_destroyer::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
