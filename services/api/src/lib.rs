mod cli;
mod infra;
mod report;
mod routes;
mod server;

use skill_audit::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
