mod cli;
mod infra;
mod listings;
mod routes;
mod server;

use macro_menu::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
