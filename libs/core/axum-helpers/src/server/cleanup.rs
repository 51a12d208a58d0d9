//! Connection cleanup during graceful shutdown.

use tracing::{error, info};

/// Close a SeaORM pool and log the outcome.
///
/// The pool also closes on drop; closing explicitly lets shutdown wait for it.
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(_) => info!(connection = name, "PostgreSQL connection closed"),
        Err(e) => error!(connection = name, error = %e, "Error closing PostgreSQL connection"),
    }
}
