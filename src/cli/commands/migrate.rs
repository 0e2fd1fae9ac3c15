use crate::cli::output::output_success;
use crate::cli::OutputFormat;
use crate::database::DatabaseManager;
use crate::model::EMPLOYEE;

/// Serializes concurrent migrations; CREATE TABLE IF NOT EXISTS alone races on the catalog
const MIGRATION_LOCK_KEY: i64 = 0x6564_7501;

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::pool().await?;
    let statements = EMPLOYEE.create_table_sql();

    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(MIGRATION_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    for statement in &statements {
        tracing::debug!("{}", statement);
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    DatabaseManager::close().await;
    output_success(
        output_format,
        &format!("Applied {} statements for table {}", statements.len(), EMPLOYEE.table_name),
        None,
    )
}
