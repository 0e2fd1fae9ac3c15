use serde_json::json;

use crate::cli::output::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::database::{DatabaseManager, EmployeeRepository};

pub async fn handle(id: i64, with_deleted: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    let repository = EmployeeRepository::connect().await?;

    let Some(employee) = repository.find_by_pk(id, !with_deleted).await? else {
        DatabaseManager::close().await;
        output_error(output_format, &format!("Employee {} not found", id), None)?;
        anyhow::bail!("employee {} not found", id);
    };
    let supervisor = repository.supervisor(&employee).await?;
    DatabaseManager::close().await;

    let label = if employee.is_deleted() { " (deleted)" } else { "" };
    output_success(
        output_format,
        &format!("Employee {}{}", employee.emp_id, label),
        Some(json!({ "employee": employee, "supervisor": supervisor })),
    )
}
