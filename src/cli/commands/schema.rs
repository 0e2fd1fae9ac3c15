use serde_json::json;

use crate::cli::OutputFormat;
use crate::model::EMPLOYEE;

/// DDL script for every model, one statement per line group
pub fn script() -> String {
    EMPLOYEE
        .create_table_sql()
        .iter()
        .map(|stmt| format!("{};", stmt))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let body = json!({ "table": EMPLOYEE.table_name, "statements": EMPLOYEE.create_table_sql() });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => println!("{}", script()),
    }
    Ok(())
}
