pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "edu")]
#[command(about = "Edu CLI - schema, validation and employee lookups for the Edu API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Print the DDL generated from the model definitions")]
    Schema,

    #[command(about = "Create the tables in DATABASE_URL if they do not exist")]
    Migrate,

    #[command(about = "Run a field validator (account, password, name) against a value")]
    Check {
        #[arg(help = "Field name")]
        field: String,
        #[arg(help = "Value to validate")]
        value: String,
    },

    #[command(about = "Show an employee and its supervisor")]
    Show {
        #[arg(help = "Employee id")]
        id: i64,
        #[arg(long, help = "Include soft-deleted employees")]
        with_deleted: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Schema => commands::schema::handle(output_format),
        Commands::Migrate => commands::migrate::handle(output_format).await,
        Commands::Check { field, value } => commands::check::handle(&field, &value, output_format),
        Commands::Show { id, with_deleted } => commands::show::handle(id, with_deleted, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["edu", "--json", "check", "account", "abc123"]).unwrap();
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Check { ref field, .. } if field == "account"));

        let cli = Cli::try_parse_from(["edu", "show", "42", "--with-deleted"]).unwrap();
        assert!(matches!(cli.command, Commands::Show { id: 42, with_deleted: true }));
    }

    #[test]
    fn show_requires_numeric_id() {
        assert!(Cli::try_parse_from(["edu", "show", "abc"]).is_err());
    }
}
