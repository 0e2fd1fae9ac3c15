use serde_json::{Map, Value};

use crate::cli::output::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::i18n::locale;
use crate::validation::fields;

pub fn handle(field: &str, value: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let validator = fields::by_name(field, locale(), config().validation.name_alphabet)
        .ok_or_else(|| anyhow::anyhow!("no validator for field '{}' (expected account, password or name)", field))?;

    let mut body = Map::new();
    body.insert(field.to_string(), Value::String(value.to_string()));
    let outcome = validator.run(&body);

    if outcome.errors.is_empty() {
        return output_success(output_format, &format!("{} is valid", field), Some(Value::String(outcome.value)));
    }

    output_error(output_format, &format!("{} is invalid", field), Some(serde_json::to_value(&outcome.errors)?))?;
    anyhow::bail!("validation failed for {}", field)
}
