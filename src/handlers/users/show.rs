// handlers/users/show.rs - GET /users/:id handler

use axum::{extract::Path, Json};

use crate::database::EmployeeRepository;
use crate::error::ApiError;
use crate::model::Employee;

/// Active employee by primary key, or `null` when the id does not name one
pub async fn user_show(Path(raw_id): Path<String>) -> Result<Json<Option<Employee>>, ApiError> {
    let Some(id) = parse_leading_int(&raw_id) else {
        tracing::debug!(id = %raw_id, "non-numeric user id");
        return Ok(Json(None));
    };

    let repository = EmployeeRepository::connect().await?;
    Ok(Json(repository.find_by_pk(id, true).await?))
}

/// Integer prefix of `raw` after leading whitespace: `"42abc"` is 42, `"abc"` is nothing
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_like_a_lenient_integer_parse() {
        assert_eq!(parse_leading_int("50000"), Some(50000));
        assert_eq!(parse_leading_int("42abc"), Some(42));
        assert_eq!(parse_leading_int("  7"), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999"), None);
    }
}
