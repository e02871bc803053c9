use crate::error::AppError;

/// Parse a `--month` value: `04`, `4` or `April` style input, 1-12
pub(crate) fn parse_month_code(s: &str) -> Result<u32, AppError> {
    let trimmed = s.trim();
    let month = if trimmed.chars().all(|c| c.is_ascii_digit()) && !trimmed.is_empty() {
        trimmed.parse::<u32>().ok()
    } else {
        trimmed
            .parse::<chrono::Month>()
            .ok()
            .map(|m| m.number_from_month())
    };
    month
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| AppError::InvalidMonth {
            input: s.to_string(),
        })
}

/// Financial-year codes become part of a table name, so only short digit
/// strings are accepted. Duplicates are dropped, first occurrence wins.
pub(crate) fn parse_financial_years(codes: &[String]) -> Result<Vec<String>, AppError> {
    let mut parsed: Vec<String> = Vec::with_capacity(codes.len());
    for code in codes {
        let trimmed = code.trim();
        let valid = (1..=4).contains(&trimmed.len()) && trimmed.chars().all(|c| c.is_ascii_digit());
        if !valid {
            return Err(AppError::InvalidFinancialYear {
                input: code.clone(),
            });
        }
        if !parsed.iter().any(|p| p == trimmed) {
            parsed.push(trimmed.to_string());
        }
    }
    Ok(parsed)
}
