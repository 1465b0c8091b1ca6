//! Validation utilities for form input

use chrono::NaiveDate;

use crate::calendar::parse_date;
use crate::settings::NamePolicy;
use crate::types::*;

/// Validate that a name is present, returning it trimmed
pub fn validate_name(name: &str) -> Result<&str, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        Err(ValidationError::EmptyName)
    } else {
        Ok(name)
    }
}

/// Check a name against existing ones, skipping the entry being edited
pub fn validate_unique_name<'a, I>(
    policy: NamePolicy,
    name: &str,
    existing: I,
    editing_id: Option<&str>,
) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let taken = existing
        .into_iter()
        .any(|(id, other)| Some(id) != editing_id && policy.same_name(other, name));
    if taken {
        Err(ValidationError::DuplicateName(policy.canonicalize(name)))
    } else {
        Ok(())
    }
}

/// Parse a price field: a whole number greater than zero
pub fn validate_price(input: &str) -> Result<u32, ValidationError> {
    match input.trim().parse::<u32>() {
        Ok(price) if price > 0 => Ok(price),
        _ => Err(ValidationError::InvalidPrice(input.to_string())),
    }
}

/// Validate a session date typed in the form.
///
/// Checks presence, format, that the day is not before `today`, and that no
/// other session (other than `editing_id`) already falls on the same day.
/// Stored dates are compared as calendar days, so `10/1/2026` collides with
/// `10/01/2026`.
pub fn validate_session_date<'a, I>(
    input: &str,
    today: NaiveDate,
    existing: I,
    editing_id: Option<&str>,
) -> Result<NaiveDate, ValidationError>
where
    I: IntoIterator<Item = &'a WalkSession>,
{
    if input.trim().is_empty() {
        return Err(ValidationError::EmptyDate);
    }

    let date = parse_date(input).ok_or_else(|| ValidationError::InvalidDate(input.to_string()))?;

    if date < today {
        return Err(ValidationError::PastDate(input.to_string()));
    }

    let duplicate = existing
        .into_iter()
        .filter(|s| Some(s.id.as_str()) != editing_id)
        .any(|s| parse_date(&s.date) == Some(date));
    if duplicate {
        return Err(ValidationError::DuplicateDate(input.to_string()));
    }

    Ok(date)
}

/// Trim an optional free-text field, dropping it when blank
pub fn normalize_optional(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    fn existing() -> Vec<WalkSession> {
        vec![WalkSession::new(
            "s1".to_string(),
            "10/01/2026".to_string(),
            SessionKind::Saturday,
            40,
            None,
        )]
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Ana "), Ok("Ana"));
        assert_eq!(validate_name("   "), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_unique_name_policies() {
        let names = [("1", "LUNA"), ("2", "JIMMY")];

        assert_eq!(
            validate_unique_name(NamePolicy::CaseInsensitive, "luna", names, None),
            Err(ValidationError::DuplicateName("LUNA".to_string()))
        );
        assert!(validate_unique_name(NamePolicy::CaseInsensitive, "luna", names, Some("1")).is_ok());
        assert!(validate_unique_name(NamePolicy::CaseSensitive, "luna", names, None).is_ok());
    }

    #[test]
    fn test_validate_price() {
        assert_eq!(validate_price("40"), Ok(40));
        assert_eq!(validate_price(" 55 "), Ok(55));
        assert!(validate_price("0").is_err());
        assert!(validate_price("").is_err());
        assert!(validate_price("-3").is_err());
        assert!(validate_price("12.5").is_err());
    }

    #[test]
    fn test_session_date_checks_in_order() {
        let sessions = existing();

        assert_eq!(
            validate_session_date(" ", today(), &sessions, None),
            Err(ValidationError::EmptyDate)
        );
        assert_eq!(
            validate_session_date("31/02/2026", today(), &sessions, None),
            Err(ValidationError::InvalidDate("31/02/2026".to_string()))
        );
        assert_eq!(
            validate_session_date("04/01/2026", today(), &sessions, None),
            Err(ValidationError::PastDate("04/01/2026".to_string()))
        );
        assert_eq!(
            validate_session_date("10/01/2026", today(), &sessions, None),
            Err(ValidationError::DuplicateDate("10/01/2026".to_string()))
        );
        assert!(validate_session_date("10/01/2026", today(), &sessions, Some("s1")).is_ok());
        assert_eq!(
            validate_session_date("10/1/2026", today(), &sessions, None),
            Err(ValidationError::DuplicateDate("10/1/2026".to_string()))
        );
        assert_eq!(
            validate_session_date("05/01/2026", today(), &sessions, None),
            Ok(today())
        );
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("  note ")), Some("note".to_string()));
        assert_eq!(normalize_optional(Some("   ")), None);
        assert_eq!(normalize_optional(None), None);
    }
}
