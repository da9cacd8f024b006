use email_address::EmailAddress;
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "email")]
    pub field: String,
    #[schema(example = "Please enter a valid email")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Declarative rule applied to one input field. Each carries the message
/// reported when it fails.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    Required(&'static str),
    Email(&'static str),
    MinChars(usize, &'static str),
    MaxChars(usize, &'static str),
    Matches(&'static Regex, &'static str),
    NotMatches(&'static Regex, &'static str),
}

impl Rule {
    fn check(&self, value: &str) -> Result<(), &'static str> {
        let ok = match self {
            Rule::Required(_) => !value.trim().is_empty(),
            Rule::Email(_) => EmailAddress::is_valid(value.trim()),
            Rule::MinChars(min, _) => value.chars().count() >= *min,
            Rule::MaxChars(max, _) => value.chars().count() <= *max,
            Rule::Matches(re, _) => re.is_match(value),
            Rule::NotMatches(re, _) => !re.is_match(value),
        };

        if ok {
            Ok(())
        } else {
            Err(self.message())
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Rule::Required(m)
            | Rule::Email(m)
            | Rule::MinChars(_, m)
            | Rule::MaxChars(_, m)
            | Rule::Matches(_, m)
            | Rule::NotMatches(_, m) => m,
        }
    }
}

/// Collects the first failing rule of every field.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, value: &str, rules: &[Rule]) -> Self {
        if let Some(message) = rules.iter().find_map(|rule| rule.check(value).err()) {
            self.errors.push(FieldError::new(name, message));
        }
        self
    }

    /// Records a failure computed outside the rule table.
    pub fn fail_if(mut self, failed: bool, name: &str, message: &str) -> Self {
        if failed {
            self.errors.push(FieldError::new(name, message));
        }
        self
    }

    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;

    static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

    #[test]
    fn reports_only_first_failing_rule_per_field() {
        let result = Validator::new()
            .field(
                "password",
                "",
                &[Rule::Required("required"), Rule::MinChars(6, "too short")],
            )
            .finish();

        assert_eq!(
            result.unwrap_err(),
            vec![FieldError::new("password", "required")]
        );
    }

    #[test]
    fn collects_errors_across_fields() {
        let errors = Validator::new()
            .field("email", "nope", &[Rule::Email("bad email")])
            .field("code", "12a", &[Rule::Matches(&DIGITS, "digits only")])
            .finish()
            .unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[1].message, "digits only");
    }

    #[test]
    fn passes_when_all_rules_hold() {
        let result = Validator::new()
            .field("email", "jane@example.com", &[Rule::Email("bad email")])
            .field("name", "Jane", &[Rule::MinChars(1, "x"), Rule::MaxChars(4, "y")])
            .field("code", "abc", &[Rule::NotMatches(&DIGITS, "no digits")])
            .finish();

        assert!(result.is_ok());
    }

    #[test]
    fn char_counts_are_unicode_aware() {
        let result = Validator::new()
            .field("name", "éé", &[Rule::MaxChars(2, "too long")])
            .finish();

        assert!(result.is_ok());
    }

    #[test]
    fn fail_if_adds_custom_error() {
        let errors = Validator::new()
            .fail_if(true, "image", "Choose only one category image")
            .finish()
            .unwrap_err();

        assert_eq!(errors[0].field, "image");
    }
}
