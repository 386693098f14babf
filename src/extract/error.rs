use std::fmt;

/// Fatal conditions raised while a rule is consuming its region. These
/// surface unchanged to whoever called [`Parser::feed`]; there is no retry
/// and no partial-result salvage.
///
/// [`Parser::feed`]: super::Parser::feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The input ran out while a rule was still inside its region, or
    /// mid-skip. A region's content is delimited by definition, so this
    /// always means truncated or malformed input.
    UnexpectedEndOfInput { rule: String, line: usize },
    /// A recognized line whose fields did not hold the expected values.
    Malformed { rule: String, details: String },
}

impl ExtractError {
    pub fn malformed(rule: &str, details: impl Into<String>) -> ExtractError {
        ExtractError::Malformed {
            rule: rule.to_owned(),
            details: details.into(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            ExtractError::UnexpectedEndOfInput { rule, line } => format!(
                "unexpected end of input at line {} while {} was consuming its region",
                line, rule
            ),
            ExtractError::Malformed { rule, details } => {
                format!("{} could not read a value: {}", rule, details)
            }
        }
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ExtractError {}
