use super::ValidationError;
use std::fmt;
use std::str::FromStr;

/// One repository scoped to its owner: the unit of work in a fan-out lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepositoryTarget {
    pub owner: String,
    pub name: String,
}

impl RepositoryTarget {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, ValidationError> {
        let owner = owner.into().trim().to_string();
        let name = name.into().trim().to_string();
        if owner.is_empty() {
            return Err(ValidationError::EmptyField("owner"));
        }
        if name.is_empty() {
            return Err(ValidationError::EmptyField("repository name"));
        }
        Ok(Self { owner, name })
    }
}

impl FromStr for RepositoryTarget {
    type Err = ValidationError;

    /// Parses `owner/name`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().split_once('/') {
            Some((owner, name)) if !name.contains('/') => Self::new(owner, name),
            _ => Err(ValidationError::InvalidTarget {
                input: input.to_string(),
                reason: "expected owner/name".to_string(),
            }),
        }
    }
}

impl fmt::Display for RepositoryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
