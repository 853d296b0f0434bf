//! Category entity and request bodies

use serde::Deserialize;
use sqlx::FromRow;

use super::field::{merge, present};
use super::validation::{self, ValidationError};

/// Row of the `categories` table. `name` is UNIQUE.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// POST /categories body
#[derive(Debug, Default, Deserialize)]
pub struct CategoryInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Validated category ready for INSERT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            name: name.into(),
            description: description.map(str::to_owned),
        }
    }
}

impl TryFrom<CategoryInput> for NewCategory {
    type Error = ValidationError;

    fn try_from(input: CategoryInput) -> Result<Self, Self::Error> {
        let name = input.name.ok_or(ValidationError::Missing { field: "name" })?;
        Ok(Self {
            name: validation::name(name)?,
            description: validation::description(input.description)?,
        })
    }
}

/// PUT/PATCH /categories/{id} body
#[derive(Debug, Default, Deserialize)]
pub struct CategoryPatch {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

/// Validated category changes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl TryFrom<CategoryPatch> for CategoryChanges {
    type Error = ValidationError;

    fn try_from(patch: CategoryPatch) -> Result<Self, Self::Error> {
        let name = match patch.name {
            None => None,
            Some(None) => return Err(ValidationError::Null { field: "name" }),
            Some(Some(name)) => Some(validation::name(name)?),
        };

        Ok(Self {
            name,
            description: patch
                .description
                .map(validation::description)
                .transpose()?,
        })
    }
}

impl CategoryChanges {
    pub fn apply(self, category: &mut Category) {
        if let Some(name) = self.name {
            category.name = name;
        }
        merge(&mut category.description, self.description);
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}
