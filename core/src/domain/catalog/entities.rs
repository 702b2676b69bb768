use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

/// Admin resources exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Companies,
    Staff,
    Users,
    Roles,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Companies,
        Resource::Staff,
        Resource::Users,
        Resource::Roles,
    ];

    /// Path segment on the backend, e.g. `GET /companies`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Companies => "companies",
            Resource::Staff => "staff",
            Resource::Users => "users",
            Resource::Roles => "roles",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resource::Companies => "Empresas",
            Resource::Staff => "Funcionários",
            Resource::Users => "Usuários",
            Resource::Roles => "Perfis",
        }
    }
}

impl FromStr for Resource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|resource| resource.as_str() == s)
            .ok_or(CoreError::InvalidResource)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ResourceSummary {
    pub name: Resource,
    pub label: String,
}

impl From<Resource> for ResourceSummary {
    fn from(resource: Resource) -> Self {
        Self {
            name: resource,
            label: resource.label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource() {
        assert_eq!("staff".parse::<Resource>(), Ok(Resource::Staff));
        assert_eq!("Staff".parse::<Resource>(), Err(CoreError::InvalidResource));
    }

    #[test]
    fn test_path_segment_matches_serde_name() {
        for resource in Resource::ALL {
            let json = serde_json::to_value(resource).unwrap();
            assert_eq!(json, serde_json::Value::String(resource.as_str().to_string()));
        }
    }
}
