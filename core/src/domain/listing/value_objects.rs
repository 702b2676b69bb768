use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{
    catalog::entities::Resource,
    filter::{
        codec::{SerializeOptions, serialize},
        value_objects::FilterObject,
    },
};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

/// "Fetch many" request sent to the backend: the compiled filter plus
/// pagination, all in one bracket-notation query string.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filter: Option<FilterObject>,
    pub page: u32,
    pub limit: u32,
}

impl ListQuery {
    pub fn new(filter: Option<FilterObject>, page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            filter,
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    pub fn to_query_string(&self) -> String {
        let mut merged = self.filter.clone().unwrap_or_default();
        merged.insert("page".to_string(), Value::from(self.page));
        merged.insert("limit".to_string(), Value::from(self.limit));
        serialize(&Value::Object(merged), "", &SerializeOptions::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItemsInput {
    pub resource: Resource,
    pub q: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_defaults_and_clamping() {
        let query = ListQuery::new(None, None, Some(1_000));
        assert_eq!(query.page, DEFAULT_PAGE);
        assert_eq!(query.limit, MAX_LIMIT);

        let query = ListQuery::new(None, Some(0), Some(0));
        assert_eq!((query.page, query.limit), (1, 1));
    }

    #[test]
    fn test_query_string_merges_pagination() {
        let filter = json!({ "name": { "contains": "ana", "mode": "insensitive" } });
        let query = ListQuery::new(filter.as_object().cloned(), Some(2), Some(10));
        assert_eq!(
            query.to_query_string(),
            "name[contains]=ana&page=2&limit=10"
        );
    }

    #[test]
    fn test_query_string_without_filter() {
        assert_eq!(
            ListQuery::new(None, None, None).to_query_string(),
            "page=1&limit=20"
        );
    }

    #[test]
    fn test_paginated_tolerates_missing_meta() {
        let page: Paginated<Value> = serde_json::from_value(json!({ "data": [{ "id": 1 }] })).unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.total, 0);
    }
}
