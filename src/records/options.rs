//! Builder-style option bags for record operations.
//!
//! Each bag turns itself into query parameters. Unset options are never
//! emitted, so the server applies its own defaults.

use crate::error::GristResult;
use crate::query::{QueryParams, insert_flag};
use serde_json::Value;
use std::collections::BTreeMap;

/// Options for fetching records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordQueryOptions {
    /// Column name to acceptable values; sent as a JSON object
    pub filter: Option<BTreeMap<String, Vec<Value>>>,
    /// Comma-separated columns, `-` prefix for descending
    pub sort: Option<String>,
    /// Maximum number of rows; 0 means the server default
    pub limit: usize,
    /// Include hidden columns (e.g. `manualSort`)
    pub hidden: bool,
}

impl RecordQueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept rows whose `column` equals one of `values`.
    pub fn with_filter(mut self, column: impl Into<String>, values: Vec<Value>) -> Self {
        self.filter
            .get_or_insert_with(BTreeMap::new)
            .insert(column.into(), values);
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub(crate) fn query_params(&self) -> GristResult<QueryParams> {
        let mut params = QueryParams::new();
        if let Some(filter) = &self.filter {
            params.insert("filter".to_string(), serde_json::to_string(filter)?);
        }
        if let Some(sort) = &self.sort {
            params.insert("sort".to_string(), sort.clone());
        }
        if self.limit > 0 {
            params.insert("limit".to_string(), self.limit.to_string());
        }
        insert_flag(&mut params, "hidden", self.hidden);
        Ok(params)
    }
}

/// Options for adding records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddRecordsOptions {
    /// Store string values literally instead of parsing them into column types
    pub no_parse: bool,
}

impl AddRecordsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_no_parse(mut self, no_parse: bool) -> Self {
        self.no_parse = no_parse;
        self
    }

    pub(crate) fn query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        insert_flag(&mut params, "noparse", self.no_parse);
        params
    }
}

/// Options for updating records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateRecordsOptions {
    /// Store string values literally instead of parsing them into column types
    pub no_parse: bool,
}

impl UpdateRecordsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_no_parse(mut self, no_parse: bool) -> Self {
        self.no_parse = no_parse;
        self
    }

    pub(crate) fn query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        insert_flag(&mut params, "noparse", self.no_parse);
        params
    }
}

/// Tie-break policy when an upsert `require` matches several rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnMany {
    /// Update the first matching row
    First,
    /// Update nothing
    None,
    /// Update every matching row
    All,
}

impl OnMany {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::None => "none",
            Self::All => "all",
        }
    }
}

impl std::str::FromStr for OnMany {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Self::First),
            "none" => Ok(Self::None),
            "all" => Ok(Self::All),
            other => Err(format!("Invalid onmany value '{}': expected first, none or all", other)),
        }
    }
}

/// Options for upserting records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertRecordsOptions {
    pub on_many: Option<OnMany>,
    /// Never insert; only update matching rows
    pub no_add: bool,
    /// Never update; only insert when nothing matches
    pub no_update: bool,
    /// Let an empty `require` match every row
    pub allow_empty_require: bool,
    /// Store string values literally instead of parsing them into column types
    pub no_parse: bool,
}

impl UpsertRecordsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_on_many(mut self, on_many: OnMany) -> Self {
        self.on_many = Some(on_many);
        self
    }

    pub fn with_no_add(mut self, no_add: bool) -> Self {
        self.no_add = no_add;
        self
    }

    pub fn with_no_update(mut self, no_update: bool) -> Self {
        self.no_update = no_update;
        self
    }

    pub fn with_allow_empty_require(mut self, allow: bool) -> Self {
        self.allow_empty_require = allow;
        self
    }

    pub fn with_no_parse(mut self, no_parse: bool) -> Self {
        self.no_parse = no_parse;
        self
    }

    pub(crate) fn query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(on_many) = self.on_many {
            params.insert("onmany".to_string(), on_many.as_str().to_string());
        }
        insert_flag(&mut params, "noadd", self.no_add);
        insert_flag(&mut params, "noupdate", self.no_update);
        insert_flag(&mut params, "allow_empty_require", self.allow_empty_require);
        insert_flag(&mut params, "noparse", self.no_parse);
        params
    }
}
