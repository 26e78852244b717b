//! Paged query execution.
//!
//! A paged listing is composed from two injected capabilities sharing one
//! filter: a counter that reports how many rows match, and a lister that
//! returns one window of them. `PagedQuery` validates the request, runs the
//! count, runs the listing, and assembles the result. It owns no state and
//! never interprets filter values; both capabilities are supplied per call.

use sea_orm::DbErr;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;

/// Opaque filter parameters carried by a [`PageRequest`].
///
/// Values are loose scalars (string, integer, boolean); only the capabilities
/// give them meaning.
pub type PageParams = HashMap<String, Value>;

/// A validated-on-execution paging request: a filter map plus a window.
#[derive(Debug, Clone, Serialize)]
pub struct PageRequest {
    pub offset: i64,
    pub limit: i64,
    pub params: PageParams,
}

impl PageRequest {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset,
            limit,
            params: PageParams::new(),
        }
    }

    /// Adds a filter parameter, returning the request for chaining.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Value::as_str)
    }

    pub fn param_i64(&self, key: &str) -> Option<i64> {
        param_i64(&self.params, key)
    }

    pub fn param_bool(&self, key: &str) -> Option<bool> {
        param_bool(&self.params, key)
    }

    fn validate(&self) -> Result<(), PageError> {
        if self.offset < 0 {
            return Err(PageError::InvalidRequest(format!(
                "offset must be non-negative, got {}",
                self.offset
            )));
        }
        if self.limit <= 0 {
            return Err(PageError::InvalidRequest(format!(
                "limit must be positive, got {}",
                self.limit
            )));
        }
        Ok(())
    }
}

/// Reads an integer parameter, accepting both number and string encodings.
pub fn param_i64(params: &PageParams, key: &str) -> Option<i64> {
    match params.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Reads a boolean parameter, accepting both bool and string encodings.
pub fn param_bool(params: &PageParams, key: &str) -> Option<bool> {
    match params.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

pub fn param_str<'a>(params: &'a PageParams, key: &str) -> Option<&'a str> {
    params.get(key).and_then(Value::as_str)
}

/// One page of results together with the total match count and the echoed
/// window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub total: u64,
    pub rows: Vec<T>,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("invalid page request: {0}")]
    InvalidRequest(String),
    #[error("count query failed: {0}")]
    Count(#[source] DbErr),
    #[error("list query failed: {0}")]
    List(#[source] DbErr),
}

/// Composes a counting capability and a listing capability over one request.
///
/// The counter receives the filter parameters and returns the number of rows
/// matching them, ignoring the window. The lister receives the same filter
/// snapshot plus the validated window and must return at most `limit` rows in
/// the order it chooses; ordering is entirely the lister's concern.
pub struct PagedQuery<C, L> {
    count: C,
    list: L,
}

impl<C, L> PagedQuery<C, L> {
    pub fn new(count: C, list: L) -> Self {
        Self { count, list }
    }

    /// Executes the query: validate, count, list, assemble.
    ///
    /// An invalid window (`offset < 0` or `limit <= 0`) fails before either
    /// capability runs. A count failure is reported as [`PageError::Count`]
    /// and the lister is never invoked. The lister runs even when the count
    /// is zero. Each capability is invoked exactly once.
    ///
    /// The count and the listing are two separate reads; rows written or
    /// removed between them can make `total` disagree with `rows`.
    pub async fn run<T, CFut, LFut>(self, request: &PageRequest) -> Result<Page<T>, PageError>
    where
        C: FnOnce(PageParams) -> CFut,
        CFut: Future<Output = Result<u64, DbErr>>,
        L: FnOnce(PageParams, u64, u64) -> LFut,
        LFut: Future<Output = Result<Vec<T>, DbErr>>,
    {
        request.validate()?;

        let total = (self.count)(request.params.clone())
            .await
            .map_err(PageError::Count)?;

        let rows = (self.list)(
            request.params.clone(),
            request.offset as u64,
            request.limit as u64,
        )
        .await
        .map_err(PageError::List)?;

        Ok(Page {
            total,
            rows,
            offset: request.offset,
            limit: request.limit,
        })
    }
}
