//! Router core - two-pass route matching over a compiled table.

use http::Method;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::pattern::{compile, CompiledPattern, ParamVec, PatternError};
use crate::table::RouteTable;

/// One table entry with its pattern compiled, in registration order.
#[derive(Debug, Clone)]
struct CompiledRoute {
    method: Method,
    /// `None` marks a catch-all entry.
    pattern: Option<Arc<CompiledPattern>>,
    handler_name: String,
}

/// Result of successfully matching a request to a route entry.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// Name of the handler that should process this request.
    pub handler_name: String,
    /// The compiled pattern that matched; `None` for a catch-all win.
    pub pattern: Option<Arc<CompiledPattern>>,
    /// Extracted path parameters. `Some` (possibly empty) for a
    /// specific-path match, `None` for a catch-all match, which never
    /// extracts parameters.
    pub params: Option<ParamVec>,
}

impl RouteMatch {
    /// Look up an extracted parameter by name.
    ///
    /// Uses "last write wins" semantics when a pattern repeats a name.
    #[inline]
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&super::pattern::ParamValue> {
        self.params
            .as_ref()?
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }
}

/// Matches (method, URL) pairs against a compiled route table.
///
/// Patterns are compiled once when the router is built; matching itself
/// allocates only for extracted parameter values. The router is immutable
/// after construction, so sharing it across concurrent dispatch calls is
/// safe - every call gets its own parameter storage.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<CompiledRoute>,
}

impl Router {
    /// Compile a route table into a router.
    ///
    /// Every entry's pattern is compiled up front, so invalid patterns
    /// surface here rather than at dispatch time. Compilation is a pure
    /// function of the pattern string; precompiling changes nothing
    /// observable versus recompiling per dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] for the first entry whose path pattern does
    /// not compile.
    pub fn new(table: &RouteTable) -> Result<Self, PatternError> {
        let routes = table
            .entries()
            .iter()
            .map(|entry| {
                let pattern = entry
                    .path
                    .as_deref()
                    .map(compile)
                    .transpose()?
                    .map(Arc::new);
                Ok(CompiledRoute {
                    method: entry.method.clone(),
                    pattern,
                    handler_name: entry.handler_name.clone(),
                })
            })
            .collect::<Result<Vec<_>, PatternError>>()?;

        let routes_summary: Vec<String> = routes
            .iter()
            .take(10)
            .map(|r| {
                format!(
                    "{} {} -> {}",
                    r.method,
                    r.pattern.as_deref().map_or("*", CompiledPattern::source),
                    r.handler_name
                )
            })
            .collect();
        info!(
            routes_count = routes.len(),
            routes_summary = ?routes_summary,
            "Routing table compiled"
        );

        Ok(Self { routes })
    }

    /// Match a request against the table.
    ///
    /// The query string (everything from the first `?`) is stripped from
    /// `url` before both the structural test and parameter extraction, so
    /// the two always see the same path.
    ///
    /// Two ordered passes over the table:
    ///
    /// 1. *Specific paths*: in registration order, the first entry whose
    ///    pattern matches the path **and** whose method equals `method`
    ///    wins. A structural match under the wrong method does not stop
    ///    the scan - a later entry may still match under the right one.
    /// 2. *Catch-alls*: the first entry with no pattern and an equal
    ///    method wins unconditionally; no parameters are extracted.
    ///
    /// Returns `None` when neither pass finds a winner.
    #[must_use]
    pub fn route(&self, method: &Method, url: &str) -> Option<RouteMatch> {
        let path = strip_query(url);

        debug!(method = %method, path = %path, "Route match attempt");

        for route in &self.routes {
            let Some(pattern) = &route.pattern else {
                continue;
            };
            if pattern.is_match(path) && route.method == *method {
                // Pass 1 confirmed the structural match, so extraction
                // cannot miss; defend anyway since map_params is total.
                let params = pattern.map_params(path).unwrap_or_default();
                info!(
                    method = %method,
                    path = %path,
                    handler_name = %route.handler_name,
                    route_pattern = %pattern.source(),
                    path_params = ?params,
                    "Route matched"
                );
                return Some(RouteMatch {
                    handler_name: route.handler_name.clone(),
                    pattern: Some(Arc::clone(pattern)),
                    params: Some(params),
                });
            }
        }

        for route in &self.routes {
            if route.pattern.is_none() && route.method == *method {
                info!(
                    method = %method,
                    path = %path,
                    handler_name = %route.handler_name,
                    "Catch-all route matched"
                );
                return Some(RouteMatch {
                    handler_name: route.handler_name.clone(),
                    pattern: None,
                    params: None,
                });
            }
        }

        warn!(method = %method, path = %path, "No route matched");
        None
    }

    /// All registered path patterns, in registration order.
    ///
    /// Catch-all entries appear as `"*"`. Useful for debugging a table.
    #[must_use]
    pub fn path_patterns(&self) -> Vec<&str> {
        self.routes
            .iter()
            .map(|r| r.pattern.as_deref().map_or("*", CompiledPattern::source))
            .collect()
    }
}

/// Strip a trailing query string, if any.
fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
