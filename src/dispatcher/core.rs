//! Dispatcher core - request/response types, handler registry, dispatch.

use http::Method;
use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::router::{ParamValue, ParamVec, PatternError, Router};
use crate::status;
use crate::table::RouteTable;

/// Maximum inline headers before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage.
///
/// Header names use `Arc<str>` because they repeat across requests
/// (`content-type`, `authorization`, ...); values are per-request data.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// An incoming request as the dispatcher sees it.
///
/// `route` starts out unset; a specific-path match populates it with the
/// extracted parameters before the handler runs. A catch-all match leaves
/// it unset - catch-alls never extract parameters.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Full request URL, possibly carrying a query string.
    pub url: String,
    /// Header bag; passed through to the response unchanged.
    pub headers: HeaderVec,
    /// Path parameters extracted by the dispatcher on a specific match.
    pub route: Option<ParamVec>,
}

impl Request {
    /// Create a request for `url` with no headers.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HeaderVec::new(),
            route: None,
        }
    }

    /// Attach headers, builder style.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderVec) -> Self {
        self.headers = headers;
        self
    }

    /// Add a single header, builder style.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((Arc::from(name), value.into()));
        self
    }

    /// Look up an extracted path parameter by name.
    ///
    /// Uses "last write wins" semantics when a pattern repeats a name.
    /// Returns `None` before a match occurs and for catch-all matches.
    #[inline]
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&ParamValue> {
        self.route
            .as_ref()?
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }

    /// Get a header by name (case-insensitive per RFC 7230).
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The partial response a handler returns.
///
/// Everything is optional except the body: `status` defaults to 200 during
/// finishing, and whatever the handler puts in `status_text`, `headers`,
/// or `url` is discarded - those fields are always recomputed from the
/// status and the originating request.
#[derive(Debug, Clone, Default)]
pub struct ResponseOptions {
    /// HTTP status code; `None` or `0` finishes as 200.
    pub status: Option<u16>,
    /// Ignored; the finished text is always derived from the status.
    pub status_text: Option<String>,
    /// Ignored; the finished headers always come from the request.
    pub headers: HeaderVec,
    /// Ignored; the finished URL always comes from the request.
    pub url: Option<String>,
    /// Response payload.
    pub body: Value,
}

impl ResponseOptions {
    /// A body-only response; finishes with status 200.
    #[must_use]
    pub fn json(body: Value) -> Self {
        Self {
            body,
            ..Self::default()
        }
    }

    /// A response with an explicit status code.
    #[must_use]
    pub fn with_status(status: u16, body: Value) -> Self {
        Self {
            status: Some(status),
            body,
            ..Self::default()
        }
    }
}

/// A finished, normalized response descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    /// HTTP status code (defaulted to 200 when the handler omitted it).
    pub status: u16,
    /// Canonical text for `status`, recomputed at finishing time.
    pub status_text: &'static str,
    /// Copied verbatim from the originating request.
    #[serde(skip_serializing)]
    pub headers: HeaderVec,
    /// Copied verbatim from the originating request.
    pub url: String,
    /// Response payload.
    pub body: Value,
}

/// Status-text lookup collaborator: numeric status to reason phrase.
pub type StatusTextFn = fn(u16) -> &'static str;

/// Producer handed to a [`ResponseSink`]; yields the finished response.
pub type ResponseProducer = Box<dyn FnOnce() -> Response + Send>;

/// Delivery collaborator for finished responses.
///
/// The dispatcher finishes its own work - matching, extraction, handler
/// invocation, normalization - synchronously, then hands the result to the
/// sink as a producer closure. A sink may run the producer immediately
/// (see [`Immediate`]) or defer it to emulate network latency; either way
/// the computation behind it is already done.
pub trait ResponseSink {
    /// What the sink hands back to the dispatch caller.
    type Output;

    /// Deliver the finished response.
    fn deliver(&self, produce: ResponseProducer) -> Self::Output;
}

/// The default sink: runs the producer inline and returns the response.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl ResponseSink for Immediate {
    type Output = Response;

    fn deliver(&self, produce: ResponseProducer) -> Response {
        produce()
    }
}

/// A registered handler: consumes the request, returns a partial response.
pub type HandlerFn = Box<dyn Fn(&mut Request) -> ResponseOptions + Send + Sync>;

/// Error raised by [`Dispatcher::dispatch`].
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No entry - specific or catch-all - matched the (method, URL) pair.
    #[error("route not matched {method}:{url}")]
    RouteNotMatched {
        /// The requested method.
        method: Method,
        /// The full request URL.
        url: String,
    },
    /// An entry matched but no handler is registered under its name.
    #[error("no handler registered under `{0}`")]
    UnknownHandler(String),
}

/// Routes requests to registered handlers and finishes their responses.
///
/// Owns the compiled [`Router`], a registry of named handler functions,
/// the status-text lookup, and the response sink. Each `dispatch` call is
/// stateless given the compiled table: the dispatcher holds no per-request
/// state, so a shared reference can serve concurrent calls as long as each
/// call brings its own [`Request`].
pub struct Dispatcher<S: ResponseSink = Immediate> {
    router: Router,
    handlers: HashMap<String, HandlerFn>,
    status_text: StatusTextFn,
    sink: S,
}

impl Dispatcher<Immediate> {
    /// Build a dispatcher over `table` with the [`Immediate`] sink.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when an entry's path pattern does not
    /// compile.
    pub fn new(table: &RouteTable) -> Result<Self, PatternError> {
        Self::with_sink(table, Immediate)
    }
}

impl<S: ResponseSink> Dispatcher<S> {
    /// Build a dispatcher over `table` delivering through `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when an entry's path pattern does not
    /// compile.
    pub fn with_sink(table: &RouteTable, sink: S) -> Result<Self, PatternError> {
        Ok(Self {
            router: Router::new(table)?,
            handlers: HashMap::new(),
            status_text: status::status_text,
            sink,
        })
    }

    /// Replace the status-text lookup collaborator.
    pub fn set_status_text(&mut self, lookup: StatusTextFn) {
        self.status_text = lookup;
    }

    /// Register a handler function under `name`.
    ///
    /// Re-registering a name replaces the previous handler.
    pub fn register_handler<F>(&mut self, name: &str, handler_fn: F)
    where
        F: Fn(&mut Request) -> ResponseOptions + Send + Sync + 'static,
    {
        if self.handlers.remove(name).is_some() {
            warn!(handler_name = %name, "Replaced existing handler");
        }
        info!(
            handler_name = %name,
            total_handlers = self.handlers.len() + 1,
            "Handler registered"
        );
        self.handlers.insert(name.to_string(), Box::new(handler_fn));
    }

    /// The compiled router backing this dispatcher.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Dispatch a request to exactly one handler and finish its response.
    ///
    /// Matches `(method, request.url)` against the table, stores extracted
    /// parameters on `request.route`, invokes the matched handler, finishes
    /// its return value via [`finish_options`], and hands the result to the
    /// response sink. Handler panics propagate unchanged; this layer
    /// imposes no recovery policy.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::RouteNotMatched`] when neither a specific-path
    ///   nor a catch-all entry matches. No fallback response is
    ///   synthesized; turning this into a 404 is the caller's business.
    /// - [`DispatchError::UnknownHandler`] when the matched entry names a
    ///   handler that was never registered.
    pub fn dispatch(
        &self,
        method: Method,
        request: &mut Request,
    ) -> Result<S::Output, DispatchError> {
        debug!(method = %method, url = %request.url, "Request override");

        let matched =
            self.router
                .route(&method, &request.url)
                .ok_or_else(|| DispatchError::RouteNotMatched {
                    method: method.clone(),
                    url: request.url.clone(),
                })?;

        let handler = self
            .handlers
            .get(&matched.handler_name)
            .ok_or_else(|| DispatchError::UnknownHandler(matched.handler_name.clone()))?;

        debug!(
            handler_name = %matched.handler_name,
            available_handlers = self.handlers.len(),
            "Handler lookup"
        );

        request.route = matched.params;

        let options = handler(request);
        let response = finish_options(options, request, self.status_text);

        info!(
            method = %method,
            url = %request.url,
            handler_name = %matched.handler_name,
            status = response.status,
            "Response finished"
        );

        Ok(self.sink.deliver(Box::new(move || response)))
    }
}

/// Normalize a handler's partial return value into a finished response.
///
/// Pure and total:
///
/// - an unset or zero `status` defaults to 200;
/// - `status_text` is always recomputed from the (possibly defaulted)
///   status via `lookup`, regardless of what the handler set;
/// - `headers` and `url` are always overwritten with the originating
///   request's values.
///
/// # Example
///
/// ```
/// use mockroute::{finish_options, Request, ResponseOptions, status_text};
/// use serde_json::json;
///
/// let req = Request::new("/api/things");
/// let resp = finish_options(ResponseOptions::json(json!([1, 2])), &req, status_text);
/// assert_eq!(resp.status, 200);
/// assert_eq!(resp.status_text, "OK");
/// assert_eq!(resp.url, "/api/things");
/// ```
#[must_use]
pub fn finish_options(options: ResponseOptions, request: &Request, lookup: StatusTextFn) -> Response {
    let status = options.status.filter(|&s| s != 0).unwrap_or(200);
    Response {
        status,
        status_text: lookup(status),
        headers: request.headers.clone(),
        url: request.url.clone(),
        body: options.body,
    }
}
