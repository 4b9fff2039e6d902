//! # mockroute
//!
//! **mockroute** is a small request-routing matcher for in-memory mock
//! backends: given a table of (HTTP method, URL pattern, handler) entries it
//! decides which handler services an incoming request, extracts named path
//! parameters, invokes the handler, and normalizes the handler's return
//! value into a well-formed HTTP response descriptor.
//!
//! It performs no socket I/O and ships no middleware: it sits entirely
//! in-process between a request producer (typically a test harness or a
//! stubbed HTTP client) and a set of handler functions.
//!
//! ## Architecture
//!
//! - **[`table`]** - Ordered route registration (`RouteTable`, `RouteEntry`)
//! - **[`router`]** - Pattern compilation and two-pass route matching
//! - **[`dispatcher`]** - Handler registry, dispatch, and response finishing
//! - **[`status`]** - Canonical status-text lookup
//!
//! ## Matching model
//!
//! Routes are scanned in registration order in two passes. The first pass
//! considers only entries with a path pattern: the first entry whose pattern
//! structurally matches the request path *and* whose method matches wins.
//! The second pass falls back to catch-all entries (no path) for the
//! requested method. An unmatched request is an error, never a silent 404.
//!
//! Path patterns use `:name` placeholders with optional modifiers:
//! `:id` captures one segment, `:rest+` captures one-or-more
//! delimiter-separated segments as an ordered list, and `?`/`*` mark the
//! capture optional. Captured text is percent-decoded before it reaches the
//! handler.
//!
//! ## Quick start
//!
//! ```
//! use http::Method;
//! use mockroute::{Dispatcher, Request, ResponseOptions, RouteTable};
//! use serde_json::json;
//!
//! let mut table = RouteTable::new();
//! table
//!     .get("/api/pets/:id", "get_pet")
//!     .any(Method::GET, "fallback");
//!
//! let mut dispatcher = Dispatcher::new(&table).unwrap();
//! dispatcher.register_handler("get_pet", |req: &mut Request| {
//!     let id = req.get_param("id").and_then(|p| p.as_str()).unwrap().to_string();
//!     ResponseOptions::json(json!({ "id": id }))
//! });
//! dispatcher.register_handler("fallback", |_req: &mut Request| {
//!     ResponseOptions::json(json!(null))
//! });
//!
//! let mut req = Request::new("/api/pets/42");
//! let resp = dispatcher.dispatch(Method::GET, &mut req).unwrap();
//! assert_eq!(resp.status, 200);
//! assert_eq!(resp.body, json!({ "id": "42" }));
//! ```

pub mod dispatcher;
pub mod router;
pub mod status;
pub mod table;

pub use dispatcher::{
    finish_options, DispatchError, Dispatcher, HandlerFn, HeaderVec, Immediate, Request, Response,
    ResponseOptions, ResponseProducer, ResponseSink, StatusTextFn, MAX_INLINE_HEADERS,
};
pub use router::{
    compile, CompiledPattern, ParamKey, ParamValue, ParamVec, PatternError, RouteMatch, Router,
    MAX_INLINE_PARAMS,
};
pub use status::status_text;
pub use table::{RouteEntry, RouteTable};
