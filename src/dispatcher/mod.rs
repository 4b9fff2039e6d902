//! # Dispatcher Module
//!
//! Maps a (method, request) pair to exactly one handler invocation and a
//! normalized response. The dispatcher owns the compiled router and a
//! registry of named handler functions; on a match it stores the extracted
//! path parameters on the request, invokes the handler, finishes the
//! handler's partial return value, and hands the finished response to a
//! pluggable [`ResponseSink`].
//!
//! ## Request flow
//!
//! 1. Router matches (method, URL) -> [`RouteMatch`](crate::router::RouteMatch)
//! 2. Dispatcher looks up the handler by name
//! 3. Extracted parameters land on `request.route`
//! 4. Handler runs synchronously and returns a [`ResponseOptions`]
//! 5. [`finish_options`] normalizes status, status text, headers, and URL
//! 6. The sink delivers the finished [`Response`]
//!
//! ## Failure semantics
//!
//! An unmatched (method, URL) pair is fatal to the call: dispatch returns
//! [`DispatchError::RouteNotMatched`] carrying both for diagnostics. No
//! implicit 404 is synthesized here; that is the transport's decision.
//! Handler panics propagate unchanged.

mod core;

pub use self::core::{
    finish_options, DispatchError, Dispatcher, HandlerFn, HeaderVec, Immediate, Request, Response,
    ResponseOptions, ResponseProducer, ResponseSink, StatusTextFn, MAX_INLINE_HEADERS,
};
