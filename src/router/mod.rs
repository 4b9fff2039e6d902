//! # Router Module
//!
//! Pattern compilation and route resolution. The router compiles the
//! ordered [`RouteTable`](crate::table::RouteTable) into anchored regex
//! matchers at build time, then resolves each incoming (method, URL) pair
//! with a two-pass scan: specific-path entries first, catch-all entries as
//! a fallback, always in registration order.
//!
//! ## Example
//!
//! ```
//! use http::Method;
//! use mockroute::{Router, RouteTable};
//!
//! let mut table = RouteTable::new();
//! table.get("/api/heroes/:id", "get_hero");
//! let router = Router::new(&table).unwrap();
//!
//! let m = router.route(&Method::GET, "/api/heroes/11?details=1").unwrap();
//! assert_eq!(m.handler_name, "get_hero");
//! assert_eq!(m.get_param("id").unwrap().as_str(), Some("11"));
//! ```

mod core;
mod pattern;
#[cfg(test)]
mod tests;

pub use self::core::{RouteMatch, Router};
pub use self::pattern::{
    compile, CompiledPattern, ParamKey, ParamValue, ParamVec, PatternError, MAX_INLINE_PARAMS,
};
