//! Ordered route registration.
//!
//! A [`RouteTable`] accumulates [`RouteEntry`] values in registration order
//! and exposes them as a read-only slice. Order is significant: the router
//! resolves overlapping registrations by scanning the table front to back,
//! so the earliest structural match wins.
//!
//! The table is append-only. Duplicate (method, path) pairs are permitted
//! and resolved purely by registration order at match time; nothing is ever
//! removed or rewritten after it is pushed.

use http::Method;

/// A single registered route: method, optional path pattern, handler name.
///
/// An entry with `path == None` is a *catch-all* for its method: it matches
/// any URL, but only after every specific-path entry has been considered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// HTTP method this entry responds to.
    pub method: Method,
    /// URL pattern with `:name` placeholders, or `None` for a catch-all.
    pub path: Option<String>,
    /// Name the dispatcher resolves to a registered handler function.
    pub handler_name: String,
}

/// Append-only, ordered collection of route entries.
///
/// Built once at setup, read many times during dispatch. Registration
/// cannot fail; invalid path patterns are reported later when the table is
/// compiled into a [`Router`](crate::router::Router).
///
/// # Example
///
/// ```
/// use http::Method;
/// use mockroute::RouteTable;
///
/// let mut table = RouteTable::new();
/// table
///     .get("/api/heroes/:id", "get_hero")
///     .post("/api/heroes", "create_hero")
///     .any(Method::GET, "generic_get");
/// assert_eq!(table.entries().len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Create an empty route table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a fully built entry, preserving registration order.
    pub fn register(&mut self, entry: RouteEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    /// Register a handler for `method` and a specific path pattern.
    pub fn on(&mut self, method: Method, path: impl Into<String>, handler_name: &str) -> &mut Self {
        self.register(RouteEntry {
            method,
            path: Some(path.into()),
            handler_name: handler_name.to_string(),
        })
    }

    /// Register a catch-all handler for `method` (no path pattern).
    ///
    /// Catch-alls only win when no specific-path entry matches the request.
    pub fn any(&mut self, method: Method, handler_name: &str) -> &mut Self {
        self.register(RouteEntry {
            method,
            path: None,
            handler_name: handler_name.to_string(),
        })
    }

    /// Register a GET handler for `path`.
    pub fn get(&mut self, path: impl Into<String>, handler_name: &str) -> &mut Self {
        self.on(Method::GET, path, handler_name)
    }

    /// Register a POST handler for `path`.
    pub fn post(&mut self, path: impl Into<String>, handler_name: &str) -> &mut Self {
        self.on(Method::POST, path, handler_name)
    }

    /// Register a PUT handler for `path`.
    pub fn put(&mut self, path: impl Into<String>, handler_name: &str) -> &mut Self {
        self.on(Method::PUT, path, handler_name)
    }

    /// Register a DELETE handler for `path`.
    pub fn delete(&mut self, path: impl Into<String>, handler_name: &str) -> &mut Self {
        self.on(Method::DELETE, path, handler_name)
    }

    /// All entries in registration order.
    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_order_is_preserved() {
        let mut table = RouteTable::new();
        table
            .get("/a", "first")
            .get("/a", "second")
            .any(Method::GET, "third");

        let names: Vec<&str> = table
            .entries()
            .iter()
            .map(|e| e.handler_name.as_str())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn duplicate_method_path_pairs_are_allowed() {
        let mut table = RouteTable::new();
        table.post("/api/items", "a").post("/api/items", "b");
        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[0].path.as_deref(), Some("/api/items"));
        assert_eq!(table.entries()[1].path.as_deref(), Some("/api/items"));
    }

    #[test]
    fn catch_all_has_no_path() {
        let mut table = RouteTable::new();
        table.any(Method::DELETE, "wipe");
        let entry = &table.entries()[0];
        assert_eq!(entry.method, Method::DELETE);
        assert!(entry.path.is_none());
        assert_eq!(entry.handler_name, "wipe");
    }
}
