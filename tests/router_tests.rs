//! Tests for table compilation and two-pass route matching.

use http::Method;
use mockroute::{ParamValue, RouteTable, Router};

use tracing_util::TestTracing;

fn assert_route(router: &Router, method: Method, url: &str, expected_handler: &str) {
    let m = router
        .route(&method, url)
        .unwrap_or_else(|| panic!("expected {method} {url} to match"));
    assert_eq!(m.handler_name, expected_handler, "for {method} {url}");
}

#[test]
fn specific_path_beats_catch_all_for_same_method() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table
        .any(Method::GET, "generic_get")
        .get("/api/heroes/:id", "get_hero");

    let router = Router::new(&table).unwrap();
    // Catch-all is registered first but only wins in the second pass.
    assert_route(&router, Method::GET, "/api/heroes/11", "get_hero");
    assert_route(&router, Method::GET, "/api/unknown", "generic_get");
}

#[test]
fn method_discriminates_between_entries_on_one_path() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table
        .get("/api/heroes/:id", "get_hero")
        .put("/api/heroes/:id", "update_hero")
        .delete("/api/heroes/:id", "delete_hero");

    let router = Router::new(&table).unwrap();
    assert_route(&router, Method::GET, "/api/heroes/11", "get_hero");
    assert_route(&router, Method::PUT, "/api/heroes/11", "update_hero");
    assert_route(&router, Method::DELETE, "/api/heroes/11", "delete_hero");
    assert!(router.route(&Method::POST, "/api/heroes/11").is_none());
}

#[test]
fn wrong_method_match_does_not_short_circuit_the_scan() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    // The first entry matches structurally but under the wrong method;
    // the scan must continue to the second entry.
    table
        .get("/api/items/:id", "get_item")
        .post("/api/items/:id", "replace_item");

    let router = Router::new(&table).unwrap();
    assert_route(&router, Method::POST, "/api/items/7", "replace_item");
}

#[test]
fn wrong_method_specific_match_falls_through_to_catch_all() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table
        .get("/api/items/:id", "get_item")
        .any(Method::POST, "generic_post");

    let router = Router::new(&table).unwrap();
    // /api/items/7 matches the GET pattern structurally, but a POST must
    // end up at the POST catch-all instead.
    assert_route(&router, Method::POST, "/api/items/7", "generic_post");
}

#[test]
fn earlier_registration_wins_among_overlapping_patterns() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table
        .get("/api/:collection/:id", "by_collection")
        .get("/api/heroes/:id", "get_hero");

    let router = Router::new(&table).unwrap();
    // Both patterns match; the earlier-registered entry takes it.
    assert_route(&router, Method::GET, "/api/heroes/11", "by_collection");
}

#[test]
fn catch_alls_resolve_in_registration_order() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table
        .any(Method::GET, "first_generic")
        .any(Method::GET, "second_generic");

    let router = Router::new(&table).unwrap();
    assert_route(&router, Method::GET, "/whatever", "first_generic");
}

#[test]
fn query_string_is_ignored_for_matching_and_extraction() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table.get("/api/heroes/:id", "get_hero");

    let router = Router::new(&table).unwrap();
    let m = router
        .route(&Method::GET, "/api/heroes/11?details=true&page=2")
        .unwrap();
    assert_eq!(m.handler_name, "get_hero");
    assert_eq!(
        m.get_param("id"),
        Some(&ParamValue::Single("11".to_string()))
    );
}

#[test]
fn catch_all_match_extracts_no_params() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table.any(Method::GET, "generic_get");

    let router = Router::new(&table).unwrap();
    let m = router.route(&Method::GET, "/api/heroes/11").unwrap();
    assert!(m.params.is_none());
    assert!(m.pattern.is_none());
}

#[test]
fn empty_table_matches_nothing() {
    let _tracing = TestTracing::init();
    let table = RouteTable::new();
    let router = Router::new(&table).unwrap();
    assert!(router.route(&Method::GET, "/").is_none());
}

#[test]
fn invalid_pattern_surfaces_at_compile_time() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table.get("/api/:/broken", "broken");
    assert!(Router::new(&table).is_err());
}

#[test]
fn repeat_param_routes_and_extracts_ordered_tokens() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table.get("/files/:path+", "read_file");

    let router = Router::new(&table).unwrap();
    let m = router.route(&Method::GET, "/files/docs/2024/readme.md").unwrap();
    assert_eq!(
        m.get_param("path"),
        Some(&ParamValue::Repeated(vec![
            "docs".to_string(),
            "2024".to_string(),
            "readme.md".to_string(),
        ]))
    );
}

#[test]
fn path_patterns_lists_table_in_order() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table
        .get("/api/heroes", "list_heroes")
        .any(Method::GET, "generic_get");

    let router = Router::new(&table).unwrap();
    assert_eq!(router.path_patterns(), vec!["/api/heroes", "*"]);
}
