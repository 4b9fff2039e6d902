use super::pattern::{compile, ParamValue, PatternError};

#[test]
fn root_path_compiles_without_keys() {
    let p = compile("/").unwrap();
    assert!(p.is_match("/"));
    assert!(!p.is_match("/anything"));
    assert!(p.keys().is_empty());
}

#[test]
fn literal_path_matches_itself_only() {
    let p = compile("/api/heroes").unwrap();
    assert!(p.is_match("/api/heroes"));
    assert!(p.is_match("/api/heroes/"));
    assert!(!p.is_match("/api/heroes/11"));
    assert!(!p.is_match("/api"));
}

#[test]
fn parameterized_path_captures_one_segment() {
    let p = compile("/items/:id").unwrap();
    assert!(p.is_match("/items/123"));
    assert!(!p.is_match("/items"));
    assert!(!p.is_match("/items/1/2"));
    assert_eq!(p.keys().len(), 1);
    assert_eq!(p.keys()[0].name.as_ref(), "id");
    assert!(!p.keys()[0].repeat);
}

#[test]
fn keys_are_ordered_as_written() {
    let p = compile("/a/:b/c/:d").unwrap();
    let names: Vec<&str> = p.keys().iter().map(|k| k.name.as_ref()).collect();
    assert_eq!(names, vec!["b", "d"]);
}

#[test]
fn pattern_without_leading_slash_matches_bare_path() {
    let p = compile("api/foo/:bar").unwrap();
    assert!(p.is_match("api/foo/100"));
    assert!(!p.is_match("/api/foo/100"));
}

#[test]
fn regex_metacharacters_in_literals_are_escaped() {
    let p = compile("/v1.2/items").unwrap();
    assert!(p.is_match("/v1.2/items"));
    assert!(!p.is_match("/v1x2/items"));
}

#[test]
fn repeat_modifier_requires_at_least_one_segment() {
    let p = compile("/files/:path+").unwrap();
    assert!(p.is_match("/files/a"));
    assert!(p.is_match("/files/a/b/c"));
    assert!(!p.is_match("/files"));
    assert!(p.keys()[0].repeat);
    assert_eq!(p.keys()[0].delimiter, '/');
}

#[test]
fn optional_modifiers_tolerate_missing_segment() {
    let opt = compile("/heroes/:id?").unwrap();
    assert!(opt.is_match("/heroes"));
    assert!(opt.is_match("/heroes/11"));
    assert!(!opt.is_match("/heroes/11/x"));

    let star = compile("/files/:path*").unwrap();
    assert!(star.is_match("/files"));
    assert!(star.is_match("/files/a/b"));
}

#[test]
fn invalid_param_name_is_rejected() {
    let err = compile("/api/:/x").unwrap_err();
    assert!(matches!(err, PatternError::InvalidParamName { .. }));

    let err = compile("/api/:na me").unwrap_err();
    assert!(matches!(err, PatternError::InvalidParamName { .. }));
}

#[test]
fn compilation_is_deterministic() {
    let a = compile("/api/foo/:bar/:car+").unwrap();
    let b = compile("/api/foo/:bar/:car+").unwrap();
    assert_eq!(a.source(), b.source());
    assert_eq!(a.keys(), b.keys());
    assert!(a.is_match("/api/foo/1/2/3"));
    assert!(b.is_match("/api/foo/1/2/3"));
}

#[test]
fn map_params_extracts_named_segments() {
    let p = compile("/api/foo/:bar/:car").unwrap();
    let params = p.map_params("/api/foo/100/porsche").unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].0.as_ref(), "bar");
    assert_eq!(params[0].1, ParamValue::Single("100".to_string()));
    assert_eq!(params[1].0.as_ref(), "car");
    assert_eq!(params[1].1, ParamValue::Single("porsche".to_string()));
}

#[test]
fn map_params_percent_decodes_captures() {
    let p = compile("/search/:term").unwrap();
    let params = p.map_params("/search/caf%C3%A9%20au%20lait").unwrap();
    assert_eq!(params[0].1.as_str(), Some("café au lait"));
}

#[test]
fn map_params_splits_repeat_captures_in_order() {
    let p = compile("/files/:path+").unwrap();
    let params = p.map_params("/files/a/b/c").unwrap();
    assert_eq!(
        params[0].1,
        ParamValue::Repeated(vec!["a".to_string(), "b".to_string(), "c".to_string()])
    );
}

#[test]
fn map_params_omits_missing_optional_captures() {
    let p = compile("/heroes/:id?").unwrap();
    let params = p.map_params("/heroes").unwrap();
    assert!(params.is_empty());

    let params = p.map_params("/heroes/11").unwrap();
    assert_eq!(params.len(), 1);
}

#[test]
fn map_params_returns_none_for_foreign_path() {
    let p = compile("/api/foo/:bar").unwrap();
    assert!(p.map_params("/completely/else").is_none());
}
