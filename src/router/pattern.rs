//! URL pattern compilation and parameter extraction.
//!
//! Converts path patterns like `/api/heroes/:id` into anchored regexes plus
//! an ordered list of parameter descriptors, and executes those regexes to
//! pull decoded parameter values back out of request paths.
//!
//! Pattern grammar, per `/`-separated segment:
//!
//! - literal text matches itself (regex metacharacters are escaped);
//! - `:name` captures exactly one segment;
//! - `:name?` captures at most one segment;
//! - `:name+` captures one or more delimiter-separated segments and yields
//!   an ordered list;
//! - `:name*` is the optional form of `:name+`.
//!
//! Compilation is a pure function of the pattern string: two calls with the
//! same pattern produce structurally equivalent matchers, which is what
//! allows the router to compile each pattern once at table-build time.

use regex::Regex;
use smallvec::SmallVec;
use std::sync::Arc;
use thiserror::Error;

/// Maximum number of path parameters before heap allocation.
///
/// Mock API patterns rarely carry more than a handful of placeholders, so
/// parameter storage stays on the stack in the common case.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage.
///
/// Names are `Arc<str>` because they come from the compiled pattern and are
/// shared across every request matching that pattern; values are owned
/// per-request data decoded from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, ParamValue); MAX_INLINE_PARAMS]>;

/// A decoded path parameter value.
///
/// Single-segment captures yield [`ParamValue::Single`]; repeat captures
/// (`:name+` / `:name*`) yield [`ParamValue::Repeated`] with the captured
/// text split on the parameter's delimiter, in order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// One percent-decoded segment.
    Single(String),
    /// An ordered sequence of percent-decoded tokens.
    Repeated(Vec<String>),
}

impl ParamValue {
    /// The value as a single string, if it is not a repeat capture.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Single(s) => Some(s.as_str()),
            ParamValue::Repeated(_) => None,
        }
    }

    /// The value as an ordered slice of tokens, if it is a repeat capture.
    #[must_use]
    pub fn as_slice(&self) -> Option<&[String]> {
        match self {
            ParamValue::Single(_) => None,
            ParamValue::Repeated(v) => Some(v.as_slice()),
        }
    }
}

/// Descriptor for one named placeholder in a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamKey {
    /// Placeholder name (`:id` → `"id"`), shared with extracted params.
    pub name: Arc<str>,
    /// True for `+` / `*` modifiers: the capture splits into a list.
    pub repeat: bool,
    /// Token separator for repeat captures; the segment separator.
    pub delimiter: char,
}

/// Error raised when a path pattern cannot be compiled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    /// A `:` segment has an empty or non `[A-Za-z0-9_]` name.
    #[error("invalid parameter name in segment `{segment}` of pattern `{pattern}`")]
    InvalidParamName {
        /// The offending segment text.
        segment: String,
        /// The full pattern it appeared in.
        pattern: String,
    },
}

/// A path pattern compiled to an anchored regex plus parameter descriptors.
///
/// The descriptor list is ordered exactly as the placeholders appear in the
/// pattern, positionally aligned with the regex capture groups.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    regex: Regex,
    keys: Vec<ParamKey>,
}

impl CompiledPattern {
    /// The pattern string this matcher was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Ordered parameter descriptors for the pattern's placeholders.
    #[must_use]
    pub fn keys(&self) -> &[ParamKey] {
        &self.keys
    }

    /// Structural match test: does `path` match this pattern?
    ///
    /// Purely structural; no parameters are extracted. A single trailing
    /// slash on `path` is tolerated.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Execute the matcher against `path` and map captures to parameters.
    ///
    /// Returns `None` when the matcher does not match `path` at all. This
    /// is a defined failure value rather than a panic so the extraction
    /// step stays safe to reuse standalone, outside a confirmed match.
    ///
    /// Per descriptor, positionally aligned with the capture groups:
    /// empty or absent captures are omitted from the result entirely;
    /// present captures are percent-decoded, and repeat captures are then
    /// split on the descriptor's delimiter into an ordered list.
    ///
    /// # Example
    ///
    /// ```
    /// use mockroute::compile;
    ///
    /// let pattern = compile("/api/foo/:bar/:car").unwrap();
    /// let params = pattern.map_params("/api/foo/100/porsche").unwrap();
    /// assert_eq!(params[0].1.as_str(), Some("100"));
    /// assert_eq!(params[1].1.as_str(), Some("porsche"));
    /// ```
    #[must_use]
    pub fn map_params(&self, path: &str) -> Option<ParamVec> {
        let caps = self.regex.captures(path)?;

        let mut params = ParamVec::new();
        for (i, key) in self.keys.iter().enumerate() {
            let Some(m) = caps.get(i + 1) else {
                continue;
            };
            if m.as_str().is_empty() {
                continue;
            }

            let decoded = percent_encoding::percent_decode_str(m.as_str())
                .decode_utf8_lossy()
                .into_owned();

            let value = if key.repeat {
                ParamValue::Repeated(
                    decoded
                        .split(key.delimiter)
                        .map(str::to_string)
                        .collect(),
                )
            } else {
                ParamValue::Single(decoded)
            };
            params.push((Arc::clone(&key.name), value));
        }

        Some(params)
    }
}

/// Compile a path pattern into a [`CompiledPattern`].
///
/// Literal segments are regex-escaped, so pattern text like `/v1.2/items`
/// matches only itself. Placeholder names must be non-empty and drawn from
/// `[A-Za-z0-9_]`; anything else is a [`PatternError::InvalidParamName`].
///
/// # Errors
///
/// Returns [`PatternError`] when a placeholder segment is malformed.
pub fn compile(path: &str) -> Result<CompiledPattern, PatternError> {
    if path == "/" {
        return Ok(CompiledPattern {
            source: path.to_string(),
            // Escaped literals and fixed capture templates only; this
            // cannot produce an invalid expression.
            regex: Regex::new(r"^/?$").expect("failed to compile path regex"),
            keys: Vec::new(),
        });
    }

    let mut pattern = String::with_capacity(path.len() + 8);
    pattern.push('^');
    let mut keys = Vec::with_capacity(path.matches(':').count());

    let leading_slash = path.starts_with('/');
    let mut first = true;

    for segment in path.split('/') {
        if segment.is_empty() {
            continue;
        }
        let sep = if first && !leading_slash { "" } else { "/" };
        first = false;

        let Some(placeholder) = segment.strip_prefix(':') else {
            pattern.push_str(sep);
            pattern.push_str(&regex::escape(segment));
            continue;
        };

        let (name, modifier) = match placeholder.chars().last() {
            Some(c @ ('+' | '*' | '?')) => (&placeholder[..placeholder.len() - 1], Some(c)),
            _ => (placeholder, None),
        };
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(PatternError::InvalidParamName {
                segment: segment.to_string(),
                pattern: path.to_string(),
            });
        }

        let repeat = matches!(modifier, Some('+' | '*'));
        let optional = matches!(modifier, Some('?' | '*'));
        let capture = if repeat {
            "([^/]+(?:/[^/]+)*)"
        } else {
            "([^/]+)"
        };

        if optional {
            pattern.push_str("(?:");
            pattern.push_str(sep);
            pattern.push_str(capture);
            pattern.push_str(")?");
        } else {
            pattern.push_str(sep);
            pattern.push_str(capture);
        }

        keys.push(ParamKey {
            name: Arc::from(name),
            repeat,
            delimiter: '/',
        });
    }

    pattern.push_str("/?$");
    let regex = Regex::new(&pattern).expect("failed to compile path regex");

    Ok(CompiledPattern {
        source: path.to_string(),
        regex,
        keys,
    })
}
