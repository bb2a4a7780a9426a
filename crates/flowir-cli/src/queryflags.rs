//! Splitting positional arguments into query text and inputs.
//!
//! The first argument is query text unless it names an existing file (or
//! `-` for stdin) or a URL with a scheme we read from. A lone argument that
//! is not a file is only taken as a query when it starts with `yield`,
//! either spelled out or as a bare non-predicate expression. So
//! `flowir fmt missing.json` reports the missing file instead of a parse
//! error.

use std::path::{Path, PathBuf};

use flowir_core::dag::{Op, Sequential};
use flowir_core::source::Source;
use flowir_planner::{load_query, PlanError};
use url::Url;

/// Schemes whose URLs are inputs rather than query text.
const INPUT_SCHEMES: &[&str] = &["http", "https", "s3"];

#[derive(Debug, Clone, Default)]
pub struct QueryFlags {
    /// Query files spliced in ahead of the query text, in order.
    pub includes: Vec<PathBuf>,
}

impl QueryFlags {
    /// Returns the remaining input paths, the query, and whether the query
    /// was accepted as a lone implicit `yield`.
    pub fn parse_sources_and_inputs(
        &self,
        paths: &[String],
    ) -> Result<(Vec<String>, Sequential, bool), PlanError> {
        let mut src = "";
        let mut rest = paths;
        if let Some((first, tail)) = paths.split_first() {
            if !file_exists(first) && !is_url_with_scheme(first, INPUT_SCHEMES) {
                src = first.as_str();
                rest = tail;
                if rest.is_empty() {
                    return match load_query(src, &self.includes) {
                        Ok(query) if is_yield(&query) => Ok((Vec::new(), query, true)),
                        _ => Err(PlanError::NoSuchFile(src.to_string())),
                    };
                }
            }
        }
        let query = load_query(src, &self.includes)?;
        Ok((rest.to_vec(), query, false))
    }
}

/// Map input arguments to `from` sources.
pub fn input_sources(paths: &[String], format: Option<&str>) -> Vec<Source> {
    paths
        .iter()
        .map(|p| {
            if is_url_with_scheme(p, &["http", "https"]) {
                Source::Http { url: p.clone() }
            } else {
                Source::file(p.as_str(), format)
            }
        })
        .collect()
}

fn file_exists(path: &str) -> bool {
    path == "-" || Path::new(path).is_file()
}

fn is_url_with_scheme(path: &str, schemes: &[&str]) -> bool {
    match Url::parse(path) {
        Ok(u) => schemes.contains(&u.scheme()),
        Err(_) => false,
    }
}

fn is_yield(query: &Sequential) -> bool {
    matches!(query.ops.first(), Some(Op::Yield { .. }))
}
