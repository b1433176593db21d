//! Route records and path matching.
//!
//! Patterns follow the familiar web-router syntax: static segments,
//! `:param` segments matching exactly one segment, and a trailing
//! `:name(.*)*` catch-all matching any remainder.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{FileDeckError, Result};

/// Named routes that can be navigated to by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteName {
    Home,
    Login,
    Upload,
    FileList,
    FilePreview,
    DynamicPage,
}

impl RouteName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Upload => "upload",
            Self::FileList => "FileList",
            Self::FilePreview => "FilePreview",
            Self::DynamicPage => "DynamicPage",
        }
    }
}

impl std::fmt::Display for RouteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The view a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    Home,
    Login,
    FileUploader,
    FileList,
    FilePreview,
    DynamicPage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    CatchAll(String),
}

impl Segment {
    fn parse(raw: &str) -> Result<Self> {
        let Some(param) = raw.strip_prefix(':') else {
            return Ok(Self::Static(raw.to_string()));
        };
        if let Some(name) = param.strip_suffix("(.*)*") {
            return Ok(Self::CatchAll(name.to_string()));
        }
        if param.is_empty() || param.contains(['(', ')', '*']) {
            return Err(FileDeckError::config(format!(
                "unsupported route segment '{}'",
                raw
            )));
        }
        Ok(Self::Param(param.to_string()))
    }
}

/// One entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    /// The pattern as written, e.g. `/preview/:fileId`
    pub pattern: String,
    pub name: Option<RouteName>,
    pub view: View,
    pub requires_auth: bool,
    segments: Vec<Segment>,
}

impl RouteRecord {
    pub fn new(pattern: impl Into<String>, view: View) -> Result<Self> {
        let pattern = pattern.into();
        let segments = split_path(&pattern)
            .map(Segment::parse)
            .collect::<Result<Vec<_>>>()?;

        if let Some(position) = segments
            .iter()
            .position(|s| matches!(s, Segment::CatchAll(_)))
            && position + 1 != segments.len()
        {
            return Err(FileDeckError::config(format!(
                "catch-all must be the last segment in '{}'",
                pattern
            )));
        }

        Ok(Self {
            pattern,
            name: None,
            view,
            requires_auth: false,
            segments,
        })
    }

    pub fn named(mut self, name: RouteName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn requires_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    fn is_catch_all(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::CatchAll(_)))
    }

    fn static_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Static(_)))
            .count()
    }

    /// Matches already-split path segments, returning decoded parameters.
    fn match_segments(&self, parts: &[&str]) -> Option<BTreeMap<String, String>> {
        let mut params = BTreeMap::new();
        let mut parts_iter = parts.iter();

        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Static(expected) => {
                    if parts_iter.next() != Some(&expected.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = parts_iter.next()?;
                    params.insert(name.clone(), decode(value));
                }
                Segment::CatchAll(name) => {
                    let rest: Vec<String> = parts[index..].iter().map(|p| decode(p)).collect();
                    params.insert(name.clone(), rest.join("/"));
                    return Some(params);
                }
            }
        }

        parts_iter.next().is_none().then_some(params)
    }
}

/// A path resolved against a route record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub record: &'a RouteRecord,
    /// Normalized path: leading slash, no trailing slash, no query
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub query: Option<String>,
}

impl RouteMatch<'_> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Ordered set of routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteRecord>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteRecord>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    pub fn by_name(&self, name: RouteName) -> Option<&RouteRecord> {
        self.routes.iter().find(|r| r.name == Some(name))
    }

    /// Finds the most specific route for `path`.
    ///
    /// Routes without a catch-all outrank catch-all routes; among the rest,
    /// more static segments win; ties go to the earlier declaration.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        let (path_part, query) = split_query(path);
        let parts: Vec<&str> = split_path(path_part).collect();

        self.routes
            .iter()
            .filter_map(|record| {
                record
                    .match_segments(&parts)
                    .map(|params| (record, params))
            })
            .min_by_key(|(record, _)| (record.is_catch_all(), usize::MAX - record.static_count()))
            .map(|(record, params)| RouteMatch {
                record,
                path: normalize(&parts),
                params,
                query: query.map(str::to_string),
            })
    }
}

impl Default for RouteTable {
    /// The application's routes.
    fn default() -> Self {
        let routes = [
            RouteRecord::new("/", View::Home).map(|r| r.named(RouteName::Home).requires_auth()),
            RouteRecord::new("/login", View::Login).map(|r| r.named(RouteName::Login)),
            RouteRecord::new("/upload", View::FileUploader)
                .map(|r| r.named(RouteName::Upload).requires_auth()),
            RouteRecord::new("/files", View::FileList)
                .map(|r| r.named(RouteName::FileList).requires_auth()),
            RouteRecord::new("/preview/:fileId", View::FilePreview)
                .map(|r| r.named(RouteName::FilePreview).requires_auth()),
            RouteRecord::new("/:pathMatch(.*)*", View::Login),
            RouteRecord::new("/page/:title", View::DynamicPage)
                .map(|r| r.named(RouteName::DynamicPage).requires_auth()),
        ];

        // The patterns above are literals known to parse.
        Self::new(routes.into_iter().flatten().collect())
    }
}

fn split_query(path: &str) -> (&str, Option<&str>) {
    let path = path.split('#').next().unwrap_or_default();
    match path.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path, None),
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn normalize(parts: &[&str]) -> String {
    format!("/{}", parts.join("/"))
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}
