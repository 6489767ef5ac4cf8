//! Routing collaborator: route pathname, page query, shallow navigation.

use thiserror::Error;

/// Why a shallow navigation did not happen.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("navigation to {0} was rejected")]
    Rejected(String),
}

/// The host router.
pub trait Router {
    /// Route pattern of the current page, e.g. `/examples/pagination/[[...page]]`.
    fn pathname(&self) -> &str;

    /// Raw page value from the query or the first catch-all segment.
    fn query_page(&self) -> Option<&str>;

    /// Change the visible URL without re-running data fetching.
    fn shallow_push(&mut self, path: &str) -> Result<(), NavigationError>;
}

/// Strip a trailing catch-all segment (`/[[...x]]` or `/[...x]`).
///
/// ```
/// use decoupled_pager::paginator::route_prefix;
/// assert_eq!(route_prefix("/examples/pagination/[[...page]]"), "/examples/pagination");
/// assert_eq!(route_prefix("/blog"), "/blog");
/// ```
pub fn route_prefix(pathname: &str) -> &str {
    let Some(slash) = pathname.rfind('/') else {
        return pathname;
    };
    let last = &pathname[slash + 1..];
    let optional = last.starts_with("[[...") && last.ends_with("]]");
    let required = last.starts_with("[...") && last.ends_with(']');
    if optional || required {
        &pathname[..slash]
    } else {
        pathname
    }
}

/// Path of `page` under the route's stable prefix.
pub fn page_path(pathname: &str, page: usize) -> String {
    format!("{}/{page}", route_prefix(pathname))
}

/// Router that keeps its history in memory.
#[derive(Debug, Clone)]
pub struct MemoryRouter {
    pathname: String,
    query_page: Option<String>,
    history: Vec<String>,
    rejects: bool,
}

impl MemoryRouter {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            query_page: None,
            history: Vec::new(),
            rejects: false,
        }
    }

    pub fn with_query_page(mut self, page: impl Into<String>) -> Self {
        self.query_page = Some(page.into());
        self
    }

    /// Make every navigation fail, as an offline host would.
    pub fn rejecting(mut self) -> Self {
        self.rejects = true;
        self
    }

    /// Paths pushed so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn current_path(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }
}

impl Router for MemoryRouter {
    fn pathname(&self) -> &str {
        &self.pathname
    }

    fn query_page(&self) -> Option<&str> {
        self.query_page.as_deref()
    }

    fn shallow_push(&mut self, path: &str) -> Result<(), NavigationError> {
        if self.rejects {
            return Err(NavigationError::Rejected(path.to_string()));
        }
        self.history.push(path.to_string());
        Ok(())
    }
}
