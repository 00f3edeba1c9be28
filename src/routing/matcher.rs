//! Path-prefix classification.
//!
//! # Responsibilities
//! - Map a request path to the component that owns it
//! - Provide bounded labels for logs and metrics
//!
//! # Design Decisions
//! - Prefixes match whole segments: `/api/cart` matches `/api/cart/s1` but
//!   not `/api/cartography`
//! - Path matching is case-sensitive
//! - No regex to guarantee O(n) matching
//! - Unknown paths classify as `Unmatched` rather than a default route

/// Owner of a request, decided by path prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteClass {
    Health,
    Catalog,
    Orders,
    Cart,
    Admin,
    Unmatched,
}

impl RouteClass {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteClass::Health => "health",
            RouteClass::Catalog => "catalog",
            RouteClass::Orders => "orders",
            RouteClass::Cart => "cart",
            RouteClass::Admin => "admin",
            RouteClass::Unmatched => "unmatched",
        }
    }
}

/// Matches a path prefix on segment boundaries.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: &'static str,
    class: RouteClass,
}

impl PathPrefixMatcher {
    pub const fn new(prefix: &'static str, class: RouteClass) -> Self {
        Self { prefix, class }
    }

    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

const PREFIXES: [PathPrefixMatcher; 5] = [
    PathPrefixMatcher::new("/health", RouteClass::Health),
    PathPrefixMatcher::new("/api/products", RouteClass::Catalog),
    PathPrefixMatcher::new("/api/orders", RouteClass::Orders),
    PathPrefixMatcher::new("/api/cart", RouteClass::Cart),
    PathPrefixMatcher::new("/admin", RouteClass::Admin),
];

/// Classify a request path. First match wins.
pub fn classify(path: &str) -> RouteClass {
    PREFIXES
        .iter()
        .find(|m| m.matches(path))
        .map(|m| m.class)
        .unwrap_or(RouteClass::Unmatched)
}
