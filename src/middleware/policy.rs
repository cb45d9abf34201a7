use axum::http::Method;

/// Route access levels.
///
/// `Protected` is the `Default`, and [`RoutePolicy::sensitivity_for`]
/// resolves any undeclared route to it: a route nobody classified fails
/// closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteSensitivity {
    Public,
    #[default]
    Protected,
}

#[derive(Debug)]
struct Rule {
    method: Method,
    pattern: String,
    sensitivity: RouteSensitivity,
}

/// Declared sensitivity per route, consulted by the access gate on every
/// request. Patterns use the router's `:param` placeholder syntax.
#[derive(Debug, Default)]
pub struct RoutePolicy {
    rules: Vec<Rule>,
}

impl RoutePolicy {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn route(
        mut self,
        method: Method,
        pattern: impl Into<String>,
        sensitivity: RouteSensitivity,
    ) -> Self {
        self.rules.push(Rule {
            method,
            pattern: pattern.into(),
            sensitivity,
        });
        self
    }

    /// Declare the standard surface of an entity collection: public reads,
    /// protected writes.
    pub fn crud_entity(self, base: &str) -> Self {
        let item = format!("{}/:id", base);

        self.route(Method::GET, base, RouteSensitivity::Public)
            .route(Method::GET, item.clone(), RouteSensitivity::Public)
            .route(Method::POST, base, RouteSensitivity::Protected)
            .route(Method::PUT, item.clone(), RouteSensitivity::Protected)
            .route(Method::DELETE, item, RouteSensitivity::Protected)
    }

    /// Resolve a request to its declared sensitivity. No declaration means
    /// the fail-closed default.
    pub fn sensitivity_for(&self, method: &Method, path: &str) -> RouteSensitivity {
        self.rules
            .iter()
            .find(|rule| rule.method == *method && pattern_matches(&rule.pattern, path))
            .map(|rule| rule.sensitivity)
            .unwrap_or_default()
    }
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    let pattern_segments: Vec<&str> = pattern.trim_matches('/').split('/').collect();
    let path_segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    if pattern_segments.len() != path_segments.len() {
        return false;
    }

    pattern_segments
        .iter()
        .zip(path_segments.iter())
        .all(|(pattern_segment, path_segment)| {
            if pattern_segment.starts_with(':') {
                !path_segment.is_empty()
            } else {
                pattern_segment == path_segment
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RoutePolicy {
        RoutePolicy::new()
            .route(Method::GET, "/health", RouteSensitivity::Public)
            .crud_entity("/api/v1/motorcycles")
    }

    #[test]
    fn reads_are_public_and_writes_are_protected() {
        let policy = policy();

        assert_eq!(
            policy.sensitivity_for(&Method::GET, "/api/v1/motorcycles"),
            RouteSensitivity::Public
        );
        assert_eq!(
            policy.sensitivity_for(&Method::GET, "/api/v1/motorcycles/42"),
            RouteSensitivity::Public
        );
        assert_eq!(
            policy.sensitivity_for(&Method::POST, "/api/v1/motorcycles"),
            RouteSensitivity::Protected
        );
        assert_eq!(
            policy.sensitivity_for(&Method::PUT, "/api/v1/motorcycles/42"),
            RouteSensitivity::Protected
        );
        assert_eq!(
            policy.sensitivity_for(&Method::DELETE, "/api/v1/motorcycles/42"),
            RouteSensitivity::Protected
        );
    }

    #[test]
    fn undeclared_routes_default_to_protected() {
        let policy = policy();

        assert_eq!(
            policy.sensitivity_for(&Method::GET, "/api/v1/somewhere-new"),
            RouteSensitivity::Protected
        );
        assert_eq!(
            policy.sensitivity_for(&Method::PATCH, "/api/v1/motorcycles/42"),
            RouteSensitivity::Protected
        );
        assert_eq!(RouteSensitivity::default(), RouteSensitivity::Protected);
    }

    #[test]
    fn param_segments_match_any_value_but_not_extra_depth() {
        let policy = policy();

        assert_eq!(
            policy.sensitivity_for(&Method::GET, "/api/v1/motorcycles/abc"),
            RouteSensitivity::Public
        );
        assert_eq!(
            policy.sensitivity_for(&Method::GET, "/api/v1/motorcycles/42/extra"),
            RouteSensitivity::Protected
        );
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        let policy = policy();

        assert_eq!(
            policy.sensitivity_for(&Method::GET, "/api/v1/motorcycles/"),
            RouteSensitivity::Public
        );
        assert_eq!(
            policy.sensitivity_for(&Method::GET, "/health/"),
            RouteSensitivity::Public
        );
    }
}
