// Hypermedia link attachment shared by every resource endpoint.
use serde::Serialize;

/// Navigational link: where, what for, and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    pub rel: &'static str,
    pub method: &'static str,
}

/// An entity's output representation plus the links that apply to it. Each
/// envelope owns its link list; nothing is shared between envelopes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource<T: Serialize> {
    #[serde(flatten)]
    pub record: T,
    pub links: Vec<Link>,
}

/// Single-resource response body: `{ "data": ... }`.
#[derive(Debug, Serialize)]
pub struct Document<T: Serialize> {
    pub data: T,
}

/// Link factory bound to an entity's canonical collection path.
///
/// For a fixed id the produced links are byte-identical across calls, and
/// every call builds a fresh envelope. Link presence is uniform - it does
/// not depend on the caller's authorization.
#[derive(Debug, Clone, Copy)]
pub struct LinkSet {
    base: &'static str,
}

impl LinkSet {
    pub const fn new(base: &'static str) -> Self {
        Self { base }
    }

    /// Decorate a mapped record with its `self`/`update`/`delete` links.
    pub fn attach<T: Serialize>(&self, record: T, id: i32) -> Resource<T> {
        let href = format!("{}/{}", self.base, id);

        Resource {
            record,
            links: vec![
                Link {
                    href: href.clone(),
                    rel: "self",
                    method: "GET",
                },
                Link {
                    href: href.clone(),
                    rel: "update",
                    method: "PUT",
                },
                Link {
                    href,
                    rel: "delete",
                    method: "DELETE",
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Widget {
        id: i32,
        name: String,
    }

    fn widget() -> Widget {
        Widget {
            id: 7,
            name: "gearbox".to_string(),
        }
    }

    #[test]
    fn attaches_self_update_delete() {
        let links = LinkSet::new("/api/v1/widgets");
        let envelope = links.attach(widget(), 7);

        assert_eq!(
            envelope.links,
            vec![
                Link {
                    href: "/api/v1/widgets/7".to_string(),
                    rel: "self",
                    method: "GET"
                },
                Link {
                    href: "/api/v1/widgets/7".to_string(),
                    rel: "update",
                    method: "PUT"
                },
                Link {
                    href: "/api/v1/widgets/7".to_string(),
                    rel: "delete",
                    method: "DELETE"
                },
            ]
        );
    }

    #[test]
    fn repeated_attachment_yields_identical_independent_envelopes() {
        let links = LinkSet::new("/api/v1/widgets");

        let mut first = links.attach(widget(), 7);
        let second = links.attach(widget(), 7);
        assert_eq!(first, second);

        // Envelopes own their link lists; draining one leaves the other.
        first.links.clear();
        assert_eq!(second.links.len(), 3);
    }

    #[test]
    fn serializes_flattened_record_with_links() {
        let links = LinkSet::new("/api/v1/widgets");
        let value = serde_json::to_value(links.attach(widget(), 7)).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["name"], "gearbox");
        assert_eq!(value["links"][0]["rel"], "self");
        assert_eq!(value["links"][0]["href"], "/api/v1/widgets/7");
        assert_eq!(value["links"][0]["method"], "GET");
    }
}
