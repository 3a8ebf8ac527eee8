//! Request targets on the TabNews API.
//!
//! An `Endpoint` only knows its path relative to the API base URL. Owner and
//! slug values are kept as separate segments so the request builder can
//! percent-encode each one on its own.

/// Username that publishes the official newsletter.
pub const NEWSLETTER_OWNER: &str = "NewsletterOficial";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Paginated list of published contents.
    Contents,
    /// A single content by owner and slug.
    Content { owner: String, slug: String },
    /// Comments under a content.
    Children { owner: String, slug: String },
    /// Paginated list of newsletter editions.
    Newsletters,
    /// A single newsletter edition.
    Newsletter { slug: String },
    /// TabCoins transactions on a content.
    Tabcoins { owner: String, slug: String },
    /// Any other path, `/`-separated.
    Custom(String),
}

impl Endpoint {
    pub fn content(owner: impl Into<String>, slug: impl Into<String>) -> Self {
        Endpoint::Content {
            owner: owner.into(),
            slug: slug.into(),
        }
    }

    pub fn children(owner: impl Into<String>, slug: impl Into<String>) -> Self {
        Endpoint::Children {
            owner: owner.into(),
            slug: slug.into(),
        }
    }

    pub fn newsletter(slug: impl Into<String>) -> Self {
        Endpoint::Newsletter { slug: slug.into() }
    }

    pub fn tabcoins(owner: impl Into<String>, slug: impl Into<String>) -> Self {
        Endpoint::Tabcoins {
            owner: owner.into(),
            slug: slug.into(),
        }
    }

    /// Unencoded path segments, in order.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Endpoint::Contents => vec!["contents"],
            Endpoint::Content { owner, slug } => vec!["contents", owner, slug],
            Endpoint::Children { owner, slug } => vec!["contents", owner, slug, "children"],
            Endpoint::Newsletters => vec!["contents", NEWSLETTER_OWNER],
            Endpoint::Newsletter { slug } => vec!["contents", NEWSLETTER_OWNER, slug],
            Endpoint::Tabcoins { owner, slug } => vec!["contents", owner, slug, "tabcoins"],
            Endpoint::Custom(path) => path.split('/').filter(|s| !s.is_empty()).collect(),
        }
    }

    /// Relative path, e.g. `/contents/filipedeschamps/some-post`.
    pub fn path(&self) -> String {
        let mut path = String::new();
        for segment in self.segments() {
            path.push('/');
            path.push_str(segment);
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_paths() {
        assert_eq!(Endpoint::Contents.path(), "/contents");
        assert_eq!(Endpoint::Newsletters.path(), "/contents/NewsletterOficial");
    }

    #[test]
    fn owner_and_slug_paths() {
        assert_eq!(Endpoint::content("alice", "hello").path(), "/contents/alice/hello");
        assert_eq!(
            Endpoint::children("alice", "hello").path(),
            "/contents/alice/hello/children"
        );
        assert_eq!(
            Endpoint::tabcoins("alice", "hello").path(),
            "/contents/alice/hello/tabcoins"
        );
        assert_eq!(
            Endpoint::newsletter("edicao-1").path(),
            "/contents/NewsletterOficial/edicao-1"
        );
    }

    #[test]
    fn custom_path_ignores_empty_segments() {
        let endpoint = Endpoint::Custom("//status/".to_string());
        assert_eq!(endpoint.segments(), vec!["status"]);
        assert_eq!(endpoint.path(), "/status");
    }
}
