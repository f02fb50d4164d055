//! Route path construction: joins an optional base prefix with a relative path.

/// Joins a relative path onto an optional base. A base ending in `/`
/// loses exactly one trailing slash before concatenation, so the join
/// never produces a doubled slash; without a base the result is
/// `/` + path. No syntax validation, pure string work.
#[derive(Clone, Debug, Default)]
pub struct UrlBuilder {
    base: String,
}

impl UrlBuilder {
    pub fn new(base: Option<&str>) -> Self {
        let base = match base {
            Some(b) if b.ends_with('/') => b[..b.len() - 1].to_string(),
            Some(b) => b.to_string(),
            None => String::new(),
        };
        Self { base }
    }

    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }
}
