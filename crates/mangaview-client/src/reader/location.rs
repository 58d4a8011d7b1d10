//! Shareable reader location (`/read?chapter=...&page=3`).

use std::fmt;

use url::form_urlencoded;

const PAGE_PARAM: &str = "page";

/// Path plus query parameters, with the current page kept in `page`.
///
/// Updating the page replaces the marker in place; no navigation happens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareableLocation {
    path: String,
    params: Vec<(String, String)>,
}

impl ShareableLocation {
    pub fn parse(location: &str) -> Self {
        let location = location.split('#').next().unwrap_or_default();
        let (path, query) = location.split_once('?').unwrap_or((location, ""));
        Self {
            path: path.to_string(),
            params: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// Location for a chapter, as the details view links to it.
    pub fn for_chapter(series_id: Option<&str>, chapter_id: &str) -> Self {
        let mut params = Vec::new();
        if let Some(series_id) = series_id {
            params.push(("manga".to_string(), series_id.to_string()));
        }
        params.push(("chapter".to_string(), chapter_id.to_string()));
        Self {
            path: "/read".to_string(),
            params,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The `page` marker, if it holds a number.
    pub fn requested_page(&self) -> Option<usize> {
        self.get(PAGE_PARAM)?.trim().parse().ok()
    }

    pub fn set_page(&mut self, page: usize) {
        let value = page.to_string();
        match self.params.iter_mut().find(|(k, _)| k == PAGE_PARAM) {
            Some((_, v)) => *v = value,
            None => self.params.push((PAGE_PARAM.to_string(), value)),
        }
    }
}

impl fmt::Display for ShareableLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            return f.write_str(&self.path);
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish();
        write!(f, "{}?{}", self.path, query)
    }
}
