//! Path parameters extracted while matching a request path.

use matchit::Params;

/// Named path segments captured by the matched route, e.g. `photo_id` in `/photo/:photo_id`.
///
/// [`RouteTable::dispatch`](crate::RouteTable::dispatch) inserts them into the request
/// extensions, so handlers read them with `req.extensions().get::<PathParams>()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    params: Vec<(String, String)>,
}

impl PathParams {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Gets the value of a path parameter by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl From<Params<'_, '_>> for PathParams {
    fn from(params: Params<'_, '_>) -> Self {
        Self { params: params.iter().map(|(key, value)| (key.to_owned(), value.to_owned())).collect() }
    }
}
