use std::cell::RefCell;
use std::collections::HashMap;

use super::{FileDownloader, Response};

/// Serves canned responses by URL and records every requested URL.
/// Unknown URLs answer with a network error.
pub struct MockFetcher {
    responses: HashMap<String, Response>,
    requests: RefCell<Vec<String>>,
}

impl FileDownloader for MockFetcher {
    fn fetch(&self, url: &str) -> Response {
        self.requests.borrow_mut().push(url.to_string());

        self.responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| Response::network_error(format!("no route to {}", url)))
    }
}

impl MockFetcher {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = (S, Response)>,
        S: Into<String>,
    {
        Self {
            responses: responses
                .into_iter()
                .map(|(url, response)| (url.into(), response))
                .collect(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}
