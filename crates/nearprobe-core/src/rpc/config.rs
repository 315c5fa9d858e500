//! Client construction settings.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::request_id::{RequestIdCounter, RequestIdGenerator};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings applied once when an [`HttpRpcClient`](super::HttpRpcClient) is built.
///
/// The `with_*` methods apply in call order, so a later call overrides an
/// earlier one. Headers merge per name: a later value replaces all earlier
/// values for that name and leaves other names untouched.
#[derive(Clone)]
pub struct ClientConfig {
    /// Headers sent with every request, e.g. `Authorization` for hosted nodes.
    pub headers: HeaderMap,
    /// TCP/TLS connect timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout enforced by the HTTP layer. `None` leaves calls
    /// bounded only by their [`CallContext`](super::CallContext).
    pub request_timeout: Option<Duration>,
    pub id_generator: Arc<dyn RequestIdGenerator>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            headers: HeaderMap::new(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            id_generator: Arc::new(RequestIdCounter::new()),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        for name in headers.keys() {
            self.headers.remove(name);
        }
        for (name, value) in &headers {
            self.headers.append(name.clone(), value.clone());
        }
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_id_generator(mut self, generator: impl RequestIdGenerator + 'static) -> Self {
        self.id_generator = Arc::new(generator);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}
