use gloo_net::http::Request;
use urlencoding::encode;
use web_sys::RequestCache;

use crate::error::BoardError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    ListActivities,
    Signup { activity: String, email: String },
    Unregister { activity: String, email: String },
}

impl ApiRequest {
    pub fn method(&self) -> &'static str {
        match self {
            ApiRequest::ListActivities => "GET",
            ApiRequest::Signup { .. } | ApiRequest::Unregister { .. } => "POST",
        }
    }

    /// Path and query, with the activity name and email percent-encoded.
    pub fn path(&self) -> String {
        match self {
            ApiRequest::ListActivities => "/activities".to_string(),
            ApiRequest::Signup { activity, email } => {
                format!("/activities/{}/signup?email={}", encode(activity), encode(email))
            }
            ApiRequest::Unregister { activity, email } => {
                format!("/activities/{}/unregister?email={}", encode(activity), encode(email))
            }
        }
    }
}

/// Status and body as received, before any schema is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, BoardError>;
}

/// `fetch`-backed backend.
pub struct HttpBackend {
    base: String,
}

impl HttpBackend {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base, request.path())
    }
}

impl Backend for HttpBackend {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, BoardError> {
        let url = self.url(request);
        let response = match request {
            // Rosters change under us; never serve a cached list.
            ApiRequest::ListActivities => {
                Request::get(&url).cache(RequestCache::NoStore).send().await?
            }
            ApiRequest::Signup { .. } | ApiRequest::Unregister { .. } => {
                Request::post(&url).send().await?
            }
        };

        let status = response.status();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_path() {
        assert_eq!(ApiRequest::ListActivities.path(), "/activities");
        assert_eq!(ApiRequest::ListActivities.method(), "GET");
    }

    #[test]
    fn signup_path_is_encoded() {
        let req = ApiRequest::Signup {
            activity: "Chess Club".into(),
            email: "t+1@x.com".into(),
        };
        assert_eq!(req.method(), "POST");
        assert_eq!(req.path(), "/activities/Chess%20Club/signup?email=t%2B1%40x.com");
    }

    #[test]
    fn unregister_path_escapes_slashes_and_ampersands() {
        let req = ApiRequest::Unregister {
            activity: "Arts/Crafts & More".into(),
            email: "a@x.com".into(),
        };
        assert_eq!(
            req.path(),
            "/activities/Arts%2FCrafts%20%26%20More/unregister?email=a%40x.com"
        );
    }

    #[test]
    fn base_is_joined_without_double_slash() {
        let backend = HttpBackend::new("https://api.example.edu/");
        assert_eq!(
            backend.url(&ApiRequest::ListActivities),
            "https://api.example.edu/activities"
        );
        assert_eq!(HttpBackend::new("").url(&ApiRequest::ListActivities), "/activities");
    }
}
