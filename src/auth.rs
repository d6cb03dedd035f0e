//! Pluggable request authentication.
//!
//! An [`Authenticator`] decorates an outgoing request with credentials.
//! The request engine passes its own [`reqwest::Client`] to the decorate
//! call so any credential round trip inherits the surface's timeout and
//! TLS-verification policy. "No authentication" is simply the absence of
//! an authenticator; Kerberos/SPNEGO can be supplied by callers as their
//! own trait implementation and is deliberately not shipped here.

use futures::future::BoxFuture;
use log::debug;
use reqwest::header::{COOKIE, SET_COOKIE};
use tokio::sync::RwLock;

use crate::error::Error;

/// Capability to decorate an outgoing request with credentials.
///
/// A single authenticator instance may cache credential state across
/// calls (see [`SimpleAuth`]); share one instance per surface rather than
/// across concurrently-used surfaces.
pub trait Authenticator: Send + Sync {
    /// Returns the request builder with credentials attached, performing
    /// a credential round trip over `http` when needed.
    fn decorate<'a>(
        &'a self,
        http: &'a reqwest::Client,
        request: reqwest::RequestBuilder,
    ) -> BoxFuture<'a, Result<reqwest::RequestBuilder, Error>>;
}

/// Hadoop pseudo ("simple") authentication with token caching.
///
/// The first decorated request triggers a credential round trip: a `GET`
/// to the request's own URL carrying a `user.name` query parameter. The
/// cluster answers with a `hadoop.auth` cookie, which is cached and
/// attached as a `Cookie` header to this and every later request issued
/// through the same instance.
pub struct SimpleAuth {
    username: String,
    token: RwLock<Option<String>>,
}

impl SimpleAuth {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: RwLock::new(None),
        }
    }
}

impl Authenticator for SimpleAuth {
    fn decorate<'a>(
        &'a self,
        http: &'a reqwest::Client,
        request: reqwest::RequestBuilder,
    ) -> BoxFuture<'a, Result<reqwest::RequestBuilder, Error>> {
        Box::pin(async move {
            if let Some(token) = self.token.read().await.clone() {
                return Ok(request.header(COOKIE, token));
            }

            // The write lock is held across the round trip so concurrent
            // first calls do not each fetch a token.
            let mut cached = self.token.write().await;
            if let Some(token) = cached.clone() {
                return Ok(request.header(COOKIE, token));
            }

            let probe = request
                .try_clone()
                .ok_or_else(|| {
                    Error::Configuration("Cannot authenticate a request with a streaming body".into())
                })?
                .build()?;
            let url = probe.url().clone();

            debug!(url:% = url, username = self.username.as_str(); "Fetching hadoop.auth token");

            let response = http
                .get(url)
                .query(&[("user.name", self.username.as_str())])
                .send()
                .await?
                .error_for_status()?;

            let token = response
                .headers()
                .get_all(SET_COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .find(|cookie| cookie.starts_with("hadoop.auth="))
                .and_then(|cookie| cookie.split(';').next())
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::Configuration("Authentication reply carried no hadoop.auth cookie".into())
                })?;

            *cached = Some(token.clone());

            Ok(request.header(COOKIE, token))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn first_decorate_fetches_and_caches_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("user.name", "gateway"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Set-Cookie", "hadoop.auth=u=gateway&t=simple; Path=/; HttpOnly"),
            )
            .mount(&mock_server)
            .await;

        let http = reqwest::Client::new();
        let auth = SimpleAuth::new("gateway");

        let decorated = auth
            .decorate(&http, http.get(format!("{}/ws/v1/cluster/info", mock_server.uri())))
            .await
            .unwrap();
        let built = decorated.build().unwrap();
        assert_eq!(
            built.headers().get(COOKIE).unwrap().to_str().unwrap(),
            "hadoop.auth=u=gateway&t=simple"
        );

        // Second decoration reuses the cached token without another
        // credential round trip.
        let decorated = auth
            .decorate(&http, http.get(format!("{}/ws/v1/cluster/metrics", mock_server.uri())))
            .await
            .unwrap();
        let built = decorated.build().unwrap();
        assert_eq!(
            built.headers().get(COOKIE).unwrap().to_str().unwrap(),
            "hadoop.auth=u=gateway&t=simple"
        );

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1, "token must be fetched exactly once");
    }

    #[tokio::test]
    async fn reply_without_cookie_is_a_configuration_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let http = reqwest::Client::new();
        let auth = SimpleAuth::new("gateway");

        let result = auth.decorate(&http, http.get(mock_server.uri())).await;
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[tokio::test]
    async fn rejected_credential_request_propagates_as_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let http = reqwest::Client::new();
        let auth = SimpleAuth::new("gateway");

        let result = auth.decorate(&http, http.get(mock_server.uri())).await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
