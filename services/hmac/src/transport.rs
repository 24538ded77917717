use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use cerberus_sign_core::time::DateTime;
use cerberus_sign_core::{HttpSend, Result};
use cerberus_sign_http_send_reqwest::ReqwestHttpSend;
use once_cell::sync::Lazy;

use crate::{Config, Credential, RequestSigner};

/// The executor used by [`SigningTransport`] when none is supplied.
///
/// It is created on first use and shared by every transport built without
/// an explicit executor.
pub static DEFAULT_HTTP_SEND: Lazy<Arc<dyn HttpSend>> =
    Lazy::new(|| Arc::new(ReqwestHttpSend::default()));

/// SigningTransport signs every outgoing request and hands it to the next
/// executor.
///
/// The transport holds no mutable state and can be shared between tasks
/// freely. The response or error of the next executor is returned as-is,
/// including non-2xx responses.
///
/// ```no_run
/// use bytes::Bytes;
/// use cerberus_sign_core::Result;
/// use cerberus_sign_hmac::SigningTransport;
///
/// # async fn example() -> Result<()> {
/// let transport = SigningTransport::new("api_key", "api_secret", None);
///
/// let req = http::Request::post("https://api.cerberus.test/v1/email")
///     .body(Bytes::from(r#"{"data":["test@example.com"]}"#))?;
/// let resp = transport.send(&req).await?;
/// println!("status: {}", resp.status());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SigningTransport {
    signer: RequestSigner,
    next: Arc<dyn HttpSend>,
}

impl SigningTransport {
    /// Create a new transport.
    ///
    /// If `next` is `None`, [`DEFAULT_HTTP_SEND`] will be used.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        next: Option<Arc<dyn HttpSend>>,
    ) -> Self {
        Self::with_credential(Credential::new(api_key, api_secret), next)
    }

    /// Create a new transport from a credential.
    ///
    /// If `next` is `None`, [`DEFAULT_HTTP_SEND`] will be used.
    pub fn with_credential(credential: Credential, next: Option<Arc<dyn HttpSend>>) -> Self {
        Self {
            signer: RequestSigner::new(credential),
            next: next.unwrap_or_else(|| DEFAULT_HTTP_SEND.clone()),
        }
    }

    /// Create a new transport from config.
    ///
    /// Fails with `ConfigInvalid` if the api key or secret is missing.
    pub fn from_config(config: &Config, next: Option<Arc<dyn HttpSend>>) -> Result<Self> {
        Ok(Self::with_credential(config.credential()?, next))
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.signer = self.signer.with_time(time);
        self
    }

    /// The credential used to sign requests.
    pub fn credential(&self) -> &Credential {
        self.signer.credential()
    }

    /// The executor signed requests are delegated to.
    pub fn next(&self) -> &Arc<dyn HttpSend> {
        &self.next
    }

    /// Build a signed copy of the request.
    ///
    /// The input is left untouched. Headers, method, uri and extensions are
    /// copied; the body buffer is shared with the input.
    pub fn sign(&self, req: &http::Request<Bytes>) -> Result<http::Request<Bytes>> {
        self.sign_owned(req.clone())
    }

    /// Sign a copy of the request and send it with the next executor.
    pub async fn send(&self, req: &http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = self.sign(req)?;
        self.next.http_send(req).await
    }

    fn sign_owned(&self, req: http::Request<Bytes>) -> Result<http::Request<Bytes>> {
        let (mut parts, body) = req.into_parts();
        self.signer.sign(&mut parts, !body.is_empty())?;
        Ok(http::Request::from_parts(parts, body))
    }
}

impl Debug for SigningTransport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningTransport")
            .field("signer", &self.signer)
            .field("next", &self.next)
            .finish()
    }
}

/// The caller gives up ownership of the request, so it is signed in place.
#[async_trait]
impl HttpSend for SigningTransport {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = self.sign_owned(req)?;
        self.next.http_send(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use cerberus_sign_core::{Context, Error, ErrorKind, NoopHttpSend};
    use http::header::CONTENT_TYPE;
    use pretty_assertions::assert_eq;
    use std::error::Error as _;
    use std::sync::Mutex;

    /// Records every request it receives and answers with a canned result.
    #[derive(Debug, Default)]
    struct MockHttpSend {
        requests: Mutex<Vec<http::Request<Bytes>>>,
        status: Option<http::StatusCode>,
        fail_with: Option<&'static str>,
    }

    impl MockHttpSend {
        fn last(&self) -> http::Request<Bytes> {
            self.requests
                .lock()
                .unwrap()
                .last()
                .cloned()
                .expect("next executor must be called")
        }

        fn count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl HttpSend for MockHttpSend {
        async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            self.requests.lock().unwrap().push(req);
            if let Some(msg) = self.fail_with {
                return Err(Error::unexpected(msg).with_source(anyhow::anyhow!("os error 104")));
            }

            Ok(http::Response::builder()
                .status(self.status.unwrap_or(http::StatusCode::OK))
                .body(Bytes::from_static(b"{}"))?)
        }
    }

    fn transport(mock: &Arc<MockHttpSend>) -> SigningTransport {
        let next: Arc<dyn HttpSend> = mock.clone();
        SigningTransport::new("testAPIKey", "testAPISecret", Some(next))
    }

    fn post(body: &'static str) -> http::Request<Bytes> {
        http::Request::post("http://example.com/with-body")
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap()
    }

    #[test]
    fn test_default_next_is_shared_default() {
        let t = SigningTransport::new("testKey", "testSecret", None);
        assert!(Arc::ptr_eq(t.next(), &DEFAULT_HTTP_SEND));
    }

    #[test]
    fn test_explicit_next_is_used() {
        let next: Arc<dyn HttpSend> = Arc::new(NoopHttpSend);
        let t = SigningTransport::new("testKey", "testSecret", Some(next.clone()));
        assert!(Arc::ptr_eq(t.next(), &next));
        assert!(!Arc::ptr_eq(t.next(), &DEFAULT_HTTP_SEND));
    }

    #[test]
    fn test_from_config() {
        let config = Config::new()
            .with_api_key("testKey")
            .with_api_secret("testSecret");
        let t = SigningTransport::from_config(&config, None).unwrap();
        assert_eq!(t.credential(), &Credential::new("testKey", "testSecret"));

        let err = SigningTransport::from_config(&Config::new(), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[tokio::test]
    async fn test_next_transport_called() {
        let mock = Arc::new(MockHttpSend::default());
        let req = http::Request::get("http://example.com")
            .body(Bytes::new())
            .unwrap();

        transport(&mock).send(&req).await.unwrap();
        assert_eq!(mock.count(), 1);
    }

    #[tokio::test]
    async fn test_caller_request_untouched() {
        let mock = Arc::new(MockHttpSend::default());
        let req = post(r#"{"key":"value"}"#);
        let headers_before = req.headers().clone();

        transport(&mock).send(&req).await.unwrap();

        assert_eq!(req.headers(), &headers_before);
        assert!(req.headers().get(X_SIGNATURE).is_none());
        assert!(req.headers().get(CONTENT_TYPE).is_none());
        assert_eq!(req.body(), &Bytes::from_static(br#"{"key":"value"}"#));

        let sent = mock.last();
        assert_eq!(sent.method(), req.method());
        assert_eq!(sent.uri(), req.uri());
        assert_eq!(sent.body(), req.body());
        assert_eq!(sent.headers()[CONTENT_TYPE], APPLICATION_JSON);
    }

    #[tokio::test]
    async fn test_extensions_are_carried() {
        #[derive(Clone, Debug, PartialEq)]
        struct Deadline(u64);

        let mock = Arc::new(MockHttpSend::default());
        let mut req = post("");
        req.extensions_mut().insert(Deadline(30));

        transport(&mock).send(&req).await.unwrap();

        assert_eq!(mock.last().extensions().get::<Deadline>(), Some(&Deadline(30)));
    }

    #[tokio::test]
    async fn test_fixed_time_signature() {
        let time = chrono::DateTime::from_timestamp(1_700_000_000, 0).expect("must be valid time");
        let mock = Arc::new(MockHttpSend::default());
        let t = transport(&mock).with_time(time);

        t.send(&post("")).await.unwrap();

        let sent = mock.last();
        assert_eq!(sent.headers()[X_TIMESTAMP], "1700000000");
        assert_eq!(
            sent.headers()[X_SIGNATURE],
            crate::sign_request::signature(t.credential(), "1700000000").as_str()
        );
    }

    #[tokio::test]
    async fn test_next_error_returned_unmodified() {
        let mock = Arc::new(MockHttpSend {
            fail_with: Some("connection reset by peer"),
            ..Default::default()
        });

        let err = transport(&mock).send(&post("")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert_eq!(err.message(), "connection reset by peer");
        assert_eq!(
            err.source().map(|e| e.to_string()),
            Some("os error 104".to_string())
        );
        assert_eq!(mock.count(), 1);
    }

    #[tokio::test]
    async fn test_non_success_status_passed_through() {
        let mock = Arc::new(MockHttpSend {
            status: Some(http::StatusCode::UNAUTHORIZED),
            ..Default::default()
        });

        let resp = transport(&mock).send(&post("")).await.unwrap();

        assert_eq!(resp.status(), http::StatusCode::UNAUTHORIZED);
        assert_eq!(resp.body(), &Bytes::from_static(b"{}"));
    }

    #[tokio::test]
    async fn test_invalid_api_key_does_not_reach_next() {
        let mock = Arc::new(MockHttpSend::default());
        let next: Arc<dyn HttpSend> = mock.clone();
        let t = SigningTransport::new("bad\r\nkey", "testAPISecret", Some(next));

        let err = t.send(&post("")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        assert_eq!(mock.count(), 0);
    }

    #[tokio::test]
    async fn test_transport_as_http_send() {
        let mock = Arc::new(MockHttpSend::default());
        let ctx = Context::new().with_http_send(transport(&mock));

        ctx.http_send(post(r#"{"data":[]}"#)).await.unwrap();

        let sent = mock.last();
        assert_eq!(sent.headers()[X_API_KEY], "testAPIKey");
        assert_eq!(sent.headers()[CONTENT_TYPE], APPLICATION_JSON);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let t = SigningTransport::new("ck_live_0123456789", "sk_live_abcdefghijklmnop", None);
        let printed = format!("{t:?}");

        assert!(!printed.contains("sk_live_abcdefghijklmnop"));
        assert!(printed.contains("ReqwestHttpSend"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_send_shares_request() {
        let mock = Arc::new(MockHttpSend::default());
        let t = Arc::new(transport(&mock));
        let req = Arc::new(post(r#"{"key":"value"}"#));

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let t = t.clone();
                let req = req.clone();
                tokio::spawn(async move { t.send(&req).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(mock.count(), 32);
        assert!(req.headers().is_empty());
        for sent in mock.requests.lock().unwrap().iter() {
            assert_eq!(sent.headers()[X_API_KEY], "testAPIKey");
            assert_eq!(sent.headers()[CONTENT_TYPE], APPLICATION_JSON);
        }
    }
}
