//! Entry point of the crate.

use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::channel::oneshot;
use futures::FutureExt;
use mapir_types::Coordinate;

use crate::config::{resolve_access_token, AccessToken};
use crate::endpoint::{
    Directions, Endpoint, FastReverseGeocode, ReverseGeocode, RouteRequest, Search, SearchResult,
    StaticMap, StaticMapRequest,
};
use crate::error::MapirError;
use crate::placemark::Placemark;
use crate::platform::{DefaultTransport, HttpTransport};
use crate::request::{ApiRequest, RequestBuilder, UserAgent};
use crate::task::{TaskHandle, TaskSlot, TaskState};

const STATUS_MESSAGE_LIMIT: usize = 256;

/// Convenience type to configure a [`Client`].
///
/// ```no_run
/// use std::time::Duration;
/// use mapir::{AccessToken, Client};
///
/// let client = Client::builder()
///     .with_access_token(AccessToken::new("my-api-key").unwrap())
///     .with_timeout(Duration::from_secs(5))
///     .with_app("courier", "1.4.2")
///     .build()
///     .unwrap();
/// ```
#[derive(Default)]
pub struct ClientBuilder {
    request_builder: RequestBuilder,
    user_agent: UserAgent,
    access_token: Option<AccessToken>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl ClientBuilder {
    /// Sets the API host. Defaults to `map.ir`.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.request_builder = self.request_builder.with_host(host);
        self
    }

    /// Sets the access token of the client.
    ///
    /// If not set, the token set with
    /// [`set_default_access_token`](crate::config::set_default_access_token) is used.
    pub fn with_access_token(mut self, access_token: AccessToken) -> Self {
        self.access_token = Some(access_token);
        self
    }

    /// Sets the timeout of every request. Defaults to 10 seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_builder = self.request_builder.with_timeout(timeout);
        self
    }

    /// Adds the name and version of the application to the `User-Agent` header.
    pub fn with_app(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.user_agent = self.user_agent.with_app(name, version);
        self
    }

    /// Sets the transport used to send requests. By default requests are sent with
    /// [`reqwest`].
    pub fn with_transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Creates the client.
    ///
    /// A missing access token is not an error here: it is reported when an operation is started,
    /// since the default token may be set later.
    pub fn build(self) -> Result<Client, MapirError> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(DefaultTransport::new()?),
        };

        Ok(Client {
            request_builder: self.request_builder.with_user_agent(self.user_agent),
            access_token: self.access_token,
            transport,
            tasks: TaskSlot::new(),
        })
    }
}

/// Client of the map.ir API.
///
/// A client runs one operation at a time: starting an operation cancels the one that is still
/// in progress. Use several clients for requests that must run concurrently.
pub struct Client {
    request_builder: RequestBuilder,
    access_token: Option<AccessToken>,
    transport: Arc<dyn HttpTransport>,
    tasks: TaskSlot,
}

impl Client {
    /// Creates a builder with default settings.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Builds the request the client would send for the endpoint.
    pub fn request_for<E: Endpoint>(&self, endpoint: &E) -> Result<ApiRequest, MapirError> {
        let access_token = resolve_access_token(self.access_token.as_ref());
        self.request_builder.build(
            access_token.as_ref(),
            endpoint.method(),
            &endpoint.path(),
            &endpoint.query(),
        )
    }

    /// Starts the operation and calls `on_complete` with its result.
    ///
    /// Configuration and url errors are returned immediately and leave the running operation
    /// intact. Otherwise the running operation is cancelled and the new one is started.
    /// `on_complete` is called exactly once, unless the operation is cancelled, in which case it
    /// is never called.
    pub fn perform_with<E, C>(&self, endpoint: E, on_complete: C) -> Result<TaskHandle, MapirError>
    where
        E: Endpoint,
        C: FnOnce(Result<E::Output, MapirError>) + Send + 'static,
    {
        let request = self.request_for(&endpoint)?;
        log::info!(
            "Starting {} request to {}",
            endpoint.kind(),
            request.url.path()
        );

        let operation = execute(self.transport.clone(), endpoint, request);
        Ok(self.tasks.perform(operation, on_complete))
    }

    /// Starts the operation and returns a future resolving to its result.
    ///
    /// If the operation is cancelled, the future resolves to [`MapirError::Cancelled`].
    pub fn perform<E: Endpoint>(&self, endpoint: E) -> Result<Pending<E::Output>, MapirError> {
        let (sender, receiver) = oneshot::channel();
        let task = self.perform_with(endpoint, move |result| {
            // The caller may have dropped the future.
            let _ = sender.send(result);
        })?;

        Ok(Pending { task, receiver })
    }

    /// Finds the address of the location.
    pub fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Pending<Placemark>, MapirError> {
        self.perform(ReverseGeocode::new(coordinate))
    }

    /// Finds the address of the location using the lower latency endpoint.
    pub fn fast_reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<Pending<Placemark>, MapirError> {
        self.perform(FastReverseGeocode::new(coordinate))
    }

    /// Finds places matching the text, optionally only in the given city.
    pub fn search(
        &self,
        text: impl Into<String>,
        city: Option<&str>,
    ) -> Result<Pending<SearchResult>, MapirError> {
        let mut search = Search::new(text);
        if let Some(city) = city {
            search = search.in_city(city);
        }

        self.perform(search)
    }

    /// Finds a route.
    pub fn route(&self, request: RouteRequest) -> Result<Pending<Directions>, MapirError> {
        self.perform(request)
    }

    /// Downloads a static map image.
    pub fn static_map(&self, request: StaticMapRequest) -> Result<Pending<StaticMap>, MapirError> {
        self.perform(request)
    }

    /// Cancels the running operation. Returns false if there was nothing to cancel.
    pub fn cancel(&self) -> bool {
        self.tasks.cancel()
    }

    /// Returns true if an operation is in progress.
    pub fn is_active(&self) -> bool {
        self.tasks.is_active()
    }

    /// State of the last started operation.
    pub fn state(&self) -> TaskState {
        self.tasks.state()
    }
}

impl Debug for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("request_builder", &self.request_builder)
            .field("access_token", &self.access_token)
            .field("tasks", &self.tasks)
            .finish_non_exhaustive()
    }
}

async fn execute<E: Endpoint>(
    transport: Arc<dyn HttpTransport>,
    endpoint: E,
    request: ApiRequest,
) -> Result<E::Output, MapirError> {
    let response = transport.execute(request).await?;
    if !response.is_success() {
        let message = String::from_utf8_lossy(&response.body)
            .chars()
            .take(STATUS_MESSAGE_LIMIT)
            .collect();
        log::debug!(
            "{} request failed with status {}",
            endpoint.kind(),
            response.status
        );

        return Err(MapirError::Status {
            status: response.status,
            message,
        });
    }

    endpoint.decode(response.body)
}

/// Result of an operation started with [`Client::perform`].
pub struct Pending<T> {
    task: TaskHandle,
    receiver: oneshot::Receiver<Result<T, MapirError>>,
}

impl<T> Pending<T> {
    /// Handle of the task running the operation.
    pub fn task(&self) -> &TaskHandle {
        &self.task
    }

    /// Cancels the operation. The future then resolves to [`MapirError::Cancelled`].
    pub fn cancel(&self) -> bool {
        self.task.cancel()
    }
}

impl<T> Future for Pending<T> {
    type Output = Result<T, MapirError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.receiver
            .poll_unpin(cx)
            .map(|result| result.unwrap_or(Err(MapirError::Cancelled)))
    }
}

impl<T> Debug for Pending<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pending")
            .field("task", &self.task)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;
    use reqwest::header::USER_AGENT;
    use tokio_test::{assert_pending, assert_ready};

    use super::*;
    use crate::endpoint::{Marker, RouteProfile};
    use crate::request::API_KEY_HEADER;
    use crate::tests::{init_logger, MockTransport};

    const REVERSE_RESPONSE: &str = r#"{
        "address": "تهران، میدان ولیعصر",
        "city": "تهران",
        "geom": {"type": "Point", "coordinates": ["51.422456", "35.732590"]}
    }"#;

    const FAST_REVERSE_RESPONSE: &str = r#"{
        "address": "تهران، میدان انقلاب",
        "geom": {"type": "Point", "coordinates": [51.391, 35.701]}
    }"#;

    fn tehran() -> Coordinate {
        Coordinate::new(35.73259, 51.422456).unwrap()
    }

    fn client(transport: &Arc<MockTransport>) -> Client {
        init_logger();
        Client::builder()
            .with_access_token(AccessToken::new("test-token").unwrap())
            .with_app("tests", "0.1")
            .with_transport(transport.clone())
            .build()
            .unwrap()
    }

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn missing_token_fails_before_sending() {
        let transport = MockTransport::new();
        let client = Client::builder()
            .with_transport(transport.clone())
            .build()
            .unwrap();

        assert_matches!(
            client.reverse_geocode(tehran()),
            Err(MapirError::Configuration(_))
        );
        assert_eq!(transport.request_count(), 0);
        assert_eq!(client.state(), TaskState::Idle);
    }

    #[tokio::test]
    async fn invalid_host_fails_before_sending() {
        let transport = MockTransport::new();
        let client = Client::builder()
            .with_access_token(AccessToken::new("test-token").unwrap())
            .with_host("map ir")
            .with_transport(transport.clone())
            .build()
            .unwrap();

        assert_matches!(
            client.reverse_geocode(tehran()),
            Err(MapirError::MalformedUrl(_))
        );
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn reverse_geocode() {
        let transport = MockTransport::new();
        transport.respond(200, REVERSE_RESPONSE);
        let client = client(&transport);

        let placemark = client.reverse_geocode(tehran()).unwrap().await.unwrap();
        assert_eq!(placemark.address(), "تهران، میدان ولیعصر");
        assert_eq!(placemark.coordinate(), Some(tehran()));
        assert_eq!(client.state(), TaskState::Completed);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url.as_str(),
            "https://map.ir/reverse?lat=35.732590&lon=51.422456"
        );
        assert_eq!(requests[0].headers[API_KEY_HEADER], "test-token");
        assert!(requests[0].headers[USER_AGENT]
            .to_str()
            .unwrap()
            .starts_with("tests/0.1 mapir/"));
    }

    #[tokio::test]
    async fn new_operation_cancels_previous_one() {
        let transport = MockTransport::new();
        let _gate = transport.respond_gated(200, REVERSE_RESPONSE);
        transport.respond(200, FAST_REVERSE_RESPONSE);
        let client = client(&transport);

        let first = client.reverse_geocode(tehran()).unwrap();
        tokio::task::yield_now().await;
        assert!(first.task().is_active());

        let second = client.fast_reverse_geocode(tehran()).unwrap();
        assert!(!first.task().is_active());
        assert!(second.task().is_active());

        assert_matches!(first.await, Err(MapirError::Cancelled));
        let placemark = second.await.unwrap();
        assert_eq!(placemark.address(), "تهران، میدان انقلاب");

        let paths: Vec<_> = transport
            .requests()
            .iter()
            .map(|r| r.url.path().to_string())
            .collect();
        assert_eq!(paths, vec!["/reverse", "/fast-reverse"]);
    }

    #[tokio::test]
    async fn cancel_running_operation() {
        let transport = MockTransport::new();
        let gate = transport.respond_gated(200, REVERSE_RESPONSE);
        let client = client(&transport);

        let pending = client.reverse_geocode(tehran()).unwrap();
        tokio::task::yield_now().await;
        assert!(client.is_active());

        assert!(client.cancel());
        assert!(!client.is_active());
        assert!(!client.cancel());

        let _ = gate.send(());
        assert_matches!(pending.await, Err(MapirError::Cancelled));
        assert_eq!(client.state(), TaskState::Completed);
    }

    #[tokio::test]
    async fn pending_resolves_when_response_arrives() {
        let transport = MockTransport::new();
        let gate = transport.respond_gated(200, REVERSE_RESPONSE);
        let client = client(&transport);

        let mut pending = tokio_test::task::spawn(client.reverse_geocode(tehran()).unwrap());
        assert_pending!(pending.poll());
        settle().await;
        assert_pending!(pending.poll());
        assert!(client.is_active());

        let _ = gate.send(());
        settle().await;

        assert!(pending.is_woken());
        let placemark = assert_ready!(pending.poll()).unwrap();
        assert_eq!(placemark.city(), Some("تهران"));
    }

    #[tokio::test]
    async fn callback_is_not_called_after_cancel() {
        let transport = MockTransport::new();
        let gate = transport.respond_gated(200, REVERSE_RESPONSE);
        let client = client(&transport);

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let task = client
            .perform_with(ReverseGeocode::new(tehran()), move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        tokio::task::yield_now().await;

        assert!(task.cancel());
        let _ = gate.send(());
        settle().await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(task.state(), TaskState::Completed);
    }

    #[tokio::test]
    async fn callback_is_called_once() {
        let transport = MockTransport::new();
        transport.respond(200, REVERSE_RESPONSE);
        let client = client(&transport);

        let (sender, receiver) = oneshot::channel();
        client
            .perform_with(FastReverseGeocode::new(tehran()), move |result| {
                let _ = sender.send(result);
            })
            .unwrap();

        let placemark = receiver.await.unwrap().unwrap();
        assert_eq!(placemark.city(), Some("تهران"));
    }

    #[tokio::test]
    async fn error_status() {
        let transport = MockTransport::new();
        transport.respond(401, "invalid api key");
        let client = client(&transport);

        let result = client.reverse_geocode(tehran()).unwrap().await;
        assert_matches!(result, Err(MapirError::Status { status: 401, message }) if message == "invalid api key");
    }

    #[tokio::test]
    async fn malformed_body() {
        let transport = MockTransport::new();
        transport.respond(200, "<html>Service unavailable</html>");
        let client = client(&transport);

        let result = client.reverse_geocode(tehran()).unwrap().await;
        assert_matches!(result, Err(MapirError::Decode(_)));
    }

    #[tokio::test]
    async fn transport_failure() {
        let transport = MockTransport::new();
        transport.fail(MapirError::Transport("operation timed out".into()));
        let client = client(&transport);

        let result = client.reverse_geocode(tehran()).unwrap().await;
        assert_matches!(result, Err(MapirError::Transport(err)) if err.to_string() == "operation timed out");
    }

    #[tokio::test]
    async fn search_in_city() {
        let transport = MockTransport::new();
        transport.respond(
            200,
            r#"{"odata.count": 1, "value": [{"title": "میدان آزادی"}]}"#,
        );
        let client = client(&transport);

        let result = client
            .search("آزادی", Some("تهران"))
            .unwrap()
            .await
            .unwrap();
        assert_eq!(result.items[0].title.as_deref(), Some("میدان آزادی"));

        let url = &transport.requests()[0].url;
        assert_eq!(url.path(), "/search/v2");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("text".to_string(), "آزادی".to_string()),
                ("$filter".to_string(), "city eq تهران".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn route_and_static_map() {
        let transport = MockTransport::new();
        transport.respond(
            200,
            r#"{"code": "Ok", "routes": [{"distance": 812.5, "duration": 95}], "waypoints": []}"#,
        );
        transport.respond(200, "\u{89}PNG");
        let client = client(&transport);

        let destination = Coordinate::new(35.701, 51.391).unwrap();
        let directions = client
            .route(RouteRequest::new(tehran(), destination).with_profile(RouteProfile::Bicycle))
            .unwrap()
            .await
            .unwrap();
        assert_eq!(directions.routes[0].distance, Some(812.5));

        let image = client
            .static_map(StaticMapRequest::new(300, 200, 14).with_marker(Marker::new(tehran(), "a")))
            .unwrap()
            .await
            .unwrap();
        assert!(!image.is_empty());

        let requests = transport.requests();
        assert_eq!(
            requests[0].url.path(),
            "/routes/bicycle/v1/driving/51.422456,35.732590;51.391000,35.701000"
        );
        assert_eq!(requests[1].url.path(), "/static");
    }
}
