//! # Mock Framework & Testing Guide
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of expectations instead of a running actor. Code that only
//! sees the client cannot tell the difference, which makes it the tool of choice for
//! testing orchestration logic that sits *around* stores.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None, canned replies | Real records |
//! | **Ordering checks** | Every request must match the next expectation | n/a |
//! | **Error injection** | `return_err(..)` | Needs crafted state |
//! | **Use case** | Logic around the client | The entity itself, full flows |
//!
//! ## Testing Patterns
//!
//! 1. **Pure mock**: every collaborator is a `MockClient`. Fast and fully deterministic.
//! 2. **Single actor**: spawn one `ResourceActor` and drive it through its client.
//! 3. **Actor + mocks**: a real store for the record under test, mocks for the rest.
//! 4. **Full system**: every store is a real actor.
//!
//! ```rust,ignore
//! let mut customers = MockClient::<Customer>::new();
//! customers.expect_get(customer_id).return_ok(None);
//!
//! let client = CustomerClient::new(customers.client());
//! assert!(client.find_by_id(&customer_id).await?.is_none());
//!
//! customers.verify(); // every expectation consumed, no unexpected request
//! ```
//!
//! Requests that do not match the next expectation (wrong kind, wrong id, or no
//! expectation left) are recorded and their reply channel is dropped, so the caller
//! sees [`FrameworkError::ActorDropped`]. [`MockClient::verify`] then fails the test.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATIONS
// =============================================================================

/// An expected request together with the reply to send back.
enum Expectation<T: ActorEntity> {
    Create {
        response: Result<T, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    GetMany {
        response: Result<Vec<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    UpdateMany {
        response: Result<Vec<T>, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    ActionMany {
        response: Result<Vec<T::ActionResult>, FrameworkError>,
    },
}

/// Shared state between the test and the background responder.
struct MockState<T: ActorEntity> {
    expectations: VecDeque<Expectation<T>>,
    failures: Vec<String>,
}

type Shared<T> = Arc<Mutex<MockState<T>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in the order they were declared.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    state: Shared<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a
    /// Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let state: Shared<T> = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            failures: Vec::new(),
        }));
        let responder_state = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut state = match responder_state.lock() {
                    Ok(state) => state,
                    Err(poisoned) => poisoned.into_inner(),
                };
                let expectation = state.expectations.pop_front();
                if let Err(failure) = answer(request, expectation) {
                    state.failures.push(failure);
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        self.lock().expectations.push_back(expectation);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState<T>> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Expects a `create` request.
    pub fn expect_create(&mut self) -> Reply<'_, T, T> {
        Reply::new(self, |response| Expectation::Create { response })
    }

    /// Expects a `get` request for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> Reply<'_, T, Option<T>> {
        Reply::new(self, move |response| Expectation::Get { id, response })
    }

    /// Expects a `get_many` request.
    pub fn expect_get_many(&mut self) -> Reply<'_, T, Vec<T>> {
        Reply::new(self, |response| Expectation::GetMany { response })
    }

    /// Expects a `list` request.
    pub fn expect_list(&mut self) -> Reply<'_, T, Vec<T>> {
        Reply::new(self, |response| Expectation::List { response })
    }

    /// Expects an `update` request for `id`.
    pub fn expect_update(&mut self, id: T::Id) -> Reply<'_, T, T> {
        Reply::new(self, move |response| Expectation::Update { id, response })
    }

    /// Expects an `update_many` request.
    pub fn expect_update_many(&mut self) -> Reply<'_, T, Vec<T>> {
        Reply::new(self, |response| Expectation::UpdateMany { response })
    }

    /// Expects a `delete` request for `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> Reply<'_, T, ()> {
        Reply::new(self, move |response| Expectation::Delete { id, response })
    }

    /// Expects a `perform_action` request for `id`.
    pub fn expect_action(&mut self, id: T::Id) -> Reply<'_, T, T::ActionResult> {
        Reply::new(self, move |response| Expectation::Action { id, response })
    }

    /// Expects a `perform_actions` request.
    pub fn expect_actions(&mut self) -> Reply<'_, T, Vec<T::ActionResult>> {
        Reply::new(self, |response| Expectation::ActionMany { response })
    }

    /// Panics unless every expectation was consumed and no request went unmatched.
    pub fn verify(&self) {
        let state = self.lock();
        if !state.failures.is_empty() {
            panic!("Unexpected requests: {:?}", state.failures);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

/// Builder finishing an expectation with its reply.
pub struct Reply<'a, T: ActorEntity, R> {
    mock: &'a MockClient<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a>,
}

impl<'a, T: ActorEntity, R> Reply<'a, T, R> {
    fn new(
        mock: &'a MockClient<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a,
    ) -> Self {
        Self {
            mock,
            build: Box::new(build),
        }
    }

    /// Replies with a successful result.
    pub fn return_ok(self, value: R) {
        self.mock.push((self.build)(Ok(value)));
    }

    /// Replies with an error.
    pub fn return_err(self, error: FrameworkError) {
        self.mock.push((self.build)(Err(error)));
    }
}

/// Sends the canned reply when the request matches the expectation.
fn answer<T: ActorEntity>(
    request: ResourceRequest<T>,
    expectation: Option<Expectation<T>>,
) -> Result<(), String> {
    fn reply<R>(respond_to: Response<R>, response: Result<R, FrameworkError>) -> Result<(), String> {
        let _ = respond_to.send(response);
        Ok(())
    }

    fn check_id<I: PartialEq + std::fmt::Debug>(
        kind: &str,
        expected: &I,
        got: &I,
    ) -> Result<(), String> {
        if expected == got {
            Ok(())
        } else {
            Err(format!("{kind}: expected id {expected:?}, got {got:?}"))
        }
    }

    match (request, expectation) {
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            reply(respond_to, response)
        }
        (
            ResourceRequest::Get { id, respond_to },
            Some(Expectation::Get {
                id: expected,
                response,
            }),
        ) => {
            check_id("Get", &expected, &id)?;
            reply(respond_to, response)
        }
        (ResourceRequest::GetMany { respond_to, .. }, Some(Expectation::GetMany { response })) => {
            reply(respond_to, response)
        }
        (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
            reply(respond_to, response)
        }
        (
            ResourceRequest::Update { id, respond_to, .. },
            Some(Expectation::Update {
                id: expected,
                response,
            }),
        ) => {
            check_id("Update", &expected, &id)?;
            reply(respond_to, response)
        }
        (
            ResourceRequest::UpdateMany { respond_to, .. },
            Some(Expectation::UpdateMany { response }),
        ) => reply(respond_to, response),
        (
            ResourceRequest::Delete { id, respond_to },
            Some(Expectation::Delete {
                id: expected,
                response,
            }),
        ) => {
            check_id("Delete", &expected, &id)?;
            reply(respond_to, response)
        }
        (
            ResourceRequest::Action { id, respond_to, .. },
            Some(Expectation::Action {
                id: expected,
                response,
            }),
        ) => {
            check_id("Action", &expected, &id)?;
            reply(respond_to, response)
        }
        (
            ResourceRequest::ActionMany { respond_to, .. },
            Some(Expectation::ActionMany { response }),
        ) => reply(respond_to, response),
        (request, None) => Err(format!("no expectation left for {}", describe(&request))),
        (request, Some(_)) => Err(format!(
            "{} did not match the next expectation",
            describe(&request)
        )),
    }
}

fn describe<T: ActorEntity>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Create { params, .. } => format!("Create {params:?}"),
        ResourceRequest::Get { id, .. } => format!("Get {id}"),
        ResourceRequest::GetMany { ids, .. } => format!("GetMany {ids:?}"),
        ResourceRequest::List { .. } => "List".to_string(),
        ResourceRequest::Update { id, .. } => format!("Update {id}"),
        ResourceRequest::UpdateMany { updates, .. } => format!("UpdateMany {updates:?}"),
        ResourceRequest::Delete { id, .. } => format!("Delete {id}"),
        ResourceRequest::Action { id, action, .. } => format!("Action {id} {action:?}"),
        ResourceRequest::ActionMany { actions, .. } => format!("ActionMany {actions:?}"),
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver the test controls.
///
/// Use this when a test needs to inspect the request payload itself (e.g. the exact
/// quantities in a batch update) before replying.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is a `GetMany`.
pub async fn expect_get_many<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Vec<T::Id>, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::GetMany { ids, respond_to }) => Some((ids, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is an `UpdateMany`.
pub async fn expect_update_many<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Vec<(T::Id, T::Update)>, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::UpdateMany {
            updates,
            respond_to,
        }) => Some((updates, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is an `ActionMany`.
pub async fn expect_action_many<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Vec<(T::Id, T::Action)>, Response<Vec<T::ActionResult>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::ActionMany {
            actions,
            respond_to,
        }) => Some((actions, respond_to)),
        _ => None,
    }
}
