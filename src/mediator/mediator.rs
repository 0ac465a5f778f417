//! Mediator - request handler registry, validation pipeline and dispatch.
//!
//! `Mediator<S>` holds a store, one handler per request type and any number
//! of validators per request type. Sending a request runs its validators
//! first; the handler only runs when they all pass.
//!
//! ## Example
//!
//! ```ignore
//! use games_cqrs::{InMemoryStore, Mediator};
//!
//! let mediator = Mediator::new(InMemoryStore::new())
//!     .handler(|req: Ping, _ctx| Ok(Pong))
//!     .validator(|req: &Ping| Vec::new());
//!
//! let pong = mediator.send(Ping)?;
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;

use serde_json::{json, Value};
use tracing::{debug, warn};

use super::context::{Cancellation, Context};
use super::error::DispatchError;
use super::request::{CommandRequest, CommandResponse, Request};
use crate::validation::{ValidationError, ValidationFailure, Validator};

type HandlerFn<Q, S> = Box<
    dyn Fn(Q, &Context<'_, S>) -> Result<<Q as Request>::Response, DispatchError> + Send + Sync,
>;

type ValidatorList<Q> = Vec<Box<dyn Validator<Q>>>;

type JsonRoute<S> = fn(&Mediator<S>, Value, &Cancellation) -> Result<Value, DispatchError>;

/// Routes typed requests to handlers.
///
/// Generic over `S`, the store type. Handlers receive a `Context<S>` and
/// reach the store via `ctx.store()`.
pub struct Mediator<S> {
    store: S,
    handlers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    validators: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    routes: HashMap<&'static str, JsonRoute<S>>,
}

impl<S: Send + Sync + 'static> Mediator<S> {
    /// Create a mediator over the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            handlers: HashMap::new(),
            validators: HashMap::new(),
            routes: HashMap::new(),
        }
    }

    /// Register the handler for `Q`, replacing any previous one.
    ///
    /// Builder style: returns `self` for chaining.
    pub fn handler<Q, F>(mut self, handler: F) -> Self
    where
        Q: Request,
        F: Fn(Q, &Context<'_, S>) -> Result<Q::Response, DispatchError> + Send + Sync + 'static,
    {
        let boxed: HandlerFn<Q, S> = Box::new(handler);
        self.handlers.insert(TypeId::of::<Q>(), Box::new(boxed));
        self.routes.insert(Q::NAME, route::<Q, S>);
        self
    }

    /// Register a validator for `Q`. Validators run in registration order.
    pub fn validator<Q, V>(mut self, validator: V) -> Self
    where
        Q: Request,
        V: Validator<Q> + 'static,
    {
        let entry = self
            .validators
            .entry(TypeId::of::<Q>())
            .or_insert_with(|| Box::new(ValidatorList::<Q>::new()) as Box<dyn Any + Send + Sync>);
        if let Some(list) = entry.downcast_mut::<ValidatorList<Q>>() {
            list.push(Box::new(validator));
        }
        self
    }

    /// Send a request that cannot be cancelled.
    pub fn send<Q: Request>(&self, request: Q) -> Result<Q::Response, DispatchError> {
        self.send_with(request, &Cancellation::new())
    }

    /// Send a request, validating it first.
    ///
    /// Fails with `Validation` carrying every failure when any validator
    /// objects; the handler then never runs. Otherwise the handler runs
    /// exactly once.
    pub fn send_with<Q: Request>(
        &self,
        request: Q,
        cancellation: &Cancellation,
    ) -> Result<Q::Response, DispatchError> {
        let handler = self
            .handlers
            .get(&TypeId::of::<Q>())
            .and_then(|h| h.downcast_ref::<HandlerFn<Q, S>>())
            .ok_or_else(|| DispatchError::UnknownRequest(Q::NAME.to_string()))?;

        let failures = self.validate(&request);
        if !failures.is_empty() {
            warn!(request = Q::NAME, failures = failures.len(), "request rejected by validators");
            return Err(ValidationError::new(failures).into());
        }

        debug!(request = Q::NAME, "dispatching");
        let ctx = Context::new(Q::NAME, &self.store, cancellation);
        handler(request, &ctx)
    }

    /// Run every validator registered for `Q` and concatenate the failures.
    pub fn validate<Q: Request>(&self, request: &Q) -> Vec<ValidationFailure> {
        self.validators
            .get(&TypeId::of::<Q>())
            .and_then(|v| v.downcast_ref::<ValidatorList<Q>>())
            .map(|list| list.iter().flat_map(|v| v.validate(request)).collect())
            .unwrap_or_default()
    }

    /// Dispatch a request by name with a JSON payload.
    pub fn dispatch(&self, name: &str, input: Value) -> Result<Value, DispatchError> {
        self.dispatch_with(name, input, &Cancellation::new())
    }

    /// Dispatch by name, honouring `cancellation`.
    pub fn dispatch_with(
        &self,
        name: &str,
        input: Value,
        cancellation: &Cancellation,
    ) -> Result<Value, DispatchError> {
        let route = self
            .routes
            .get(name)
            .ok_or_else(|| DispatchError::UnknownRequest(name.to_string()))?;
        route(self, input, cancellation)
    }

    /// Dispatch a `CommandRequest`, returning a `CommandResponse`.
    pub fn dispatch_request(&self, request: &CommandRequest) -> CommandResponse {
        match self.dispatch(&request.request, request.input.clone()) {
            Ok(body) => CommandResponse { status: 200, body },
            Err(e) => CommandResponse {
                status: e.status_code(),
                body: error_body(&e),
            },
        }
    }

    /// List registered request names.
    pub fn requests(&self) -> Vec<&'static str> {
        self.routes.keys().copied().collect()
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

fn route<Q, S>(
    mediator: &Mediator<S>,
    input: Value,
    cancellation: &Cancellation,
) -> Result<Value, DispatchError>
where
    Q: Request,
    S: Send + Sync + 'static,
{
    let request: Q = serde_json::from_value(input)?;
    let response = mediator.send_with(request, cancellation)?;
    serde_json::to_value(response).map_err(|e| DispatchError::EncodeFailed(e.to_string()))
}

/// JSON error body. Validation errors also carry their failure list.
pub(crate) fn error_body(err: &DispatchError) -> Value {
    match err {
        DispatchError::Validation(v) => json!({
            "error": err.to_string(),
            "failures": v.failures(),
        }),
        _ => json!({ "error": err.to_string() }),
    }
}
