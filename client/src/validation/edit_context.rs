//! Per-form validation hub.
//!
//! DESIGN
//! ======
//! An `EditContext` owns the event hooks a form raises (validation requested,
//! field changed, validation state changed) and aggregates messages from every
//! `ValidationMessageStore` bound to it. Stores are held weakly so dropping a
//! validator drops its messages from the aggregate.
//!
//! Handlers run outside the internal locks, in registration order, so a
//! handler may freely touch stores or the context itself.

#[cfg(test)]
#[path = "edit_context_test.rs"]
mod edit_context_test;

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use super::message_store::StoreMessages;
use super::{FieldIdentifier, ModelRef, lock};

type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;
type HandlerList<E> = Mutex<Vec<(u64, Handler<E>)>>;

#[derive(Clone, Copy, Debug)]
enum Event {
    ValidationRequested,
    FieldChanged,
    ValidationStateChanged,
}

struct Inner {
    model: ModelRef,
    next_handler_id: AtomicU64,
    modified: Mutex<HashSet<FieldIdentifier>>,
    stores: Mutex<Vec<Weak<StoreMessages>>>,
    validation_requested: HandlerList<()>,
    field_changed: HandlerList<FieldIdentifier>,
    validation_state_changed: HandlerList<()>,
}

impl Inner {
    fn subscribe<E>(self: &Arc<Self>, event: Event, list: &HandlerList<E>, handler: Handler<E>) -> Subscription {
        let id = self.next_handler_id.fetch_add(1, Ordering::Relaxed);
        lock(list).push((id, handler));
        Subscription { context: Arc::downgrade(self), event, id }
    }

    fn unsubscribe(&self, event: Event, id: u64) {
        match event {
            Event::ValidationRequested => remove(&self.validation_requested, id),
            Event::FieldChanged => remove(&self.field_changed, id),
            Event::ValidationStateChanged => remove(&self.validation_state_changed, id),
        }
    }

    fn live_stores(&self) -> Vec<Arc<StoreMessages>> {
        let mut stores = lock(&self.stores);
        stores.retain(|weak| weak.strong_count() > 0);
        stores.iter().filter_map(Weak::upgrade).collect()
    }
}

fn remove<E>(list: &HandlerList<E>, id: u64) {
    lock(list).retain(|(handler_id, _)| *handler_id != id);
}

fn unit_handler(handler: impl Fn() + Send + Sync + 'static) -> Handler<()> {
    Arc::new(move |_: &()| handler())
}

fn raise<E>(list: &HandlerList<E>, event: &E) {
    let handlers: Vec<Handler<E>> = lock(list).iter().map(|(_, h)| Arc::clone(h)).collect();
    for handler in handlers {
        handler(event);
    }
}

/// Validation state and event hooks for one form-editing session.
///
/// Cloning is cheap; all clones share the same state.
#[derive(Clone)]
pub struct EditContext {
    inner: Arc<Inner>,
}

impl EditContext {
    #[must_use]
    pub fn new(model: ModelRef) -> Self {
        Self {
            inner: Arc::new(Inner {
                model,
                next_handler_id: AtomicU64::new(0),
                modified: Mutex::new(HashSet::new()),
                stores: Mutex::new(Vec::new()),
                validation_requested: Mutex::new(Vec::new()),
                field_changed: Mutex::new(Vec::new()),
                validation_state_changed: Mutex::new(Vec::new()),
            }),
        }
    }

    #[must_use]
    pub fn model(&self) -> ModelRef {
        self.inner.model
    }

    /// Identifier for `name` on this context's model.
    #[must_use]
    pub fn field(&self, name: &str) -> FieldIdentifier {
        FieldIdentifier::new(self.inner.model, name)
    }

    pub fn on_validation_requested(&self, handler: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.inner
            .subscribe(Event::ValidationRequested, &self.inner.validation_requested, unit_handler(handler))
    }

    pub fn on_field_changed(&self, handler: impl Fn(&FieldIdentifier) + Send + Sync + 'static) -> Subscription {
        self.inner.subscribe(Event::FieldChanged, &self.inner.field_changed, Arc::new(handler))
    }

    pub fn on_validation_state_changed(&self, handler: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.inner.subscribe(
            Event::ValidationStateChanged,
            &self.inner.validation_state_changed,
            unit_handler(handler),
        )
    }

    /// Raise validation-requested, then report whether the form is free of
    /// messages.
    pub fn validate(&self) -> bool {
        raise(&self.inner.validation_requested, &());
        self.validation_messages().is_empty()
    }

    /// Mark `field` as edited and raise field-changed for it.
    pub fn notify_field_changed(&self, field: &FieldIdentifier) {
        lock(&self.inner.modified).insert(field.clone());
        raise(&self.inner.field_changed, field);
    }

    pub fn notify_validation_state_changed(&self) {
        raise(&self.inner.validation_state_changed, &());
    }

    #[must_use]
    pub fn is_modified(&self, field: &FieldIdentifier) -> bool {
        lock(&self.inner.modified).contains(field)
    }

    /// Every message from every live store, ordered by store then field.
    #[must_use]
    pub fn validation_messages(&self) -> Vec<String> {
        self.inner
            .live_stores()
            .iter()
            .flat_map(|store| lock(store).values().flatten().cloned().collect::<Vec<_>>())
            .collect()
    }

    #[must_use]
    pub fn messages_for(&self, field: &FieldIdentifier) -> Vec<String> {
        self.inner
            .live_stores()
            .iter()
            .flat_map(|store| lock(store).get(field).cloned().unwrap_or_default())
            .collect()
    }

    pub(crate) fn register_store(&self, store: &Arc<StoreMessages>) {
        let mut stores = lock(&self.inner.stores);
        stores.retain(|weak| weak.strong_count() > 0);
        stores.push(Arc::downgrade(store));
    }

    #[cfg(test)]
    pub(crate) fn handler_count(&self) -> usize {
        lock(&self.inner.validation_requested).len()
            + lock(&self.inner.field_changed).len()
            + lock(&self.inner.validation_state_changed).len()
    }
}

impl std::fmt::Debug for EditContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditContext").field("model", &self.inner.model).finish_non_exhaustive()
    }
}

/// Keeps one event handler registered. Dropping it, or calling
/// [`Subscription::cancel`], removes the handler from its context.
#[must_use = "dropping a Subscription immediately unregisters its handler"]
pub struct Subscription {
    context: Weak<Inner>,
    event: Event,
    id: u64,
}

impl Subscription {
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.context.upgrade() {
            inner.unsubscribe(self.event, self.id);
        }
    }
}
