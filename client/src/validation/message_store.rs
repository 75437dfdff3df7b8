#[cfg(test)]
#[path = "message_store_test.rs"]
mod message_store_test;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::{EditContext, FieldIdentifier, lock};

pub(crate) type StoreMessages = Mutex<BTreeMap<FieldIdentifier, Vec<String>>>;

/// Pending validation messages contributed by one source, bound to one
/// [`EditContext`].
///
/// Clones share the same messages. The context only holds the store weakly:
/// once every clone is dropped its messages stop appearing in
/// [`EditContext::validation_messages`].
#[derive(Clone, Debug)]
pub struct ValidationMessageStore {
    messages: Arc<StoreMessages>,
}

impl ValidationMessageStore {
    #[must_use]
    pub fn new(edit_context: &EditContext) -> Self {
        let messages = Arc::new(Mutex::new(BTreeMap::new()));
        edit_context.register_store(&messages);
        Self { messages }
    }

    pub fn add(&self, field: &FieldIdentifier, message: impl Into<String>) {
        lock(&self.messages).entry(field.clone()).or_default().push(message.into());
    }

    pub fn add_range<I, S>(&self, field: &FieldIdentifier, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        if messages.is_empty() {
            return;
        }
        lock(&self.messages).entry(field.clone()).or_default().extend(messages);
    }

    pub fn clear(&self) {
        lock(&self.messages).clear();
    }

    pub fn clear_field(&self, field: &FieldIdentifier) {
        lock(&self.messages).remove(field);
    }

    #[must_use]
    pub fn messages_for(&self, field: &FieldIdentifier) -> Vec<String> {
        lock(&self.messages).get(field).cloned().unwrap_or_default()
    }

    /// Fields that currently hold at least one message.
    #[must_use]
    pub fn fields(&self) -> Vec<FieldIdentifier> {
        lock(&self.messages).keys().cloned().collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.messages).is_empty()
    }
}
