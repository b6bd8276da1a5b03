//! One-shot completion handlers bridging engine notifications to awaitables.

use tokio::sync::oneshot;

/// Reply slot fulfilled once a phase completes.
pub type Reply<T> = oneshot::Sender<anyhow::Result<T>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Pending,
    /// The handler is finished and unsubscribes itself.
    Done,
}

type Handler<E> = Box<dyn FnMut(&E) -> Handled + Send>;

pub struct CompletionHandlers<E> {
    handlers: Vec<Handler<E>>,
}

impl<E> Default for CompletionHandlers<E> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<E> CompletionHandlers<E> {
    pub fn register(&mut self, handler: impl FnMut(&E) -> Handled + Send + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn dispatch(&mut self, event: &E) {
        self.handlers
            .retain_mut(|handler| handler(event) == Handled::Pending);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Resolves `reply` with the first notification received.
pub fn resolve_once<E>(reply: Reply<E>) -> impl FnMut(&E) -> Handled + Send + 'static
where
    E: Clone + Send + 'static,
{
    let mut reply = Some(reply);
    move |event| {
        if let Some(reply) = reply.take() {
            // The awaiting side may have given up; nothing to do then.
            let _ = reply.send(Ok(event.clone()));
        }
        Handled::Done
    }
}

/// Collects `expected` notifications, then resolves `reply` with all of them.
pub fn collect_then_resolve<E>(
    expected: usize,
    reply: Reply<Vec<E>>,
) -> impl FnMut(&E) -> Handled + Send + 'static
where
    E: Clone + Send + 'static,
{
    let mut reply = Some(reply);
    let mut collected = Vec::with_capacity(expected);
    move |event| {
        collected.push(event.clone());
        if collected.len() < expected {
            return Handled::Pending;
        }
        if let Some(reply) = reply.take() {
            let _ = reply.send(Ok(std::mem::take(&mut collected)));
        }
        Handled::Done
    }
}

#[cfg(test)]
#[path = "tests/completion_tests.rs"]
mod tests;
