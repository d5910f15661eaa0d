use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

type LockHandler = Rc<dyn Fn(bool)>;

/// Identifies one subscription so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

struct LockStateInner {
    locked: Cell<bool>,
    next_subscription: Cell<u64>,
    subscribers: RefCell<Vec<(SubscriptionHandle, LockHandler)>>,
}

/// Shared "confirmed" flag observed by every presentation component.
///
/// Cloning yields another handle to the same value. Every [`LockState::set`]
/// notifies all subscribers in subscription order, even when the value does
/// not change. Lives on the UI thread only.
#[derive(Clone)]
pub struct LockState {
    inner: Rc<LockStateInner>,
}

impl LockState {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(LockStateInner {
                locked: Cell::new(false),
                next_subscription: Cell::new(0),
                subscribers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn read(&self) -> bool {
        self.inner.locked.get()
    }

    pub fn set(&self, locked: bool) {
        self.inner.locked.set(locked);
        // Snapshot so handlers can (un)subscribe while being notified.
        let handlers: Vec<LockHandler> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();
        tracing::debug!(locked, subscribers = handlers.len(), "lock state set");
        for handler in handlers {
            handler(locked);
        }
    }

    /// Registers `handler` for future `set` calls. It is not invoked with the
    /// current value.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionHandle
    where
        F: Fn(bool) + 'static,
    {
        let id = self.inner.next_subscription.get();
        self.inner.next_subscription.set(id + 1);
        let handle = SubscriptionHandle(id);
        self.inner
            .subscribers
            .borrow_mut()
            .push((handle, Rc::new(handler)));
        handle
    }

    /// Returns `false` when the handle was already removed.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let mut subscribers = self.inner.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(candidate, _)| *candidate != handle);
        subscribers.len() != before
    }

    fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }
}

impl Default for LockState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockState")
            .field("locked", &self.read())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Log = Rc<RefCell<Vec<String>>>;

    fn recorder(lock: &LockState, tag: &'static str) -> (SubscriptionHandle, Log) {
        let log = Log::default();
        let sink = log.clone();
        let handle =
            lock.subscribe(move |locked| sink.borrow_mut().push(format!("{tag}:{locked}")));
        (handle, log)
    }

    #[test]
    fn starts_unlocked_and_reads_back_writes() {
        let lock = LockState::new();
        assert!(!lock.read());
        lock.set(true);
        assert!(lock.read());
        let alias = lock.clone();
        alias.set(false);
        assert!(!lock.read());
    }

    #[test]
    fn subscribe_does_not_replay_current_value() {
        let lock = LockState::new();
        lock.set(true);
        let (_, log) = recorder(&lock, "a");
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn notifies_in_subscription_order() {
        let lock = LockState::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let order = order.clone();
            lock.subscribe(move |_| order.borrow_mut().push(tag));
        }

        lock.set(true);

        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn redundant_sets_still_notify() {
        let lock = LockState::new();
        let (_, log) = recorder(&lock, "a");

        lock.set(false);
        lock.set(false);
        lock.set(true);
        lock.set(true);

        assert_eq!(*log.borrow(), vec!["a:false", "a:false", "a:true", "a:true"]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let lock = LockState::new();
        let (first, first_log) = recorder(&lock, "a");
        let (_, second_log) = recorder(&lock, "b");

        assert!(lock.unsubscribe(first));
        assert!(!lock.unsubscribe(first));
        lock.set(true);

        assert!(first_log.borrow().is_empty());
        assert_eq!(*second_log.borrow(), vec!["b:true"]);
        assert_eq!(lock.subscriber_count(), 1);
    }

    #[test]
    fn handler_may_subscribe_during_notification() {
        let lock = LockState::new();
        let late_calls = Rc::new(Cell::new(0));
        let lock_for_handler = lock.clone();
        let late_calls_for_handler = late_calls.clone();
        lock.subscribe(move |_| {
            let late_calls = late_calls_for_handler.clone();
            lock_for_handler.subscribe(move |_| late_calls.set(late_calls.get() + 1));
        });

        lock.set(true);
        assert_eq!(late_calls.get(), 0);

        lock.set(false);
        assert_eq!(late_calls.get(), 1);
    }
}
