//! Minimal subject/observer with disposer subscriptions.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;
type Listeners<T> = RefCell<Vec<(u64, Listener<T>)>>;

/// Multi-subscriber notifier. Listeners run in subscription order.
pub struct Subject<T> {
	listeners: Rc<Listeners<T>>,
	next_id: Cell<u64>,
}

impl<T: 'static> Subject<T> {
	/// Subject with no listeners.
	pub fn new() -> Self {
		Self {
			listeners: Rc::new(RefCell::new(Vec::new())),
			next_id: Cell::new(0),
		}
	}

	/// Registers `listener` until the returned subscription is dropped.
	pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
		let id = self.next_id.get();
		self.next_id.set(id + 1);
		self.listeners.borrow_mut().push((id, Rc::new(listener)));

		let listeners: Weak<Listeners<T>> = Rc::downgrade(&self.listeners);
		Subscription {
			dispose: Some(Box::new(move || {
				if let Some(listeners) = listeners.upgrade() {
					listeners.borrow_mut().retain(|(other, _)| *other != id);
				}
			})),
		}
	}

	/// Calls every listener with `value`. Listeners may subscribe or
	/// unsubscribe while being notified; changes apply from the next call.
	pub fn notify(&self, value: &T) {
		let snapshot: Vec<Listener<T>> = self
			.listeners
			.borrow()
			.iter()
			.map(|(_, listener)| listener.clone())
			.collect();
		for listener in snapshot {
			listener(value);
		}
	}

	/// Number of listeners.
	pub fn len(&self) -> usize {
		self.listeners.borrow().len()
	}

	/// Whether nobody is listening.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Drops every listener. Outstanding subscriptions become no-ops.
	pub fn clear(&self) {
		self.listeners.borrow_mut().clear();
	}
}

impl<T: 'static> Default for Subject<T> {
	fn default() -> Self {
		Self::new()
	}
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
	dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	/// Removes the listener now instead of on drop.
	pub fn unsubscribe(mut self) {
		if let Some(dispose) = self.dispose.take() {
			dispose();
		}
	}

	/// Keeps the listener for the lifetime of the subject.
	pub fn forget(mut self) {
		self.dispose = None;
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(dispose) = self.dispose.take() {
			dispose();
		}
	}
}
