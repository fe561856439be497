//! Authentication context for a passwordless identity provider.
//!
//! `Auth` is constructed once per session and passed to whoever needs it.
//! `init` connects the provider's events, `dispose` releases them together
//! with every state listener. The access token is kept in a `TokenStore`
//! under `ACCESS_TOKEN_KEY`; holding a token without a resolved profile email
//! means "authenticating", a token with an email means "authenticated".

mod context;
mod observer;
pub mod web;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, info, warn};
use serde::Deserialize;

use crate::binding::Binding;
use crate::error::AuthError;

pub use context::{AuthContext, connect, use_auth};
pub use observer::{Subject, Subscription};

/// Storage key of the persisted access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

const SESSION_EXPIRED: &str = "Session expired";

/// Events emitted by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthEvent {
	/// The provider rejected the login.
	AuthorizationError(String),
	/// Login succeeded.
	Authenticated { access_token: String },
	/// The login redirect hash was parsed; `None` when there was none.
	HashParsed(Option<String>),
}

/// Profile fields the viewer uses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
	#[serde(default)]
	pub email: Option<String>,
}

/// Receives the result of a profile lookup.
pub type ProfileCallback = Box<dyn FnOnce(Result<UserProfile, AuthError>)>;

/// The identity provider SDK as seen by `Auth`.
pub trait IdentityProvider {
	/// Forwards provider events to `on_event` until the bindings are dropped.
	fn connect(&self, on_event: Rc<dyn Fn(AuthEvent)>) -> Result<Vec<Binding>, AuthError>;
	/// Shows the login widget.
	fn show_login(&self);
	/// Ends the provider session.
	fn logout(&self);
	/// Looks up the profile for `access_token` and reports through `done`.
	fn fetch_profile(&self, access_token: &str, done: ProfileCallback);
}

/// Durable key/value storage for the access token.
pub trait TokenStore {
	/// Stored value for `key`.
	fn get(&self, key: &str) -> Option<String>;
	/// Stores `value` under `key`.
	fn set(&self, key: &str, value: &str);
	/// Deletes `key`.
	fn remove(&self, key: &str);
}

/// In-memory store, used when the browser offers no `localStorage`. The
/// token then lasts for the page session only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
	entries: RefCell<std::collections::HashMap<String, String>>,
}

impl TokenStore for MemoryTokenStore {
	fn get(&self, key: &str) -> Option<String> {
		self.entries.borrow().get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) {
		self.entries
			.borrow_mut()
			.insert(key.to_string(), value.to_string());
	}

	fn remove(&self, key: &str) {
		self.entries.borrow_mut().remove(key);
	}
}

/// Snapshot handed to state listeners.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
	pub authenticating: bool,
	pub authenticated: bool,
	pub logged_in: bool,
	pub access_token: Option<String>,
	pub email: Option<String>,
	pub error_description: Option<String>,
}

#[derive(Debug, Default)]
struct Session {
	access_token: Option<String>,
	email: Option<String>,
	error_description: Option<String>,
}

impl Session {
	fn state(&self) -> AuthState {
		let authenticated = self.access_token.is_some() && self.email.is_some();
		AuthState {
			authenticating: self.access_token.is_some() && self.email.is_none(),
			authenticated,
			logged_in: authenticated,
			access_token: self.access_token.clone(),
			email: self.email.clone(),
			error_description: self.error_description.clone(),
		}
	}
}

struct AuthInner {
	provider: Rc<dyn IdentityProvider>,
	store: Rc<dyn TokenStore>,
	session: RefCell<Session>,
	subject: Subject<AuthState>,
	bindings: RefCell<Vec<Binding>>,
}

/// Shared handle to the authentication context.
#[derive(Clone)]
pub struct Auth {
	inner: Rc<AuthInner>,
}

impl Auth {
	/// Authentication over `provider`, persisting the token in `store`.
	pub fn new(provider: Rc<dyn IdentityProvider>, store: Rc<dyn TokenStore>) -> Self {
		Self {
			inner: Rc::new(AuthInner {
				provider,
				store,
				session: RefCell::new(Session::default()),
				subject: Subject::new(),
				bindings: RefCell::new(Vec::new()),
			}),
		}
	}

	fn from_weak(weak: &Weak<AuthInner>) -> Option<Self> {
		weak.upgrade().map(|inner| Self { inner })
	}

	/// Connects provider events. Calling it again reconnects.
	pub fn init(&self) -> Result<(), AuthError> {
		let weak = Rc::downgrade(&self.inner);
		let bindings = self.inner.provider.connect(Rc::new(move |event| {
			if let Some(auth) = Auth::from_weak(&weak) {
				auth.handle_event(event);
			}
		}))?;
		*self.inner.bindings.borrow_mut() = bindings;
		info!("peerscout: auth initialised");
		Ok(())
	}

	/// Disconnects provider events and drops every state listener.
	pub fn dispose(&self) {
		let bindings = std::mem::take(&mut *self.inner.bindings.borrow_mut());
		drop(bindings);
		self.inner.subject.clear();
		debug!("peerscout: auth disposed");
	}

	/// Applies one provider event to the session.
	pub fn handle_event(&self, event: AuthEvent) {
		debug!("peerscout: auth event {event:?}");
		match event {
			AuthEvent::AuthorizationError(description) => self.set_authorization_error(description),
			AuthEvent::Authenticated { access_token } => self.set_access_token(Some(access_token), None),
			AuthEvent::HashParsed(None) => self.check_existing_token(),
			AuthEvent::HashParsed(Some(_)) => {}
		}
	}

	fn check_existing_token(&self) {
		let token = self
			.inner
			.store
			.get(ACCESS_TOKEN_KEY)
			.filter(|token| !token.is_empty());
		if let Some(token) = token {
			self.set_access_token(Some(token), None);
		}
	}

	fn set_authorization_error(&self, description: String) {
		warn!("peerscout: authorization error: {description}");
		self.set_access_token(None, Some(description));
	}

	/// A new token resets the email and starts a profile lookup; the same
	/// token with a different error only replaces the error.
	fn set_access_token(&self, access_token: Option<String>, error_description: Option<String>) {
		{
			let mut session = self.inner.session.borrow_mut();
			if access_token != session.access_token {
				session.access_token = access_token.clone();
				session.error_description = error_description;
				session.email = None;
			} else if error_description != session.error_description {
				session.error_description = error_description;
				drop(session);
				self.notify();
				return;
			} else {
				return;
			}
		}

		match &access_token {
			Some(token) => {
				self.inner.store.set(ACCESS_TOKEN_KEY, token);
				self.fetch_profile(token);
			}
			None => self.inner.store.remove(ACCESS_TOKEN_KEY),
		}
		self.notify();
	}

	fn fetch_profile(&self, token: &str) {
		let weak = Rc::downgrade(&self.inner);
		let requested = token.to_string();
		self.inner.provider.fetch_profile(
			token,
			Box::new(move |result| {
				let Some(auth) = Auth::from_weak(&weak) else {
					return;
				};
				if auth.access_token().as_deref() != Some(requested.as_str()) {
					debug!("peerscout: ignoring profile for a replaced token");
					return;
				}
				match result {
					Ok(profile) => {
						info!("peerscout: logged in as {:?}", profile.email);
						auth.inner.session.borrow_mut().email = profile.email;
						auth.notify();
					}
					Err(err) => auth.set_authorization_error(err.description()),
				}
			}),
		);
	}

	/// Checks the stored token is still accepted; a rejected token becomes a
	/// "Session expired" authorization error.
	pub fn revalidate_token(&self) {
		let Some(token) = self.inner.store.get(ACCESS_TOKEN_KEY) else {
			return;
		};
		let weak = Rc::downgrade(&self.inner);
		self.inner.provider.fetch_profile(
			&token,
			Box::new(move |result| {
				let Some(auth) = Auth::from_weak(&weak) else {
					return;
				};
				match result {
					Ok(profile) => {
						let changed = {
							let mut session = auth.inner.session.borrow_mut();
							let changed = session.email != profile.email;
							session.email = profile.email;
							changed
						};
						if changed {
							auth.notify();
						}
					}
					Err(_) => auth.set_authorization_error(SESSION_EXPIRED.to_string()),
				}
			}),
		);
	}

	fn notify(&self) {
		let state = self.state();
		self.inner.subject.notify(&state);
	}

	/// Opens the login widget.
	pub fn login(&self) {
		self.inner.provider.show_login();
	}

	/// Clears the token and logs out of the provider. No-op when logged out.
	pub fn logout(&self) {
		if self.access_token().is_some() {
			self.set_access_token(None, None);
			self.inner.provider.logout();
		}
	}

	/// Current access token, if logged in.
	pub fn access_token(&self) -> Option<String> {
		self.inner.session.borrow().access_token.clone()
	}

	/// Whether a token is held.
	pub fn is_authenticated(&self) -> bool {
		self.state().authenticated
	}

	/// Whether a login or token check is in flight.
	pub fn is_authenticating(&self) -> bool {
		self.state().authenticating
	}

	/// Snapshot of the session.
	pub fn state(&self) -> AuthState {
		self.inner.session.borrow().state()
	}

	/// Calls `listener` with the new state on every token or error change.
	pub fn subscribe(&self, listener: impl Fn(&AuthState) + 'static) -> Subscription {
		self.inner.subject.subscribe(listener)
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	#[derive(Default)]
	struct FakeProvider {
		profile: RefCell<Option<Result<UserProfile, AuthError>>>,
		pending: RefCell<Vec<(String, ProfileCallback)>>,
		on_event: RefCell<Option<Rc<dyn Fn(AuthEvent)>>>,
		logins: Cell<u32>,
		logouts: Cell<u32>,
	}

	impl FakeProvider {
		fn emit(&self, event: AuthEvent) {
			let on_event = self.on_event.borrow().clone();
			if let Some(on_event) = on_event {
				on_event(event);
			}
		}

		/// Answers every pending profile lookup with the configured result.
		fn resolve(&self) {
			let pending = std::mem::take(&mut *self.pending.borrow_mut());
			for (_, done) in pending {
				let result = self
					.profile
					.borrow()
					.clone()
					.unwrap_or_else(|| Err(AuthError::Profile("no profile".into())));
				done(result);
			}
		}
	}

	impl IdentityProvider for FakeProvider {
		fn connect(&self, on_event: Rc<dyn Fn(AuthEvent)>) -> Result<Vec<Binding>, AuthError> {
			*self.on_event.borrow_mut() = Some(on_event);
			Ok(Vec::new())
		}

		fn show_login(&self) {
			self.logins.set(self.logins.get() + 1);
		}

		fn logout(&self) {
			self.logouts.set(self.logouts.get() + 1);
		}

		fn fetch_profile(&self, access_token: &str, done: ProfileCallback) {
			self.pending
				.borrow_mut()
				.push((access_token.to_string(), done));
		}
	}

	fn setup() -> (Auth, Rc<FakeProvider>, Rc<MemoryTokenStore>) {
		let provider = Rc::new(FakeProvider::default());
		let store = Rc::new(MemoryTokenStore::default());
		let auth = Auth::new(provider.clone(), store.clone());
		auth.init().unwrap();
		(auth, provider, store)
	}

	fn profile(email: &str) -> Option<Result<UserProfile, AuthError>> {
		Some(Ok(UserProfile {
			email: Some(email.into()),
		}))
	}

	#[test]
	fn authenticated_token_is_persisted_and_resolves_email() {
		let (auth, provider, store) = setup();
		*provider.profile.borrow_mut() = profile("a@example.org");

		provider.emit(AuthEvent::Authenticated {
			access_token: "t1".into(),
		});
		assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("t1"));
		assert!(auth.is_authenticating());
		assert!(!auth.is_authenticated());

		provider.resolve();
		let state = auth.state();
		assert!(state.authenticated && state.logged_in && !state.authenticating);
		assert_eq!(state.email.as_deref(), Some("a@example.org"));
	}

	#[test]
	fn memory_store_forgets_token_on_logout() {
		let (auth, provider, store) = setup();
		*provider.profile.borrow_mut() = profile("a@example.org");
		provider.emit(AuthEvent::Authenticated {
			access_token: "t1".into(),
		});
		provider.resolve();
		assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("t1"));

		auth.logout();
		assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
		assert_eq!(provider.logouts.get(), 1);
		assert!(!auth.state().logged_in);
	}

	#[test]
	fn hash_without_token_restores_stored_token() {
		let (auth, provider, store) = setup();
		store.set(ACCESS_TOKEN_KEY, "stored");
		provider.emit(AuthEvent::HashParsed(Some("#x".into())));
		assert_eq!(auth.access_token(), None);
		provider.emit(AuthEvent::HashParsed(None));
		assert_eq!(auth.access_token().as_deref(), Some("stored"));
	}

	#[test]
	fn profile_failure_becomes_authorization_error() {
		let (auth, provider, store) = setup();
		provider.emit(AuthEvent::Authenticated {
			access_token: "t1".into(),
		});
		provider.resolve();
		let state = auth.state();
		assert_eq!(state.access_token, None);
		assert_eq!(state.error_description.as_deref(), Some("profile lookup failed: no profile"));
		assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
	}

	#[test]
	fn repeated_error_with_same_token_only_updates_error() {
		let (auth, provider, _) = setup();
		let notified = Rc::new(Cell::new(0));
		let counter = notified.clone();
		let _subscription = auth.subscribe(move |_| counter.set(counter.get() + 1));

		provider.emit(AuthEvent::AuthorizationError("bad link".into()));
		assert_eq!(notified.get(), 1);
		provider.emit(AuthEvent::AuthorizationError("bad link".into()));
		assert_eq!(notified.get(), 1);
		provider.emit(AuthEvent::AuthorizationError("expired link".into()));
		assert_eq!(notified.get(), 2);
		assert_eq!(auth.state().error_description.as_deref(), Some("expired link"));
	}

	#[test]
	fn token_change_clears_email() {
		let (auth, provider, _) = setup();
		*provider.profile.borrow_mut() = profile("a@example.org");
		provider.emit(AuthEvent::Authenticated {
			access_token: "t1".into(),
		});
		provider.resolve();
		provider.emit(AuthEvent::Authenticated {
			access_token: "t2".into(),
		});
		assert_eq!(auth.state().email, None);
		assert!(auth.is_authenticating());
	}

	#[test]
	fn stale_profile_is_ignored() {
		let (auth, provider, _) = setup();
		*provider.profile.borrow_mut() = profile("a@example.org");
		provider.emit(AuthEvent::Authenticated {
			access_token: "t1".into(),
		});
		auth.logout();
		provider.resolve();
		assert_eq!(auth.state(), AuthState::default());
		assert_eq!(provider.logouts.get(), 1);
	}

	#[test]
	fn logout_without_token_does_nothing() {
		let (auth, provider, _) = setup();
		auth.logout();
		assert_eq!(provider.logouts.get(), 0);
		auth.login();
		assert_eq!(provider.logins.get(), 1);
	}

	#[test]
	fn revalidation_failure_expires_session() {
		let (auth, provider, store) = setup();
		*provider.profile.borrow_mut() = profile("a@example.org");
		provider.emit(AuthEvent::Authenticated {
			access_token: "t1".into(),
		});
		provider.resolve();

		*provider.profile.borrow_mut() = None;
		auth.revalidate_token();
		provider.resolve();
		assert_eq!(auth.state().error_description.as_deref(), Some("Session expired"));
		assert!(!auth.is_authenticated());
		assert_eq!(store.get(ACCESS_TOKEN_KEY), None);
	}

	#[test]
	fn dispose_drops_listeners() {
		let (auth, provider, _) = setup();
		let notified = Rc::new(Cell::new(0));
		let counter = notified.clone();
		auth.subscribe(move |_| counter.set(counter.get() + 1)).forget();
		auth.dispose();
		provider.emit(AuthEvent::AuthorizationError("x".into()));
		assert_eq!(notified.get(), 0);
	}
}
