//! Leptos context exposing `Auth` and its state as a signal.

use std::rc::Rc;

use leptos::prelude::*;
use log::warn;

use super::web::{LockProvider, browser_token_store};
use super::{Auth, AuthState};
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Creates and initialises `Auth` over the lock widget and browser storage.
pub fn connect(config: &AuthConfig) -> Result<Auth, AuthError> {
	let provider = LockProvider::new(&config.client_id, &config.domain)?;
	let auth = Auth::new(Rc::new(provider), browser_token_store());
	auth.init()?;
	Ok(auth)
}

/// Handle provided to the component tree. Without an `Auth`, every
/// operation is a no-op and the state stays logged out.
#[derive(Clone, Copy)]
pub struct AuthContext {
	auth: StoredValue<Option<Auth>, LocalStorage>,
	state: RwSignal<AuthState>,
}

impl AuthContext {
	/// Provides the context for the current owner. The subscription and the
	/// provider events are released when the owner is cleaned up.
	pub fn provide(auth: Option<Auth>) -> Self {
		let state = RwSignal::new(auth.as_ref().map(Auth::state).unwrap_or_default());
		let subscription = auth
			.as_ref()
			.map(|auth| auth.subscribe(move |next: &AuthState| state.set(next.clone())));
		let subscription = StoredValue::new_local(subscription);
		let context = Self {
			auth: StoredValue::new_local(auth),
			state,
		};

		on_cleanup(move || {
			let _ = subscription.try_update_value(Option::take);
			let _ = context.auth.try_with_value(|auth| {
				if let Some(auth) = auth {
					auth.dispose();
				}
			});
		});
		provide_context(context);
		context
	}

	/// Whether login is configured.
	pub fn enabled(&self) -> bool {
		self.auth.try_with_value(Option::is_some).unwrap_or(false)
	}

	/// Reactive authentication state.
	pub fn state(&self) -> Signal<AuthState> {
		self.state.into()
	}

	fn with_auth(&self, f: impl FnOnce(&Auth)) {
		let _ = self.auth.try_with_value(|auth| {
			if let Some(auth) = auth {
				f(auth);
			}
		});
	}

	/// Opens the login widget.
	pub fn login(&self) {
		self.with_auth(Auth::login);
	}

	/// Forgets the token and logs out of the provider.
	pub fn logout(&self) {
		self.with_auth(Auth::logout);
	}

	/// Checks the stored token against the provider.
	pub fn revalidate_token(&self) {
		self.with_auth(Auth::revalidate_token);
	}

	/// Current token, read without tracking.
	pub fn access_token(&self) -> Option<String> {
		self.auth
			.try_with_value(|auth| auth.as_ref().and_then(Auth::access_token))
			.flatten()
	}
}

/// The provided `AuthContext`, if any.
pub fn use_auth() -> Option<AuthContext> {
	let context = use_context::<AuthContext>();
	if context.is_none() {
		warn!("peerscout: no auth context provided");
	}
	context
}
