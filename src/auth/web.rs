//! Browser bindings for `Auth`: the passwordless lock widget, the userinfo
//! endpoint and `localStorage` token persistence.

use std::rc::Rc;

use gloo_net::http::Request;
use js_sys::{Function, Object, Reflect};
use log::{debug, warn};
use wasm_bindgen::prelude::*;

use super::{AuthEvent, IdentityProvider, MemoryTokenStore, ProfileCallback, TokenStore, UserProfile};
use crate::binding::Binding;
use crate::error::AuthError;

const LOCK_GLOBAL: &str = "Auth0LockPasswordless";

#[wasm_bindgen]
extern "C" {
	#[derive(Clone)]
	type Auth0LockPasswordless;

	#[wasm_bindgen(constructor, catch)]
	fn new(client_id: &str, domain: &str, options: &JsValue) -> Result<Auth0LockPasswordless, JsValue>;

	#[wasm_bindgen(method)]
	fn on(this: &Auth0LockPasswordless, event: &str, callback: &Function);

	#[wasm_bindgen(method, js_name = removeListener)]
	fn remove_listener(this: &Auth0LockPasswordless, event: &str, callback: &Function);

	#[wasm_bindgen(method)]
	fn show(this: &Auth0LockPasswordless);

	#[wasm_bindgen(method)]
	fn logout(this: &Auth0LockPasswordless, options: &JsValue);
}

fn set(target: &Object, key: &str, value: &JsValue) {
	if Reflect::set(target, &JsValue::from_str(key), value).is_err() {
		warn!("peerscout: unable to set lock option {key}");
	}
}

fn string_field(value: &JsValue, keys: &[&str]) -> Option<String> {
	keys.iter()
		.filter_map(|key| Reflect::get(value, &JsValue::from_str(key)).ok())
		.find_map(|field| field.as_string())
}

/// Lock event listener, detached from the widget on drop.
struct LockListener {
	lock: Auth0LockPasswordless,
	event: &'static str,
	callback: Closure<dyn FnMut(JsValue)>,
}

impl LockListener {
	fn new(lock: &Auth0LockPasswordless, event: &'static str, handler: impl FnMut(JsValue) + 'static) -> Self {
		let callback = Closure::<dyn FnMut(JsValue)>::new(handler);
		lock.on(event, callback.as_ref().unchecked_ref());
		Self {
			lock: lock.clone(),
			event,
			callback,
		}
	}
}

impl Drop for LockListener {
	fn drop(&mut self) {
		self.lock
			.remove_listener(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// Identity provider backed by the global `Auth0LockPasswordless` widget.
pub struct LockProvider {
	lock: Auth0LockPasswordless,
	domain: String,
}

impl LockProvider {
	/// Creates the widget with magic-link login. Fails when the widget script
	/// has not been loaded.
	pub fn new(client_id: &str, domain: &str) -> Result<Self, AuthError> {
		let global = js_sys::global();
		if !Reflect::has(&global, &JsValue::from_str(LOCK_GLOBAL)).unwrap_or(false) {
			return Err(AuthError::ProviderUnavailable(format!("{LOCK_GLOBAL} is not loaded")));
		}
		let options = Object::new();
		set(&options, "passwordlessMethod", &JsValue::from_str("link"));
		let lock = Auth0LockPasswordless::new(client_id, domain, &options)
			.map_err(|err| AuthError::ProviderUnavailable(format!("{err:?}")))?;
		Ok(Self {
			lock,
			domain: domain.to_string(),
		})
	}
}

impl IdentityProvider for LockProvider {
	fn connect(&self, on_event: Rc<dyn Fn(AuthEvent)>) -> Result<Vec<Binding>, AuthError> {
		let on_error = on_event.clone();
		let on_authenticated = on_event.clone();
		let on_hash = on_event;

		let listeners = vec![
			LockListener::new(&self.lock, "authorization_error", move |error| {
				let description = string_field(&error, &["errorDescription", "error_description", "error"])
					.unwrap_or_else(|| "Authorization failed".to_string());
				on_error(AuthEvent::AuthorizationError(description));
			}),
			LockListener::new(&self.lock, "authenticated", move |result| {
				match string_field(&result, &["accessToken"]) {
					Some(access_token) => on_authenticated(AuthEvent::Authenticated { access_token }),
					None => warn!("peerscout: authenticated event without access token"),
				}
			}),
			LockListener::new(&self.lock, "hash_parsed", move |hash| {
				let hash = (!hash.is_null() && !hash.is_undefined())
					.then(|| hash.as_string().unwrap_or_else(|| "[object]".to_string()));
				on_hash(AuthEvent::HashParsed(hash));
			}),
		];
		Ok(listeners
			.into_iter()
			.map(|listener| Box::new(listener) as Binding)
			.collect())
	}

	fn show_login(&self) {
		self.lock.show();
	}

	fn logout(&self) {
		let options = Object::new();
		if let Some(href) = web_sys::window().and_then(|w| w.location().href().ok()) {
			set(&options, "returnTo", &JsValue::from_str(&href));
		}
		self.lock.logout(&options);
	}

	fn fetch_profile(&self, access_token: &str, done: ProfileCallback) {
		let url = format!("https://{}/userinfo", self.domain);
		let authorization = format!("Bearer {access_token}");
		wasm_bindgen_futures::spawn_local(async move {
			done(fetch_user_info(&url, &authorization).await);
		});
	}
}

async fn fetch_user_info(url: &str, authorization: &str) -> Result<UserProfile, AuthError> {
	let response = Request::get(url)
		.header("Authorization", authorization)
		.send()
		.await
		.map_err(|err| AuthError::Profile(err.to_string()))?;
	if !response.ok() {
		return Err(AuthError::Profile(format!("status {}", response.status())));
	}
	let profile = response
		.json::<UserProfile>()
		.await
		.map_err(|err| AuthError::Profile(err.to_string()))?;
	debug!("peerscout: userinfo resolved");
	Ok(profile)
}

/// Token store over `window.localStorage`. Storage failures are logged and
/// treated as a missing token.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageTokenStore;

impl LocalStorageTokenStore {
	fn storage() -> Option<web_sys::Storage> {
		web_sys::window()?.local_storage().ok().flatten()
	}
}

impl TokenStore for LocalStorageTokenStore {
	fn get(&self, key: &str) -> Option<String> {
		Self::storage()?.get_item(key).ok().flatten()
	}

	fn set(&self, key: &str, value: &str) {
		let stored = Self::storage().map(|storage| storage.set_item(key, value).is_ok());
		if stored != Some(true) {
			warn!("peerscout: unable to persist {key}");
		}
	}

	fn remove(&self, key: &str) {
		if let Some(storage) = Self::storage() {
			let _ = storage.remove_item(key);
		}
	}
}

/// `localStorage` when the browser offers it, otherwise a `MemoryTokenStore`.
pub fn browser_token_store() -> Rc<dyn TokenStore> {
	if LocalStorageTokenStore::storage().is_some() {
		Rc::new(LocalStorageTokenStore)
	} else {
		warn!("peerscout: localStorage unavailable, login lasts for this page only");
		Rc::new(MemoryTokenStore::default())
	}
}
