//! Login state banner with login and logout actions.

use leptos::prelude::*;

use crate::auth::AuthContext;

/// Login or logout link with the logged in email.
#[component]
pub fn AuthStatus(auth: AuthContext) -> impl IntoView {
	let state = auth.state();

	move || {
		let current = state.get();
		let error = current
			.error_description
			.clone()
			.map(|description| view! { <div class="error-message auth-error">{description}</div> });

		let status = if current.authenticated {
			let email = current.email.clone().unwrap_or_default();
			view! {
				<span class="auth-email">{email}</span>
				<button class="logout" on:click=move |_| auth.logout()>"Logout"</button>
			}
			.into_any()
		} else if current.authenticating {
			view! { <span class="auth-pending">"Logging in..."</span> }.into_any()
		} else {
			view! { <button class="login" on:click=move |_| auth.login()>"Login"</button> }.into_any()
		};

		view! {
			<div class="auth-status">
				{status}
				{error}
			</div>
		}
	}
}
