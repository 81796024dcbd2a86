//! Admin login card.

use leptos::{ev, prelude::*};
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::{APP_NAME, APP_TAGLINE};
use crate::core::session::{self, LoginResult};

stylance::import_crate_style!(css, "src/components/login.module.css");

#[component]
pub fn Login() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let (admin_id, set_admin_id) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (error, set_error) = signal::<Option<&'static str>>(None);

    let can_submit =
        move || !admin_id.with(|v| v.trim().is_empty()) && !password.with(String::is_empty);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if !can_submit() {
            return;
        }
        match session::login(&admin_id.get_untracked(), &password.get_untracked()) {
            LoginResult::Accepted => {
                set_error.set(None);
                ctx.authed.set(true);
            }
            LoginResult::Rejected => set_error.set(Some("Invalid ID or Password")),
            LoginResult::NotConfigured => {
                set_error.set(Some("Login is not configured for this build"))
            }
        }
    };

    view! {
        <div class=css::page>
            <form class=css::card on:submit=on_submit>
                <div class=css::brand>
                    <span class=css::lock><Icon icon=ic::LOCK /></span>
                    <h1 class=css::title>{format!("{} — Admin", APP_NAME)}</h1>
                    <p class=css::tagline>{APP_TAGLINE}</p>
                </div>

                <label class=css::field>
                    <span class=css::label>"Admin ID"</span>
                    <input
                        class=css::input
                        type="text"
                        placeholder="e.g. mom"
                        autocomplete="username"
                        prop:value=admin_id
                        on:input=move |ev| set_admin_id.set(event_target_value(&ev))
                    />
                </label>

                <label class=css::field>
                    <span class=css::label>"Password"</span>
                    <div class=css::passwordRow>
                        <input
                            class=css::input
                            type=move || if show_password.get() { "text" } else { "password" }
                            autocomplete="current-password"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                        <button
                            type="button"
                            class=css::reveal
                            aria-label=move || {
                                if show_password.get() { "Hide password" } else { "Show password" }
                            }
                            on:click=move |_| set_show_password.update(|v| *v = !*v)
                        >
                            {move || {
                                let icon = if show_password.get() { ic::EYE_OFF } else { ic::EYE };
                                view! { <Icon icon=icon /> }
                            }}
                        </button>
                    </div>
                </label>

                <Show when=move || error.get().is_some()>
                    <p class=css::error role="alert">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <button type="submit" class=css::submit disabled=move || !can_submit()>
                    "Login"
                </button>

                <p class=css::footer>"Tip: ask the site owner for the admin ID."</p>
            </form>
        </div>
    }
}
