use std::time::Duration;

use bookstore_shared::auth::{self, AuthForm, AuthMode};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::icons::{BookOpen, Eye, EyeOff};
use crate::components::notification::{Notification, use_notice};

#[component]
pub fn AuthCard(
    /// 登录 / 注册使用的角色路径段
    role: String,
) -> impl IntoView {
    let api = use_api();
    let config = api.config();
    let notice = use_notice(config.auth_notice_ms);

    let (mode, set_mode) = signal(AuthMode::default());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (full_name, set_full_name) = signal(String::new());
    let (mobile, set_mobile) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);

    let role = StoredValue::new(role);

    let submit = move || {
        if is_submitting.get_untracked() {
            return;
        }
        let form = AuthForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
            full_name: full_name.get_untracked(),
            mobile: mobile.get_untracked(),
        };
        let mode = mode.get_untracked();
        let role = role.get_value();

        set_is_submitting.set(true);
        spawn_local(async move {
            let client = api.client();
            let outcome = auth::submit(&client, &role, mode, &form).await;
            notice.set(Some(outcome.notice));
            if outcome.logged_in {
                // 令牌已保存，稍后再切换认证状态，让提示可见
                let session = api.session();
                set_timeout(
                    move || session.mark_logged_in(),
                    Duration::from_millis(config.login_redirect_ms),
                );
            }
            set_is_submitting.set(false);
        });
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        submit();
    };

    let tab_class = move |target: AuthMode| {
        if mode.get() == target {
            "tab tab-active font-bold"
        } else {
            "tab"
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col lg:flex-row gap-0 w-full max-w-3xl">
                <div class="card w-full lg:w-80 bg-base-100 shadow-xl lg:rounded-r-none">
                    <div class="card-body items-center text-center justify-center">
                        <div class="p-4 bg-primary/10 rounded-2xl text-primary">
                            <BookOpen attr:class="h-24 w-24" />
                        </div>
                        <h2 class="text-xl font-bold mt-4">"ONLINE BOOK SHOPPING"</h2>
                    </div>
                </div>

                <div class="card w-full max-w-md shrink-0 bg-base-100 shadow-2xl">
                    <form class="card-body" on:submit=on_submit>
                        <div role="tablist" class="tabs tabs-bordered mb-2">
                            <a role="tab" class=move || tab_class(AuthMode::Login) on:click=move |_| set_mode.set(AuthMode::Login)>
                                "LOGIN"
                            </a>
                            <a role="tab" class=move || tab_class(AuthMode::Signup) on:click=move |_| set_mode.set(AuthMode::Signup)>
                                "SIGNUP"
                            </a>
                        </div>

                        <Show when=move || !mode.get().is_login()>
                            <div class="form-control">
                                <label class="label" for="full_name">
                                    <span class="label-text">"Full Name"</span>
                                </label>
                                <input
                                    id="full_name"
                                    type="text"
                                    on:input=move |ev| set_full_name.set(event_target_value(&ev))
                                    prop:value=full_name
                                    class="input input-bordered"
                                />
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email Id"</span>
                            </label>
                            <input
                                id="email"
                                type="text"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                            />
                        </div>

                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <div class="join w-full">
                                <input
                                    id="password"
                                    type=move || if show_password.get() { "text" } else { "password" }
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                    on:keydown=move |ev: leptos::web_sys::KeyboardEvent| {
                                        if ev.key() == "Enter" {
                                            ev.prevent_default();
                                            submit();
                                        }
                                    }
                                    prop:value=password
                                    class="input input-bordered join-item w-full"
                                />
                                <button
                                    type="button"
                                    class="btn join-item"
                                    aria-label="toggle password visibility"
                                    on:click=move |_| set_show_password.update(|v| *v = !*v)
                                >
                                    {move || if show_password.get() {
                                        view! { <EyeOff attr:class="h-5 w-5" /> }.into_any()
                                    } else {
                                        view! { <Eye attr:class="h-5 w-5" /> }.into_any()
                                    }}
                                </button>
                            </div>
                        </div>

                        <Show when=move || !mode.get().is_login()>
                            <div class="form-control">
                                <label class="label" for="mobile">
                                    <span class="label-text">"Mobile Number"</span>
                                </label>
                                <input
                                    id="mobile"
                                    type="text"
                                    on:input=move |ev| set_mobile.set(event_target_value(&ev))
                                    prop:value=mobile
                                    class="input input-bordered"
                                />
                            </div>
                        </Show>

                        <div class="form-control mt-6">
                            <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> }.into_any()
                                } else {
                                    mode.get().action_label().into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
            <Notification notice=notice />
        </div>
    }
}
