use shared::{Route, User, UserType};
use web_sys::{FormData, HtmlFormElement};
use yew::prelude::*;

use crate::services::session::store_session;

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    pub on_login: Callback<User>,
}

/// Minimal sign in: records the user in local storage, no password check
#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let on_submit = |user_type: UserType| {
        let on_login = props.on_login.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form: HtmlFormElement = e.target_unchecked_into();
            let email = FormData::new_with_form(&form)
                .ok()
                .and_then(|data| data.get("email").as_string())
                .unwrap_or_default();
            if email.trim().is_empty() {
                return;
            }

            let user = User { user_type, email };
            store_session(&user);
            on_login.emit(user);
        })
    };

    html! {
        <div class="login-page">
            <div class="login-title">{"Billed"}</div>
            <form class="form-employee" data-testid="form-employee" onsubmit={on_submit(UserType::Employee)}>
                <h2>{"Employé"}</h2>
                <input type="email" name="email" data-testid="employee-email-input" placeholder="johndoe@email.com" required={true} />
                <button type="submit" class="btn btn-primary" data-testid="employee-login-button">{"Se connecter"}</button>
            </form>
            <form class="form-admin" data-testid="form-admin" onsubmit={on_submit(UserType::Admin)}>
                <h2>{"Administration"}</h2>
                <input type="email" name="email" data-testid="admin-email-input" placeholder="johndoe@email.com" required={true} />
                <button type="submit" class="btn btn-primary" data-testid="admin-login-button">{"Se connecter"}</button>
            </form>
        </div>
    }
}

/// Landing route of a freshly signed in user
pub fn home_route(user: &User) -> Route {
    match user.user_type {
        UserType::Employee => Route::Bills,
        UserType::Admin => Route::Dashboard,
    }
}
