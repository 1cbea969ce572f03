use gloo::events::EventListener;
use log::LevelFilter;
use shared::{Route, User};
use yew::prelude::*;

mod components;
mod containers;
mod hooks;
mod services;

use components::{home_route, BillsPage, LoginPage, NewBillPage};
use services::api::ApiClient;
use services::logging;
use services::session::{clear_session, read_session};

/// Route named by the current location hash
fn current_route() -> Route {
    web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .map(|hash| Route::from_path(&hash))
        .unwrap_or(Route::Login)
}

fn set_location_hash(route: Route) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_hash(route.path()) {
        log::error!("Failed to set location hash: {:?}", e);
    }
}

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let user = use_state(read_session);
    let route = use_state(current_route);

    let on_navigate = {
        let route = route.clone();
        let user = user.clone();
        use_callback((), move |next: Route, _| {
            log::info!("Navigating to {:?}", next);
            if next == Route::Login {
                clear_session();
                user.set(None);
            }
            set_location_hash(next);
            route.set(next);
        })
    };

    // Follow back and forward navigation
    use_effect_with((), {
        let route = route.clone();
        move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "hashchange", move |_| route.set(current_route()))
            });
            move || drop(listener)
        }
    });

    let on_login = {
        let user = user.clone();
        let on_navigate = on_navigate.clone();
        Callback::from(move |signed_in: User| {
            let home = home_route(&signed_in);
            user.set(Some(signed_in));
            on_navigate.emit(home);
        })
    };

    match (*route, (*user).clone()) {
        (Route::Login, _) | (_, None) => html! { <LoginPage {on_login} /> },
        (Route::NewBill, Some(session)) => html! {
            <NewBillPage api_client={(*api_client).clone()} {session} {on_navigate} />
        },
        (route @ (Route::Bills | Route::Dashboard), Some(session)) => html! {
            <BillsPage api_client={(*api_client).clone()} {session} {route} {on_navigate} />
        },
    }
}

fn main() {
    if let Err(e) = logging::init(LevelFilter::Info) {
        gloo::console::error!(format!("Logger already installed: {}", e));
    }
    yew::Renderer::<App>::new().render();
}
