use shared::Route;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct VerticalLayoutProps {
    pub height: u32,
    pub active: Route,
    #[prop_or_default]
    pub on_navigate: Option<Callback<Route>>,
}

#[function_component(VerticalLayout)]
pub fn vertical_layout(props: &VerticalLayoutProps) -> Html {
    let nav_item = |route: Route, testid: &'static str, icon: &'static str| {
        let class = if props.active == route { "active-icon" } else { "" };
        let onclick = props.on_navigate.clone().map(|on_navigate| {
            Callback::from(move |_: MouseEvent| on_navigate.emit(route))
        });
        html! {
            <div id={testid} data-testid={testid} class={class} {onclick}>
                {icon}
            </div>
        }
    };

    // Admins have no new bill form; their list is the dashboard
    let admin = props.active == Route::Dashboard;

    html! {
        <div class="vertical-navbar" style={format!("height: {}vh;", props.height)}>
            <div class="layout-title">{"Billed"}</div>
            {if admin {
                nav_item(Route::Dashboard, "icon-window", "🗂")
            } else {
                html! {
                    <>
                        {nav_item(Route::Bills, "icon-window", "🗂")}
                        {nav_item(Route::NewBill, "icon-mail", "✉")}
                    </>
                }
            }}
            {nav_item(Route::Login, "layout-disconnect", "⏻")}
        </div>
    }
}
