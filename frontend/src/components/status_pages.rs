use yew::prelude::*;

use super::vertical_layout::VerticalLayout;
use shared::Route;

#[derive(Properties, PartialEq)]
pub struct LoadingPageProps {
    #[prop_or(Route::Bills)]
    pub active: Route,
}

#[function_component(LoadingPage)]
pub fn loading_page(props: &LoadingPageProps) -> Html {
    html! {
        <div class="layout">
            <VerticalLayout height={120} active={props.active} />
            <div class="content" id="loading">
                {"Loading..."}
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorPageProps {
    pub error: String,
    #[prop_or(Route::Bills)]
    pub active: Route,
}

#[function_component(ErrorPage)]
pub fn error_page(props: &ErrorPageProps) -> Html {
    html! {
        <div class="layout">
            <VerticalLayout height={120} active={props.active} />
            <div class="content">
                <div class="content-header">
                    <div class="content-title">{"Erreur"}</div>
                </div>
                <div data-testid="error-message">
                    {&props.error}
                </div>
            </div>
        </div>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod dom_tests {
    use super::*;
    use crate::components::dom_test_support::{mount, settle, texts};
    use crate::services::store::StoreError;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    async fn rendered_error(status: u16) -> Vec<String> {
        let root = mount();
        let props = ErrorPageProps {
            error: StoreError::Http { status }.to_string(),
            active: Route::Bills,
        };
        let _app = yew::Renderer::<ErrorPage>::with_root_and_props(root.clone(), props).render();
        settle().await;
        texts(&root, "[data-testid=error-message]")
    }

    #[wasm_bindgen_test]
    async fn test_error_page_shows_not_found() {
        assert_eq!(rendered_error(404).await, vec!["Erreur 404"]);
    }

    #[wasm_bindgen_test]
    async fn test_error_page_shows_server_error() {
        assert_eq!(rendered_error(500).await, vec!["Erreur 500"]);
    }
}
