//! Browser helpers for component tests

use gloo::timers::future::TimeoutFuture;
use gloo::utils::document;
use web_sys::Element;

/// Fresh root element appended to the document body
pub fn mount() -> Element {
    let root = document().create_element("div").unwrap();
    document().body().unwrap().append_child(&root).unwrap();
    root
}

/// Let the scheduler render pending updates
pub async fn settle() {
    TimeoutFuture::new(10).await;
}

/// Trimmed text of every element under `root` matching `selector`, in document order
pub fn texts(root: &Element, selector: &str) -> Vec<String> {
    let nodes = root.query_selector_all(selector).unwrap();
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .map(|node| node.text_content().unwrap_or_default().trim().to_string())
        .collect()
}
