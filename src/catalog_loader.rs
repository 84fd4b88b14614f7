use gloo::net::http::Request;

use vitrine_core::{parse_catalog, CatalogError, CatalogItem};

/// Single read of the catalog document. No retry.
pub(crate) async fn fetch_catalog(url: &str) -> Result<Vec<CatalogItem>, CatalogError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|err| CatalogError::Request(err.to_string()))?;
    if !response.ok() {
        return Err(CatalogError::Status(response.status()));
    }
    let text = response
        .text()
        .await
        .map_err(|err| CatalogError::Request(err.to_string()))?;
    let items = parse_catalog(&text)?;
    gloo::console::log!("catalog: loaded", url, items.len());
    Ok(items)
}
