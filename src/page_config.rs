use web_sys::UrlSearchParams;

use vitrine_core::catalog::DEFAULT_CATALOG_URL;

const CATALOG_QUERY_PARAM: &str = "catalog";

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PageConfig {
    pub(crate) catalog_url: String,
}

pub(crate) fn load_page_config() -> PageConfig {
    let from_query = query_param(CATALOG_QUERY_PARAM);
    let from_build = option_env!("VITRINE_CATALOG_URL")
        .or(option_env!("TRUNK_PUBLIC_VITRINE_CATALOG_URL"));
    PageConfig {
        catalog_url: resolve_catalog_url(from_query.as_deref(), from_build),
    }
}

/// The query parameter wins over the build-time value. Only same-origin
/// paths are accepted.
pub(crate) fn resolve_catalog_url(from_query: Option<&str>, from_build: Option<&str>) -> String {
    [from_query, from_build]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| is_same_origin_path(url))
        .unwrap_or(DEFAULT_CATALOG_URL)
        .to_string()
}

fn is_same_origin_path(url: &str) -> bool {
    !url.is_empty() && !url.contains("://") && !url.starts_with("//")
}

fn query_param(name: &str) -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let params = UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_catalog() {
        assert_eq!(resolve_catalog_url(None, None), DEFAULT_CATALOG_URL);
        assert_eq!(resolve_catalog_url(Some("  "), None), DEFAULT_CATALOG_URL);
    }

    #[test]
    fn query_overrides_build_value() {
        assert_eq!(
            resolve_catalog_url(Some("alt/data.json"), Some("build.json")),
            "alt/data.json"
        );
        assert_eq!(resolve_catalog_url(None, Some(" build.json ")), "build.json");
    }

    #[test]
    fn rejects_cross_origin_urls() {
        assert_eq!(
            resolve_catalog_url(Some("https://evil.example/data.json"), Some("local.json")),
            "local.json"
        );
        assert_eq!(resolve_catalog_url(Some("//cdn.example/x.json"), None), DEFAULT_CATALOG_URL);
    }
}
