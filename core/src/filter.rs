use crate::catalog::CatalogItem;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterOutcome {
    pub visible: Vec<bool>,
    pub any_visible: bool,
}

/// The "no results" notice. It is created the first time a filter leaves no
/// card visible and only toggled after that.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoticeState {
    pub created: bool,
    pub visible: bool,
}

impl NoticeState {
    pub fn update(&mut self, any_visible: bool) {
        if any_visible {
            self.visible = false;
        } else {
            self.created = true;
            self.visible = true;
        }
    }
}

pub fn normalize_query(query: &str) -> String {
    query.to_lowercase()
}

/// `query` must already be normalized.
pub fn item_matches(item: &CatalogItem, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    item.name.to_lowercase().contains(query) || item.description.to_lowercase().contains(query)
}

pub fn filter_items(items: &[CatalogItem], query: &str) -> FilterOutcome {
    let query = normalize_query(query);
    let visible: Vec<bool> = items.iter().map(|item| item_matches(item, &query)).collect();
    let any_visible = visible.iter().any(|flag| *flag);
    FilterOutcome {
        visible,
        any_visible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, description: &str) -> CatalogItem {
        CatalogItem {
            name: name.to_string(),
            description: description.to_string(),
            logo_url: String::new(),
            creation_date: String::new(),
            link: format!("https://example.com/{name}"),
        }
    }

    #[test]
    fn empty_query_shows_everything() {
        let items = vec![item("Alpha", "first"), item("Beta", "second")];
        let outcome = filter_items(&items, "");
        assert_eq!(outcome.visible, vec![true, true]);
        assert!(outcome.any_visible);
    }

    #[test]
    fn matches_name_or_description_ignoring_case() {
        let items = vec![item("Alpha", "first"), item("Beta", "SECOND one")];
        assert_eq!(filter_items(&items, "ALP").visible, vec![true, false]);
        assert_eq!(filter_items(&items, "cond").visible, vec![false, true]);
        assert_eq!(filter_items(&items, "e").visible, vec![false, true]);
    }

    #[test]
    fn handles_non_ascii_case_folding() {
        let items = vec![item("Ação", "Linguagem ÚTIL")];
        assert!(filter_items(&items, "AÇÃO").any_visible);
        assert!(filter_items(&items, "útil").any_visible);
    }

    #[test]
    fn no_match_reports_nothing_visible() {
        let items = vec![item("Alpha", "first")];
        let outcome = filter_items(&items, "zzz");
        assert_eq!(outcome.visible, vec![false]);
        assert!(!outcome.any_visible);
    }

    #[test]
    fn notice_is_created_once_then_toggled() {
        let mut notice = NoticeState::default();
        notice.update(true);
        assert_eq!(notice, NoticeState::default());
        notice.update(false);
        assert!(notice.created && notice.visible);
        notice.update(true);
        assert!(notice.created && !notice.visible);
    }
}
