use rand::rngs::SmallRng;
use rand::SeedableRng;
use vitrine_core::constellation::HOVER_DISTANCE;
use vitrine_core::{filter_items, parse_catalog, CatalogItem, PageModel, PageView};

const CATALOG: &str = r#"[
    {"nome": "Alpha", "descricao": "first", "logo": "a.png",
     "data_criacao": "1999", "link": "https://alpha.example"},
    {"nome": "Beta", "descricao": "second", "logo": "b.png",
     "data_criacao": "2004", "link": "https://beta.example"}
]"#;

fn load(text: &str, seed: u64) -> PageModel {
    let items = parse_catalog(text).expect("catalog parses");
    let mut model = PageModel::default();
    let mut rng = SmallRng::seed_from_u64(seed);
    model.load(items, 640.0, 480.0, &mut rng);
    model
}

fn visible_names(model: &PageModel) -> Vec<String> {
    model
        .cards()
        .iter()
        .filter(|card| !card.hidden)
        .map(|card| model.items()[card.index].name.clone())
        .collect()
}

fn hover_star(model: &mut PageModel, index: usize) {
    // stars drift by at most 0.3px per frame, so aiming at the current
    // position stays well inside the hover distance
    let particle = &model.field().expect("field exists").particles()[index];
    let target = particle.pos;
    let hovered = model.tick(Some(target));
    assert!(hovered.is_some());
    let particle = &model.field().expect("field exists").particles()[index];
    assert!(particle.distance_to(target.0, target.1) < HOVER_DISTANCE);
}

#[test]
fn cards_and_stars_follow_load_order() {
    let names: Vec<String> = (0..12).map(|i| format!("Item {i}")).collect();
    let items: Vec<CatalogItem> = names
        .iter()
        .map(|name| CatalogItem {
            name: name.clone(),
            description: String::new(),
            logo_url: String::new(),
            creation_date: String::new(),
            link: "https://example.com".into(),
        })
        .collect();
    let mut model = PageModel::default();
    let mut rng = SmallRng::seed_from_u64(11);
    model.load(items, 800.0, 600.0, &mut rng);

    assert_eq!(model.cards().len(), 12);
    let field = model.field().expect("field exists");
    assert_eq!(field.particles().len(), 12);
    for index in 0..12 {
        assert_eq!(model.cards()[index].index, index);
        assert_eq!(field.particles()[index].index, index);
    }
}

#[test]
fn card_visibility_matches_filter_for_every_query() {
    let mut model = load(CATALOG, 1);
    for query in ["", "a", "AL", "fir", "SEC", "o", "zzz", "beta second"] {
        model.apply_filter(query);
        let expected = filter_items(model.items(), query).visible;
        let actual: Vec<bool> = model.cards().iter().map(|card| !card.hidden).collect();
        assert_eq!(actual, expected, "query {query:?}");
        let lowered = query.to_lowercase();
        for (card, item) in model.cards().iter().zip(model.items().iter()) {
            let matches = lowered.is_empty()
                || item.name.to_lowercase().contains(&lowered)
                || item.description.to_lowercase().contains(&lowered);
            assert_eq!(!card.hidden, matches);
        }
    }
}

#[test]
fn notice_tracks_empty_results_and_is_created_once() {
    let mut model = load(CATALOG, 2);
    model.apply_filter("alpha");
    assert!(!model.notice().created);
    model.apply_filter("zzz");
    assert!(model.notice().created && model.notice().visible);
    model.apply_filter("zzzz");
    assert!(model.notice().visible);
    model.apply_filter("beta");
    assert!(model.notice().created && !model.notice().visible);
}

#[test]
fn filtering_from_constellation_switches_to_grid() {
    let mut model = load(CATALOG, 3);
    assert_eq!(model.view(), Some(PageView::Constellation));
    model.apply_filter("fir");
    assert_eq!(model.view(), Some(PageView::Grid));
    assert_eq!(visible_names(&model), vec!["Alpha"]);
}

#[test]
fn constellation_toggle_keeps_filter_state() {
    let mut model = load(CATALOG, 4);
    model.apply_filter("fir");
    assert!(model.show_constellation());
    assert!(!model.show_constellation());
    assert_eq!(model.query(), "fir");
    assert_eq!(visible_names(&model), vec!["Alpha"]);
}

#[test]
fn grid_toggle_resets_query() {
    let mut model = load(CATALOG, 5);
    model.apply_filter("zzz");
    model.show_constellation();
    model.show_grid_reset();
    assert_eq!(model.view(), Some(PageView::Grid));
    assert_eq!(model.query(), "");
    assert_eq!(model.visible_count(), 2);
    assert!(!model.notice().visible);
}

#[test]
fn frames_only_advance_in_constellation() {
    let mut model = load(CATALOG, 6);
    let frames = |model: &PageModel| model.field().expect("field exists").frame_count();
    for _ in 0..3 {
        model.tick(None);
    }
    assert_eq!(frames(&model), 3);
    model.show_grid_reset();
    let before = model.field().expect("field exists").particles().to_vec();
    for _ in 0..10 {
        model.tick(None);
    }
    assert_eq!(frames(&model), 3);
    assert_eq!(model.field().expect("field exists").particles(), before.as_slice());
    model.show_constellation();
    model.tick(None);
    assert_eq!(frames(&model), 4);
}

#[test]
fn star_click_focuses_its_card() {
    let mut model = load(CATALOG, 7);
    model.apply_filter("zzz");
    model.show_constellation();
    hover_star(&mut model, 1);
    let hovered = model.field().expect("field exists").hovered().expect("hovered");

    assert_eq!(model.select_hovered_star(), Some(hovered));
    assert_eq!(model.view(), Some(PageView::Grid));
    assert_eq!(model.query(), model.items()[hovered].name);
    let visible: Vec<usize> = model
        .cards()
        .iter()
        .filter(|card| !card.hidden)
        .map(|card| card.index)
        .collect();
    assert_eq!(visible, vec![hovered]);
    assert!(!model.notice().visible);
}

#[test]
fn end_to_end_filter_scenario() {
    let mut model = load(CATALOG, 8);
    model.apply_filter("fir");
    assert_eq!(visible_names(&model), vec!["Alpha"]);
    assert!(!model.notice().visible);

    model.apply_filter("zzz");
    assert!(visible_names(&model).is_empty());
    assert!(model.notice().visible);

    model.show_grid_reset();
    assert_eq!(visible_names(&model), vec!["Alpha", "Beta"]);
    assert!(!model.notice().visible);
}

#[test]
fn query_typed_before_load_applies_to_new_cards() {
    let items = parse_catalog(CATALOG).expect("catalog parses");
    let mut model = PageModel::default();
    model.apply_filter("zzz");
    assert!(model.cards().is_empty());

    let mut rng = SmallRng::seed_from_u64(11);
    model.load(items, 640.0, 480.0, &mut rng);
    assert_eq!(model.query(), "zzz");
    assert_eq!(model.visible_count(), 0);
    assert!(model.notice().visible);

    model.apply_filter("sec");
    assert_eq!(visible_names(&model), vec!["Beta"]);
}
