use std::rc::Rc;

use rand::Rng;

use crate::catalog::CatalogItem;
use crate::constellation::{AnimatorSettings, ConstellationField};
use crate::filter::{filter_items, NoticeState};
use crate::tilt::{CardRect, Tilt};
use crate::view::{PageView, ViewMachine};

/// Per-card state; `index` is the item position in the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct CardRecord {
    pub index: usize,
    pub hidden: bool,
    pub tilt: Tilt,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Pending,
    Loaded,
    Failed(String),
}

/// Headless state of the whole page. The browser shell forwards events here
/// and mirrors the result into the DOM.
#[derive(Clone, Debug)]
pub struct PageModel {
    items: Rc<[CatalogItem]>,
    cards: Vec<CardRecord>,
    notice: NoticeState,
    query: String,
    view: ViewMachine,
    field: Option<ConstellationField>,
    load_state: LoadState,
    settings: AnimatorSettings,
}

impl Default for PageModel {
    fn default() -> Self {
        Self::new(AnimatorSettings::default())
    }
}

impl PageModel {
    pub fn new(settings: AnimatorSettings) -> Self {
        Self {
            items: Rc::from(Vec::new()),
            cards: Vec::new(),
            notice: NoticeState::default(),
            query: String::new(),
            view: ViewMachine::default(),
            field: None,
            load_state: LoadState::Pending,
            settings,
        }
    }

    /// Replaces the catalog, rebuilds every card and star and enters the
    /// constellation view. The stored query is re-applied to the new cards.
    pub fn load<R: Rng>(&mut self, items: Vec<CatalogItem>, width: f64, height: f64, rng: &mut R) {
        self.items = Rc::from(items);
        self.cards = (0..self.items.len())
            .map(|index| CardRecord {
                index,
                hidden: false,
                tilt: Tilt::REST,
            })
            .collect();
        self.notice.visible = false;
        self.field = Some(ConstellationField::new(
            self.items.len(),
            width,
            height,
            self.settings,
            rng,
        ));
        self.load_state = LoadState::Loaded;
        self.enter_view(PageView::Constellation);
        // a query typed while the fetch was in flight still applies
        self.refilter();
    }

    pub fn fail_load(&mut self, error: impl Into<String>) {
        self.items = Rc::from(Vec::new());
        self.cards.clear();
        self.field = None;
        self.load_state = LoadState::Failed(error.into());
    }

    pub fn items(&self) -> &Rc<[CatalogItem]> {
        &self.items
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn notice(&self) -> NoticeState {
        self.notice
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn view(&self) -> Option<PageView> {
        self.view.current()
    }

    pub fn field(&self) -> Option<&ConstellationField> {
        self.field.as_ref()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn visible_count(&self) -> usize {
        self.cards.iter().filter(|card| !card.hidden).count()
    }

    fn enter_view(&mut self, view: PageView) -> bool {
        let changed = self.view.enter(view);
        if let Some(field) = self.field.as_mut() {
            field.set_running(view.presentation().animating);
        }
        changed
    }

    /// Filtering only affects cards, so the grid is brought up first.
    pub fn apply_filter(&mut self, query: &str) {
        if self.view.is(PageView::Constellation) {
            self.enter_view(PageView::Grid);
        }
        self.query = query.to_string();
        self.refilter();
    }

    fn refilter(&mut self) {
        if self.load_state != LoadState::Loaded {
            return;
        }
        let outcome = filter_items(&self.items, &self.query);
        for (card, visible) in self.cards.iter_mut().zip(outcome.visible) {
            card.hidden = !visible;
        }
        self.notice.update(outcome.any_visible);
    }

    /// The grid toggle: grid view with the query cleared.
    pub fn show_grid_reset(&mut self) {
        self.enter_view(PageView::Grid);
        self.query.clear();
        self.refilter();
    }

    pub fn show_constellation(&mut self) -> bool {
        self.enter_view(PageView::Constellation)
    }

    pub fn resize_field(&mut self, width: f64, height: f64) {
        if let Some(field) = self.field.as_mut() {
            field.resize(width, height);
        }
    }

    pub fn tick(&mut self, pointer: Option<(f64, f64)>) -> Option<usize> {
        self.field.as_mut().and_then(|field| field.step(pointer))
    }

    /// Star click: shows the matching card alone in the grid and copies the
    /// item name into the search box. The filter itself is not run.
    pub fn select_hovered_star(&mut self) -> Option<usize> {
        if !self.view.is(PageView::Constellation) {
            return None;
        }
        let index = self.field.as_ref()?.hovered()?;
        let name = self.items.get(index)?.name.clone();
        self.enter_view(PageView::Grid);
        for card in &mut self.cards {
            card.hidden = card.index != index;
        }
        self.notice.visible = false;
        self.query = name;
        Some(index)
    }

    pub fn tilt_card(&mut self, index: usize, rect: CardRect, client_x: f64, client_y: f64) -> Option<Tilt> {
        let card = self.cards.get_mut(index)?;
        card.tilt = Tilt::from_pointer(rect, client_x, client_y);
        Some(card.tilt)
    }

    pub fn reset_card_tilt(&mut self, index: usize) -> Option<Tilt> {
        let card = self.cards.get_mut(index)?;
        card.tilt = Tilt::REST;
        Some(card.tilt)
    }
}
