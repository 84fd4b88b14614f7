use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use js_sys::Date;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement};

use vitrine_core::catalog::LOAD_ERROR_TEXT;
use vitrine_core::{CatalogItem, PageModel, StarCanvas};

use crate::card_view::{CardAction, CardGrid, CardHooks};
use crate::catalog_loader;
use crate::constellation_view::{ConstellationHooks, ConstellationView};
use crate::landing_view::LandingView;
use crate::page_config;

const HIDDEN_CLASS: &str = "hidden";
const ACTIVE_CLASS: &str = "active";

/// The fixed element hooks of `index.html`.
pub(crate) struct PageElements {
    document: Document,
    card_container: Element,
    search_input: HtmlInputElement,
    landing_page: Element,
    main_content: Element,
    enter_button: Element,
    constellation_container: HtmlElement,
    constellation_toggle: Element,
    grid_toggle: Element,
}

impl PageElements {
    pub(crate) fn lookup(document: &Document) -> Result<Self, String> {
        let card_container = document
            .query_selector(".card-container")
            .ok()
            .flatten()
            .ok_or_else(|| "missing .card-container".to_string())?;
        let search_input = by_id(document, "search-input")?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| "#search-input is not an input".to_string())?;
        let constellation_container = by_id(document, "constellation-container")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| "#constellation-container is not an html element".to_string())?;
        Ok(Self {
            document: document.clone(),
            card_container,
            search_input,
            landing_page: by_id(document, "landing-page")?,
            main_content: by_id(document, "main-content")?,
            enter_button: by_id(document, "enter-button")?,
            constellation_container,
            constellation_toggle: by_id(document, "constellation-view-toggle")?,
            grid_toggle: by_id(document, "grid-view-toggle")?,
        })
    }
}

fn by_id(document: &Document, id: &str) -> Result<Element, String> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| format!("missing #{id}"))
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

thread_local! {
    // keeps the app and its listeners alive for the page lifetime
    static PAGE_APP: RefCell<Option<Rc<PageApp>>> = RefCell::new(None);
}

pub(crate) fn run() {
    #[cfg(target_arch = "wasm32")]
    {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let elements = match PageElements::lookup(&document) {
            Ok(elements) => elements,
            Err(err) => {
                console::error!("page: cannot start", err);
                return;
            }
        };
        let config = page_config::load_page_config();
        let app = PageApp::new(elements);
        app.install_listeners();
        PAGE_APP.with(|slot| {
            *slot.borrow_mut() = Some(Rc::clone(&app));
        });
        spawn_local(async move {
            app.load_catalog(&config.catalog_url).await;
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("vitrine only runs on wasm32 targets");
    }
}

/// Ties the page model to the DOM: every event goes through `PageModel` and
/// `sync` mirrors the result back onto the elements.
pub(crate) struct PageApp {
    model: RefCell<PageModel>,
    elements: PageElements,
    cards: CardGrid,
    constellation: RefCell<Option<Rc<ConstellationView>>>,
    landing: RefCell<Option<Rc<LandingView>>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl PageApp {
    pub(crate) fn new(elements: PageElements) -> Rc<Self> {
        let cards = CardGrid::new(elements.document.clone(), elements.card_container.clone());
        Rc::new(Self {
            model: RefCell::new(PageModel::default()),
            elements,
            cards,
            constellation: RefCell::new(None),
            landing: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();

        let app = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.elements.search_input,
            "input",
            move |_event: &Event| {
                let query = app.elements.search_input.value();
                app.apply_filter(&query);
            },
        ));

        let app = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.elements.grid_toggle,
            "click",
            move |_event: &Event| {
                app.show_grid_reset();
            },
        ));

        let app = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.elements.constellation_toggle,
            "click",
            move |_event: &Event| {
                app.show_constellation();
            },
        ));

        *self.listeners.borrow_mut() = listeners;
        *self.landing.borrow_mut() = Some(LandingView::install(
            self.elements.landing_page.clone(),
            self.elements.main_content.clone(),
            &self.elements.enter_button,
        ));
    }

    pub(crate) async fn load_catalog(self: &Rc<Self>, url: &str) {
        match catalog_loader::fetch_catalog(url).await {
            Ok(items) => {
                if let Err(err) = self.show_catalog(items) {
                    console::error!("page: render failed", err);
                }
            }
            Err(err) => {
                console::error!("catalog: load failed", url, err.to_string());
                self.model.borrow_mut().fail_load(err.to_string());
                self.show_load_error();
            }
        }
    }

    /// The error text takes the place of the card grid, so the grid is shown
    /// and the constellation hidden regardless of the current view.
    fn show_load_error(&self) {
        self.cards.show_error(LOAD_ERROR_TEXT);
        toggle_class(&self.elements.card_container, HIDDEN_CLASS, false);
        toggle_class(&self.elements.constellation_container, HIDDEN_CLASS, true);
    }

    pub(crate) fn show_catalog(self: &Rc<Self>, items: Vec<CatalogItem>) -> Result<(), JsValue> {
        self.cards.render(&items, &self.card_hooks())?;
        let view = self.ensure_constellation()?;
        let (width, height) = view.size();
        let mut rng = SmallRng::seed_from_u64(Date::now() as u64);
        self.model.borrow_mut().load(items, width, height, &mut rng);
        self.sync();
        Ok(())
    }

    fn card_hooks(self: &Rc<Self>) -> CardHooks {
        let app = Rc::clone(self);
        CardHooks {
            on_action: Rc::new(move |action| app.on_card_action(action)),
        }
    }

    fn ensure_constellation(self: &Rc<Self>) -> Result<Rc<ConstellationView>, JsValue> {
        if let Some(view) = self.constellation.borrow().as_ref() {
            return Ok(Rc::clone(view));
        }
        let app_for_frame = Rc::clone(self);
        let app_for_click = Rc::clone(self);
        let app_for_resize = Rc::clone(self);
        let hooks = ConstellationHooks {
            on_frame: Rc::new(move |canvas: &mut dyn StarCanvas, pointer: Option<(f64, f64)>| {
                let mut model = app_for_frame.model.borrow_mut();
                model.tick(pointer);
                if let Some(field) = model.field() {
                    field.draw(canvas, model.items());
                }
            }),
            on_click: Rc::new(move || app_for_click.select_hovered_star()),
            on_resize: Rc::new(move |width: f64, height: f64| {
                if let Ok(mut model) = app_for_resize.model.try_borrow_mut() {
                    model.resize_field(width, height);
                }
            }),
        };
        let view = ConstellationView::mount(
            &self.elements.document,
            self.elements.constellation_container.clone(),
            hooks,
        )?;
        *self.constellation.borrow_mut() = Some(Rc::clone(&view));
        Ok(view)
    }

    fn on_card_action(&self, action: CardAction) {
        match action {
            CardAction::Tilt {
                index,
                rect,
                client_x,
                client_y,
            } => {
                let tilt = self.model.borrow_mut().tilt_card(index, rect, client_x, client_y);
                if let Some(tilt) = tilt {
                    self.cards.apply_tilt(index, tilt);
                }
            }
            CardAction::Rest { index } => {
                let tilt = self.model.borrow_mut().reset_card_tilt(index);
                if let Some(tilt) = tilt {
                    self.cards.apply_tilt(index, tilt);
                }
            }
            CardAction::Open { index } => {
                let link = self
                    .model
                    .borrow()
                    .items()
                    .get(index)
                    .map(|item| item.link.clone());
                let (Some(link), Some(window)) = (link, web_sys::window()) else {
                    return;
                };
                if window.open_with_url_and_target(&link, "_blank").is_err() {
                    console::warn!("card: window.open failed", link);
                }
            }
        }
    }

    pub(crate) fn apply_filter(self: &Rc<Self>, query: &str) {
        self.model.borrow_mut().apply_filter(query);
        self.sync();
    }

    pub(crate) fn show_grid_reset(self: &Rc<Self>) {
        self.model.borrow_mut().show_grid_reset();
        self.sync();
    }

    pub(crate) fn show_constellation(self: &Rc<Self>) {
        self.model.borrow_mut().show_constellation();
        self.sync();
    }

    pub(crate) fn select_hovered_star(self: &Rc<Self>) {
        let selected = self.model.borrow_mut().select_hovered_star();
        let Some(index) = selected else {
            return;
        };
        self.sync();
        self.cards.scroll_into_view(index);
    }

    /// Mirrors the model onto the DOM. The model borrow is released before
    /// the animator is touched, as starting it may resize the field.
    fn sync(self: &Rc<Self>) {
        let animate = {
            let model = self.model.borrow();
            self.cards.sync(model.cards(), model.notice());
            if self.elements.search_input.value() != model.query() {
                self.elements.search_input.set_value(model.query());
            }
            model.view().map(|view| {
                let presentation = view.presentation();
                toggle_class(&self.elements.card_container, HIDDEN_CLASS, !presentation.cards_visible);
                toggle_class(
                    &self.elements.constellation_container,
                    HIDDEN_CLASS,
                    !presentation.constellation_visible,
                );
                toggle_class(&self.elements.grid_toggle, ACTIVE_CLASS, presentation.grid_toggle_active);
                toggle_class(
                    &self.elements.constellation_toggle,
                    ACTIVE_CLASS,
                    presentation.constellation_toggle_active,
                );
                presentation.animating && model.field().is_some()
            })
        };
        let Some(animate) = animate else {
            return;
        };
        let view = self.constellation.borrow().clone();
        if let Some(view) = view {
            if animate {
                view.start();
            } else {
                view.stop();
            }
        }
    }
}
