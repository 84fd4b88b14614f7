use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, HtmlElement, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use vitrine_core::catalog::{LINK_TEXT, NO_RESULTS_TEXT};
use vitrine_core::{CardRecord, CardRect, CatalogItem, NoticeState, Tilt};

const CARD_CLASS: &str = "card";
const CARD_HIDDEN_CLASS: &str = "card-hidden";
const NO_RESULTS_CLASS: &str = "no-results";

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum CardAction {
    Tilt {
        index: usize,
        rect: CardRect,
        client_x: f64,
        client_y: f64,
    },
    Rest {
        index: usize,
    },
    Open {
        index: usize,
    },
}

#[derive(Clone)]
pub(crate) struct CardHooks {
    pub(crate) on_action: Rc<dyn Fn(CardAction)>,
}

struct CardNode {
    root: HtmlElement,
    _listeners: Vec<EventListener>,
}

/// The `.card-container` grid: one `<article>` per catalog item plus the
/// shared "no results" notice.
pub(crate) struct CardGrid {
    document: Document,
    container: Element,
    cards: RefCell<Vec<CardNode>>,
    notice: RefCell<Option<Element>>,
}

impl CardGrid {
    pub(crate) fn new(document: Document, container: Element) -> Self {
        Self {
            document,
            container,
            cards: RefCell::new(Vec::new()),
            notice: RefCell::new(None),
        }
    }

    #[cfg(test)]
    pub(crate) fn container(&self) -> &Element {
        &self.container
    }

    pub(crate) fn card_count(&self) -> usize {
        self.cards.borrow().len()
    }

    /// Full rebuild; existing cards and the notice are discarded.
    pub(crate) fn render(&self, items: &[CatalogItem], hooks: &CardHooks) -> Result<(), JsValue> {
        self.container.set_inner_html("");
        self.notice.borrow_mut().take();
        let mut nodes = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let (root, link) = self.build_card(index, item)?;
            let listeners = install_card_listeners(&root, &link, index, hooks);
            self.container.append_child(&root)?;
            nodes.push(CardNode {
                root,
                _listeners: listeners,
            });
        }
        *self.cards.borrow_mut() = nodes;
        Ok(())
    }

    fn build_card(&self, index: usize, item: &CatalogItem) -> Result<(HtmlElement, Element), JsValue> {
        let card = self
            .document
            .create_element("article")?
            .dyn_into::<HtmlElement>()?;
        card.set_class_name(CARD_CLASS);
        card.set_attribute("data-id", &index.to_string())?;

        let logo = self.document.create_element("img")?;
        logo.set_attribute("src", &item.logo_url)?;
        logo.set_attribute("alt", &item.logo_alt())?;
        logo.set_class_name("card-logo");
        card.append_child(&logo)?;

        let title = self.document.create_element("h2")?;
        title.set_text_content(Some(&item.name));
        card.append_child(&title)?;

        let year = self.document.create_element("p")?;
        year.set_class_name("card-year");
        year.set_text_content(Some(&item.creation_label()));
        card.append_child(&year)?;

        let description = self.document.create_element("p")?;
        description.set_text_content(Some(&item.description));
        card.append_child(&description)?;

        let link = self.document.create_element("a")?;
        link.set_attribute("href", &item.link)?;
        link.set_attribute("target", "_blank")?;
        link.set_attribute("rel", "noopener noreferrer")?;
        link.set_text_content(Some(LINK_TEXT));
        card.append_child(&link)?;

        Ok((card, link))
    }

    pub(crate) fn sync(&self, records: &[CardRecord], notice: NoticeState) {
        for (node, record) in self.cards.borrow().iter().zip(records) {
            let _ = node
                .root
                .class_list()
                .toggle_with_force(CARD_HIDDEN_CLASS, record.hidden);
        }
        self.sync_notice(notice);
    }

    fn sync_notice(&self, notice: NoticeState) {
        if !notice.created {
            return;
        }
        let mut slot = self.notice.borrow_mut();
        if slot.is_none() {
            let Ok(element) = self.document.create_element("p") else {
                return;
            };
            element.set_class_name(NO_RESULTS_CLASS);
            element.set_text_content(Some(NO_RESULTS_TEXT));
            let _ = self.container.append_child(&element);
            *slot = Some(element);
        }
        if let Some(element) = slot.as_ref() {
            let display = if notice.visible { "display: block;" } else { "display: none;" };
            let _ = element.set_attribute("style", display);
        }
    }

    pub(crate) fn apply_tilt(&self, index: usize, tilt: Tilt) {
        let cards = self.cards.borrow();
        let Some(node) = cards.get(index) else {
            return;
        };
        let style = node.root.style();
        let _ = style.set_property("transform", &tilt.transform_css());
        let _ = style.set_property("box-shadow", tilt.shadow_css());
    }

    pub(crate) fn scroll_into_view(&self, index: usize) {
        let cards = self.cards.borrow();
        let Some(node) = cards.get(index) else {
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        node.root
            .scroll_into_view_with_scroll_into_view_options(&options);
    }

    /// Replaces the grid with a static message; used when the catalog cannot
    /// be loaded.
    pub(crate) fn show_error(&self, text: &str) {
        self.cards.borrow_mut().clear();
        self.notice.borrow_mut().take();
        self.container.set_inner_html("");
        let Ok(message) = self.document.create_element("p") else {
            return;
        };
        message.set_class_name(NO_RESULTS_CLASS);
        message.set_text_content(Some(text));
        let _ = self.container.append_child(&message);
    }
}

fn install_card_listeners(
    card: &HtmlElement,
    link: &Element,
    index: usize,
    hooks: &CardHooks,
) -> Vec<EventListener> {
    let mut listeners = Vec::with_capacity(4);

    // the anchor keeps its default behaviour but must not reach the card
    listeners.push(EventListener::new(link, "click", |event: &Event| {
        event.stop_propagation();
    }));

    let on_action = hooks.on_action.clone();
    listeners.push(EventListener::new(card, "click", move |_event: &Event| {
        on_action(CardAction::Open { index });
    }));

    let on_action = hooks.on_action.clone();
    let card_for_move = card.clone();
    listeners.push(EventListener::new(card, "mousemove", move |event: &Event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let bounds = card_for_move.get_bounding_client_rect();
        on_action(CardAction::Tilt {
            index,
            rect: CardRect {
                left: bounds.left(),
                top: bounds.top(),
                width: bounds.width(),
                height: bounds.height(),
            },
            client_x: event.client_x() as f64,
            client_y: event.client_y() as f64,
        });
    }));

    let on_action = hooks.on_action.clone();
    listeners.push(EventListener::new(card, "mouseleave", move |_event: &Event| {
        on_action(CardAction::Rest { index });
    }));

    listeners
}
