use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use web_sys::{Element, Event};

use vitrine_core::{LandingGate, LANDING_REMOVAL_DELAY_MS};

const HIDDEN_CLASS: &str = "hidden";

/// Splash screen in front of `#main-content`; dismissed once by
/// `#enter-button` and then dropped from the document.
pub(crate) struct LandingView {
    landing: Element,
    main_content: Element,
    gate: RefCell<LandingGate>,
    removal: RefCell<Option<Timeout>>,
    listener: RefCell<Option<EventListener>>,
}

impl LandingView {
    pub(crate) fn install(landing: Element, main_content: Element, enter_button: &Element) -> Rc<Self> {
        let view = Rc::new(Self {
            landing,
            main_content,
            gate: RefCell::new(LandingGate::default()),
            removal: RefCell::new(None),
            listener: RefCell::new(None),
        });
        let view_for_click = Rc::clone(&view);
        let listener = EventListener::new(enter_button, "click", move |_event: &Event| {
            view_for_click.dismiss();
        });
        *view.listener.borrow_mut() = Some(listener);
        view
    }

    #[cfg(test)]
    pub(crate) fn gate(&self) -> LandingGate {
        *self.gate.borrow()
    }

    pub(crate) fn dismiss(self: &Rc<Self>) {
        if !self.gate.borrow_mut().dismiss() {
            return;
        }
        let _ = self.landing.class_list().add_1(HIDDEN_CLASS);
        let _ = self.main_content.class_list().remove_1(HIDDEN_CLASS);
        if let Some(body) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.body())
        {
            let _ = body.style().set_property("overflow-y", "auto");
        }
        let view = Rc::clone(self);
        let timeout = Timeout::new(LANDING_REMOVAL_DELAY_MS, move || {
            if view.gate.borrow_mut().finish_removal() {
                view.landing.remove();
                view.listener.borrow_mut().take();
            }
        });
        *self.removal.borrow_mut() = Some(timeout);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use vitrine_core::LandingState;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test(async)]
    async fn enter_button_reveals_content_and_removes_landing() {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let body = document.body().expect("body available");
        let landing = document.create_element("div").expect("create landing");
        let button = document
            .create_element("button")
            .expect("create button")
            .dyn_into::<HtmlElement>()
            .expect("html element");
        landing.append_child(&button).expect("append button");
        let main_content = document.create_element("main").expect("create main");
        main_content.set_class_name(HIDDEN_CLASS);
        body.append_child(&landing).expect("append landing");
        body.append_child(&main_content).expect("append main");

        let view = LandingView::install(landing.clone(), main_content.clone(), &button);
        button.click();
        assert_eq!(view.gate().state(), LandingState::Dismissed);
        assert!(landing.class_list().contains(HIDDEN_CLASS));
        assert!(!main_content.class_list().contains(HIDDEN_CLASS));
        assert!(landing.is_connected());

        TimeoutFuture::new(LANDING_REMOVAL_DELAY_MS + 100).await;
        assert_eq!(view.gate().state(), LandingState::Removed);
        assert!(!landing.is_connected());
    }
}
