use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, Event, HtmlCanvasElement, HtmlElement, MouseEvent};

use vitrine_core::constellation::CANVAS_CORNER_RADIUS_PX;
use vitrine_core::{Rgba, StarCanvas};

#[derive(Clone)]
pub(crate) struct ConstellationHooks {
    /// Called once per animation frame with the pointer in canvas pixels.
    pub(crate) on_frame: Rc<dyn Fn(&mut dyn StarCanvas, Option<(f64, f64)>)>,
    pub(crate) on_click: Rc<dyn Fn()>,
    pub(crate) on_resize: Rc<dyn Fn(f64, f64)>,
}

/// `StarCanvas` backed by the 2d context of the constellation canvas.
struct CanvasPainter<'a> {
    ctx: &'a CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl StarCanvas for CanvasPainter<'_> {
    fn fill_background(&mut self, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.begin_path();
        if self.ctx.arc(x, y, radius.max(0.0), 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }

    fn fill_label(&mut self, text: &str, x: f64, y: f64, size_px: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.set_font(&format!("{size_px}px sans-serif"));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("bottom");
        let _ = self.ctx.fill_text(text, x, y);
    }
}

/// Canvas inside `#constellation-container` plus its frame loop. The loop only
/// re-requests frames while running; stopping never discards field state.
pub(crate) struct ConstellationView {
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    hooks: ConstellationHooks,
    pointer: Cell<Option<(f64, f64)>>,
    running: Cell<bool>,
    frame: RefCell<Option<AnimationFrame>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl ConstellationView {
    pub(crate) fn mount(
        document: &Document,
        container: HtmlElement,
        hooks: ConstellationHooks,
    ) -> Result<Rc<Self>, JsValue> {
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        canvas
            .style()
            .set_property("border-radius", &format!("{CANVAS_CORNER_RADIUS_PX}px"))?;
        container.append_child(&canvas)?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let view = Rc::new(Self {
            container,
            canvas,
            ctx,
            hooks,
            pointer: Cell::new(None),
            running: Cell::new(false),
            frame: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });
        view.fit_to_container();
        view.install_listeners();
        Ok(view)
    }

    pub(crate) fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    #[cfg(test)]
    pub(crate) fn is_running(&self) -> bool {
        self.running.get()
    }

    pub(crate) fn start(self: &Rc<Self>) {
        if self.running.replace(true) {
            return;
        }
        self.fit_to_container();
        self.schedule();
    }

    pub(crate) fn stop(&self) {
        self.running.set(false);
    }

    fn schedule(self: &Rc<Self>) {
        if self.frame.borrow().is_some() {
            return;
        }
        let view = Rc::clone(self);
        let handle = request_animation_frame(move |_timestamp| {
            view.frame.borrow_mut().take();
            if !view.running.get() {
                return;
            }
            view.fit_to_container();
            view.render_frame();
            view.schedule();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn render_frame(&self) {
        let (width, height) = self.size();
        let mut painter = CanvasPainter {
            ctx: &self.ctx,
            width,
            height,
        };
        (self.hooks.on_frame)(&mut painter, self.pointer.get());
    }

    /// Matches the drawing surface to the container. A hidden container
    /// reports zero, in which case the window size stands in.
    fn fit_to_container(&self) {
        let mut width = self.container.offset_width().max(0) as u32;
        let mut height = self.container.offset_height().max(0) as u32;
        if width == 0 || height == 0 {
            let window = web_sys::window();
            width = window
                .as_ref()
                .and_then(|window| window.inner_width().ok())
                .and_then(|value| value.as_f64())
                .unwrap_or(0.0) as u32;
            height = window
                .as_ref()
                .and_then(|window| window.inner_height().ok())
                .and_then(|value| value.as_f64())
                .unwrap_or(0.0) as u32;
        }
        if width == self.canvas.width() && height == self.canvas.height() {
            return;
        }
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        (self.hooks.on_resize)(width as f64, height as f64);
    }

    fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();

        let view = Rc::clone(self);
        listeners.push(EventListener::new(&self.canvas, "mousemove", move |event: &Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            view.pointer
                .set(Some((event.offset_x() as f64, event.offset_y() as f64)));
        }));

        let view = Rc::clone(self);
        listeners.push(EventListener::new(&self.canvas, "mouseleave", move |_event: &Event| {
            view.pointer.set(None);
        }));

        let view = Rc::clone(self);
        listeners.push(EventListener::new(&self.canvas, "click", move |_event: &Event| {
            (view.hooks.on_click)();
        }));

        if let Some(window) = web_sys::window() {
            let view = Rc::clone(self);
            listeners.push(EventListener::new(&window, "resize", move |_event: &Event| {
                view.fit_to_container();
            }));
        }

        *self.listeners.borrow_mut() = listeners;
    }
}
