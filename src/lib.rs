mod utils;

pub mod color;
pub mod config;
pub mod connections;
pub mod dom;
pub mod error;
pub mod field;
pub mod input;
pub mod particle;
pub mod pointer;
pub mod renderer;
pub mod scheduler;

pub use error::FieldError;
pub use renderer::Surface;

use crate::config::{ConstellationConfig, HeroConfig};
use crate::dom::{DomAnchorLayout, Listener};
use crate::field::{AnchorSet, Field, FieldStyle, ParticleSwarm, PointSource};
use crate::input::{InputState, SharedInput};
use crate::renderer::{CanvasRenderer, DrawTarget};
use crate::scheduler::{AnimationLoop, BrowserScheduler};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Element, KeyboardEvent, MouseEvent};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    // A second call finds the logger already set; that is fine
    let _ = console_log::init_with_level(log::Level::Info);
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

// A field together with the canvas it draws on
struct Layer<P: PointSource> {
    field: Field<P>,
    renderer: CanvasRenderer,
}

impl<P: PointSource> Layer<P> {
    fn new(field: Field<P>, mut renderer: CanvasRenderer) -> Self {
        renderer.resize(field.surface());
        Layer { field, renderer }
    }

    fn resize(&mut self, surface: Surface) {
        self.renderer.resize(surface);
        self.field.resize(surface);
    }

    fn frame(&mut self, input: &InputState, timestamp: f64) -> Result<(), FieldError> {
        self.field.render_frame(&mut self.renderer, input, timestamp)
    }
}

/// Input routing for the page plus the entry points for its canvas layers.
#[wasm_bindgen]
pub struct Backdrop {
    input: SharedInput,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl Backdrop {
    /// Starts tracking the pointer on the window and keys on the document.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Backdrop, JsValue> {
        let input = input::shared();
        let window = dom::window()?;
        let document = dom::document()?;

        let pointer_input = input.clone();
        let pointer = Listener::new(&window, "mousemove", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                pointer_input
                    .borrow_mut()
                    .on_pointer_move(mouse.client_x() as f64, mouse.client_y() as f64);
            }
        })?;

        let key_input = input.clone();
        let keys = Listener::new(&document, "keydown", move |event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                key_input.borrow_mut().on_key(&key.code());
            }
        })?;

        Ok(Backdrop {
            input,
            _listeners: vec![pointer, keys],
        })
    }

    /// Mouse-reactive particles filling the viewport. Returns `undefined`
    /// when the page has no such canvas.
    #[wasm_bindgen(js_name = attachHero)]
    pub fn attach_hero(&self, canvas_id: &str, config_json: Option<String>) -> Result<Option<FieldHandle>, JsValue> {
        absent_is_none("hero", self.hero(canvas_id, config_json.as_deref()))
    }

    /// Connection lines between the elements matching `node_selector`
    /// inside `container_selector`.
    #[wasm_bindgen(js_name = attachConstellation)]
    pub fn attach_constellation(
        &self,
        canvas_id: &str,
        container_selector: &str,
        node_selector: &str,
        config_json: Option<String>,
    ) -> Result<Option<FieldHandle>, JsValue> {
        absent_is_none(
            "constellation",
            self.constellation(canvas_id, container_selector, node_selector, config_json.as_deref()),
        )
    }

    #[wasm_bindgen(js_name = pointerMoved)]
    pub fn pointer_moved(&self, x: f64, y: f64) {
        self.input.borrow_mut().on_pointer_move(x, y);
    }

    /// Feeds a `KeyboardEvent.code`; true when it completed the sequence.
    #[wasm_bindgen(js_name = keyPressed)]
    pub fn key_pressed(&self, code: &str) -> bool {
        self.input.borrow_mut().on_key(code)
    }

    #[wasm_bindgen(js_name = rainbowMode)]
    pub fn rainbow_mode(&self) -> bool {
        self.input.borrow().mode.is_rainbow()
    }
}

impl Backdrop {
    fn hero(&self, canvas_id: &str, config_json: Option<&str>) -> Result<FieldHandle, FieldError> {
        let config: HeroConfig = config::from_json(config_json)?;
        let window = dom::window()?;
        let document = dom::document()?;
        let renderer = CanvasRenderer::new(dom::canvas_by_id(&document, canvas_id)?, canvas_id)?;

        let surface = dom::viewport_surface(&window);
        let swarm = ParticleSwarm::new(
            &mut rand::thread_rng(),
            config.particle_count,
            surface,
            config.physics.clone(),
        );
        let layer = Rc::new(RefCell::new(Layer::new(
            Field::new(swarm, surface, FieldStyle::from(&config)),
            renderer,
        )));

        let resize_layer = layer.clone();
        let resize_window = window.clone();
        let resize = Listener::new(&window, "resize", move |_| {
            resize_layer
                .borrow_mut()
                .resize(dom::viewport_surface(&resize_window));
        })?;

        log::info!("hero backdrop: {} particles on {:?}", config.particle_count, surface);
        FieldHandle::spawn(layer, self.input.clone(), "hero", config.profile, vec![resize])
    }

    fn constellation(
        &self,
        canvas_id: &str,
        container_selector: &str,
        node_selector: &str,
        config_json: Option<&str>,
    ) -> Result<FieldHandle, FieldError> {
        let config: ConstellationConfig = config::from_json(config_json)?;
        let window = dom::window()?;
        let document = dom::document()?;
        let container = dom::html_element(&document, container_selector)?;
        let renderer = CanvasRenderer::new(dom::canvas_by_id(&document, canvas_id)?, canvas_id)?;

        let surface = dom::element_surface(&container);
        let container_element: &Element = container.as_ref();
        let anchors = AnchorSet::new(DomAnchorLayout::new(container_element.clone(), node_selector));
        let layer = Rc::new(RefCell::new(Layer::new(
            Field::new(anchors, surface, FieldStyle::from(&config)),
            renderer,
        )));

        let resize_layer = layer.clone();
        let resize = Listener::new(&window, "resize", move |_| {
            resize_layer
                .borrow_mut()
                .resize(dom::element_surface(&container));
        })?;

        log::info!("constellation: {} on {:?}", node_selector, surface);
        FieldHandle::spawn(layer, self.input.clone(), "constellation", config.profile, vec![resize])
    }
}

fn absent_is_none(label: &str, attached: Result<FieldHandle, FieldError>) -> Result<Option<FieldHandle>, JsValue> {
    match attached {
        Ok(handle) => Ok(Some(handle)),
        Err(err) if err.is_absent() => {
            log::warn!("{} not attached: {}", label, err);
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// A running canvas layer. Dropping it (or `free()` from JS) stops the
/// animation and removes its listeners.
#[wasm_bindgen]
pub struct FieldHandle {
    animation: AnimationLoop<BrowserScheduler>,
    _listeners: Vec<Listener>,
}

impl FieldHandle {
    fn spawn<P: PointSource + 'static>(
        layer: Rc<RefCell<Layer<P>>>,
        input: SharedInput,
        label: &'static str,
        profile: bool,
        listeners: Vec<Listener>,
    ) -> Result<FieldHandle, FieldError> {
        let animation = AnimationLoop::new(BrowserScheduler::new()?, move |timestamp| {
            let _timer = if profile { Some(Timer::new(label)) } else { None };
            let input = input.borrow();
            if let Err(err) = layer.borrow_mut().frame(&input, timestamp) {
                log::error!("{} frame failed: {}", label, err);
            }
        });
        animation.start()?;
        Ok(FieldHandle {
            animation,
            _listeners: listeners,
        })
    }
}

#[wasm_bindgen]
impl FieldHandle {
    pub fn start(&self) -> Result<(), JsValue> {
        self.animation.start().map_err(JsValue::from)
    }

    pub fn stop(&self) {
        self.animation.stop();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }
}
