//! Browser bindings: DOM elements as layout boxes, absolutely positioned divs
//! as guide primitives.

use kurbo::{Rect, Vec2};
use pageguide_core::config::GuideConfig;
use pageguide_core::geometry::{Bounds, LayoutElement};
use pageguide_core::session::GuideSession;
use pageguide_core::surface::{GuideSurface, LineStyle};
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use crate::css;

/// A page element measured through `getBoundingClientRect`.
#[derive(Clone, PartialEq)]
pub struct DomElement(pub HtmlElement);

impl DomElement {
    /// Page scroll of the window owning this element.
    fn scroll(&self) -> Vec2 {
        let window = self
            .0
            .owner_document()
            .and_then(|doc| doc.default_view())
            .or_else(web_sys::window);
        match window {
            Some(w) => Vec2::new(w.scroll_x().unwrap_or(0.0), w.scroll_y().unwrap_or(0.0)),
            None => Vec2::ZERO,
        }
    }
}

impl LayoutElement for DomElement {
    fn bounds(&self) -> Option<Bounds> {
        let r = self.0.get_bounding_client_rect();
        let viewport = Bounds::new(r.left(), r.top(), r.width(), r.height());
        Some(viewport.translate(self.scroll()))
    }
}

/// Draws guides as divs appended to a document body.
pub struct DomSurface {
    document: Option<Document>,
}

impl DomSurface {
    pub fn new() -> Self {
        Self {
            document: web_sys::window().and_then(|w| w.document()),
        }
    }

    /// Draw into the document that owns `element`, e.g. an editor iframe.
    pub fn use_document_of(&mut self, element: &HtmlElement) {
        if let Some(doc) = element.owner_document() {
            self.document = Some(doc);
        }
    }

    fn apply(element: &HtmlElement, properties: &[(&'static str, String)]) {
        let style = element.style();
        for (name, value) in properties {
            if let Err(e) = style.set_property(name, value) {
                log::warn!("Failed to set {} on guide: {:?}", name, e);
            }
        }
    }
}

impl Default for DomSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl GuideSurface for DomSurface {
    type Primitive = HtmlElement;

    fn create(&mut self, style: &LineStyle) -> Option<HtmlElement> {
        let document = self.document.as_ref()?;
        let body = document.body()?;
        let element: HtmlElement = match document.create_element("div") {
            Ok(e) => e.dyn_into().ok()?,
            Err(e) => {
                log::warn!("Failed to create guide element: {:?}", e);
                return None;
            }
        };
        element.set_class_name(&style.class);
        Self::apply(&element, &css::base_properties(style));
        if let Err(e) = body.append_child(&element) {
            log::warn!("Failed to attach guide element: {:?}", e);
            return None;
        }
        Some(element)
    }

    fn place(&mut self, primitive: &HtmlElement, rect: Rect) {
        Self::apply(primitive, &css::placement_properties(rect));
    }

    fn hide(&mut self, primitive: &HtmlElement) {
        if let Err(e) = primitive.style().set_property("display", "none") {
            log::warn!("Failed to hide guide: {:?}", e);
        }
    }

    fn remove(&mut self, primitive: HtmlElement) {
        primitive.remove();
    }
}

/// Guide provider handed to the page editor.
#[wasm_bindgen]
pub struct CanvasGuideProvider {
    session: Option<GuideSession<DomElement, DomSurface>>,
}

#[wasm_bindgen]
impl CanvasGuideProvider {
    /// Create a provider. `config_json` overrides the defaults; a malformed
    /// config is logged and ignored.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> CanvasGuideProvider {
        let config = match config_json.as_deref().map(GuideConfig::from_json) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                log::warn!("Ignoring guide config: {}", e);
                GuideConfig::default()
            }
            None => GuideConfig::default(),
        };
        Self {
            session: Some(GuideSession::new(config, DomSurface::new())),
        }
    }

    /// Begin a gesture. `action` is `"move"` or `"resize"`; `elements` are the
    /// candidate boxes, null entries are skipped.
    #[wasm_bindgen(js_name = startDrag)]
    pub fn start_drag(&mut self, action: &str, elements: &js_sys::Array) {
        let Some(session) = self.session.as_mut() else {
            log::warn!("startDrag called after dispose");
            return;
        };

        let candidates: Vec<DomElement> = elements
            .iter()
            .filter_map(|value| value.dyn_into::<HtmlElement>().ok())
            .map(DomElement)
            .collect();
        if let Some(first) = candidates.first() {
            session.surface_mut().use_document_of(&first.0);
        }
        if let Err(e) = session.start_named_drag(action, candidates) {
            log::warn!("{}", e);
        }
    }

    /// Update guides for the dragged element. Returns the number of guides shown.
    #[wasm_bindgen(js_name = duringDrag)]
    pub fn during_drag(&mut self, element: Option<HtmlElement>) -> usize {
        let Some(session) = self.session.as_mut() else {
            return 0;
        };
        let moving = element.map(DomElement);
        session.during_drag(moving.as_ref()).len()
    }

    #[wasm_bindgen(js_name = endDrag)]
    pub fn end_drag(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.end_drag();
        }
    }

    /// Remove every guide element. The provider is inert afterwards.
    pub fn dispose(&mut self) {
        if let Some(session) = self.session.take() {
            session.dispose();
        }
    }
}

/// Initialize panic reporting and logging for the browser.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to initialize logger");
    log::info!("Page guides ready");
}
