// DOM binding: implements the host contract over web-sys elements and wires
// browser listeners to a TimelineController. Compiled with the `web` feature.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, MouseEvent,
    NodeList, TouchEvent,
};

use crate::clock::{Clock, SystemClock};
use crate::config::TimelineConfig;
use crate::controller::{GestureOutcome, TimelineController};
use crate::geometry::{Cursor, TimelineItem, Track, TrackTransform, Viewport};
use crate::input::{InputKind, PointerSample};

/// Controller specialised to DOM elements.
pub type DomController = TimelineController<DomItem, DomViewport, DomTrack, SystemClock>;

/// Errors raised while mounting a timeline onto the document.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("selector '{selector}' failed: {message}")]
    Selector { selector: String, message: String },
    #[error("no element matches '{0}'")]
    Missing(String),
    #[error("{0} element is not an HTMLElement")]
    NotHtml(&'static str),
    #[error("failed to register '{event}' listener: {message}")]
    Listener { event: &'static str, message: String },
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn query_one(root: &Element, selector: &str) -> Result<Option<Element>, WebError> {
    root.query_selector(selector).map_err(|e| WebError::Selector {
        selector: selector.to_string(),
        message: js_message(&e),
    })
}

fn query_all(root: &Element, selector: &str) -> Result<NodeList, WebError> {
    root.query_selector_all(selector)
        .map_err(|e| WebError::Selector {
            selector: selector.to_string(),
            message: js_message(&e),
        })
}

fn html_elements(nodes: &NodeList) -> Vec<HtmlElement> {
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

// ── Host contract over the DOM ──────────────────────────────────────────

/// A timeline entry element and its optional close button.
pub struct DomItem {
    element: HtmlElement,
    close: Option<Element>,
    active_class: Rc<str>,
}

impl DomItem {
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl TimelineItem for DomItem {
    fn offset_left(&self) -> Option<f64> {
        Some(f64::from(self.element.offset_left()))
    }

    fn width(&self) -> Option<f64> {
        Some(f64::from(self.element.client_width()))
    }

    fn set_active(&mut self, active: bool) {
        if let Err(e) = self
            .element
            .class_list()
            .toggle_with_force(&self.active_class, active)
        {
            log::warn!("timeline: failed to toggle '{}': {}", self.active_class, js_message(&e));
        }
    }
}

/// The wrapper element the track scrolls behind.
pub struct DomViewport {
    element: HtmlElement,
}

impl Viewport for DomViewport {
    fn width(&self) -> Option<f64> {
        Some(f64::from(self.element.client_width()))
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        if let Err(e) = self
            .element
            .style()
            .set_property("cursor", cursor.css_value())
        {
            log::warn!("timeline: failed to set cursor: {}", js_message(&e));
        }
    }
}

/// The translated strip holding the items.
pub struct DomTrack {
    element: HtmlElement,
}

impl Track for DomTrack {
    fn content_width(&self) -> Option<f64> {
        Some(f64::from(self.element.scroll_width()))
    }

    fn apply_transform(&mut self, transform: TrackTransform) {
        if let Err(e) = self
            .element
            .style()
            .set_property("transform", &transform.to_string())
        {
            log::warn!("timeline: failed to write transform: {}", js_message(&e));
        }
    }
}

// ── Event decoding ──────────────────────────────────────────────────────

/// Which touch list a touch event's coordinate is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TouchSource {
    /// `touches`: contacts still on the surface.
    Held,
    /// `changedTouches`: contacts that just lifted.
    Lifted,
}

impl TouchSource {
    fn for_event(event: &str) -> Self {
        match event {
            "touchend" | "touchcancel" => TouchSource::Lifted,
            _ => TouchSource::Held,
        }
    }
}

fn mouse_sample(event: &Event) -> PointerSample {
    let x = event
        .dyn_ref::<MouseEvent>()
        .map(|m| f64::from(m.client_x()));
    PointerSample::new(InputKind::Mouse, x)
}

/// First touch of the list the event type calls for, plus how many contacts
/// are currently held.
fn touch_sample(event: &Event) -> (PointerSample, u32) {
    let Some(touch_event) = event.dyn_ref::<TouchEvent>() else {
        return (PointerSample::new(InputKind::Touch, None), 0);
    };
    let list = match TouchSource::for_event(&event.type_()) {
        TouchSource::Held => touch_event.touches(),
        TouchSource::Lifted => touch_event.changed_touches(),
    };
    let x = list.get(0).map(|t| f64::from(t.client_x()));
    (
        PointerSample::new(InputKind::Touch, x),
        touch_event.touches().length(),
    )
}

fn decode(kind: InputKind, event: &Event) -> (PointerSample, u32) {
    match kind {
        InputKind::Mouse => (mouse_sample(event), 0),
        InputKind::Touch => touch_sample(event),
    }
}

/// A click carries a pointer position unless it was synthesised from the
/// keyboard (`detail == 0`).
fn click_sample(event: &Event) -> Option<PointerSample> {
    match event.dyn_ref::<MouseEvent>() {
        Some(m) if m.detail() == 0 => None,
        _ => Some(mouse_sample(event)),
    }
}

// ── Event routing ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewportAction {
    Start,
    Move,
    End,
}

/// Wrapper listeners: event, input kind, action, passive. Every event that
/// can finish a gesture maps to `End`.
const VIEWPORT_EVENTS: [(&str, InputKind, ViewportAction, bool); 8] = [
    ("mousedown", InputKind::Mouse, ViewportAction::Start, true),
    ("touchstart", InputKind::Touch, ViewportAction::Start, false),
    ("mousemove", InputKind::Mouse, ViewportAction::Move, true),
    ("touchmove", InputKind::Touch, ViewportAction::Move, false),
    ("mouseup", InputKind::Mouse, ViewportAction::End, true),
    ("mouseleave", InputKind::Mouse, ViewportAction::End, true),
    ("touchend", InputKind::Touch, ViewportAction::End, true),
    ("touchcancel", InputKind::Touch, ViewportAction::End, true),
];

/// Close-button listeners: event, and whether it also ends the gesture.
/// Propagation is stopped on both, so the wrapper never sees that touchend.
const CLOSE_EVENTS: [(&str, bool); 2] = [("click", false), ("touchend", true)];

/// Apply a wrapper event. Returns whether the browser default should be
/// suppressed: single-contact touch start, and single-contact touch move
/// while dragging.
fn route_viewport<I, V, T, C>(
    controller: &mut TimelineController<I, V, T, C>,
    action: ViewportAction,
    sample: PointerSample,
    contacts: u32,
) -> bool
where
    I: TimelineItem,
    V: Viewport,
    T: Track,
    C: Clock,
{
    let single_touch = sample.kind == InputKind::Touch && contacts == 1;
    match action {
        ViewportAction::Start => {
            controller.on_gesture_start(sample);
            single_touch
        }
        ViewportAction::Move => {
            let suppress = single_touch && controller.is_dragging();
            controller.on_gesture_move(sample);
            suppress
        }
        ViewportAction::End => {
            controller.end_gesture();
            false
        }
    }
}

fn route_item_click<I, V, T, C>(
    controller: &mut TimelineController<I, V, T, C>,
    index: usize,
    sample: Option<PointerSample>,
) -> GestureOutcome
where
    I: TimelineItem,
    V: Viewport,
    T: Track,
    C: Clock,
{
    match sample {
        Some(sample) => controller.on_item_release(index, sample),
        None => controller.on_item_activate(index),
    }
}

fn route_close<I, V, T, C>(
    controller: &mut TimelineController<I, V, T, C>,
    index: usize,
    ends_gesture: bool,
) -> GestureOutcome
where
    I: TimelineItem,
    V: Viewport,
    T: Track,
    C: Clock,
{
    let outcome = controller.on_close(index);
    if ends_gesture {
        controller.end_gesture();
    }
    outcome
}

/// Keep the timelines that mounted. A wrapper that fails is logged and
/// skipped; the others stay live.
fn keep_mounted<H>(results: impl IntoIterator<Item = Result<H, WebError>>) -> Vec<H> {
    results
        .into_iter()
        .enumerate()
        .filter_map(|(i, result)| match result {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("timeline: skipping wrapper {i}: {e}");
                None
            }
        })
        .collect()
}

// ── Listener wiring ─────────────────────────────────────────────────────

struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn remove(&self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("timeline: failed to remove '{}' listener: {}", self.event, js_message(&e));
        }
    }
}

/// A timeline mounted on one wrapper element. Dropping the handle (or
/// calling [`TimelineHandle::detach`]) removes every listener it added.
pub struct TimelineHandle {
    controller: Rc<RefCell<DomController>>,
    listeners: Vec<Listener>,
}

impl TimelineHandle {
    /// Mount a timeline on `wrapper`, finding the track and items inside it
    /// with the configured selectors.
    pub fn attach(wrapper: HtmlElement, config: TimelineConfig) -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;

        let track_selector = config.selectors.track.clone();
        let track = query_one(&wrapper, &track_selector)?
            .ok_or_else(|| WebError::Missing(track_selector.clone()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| WebError::NotHtml("track"))?;

        let active_class: Rc<str> = Rc::from(config.appearance.active_class.as_str());
        let mut items = Vec::new();
        for element in html_elements(&query_all(&track, &config.selectors.item)?) {
            let close = query_one(&element, &config.selectors.close)?;
            items.push(DomItem {
                element,
                close,
                active_class: Rc::clone(&active_class),
            });
        }
        log::info!("timeline: mounting with {} items", items.len());

        let controller = TimelineController::with_system_clock(
            items,
            DomViewport {
                element: wrapper.clone(),
            },
            DomTrack { element: track },
            config,
        );
        let mut handle = Self {
            controller: Rc::new(RefCell::new(controller)),
            listeners: Vec::new(),
        };
        // On error the partially wired handle drops and unregisters itself.
        handle.wire_items()?;
        handle.wire_viewport(&wrapper)?;
        handle.listen(&window, "resize", true, |c, _| c.recenter_on_resize())?;
        Ok(handle)
    }

    /// Mount one independent timeline per element matching the wrapper
    /// selector. Wrappers that cannot be mounted (no track, say) are logged
    /// and skipped; only a failing wrapper query is an error.
    pub fn attach_all(document: &Document, config: &TimelineConfig) -> Result<Vec<Self>, WebError> {
        let root = document.document_element().ok_or(WebError::NoDocument)?;
        let wrappers = html_elements(&query_all(&root, &config.selectors.wrapper)?);
        Ok(keep_mounted(
            wrappers
                .into_iter()
                .map(|wrapper| Self::attach(wrapper, config.clone())),
        ))
    }

    /// Run `f` against the controller. Returns `None` if the controller is
    /// currently borrowed by an event handler.
    pub fn with_controller<R>(&self, f: impl FnOnce(&mut DomController) -> R) -> Option<R> {
        let mut controller = self.controller.try_borrow_mut().ok()?;
        Some(f(&mut *controller))
    }

    /// Remove all listeners and release the controller.
    pub fn detach(self) {}

    fn wire_items(&mut self) -> Result<(), WebError> {
        let targets: Vec<(usize, EventTarget, Option<EventTarget>)> = self
            .controller
            .borrow()
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let close = item.close.clone().map(EventTarget::from);
                (i, EventTarget::from(item.element.clone()), close)
            })
            .collect();

        for (index, item, close) in targets {
            self.listen(&item, "click", true, move |c, e| {
                route_item_click(c, index, click_sample(e));
            })?;
            self.listen(&item, "touchend", true, move |c, e| {
                let (sample, _) = touch_sample(e);
                c.on_item_release(index, sample);
            })?;

            let Some(close) = close else {
                continue;
            };
            for (event, ends_gesture) in CLOSE_EVENTS {
                self.listen(&close, event, true, move |c, e| {
                    e.stop_propagation();
                    route_close(c, index, ends_gesture);
                })?;
            }
        }
        Ok(())
    }

    fn wire_viewport(&mut self, wrapper: &HtmlElement) -> Result<(), WebError> {
        let target: &EventTarget = wrapper.as_ref();
        for (event, kind, action, passive) in VIEWPORT_EVENTS {
            self.listen(target, event, passive, move |c, e| {
                let (sample, contacts) = decode(kind, e);
                if route_viewport(c, action, sample, contacts) {
                    e.prevent_default();
                }
            })?;
        }
        Ok(())
    }

    fn listen<F>(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        passive: bool,
        mut handler: F,
    ) -> Result<(), WebError>
    where
        F: FnMut(&mut DomController, &Event) + 'static,
    {
        let controller = Rc::clone(&self.controller);
        let closure = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
            match controller.try_borrow_mut() {
                Ok(mut c) => handler(&mut *c, &e),
                Err(_) => log::debug!("timeline: dropped re-entrant '{event}' event"),
            }
        });

        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|e| WebError::Listener {
                event,
                message: js_message(&e),
            })?;

        self.listeners.push(Listener {
            target: target.clone(),
            event,
            closure,
        });
        Ok(())
    }
}

impl Drop for TimelineHandle {
    fn drop(&mut self) {
        for listener in &self.listeners {
            listener.remove();
        }
        log::debug!("timeline: detached {} listeners", self.listeners.len());
    }
}

// ── JavaScript entry point ──────────────────────────────────────────────

/// Every timeline on the page, mounted from JavaScript:
///
/// ```js
/// const timelines = new Timelines(JSON.stringify({ gesture: { touch_threshold_px: 20 } }));
/// // later
/// timelines.detach();
/// ```
#[wasm_bindgen]
pub struct Timelines {
    handles: Vec<TimelineHandle>,
}

#[wasm_bindgen]
impl Timelines {
    /// Mount on every wrapper in the document. `config_json` uses the same
    /// layout as the TOML config; omitted keys take their defaults. Fails only
    /// on bad configuration or a missing window or document.
    #[wasm_bindgen(constructor)]
    pub fn mount(config_json: Option<String>) -> Result<Timelines, JsValue> {
        let config = match config_json {
            Some(json) => TimelineConfig::from_json(&json).map_err(WebError::from)?,
            None => TimelineConfig::default(),
        };
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let document = window.document().ok_or(WebError::NoDocument)?;
        let handles = TimelineHandle::attach_all(&document, &config)?;
        Ok(Self { handles })
    }

    /// Number of mounted timelines.
    pub fn count(&self) -> usize {
        self.handles.len()
    }

    /// Recenter every timeline (e.g. after the host changed item layout).
    pub fn recenter(&self) {
        for handle in &self.handles {
            handle.with_controller(|c| c.recenter_on_resize());
        }
    }

    /// Remove every listener. The object is unusable afterwards.
    pub fn detach(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::geometry::fakes::{row, FakeItem, FakeTrack, FakeViewport};

    type Controller = TimelineController<FakeItem, FakeViewport, FakeTrack, ManualClock>;

    fn controller() -> Controller {
        TimelineController::new(
            row(10, 100.0),
            FakeViewport::new(300.0),
            FakeTrack::new(1000.0),
            TimelineConfig::default(),
            ManualClock::new(10_000.0),
        )
    }

    fn actions_for(action: ViewportAction) -> Vec<&'static str> {
        VIEWPORT_EVENTS
            .iter()
            .filter(|(_, _, a, _)| *a == action)
            .map(|(event, ..)| *event)
            .collect()
    }

    // ── Listener tables ──────────────────────────────────────────────

    #[test]
    fn every_gesture_ending_event_ends_the_gesture() {
        assert_eq!(
            actions_for(ViewportAction::End),
            ["mouseup", "mouseleave", "touchend", "touchcancel"]
        );
    }

    #[test]
    fn only_touch_start_and_move_are_non_passive() {
        let non_passive: Vec<_> = VIEWPORT_EVENTS
            .iter()
            .filter(|(.., passive)| !passive)
            .map(|(event, ..)| *event)
            .collect();
        assert_eq!(non_passive, ["touchstart", "touchmove"]);
    }

    #[test]
    fn event_kinds_match_names() {
        for (event, kind, ..) in VIEWPORT_EVENTS {
            let expected = if event.starts_with("touch") {
                InputKind::Touch
            } else {
                InputKind::Mouse
            };
            assert_eq!(kind, expected, "{event}");
        }
    }

    #[test]
    fn touch_source_by_event() {
        assert_eq!(TouchSource::for_event("touchstart"), TouchSource::Held);
        assert_eq!(TouchSource::for_event("touchmove"), TouchSource::Held);
        assert_eq!(TouchSource::for_event("touchend"), TouchSource::Lifted);
        assert_eq!(TouchSource::for_event("touchcancel"), TouchSource::Lifted);
    }

    // ── Viewport routing ─────────────────────────────────────────────

    #[test]
    fn single_touch_start_suppresses_default() {
        let mut c = controller();
        assert!(route_viewport(&mut c, ViewportAction::Start, PointerSample::touch(100.0), 1));
        assert!(c.is_dragging());
    }

    #[test]
    fn multi_touch_start_passes_through() {
        let mut c = controller();
        assert!(!route_viewport(&mut c, ViewportAction::Start, PointerSample::touch(100.0), 2));
    }

    #[test]
    fn mouse_start_never_suppresses() {
        let mut c = controller();
        assert!(!route_viewport(&mut c, ViewportAction::Start, PointerSample::mouse(100.0), 0));
        assert!(c.is_dragging());
    }

    #[test]
    fn touch_move_suppresses_only_while_dragging() {
        let mut c = controller();
        assert!(!route_viewport(&mut c, ViewportAction::Move, PointerSample::touch(90.0), 1));
        route_viewport(&mut c, ViewportAction::Start, PointerSample::touch(100.0), 1);
        assert!(route_viewport(&mut c, ViewportAction::Move, PointerSample::touch(60.0), 1));
        assert!(!route_viewport(&mut c, ViewportAction::Move, PointerSample::touch(50.0), 2));
    }

    #[test]
    fn end_without_coordinate_still_stops_drag() {
        let mut c = controller();
        route_viewport(&mut c, ViewportAction::Start, PointerSample::touch(100.0), 1);
        let cancel = PointerSample::new(InputKind::Touch, None);
        assert!(!route_viewport(&mut c, ViewportAction::End, cancel, 0));
        assert!(!c.is_dragging());
    }

    // ── Item and close routing ───────────────────────────────────────

    #[test]
    fn keyboard_click_activates_after_drag() {
        let mut c = controller();
        route_viewport(&mut c, ViewportAction::Start, PointerSample::mouse(250.0), 0);
        route_viewport(&mut c, ViewportAction::Move, PointerSample::mouse(50.0), 0);
        route_viewport(&mut c, ViewportAction::End, PointerSample::mouse(50.0), 0);
        assert_eq!(route_item_click(&mut c, 3, None), GestureOutcome::Selected(3));
    }

    #[test]
    fn pointer_click_after_drag_is_suppressed() {
        let mut c = controller();
        route_viewport(&mut c, ViewportAction::Start, PointerSample::mouse(250.0), 0);
        route_viewport(&mut c, ViewportAction::Move, PointerSample::mouse(50.0), 0);
        route_viewport(&mut c, ViewportAction::End, PointerSample::mouse(50.0), 0);
        let click = Some(PointerSample::mouse(50.0));
        assert_eq!(route_item_click(&mut c, 3, click), GestureOutcome::Drag);
    }

    #[test]
    fn close_touchend_ends_drag_but_click_does_not() {
        let mut c = controller();
        for (event, ends_gesture) in CLOSE_EVENTS {
            c.set_active_item(2);
            c.on_gesture_start(PointerSample::touch(100.0));
            assert_eq!(route_close(&mut c, 2, ends_gesture), GestureOutcome::Closed(2));
            assert_eq!(c.active_index(), None);
            assert_eq!(c.is_dragging(), event == "click", "{event}");
            c.end_gesture();
        }
    }

    // ── Mounting ─────────────────────────────────────────────────────

    #[test]
    fn failed_wrapper_is_skipped() {
        let results = vec![
            Ok(1),
            Err(WebError::Missing(".timeline".to_string())),
            Ok(3),
        ];
        assert_eq!(keep_mounted(results), [1, 3]);
    }

    #[test]
    fn all_wrappers_failing_mounts_nothing() {
        let results: Vec<Result<u8, WebError>> = vec![Err(WebError::NotHtml("track"))];
        assert!(keep_mounted(results).is_empty());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod dom_tests {
    use super::*;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
    use web_sys::{EventInit, MouseEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    const ITEMS: &str = r#"
        <ul class="timeline" style="display:flex;width:max-content;margin:0;padding:0">
          <li style="width:100px;flex:none">A<button class="close-btn">x</button></li>
          <li style="width:100px;flex:none">B<button class="close-btn">x</button></li>
          <li style="width:100px;flex:none">C</li>
          <li style="width:100px;flex:none">D</li>
        </ul>"#;

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    /// Insert `markup` into the page and return its container.
    fn fixture(markup: &str) -> HtmlElement {
        let doc = document();
        let host = doc
            .create_element("div")
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap();
        host.set_inner_html(markup);
        doc.body().unwrap().append_child(&host).unwrap();
        host
    }

    fn mounted() -> (HtmlElement, HtmlElement, TimelineHandle) {
        let host = fixture(&format!(
            r#"<div class="timeline-wrapper" style="width:300px;overflow:hidden">{ITEMS}</div>"#
        ));
        let wrapper = host
            .query_selector(".timeline-wrapper")
            .unwrap()
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap();
        let handle = TimelineHandle::attach(wrapper.clone(), TimelineConfig::default()).unwrap();
        (host, wrapper, handle)
    }

    fn nth(host: &HtmlElement, selector: &str, index: u32) -> Element {
        host.query_selector_all(selector)
            .unwrap()
            .get(index)
            .unwrap()
            .dyn_into::<Element>()
            .unwrap()
    }

    fn mouse(kind: &str, x: i32, detail: i32) -> Event {
        let init = MouseEventInit::new();
        init.set_bubbles(true);
        init.set_client_x(x);
        init.set_detail(detail);
        MouseEvent::new_with_mouse_event_init_dict(kind, &init)
            .unwrap()
            .into()
    }

    fn plain(kind: &str) -> Event {
        let init = EventInit::new();
        init.set_bubbles(true);
        Event::new_with_event_init_dict(kind, &init).unwrap()
    }

    fn dragging(handle: &TimelineHandle) -> bool {
        handle.with_controller(|c| c.is_dragging()).unwrap()
    }

    #[wasm_bindgen_test]
    fn mount_marks_first_item_and_writes_transform() {
        let (host, _wrapper, handle) = mounted();
        assert!(nth(&host, "li", 0).class_list().contains("active"));
        let track = nth(&host, ".timeline", 0).dyn_into::<HtmlElement>().unwrap();
        let transform = track.style().get_property_value("transform").unwrap();
        assert!(transform.starts_with("translateX("), "{transform}");
        drop(handle);
        host.remove();
    }

    #[wasm_bindgen_test]
    fn gesture_ending_events_stop_the_drag() {
        let (host, wrapper, handle) = mounted();
        for ending in ["mouseup", "mouseleave", "touchend", "touchcancel"] {
            wrapper.dispatch_event(&mouse("mousedown", 150, 1)).unwrap();
            assert!(dragging(&handle), "{ending}");
            wrapper.dispatch_event(&plain(ending)).unwrap();
            assert!(!dragging(&handle), "{ending}");
        }
        drop(handle);
        host.remove();
    }

    #[wasm_bindgen_test]
    fn close_click_does_not_reach_item() {
        let (host, _wrapper, handle) = mounted();
        handle.with_controller(|c| c.set_active_item(1)).unwrap();
        nth(&host, ".close-btn", 1)
            .dispatch_event(&mouse("click", 10, 1))
            .unwrap();
        assert_eq!(handle.with_controller(|c| c.active_index()), Some(None));
        assert!(!nth(&host, "li", 1).class_list().contains("active"));
        drop(handle);
        host.remove();
    }

    #[wasm_bindgen_test]
    fn keyboard_click_selects_after_drag() {
        let (host, wrapper, handle) = mounted();
        wrapper.dispatch_event(&mouse("mousedown", 250, 1)).unwrap();
        wrapper.dispatch_event(&mouse("mousemove", 50, 1)).unwrap();
        wrapper.dispatch_event(&mouse("mouseup", 50, 1)).unwrap();
        nth(&host, "li", 2)
            .dispatch_event(&mouse("click", 0, 0))
            .unwrap();
        assert_eq!(handle.with_controller(|c| c.active_index()), Some(Some(2)));
        drop(handle);
        host.remove();
    }

    #[wasm_bindgen_test]
    fn detached_timeline_ignores_events() {
        let (host, wrapper, handle) = mounted();
        let controller = Rc::clone(&handle.controller);
        handle.detach();
        wrapper.dispatch_event(&mouse("mousedown", 150, 1)).unwrap();
        assert!(!controller.borrow().is_dragging());
        host.remove();
    }

    #[wasm_bindgen_test]
    fn wrapper_without_track_does_not_block_others() {
        let host = fixture(&format!(
            r#"<div class="mount-wrapper" style="width:300px">{ITEMS}</div>
               <div class="mount-wrapper" style="width:300px"><p>no track</p></div>"#
        ));
        let mut config = TimelineConfig::default();
        config.selectors.wrapper = ".mount-wrapper".to_string();
        let handles = TimelineHandle::attach_all(&document(), &config).unwrap();
        assert_eq!(handles.len(), 1);
        drop(handles);
        host.remove();
    }
}
