// DOM layout and drawing for the presentation adapter.
//
// Element ids and CSS classes follow the classic page (`array-display`,
// `array-cell`, `searching`, `found`, ...). Anything missing from the host page
// is created with inline styling so the module also runs on a blank document.
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use crate::game::{Feedback, Outcome, Slot, format_pattern};

pub const ROOT_ID: &str = "code-breaker";
pub const ARRAY_ID: &str = "array-display";
pub const FEEDBACK_ID: &str = "feedback";
pub const MODAL_ID: &str = "game-over-modal";

const HIGHLIGHT_CLASSES: [&str; 3] = ["highlight", "found", "searching"];

const ROOT_STYLE: &str = "max-width:720px; margin:24px auto; font-family:'Fira Code', monospace; color:#e8e8e8; background:#181818; border:2px solid #222; border-radius:18px; padding:18px; box-shadow:0 0 32px 0 rgba(0,0,0,0.18);";
const ARRAY_STYLE: &str = "display:flex; gap:8px; justify-content:center; margin:18px 0; min-height:56px;";
const CELL_STYLE: &str = "width:48px; height:48px; display:flex; align-items:center; justify-content:center; font-size:22px; border:2px solid #333; border-radius:8px; background:#222;";
const MODAL_STYLE: &str = "position:fixed; inset:0; align-items:center; justify-content:center; flex-direction:column; background:rgba(0,0,0,0.72); z-index:50; color:#ffd166; font-family:'Fira Code', monospace;";

/// Input fields and buttons as (tag, id, label/placeholder).
const CONTROLS: [(&str, &str, &str); 9] = [
    ("input", "insert-index", "index"),
    ("input", "insert-value", "value"),
    ("button", "insert-btn", "Insert"),
    ("input", "delete-index", "index"),
    ("button", "delete-btn", "Delete"),
    ("input", "search-pattern", "1,2,3"),
    ("button", "search-btn", "Search"),
    ("button", "reset-btn", "Reset Array"),
    ("button", "new-game-btn", "New Game"),
];

fn ensure_element(
    doc: &Document,
    parent: &Element,
    tag: &str,
    id: &str,
    style: Option<&str>,
) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el);
    }
    let el = doc.create_element(tag)?;
    el.set_id(id);
    if let Some(style) = style {
        el.set_attribute("style", style)?;
    }
    parent.append_child(&el)?;
    Ok(el)
}

/// Create every element the adapter addresses unless the page already has it.
pub fn ensure_layout(doc: &Document) -> Result<(), JsValue> {
    let body: Element = doc
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .into();
    let root = ensure_element(doc, &body, "div", ROOT_ID, Some(ROOT_STYLE))?;

    // HUD: level, timer, target
    let hud = ensure_element(doc, &root, "div", "hud", Some("display:flex; gap:24px; justify-content:center;"))?;
    for (id, label) in [("level", "Level"), ("timer", "Time"), ("target-pattern", "Target")] {
        if doc.get_element_by_id(id).is_none() {
            let wrap = doc.create_element("span")?;
            wrap.set_text_content(Some(&format!("{label}: ")));
            hud.append_child(&wrap)?;
            ensure_element(doc, &wrap, "strong", id, None)?;
        }
    }

    let array = ensure_element(doc, &root, "div", ARRAY_ID, Some(ARRAY_STYLE))?;
    array.class_list().add_1("array-display")?;
    ensure_element(doc, &root, "div", FEEDBACK_ID, Some("text-align:center; min-height:24px;"))?;

    let controls = ensure_element(doc, &root, "div", "controls", Some("display:flex; flex-wrap:wrap; gap:6px; justify-content:center; margin-top:12px;"))?;
    for (tag, id, label) in CONTROLS {
        if doc.get_element_by_id(id).is_some() {
            continue;
        }
        let el = ensure_element(doc, &controls, tag, id, None)?;
        if tag == "input" {
            el.set_attribute("placeholder", label)?;
            el.set_attribute("size", "6")?;
        } else {
            el.set_text_content(Some(label));
        }
    }

    let modal = ensure_element(doc, &body, "div", MODAL_ID, Some(&modal_style(false)))?;
    ensure_element(doc, &modal, "h2", "modal-title", None)?;
    ensure_element(doc, &modal, "p", "modal-message", None)?;
    let again = ensure_element(doc, &modal, "button", "play-again-btn", None)?;
    if again.text_content().unwrap_or_default().is_empty() {
        again.set_text_content(Some("Play Again"));
    }
    Ok(())
}

fn modal_style(visible: bool) -> String {
    format!("{MODAL_STYLE} display:{};", if visible { "flex" } else { "none" })
}

/// Redraw every slot; empty slots get the `empty` class and no text.
pub fn render_array(doc: &Document, slots: &[Slot]) -> Result<(), JsValue> {
    let Some(display) = doc.get_element_by_id(ARRAY_ID) else { return Ok(()) };
    display.set_inner_html("");
    for (index, slot) in slots.iter().enumerate() {
        let cell = doc.create_element("div")?;
        cell.set_class_name("array-cell");
        cell.set_attribute("data-index", &index.to_string())?;
        cell.set_attribute("style", CELL_STYLE)?;
        match slot {
            Some(v) => cell.set_text_content(Some(&v.to_string())),
            None => {
                cell.class_list().add_1("empty")?;
                cell.set_text_content(Some(""));
            }
        }
        display.append_child(&cell)?;
    }
    Ok(())
}

fn cells(doc: &Document) -> Vec<Element> {
    let Some(display) = doc.get_element_by_id(ARRAY_ID) else { return Vec::new() };
    let children = display.children();
    (0..children.length()).filter_map(|i| children.item(i)).collect()
}

pub fn clear_highlights(doc: &Document) -> Result<(), JsValue> {
    for cell in cells(doc) {
        for class in HIGHLIGHT_CLASSES {
            cell.class_list().remove_1(class)?;
        }
        cell.set_attribute("style", CELL_STYLE)?;
    }
    Ok(())
}

/// Apply `class` to the given raw slot indices, clearing older highlights.
pub fn highlight(doc: &Document, raw_indices: &[usize], class: &str) -> Result<(), JsValue> {
    clear_highlights(doc)?;
    let cells = cells(doc);
    for &i in raw_indices {
        if let Some(cell) = cells.get(i) {
            cell.class_list().add_1(class)?;
            // inline border so highlights show without a stylesheet
            let color = if class == "found" { "#06d6a0" } else { "#ffd166" };
            cell.set_attribute("style", &format!("{CELL_STYLE} border-color:{color};"))?;
        }
    }
    Ok(())
}

pub fn mark_cell(doc: &Document, index: usize, class: &str) -> Result<(), JsValue> {
    if let Some(cell) = cells(doc).get(index) {
        cell.class_list().add_1(class)?;
    }
    Ok(())
}

pub fn set_victory(doc: &Document, on: bool) -> Result<(), JsValue> {
    if let Some(display) = doc.get_element_by_id(ARRAY_ID) {
        if on {
            display.class_list().add_1("victory-effect")?;
        } else {
            display.class_list().remove_1("victory-effect")?;
        }
    }
    Ok(())
}

pub fn show_feedback(doc: &Document, feedback: &Feedback) {
    if let Some(el) = doc.get_element_by_id(FEEDBACK_ID) {
        el.set_text_content(Some(&feedback.message));
        el.set_class_name(&format!("feedback {}", feedback.severity.as_class()));
    }
}

pub fn update_hud(doc: &Document, level: u32, seconds: u32) {
    if let Some(el) = doc.get_element_by_id("level") {
        el.set_text_content(Some(&level.to_string()));
    }
    if let Some(el) = doc.get_element_by_id("timer") {
        el.set_text_content(Some(&seconds.to_string()));
    }
}

pub fn update_target(doc: &Document, target: &[u8]) {
    if let Some(el) = doc.get_element_by_id("target-pattern") {
        el.set_text_content(Some(&format_pattern(target)));
    }
}

pub fn show_modal(doc: &Document, outcome: Option<Outcome>) -> Result<(), JsValue> {
    let Some(modal) = doc.get_element_by_id(MODAL_ID) else { return Ok(()) };
    if let Some(outcome) = outcome {
        if let Some(title) = doc.get_element_by_id("modal-title") {
            title.set_text_content(Some(outcome.title()));
        }
        if let Some(msg) = doc.get_element_by_id("modal-message") {
            msg.set_text_content(Some(outcome.message()));
        }
    }
    modal.set_attribute("style", &modal_style(outcome.is_some()))
}

pub fn input(doc: &Document, id: &str) -> Option<HtmlInputElement> {
    doc.get_element_by_id(id)?.dyn_into::<HtmlInputElement>().ok()
}

pub fn input_value(doc: &Document, id: &str) -> String {
    input(doc, id).map(|i| i.value()).unwrap_or_default()
}

pub fn clear_input(doc: &Document, id: &str) {
    if let Some(i) = input(doc, id) {
        i.set_value("");
    }
}

pub fn focus(doc: &Document, id: &str) {
    if let Some(el) = doc
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    {
        el.focus().ok();
    }
}
