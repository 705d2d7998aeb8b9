//! Browser front end for the phrase-guessing game.
//!
//! Builds the DOM surface (phrase strip, on-screen keyboard, miss hearts,
//! overlay) if it is not already present, wires click / keydown closures, and
//! redraws from the [`ViewModel`] snapshot after every dispatched event. No
//! game rules live here.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, window};

use crate::game::{GameController, InputEvent, Phase, TileKind, ViewModel};

thread_local! {
    static GAME: std::cell::RefCell<Option<GameController>> =
        std::cell::RefCell::new(None);
}

const KEY_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

const HEART_FULL: &str =
    "<span style='color:#ff4d4d;font-size:22px;margin-right:6px;'>\u{2665}</span>";
const HEART_LOST: &str =
    "<span style='color:#6b6b6b;font-size:22px;margin-right:6px;'>\u{2661}</span>";

/// Mount the game into the current document and show the start overlay.
pub fn start() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    ensure_surface(&doc)?;

    let game = GameController::new();
    let vm = game.view();
    GAME.with(|cell| cell.replace(Some(game)));
    render(&doc, &vm);

    // Click delegation on the keyboard container: only letter buttons react.
    if let Some(keyboard) = doc.get_element_by_id("ph-keyboard") {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let Some(button) = evt
                .target()
                .and_then(|t| t.dyn_into::<HtmlButtonElement>().ok())
            else {
                return;
            };
            if let Some(letter) = button
                .id()
                .strip_prefix("ph-key-")
                .and_then(|s| s.chars().next())
            {
                dispatch_and_render(InputEvent::Guess(letter));
            }
        }) as Box<dyn FnMut(_)>);
        keyboard.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Overlay button: reset to idle, then start the next round.
    if let Some(reset_btn) = doc.get_element_by_id("ph-reset") {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            dispatch_and_render(InputEvent::Reset);
            dispatch_and_render(InputEvent::Start);
        }) as Box<dyn FnMut(_)>);
        reset_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Physical keyboard: letters guess while a round is live, Enter activates
    // the overlay button while the overlay is shown.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            let key = evt.key();
            if key == "Enter" {
                let overlay_shown = GAME.with(|cell| {
                    cell.borrow()
                        .as_ref()
                        .map(|g| g.phase() != Phase::InProgress)
                        .unwrap_or(false)
                });
                if overlay_shown {
                    dispatch_and_render(InputEvent::Reset);
                    dispatch_and_render(InputEvent::Start);
                }
            } else if key.len() == 1 {
                let c = key.chars().next().unwrap();
                if c.is_ascii_alphabetic() {
                    dispatch_and_render(InputEvent::Guess(c.to_ascii_lowercase()));
                }
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

/// Serialized view snapshot of the mounted game, if any.
#[cfg(feature = "serde_json")]
pub fn view_json() -> Option<String> {
    GAME.with(|cell| {
        cell.borrow()
            .as_ref()
            .and_then(|g| serde_json::to_string(&g.view()).ok())
    })
}

fn dispatch_and_render(event: InputEvent) {
    let vm = GAME.with(|cell| {
        cell.borrow_mut().as_mut().map(|game| {
            game.dispatch(event);
            game.view()
        })
    });
    if let Some(vm) = vm {
        if let Some(doc) = window().and_then(|w| w.document()) {
            render(&doc, &vm);
        }
    }
}

// --- Surface construction ----------------------------------------------------

/// Create the game DOM under `<body>` unless an element with id `ph-root`
/// already exists (reuse pattern so `start()` is safe to call twice).
fn ensure_surface(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id("ph-root").is_some() {
        return Ok(());
    }
    let body = doc
        .body()
        .ok_or_else(|| JsValue::from_str("no document body"))?;

    let root = doc.create_element("div")?;
    root.set_id("ph-root");
    root.set_attribute(
        "style",
        "position:fixed; inset:0; display:flex; flex-direction:column; align-items:center; \
         justify-content:center; gap:28px; background:#181818; \
         font-family:'Fira Code', monospace; color:#eee;",
    )
    .ok();

    let title = doc.create_element("h1")?;
    title.set_text_content(Some("Phrase Hunter"));
    title
        .set_attribute("style", "margin:0; font-size:34px; color:#ffd166; letter-spacing:2px;")
        .ok();
    root.append_child(&title)?;

    let phrase = doc.create_element("ul")?;
    phrase.set_id("ph-phrase");
    phrase
        .set_attribute(
            "style",
            "display:flex; flex-wrap:wrap; justify-content:center; gap:6px; \
             list-style:none; margin:0; padding:0; max-width:720px;",
        )
        .ok();
    root.append_child(&phrase)?;

    let tries = doc.create_element("div")?;
    tries.set_id("ph-tries");
    root.append_child(&tries)?;

    let keyboard = doc.create_element("div")?;
    keyboard.set_id("ph-keyboard");
    keyboard
        .set_attribute(
            "style",
            "display:flex; flex-direction:column; align-items:center; gap:8px;",
        )
        .ok();
    for row in KEY_ROWS {
        let row_el = doc.create_element("div")?;
        row_el.set_class_name("keyrow");
        row_el.set_attribute("style", "display:flex; gap:8px;").ok();
        for c in row.chars() {
            let button: HtmlButtonElement = doc.create_element("button")?.dyn_into()?;
            button.set_id(&format!("ph-key-{c}"));
            button.set_text_content(Some(&c.to_string()));
            row_el.append_child(&button)?;
        }
        keyboard.append_child(&row_el)?;
    }
    root.append_child(&keyboard)?;

    let overlay = doc.create_element("div")?;
    overlay.set_id("ph-overlay");
    overlay
        .set_attribute(
            "style",
            "position:fixed; inset:0; display:flex; flex-direction:column; align-items:center; \
             justify-content:center; gap:24px; background:rgba(0,0,0,0.82); z-index:50;",
        )
        .ok();
    let outcome = doc.create_element("h2")?;
    outcome.set_id("ph-outcome");
    outcome
        .set_attribute("style", "margin:0; font-size:44px; color:#ffffff;")
        .ok();
    overlay.append_child(&outcome)?;
    let reset: HtmlButtonElement = doc.create_element("button")?.dyn_into()?;
    reset.set_id("ph-reset");
    reset
        .set_attribute(
            "style",
            "font-family:inherit; font-size:18px; padding:10px 24px; border-radius:8px; \
             border:1px solid #ffd166; background:#ffd166; color:#181818; cursor:pointer;",
        )
        .ok();
    overlay.append_child(&reset)?;
    root.append_child(&overlay)?;

    body.append_child(&root)?;
    Ok(())
}

// --- Rendering ---------------------------------------------------------------

/// Sync the DOM to a view snapshot. Render failures (detached elements) are
/// ignored; the next event redraws everything anyway.
fn render(doc: &Document, vm: &ViewModel) {
    render_phrase(doc, vm);
    render_keys(doc, vm);
    render_tries(doc, vm);
    render_overlay(doc, vm);
}

fn render_phrase(doc: &Document, vm: &ViewModel) {
    let Some(list) = doc.get_element_by_id("ph-phrase") else {
        return;
    };
    let mut html = String::new();
    for tile in &vm.tiles {
        match tile.kind {
            TileKind::Space => {
                html.push_str("<li class='space' style='width:18px;'></li>");
            }
            TileKind::Letter => {
                let (shown, bg, fg) = if tile.revealed {
                    (tile.ch, "#2d6a4f", "#ffffff")
                } else {
                    (' ', "#3a4a6b", "#3a4a6b")
                };
                html.push_str(&format!(
                    "<li class='letter{}' style='width:36px; height:46px; display:flex; \
                     align-items:center; justify-content:center; border-radius:6px; \
                     font-size:24px; background:{bg}; color:{fg};'>{shown}</li>",
                    if tile.revealed { " show" } else { "" },
                ));
            }
        }
    }
    list.set_inner_html(&html);
}

fn render_keys(doc: &Document, vm: &ViewModel) {
    for (slot, &chosen) in vm.chosen_keys.iter().enumerate() {
        let c = (b'a' + slot as u8) as char;
        let Some(el) = doc.get_element_by_id(&format!("ph-key-{c}")) else {
            continue;
        };
        let Ok(button) = el.dyn_into::<HtmlButtonElement>() else {
            continue;
        };
        button.set_disabled(chosen);
        button.set_class_name(if chosen { "chosen" } else { "" });
        let style = if chosen {
            "font-family:inherit; font-size:18px; width:40px; height:44px; border-radius:6px; \
             border:1px solid #333; background:#2a2a2a; color:#555;"
        } else {
            "font-family:inherit; font-size:18px; width:40px; height:44px; border-radius:6px; \
             border:1px solid #555; background:#ffd166; color:#181818; cursor:pointer;"
        };
        button.set_attribute("style", style).ok();
    }
}

fn render_tries(doc: &Document, vm: &ViewModel) {
    let Some(el) = doc.get_element_by_id("ph-tries") else {
        return;
    };
    let remaining = vm.max_misses.saturating_sub(vm.misses) as usize;
    let mut html = String::new();
    for _ in 0..remaining {
        html.push_str(HEART_FULL);
    }
    for _ in remaining..vm.max_misses as usize {
        html.push_str(HEART_LOST);
    }
    el.set_inner_html(&html);
}

fn render_overlay(doc: &Document, vm: &ViewModel) {
    let Some(overlay) = doc.get_element_by_id("ph-overlay") else {
        return;
    };
    let (shown, class, label, button_label) = match vm.phase {
        Phase::Idle => (true, "start", "Phrase Hunter", "Start Game"),
        Phase::Won => (true, "win", "You won!", "Start a New Game"),
        Phase::Lost => (true, "lose", "You lost!", "Start a New Game"),
        Phase::InProgress => (false, "", "", ""),
    };
    set_display(&overlay, shown);
    if shown {
        overlay.set_class_name(class);
        if let Some(outcome) = doc.get_element_by_id("ph-outcome") {
            outcome.set_text_content(Some(label));
        }
        if let Some(reset) = doc.get_element_by_id("ph-reset") {
            reset.set_text_content(Some(button_label));
        }
    }
}

fn set_display(el: &Element, shown: bool) {
    let style = el.get_attribute("style").unwrap_or_default();
    let base: String = style
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.starts_with("display:"))
        .map(|s| format!("{s}; "))
        .collect();
    let display = if shown { "flex" } else { "none" };
    el.set_attribute("style", &format!("{base}display:{display};"))
        .ok();
}
