//! Parlor entry point
//!
//! On the web: wires the DOM, drives the particle backdrop with
//! requestAnimationFrame and renders the blackjack table after every action.
//! Natively: runs a short headless demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_page {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, EventTarget, HtmlCanvasElement,
        HtmlInputElement, MouseEvent,
    };

    use parlor::blackjack::{ActionError, BlackjackEngine, CardFace, TableView};
    use parlor::calculator::{Calculator, Key};
    use parlor::clock::DateParts;
    use parlor::effects::{CAPTION_REVERT_MS, Effect, ROAST_REVEAL};
    use parlor::field::{Bounds, DrawCommand, DrawSink, ParticleField};
    use parlor::panel::{Navigator, Panel};
    use parlor::settings::Settings;

    /// Replays field draw commands onto the 2D canvas
    struct CanvasSink<'a> {
        ctx: &'a CanvasRenderingContext2d,
    }

    impl DrawSink for CanvasSink<'_> {
        fn draw(&mut self, command: DrawCommand) {
            match command {
                DrawCommand::Circle { center, radius, .. } => {
                    self.ctx.set_fill_style_str(&command.css_color());
                    self.ctx.begin_path();
                    let _ = self.ctx.arc(
                        center.x as f64,
                        center.y as f64,
                        radius as f64,
                        0.0,
                        std::f64::consts::TAU,
                    );
                    self.ctx.fill();
                }
                DrawCommand::Line { from, to, width, .. } => {
                    self.ctx.set_stroke_style_str(&command.css_color());
                    self.ctx.set_line_width(width as f64);
                    self.ctx.begin_path();
                    self.ctx.move_to(from.x as f64, from.y as f64);
                    self.ctx.line_to(to.x as f64, to.y as f64);
                    self.ctx.stroke();
                }
            }
        }
    }

    /// Everything the page owns
    struct Page {
        field: ParticleField,
        engine: BlackjackEngine,
        calculator: Calculator,
        nav: Navigator,
        settings: Settings,
        /// Caption/roast picks
        rng: Pcg32,
        /// Pointer sample since the last frame
        pointer: Option<Vec2>,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl Page {
        fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, seed: u64) -> Self {
            let settings = Settings::load();
            // Write back so partial or first-run storage holds every field
            settings.save();
            let bounds = Bounds::new(canvas.width() as f32, canvas.height() as f32);
            let mut field = ParticleField::new(bounds, settings.field_config(), seed);
            field.initialize(settings.particle_count, bounds);
            Self {
                field,
                engine: BlackjackEngine::new(settings.starting_balance, seed.rotate_left(17)),
                calculator: Calculator::new(),
                nav: Navigator::new(),
                settings,
                rng: Pcg32::seed_from_u64(seed.rotate_left(31)),
                pointer: None,
                canvas,
                ctx,
            }
        }

        fn frame(&mut self) {
            let Bounds { width, height } = self.field.bounds();
            self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
            let pointer = self.pointer.take();
            let mut sink = CanvasSink { ctx: &self.ctx };
            self.field.tick(pointer, &mut sink);
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.field.on_resize(Bounds::new(width as f32, height as f32));
        }

        /// Burst + text for a button effect
        fn fire(&mut self, effect: Effect) -> &'static str {
            if self.settings.bursts_enabled() {
                let burst = effect.burst(self.field.bounds());
                self.field.inject_burst(&burst);
            }
            effect.pick_line(&mut self.rng)
        }
    }

    fn dom() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("no document")
    }

    fn viewport_size() -> (u32, u32) {
        let window = web_sys::window().expect("no window");
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        (w as u32, h as u32)
    }

    /// Run `f` once after `ms` milliseconds
    fn after(ms: i32, f: impl FnOnce() + 'static) {
        let closure = Closure::once(f);
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                ms,
            );
        }
        closure.forget();
    }

    fn listen(target: &EventTarget, event: &str, handler: impl FnMut(web_sys::Event) + 'static) {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn elements(document: &Document, selector: &str) -> Vec<Element> {
        let mut out = Vec::new();
        if let Ok(list) = document.query_selector_all(selector) {
            for i in 0..list.length() {
                if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    out.push(el);
                }
            }
        }
        out
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn show_panel(document: &Document, panel: Panel) {
        for p in Panel::ALL {
            if let Some(el) = document.get_element_by_id(p.id()) {
                let classes = el.class_list();
                if p == panel {
                    let _ = classes.remove_1("hidden-section");
                    let _ = classes.add_1("active-section");
                } else {
                    let _ = classes.remove_1("active-section");
                    let _ = classes.add_1("hidden-section");
                }
            }
        }
    }

    fn update_clock(document: &Document) {
        let now = DateParts::now();
        set_text(document, "date-display", &now.format_date());
        set_text(document, "time-display", &now.format_time());
    }

    fn card_html(face: &CardFace) -> String {
        match face {
            CardFace::Hidden => r#"<div class="card hidden"></div>"#.to_string(),
            CardFace::Up { rank, suit, red } => format!(
                r#"<div class="card {}"><div class="value">{}</div><div class="suit">{}</div><div class="value bottom">{}</div></div>"#,
                if *red { "red" } else { "" },
                rank,
                suit,
                rank
            ),
        }
    }

    fn render_table(document: &Document, view: &TableView) {
        if let Some(el) = document.get_element_by_id("dealer-hand") {
            el.set_inner_html(&view.dealer.iter().map(card_html).collect::<String>());
        }
        if let Some(el) = document.get_element_by_id("player-hand") {
            el.set_inner_html(&view.player.iter().map(card_html).collect::<String>());
        }
        set_text(document, "dealer-score", &view.dealer_score_text());
        set_text(document, "player-score", &view.player_score_text());
        set_text(document, "bj-message", view.message);
        set_text(document, "balance-display", &view.balance_text());
        set_text(document, "bet-display", &view.bet_text());

        set_hidden(document, "betting-controls", !view.can_bet);
        set_hidden(document, "play-controls", !view.can_play);
        set_hidden(document, "bj-new-game", !view.can_start_new);
        if let Some(btn) = document.get_element_by_id("btn-deal") {
            let _ = if view.can_deal {
                btn.remove_attribute("disabled")
            } else {
                btn.set_attribute("disabled", "")
            };
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Parlor starting...");

        let document = dom();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("particle-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let (width, height) = viewport_size();
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let page = Rc::new(RefCell::new(Page::new(canvas, ctx, seed)));
        log::info!("Page initialized with seed: {}", seed);

        setup_backdrop(page.clone());
        setup_navigation(&document, page.clone());
        setup_effects(&document, page.clone());
        setup_calculator(&document, page.clone());
        setup_blackjack(&document, page.clone());
        setup_clock(page.clone());

        show_panel(&document, Panel::Menu);
        render_table(&document, &page.borrow().engine.view());

        request_animation_frame(page);
        log::info!("Parlor running!");
    }

    fn request_animation_frame(page: Rc<RefCell<Page>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            page.borrow_mut().frame();
            request_animation_frame(page);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_backdrop(page: Rc<RefCell<Page>>) {
        let window = web_sys::window().expect("no window");

        {
            let page = page.clone();
            listen(&window, "resize", move |_event| {
                let (w, h) = viewport_size();
                page.borrow_mut().resize(w, h);
            });
        }

        listen(&dom(), "mousemove", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                page.borrow_mut().pointer =
                    Some(Vec2::new(mouse.client_x() as f32, mouse.client_y() as f32));
            }
        });
    }

    fn setup_navigation(document: &Document, page: Rc<RefCell<Page>>) {
        for btn in elements(document, ".menu-btn") {
            let page = page.clone();
            let target = btn.get_attribute("data-target");
            listen(&btn, "click", move |_event| {
                let Some(panel) = target.as_deref().and_then(Panel::from_id) else {
                    log::warn!("Menu button without a known target: {:?}", target);
                    return;
                };
                let document = dom();
                page.borrow_mut().nav.show(panel);
                show_panel(&document, panel);
                if panel == Panel::Clock {
                    update_clock(&document);
                }
            });
        }

        for btn in elements(document, ".back-btn") {
            let page = page.clone();
            listen(&btn, "click", move |_event| {
                page.borrow_mut().nav.back();
                show_panel(&dom(), Panel::Menu);
            });
        }
    }

    fn setup_effects(document: &Document, page: Rc<RefCell<Page>>) {
        if let Some(btn) = document.get_element_by_id("fun-btn") {
            let page = page.clone();
            let resting_text = btn.text_content().unwrap_or_default();
            let target = btn.clone();
            listen(&btn, "click", move |_event| {
                let caption = page.borrow_mut().fire(Effect::Fun);
                target.set_text_content(Some(caption));

                let revert_target = target.clone();
                let resting_text = resting_text.clone();
                after(CAPTION_REVERT_MS, move || {
                    revert_target.set_text_content(Some(&resting_text));
                });
            });
        }

        if let Some(btn) = document.get_element_by_id("claire-btn") {
            listen(&btn, "click", move |_event| {
                let line = page.borrow_mut().fire(Effect::Roast);
                let Some(insult) = dom().get_element_by_id("claire-insult") else {
                    return;
                };
                for step in ROAST_REVEAL {
                    let target = insult.clone();
                    let apply = move || {
                        if step.show_line {
                            target.set_text_content(Some(line));
                        }
                        let _ = target.set_attribute("style", &step.style());
                    };
                    if step.at_ms == 0 {
                        apply();
                    } else {
                        after(step.at_ms, apply);
                    }
                }
            });
        }
    }

    fn setup_calculator(document: &Document, page: Rc<RefCell<Page>>) {
        for btn in elements(document, ".calc-btn") {
            let page = page.clone();
            let value = btn
                .get_attribute("data-action")
                .or_else(|| btn.get_attribute("data-num"));
            listen(&btn, "click", move |_event| {
                let Some(key) = value.as_deref().and_then(Key::parse) else {
                    return;
                };
                let mut p = page.borrow_mut();
                p.calculator.press(key);
                if let Some(display) = dom()
                    .get_element_by_id("calc-display")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                {
                    display.set_value(p.calculator.display());
                }
            });
        }
    }

    /// A table button's engine call; the result only matters for logging
    type TableAction = fn(&mut BlackjackEngine) -> Result<(), ActionError>;

    fn setup_blackjack(document: &Document, page: Rc<RefCell<Page>>) {
        for chip in elements(document, ".chip") {
            let page = page.clone();
            let amount = chip
                .get_attribute("data-value")
                .and_then(|v| v.parse::<u64>().ok());
            listen(&chip, "click", move |_event| {
                let Some(amount) = amount else { return };
                let mut p = page.borrow_mut();
                if let Err(e) = p.engine.place_bet(amount) {
                    log::debug!("Chip ignored: {}", e);
                }
                render_table(&dom(), &p.engine.view());
            });
        }

        let actions: [(&'static str, TableAction); 5] = [
            ("btn-clear-bet", |e| e.clear_bet().map(|_| ())),
            ("btn-deal", |e| e.deal().map(|_| ())),
            ("bj-hit", |e| e.hit().map(|_| ())),
            ("bj-stand", |e| e.stand().map(|_| ())),
            ("bj-new-game", |e| e.new_round()),
        ];
        for (id, action) in actions {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing blackjack control #{}", id);
                continue;
            };
            let page = page.clone();
            listen(&btn, "click", move |_event| {
                let mut p = page.borrow_mut();
                if let Err(e) = action(&mut p.engine) {
                    log::debug!("#{} ignored: {}", id, e);
                }
                render_table(&dom(), &p.engine.view());
            });
        }
    }

    fn setup_clock(page: Rc<RefCell<Page>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut()>::new(move || {
            if page.borrow().nav.clock_running() {
                update_clock(&dom());
            }
        });
        let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            1000,
        );
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web_page::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Parlor (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the page");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    demo_blackjack(seed);
    demo_field(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a few rounds hitting below 17
#[cfg(not(target_arch = "wasm32"))]
fn demo_blackjack(seed: u64) {
    use parlor::BlackjackEngine;
    use parlor::consts::STARTING_BALANCE;

    let mut engine = BlackjackEngine::new(STARTING_BALANCE, seed);
    for round in 1..=5 {
        if engine.is_broke() {
            log::info!("Out of chips after {} rounds", round - 1);
            break;
        }
        let bet = engine.balance().min(100);
        if let Err(e) = engine.place_bet(bet).and_then(|_| engine.deal()) {
            log::warn!("Round {} could not start: {}", round, e);
            break;
        }
        while engine.is_active() && engine.player().score() < 17 {
            if let Err(e) = engine.hit() {
                log::warn!("Hit failed: {}", e);
                break;
            }
        }
        if engine.is_active() {
            if let Err(e) = engine.stand() {
                log::warn!("Stand failed: {}", e);
            }
        }

        let view = engine.view();
        println!(
            "Round {}: {} | player {} vs dealer {} | balance {}",
            round,
            view.message,
            view.player_score_text(),
            view.dealer_score_text(),
            view.balance_text()
        );
        let _ = engine.new_round();
    }
}

/// Tick the backdrop for a second of frames with a roast burst mid-way
#[cfg(not(target_arch = "wasm32"))]
fn demo_field(seed: u64) {
    use parlor::Settings;
    use parlor::effects::Effect;
    use parlor::field::{Bounds, CountingSink, ParticleField};

    let settings = Settings::load();
    let bounds = Bounds::new(1280.0, 720.0);
    let mut field = ParticleField::new(bounds, settings.field_config(), seed);
    field.initialize(settings.particle_count, bounds);

    let mut sink = CountingSink::default();
    for frame in 0..60 {
        if frame == 30 {
            field.inject_burst(&Effect::Roast.burst(bounds));
        }
        field.tick(Some(bounds.center()), &mut sink);
    }
    println!(
        "Backdrop: {} particles, {} circles and {} links drawn over 60 frames",
        field.len(),
        sink.circles,
        sink.lines
    );
}
