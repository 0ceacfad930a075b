use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, TouchEvent};
use yew::prelude::*;

use crate::model::{CellKey, GameAction, GameState, IntelScope, Phase, RegionPos, ViewMode, tally_by_region};
use crate::state::{Camera, Pointer, Surface, TouchState, cell_at, pointer::DRAG_THRESHOLD_PX};

use super::{
    camera_controls::CameraControls, cart_panel::CartPanel, help_overlay::HelpOverlay,
    intel_panel::IntelPanel, legend_panel::LegendPanel, notice_banner::NoticeBanner,
    status_bar::StatusBar,
};

#[derive(Properties, PartialEq, Clone)]
pub struct MapViewProps {
    pub game_state: UseReducerHandle<GameState>,
}

/// Resolve a click on the canvas into a game action: a region to open in
/// overview, a cell to toggle in detail. Out-of-bounds clicks resolve to
/// nothing and are silently dropped.
fn click_action(gs: &GameState, cam: &Camera, canvas_x: f64, canvas_y: f64, surface: Surface) -> Option<GameAction> {
    if gs.phase != Phase::Playing {
        return None;
    }
    let (mx, my) = cam.map_point(canvas_x, canvas_y, surface);
    match gs.view {
        ViewMode::Overview => {
            let (x, y) = cell_at(mx, my, surface, gs.config.region_grid)?;
            Some(GameAction::OpenRegion {
                region: RegionPos { x, y },
            })
        }
        ViewMode::Detail { region } => {
            let (x, y) = cell_at(mx, my, surface, gs.config.cell_grid)?;
            Some(GameAction::ToggleCell {
                key: CellKey::Flag { region, x, y },
            })
        }
    }
}

fn draw_map(ctx: &CanvasRenderingContext2d, gs: &GameState, cam: &Camera, surface: Surface, anim_ms: f64) {
    let w = surface.width;
    let h = surface.height;
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.set_fill_style_str("#1e293b");
    ctx.fill_rect(0.0, 0.0, w, h);
    // Center-anchored pan/zoom: screen = (map - center) * zoom + center + pan.
    let tx = w * 0.5 * (1.0 - cam.zoom) + cam.pan_x;
    let ty = h * 0.5 * (1.0 - cam.zoom) + cam.pan_y;
    ctx.set_transform(cam.zoom, 0.0, 0.0, cam.zoom, tx, ty).ok();

    let grid = match gs.view {
        ViewMode::Overview => gs.config.region_grid,
        ViewMode::Detail { .. } => gs.config.cell_grid,
    };
    let step_x = w / grid as f64;
    let step_y = h / grid as f64;

    // Checkered ground in place of the map artwork.
    for y in 0..grid {
        for x in 0..grid {
            let fill = if (x + y) % 2 == 0 { "#161b22" } else { "#1b2430" };
            ctx.set_fill_style_str(fill);
            ctx.fill_rect(x as f64 * step_x, y as f64 * step_y, step_x, step_y);
        }
    }
    ctx.set_stroke_style_str("#64748b");
    ctx.set_line_width((2.0 / cam.zoom).max(0.5));
    ctx.set_global_alpha(0.8);
    for i in 0..=grid {
        let x = i as f64 * step_x;
        let y = i as f64 * step_y;
        ctx.begin_path();
        ctx.move_to(x, 0.0);
        ctx.line_to(x, h);
        ctx.stroke();
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(w, y);
        ctx.stroke();
    }
    ctx.set_global_alpha(1.0);

    let pulse = 0.5 + 0.5 * (anim_ms * 0.005).sin();
    let snap = gs.active_snapshot();

    match gs.view {
        ViewMode::Overview => {
            let submitted = tally_by_region(gs.selection.submitted());
            let carted = tally_by_region(gs.selection.cart());
            for (region, count) in &submitted {
                let cx = region.x as f64 * step_x + step_x * 0.5;
                let cy = region.y as f64 * step_y + step_y * 0.5;
                ctx.set_stroke_style_str(&format!("rgba(34,197,94,{:.3})", pulse));
                ctx.set_line_width((4.0 / cam.zoom).max(0.5));
                ctx.stroke_rect(
                    region.x as f64 * step_x + 2.0,
                    region.y as f64 * step_y + 2.0,
                    step_x - 4.0,
                    step_y - 4.0,
                );
                let breathe = 20.0 + (anim_ms * 0.004).sin() * 3.0;
                ctx.set_fill_style_str("#22c55e");
                ctx.begin_path();
                ctx.arc(cx, cy, breathe, 0.0, std::f64::consts::PI * 2.0).ok();
                ctx.fill();
                ctx.set_fill_style_str("#ffffff");
                ctx.set_font("bold 24px monospace");
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                ctx.fill_text(&count.to_string(), cx, cy).ok();
            }
            for (region, count) in &carted {
                let cx = region.x as f64 * step_x + step_x * 0.5;
                // Offset above the submitted badge when both exist.
                let cy = region.y as f64 * step_y + step_y * 0.5 - 15.0;
                ctx.set_stroke_style_str(&format!("rgba(245,158,11,{:.3})", pulse));
                ctx.set_line_width((4.0 / cam.zoom).max(0.5));
                ctx.stroke_rect(
                    region.x as f64 * step_x + 2.0,
                    region.y as f64 * step_y + 2.0,
                    step_x - 4.0,
                    step_y - 4.0,
                );
                let breathe = 15.0 + (anim_ms * 0.004).sin() * 2.0;
                ctx.set_fill_style_str("#f59e0b");
                ctx.begin_path();
                ctx.arc(cx, cy, breathe, 0.0, std::f64::consts::PI * 2.0).ok();
                ctx.fill();
                ctx.set_fill_style_str("#ffffff");
                ctx.set_font("bold 18px monospace");
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                ctx.fill_text(&count.to_string(), cx, cy).ok();
            }
            if let Some(snap) = snap {
                if snap.scope == IntelScope::Overview {
                    for key in &snap.positions {
                        if let CellKey::Region(r) = key {
                            let cx = r.x as f64 * step_x + step_x * 0.5;
                            let cy = r.y as f64 * step_y + step_y * 0.5;
                            ctx.set_fill_style_str(&format!(
                                "rgba(6,182,212,{:.3})",
                                0.5 + 0.3 * (anim_ms * 0.003).sin()
                            ));
                            ctx.set_stroke_style_str("#0891b2");
                            ctx.set_line_width((3.0 / cam.zoom).max(0.5));
                            ctx.begin_path();
                            ctx.arc(cx, cy, 15.0, 0.0, std::f64::consts::PI * 2.0).ok();
                            ctx.fill();
                            ctx.stroke();
                            ctx.set_fill_style_str("#ffffff");
                            ctx.set_font("bold 14px monospace");
                            ctx.set_text_align("center");
                            ctx.set_text_baseline("middle");
                            ctx.fill_text("P", cx, cy).ok();
                        }
                    }
                }
            }
        }
        ViewMode::Detail { region } => {
            let flag_center = |x: u32, y: u32| {
                let fx = x as f64 * step_x + step_x * 0.5;
                let wave = (anim_ms * 0.003 + fx * 0.01).sin() * 3.0;
                (fx, y as f64 * step_y + step_y * 0.5 + wave)
            };
            for key in gs.selection.submitted() {
                if let CellKey::Flag { region: r, x, y } = key {
                    if *r == region {
                        let (fx, fy) = flag_center(*x, *y);
                        ctx.set_fill_style_str("#22c55e");
                        ctx.begin_path();
                        ctx.arc(fx, fy, 8.0, 0.0, std::f64::consts::PI * 2.0).ok();
                        ctx.fill();
                        ctx.set_fill_style_str("#ffffff");
                        ctx.set_font("16px monospace");
                        ctx.set_text_align("center");
                        ctx.set_text_baseline("middle");
                        ctx.fill_text("\u{2713}", fx, fy).ok();
                    }
                }
            }
            for key in gs.selection.cart() {
                if let CellKey::Flag { region: r, x, y } = key {
                    if *r == region {
                        let (fx, fy) = flag_center(*x, *y);
                        ctx.set_fill_style_str("#f59e0b");
                        ctx.begin_path();
                        ctx.arc(fx, fy, 8.0, 0.0, std::f64::consts::PI * 2.0).ok();
                        ctx.fill();
                        ctx.set_stroke_style_str("#b45309");
                        ctx.set_line_width((2.0 / cam.zoom).max(0.5));
                        ctx.stroke();
                    }
                }
            }
            if let Some(snap) = snap {
                if snap.scope == (IntelScope::Detail { region }) {
                    for key in &snap.positions {
                        if let CellKey::Flag { region: r, x, y } = key {
                            if *r == region {
                                let fx = *x as f64 * step_x + step_x * 0.5;
                                let fy = *y as f64 * step_y + step_y * 0.5;
                                ctx.set_fill_style_str("#06b6d4");
                                ctx.set_stroke_style_str("#0891b2");
                                ctx.set_line_width((2.0 / cam.zoom).max(0.5));
                                ctx.begin_path();
                                ctx.arc(fx, fy, 12.0, 0.0, std::f64::consts::PI * 2.0).ok();
                                ctx.fill();
                                ctx.stroke();
                                ctx.set_fill_style_str("#ffffff");
                                ctx.set_font("bold 20px monospace");
                                ctx.set_text_align("center");
                                ctx.set_text_baseline("middle");
                                ctx.fill_text("P", fx, fy).ok();
                            }
                        }
                    }
                }
            }
        }
    }
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
}

#[function_component(MapView)]
pub fn map_view(props: &MapViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let camera = use_mut_ref(Camera::default);
    let pointer = use_mut_ref(Pointer::default);
    let touch_state = use_mut_ref(TouchState::default);
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let game_ref = use_mut_ref(|| props.game_state.clone());
    let show_help = {
        let initial = if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                store.get_item("th_intro_seen").ok().flatten().is_none()
            } else {
                true
            }
        } else {
            true
        };
        use_state(|| initial)
    };

    // Refresh the stored handle and redraw whenever the reducer advances.
    {
        let game_ref = game_ref.clone();
        let current_handle = props.game_state.clone();
        let draw_ref_local = draw_ref.clone();
        let version = props.game_state.version;
        use_effect_with(version, move |_| {
            *game_ref.borrow_mut() = current_handle.clone();
            if let Some(f) = &*draw_ref_local.borrow() {
                f();
            }
            || ()
        });
    }

    // Mount: canvas sizing, draw closure, events, intervals, cleanup.
    {
        let canvas_ref = canvas_ref.clone();
        let camera = camera.clone();
        let pointer = pointer.clone();
        let touch_state = touch_state.clone();
        let draw_ref_setup = draw_ref.clone();
        let game_ref_setup = game_ref.clone();
        let config = props.game_state.config.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().unwrap();
            let canvas: HtmlCanvasElement = canvas_ref.cast::<HtmlCanvasElement>().unwrap();
            // Fixed drawing surface; CSS scales it responsively.
            canvas.set_width(config.canvas_width);
            canvas.set_height(config.canvas_height);

            let draw_closure: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let camera = camera.clone();
                let game_ref = game_ref_setup.clone();
                Rc::new(move || {
                    if !canvas.is_connected() {
                        return;
                    }
                    let ctx = match canvas.get_context("2d").ok().flatten() {
                        Some(c) => match c.dyn_into::<CanvasRenderingContext2d>() {
                            Ok(c) => c,
                            Err(_) => return,
                        },
                        None => return,
                    };
                    let surface = Surface {
                        width: canvas.width() as f64,
                        height: canvas.height() as f64,
                    };
                    let cam = camera.borrow();
                    let handle = game_ref.borrow();
                    let gs = (**handle).clone();
                    draw_map(&ctx, &gs, &cam, surface, js_sys::Date::now());
                })
            };
            *draw_ref_setup.borrow_mut() = Some(draw_closure.clone());
            (draw_closure)();

            // Animation frame loop keeps the marker pulses moving.
            let raf_id = Rc::new(RefCell::new(None));
            {
                let raf_id_clone = raf_id.clone();
                let draw_ref_loop = draw_ref_setup.clone();
                let window_loop = window.clone();
                let closure_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                    Rc::new(RefCell::new(None));
                let closure_cell_clone = closure_cell.clone();
                *closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    if let Some(f) = &*draw_ref_loop.borrow() {
                        f();
                    }
                    if let Ok(id) = window_loop.request_animation_frame(
                        closure_cell_clone
                            .borrow()
                            .as_ref()
                            .unwrap()
                            .as_ref()
                            .unchecked_ref(),
                    ) {
                        *raf_id_clone.borrow_mut() = Some(id);
                    }
                }) as Box<dyn FnMut()>));
                if let Ok(id) = window.request_animation_frame(
                    closure_cell
                        .borrow()
                        .as_ref()
                        .unwrap()
                        .as_ref()
                        .unchecked_ref(),
                ) {
                    *raf_id.borrow_mut() = Some(id);
                }
            }

            // Wheel zoom anchored at the cursor.
            let wheel_cb = {
                let camera = camera.clone();
                let canvas_w = canvas.clone();
                let draw_ref = draw_ref_setup.clone();
                Closure::wrap(Box::new(move |e: web_sys::WheelEvent| {
                    e.prevent_default();
                    let surface = Surface {
                        width: canvas_w.width() as f64,
                        height: canvas_w.height() as f64,
                    };
                    let mut cam = camera.borrow_mut();
                    let factor = (-e.delta_y() * 0.001).exp();
                    cam.zoom_about(factor, e.offset_x() as f64, e.offset_y() as f64, surface);
                    drop(cam);
                    if let Some(f) = &*draw_ref.borrow() {
                        f();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                .unwrap();

            // Mouse: press may become either a click (select) or a pan.
            let mousedown_cb = {
                let pointer = pointer.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    pointer
                        .borrow_mut()
                        .press(e.offset_x() as f64, e.offset_y() as f64);
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                )
                .unwrap();

            let mousemove_cb = {
                let camera = camera.clone();
                let pointer = pointer.clone();
                let draw_ref = draw_ref_setup.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    let delta = pointer
                        .borrow_mut()
                        .movement(e.offset_x() as f64, e.offset_y() as f64);
                    if let Some((dx, dy)) = delta {
                        let mut cam = camera.borrow_mut();
                        cam.pan_x += dx;
                        cam.pan_y += dy;
                        drop(cam);
                        if let Some(f) = &*draw_ref.borrow() {
                            f();
                        }
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                )
                .unwrap();

            let mouseup_cb = {
                let camera = camera.clone();
                let pointer = pointer.clone();
                let canvas_c = canvas.clone();
                let game_ref = game_ref_setup.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    if !pointer.borrow_mut().release() {
                        return;
                    }
                    let surface = Surface {
                        width: canvas_c.width() as f64,
                        height: canvas_c.height() as f64,
                    };
                    let handle = game_ref.borrow().clone();
                    let gs = (*handle).clone();
                    let cam = camera.borrow();
                    let action = click_action(
                        &gs,
                        &cam,
                        e.offset_x() as f64,
                        e.offset_y() as f64,
                        surface,
                    );
                    drop(cam);
                    if let Some(action) = action {
                        handle.dispatch(action);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .unwrap();

            let mouseleave_cb = {
                let pointer = pointer.clone();
                Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
                    pointer.borrow_mut().release();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "mouseleave",
                    mouseleave_cb.as_ref().unchecked_ref(),
                )
                .unwrap();

            let contextmenu_cb = {
                Closure::wrap(Box::new(move |e: web_sys::Event| {
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "contextmenu",
                    contextmenu_cb.as_ref().unchecked_ref(),
                )
                .unwrap();

            // Escape backs out of the detail view.
            let keydown_cb = {
                let game_ref = game_ref_setup.clone();
                Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
                    if e.key() == "Escape" {
                        e.prevent_default();
                        let handle = game_ref.borrow().clone();
                        handle.dispatch(GameAction::BackToOverview);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                .ok();

            // Touch: single-finger tap selects, drag pans, pinch zooms.
            let touch_start_cb = {
                let canvas_tc = canvas.clone();
                let touch_state_tc = touch_state.clone();
                let camera_tc = camera.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let rect = canvas_tc.get_bounding_client_rect();
                    if let Some(t0) = e.touches().item(0) {
                        let cx = t0.client_x() as f64 - rect.left();
                        let cy = t0.client_y() as f64 - rect.top();
                        let mut ts = touch_state_tc.borrow_mut();
                        ts.last_touch_x = cx;
                        ts.last_touch_y = cy;
                        ts.travel = 0.0;
                        ts.single_active = true;
                        ts.pinch = false;
                        if e.touches().length() >= 2 {
                            if let Some(t1) = e.touches().item(1) {
                                let x1 = t1.client_x() as f64 - rect.left();
                                let y1 = t1.client_y() as f64 - rect.top();
                                let dist =
                                    ((x1 - cx).powi(2) + (y1 - cy).powi(2)).sqrt().max(1.0);
                                ts.pinch = true;
                                ts.single_active = false;
                                ts.start_pinch_dist = dist;
                                ts.start_zoom = camera_tc.borrow().zoom;
                            }
                        }
                    }
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let touch_move_cb = {
                let canvas_tc = canvas.clone();
                let camera_tc = camera.clone();
                let touch_state_tc = touch_state.clone();
                let draw_ref = draw_ref_setup.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let touches = e.touches();
                    let rect = canvas_tc.get_bounding_client_rect();
                    if touches.length() == 1 {
                        if let Some(t0) = touches.item(0) {
                            let cx = t0.client_x() as f64 - rect.left();
                            let cy = t0.client_y() as f64 - rect.top();
                            let mut ts = touch_state_tc.borrow_mut();
                            if ts.single_active {
                                let dx = cx - ts.last_touch_x;
                                let dy = cy - ts.last_touch_y;
                                ts.last_touch_x = cx;
                                ts.last_touch_y = cy;
                                ts.travel += dx.abs() + dy.abs();
                                if ts.travel > DRAG_THRESHOLD_PX {
                                    let mut cam = camera_tc.borrow_mut();
                                    cam.pan_x += dx;
                                    cam.pan_y += dy;
                                }
                            }
                        }
                    } else if touches.length() >= 2 {
                        if let (Some(t0), Some(t1)) = (touches.item(0), touches.item(1)) {
                            let x0 = t0.client_x() as f64 - rect.left();
                            let y0 = t0.client_y() as f64 - rect.top();
                            let x1 = t1.client_x() as f64 - rect.left();
                            let y1 = t1.client_y() as f64 - rect.top();
                            let dist = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt().max(1.0);
                            let midx = (x0 + x1) * 0.5;
                            let midy = (y0 + y1) * 0.5;
                            let ts = touch_state_tc.borrow();
                            if ts.pinch {
                                let surface = Surface {
                                    width: canvas_tc.width() as f64,
                                    height: canvas_tc.height() as f64,
                                };
                                let mut cam = camera_tc.borrow_mut();
                                let target = (ts.start_zoom * dist / ts.start_pinch_dist)
                                    .clamp(crate::state::camera::MIN_ZOOM, crate::state::camera::MAX_ZOOM);
                                let factor = target / cam.zoom;
                                cam.zoom_about(factor, midx, midy, surface);
                            }
                        }
                    }
                    if let Some(f) = &*draw_ref.borrow() {
                        f();
                    }
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let touch_end_cb = {
                let canvas_tc = canvas.clone();
                let camera_tc = camera.clone();
                let touch_state_tc = touch_state.clone();
                let game_ref = game_ref_setup.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let left = e.touches().length();
                    let mut ts = touch_state_tc.borrow_mut();
                    if left == 0 {
                        // A short single-finger press counts as a tap.
                        if ts.single_active && ts.travel <= DRAG_THRESHOLD_PX {
                            let surface = Surface {
                                width: canvas_tc.width() as f64,
                                height: canvas_tc.height() as f64,
                            };
                            let handle = game_ref.borrow().clone();
                            let gs = (*handle).clone();
                            let cam = camera_tc.borrow();
                            let action = click_action(
                                &gs,
                                &cam,
                                ts.last_touch_x,
                                ts.last_touch_y,
                                surface,
                            );
                            drop(cam);
                            if let Some(action) = action {
                                handle.dispatch(action);
                            }
                        }
                        ts.single_active = false;
                        ts.pinch = false;
                    } else if left == 1 {
                        ts.pinch = false;
                        ts.single_active = true;
                        ts.travel = DRAG_THRESHOLD_PX + 1.0; // resuming after pinch is never a tap
                    }
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();
            canvas
                .add_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let window_clone = window.clone();
            move || {
                let _ = canvas
                    .remove_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref());
                let _ = canvas.remove_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mouseleave",
                    mouseleave_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "contextmenu",
                    contextmenu_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "keydown",
                    keydown_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                if let Some(id) = *raf_id.borrow() {
                    let _ = window_clone.cancel_animation_frame(id);
                }
            }
        });
    }

    let gs = (*props.game_state).clone();

    // Camera control callbacks (buttons zoom about the canvas center).
    let zoom_in_cb: Callback<()> = {
        let camera = camera.clone();
        let draw_ref = draw_ref.clone();
        Callback::from(move |()| {
            camera.borrow_mut().zoom_in();
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
        })
    };
    let zoom_out_cb: Callback<()> = {
        let camera = camera.clone();
        let draw_ref = draw_ref.clone();
        Callback::from(move |()| {
            camera.borrow_mut().zoom_out();
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
        })
    };
    let reset_view_cb: Callback<()> = {
        let camera = camera.clone();
        let draw_ref = draw_ref.clone();
        Callback::from(move |()| {
            camera.borrow_mut().reset();
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
        })
    };

    let back_cb: Callback<()> = {
        let handle = props.game_state.clone();
        Callback::from(move |()| handle.dispatch(GameAction::BackToOverview))
    };
    let submit_cb: Callback<()> = {
        let handle = props.game_state.clone();
        Callback::from(move |()| handle.dispatch(GameAction::SubmitCart))
    };
    let clear_cb: Callback<()> = {
        let handle = props.game_state.clone();
        Callback::from(move |()| handle.dispatch(GameAction::ClearCart))
    };
    let remove_cb: Callback<CellKey> = {
        let handle = props.game_state.clone();
        Callback::from(move |key| handle.dispatch(GameAction::ToggleCell { key }))
    };
    let buy_turns_cb: Callback<()> = {
        let handle = props.game_state.clone();
        Callback::from(move |()| handle.dispatch(GameAction::BuyTurns))
    };
    let purchase_intel_cb: Callback<()> = {
        let handle = props.game_state.clone();
        Callback::from(move |()| {
            let gs = (*handle).clone();
            let positions = crate::components::intel_panel::mock_positions(&gs);
            handle.dispatch(GameAction::PurchaseIntel { positions });
        })
    };
    let hide_intel_cb: Callback<()> = {
        let handle = props.game_state.clone();
        Callback::from(move |()| handle.dispatch(GameAction::HideIntel))
    };
    let dismiss_notice_cb: Callback<()> = {
        let handle = props.game_state.clone();
        Callback::from(move |()| handle.dispatch(GameAction::DismissNotice))
    };
    let hide_help_cb: Callback<()> = {
        let show_help = show_help.clone();
        Callback::from(move |()| {
            show_help.set(false);
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    let _ = store.set_item("th_intro_seen", "1");
                }
            }
        })
    };
    let show_help_cb: Callback<()> = {
        let show_help = show_help.clone();
        Callback::from(move |()| show_help.set(true))
    };

    html! {
        <div style="position:relative; width:100%; min-height:calc(100vh - 60px); display:flex; align-items:flex-start; justify-content:center; padding:16px;">
            <canvas
                ref={canvas_ref.clone()}
                id="map-canvas"
                style="display:block; border:1px solid #30363d; border-radius:8px; max-width:100%; touch-action:none;"
            ></canvas>
            <StatusBar game_state={props.game_state.clone()} on_back={back_cb} on_show_help={show_help_cb} />
            <CartPanel
                game_state={props.game_state.clone()}
                on_submit={submit_cb}
                on_clear={clear_cb}
                on_remove={remove_cb}
            />
            <IntelPanel
                game_state={props.game_state.clone()}
                on_purchase={purchase_intel_cb}
                on_hide={hide_intel_cb}
                on_buy_turns={buy_turns_cb}
            />
            <CameraControls on_zoom_in={zoom_in_cb} on_zoom_out={zoom_out_cb} on_reset={reset_view_cb} />
            <LegendPanel
                has_submitted={gs.selection.submitted_len() > 0}
                has_cart={gs.selection.cart_len() > 0}
                has_intel={gs.active_snapshot().is_some()}
            />
            <NoticeBanner notice={gs.notice.clone()} on_dismiss={dismiss_notice_cb} />
            <HelpOverlay show={*show_help} hide={hide_help_cb} />
        </div>
    }
}
