//! Desktop runner: one winit window, one wgpu backend, one render thread.
//!
//! Everything is event-loop driven. A frame runs: pump due timers ->
//! recompose -> layout/paint (which feeds the scroll viewport and publishes
//! element bounds, firing visibility observers) -> rasterize. The loop then
//! parks on the next timer deadline, or schedules another frame right away
//! if something (animation, glide, pending async work) asked for one via
//! `request_frame`.
//!
//! Input routing: hit regions come back from layout in paint order; the
//! topmost region under the cursor wins. Wheel deltas walk the regions
//! under the cursor until one consumes; clicks activate on release while
//! still over the pressed region; Tab cycles the focus chain; key events go
//! to the focused text field's state.

use std::collections::HashSet;
use std::sync::Arc;

use unfold_core::prelude::*;
use unfold_core::{runtime, timer};
use unfold_ui::textfield;
use unfold_ui::{Interactions, layout_and_paint};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes};

/// Wheel line-delta to logical pixels.
const WHEEL_LINE: f32 = 40.0;

pub fn run_desktop_app(
    title: &str,
    root: impl FnMut(&mut Scheduler) -> View + 'static,
) -> anyhow::Result<()> {
    struct App {
        title: String,
        root: Box<dyn FnMut(&mut Scheduler) -> View>,
        window: Option<Arc<Window>>,
        backend: Option<unfold_render_wgpu::WgpuBackend>,
        sched: Scheduler,
        frame_cache: Option<Frame>,
        mouse_pos: Vec2,
        scale: f32,
        hover_id: Option<u64>,
        pressed_ids: HashSet<u64>,
        capture_id: Option<u64>,
        key_active: Option<u64>,
        init_error: Option<anyhow::Error>,
    }

    impl App {
        fn new(title: String, root: Box<dyn FnMut(&mut Scheduler) -> View>) -> Self {
            Self {
                title,
                root,
                window: None,
                backend: None,
                sched: Scheduler::new(),
                frame_cache: None,
                mouse_pos: Vec2::default(),
                scale: 1.0,
                hover_id: None,
                pressed_ids: HashSet::new(),
                capture_id: None,
                key_active: None,
                init_error: None,
            }
        }

        fn request_redraw(&self) {
            if let Some(w) = &self.window {
                w.request_redraw();
            }
        }

        fn top_hit(&self, pos: Vec2) -> Option<&HitRegion> {
            let frame = self.frame_cache.as_ref()?;
            frame
                .hit_regions
                .iter()
                .filter(|h| h.rect.contains(pos))
                // max_by keeps the last maximum, so later paint order wins ties
                .max_by(|a, b| {
                    a.z_index
                        .partial_cmp(&b.z_index)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        }

        fn focused_field(&self) -> Option<u64> {
            let focused = self.sched.focused?;
            let frame = self.frame_cache.as_ref()?;
            frame
                .hit_regions
                .iter()
                .find(|h| h.id == focused)
                .and_then(|h| h.tf_key)
        }

        fn cycle_focus(&mut self, backwards: bool) {
            let Some(frame) = &self.frame_cache else {
                return;
            };
            if frame.focus_chain.is_empty() {
                return;
            }
            let chain = &frame.focus_chain;
            let next = match self.sched.focused.and_then(|id| {
                chain.iter().position(|&c| c == id)
            }) {
                Some(i) if backwards => chain[(i + chain.len() - 1) % chain.len()],
                Some(i) => chain[(i + 1) % chain.len()],
                None if backwards => *chain.last().unwrap_or(&chain[0]),
                None => chain[0],
            };
            self.sched.focused = Some(next);
            self.request_redraw();
        }

        fn frame(&mut self, el: &ActiveEventLoop) {
            let Some(backend) = self.backend.as_mut() else {
                return;
            };

            timer::run_due();

            let interactions = Interactions {
                hover: self.hover_id,
                pressed: self.pressed_ids.clone(),
            };
            let focused = self.sched.focused;
            let scale = self.scale;
            let frame = self.sched.compose(&mut self.root, |view, size| {
                layout_and_paint(view, size, scale, &interactions, focused)
            });

            backend.frame(&frame.scene);
            self.frame_cache = Some(frame);

            // Keep frames coming while something is in motion; otherwise
            // park until the next timer deadline (or for input).
            if runtime::take_frame_requests() > 0 {
                el.set_control_flow(ControlFlow::Poll);
                self.request_redraw();
            } else if let Some(deadline) = timer::next_deadline() {
                el.set_control_flow(ControlFlow::WaitUntil(deadline));
            } else {
                el.set_control_flow(ControlFlow::Wait);
            }
        }
    }

    impl ApplicationHandler<()> for App {
        fn resumed(&mut self, el: &ActiveEventLoop) {
            if self.window.is_some() {
                return;
            }
            let attrs = WindowAttributes::default()
                .with_title(self.title.clone())
                .with_inner_size(LogicalSize::new(1100.0, 800.0));
            match el.create_window(attrs) {
                Ok(win) => {
                    let win = Arc::new(win);
                    let size = win.inner_size();
                    self.sched.size = (size.width, size.height);
                    self.scale = win.scale_factor() as f32;
                    match unfold_render_wgpu::WgpuBackend::new(win.clone()) {
                        Ok(backend) => {
                            self.backend = Some(backend);
                            self.window = Some(win);
                            self.request_redraw();
                        }
                        Err(e) => {
                            log::error!("failed to create render backend: {e:?}");
                            self.init_error = Some(e);
                            el.exit();
                        }
                    }
                }
                Err(e) => {
                    log::error!("failed to create window: {e:?}");
                    self.init_error = Some(e.into());
                    el.exit();
                }
            }
        }

        fn window_event(
            &mut self,
            el: &ActiveEventLoop,
            _id: winit::window::WindowId,
            event: WindowEvent,
        ) {
            match event {
                WindowEvent::CloseRequested => {
                    log::info!("window close requested");
                    el.exit();
                }
                WindowEvent::Resized(size) => {
                    self.sched.size = (size.width, size.height);
                    if let Some(b) = &mut self.backend {
                        b.configure_surface(size.width, size.height);
                    }
                    self.request_redraw();
                }
                WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                    self.scale = scale_factor as f32;
                    self.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    self.mouse_pos = Vec2 {
                        x: position.x as f32,
                        y: position.y as f32,
                    };
                    let new_hover = self.top_hit(self.mouse_pos).map(|h| h.id);
                    if new_hover != self.hover_id {
                        self.hover_id = new_hover;
                        self.request_redraw();
                    }
                }
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                } => {
                    let hit = self.top_hit(self.mouse_pos).map(|h| (h.id, h.focusable));
                    if let Some((id, focusable)) = hit {
                        self.capture_id = Some(id);
                        self.pressed_ids.insert(id);
                        if focusable {
                            self.sched.focused = Some(id);
                        }
                    } else {
                        self.sched.focused = None;
                    }
                    self.request_redraw();
                }
                WindowEvent::MouseInput {
                    state: ElementState::Released,
                    button: MouseButton::Left,
                    ..
                } => {
                    if let Some(cid) = self.capture_id.take() {
                        self.pressed_ids.remove(&cid);
                        // Click fires on release while still over the region.
                        let clicked = self
                            .frame_cache
                            .as_ref()
                            .and_then(|f| f.hit_regions.iter().find(|h| h.id == cid))
                            .filter(|h| h.rect.contains(self.mouse_pos))
                            .and_then(|h| h.on_click.clone());
                        if let Some(cb) = clicked {
                            cb();
                        }
                        self.request_redraw();
                    }
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    let dy = match delta {
                        MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE,
                        MouseScrollDelta::PixelDelta(lp) => -(lp.y as f32) / self.scale,
                    };
                    let scrolled = self.frame_cache.as_ref().and_then(|f| {
                        f.hit_regions
                            .iter()
                            .rev()
                            .filter(|h| h.rect.contains(self.mouse_pos))
                            .find_map(|h| {
                                let cb = h.on_scroll.as_ref()?;
                                let leftover = cb(Vec2 { x: 0.0, y: dy });
                                ((dy - leftover.y).abs() > 0.001).then_some(())
                            })
                    });
                    if scrolled.is_some() {
                        self.request_redraw();
                    }
                }
                WindowEvent::KeyboardInput {
                    event: key_event, ..
                } => {
                    if key_event.state == ElementState::Pressed {
                        self.on_key_pressed(&key_event);
                    } else if matches!(
                        key_event.physical_key,
                        PhysicalKey::Code(KeyCode::Space) | PhysicalKey::Code(KeyCode::Enter)
                    ) && let Some(active) = self.key_active.take()
                    {
                        // Keyboard activation completes on release.
                        self.pressed_ids.remove(&active);
                        let cb = self
                            .frame_cache
                            .as_ref()
                            .and_then(|f| f.hit_regions.iter().find(|h| h.id == active))
                            .and_then(|h| h.on_click.clone());
                        if let Some(cb) = cb {
                            cb();
                        }
                        self.request_redraw();
                    }
                }
                WindowEvent::RedrawRequested => {
                    self.frame(el);
                }
                _ => {}
            }
        }

        fn new_events(&mut self, _el: &ActiveEventLoop, cause: StartCause) {
            if matches!(cause, StartCause::ResumeTimeReached { .. }) {
                self.request_redraw();
            }
        }

        fn exiting(&mut self, _el: &ActiveEventLoop) {
            // Unmount: run every scope cleanup, then drop stray timers.
            runtime::teardown();
            timer::clear();
        }
    }

    impl App {
        fn on_key_pressed(&mut self, key_event: &winit::event::KeyEvent) {
            // Focused text field consumes editing keys first.
            if let Some(field_key) = self.focused_field() {
                let state = textfield::field_state(field_key);
                let mut st = state.borrow_mut();
                let handled = match key_event.physical_key {
                    PhysicalKey::Code(KeyCode::Backspace) => {
                        st.backspace();
                        true
                    }
                    PhysicalKey::Code(KeyCode::Delete) => {
                        st.delete_forward();
                        true
                    }
                    PhysicalKey::Code(KeyCode::ArrowLeft) => {
                        st.move_left();
                        true
                    }
                    PhysicalKey::Code(KeyCode::ArrowRight) => {
                        st.move_right();
                        true
                    }
                    PhysicalKey::Code(KeyCode::Home) => {
                        st.move_home();
                        true
                    }
                    PhysicalKey::Code(KeyCode::End) => {
                        st.move_end();
                        true
                    }
                    PhysicalKey::Code(KeyCode::Escape) => {
                        drop(st);
                        self.sched.focused = None;
                        self.request_redraw();
                        return;
                    }
                    PhysicalKey::Code(KeyCode::Tab) => {
                        drop(st);
                        self.cycle_focus(false);
                        return;
                    }
                    _ => false,
                };
                if handled {
                    self.request_redraw();
                    return;
                }

                if let Some(raw) = key_event.text.as_deref() {
                    let text: String = raw
                        .chars()
                        .filter(|c| !c.is_control() && *c != '\n' && *c != '\r')
                        .collect();
                    if !text.is_empty() {
                        st.insert_str(&text);
                        self.request_redraw();
                        return;
                    }
                }
                return;
            }

            match key_event.physical_key {
                PhysicalKey::Code(KeyCode::Tab) => self.cycle_focus(false),
                PhysicalKey::Code(KeyCode::Escape) => {
                    self.sched.focused = None;
                    self.request_redraw();
                }
                PhysicalKey::Code(KeyCode::Space) | PhysicalKey::Code(KeyCode::Enter) => {
                    if let Some(focused) = self.sched.focused {
                        self.pressed_ids.insert(focused);
                        self.key_active = Some(focused);
                        self.request_redraw();
                    }
                }
                // Keyboard scrolling goes to the page scroll container.
                PhysicalKey::Code(KeyCode::ArrowDown) => self.scroll_page(WHEEL_LINE),
                PhysicalKey::Code(KeyCode::ArrowUp) => self.scroll_page(-WHEEL_LINE),
                PhysicalKey::Code(KeyCode::PageDown) => self.scroll_page(600.0),
                PhysicalKey::Code(KeyCode::PageUp) => self.scroll_page(-600.0),
                _ => {}
            }
        }

        fn scroll_page(&mut self, dy: f32) {
            let scrolled = self.frame_cache.as_ref().and_then(|f| {
                f.hit_regions
                    .iter()
                    .rev()
                    .find_map(|h| {
                        let cb = h.on_scroll.as_ref()?;
                        let leftover = cb(Vec2 { x: 0.0, y: dy });
                        ((dy - leftover.y).abs() > 0.001).then_some(())
                    })
            });
            if scrolled.is_some() {
                self.request_redraw();
            }
        }
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(title.to_string(), Box::new(root));
    event_loop.run_app(&mut app)?;
    if let Some(e) = app.init_error.take() {
        return Err(e);
    }
    Ok(())
}
