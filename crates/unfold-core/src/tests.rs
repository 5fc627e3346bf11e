#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    use crate::animation::*;
    use crate::color::Color;
    use crate::geometry::Rect;
    use crate::locals::with_viewport;
    use crate::reveal::{RevealController, RevealPolicy, use_reveal};
    use crate::runtime::{ComposeGuard, remember_with_key, teardown};
    use crate::scope::Scope;
    use crate::signal::signal;
    use crate::stagger::Stagger;
    use crate::timer;
    use crate::viewport::{BoundsHandle, Viewport};
    use crate::visibility::{observe_visibility, visible_fraction};

    #[test]
    fn signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn signal_subscribe_unsubscribe() {
        let sig = signal(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let id = sig.subscribe({
            let seen = seen.clone();
            move |v| seen.borrow_mut().push(*v)
        });

        sig.set(1);
        sig.set(2);
        sig.unsubscribe(id);
        sig.set(3);
        // Double unsubscribe is a no-op.
        sig.unsubscribe(id);

        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn signal_subscriber_may_cancel_itself_mid_delivery() {
        let sig = signal(0);
        let fired = Rc::new(Cell::new(0));

        let id_cell: Rc<RefCell<Option<crate::signal::SubId>>> = Rc::new(RefCell::new(None));
        let id = sig.subscribe({
            let sig = sig.clone();
            let fired = fired.clone();
            let id_cell = id_cell.clone();
            move |_| {
                fired.set(fired.get() + 1);
                if let Some(id) = *id_cell.borrow() {
                    sig.unsubscribe(id);
                }
            }
        });
        *id_cell.borrow_mut() = Some(id);

        sig.set(1);
        sig.set(2);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn scope_explicit_dispose() {
        let cleaned_up = Rc::new(RefCell::new(false));

        let scope = Scope::new();
        let flag = cleaned_up.clone();
        scope.add_disposer(move || {
            *flag.borrow_mut() = true;
        });

        assert!(!*cleaned_up.borrow());
        scope.dispose();
        assert!(*cleaned_up.borrow());
    }

    #[test]
    fn key_based_remember() {
        let _guard = ComposeGuard::begin();
        let val1 = remember_with_key("test", || 42);
        let val2 = remember_with_key("test", || 100);

        assert_eq!(*val1, 42);
        assert_eq!(*val2, 42); // key exists, init not rerun
        teardown();
    }

    #[test]
    fn color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));
    }

    #[test]
    fn rect_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        let i = a.intersect(&b);
        assert_eq!(i, Rect::new(50.0, 50.0, 50.0, 50.0));

        let c = Rect::new(200.0, 200.0, 10.0, 10.0);
        assert!(a.intersect(&c).is_empty());
    }

    #[test]
    fn animation_deterministic() {
        let clock = TestClock::start();
        set_clock(clock.clone());

        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
        );
        a.set_target(10.0);

        clock.advance(Duration::from_millis(250));
        assert!(a.update());
        assert!((*a.get() - 2.5).abs() < 0.01);

        clock.advance(Duration::from_millis(750));
        let still = a.update();
        assert!(!still);
        assert!((*a.get() - 10.0).abs() < 0.001);
    }

    #[test]
    fn animation_spec_delay_holds_start() {
        let clock = TestClock::start();
        set_clock(clock.clone());

        let spec = AnimationSpec::tween(Duration::from_millis(100), Easing::Linear)
            .delayed(Duration::from_millis(200));
        let mut a = AnimatedValue::new(0.0f32, spec);
        a.set_target(1.0);

        clock.advance(Duration::from_millis(150));
        assert!(a.update());
        assert_eq!(*a.get(), 0.0); // still inside the lead time

        clock.advance(Duration::from_millis(150));
        assert!(a.update());
        assert!(*a.get() > 0.0);
    }

    #[test]
    fn timers_fire_in_deadline_order() {
        let clock = TestClock::start();
        set_clock(clock.clone());

        let order = Rc::new(RefCell::new(Vec::new()));
        let push = |tag: &'static str| {
            let order = order.clone();
            move || order.borrow_mut().push(tag)
        };

        timer::schedule(Duration::from_millis(300), push("late"));
        timer::schedule(Duration::from_millis(100), push("early"));

        assert_eq!(timer::run_due(), 0);

        clock.advance(Duration::from_millis(400));
        assert_eq!(timer::run_due(), 2);
        assert_eq!(*order.borrow(), vec!["early", "late"]);
        assert_eq!(timer::pending(), 0);
    }

    #[test]
    fn timer_cancel_is_idempotent() {
        let clock = TestClock::start();
        set_clock(clock.clone());

        let fired = Rc::new(Cell::new(false));
        let handle = timer::schedule(Duration::from_millis(50), {
            let fired = fired.clone();
            move || fired.set(true)
        });

        handle.cancel();
        handle.cancel();
        clock.advance(Duration::from_millis(100));
        assert_eq!(timer::run_due(), 0);
        assert!(!fired.get());
    }

    #[test]
    fn timer_scheduled_from_callback_waits_for_next_pump() {
        let clock = TestClock::start();
        set_clock(clock.clone());

        let count = Rc::new(Cell::new(0));
        timer::schedule(Duration::from_millis(10), {
            let count = count.clone();
            move || {
                count.set(count.get() + 1);
                let count = count.clone();
                timer::schedule(Duration::ZERO, move || count.set(count.get() + 1));
            }
        });

        clock.advance(Duration::from_millis(20));
        assert_eq!(timer::run_due(), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(timer::run_due(), 1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn visible_fraction_math() {
        let rect = Rect::new(0.0, 900.0, 800.0, 400.0);
        // Viewport [0, 800): no overlap.
        assert_eq!(visible_fraction(rect, 0.0, 800.0), 0.0);
        // Viewport [200, 1000): 100 of 400 px visible.
        assert!((visible_fraction(rect, 200.0, 800.0) - 0.25).abs() < 1e-6);
        // Fully inside.
        assert_eq!(visible_fraction(rect, 900.0, 800.0), 1.0);
    }

    fn page(viewport_h: f32) -> Viewport {
        let vp = Viewport::new();
        vp.height.set(viewport_h);
        vp
    }

    #[test]
    fn observer_enter_at_quarter_visible_with_default_threshold() {
        let vp = page(800.0);
        let bounds = BoundsHandle::new();
        bounds.publish(Rect::new(0.0, 1000.0, 800.0, 400.0));

        let events = Rc::new(RefCell::new(Vec::new()));
        let _sub = observe_visibility(&vp, &bounds, 0.2, {
            let events = events.clone();
            move |v| events.borrow_mut().push(v)
        });

        // Hidden at offset 0: the initial state is established silently.
        assert!(events.borrow().is_empty());

        // Scroll until 25% of the element is visible: one entered event.
        vp.offset.set(300.0);
        assert_eq!(*events.borrow(), vec![true]);

        // More scrolling, still visible: no duplicate events.
        vp.offset.set(600.0);
        assert_eq!(*events.borrow(), vec![true]);

        // Back out of view entirely: one exited event.
        vp.offset.set(0.0);
        assert_eq!(*events.borrow(), vec![true, false]);
    }

    #[test]
    fn observer_defers_until_bounds_published() {
        let vp = page(800.0);
        let bounds = BoundsHandle::new();

        let events = Rc::new(RefCell::new(Vec::new()));
        let _sub = observe_visibility(&vp, &bounds, 0.2, {
            let events = events.clone();
            move |v| events.borrow_mut().push(v)
        });

        vp.offset.set(100.0);
        assert!(events.borrow().is_empty());

        // First layout publication of an in-view rect triggers the event.
        bounds.publish(Rect::new(0.0, 150.0, 800.0, 200.0));
        assert_eq!(*events.borrow(), vec![true]);
    }

    #[test]
    fn subscription_cancel_stops_and_is_idempotent() {
        let vp = page(800.0);
        let bounds = BoundsHandle::new();
        bounds.publish(Rect::new(0.0, 2000.0, 800.0, 400.0));

        let events = Rc::new(RefCell::new(Vec::new()));
        let sub = observe_visibility(&vp, &bounds, 0.2, {
            let events = events.clone();
            move |v| events.borrow_mut().push(v)
        });

        sub.cancel();
        sub.cancel();
        assert!(!sub.is_active());

        vp.offset.set(1800.0);
        assert!(events.borrow().is_empty());
        assert_eq!(vp.offset.subscriber_count(), 0);
    }

    #[test]
    fn one_shot_latches_and_drops_subscription() {
        let vp = page(800.0);
        let ctrl = RevealController::new(RevealPolicy::once().threshold(0.2));
        ctrl.attach(&vp);
        ctrl.bounds().publish(Rect::new(0.0, 1000.0, 800.0, 400.0));

        assert!(!ctrl.is_revealed());
        assert!(ctrl.has_subscription());

        vp.offset.set(400.0);
        assert!(ctrl.is_revealed());
        // The subscription is released at the first entered event; the
        // viewport has no remaining subscribers to feed.
        assert!(!ctrl.has_subscription());
        assert_eq!(vp.offset.subscriber_count(), 0);

        // Scrolling away leaves the state latched.
        vp.offset.set(0.0);
        assert!(ctrl.is_revealed());
    }

    #[test]
    fn repeatable_mirrors_every_transition() {
        let vp = page(800.0);
        let ctrl = RevealController::new(RevealPolicy::repeating().threshold(0.2));
        ctrl.attach(&vp);
        ctrl.bounds().publish(Rect::new(0.0, 1000.0, 800.0, 400.0));

        let states = Rc::new(RefCell::new(Vec::new()));
        ctrl.revealed().subscribe({
            let states = states.clone();
            move |v| states.borrow_mut().push(*v)
        });

        vp.offset.set(400.0); // in
        vp.offset.set(0.0); // out
        vp.offset.set(500.0); // in again

        assert_eq!(*states.borrow(), vec![true, false, true]);
        assert!(ctrl.has_subscription());
    }

    #[test]
    fn one_shot_delay_flips_via_timer() {
        let clock = TestClock::start();
        set_clock(clock.clone());

        let vp = page(800.0);
        let ctrl = RevealController::new(
            RevealPolicy::once()
                .threshold(0.2)
                .delay(Duration::from_millis(150)),
        );
        ctrl.attach(&vp);
        ctrl.bounds().publish(Rect::new(0.0, 1000.0, 800.0, 400.0));

        vp.offset.set(400.0);
        // Entered, but the flip waits on the timer.
        assert!(!ctrl.is_revealed());
        assert_eq!(timer::pending(), 1);

        clock.advance(Duration::from_millis(200));
        timer::run_due();
        assert!(ctrl.is_revealed());
    }

    #[test]
    fn release_cancels_pending_timer_before_it_writes() {
        let clock = TestClock::start();
        set_clock(clock.clone());

        let vp = page(800.0);
        let ctrl = RevealController::new(
            RevealPolicy::once()
                .threshold(0.2)
                .delay(Duration::from_millis(150)),
        );
        ctrl.attach(&vp);
        ctrl.bounds().publish(Rect::new(0.0, 1000.0, 800.0, 400.0));
        vp.offset.set(400.0);
        assert_eq!(timer::pending(), 1);

        // Unmount before the deferred flip: no state update may follow.
        ctrl.release();
        clock.advance(Duration::from_millis(500));
        timer::run_due();
        assert!(!ctrl.is_revealed());
        assert_eq!(timer::pending(), 0);
    }

    #[test]
    fn release_is_idempotent_and_detaches() {
        let vp = page(800.0);
        let ctrl = RevealController::new(RevealPolicy::repeating());
        ctrl.attach(&vp);
        ctrl.bounds().publish(Rect::new(0.0, 100.0, 800.0, 200.0));

        ctrl.release();
        ctrl.release();
        assert_eq!(vp.offset.subscriber_count(), 0);

        let was = ctrl.is_revealed();
        vp.offset.set(50.0);
        assert_eq!(ctrl.is_revealed(), was);
    }

    #[test]
    fn stagger_delays_are_exact_multiples() {
        let stagger = Stagger::new(Duration::from_millis(150));
        let delays: Vec<_> = stagger.delays(4).collect();
        assert_eq!(
            delays,
            vec![
                Duration::ZERO,
                Duration::from_millis(150),
                Duration::from_millis(300),
                Duration::from_millis(450),
            ]
        );

        for i in 0..8 {
            assert_eq!(
                stagger.delay(i + 1) - stagger.delay(i),
                Duration::from_millis(150)
            );
        }

        let led = Stagger::new(Duration::from_millis(100)).with_lead(Duration::from_millis(300));
        assert_eq!(led.delay(0), Duration::from_millis(300));
        assert_eq!(led.delay(2), Duration::from_millis(500));
    }

    #[test]
    fn use_reveal_releases_on_teardown() {
        let vp = Viewport::new();
        vp.height.set(800.0);

        let guard = ComposeGuard::begin();
        let ctrl = guard.scope().run(|| {
            with_viewport(vp.clone(), || {
                use_reveal("section", RevealPolicy::repeating())
            })
        });
        ctrl.bounds().publish(Rect::new(0.0, 100.0, 800.0, 200.0));
        vp.offset.set(50.0);
        assert!(ctrl.is_revealed());
        drop(guard);

        teardown();
        assert_eq!(vp.offset.subscriber_count(), 0);

        // Late viewport traffic cannot write state anymore.
        vp.offset.set(0.0);
        assert!(ctrl.is_revealed());
    }

    #[test]
    fn use_reveal_swaps_controller_on_policy_change() {
        let vp = Viewport::new();
        vp.height.set(800.0);

        let guard = ComposeGuard::begin();
        let first = guard.scope().run(|| {
            with_viewport(vp.clone(), || use_reveal("hero", RevealPolicy::once()))
        });
        assert_eq!(vp.offset.subscriber_count(), 1);

        let second = guard.scope().run(|| {
            with_viewport(vp.clone(), || {
                use_reveal("hero", RevealPolicy::repeating())
            })
        });

        // Old subscription released, new one attached.
        assert_eq!(vp.offset.subscriber_count(), 1);
        assert!(!Rc::ptr_eq(&first, &second));
        assert!(second.policy().repeatable);

        drop(guard);
        teardown();
        assert_eq!(vp.offset.subscriber_count(), 0);
    }
}
