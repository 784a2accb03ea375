#![forbid(unsafe_code)]

//! Navigator integration tests: injected remote keys, geometry ticker, and
//! view lifecycle through a running navigator.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tvnav_core::device::DeviceCapabilities;
use tvnav_core::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use tvnav_core::geometry::Rect;
use tvnav_focus::layout::MeasureError;
use tvnav_focus::{FocusableView, ViewProps};
use tvnav_runtime::{ChannelKeySource, Navigator, NavigatorConfig};

fn tv_navigator(config: NavigatorConfig) -> Navigator {
    Navigator::with_capabilities(config, &DeviceCapabilities::android_tv())
}

#[test]
fn injected_keys_walk_a_grid_in_order() {
    let mut navigator = tv_navigator(NavigatorConfig::default().without_geometry_refresh());
    let handle = navigator.handle();
    let selected = Rc::new(RefCell::new(Vec::new()));

    let mut views = Vec::new();
    for (id, x, y) in [("A", 0.0, 0.0), ("B", 0.0, 100.0), ("C", 200.0, 100.0)] {
        let log = Rc::clone(&selected);
        let mut view = FocusableView::mount(
            &handle,
            ViewProps::keyed(id)
                .on_select(move || log.borrow_mut().push(id))
                .preferred_focus(id == "A"),
        )
        .expect("mount");
        view.on_layout(Rect::new(x, y, 50.0, 50.0)).expect("layout");
        views.push(view);
    }

    let (source, injector) = ChannelKeySource::new();
    navigator.start(source).expect("subscribe");

    injector.send_raw(KeyCode::DPAD_DOWN);
    injector.send_raw(KeyCode::DPAD_CENTER);
    injector.send_key(KeyEvent::from_raw(KeyCode::DPAD_RIGHT).with_kind(KeyEventKind::Release));
    injector.send_raw(KeyCode::DPAD_RIGHT);
    injector.send_raw(KeyCode::DPAD_CENTER);
    assert_eq!(navigator.pump(), 5);

    assert_eq!(*selected.borrow(), ["B", "C"]);
    assert!(views[2].is_focused());
    navigator.shutdown();
}

#[test]
fn ticker_refreshes_probe_geometry() {
    let mut navigator = tv_navigator(
        NavigatorConfig::default()
            .with_geometry_refresh(Duration::from_millis(5))
            .with_poll_timeout(Duration::from_millis(50)),
    );
    let view = FocusableView::mount(&navigator.handle(), ViewProps::keyed("card")).expect("mount");
    let width = Rc::new(Cell::new(100.0_f64));
    let w = Rc::clone(&width);
    let probe = move || -> Result<Rect, MeasureError> { Ok(Rect::new(0.0, 0.0, w.get(), 50.0)) };
    view.attach_probe(Rc::new(probe)).expect("probe");

    let (source, _injector) = ChannelKeySource::new();
    navigator.start(source).expect("subscribe");

    let mut attempts = 0;
    while navigator.root().geometry("card").is_none() && attempts < 200 {
        navigator.poll();
        attempts += 1;
    }
    assert_eq!(
        navigator.root().geometry("card"),
        Some(Rect::new(0.0, 0.0, 100.0, 50.0))
    );

    width.set(180.0);
    attempts = 0;
    while navigator.root().geometry("card").map(|r| r.width) != Some(180.0) && attempts < 200 {
        navigator.poll();
        attempts += 1;
    }
    assert_eq!(navigator.root().geometry("card").map(|r| r.width), Some(180.0));
    navigator.shutdown();
}

#[test]
fn resize_triggers_refresh() {
    let mut navigator = tv_navigator(NavigatorConfig::default().without_geometry_refresh());
    let view = FocusableView::mount(&navigator.handle(), ViewProps::keyed("card")).expect("mount");
    let probe = || -> Result<Rect, MeasureError> { Ok(Rect::new(1.0, 2.0, 3.0, 4.0)) };
    view.attach_probe(Rc::new(probe)).expect("probe");

    navigator.handle_event(Event::Resize {
        width: 1920.0,
        height: 1080.0,
    });
    assert_eq!(navigator.root().geometry("card"), Some(Rect::new(1.0, 2.0, 3.0, 4.0)));
}

#[test]
fn pointer_device_ignores_keys_but_press_selects() {
    let mut navigator =
        Navigator::with_capabilities(NavigatorConfig::default(), &DeviceCapabilities::desktop());
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    let view = FocusableView::mount(
        &navigator.handle(),
        ViewProps::keyed("A").on_select(move || h.set(h.get() + 1)),
    )
    .expect("mount");
    view.focus().expect("focus");

    navigator.handle_event(Event::key_down(KeyCode::DPAD_CENTER));
    assert_eq!(hits.get(), 0);
    assert!(view.press());
    assert_eq!(hits.get(), 1);
}

#[test]
fn views_outliving_the_navigator_drop_quietly() {
    let navigator = tv_navigator(NavigatorConfig::default());
    let view = FocusableView::mount(&navigator.handle(), ViewProps::keyed("A")).expect("mount");
    drop(navigator);
    assert!(!view.is_focused());
    drop(view);
}
