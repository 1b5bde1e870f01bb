use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use screenturn::app::{App, Devices};
use screenturn::backends::dummy::DummyDisplay;
use screenturn::clock::ManualClock;
use screenturn::devices::dummy::{DummyCursor, DummyKeyboard};
use screenturn::error::Result;
use screenturn::orientation::Orientation;
use screenturn::remapper::RemapperConfig;
use screenturn::transform::{logical_delta, Delta, Extent, Point};

fn simulated(extent: Extent, at: Point) -> Result<(App, Arc<DummyCursor>)> {
    let (app, cursor, _) = simulated_with_clock(extent, at)?;
    Ok((app, cursor))
}

fn simulated_with_clock(
    extent: Extent,
    at: Point,
) -> Result<(App, Arc<DummyCursor>, Arc<ManualClock>)> {
    let clock = Arc::new(ManualClock::new());
    let cursor = Arc::new(DummyCursor::new(extent, at));
    let devices = Devices {
        display: Box::new(
            DummyDisplay::new(Orientation::Default, extent).with_cursor(cursor.clone()),
        ),
        cursor: cursor.clone(),
        keyboard: Arc::new(DummyKeyboard::new()),
    };
    let app = App::new(devices, clock.clone(), RemapperConfig::default())?;
    Ok((app, cursor, clock))
}

fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    false
}

#[test]
fn rightward_push_moves_cursor_down_on_quarter_turn() -> Result<()> {
    let (app, cursor) = simulated(Extent::new(1920, 1080), Point::new(900, 500))?;
    app.rotator().rotate_to(Orientation::Clockwise90)?;
    assert_eq!(app.screen_extent(), Extent::new(1080, 1920));

    app.set_remapping(true)?;
    let start = cursor.current();
    assert!(wait_until(|| {
        cursor.move_by(Delta::new(1, 0));
        cursor.write_count() > 0
    }));
    app.set_remapping(false)?;

    let end = cursor.current();
    assert!(end.y > start.y, "{:?} -> {:?}", start, end);
    for write in cursor.writes() {
        assert!(write.x >= 0 && write.x < 1080);
        assert!(write.y >= 0 && write.y < 1920);
    }
    Ok(())
}

#[test]
fn rotation_while_remapping_causes_no_jump() -> Result<()> {
    let (app, cursor) = simulated(Extent::new(1920, 1080), Point::new(700, 400))?;
    app.rotator().rotate_to(Orientation::Clockwise90)?;
    app.set_remapping(true)?;

    assert!(wait_until(|| {
        cursor.move_by(Delta::new(0, 1));
        cursor.write_count() > 0
    }));

    // Hands off the mouse from here on.
    thread::sleep(Duration::from_millis(10));
    let writes = cursor.write_count();
    let position = cursor.current();

    app.rotator().rotate_to(Orientation::UpsideDown)?;
    thread::sleep(Duration::from_millis(30));

    assert_eq!(cursor.write_count(), writes);
    assert_eq!(cursor.current(), position);
    app.shutdown();
    Ok(())
}

#[test]
fn unrotated_display_is_never_written() -> Result<()> {
    let (app, cursor) = simulated(Extent::new(800, 600), Point::new(10, 10))?;
    app.set_remapping(true)?;
    for _ in 0..20 {
        cursor.move_by(Delta::new(3, 2));
        thread::sleep(Duration::from_millis(1));
    }
    app.shutdown();

    assert_eq!(cursor.write_count(), 0);
    assert_eq!(cursor.current(), Point::new(70, 50));
    Ok(())
}

#[test]
fn steady_drag_lands_where_the_rotated_screen_expects() -> Result<()> {
    for orientation in [
        Orientation::Clockwise90,
        Orientation::UpsideDown,
        Orientation::Clockwise270,
    ] {
        let (app, cursor, clock) =
            simulated_with_clock(Extent::new(1600, 1200), Point::new(800, 600))?;
        app.rotator().rotate_to(orientation)?;
        let start = cursor.current();

        app.set_remapping(true)?;
        assert!(wait_until(|| clock.sleeps() > 0));
        for _ in 0..20 {
            let before = cursor.write_count();
            cursor.move_by(Delta::new(1, 0));
            assert!(wait_until(|| cursor.write_count() > before));
        }
        app.set_remapping(false)?;

        let step = logical_delta(orientation, Delta::new(1, 0));
        let expected = start.offset(Delta::new(step.dx * 20, step.dy * 20));
        assert_eq!(cursor.current(), expected, "{}", orientation);
    }
    Ok(())
}
