//! This example moves a map around without any window and prints what the scale bar would draw.
//!
//! It can be run with an optional argument - path to a `.json` file with the scale bar
//! configuration. Missing fields take default values.
//!
//! ```shell
//! cargo run --example scale_bar -- ./scale_bar.json
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use mapscale::control::CameraEvent;
use mapscale::render::{Canvas, LinePaint, TextPaint};
use mapscale::scale_bar::{DisappearingScaleBar, ScaleBar, ScaleBarConfig};
use mapscale::{Map, MapView};
use mapscale_types::{latlon, Point2d, Size};
use parking_lot::Mutex;

/// Prints every drawing command into stdout.
struct PrintCanvas;

impl Canvas for PrintCanvas {
    fn draw_line(&mut self, start: Point2d, end: Point2d, paint: LinePaint) {
        println!(
            "  line ({:.1}, {:.1}) - ({:.1}, {:.1}), width {}, color {}",
            start.x,
            start.y,
            end.x,
            end.y,
            paint.width,
            paint.color.to_hex()
        );
    }

    fn draw_text(&mut self, text: &str, position: Point2d, paint: &TextPaint) {
        println!(
            "  text {text:?} at ({:.1}, {:.1}), {:?} aligned",
            position.x, position.y, paint.horizontal_alignment
        );
    }
}

fn load_config() -> Result<ScaleBarConfig> {
    let Some(file_name) = std::env::args().nth(1) else {
        return Ok(ScaleBarConfig::default());
    };

    let json = std::fs::read_to_string(&file_name)?;
    let config: ScaleBarConfig = serde_json::from_str(&json)?;
    config.validate()?;

    log::info!("Loaded scale bar configuration from {file_name}");
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?.with_anchor(Point2d::new(20.0, 520.0));

    let view = MapView::new(&latlon!(51.5, -0.12), 10.0)?.with_size(Size::new(800.0, 600.0));

    let frames = Arc::new(AtomicUsize::new(0));
    let frames_counter = frames.clone();
    let mut map = Map::new(
        view,
        Some(Box::new(move || {
            frames_counter.fetch_add(1, Ordering::Relaxed);
        })),
    );

    let scale_bar = Arc::new(Mutex::new(ScaleBar::new(config.clone(), map.view())?));
    let _bar_subscription = ScaleBar::subscribe(&scale_bar, map.camera_events());

    let disappearing = Arc::new(Mutex::new(DisappearingScaleBar::new(config, map.view())?));
    let _disappearing_subscription =
        DisappearingScaleBar::subscribe(&disappearing, map.camera_events());

    let _logger = map.camera_events().subscribe(|event: &CameraEvent| {
        log::debug!("Camera event: {event:?}");
    });

    let print_scale = |step: &str| {
        println!("{step}: {}", scale_bar.lock().current_display_scale());
    };

    print_scale("Initial view");

    map.set_view(map.view().with_resolution(500.0));
    print_scale("Zoomed out");

    map.pan_by_pixels(Point2d::new(400.0, 300.0), Point2d::new(400.0, 100.0));
    map.zoom(0.25, Point2d::new(400.0, 300.0));
    map.end_gesture();
    print_scale("After gesture");

    let target = map.view().with_resolution(20_000.0);
    map.animate_to(target, Duration::from_millis(200));
    while map.is_animating() {
        map.animate();
        std::thread::sleep(Duration::from_millis(16));
    }
    print_scale("After animation");

    println!("Scale bar draws:");
    scale_bar.lock().render(&mut PrintCanvas);

    {
        let mut disappearing = disappearing.lock();
        println!("Disappearing bar visible: {}", disappearing.is_visible());
        disappearing.update_visibility_at(web_time::SystemTime::now() + Duration::from_secs(10));
        println!(
            "Disappearing bar visible after 10 s without movement: {}",
            disappearing.is_visible()
        );
    }

    log::info!("Map requested {} redraws", frames.load(Ordering::Relaxed));

    Ok(())
}
