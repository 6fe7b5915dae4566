//! Mapscale is a scale bar for maps: a small on-screen ruler with two labels that tell how long
//! the ruler is on the ground, in imperial and metric units.
//!
//! # Quick start
//!
//! ```
//! use std::sync::Arc;
//!
//! use mapscale::scale_bar::{ScaleBar, ScaleBarConfig};
//! use mapscale::{Map, MapView};
//! use mapscale_types::latlon;
//! use mapscale_types::Size;
//! use parking_lot::Mutex;
//!
//! let view = MapView::new(&latlon!(51.5, -0.12), 10.0)
//!     .expect("valid center")
//!     .with_size(Size::new(800.0, 600.0));
//! let mut map = Map::new(view, None);
//!
//! let scale_bar = ScaleBar::new(ScaleBarConfig::default(), map.view()).expect("valid config");
//! let scale_bar = Arc::new(Mutex::new(scale_bar));
//! let _subscription = ScaleBar::subscribe(&scale_bar, map.camera_events());
//!
//! map.set_view(map.view().with_resolution(100.0));
//! println!("{}", scale_bar.lock().current_display_scale());
//! ```
//!
//! # Main components
//!
//! * [`MapView`] is an immutable snapshot of what the map shows. It converts screen pixels into
//!   map and geographic coordinates, which makes it a [`ScreenProjection`].
//! * [`Map`] owns the current view and publishes every view change as a
//!   [`CameraEvent`](control::CameraEvent) through its [`CameraEvents`](control::CameraEvents)
//!   channel. Any number of consumers can subscribe to the channel independently.
//! * [`ScaleBar`](scale_bar::ScaleBar) samples the projection of every new view, converts the
//!   measured ground span into display units and draws itself onto a [`Canvas`](render::Canvas).

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod color;
pub mod control;
pub mod error;
mod map;
mod messenger;
pub mod render;
pub mod scale_bar;
mod view;

pub use color::Color;
pub use map::Map;
pub use messenger::Messenger;
pub use view::{MapView, ScreenProjection};

// Reexport mapscale_types
pub use mapscale_types;
