//! Map widget interface

use crate::core::types::LatLng;
use crate::platform::error::PlatformResult;

/// Handle to a ready map widget
///
/// Delivered inside the map-ready event once the widget has finished
/// loading; `Send` because the event crosses the platform channel.
pub trait MapHandle: Send {
    /// Toggle the widget's built-in user-location layer
    fn set_user_location_layer(&mut self, enabled: bool) -> PlatformResult<()>;

    /// Move the camera to center on a position at the given zoom level
    fn move_camera(&mut self, center: LatLng, zoom: u8) -> PlatformResult<()>;

    /// Place a titled marker pin at a position
    fn add_marker(&mut self, position: LatLng, title: &str) -> PlatformResult<()>;
}
