use foundation::bounds::{GeoBounds, Recenter, Viewport};
use runtime::notices::Notice;

use crate::frame::RenderFrame;
use crate::location::LocationOverlay;

/// The rendering surface the engine pushes to.
///
/// The surface owns the viewport; the engine only reads it and asks for
/// changes through [`RenderSink::recenter`].
pub trait RenderSink {
    fn viewport(&self) -> Viewport;

    /// Replaces every target marker and cluster badge currently drawn.
    fn replace_all(&mut self, frame: RenderFrame);

    fn recenter(&mut self, command: Recenter);

    fn draw_location(&mut self, overlay: LocationOverlay);

    fn show_notice(&mut self, notice: &Notice);
}

/// Headless surface that records what it was told to draw.
///
/// `recenter` moves the stored viewport around the new center and rescales it
/// by the zoom change (each level halves the span), which is enough for hosts
/// without a real map to drive the full pipeline.
#[derive(Debug, Clone)]
pub struct MemorySink {
    pub viewport: Viewport,
    pub frames: Vec<RenderFrame>,
    pub recenters: Vec<Recenter>,
    pub overlays: Vec<LocationOverlay>,
    pub notices: Vec<Notice>,
}

impl MemorySink {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            frames: Vec::new(),
            recenters: Vec::new(),
            overlays: Vec::new(),
            notices: Vec::new(),
        }
    }

    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.frames.last()
    }

    pub fn last_overlay(&self) -> Option<&LocationOverlay> {
        self.overlays.last()
    }
}

impl RenderSink for MemorySink {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn replace_all(&mut self, frame: RenderFrame) {
        self.frames.push(frame);
    }

    fn recenter(&mut self, command: Recenter) {
        let b = self.viewport.bounds;
        let scale = (self.viewport.zoom - command.zoom).exp2();
        let half_lat = (b.north - b.south) * 0.5 * scale;
        let half_lng = if b.crosses_antimeridian() {
            (b.east + 360.0 - b.west) * 0.5 * scale
        } else {
            (b.east - b.west) * 0.5 * scale
        };
        self.viewport.bounds = GeoBounds::around(command.center, half_lat, half_lng);
        self.viewport.zoom = command.zoom;
        self.recenters.push(command);
    }

    fn draw_location(&mut self, overlay: LocationOverlay) {
        self.overlays.push(overlay);
    }

    fn show_notice(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySink, RenderSink};
    use foundation::bounds::{GeoBounds, Recenter, Viewport};
    use foundation::coords::NormalizedPoint;

    #[test]
    fn recenter_moves_and_rescales_viewport() {
        let mut sink = MemorySink::new(Viewport::new(GeoBounds::new(48.0, 2.0, 49.0, 3.0), 12.0));
        sink.recenter(Recenter::new(NormalizedPoint { lat: 10.0, lng: 20.0 }, 20.0));

        let v = sink.viewport();
        assert_eq!(v.zoom, 20.0);
        // 8 zoom levels in: the span shrinks by 2^8.
        let half = 0.5 / 256.0;
        assert_eq!(v.bounds, GeoBounds::new(10.0 - half, 20.0 - half, 10.0 + half, 20.0 + half));
        assert_eq!(sink.recenters.len(), 1);
    }

    #[test]
    fn recenter_near_antimeridian_wraps_edges() {
        let mut sink = MemorySink::new(Viewport::new(GeoBounds::new(-1.0, -1.0, 1.0, 1.0), 10.0));
        sink.recenter(Recenter::new(NormalizedPoint { lat: 0.0, lng: 179.9 }, 10.0));

        let b = sink.viewport().bounds;
        assert!(b.west <= 180.0 && b.west >= -180.0);
        assert!(b.east <= 180.0 && b.east >= -180.0);
        assert!(b.crosses_antimeridian());
        assert!(b.contains(NormalizedPoint { lat: 0.0, lng: -179.95 }));
        assert!(b.contains(NormalizedPoint { lat: 0.0, lng: 179.5 }));
    }

    #[test]
    fn zooming_far_out_covers_the_world() {
        let mut sink = MemorySink::new(Viewport::new(GeoBounds::new(48.0, 2.0, 49.0, 3.0), 12.0));
        sink.recenter(Recenter::new(NormalizedPoint { lat: 48.5, lng: 2.5 }, 1.0));
        let b = sink.viewport().bounds;
        assert_eq!((b.west, b.east), (-180.0, 180.0));
        assert_eq!((b.south, b.north), (-90.0, 90.0));
    }
}
