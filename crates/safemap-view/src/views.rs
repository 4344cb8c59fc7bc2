//! Rendering targets and their in-memory implementations.

use safemap_core::{Category, Coordinates};
use serde::Serialize;

/// Initial map center (geographic center of Brazil) and zoom.
pub const INITIAL_CENTER: Coordinates = Coordinates {
    lat: -15.7889,
    lng: -47.8798,
};
pub const INITIAL_ZOOM: u8 = 4;

/// Fraction of the marker bounds added on every side when fitting the view.
pub const FIT_PADDING: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerIcon {
    Station,
    Center,
    Default,
}

impl MarkerIcon {
    #[must_use]
    pub fn for_category(category: &Category) -> Self {
        match category {
            Category::Station => MarkerIcon::Station,
            Category::Center => MarkerIcon::Center,
            Category::Other(_) => MarkerIcon::Default,
        }
    }

    #[must_use]
    pub fn url(self) -> &'static str {
        match self {
            MarkerIcon::Station => "https://cdn-icons-png.flaticon.com/512/484/484167.png",
            MarkerIcon::Center => "https://cdn-icons-png.flaticon.com/512/149/149060.png",
            MarkerIcon::Default => "https://unpkg.com/leaflet@1.9.4/dist/images/marker-icon.png",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: Coordinates,
    pub icon: MarkerIcon,
    /// Escaped popup markup.
    pub popup: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for no points.
    pub fn enclosing(points: impl IntoIterator<Item = Coordinates>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Bounds {
                    south_west: p,
                    north_east: p,
                },
                Some(b) => Bounds {
                    south_west: Coordinates {
                        lat: b.south_west.lat.min(p.lat),
                        lng: b.south_west.lng.min(p.lng),
                    },
                    north_east: Coordinates {
                        lat: b.north_east.lat.max(p.lat),
                        lng: b.north_east.lng.max(p.lng),
                    },
                },
            })
        })
    }

    /// Grows the box by `ratio` of its height and width on each side,
    /// clamped to valid coordinates.
    #[must_use]
    pub fn pad(self, ratio: f64) -> Self {
        let lat_buffer = (self.north_east.lat - self.south_west.lat).abs() * ratio;
        let lng_buffer = (self.north_east.lng - self.south_west.lng).abs() * ratio;
        Bounds {
            south_west: Coordinates {
                lat: (self.south_west.lat - lat_buffer).max(-90.0),
                lng: (self.south_west.lng - lng_buffer).max(-180.0),
            },
            north_east: Coordinates {
                lat: (self.north_east.lat + lat_buffer).min(90.0),
                lng: (self.north_east.lng + lng_buffer).min(180.0),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Viewport {
    Centered { center: Coordinates, zoom: u8 },
    Fitted { bounds: Bounds },
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::Centered {
            center: INITIAL_CENTER,
            zoom: INITIAL_ZOOM,
        }
    }
}

/// The map: a layer of markers plus a viewport.
pub trait SpatialView {
    fn clear_markers(&mut self);
    fn add_marker(&mut self, marker: Marker);
    fn marker_count(&self) -> usize;
    fn fit_bounds(&mut self, bounds: Bounds);
}

/// A container whose content is a sequence of markup fragments.
pub trait ListView {
    fn clear(&mut self);
    fn append(&mut self, html: &str);

    /// Replaces all content with a single fragment.
    fn replace(&mut self, html: &str) {
        self.clear();
        self.append(html);
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
    viewport: Viewport,
}

impl MarkerLayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl SpatialView for MarkerLayer {
    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn marker_count(&self) -> usize {
        self.markers.len()
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.viewport = Viewport::Fitted { bounds };
    }
}

#[derive(Debug, Clone, Default)]
pub struct HtmlPanel {
    fragments: Vec<String>,
}

impl HtmlPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    #[must_use]
    pub fn html(&self) -> String {
        self.fragments.concat()
    }
}

impl ListView for HtmlPanel {
    fn clear(&mut self) {
        self.fragments.clear();
    }

    fn append(&mut self, html: &str) {
        self.fragments.push(html.to_owned());
    }
}
