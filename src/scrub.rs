use crate::distance::DistanceEngine;
use geo::Point;

/// Interaction state of the scrub control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrubState {
    /// No track selected, control hidden.
    #[default]
    Idle,
    /// A track is active and its cumulative distances are precomputed.
    Selected,
    /// Pointer or touch is actively over the control.
    Scrubbing,
}

/// Everything the view needs after one scrub input.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrubUpdate {
    pub fraction: f64,
    pub index: usize,
    pub distance_km: f64,
    pub total_km: f64,
    pub marker: Point,
}

impl ScrubUpdate {
    /// The current-distance label shown next to the hover indicator.
    pub fn label(&self) -> String {
        format!("{:.2} km of {:.2} km", self.distance_km, self.total_km)
    }
}

struct SelectedTrack {
    filename: String,
    coords: Vec<Point>,
    engine: DistanceEngine,
    marker: Option<Point>,
    hover_visible: bool,
}

/// State machine turning pointer/touch input on a horizontal control
/// into distance queries and view updates. Owns the selected track, its
/// distance engine and the single reusable position marker; all of it
/// is replaced wholesale on every selection change.
#[derive(Default)]
pub struct ScrubController {
    state: ScrubState,
    selected: Option<SelectedTrack>,
}

impl ScrubController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScrubState {
        self.state
    }

    pub fn selected_filename(&self) -> Option<&str> {
        self.selected.as_ref().map(|s| s.filename.as_str())
    }

    pub fn marker(&self) -> Option<Point> {
        self.selected.as_ref().and_then(|s| s.marker)
    }

    pub fn hover_visible(&self) -> bool {
        self.selected.as_ref().is_some_and(|s| s.hover_visible)
    }

    pub fn total_km(&self) -> Option<f64> {
        self.selected.as_ref().map(|s| s.engine.total_km())
    }

    /// Activate a track. Any previous selection, marker and hover
    /// indicator are discarded before the new state is entered.
    pub fn select_track(&mut self, filename: impl Into<String>, coords: Vec<Point>) {
        let engine = DistanceEngine::new(&coords);
        self.selected = Some(SelectedTrack {
            filename: filename.into(),
            coords,
            engine,
            marker: None,
            hover_visible: false,
        });
        self.state = ScrubState::Selected;
    }

    /// Clicking outside any track: back to `Idle`, control hidden.
    pub fn deselect(&mut self) {
        self.selected = None;
        self.state = ScrubState::Idle;
    }

    /// Mouse moved over the control at `offset` pixels of `width`.
    pub fn pointer_move(&mut self, offset: f64, width: f64) -> Option<ScrubUpdate> {
        self.scrub_to(offset, width)
    }

    /// Touch moved over the control; same mapping as pointer-move.
    pub fn touch_move(&mut self, offset: f64, width: f64) -> Option<ScrubUpdate> {
        self.scrub_to(offset, width)
    }

    /// Mouse left the control: hide the hover indicator and the
    /// current-distance label, snap an existing marker back to the
    /// track's first sample. Stays `Selected`, not `Idle`.
    pub fn pointer_leave(&mut self) {
        if let Some(selected) = self.selected.as_mut() {
            selected.hover_visible = false;
            if selected.marker.is_some() {
                selected.marker = selected.coords.first().copied();
            }
            self.state = ScrubState::Selected;
        }
    }

    /// Touch end is a no-op; unlike pointer-leave it neither hides the
    /// indicator nor moves the marker. Observed contract, kept as is.
    pub fn touch_end(&mut self) {}

    fn scrub_to(&mut self, offset: f64, width: f64) -> Option<ScrubUpdate> {
        let selected = self.selected.as_mut()?;
        if width <= 0.0 {
            return None;
        }
        let fraction = (offset / width).clamp(0.0, 1.0);
        let sample = selected.engine.sample(fraction)?;
        let marker = *selected.coords.get(sample.index)?;
        selected.marker = Some(marker);
        selected.hover_visible = true;
        self.state = ScrubState::Scrubbing;
        Some(ScrubUpdate {
            fraction,
            index: sample.index,
            distance_km: sample.distance_km,
            total_km: sample.total_km,
            marker,
        })
    }
}
