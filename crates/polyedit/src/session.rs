use std::sync::Arc;

use image::{DynamicImage, RgbImage};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};
use tracing::debug;

use crate::{
    algorithms::measurement,
    error::Result,
    pipeline::{Pipeline, builder::PipelineBuilder},
    render,
    types::{Polygon, RectangleFit},
};

/// Pointer presses grab the first vertex strictly within this radius.
pub const GRAB_RADIUS: f64 = 5.0;

/// A key reported by the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Key {
    Char(char),
    Escape,
}

/// One input event from the display/input surface.
///
/// Keyboard and pointer input are routed through the same per-tick
/// dispatch; see [`Session::handle`].
#[derive(
    Debug, Clone,
    Serialize, Deserialize, JsonSchema,
    Display, VariantNames, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(tag = "type", content = "params", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InputEvent {
    Key { key: Key },
    PointerPressed { x: i32, y: i32 },
    PointerReleased,
    PointerMoved { x: i32, y: i32 },
}

/// Direction of a one-pixel vertex nudge.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    #[default]
    Left,
    Right,
    Up,
    Down,
}

/// A state transition of the editor session.
#[derive(
    Debug, Clone,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(tag = "type", content = "params", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EditorCommand {
    /// Replace the working image with the edge map of the original frame
    DetectEdges,

    /// Rebuild the polygon set from contours of the working image
    ExtractPolygons,

    /// Select the previous polygon, cyclically
    SelectPrevious,

    /// Select the next polygon, cyclically
    SelectNext,

    /// Shift the dragged vertex of the selected polygon by one pixel
    NudgeVertex { direction: Direction },

    /// Fit the selected polygon's minimum-area bounding rectangle and
    /// report areas
    FitRectangle,
}

impl EditorCommand {
    /// Get the JSON schema for all commands
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(EditorCommand)
    }

    /// Get a list of all available command names
    pub fn command_names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }

    /// The command bound to a key, if any.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Char('e') => Some(Self::DetectEdges),
            Key::Char('p') => Some(Self::ExtractPolygons),
            Key::Char('j') => Some(Self::SelectPrevious),
            Key::Char('k') => Some(Self::SelectNext),
            Key::Char('a') => Some(Self::NudgeVertex { direction: Direction::Left }),
            Key::Char('d') => Some(Self::NudgeVertex { direction: Direction::Right }),
            Key::Char('w') => Some(Self::NudgeVertex { direction: Direction::Up }),
            Key::Char('s') => Some(Self::NudgeVertex { direction: Direction::Down }),
            Key::Char('r') => Some(Self::FitRectangle),
            _ => None,
        }
    }

    /// Get a description of the command
    pub fn description(&self) -> &'static str {
        match self {
            Self::DetectEdges => "Replace the working image with the edge map of the original frame",
            Self::ExtractPolygons => "Rebuild the polygon set from contours of the working image",
            Self::SelectPrevious => "Select the previous polygon, cyclically",
            Self::SelectNext => "Select the next polygon, cyclically",
            Self::NudgeVertex { .. } => "Shift the dragged vertex of the selected polygon by one pixel",
            Self::FitRectangle => "Fit the minimum-area bounding rectangle and report areas",
        }
    }
}

/// One editing session over one captured frame.
///
/// Holds the original frame, the working (displayed) image, the polygon
/// set and the interactive selection/drag state. All transitions are
/// methods of this value; invalid states (no polygons, no selection, no
/// drag target) make the corresponding transitions silent no-ops.
pub struct Session {
    original: RgbImage,
    working: RgbImage,
    polygons: Vec<Polygon>,
    selected: Option<usize>,
    dragging: Option<usize>,
    pipeline: Arc<Pipeline>,
}

impl Session {
    /// Open a session over a captured frame with the default pipeline.
    pub fn new(frame: RgbImage) -> Self {
        Self::with_pipeline(frame, Arc::new(PipelineBuilder::build_default()))
    }

    pub fn with_pipeline(frame: RgbImage, pipeline: Arc<Pipeline>) -> Self {
        Self {
            working: frame.clone(),
            original: frame,
            polygons: Vec::new(),
            selected: None,
            dragging: None,
            pipeline,
        }
    }

    pub fn original(&self) -> &RgbImage {
        &self.original
    }

    /// The image a surface should display.
    pub fn working(&self) -> &RgbImage {
        &self.working
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    /// Replace the polygon set wholesale. Selection and drag state reset.
    pub fn set_polygons(&mut self, polygons: Vec<Polygon>) {
        self.polygons = polygons;
        self.selected = None;
        self.dragging = None;
        self.redraw();
    }

    /// Dispatch one input event.
    ///
    /// Pointer movement deliberately mutates nothing: the program this
    /// editor reproduces consumed a blocking key-read inside its move
    /// callback, racing the main loop's own poll. Vertex nudging stays
    /// keyboard-driven.
    pub fn handle(&mut self, event: &InputEvent) -> Result<Option<RectangleFit>> {
        match event {
            InputEvent::Key { key } => match EditorCommand::from_key(*key) {
                Some(command) => self.apply(command),
                None => Ok(None),
            },
            InputEvent::PointerPressed { x, y } => {
                self.grab_vertex(*x, *y);
                Ok(None)
            }
            InputEvent::PointerReleased => {
                self.release_vertex();
                Ok(None)
            }
            InputEvent::PointerMoved { .. } => Ok(None),
        }
    }

    /// Apply one state transition. Only [`EditorCommand::FitRectangle`]
    /// produces a report.
    pub fn apply(&mut self, command: EditorCommand) -> Result<Option<RectangleFit>> {
        match command {
            EditorCommand::DetectEdges => {
                self.detect_edges()?;
                Ok(None)
            }
            EditorCommand::ExtractPolygons => {
                self.extract_polygons()?;
                Ok(None)
            }
            EditorCommand::SelectPrevious => {
                self.cycle_selection(-1);
                Ok(None)
            }
            EditorCommand::SelectNext => {
                self.cycle_selection(1);
                Ok(None)
            }
            EditorCommand::NudgeVertex { direction } => {
                self.nudge_vertex(direction);
                Ok(None)
            }
            EditorCommand::FitRectangle => self.fit_rectangle(),
        }
    }

    fn detect_edges(&mut self) -> Result<()> {
        let gray = DynamicImage::ImageRgb8(self.original.clone()).to_luma8();
        let edges = self.pipeline.detect_edges(&gray)?;
        self.working = DynamicImage::ImageLuma8(edges).to_rgb8();
        Ok(())
    }

    fn extract_polygons(&mut self) -> Result<()> {
        let gray = DynamicImage::ImageRgb8(self.working.clone()).to_luma8();
        let polygons = self.pipeline.polygonize(&gray)?;
        debug!(polygons = polygons.len(), "rebuilt polygon set");
        self.set_polygons(polygons);
        Ok(())
    }

    fn cycle_selection(&mut self, step: isize) {
        if self.polygons.is_empty() {
            debug!("selection change ignored: no polygons");
            return;
        }

        let count = self.polygons.len() as isize;
        self.selected = Some(match self.selected {
            None => 0,
            Some(index) => (index as isize + step).rem_euclid(count) as usize,
        });
        // The drag target belonged to the previously selected polygon.
        self.dragging = None;
        self.redraw();
    }

    fn nudge_vertex(&mut self, direction: Direction) {
        let (Some(selected), Some(dragging)) = (self.selected, self.dragging) else {
            return;
        };
        let Some(point) = self
            .polygons
            .get_mut(selected)
            .and_then(|polygon| polygon.points.get_mut(dragging))
        else {
            return;
        };

        match direction {
            Direction::Left => point.x -= 1,
            Direction::Right => point.x += 1,
            Direction::Up => point.y -= 1,
            Direction::Down => point.y += 1,
        }
        self.redraw();
    }

    fn fit_rectangle(&mut self) -> Result<Option<RectangleFit>> {
        let Some(polygon) = self.selected.and_then(|index| self.polygons.get(index)) else {
            debug!("rectangle fit ignored: no polygon selected");
            return Ok(None);
        };

        let Some(fit) = measurement::fit_rectangle(polygon) else {
            debug!("rectangle fit ignored: degenerate polygon");
            return Ok(None);
        };

        // Drawn over the current working image, like the polygon overlays
        // it lands on.
        render::draw_rectangle(&mut self.working, &fit.corners);
        Ok(Some(fit))
    }

    fn grab_vertex(&mut self, x: i32, y: i32) {
        let Some(polygon) = self.selected.and_then(|index| self.polygons.get(index)) else {
            return;
        };

        if let Some(index) = polygon.vertex_near(x, y, GRAB_RADIUS) {
            self.dragging = Some(index);
            self.redraw();
        }
    }

    fn release_vertex(&mut self) {
        self.dragging = None;
        self.redraw();
    }

    fn redraw(&mut self) {
        self.working = render::draw_overlays(
            &self.original,
            &self.polygons,
            self.selected,
            self.dragging,
        );
    }
}
