use std::sync::Arc;

use tracing::info;

use crate::{
    error::Result,
    pipeline::{Pipeline, builder::PipelineBuilder},
    session::{InputEvent, Key, Session},
    traits::{FrameSource, Surface},
    types::RectangleFit,
};

/// Drives editing sessions over a frame source: one session per captured
/// frame, until the source is exhausted.
pub struct Runner<F: FrameSource, S: Surface> {
    source: F,
    surface: S,
    pipeline: Arc<Pipeline>,
}

impl<F: FrameSource, S: Surface> Runner<F, S> {
    pub fn new(source: F, surface: S) -> Self {
        Self::with_pipeline(source, surface, Arc::new(PipelineBuilder::build_default()))
    }

    pub fn with_pipeline(source: F, surface: S, pipeline: Arc<Pipeline>) -> Self {
        Self {
            source,
            surface,
            pipeline,
        }
    }

    /// The outer capture loop. Each frame opens a fresh session; the
    /// session loop runs until Escape; the surface is notified before the
    /// next frame is pulled.
    pub fn run(&mut self) -> Result<()> {
        let mut sessions = 0usize;

        while let Some(frame) = self.source.next_frame()? {
            let mut session = Session::with_pipeline(frame, Arc::clone(&self.pipeline));
            let fits = run_session(&mut session, &mut self.surface)?;
            info!(session = sessions, fits = fits.len(), "session ended");
            self.surface.session_ended(&session)?;
            sessions += 1;
        }

        info!(sessions, "frame source exhausted");
        Ok(())
    }
}

/// The blocking loop of a single session: poll one event per tick, apply
/// at most one transition, present synchronously. Escape terminates.
///
/// Rectangle-fit reports go to the output channel (info-level tracing
/// events) and are also returned to the caller.
pub fn run_session<S: Surface>(session: &mut Session, surface: &mut S) -> Result<Vec<RectangleFit>> {
    let mut fits = Vec::new();
    surface.present(session.working())?;

    loop {
        match surface.poll_event()? {
            Some(InputEvent::Key { key: Key::Escape }) => break,
            Some(event) => {
                if let Some(fit) = session.handle(&event)? {
                    info!(
                        polygon_area = fit.polygon_area,
                        rectangle_area = fit.rectangle_area,
                        hull_area = fit.hull_area,
                        "rectangle fit"
                    );
                    fits.push(fit);
                }
            }
            None => {}
        }

        surface.present(session.working())?;
    }

    Ok(fits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use image::{Rgb, RgbImage};

    use crate::session::{InputEvent, Key};

    struct OneFrameSource {
        frame: Option<RgbImage>,
    }

    impl FrameSource for OneFrameSource {
        fn next_frame(&mut self) -> Result<Option<RgbImage>> {
            Ok(self.frame.take())
        }
    }

    struct QueueSurface {
        events: VecDeque<InputEvent>,
        presents: Rc<Cell<usize>>,
        ended: Rc<Cell<usize>>,
    }

    impl Surface for QueueSurface {
        fn present(&mut self, _frame: &RgbImage) -> Result<()> {
            self.presents.set(self.presents.get() + 1);
            Ok(())
        }

        fn poll_event(&mut self) -> Result<Option<InputEvent>> {
            Ok(Some(self.events.pop_front().unwrap_or(InputEvent::Key {
                key: Key::Escape,
            })))
        }

        fn session_ended(&mut self, _session: &Session) -> Result<()> {
            self.ended.set(self.ended.get() + 1);
            Ok(())
        }
    }

    fn key(c: char) -> InputEvent {
        InputEvent::Key { key: Key::Char(c) }
    }

    fn square_frame() -> RgbImage {
        let mut frame = RgbImage::new(64, 64);
        for y in 16..48 {
            for x in 16..48 {
                frame.put_pixel(x, y, Rgb([255u8, 255, 255]));
            }
        }
        frame
    }

    #[test]
    fn test_runner_drives_a_full_session() {
        let presents = Rc::new(Cell::new(0));
        let ended = Rc::new(Cell::new(0));

        let surface = QueueSurface {
            events: VecDeque::from(vec![key('e'), key('p'), key('k'), key('r')]),
            presents: Rc::clone(&presents),
            ended: Rc::clone(&ended),
        };
        let source = OneFrameSource {
            frame: Some(square_frame()),
        };

        Runner::new(source, surface).run().expect("Runner should finish");

        assert_eq!(ended.get(), 1, "One frame, one session");
        assert!(presents.get() >= 5, "Every tick presents the working image");
    }

    #[test]
    fn test_run_session_returns_fit_reports() {
        let mut session = Session::new(square_frame());
        // Polygonize the solid square directly: one clean external contour.
        let mut surface = QueueSurface {
            events: VecDeque::from(vec![key('p'), key('k'), key('r'), key('r')]),
            presents: Rc::new(Cell::new(0)),
            ended: Rc::new(Cell::new(0)),
        };

        let fits = run_session(&mut session, &mut surface).expect("Session should finish");

        assert_eq!(fits.len(), 2, "Each 'r' press reports once");
        for fit in &fits {
            assert!(fit.rectangle_area + 1e-9 >= fit.polygon_area);
            assert!(fit.polygon_area >= 0.0);
        }
    }
}
