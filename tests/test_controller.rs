//! Playback state machine: wrap-around navigation and the render side effect.

use std::fs;
use std::io;

use proptest::prelude::*;
use tempfile::tempdir;
use trail_replay::replay::controller::{Command, PlaybackController};
use trail_replay::replay::grid::Grid;
use trail_replay::replay::store::{load_dir, LoadOptions, Snapshot, SnapshotStore};
use trail_replay::ui::color::ColorPolicy;
use trail_replay::ui::compositor::Image;
use trail_replay::ui::render::Canvas;

/// Records every presented frame instead of drawing it.
#[derive(Default)]
struct RecordingCanvas {
    captions: Vec<String>,
    sizes: Vec<(usize, usize)>,
}

impl RecordingCanvas {
    fn last_iteration(&self) -> &str {
        let caption = self.captions.last().expect("nothing presented");
        caption
            .lines()
            .next()
            .and_then(|l| l.strip_prefix("Iteration: "))
            .and_then(|l| l.split_whitespace().next())
            .expect("caption without iteration")
    }
}

impl Canvas for RecordingCanvas {
    fn present(&mut self, image: &Image, caption: &str) -> io::Result<()> {
        self.captions.push(caption.to_owned());
        self.sizes.push((image.width(), image.height()));
        Ok(())
    }
}

struct FailingCanvas;

impl Canvas for FailingCanvas {
    fn present(&mut self, _: &Image, _: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"))
    }
}

fn controller_with(iterations: &[u64]) -> PlaybackController {
    let snapshots = iterations
        .iter()
        .map(|&iteration| Snapshot {
            iteration,
            grid: Grid::from_rows(&[vec![-1.0, 0.5]]).unwrap(),
        })
        .collect();
    PlaybackController::new(SnapshotStore::new(snapshots).unwrap(), ColorPolicy::default())
}

proptest! {
    #[test]
    fn advance_and_retreat_are_inverse(n in 2usize..40, steps in 0usize..80) {
        let iterations: Vec<u64> = (0..n as u64).collect();
        let mut controller = controller_with(&iterations);
        for _ in 0..steps {
            controller.advance();
        }
        let start = controller.current();
        prop_assert!(start < n);

        controller.advance();
        controller.retreat();
        prop_assert_eq!(controller.current(), start);

        controller.retreat();
        controller.advance();
        prop_assert_eq!(controller.current(), start);
    }

    #[test]
    fn index_always_in_range(n in 1usize..20, commands in proptest::collection::vec(0u8..3, 0..100)) {
        let iterations: Vec<u64> = (0..n as u64).map(|i| i * 10).collect();
        let mut controller = controller_with(&iterations);
        for c in commands {
            let command = match c {
                0 => Command::Advance,
                1 => Command::Retreat,
                _ => Command::Ignore,
            };
            controller.apply(command);
            prop_assert!(controller.current() < n);
        }
    }
}

#[test]
fn test_single_frame_navigation_is_identity() {
    let mut controller = controller_with(&[42]);
    controller.advance();
    assert_eq!(controller.current(), 0);
    controller.retreat();
    assert_eq!(controller.current(), 0);
}

#[test]
fn test_ignore_does_not_redraw() {
    let mut controller = controller_with(&[1, 2, 3]);
    let mut canvas = RecordingCanvas::default();
    controller.render(&mut canvas).unwrap();

    assert!(!controller.handle(Command::Ignore, &mut canvas).unwrap());
    assert_eq!(controller.current(), 0);
    assert_eq!(canvas.captions.len(), 1);
}

#[test]
fn test_every_transition_redraws() {
    let mut controller = controller_with(&[1, 2, 3]);
    let mut canvas = RecordingCanvas::default();
    assert!(controller.handle(Command::Advance, &mut canvas).unwrap());
    assert!(controller.handle(Command::Retreat, &mut canvas).unwrap());
    assert_eq!(canvas.captions.len(), 2);
    assert_eq!(canvas.sizes, vec![(2, 1), (2, 1)]);
}

#[test]
fn test_caption_shows_iteration_and_position() {
    let mut controller = controller_with(&[10, 20]);
    controller.advance();
    let caption = controller.caption().unwrap();
    assert!(caption.starts_with("Iteration: 20 (2/2)"));
}

#[test]
fn test_display_error_propagates() {
    let mut controller = controller_with(&[1, 2]);
    assert!(controller.handle(Command::Advance, &mut FailingCanvas).is_err());
}

#[test]
fn test_end_to_end_playback() {
    let dir = tempdir().unwrap();
    for (name, body) in [
        ("iter_50.csv", "0.5,-1\n0,0.02\n"),
        ("iter_5.csv", "-3,0\n0,-2\n"),
        ("iter_100.csv", "5,4\n-1,-1\n"),
    ] {
        fs::write(dir.path().join(name), body).unwrap();
    }

    let store = load_dir(dir.path(), &LoadOptions::default()).unwrap();
    assert_eq!(store.count(), 3);

    let mut controller = PlaybackController::new(store, ColorPolicy::default());
    let mut canvas = RecordingCanvas::default();

    controller.render(&mut canvas).unwrap();
    assert_eq!(canvas.last_iteration(), "5");

    controller.handle(Command::Advance, &mut canvas).unwrap();
    assert_eq!(canvas.last_iteration(), "50");

    controller.handle(Command::Advance, &mut canvas).unwrap();
    controller.handle(Command::Retreat, &mut canvas).unwrap();
    assert_eq!(canvas.last_iteration(), "50");

    controller.handle(Command::Retreat, &mut canvas).unwrap();
    assert_eq!(canvas.last_iteration(), "5");
    controller.handle(Command::Retreat, &mut canvas).unwrap();
    assert_eq!(canvas.last_iteration(), "100");

    assert!(canvas.sizes.iter().all(|&size| size == (2, 2)));
}
