//! Chaos game engine
//!
//! Holds the active description, the canvas built from its bounding box,
//! the running point and a private RNG. Each step picks a transform
//! uniformly at random, applies it to the current point and plots the
//! result.
//!
//! Observers receive a zero-payload "state changed" signal once per call
//! that mutates the game, after all mutations are applied; they read the
//! canvas and description back themselves.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::canvas::ChaosCanvas;
use crate::description::{ChaosGameDescription, DescriptionError};
use crate::math::{Complex, Vector2d};
use crate::transform::Transform2D;

/// Receives a change signal from a [`ChaosGame`]
pub trait ChaosGameObserver {
    fn update(&mut self);
}

impl<F: FnMut()> ChaosGameObserver for F {
    fn update(&mut self) {
        (*self)()
    }
}

/// Handle returned by [`ChaosGame::register_observer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

pub struct ChaosGame<R = StdRng> {
    canvas: ChaosCanvas,
    description: ChaosGameDescription,
    description_name: String,
    current_point: Vector2d,
    width: usize,
    height: usize,
    rng: R,
    total_steps: u64,
    observers: Vec<(ObserverId, Box<dyn ChaosGameObserver>)>,
    next_observer: u64,
}

impl ChaosGame<StdRng> {
    /// New game seeded from OS entropy
    pub fn new(description: ChaosGameDescription, width: usize, height: usize) -> Self {
        Self::with_rng(description, width, height, StdRng::from_entropy())
    }

    /// New game with a reproducible point sequence
    pub fn with_seed(description: ChaosGameDescription, width: usize, height: usize, seed: u64) -> Self {
        Self::with_rng(description, width, height, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ChaosGame<R> {
    pub fn with_rng(description: ChaosGameDescription, width: usize, height: usize, rng: R) -> Self {
        tracing::debug!(
            "Creating {}x{} chaos game with {} {} transforms",
            width,
            height,
            description.transforms().len(),
            description.kind()
        );
        let canvas = ChaosCanvas::new(width, height, description.min(), description.max());
        Self {
            canvas,
            description,
            description_name: String::new(),
            current_point: Vector2d::ORIGIN,
            width,
            height,
            rng,
            total_steps: 0,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub fn canvas(&self) -> &ChaosCanvas {
        &self.canvas
    }

    pub fn description(&self) -> &ChaosGameDescription {
        &self.description
    }

    pub fn transforms(&self) -> &[Transform2D] {
        self.description.transforms()
    }

    pub fn description_name(&self) -> &str {
        &self.description_name
    }

    pub fn set_description_name(&mut self, name: impl Into<String>) {
        self.description_name = name.into();
    }

    pub fn current_point(&self) -> Vector2d {
        self.current_point
    }

    /// Steps counted since the last reset or fractal change
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Run `steps` iterations and add them to the total.
    ///
    /// A negative `steps` is a reset request: the canvas is cleared and the
    /// total goes back to 0. Reset buttons depend on this.
    pub fn run_steps(&mut self, steps: i32) {
        self.run(steps, true);
    }

    /// Same as [`run_steps`](Self::run_steps)
    pub fn run_steps_and_update_total(&mut self, steps: i32) {
        self.run(steps, true);
    }

    /// Run `steps` iterations without touching the total, used to replay
    /// the existing point count after the transforms change. A negative
    /// `steps` still resets.
    pub fn run_steps_without_updating_total(&mut self, steps: i32) {
        self.run(steps, false);
    }

    fn run(&mut self, steps: i32, update_total: bool) {
        if steps < 0 {
            tracing::debug!("Reset requested (steps={}), clearing canvas", steps);
            self.canvas.clear();
            self.total_steps = 0;
        } else {
            self.iterate(steps as u64);
            if update_total {
                self.total_steps += steps as u64;
            }
            tracing::debug!(
                "Ran {} steps (update_total={}), total now {}",
                steps,
                update_total,
                self.total_steps
            );
        }
        self.notify_observers();
    }

    fn iterate(&mut self, count: u64) {
        let transforms = self.description.transforms();
        for _ in 0..count {
            // Descriptions are never empty, so the range is never empty
            let idx = self.rng.gen_range(0..transforms.len());
            self.current_point = transforms[idx].transform(self.current_point);
            self.canvas.put_pixel(self.current_point);
        }
    }

    /// Install a new description: fresh canvas, point back at the origin.
    /// The step total is kept.
    pub fn set_description(&mut self, description: ChaosGameDescription) {
        self.install(description);
        self.notify_observers();
    }

    /// Switch to another fractal: new description and name, fresh canvas,
    /// point at the origin, total back to 0
    pub fn change_fractal(&mut self, description: ChaosGameDescription, name: impl Into<String>) {
        self.install(description);
        self.description_name = name.into();
        self.total_steps = 0;
        tracing::info!("Fractal changed to '{}'", self.description_name);
        self.notify_observers();
    }

    /// Move the center of a Julia description and redraw the same number
    /// of points on a fresh canvas. The total is unchanged.
    pub fn move_julia_center(&mut self, center: Complex) -> Result<(), DescriptionError> {
        let moved = self.description.with_julia_center(center)?;
        self.install(moved);
        let replay = self.total_steps;
        self.iterate(replay);
        tracing::debug!("Julia center moved to {}, replayed {} steps", center, replay);
        self.notify_observers();
        Ok(())
    }

    fn install(&mut self, description: ChaosGameDescription) {
        self.canvas = ChaosCanvas::new(self.width, self.height, description.min(), description.max());
        self.description = description;
        self.current_point = Vector2d::ORIGIN;
    }

    pub fn register_observer(&mut self, observer: impl ChaosGameObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the handle was not registered
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub fn notify_observers(&mut self) {
        for (_, observer) in &mut self.observers {
            observer.update();
        }
    }
}
