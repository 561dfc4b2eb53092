use crate::config::CollisionConfig;
use crate::error::CollisionError;
use crate::integration::integrator;
use crate::objects::{Body, BodyView};
use crate::world::step::{CollisionListener, StepCoordinator, StepReport};

/// Owns a set of bodies and runs collision steps over them.
///
/// Besides the per-step report, the world remembers which pairs collided in
/// the previous step so callers can react to contacts starting and ending.
#[derive(Debug)]
pub struct CollisionWorld<K> {
    bodies: Vec<Body<K>>,
    coordinator: StepCoordinator,
    previous_pairs: Vec<(K, K)>,
    entered: Vec<(K, K)>,
    exited: Vec<(K, K)>,
    last_report: Option<StepReport<K>>,
}

impl<K: Clone + PartialEq> CollisionWorld<K> {
    pub fn new(config: CollisionConfig) -> Result<Self, CollisionError> {
        Ok(Self {
            bodies: Vec::new(),
            coordinator: StepCoordinator::new(config)?,
            previous_pairs: Vec::new(),
            entered: Vec::new(),
            exited: Vec::new(),
            last_report: None,
        })
    }

    pub fn config(&self) -> &CollisionConfig {
        self.coordinator.config()
    }

    /// Adds a body and returns its index. Indices shift when earlier bodies are removed.
    pub fn add_body(&mut self, body: Body<K>) -> usize {
        let index = self.bodies.len();
        self.bodies.push(body);
        index
    }

    /// Removes the body with identity `id`, keeping the order of the others.
    pub fn remove_body(&mut self, id: &K) -> Option<Body<K>> {
        let index = self.bodies.iter().position(|body| body.id == *id)?;
        self.previous_pairs.retain(|(a, b)| a != id && b != id);
        Some(self.bodies.remove(index))
    }

    pub fn bodies(&self) -> &[Body<K>] {
        &self.bodies
    }

    pub fn body(&self, id: &K) -> Option<&Body<K>> {
        self.bodies.iter().find(|body| body.id == *id)
    }

    pub fn body_mut(&mut self, id: &K) -> Option<&mut Body<K>> {
        self.bodies.iter_mut().find(|body| body.id == *id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Runs collision detection and response without moving anything first.
    pub fn step(&mut self, dt: f64) -> Result<&StepReport<K>, CollisionError> {
        self.step_with_listener(dt, &mut |_: &K, _: &K| {})
    }

    pub fn step_with_listener(
        &mut self,
        dt: f64,
        listener: &mut dyn CollisionListener<K>,
    ) -> Result<&StepReport<K>, CollisionError> {
        let report = {
            let mut views: Vec<BodyView<'_, K>> = self.bodies.iter_mut().map(Body::view).collect();
            self.coordinator.step_with_listener(&mut views, dt, listener)?
        };
        self.track_pairs(&report);
        Ok(self.last_report.insert(report))
    }

    /// Integrates every movable body over `dt` under gravity, then steps.
    ///
    /// The step looks ahead over the same `dt`, so a body about to pass
    /// through another within the next step is caught before it does.
    pub fn advance(&mut self, dt: f64) -> Result<&StepReport<K>, CollisionError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(CollisionError::InvalidTimeStep(dt));
        }
        let gravity = self.coordinator.config().gravity;
        for body in self.bodies.iter_mut() {
            let inverse_mass = body.view().inverse_mass();
            integrator::integrate(&mut body.pose, &mut body.velocity, inverse_mass, gravity, dt);
        }
        self.step(dt)
    }

    /// Pairs colliding in the last step that were not colliding the step before.
    pub fn entered(&self) -> &[(K, K)] {
        &self.entered
    }

    /// Pairs colliding the step before that no longer collide.
    pub fn exited(&self) -> &[(K, K)] {
        &self.exited
    }

    pub fn last_report(&self) -> Option<&StepReport<K>> {
        self.last_report.as_ref()
    }

    fn track_pairs(&mut self, report: &StepReport<K>) {
        let current: Vec<(K, K)> = report.colliding_ids().map(|(a, b)| (a.clone(), b.clone())).collect();

        self.entered = current
            .iter()
            .filter(|pair| !contains_pair(&self.previous_pairs, pair))
            .cloned()
            .collect();
        self.exited = self
            .previous_pairs
            .iter()
            .filter(|pair| !contains_pair(&current, pair))
            .cloned()
            .collect();

        if !self.entered.is_empty() || !self.exited.is_empty() {
            log::debug!("{} pairs entered contact, {} exited", self.entered.len(), self.exited.len());
        }
        self.previous_pairs = current;
    }
}

fn contains_pair<K: PartialEq>(pairs: &[(K, K)], pair: &(K, K)) -> bool {
    pairs
        .iter()
        .any(|(a, b)| (*a == pair.0 && *b == pair.1) || (*a == pair.1 && *b == pair.0))
}
