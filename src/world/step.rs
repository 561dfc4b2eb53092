//! One fixed collision step: broad phase, narrow phase, response, membership.

use std::collections::BTreeSet;

use crate::collision::{self, SpatialGrid};
use crate::config::CollisionConfig;
use crate::error::CollisionError;
use crate::objects::BodyView;
use crate::response::{self, RestitutionMode};

/// Receives one call per colliding pair per step, in pair order.
pub trait CollisionListener<K> {
    fn on_collision(&mut self, a: &K, b: &K);
}

impl<K, F> CollisionListener<K> for F
where
    F: FnMut(&K, &K),
{
    fn on_collision(&mut self, a: &K, b: &K) {
        self(a, b)
    }
}

/// Where the coordinator is within a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPhase {
    Idle,
    BroadPhase,
    NarrowPhase,
    /// Poses, velocities and memberships of the last step are final.
    Committed,
}

/// Counters for one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub bodies: usize,
    pub candidates: usize,
    /// Candidate pairs that ran a narrow-phase test.
    pub tested: usize,
    /// Pairs that collided, triggers included.
    pub colliding: usize,
    pub trigger_contacts: usize,
    pub static_pairs_skipped: usize,
    /// Bodies left out of the step because their pose, velocity or shape was unusable.
    pub malformed_bodies: usize,
}

/// Outcome of one step.
///
/// Memberships are keyed by the body's index in the slice passed to the step
/// and hold only this step's verdicts.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport<K> {
    ids: Vec<K>,
    memberships: Vec<BTreeSet<usize>>,
    pairs: Vec<(usize, usize)>,
    stats: StepStats,
}

impl<K> StepReport<K> {
    fn new(ids: Vec<K>) -> Self {
        let memberships = vec![BTreeSet::new(); ids.len()];
        StepReport { ids, memberships, pairs: Vec::new(), stats: StepStats::default() }
    }

    fn record(&mut self, a: usize, b: usize) {
        self.memberships[a].insert(b);
        self.memberships[b].insert(a);
        self.pairs.push((a, b));
    }

    /// Indices of the bodies touching body `index` this step.
    pub fn membership(&self, index: usize) -> Option<&BTreeSet<usize>> {
        self.memberships.get(index)
    }

    pub fn is_touching(&self, a: usize, b: usize) -> bool {
        self.memberships.get(a).map_or(false, |set| set.contains(&b))
    }

    /// Colliding pairs `(i, j)`, `i < j`, in the order they were resolved.
    pub fn colliding_pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Colliding pairs by identity.
    pub fn colliding_ids(&self) -> impl Iterator<Item = (&K, &K)> + '_ {
        self.pairs.iter().map(move |&(a, b)| (&self.ids[a], &self.ids[b]))
    }

    pub fn ids(&self) -> &[K] {
        &self.ids
    }

    pub fn stats(&self) -> &StepStats {
        &self.stats
    }
}

impl<K: PartialEq> StepReport<K> {
    pub fn index_of(&self, id: &K) -> Option<usize> {
        self.ids.iter().position(|candidate| candidate == id)
    }

    /// Identities of the bodies touching `id` this step. Empty for unknown ids.
    pub fn touching(&self, id: &K) -> Vec<&K> {
        self.index_of(id)
            .map(|index| self.memberships[index].iter().map(|&other| &self.ids[other]).collect())
            .unwrap_or_default()
    }
}

/// Runs collision steps over externally owned bodies.
///
/// The grid's buffers are reused from one step to the next; no other state
/// survives a step.
#[derive(Debug)]
pub struct StepCoordinator {
    config: CollisionConfig,
    grid: SpatialGrid,
    phase: StepPhase,
}

impl StepCoordinator {
    pub fn new(config: CollisionConfig) -> Result<Self, CollisionError> {
        config.validate()?;
        let grid = SpatialGrid::with_strategy(config.cell_interval, config.broad_phase)?;
        Ok(StepCoordinator { config, grid, phase: StepPhase::Idle })
    }

    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    pub fn phase(&self) -> StepPhase {
        self.phase
    }

    pub fn step<K: Clone>(
        &mut self,
        bodies: &mut [BodyView<'_, K>],
        dt: f64,
    ) -> Result<StepReport<K>, CollisionError> {
        self.step_with_listener(bodies, dt, &mut |_: &K, _: &K| {})
    }

    /// Runs one step, calling `listener` for each colliding pair as it is found.
    ///
    /// Pairs are processed in ascending `(i, j)` order and responses are applied
    /// immediately, so a body in several collisions sees the corrections of
    /// earlier pairs when later ones are tested.
    pub fn step_with_listener<K: Clone>(
        &mut self,
        bodies: &mut [BodyView<'_, K>],
        dt: f64,
        listener: &mut dyn CollisionListener<K>,
    ) -> Result<StepReport<K>, CollisionError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(CollisionError::InvalidTimeStep(dt));
        }

        let mut report = StepReport::new(bodies.iter().map(|body| body.id.clone()).collect());
        report.stats.bodies = bodies.len();

        self.enter(StepPhase::BroadPhase);
        self.grid.clear();
        for (index, body) in bodies.iter().enumerate() {
            if !body.is_well_formed() {
                log::warn!("body {} has a non-finite pose or velocity, or an invalid shape or attributes; skipped this step", index);
                report.stats.malformed_bodies += 1;
                continue;
            }
            self.grid.insert(index, &body.moving_shape().swept_aabb(dt));
        }
        let candidates = self.grid.query_potential_pairs();
        report.stats.candidates = candidates.len();

        self.enter(StepPhase::NarrowPhase);
        for (i, j) in candidates {
            self.process_pair(bodies, i, j, dt, &mut report, listener);
        }

        self.enter(StepPhase::Committed);
        let stats = &report.stats;
        log::debug!(
            "step dt={}: {} bodies, {} candidates, {} tested, {} colliding ({} trigger), {} static skipped",
            dt,
            stats.bodies,
            stats.candidates,
            stats.tested,
            stats.colliding,
            stats.trigger_contacts,
            stats.static_pairs_skipped
        );
        Ok(report)
    }

    fn enter(&mut self, phase: StepPhase) {
        log::trace!("step phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    fn process_pair<K>(
        &self,
        bodies: &mut [BodyView<'_, K>],
        i: usize,
        j: usize,
        dt: f64,
        report: &mut StepReport<K>,
        listener: &mut dyn CollisionListener<K>,
    ) {
        // Candidates always come as i < j
        let (head, tail) = bodies.split_at_mut(j);
        let (a, b) = (&mut head[i], &mut tail[0]);

        if a.is_static() && b.is_static() {
            report.stats.static_pairs_skipped += 1;
            return;
        }

        let shape_a = a.moving_shape();
        let shape_b = b.moving_shape();
        report.stats.tested += 1;

        if a.is_trigger() || b.is_trigger() {
            if !collision::overlaps(&shape_a, &shape_b, dt) {
                return;
            }
            log::trace!("trigger contact ({}, {})", i, j);
            report.stats.trigger_contacts += 1;
        } else {
            let Some(manifold) = collision::contact(&shape_a, &shape_b, dt) else {
                return;
            };
            let deltas = response::resolve(&manifold, &a.response_body(), &b.response_body(), self.restitution_mode());
            if !a.is_static() {
                *a.pose = a.pose.translated(deltas.a.translation);
                *a.velocity = deltas.a.velocity;
            }
            if !b.is_static() {
                *b.pose = b.pose.translated(deltas.b.translation);
                *b.velocity = deltas.b.velocity;
            }
            log::trace!("contact ({}, {}): normal {:?} depth {:.4}", i, j, manifold.normal, manifold.depth());
        }

        report.stats.colliding += 1;
        report.record(i, j);
        listener.on_collision(&a.id, &b.id);
    }

    fn restitution_mode(&self) -> RestitutionMode {
        self.config.restitution_mode
    }
}

/// Runs a single step with a throwaway coordinator.
pub fn step<K: Clone>(
    bodies: &mut [BodyView<'_, K>],
    cell_interval: i64,
    restitution_mode: RestitutionMode,
    dt: f64,
) -> Result<StepReport<K>, CollisionError> {
    let config = CollisionConfig { cell_interval, restitution_mode, ..CollisionConfig::default() };
    StepCoordinator::new(config)?.step(bodies, dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Pose, Vec2};
    use crate::objects::BodyAttributes;
    use crate::shapes::Shape;

    struct Slot {
        shape: Shape,
        pose: Pose,
        velocity: Vec2,
        attributes: Option<BodyAttributes>,
    }

    impl Slot {
        fn new(shape: Shape, x: f64, y: f64, attributes: Option<BodyAttributes>) -> Self {
            Slot { shape, pose: Pose::at(Vec2::new(x, y)), velocity: Vec2::ZERO, attributes }
        }
    }

    fn views(slots: &mut [Slot]) -> Vec<BodyView<'_, usize>> {
        slots
            .iter_mut()
            .enumerate()
            .map(|(id, slot)| BodyView {
                id,
                shape: &slot.shape,
                pose: &mut slot.pose,
                velocity: &mut slot.velocity,
                attributes: slot.attributes,
            })
            .collect()
    }

    fn dynamic() -> Option<BodyAttributes> {
        Some(BodyAttributes::dynamic(1.0).unwrap())
    }

    #[test]
    fn test_rejects_bad_configuration() {
        let mut slots = [Slot::new(Shape::circle(1.0).unwrap(), 0.0, 0.0, dynamic())];
        let mut bodies = views(&mut slots);
        assert_eq!(
            step(&mut bodies, 0, RestitutionMode::MassWeighted, 0.1).unwrap_err(),
            CollisionError::InvalidCellInterval(0)
        );
        assert_eq!(
            step(&mut bodies, 10, RestitutionMode::MassWeighted, -0.1).unwrap_err(),
            CollisionError::InvalidTimeStep(-0.1)
        );
        assert!(step(&mut bodies, 10, RestitutionMode::MassWeighted, f64::NAN).is_err());
    }

    #[test]
    fn test_phase_transitions() {
        let mut coordinator = StepCoordinator::new(CollisionConfig::default()).unwrap();
        assert_eq!(coordinator.phase(), StepPhase::Idle);
        let mut slots = [Slot::new(Shape::circle(1.0).unwrap(), 0.0, 0.0, dynamic())];
        coordinator.step(&mut views(&mut slots), 0.1).unwrap();
        assert_eq!(coordinator.phase(), StepPhase::Committed);
    }

    #[test]
    fn test_overlapping_boxes_are_pushed_apart() {
        let shape = Shape::aabb(Vec2::new(1.0, 1.0)).unwrap();
        let mut slots = [Slot::new(shape, 0.0, 0.0, dynamic()), Slot::new(shape, 1.5, 0.0, dynamic())];
        let report = step(&mut views(&mut slots), 4, RestitutionMode::MassWeighted, 0.0).unwrap();

        assert_eq!(report.colliding_pairs(), &[(0, 1)]);
        assert!((slots[0].pose.position.x - -0.25).abs() < 1e-12);
        assert!((slots[1].pose.position.x - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_static_pairs_are_skipped() {
        let shape = Shape::aabb(Vec2::new(1.0, 1.0)).unwrap();
        let fixed = Some(BodyAttributes::fixed());
        let mut slots = [Slot::new(shape, 0.0, 0.0, fixed), Slot::new(shape, 0.5, 0.0, None)];
        let report = step(&mut views(&mut slots), 4, RestitutionMode::MassWeighted, 0.1).unwrap();

        assert!(report.colliding_pairs().is_empty());
        assert_eq!(report.stats().static_pairs_skipped, 1);
        assert_eq!(report.stats().tested, 0);
        assert_eq!(slots[1].pose.position, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_listener_called_once_per_pair() {
        let shape = Shape::circle(1.0).unwrap();
        let mut slots = [
            Slot::new(shape, 0.0, 0.0, dynamic()),
            Slot::new(shape, 1.0, 0.0, dynamic()),
            Slot::new(shape, 50.0, 0.0, dynamic()),
        ];
        let mut calls = Vec::new();
        let mut coordinator = StepCoordinator::new(CollisionConfig::default()).unwrap();
        let mut listener = |a: &usize, b: &usize| calls.push((*a, *b));
        let report = coordinator.step_with_listener(&mut views(&mut slots), 0.0, &mut listener).unwrap();

        assert_eq!(calls, vec![(0, 1)]);
        assert_eq!(report.touching(&0), vec![&1]);
        assert_eq!(report.touching(&1), vec![&0]);
        assert!(report.touching(&2).is_empty());
        assert!(report.touching(&99).is_empty());
    }

    #[test]
    fn test_malformed_body_is_isolated() {
        let shape = Shape::circle(1.0).unwrap();
        let mut slots = [
            Slot::new(shape, 0.0, 0.0, dynamic()),
            Slot::new(shape, 1.0, 0.0, dynamic()),
            Slot::new(shape, f64::NAN, 0.0, dynamic()),
        ];
        let report = step(&mut views(&mut slots), 10, RestitutionMode::MassWeighted, 0.0).unwrap();
        assert_eq!(report.stats().malformed_bodies, 1);
        assert_eq!(report.colliding_pairs(), &[(0, 1)]);
        assert!(report.membership(2).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_attributes_do_not_leak_into_partner() {
        let shape = Shape::circle(1.0).unwrap();
        let bad = BodyAttributes { mass: f64::NAN, ..BodyAttributes::default() };
        let mut slots = [
            Slot::new(shape, 0.0, 0.0, Some(bad)),
            Slot::new(shape, 1.0, 0.0, dynamic()),
        ];
        slots[1].velocity = Vec2::new(-1.0, 0.0);
        let report = step(&mut views(&mut slots), 10, RestitutionMode::MassWeighted, 0.0).unwrap();

        assert_eq!(report.stats().malformed_bodies, 1);
        assert!(report.colliding_pairs().is_empty());
        assert_eq!(slots[1].pose.position, Vec2::new(1.0, 0.0));
        assert_eq!(slots[1].velocity, Vec2::new(-1.0, 0.0));
    }
}
