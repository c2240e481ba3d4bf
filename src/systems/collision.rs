//! Pairwise collision sweep.
//!
//! Brute force by design: every eligible initiator is tested against every
//! eligible candidate, O(n²) per frame, meant for a few dozen entities.
//!
//! Roles:
//! - initiator: enabled, not static, collider enabled
//! - candidate: enabled, collider enabled (static entities included)
//!
//! A pair is therefore only ever discovered from a non-static side, and two
//! static entities never collide with each other.
//!
//! Each overlapping pair is notified exactly once per sweep: the initiator's
//! `on_overlap` runs first, then the candidate's.

use log::debug;
use rustc_hash::FxHashSet;

use crate::components::collider::Overlap;
use crate::engine::EngineState;
use crate::entity::{Entity, EntityId};
use crate::events::collision::CollisionEvent;
use crate::resources::ignorecollisions::IgnoreCollisions;

/// Outcome of one sweep.
#[derive(Debug, Default, Clone)]
pub struct SweepResult {
    /// Every entity that overlapped something this sweep.
    pub hit: FxHashSet<EntityId>,
    /// Notified pairs in notification order.
    pub events: Vec<CollisionEvent>,
}

pub fn is_initiator(entity: &Entity) -> bool {
    !entity.is_static && is_candidate(entity)
}

pub fn is_candidate(entity: &Entity) -> bool {
    entity.enabled && entity.collider.enabled()
}

/// Whether the ignore table suppresses collisions between `a` and `b`.
pub fn ignores_collision(ignore: &IgnoreCollisions, a: &Entity, b: &Entity) -> bool {
    ignore.ignores(&a.tags, &b.tags)
}

/// Overlap predicate.
///
/// Self-pairs (`a` and `b` being the same entity, not merely the same id) and
/// the ignore table are checked first. Then `a`'s collider is asked, then
/// `b`'s, and if neither resolves the question the two bounding boxes are
/// intersected (edges inclusive).
pub fn overlaps(a: &Entity, b: &Entity, ignore: &IgnoreCollisions) -> bool {
    if std::ptr::eq(a, b) || ignores_collision(ignore, a, b) {
        return false;
    }

    let answer = match a.collider.overlaps(a.position, b.collider.as_ref(), b.position) {
        Overlap::Unhandled => b.collider.overlaps(b.position, a.collider.as_ref(), a.position),
        resolved => resolved,
    };

    match answer {
        Overlap::Resolved(hit) => hit,
        Overlap::Unhandled => a.bounding_box().intersects(&b.bounding_box()),
    }
}

/// Two distinct mutable entries of one slice.
fn pair_mut(entities: &mut [Entity], a: usize, b: usize) -> (&mut Entity, &mut Entity) {
    debug_assert_ne!(a, b);
    if a < b {
        let (lo, hi) = entities.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = entities.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}

/// Run the sweep over `entities` in list order and notify every overlapping
/// pair.
///
/// Overlap hooks mutate entities in place, so later checks in the same sweep
/// see their effects (an entity disabled by a hook stops being a candidate).
/// Entities spawned by hooks are appended right after the notifying pair but
/// are not examined until the next sweep.
pub fn collision_sweep(entities: &mut Vec<Entity>, state: &mut EngineState) -> SweepResult {
    let mut result = SweepResult::default();
    // Keyed by list index: entities only ever get appended, and two entities
    // sharing an id must still collide.
    let mut notified: FxHashSet<(usize, usize)> = FxHashSet::default();
    let count = entities.len();
    let frame = state.frame_number();

    for a in 0..count {
        if !is_initiator(&entities[a]) {
            continue;
        }
        for b in 0..count {
            if a == b || !is_candidate(&entities[b]) {
                continue;
            }
            // The reverse key is what the nested loop can actually produce;
            // the forward key keeps the once-per-pair guarantee independent
            // of the loop shape.
            if notified.contains(&(b, a)) || notified.contains(&(a, b)) {
                continue;
            }
            if !overlaps(&entities[a], &entities[b], &state.config.ignore_collisions) {
                continue;
            }

            notified.insert((a, b));
            let (id_a, id_b) = (entities[a].id, entities[b].id);
            result.hit.insert(id_a);
            result.hit.insert(id_b);
            result.events.push(CollisionEvent {
                a: id_a,
                b: id_b,
                frame,
            });
            debug!(
                "Collision on frame {}: '{}' ({}) <-> '{}' ({})",
                frame, entities[a].name, id_a, entities[b].name, id_b
            );

            let (first, second) = pair_mut(entities, a, b);
            first.notify_overlap(second, state);
            second.notify_overlap(first, state);
            entities.extend(state.take_spawned());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::boxcollider::BoxCollider;
    use crate::components::circlecollider::CircleCollider;
    use crate::components::vector::Vector;
    use crate::entity::HookSet;
    use crate::resources::engineconfig::EngineConfig;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn boxed(id: u64, x: f32, y: f32, size: f32) -> Entity {
        Entity::new(EntityId(id))
            .with_position(Vector::new(x, y))
            .with_collider(BoxCollider::new(size, size))
    }

    fn state() -> EngineState {
        EngineState::new(EngineConfig::default())
    }

    #[test]
    fn entity_never_overlaps_itself() {
        let e = boxed(1, 0.0, 0.0, 10.0).dynamic();
        assert!(!overlaps(&e, &e, &IgnoreCollisions::new()));
    }

    #[test]
    fn fallback_box_test() {
        // Centered boxes: position is the center, so top-left (0,0) and (5,5).
        let a = boxed(1, 5.0, 5.0, 10.0);
        let b = boxed(2, 10.0, 10.0, 10.0);
        let c = boxed(3, 25.0, 25.0, 10.0);
        let none = IgnoreCollisions::new();
        assert!(overlaps(&a, &b, &none));
        assert!(!overlaps(&a, &c, &none));
    }

    #[test]
    fn resolved_answer_skips_fallback() {
        // Boxes around these circles overlap; the circles are too far apart.
        let a = Entity::new(EntityId(1)).with_collider(CircleCollider::new(5.0));
        let b = Entity::new(EntityId(2))
            .with_position(Vector::new(9.0, 9.0))
            .with_collider(CircleCollider::new(5.0));
        assert!(a.bounding_box().intersects(&b.bounding_box()));
        assert!(!overlaps(&a, &b, &IgnoreCollisions::new()));
    }

    #[test]
    fn second_collider_is_asked_when_first_defers() {
        #[derive(Debug)]
        struct Always;
        impl crate::components::collider::Collider for Always {
            fn bounding_box(&self, _: Vector) -> crate::components::vector::BoundingBox {
                Default::default()
            }
            fn overlaps(&self, _: Vector, _: &dyn crate::components::collider::Collider, _: Vector) -> Overlap {
                Overlap::Resolved(true)
            }
            fn draw_debug(&self, _: &mut dyn crate::resources::surface::RenderSurface, _: Vector, _: bool) {}
            fn enabled(&self) -> bool {
                true
            }
            fn set_enabled(&mut self, _: bool) {}
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
        let far_box = boxed(1, 1000.0, 1000.0, 1.0);
        let always = Entity::new(EntityId(2)).with_collider(Always);
        assert!(overlaps(&far_box, &always, &IgnoreCollisions::new()));
    }

    #[test]
    fn ignore_table_wins_over_geometry() {
        let ground = boxed(1, 0.0, 0.0, 10.0).with_tag("ground");
        let pipe = Entity::with_hooks(EntityId(2), HookSet::new("Pipe"))
            .with_collider(BoxCollider::new(10.0, 10.0));
        let ignore = IgnoreCollisions::new().with("ground", ["Pipe"]);
        assert!(overlaps(&ground, &pipe, &IgnoreCollisions::new()));
        assert!(!overlaps(&ground, &pipe, &ignore));
        assert!(!overlaps(&pipe, &ground, &ignore));
    }

    #[test]
    fn dynamic_pair_notified_once_each_side() {
        let count = Rc::new(RefCell::new(Vec::new()));
        let mk = |id: u64| {
            let log = count.clone();
            Entity::with_hooks(
                EntityId(id),
                HookSet::default().on_overlap(move |me, other, _| {
                    log.borrow_mut().push((me.id, other.id))
                }),
            )
            .with_collider(BoxCollider::new(10.0, 10.0))
            .dynamic()
        };
        let mut entities = vec![mk(1), mk(2)];
        let mut st = state();
        let result = collision_sweep(&mut entities, &mut st);

        assert_eq!(
            *count.borrow(),
            vec![(EntityId(1), EntityId(2)), (EntityId(2), EntityId(1))]
        );
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.hit.len(), 2);
    }

    #[test]
    fn entities_sharing_an_id_still_collide() {
        let mut st = state();
        let generated = st.create_entity().with_collider(BoxCollider::new(10.0, 10.0)).dynamic();
        let hand_built = boxed(generated.id.0, 0.0, 0.0, 10.0);
        assert_eq!(generated.id, hand_built.id);
        assert!(overlaps(&generated, &hand_built, &IgnoreCollisions::new()));

        let mut entities = vec![generated, hand_built];
        let result = collision_sweep(&mut entities, &mut st);
        assert_eq!(result.events.len(), 1);
    }

    #[test]
    fn static_pairs_never_checked() {
        let mut entities = vec![boxed(1, 0.0, 0.0, 10.0), boxed(2, 0.0, 0.0, 10.0)];
        let result = collision_sweep(&mut entities, &mut state());
        assert!(result.events.is_empty());
        assert!(result.hit.is_empty());
    }

    #[test]
    fn static_candidate_found_from_dynamic_side() {
        // Static entity listed first: still found, the dynamic one initiates.
        let mut entities = vec![boxed(1, 0.0, 0.0, 10.0), boxed(2, 0.0, 0.0, 10.0).dynamic()];
        let result = collision_sweep(&mut entities, &mut state());
        assert_eq!(
            result.events,
            vec![CollisionEvent {
                a: EntityId(2),
                b: EntityId(1),
                frame: 0
            }]
        );
    }

    #[test]
    fn disabled_entity_or_collider_excluded() {
        let mut entities = vec![boxed(1, 0.0, 0.0, 10.0).dynamic(), boxed(2, 0.0, 0.0, 10.0)];
        entities[1].enabled = false;
        assert!(collision_sweep(&mut entities, &mut state()).events.is_empty());

        entities[1].enabled = true;
        entities[1].collider.set_enabled(false);
        assert!(collision_sweep(&mut entities, &mut state()).events.is_empty());

        entities[1].collider.set_enabled(true);
        assert_eq!(collision_sweep(&mut entities, &mut state()).events.len(), 1);
    }

    #[test]
    fn hook_mutations_affect_rest_of_sweep() {
        // 1 and 2 are dynamic, 3 is static, all stacked. 1 disables whatever
        // it hits first, so 2 never gets to initiate.
        let first = Entity::with_hooks(
            EntityId(1),
            HookSet::default().on_overlap(|_, other, _| {
                if other.id == EntityId(2) {
                    other.enabled = false;
                }
            }),
        )
        .with_collider(BoxCollider::new(10.0, 10.0))
        .dynamic();
        let second = boxed(2, 0.0, 0.0, 10.0).dynamic();
        let third = boxed(3, 0.0, 0.0, 10.0);
        let mut entities = vec![first, second, third];
        let result = collision_sweep(&mut entities, &mut state());
        let pairs: Vec<_> = result.events.iter().map(|e| (e.a.0, e.b.0)).collect();
        assert_eq!(pairs, vec![(1, 2), (1, 3)]);
    }

    #[test]
    fn overlap_hook_can_request_quit() {
        let mut entities = vec![
            Entity::with_hooks(
                EntityId(1),
                HookSet::default().on_overlap(|_, _, state| state.request_quit()),
            )
            .with_collider(BoxCollider::new(10.0, 10.0))
            .dynamic(),
            boxed(2, 0.0, 0.0, 10.0),
        ];
        let mut st = state();
        collision_sweep(&mut entities, &mut st);
        assert!(st.quit_requested());
    }

    #[test]
    fn spawned_entities_are_appended_not_swept() {
        let mut st = state();
        let spawner = Entity::with_hooks(
            st.next_id(),
            HookSet::default().on_overlap(|_, _, state| {
                let child = state
                    .create_entity()
                    .with_collider(BoxCollider::new(10.0, 10.0))
                    .dynamic();
                state.spawn(child);
            }),
        )
        .with_collider(BoxCollider::new(10.0, 10.0))
        .dynamic();
        let mut entities = vec![spawner, boxed(50, 0.0, 0.0, 10.0)];
        let result = collision_sweep(&mut entities, &mut st);
        assert_eq!(result.events.len(), 1);
        assert_eq!(entities.len(), 3);
        assert_eq!(entities[2].id, EntityId(2));
    }
}
