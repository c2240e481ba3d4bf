//! Update pass: run every entity's update in list order.

use crate::engine::EngineState;
use crate::entity::{Entity, Frame, Others};

/// Update the entities present when the pass starts, in list order.
///
/// Each entity sees the rest of the list through [`Frame::others`]. Entities
/// spawned by a hook are appended as soon as that hook returns, so later
/// entities observe them, but they are first updated on the next frame.
pub fn update_pass(entities: &mut Vec<Entity>, state: &mut EngineState, delta_time: f32) {
    let count = entities.len();
    let frame_number = state.frame_number();
    for i in 0..count {
        {
            let (before, rest) = entities.split_at_mut(i);
            let Some((me, after)) = rest.split_first_mut() else {
                break;
            };
            let mut frame = Frame {
                delta_time,
                frame_number,
                state: &mut *state,
                others: Others::new(before, after),
            };
            me.update(&mut frame);
        }
        entities.extend(state.take_spawned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::vector::Vector;
    use crate::entity::{EntityId, HookSet};
    use crate::resources::engineconfig::EngineConfig;

    #[test]
    fn later_entities_see_earlier_mutations() {
        let mut state = EngineState::new(EngineConfig::default());
        let leader_id = state.next_id();
        let leader = Entity::new(leader_id).with_velocity(Vector::new(1.0, 0.0));
        let follower = Entity::with_hooks(
            state.next_id(),
            HookSet::default().on_update(move |me, frame| {
                if let Some(leader) = frame.others.get(leader_id) {
                    me.position = leader.position;
                }
            }),
        );
        let mut entities = vec![leader, follower];
        update_pass(&mut entities, &mut state, 10.0);
        // The leader already moved when the follower's hook ran.
        assert_eq!(entities[1].prev_position, Vector::new(10.0, 0.0));
    }

    #[test]
    fn hook_can_mutate_other_entity() {
        let mut state = EngineState::new(EngineConfig::default());
        let target = Entity::new(EntityId(10));
        let mover = Entity::with_hooks(
            EntityId(11),
            HookSet::default().on_update(|_, frame| {
                if let Some(t) = frame.others.get_mut(EntityId(10)) {
                    t.enabled = false;
                }
            }),
        );
        let mut entities = vec![target, mover];
        update_pass(&mut entities, &mut state, 1.0);
        assert!(!entities[0].enabled);
    }

    #[test]
    fn spawned_entity_waits_for_next_pass() {
        let mut state = EngineState::new(EngineConfig::default());
        let spawner = Entity::with_hooks(
            state.next_id(),
            HookSet::default().on_init(|_, frame| {
                let child = frame.state.create_entity().with_name("child");
                frame.state.spawn(child);
            }),
        );
        let mut entities = vec![spawner];
        update_pass(&mut entities, &mut state, 1.0);
        assert_eq!(entities.len(), 2);
        assert!(!entities[1].initialized);

        update_pass(&mut entities, &mut state, 1.0);
        assert_eq!(entities.len(), 2);
        assert!(entities[1].initialized);
    }
}
