//! Proximity and hover gating for clickable creatures

use glam::Vec2;

use super::creature::Creature;
use super::geometry::within_radius;
use crate::consts::{HOVER_RADIUS, INTERACTION_RADIUS};

/// Recompute `can_interact` and `is_hovered` for one creature.
///
/// Hover is only possible while the player is in range. Visited creatures keep
/// whatever flags they had when they were frozen.
pub fn refresh(creature: &mut Creature, player: Vec2, pointer: Vec2) {
    if creature.visited {
        return;
    }
    creature.can_interact = within_radius(player, creature.pos, INTERACTION_RADIUS);
    creature.is_hovered =
        creature.can_interact && within_radius(pointer, creature.pos, HOVER_RADIUS);
}

/// True if a click right now would start a quiz with this creature
pub fn is_clickable(creature: &Creature) -> bool {
    !creature.visited && creature.can_interact && creature.is_hovered
}

/// First clickable creature in list order
pub fn select_creature(creatures: &[Creature]) -> Option<usize> {
    creatures.iter().position(is_clickable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SwimPattern;
    use proptest::prelude::*;

    fn at(x: f32, y: f32) -> Creature {
        Creature::new("Fish", Vec2::new(x, y), SwimPattern::Circle, 1.0, 30.0, 0.8, Vec::new())
    }

    #[test]
    fn test_hover_requires_range() {
        let mut c = at(1000.0, 500.0);
        // Pointer right on top, player far away
        refresh(&mut c, Vec2::new(100.0, 100.0), Vec2::new(1000.0, 500.0));
        assert!(!c.can_interact);
        assert!(!c.is_hovered);

        refresh(&mut c, Vec2::new(900.0, 500.0), Vec2::new(1010.0, 500.0));
        assert!(c.can_interact);
        assert!(c.is_hovered);

        refresh(&mut c, Vec2::new(900.0, 500.0), Vec2::new(1100.0, 500.0));
        assert!(c.can_interact);
        assert!(!c.is_hovered);
    }

    #[test]
    fn test_select_first_in_list_order() {
        let mut creatures = vec![at(500.0, 500.0), at(520.0, 500.0), at(540.0, 500.0)];
        let player = Vec2::new(520.0, 450.0);
        let pointer = Vec2::new(520.0, 500.0);
        for c in &mut creatures {
            refresh(c, player, pointer);
        }
        assert!(creatures.iter().all(|c| c.is_hovered));
        assert_eq!(select_creature(&creatures), Some(0));

        creatures[0].visited = true;
        assert_eq!(select_creature(&creatures), Some(1));
    }

    #[test]
    fn test_nothing_selected_out_of_range() {
        let mut creatures = vec![at(1500.0, 800.0)];
        refresh(&mut creatures[0], Vec2::new(100.0, 300.0), Vec2::new(1500.0, 800.0));
        assert_eq!(select_creature(&creatures), None);
    }

    #[test]
    fn test_visited_flags_are_frozen() {
        let mut c = at(500.0, 500.0);
        refresh(&mut c, Vec2::new(500.0, 450.0), Vec2::new(500.0, 500.0));
        c.visited = true;
        refresh(&mut c, Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0));
        assert!(c.can_interact && c.is_hovered);
        assert!(!is_clickable(&c));
    }

    proptest! {
        #[test]
        fn prop_hover_implies_interact(
            px in 0.0f32..1920.0, py in 0.0f32..1080.0,
            mx in 0.0f32..1920.0, my in 0.0f32..1080.0,
            cx in 0.0f32..1920.0, cy in 0.0f32..1080.0,
        ) {
            let mut c = at(cx, cy);
            refresh(&mut c, Vec2::new(px, py), Vec2::new(mx, my));
            prop_assert!(!c.is_hovered || c.can_interact);
        }
    }
}
