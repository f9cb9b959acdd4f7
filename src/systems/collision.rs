use bevy_ecs::entity::Entity;
use bevy_ecs::event::EventWriter;
use bevy_ecs::query::With;
use bevy_ecs::system::{Commands, Query};
use tracing::trace;

use crate::constants::PELLET_RADIUS;
use crate::events::GameEvent;
use crate::map::rect::Rect;
use crate::systems::components::{Collider, Ghost, Pellet, PlayerControlled, Position};

/// The pickup box of a pellet centered on `center`.
pub fn pellet_rect(center: glam::Vec2) -> Rect {
    Rect::from_center(center, PELLET_RADIUS * 2.0)
}

/// Detects the player's overlaps with pellets and ghosts.
///
/// Every pellet touched by the player's box is despawned and reported with `GameEvent::PelletEaten`.
/// Every ghost whose box overlaps the player's is reported with `GameEvent::GhostContact`;
/// deciding what a contact costs is left to the stage system.
pub fn collision_system(
    mut commands: Commands,
    players: Query<(&Position, &Collider), With<PlayerControlled>>,
    pellets: Query<(Entity, &Position), With<Pellet>>,
    ghosts: Query<(Entity, &Position, &Collider), With<Ghost>>,
    mut events: EventWriter<GameEvent>,
) {
    for (player_position, player_collider) in players.iter() {
        let player_rect = player_collider.rect(player_position.0);

        for (pellet, position) in pellets.iter() {
            if player_rect.intersects(&pellet_rect(position.0)) {
                trace!(?pellet, "Pellet eaten");
                commands.entity(pellet).despawn();
                events.write(GameEvent::PelletEaten(pellet));
            }
        }

        for (ghost, position, collider) in ghosts.iter() {
            if player_rect.intersects(&collider.rect(position.0)) {
                events.write(GameEvent::GhostContact(ghost));
            }
        }
    }
}
