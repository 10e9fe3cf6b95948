//! Frame ordering shared by the game and the pointer engine.

use bevy::prelude::*;

/// Core game loop system sets with explicit ordering.
///
/// The execution order is:
/// 1. **EventProcessing** - Read input into ECS-friendly form
/// 2. **Movement** - Process movement requests
/// 3. **Physics** - Apply positions and colliders
/// 4. **Interaction** - Resolve the pointer against the settled world
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    EventProcessing,
    Movement,
    Physics,
    Interaction,
}

/// Configure the system set ordering for the game loop
pub fn configure_game_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            GameSet::EventProcessing,
            GameSet::Movement.after(GameSet::EventProcessing),
            GameSet::Physics.after(GameSet::Movement),
            GameSet::Interaction.after(GameSet::Physics),
        ),
    );
}
