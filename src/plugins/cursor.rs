use bevy::prelude::*;

use crate::plugins::mouse_interaction::CursorPosition;

pub struct CursorPlugin;

impl Plugin for CursorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorPosition>()
            .init_resource::<LastLoggedCell>()
            .add_systems(Update, log_cursor_system);
    }
}

#[derive(Resource, Default, Debug, Clone, Copy)]
struct LastLoggedCell(Option<(i32, i32)>);

fn log_cursor_system(cursor: Res<CursorPosition>, mut last: ResMut<LastLoggedCell>) {
    if !cursor.is_changed() {
        return;
    }

    // Floor so negative coordinates land in their own cell instead of collapsing onto zero.
    let cell = (cursor.world.x.floor() as i32, cursor.world.y.floor() as i32);

    if last.0 != Some(cell) {
        tracing::debug!(
            screen_x = cursor.screen.x,
            screen_y = cursor.screen.y,
            world_x = cursor.world.x,
            world_y = cursor.world.y,
            "cursor debug"
        );
        last.0 = Some(cell);
        tracing::trace!(cx = cell.0, cy = cell.1, "cursor cell");
    }
}
