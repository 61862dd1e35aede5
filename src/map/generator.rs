use super::*;
use crate::constants::*;
use rand::Rng;

/// Build a random valid map.
///
/// The agent always starts at `[0,0]`. Every other object picks a random cell
/// and, if that cell is rejected, walks forward in row-major order (wrapping
/// around) until it finds one that passes validation.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> MapResult<GameMap> {
    let mut builder = MapBuilder::new();
    builder.try_place(MapObject::new(ObjectKind::Player, Position::new(0, 0)))?;

    for &kind in PLACEMENT_ORDER.iter().skip(1) {
        let first = rng.gen_range(0..GRID_CELLS);
        place_from(&mut builder, kind, first)?;
    }

    builder.build()
}

/// Place `kind` at the first valid cell at or after `first`, wrapping around.
fn place_from(builder: &mut MapBuilder, kind: ObjectKind, first: usize) -> MapResult<()> {
    let candidate = (0..GRID_CELLS)
        .map(|step| Position::from_index((first + step) % GRID_CELLS))
        .find(|&pos| builder.conflict(&MapObject::new(kind, pos)).is_none())
        .ok_or(MapError::NoRoom(kind))?;

    builder.try_place(MapObject::new(kind, candidate))
}
