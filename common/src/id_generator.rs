use rand::Rng;

use crate::GameId;

pub const GAME_ID_MIN: u32 = 100_000;
pub const GAME_ID_MAX: u32 = 999_999;

/// Six-digit numeric identifier. Uniqueness is the caller's concern.
pub fn generate_game_id<R: Rng + ?Sized>(rng: &mut R) -> GameId {
    let number = rng.random_range(GAME_ID_MIN..=GAME_ID_MAX);
    GameId::new(number.to_string())
}
