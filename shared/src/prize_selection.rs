use rand::Rng;

use crate::error::WheelError;
use crate::shared_wheel_game::Prize;

/// Draws a prize index proportionally to each prize's effective weight.
///
/// Zero-weight and sold-out prizes are never drawn. When no prize has a
/// positive weight the draw is uniform over the whole wheel.
pub fn select_prize_index<R: Rng + ?Sized>(prizes: &[Prize], rng: &mut R) -> Result<usize, WheelError> {
    if prizes.is_empty() {
        return Err(WheelError::EmptyPrizes);
    }

    let total: f64 = prizes.iter().map(Prize::effective_weight).sum();
    if total <= 0.0 {
        log::warn!("No prize has a positive weight, drawing uniformly");
        return Ok(rng.gen_range(0..prizes.len()));
    }

    let roll = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (index, prize) in prizes.iter().enumerate() {
        let weight = prize.effective_weight();
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        if roll < cumulative {
            return Ok(index);
        }
    }

    // Rounding can leave the roll just past the accumulated sum.
    prizes
        .iter()
        .rposition(|prize| prize.effective_weight() > 0.0)
        .ok_or(WheelError::EmptyPrizes)
}

pub fn select_prize<'a, R: Rng + ?Sized>(prizes: &'a [Prize], rng: &mut R) -> Result<&'a Prize, WheelError> {
    select_prize_index(prizes, rng).map(|index| &prizes[index])
}
