use rand::Rng;

use crate::error::WheelError;
use crate::shared_wheel_game::{Prize, MAX_EXTRA_ROTATIONS, MIN_EXTRA_ROTATIONS};

pub fn segment_angle(count: usize) -> f64 {
    360.0 / count as f64
}

/// Clockwise rotation that brings the middle of segment `index` under the
/// fixed pointer at the top, after `extra_rotations` full turns.
pub fn target_angle_for_index(count: usize, index: usize, extra_rotations: u32) -> f64 {
    let segment = segment_angle(count);
    let middle = index as f64 * segment + segment / 2.0;
    extra_rotations as f64 * 360.0 + (360.0 - middle)
}

pub fn random_extra_rotations<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(MIN_EXTRA_ROTATIONS..=MAX_EXTRA_ROTATIONS)
}

pub fn calculate_target_angle<R: Rng + ?Sized>(
    prizes: &[Prize],
    selected: &Prize,
    rng: &mut R,
) -> Result<f64, WheelError> {
    if prizes.is_empty() {
        return Err(WheelError::EmptyPrizes);
    }
    let index = prizes
        .iter()
        .position(|prize| prize.id == selected.id)
        .ok_or_else(|| WheelError::PrizeNotFound(selected.id.clone()))?;

    Ok(target_angle_for_index(prizes.len(), index, random_extra_rotations(rng)))
}

/// Segment that sits under the pointer once the wheel has rotated by `angle`.
pub fn prize_index_at(angle: f64, count: usize) -> Option<usize> {
    if count == 0 || !angle.is_finite() {
        return None;
    }
    let normalized = (360.0 - angle.rem_euclid(360.0)).rem_euclid(360.0);
    let index = (normalized / segment_angle(count)).floor() as usize;
    Some(index.min(count - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared_wheel_game::PrizeId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wheel(count: usize) -> Vec<Prize> {
        (0..count)
            .map(|i| Prize::new(i as i64 + 1, &format!("Prize {}", i + 1), 1.0, "#fff"))
            .collect()
    }

    #[test]
    fn test_angle_lands_on_selected_prize() {
        let mut rng = StdRng::seed_from_u64(42);
        for count in [6, 8] {
            let prizes = wheel(count);
            for (index, prize) in prizes.iter().enumerate() {
                for _ in 0..20 {
                    let angle = calculate_target_angle(&prizes, prize, &mut rng).unwrap();
                    assert_eq!(prize_index_at(angle, count), Some(index));
                }
            }
        }
    }

    #[test]
    fn test_extra_rotations_stay_in_range() {
        let prizes = wheel(6);
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = [false; 4];
        for _ in 0..500 {
            let angle = calculate_target_angle(&prizes, &prizes[0], &mut rng).unwrap();
            let turns = (angle / 360.0).floor() as u32;
            assert!((MIN_EXTRA_ROTATIONS..=MAX_EXTRA_ROTATIONS).contains(&turns));
            seen[(turns - MIN_EXTRA_ROTATIONS) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_known_angles() {
        // Eight segments of 45°: first segment's middle is 22.5°.
        assert_eq!(target_angle_for_index(8, 0, 2), 720.0 + 337.5);
        assert_eq!(target_angle_for_index(8, 7, 3), 1080.0 + 22.5);
        assert_eq!(target_angle_for_index(6, 2, 0), 210.0);
    }

    #[test]
    fn test_unknown_prize_is_an_error() {
        let prizes = wheel(6);
        let stranger = Prize::new(99, "Stranger", 1.0, "#000");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            calculate_target_angle(&prizes, &stranger, &mut rng).unwrap_err(),
            WheelError::PrizeNotFound(PrizeId::from(99))
        );
        assert_eq!(
            calculate_target_angle(&[], &stranger, &mut rng).unwrap_err(),
            WheelError::EmptyPrizes
        );
    }

    #[test]
    fn test_prize_index_at_edges() {
        assert_eq!(prize_index_at(0.0, 8), Some(0));
        assert_eq!(prize_index_at(360.0, 8), Some(0));
        assert_eq!(prize_index_at(-45.0, 8), Some(1));
        assert_eq!(prize_index_at(10.0, 0), None);
        assert_eq!(prize_index_at(f64::NAN, 8), None);
    }
}
