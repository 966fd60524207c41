//! Integer helpers shared by the turn phases and the score calculator.
//!
//! Every division in the simulation rounds toward negative infinity, so
//! negative diplomatic deltas round the same way positive ones do.

/// Division rounding toward negative infinity. A zero divisor yields 0.
pub fn floor_div(numerator: i64, denominator: i64) -> i64 {
    if denominator == 0 {
        return 0;
    }
    let quotient = numerator / denominator;
    if numerator % denominator != 0 && ((numerator < 0) != (denominator < 0)) {
        quotient - 1
    } else {
        quotient
    }
}

/// `floor(scale * a * b / (a + b))`: saturates as either input grows.
pub fn harmonic_blend(scale: i64, a: i64, b: i64) -> i64 {
    floor_div(scale * a * b, (a + b).max(1))
}

/// Economic aid level to money.
pub fn econ_conv(level: i64) -> i64 {
    const TABLE: [i64; 6] = [0, 1, 2, 5, 10, 20];
    TABLE[level.clamp(0, 5) as usize]
}

/// Military or insurgency aid level to materiel.
pub fn aid_conv(level: i64) -> i64 {
    const TABLE: [i64; 6] = [0, 1, 5, 20, 50, 100];
    TABLE[level.clamp(0, 5) as usize]
}

/// Intervention level to troops on the ground.
pub fn intervention_conv(level: i64) -> i64 {
    const TABLE: [i64; 6] = [0, 1, 5, 20, 100, 500];
    TABLE[level.clamp(0, 5) as usize]
}

/// Integer square root, rounded down.
pub fn isqrt(value: i64) -> i64 {
    if value <= 0 {
        return 0;
    }
    let mut root = (value as f64).sqrt() as i64;
    while root * root > value {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= value {
        root += 1;
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_div_rounds_down_for_negatives() {
        assert_eq!(floor_div(7, 2), 3);
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(floor_div(-8, 2), -4);
        assert_eq!(floor_div(7, -2), -4);
        assert_eq!(floor_div(5, 0), 0);
    }

    #[test]
    fn conversion_tables_saturate_above_five() {
        assert_eq!(econ_conv(5), 20);
        assert_eq!(econ_conv(7), 20);
        assert_eq!(aid_conv(3), 20);
        assert_eq!(intervention_conv(6), 500);
        assert_eq!(intervention_conv(0), 0);
    }

    #[test]
    fn harmonic_blend_matches_reference_values() {
        // USA: temp = 5332 / 2 = 2666 with 2130 men under arms.
        assert_eq!(harmonic_blend(4, 2666, 2130), 4736);
        assert_eq!(harmonic_blend(4, 0, 0), 0);
    }

    #[test]
    fn isqrt_floors() {
        assert_eq!(isqrt(6400), 80);
        assert_eq!(isqrt(6399), 79);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(-4), 0);
    }
}
