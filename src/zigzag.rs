/// Zigzag mapping between signed deltas and unsigned codes.
/// Interleaves signs so small magnitudes map to small codes: 0, -1, 1, -2, 2 -> 0, 1, 2, 3, 4.
/// Written arithmetically so the result does not depend on two's-complement shifts.

#[inline]
pub fn encode(delta: i32) -> u32 {
    let magnitude = delta.unsigned_abs();
    if delta >= 0 {
        magnitude << 1
    } else {
        ((magnitude - 1) << 1) | 1
    }
}

#[inline]
pub fn decode(code: u32) -> i32 {
    // code >> 1 never exceeds i32::MAX
    let half = (code >> 1) as i32;
    if code & 1 == 0 {
        half
    } else {
        -half - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zigzag_small_values() {
        let deltas = [0, -1, 1, -2, 2, -3, 3];
        let codes: Vec<u32> = deltas.iter().map(|&d| encode(d)).collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5, 6]);
        for (&d, &c) in deltas.iter().zip(&codes) {
            assert_eq!(decode(c), d);
        }
    }

    #[test]
    fn test_zigzag_sample_deltas() {
        // Extremes of u16 - u16 differences
        assert_eq!(encode(65_535), 131_070);
        assert_eq!(encode(-65_535), 131_069);
        assert_eq!(decode(131_070), 65_535);
        assert_eq!(decode(131_069), -65_535);
    }

    #[test]
    fn test_zigzag_full_width() {
        assert_eq!(encode(i32::MAX), u32::MAX - 1);
        assert_eq!(encode(i32::MIN), u32::MAX);
        assert_eq!(decode(u32::MAX - 1), i32::MAX);
        assert_eq!(decode(u32::MAX), i32::MIN);
    }

    #[test]
    fn test_zigzag_example_deltas() {
        assert_eq!(encode(5), 10);
        assert_eq!(encode(2), 4);
    }
}
