use proptest::prelude::*;
use rvl::vle::NibbleWriter;
use rvl::{compress, decompress, max_compressed_len, Codec, RvlError, WordOrder};

prop_compose! {
    /// Depth-like rows: zero gaps of random length between smooth nonzero spans
    fn arb_depth_samples()(
        spans in prop::collection::vec((0usize..40, 1u16..60_000, prop::collection::vec(-8i32..=8, 0..40)), 0..30),
    ) -> Vec<u16> {
        let mut samples = Vec::new();
        for (zeros, start, steps) in spans {
            samples.extend(std::iter::repeat(0).take(zeros));
            let mut value = i32::from(start);
            for step in steps {
                value = (value + step).clamp(1, 65_535);
                samples.push(value as u16);
            }
        }
        samples
    }
}

proptest! {
    /// Property: any u16 sequence survives a round trip
    #[test]
    fn prop_roundtrip_any(samples in prop::collection::vec(any::<u16>(), 0..2000)) {
        let compressed = compress(&samples).unwrap();
        prop_assert_eq!(decompress(&compressed, samples.len()).unwrap(), samples);
    }

    /// Property: depth-like data survives a round trip in both word orders
    #[test]
    fn prop_roundtrip_depth(samples in arb_depth_samples(), big in any::<bool>()) {
        let codec = Codec::new(if big { WordOrder::Big } else { WordOrder::Little });
        let compressed = codec.compress(&samples).unwrap();
        prop_assert_eq!(codec.decompress(&compressed, samples.len()).unwrap(), samples);
    }

    /// Property: output is whole words and never exceeds the advertised bound
    #[test]
    fn prop_length_bounds(samples in prop::collection::vec(any::<u16>(), 0..2000)) {
        let compressed = compress(&samples).unwrap();
        prop_assert_eq!(compressed.len() % 4, 0);
        prop_assert!(compressed.len() <= max_compressed_len(samples.len()));
    }

    /// Property: dropping the last byte is always reported as corruption
    #[test]
    fn prop_truncation_detected(samples in prop::collection::vec(any::<u16>(), 1..500)) {
        let mut compressed = compress(&samples).unwrap();
        compressed.pop();
        prop_assert!(matches!(
            decompress(&compressed, samples.len()),
            Err(RvlError::CorruptStream(_))
        ));
    }

    /// Property: arbitrary bytes never panic the decoder
    #[test]
    fn prop_garbage_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256), count in 0usize..512) {
        let _ = decompress(&bytes, count);
    }

    /// Well-formed nibble streams carrying arbitrary codes decode to samples or an error
    #[test]
    fn prop_codes_never_panic(
        codes in prop::collection::vec(prop_oneof![0u32..8, any::<u32>()], 0..64),
        count in 0usize..128,
    ) {
        let mut buf = vec![0u8; codes.len() * 6 + 8];
        let mut writer = NibbleWriter::new(&mut buf, WordOrder::Little);
        for &code in &codes {
            writer.encode(code).unwrap();
        }
        let len = writer.finish().unwrap();
        if let Ok(samples) = decompress(&buf[..len], count) {
            prop_assert_eq!(samples.len(), count);
        }
    }
}
