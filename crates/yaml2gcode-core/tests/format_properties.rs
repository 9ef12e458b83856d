use proptest::prelude::*;
use yaml2gcode_core::{format_coord, round_coord, tokens, Motion};

proptest! {
    #[test]
    fn prop_format_has_four_decimals(v in -1.0e6f64..1.0e6) {
        let text = format_coord(v);
        let (_, frac) = text.split_once('.').unwrap();
        prop_assert_eq!(frac.len(), 4);
        prop_assert!(frac.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn prop_round_is_idempotent(v in -1.0e6f64..1.0e6) {
        let once = round_coord(v);
        prop_assert_eq!(round_coord(once), once);
        prop_assert_eq!(format_coord(once), format_coord(v));
    }

    #[test]
    fn prop_round_stays_close(v in -1.0e6f64..1.0e6) {
        prop_assert!((round_coord(v) - v).abs() <= 0.00005 + 1e-9);
    }

    #[test]
    fn prop_tokens_parse_back(x in -1000i32..1000, y in -1000i32..1000) {
        let params = format!("X{} Y{}", x, y);
        let parsed: Vec<_> = tokens(&params).collect();
        prop_assert_eq!(parsed.len(), 2);
        prop_assert_eq!(parsed[0].number().unwrap(), x as f64);
        prop_assert_eq!(parsed[1].number().unwrap(), y as f64);
    }

    #[test]
    fn prop_rapid_moves_omit_zero_axes(x in -100.0f64..100.0) {
        let line = Motion::rapid().x_nonzero(x).y_nonzero(0.0).to_string();
        prop_assert!(!line.contains('Y'));
        prop_assert!(line.starts_with("G00"));
    }
}
