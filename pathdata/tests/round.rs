use pathdata::{parse, round_path_data, round_path_data_with, CommandKind, WriteOptions};

// Real-world icon paths with packed arc flags.
const SAMPLES: &[&str] = &[
    "M0 0 a22 22 0 012-3.9",
    "M12 2a10 10 0 110 20 10 10 0 010-20z",
    "M21.44 11.05l-9.19 9.19a6 6 0 01-8.49-8.49l9.19-9.19a4 4 0 015.66 5.66l-9.2 9.19a2 2 0 01-2.83-2.83l8.49-8.48",
    "M18.36 6.64a9 9 0 11-12.73 0",
    "M10.29 3.86L1.82 18a2 2 0 001.71 3h16.94a2 2 0 001.71-3L13.71 3.86a2 2 0 00-3.42 0z",
    "M3.5 7.5A4.125 4.125 12.5 1 0 7.6666 3.3333a.5.5 0 1 1-.75.75",
    "M 1 1 A 0.3333 0.6666 -45.55 0 1 -2.5e-1 3.75e1",
    "m5.5,5.5,a1.999,1.999,0,1,0,-3.998,0,1.999,1.999,0,0,1,3.998,0",
];

fn arc_flags(text: &str) -> Vec<(bool, bool)> {
    parse(text)
        .unwrap()
        .iter()
        .filter(|cmd| cmd.kind() == CommandKind::Arc)
        .map(|cmd| cmd.arc_flags().unwrap())
        .collect()
}

#[test]
fn arc_flags_survive_rounding() {
    for text in SAMPLES {
        let expected = arc_flags(text);
        assert!(!expected.is_empty());

        for decimals in 0..=6 {
            let rounded = round_path_data(text, decimals);
            assert_eq!(arc_flags(&rounded), expected, "{} at {}", rounded, decimals);
        }
    }
}

#[test]
fn arc_flags_survive_verbose_rounding() {
    let opt = WriteOptions {
        compact: false,
        remove_leading_zero: true,
    };

    for text in SAMPLES {
        let expected = arc_flags(text);
        for decimals in 0..=6 {
            let rounded = round_path_data_with(text, decimals, &opt);
            assert_eq!(arc_flags(&rounded), expected, "{} at {}", rounded, decimals);
        }
    }
}

#[test]
fn rounding_is_idempotent() {
    for text in SAMPLES {
        for decimals in 0..=6 {
            let once = round_path_data(text, decimals);
            let twice = round_path_data(&once, decimals);
            assert_eq!(once, twice);
        }
    }
}

#[test]
fn rounding_keeps_command_count() {
    for text in SAMPLES {
        let count = parse(text).unwrap().len();
        for decimals in 0..=6 {
            assert_eq!(parse(&round_path_data(text, decimals)).unwrap().len(), count);
        }
    }
}

#[test]
fn round_to_one_decimal() {
    assert_eq!(round_path_data("M0 0 a22 22 0 012-3.9", 1), "M0 0a22 22 0 012-3.9");
    assert_eq!(
        round_path_data("M18.36 6.64a9 9 0 11-12.73 0", 1),
        "M18.4 6.6a9 9 0 11-12.7 0"
    );
}

#[test]
fn empty_path() {
    assert_eq!(round_path_data("", 2), "");
}
