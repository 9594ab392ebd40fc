//! Tests for the secure passcode generator

use std::collections::HashSet;

use crate::errors::DomainError;
use crate::services::verification::{CodeGenerator, SecureCodeGenerator};

#[test]
fn test_generates_requested_length_digits_only() {
    for length in 4..=10 {
        let generator = SecureCodeGenerator::new(length).unwrap();
        assert_eq!(generator.code_length(), length);
        for _ in 0..50 {
            let code = generator.generate();
            assert_eq!(code.len(), length);
            assert!(code.chars().all(|c| c.is_ascii_digit()), "non-digit in {}", code);
        }
    }
}

#[test]
fn test_rejects_out_of_range_length() {
    for length in [0, 3, 11, 32] {
        match SecureCodeGenerator::new(length) {
            Err(DomainError::Configuration { message }) => {
                assert!(message.contains(&length.to_string()));
            }
            other => panic!("expected configuration error for {}, got {:?}", length, other.map(|_| ())),
        }
    }
}

#[test]
fn test_digit_distribution_is_uniform() {
    let generator = SecureCodeGenerator::new(6).unwrap();
    let mut counts = [0u64; 10];
    let samples = 10_000;

    for _ in 0..samples {
        for c in generator.generate().bytes() {
            counts[(c - b'0') as usize] += 1;
        }
    }

    let total: u64 = counts.iter().sum();
    let expected = total as f64 / 10.0;
    let chi_square: f64 = counts
        .iter()
        .map(|&observed| {
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum();

    // df = 9, p = 0.0001
    assert!(chi_square < 33.72, "chi-square {} too large: {:?}", chi_square, counts);
    assert!(counts.iter().all(|&c| c > 0));
}

#[test]
fn test_codes_do_not_repeat_in_sequence() {
    let generator = SecureCodeGenerator::new(6).unwrap();
    let codes: Vec<String> = (0..1_000).map(|_| generator.generate()).collect();

    let consecutive_repeats = codes.windows(2).filter(|pair| pair[0] == pair[1]).count();
    assert!(consecutive_repeats <= 3);

    let unique: HashSet<&String> = codes.iter().collect();
    assert!(codes.len() - unique.len() < 100);
}

#[test]
fn test_leading_zeros_are_kept() {
    let generator = SecureCodeGenerator::new(4).unwrap();
    let found = (0..20_000).map(|_| generator.generate()).any(|code| code.starts_with('0'));
    assert!(found);
}
