use sha2::{Digest, Sha256};

/// Hex SHA-256 digest of `input`, used as the stable identity of a
/// catalog entry. Deterministic and position-independent; collisions are
/// possible in principle, just negligibly likely for playlist-sized
/// catalogs, so callers must not treat distinctness as a hard invariant.
pub fn generate(input: &str) -> String {
    Sha256::digest(input.as_bytes())
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// Digest of an integer, via its decimal representation.
pub fn generate_number(input: u64) -> String {
    generate(&input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_vector() {
        assert_eq!(
            generate("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(generate("01 Intro.mp3"), generate("01 Intro.mp3"));
    }

    #[test]
    fn differs_for_different_inputs() {
        assert_ne!(generate("01 Intro.mp3"), generate("02 Intro.mp3"));
    }

    #[test]
    fn number_overload_uses_decimal_form() {
        assert_eq!(generate_number(42), generate("42"));
    }
}
