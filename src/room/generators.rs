use rand::{distr::Alphanumeric, Rng};

/// Length of generated player ids
pub const PLAYER_ID_LENGTH: usize = 8;

/// Trait for generating player ids
pub trait PlayerIdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random alphanumeric player id generator
pub struct RandomPlayerIdGenerator {
    length: usize,
}

impl RandomPlayerIdGenerator {
    pub fn new() -> Self {
        Self {
            length: PLAYER_ID_LENGTH,
        }
    }
}

impl Default for RandomPlayerIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerIdGenerator for RandomPlayerIdGenerator {
    fn generate(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_player_id_format() {
        let generator = RandomPlayerIdGenerator::new();
        let id = generator.generate();

        assert_eq!(id.len(), PLAYER_ID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_random_player_ids_are_distinct() {
        let generator = RandomPlayerIdGenerator::new();
        let ids: HashSet<String> = (0..100).map(|_| generator.generate()).collect();

        // 62^8 possibilities, a collision here means the generator is broken
        assert_eq!(ids.len(), 100);
    }
}
