use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashSet;

const SEED_LEN: usize = 6;

/// Sequential ID generator for element nodes within one editing session
///
/// Ids look like `el-<seed>-<n>`. Ids handed to [`IdGenerator::reserve`]
/// (for example, ids of a loaded document) are never produced.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
    reserved: HashSet<String>,
}

impl IdGenerator {
    /// Generator with a random session seed
    pub fn new() -> Self {
        let seed: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SEED_LEN)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();
        Self::from_seed(seed)
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
            reserved: HashSet::new(),
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        loop {
            self.count += 1;
            let id = format!("el-{}-{}", self.seed, self.count);
            if !self.reserved.contains(&id) {
                return id;
            }
        }
    }

    /// Mark ids as taken so they are skipped by [`IdGenerator::new_id`]
    pub fn reserve<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(ids.into_iter().map(Into::into));
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::from_seed("abc");

        assert_eq!(gen.new_id(), "el-abc-1");
        assert_eq!(gen.new_id(), "el-abc-2");
        assert_eq!(gen.new_id(), "el-abc-3");
        assert_eq!(gen.seed(), "abc");
    }

    #[test]
    fn test_random_seeds_differ() {
        let a = IdGenerator::new();
        let b = IdGenerator::new();

        assert_eq!(a.seed().len(), SEED_LEN);
        assert!(a.seed().chars().all(|c| !c.is_ascii_uppercase()));
        // 36^6 possibilities, a clash here means the seed is not random
        assert_ne!(a.seed(), b.seed());
    }

    #[test]
    fn test_reserved_ids_are_skipped() {
        let mut gen = IdGenerator::from_seed("s");
        gen.reserve(["el-s-1", "el-s-2"]);

        assert_eq!(gen.new_id(), "el-s-3");
        assert_eq!(gen.new_id(), "el-s-4");
    }
}
