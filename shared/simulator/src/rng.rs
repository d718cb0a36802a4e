pub use rand_chacha::ChaCha8Rng as SeededRng;

/// Random stream for one scenario run. Different scenarios given the same
/// seed draw unrelated streams.
pub fn new_rng(scenario_name: &str, seed: u32) -> SeededRng {
    rand_seeder::Seeder::from((scenario_name, seed)).make_rng()
}
