use ahash::RandomState;
pub fn seeded_hasher(seed: u64) -> RandomState {
    let seed1 = seed;
    let seed2 = seed.rotate_left(16) ^ 0x9e37_79b9_7f4a_7c15;
    let seed3 = seed.rotate_left(32) ^ 0xbf58_476d_1ce4_e5b9;
    let seed4 = seed.rotate_left(48) ^ 0x94d0_49bb_1331_11eb;
    RandomState::with_seeds(seed1, seed2, seed3, seed4)
}
pub(crate) type HashSet<T> = std::collections::HashSet<T, RandomState>;

pub mod grasp;
pub use grasp::{Construction, GraspResult, GraspSolver, SolverError};
