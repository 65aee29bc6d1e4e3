pub mod test_suite_minimization;
pub use test_suite_minimization as tsm;
