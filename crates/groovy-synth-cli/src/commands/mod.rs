pub mod synth;

#[cfg(test)]
mod synth_tests;
