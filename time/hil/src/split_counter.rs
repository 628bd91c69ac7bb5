// Licensed under the Apache-2.0 license

// Hardware Interface Layer trait for 64-bit counters exposed as two 32-bit words
//
// Some SoC timers cannot be read atomically: the low and high halves live in
// separate registers and the low half can carry into the high half between
// the two reads.
pub trait SplitCounter {
    // Read the upper 32 bits of the counter
    fn high(&self) -> u32;

    // Read the lower 32 bits of the counter
    fn low(&self) -> u32;
}
