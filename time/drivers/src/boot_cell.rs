// Licensed under the Apache-2.0 license

use core::cell::OnceCell;

use crate::error::{TimeError, TimeResult};

/// Write-once holder for boot-time state of one core.
///
/// Filled exactly once during boot, before interrupts are enabled, and only
/// read afterwards.
pub struct BootCell<T> {
    cell: OnceCell<T>,
}

// Safety: the only write happens in `init`, whose contract excludes any
// concurrent access. Afterwards the value is immutable.
unsafe impl<T: Send + Sync> Sync for BootCell<T> {}

impl<T> BootCell<T> {
    pub const fn new() -> Self {
        BootCell {
            cell: OnceCell::new(),
        }
    }

    /// Store `value`. A second call fails with `AlreadyInitialized` and
    /// leaves the first value in place.
    ///
    /// # Safety
    ///
    /// Must run on the owning core with interrupts disabled, and no other
    /// context may access the cell while it runs.
    pub unsafe fn init(&self, value: T) -> TimeResult<&T> {
        self.cell
            .set(value)
            .map_err(|_| TimeError::AlreadyInitialized)?;
        self.get()
    }

    pub fn get(&self) -> TimeResult<&T> {
        self.cell.get().ok_or(TimeError::NotInitialized)
    }
}

impl<T> Default for BootCell<T> {
    fn default() -> Self {
        Self::new()
    }
}
