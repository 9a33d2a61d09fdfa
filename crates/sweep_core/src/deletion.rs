/// Counters of a running removal job after its latest step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeletionProgress {
    pub cursor: usize,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl DeletionProgress {
    pub fn starting(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Whole-number percentage for progress bars.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.cursor.min(self.total) * 100) / self.total) as u8
    }
}

/// Final tally of a removal job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub total: usize,
    /// Items processed before the job ended; below `total` only when cancelled.
    pub cursor: usize,
    pub cancelled: bool,
}
