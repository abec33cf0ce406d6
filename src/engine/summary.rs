use crate::types::CommandOutcome;

/// What happened to one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Finished(CommandOutcome),
    /// Never started: dispatch was stopped by the `abort` policy first.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub index: usize,
    pub cmd: String,
    pub status: JobStatus,
}

impl JobReport {
    pub fn failure_code(&self) -> Option<i32> {
        match self.status {
            JobStatus::Finished(CommandOutcome::Failed(code)) => Some(code),
            _ => None,
        }
    }
}

/// Per-job results of a run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub jobs: Vec<JobReport>,
}

impl RunSummary {
    pub fn attempted(&self) -> usize {
        self.jobs
            .iter()
            .filter(|j| matches!(j.status, JobStatus::Finished(_)))
            .count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &JobReport> {
        self.jobs.iter().filter(|j| j.failure_code().is_some())
    }

    pub fn skipped(&self) -> usize {
        self.jobs
            .iter()
            .filter(|j| j.status == JobStatus::Skipped)
            .count()
    }

    /// First failing job in input order.
    pub fn first_failure(&self) -> Option<&JobReport> {
        self.failed().next()
    }

    pub fn all_succeeded(&self) -> bool {
        self.jobs
            .iter()
            .all(|j| j.status == JobStatus::Finished(CommandOutcome::Success))
    }
}
