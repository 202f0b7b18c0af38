use errors::BuildTriggerError;

/// Anything that can ask a remote build service to start a build. The
/// scheduler drives this; the Jenkins client implements it.
pub trait BuildTrigger {
    fn track_label(&self) -> &str;

    /// Returns once the remote service has acknowledged the trigger request.
    /// Acceptance only: the triggered build may still be queued or running.
    fn start_build(&self, project_name: &str, commit_id: &str) -> Result<(), BuildTriggerError>;
}
