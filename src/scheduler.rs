use build_trigger::BuildTrigger;
use errors::BuildTriggerError;
use failure::Error;
use std::thread;

/// Ordered work for one track: `commit_lists[i]` holds the commits to build
/// for `projects[i]`.
pub struct TrackSchedule {
    projects: Vec<String>,
    commit_lists: Vec<Vec<String>>,
}

impl TrackSchedule {
    pub fn new(projects: Vec<String>, commit_lists: Vec<Vec<String>>) -> Result<TrackSchedule, Error> {
        if projects.len() != commit_lists.len() {
            return Err(format_err!(
                "Mismatched schedule: {} project(s) but {} commit list(s).",
                projects.len(),
                commit_lists.len()
            ));
        }

        Ok(TrackSchedule {
            projects: projects,
            commit_lists: commit_lists,
        })
    }
}

pub struct ScheduleOutcome {
    pub internal: Result<usize, BuildTriggerError>,
    pub open: Result<usize, BuildTriggerError>,
}

impl ScheduleOutcome {
    pub fn all_triggered(&self) -> bool {
        self.internal.is_ok() && self.open.is_ok()
    }
}

/// Drives both tracks to completion. Each track runs on its own thread and
/// issues one trigger request at a time; a failed trigger halts that track
/// and leaves the other one running.
pub fn schedule_builds<A, B>(
    internal_client: A,
    internal_schedule: TrackSchedule,
    open_client: B,
    open_schedule: TrackSchedule,
) -> ScheduleOutcome
where
    A: BuildTrigger + Send + 'static,
    B: BuildTrigger + Send + 'static,
{
    let internal_handle = thread::spawn(move || run_track(&internal_client, &internal_schedule));
    let open_handle = thread::spawn(move || run_track(&open_client, &open_schedule));

    ScheduleOutcome {
        internal: internal_handle
            .join()
            .expect("Unable to join the internal track thread."),
        open: open_handle
            .join()
            .expect("Unable to join the open track thread."),
    }
}

/// Sequential cursor walk over one track. The blocking `start_build` call is
/// the acknowledgment gate: the next trigger is not issued until the remote
/// service has answered the previous one.
fn run_track<T: BuildTrigger>(
    client: &T,
    schedule: &TrackSchedule,
) -> Result<usize, BuildTriggerError> {
    let mut project_index = 0;
    let mut commit_index = 0;
    let mut triggered = 0;

    while project_index < schedule.projects.len() {
        let commits = &schedule.commit_lists[project_index];
        if commit_index >= commits.len() {
            project_index += 1;
            commit_index = 0;
            continue;
        }

        let project_name = &schedule.projects[project_index];
        let commit_id = &commits[commit_index];
        commit_index += 1;

        client.start_build(project_name, commit_id)?;
        triggered += 1;
    }

    info!(
        "[{}] All builds triggered, {} in total.",
        client.track_label(),
        triggered
    );
    Ok(triggered)
}
