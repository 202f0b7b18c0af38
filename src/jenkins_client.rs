use build_trigger::BuildTrigger;
use errors::{BuildTriggerError, RequestError};
use jenkins_response::{BuildResult, BuildStatus, JenkinsBuildsResponse, JenkinsQueueResponse};
use network::{get_url_response, post_url_response, BasicCredentials};
use std::sync::{Mutex, MutexGuard};

const STATUS_TREE_FILTER: &str = "tree=builds[result,description,actions[parameters[name,value]]]";

/// The two release pipelines. Each has its own job endpoint and trigger
/// parameter schema.
pub enum ReleaseTrack {
    Internal,
    Open { release_type: Option<String> },
}

impl ReleaseTrack {
    pub fn label(&self) -> &'static str {
        match *self {
            ReleaseTrack::Internal => "internal",
            ReleaseTrack::Open { .. } => "open",
        }
    }

    pub fn job_name(&self) -> &'static str {
        match *self {
            ReleaseTrack::Internal => "create-an-internal-release",
            ReleaseTrack::Open { .. } => "create-a-release",
        }
    }

    fn build_params(&self, project_name: &str, commit_id: &str) -> Vec<(&'static str, String)> {
        match *self {
            ReleaseTrack::Internal => vec![
                ("ARTIFACT_NAME", project_name.to_string()),
                ("GIT_COMMIT_ID", commit_id.to_string()),
            ],
            ReleaseTrack::Open { ref release_type } => {
                let mut params = vec![
                    ("ARTIFACT_NAME", project_name.to_string()),
                    ("RELEASE_CANDIDATE_VERSION", commit_id.to_string()),
                ];
                if let Some(ref release_type) = *release_type {
                    params.push(("RELEASE_TYPE", release_type.clone()));
                }
                params
            }
        }
    }
}

/// One authenticated connection to a track's Jenkins server. Status and
/// queue queries fill write-once caches: the first successful query wins and
/// every later call answers from memory without touching the network.
pub struct JenkinsClient {
    track: ReleaseTrack,
    base_url: String,
    credentials: BasicCredentials,
    current_build_status_cache: Mutex<Option<Vec<BuildStatus>>>,
    build_queue_cache: Mutex<Option<Vec<BuildStatus>>>,
}

impl JenkinsClient {
    pub fn new(track: ReleaseTrack, base_url: &str, username: &str, api_token: &str) -> JenkinsClient {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        JenkinsClient {
            track: track,
            base_url: base_url,
            credentials: BasicCredentials {
                username: username.to_string(),
                api_token: api_token.to_string(),
            },
            current_build_status_cache: Mutex::new(None),
            build_queue_cache: Mutex::new(None),
        }
    }

    /// Builds still in progress on this track's release job.
    pub fn current_build_status(&self) -> Result<Vec<BuildStatus>, RequestError> {
        info!(
            "[{}] Getting current build status on \"{}\".",
            self.track.label(),
            self.base_url
        );

        let mut cache = lock_cache(&self.current_build_status_cache);
        if let Some(ref cached) = *cache {
            return Ok(cached.clone());
        }

        let url_string = format!(
            "{base}job/{job}/api/json?{tree}",
            base = self.base_url,
            job = self.track.job_name(),
            tree = STATUS_TREE_FILTER
        );
        match get_url_response::<JenkinsBuildsResponse>(&url_string, &self.credentials) {
            Ok(response) => {
                info!("[{}] Success.", self.track.label());
                let builds_in_progress: Vec<BuildStatus> = response
                    .builds
                    .into_iter()
                    .filter(|build| build.result == BuildResult::InProgress)
                    .map(BuildStatus::from)
                    .collect();
                *cache = Some(builds_in_progress.clone());
                Ok(builds_in_progress)
            }
            Err(e) => {
                let error = RequestError {
                    track: self.track.label().to_string(),
                    resource: "current build status",
                    url: url_string,
                    message: e.to_string(),
                };
                warn!("{}", error);
                Err(error)
            }
        }
    }

    /// Everything waiting in the server's build queue, all tracks' jobs
    /// included; Jenkins exposes a single queue per server.
    pub fn queued_builds(&self) -> Result<Vec<BuildStatus>, RequestError> {
        info!(
            "[{}] Getting builds queue on \"{}\".",
            self.track.label(),
            self.base_url
        );

        let mut cache = lock_cache(&self.build_queue_cache);
        if let Some(ref cached) = *cache {
            return Ok(cached.clone());
        }

        let url_string = format!("{base}queue/api/json", base = self.base_url);
        match get_url_response::<JenkinsQueueResponse>(&url_string, &self.credentials) {
            Ok(response) => {
                info!("[{}] Success.", self.track.label());
                let queued: Vec<BuildStatus> =
                    response.items.into_iter().map(BuildStatus::from).collect();
                *cache = Some(queued.clone());
                Ok(queued)
            }
            Err(e) => {
                let error = RequestError {
                    track: self.track.label().to_string(),
                    resource: "builds queue",
                    url: url_string,
                    message: e.to_string(),
                };
                warn!("{}", error);
                Err(error)
            }
        }
    }
}

impl BuildTrigger for JenkinsClient {
    fn track_label(&self) -> &str {
        self.track.label()
    }

    fn start_build(&self, project_name: &str, commit_id: &str) -> Result<(), BuildTriggerError> {
        info!(
            "[{}] Starting the build for \"{}\" with commit sha \"{}\".",
            self.track.label(),
            project_name,
            commit_id
        );

        let url_string = format!(
            "{base}job/{job}/buildWithParameters",
            base = self.base_url,
            job = self.track.job_name()
        );
        let params = self.track.build_params(project_name, commit_id);
        match post_url_response(&url_string, &params, &self.credentials) {
            Ok(()) => {
                info!("[{}] Success.", self.track.label());
                Ok(())
            }
            Err(e) => {
                let error = BuildTriggerError {
                    track: self.track.label().to_string(),
                    project_name: project_name.to_string(),
                    commit_id: commit_id.to_string(),
                    message: e.to_string(),
                };
                warn!("{}", error);
                Err(error)
            }
        }
    }
}

fn lock_cache(cache: &Mutex<Option<Vec<BuildStatus>>>) -> MutexGuard<Option<Vec<BuildStatus>>> {
    match cache.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
