/// A status or queue query failed at the transport level, returned a non-200
/// code, or produced a payload we could not read.
#[derive(Debug, Fail)]
#[fail(
    display = "[{}] The request to get the {} on \"{}\" has failed: {}",
    track, resource, url, message
)]
pub struct RequestError {
    pub track: String,
    pub resource: &'static str,
    pub url: String,
    pub message: String,
}

/// The remote service did not accept a trigger request.
#[derive(Debug, Fail)]
#[fail(
    display = "[{}] Could not start build for \"{}\" with commit sha \"{}\": {}",
    track, project_name, commit_id, message
)]
pub struct BuildTriggerError {
    pub track: String,
    pub project_name: String,
    pub commit_id: String,
    pub message: String,
}
