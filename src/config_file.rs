use failure::Error;
use std::fs;
use std::path::Path;
use toml;

#[derive(Deserialize)]
pub struct Config {
    pub ci_build_username: String,
    pub ci_build_api_token: String,
    pub ci_build_api_url: String,

    pub ci_open_username: String,
    pub ci_open_api_token: String,
    pub ci_open_api_url: String,

    pub ci_dev_projects: Vec<String>,
    pub ci_dev_project_commits: Vec<Vec<String>>,

    pub ci_open_projects: Vec<String>,
    pub ci_open_project_commits: Vec<Vec<String>>,

    // When set, open-track triggers carry a fixed RELEASE_TYPE parameter.
    pub ci_open_release_type: Option<String>,
}

pub fn load_config(path: &Path) -> Result<Config, Error> {
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str::<Config>(&contents)?;
    Ok(config)
}
