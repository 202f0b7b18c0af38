#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate failure;

#[macro_use]
extern crate log;

extern crate log4rs;
extern crate reqwest;
extern crate serde;
extern crate serde_json;
extern crate toml;

mod build_trigger;
mod config_file;
mod errors;
mod jenkins_client;
mod jenkins_response;
mod network;
mod scheduler;

use build_trigger::BuildTrigger;
use jenkins_client::{JenkinsClient, ReleaseTrack};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use scheduler::{schedule_builds, TrackSchedule};
use std::path::Path;
use std::process;

const CONFIG_FILE_NAME: &str = "config.toml";

fn main() {
    init_logging();

    let config = match config_file::load_config(Path::new(CONFIG_FILE_NAME)) {
        Ok(config) => config,
        Err(e) => {
            error!("Unable to read {}: {}", CONFIG_FILE_NAME, e);
            process::exit(1);
        }
    };

    let internal_client = JenkinsClient::new(
        ReleaseTrack::Internal,
        &config.ci_build_api_url,
        &config.ci_build_username,
        &config.ci_build_api_token,
    );
    let open_client = JenkinsClient::new(
        ReleaseTrack::Open {
            release_type: config.ci_open_release_type.clone(),
        },
        &config.ci_open_api_url,
        &config.ci_open_username,
        &config.ci_open_api_token,
    );

    report_track_status(&internal_client);
    report_track_status(&open_client);

    let internal_schedule =
        match TrackSchedule::new(config.ci_dev_projects, config.ci_dev_project_commits) {
            Ok(schedule) => schedule,
            Err(e) => {
                error!("Invalid internal track schedule: {}", e);
                process::exit(1);
            }
        };
    let open_schedule =
        match TrackSchedule::new(config.ci_open_projects, config.ci_open_project_commits) {
            Ok(schedule) => schedule,
            Err(e) => {
                error!("Invalid open track schedule: {}", e);
                process::exit(1);
            }
        };

    let outcome = schedule_builds(internal_client, internal_schedule, open_client, open_schedule);
    if !outcome.all_triggered() {
        error!("Build scheduling did not finish cleanly on every track.");
        process::exit(1);
    }
}

fn report_track_status(client: &JenkinsClient) {
    match client.current_build_status() {
        Ok(builds) => {
            info!(
                "[{}] {} build(s) currently in progress.",
                client.track_label(),
                builds.len()
            );
            for build in &builds {
                if let Some(ref description) = build.description {
                    info!("[{}] In progress: {}", client.track_label(), description);
                }
            }
        }
        Err(e) => warn!("{}", e),
    }

    match client.queued_builds() {
        Ok(queued) => {
            info!(
                "[{}] {} build(s) waiting in the queue.",
                client.track_label(),
                queued.len()
            );
            for queued_build in &queued {
                if let Some(artifact) = queued_build.parameters.get("ARTIFACT_NAME") {
                    info!("[{}] Queued: {}", client.track_label(), artifact);
                }
            }
        }
        Err(e) => warn!("{}", e),
    }
}

fn init_logging() {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {m}{n}",
        )))
        .build();

    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info));

    match log_config {
        Ok(log_config) => {
            if let Err(e) = log4rs::init_config(log_config) {
                eprintln!("Unable to initialize logging: {}", e);
            }
        }
        Err(e) => eprintln!("Unable to build the logging configuration: {}", e),
    }
}
