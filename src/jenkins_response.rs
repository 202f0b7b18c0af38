use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Deserialize)]
pub struct JenkinsBuildsResponse {
    #[serde(default)]
    pub builds: Vec<JenkinsBuildRecord>,
}

#[derive(Deserialize)]
pub struct JenkinsQueueResponse {
    #[serde(default)]
    pub items: Vec<JenkinsBuildRecord>,
}

/// One raw build record as Jenkins returns it. Queue items reuse the same
/// shape but carry neither a result nor a description.
#[derive(Deserialize)]
pub struct JenkinsBuildRecord {
    #[serde(default)]
    pub result: BuildResult,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub actions: Vec<JenkinsAction>,
}

#[derive(Deserialize)]
pub struct JenkinsAction {
    #[serde(default)]
    pub parameters: Vec<JenkinsParameter>,
}

#[derive(Deserialize)]
pub struct JenkinsParameter {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// Outcome of a single build. Jenkins reports `null` until the build reaches
/// a terminal state.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "Option<String>")]
pub enum BuildResult {
    InProgress,
    Success,
    Failure,
    Other(String),
}

impl Default for BuildResult {
    fn default() -> BuildResult {
        BuildResult::InProgress
    }
}

impl From<Option<String>> for BuildResult {
    fn from(raw: Option<String>) -> BuildResult {
        match raw {
            None => BuildResult::InProgress,
            Some(text) => match text.as_str() {
                "SUCCESS" => BuildResult::Success,
                "FAILURE" => BuildResult::Failure,
                _ => BuildResult::Other(text),
            },
        }
    }
}

/// Immutable view of one build, with the nested `actions[].parameters[]`
/// structure flattened into a name-to-value map.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildStatus {
    pub result: BuildResult,
    pub description: Option<String>,
    pub parameters: BTreeMap<String, String>,
}

impl From<JenkinsBuildRecord> for BuildStatus {
    fn from(record: JenkinsBuildRecord) -> BuildStatus {
        let parameters = record
            .actions
            .into_iter()
            .flat_map(|action| action.parameters)
            .map(|parameter| (parameter.name, parameter_value(parameter.value)))
            .collect();

        BuildStatus {
            result: record.result,
            description: record.description,
            parameters: parameters,
        }
    }
}

fn parameter_value(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json;

    #[test]
    fn terminal_results_map_to_tagged_outcomes() {
        assert_eq!(BuildResult::InProgress, BuildResult::from(None));
        assert_eq!(
            BuildResult::Success,
            BuildResult::from(Some("SUCCESS".to_string()))
        );
        assert_eq!(
            BuildResult::Failure,
            BuildResult::from(Some("FAILURE".to_string()))
        );
        assert_eq!(
            BuildResult::Other("ABORTED".to_string()),
            BuildResult::from(Some("ABORTED".to_string()))
        );
    }

    #[test]
    fn a_build_record_flattens_action_parameters() {
        let payload = r#"{
            "result": null,
            "description": "release candidate",
            "actions": [
                {"parameters": [
                    {"name": "ARTIFACT_NAME", "value": "service-api"},
                    {"name": "DRY_RUN", "value": false}
                ]},
                {},
                {"parameters": [{"name": "GIT_COMMIT_ID", "value": "4f9a01c"}]}
            ]
        }"#;

        let record = serde_json::from_str::<JenkinsBuildRecord>(payload).unwrap();
        let status = BuildStatus::from(record);

        assert_eq!(BuildResult::InProgress, status.result);
        assert_eq!(Some("release candidate".to_string()), status.description);
        assert_eq!("service-api", status.parameters["ARTIFACT_NAME"]);
        assert_eq!("false", status.parameters["DRY_RUN"]);
        assert_eq!("4f9a01c", status.parameters["GIT_COMMIT_ID"]);
    }

    #[test]
    fn queue_items_parse_without_result_or_description() {
        let payload = r#"{"items": [
            {"actions": [{"parameters": [{"name": "ARTIFACT_NAME", "value": "service-api"}]}]},
            {"actions": []}
        ]}"#;

        let response = serde_json::from_str::<JenkinsQueueResponse>(payload).unwrap();

        assert_eq!(2, response.items.len());
        assert_eq!(BuildResult::InProgress, response.items[0].result);
        assert_eq!(None, response.items[0].description);
    }
}
