use crate::directory::DirectoryConfig;
use crate::list::{Consultation, ListOptions, Sort};
use crate::prelude::{eprintln, *};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{text_result, JsonRpcError, INTERNAL_ERROR, INVALID_PARAMS};

fn parse_args<T: DeserializeOwned>(arguments: Option<serde_json::Value>) -> Result<T, JsonRpcError> {
    let value = match arguments {
        Some(serde_json::Value::Null) | None => serde_json::json!({}),
        Some(value) => value,
    };
    serde_json::from_value(value)
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid arguments: {e}")))
}

fn execution_error(e: color_eyre::eyre::Report) -> JsonRpcError {
    JsonRpcError::new(INTERNAL_ERROR, format!("Tool execution error: {e}"))
}

#[derive(Debug, Default, Deserialize)]
struct DoctorsListArgs {
    search: Option<String>,
    consultation: Option<Consultation>,
    #[serde(default)]
    specialty: Vec<String>,
    sort: Option<Sort>,
    query: Option<String>,
}

impl From<DoctorsListArgs> for ListOptions {
    fn from(args: DoctorsListArgs) -> Self {
        ListOptions {
            search: args.search,
            consultation: args.consultation,
            specialties: args.specialty,
            sort: args.sort,
            query: args.query,
            json: true,
        }
    }
}

pub async fn handle_doctors_list(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: DoctorsListArgs = parse_args(arguments)?;
    let filters = ListOptions::from(args).filters();

    if global.verbose {
        eprintln!("Calling doctors_list: ?{}", docfinder_core::query::encode(&filters));
    }

    let listing = crate::list::list_doctors_data(&DirectoryConfig::from_global(global), &filters)
        .await
        .map_err(execution_error)?;

    text_result(&listing)
}

pub async fn handle_doctors_specialties(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct DoctorsSpecialtiesArgs {
        #[serde(default)]
        filter: String,
    }

    let args: DoctorsSpecialtiesArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling doctors_specialties: filter={:?}", args.filter);
    }

    let output =
        crate::specialties::specialties_data(&DirectoryConfig::from_global(global), &args.filter)
            .await
            .map_err(execution_error)?;

    text_result(&output)
}

pub async fn handle_doctors_suggest(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct DoctorsSuggestArgs {
        term: String,
    }

    let args: DoctorsSuggestArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling doctors_suggest: term={:?}", args.term);
    }

    let output = crate::suggest::suggest_data(&DirectoryConfig::from_global(global), args.term)
        .await
        .map_err(execution_error)?;

    text_result(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docfinder_core::filter::{ConsultationType, SortKey};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn directory_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doctors.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": "1",
                    "name": "Dr. Anand Rao",
                    "fees": "₹ 700",
                    "experience": "12 Years of experience",
                    "video_consult": true,
                    "in_clinic": false,
                    "specialities": [{ "name": "ENT" }]
                },
                {
                    "id": "2",
                    "name": "Dr. Ananya Iyer",
                    "fees": "₹ 300",
                    "experience": "4 Years of experience",
                    "video_consult": false,
                    "in_clinic": true,
                    "specialities": [{ "name": "Dentist" }, { "name": "ENT" }]
                }
            ])))
            .mount(&server)
            .await;
        server
    }

    fn global_for(server: &MockServer) -> crate::Global {
        crate::Global {
            url: format!("{}/doctors.json", server.uri()),
            verbose: false,
        }
    }

    fn text_of(result: &serde_json::Value) -> serde_json::Value {
        let text = result["content"][0]["text"].as_str().unwrap();
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_list_args_override_query() {
        let args: DoctorsListArgs = parse_args(Some(serde_json::json!({
            "query": "search=rao&sort=experience",
            "consultation": "clinic",
            "sort": "fees",
            "specialty": ["Dentist"]
        })))
        .unwrap();

        let filters = ListOptions::from(args).filters();

        assert_eq!(filters.search, "rao");
        assert_eq!(filters.consultation, ConsultationType::InClinic);
        assert_eq!(filters.sort, SortKey::Fees);
        assert!(filters.specialties.contains("Dentist"));
    }

    #[test]
    fn test_missing_arguments_default() {
        let args: DoctorsListArgs = parse_args(None).unwrap();
        assert!(!ListOptions::from(args).filters().is_active());
    }

    #[test]
    fn test_invalid_arguments() {
        let err = parse_args::<DoctorsListArgs>(Some(serde_json::json!({ "sort": "rating" })))
            .unwrap_err();
        assert_eq!(err.code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_doctors_list() {
        let server = directory_server().await;
        let result = handle_doctors_list(
            Some(serde_json::json!({ "specialty": ["ENT"], "sort": "fees" })),
            &global_for(&server),
        )
        .await
        .unwrap();

        let listing = text_of(&result);
        assert_eq!(listing["visible_count"], 2);
        assert_eq!(listing["doctors"][0]["name"], "Dr. Ananya Iyer");
        assert_eq!(listing["query"], "specialty=ENT&sort=fees");
    }

    #[tokio::test]
    async fn test_doctors_suggest() {
        let server = directory_server().await;
        let result = handle_doctors_suggest(
            Some(serde_json::json!({ "term": "anan" })),
            &global_for(&server),
        )
        .await
        .unwrap();

        assert_eq!(
            text_of(&result)["suggestions"],
            serde_json::json!(["Dr. Anand Rao", "Dr. Ananya Iyer"])
        );
    }

    #[tokio::test]
    async fn test_doctors_specialties() {
        let server = directory_server().await;
        let result = handle_doctors_specialties(None, &global_for(&server))
            .await
            .unwrap();

        let output = text_of(&result);
        assert_eq!(output["total"], 2);
        assert_eq!(output["specialties"][1]["name"], "ENT");
        assert_eq!(output["specialties"][1]["doctors"], 2);
    }

    #[tokio::test]
    async fn test_load_failure_is_tool_error() {
        let global = crate::Global {
            url: "http://127.0.0.1:9/doctors.json".to_string(),
            verbose: false,
        };
        let err = handle_doctors_suggest(Some(serde_json::json!({ "term": "a" })), &global)
            .await
            .unwrap_err();

        assert_eq!(err.code, INTERNAL_ERROR);
        assert!(err.message.contains("Network error"));
    }
}
