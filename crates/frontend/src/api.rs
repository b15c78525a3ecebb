use serde::{Deserialize, Serialize};

use atrium_shared::resolve::PlanZone;

#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

fn api_url() -> String {
    // In production, same origin. In dev, might be different.
    let window = web_sys::window().unwrap();
    let origin = window.location().origin().unwrap();
    format!("{}/graphql", origin)
}

async fn query<T: for<'de> Deserialize<'de>>(
    query_str: &str,
    variables: Option<serde_json::Value>,
) -> Result<T, String> {
    let req = GraphQLRequest {
        query: query_str.to_string(),
        variables,
    };

    let resp = reqwest::Client::new()
        .post(api_url())
        .json(&req)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let gql_resp: GraphQLResponse<T> = resp.json().await.map_err(|e| e.to_string())?;

    if let Some(errors) = gql_resp.errors {
        if !errors.is_empty() {
            return Err(errors[0].message.clone());
        }
    }

    gql_resp.data.ok_or_else(|| "No data returned".to_string())
}

// Types mirroring the GraphQL schema

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingData {
    pub id: String,
    pub name: String,
    pub plan_image: String,
    pub distribution_image: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentModelData {
    pub id: String,
    pub name: String,
    pub base_square_meters: Option<f64>,
    pub id_plan: String,
    pub primary_image: Option<String>,
    pub batch_images: Option<serde_json::Value>,
}

impl PlanZone for DepartmentModelData {
    fn zone_id(&self) -> &str {
        &self.id_plan
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitStateData {
    Available,
    Reserved,
    Sold,
}

impl UnitStateData {
    pub fn label(&self) -> &'static str {
        match self {
            UnitStateData::Available => "Available",
            UnitStateData::Reserved => "Reserved",
            UnitStateData::Sold => "Sold",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            UnitStateData::Available => "unit-available",
            UnitStateData::Reserved => "unit-reserved",
            UnitStateData::Sold => "unit-sold",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitData {
    pub id: String,
    pub unit_number: String,
    pub floor: i32,
    pub real_square_meters: Option<f64>,
    pub state: UnitStateData,
}

// API functions

#[derive(Deserialize)]
pub struct BuildingsResponse {
    pub buildings: Vec<BuildingData>,
}

pub async fn fetch_buildings() -> Result<Vec<BuildingData>, String> {
    let resp: BuildingsResponse = query(
        r#"query { buildings { id name planImage distributionImage address } }"#,
        None,
    )
    .await?;
    Ok(resp.buildings)
}

#[derive(Deserialize)]
pub struct BuildingResponse {
    pub building: Option<BuildingData>,
}

pub async fn fetch_building(id: &str) -> Result<Option<BuildingData>, String> {
    let variables = serde_json::json!({ "id": id });
    let resp: BuildingResponse = query(
        r#"query Building($id: ID!) {
            building(id: $id) { id name planImage distributionImage address }
        }"#,
        Some(variables),
    )
    .await?;
    Ok(resp.building)
}

#[derive(Deserialize)]
pub struct DepartmentModelsResponse {
    #[serde(rename = "departmentModels")]
    pub department_models: Vec<DepartmentModelData>,
}

pub async fn fetch_department_models(
    building_id: &str,
) -> Result<Vec<DepartmentModelData>, String> {
    let variables = serde_json::json!({ "buildingId": building_id });
    let resp: DepartmentModelsResponse = query(
        r#"query Models($buildingId: ID!) {
            departmentModels(buildingId: $buildingId) {
                id name baseSquareMeters idPlan primaryImage batchImages
            }
        }"#,
        Some(variables),
    )
    .await?;
    Ok(resp.department_models)
}

#[derive(Deserialize)]
pub struct UnitsResponse {
    pub units: Vec<UnitData>,
}

pub async fn fetch_units(building_id: &str) -> Result<Vec<UnitData>, String> {
    let variables = serde_json::json!({ "buildingId": building_id });
    let resp: UnitsResponse = query(
        r#"query Units($buildingId: ID!) {
            units(buildingId: $buildingId) {
                id unitNumber floor realSquareMeters state
            }
        }"#,
        Some(variables),
    )
    .await?;
    Ok(resp.units)
}

/// Fetch the raw text of a plan SVG. Non-2xx statuses are errors: an HTML
/// 404 page must never reach the SVG injection path.
pub async fn fetch_plan_document(url: &str) -> Result<String, String> {
    let resp = reqwest::Client::new()
        .get(url)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !resp.status().is_success() {
        return Err(format!("HTTP {}", resp.status()));
    }

    resp.text().await.map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- GraphQL request serialization ---

    #[test]
    fn test_graphql_request_serializes_with_variables() {
        let req = GraphQLRequest {
            query: "query { buildings { name } }".to_string(),
            variables: Some(serde_json::json!({"id": "abc"})),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["query"], "query { buildings { name } }");
        assert_eq!(json["variables"]["id"], "abc");
    }

    #[test]
    fn test_graphql_request_omits_null_variables() {
        let req = GraphQLRequest {
            query: "query { buildings { name } }".to_string(),
            variables: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("variables").is_none());
    }

    // --- Response deserialization ---

    #[test]
    fn test_buildings_response_deserializes() {
        let json = r#"{"buildings":[{"id":"b-1","name":"Torre Norte","planImage":"/static/norte.svg","distributionImage":null,"address":"Av. Central 120"}]}"#;
        let resp: BuildingsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.buildings.len(), 1);
        assert_eq!(resp.buildings[0].name, "Torre Norte");
        assert_eq!(resp.buildings[0].plan_image, "/static/norte.svg");
        assert!(resp.buildings[0].distribution_image.is_none());
    }

    #[test]
    fn test_building_null_deserializes() {
        let json = r#"{"building":null}"#;
        let resp: BuildingResponse = serde_json::from_str(json).unwrap();
        assert!(resp.building.is_none());
    }

    #[test]
    fn test_department_models_deserialize_string_gallery() {
        // batchImages arrives as a JSON string when stored by the legacy admin
        let json = r#"{"departmentModels":[{"id":"m-1","name":"Model A","baseSquareMeters":82.5,"idPlan":"A","primaryImage":"/static/a.jpg","batchImages":"[\"a.jpg\",\"b.jpg\"]"}]}"#;
        let resp: DepartmentModelsResponse = serde_json::from_str(json).unwrap();
        let model = &resp.department_models[0];
        assert_eq!(model.id_plan, "A");
        assert!(model.batch_images.as_ref().unwrap().is_string());
    }

    #[test]
    fn test_department_models_deserialize_array_gallery() {
        let json = r#"{"departmentModels":[{"id":"m-1","name":"Model A","baseSquareMeters":null,"idPlan":"A","primaryImage":null,"batchImages":["a.jpg","b.jpg"]}]}"#;
        let resp: DepartmentModelsResponse = serde_json::from_str(json).unwrap();
        let model = &resp.department_models[0];
        assert!(model.batch_images.as_ref().unwrap().is_array());
        assert!(model.base_square_meters.is_none());
    }

    #[test]
    fn test_units_deserialize_all_states() {
        let json = r#"{"units":[
            {"id":"u-1","unitNumber":"101","floor":1,"realSquareMeters":80.2,"state":"AVAILABLE"},
            {"id":"u-2","unitNumber":"102","floor":1,"realSquareMeters":null,"state":"RESERVED"},
            {"id":"u-3","unitNumber":"201","floor":2,"realSquareMeters":95.0,"state":"SOLD"}
        ]}"#;
        let resp: UnitsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.units.len(), 3);
        assert_eq!(resp.units[0].state, UnitStateData::Available);
        assert_eq!(resp.units[1].state, UnitStateData::Reserved);
        assert_eq!(resp.units[2].state, UnitStateData::Sold);
    }

    #[test]
    fn test_graphql_error_response() {
        let json = r#"{"data":null,"errors":[{"message":"Building not found"}]}"#;
        let resp: GraphQLResponse<BuildingResponse> = serde_json::from_str(json).unwrap();
        assert!(resp.data.is_none());
        assert_eq!(resp.errors.unwrap()[0].message, "Building not found");
    }

    #[test]
    fn test_unit_state_labels() {
        assert_eq!(UnitStateData::Available.label(), "Available");
        assert_eq!(UnitStateData::Sold.css_class(), "unit-sold");
    }

    #[test]
    fn test_department_model_zone_id() {
        let json = r#"{"departmentModels":[{"id":"m-1","name":"Model A","baseSquareMeters":null,"idPlan":" A2 ","primaryImage":null,"batchImages":null}]}"#;
        let resp: DepartmentModelsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.department_models[0].zone_id(), " A2 ");
    }
}
