use std::sync::Arc;

use async_graphql::{Context, Enum, InputObject, Json, Object, SimpleObject, ID};
use atrium_shared::models::{self, UnitState};
use uuid::Uuid;

use crate::storage::Storage;

// Re-export UnitState as a GraphQL enum
#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum GqlUnitState {
    Available,
    Reserved,
    Sold,
}

impl From<UnitState> for GqlUnitState {
    fn from(s: UnitState) -> Self {
        match s {
            UnitState::Available => GqlUnitState::Available,
            UnitState::Reserved => GqlUnitState::Reserved,
            UnitState::Sold => GqlUnitState::Sold,
        }
    }
}

impl From<GqlUnitState> for UnitState {
    fn from(s: GqlUnitState) -> Self {
        match s {
            GqlUnitState::Available => UnitState::Available,
            GqlUnitState::Reserved => UnitState::Reserved,
            GqlUnitState::Sold => UnitState::Sold,
        }
    }
}

// GraphQL output types

#[derive(SimpleObject)]
pub struct GqlBuilding {
    pub id: ID,
    pub name: String,
    pub plan_image: String,
    pub distribution_image: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<models::Building> for GqlBuilding {
    fn from(b: models::Building) -> Self {
        GqlBuilding {
            id: ID(b.id.to_string()),
            name: b.name,
            plan_image: b.plan_image,
            distribution_image: b.distribution_image,
            address: b.address,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(SimpleObject)]
pub struct GqlDepartmentModel {
    pub id: ID,
    pub building_id: ID,
    pub name: String,
    pub base_square_meters: Option<f64>,
    pub id_plan: String,
    pub primary_image: Option<String>,
    /// Passed through as-is; the presentation layer owns the defensive parse.
    pub batch_images: Option<Json<serde_json::Value>>,
}

impl From<models::DepartmentModel> for GqlDepartmentModel {
    fn from(m: models::DepartmentModel) -> Self {
        GqlDepartmentModel {
            id: ID(m.id.to_string()),
            building_id: ID(m.building_id.to_string()),
            name: m.name,
            base_square_meters: m.base_square_meters,
            id_plan: m.id_plan,
            primary_image: m.primary_image,
            batch_images: m.batch_images.map(Json),
        }
    }
}

#[derive(SimpleObject)]
pub struct GqlUnit {
    pub id: ID,
    pub building_id: ID,
    pub unit_number: String,
    pub floor: i32,
    pub real_square_meters: Option<f64>,
    pub state: GqlUnitState,
}

impl From<models::Unit> for GqlUnit {
    fn from(u: models::Unit) -> Self {
        GqlUnit {
            id: ID(u.id.to_string()),
            building_id: ID(u.building_id.to_string()),
            unit_number: u.unit_number,
            floor: u.floor,
            real_square_meters: u.real_square_meters,
            state: u.state.into(),
        }
    }
}

/// Operational counters surfaced through GraphiQL.
#[derive(SimpleObject)]
pub struct GqlStats {
    pub total_buildings: u64,
    pub db_size_bytes: u64,
}

// Input types

#[derive(InputObject)]
pub struct CreateBuildingInput {
    pub name: String,
    pub plan_image: String,
    pub distribution_image: Option<String>,
    pub address: Option<String>,
}

#[derive(InputObject)]
pub struct UpdateBuildingInput {
    pub id: ID,
    pub name: Option<String>,
    pub plan_image: Option<String>,
    pub distribution_image: Option<String>,
    pub address: Option<String>,
}

#[derive(InputObject)]
pub struct CreateDepartmentModelInput {
    pub building_id: ID,
    pub name: String,
    pub base_square_meters: Option<f64>,
    pub id_plan: String,
    pub primary_image: Option<String>,
    pub batch_images: Option<Json<serde_json::Value>>,
}

#[derive(InputObject)]
pub struct UpdateDepartmentModelInput {
    pub id: ID,
    pub name: Option<String>,
    pub base_square_meters: Option<f64>,
    pub id_plan: Option<String>,
    pub primary_image: Option<String>,
    pub batch_images: Option<Json<serde_json::Value>>,
}

#[derive(InputObject)]
pub struct CreateUnitInput {
    pub building_id: ID,
    pub unit_number: String,
    pub floor: i32,
    pub real_square_meters: Option<f64>,
    pub state: Option<GqlUnitState>,
}

fn parse_building_id(storage: &Storage, id: &str) -> async_graphql::Result<Uuid> {
    let uuid =
        Uuid::parse_str(id).map_err(|_| async_graphql::Error::new("Invalid building id"))?;
    match storage.get_building(id).map_err(async_graphql::Error::new)? {
        Some(_) => Ok(uuid),
        None => Err(async_graphql::Error::new("Building not found")),
    }
}

// Query root

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn buildings(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<GqlBuilding>> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();
        let buildings = storage.list_buildings().map_err(async_graphql::Error::new)?;
        Ok(buildings.into_iter().map(GqlBuilding::from).collect())
    }

    async fn building(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<GqlBuilding>> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();
        let building = storage.get_building(&id).map_err(async_graphql::Error::new)?;
        Ok(building.map(GqlBuilding::from))
    }

    async fn department_models(
        &self,
        ctx: &Context<'_>,
        building_id: ID,
    ) -> async_graphql::Result<Vec<GqlDepartmentModel>> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();
        let building_id = parse_building_id(storage, &building_id)?;
        let models = storage
            .list_models(building_id)
            .map_err(async_graphql::Error::new)?;
        Ok(models.into_iter().map(GqlDepartmentModel::from).collect())
    }

    async fn units(
        &self,
        ctx: &Context<'_>,
        building_id: ID,
    ) -> async_graphql::Result<Vec<GqlUnit>> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();
        let building_id = parse_building_id(storage, &building_id)?;
        let units = storage
            .list_units(building_id)
            .map_err(async_graphql::Error::new)?;
        Ok(units.into_iter().map(GqlUnit::from).collect())
    }

    async fn stats(&self, ctx: &Context<'_>) -> async_graphql::Result<GqlStats> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();
        Ok(GqlStats {
            total_buildings: storage.count_buildings().map_err(async_graphql::Error::new)?,
            db_size_bytes: storage.db_size_bytes().map_err(async_graphql::Error::new)?,
        })
    }
}

// Mutation root

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_building(
        &self,
        ctx: &Context<'_>,
        input: CreateBuildingInput,
    ) -> async_graphql::Result<GqlBuilding> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();
        let now = chrono::Utc::now().to_rfc3339();

        let building = models::Building {
            id: Uuid::new_v4(),
            name: input.name,
            plan_image: input.plan_image,
            distribution_image: input.distribution_image,
            address: input.address,
            created_at: now.clone(),
            updated_at: now,
        };

        storage
            .save_building(&building)
            .map_err(async_graphql::Error::new)?;
        tracing::info!(building_id = %building.id, "Created building");

        Ok(GqlBuilding::from(building))
    }

    async fn update_building(
        &self,
        ctx: &Context<'_>,
        input: UpdateBuildingInput,
    ) -> async_graphql::Result<GqlBuilding> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();

        let mut building = storage
            .get_building(&input.id)
            .map_err(async_graphql::Error::new)?
            .ok_or_else(|| async_graphql::Error::new("Building not found"))?;

        if let Some(name) = input.name {
            building.name = name;
        }
        if let Some(plan_image) = input.plan_image {
            building.plan_image = plan_image;
        }
        if let Some(distribution_image) = input.distribution_image {
            building.distribution_image = Some(distribution_image);
        }
        if let Some(address) = input.address {
            building.address = Some(address);
        }
        building.updated_at = chrono::Utc::now().to_rfc3339();

        storage
            .save_building(&building)
            .map_err(async_graphql::Error::new)?;

        Ok(GqlBuilding::from(building))
    }

    async fn delete_building(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();
        storage
            .delete_building(&id)
            .map_err(async_graphql::Error::new)
    }

    async fn create_department_model(
        &self,
        ctx: &Context<'_>,
        input: CreateDepartmentModelInput,
    ) -> async_graphql::Result<GqlDepartmentModel> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();
        let building_id = parse_building_id(storage, &input.building_id)?;

        // No uniqueness constraint on id_plan: duplicates resolve to the
        // first model in list order at presentation time.
        let model = models::DepartmentModel {
            id: Uuid::new_v4(),
            building_id,
            name: input.name,
            base_square_meters: input.base_square_meters,
            id_plan: input.id_plan,
            primary_image: input.primary_image,
            batch_images: input.batch_images.map(|j| j.0),
        };

        storage.save_model(&model).map_err(async_graphql::Error::new)?;

        Ok(GqlDepartmentModel::from(model))
    }

    async fn update_department_model(
        &self,
        ctx: &Context<'_>,
        input: UpdateDepartmentModelInput,
    ) -> async_graphql::Result<GqlDepartmentModel> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();

        let mut model = storage
            .get_model(&input.id)
            .map_err(async_graphql::Error::new)?
            .ok_or_else(|| async_graphql::Error::new("Department model not found"))?;

        if let Some(name) = input.name {
            model.name = name;
        }
        if let Some(m2) = input.base_square_meters {
            model.base_square_meters = Some(m2);
        }
        if let Some(id_plan) = input.id_plan {
            model.id_plan = id_plan;
        }
        if let Some(primary_image) = input.primary_image {
            model.primary_image = Some(primary_image);
        }
        if let Some(batch_images) = input.batch_images {
            model.batch_images = Some(batch_images.0);
        }

        storage.save_model(&model).map_err(async_graphql::Error::new)?;

        Ok(GqlDepartmentModel::from(model))
    }

    async fn delete_department_model(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<bool> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();
        storage.delete_model(&id).map_err(async_graphql::Error::new)
    }

    async fn create_unit(
        &self,
        ctx: &Context<'_>,
        input: CreateUnitInput,
    ) -> async_graphql::Result<GqlUnit> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();
        let building_id = parse_building_id(storage, &input.building_id)?;

        let unit = models::Unit {
            id: Uuid::new_v4(),
            building_id,
            unit_number: input.unit_number,
            floor: input.floor,
            real_square_meters: input.real_square_meters,
            state: input.state.map(UnitState::from).unwrap_or(UnitState::Available),
        };

        storage.save_unit(&unit).map_err(async_graphql::Error::new)?;

        Ok(GqlUnit::from(unit))
    }

    async fn update_unit_state(
        &self,
        ctx: &Context<'_>,
        id: ID,
        state: GqlUnitState,
    ) -> async_graphql::Result<GqlUnit> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();

        let mut unit = storage
            .get_unit(&id)
            .map_err(async_graphql::Error::new)?
            .ok_or_else(|| async_graphql::Error::new("Unit not found"))?;

        unit.state = state.into();
        storage.save_unit(&unit).map_err(async_graphql::Error::new)?;

        Ok(GqlUnit::from(unit))
    }

    async fn delete_unit(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        let storage = ctx.data::<Arc<Storage>>().unwrap();
        storage.delete_unit(&id).map_err(async_graphql::Error::new)
    }
}

pub type Schema = async_graphql::Schema<QueryRoot, MutationRoot, async_graphql::EmptySubscription>;

pub fn build_schema(storage: Arc<Storage>) -> Schema {
    async_graphql::Schema::build(QueryRoot, MutationRoot, async_graphql::EmptySubscription)
        .data(storage)
        .finish()
}
