use atrium_shared::models::{Building, DepartmentModel, Unit};
use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

const BUILDINGS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("buildings");
const MODELS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("department_models");
const UNITS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("units");

pub struct Storage {
    db: Database,
    path: PathBuf,
}

impl Storage {
    pub fn open(path: &Path) -> Arc<Self> {
        let db = Database::create(path)
            .unwrap_or_else(|e| panic!("Failed to open database at {}: {}", path.display(), e));

        // Ensure tables exist
        let write_txn = db.begin_write().expect("Failed to begin write txn");
        {
            let _ = write_txn.open_table(BUILDINGS_TABLE);
            let _ = write_txn.open_table(MODELS_TABLE);
            let _ = write_txn.open_table(UNITS_TABLE);
        }
        write_txn.commit().expect("Failed to commit initial txn");

        Arc::new(Storage {
            db,
            path: path.to_path_buf(),
        })
    }

    fn put(
        &self,
        table: TableDefinition<&str, &[u8]>,
        id: &str,
        json: &[u8],
    ) -> Result<(), String> {
        let write_txn = self.db.begin_write().map_err(|e| e.to_string())?;
        {
            let mut t = write_txn.open_table(table).map_err(|e| e.to_string())?;
            t.insert(id, json).map_err(|e| e.to_string())?;
        }
        write_txn.commit().map_err(|e| e.to_string())?;
        Ok(())
    }

    fn remove(&self, table: TableDefinition<&str, &[u8]>, id: &str) -> Result<bool, String> {
        let write_txn = self.db.begin_write().map_err(|e| e.to_string())?;
        let removed = {
            let mut t = write_txn.open_table(table).map_err(|e| e.to_string())?;
            let was_present = t.remove(id).map_err(|e| e.to_string())?.is_some();
            was_present
        };
        write_txn.commit().map_err(|e| e.to_string())?;
        Ok(removed)
    }

    fn collect_all<T: serde::de::DeserializeOwned>(
        &self,
        table: TableDefinition<&str, &[u8]>,
    ) -> Result<Vec<T>, String> {
        let read_txn = self.db.begin_read().map_err(|e| e.to_string())?;
        let t = read_txn.open_table(table).map_err(|e| e.to_string())?;
        let mut out = Vec::new();
        for entry in t.iter().map_err(|e| e.to_string())? {
            let (_, value) = entry.map_err(|e| e.to_string())?;
            let item: T = serde_json::from_slice(value.value()).map_err(|e| e.to_string())?;
            out.push(item);
        }
        Ok(out)
    }

    // --- Buildings ---

    pub fn save_building(&self, building: &Building) -> Result<(), String> {
        let json = serde_json::to_vec(building).map_err(|e| e.to_string())?;
        self.put(BUILDINGS_TABLE, &building.id.to_string(), &json)
    }

    pub fn get_building(&self, id: &str) -> Result<Option<Building>, String> {
        let read_txn = self.db.begin_read().map_err(|e| e.to_string())?;
        let table = read_txn
            .open_table(BUILDINGS_TABLE)
            .map_err(|e| e.to_string())?;
        match table.get(id).map_err(|e| e.to_string())? {
            Some(value) => {
                let building =
                    serde_json::from_slice(value.value()).map_err(|e| e.to_string())?;
                Ok(Some(building))
            }
            None => Ok(None),
        }
    }

    pub fn list_buildings(&self) -> Result<Vec<Building>, String> {
        let mut buildings: Vec<Building> = self.collect_all(BUILDINGS_TABLE)?;
        buildings.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(buildings)
    }

    /// Delete a building and everything that hangs off it.
    pub fn delete_building(&self, id: &str) -> Result<bool, String> {
        let building_id = Uuid::parse_str(id).map_err(|e| e.to_string())?;
        for model in self.list_models(building_id)? {
            self.remove(MODELS_TABLE, &model.id.to_string())?;
        }
        for unit in self.list_units(building_id)? {
            self.remove(UNITS_TABLE, &unit.id.to_string())?;
        }
        self.remove(BUILDINGS_TABLE, id)
    }

    pub fn count_buildings(&self) -> Result<u64, String> {
        let read_txn = self.db.begin_read().map_err(|e| e.to_string())?;
        let table = read_txn
            .open_table(BUILDINGS_TABLE)
            .map_err(|e| e.to_string())?;
        table.len().map_err(|e| e.to_string())
    }

    pub fn db_size_bytes(&self) -> Result<u64, String> {
        std::fs::metadata(&self.path)
            .map(|m| m.len())
            .map_err(|e| e.to_string())
    }

    // --- Department models ---

    pub fn save_model(&self, model: &DepartmentModel) -> Result<(), String> {
        let json = serde_json::to_vec(model).map_err(|e| e.to_string())?;
        self.put(MODELS_TABLE, &model.id.to_string(), &json)
    }

    pub fn get_model(&self, id: &str) -> Result<Option<DepartmentModel>, String> {
        let read_txn = self.db.begin_read().map_err(|e| e.to_string())?;
        let table = read_txn
            .open_table(MODELS_TABLE)
            .map_err(|e| e.to_string())?;
        match table.get(id).map_err(|e| e.to_string())? {
            Some(value) => {
                let model = serde_json::from_slice(value.value()).map_err(|e| e.to_string())?;
                Ok(Some(model))
            }
            None => Ok(None),
        }
    }

    /// Models of one building, sorted by name. List order is what zone
    /// resolution falls back on when `id_plan` values collide.
    pub fn list_models(&self, building_id: Uuid) -> Result<Vec<DepartmentModel>, String> {
        let mut models: Vec<DepartmentModel> = self.collect_all(MODELS_TABLE)?;
        models.retain(|m| m.building_id == building_id);
        models.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(models)
    }

    pub fn delete_model(&self, id: &str) -> Result<bool, String> {
        self.remove(MODELS_TABLE, id)
    }

    // --- Units ---

    pub fn save_unit(&self, unit: &Unit) -> Result<(), String> {
        let json = serde_json::to_vec(unit).map_err(|e| e.to_string())?;
        self.put(UNITS_TABLE, &unit.id.to_string(), &json)
    }

    pub fn get_unit(&self, id: &str) -> Result<Option<Unit>, String> {
        let read_txn = self.db.begin_read().map_err(|e| e.to_string())?;
        let table = read_txn
            .open_table(UNITS_TABLE)
            .map_err(|e| e.to_string())?;
        match table.get(id).map_err(|e| e.to_string())? {
            Some(value) => {
                let unit = serde_json::from_slice(value.value()).map_err(|e| e.to_string())?;
                Ok(Some(unit))
            }
            None => Ok(None),
        }
    }

    /// Units of one building, floors descending, unit number ascending within
    /// a floor (architectural order, top floor first).
    pub fn list_units(&self, building_id: Uuid) -> Result<Vec<Unit>, String> {
        let mut units: Vec<Unit> = self.collect_all(UNITS_TABLE)?;
        units.retain(|u| u.building_id == building_id);
        units.sort_by(|a, b| {
            b.floor
                .cmp(&a.floor)
                .then_with(|| a.unit_number.cmp(&b.unit_number))
        });
        Ok(units)
    }

    pub fn delete_unit(&self, id: &str) -> Result<bool, String> {
        self.remove(UNITS_TABLE, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_shared::models::UnitState;
    use serde_json::json;

    fn test_storage() -> (Arc<Storage>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(&dir.path().join("test.redb"));
        (storage, dir)
    }

    fn test_building(name: &str) -> Building {
        Building {
            id: Uuid::new_v4(),
            name: name.to_string(),
            plan_image: "/static/plans/tower.svg".to_string(),
            distribution_image: None,
            address: Some("Av. Siempreviva 742".to_string()),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    fn test_model(building_id: Uuid, name: &str, id_plan: &str) -> DepartmentModel {
        DepartmentModel {
            id: Uuid::new_v4(),
            building_id,
            name: name.to_string(),
            base_square_meters: Some(92.5),
            id_plan: id_plan.to_string(),
            primary_image: None,
            batch_images: Some(json!(r#"["a.jpg","b.jpg"]"#)),
        }
    }

    fn test_unit(building_id: Uuid, number: &str, floor: i32) -> Unit {
        Unit {
            id: Uuid::new_v4(),
            building_id,
            unit_number: number.to_string(),
            floor,
            real_square_meters: Some(88.0),
            state: UnitState::Available,
        }
    }

    #[test]
    fn test_building_round_trip() {
        let (storage, _dir) = test_storage();
        let building = test_building("Torre Norte");
        storage.save_building(&building).unwrap();

        let loaded = storage.get_building(&building.id.to_string()).unwrap().unwrap();
        assert_eq!(loaded.name, "Torre Norte");
        assert_eq!(loaded.plan_image, "/static/plans/tower.svg");
    }

    #[test]
    fn test_get_missing_building_is_none() {
        let (storage, _dir) = test_storage();
        assert!(storage.get_building(&Uuid::new_v4().to_string()).unwrap().is_none());
    }

    #[test]
    fn test_list_buildings_sorted_by_name() {
        let (storage, _dir) = test_storage();
        storage.save_building(&test_building("Zafiro")).unwrap();
        storage.save_building(&test_building("Alameda")).unwrap();

        let names: Vec<String> = storage
            .list_buildings()
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["Alameda", "Zafiro"]);
    }

    #[test]
    fn test_list_models_filters_by_building() {
        let (storage, _dir) = test_storage();
        let b1 = test_building("One");
        let b2 = test_building("Two");
        storage.save_building(&b1).unwrap();
        storage.save_building(&b2).unwrap();
        storage.save_model(&test_model(b1.id, "Model A", "A")).unwrap();
        storage.save_model(&test_model(b2.id, "Model B", "B")).unwrap();

        let models = storage.list_models(b1.id).unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "Model A");
    }

    #[test]
    fn test_model_gallery_value_survives_round_trip() {
        let (storage, _dir) = test_storage();
        let b = test_building("One");
        storage.save_building(&b).unwrap();
        let model = test_model(b.id, "Model A", "A");
        storage.save_model(&model).unwrap();

        let loaded = storage.get_model(&model.id.to_string()).unwrap().unwrap();
        // Stays a string-shaped value; parsing is the frontend's concern.
        assert_eq!(loaded.batch_images, Some(json!(r#"["a.jpg","b.jpg"]"#)));
    }

    #[test]
    fn test_list_units_architectural_order() {
        let (storage, _dir) = test_storage();
        let b = test_building("One");
        storage.save_building(&b).unwrap();
        storage.save_unit(&test_unit(b.id, "102", 1)).unwrap();
        storage.save_unit(&test_unit(b.id, "301", 3)).unwrap();
        storage.save_unit(&test_unit(b.id, "101", 1)).unwrap();

        let order: Vec<(i32, String)> = storage
            .list_units(b.id)
            .unwrap()
            .into_iter()
            .map(|u| (u.floor, u.unit_number))
            .collect();
        assert_eq!(
            order,
            vec![
                (3, "301".to_string()),
                (1, "101".to_string()),
                (1, "102".to_string())
            ]
        );
    }

    #[test]
    fn test_delete_building_cascades() {
        let (storage, _dir) = test_storage();
        let b = test_building("One");
        storage.save_building(&b).unwrap();
        let model = test_model(b.id, "Model A", "A");
        let unit = test_unit(b.id, "101", 1);
        storage.save_model(&model).unwrap();
        storage.save_unit(&unit).unwrap();

        assert!(storage.delete_building(&b.id.to_string()).unwrap());
        assert!(storage.get_building(&b.id.to_string()).unwrap().is_none());
        assert!(storage.get_model(&model.id.to_string()).unwrap().is_none());
        assert!(storage.get_unit(&unit.id.to_string()).unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_returns_false() {
        let (storage, _dir) = test_storage();
        assert!(!storage.delete_model(&Uuid::new_v4().to_string()).unwrap());
    }

    #[test]
    fn test_count_buildings() {
        let (storage, _dir) = test_storage();
        assert_eq!(storage.count_buildings().unwrap(), 0);
        storage.save_building(&test_building("One")).unwrap();
        assert_eq!(storage.count_buildings().unwrap(), 1);
    }
}
