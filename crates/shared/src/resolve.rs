//! Zone-to-model resolution.
//!
//! A clicked plan zone is identified by its element id; the matching model is
//! the first one whose stored `id_plan` equals the zone id after trimming
//! surrounding whitespace on both sides of the comparison. The match is exact
//! and case-sensitive, with no fuzzy matching.

/// Anything that can be correlated with a floor-plan zone.
pub trait PlanZone {
    /// The stored zone identifier (`id_plan`), possibly with stray whitespace.
    fn zone_id(&self) -> &str;
}

#[cfg(feature = "uuid-support")]
impl PlanZone for crate::models::DepartmentModel {
    fn zone_id(&self) -> &str {
        &self.id_plan
    }
}

/// Find the model for a clicked zone key.
///
/// Zero matches is a normal occurrence (a click outside any defined zone) and
/// returns `None`. Nothing prevents duplicate zone ids in the data; when
/// duplicates exist the first model in list order wins.
pub fn resolve_zone<'a, T: PlanZone>(zone_key: &str, models: &'a [T]) -> Option<&'a T> {
    let key = zone_key.trim();
    models.iter().find(|m| m.zone_id().trim() == key)
}

/// Model of the DOM `closest('[id]')` walk used for hit-testing: given the
/// ids of elements from the click target upward, return the nearest present
/// id. With nested identified elements only the innermost wins; an outer
/// container id is never reached for a click deep inside a nested group.
pub fn nearest_zone_id<'a, I>(ancestry: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    ancestry.into_iter().flatten().next()
}
