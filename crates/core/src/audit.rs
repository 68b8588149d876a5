//! Audit data model.
//!
//! [`AuditDraft`] is the unit of persistence exchanged with the backend.
//! [`AuditForm`] is the in-memory composition of every wizard section;
//! the results step reads the room sections of parts 2 and 3 from it
//! directly.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::catalog::{ItemKind, RoomKind};
use crate::count::Count;
use crate::metrics::{derive_metrics, PlasticMetrics, TopPlastic};
use crate::promise::PromiseDraft;
use crate::status::AuditStatus;
use crate::types::{EntityId, Timestamp};
use crate::validation::{not_blank, optional_email, required_count};

/// Older records store whole sections as `null`; treat that as empty.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn first_part() -> u8 {
    1
}

// ---------------------------------------------------------------------------
// Room sections
// ---------------------------------------------------------------------------

/// Optional count per catalog item. Only the items a room lists are
/// populated; the rest stay `None` and are omitted from the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemCounts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plastic_bottles: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plastic_cutlery: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yoghurt_pots: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snack_wrappers: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plastic_straws: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_containers: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cling_film: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plastic_cups: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plastic_bags: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pens: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glue_sticks: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folders: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub laminating_pouches: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_liners: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disposable_gloves: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soap_bottles: Option<Count>,
}

impl ItemCounts {
    pub fn get(&self, item: ItemKind) -> Option<&Count> {
        self.slot(item).as_ref()
    }

    pub fn set(&mut self, item: ItemKind, count: Count) {
        *self.slot_mut(item) = Some(count);
    }

    /// Clear every slot whose item is not in `items`.
    pub fn retain(&mut self, items: &[ItemKind]) {
        for item in ItemKind::ALL {
            if !items.contains(&item) {
                *self.slot_mut(item) = None;
            }
        }
    }

    fn slot(&self, item: ItemKind) -> &Option<Count> {
        match item {
            ItemKind::PlasticBottles => &self.plastic_bottles,
            ItemKind::PlasticCutlery => &self.plastic_cutlery,
            ItemKind::YoghurtPots => &self.yoghurt_pots,
            ItemKind::SnackWrappers => &self.snack_wrappers,
            ItemKind::PlasticStraws => &self.plastic_straws,
            ItemKind::FoodContainers => &self.food_containers,
            ItemKind::ClingFilm => &self.cling_film,
            ItemKind::PlasticCups => &self.plastic_cups,
            ItemKind::PlasticBags => &self.plastic_bags,
            ItemKind::Pens => &self.pens,
            ItemKind::GlueSticks => &self.glue_sticks,
            ItemKind::Folders => &self.folders,
            ItemKind::LaminatingPouches => &self.laminating_pouches,
            ItemKind::BinLiners => &self.bin_liners,
            ItemKind::DisposableGloves => &self.disposable_gloves,
            ItemKind::SoapBottles => &self.soap_bottles,
        }
    }

    fn slot_mut(&mut self, item: ItemKind) -> &mut Option<Count> {
        match item {
            ItemKind::PlasticBottles => &mut self.plastic_bottles,
            ItemKind::PlasticCutlery => &mut self.plastic_cutlery,
            ItemKind::YoghurtPots => &mut self.yoghurt_pots,
            ItemKind::SnackWrappers => &mut self.snack_wrappers,
            ItemKind::PlasticStraws => &mut self.plastic_straws,
            ItemKind::FoodContainers => &mut self.food_containers,
            ItemKind::ClingFilm => &mut self.cling_film,
            ItemKind::PlasticCups => &mut self.plastic_cups,
            ItemKind::PlasticBags => &mut self.plastic_bags,
            ItemKind::Pens => &mut self.pens,
            ItemKind::GlueSticks => &mut self.glue_sticks,
            ItemKind::Folders => &mut self.folders,
            ItemKind::LaminatingPouches => &mut self.laminating_pouches,
            ItemKind::BinLiners => &mut self.bin_liners,
            ItemKind::DisposableGloves => &mut self.disposable_gloves,
            ItemKind::SoapBottles => &mut self.soap_bottles,
        }
    }
}

/// Counts and selection state for one room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomSection {
    /// Checkbox state for optional rooms. `None` only appears in legacy
    /// records saved before the checkbox existed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
    #[serde(flatten)]
    pub counts: ItemCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_description: Option<String>,
}

impl RoomSection {
    /// A blank section for `room`: every catalog item set to `"0"`,
    /// optional rooms explicitly unselected.
    pub fn for_room(room: RoomKind) -> Self {
        let mut section = Self {
            selected: room.is_optional().then_some(false),
            ..Self::default()
        };
        section.fill_defaults(room);
        section
    }

    /// Fill catalog fields missing from stored data with their defaults
    /// and drop counts for items the room does not list. Catalog values
    /// already present are left untouched.
    pub fn fill_defaults(&mut self, room: RoomKind) {
        self.counts.retain(room.items());
        for item in room.items() {
            if self.counts.get(*item).is_none() {
                self.counts.set(*item, Count::default());
            }
        }
        if self.other.is_none() {
            self.other = Some(Count::default());
        }
        if self.other_description.is_none() {
            self.other_description = Some(String::new());
        }
    }

    /// Parsed count for `item`, zero when absent or unreadable.
    pub fn count(&self, item: ItemKind) -> u64 {
        self.counts.get(item).map_or(0, Count::parse_or_zero)
    }

    /// Parsed "other" count.
    pub fn other_count(&self) -> u64 {
        self.other.as_ref().map_or(0, Count::parse_or_zero)
    }

    pub fn is_selected(&self) -> bool {
        self.selected == Some(true)
    }
}

// ---------------------------------------------------------------------------
// Step sections
// ---------------------------------------------------------------------------

/// Step 1: school information. The student count starts blank so it
/// must be entered; the staff count is optional and starts at `"0"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct Part1Data {
    #[validate(custom(function = "not_blank"))]
    pub school_name: String,

    #[validate(custom(function = "required_count"))]
    pub number_of_students: Count,

    pub number_of_staff: Count,

    #[validate(custom(function = "not_blank"))]
    pub auditor_name: String,

    #[validate(custom(function = "not_blank"))]
    pub audit_date: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "optional_email"))]
    pub contact_email: Option<String>,
}

impl Default for Part1Data {
    fn default() -> Self {
        Self {
            school_name: String::new(),
            number_of_students: Count::new(""),
            number_of_staff: Count::default(),
            auditor_name: String::new(),
            audit_date: String::new(),
            contact_email: None,
        }
    }
}

/// Step 2: lunchroom and playground, always collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Part2Data {
    pub lunchroom: RoomSection,
    pub playground: RoomSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Default for Part2Data {
    fn default() -> Self {
        Self {
            lunchroom: RoomSection::for_room(RoomKind::Lunchroom),
            playground: RoomSection::for_room(RoomKind::Playground),
            notes: None,
        }
    }
}

impl Part2Data {
    pub fn rooms(&self) -> [(RoomKind, &RoomSection); 2] {
        [
            (RoomKind::Lunchroom, &self.lunchroom),
            (RoomKind::Playground, &self.playground),
        ]
    }

    pub fn rooms_mut(&mut self) -> [(RoomKind, &mut RoomSection); 2] {
        [
            (RoomKind::Lunchroom, &mut self.lunchroom),
            (RoomKind::Playground, &mut self.playground),
        ]
    }
}

/// Step 3: optional rooms, each behind a selection checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Part3Data {
    pub staffroom: RoomSection,
    pub office: RoomSection,
    pub library: RoomSection,
    pub gym: RoomSection,
    pub corridors: RoomSection,
    pub science_labs: RoomSection,
    pub art_rooms: RoomSection,
    pub classrooms: RoomSection,
    pub bathrooms: RoomSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Default for Part3Data {
    fn default() -> Self {
        Self {
            staffroom: RoomSection::for_room(RoomKind::Staffroom),
            office: RoomSection::for_room(RoomKind::Office),
            library: RoomSection::for_room(RoomKind::Library),
            gym: RoomSection::for_room(RoomKind::Gym),
            corridors: RoomSection::for_room(RoomKind::Corridors),
            science_labs: RoomSection::for_room(RoomKind::ScienceLabs),
            art_rooms: RoomSection::for_room(RoomKind::ArtRooms),
            classrooms: RoomSection::for_room(RoomKind::Classrooms),
            bathrooms: RoomSection::for_room(RoomKind::Bathrooms),
            notes: None,
        }
    }
}

impl Part3Data {
    pub fn rooms(&self) -> [(RoomKind, &RoomSection); 9] {
        [
            (RoomKind::Staffroom, &self.staffroom),
            (RoomKind::Office, &self.office),
            (RoomKind::Library, &self.library),
            (RoomKind::Gym, &self.gym),
            (RoomKind::Corridors, &self.corridors),
            (RoomKind::ScienceLabs, &self.science_labs),
            (RoomKind::ArtRooms, &self.art_rooms),
            (RoomKind::Classrooms, &self.classrooms),
            (RoomKind::Bathrooms, &self.bathrooms),
        ]
    }

    pub fn rooms_mut(&mut self) -> [(RoomKind, &mut RoomSection); 9] {
        [
            (RoomKind::Staffroom, &mut self.staffroom),
            (RoomKind::Office, &mut self.office),
            (RoomKind::Library, &mut self.library),
            (RoomKind::Gym, &mut self.gym),
            (RoomKind::Corridors, &mut self.corridors),
            (RoomKind::ScienceLabs, &mut self.science_labs),
            (RoomKind::ArtRooms, &mut self.art_rooms),
            (RoomKind::Classrooms, &mut self.classrooms),
            (RoomKind::Bathrooms, &mut self.bathrooms),
        ]
    }

    pub fn any_selected(&self) -> bool {
        self.rooms().iter().any(|(_, section)| section.is_selected())
    }
}

/// Answer to a yes/no practice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

/// Step 4: waste-management practices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct Part4Data {
    #[validate(required(message = "Please answer whether the school has recycling bins"))]
    pub has_recycling_bins: Option<YesNo>,

    #[validate(required(message = "Please answer whether plastic is recycled"))]
    pub recycles_plastic: Option<YesNo>,

    #[validate(required(message = "Please answer whether the school has a compost bin"))]
    pub has_compost_bin: Option<YesNo>,

    #[validate(required(message = "Please answer whether a plastic bag policy exists"))]
    pub plastic_bag_policy: Option<YesNo>,

    #[validate(custom(function = "not_blank"))]
    pub waste_collection_frequency: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Composed form
// ---------------------------------------------------------------------------

/// Every section of the wizard held together, so later steps can read
/// earlier ones without cross-references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditForm {
    pub part1: Part1Data,
    pub part2: Part2Data,
    pub part3: Part3Data,
    pub part4: Part4Data,
    pub promises: Vec<PromiseDraft>,
}

impl AuditForm {
    /// Every room section across parts 2 and 3, in form order.
    pub fn rooms(&self) -> Vec<(RoomKind, &RoomSection)> {
        self.part2
            .rooms()
            .into_iter()
            .chain(self.part3.rooms())
            .collect()
    }

    /// Derived metrics for the current form values.
    pub fn metrics(&self) -> PlasticMetrics {
        derive_metrics(&self.part2, &self.part3)
    }
}

// ---------------------------------------------------------------------------
// Persisted record
// ---------------------------------------------------------------------------

/// An audit as stored by the backend.
///
/// Sent without `id` on first save; the backend assigns one and returns
/// the full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,

    pub school_id: EntityId,

    #[serde(default = "first_part")]
    pub current_part: u8,

    #[serde(default)]
    pub status: AuditStatus,

    #[serde(default, deserialize_with = "null_as_default")]
    pub part1_data: Part1Data,

    #[serde(default, deserialize_with = "null_as_default")]
    pub part2_data: Part2Data,

    #[serde(default, deserialize_with = "null_as_default")]
    pub part3_data: Part3Data,

    #[serde(default, deserialize_with = "null_as_default")]
    pub part4_data: Part4Data,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_data: Option<PlasticMetrics>,

    #[serde(default)]
    pub total_plastic_items: u64,

    #[serde(default)]
    pub top_problem_plastics: Vec<TopPlastic>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_room_fills_catalog_items() {
        let section = RoomSection::for_room(RoomKind::Office);
        for item in RoomKind::Office.items() {
            assert_eq!(section.counts.get(*item).map(Count::as_str), Some("0"));
        }
        assert!(section.counts.get(ItemKind::YoghurtPots).is_none());
        assert_eq!(section.selected, Some(false));
    }

    #[test]
    fn core_rooms_have_no_selection_flag() {
        let part2 = Part2Data::default();
        assert_eq!(part2.lunchroom.selected, None);
        assert_eq!(part2.playground.selected, None);
    }

    #[test]
    fn room_section_wire_shape_is_flat() {
        let mut section = RoomSection::for_room(RoomKind::Gym);
        section.selected = Some(true);
        section.counts.set(ItemKind::PlasticBottles, Count::from("4"));
        let value = serde_json::to_value(&section).unwrap();
        assert_eq!(value["selected"], json!(true));
        assert_eq!(value["plasticBottles"], json!("4"));
        assert_eq!(value["binLiners"], json!("0"));
        assert!(value.get("pens").is_none());
        assert_eq!(value["other"], json!("0"));
    }

    #[test]
    fn fill_defaults_keeps_existing_values() {
        let mut section: RoomSection =
            serde_json::from_value(json!({ "plasticBottles": "9" })).unwrap();
        section.fill_defaults(RoomKind::Library);
        assert_eq!(section.count(ItemKind::PlasticBottles), 9);
        assert_eq!(section.counts.get(ItemKind::Pens).map(Count::as_str), Some("0"));
        assert_eq!(section.selected, None);
    }

    #[test]
    fn fill_defaults_drops_items_the_room_does_not_list() {
        let mut section: RoomSection = serde_json::from_value(
            json!({ "plasticBottles": "2", "soapBottles": "5" }),
        )
        .unwrap();
        section.fill_defaults(RoomKind::Library);
        assert_eq!(section.counts.get(ItemKind::SoapBottles), None);
        assert_eq!(section.count(ItemKind::PlasticBottles), 2);
        let value = serde_json::to_value(&section).unwrap();
        assert!(value.get("soapBottles").is_none());
    }

    #[test]
    fn missing_student_count_is_blank() {
        let part1: Part1Data =
            serde_json::from_value(json!({ "schoolName": "Hillside Primary" })).unwrap();
        assert!(part1.number_of_students.is_blank());
        assert_eq!(part1.number_of_staff.as_str(), "0");
    }

    #[test]
    fn missing_part3_room_defaults_to_unselected() {
        let part3: Part3Data =
            serde_json::from_value(json!({ "office": { "selected": true } })).unwrap();
        assert!(part3.office.is_selected());
        assert_eq!(part3.gym.selected, Some(false));
        assert!(part3.any_selected());
    }

    #[test]
    fn record_tolerates_null_sections_and_pending_status() {
        let record: AuditDraft = serde_json::from_value(json!({
            "id": "a-1",
            "schoolId": "s-1",
            "currentPart": 3,
            "status": "pending",
            "part1Data": null,
            "part3Data": null
        }))
        .unwrap();
        assert_eq!(record.id.as_deref(), Some("a-1"));
        assert_eq!(record.current_part, 3);
        assert_eq!(record.status, AuditStatus::Submitted);
        assert_eq!(record.part1_data, Part1Data::default());
        assert_eq!(record.part3_data, Part3Data::default());
    }

    #[test]
    fn record_serializes_camel_case_without_id() {
        let record = AuditDraft {
            id: None,
            school_id: "s-9".into(),
            current_part: 2,
            status: AuditStatus::Draft,
            part1_data: Part1Data::default(),
            part2_data: Part2Data::default(),
            part3_data: Part3Data::default(),
            part4_data: Part4Data::default(),
            results_data: None,
            total_plastic_items: 0,
            top_problem_plastics: Vec::new(),
            review_notes: None,
            created_at: None,
            updated_at: None,
            submitted_at: None,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["schoolId"], json!("s-9"));
        assert_eq!(value["currentPart"], json!(2));
        assert_eq!(value["status"], json!("draft"));
        assert!(value["part2Data"]["lunchroom"].is_object());
    }

    #[test]
    fn part1_requires_core_fields() {
        let errors = Part1Data::default().validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("school_name"));
        assert!(fields.contains_key("number_of_students"));
        assert!(fields.contains_key("auditor_name"));
        assert!(fields.contains_key("audit_date"));
        assert!(!fields.contains_key("number_of_staff"));
    }

    #[test]
    fn part4_requires_every_answer() {
        let part4 = Part4Data {
            has_recycling_bins: Some(YesNo::Yes),
            ..Part4Data::default()
        };
        let errors = part4.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(!fields.contains_key("has_recycling_bins"));
        assert!(fields.contains_key("recycles_plastic"));
        assert!(fields.contains_key("waste_collection_frequency"));
    }
}
