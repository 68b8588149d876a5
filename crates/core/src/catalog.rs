//! Static room and item catalog.
//!
//! Each physical space audited has a fixed list of plastic items the
//! auditor counts there. Every item rolls up into exactly one semantic
//! category; the mapping is many-to-one (bottles counted in nine rooms all
//! land in "plastic bottles").

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Semantic waste category used for reporting.
///
/// Declaration order is the catalog order used to break ranking ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    PlasticBottles,
    PlasticCutlery,
    YoghurtPots,
    SnackWrappers,
    PlasticStraws,
    FoodPackaging,
    ClingFilm,
    PlasticCups,
    PlasticBags,
    Stationery,
    LaminatingPouches,
    BinLiners,
    DisposableGloves,
    SoapBottles,
    /// Synthetic bucket for every room's free-form "other" count.
    Other,
}

impl Category {
    /// Categories fed by catalog items, in catalog order.
    pub const MEASURED: [Category; 14] = [
        Self::PlasticBottles,
        Self::PlasticCutlery,
        Self::YoghurtPots,
        Self::SnackWrappers,
        Self::PlasticStraws,
        Self::FoodPackaging,
        Self::ClingFilm,
        Self::PlasticCups,
        Self::PlasticBags,
        Self::Stationery,
        Self::LaminatingPouches,
        Self::BinLiners,
        Self::DisposableGloves,
        Self::SoapBottles,
    ];

    /// Display name used in results and charts.
    pub fn name(self) -> &'static str {
        match self {
            Self::PlasticBottles => "plastic bottles",
            Self::PlasticCutlery => "plastic cutlery",
            Self::YoghurtPots => "yoghurt pots",
            Self::SnackWrappers => "snack wrappers",
            Self::PlasticStraws => "plastic straws",
            Self::FoodPackaging => "food packaging",
            Self::ClingFilm => "cling film",
            Self::PlasticCups => "plastic cups",
            Self::PlasticBags => "plastic bags",
            Self::Stationery => "stationery",
            Self::LaminatingPouches => "laminating pouches",
            Self::BinLiners => "bin liners",
            Self::DisposableGloves => "disposable gloves",
            Self::SoapBottles => "soap bottles",
            Self::Other => "other plastic items",
        }
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// A countable item as it appears on a room's form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    PlasticBottles,
    PlasticCutlery,
    YoghurtPots,
    SnackWrappers,
    PlasticStraws,
    FoodContainers,
    ClingFilm,
    PlasticCups,
    PlasticBags,
    Pens,
    GlueSticks,
    Folders,
    LaminatingPouches,
    BinLiners,
    DisposableGloves,
    SoapBottles,
}

impl ItemKind {
    pub const ALL: [ItemKind; 16] = [
        Self::PlasticBottles,
        Self::PlasticCutlery,
        Self::YoghurtPots,
        Self::SnackWrappers,
        Self::PlasticStraws,
        Self::FoodContainers,
        Self::ClingFilm,
        Self::PlasticCups,
        Self::PlasticBags,
        Self::Pens,
        Self::GlueSticks,
        Self::Folders,
        Self::LaminatingPouches,
        Self::BinLiners,
        Self::DisposableGloves,
        Self::SoapBottles,
    ];

    /// The reporting category this item rolls up into.
    pub fn category(self) -> Category {
        match self {
            Self::PlasticBottles => Category::PlasticBottles,
            Self::PlasticCutlery => Category::PlasticCutlery,
            Self::YoghurtPots => Category::YoghurtPots,
            Self::SnackWrappers => Category::SnackWrappers,
            Self::PlasticStraws => Category::PlasticStraws,
            Self::FoodContainers => Category::FoodPackaging,
            Self::ClingFilm => Category::ClingFilm,
            Self::PlasticCups => Category::PlasticCups,
            Self::PlasticBags => Category::PlasticBags,
            Self::Pens | Self::GlueSticks | Self::Folders => Category::Stationery,
            Self::LaminatingPouches => Category::LaminatingPouches,
            Self::BinLiners => Category::BinLiners,
            Self::DisposableGloves => Category::DisposableGloves,
            Self::SoapBottles => Category::SoapBottles,
        }
    }

    /// Wire key of the item inside a room section.
    pub fn key(self) -> &'static str {
        match self {
            Self::PlasticBottles => "plasticBottles",
            Self::PlasticCutlery => "plasticCutlery",
            Self::YoghurtPots => "yoghurtPots",
            Self::SnackWrappers => "snackWrappers",
            Self::PlasticStraws => "plasticStraws",
            Self::FoodContainers => "foodContainers",
            Self::ClingFilm => "clingFilm",
            Self::PlasticCups => "plasticCups",
            Self::PlasticBags => "plasticBags",
            Self::Pens => "pens",
            Self::GlueSticks => "glueSticks",
            Self::Folders => "folders",
            Self::LaminatingPouches => "laminatingPouches",
            Self::BinLiners => "binLiners",
            Self::DisposableGloves => "disposableGloves",
            Self::SoapBottles => "soapBottles",
        }
    }

    /// Human-readable label for the item.
    pub fn label(self) -> &'static str {
        match self {
            Self::PlasticBottles => "Plastic Bottles",
            Self::PlasticCutlery => "Plastic Cutlery",
            Self::YoghurtPots => "Yoghurt Pots",
            Self::SnackWrappers => "Snack Wrappers",
            Self::PlasticStraws => "Plastic Straws",
            Self::FoodContainers => "Food Containers",
            Self::ClingFilm => "Cling Film",
            Self::PlasticCups => "Plastic Cups",
            Self::PlasticBags => "Plastic Bags",
            Self::Pens => "Pens",
            Self::GlueSticks => "Glue Sticks",
            Self::Folders => "Plastic Folders",
            Self::LaminatingPouches => "Laminating Pouches",
            Self::BinLiners => "Bin Liners",
            Self::DisposableGloves => "Disposable Gloves",
            Self::SoapBottles => "Soap Bottles",
        }
    }
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

/// A physical space audited by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomKind {
    Lunchroom,
    Playground,
    Staffroom,
    Office,
    Library,
    Gym,
    Corridors,
    ScienceLabs,
    ArtRooms,
    Classrooms,
    Bathrooms,
}

/// Rooms collected unconditionally on the lunchroom & playground step.
pub const CORE_ROOMS: [RoomKind; 2] = [RoomKind::Lunchroom, RoomKind::Playground];

/// Rooms the auditor opts into on the rooms step.
pub const OPTIONAL_ROOMS: [RoomKind; 9] = [
    RoomKind::Staffroom,
    RoomKind::Office,
    RoomKind::Library,
    RoomKind::Gym,
    RoomKind::Corridors,
    RoomKind::ScienceLabs,
    RoomKind::ArtRooms,
    RoomKind::Classrooms,
    RoomKind::Bathrooms,
];

impl RoomKind {
    /// Items counted in this room, in form order.
    pub fn items(self) -> &'static [ItemKind] {
        use ItemKind::*;
        match self {
            Self::Lunchroom => &[
                PlasticBottles,
                PlasticCutlery,
                YoghurtPots,
                SnackWrappers,
                PlasticStraws,
                FoodContainers,
                ClingFilm,
                PlasticCups,
            ],
            Self::Playground => &[PlasticBottles, SnackWrappers, PlasticBags],
            Self::Staffroom => &[
                PlasticBottles,
                PlasticCups,
                ClingFilm,
                FoodContainers,
                SnackWrappers,
                BinLiners,
            ],
            Self::Office => &[PlasticBottles, Pens, Folders, LaminatingPouches, BinLiners],
            Self::Library => &[PlasticBottles, Pens, Folders, BinLiners],
            Self::Gym => &[PlasticBottles, SnackWrappers, BinLiners],
            Self::Corridors => &[PlasticBottles, SnackWrappers, BinLiners],
            Self::ScienceLabs => &[PlasticBottles, PlasticCups, DisposableGloves, BinLiners],
            Self::ArtRooms => &[PlasticBottles, GlueSticks, Pens, BinLiners],
            Self::Classrooms => &[
                Pens,
                GlueSticks,
                Folders,
                LaminatingPouches,
                SnackWrappers,
                BinLiners,
            ],
            Self::Bathrooms => &[SoapBottles, BinLiners],
        }
    }

    /// Whether the room is gated by a selection checkbox.
    pub fn is_optional(self) -> bool {
        !CORE_ROOMS.contains(&self)
    }

    /// Wire key of the room inside its section.
    pub fn key(self) -> &'static str {
        match self {
            Self::Lunchroom => "lunchroom",
            Self::Playground => "playground",
            Self::Staffroom => "staffroom",
            Self::Office => "office",
            Self::Library => "library",
            Self::Gym => "gym",
            Self::Corridors => "corridors",
            Self::ScienceLabs => "scienceLabs",
            Self::ArtRooms => "artRooms",
            Self::Classrooms => "classrooms",
            Self::Bathrooms => "bathrooms",
        }
    }

    /// Human-readable label for the room.
    pub fn label(self) -> &'static str {
        match self {
            Self::Lunchroom => "Lunchroom",
            Self::Playground => "Playground",
            Self::Staffroom => "Staffroom",
            Self::Office => "Office",
            Self::Library => "Library",
            Self::Gym => "Gym",
            Self::Corridors => "Corridors",
            Self::ScienceLabs => "Science Labs",
            Self::ArtRooms => "Art Rooms",
            Self::Classrooms => "Classrooms",
            Self::Bathrooms => "Bathrooms",
        }
    }
}
