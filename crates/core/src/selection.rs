//! Room-selection inference for drafts saved before the selection
//! checkbox existed.
//!
//! A stored flag is authoritative, including an explicit `false`. Only
//! when the flag is absent is it reconstructed from whether the auditor
//! entered anything in that room.

use crate::audit::{Part3Data, RoomSection};
use crate::catalog::{ItemKind, RoomKind};

/// A single input of a room section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomField {
    Item(ItemKind),
    Other,
    OtherDescription,
}

/// Every input shown for `room`, in form order.
pub fn relevant_fields(room: RoomKind) -> Vec<RoomField> {
    room.items()
        .iter()
        .map(|item| RoomField::Item(*item))
        .chain([RoomField::Other, RoomField::OtherDescription])
        .collect()
}

/// `true` when any of `fields` holds content in `section`.
///
/// Counts count as content unless blank or the default `"0"`; the
/// description counts unless blank.
pub fn infer_selection(section: &RoomSection, fields: &[RoomField]) -> bool {
    fields.iter().any(|field| match field {
        RoomField::Item(item) => section.counts.get(*item).is_some_and(|c| c.is_filled()),
        RoomField::Other => section.other.as_ref().is_some_and(|c| c.is_filled()),
        RoomField::OtherDescription => section
            .other_description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty()),
    })
}

/// Resolve the selection flag of one room, inferring it only when absent.
pub fn resolve_selection(room: RoomKind, section: &mut RoomSection) {
    if section.selected.is_none() {
        section.selected = Some(infer_selection(section, &relevant_fields(room)));
    }
}

/// Resolve every optional room of a stored part 3, then fill missing
/// catalog fields with defaults.
pub fn restore_part3(part3: &mut Part3Data) {
    for (room, section) in part3.rooms_mut() {
        resolve_selection(room, section);
        section.fill_defaults(room);
    }
}
