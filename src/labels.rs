//! Channel label tables
//!
//! Each frame category has its own table mapping the 4-bit label field of a
//! data header to a channel name. Label 0xF under SOH 0x01 is reserved for
//! status frames and 0xE (QNH command) is not decoded.

use crate::core::Category;

const SOH1_LABELS: &[(u8, &str)] = &[
    (0x1, "Qc"),
    (0x2, "Ps"),
    (0x3, "AoA"),
    (0x4, "AoS"),
    (0x5, "CAS"),
    (0x6, "TAS"),
    (0x7, "Hp"),
    (0x8, "Ma"),
    (0x9, "SAT"),
    (0xA, "TAT"),
    (0xB, "dp1"),
    (0xC, "dp2"),
    (0xD, "PCB"),
];

const SOH2_LABELS: &[(u8, &str)] = &[
    (0x1, "CR"),
    (0x2, "PT"),
    (0x5, "CAS-rate"),
    (0x6, "TAS-rate"),
    (0x7, "Hbaro"),
    (0xC, "DTR"),
    (0xD, "HTR"),
    (0xE, "CUR"),
];

const SOH3_LABELS: &[(u8, &str)] = &[
    (0x1, "Qc raw"),
    (0x2, "Ps raw"),
    (0x3, "dPaoa"),
    (0x4, "dPaos"),
    (0x5, "IAT"),
    (0x6, "BAT"),
];

const SOH5_LABELS: &[(u8, &str)] = &[
    (0x1, "Qc*"),
    (0x2, "Ps*"),
    (0x3, "Hp*"),
    (0x4, "H baro*"),
    (0x5, "CAS*"),
    (0x6, "TAS*"),
    (0x7, "CR*"),
];

/// The label table of a category
pub fn table(category: Category) -> &'static [(u8, &'static str)] {
    match category {
        Category::Soh1 => SOH1_LABELS,
        Category::Soh2 => SOH2_LABELS,
        Category::Soh3 => SOH3_LABELS,
        Category::Soh5 => SOH5_LABELS,
    }
}

/// Look up the channel name of a label field
pub fn lookup(category: Category, field_id: u8) -> Option<&'static str> {
    table(category)
        .iter()
        .find(|(id, _)| *id == field_id)
        .map(|(_, name)| *name)
}

/// Reverse lookup, used when building frames
pub fn field_id(category: Category, name: &str) -> Option<u8> {
    table(category)
        .iter()
        .find(|(_, label)| *label == name)
        .map(|(id, _)| *id)
}
