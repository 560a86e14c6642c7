//! The study region and the fixed color assignments shared by every chart.

use crate::schema::purpose;

/// Destination countries under analysis, in display order.
pub const STUDY_REGION: [&str; 6] = [
    "Ghana",
    "Côte d’Ivoire",
    "Cameroon",
    "Gabon",
    "Congo",
    "Democratic Republic of the Congo",
];

const REGION_COLORS: [(&str, &str); 6] = [
    ("Ghana", "#006B3F"),
    ("Côte d’Ivoire", "#FF8200"),
    ("Cameroon", "#CE1126"),
    ("Gabon", "#FCD116"),
    ("Congo", "#264653"),
    ("Democratic Republic of the Congo", "#007FFF"),
];

const PURPOSE_COLORS: [(&str, &str); 3] = [
    (purpose::BUSINESS, "#0E14E0"),
    (purpose::LEISURE, "#33DEF0"),
    (purpose::UNSPECIFIED, "#5B6061"),
];

/// plotly's qualitative "Vivid" sequence, used where no fixed mapping exists.
pub const VIVID: [&str; 11] = [
    "rgb(229, 134, 6)",
    "rgb(93, 105, 177)",
    "rgb(82, 188, 163)",
    "rgb(153, 201, 69)",
    "rgb(204, 97, 176)",
    "rgb(36, 121, 108)",
    "rgb(218, 165, 27)",
    "rgb(47, 138, 196)",
    "rgb(118, 78, 159)",
    "rgb(237, 100, 90)",
    "rgb(165, 170, 153)",
];

pub const GOLD: &str = "#D4AF37";

pub fn region_color(area: &str) -> Option<&'static str> {
    REGION_COLORS
        .iter()
        .find(|(name, _)| *name == area)
        .map(|(_, color)| *color)
}

pub fn purpose_color(category: &str) -> Option<&'static str> {
    PURPOSE_COLORS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, color)| *color)
}
