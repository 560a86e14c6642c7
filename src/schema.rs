/// Column-name and label constants for the arrivals dataset.
/// Single source of truth for every stage and renderer.

// ── Observation columns ─────────────────────────────────────────────────────
pub mod observation {
    pub const REPORTER_AREA: &str = "reporter_area_label";
    pub const PARTNER_AREA: &str = "partner_area_label";
    pub const INDICATOR: &str = "indicator_label";
    pub const YEAR: &str = "year";
    pub const VALUE: &str = "value";

    pub const REQUIRED: [&str; 5] = [REPORTER_AREA, PARTNER_AREA, INDICATOR, YEAR, VALUE];

    /// Extraneous column some exports carry; removed during cleaning.
    pub const EXTRA: &str = "drop";
    /// Prefix given to header cells that were left blank in the workbook.
    pub const UNNAMED_PREFIX: &str = "unnamed_";
}

// ── Derived summary columns ─────────────────────────────────────────────────
pub mod summary {
    pub const CATEGORY: &str = "category";
    pub const SHARE_PCT: &str = "share_pct";
    pub const SIZE_VALUE: &str = "size_value";
    pub const GRID_ORDER: &str = "grid_order";
}

// ── Partner area values ─────────────────────────────────────────────────────
pub mod partner {
    pub const WORLD: &str = "World";
}

// ── Indicator labels ────────────────────────────────────────────────────────
pub mod indicator {
    pub const PURPOSE_BUSINESS: &str =
        "inbound - trips - by purpose - business - overnight visitors (tourists)";
    pub const PURPOSE_TOTAL: &str =
        "inbound - trips - by purpose - total - overnight visitors (tourists)";
    pub const PURPOSE_PERSONAL: &str =
        "inbound - trips - by purpose - personal - overnight visitors (tourists)";
    pub const RESIDENCE_TOTAL: &str =
        "inbound - trips - by area of residence - total - overnight visitors (tourists)";

    /// Substring (case-insensitive) marking origin-region breakdowns.
    pub const REGION_MARKER: &str = "region";
    /// Substring (case-insensitive) marking undifferentiated totals.
    pub const TOTAL_MARKER: &str = "total";
}

// ── Visitor-purpose categories ──────────────────────────────────────────────
pub mod purpose {
    pub const BUSINESS: &str = "Negocios";
    pub const LEISURE: &str = "Ocio / Cultura";
    pub const UNSPECIFIED: &str = "Dato general no desglosado";

    /// Stacking/legend order.
    pub const ORDER: [&str; 3] = [LEISURE, BUSINESS, UNSPECIFIED];
}

// ── Year windows ────────────────────────────────────────────────────────────
pub mod years {
    pub const ORIGIN_FLOWS_FROM: i32 = 2017;
    pub const TOP_HUBS_FROM: i32 = 2015;
    pub const GRID_FIRST: i32 = 1995;
    pub const GRID_LAST: i32 = 2022;
}
