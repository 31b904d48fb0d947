//! Region Registry Module
//! Fixed enumeration of the oblast identifiers used by the VHI files.

/// `(region_id, display name)` pairs, ordered by id.
pub const REGIONS: [(i32, &str); 27] = [
    (1, "Cherkasy"),
    (2, "Chernihiv"),
    (3, "Chernivtsi"),
    (4, "Crimea"),
    (5, "Dnipropetrovsk"),
    (6, "Donetsk"),
    (7, "Ivano-Frankivsk"),
    (8, "Kharkiv"),
    (9, "Kherson"),
    (10, "Khmelnytskyi"),
    (11, "Kyiv"),
    (12, "Kyiv City"),
    (13, "Kirovohrad"),
    (14, "Luhansk"),
    (15, "Lviv"),
    (16, "Mykolaiv"),
    (17, "Odesa"),
    (18, "Poltava"),
    (19, "Rivne"),
    (20, "Sevastopol"),
    (21, "Sumy"),
    (22, "Ternopil"),
    (23, "Zakarpattia"),
    (24, "Vinnytsia"),
    (25, "Volyn"),
    (26, "Zaporizhzhia"),
    (27, "Zhytomyr"),
];

/// Display name for a region id. Unknown ids fall back to `Region <id>`.
pub fn region_name(id: i32) -> String {
    REGIONS
        .iter()
        .find(|(rid, _)| *rid == id)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| format!("Region {id}"))
}
