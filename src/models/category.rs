/// Search categories offered by the scan selector and the category filter.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "RESTAURANTE",
    "HAMBURGUESAS",
    "TAQUERIA",
    "FONDA",
    "FOOD TRUCK",
    "CAFETERIA",
    "LONCHERIA",
];

pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}
