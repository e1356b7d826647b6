use serde::{Deserialize, Serialize};

/// The fixed set of expense categories.
///
/// The declaration order is the enumeration order used everywhere categories are listed, and
/// it decides ties when picking the top category.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transportation,
    Entertainment,
    Shopping,
    Bills,
    Other,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);

impl Category {
    /// All categories in enumeration order.
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transportation,
        Category::Entertainment,
        Category::Shopping,
        Category::Bills,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => FOOD_STR,
            Category::Transportation => TRANSPORTATION_STR,
            Category::Entertainment => ENTERTAINMENT_STR,
            Category::Shopping => SHOPPING_STR,
            Category::Bills => BILLS_STR,
            Category::Other => OTHER_STR,
        }
    }
}

const FOOD_STR: &str = "Food";
const TRANSPORTATION_STR: &str = "Transportation";
const ENTERTAINMENT_STR: &str = "Entertainment";
const SHOPPING_STR: &str = "Shopping";
const BILLS_STR: &str = "Bills";
const OTHER_STR: &str = "Other";
