use serde::{Deserialize, Serialize};

/// Columns recognized in a menu nutrition export. Anything else is dropped on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuColumn {
    MenuItemId,
    FoodCategory,
    Restaurant,
    ItemName,
    ItemDescription,
    Calories,
    TotalFat,
    SaturatedFat,
    TransFat,
    Cholesterol,
    Sodium,
    Carbohydrates,
    DietaryFiber,
    Sugar,
    Protein,
}

impl MenuColumn {
    pub const COUNT: usize = 15;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::MenuItemId,
            Self::FoodCategory,
            Self::Restaurant,
            Self::ItemName,
            Self::ItemDescription,
            Self::Calories,
            Self::TotalFat,
            Self::SaturatedFat,
            Self::TransFat,
            Self::Cholesterol,
            Self::Sodium,
            Self::Carbohydrates,
            Self::DietaryFiber,
            Self::Sugar,
            Self::Protein,
        ]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::MenuItemId => "menu_item_id",
            Self::FoodCategory => "food_category",
            Self::Restaurant => "restaurant",
            Self::ItemName => "item_name",
            Self::ItemDescription => "item_description",
            Self::Calories => "calories",
            Self::TotalFat => "total_fat",
            Self::SaturatedFat => "saturated_fat",
            Self::TransFat => "trans_fat",
            Self::Cholesterol => "cholesterol",
            Self::Sodium => "sodium",
            Self::Carbohydrates => "carbohydrates",
            Self::DietaryFiber => "dietary_fiber",
            Self::Sugar => "sugar",
            Self::Protein => "protein",
        }
    }

    pub const fn is_numeric(self) -> bool {
        !matches!(
            self,
            Self::MenuItemId
                | Self::FoodCategory
                | Self::Restaurant
                | Self::ItemName
                | Self::ItemDescription
        )
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Matches a header cell against the known column names, ignoring a stray BOM,
    /// surrounding whitespace and ASCII case.
    pub fn from_header(header: &str) -> Option<Self> {
        let cleaned = header.replace(['\u{feff}', '\u{200b}'], "");
        let cleaned = cleaned.trim();
        Self::ordered()
            .into_iter()
            .find(|column| column.name().eq_ignore_ascii_case(cleaned))
    }
}

/// Nutrients tracked besides calories, in food-label units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    TotalFat,
    SaturatedFat,
    TransFat,
    Cholesterol,
    Sodium,
    Carbohydrates,
    DietaryFiber,
    Sugar,
    Protein,
}

impl Nutrient {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::TotalFat,
            Self::SaturatedFat,
            Self::TransFat,
            Self::Cholesterol,
            Self::Sodium,
            Self::Carbohydrates,
            Self::DietaryFiber,
            Self::Sugar,
            Self::Protein,
        ]
    }

    pub const fn column(self) -> MenuColumn {
        match self {
            Self::TotalFat => MenuColumn::TotalFat,
            Self::SaturatedFat => MenuColumn::SaturatedFat,
            Self::TransFat => MenuColumn::TransFat,
            Self::Cholesterol => MenuColumn::Cholesterol,
            Self::Sodium => MenuColumn::Sodium,
            Self::Carbohydrates => MenuColumn::Carbohydrates,
            Self::DietaryFiber => MenuColumn::DietaryFiber,
            Self::Sugar => MenuColumn::Sugar,
            Self::Protein => MenuColumn::Protein,
        }
    }
}

/// Optional nutrient quantities; `None` means the source cell was absent or unusable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub total_fat: Option<f64>,
    pub saturated_fat: Option<f64>,
    pub trans_fat: Option<f64>,
    pub cholesterol: Option<f64>,
    pub sodium: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub dietary_fiber: Option<f64>,
    pub sugar: Option<f64>,
    pub protein: Option<f64>,
}

impl Nutrients {
    pub fn get(&self, nutrient: Nutrient) -> Option<f64> {
        match nutrient {
            Nutrient::TotalFat => self.total_fat,
            Nutrient::SaturatedFat => self.saturated_fat,
            Nutrient::TransFat => self.trans_fat,
            Nutrient::Cholesterol => self.cholesterol,
            Nutrient::Sodium => self.sodium,
            Nutrient::Carbohydrates => self.carbohydrates,
            Nutrient::DietaryFiber => self.dietary_fiber,
            Nutrient::Sugar => self.sugar,
            Nutrient::Protein => self.protein,
        }
    }

    pub(crate) fn slot_mut(&mut self, nutrient: Nutrient) -> &mut Option<f64> {
        match nutrient {
            Nutrient::TotalFat => &mut self.total_fat,
            Nutrient::SaturatedFat => &mut self.saturated_fat,
            Nutrient::TransFat => &mut self.trans_fat,
            Nutrient::Cholesterol => &mut self.cholesterol,
            Nutrient::Sodium => &mut self.sodium,
            Nutrient::Carbohydrates => &mut self.carbohydrates,
            Nutrient::DietaryFiber => &mut self.dietary_fiber,
            Nutrient::Sugar => &mut self.sugar,
            Nutrient::Protein => &mut self.protein,
        }
    }

    pub fn present_count(&self) -> usize {
        Nutrient::ordered()
            .into_iter()
            .filter(|nutrient| self.get(*nutrient).is_some())
            .count()
    }
}

/// A menu row that survived normalization: identity present, calories positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub menu_item_id: Option<String>,
    pub food_category: Option<String>,
    pub restaurant: String,
    pub item_name: String,
    pub item_description: Option<String>,
    pub calories: f64,
    pub nutrients: Nutrients,
}

impl MenuItem {
    pub fn new(restaurant: impl Into<String>, item_name: impl Into<String>, calories: f64) -> Self {
        Self {
            menu_item_id: None,
            food_category: None,
            restaurant: restaurant.into(),
            item_name: item_name.into(),
            item_description: None,
            calories,
            nutrients: Nutrients::default(),
        }
    }

    pub fn with_nutrient(mut self, nutrient: Nutrient, value: f64) -> Self {
        *self.nutrients.slot_mut(nutrient) = Some(value);
        self
    }

    /// Count of non-missing numeric fields, calories included.
    pub fn numeric_count(&self) -> usize {
        1 + self.nutrients.present_count()
    }
}

/// A menu item enriched with calorie densities and its composite macro score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem {
    #[serde(flatten)]
    pub item: MenuItem,
    pub protein_per_100kcal: Option<f64>,
    pub fiber_per_100kcal: f64,
    pub macro_score: f64,
}

impl ScoredItem {
    pub fn calories(&self) -> f64 {
        self.item.calories
    }

    pub fn nutrient(&self, nutrient: Nutrient) -> Option<f64> {
        self.item.nutrients.get(nutrient)
    }
}
