use super::{parse_whole, required, round1, seed_time, whole_or_zero, PageView};
use crate::classify::{percent_of, remaining};
use crate::config::GoalDefaults;
use crate::errors::AppResult;
use crate::models::{Meal, MealForm, MealKind, RecordId};
use crate::store::{next_record_id, now_minute, InsertAt, RecordStore};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroTotals {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

impl MacroTotals {
    fn from_goals(goals: &GoalDefaults) -> Self {
        Self {
            calories: goals.calories,
            protein: goals.protein_g,
            carbs: goals.carbs_g,
            fat: goals.fat_g,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NutritionTracker {
    meals: RecordStore<Meal>,
    goals: MacroTotals,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionSnapshot {
    pub meals: Vec<Meal>,
    pub totals: MacroTotals,
    pub goals: MacroTotals,
    pub calories_percent: f64,
    pub protein_percent: f64,
    pub carbs_percent: f64,
    pub fat_percent: f64,
    pub calories_remaining: f64,
}

impl NutritionTracker {
    pub fn new(goals: &GoalDefaults) -> Self {
        Self {
            meals: RecordStore::new(InsertAt::Back),
            goals: MacroTotals::from_goals(goals),
        }
    }

    pub fn seeded(goals: &GoalDefaults) -> Self {
        let meal = |id: u64, kind: MealKind, food: &str, macros: [u32; 4], hour: u32, minute: u32| Meal {
            id: RecordId(id),
            kind,
            food: food.to_string(),
            calories: macros[0],
            protein: macros[1],
            carbs: macros[2],
            fat: macros[3],
            time: seed_time(hour, minute),
        };
        let mut tracker = Self::new(goals);
        tracker.meals = RecordStore::seeded(
            vec![
                meal(1, MealKind::Breakfast, "Oatmeal with berries", [350, 12, 65, 8], 8, 30),
                meal(2, MealKind::Lunch, "Grilled chicken salad", [450, 35, 20, 25], 12, 45),
                meal(3, MealKind::Dinner, "Salmon with vegetables", [520, 40, 30, 28], 19, 15),
            ],
            InsertAt::Back,
        );
        tracker
    }

    pub fn meals(&self) -> &[Meal] {
        self.meals.list()
    }

    /// Type, food and calories are required; blank macros count as zero.
    pub fn add(&mut self, form: MealForm) -> AppResult<Meal> {
        let kind = required("type", &form.kind)?.parse::<MealKind>()?;
        let food = required("food", &form.food)?.to_string();
        let calories = parse_whole("calories", &form.calories)?;

        let meal = Meal {
            id: next_record_id(),
            kind,
            food,
            calories,
            protein: whole_or_zero(&form.protein),
            carbs: whole_or_zero(&form.carbs),
            fat: whole_or_zero(&form.fat),
            time: now_minute().time(),
        };
        tracing::info!(id = %meal.id, calories, "meal added");
        Ok(self.meals.insert(meal).clone())
    }

    pub fn remove(&mut self, id: RecordId) -> Option<Meal> {
        let removed = self.meals.remove(id);
        if removed.is_some() {
            tracing::info!(id = %id, "meal removed");
        }
        removed
    }

    /// Sums of every meal, saturating at `u32::MAX`.
    pub fn totals(&self) -> MacroTotals {
        self.meals.iter().fold(
            MacroTotals {
                calories: 0,
                protein: 0,
                carbs: 0,
                fat: 0,
            },
            |totals, meal| MacroTotals {
                calories: totals.calories.saturating_add(meal.calories),
                protein: totals.protein.saturating_add(meal.protein),
                carbs: totals.carbs.saturating_add(meal.carbs),
                fat: totals.fat.saturating_add(meal.fat),
            },
        )
    }
}

impl PageView for NutritionTracker {
    type Snapshot = NutritionSnapshot;

    fn snapshot(&self) -> NutritionSnapshot {
        let totals = self.totals();
        let percent = |value: u32, goal: u32| round1(percent_of(f64::from(value), f64::from(goal)));
        NutritionSnapshot {
            meals: self.meals.list().to_vec(),
            calories_percent: percent(totals.calories, self.goals.calories),
            protein_percent: percent(totals.protein, self.goals.protein),
            carbs_percent: percent(totals.carbs, self.goals.carbs),
            fat_percent: percent(totals.fat, self.goals.fat),
            calories_remaining: remaining(f64::from(totals.calories), f64::from(self.goals.calories)),
            totals,
            goals: self.goals,
        }
    }
}
