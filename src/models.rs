use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    pub user_data: BTreeMap<String, String>,
    pub workout_plan: BTreeMap<String, WorkoutDay>,
    pub diet_plan: BTreeMap<String, BTreeMap<String, String>>,
    pub health_metrics: BTreeMap<String, String>,
    pub page_content: PageContent,
    pub current_page: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WorkoutDay {
    pub focus: String,
    pub exercises: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    pub title: String,
    pub headings: Vec<String>,
    pub visible_text: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Ai,
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub context: Option<ChatContext>,
}

/// Body of a `/chat` reply. A well-formed success carries `response`; an
/// application failure carries `error`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChatReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatReply {
    pub fn response(text: impl Into<String>) -> Self {
        Self {
            response: Some(text.into()),
            error: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            response: None,
            error: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FitnessProfile {
    pub user_data: BTreeMap<String, String>,
    pub workout_plan: Vec<PlannedWorkout>,
    pub diet_plan: Vec<PlannedDay>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlannedWorkout {
    pub day: String,
    pub focus: String,
    pub exercises: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlannedDay {
    pub day: String,
    pub meals: Vec<PlannedMeal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlannedMeal {
    pub name: String,
    pub description: String,
}

impl FitnessProfile {
    pub fn sample() -> Self {
        let user_data = [
            ("Name", "Alex"),
            ("Age", "29"),
            ("Goal", "Build muscle"),
            ("Activity Level", "Moderate"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let workout = |day: &str, focus: &str, exercises: &[&str]| PlannedWorkout {
            day: day.to_string(),
            focus: focus.to_string(),
            exercises: exercises.iter().map(|e| e.to_string()).collect(),
        };
        let meal = |name: &str, description: &str| PlannedMeal {
            name: name.to_string(),
            description: description.to_string(),
        };

        Self {
            user_data,
            workout_plan: vec![
                workout(
                    "Monday",
                    "Upper Body",
                    &["Push-ups 3x12", "Dumbbell rows 3x10", "Shoulder press 3x10"],
                ),
                workout(
                    "Wednesday",
                    "Lower Body",
                    &["Squats 3x15", "Lunges 3x10", "Calf raises 3x20"],
                ),
                workout("Friday", "Cardio", &["Running 25 min", "HIIT 15 min"]),
            ],
            diet_plan: vec![
                PlannedDay {
                    day: "Day 1".to_string(),
                    meals: vec![
                        meal("Breakfast", "Oatmeal and fruit"),
                        meal("Lunch", "Grilled chicken salad"),
                        meal("Dinner", "Salmon with quinoa"),
                    ],
                },
                PlannedDay {
                    day: "Day 2".to_string(),
                    meals: vec![
                        meal("Breakfast", "Greek yogurt with berries"),
                        meal("Lunch", "Turkey wrap"),
                        meal("Dinner", "Lentil curry with rice"),
                    ],
                },
            ],
            height_cm: Some(178.0),
            weight_kg: Some(74.0),
        }
    }
}
