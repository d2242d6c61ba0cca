//! Weekly lifestyle plans keyed by disease and prediction outcome.
//!
//! The lookup is pure and total: any tag outside the four diseases gets the
//! baseline plan, whatever the prediction.

use diagno_contracts::{disease::DiseaseType, prediction::WeeklyPlan};

const BASE_SLEEP: &str = "7-8 hours per night";
const BASE_FOOD: [&str; 2] = ["Drink plenty of water", "Eat regular meals"];
const BASE_WORKOUT: [&str; 2] = ["Take a 30-minute walk daily", "Practice deep breathing exercises"];

struct AtRisk {
    sleep: &'static str,
    food: &'static [&'static str],
    workout: &'static [&'static str],
}

/// Extra entries appended to the baseline when not at risk.
struct Maintenance {
    food: &'static str,
    workout: &'static str,
}

fn at_risk(disease: DiseaseType) -> AtRisk {
    match disease {
        DiseaseType::Diabetes => AtRisk {
            sleep: "7-8 hours per night",
            food: &[
                "Choose complex carbohydrates (whole grains, oats)",
                "Include lean proteins (chicken, fish, legumes)",
                "Eat plenty of vegetables and fruits",
                "Limit processed foods and sugary drinks",
                "Monitor portion sizes",
            ],
            workout: &[
                "Walk for 30-45 minutes daily",
                "Try resistance training 2-3 times per week",
                "Monitor blood sugar before and after exercise",
                "Stay hydrated during workouts",
            ],
        },
        DiseaseType::Heart => AtRisk {
            sleep: "7-9 hours per night",
            food: &[
                "Follow a Mediterranean diet",
                "Reduce sodium intake",
                "Include omega-3 rich foods (salmon, walnuts)",
                "Limit saturated and trans fats",
                "Eat plenty of fruits and vegetables",
            ],
            workout: &[
                "Start with 15-20 minutes of cardio daily",
                "Practice yoga or meditation",
                "Avoid high-intensity exercise initially",
                "Consult doctor before starting new routines",
            ],
        },
        DiseaseType::Stroke => AtRisk {
            sleep: "8-9 hours per night",
            food: &[
                "Follow DASH diet principles",
                "Reduce sodium significantly",
                "Include potassium-rich foods (bananas, spinach)",
                "Limit alcohol consumption",
                "Choose whole grains over refined ones",
            ],
            workout: &[
                "Start with gentle stretching exercises",
                "Take short walks multiple times a day",
                "Practice balance exercises",
                "Consider physical therapy consultation",
            ],
        },
        DiseaseType::Parkinsons => AtRisk {
            sleep: "8-9 hours per night with good sleep hygiene",
            food: &[
                "Include antioxidant-rich foods (berries, leafy greens)",
                "Add turmeric and green tea to diet",
                "Ensure adequate protein intake",
                "Consider smaller, frequent meals",
                "Stay well hydrated",
            ],
            workout: &[
                "Practice tai chi or yoga",
                "Include balance and coordination exercises",
                "Try dancing or rhythmic activities",
                "Focus on flexibility and stretching",
                "Consider physical therapy",
            ],
        },
    }
}

fn maintenance(disease: DiseaseType) -> Maintenance {
    match disease {
        DiseaseType::Diabetes => Maintenance {
            food: "Maintain balanced nutrition",
            workout: "Continue regular physical activity",
        },
        DiseaseType::Heart => Maintenance {
            food: "Include heart-healthy foods like nuts and fish",
            workout: "Include cardio exercises 3-4 times per week",
        },
        DiseaseType::Stroke => Maintenance {
            food: "Monitor blood pressure through diet",
            workout: "Include activities that improve balance",
        },
        DiseaseType::Parkinsons => Maintenance {
            food: "Include brain-healthy foods like nuts and berries",
            workout: "Include coordination and balance activities",
        },
    }
}

fn owned(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|s| s.to_string()).collect()
}

/// The plan shown to everyone: no disease-specific advice.
pub fn baseline_plan() -> WeeklyPlan {
    WeeklyPlan {
        sleep_hours: BASE_SLEEP.to_string(),
        food_recommendations: owned(&BASE_FOOD),
        workout_tips: owned(&BASE_WORKOUT),
    }
}

/// Plan for a known disease. `prediction == 1` selects the at-risk plan;
/// any other value gets the baseline plus one maintenance entry per list.
pub fn plan_for(disease: DiseaseType, prediction: u8) -> WeeklyPlan {
    if prediction == 1 {
        let plan = at_risk(disease);
        return WeeklyPlan {
            sleep_hours: plan.sleep.to_string(),
            food_recommendations: owned(plan.food),
            workout_tips: owned(plan.workout),
        };
    }

    let extra = maintenance(disease);
    let mut plan = baseline_plan();
    plan.food_recommendations.push(extra.food.to_string());
    plan.workout_tips.push(extra.workout.to_string());
    plan
}

/// Look up a plan by disease tag as it appears in routes (`"heart"`).
/// Tags are matched exactly; anything else gets the baseline plan.
pub fn health_recommendations(disease_tag: &str, prediction: u8) -> WeeklyPlan {
    match DiseaseType::ALL.iter().find(|d| d.slug() == disease_tag) {
        Some(&disease) => plan_for(disease, prediction),
        None => baseline_plan(),
    }
}
