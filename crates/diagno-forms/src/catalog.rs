//! The four disease forms as descriptor tables.
//!
//! Labels, bounds, steps and defaults follow the assessment screens the
//! backend's models were trained against.

use diagno_contracts::disease::DiseaseType;

use crate::field::{ChoiceOption as O, FieldDescriptor as F};

const NO_YES: &[O] = &[O { value: 0, label: "No" }, O { value: 1, label: "Yes" }];
const YES_NO: &[O] = &[O { value: 1, label: "Yes" }, O { value: 0, label: "No" }];
const SEX: &[O] = &[O { value: 1, label: "Male" }, O { value: 0, label: "Female" }];

pub static DIABETES: [F; 8] = [
    F::number("pregnancies", "Number of Pregnancies", 0.0, 17.0, 1.0, 0.0),
    F::number("glucose", "Plasma Glucose (mg/dL)", 0.0, 200.0, 1.0, 120.0),
    F::number("bloodPressure", "Blood Pressure (mm Hg)", 0.0, 150.0, 1.0, 80.0),
    F::number("skinThickness", "Skin Thickness (mm)", 0.0, 100.0, 1.0, 20.0),
    F::number("insulin", "Insulin (mu U/ml)", 0.0, 900.0, 1.0, 80.0),
    F::number("bmi", "BMI (kg/m²)", 0.0, 70.0, 0.1, 25.0),
    F::number("diabetesPedigreeFunction", "Diabetes Pedigree Function", 0.0, 3.0, 0.001, 0.5),
    F::number("age", "Age (years)", 21.0, 120.0, 1.0, 30.0),
];

pub static HEART: [F; 13] = [
    F::number("age", "Age", 29.0, 120.0, 1.0, 50.0),
    F::choice("sex", "Sex", SEX, 1.0),
    F::choice(
        "cp",
        "Chest Pain Type",
        &[
            O { value: 0, label: "Typical Angina" },
            O { value: 1, label: "Atypical Angina" },
            O { value: 2, label: "Non-anginal Pain" },
            O { value: 3, label: "Asymptomatic" },
        ],
        0.0,
    ),
    F::number("trestbps", "Resting Blood Pressure", 90.0, 200.0, 1.0, 120.0),
    F::number("chol", "Cholesterol (mg/dl)", 100.0, 600.0, 1.0, 200.0),
    F::choice("fbs", "Fasting Blood Sugar > 120 mg/dl", NO_YES, 0.0),
    F::choice(
        "restecg",
        "Resting ECG",
        &[
            O { value: 0, label: "Normal" },
            O { value: 1, label: "ST-T Wave Abnormality" },
            O { value: 2, label: "Left Ventricular Hypertrophy" },
        ],
        0.0,
    ),
    F::number("thalach", "Max Heart Rate", 70.0, 220.0, 1.0, 150.0),
    F::choice("exang", "Exercise Induced Angina", NO_YES, 0.0),
    F::number("oldpeak", "ST Depression", 0.0, 10.0, 0.1, 1.0),
    F::choice(
        "slope",
        "Slope",
        &[
            O { value: 0, label: "Downsloping" },
            O { value: 1, label: "Flat" },
            O { value: 2, label: "Upsloping" },
        ],
        1.0,
    ),
    F::choice(
        "ca",
        "CA",
        &[
            O { value: 0, label: "0" },
            O { value: 1, label: "1" },
            O { value: 2, label: "2" },
            O { value: 3, label: "3" },
        ],
        0.0,
    ),
    F::choice(
        "thal",
        "Thal",
        &[
            O { value: 1, label: "Normal" },
            O { value: 2, label: "Fixed Defect" },
            O { value: 3, label: "Reversable Defect" },
        ],
        2.0,
    ),
];

pub static STROKE: [F; 10] = [
    F::choice("gender", "Gender", SEX, 1.0),
    F::number("age", "Age", 0.0, 120.0, 1.0, 45.0),
    F::choice("hypertension", "Hypertension", NO_YES, 0.0),
    F::choice("heart_disease", "Heart Disease", NO_YES, 0.0),
    F::choice("ever_married", "Ever Married", YES_NO, 1.0),
    F::choice(
        "work_type",
        "Work Type",
        &[
            O { value: 0, label: "Children" },
            O { value: 1, label: "Government Job" },
            O { value: 2, label: "Never Worked" },
            O { value: 3, label: "Private" },
            O { value: 4, label: "Self-employed" },
        ],
        2.0,
    ),
    F::choice(
        "residence_type",
        "Residence Type",
        &[O { value: 0, label: "Rural" }, O { value: 1, label: "Urban" }],
        1.0,
    ),
    F::number("avg_glucose_level", "Average Glucose Level", 50.0, 300.0, 0.1, 100.0),
    F::number("bmi", "BMI", 10.0, 100.0, 0.1, 25.0),
    F::choice(
        "smoking_status",
        "Smoking Status",
        &[
            O { value: 0, label: "Never Smoked" },
            O { value: 1, label: "Unknown" },
            O { value: 2, label: "Formerly Smoked" },
            O { value: 3, label: "Smokes" },
        ],
        0.0,
    ),
];

pub static PARKINSONS: [F; 22] = [
    F::number("MDVP:Fo(Hz)", "Average vocal fundamental frequency", 80.0, 250.0, 0.1, 150.0),
    F::number("MDVP:Fhi(Hz)", "Maximum vocal fundamental frequency", 100.0, 600.0, 0.1, 200.0),
    F::number("MDVP:Flo(Hz)", "Minimum vocal fundamental frequency", 60.0, 200.0, 0.1, 100.0),
    F::number("MDVP:Jitter(%)", "Jitter percentage", 0.0, 0.1, 0.0001, 0.005),
    F::number("MDVP:Jitter(Abs)", "Absolute jitter", 0.0, 0.001, 0.000001, 0.00005),
    F::number("MDVP:RAP", "Relative amplitude perturbation", 0.0, 0.05, 0.0001, 0.003),
    F::number("MDVP:PPQ", "Five-point period perturbation quotient", 0.0, 0.05, 0.0001, 0.003),
    F::number("Jitter:DDP", "Average absolute difference of differences", 0.0, 0.15, 0.0001, 0.009),
    F::number("MDVP:Shimmer", "Shimmer", 0.0, 0.2, 0.001, 0.03),
    F::number("MDVP:Shimmer(dB)", "Shimmer in dB", 0.0, 2.0, 0.01, 0.3),
    F::number("Shimmer:APQ3", "3-point amplitude perturbation quotient", 0.0, 0.1, 0.001, 0.015),
    F::number("Shimmer:APQ5", "5-point amplitude perturbation quotient", 0.0, 0.1, 0.001, 0.018),
    F::number("MDVP:APQ", "Amplitude perturbation quotient", 0.0, 0.15, 0.001, 0.02),
    F::number("Shimmer:DDA", "Average absolute differences", 0.0, 0.3, 0.001, 0.045),
    F::number("NHR", "Noise-to-harmonics ratio", 0.0, 1.0, 0.001, 0.02),
    F::number("HNR", "Harmonics-to-noise ratio", 0.0, 40.0, 0.1, 20.0),
    F::number("RPDE", "Recurrence period density entropy", 0.0, 1.0, 0.001, 0.5),
    F::number("DFA", "Detrended fluctuation analysis", 0.0, 1.0, 0.001, 0.7),
    F::number("spread1", "Fundamental frequency variation", -10.0, 0.0, 0.01, -6.0),
    F::number("spread2", "Fundamental frequency variation", 0.0, 1.0, 0.001, 0.2),
    F::number("D2", "Nonlinear dynamical complexity", 0.0, 5.0, 0.01, 2.5),
    F::number("PPE", "Pitch period entropy", 0.0, 1.0, 0.001, 0.2),
];

/// The descriptor table for `disease`, in display order.
pub fn fields(disease: DiseaseType) -> &'static [F] {
    match disease {
        DiseaseType::Diabetes => &DIABETES,
        DiseaseType::Heart => &HEART,
        DiseaseType::Stroke => &STROKE,
        DiseaseType::Parkinsons => &PARKINSONS,
    }
}
